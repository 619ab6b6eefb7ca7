//! Access gate for the external streaming service.
//!
//! Owns the cached authorization state (published through the session
//! store) and is its only writer.

use std::sync::Arc;

use crate::errors::AppError;
use crate::models::AuthorizationState;
use crate::providers::AuthorizationService;
use crate::store::SessionStore;

/// `ensure_access` gives up after this many authorization requests. The
/// bound only exists to stop looping if the service keeps answering
/// `NotDetermined`.
const MAX_ACCESS_ATTEMPTS: u32 = 3;

pub struct AccessGate {
    service: Arc<dyn AuthorizationService>,
    store: Arc<SessionStore>,
}

impl AccessGate {
    pub fn new(service: Arc<dyn AuthorizationService>, store: Arc<SessionStore>) -> Self {
        Self { service, store }
    }

    /// Pure read of the cached state; no side effect.
    pub fn current_status(&self) -> AuthorizationState {
        self.store.authorization()
    }

    /// The error a consumer should display while access is not granted.
    /// Takes precedence over both error channels.
    pub fn authorization_error(&self) -> Option<AppError> {
        match self.current_status() {
            AuthorizationState::NotDetermined | AuthorizationState::Authorized => None,
            AuthorizationState::Denied => Some(AppError::AuthorizationDenied),
            AuthorizationState::Restricted => Some(AppError::AuthorizationRestricted),
            AuthorizationState::Unknown => Some(AppError::AuthorizationUnknown),
        }
    }

    /// Call the external authorization prompt exactly once, cache and
    /// publish the result.
    pub async fn request_access(&self) -> AuthorizationState {
        let status = self.service.request_authorization().await;
        log::info!("[AccessGate] Authorization status: {}", status.as_str());
        self.store.set_authorization(status);
        status
    }

    /// Idempotent access check with bounded retry. Prompts only while the
    /// state is `NotDetermined`; any terminal non-authorized state fails
    /// immediately with its matching error.
    pub async fn ensure_access(&self) -> Result<(), AppError> {
        let mut attempts = 0u32;
        loop {
            match self.current_status() {
                AuthorizationState::Authorized => return Ok(()),
                AuthorizationState::NotDetermined => {
                    if attempts >= MAX_ACCESS_ATTEMPTS {
                        log::warn!(
                            "[AccessGate] Still not determined after {} attempts, giving up",
                            attempts
                        );
                        return Err(AppError::TooManyAttempts);
                    }
                    attempts += 1;
                    self.request_access().await;
                }
                AuthorizationState::Denied => return Err(AppError::AuthorizationDenied),
                AuthorizationState::Restricted => return Err(AppError::AuthorizationRestricted),
                AuthorizationState::Unknown => return Err(AppError::AuthorizationUnknown),
            }
        }
    }
}
