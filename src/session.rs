//! Session lifecycle.
//!
//! The original app hung everything off a process-wide singleton. Here the
//! coordinator is an explicitly constructed value: the consumer builds it
//! at startup with its three collaborators, holds it for the lifetime of
//! the UI, and tears it down at shutdown.

use std::sync::Arc;

use crate::access::AccessGate;
use crate::config::SessionConfig;
use crate::playback::PlaybackReconciliationWorkflow;
use crate::providers::{AuthorizationService, CatalogProvider, PlayerControl};
use crate::search::CatalogSearchWorkflow;
use crate::store::SessionStore;

pub struct Session {
    store: Arc<SessionStore>,
    access: AccessGate,
    search: CatalogSearchWorkflow,
    playback: PlaybackReconciliationWorkflow,
    player: Arc<dyn PlayerControl>,
}

impl Session {
    pub fn new(
        config: SessionConfig,
        auth: Arc<dyn AuthorizationService>,
        catalog: Arc<dyn CatalogProvider>,
        player: Arc<dyn PlayerControl>,
    ) -> Arc<Self> {
        let store = SessionStore::new();
        let access = AccessGate::new(auth, Arc::clone(&store));
        let search = CatalogSearchWorkflow::new(
            Arc::clone(&catalog),
            Arc::clone(&store),
            config.clone(),
        );
        let playback = PlaybackReconciliationWorkflow::new(
            catalog,
            Arc::clone(&player),
            Arc::clone(&store),
        );

        log::info!("[Session] Created (suppress_inline_errors: {})", config.suppress_inline_errors);
        Arc::new(Self {
            store,
            access,
            search,
            playback,
            player,
        })
    }

    /// Request service access once, as the original did when its view
    /// first appeared.
    pub async fn startup(&self) {
        self.access.request_access().await;
    }

    /// Stop playback and release any stuck activity so a consumer torn
    /// down mid-request does not leave reload permanently disabled.
    pub fn shutdown(&self) {
        log::info!("[Session] Shutting down");
        self.player.stop();
        self.store.reset_activity();
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub fn access(&self) -> &AccessGate {
        &self.access
    }

    pub fn search(&self) -> &CatalogSearchWorkflow {
        &self.search
    }

    pub fn playback(&self) -> &PlaybackReconciliationWorkflow {
        &self.playback
    }
}
