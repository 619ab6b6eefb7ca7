//! Catalog search workflow.
//!
//! Turns free-text input into a ranked album list with single-flight
//! discipline: the reload affordance is disabled while a request is in
//! flight, and a response that arrives after a newer search has started is
//! discarded via a request-generation token instead of overwriting the
//! newer result.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::config::SessionConfig;
use crate::errors::AppError;
use crate::models::SearchQuery;
use crate::providers::CatalogProvider;
use crate::store::SessionStore;

pub struct CatalogSearchWorkflow {
    catalog: Arc<dyn CatalogProvider>,
    store: Arc<SessionStore>,
    config: SessionConfig,
    generation: AtomicU64,
}

impl CatalogSearchWorkflow {
    pub fn new(
        catalog: Arc<dyn CatalogProvider>,
        store: Arc<SessionStore>,
        config: SessionConfig,
    ) -> Self {
        Self {
            catalog,
            store,
            config,
            generation: AtomicU64::new(0),
        }
    }

    /// Search the catalog for albums matching `term` and publish the
    /// results through the store.
    ///
    /// The album list is cleared up front, so an error or an empty
    /// response leaves an empty list rather than stale results. Zero hits
    /// is a success. Failures land in the inline error slot unless the
    /// config suppresses them, and are returned to the caller either way.
    pub async fn search(&self, term: &str) -> Result<(), AppError> {
        self.store.clear_inline_error();
        self.store.clear_albums();

        let _activity = self.store.begin_activity();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let query = SearchQuery::albums(term).with_limit(self.config.search_limit);
        log::info!(
            "[CatalogSearch] Searching {} for \"{}\"",
            self.catalog.name(),
            term
        );

        let result = self.catalog.search_albums(&query).await;

        if self.generation.load(Ordering::SeqCst) != generation {
            // A newer search took over while this one was in flight.
            log::debug!("[CatalogSearch] Dropping superseded response for \"{}\"", term);
            return Ok(());
        }

        match result {
            Ok(albums) => {
                let count = albums.len();
                self.store.set_albums(albums);
                self.store.set_status(format!("Got {} albums", count));
                Ok(())
            }
            Err(e) => {
                let error = AppError::from(e);
                if self.config.suppress_inline_errors {
                    log::debug!("[CatalogSearch] Suppressed inline error: {}", error);
                } else {
                    self.store.set_inline_error(error.clone());
                }
                Err(error)
            }
        }
    }
}
