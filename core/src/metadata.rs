//! Observable cache of reference data (departments and document types).
//!
//! # Design
//! `MetadataStore` is an owned object rather than a global, so each test or
//! UI surface can hold its own instance (wrap it in an `Arc` to share it).
//! The three cells are `tokio::sync::watch` channels: readers either take a
//! snapshot or subscribe to changes.
//!
//! `refresh` fetches both collections concurrently and replaces both cells
//! only after both fetches succeed. Overlapping refreshes are not
//! deduplicated; each cell keeps whichever successful write landed last.

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::api::DocumentApi;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{Department, DocumentType};

pub struct MetadataStore<T> {
    api: DocumentApi<T>,
    departments: watch::Sender<Vec<Department>>,
    document_types: watch::Sender<Vec<DocumentType>>,
    loading: watch::Sender<bool>,
}

/// Clears the loading flag on every exit from `refresh`, including when the
/// refresh future is dropped mid-flight.
struct LoadingGuard<'a> {
    flag: &'a watch::Sender<bool>,
}

impl<'a> LoadingGuard<'a> {
    fn start(flag: &'a watch::Sender<bool>) -> Self {
        flag.send_replace(true);
        Self { flag }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.flag.send_replace(false);
    }
}

impl<T: Transport> MetadataStore<T> {
    /// An empty store; nothing is fetched until [`MetadataStore::refresh`].
    pub fn new(api: DocumentApi<T>) -> Self {
        Self {
            api,
            departments: watch::Sender::new(Vec::new()),
            document_types: watch::Sender::new(Vec::new()),
            loading: watch::Sender::new(false),
        }
    }

    pub fn api(&self) -> &DocumentApi<T> {
        &self.api
    }

    /// Fetch departments and document types in parallel and replace both
    /// cells. If either fetch fails the first error is returned and neither
    /// cell changes.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        let _loading = LoadingGuard::start(&self.loading);

        let (departments, document_types) =
            tokio::try_join!(self.api.fetch_departments(), self.api.fetch_document_types())
                .inspect_err(|e| warn!(error = %e, "reference data refresh failed"))?;

        debug!(
            departments = departments.len(),
            document_types = document_types.len(),
            "reference data refreshed"
        );
        self.departments.send_replace(departments);
        self.document_types.send_replace(document_types);
        Ok(())
    }

    pub fn departments(&self) -> Vec<Department> {
        self.departments.borrow().clone()
    }

    pub fn document_types(&self) -> Vec<DocumentType> {
        self.document_types.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    pub fn subscribe_departments(&self) -> watch::Receiver<Vec<Department>> {
        self.departments.subscribe()
    }

    pub fn subscribe_document_types(&self) -> watch::Receiver<Vec<DocumentType>> {
        self.document_types.subscribe()
    }

    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    pub fn department(&self, code: &str) -> Option<Department> {
        self.departments.borrow().iter().find(|d| d.code == code).cloned()
    }

    pub fn document_type(&self, code: &str) -> Option<DocumentType> {
        self.document_types.borrow().iter().find(|t| t.code == code).cloned()
    }

    /// Active document types in fetched order.
    pub fn active_document_types(&self) -> Vec<DocumentType> {
        self.document_types
            .borrow()
            .iter()
            .filter(|t| t.active)
            .cloned()
            .collect()
    }
}
