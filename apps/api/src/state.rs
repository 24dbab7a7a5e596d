use std::sync::Arc;

use crate::openalex::InstitutionSource;

/// Shared application state.
pub struct AppState {
    pub source: Arc<dyn InstitutionSource>,
    /// Page size for `/universities`.
    pub per_page: u32,
}

impl AppState {
    pub fn new(source: Arc<dyn InstitutionSource>, per_page: u32) -> Self {
        Self { source, per_page }
    }
}
