use std::sync::Arc;

use arview::ArPipeline;

use crate::catalog::IdolCatalog;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`. Cheaply cloneable; both fields are immutable after
/// startup and safe to share across concurrent requests.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<IdolCatalog>,
    pub pipeline: Arc<ArPipeline>,
}
