use std::sync::Arc;

use crate::catalog::store::CatalogStore;
use crate::config::Config;
use crate::users::store::UserStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Live catalog snapshot. Handlers take one `snapshot()` per request.
    pub catalog: CatalogStore,
    /// Pluggable user/skill roster backend. Default: PgUserStore.
    pub users: Arc<dyn UserStore>,
}
