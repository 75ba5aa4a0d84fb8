use crate::config::Config;
use crate::screening::batch::Screener;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Extraction, scoring and the process-wide judge, built once at startup.
    pub screener: Screener,
}
