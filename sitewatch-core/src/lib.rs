use std::sync::Arc;

use sitewatch_utils::alerts::AlertBoard;

pub mod api;
pub mod config;
pub mod models;

pub use api::{ApiError, ApiResult, FieldErrors, SiteApi};
pub use config::Config;

/// Shared application context passed into views.
///
/// Cheap to clone because it only stores reference-counted shared state.
#[derive(Debug)]
pub struct Context<A> {
    pub api: Arc<A>,
    pub alerts: AlertBoard,
    pub config: Arc<Config>,
}

impl<A> Clone for Context<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            alerts: self.alerts.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl<A: SiteApi> Context<A> {
    /// Create a new application context.
    pub fn new(api: Arc<A>, config: Config) -> Self {
        Self {
            api,
            alerts: AlertBoard::new(config.alert_ttl),
            config: Arc::new(config),
        }
    }
}
