//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use decision_mirror_core::ports::{AnalysisService, CredentialStore};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<dyn CredentialStore>,
    pub analysis: Arc<dyn AnalysisService>,
    pub config: Arc<Config>,
}
