//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::AnamnesisStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AnamnesisStore>,
    pub config: EnvironmentConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn AnamnesisStore>, config: EnvironmentConfig) -> Self {
        Self { store, config }
    }
}
