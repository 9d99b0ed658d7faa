//! Configuración del cliente del wizard
//!
//! URL base de la API y timeout del envío de la anamnesis.

use anyhow::{Context, Result};
use std::time::Duration;

/// URL base por defecto, igual a la del formulario web
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";

/// Configuración del cliente HTTP del wizard
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(base_url) = std::env::var("ANAMNESIS_API_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(secs) = std::env::var("ANAMNESIS_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .context("ANAMNESIS_TIMEOUT_SECS must be a valid number")?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    /// URL completa del endpoint de anamnesis
    pub fn anamnesis_url(&self) -> String {
        format!("{}/anamnesis", self.base_url.trim_end_matches('/'))
    }
}
