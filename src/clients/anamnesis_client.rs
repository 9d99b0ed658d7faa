//! Cliente HTTP de la API de anamnesis
//!
//! Envía el payload del wizard con `POST {base}/anamnesis`. El timeout se
//! configura en el cliente y se reporta como `SubmitError::Timeout`.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use crate::config::ClientConfig;
use crate::dto::{AnamnesisCreated, ApiResponse};
use crate::wizard::SubmissionPayload;

/// Errores de envío del lado cliente
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("la petición superó el tiempo de espera")]
    Timeout,

    #[error("error de red: {0}")]
    Transport(String),

    #[error("el servidor respondió {status}: {message}")]
    Rejected {
        status: u16,
        message: String,
        body: Option<Value>,
    },

    #[error("respuesta inválida: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for SubmitError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            SubmitError::Timeout
        } else {
            SubmitError::Transport(error.to_string())
        }
    }
}

/// Destino del envío de la anamnesis
#[async_trait]
pub trait IntakeSubmitter: Send + Sync {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<AnamnesisCreated, SubmitError>;
}

/// Cliente HTTP de la API de anamnesis
pub struct AnamnesisClient {
    client: Client,
    url: String,
}

impl AnamnesisClient {
    pub fn new(config: &ClientConfig) -> Result<Self, SubmitError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            url: config.anamnesis_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl IntakeSubmitter for AnamnesisClient {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<AnamnesisCreated, SubmitError> {
        tracing::info!("📤 Enviando anamnesis a {}", self.url);

        let response = self.client.post(&self.url).json(payload).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.json::<Value>().await.ok();
            let message = body
                .as_ref()
                .and_then(|b| b.get("message"))
                .and_then(Value::as_str)
                .unwrap_or("Error al enviar el formulario")
                .to_string();
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
                message,
                body,
            });
        }

        let body: ApiResponse<AnamnesisCreated> = response
            .json()
            .await
            .map_err(|e| SubmitError::InvalidResponse(e.to_string()))?;

        body.data
            .ok_or_else(|| SubmitError::InvalidResponse("respuesta sin datos".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_client_uses_configured_url() {
        let config = ClientConfig {
            base_url: "http://127.0.0.1:9/api/".to_string(),
            timeout: Duration::from_secs(1),
        };
        let client = AnamnesisClient::new(&config).unwrap();
        assert_eq!(client.url(), "http://127.0.0.1:9/api/anamnesis");
    }
}
