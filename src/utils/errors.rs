//! Sistema de manejo de errores
//!
//! Este módulo define los errores de la API y su conversión a respuestas
//! HTTP con el cuerpo JSON que espera el formulario de anamnesis.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing required fields: {0:?}")]
    MissingFields(Vec<String>),

    #[error("Invalid value for {field}: expected {expected_range}")]
    InvalidField {
        field: String,
        value: serde_json::Value,
        expected_range: String,
    },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {message}")]
    Conflict {
        message: String,
        detail: Option<String>,
    },

    #[error("Internal server error: {message}")]
    Internal {
        message: String,
        detail: Option<String>,
    },
}

/// Cuerpo de error de la API
#[derive(Debug, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingFields(_) | AppError::InvalidField { .. } | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn to_error_response(&self) -> ErrorResponse {
        match self {
            AppError::MissingFields(fields) => ErrorResponse {
                message: "Campos obligatorios faltantes".to_string(),
                missing_fields: Some(fields.clone()),
                ..Default::default()
            },
            AppError::InvalidField {
                field,
                value,
                expected_range,
            } => ErrorResponse {
                message: format!("Valor inválido para {}", field),
                field: Some(field.clone()),
                value: Some(value.clone()),
                expected_range: Some(expected_range.clone()),
                ..Default::default()
            },
            AppError::BadRequest(msg) => ErrorResponse {
                message: msg.clone(),
                ..Default::default()
            },
            AppError::Conflict { message, detail } | AppError::Internal { message, detail } => {
                ErrorResponse {
                    message: message.clone(),
                    error: detail.clone(),
                    ..Default::default()
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("❌ {}", self);
        } else {
            tracing::warn!("⚠️ {}", self);
        }
        (status, Json(self.to_error_response())).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de campo inválido
pub fn invalid_field_error(
    field: &str,
    value: serde_json::Value,
    expected_range: impl Into<String>,
) -> AppError {
    AppError::InvalidField {
        field: field.to_string(),
        value,
        expected_range: expected_range.into(),
    }
}

/// Función helper para crear errores de solicitud incorrecta
pub fn bad_request_error(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}

/// Función helper para crear errores de conflicto; el detalle solo se expone fuera de producción
pub fn conflict_error(message: &str, detail: String, expose_detail: bool) -> AppError {
    AppError::Conflict {
        message: message.to_string(),
        detail: expose_detail.then_some(detail),
    }
}

/// Función helper para crear errores internos; el detalle solo se expone fuera de producción
pub fn internal_error(message: &str, detail: String, expose_detail: bool) -> AppError {
    AppError::Internal {
        message: message.to_string(),
        detail: expose_detail.then_some(detail),
    }
}
