use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};

use crate::controllers::AnamnesisController;
use crate::dto::{AnamnesisCreated, AnamnesisRequest, ApiResponse};
use crate::services::RequestMetadata;
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, AppError};

pub fn create_anamnesis_router() -> Router<AppState> {
    Router::new().route("/anamnesis", post(submit_anamnesis))
}

async fn submit_anamnesis(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<AnamnesisRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<AnamnesisCreated>>), AppError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!("⚠️ Cuerpo de anamnesis rechazado: {}", rejection.body_text());
        bad_request_error("El cuerpo de la petición debe ser un objeto JSON")
    })?;

    let controller =
        AnamnesisController::new(state.store.clone(), state.config.expose_error_details());
    let response = controller.submit(request, request_metadata(&headers)).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// IP del cliente (primer salto de `X-Forwarded-For` o `X-Real-IP`) y user agent
fn request_metadata(headers: &HeaderMap) -> RequestMetadata {
    let header_text = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    };

    let client_ip = header_text("x-forwarded-for")
        .and_then(|forwarded| forwarded.split(',').next().map(|ip| ip.trim().to_string()))
        .filter(|ip| !ip.is_empty())
        .or_else(|| header_text("x-real-ip"));

    RequestMetadata {
        client_ip,
        user_agent: header_text(header::USER_AGENT.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_request_metadata_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.7, 10.0.0.1"));
        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.1"));
        headers.insert(header::USER_AGENT, HeaderValue::from_static("Mozilla/5.0"));

        let metadata = request_metadata(&headers);
        assert_eq!(metadata.client_ip.as_deref(), Some("203.0.113.7"));
        assert_eq!(metadata.user_agent.as_deref(), Some("Mozilla/5.0"));
    }

    #[test]
    fn test_request_metadata_falls_back_to_real_ip() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.4"));

        let metadata = request_metadata(&headers);
        assert_eq!(metadata.client_ip.as_deref(), Some("198.51.100.4"));
        assert_eq!(metadata.user_agent, None);
    }
}
