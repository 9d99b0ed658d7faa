//! Rutas HTTP
//!
//! Router principal con las capas de CORS, trazas y límite de tamaño.

pub mod anamnesis_routes;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use crate::state::AppState;

/// Tamaño máximo del cuerpo de una petición
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Crear el router completo de la aplicación
pub fn create_router(state: AppState) -> Router {
    let cors = if state.config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(state.config.cors_origins.clone())
    };

    Router::new()
        .route("/", get(root))
        .nest("/api", anamnesis_routes::create_anamnesis_router())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Endpoint de vida
async fn root() -> &'static str {
    "Drolean API is running"
}
