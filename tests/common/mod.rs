#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceExt;

use drolean_intake::config::EnvironmentConfig;
use drolean_intake::models::anamnesis::{PainType, StressLevel};
use drolean_intake::repositories::{AnamnesisStore, InMemoryAnamnesisRepository};
use drolean_intake::routes::create_router;
use drolean_intake::state::AppState;
use drolean_intake::wizard::{FieldUpdate, IntakeWizard, WizardStep};

// App de test con almacén en memoria
pub fn test_app() -> (Router, InMemoryAnamnesisRepository) {
    let store = InMemoryAnamnesisRepository::new();
    let app = app_with_store(Arc::new(store.clone()), EnvironmentConfig::default());
    (app, store)
}

pub fn app_with_store(store: Arc<dyn AnamnesisStore>, config: EnvironmentConfig) -> Router {
    create_router(AppState::new(store, config))
}

pub fn production_config() -> EnvironmentConfig {
    EnvironmentConfig {
        environment: "production".to_string(),
        ..EnvironmentConfig::default()
    }
}

pub fn minimal_payload() -> Value {
    json!({
        "name": "Ana",
        "phone": "3001234567",
        "sport": "Running",
        "goal": "Perder grasa corporal"
    })
}

pub async fn post_anamnesis(app: &Router, body: Value) -> (StatusCode, Value) {
    post_raw(app, body.to_string(), &[]).await
}

pub async fn post_raw(
    app: &Router,
    body: String,
    headers: &[(&str, &str)],
) -> (StatusCode, Value) {
    let mut request = Request::builder()
        .method("POST")
        .uri("/api/anamnesis")
        .header("content-type", "application/json");
    for (name, value) in headers {
        request = request.header(*name, *value);
    }

    let response = app
        .clone()
        .oneshot(request.body(Body::from(body)).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

// Levantar la app en un puerto efímero
pub async fn spawn_app(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

// Completar los cuatro pasos con datos válidos, dejando el wizard en el último paso
pub fn fill_valid_wizard(wizard: &mut IntakeWizard) {
    wizard.update_field(FieldUpdate::Name("Ana Gómez".to_string()));
    wizard.update_field(FieldUpdate::Phone("3001234567".to_string()));
    wizard.update_field(FieldUpdate::Sport("Running".to_string()));
    wizard.update_field(FieldUpdate::Age(31));
    assert!(wizard.advance(), "personal: {:?}", wizard.errors());

    wizard.update_field(FieldUpdate::Goal("Bajar de 45 minutos en 10K".to_string()));
    wizard.update_field(FieldUpdate::PainLevel(3));
    wizard.update_field(FieldUpdate::PainLocation("Rodilla derecha".to_string()));
    wizard.update_field(FieldUpdate::PainType(Some(PainType::Punzante)));
    assert!(wizard.advance(), "goals: {:?}", wizard.errors());

    wizard.update_field(FieldUpdate::TrainingFrequency(4));
    wizard.update_field(FieldUpdate::TrainingHours(1.5));
    wizard.update_field(FieldUpdate::RecentChanges(true));
    assert!(wizard.advance(), "training: {:?}", wizard.errors());

    wizard.update_field(FieldUpdate::Email("ana@example.com".to_string()));
    wizard.update_field(FieldUpdate::SleepHours(7.5));
    wizard.update_field(FieldUpdate::StressLevel(StressLevel::Alto));
    assert_eq!(wizard.step(), WizardStep::Health);
}
