mod common;

use axum::{routing::post, Router};
use chrono::Utc;
use std::time::Duration;

use common::{fill_valid_wizard, spawn_app, test_app};
use drolean_intake::clients::{AnamnesisClient, IntakeSubmitter, SubmitError};
use drolean_intake::config::ClientConfig;
use drolean_intake::wizard::{IntakeWizard, SubmissionPayload, SubmissionStatus, WizardError};

fn client_for(base_url: String, timeout: Duration) -> AnamnesisClient {
    AnamnesisClient::new(&ClientConfig { base_url, timeout }).unwrap()
}

#[tokio::test]
async fn test_wizard_submits_to_running_server() {
    let (app, store) = test_app();
    let addr = spawn_app(app).await;
    let client = client_for(format!("http://{}/api", addr), Duration::from_secs(5));

    let mut wizard = IntakeWizard::new();
    fill_valid_wizard(&mut wizard);
    let receipt = wizard.submit(&client).await.unwrap();

    assert!(matches!(wizard.status(), SubmissionStatus::Success(_)));

    let rows = store.submissions().await;
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.id.to_string(), receipt.id);
    assert_eq!(row.name, "Ana Gómez");
    assert_eq!(row.phone, "300-123-4567");
    assert_eq!(row.email.as_deref(), Some("ana@example.com"));
    assert_eq!(row.age, Some(31));
    assert_eq!(row.pain_level, 3);
    assert_eq!(row.pain_type.as_deref(), Some("Punzante"));
    assert_eq!(row.training_frequency, 4);
    assert_eq!(row.training_hours, Some(1.5));
    assert!(row.recent_changes);
    assert_eq!(row.stress_level, "Alto");
    assert!(row.client_submitted_at.is_some());
}

#[tokio::test]
async fn test_server_rejection_surfaces_status() {
    let (app, store) = test_app();
    let addr = spawn_app(app).await;
    let client = client_for(format!("http://{}/api", addr), Duration::from_secs(5));

    let mut wizard = IntakeWizard::new();
    fill_valid_wizard(&mut wizard);
    let mut payload = SubmissionPayload::from_record(wizard.record(), Utc::now());
    payload.age = 5;

    match client.submit(&payload).await {
        Err(SubmitError::Rejected { status, body, .. }) => {
            assert_eq!(status, 400);
            let body = body.unwrap();
            assert_eq!(body["field"], "age");
            assert_eq!(body["expectedRange"], "16-80");
        }
        other => panic!("expected rejection, got {:?}", other),
    }
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let slow = Router::new().route(
        "/api/anamnesis",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "tarde"
        }),
    );
    let addr = spawn_app(slow).await;
    let client = client_for(format!("http://{}/api", addr), Duration::from_millis(200));

    let mut wizard = IntakeWizard::new();
    fill_valid_wizard(&mut wizard);
    let result = wizard.submit(&client).await;

    assert!(matches!(
        result,
        Err(WizardError::Submission(SubmitError::Timeout))
    ));
    assert!(matches!(wizard.status(), SubmissionStatus::Error(_)));
    assert_eq!(wizard.record().name, "Ana Gómez");
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    // Reservar un puerto y liberarlo para que nadie escuche en él
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(format!("http://{}/api", addr), Duration::from_secs(2));
    let mut wizard = IntakeWizard::new();
    fill_valid_wizard(&mut wizard);
    let payload = SubmissionPayload::from_record(wizard.record(), Utc::now());

    let result = client.submit(&payload).await;
    assert!(matches!(result, Err(SubmitError::Transport(_))));
}
