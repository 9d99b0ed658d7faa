//! Payload normalizado que el wizard envía al endpoint

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::anamnesis::{Dominance, IntakeRecord, Level, PainType, StressLevel};

/// Registro congelado en el momento del envío, con los numéricos como números,
/// los booleanos como booleanos y el sello de tiempo del cliente.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub age: i32,
    pub weight: f64,
    pub height: f64,
    pub sport: String,
    pub position: String,
    pub level: Level,
    pub dominance: Dominance,
    pub goal: String,
    pub pain_level: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pain_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pain_type: Option<PainType>,
    pub training_frequency: i32,
    pub training_hours: f64,
    pub recent_changes: bool,
    pub injuries: String,
    pub sleep_hours: f64,
    pub stress_level: StressLevel,
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionPayload {
    /// Los datos de dolor solo viajan cuando se reporta dolor
    pub fn from_record(record: &IntakeRecord, submitted_at: DateTime<Utc>) -> Self {
        let pain_reported = record.pain_level > 0;
        Self {
            name: record.name.trim().to_string(),
            phone: record.phone.clone(),
            email: record.email.trim().to_string(),
            age: record.age,
            weight: record.weight,
            height: record.height,
            sport: record.sport.trim().to_string(),
            position: record.position.trim().to_string(),
            level: record.level,
            dominance: record.dominance,
            goal: record.goal.trim().to_string(),
            pain_level: record.pain_level,
            pain_location: pain_reported.then(|| record.pain_location.trim().to_string()),
            pain_type: if pain_reported { record.pain_type } else { None },
            training_frequency: record.training_frequency,
            training_hours: record.training_hours,
            recent_changes: record.recent_changes,
            injuries: record.injuries.trim().to_string(),
            sleep_hours: record.sleep_hours,
            stress_level: record.stress_level,
            submitted_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_wire_shape() {
        let record = IntakeRecord {
            name: " Ana ".to_string(),
            pain_level: 0,
            pain_location: "Rodilla".to_string(),
            pain_type: Some(PainType::Sordo),
            recent_changes: true,
            ..IntakeRecord::default()
        };
        let payload = SubmissionPayload::from_record(&record, Utc::now());
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value["name"], "Ana");
        assert!(value["age"].is_number());
        assert!(value["trainingHours"].is_number());
        assert_eq!(value["recentChanges"], true);
        assert!(value.get("painLocation").is_none());
        assert!(value.get("painType").is_none());
        assert!(value["submittedAt"].is_string());
    }

    #[test]
    fn test_pain_details_sent_when_pain_reported() {
        let record = IntakeRecord {
            pain_level: 6,
            pain_location: "Hombro".to_string(),
            pain_type: Some(PainType::Pulsatil),
            ..IntakeRecord::default()
        };
        let value = serde_json::to_value(SubmissionPayload::from_record(&record, Utc::now())).unwrap();
        assert_eq!(value["painLocation"], "Hombro");
        assert_eq!(value["painType"], "Pulsátil");
    }
}
