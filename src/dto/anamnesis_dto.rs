use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::anamnesis::{AnamnesisSubmission, NumericField};

// Request de anamnesis: objeto plano, los numéricos pueden llegar como número o como string.
// Los campos quedan sin tipar hasta la validación para poder informar el valor recibido.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnamnesisRequest {
    // Datos personales
    pub name: Option<Value>,
    pub phone: Option<Value>,
    pub email: Option<Value>,
    pub age: Option<Value>,
    pub weight: Option<Value>,
    pub height: Option<Value>,

    // Contexto deportivo
    pub sport: Option<Value>,
    pub position: Option<Value>,
    pub level: Option<Value>,
    pub dominance: Option<Value>,
    pub experience: Option<Value>,

    // Objetivo y dolor
    pub goal: Option<Value>,
    pub pain_level: Option<Value>,
    pub pain_location: Option<Value>,
    pub pain_type: Option<Value>,

    // Carga de entrenamiento
    pub training_frequency: Option<Value>,
    pub training_hours: Option<Value>,
    pub recent_changes: Option<Value>,

    // Salud y estilo de vida
    pub injuries: Option<Value>,
    pub sleep_hours: Option<Value>,
    pub stress_level: Option<Value>,

    // Sello de tiempo del cliente
    pub submitted_at: Option<Value>,
}

impl AnamnesisRequest {
    /// Valor crudo de un campo numérico
    pub fn numeric(&self, field: NumericField) -> Option<&Value> {
        match field {
            NumericField::Age => self.age.as_ref(),
            NumericField::Weight => self.weight.as_ref(),
            NumericField::Height => self.height.as_ref(),
            NumericField::PainLevel => self.pain_level.as_ref(),
            NumericField::TrainingFrequency => self.training_frequency.as_ref(),
            NumericField::TrainingHours => self.training_hours.as_ref(),
            NumericField::SleepHours => self.sleep_hours.as_ref(),
        }
    }
}

// Datos devueltos al crear una anamnesis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnamnesisCreated {
    pub id: String,
    pub submitted_at: String,
}

impl From<&AnamnesisSubmission> for AnamnesisCreated {
    fn from(submission: &AnamnesisSubmission) -> Self {
        Self {
            id: submission.id.to_string(),
            submitted_at: submission.submitted_at.to_rfc3339(),
        }
    }
}
