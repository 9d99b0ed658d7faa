//! Modelo de Anamnesis
//!
//! Este módulo contiene el registro de anamnesis atlética, sus enumeraciones
//! y la tabla de rangos numéricos compartida por el wizard y el endpoint.
//! Mapea exactamente a la tabla `anamnesis_submissions`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Texto que no corresponde a ninguna opción de una enumeración
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("opción desconocida: {0}")]
pub struct UnknownVariant(pub String);

/// Nivel competitivo del atleta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Level {
    Recreativo,
    #[default]
    Amateur,
    #[serde(rename = "Élite")]
    Elite,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Recreativo, Level::Amateur, Level::Elite];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Recreativo => "Recreativo",
            Level::Amateur => "Amateur",
            Level::Elite => "Élite",
        }
    }
}

impl FromStr for Level {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// Lateralidad dominante
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Dominance {
    #[default]
    Diestro,
    Zurdo,
}

impl Dominance {
    pub const ALL: [Dominance; 2] = [Dominance::Diestro, Dominance::Zurdo];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dominance::Diestro => "Diestro",
            Dominance::Zurdo => "Zurdo",
        }
    }
}

impl FromStr for Dominance {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// Tipo de dolor reportado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PainType {
    Punzante,
    Quemante,
    Opresivo,
    Sordo,
    #[serde(rename = "Pulsátil")]
    Pulsatil,
}

impl PainType {
    pub const ALL: [PainType; 5] = [
        PainType::Punzante,
        PainType::Quemante,
        PainType::Opresivo,
        PainType::Sordo,
        PainType::Pulsatil,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PainType::Punzante => "Punzante",
            PainType::Quemante => "Quemante",
            PainType::Opresivo => "Opresivo",
            PainType::Sordo => "Sordo",
            PainType::Pulsatil => "Pulsátil",
        }
    }
}

impl FromStr for PainType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// Nivel de estrés percibido
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StressLevel {
    Bajo,
    #[default]
    Medio,
    Alto,
}

impl StressLevel {
    pub const ALL: [StressLevel; 3] = [StressLevel::Bajo, StressLevel::Medio, StressLevel::Alto];

    pub fn as_str(&self) -> &'static str {
        match self {
            StressLevel::Bajo => "Bajo",
            StressLevel::Medio => "Medio",
            StressLevel::Alto => "Alto",
        }
    }
}

impl FromStr for StressLevel {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|s_level| s_level.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// Rango numérico inclusivo
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Etiqueta `min-max` usada en las respuestas de error (ej: `16-80`, `0.5-5`)
    pub fn label(&self) -> String {
        format!("{}-{}", self.min, self.max)
    }
}

/// Campos numéricos del registro, en el orden en que el endpoint los valida
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericField {
    Age,
    Weight,
    Height,
    PainLevel,
    TrainingFrequency,
    TrainingHours,
    SleepHours,
}

impl NumericField {
    pub const ALL: [NumericField; 7] = [
        NumericField::Age,
        NumericField::Weight,
        NumericField::Height,
        NumericField::PainLevel,
        NumericField::TrainingFrequency,
        NumericField::TrainingHours,
        NumericField::SleepHours,
    ];

    /// Nombre del campo en el JSON
    pub fn name(&self) -> &'static str {
        self.field().name()
    }

    pub fn field(&self) -> IntakeField {
        match self {
            NumericField::Age => IntakeField::Age,
            NumericField::Weight => IntakeField::Weight,
            NumericField::Height => IntakeField::Height,
            NumericField::PainLevel => IntakeField::PainLevel,
            NumericField::TrainingFrequency => IntakeField::TrainingFrequency,
            NumericField::TrainingHours => IntakeField::TrainingHours,
            NumericField::SleepHours => IntakeField::SleepHours,
        }
    }

    pub fn range(&self) -> NumericRange {
        let (min, max) = match self {
            NumericField::Age => (16.0, 80.0),
            NumericField::Weight => (40.0, 150.0),
            NumericField::Height => (140.0, 220.0),
            NumericField::PainLevel => (0.0, 10.0),
            NumericField::TrainingFrequency => (0.0, 14.0),
            NumericField::TrainingHours => (0.5, 5.0),
            NumericField::SleepHours => (3.0, 12.0),
        };
        NumericRange { min, max }
    }

    /// Los campos enteros rechazan valores con parte decimal
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            NumericField::Age | NumericField::PainLevel | NumericField::TrainingFrequency
        )
    }
}

/// Identificador de cada campo del formulario (clave del mapa de errores)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntakeField {
    Name,
    Phone,
    Email,
    Age,
    Weight,
    Height,
    Sport,
    Position,
    Level,
    Dominance,
    Goal,
    PainLevel,
    PainLocation,
    PainType,
    TrainingFrequency,
    TrainingHours,
    RecentChanges,
    Injuries,
    SleepHours,
    StressLevel,
}

impl IntakeField {
    pub fn name(&self) -> &'static str {
        match self {
            IntakeField::Name => "name",
            IntakeField::Phone => "phone",
            IntakeField::Email => "email",
            IntakeField::Age => "age",
            IntakeField::Weight => "weight",
            IntakeField::Height => "height",
            IntakeField::Sport => "sport",
            IntakeField::Position => "position",
            IntakeField::Level => "level",
            IntakeField::Dominance => "dominance",
            IntakeField::Goal => "goal",
            IntakeField::PainLevel => "painLevel",
            IntakeField::PainLocation => "painLocation",
            IntakeField::PainType => "painType",
            IntakeField::TrainingFrequency => "trainingFrequency",
            IntakeField::TrainingHours => "trainingHours",
            IntakeField::RecentChanges => "recentChanges",
            IntakeField::Injuries => "injuries",
            IntakeField::SleepHours => "sleepHours",
            IntakeField::StressLevel => "stressLevel",
        }
    }
}

/// Registro completo de anamnesis tal como lo arma el wizard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeRecord {
    // Datos personales
    pub name: String,
    pub phone: String,
    pub email: String,
    pub age: i32,
    pub weight: f64,
    pub height: f64,

    // Contexto deportivo
    pub sport: String,
    pub position: String,
    pub level: Level,
    pub dominance: Dominance,

    // Objetivo y dolor
    pub goal: String,
    pub pain_level: i32,
    pub pain_location: String,
    pub pain_type: Option<PainType>,

    // Carga de entrenamiento
    pub training_frequency: i32,
    pub training_hours: f64,
    pub recent_changes: bool,

    // Salud y estilo de vida
    pub injuries: String,
    pub sleep_hours: f64,
    pub stress_level: StressLevel,
}

impl Default for IntakeRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            phone: String::new(),
            email: String::new(),
            age: 25,
            weight: 70.0,
            height: 170.0,
            sport: String::new(),
            position: String::new(),
            level: Level::default(),
            dominance: Dominance::default(),
            goal: String::new(),
            pain_level: 0,
            pain_location: String::new(),
            pain_type: None,
            training_frequency: 3,
            training_hours: 1.0,
            recent_changes: false,
            injuries: String::new(),
            sleep_hours: 7.0,
            stress_level: StressLevel::default(),
        }
    }
}

impl IntakeRecord {
    /// Valor numérico de un campo, para las reglas de rango
    pub fn numeric(&self, field: NumericField) -> f64 {
        match field {
            NumericField::Age => self.age as f64,
            NumericField::Weight => self.weight,
            NumericField::Height => self.height,
            NumericField::PainLevel => self.pain_level as f64,
            NumericField::TrainingFrequency => self.training_frequency as f64,
            NumericField::TrainingHours => self.training_hours,
            NumericField::SleepHours => self.sleep_hours,
        }
    }
}

/// Anamnesis normalizada lista para insertar
#[derive(Debug, Clone, PartialEq)]
pub struct NewAnamnesis {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub age: Option<i32>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub sport: String,
    pub position: Option<String>,
    pub level: Level,
    pub dominance: Dominance,
    pub experience: String,
    pub goal: String,
    pub pain_level: i32,
    pub pain_location: Option<String>,
    pub pain_type: Option<PainType>,
    pub training_frequency: i32,
    pub training_hours: Option<f64>,
    pub recent_changes: bool,
    pub injuries: Option<String>,
    pub sleep_hours: Option<f64>,
    pub stress_level: StressLevel,
    pub client_submitted_at: Option<DateTime<Utc>>,
    pub client_ip: Option<String>,
    pub user_agent: Option<String>,
}

/// Fila persistida en `anamnesis_submissions`
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AnamnesisSubmission {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub age: Option<i32>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub sport: String,
    pub position: Option<String>,
    pub level: String,
    pub dominance: String,
    pub experience: String,
    pub goal: String,
    pub pain_level: i32,
    pub pain_location: Option<String>,
    pub pain_type: Option<String>,
    pub training_frequency: i32,
    pub training_hours: Option<f64>,
    pub recent_changes: bool,
    pub injuries: Option<String>,
    pub sleep_hours: Option<f64>,
    pub stress_level: String,
    pub client_submitted_at: Option<DateTime<Utc>>,
    pub client_ip: Option<String>,
    pub user_agent: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

impl AnamnesisSubmission {
    /// Construir la fila a partir de los datos normalizados
    pub fn from_new(id: Uuid, submitted_at: DateTime<Utc>, new: NewAnamnesis) -> Self {
        Self {
            id,
            name: new.name,
            phone: new.phone,
            email: new.email,
            age: new.age,
            weight: new.weight,
            height: new.height,
            sport: new.sport,
            position: new.position,
            level: new.level.as_str().to_string(),
            dominance: new.dominance.as_str().to_string(),
            experience: new.experience,
            goal: new.goal,
            pain_level: new.pain_level,
            pain_location: new.pain_location,
            pain_type: new.pain_type.map(|p| p.as_str().to_string()),
            training_frequency: new.training_frequency,
            training_hours: new.training_hours,
            recent_changes: new.recent_changes,
            injuries: new.injuries,
            sleep_hours: new.sleep_hours,
            stress_level: new.stress_level.as_str().to_string(),
            client_submitted_at: new.client_submitted_at,
            client_ip: new.client_ip,
            user_agent: new.user_agent,
            submitted_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(serde_json::to_value(Level::Elite).unwrap(), "Élite");
        assert_eq!(serde_json::to_value(PainType::Pulsatil).unwrap(), "Pulsátil");
        assert_eq!("Élite".parse::<Level>(), Ok(Level::Elite));
        assert_eq!(
            "alto".parse::<StressLevel>(),
            Err(UnknownVariant("alto".to_string()))
        );
        assert_eq!("Pulsátil".parse::<PainType>(), Ok(PainType::Pulsatil));
    }

    #[test]
    fn test_range_labels() {
        assert_eq!(NumericField::Age.range().label(), "16-80");
        assert_eq!(NumericField::TrainingHours.range().label(), "0.5-5");
        assert_eq!(NumericField::SleepHours.range().label(), "3-12");
    }

    #[test]
    fn test_default_record_numerics_in_range() {
        let record = IntakeRecord::default();
        for field in NumericField::ALL {
            assert!(field.range().contains(record.numeric(field)), "{:?}", field);
        }
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let value = serde_json::to_value(IntakeRecord::default()).unwrap();
        assert_eq!(value["painLevel"], 0);
        assert_eq!(value["stressLevel"], "Medio");
        assert!(value.get("pain_level").is_none());
    }
}
