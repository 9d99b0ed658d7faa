//! Wizard de anamnesis
//!
//! Controlador del formulario de cuatro pasos (personal, objetivos,
//! entrenamiento, salud). Mantiene un único registro en memoria, valida cada
//! paso antes de avanzar y realiza un solo envío al endpoint al final.
//!
//! El envío se divide en `begin_submission` / `complete_submission` para que
//! una interfaz pueda deshabilitar el botón mientras la petición está en
//! curso; `submit` encadena ambas fases con un `IntakeSubmitter`.

pub mod payload;
pub mod phone;
pub mod rules;

use chrono::Utc;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, warn};

use crate::clients::{IntakeSubmitter, SubmitError};
use crate::dto::AnamnesisCreated;
use crate::models::anamnesis::{
    Dominance, IntakeField, IntakeRecord, Level, PainType, StressLevel,
};

pub use payload::SubmissionPayload;
pub use phone::format_phone;
pub use rules::{validate_step, Condition, Rule, WizardRules};

/// Mensaje del banner de error de envío
pub const SUBMIT_ERROR_MESSAGE: &str =
    "Ocurrió un error al enviar tu información. Inténtalo de nuevo.";

/// Pasos del wizard, en orden
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WizardStep {
    Personal,
    Goals,
    Training,
    Health,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Personal,
        WizardStep::Goals,
        WizardStep::Training,
        WizardStep::Health,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn next(&self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn previous(&self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    pub fn is_last(&self) -> bool {
        self.next().is_none()
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Personal => "Datos personales y deporte",
            WizardStep::Goals => "Objetivo y dolor",
            WizardStep::Training => "Carga de entrenamiento",
            WizardStep::Health => "Salud y estilo de vida",
        }
    }

    /// Campos que se capturan en el paso. El email se pide junto con los
    /// datos de salud porque es ahí donde se valida.
    pub fn fields(&self) -> &'static [IntakeField] {
        match self {
            WizardStep::Personal => &[
                IntakeField::Name,
                IntakeField::Phone,
                IntakeField::Age,
                IntakeField::Weight,
                IntakeField::Height,
                IntakeField::Sport,
                IntakeField::Position,
                IntakeField::Level,
                IntakeField::Dominance,
            ],
            WizardStep::Goals => &[
                IntakeField::Goal,
                IntakeField::PainLevel,
                IntakeField::PainLocation,
                IntakeField::PainType,
            ],
            WizardStep::Training => &[
                IntakeField::TrainingFrequency,
                IntakeField::TrainingHours,
                IntakeField::RecentChanges,
            ],
            WizardStep::Health => &[
                IntakeField::Email,
                IntakeField::Injuries,
                IntakeField::SleepHours,
                IntakeField::StressLevel,
            ],
        }
    }
}

/// Estado del envío
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionStatus {
    Idle,
    Submitting,
    Success(AnamnesisCreated),
    Error(String),
}

/// Actualización de un campo del registro
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Name(String),
    Phone(String),
    Email(String),
    Age(i32),
    Weight(f64),
    Height(f64),
    Sport(String),
    Position(String),
    Level(Level),
    Dominance(Dominance),
    Goal(String),
    PainLevel(i32),
    PainLocation(String),
    PainType(Option<PainType>),
    TrainingFrequency(i32),
    TrainingHours(f64),
    RecentChanges(bool),
    Injuries(String),
    SleepHours(f64),
    StressLevel(StressLevel),
}

impl FieldUpdate {
    pub fn field(&self) -> IntakeField {
        match self {
            FieldUpdate::Name(_) => IntakeField::Name,
            FieldUpdate::Phone(_) => IntakeField::Phone,
            FieldUpdate::Email(_) => IntakeField::Email,
            FieldUpdate::Age(_) => IntakeField::Age,
            FieldUpdate::Weight(_) => IntakeField::Weight,
            FieldUpdate::Height(_) => IntakeField::Height,
            FieldUpdate::Sport(_) => IntakeField::Sport,
            FieldUpdate::Position(_) => IntakeField::Position,
            FieldUpdate::Level(_) => IntakeField::Level,
            FieldUpdate::Dominance(_) => IntakeField::Dominance,
            FieldUpdate::Goal(_) => IntakeField::Goal,
            FieldUpdate::PainLevel(_) => IntakeField::PainLevel,
            FieldUpdate::PainLocation(_) => IntakeField::PainLocation,
            FieldUpdate::PainType(_) => IntakeField::PainType,
            FieldUpdate::TrainingFrequency(_) => IntakeField::TrainingFrequency,
            FieldUpdate::TrainingHours(_) => IntakeField::TrainingHours,
            FieldUpdate::RecentChanges(_) => IntakeField::RecentChanges,
            FieldUpdate::Injuries(_) => IntakeField::Injuries,
            FieldUpdate::SleepHours(_) => IntakeField::SleepHours,
            FieldUpdate::StressLevel(_) => IntakeField::StressLevel,
        }
    }

    /// Interpretar el texto tecleado en una interfaz sin controles tipados
    pub fn parse(field: IntakeField, raw: &str) -> Result<Self, WizardError> {
        let raw = raw.trim();
        let invalid = |message: &str| WizardError::InvalidInput {
            field,
            message: message.to_string(),
        };
        let integer = || raw.parse::<i32>().map_err(|_| invalid("Debe ser un número entero"));
        let number = || {
            raw.replace(',', ".")
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| invalid("Debe ser un número"))
        };

        let update = match field {
            IntakeField::Name => FieldUpdate::Name(raw.to_string()),
            IntakeField::Phone => FieldUpdate::Phone(raw.to_string()),
            IntakeField::Email => FieldUpdate::Email(raw.to_string()),
            IntakeField::Age => FieldUpdate::Age(integer()?),
            IntakeField::Weight => FieldUpdate::Weight(number()?),
            IntakeField::Height => FieldUpdate::Height(number()?),
            IntakeField::Sport => FieldUpdate::Sport(raw.to_string()),
            IntakeField::Position => FieldUpdate::Position(raw.to_string()),
            IntakeField::Level => FieldUpdate::Level(
                raw.parse().map_err(|_| invalid("Recreativo, Amateur o Élite"))?,
            ),
            IntakeField::Dominance => FieldUpdate::Dominance(
                raw.parse().map_err(|_| invalid("Diestro o Zurdo"))?,
            ),
            IntakeField::Goal => FieldUpdate::Goal(raw.to_string()),
            IntakeField::PainLevel => FieldUpdate::PainLevel(integer()?),
            IntakeField::PainLocation => FieldUpdate::PainLocation(raw.to_string()),
            IntakeField::PainType => {
                if raw.is_empty() {
                    FieldUpdate::PainType(None)
                } else {
                    FieldUpdate::PainType(Some(raw.parse().map_err(|_| {
                        invalid("Punzante, Quemante, Opresivo, Sordo o Pulsátil")
                    })?))
                }
            }
            IntakeField::TrainingFrequency => FieldUpdate::TrainingFrequency(integer()?),
            IntakeField::TrainingHours => FieldUpdate::TrainingHours(number()?),
            IntakeField::RecentChanges => FieldUpdate::RecentChanges(
                match raw.to_lowercase().as_str() {
                    "si" | "sí" | "s" | "true" => true,
                    "no" | "n" | "false" | "" => false,
                    _ => return Err(invalid("Responde sí o no")),
                },
            ),
            IntakeField::Injuries => FieldUpdate::Injuries(raw.to_string()),
            IntakeField::SleepHours => FieldUpdate::SleepHours(number()?),
            IntakeField::StressLevel => FieldUpdate::StressLevel(
                raw.parse().map_err(|_| invalid("Bajo, Medio o Alto"))?,
            ),
        };
        Ok(update)
    }

    fn apply(self, record: &mut IntakeRecord) {
        match self {
            FieldUpdate::Name(v) => record.name = v,
            FieldUpdate::Phone(v) => record.phone = format_phone(&v),
            FieldUpdate::Email(v) => record.email = v,
            FieldUpdate::Age(v) => record.age = v,
            FieldUpdate::Weight(v) => record.weight = v,
            FieldUpdate::Height(v) => record.height = v,
            FieldUpdate::Sport(v) => record.sport = v,
            FieldUpdate::Position(v) => record.position = v,
            FieldUpdate::Level(v) => record.level = v,
            FieldUpdate::Dominance(v) => record.dominance = v,
            FieldUpdate::Goal(v) => record.goal = v,
            FieldUpdate::PainLevel(v) => record.pain_level = v,
            FieldUpdate::PainLocation(v) => record.pain_location = v,
            FieldUpdate::PainType(v) => record.pain_type = v,
            FieldUpdate::TrainingFrequency(v) => record.training_frequency = v,
            FieldUpdate::TrainingHours(v) => record.training_hours = v,
            FieldUpdate::RecentChanges(v) => record.recent_changes = v,
            FieldUpdate::Injuries(v) => record.injuries = v,
            FieldUpdate::SleepHours(v) => record.sleep_hours = v,
            FieldUpdate::StressLevel(v) => record.stress_level = v,
        }
    }
}

#[derive(Error, Debug)]
pub enum WizardError {
    #[error("El envío solo es posible desde el último paso")]
    NotOnLastStep,

    #[error("El paso {0:?} tiene campos inválidos")]
    InvalidStep(WizardStep),

    #[error("Ya hay un envío en curso")]
    AlreadySubmitting,

    #[error("La anamnesis ya fue enviada")]
    AlreadySubmitted,

    #[error("Valor inválido para {}: {message}", .field.name())]
    InvalidInput { field: IntakeField, message: String },

    #[error("Error de envío: {0}")]
    Submission(#[from] SubmitError),
}

/// Controlador del formulario de anamnesis
#[derive(Debug, Clone)]
pub struct IntakeWizard {
    step: WizardStep,
    record: IntakeRecord,
    errors: BTreeMap<IntakeField, String>,
    status: SubmissionStatus,
    rules: WizardRules,
}

impl Default for IntakeWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl IntakeWizard {
    pub fn new() -> Self {
        Self::with_rules(WizardRules::default())
    }

    pub fn with_rules(rules: WizardRules) -> Self {
        Self {
            step: WizardStep::Personal,
            record: IntakeRecord::default(),
            errors: BTreeMap::new(),
            status: SubmissionStatus::Idle,
            rules,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn record(&self) -> &IntakeRecord {
        &self.record
    }

    pub fn errors(&self) -> &BTreeMap<IntakeField, String> {
        &self.errors
    }

    pub fn error_for(&self, field: IntakeField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.status, SubmissionStatus::Submitting)
    }

    /// Validar el paso actual y avanzar si es válido. Devuelve si avanzó.
    pub fn advance(&mut self) -> bool {
        let Some(next) = self.step.next() else {
            return false;
        };
        if !self.validate_current_step() {
            debug!(step = ?self.step, errors = self.errors.len(), "paso inválido");
            return false;
        }
        self.step = next;
        self.errors.clear();
        true
    }

    /// Volver al paso anterior sin validar
    pub fn retreat(&mut self) {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.errors.clear();
    }

    /// Actualizar un campo y limpiar su error. Ignorado mientras el registro
    /// está congelado (envío en curso o ya enviado).
    pub fn update_field(&mut self, update: FieldUpdate) {
        if matches!(
            self.status,
            SubmissionStatus::Submitting | SubmissionStatus::Success(_)
        ) {
            return;
        }
        self.errors.remove(&update.field());
        update.apply(&mut self.record);
    }

    /// Validar el paso actual llenando el mapa de errores
    pub fn validate_current_step(&mut self) -> bool {
        self.errors = validate_step(self.step, &self.record, &self.rules);
        self.errors.is_empty()
    }

    /// Primera fase del envío: validar y congelar el payload
    pub fn begin_submission(&mut self) -> Result<SubmissionPayload, WizardError> {
        match self.status {
            SubmissionStatus::Submitting => return Err(WizardError::AlreadySubmitting),
            SubmissionStatus::Success(_) => return Err(WizardError::AlreadySubmitted),
            SubmissionStatus::Idle | SubmissionStatus::Error(_) => {}
        }
        if !self.step.is_last() {
            return Err(WizardError::NotOnLastStep);
        }
        // Un campo de un paso anterior pudo cambiar después de validarse:
        // se revisan todos y se vuelve al primero con errores
        for step in WizardStep::ALL {
            let errors = validate_step(step, &self.record, &self.rules);
            if !errors.is_empty() {
                debug!(?step, errors = errors.len(), "envío bloqueado");
                self.step = step;
                self.errors = errors;
                return Err(WizardError::InvalidStep(step));
            }
        }
        self.errors.clear();

        self.status = SubmissionStatus::Submitting;
        Ok(SubmissionPayload::from_record(&self.record, Utc::now()))
    }

    /// Segunda fase del envío: registrar el resultado de la petición
    pub fn complete_submission(
        &mut self,
        result: Result<AnamnesisCreated, SubmitError>,
    ) -> Result<AnamnesisCreated, WizardError> {
        match result {
            Ok(receipt) => {
                self.status = SubmissionStatus::Success(receipt.clone());
                Ok(receipt)
            }
            Err(e) => {
                warn!("⚠️ Envío de anamnesis fallido: {}", e);
                self.status = SubmissionStatus::Error(SUBMIT_ERROR_MESSAGE.to_string());
                Err(WizardError::Submission(e))
            }
        }
    }

    /// Validar, enviar y registrar el resultado
    pub async fn submit<S>(&mut self, submitter: &S) -> Result<AnamnesisCreated, WizardError>
    where
        S: IntakeSubmitter + ?Sized,
    {
        let payload = self.begin_submission()?;
        let result = submitter.submit(&payload).await;
        self.complete_submission(result)
    }

    /// Cerrar el banner de error conservando los datos
    pub fn dismiss_error(&mut self) {
        if matches!(self.status, SubmissionStatus::Error(_)) {
            self.status = SubmissionStatus::Idle;
        }
    }

    /// "Enviar otra respuesta": registro nuevo desde el primer paso
    pub fn reset(&mut self) {
        *self = Self::with_rules(self.rules);
    }
}
