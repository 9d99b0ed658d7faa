//! Validación y normalización de la anamnesis en el servidor
//!
//! El servidor no confía en la validación del wizard: vuelve a comprobar
//! campos obligatorios, rangos numéricos, teléfono, email y enumeraciones
//! antes de construir la fila a insertar. La longitud mínima de `goal` no
//! se comprueba aquí.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::dto::AnamnesisRequest;
use crate::models::anamnesis::{
    Dominance, Level, NewAnamnesis, NumericField, PainType, StressLevel,
};
use crate::utils::errors::{invalid_field_error, AppError, AppResult};
use crate::utils::validation::{
    validate_email, validate_one_of, validate_phone, validate_range, PHONE_MAX_DIGITS,
    PHONE_MIN_DIGITS,
};

/// Campos obligatorios, en el orden en que se informan
pub const REQUIRED_FIELDS: [&str; 4] = ["name", "phone", "sport", "goal"];

/// Experiencia por defecto cuando el formulario no la envía
pub const DEFAULT_EXPERIENCE: &str = "intermediate";

/// Metadatos de la petición HTTP que se guardan con la anamnesis
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestMetadata {
    pub client_ip: Option<String>,
    pub user_agent: Option<String>,
}

/// Valores numéricos ya validados
#[derive(Debug, Default)]
struct Numerics {
    age: Option<f64>,
    weight: Option<f64>,
    height: Option<f64>,
    pain_level: Option<f64>,
    training_frequency: Option<f64>,
    training_hours: Option<f64>,
    sleep_hours: Option<f64>,
}

impl Numerics {
    fn set(&mut self, field: NumericField, value: f64) {
        let slot = match field {
            NumericField::Age => &mut self.age,
            NumericField::Weight => &mut self.weight,
            NumericField::Height => &mut self.height,
            NumericField::PainLevel => &mut self.pain_level,
            NumericField::TrainingFrequency => &mut self.training_frequency,
            NumericField::TrainingHours => &mut self.training_hours,
            NumericField::SleepHours => &mut self.sleep_hours,
        };
        *slot = Some(value);
    }
}

/// Validar la petición y construir la anamnesis normalizada.
///
/// Falla en el primer problema encontrado, salvo los campos obligatorios
/// que se informan todos juntos.
pub fn validate_and_normalize(
    request: &AnamnesisRequest,
    metadata: RequestMetadata,
) -> AppResult<NewAnamnesis> {
    check_required(request)?;
    let numerics = check_numeric_ranges(request)?;
    check_phone(request)?;
    check_email(request)?;

    let level = parse_choice(request.level.as_ref(), "level", &Level::ALL.map(|l| l.as_str()))?
        .and_then(|s| s.parse::<Level>().ok())
        .unwrap_or_default();
    let dominance = parse_choice(
        request.dominance.as_ref(),
        "dominance",
        &Dominance::ALL.map(|d| d.as_str()),
    )?
    .and_then(|s| s.parse::<Dominance>().ok())
    .unwrap_or_default();
    let stress_level = parse_choice(
        request.stress_level.as_ref(),
        "stressLevel",
        &StressLevel::ALL.map(|s| s.as_str()),
    )?
    .and_then(|s| s.parse::<StressLevel>().ok())
    .unwrap_or_default();
    let pain_type = parse_choice(
        request.pain_type.as_ref(),
        "painType",
        &PainType::ALL.map(|p| p.as_str()),
    )?
    .and_then(|s| s.parse::<PainType>().ok());

    // check_required garantiza que los obligatorios existen
    let required = |value: &Option<Value>| text(value.as_ref()).unwrap_or_default();

    Ok(NewAnamnesis {
        name: required(&request.name),
        phone: required(&request.phone),
        email: text(request.email.as_ref()),
        age: numerics.age.map(|v| v as i32),
        weight: numerics.weight,
        height: numerics.height,
        sport: required(&request.sport),
        position: text(request.position.as_ref()),
        level,
        dominance,
        experience: text(request.experience.as_ref())
            .unwrap_or_else(|| DEFAULT_EXPERIENCE.to_string()),
        goal: required(&request.goal),
        pain_level: numerics.pain_level.map(|v| v as i32).unwrap_or(0),
        pain_location: text(request.pain_location.as_ref()),
        pain_type,
        training_frequency: numerics.training_frequency.map(|v| v as i32).unwrap_or(0),
        training_hours: numerics.training_hours,
        recent_changes: coerce_bool(request.recent_changes.as_ref()),
        injuries: text(request.injuries.as_ref()),
        sleep_hours: numerics.sleep_hours,
        stress_level,
        client_submitted_at: parse_timestamp(request.submitted_at.as_ref()),
        client_ip: metadata.client_ip,
        user_agent: metadata.user_agent,
    })
}

fn check_required(request: &AnamnesisRequest) -> AppResult<()> {
    let values = [&request.name, &request.phone, &request.sport, &request.goal];
    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .zip(values)
        .filter(|(_, value)| text(value.as_ref()).is_none())
        .map(|(field, _)| field.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::MissingFields(missing))
    }
}

fn check_numeric_ranges(request: &AnamnesisRequest) -> AppResult<Numerics> {
    let mut numerics = Numerics::default();

    for field in NumericField::ALL {
        let Some(raw) = request.numeric(field) else {
            continue;
        };
        if !is_provided(raw) {
            continue;
        }

        let range = field.range();
        let value = parse_number(raw)
            .filter(|v| validate_range(*v, range).is_ok())
            .filter(|v| !field.is_integer() || v.fract() == 0.0)
            .ok_or_else(|| invalid_field_error(field.name(), raw.clone(), range.label()))?;

        numerics.set(field, value);
    }

    Ok(numerics)
}

fn check_phone(request: &AnamnesisRequest) -> AppResult<()> {
    let phone = text(request.phone.as_ref()).unwrap_or_default();
    validate_phone(&phone).map_err(|_| {
        invalid_field_error(
            "phone",
            request.phone.clone().unwrap_or(Value::Null),
            format!("{}-{} dígitos", PHONE_MIN_DIGITS, PHONE_MAX_DIGITS),
        )
    })
}

fn check_email(request: &AnamnesisRequest) -> AppResult<()> {
    match text(request.email.as_ref()) {
        Some(email) => validate_email(&email).map_err(|_| {
            invalid_field_error(
                "email",
                request.email.clone().unwrap_or(Value::Null),
                "usuario@dominio.tld",
            )
        }),
        None => Ok(()),
    }
}

/// Valor de una enumeración si fue enviado; un valor desconocido es un error
fn parse_choice(
    raw: Option<&Value>,
    field: &str,
    allowed: &[&str],
) -> AppResult<Option<String>> {
    let Some(value) = text(raw) else {
        return Ok(None);
    };
    validate_one_of(&value, allowed)
        .map_err(|_| {
            invalid_field_error(field, raw.cloned().unwrap_or(Value::Null), allowed.join("|"))
        })?;
    Ok(Some(value))
}

/// Texto recortado de un valor escalar; vacío o ausente es `None`
fn text(value: Option<&Value>) -> Option<String> {
    let text = match value? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn is_provided(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

/// Número JSON o string numérico
fn parse_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

fn coerce_bool(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
        Some(Value::String(s)) => matches!(
            s.trim().to_lowercase().as_str(),
            "true" | "1" | "si" | "sí" | "yes" | "on"
        ),
        Some(_) => true,
    }
}

fn parse_timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    let raw = value?.as_str()?;
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
