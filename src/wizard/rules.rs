//! Reglas de validación por paso del wizard
//!
//! Cada paso tiene una lista de reglas. Las reglas condicionales (por ejemplo,
//! ubicación y tipo de dolor solo cuando se reporta dolor) se expresan con
//! `Rule::When` y se evalúan en el momento de validar.

use std::collections::BTreeMap;

use crate::models::anamnesis::{IntakeField, IntakeRecord, NumericField};
use crate::utils::validation::{
    validate_email, validate_min_length, validate_not_empty, validate_phone, validate_range,
};

use super::WizardStep;

/// Opciones de producto que cambian las reglas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardRules {
    /// Exigir al menos una sesión semanal en el paso de entrenamiento, aunque
    /// el rango admitido de `trainingFrequency` empieza en 0.
    pub require_training_sessions: bool,
}

impl Default for WizardRules {
    fn default() -> Self {
        Self {
            require_training_sessions: true,
        }
    }
}

/// Condición evaluada sobre el registro
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// `painLevel > 0`
    PainReported,
}

impl Condition {
    pub fn holds(&self, record: &IntakeRecord) -> bool {
        match self {
            Condition::PainReported => record.pain_level > 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// Campo no vacío después de trim (o selección hecha)
    Required {
        field: IntakeField,
        message: &'static str,
    },
    /// Longitud mínima después de trim
    MinLength {
        field: IntakeField,
        min: usize,
        message: &'static str,
    },
    /// 10 a 12 dígitos
    Phone { message: &'static str },
    /// Formato de email, solo si se escribió algo
    OptionalEmail { message: &'static str },
    /// Rango de la tabla de campos numéricos
    InRange(NumericField),
    /// `trainingFrequency > 0`
    AtLeastOneSession { message: &'static str },
    When {
        condition: Condition,
        rule: Box<Rule>,
    },
}

impl Rule {
    /// Campo al que se asocia el error
    pub fn field(&self) -> IntakeField {
        match self {
            Rule::Required { field, .. } | Rule::MinLength { field, .. } => *field,
            Rule::Phone { .. } => IntakeField::Phone,
            Rule::OptionalEmail { .. } => IntakeField::Email,
            Rule::InRange(numeric) => numeric.field(),
            Rule::AtLeastOneSession { .. } => IntakeField::TrainingFrequency,
            Rule::When { rule, .. } => rule.field(),
        }
    }

    /// Mensaje de error si la regla no se cumple
    pub fn check(&self, record: &IntakeRecord) -> Option<String> {
        match self {
            Rule::Required { field, message } => {
                let ok = match field {
                    IntakeField::PainType => record.pain_type.is_some(),
                    _ => validate_not_empty(text_of(record, *field)).is_ok(),
                };
                (!ok).then(|| message.to_string())
            }
            Rule::MinLength {
                field,
                min,
                message,
            } => validate_min_length(text_of(record, *field), *min)
                .err()
                .map(|_| message.to_string()),
            Rule::Phone { message } => validate_phone(&record.phone)
                .err()
                .map(|_| message.to_string()),
            Rule::OptionalEmail { message } => {
                if record.email.trim().is_empty() {
                    None
                } else {
                    validate_email(&record.email).err().map(|_| message.to_string())
                }
            }
            Rule::InRange(numeric) => {
                let range = numeric.range();
                validate_range(record.numeric(*numeric), range)
                    .err()
                    .map(|_| format!("Debe estar entre {} y {}", range.min, range.max))
            }
            Rule::AtLeastOneSession { message } => {
                (record.training_frequency <= 0).then(|| message.to_string())
            }
            Rule::When { condition, rule } => {
                if condition.holds(record) {
                    rule.check(record)
                } else {
                    None
                }
            }
        }
    }
}

/// Texto de un campo de texto libre; los demás campos no tienen texto
fn text_of(record: &IntakeRecord, field: IntakeField) -> &str {
    match field {
        IntakeField::Name => &record.name,
        IntakeField::Phone => &record.phone,
        IntakeField::Email => &record.email,
        IntakeField::Sport => &record.sport,
        IntakeField::Position => &record.position,
        IntakeField::Goal => &record.goal,
        IntakeField::PainLocation => &record.pain_location,
        IntakeField::Injuries => &record.injuries,
        _ => "",
    }
}

/// Reglas de un paso
pub fn rules_for(step: WizardStep, options: &WizardRules) -> Vec<Rule> {
    match step {
        WizardStep::Personal => vec![
            Rule::Required {
                field: IntakeField::Name,
                message: "El nombre es obligatorio",
            },
            Rule::MinLength {
                field: IntakeField::Name,
                min: 3,
                message: "El nombre debe tener al menos 3 caracteres",
            },
            Rule::Required {
                field: IntakeField::Phone,
                message: "El teléfono es obligatorio",
            },
            Rule::Phone {
                message: "El teléfono debe tener entre 10 y 12 dígitos",
            },
            Rule::Required {
                field: IntakeField::Sport,
                message: "El deporte es obligatorio",
            },
            Rule::InRange(NumericField::Age),
            Rule::InRange(NumericField::Weight),
            Rule::InRange(NumericField::Height),
        ],
        WizardStep::Goals => vec![
            Rule::MinLength {
                field: IntakeField::Goal,
                min: 10,
                message: "Describe tu objetivo con al menos 10 caracteres",
            },
            Rule::InRange(NumericField::PainLevel),
            Rule::When {
                condition: Condition::PainReported,
                rule: Box::new(Rule::Required {
                    field: IntakeField::PainLocation,
                    message: "Indica dónde sientes el dolor",
                }),
            },
            Rule::When {
                condition: Condition::PainReported,
                rule: Box::new(Rule::Required {
                    field: IntakeField::PainType,
                    message: "Selecciona el tipo de dolor",
                }),
            },
        ],
        WizardStep::Training => {
            let mut rules = Vec::new();
            if options.require_training_sessions {
                rules.push(Rule::AtLeastOneSession {
                    message: "Indica al menos una sesión de entrenamiento por semana",
                });
            }
            rules.push(Rule::InRange(NumericField::TrainingFrequency));
            rules.push(Rule::InRange(NumericField::TrainingHours));
            rules
        }
        WizardStep::Health => vec![
            Rule::OptionalEmail {
                message: "El email no es válido",
            },
            Rule::InRange(NumericField::SleepHours),
        ],
    }
}

/// Validar un paso: un mensaje por campo inválido (el de la primera regla que falla)
pub fn validate_step(
    step: WizardStep,
    record: &IntakeRecord,
    options: &WizardRules,
) -> BTreeMap<IntakeField, String> {
    let mut errors = BTreeMap::new();
    for rule in rules_for(step, options) {
        let field = rule.field();
        if errors.contains_key(&field) {
            continue;
        }
        if let Some(message) = rule.check(record) {
            errors.insert(field, message);
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::anamnesis::PainType;

    fn personal_ok() -> IntakeRecord {
        IntakeRecord {
            name: "Ana".to_string(),
            phone: "300-123-4567".to_string(),
            sport: "Running".to_string(),
            ..IntakeRecord::default()
        }
    }

    #[test]
    fn test_personal_step_valid() {
        let errors = validate_step(WizardStep::Personal, &personal_ok(), &WizardRules::default());
        assert!(errors.is_empty(), "{:?}", errors);
    }

    #[test]
    fn test_empty_name_reports_required_message_only() {
        let record = IntakeRecord {
            name: "  ".to_string(),
            ..personal_ok()
        };
        let errors = validate_step(WizardStep::Personal, &record, &WizardRules::default());
        assert_eq!(errors[&IntakeField::Name], "El nombre es obligatorio");
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_short_name_rejected() {
        let record = IntakeRecord {
            name: "Al".to_string(),
            ..personal_ok()
        };
        let errors = validate_step(WizardStep::Personal, &record, &WizardRules::default());
        assert_eq!(errors[&IntakeField::Name], "El nombre debe tener al menos 3 caracteres");
    }

    #[test]
    fn test_pain_details_required_only_when_pain_reported() {
        let mut record = IntakeRecord {
            goal: "Mejorar mi marca en 10K".to_string(),
            ..IntakeRecord::default()
        };
        assert!(validate_step(WizardStep::Goals, &record, &WizardRules::default()).is_empty());

        record.pain_level = 4;
        let errors = validate_step(WizardStep::Goals, &record, &WizardRules::default());
        assert!(errors.contains_key(&IntakeField::PainLocation));
        assert!(errors.contains_key(&IntakeField::PainType));

        record.pain_location = "Rodilla derecha".to_string();
        record.pain_type = Some(PainType::Punzante);
        assert!(validate_step(WizardStep::Goals, &record, &WizardRules::default()).is_empty());
    }

    #[test]
    fn test_training_sessions_rule_is_configurable() {
        let record = IntakeRecord {
            training_frequency: 0,
            ..IntakeRecord::default()
        };
        let strict = validate_step(WizardStep::Training, &record, &WizardRules::default());
        assert!(strict.contains_key(&IntakeField::TrainingFrequency));

        let lenient = WizardRules {
            require_training_sessions: false,
        };
        assert!(validate_step(WizardStep::Training, &record, &lenient).is_empty());
    }

    #[test]
    fn test_health_step_email_optional() {
        let mut record = IntakeRecord::default();
        assert!(validate_step(WizardStep::Health, &record, &WizardRules::default()).is_empty());

        record.email = "ana@".to_string();
        let errors = validate_step(WizardStep::Health, &record, &WizardRules::default());
        assert_eq!(errors[&IntakeField::Email], "El email no es válido");
    }

    #[test]
    fn test_range_message() {
        let record = IntakeRecord {
            sleep_hours: 2.5,
            ..IntakeRecord::default()
        };
        let errors = validate_step(WizardStep::Health, &record, &WizardRules::default());
        assert_eq!(errors[&IntakeField::SleepHours], "Debe estar entre 3 y 12");
    }
}
