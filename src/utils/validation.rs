//! Utilidades de validación
//!
//! Validadores de campo reutilizados por el wizard (cliente) y por el
//! endpoint de anamnesis (servidor). Cada función devuelve un
//! `ValidationError` con el código y los parámetros del fallo.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

use crate::models::anamnesis::NumericRange;

/// Cantidad mínima de dígitos de un teléfono
pub const PHONE_MIN_DIGITS: usize = 10;
/// Cantidad máxima de dígitos de un teléfono
pub const PHONE_MAX_DIGITS: usize = 12;

lazy_static! {
    /// local@dominio.tld
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
        .expect("email regex is valid");
}

/// Quitar todo lo que no sea dígito
pub fn phone_digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar longitud mínima (en caracteres, después de trim)
pub fn validate_min_length(value: &str, min: usize) -> Result<(), ValidationError> {
    let len = value.trim().chars().count();
    if len < min {
        let mut error = ValidationError::new("length");
        error.add_param("min".into(), &min);
        error.add_param("actual".into(), &len);
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor esté en un rango inclusivo
pub fn validate_range(value: f64, range: NumericRange) -> Result<(), ValidationError> {
    if !value.is_finite() || !range.contains(value) {
        let mut error = ValidationError::new("range");
        error.add_param("min".into(), &range.min);
        error.add_param("max".into(), &range.max);
        error.add_param("actual".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar formato de email
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    if !EMAIL_REGEX.is_match(value.trim()) {
        let mut error = ValidationError::new("email");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar teléfono: 10 a 12 dígitos una vez quitados los separadores
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let clean_phone = phone_digits(value);
    if clean_phone.len() < PHONE_MIN_DIGITS || clean_phone.len() > PHONE_MAX_DIGITS {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        error.add_param("digits".into(), &clean_phone.len());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor esté en una lista de valores permitidos
pub fn validate_one_of(value: &str, allowed_values: &[&str]) -> Result<(), ValidationError> {
    if !allowed_values.contains(&value) {
        let mut error = ValidationError::new("enum");
        error.add_param("value".into(), &value.to_string());
        error.add_param("allowed_values".into(), &allowed_values.join(", "));
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::anamnesis::NumericField;

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("Running").is_ok());
        assert!(validate_not_empty("   ").is_err());
    }

    #[test]
    fn test_validate_min_length() {
        assert!(validate_min_length("Ana", 3).is_ok());
        assert!(validate_min_length("  Al  ", 3).is_err());
        assert!(validate_min_length("Perder grasa", 10).is_ok());
    }

    #[test]
    fn test_validate_range() {
        let age = NumericField::Age.range();
        assert!(validate_range(16.0, age).is_ok());
        assert!(validate_range(80.0, age).is_ok());
        assert!(validate_range(15.0, age).is_err());
        assert!(validate_range(81.0, age).is_err());
        assert!(validate_range(f64::NAN, age).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ana@example.com").is_ok());
        assert!(validate_email("invalid-email").is_err());
        assert!(validate_email("ana@").is_err());
        assert!(validate_email("ana @example.com").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("3001234567").is_ok());
        assert!(validate_phone("300-123-4567").is_ok());
        assert!(validate_phone("+57-300-123-4567").is_ok());
        assert!(validate_phone("123456789").is_err());
        assert!(validate_phone("1234567890123").is_err());
        assert!(validate_phone("").is_err());
    }

    #[test]
    fn test_phone_digit_count_is_the_only_criterion() {
        for len in 0..16 {
            let digits = "7".repeat(len);
            let decorated = format!("({})-", digits);
            let expected = (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&len);
            assert_eq!(validate_phone(&digits).is_ok(), expected, "len {}", len);
            assert_eq!(validate_phone(&decorated).is_ok(), expected, "len {}", len);
        }
    }

    #[test]
    fn test_validate_one_of() {
        let allowed = ["Bajo", "Medio", "Alto"];
        assert!(validate_one_of("Medio", &allowed).is_ok());
        assert!(validate_one_of("medio", &allowed).is_err());
    }
}
