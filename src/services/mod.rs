//! Servicios de negocio

pub mod anamnesis_validation;

pub use anamnesis_validation::{validate_and_normalize, RequestMetadata, REQUIRED_FIELDS};
