//! DTOs de la API

pub mod anamnesis_dto;
pub mod api_response;

pub use anamnesis_dto::*;
pub use api_response::ApiResponse;
