//! Clients - HTTP Clients
//!
//! Este módulo contiene el cliente HTTP con el que el wizard envía la
//! anamnesis al endpoint.

pub mod anamnesis_client;

pub use anamnesis_client::{AnamnesisClient, IntakeSubmitter, SubmitError};
