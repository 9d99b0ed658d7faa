//! Controladores de la API

pub mod anamnesis_controller;

pub use anamnesis_controller::AnamnesisController;
