//! Configuración del proyecto
//!
//! Este módulo contiene la configuración de base de datos, variables de entorno
//! del servidor y la configuración del cliente del wizard.

pub mod client;
pub mod database;
pub mod environment;

pub use client::ClientConfig;
pub use database::DatabaseConfig;
pub use environment::*;
