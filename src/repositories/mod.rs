//! Repositorios de persistencia

pub mod anamnesis_repository;

pub use anamnesis_repository::{
    AnamnesisStore, InMemoryAnamnesisRepository, PgAnamnesisRepository, StoreError,
};
