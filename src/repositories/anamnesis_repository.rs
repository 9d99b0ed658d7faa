use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::anamnesis::{AnamnesisSubmission, NewAnamnesis};

/// Errores de almacenamiento
#[derive(Error, Debug)]
pub enum StoreError {
    /// Violación de una restricción de unicidad
    #[error("duplicate record: {0}")]
    Duplicate(String),

    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        let is_unique_violation = error
            .as_database_error()
            .map(|db_error| db_error.is_unique_violation())
            .unwrap_or(false);

        if is_unique_violation {
            StoreError::Duplicate(error.to_string())
        } else {
            StoreError::Database(error)
        }
    }
}

/// Almacén de anamnesis: solo inserciones, una fila por envío
#[async_trait]
pub trait AnamnesisStore: Send + Sync {
    async fn insert(&self, new: NewAnamnesis) -> Result<AnamnesisSubmission, StoreError>;
}

pub struct PgAnamnesisRepository {
    pool: PgPool,
}

impl PgAnamnesisRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnamnesisStore for PgAnamnesisRepository {
    async fn insert(&self, new: NewAnamnesis) -> Result<AnamnesisSubmission, StoreError> {
        let row = AnamnesisSubmission::from_new(Uuid::new_v4(), Utc::now(), new);

        // Si algo falla antes del commit, el drop de la transacción hace rollback
        let mut tx = self.pool.begin().await?;

        let submission = sqlx::query_as::<_, AnamnesisSubmission>(
            r#"
            INSERT INTO anamnesis_submissions (
                id, name, phone, email, age, weight, height,
                sport, position, level, dominance, experience,
                goal, pain_level, pain_location, pain_type,
                training_frequency, training_hours, recent_changes,
                injuries, sleep_hours, stress_level,
                client_submitted_at, client_ip, user_agent, submitted_at
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7,
                $8, $9, $10, $11, $12,
                $13, $14, $15, $16,
                $17, $18, $19,
                $20, $21, $22,
                $23, $24, $25, $26
            )
            RETURNING *
            "#,
        )
        .bind(row.id)
        .bind(&row.name)
        .bind(&row.phone)
        .bind(&row.email)
        .bind(row.age)
        .bind(row.weight)
        .bind(row.height)
        .bind(&row.sport)
        .bind(&row.position)
        .bind(&row.level)
        .bind(&row.dominance)
        .bind(&row.experience)
        .bind(&row.goal)
        .bind(row.pain_level)
        .bind(&row.pain_location)
        .bind(&row.pain_type)
        .bind(row.training_frequency)
        .bind(row.training_hours)
        .bind(row.recent_changes)
        .bind(&row.injuries)
        .bind(row.sleep_hours)
        .bind(&row.stress_level)
        .bind(row.client_submitted_at)
        .bind(&row.client_ip)
        .bind(&row.user_agent)
        .bind(row.submitted_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(submission)
    }
}

/// Almacén en memoria, usado por los tests y para inspeccionar las filas
#[derive(Clone, Default)]
pub struct InMemoryAnamnesisRepository {
    rows: Arc<RwLock<Vec<AnamnesisSubmission>>>,
}

impl InMemoryAnamnesisRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copia de todas las filas insertadas, en orden de llegada
    pub async fn submissions(&self) -> Vec<AnamnesisSubmission> {
        self.rows.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl AnamnesisStore for InMemoryAnamnesisRepository {
    async fn insert(&self, new: NewAnamnesis) -> Result<AnamnesisSubmission, StoreError> {
        let row = AnamnesisSubmission::from_new(Uuid::new_v4(), Utc::now(), new);
        self.rows.write().await.push(row.clone());
        Ok(row)
    }
}
