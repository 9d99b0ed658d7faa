use std::sync::Arc;
use tracing::{error, info};

use crate::dto::{AnamnesisCreated, AnamnesisRequest, ApiResponse};
use crate::repositories::{AnamnesisStore, StoreError};
use crate::services::{validate_and_normalize, RequestMetadata};
use crate::utils::errors::{conflict_error, internal_error, AppError};

pub struct AnamnesisController {
    store: Arc<dyn AnamnesisStore>,
    expose_error_details: bool,
}

impl AnamnesisController {
    pub fn new(store: Arc<dyn AnamnesisStore>, expose_error_details: bool) -> Self {
        Self {
            store,
            expose_error_details,
        }
    }

    pub async fn submit(
        &self,
        request: AnamnesisRequest,
        metadata: RequestMetadata,
    ) -> Result<ApiResponse<AnamnesisCreated>, AppError> {
        // Validar y normalizar
        let new = validate_and_normalize(&request, metadata)?;

        // Guardar la anamnesis
        let submission = self
            .store
            .insert(new)
            .await
            .map_err(|e| self.store_error(e))?;

        info!(
            name = %submission.name,
            sport = %submission.sport,
            level = %submission.level,
            submitted_at = %submission.submitted_at.to_rfc3339(),
            "📝 Anamnesis atlética recibida"
        );

        Ok(ApiResponse::success_with_message(
            AnamnesisCreated::from(&submission),
            "Anamnesis atlética enviada exitosamente".to_string(),
        ))
    }

    fn store_error(&self, error: StoreError) -> AppError {
        match error {
            StoreError::Duplicate(detail) => conflict_error(
                "Esta anamnesis ya fue registrada",
                detail,
                self.expose_error_details,
            ),
            StoreError::Database(e) => {
                error!("❌ Error guardando anamnesis: {}", e);
                internal_error("Error interno del servidor", e.to_string(), self.expose_error_details)
            }
        }
    }
}
