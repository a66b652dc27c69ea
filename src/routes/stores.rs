use axum::extract::State;
use axum::Json;

use crate::error::AppError;
use crate::state::SharedState;

/// Serve the store directory as a sorted JSON string array. Configuration
/// and upstream problems surface as server errors; the client treats a
/// failed list as "no validation possible" and proceeds without it.
pub async fn list(State(state): State<SharedState>) -> Result<Json<Vec<String>>, AppError> {
    let directory = state
        .stores
        .as_ref()
        .ok_or_else(|| AppError::Config("Configuração ausente".to_string()))?;

    let stores = directory.list().await.map_err(|detail| AppError::Upstream {
        message: "Erro ao buscar lojas".to_string(),
        detail,
    })?;

    Ok(Json(stores.as_ref().clone()))
}
