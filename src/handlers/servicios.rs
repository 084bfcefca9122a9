// Service catalog, unique by `servicio`.
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::models::servicio::{Servicio, ServicioCreate, ServicioUpdate};
use crate::state::AppState;

pub async fn create_servicio(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<ServicioCreate>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = state.pool.begin().await?;

    let existing = sqlx::query_scalar::<_, i32>("SELECT id FROM servicios WHERE servicio = $1")
        .bind(&payload.servicio)
        .fetch_optional(&mut *tx)
        .await?;
    if existing.is_some() {
        return Err(ApiError::duplicate("Este servicio ya existe"));
    }

    let servicio = sqlx::query_as::<_, Servicio>(
        "INSERT INTO servicios (servicio) VALUES ($1) RETURNING *",
    )
    .bind(&payload.servicio)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok((StatusCode::CREATED, Json(servicio)))
}

pub async fn get_all_servicios(
    State(state): State<AppState>,
) -> Result<Json<Vec<Servicio>>, ApiError> {
    let servicios = sqlx::query_as::<_, Servicio>("SELECT * FROM servicios")
        .fetch_all(&state.pool)
        .await?;
    Ok(Json(servicios))
}

pub async fn get_servicio(
    State(state): State<AppState>,
    Path(servicio_id): Path<i32>,
) -> Result<Json<Servicio>, ApiError> {
    let servicio = sqlx::query_as::<_, Servicio>("SELECT * FROM servicios WHERE id = $1")
        .bind(servicio_id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Servicio no encontrado o inexistente"))?;
    Ok(Json(servicio))
}

pub async fn update_servicio(
    State(state): State<AppState>,
    Path(servicio_id): Path<i32>,
    ValidJson(patch): ValidJson<ServicioUpdate>,
) -> Result<Json<Servicio>, ApiError> {
    let mut tx = state.pool.begin().await?;

    let existing = sqlx::query_scalar::<_, i32>("SELECT id FROM servicios WHERE id = $1")
        .bind(servicio_id)
        .fetch_optional(&mut *tx)
        .await?;
    if existing.is_none() {
        return Err(ApiError::not_found("Servicio no encontrado o inexistente"));
    }

    if patch.is_empty() {
        return Err(ApiError::empty_update("No se proporcionaron datos para actualizar"));
    }

    if let Some(servicio) = &patch.servicio {
        let duplicate = sqlx::query_scalar::<_, i32>(
            "SELECT id FROM servicios WHERE servicio = $1 AND id != $2",
        )
        .bind(servicio)
        .bind(servicio_id)
        .fetch_optional(&mut *tx)
        .await?;
        if duplicate.is_some() {
            return Err(ApiError::duplicate("El servicio ya existe"));
        }
    }

    let servicio = sqlx::query_as::<_, Servicio>(
        "UPDATE servicios SET servicio = COALESCE($2, servicio) WHERE id = $1 RETURNING *",
    )
    .bind(servicio_id)
    .bind(patch.servicio.as_deref())
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(Json(servicio))
}

pub async fn delete_servicio(
    State(state): State<AppState>,
    Path(servicio_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = state.pool.begin().await?;

    let deleted = sqlx::query("DELETE FROM servicios WHERE id = $1")
        .bind(servicio_id)
        .execute(&mut *tx)
        .await?;
    if deleted.rows_affected() == 0 {
        return Err(ApiError::not_found("Servicio no encontrado o inexistente"));
    }

    tx.commit().await?;
    Ok(Json(json!({ "message": "Servicio eliminado correctamente" })))
}
