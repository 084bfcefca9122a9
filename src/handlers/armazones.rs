// Frame catalog: brand names, unique by `marca`.
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::models::armazon::{Armazon, ArmazonCreate, ArmazonUpdate};
use crate::state::AppState;

pub async fn create_armazon(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<ArmazonCreate>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = state.pool.begin().await?;

    let existing = sqlx::query_scalar::<_, i32>("SELECT id FROM armazones WHERE marca = $1")
        .bind(&payload.marca)
        .fetch_optional(&mut *tx)
        .await?;
    if existing.is_some() {
        return Err(ApiError::duplicate("Este armazón ya existe"));
    }

    let armazon = sqlx::query_as::<_, Armazon>(
        "INSERT INTO armazones (marca) VALUES ($1) RETURNING *",
    )
    .bind(&payload.marca)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok((StatusCode::CREATED, Json(armazon)))
}

pub async fn get_all_armazones(
    State(state): State<AppState>,
) -> Result<Json<Vec<Armazon>>, ApiError> {
    let armazones = sqlx::query_as::<_, Armazon>("SELECT * FROM armazones")
        .fetch_all(&state.pool)
        .await?;
    Ok(Json(armazones))
}

pub async fn get_armazon(
    State(state): State<AppState>,
    Path(armazon_id): Path<i32>,
) -> Result<Json<Armazon>, ApiError> {
    let armazon = sqlx::query_as::<_, Armazon>("SELECT * FROM armazones WHERE id = $1")
        .bind(armazon_id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Armazón no encontrado o inexistente"))?;
    Ok(Json(armazon))
}

pub async fn update_armazon(
    State(state): State<AppState>,
    Path(armazon_id): Path<i32>,
    ValidJson(patch): ValidJson<ArmazonUpdate>,
) -> Result<Json<Armazon>, ApiError> {
    let mut tx = state.pool.begin().await?;

    let existing = sqlx::query_scalar::<_, i32>("SELECT id FROM armazones WHERE id = $1")
        .bind(armazon_id)
        .fetch_optional(&mut *tx)
        .await?;
    if existing.is_none() {
        return Err(ApiError::not_found("Armazón no encontrado o inexistente"));
    }

    if patch.is_empty() {
        return Err(ApiError::empty_update("No se proporcionaron datos para actualizar"));
    }

    if let Some(marca) = &patch.marca {
        let duplicate = sqlx::query_scalar::<_, i32>(
            "SELECT id FROM armazones WHERE marca = $1 AND id != $2",
        )
        .bind(marca)
        .bind(armazon_id)
        .fetch_optional(&mut *tx)
        .await?;
        if duplicate.is_some() {
            return Err(ApiError::duplicate("El armazón con esta marca ya existe"));
        }
    }

    let armazon = sqlx::query_as::<_, Armazon>(
        "UPDATE armazones SET marca = COALESCE($2, marca) WHERE id = $1 RETURNING *",
    )
    .bind(armazon_id)
    .bind(patch.marca.as_deref())
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(Json(armazon))
}

pub async fn delete_armazon(
    State(state): State<AppState>,
    Path(armazon_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = state.pool.begin().await?;

    let deleted = sqlx::query("DELETE FROM armazones WHERE id = $1")
        .bind(armazon_id)
        .execute(&mut *tx)
        .await?;
    if deleted.rows_affected() == 0 {
        return Err(ApiError::not_found("Armazón no encontrado o inexistente"));
    }

    tx.commit().await?;
    Ok(Json(json!({ "message": "Armazón eliminado correctamente" })))
}
