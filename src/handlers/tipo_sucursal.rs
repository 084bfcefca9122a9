// Branch type catalog, unique by `tipo`. Referenced by sucursales.
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::models::tipo_sucursal::{TipoSucursal, TipoSucursalCreate, TipoSucursalUpdate};
use crate::state::AppState;

pub async fn create_tipo_sucursal(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<TipoSucursalCreate>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = state.pool.begin().await?;

    let existing = sqlx::query_scalar::<_, i32>("SELECT id FROM tipo_sucursal WHERE tipo = $1")
        .bind(&payload.tipo)
        .fetch_optional(&mut *tx)
        .await?;
    if existing.is_some() {
        return Err(ApiError::duplicate("El tipo de sucursal ya existe"));
    }

    let tipo_sucursal = sqlx::query_as::<_, TipoSucursal>(
        "INSERT INTO tipo_sucursal (tipo) VALUES ($1) RETURNING *",
    )
    .bind(&payload.tipo)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok((StatusCode::CREATED, Json(tipo_sucursal)))
}

pub async fn get_all_tipo_sucursales(
    State(state): State<AppState>,
) -> Result<Json<Vec<TipoSucursal>>, ApiError> {
    let tipos = sqlx::query_as::<_, TipoSucursal>("SELECT * FROM tipo_sucursal")
        .fetch_all(&state.pool)
        .await?;
    Ok(Json(tipos))
}

pub async fn get_tipo_sucursal(
    State(state): State<AppState>,
    Path(tipo_sucursal_id): Path<i32>,
) -> Result<Json<TipoSucursal>, ApiError> {
    let tipo_sucursal =
        sqlx::query_as::<_, TipoSucursal>("SELECT * FROM tipo_sucursal WHERE id = $1")
            .bind(tipo_sucursal_id)
            .fetch_optional(&state.pool)
            .await?
            .ok_or_else(|| ApiError::not_found("Tipo de sucursal no encontrado"))?;
    Ok(Json(tipo_sucursal))
}

pub async fn update_tipo_sucursal(
    State(state): State<AppState>,
    Path(tipo_sucursal_id): Path<i32>,
    ValidJson(patch): ValidJson<TipoSucursalUpdate>,
) -> Result<Json<TipoSucursal>, ApiError> {
    let mut tx = state.pool.begin().await?;

    let existing = sqlx::query_scalar::<_, i32>("SELECT id FROM tipo_sucursal WHERE id = $1")
        .bind(tipo_sucursal_id)
        .fetch_optional(&mut *tx)
        .await?;
    if existing.is_none() {
        return Err(ApiError::not_found("Tipo de sucursal no encontrado"));
    }

    if patch.is_empty() {
        return Err(ApiError::empty_update("No se han proporcionado datos por actualizar"));
    }

    if let Some(tipo) = &patch.tipo {
        let duplicate = sqlx::query_scalar::<_, i32>(
            "SELECT id FROM tipo_sucursal WHERE tipo = $1 AND id != $2",
        )
        .bind(tipo)
        .bind(tipo_sucursal_id)
        .fetch_optional(&mut *tx)
        .await?;
        if duplicate.is_some() {
            return Err(ApiError::duplicate("Este tipo de sucursal ya existe"));
        }
    }

    let tipo_sucursal = sqlx::query_as::<_, TipoSucursal>(
        "UPDATE tipo_sucursal SET tipo = COALESCE($2, tipo) WHERE id = $1 RETURNING *",
    )
    .bind(tipo_sucursal_id)
    .bind(patch.tipo.as_deref())
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(Json(tipo_sucursal))
}

pub async fn delete_tipo_sucursal(
    State(state): State<AppState>,
    Path(tipo_sucursal_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = state.pool.begin().await?;

    let deleted = sqlx::query("DELETE FROM tipo_sucursal WHERE id = $1")
        .bind(tipo_sucursal_id)
        .execute(&mut *tx)
        .await?;
    if deleted.rows_affected() == 0 {
        return Err(ApiError::not_found("Tipo de sucursal no encontrado"));
    }

    tx.commit().await?;
    Ok(Json(json!({ "message": "Tipo de sucursal eliminado correctamente" })))
}
