// Branch status catalog, unique by `estado`. Referenced by sucursales.
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::models::estado_sucursal::{EstadoSucursal, EstadoSucursalCreate, EstadoSucursalUpdate};
use crate::state::AppState;

pub async fn create_estado_sucursal(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<EstadoSucursalCreate>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = state.pool.begin().await?;

    let existing = sqlx::query_scalar::<_, i32>("SELECT id FROM estado_sucursal WHERE estado = $1")
        .bind(&payload.estado)
        .fetch_optional(&mut *tx)
        .await?;
    if existing.is_some() {
        return Err(ApiError::duplicate("El estado de sucursal ya existe"));
    }

    let estado_sucursal = sqlx::query_as::<_, EstadoSucursal>(
        "INSERT INTO estado_sucursal (estado) VALUES ($1) RETURNING *",
    )
    .bind(&payload.estado)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok((StatusCode::CREATED, Json(estado_sucursal)))
}

pub async fn get_all_estado_sucursales(
    State(state): State<AppState>,
) -> Result<Json<Vec<EstadoSucursal>>, ApiError> {
    let estados = sqlx::query_as::<_, EstadoSucursal>("SELECT * FROM estado_sucursal")
        .fetch_all(&state.pool)
        .await?;
    Ok(Json(estados))
}

pub async fn get_estado_sucursal(
    State(state): State<AppState>,
    Path(estado_sucursal_id): Path<i32>,
) -> Result<Json<EstadoSucursal>, ApiError> {
    let estado_sucursal =
        sqlx::query_as::<_, EstadoSucursal>("SELECT * FROM estado_sucursal WHERE id = $1")
            .bind(estado_sucursal_id)
            .fetch_optional(&state.pool)
            .await?
            .ok_or_else(|| ApiError::not_found("Estado de sucursal no encontrado"))?;
    Ok(Json(estado_sucursal))
}

pub async fn update_estado_sucursal(
    State(state): State<AppState>,
    Path(estado_sucursal_id): Path<i32>,
    ValidJson(patch): ValidJson<EstadoSucursalUpdate>,
) -> Result<Json<EstadoSucursal>, ApiError> {
    let mut tx = state.pool.begin().await?;

    let existing = sqlx::query_scalar::<_, i32>("SELECT id FROM estado_sucursal WHERE id = $1")
        .bind(estado_sucursal_id)
        .fetch_optional(&mut *tx)
        .await?;
    if existing.is_none() {
        return Err(ApiError::not_found("Estado de sucursal no encontrado"));
    }

    if patch.is_empty() {
        return Err(ApiError::empty_update("No se han proporcionado datos por actualizar"));
    }

    if let Some(estado) = &patch.estado {
        let duplicate = sqlx::query_scalar::<_, i32>(
            "SELECT id FROM estado_sucursal WHERE estado = $1 AND id != $2",
        )
        .bind(estado)
        .bind(estado_sucursal_id)
        .fetch_optional(&mut *tx)
        .await?;
        if duplicate.is_some() {
            return Err(ApiError::duplicate("El estado de sucursal ya existe"));
        }
    }

    let estado_sucursal = sqlx::query_as::<_, EstadoSucursal>(
        "UPDATE estado_sucursal SET estado = COALESCE($2, estado) WHERE id = $1 RETURNING *",
    )
    .bind(estado_sucursal_id)
    .bind(patch.estado.as_deref())
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(Json(estado_sucursal))
}

pub async fn delete_estado_sucursal(
    State(state): State<AppState>,
    Path(estado_sucursal_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = state.pool.begin().await?;

    let deleted = sqlx::query("DELETE FROM estado_sucursal WHERE id = $1")
        .bind(estado_sucursal_id)
        .execute(&mut *tx)
        .await?;
    if deleted.rows_affected() == 0 {
        return Err(ApiError::not_found("Estado de sucursal no encontrado"));
    }

    tx.commit().await?;
    Ok(Json(json!({ "message": "Estado de sucursal eliminado correctamente" })))
}
