// Branch offices. Both catalog references are validated before the unique
// name, and the listing is sorted by name.
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::models::sucursal::{Sucursal, SucursalCreate, SucursalUpdate};
use crate::state::AppState;

pub async fn create_sucursal(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<SucursalCreate>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = state.pool.begin().await?;

    let tipo = sqlx::query_scalar::<_, i32>("SELECT id FROM tipo_sucursal WHERE id = $1")
        .bind(payload.tipo_sucursal_id)
        .fetch_optional(&mut *tx)
        .await?;
    if tipo.is_none() {
        return Err(ApiError::reference_not_found(format!(
            "El tipo de sucursal con ID {} no existe",
            payload.tipo_sucursal_id
        )));
    }

    let estado = sqlx::query_scalar::<_, i32>("SELECT id FROM estado_sucursal WHERE id = $1")
        .bind(payload.estado_sucursal_id)
        .fetch_optional(&mut *tx)
        .await?;
    if estado.is_none() {
        return Err(ApiError::reference_not_found(format!(
            "El estado de sucursal con ID {} no existe",
            payload.estado_sucursal_id
        )));
    }

    let existing = sqlx::query_scalar::<_, i32>("SELECT id FROM sucursales WHERE sucursal = $1")
        .bind(&payload.sucursal)
        .fetch_optional(&mut *tx)
        .await?;
    if existing.is_some() {
        return Err(ApiError::duplicate("La sucursal ya existe"));
    }

    let sucursal = sqlx::query_as::<_, Sucursal>(
        "INSERT INTO sucursales \
         (sucursal, tipo_sucursal_id, dependencia, mondeda, razon_social, estado_sucursal_id) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(&payload.sucursal)
    .bind(payload.tipo_sucursal_id)
    .bind(&payload.dependencia)
    .bind(&payload.mondeda)
    .bind(&payload.razon_social)
    .bind(payload.estado_sucursal_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok((StatusCode::CREATED, Json(sucursal)))
}

pub async fn get_all_sucursales(
    State(state): State<AppState>,
) -> Result<Json<Vec<Sucursal>>, ApiError> {
    let sucursales = sqlx::query_as::<_, Sucursal>("SELECT * FROM sucursales ORDER BY sucursal")
        .fetch_all(&state.pool)
        .await?;
    Ok(Json(sucursales))
}

pub async fn get_sucursal(
    State(state): State<AppState>,
    Path(sucursal_id): Path<i32>,
) -> Result<Json<Sucursal>, ApiError> {
    let sucursal = sqlx::query_as::<_, Sucursal>("SELECT * FROM sucursales WHERE id = $1")
        .bind(sucursal_id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Sucursal no encontrada"))?;
    Ok(Json(sucursal))
}

pub async fn update_sucursal(
    State(state): State<AppState>,
    Path(sucursal_id): Path<i32>,
    ValidJson(patch): ValidJson<SucursalUpdate>,
) -> Result<Json<Sucursal>, ApiError> {
    let mut tx = state.pool.begin().await?;

    let existing = sqlx::query_scalar::<_, i32>("SELECT id FROM sucursales WHERE id = $1")
        .bind(sucursal_id)
        .fetch_optional(&mut *tx)
        .await?;
    if existing.is_none() {
        return Err(ApiError::not_found("Sucursal no encontrada"));
    }

    if patch.is_empty() {
        return Err(ApiError::empty_update("No se han proporcionado datos por actualizar"));
    }

    if let Some(tipo_sucursal_id) = patch.tipo_sucursal_id {
        let tipo = sqlx::query_scalar::<_, i32>("SELECT id FROM tipo_sucursal WHERE id = $1")
            .bind(tipo_sucursal_id)
            .fetch_optional(&mut *tx)
            .await?;
        if tipo.is_none() {
            return Err(ApiError::reference_not_found(format!(
                "El tipo de sucursal con ID {} no existe",
                tipo_sucursal_id
            )));
        }
    }

    if let Some(estado_sucursal_id) = patch.estado_sucursal_id {
        let estado = sqlx::query_scalar::<_, i32>("SELECT id FROM estado_sucursal WHERE id = $1")
            .bind(estado_sucursal_id)
            .fetch_optional(&mut *tx)
            .await?;
        if estado.is_none() {
            return Err(ApiError::reference_not_found(format!(
                "El estado de sucursal con ID {} no existe",
                estado_sucursal_id
            )));
        }
    }

    if let Some(sucursal) = &patch.sucursal {
        let duplicate = sqlx::query_scalar::<_, i32>(
            "SELECT id FROM sucursales WHERE sucursal = $1 AND id != $2",
        )
        .bind(sucursal)
        .bind(sucursal_id)
        .fetch_optional(&mut *tx)
        .await?;
        if duplicate.is_some() {
            return Err(ApiError::duplicate("Ya existe una sucursal con ese nombre"));
        }
    }

    let sucursal = sqlx::query_as::<_, Sucursal>(
        "UPDATE sucursales SET \
         sucursal = COALESCE($2, sucursal), \
         tipo_sucursal_id = COALESCE($3, tipo_sucursal_id), \
         dependencia = COALESCE($4, dependencia), \
         mondeda = COALESCE($5, mondeda), \
         razon_social = COALESCE($6, razon_social), \
         estado_sucursal_id = COALESCE($7, estado_sucursal_id) \
         WHERE id = $1 RETURNING *",
    )
    .bind(sucursal_id)
    .bind(patch.sucursal.as_deref())
    .bind(patch.tipo_sucursal_id)
    .bind(patch.dependencia.as_deref())
    .bind(patch.mondeda.as_deref())
    .bind(patch.razon_social.as_deref())
    .bind(patch.estado_sucursal_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(Json(sucursal))
}

pub async fn delete_sucursal(
    State(state): State<AppState>,
    Path(sucursal_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = state.pool.begin().await?;

    let deleted = sqlx::query("DELETE FROM sucursales WHERE id = $1")
        .bind(sucursal_id)
        .execute(&mut *tx)
        .await?;
    if deleted.rows_affected() == 0 {
        return Err(ApiError::not_found("Sucursal no encontrada"));
    }

    tx.commit().await?;
    Ok(Json(json!({ "message": "Sucursal eliminada correctamente" })))
}
