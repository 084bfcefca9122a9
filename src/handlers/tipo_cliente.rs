// Client type catalog, unique by `cliente`. Updates additionally reject an
// explicit empty name.
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::models::tipo_cliente::{TipoCliente, TipoClienteCreate, TipoClienteUpdate};
use crate::state::AppState;

pub async fn create_tipo_cliente(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<TipoClienteCreate>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = state.pool.begin().await?;

    let existing = sqlx::query_scalar::<_, i32>("SELECT id FROM tipo_cliente WHERE cliente = $1")
        .bind(&payload.cliente)
        .fetch_optional(&mut *tx)
        .await?;
    if existing.is_some() {
        return Err(ApiError::duplicate("Este tipo de cliente ya existe"));
    }

    let tipo_cliente = sqlx::query_as::<_, TipoCliente>(
        "INSERT INTO tipo_cliente (cliente) VALUES ($1) RETURNING *",
    )
    .bind(&payload.cliente)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok((StatusCode::CREATED, Json(tipo_cliente)))
}

pub async fn get_all_tipo_clientes(
    State(state): State<AppState>,
) -> Result<Json<Vec<TipoCliente>>, ApiError> {
    let tipos = sqlx::query_as::<_, TipoCliente>("SELECT * FROM tipo_cliente")
        .fetch_all(&state.pool)
        .await?;
    Ok(Json(tipos))
}

pub async fn get_tipo_cliente(
    State(state): State<AppState>,
    Path(tipo_cliente_id): Path<i32>,
) -> Result<Json<TipoCliente>, ApiError> {
    let tipo_cliente = sqlx::query_as::<_, TipoCliente>("SELECT * FROM tipo_cliente WHERE id = $1")
        .bind(tipo_cliente_id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Tipo de cliente no encontrado o inexistente"))?;
    Ok(Json(tipo_cliente))
}

pub async fn update_tipo_cliente(
    State(state): State<AppState>,
    Path(tipo_cliente_id): Path<i32>,
    ValidJson(patch): ValidJson<TipoClienteUpdate>,
) -> Result<Json<TipoCliente>, ApiError> {
    let mut tx = state.pool.begin().await?;

    let existing = sqlx::query_scalar::<_, i32>("SELECT id FROM tipo_cliente WHERE id = $1")
        .bind(tipo_cliente_id)
        .fetch_optional(&mut *tx)
        .await?;
    if existing.is_none() {
        return Err(ApiError::not_found("Tipo de cliente no encontrado o inexistente"));
    }

    if patch.is_empty() {
        return Err(ApiError::empty_update("No se proporcionaron datos para actualizar"));
    }

    if let Some(cliente) = &patch.cliente {
        if cliente.is_empty() {
            return Err(ApiError::bad_request("El campo 'cliente' no puede estar vacío"));
        }

        let duplicate = sqlx::query_scalar::<_, i32>(
            "SELECT id FROM tipo_cliente WHERE cliente = $1 AND id != $2",
        )
        .bind(cliente)
        .bind(tipo_cliente_id)
        .fetch_optional(&mut *tx)
        .await?;
        if duplicate.is_some() {
            return Err(ApiError::duplicate("Este tipo de cliente ya existe"));
        }
    }

    let tipo_cliente = sqlx::query_as::<_, TipoCliente>(
        "UPDATE tipo_cliente SET cliente = COALESCE($2, cliente) WHERE id = $1 RETURNING *",
    )
    .bind(tipo_cliente_id)
    .bind(patch.cliente.as_deref())
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(Json(tipo_cliente))
}

pub async fn delete_tipo_cliente(
    State(state): State<AppState>,
    Path(tipo_cliente_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = state.pool.begin().await?;

    let deleted = sqlx::query("DELETE FROM tipo_cliente WHERE id = $1")
        .bind(tipo_cliente_id)
        .execute(&mut *tx)
        .await?;
    if deleted.rows_affected() == 0 {
        return Err(ApiError::not_found("Tipo de cliente no encontrado o inexistente"));
    }

    tx.commit().await?;
    Ok(Json(json!({ "message": "Tipo de cliente eliminado exitosamente" })))
}
