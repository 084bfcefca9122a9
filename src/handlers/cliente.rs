// Clients. Two unique columns (email, RFC) checked in that order, then the
// client-type reference.
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::models::cliente::{Cliente, ClienteCreate, ClienteUpdate};
use crate::state::AppState;

pub async fn create_cliente(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<ClienteCreate>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = state.pool.begin().await?;

    let existing = sqlx::query_scalar::<_, i32>("SELECT id FROM clientes WHERE email = $1")
        .bind(&payload.email)
        .fetch_optional(&mut *tx)
        .await?;
    if existing.is_some() {
        return Err(ApiError::duplicate(
            "El cliente con este correo ya se encuentra registrado",
        ));
    }

    let existing_rfc = sqlx::query_scalar::<_, i32>("SELECT id FROM clientes WHERE rfc = $1")
        .bind(&payload.rfc)
        .fetch_optional(&mut *tx)
        .await?;
    if existing_rfc.is_some() {
        return Err(ApiError::duplicate(
            "El cliente con este RFC ya se encuentra registrado",
        ));
    }

    let tipo = sqlx::query_scalar::<_, i32>("SELECT id FROM tipo_cliente WHERE id = $1")
        .bind(payload.tipocliente)
        .fetch_optional(&mut *tx)
        .await?;
    if tipo.is_none() {
        return Err(ApiError::reference_not_found(format!(
            "El tipo de cliente con ID {} no existe",
            payload.tipocliente
        )));
    }

    let cliente = sqlx::query_as::<_, Cliente>(
        "INSERT INTO clientes \
         (nombres, apellidos, rfc, calle, numero, colonia, ciudad, estado, \
          codigopostal, telefono, email, contacto, tipocliente) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) RETURNING *",
    )
    .bind(&payload.nombres)
    .bind(&payload.apellidos)
    .bind(&payload.rfc)
    .bind(&payload.calle)
    .bind(&payload.numero)
    .bind(&payload.colonia)
    .bind(&payload.ciudad)
    .bind(&payload.estado)
    .bind(&payload.codigopostal)
    .bind(&payload.telefono)
    .bind(&payload.email)
    .bind(&payload.contacto)
    .bind(payload.tipocliente)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok((StatusCode::CREATED, Json(cliente)))
}

pub async fn get_all_clientes(
    State(state): State<AppState>,
) -> Result<Json<Vec<Cliente>>, ApiError> {
    let clientes = sqlx::query_as::<_, Cliente>("SELECT * FROM clientes")
        .fetch_all(&state.pool)
        .await?;
    Ok(Json(clientes))
}

pub async fn get_cliente(
    State(state): State<AppState>,
    Path(cliente_id): Path<i32>,
) -> Result<Json<Cliente>, ApiError> {
    let cliente = sqlx::query_as::<_, Cliente>("SELECT * FROM clientes WHERE id = $1")
        .bind(cliente_id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Cliente no encontrado o inexistente"))?;
    Ok(Json(cliente))
}

pub async fn update_cliente(
    State(state): State<AppState>,
    Path(cliente_id): Path<i32>,
    ValidJson(patch): ValidJson<ClienteUpdate>,
) -> Result<Json<Cliente>, ApiError> {
    let mut tx = state.pool.begin().await?;

    let existing = sqlx::query_scalar::<_, i32>("SELECT id FROM clientes WHERE id = $1")
        .bind(cliente_id)
        .fetch_optional(&mut *tx)
        .await?;
    if existing.is_none() {
        return Err(ApiError::not_found("Cliente no encontrado o inexistente"));
    }

    if patch.is_empty() {
        return Err(ApiError::empty_update("No se han proporcionado datos por actualizar"));
    }

    if let Some(email) = &patch.email {
        let duplicate =
            sqlx::query_scalar::<_, i32>("SELECT id FROM clientes WHERE email = $1 AND id != $2")
                .bind(email)
                .bind(cliente_id)
                .fetch_optional(&mut *tx)
                .await?;
        if duplicate.is_some() {
            return Err(ApiError::duplicate(
                "El cliente con este correo ya se encuentra registrado",
            ));
        }
    }

    if let Some(rfc) = &patch.rfc {
        let duplicate =
            sqlx::query_scalar::<_, i32>("SELECT id FROM clientes WHERE rfc = $1 AND id != $2")
                .bind(rfc)
                .bind(cliente_id)
                .fetch_optional(&mut *tx)
                .await?;
        if duplicate.is_some() {
            return Err(ApiError::duplicate(
                "El cliente con este RFC ya se encuentra registrado",
            ));
        }
    }

    if let Some(tipocliente) = patch.tipocliente {
        let tipo = sqlx::query_scalar::<_, i32>("SELECT id FROM tipo_cliente WHERE id = $1")
            .bind(tipocliente)
            .fetch_optional(&mut *tx)
            .await?;
        if tipo.is_none() {
            return Err(ApiError::reference_not_found(format!(
                "El tipo de cliente con ID {} no existe",
                tipocliente
            )));
        }
    }

    let cliente = sqlx::query_as::<_, Cliente>(
        "UPDATE clientes SET \
         nombres = COALESCE($2, nombres), \
         apellidos = COALESCE($3, apellidos), \
         rfc = COALESCE($4, rfc), \
         calle = COALESCE($5, calle), \
         numero = COALESCE($6, numero), \
         colonia = COALESCE($7, colonia), \
         ciudad = COALESCE($8, ciudad), \
         estado = COALESCE($9, estado), \
         codigopostal = COALESCE($10, codigopostal), \
         telefono = COALESCE($11, telefono), \
         email = COALESCE($12, email), \
         contacto = COALESCE($13, contacto), \
         tipocliente = COALESCE($14, tipocliente) \
         WHERE id = $1 RETURNING *",
    )
    .bind(cliente_id)
    .bind(patch.nombres.as_deref())
    .bind(patch.apellidos.as_deref())
    .bind(patch.rfc.as_deref())
    .bind(patch.calle.as_deref())
    .bind(patch.numero.as_deref())
    .bind(patch.colonia.as_deref())
    .bind(patch.ciudad.as_deref())
    .bind(patch.estado.as_deref())
    .bind(patch.codigopostal.as_deref())
    .bind(patch.telefono.as_deref())
    .bind(patch.email.as_deref())
    .bind(patch.contacto.as_deref())
    .bind(patch.tipocliente)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(Json(cliente))
}

pub async fn delete_cliente(
    State(state): State<AppState>,
    Path(cliente_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = state.pool.begin().await?;

    let deleted = sqlx::query("DELETE FROM clientes WHERE id = $1")
        .bind(cliente_id)
        .execute(&mut *tx)
        .await?;
    if deleted.rows_affected() == 0 {
        return Err(ApiError::not_found("Cliente no encontrado o inexistente"));
    }

    tx.commit().await?;
    Ok(Json(json!({ "message": "Cliente eliminado correctamente" })))
}
