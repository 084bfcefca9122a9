// User role catalog, unique by `rol`. New roles are active unless stated
// otherwise.
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::models::user_role::{UserRole, UserRoleCreate, UserRoleUpdate};
use crate::state::AppState;

pub async fn create_user_role(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<UserRoleCreate>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = state.pool.begin().await?;

    let existing = sqlx::query_scalar::<_, i32>("SELECT id FROM user_roles WHERE rol = $1")
        .bind(&payload.rol)
        .fetch_optional(&mut *tx)
        .await?;
    if existing.is_some() {
        return Err(ApiError::duplicate("El rol de usuario ya existe"));
    }

    let role = sqlx::query_as::<_, UserRole>(
        "INSERT INTO user_roles (rol, is_active) VALUES ($1, $2) RETURNING *",
    )
    .bind(&payload.rol)
    .bind(payload.is_active.unwrap_or(true))
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok((StatusCode::CREATED, Json(role)))
}

pub async fn get_all_user_roles(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserRole>>, ApiError> {
    let roles = sqlx::query_as::<_, UserRole>("SELECT * FROM user_roles")
        .fetch_all(&state.pool)
        .await?;
    Ok(Json(roles))
}

pub async fn get_user_role(
    State(state): State<AppState>,
    Path(role_id): Path<i32>,
) -> Result<Json<UserRole>, ApiError> {
    let role = sqlx::query_as::<_, UserRole>("SELECT * FROM user_roles WHERE id = $1")
        .bind(role_id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Rol de usuario no encontrado"))?;
    Ok(Json(role))
}

pub async fn update_user_role(
    State(state): State<AppState>,
    Path(role_id): Path<i32>,
    ValidJson(patch): ValidJson<UserRoleUpdate>,
) -> Result<Json<UserRole>, ApiError> {
    let mut tx = state.pool.begin().await?;

    let existing = sqlx::query_scalar::<_, i32>("SELECT id FROM user_roles WHERE id = $1")
        .bind(role_id)
        .fetch_optional(&mut *tx)
        .await?;
    if existing.is_none() {
        return Err(ApiError::not_found("Rol de usuario no encontrado"));
    }

    if patch.is_empty() {
        return Err(ApiError::empty_update("No se han proporcionado datos por actualizar"));
    }

    if let Some(rol) = &patch.rol {
        let duplicate =
            sqlx::query_scalar::<_, i32>("SELECT id FROM user_roles WHERE rol = $1 AND id != $2")
                .bind(rol)
                .bind(role_id)
                .fetch_optional(&mut *tx)
                .await?;
        if duplicate.is_some() {
            return Err(ApiError::duplicate("Este rol de usuario ya existe"));
        }
    }

    let role = sqlx::query_as::<_, UserRole>(
        "UPDATE user_roles SET rol = COALESCE($2, rol), is_active = COALESCE($3, is_active) \
         WHERE id = $1 RETURNING *",
    )
    .bind(role_id)
    .bind(patch.rol.as_deref())
    .bind(patch.is_active)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(Json(role))
}

pub async fn delete_user_role(
    State(state): State<AppState>,
    Path(role_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = state.pool.begin().await?;

    let deleted = sqlx::query("DELETE FROM user_roles WHERE id = $1")
        .bind(role_id)
        .execute(&mut *tx)
        .await?;
    if deleted.rows_affected() == 0 {
        return Err(ApiError::not_found("Rol de usuario no encontrado"));
    }

    tx.commit().await?;
    Ok(Json(json!({ "message": "Rol de usuario eliminado correctamente" })))
}
