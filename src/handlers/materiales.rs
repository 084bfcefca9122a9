// Lens material catalog, unique by `material`.
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::models::material::{Material, MaterialCreate, MaterialUpdate};
use crate::state::AppState;

pub async fn create_material(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<MaterialCreate>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = state.pool.begin().await?;

    let existing = sqlx::query_scalar::<_, i32>("SELECT id FROM materiales WHERE material = $1")
        .bind(&payload.material)
        .fetch_optional(&mut *tx)
        .await?;
    if existing.is_some() {
        return Err(ApiError::duplicate("Este material ya existe"));
    }

    let material = sqlx::query_as::<_, Material>(
        "INSERT INTO materiales (material) VALUES ($1) RETURNING *",
    )
    .bind(&payload.material)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok((StatusCode::CREATED, Json(material)))
}

pub async fn get_all_materiales(
    State(state): State<AppState>,
) -> Result<Json<Vec<Material>>, ApiError> {
    let materiales = sqlx::query_as::<_, Material>("SELECT * FROM materiales")
        .fetch_all(&state.pool)
        .await?;
    Ok(Json(materiales))
}

pub async fn get_material(
    State(state): State<AppState>,
    Path(material_id): Path<i32>,
) -> Result<Json<Material>, ApiError> {
    let material = sqlx::query_as::<_, Material>("SELECT * FROM materiales WHERE id = $1")
        .bind(material_id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Material no encontrado"))?;
    Ok(Json(material))
}

pub async fn update_material(
    State(state): State<AppState>,
    Path(material_id): Path<i32>,
    ValidJson(patch): ValidJson<MaterialUpdate>,
) -> Result<Json<Material>, ApiError> {
    let mut tx = state.pool.begin().await?;

    let existing = sqlx::query_scalar::<_, i32>("SELECT id FROM materiales WHERE id = $1")
        .bind(material_id)
        .fetch_optional(&mut *tx)
        .await?;
    if existing.is_none() {
        return Err(ApiError::not_found("Material no encontrado"));
    }

    if patch.is_empty() {
        return Err(ApiError::empty_update("No se proporcionaron datos para actualizar"));
    }

    if let Some(material) = &patch.material {
        let duplicate = sqlx::query_scalar::<_, i32>(
            "SELECT id FROM materiales WHERE material = $1 AND id != $2",
        )
        .bind(material)
        .bind(material_id)
        .fetch_optional(&mut *tx)
        .await?;
        if duplicate.is_some() {
            return Err(ApiError::duplicate("Este material ya existe"));
        }
    }

    let material = sqlx::query_as::<_, Material>(
        "UPDATE materiales SET material = COALESCE($2, material) WHERE id = $1 RETURNING *",
    )
    .bind(material_id)
    .bind(patch.material.as_deref())
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(Json(material))
}

pub async fn delete_material(
    State(state): State<AppState>,
    Path(material_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = state.pool.begin().await?;

    let deleted = sqlx::query("DELETE FROM materiales WHERE id = $1")
        .bind(material_id)
        .execute(&mut *tx)
        .await?;
    if deleted.rows_affected() == 0 {
        return Err(ApiError::not_found("Material no encontrado"));
    }

    tx.commit().await?;
    Ok(Json(json!({ "message": "Material eliminado correctamente" })))
}
