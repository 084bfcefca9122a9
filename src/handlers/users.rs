// Staff accounts. Signup validates both unique columns, the role list, the
// primary branch and the branch-access list before inserting; passwords only
// ever touch the database as bcrypt hashes. The listing takes optional
// filters ANDed together.
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::auth::hash_password;
use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::models::user::{User, UserFilter, UserSignUp, UserUpdate};
use crate::state::AppState;

pub async fn user_signup(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<UserSignUp>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = state.pool.begin().await?;

    let existing = sqlx::query_scalar::<_, i32>("SELECT id FROM users WHERE usuario = $1")
        .bind(&payload.usuario)
        .fetch_optional(&mut *tx)
        .await?;
    if existing.is_some() {
        return Err(ApiError::duplicate("El usuario ya está en uso"));
    }

    let existing_email = sqlx::query_scalar::<_, i32>("SELECT id FROM users WHERE email = $1")
        .bind(&payload.email)
        .fetch_optional(&mut *tx)
        .await?;
    if existing_email.is_some() {
        return Err(ApiError::duplicate("El correo electrónico ya está en uso"));
    }

    if payload.roles.is_empty() {
        return Err(ApiError::bad_request("Debe proporcionar al menos un rol de usuario"));
    }
    validate_roles(&mut tx, &payload.roles).await?;

    let sucursal = sqlx::query_scalar::<_, i32>("SELECT id FROM sucursales WHERE id = $1")
        .bind(payload.sucursal)
        .fetch_optional(&mut *tx)
        .await?;
    if sucursal.is_none() {
        return Err(ApiError::reference_not_found("La sucursal seleccionada no existe"));
    }

    if payload.sucursal_acces.is_empty() {
        return Err(ApiError::bad_request(
            "Debe proporcionar al menos una sucursal de acceso",
        ));
    }
    validate_sucursal_acces(&mut tx, &payload.sucursal_acces).await?;

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users \
         (nombres, apellidos, usuario, email, telefono, \"Sucursal\", \
          sucursal_acces, roles, hashed_password) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
    )
    .bind(&payload.nombres)
    .bind(&payload.apellidos)
    .bind(&payload.usuario)
    .bind(&payload.email)
    .bind(&payload.telefono)
    .bind(payload.sucursal)
    .bind(&payload.sucursal_acces)
    .bind(&payload.roles)
    .bind(hash_password(&payload.password)?)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn get_all_users(
    State(state): State<AppState>,
    Query(filter): Query<UserFilter>,
) -> Result<Json<Vec<User>>, ApiError> {
    // Empty/zero filter values count as absent, each predicate is optional
    let usuario = filter.usuario.filter(|s| !s.is_empty());
    let sucursal_id = filter.sucursal_id.filter(|&id| id != 0);
    let rol_id = filter.rol_id.filter(|&id| id != 0);

    let users = sqlx::query_as::<_, User>(
        "SELECT * FROM users WHERE \
         ($1::text IS NULL OR usuario ILIKE '%' || $1 || '%' \
            OR nombres ILIKE '%' || $1 || '%' \
            OR apellidos ILIKE '%' || $1 || '%') \
         AND ($2::int4 IS NULL OR $2 = ANY(sucursal_acces)) \
         AND ($3::int4 IS NULL OR $3 = ANY(roles))",
    )
    .bind(usuario)
    .bind(sucursal_id)
    .bind(rol_id)
    .fetch_all(&state.pool)
    .await?;
    Ok(Json(users))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<User>, ApiError> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Usuario no encontrado o inexistente"))?;
    Ok(Json(user))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    ValidJson(patch): ValidJson<UserUpdate>,
) -> Result<Json<User>, ApiError> {
    let mut tx = state.pool.begin().await?;

    let existing = sqlx::query_scalar::<_, i32>("SELECT id FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;
    if existing.is_none() {
        return Err(ApiError::not_found("Usuario no encontrado o inexistente"));
    }

    if patch.is_empty() {
        return Err(ApiError::empty_update("No se han proporcionado datos por actualizar"));
    }

    if let Some(usuario) = &patch.usuario {
        let duplicate =
            sqlx::query_scalar::<_, i32>("SELECT id FROM users WHERE usuario = $1 AND id != $2")
                .bind(usuario)
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await?;
        if duplicate.is_some() {
            return Err(ApiError::duplicate("Este nombre de usuario ya está en uso"));
        }
    }

    if let Some(email) = &patch.email {
        let duplicate =
            sqlx::query_scalar::<_, i32>("SELECT id FROM users WHERE email = $1 AND id != $2")
                .bind(email)
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await?;
        if duplicate.is_some() {
            return Err(ApiError::duplicate("Este correo electrónico ya está en uso"));
        }
    }

    if let Some(roles) = &patch.roles {
        if roles.is_empty() {
            return Err(ApiError::bad_request("Debe proporcionar al menos un rol de usuario"));
        }
        validate_roles(&mut tx, roles).await?;
    }

    if let Some(sucursal) = patch.sucursal {
        let found = sqlx::query_scalar::<_, i32>("SELECT id FROM sucursales WHERE id = $1")
            .bind(sucursal)
            .fetch_optional(&mut *tx)
            .await?;
        if found.is_none() {
            return Err(ApiError::reference_not_found("La sucursal seleccionada no existe"));
        }
    }

    if let Some(sucursal_acces) = &patch.sucursal_acces {
        if sucursal_acces.is_empty() {
            return Err(ApiError::bad_request(
                "Debe proporcionar al menos una sucursal de acceso",
            ));
        }
        validate_sucursal_acces(&mut tx, sucursal_acces).await?;
    }

    let hashed = match patch.password.as_deref() {
        Some(password) => Some(hash_password(password)?),
        None => None,
    };

    let user = sqlx::query_as::<_, User>(
        "UPDATE users SET \
         nombres = COALESCE($2, nombres), \
         apellidos = COALESCE($3, apellidos), \
         usuario = COALESCE($4, usuario), \
         email = COALESCE($5, email), \
         telefono = COALESCE($6, telefono), \
         \"Sucursal\" = COALESCE($7, \"Sucursal\"), \
         sucursal_acces = COALESCE($8, sucursal_acces), \
         roles = COALESCE($9, roles), \
         hashed_password = COALESCE($10, hashed_password) \
         WHERE id = $1 RETURNING *",
    )
    .bind(user_id)
    .bind(patch.nombres.as_deref())
    .bind(patch.apellidos.as_deref())
    .bind(patch.usuario.as_deref())
    .bind(patch.email.as_deref())
    .bind(patch.telefono.as_deref())
    .bind(patch.sucursal)
    .bind(patch.sucursal_acces.as_deref())
    .bind(patch.roles.as_deref())
    .bind(hashed)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(Json(user))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = state.pool.begin().await?;

    let deleted = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    if deleted.rows_affected() == 0 {
        return Err(ApiError::not_found("Usuario no encontrado o inexistente"));
    }

    tx.commit().await?;
    Ok(Json(json!({ "message": "Usuario eliminado correctamente" })))
}

async fn validate_roles(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    roles: &[i32],
) -> Result<(), ApiError> {
    for role_id in roles {
        let found = sqlx::query_scalar::<_, i32>("SELECT id FROM user_roles WHERE id = $1")
            .bind(role_id)
            .fetch_optional(&mut **tx)
            .await?;
        if found.is_none() {
            return Err(ApiError::reference_not_found(format!(
                "El rol con ID {} no existe",
                role_id
            )));
        }
    }
    Ok(())
}

async fn validate_sucursal_acces(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    sucursales: &[i32],
) -> Result<(), ApiError> {
    for sucursal_id in sucursales {
        let found = sqlx::query_scalar::<_, i32>("SELECT id FROM sucursales WHERE id = $1")
            .bind(sucursal_id)
            .fetch_optional(&mut **tx)
            .await?;
        if found.is_none() {
            return Err(ApiError::reference_not_found(format!(
                "La sucursal de acceso con ID {} no existe",
                sucursal_id
            )));
        }
    }
    Ok(())
}
