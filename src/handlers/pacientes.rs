// Patients. Uniqueness is the (nombres, apellidos, cliente_id) triple, so
// the same name may repeat under different clients. `cliente_id` is a loose
// reference that is never existence-checked; the probe uses SQL `=`, so
// patients without a client never collide with each other.
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::models::paciente::{Paciente, PacienteCreate, PacienteUpdate};
use crate::state::AppState;

pub async fn create_paciente(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<PacienteCreate>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = state.pool.begin().await?;

    let existing = sqlx::query_scalar::<_, i32>(
        "SELECT id FROM pacientes WHERE nombres = $1 AND apellidos = $2 AND cliente_id = $3",
    )
    .bind(&payload.nombres)
    .bind(&payload.apellidos)
    .bind(payload.cliente_id)
    .fetch_optional(&mut *tx)
    .await?;
    if existing.is_some() {
        return Err(ApiError::duplicate(
            "Ya existe un paciente con el mismo nombre y apellidos para este cliente",
        ));
    }

    let paciente = sqlx::query_as::<_, Paciente>(
        "INSERT INTO pacientes \
         (nombres, apellidos, edad, ocupacion, problema_ocular, medicamento_actual, \
          lentes, antecedentes_familiares_lentes, hipertension, diabetico, util_lentes, \
          cefaleas, princip_defi_visual, otros, cliente_id) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
         RETURNING *",
    )
    .bind(&payload.nombres)
    .bind(&payload.apellidos)
    .bind(payload.edad)
    .bind(payload.ocupacion.as_deref())
    .bind(payload.problema_ocular.as_deref())
    .bind(payload.medicamento_actual.as_deref())
    .bind(payload.lentes.unwrap_or(false))
    .bind(payload.antecedentes_familiares_lentes)
    .bind(payload.hipertension)
    .bind(payload.diabetico)
    .bind(payload.util_lentes)
    .bind(payload.cefaleas)
    .bind(payload.princip_defi_visual.as_deref())
    .bind(payload.otros.as_deref())
    .bind(payload.cliente_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok((StatusCode::CREATED, Json(paciente)))
}

pub async fn get_all_pacientes(
    State(state): State<AppState>,
) -> Result<Json<Vec<Paciente>>, ApiError> {
    let pacientes = sqlx::query_as::<_, Paciente>("SELECT * FROM pacientes")
        .fetch_all(&state.pool)
        .await?;
    Ok(Json(pacientes))
}

pub async fn get_pacientes_by_cliente(
    State(state): State<AppState>,
    Path(cliente_id): Path<i32>,
) -> Result<Json<Vec<Paciente>>, ApiError> {
    let pacientes = sqlx::query_as::<_, Paciente>("SELECT * FROM pacientes WHERE cliente_id = $1")
        .bind(cliente_id)
        .fetch_all(&state.pool)
        .await?;
    Ok(Json(pacientes))
}

pub async fn get_paciente(
    State(state): State<AppState>,
    Path(paciente_id): Path<i32>,
) -> Result<Json<Paciente>, ApiError> {
    let paciente = sqlx::query_as::<_, Paciente>("SELECT * FROM pacientes WHERE id = $1")
        .bind(paciente_id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Paciente no encontrado"))?;
    Ok(Json(paciente))
}

pub async fn update_paciente(
    State(state): State<AppState>,
    Path(paciente_id): Path<i32>,
    ValidJson(patch): ValidJson<PacienteUpdate>,
) -> Result<Json<Paciente>, ApiError> {
    let mut tx = state.pool.begin().await?;

    let current = sqlx::query_as::<_, Paciente>("SELECT * FROM pacientes WHERE id = $1")
        .bind(paciente_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ApiError::not_found("Paciente no encontrado"))?;

    if patch.is_empty() {
        return Err(ApiError::empty_update("No se han proporcionado datos por actualizar"));
    }

    if patch.touches_identity() {
        // Re-check the per-client identity with patch values merged over the
        // stored row, excluding this patient.
        let nombres = patch.nombres.as_deref().unwrap_or(&current.nombres);
        let apellidos = patch.apellidos.as_deref().unwrap_or(&current.apellidos);
        let cliente_id = patch.cliente_id.or(current.cliente_id);

        let duplicate = sqlx::query_scalar::<_, i32>(
            "SELECT id FROM pacientes \
             WHERE nombres = $1 AND apellidos = $2 AND cliente_id = $3 AND id != $4",
        )
        .bind(nombres)
        .bind(apellidos)
        .bind(cliente_id)
        .bind(paciente_id)
        .fetch_optional(&mut *tx)
        .await?;
        if duplicate.is_some() {
            return Err(ApiError::duplicate(
                "Ya existe un paciente con el mismo nombre y apellidos para este cliente",
            ));
        }
    }

    let paciente = sqlx::query_as::<_, Paciente>(
        "UPDATE pacientes SET \
         nombres = COALESCE($2, nombres), \
         apellidos = COALESCE($3, apellidos), \
         edad = COALESCE($4, edad), \
         ocupacion = COALESCE($5, ocupacion), \
         problema_ocular = COALESCE($6, problema_ocular), \
         medicamento_actual = COALESCE($7, medicamento_actual), \
         lentes = COALESCE($8, lentes), \
         antecedentes_familiares_lentes = COALESCE($9, antecedentes_familiares_lentes), \
         hipertension = COALESCE($10, hipertension), \
         diabetico = COALESCE($11, diabetico), \
         util_lentes = COALESCE($12, util_lentes), \
         cefaleas = COALESCE($13, cefaleas), \
         princip_defi_visual = COALESCE($14, princip_defi_visual), \
         otros = COALESCE($15, otros), \
         cliente_id = COALESCE($16, cliente_id) \
         WHERE id = $1 RETURNING *",
    )
    .bind(paciente_id)
    .bind(patch.nombres.as_deref())
    .bind(patch.apellidos.as_deref())
    .bind(patch.edad)
    .bind(patch.ocupacion.as_deref())
    .bind(patch.problema_ocular.as_deref())
    .bind(patch.medicamento_actual.as_deref())
    .bind(patch.lentes)
    .bind(patch.antecedentes_familiares_lentes)
    .bind(patch.hipertension)
    .bind(patch.diabetico)
    .bind(patch.util_lentes)
    .bind(patch.cefaleas)
    .bind(patch.princip_defi_visual.as_deref())
    .bind(patch.otros.as_deref())
    .bind(patch.cliente_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(Json(paciente))
}

pub async fn delete_paciente(
    State(state): State<AppState>,
    Path(paciente_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = state.pool.begin().await?;

    let deleted = sqlx::query("DELETE FROM pacientes WHERE id = $1")
        .bind(paciente_id)
        .execute(&mut *tx)
        .await?;
    if deleted.rows_affected() == 0 {
        return Err(ApiError::not_found("Paciente no encontrado"));
    }

    tx.commit().await?;
    Ok(Json(json!({ "message": "Paciente eliminado correctamente" })))
}
