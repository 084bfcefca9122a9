use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Patient record. `cliente_id` is a loose reference to the owning client;
/// patients created without one are allowed.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Paciente {
    pub id: i32,
    pub nombres: String,
    pub apellidos: String,
    pub edad: i32,
    pub ocupacion: Option<String>,
    pub problema_ocular: Option<String>,
    pub medicamento_actual: Option<String>,
    pub lentes: bool,
    pub antecedentes_familiares_lentes: Option<bool>,
    pub hipertension: Option<bool>,
    pub diabetico: Option<bool>,
    pub util_lentes: Option<bool>,
    pub cefaleas: Option<bool>,
    pub princip_defi_visual: Option<String>,
    pub otros: Option<String>,
    pub cliente_id: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct PacienteCreate {
    pub nombres: String,
    pub apellidos: String,
    pub edad: i32,
    pub ocupacion: Option<String>,
    pub problema_ocular: Option<String>,
    pub medicamento_actual: Option<String>,
    pub lentes: Option<bool>,
    pub antecedentes_familiares_lentes: Option<bool>,
    pub hipertension: Option<bool>,
    pub diabetico: Option<bool>,
    pub util_lentes: Option<bool>,
    pub cefaleas: Option<bool>,
    pub princip_defi_visual: Option<String>,
    pub otros: Option<String>,
    pub cliente_id: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct PacienteUpdate {
    pub nombres: Option<String>,
    pub apellidos: Option<String>,
    pub edad: Option<i32>,
    pub ocupacion: Option<String>,
    pub problema_ocular: Option<String>,
    pub medicamento_actual: Option<String>,
    pub lentes: Option<bool>,
    pub antecedentes_familiares_lentes: Option<bool>,
    pub hipertension: Option<bool>,
    pub diabetico: Option<bool>,
    pub util_lentes: Option<bool>,
    pub cefaleas: Option<bool>,
    pub princip_defi_visual: Option<String>,
    pub otros: Option<String>,
    pub cliente_id: Option<i32>,
}

impl PacienteUpdate {
    pub fn is_empty(&self) -> bool {
        self.nombres.is_none()
            && self.apellidos.is_none()
            && self.edad.is_none()
            && self.ocupacion.is_none()
            && self.problema_ocular.is_none()
            && self.medicamento_actual.is_none()
            && self.lentes.is_none()
            && self.antecedentes_familiares_lentes.is_none()
            && self.hipertension.is_none()
            && self.diabetico.is_none()
            && self.util_lentes.is_none()
            && self.cefaleas.is_none()
            && self.princip_defi_visual.is_none()
            && self.otros.is_none()
            && self.cliente_id.is_none()
    }

    /// True when the patch touches any field of the per-client identity
    /// (names + owning client), which requires the uniqueness re-check.
    pub fn touches_identity(&self) -> bool {
        self.nombres.is_some() || self.apellidos.is_some() || self.cliente_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_patch_is_detected() {
        let patch: PacienteUpdate = serde_json::from_str("{}").unwrap();
        assert!(patch.is_empty());
        assert!(!patch.touches_identity());
    }

    #[test]
    fn identity_fields_trigger_the_uniqueness_recheck() {
        let patch: PacienteUpdate = serde_json::from_str(r#"{"apellidos": "Gomez"}"#).unwrap();
        assert!(!patch.is_empty());
        assert!(patch.touches_identity());

        let patch: PacienteUpdate = serde_json::from_str(r#"{"edad": 41}"#).unwrap();
        assert!(!patch.is_empty());
        assert!(!patch.touches_identity());
    }
}
