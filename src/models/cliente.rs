use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Client row. `is_active` and `created_at` are bookkeeping columns that
/// never appear in API responses.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Cliente {
    pub id: i32,
    pub nombres: String,
    pub apellidos: String,
    pub rfc: String,
    pub calle: String,
    pub numero: String,
    pub colonia: String,
    pub ciudad: String,
    pub estado: String,
    pub codigopostal: String,
    pub telefono: String,
    pub email: String,
    pub contacto: String,
    pub tipocliente: Option<i32>,
    #[serde(skip_serializing)]
    pub is_active: bool,
    #[serde(skip_serializing)]
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Deserialize)]
pub struct ClienteCreate {
    pub nombres: String,
    pub apellidos: String,
    pub rfc: String,
    pub calle: String,
    pub numero: String,
    pub colonia: String,
    pub ciudad: String,
    pub estado: String,
    pub codigopostal: String,
    pub telefono: String,
    pub email: String,
    pub contacto: String,
    pub tipocliente: i32,
}

#[derive(Debug, Deserialize)]
pub struct ClienteUpdate {
    pub nombres: Option<String>,
    pub apellidos: Option<String>,
    pub rfc: Option<String>,
    pub calle: Option<String>,
    pub numero: Option<String>,
    pub colonia: Option<String>,
    pub ciudad: Option<String>,
    pub estado: Option<String>,
    pub codigopostal: Option<String>,
    pub telefono: Option<String>,
    pub email: Option<String>,
    pub contacto: Option<String>,
    pub tipocliente: Option<i32>,
}

impl ClienteUpdate {
    pub fn is_empty(&self) -> bool {
        self.nombres.is_none()
            && self.apellidos.is_none()
            && self.rfc.is_none()
            && self.calle.is_none()
            && self.numero.is_none()
            && self.colonia.is_none()
            && self.ciudad.is_none()
            && self.estado.is_none()
            && self.codigopostal.is_none()
            && self.telefono.is_none()
            && self.email.is_none()
            && self.contacto.is_none()
            && self.tipocliente.is_none()
    }
}
