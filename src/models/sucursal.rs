use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Sucursal {
    pub id: i32,
    pub sucursal: String,
    pub tipo_sucursal_id: i32,
    pub dependencia: String,
    pub mondeda: String,
    pub razon_social: String,
    pub estado_sucursal_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct SucursalCreate {
    pub sucursal: String,
    pub tipo_sucursal_id: i32,
    pub dependencia: String,
    pub mondeda: String,
    pub razon_social: String,
    pub estado_sucursal_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct SucursalUpdate {
    pub sucursal: Option<String>,
    pub tipo_sucursal_id: Option<i32>,
    pub dependencia: Option<String>,
    pub mondeda: Option<String>,
    pub razon_social: Option<String>,
    pub estado_sucursal_id: Option<i32>,
}

impl SucursalUpdate {
    pub fn is_empty(&self) -> bool {
        self.sucursal.is_none()
            && self.tipo_sucursal_id.is_none()
            && self.dependencia.is_none()
            && self.mondeda.is_none()
            && self.razon_social.is_none()
            && self.estado_sucursal_id.is_none()
    }
}
