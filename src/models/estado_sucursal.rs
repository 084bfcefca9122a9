use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EstadoSucursal {
    pub id: i32,
    pub estado: String,
}

#[derive(Debug, Deserialize)]
pub struct EstadoSucursalCreate {
    pub estado: String,
}

#[derive(Debug, Deserialize)]
pub struct EstadoSucursalUpdate {
    pub estado: Option<String>,
}

impl EstadoSucursalUpdate {
    pub fn is_empty(&self) -> bool {
        self.estado.is_none()
    }
}
