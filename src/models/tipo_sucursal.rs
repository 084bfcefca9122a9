use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TipoSucursal {
    pub id: i32,
    pub tipo: String,
}

#[derive(Debug, Deserialize)]
pub struct TipoSucursalCreate {
    pub tipo: String,
}

#[derive(Debug, Deserialize)]
pub struct TipoSucursalUpdate {
    pub tipo: Option<String>,
}

impl TipoSucursalUpdate {
    pub fn is_empty(&self) -> bool {
        self.tipo.is_none()
    }
}
