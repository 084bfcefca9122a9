use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TipoCliente {
    pub id: i32,
    pub cliente: String,
}

#[derive(Debug, Deserialize)]
pub struct TipoClienteCreate {
    pub cliente: String,
}

#[derive(Debug, Deserialize)]
pub struct TipoClienteUpdate {
    pub cliente: Option<String>,
}

impl TipoClienteUpdate {
    pub fn is_empty(&self) -> bool {
        self.cliente.is_none()
    }
}
