use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Servicio {
    pub id: i32,
    pub servicio: String,
}

#[derive(Debug, Deserialize)]
pub struct ServicioCreate {
    pub servicio: String,
}

#[derive(Debug, Deserialize)]
pub struct ServicioUpdate {
    pub servicio: Option<String>,
}

impl ServicioUpdate {
    pub fn is_empty(&self) -> bool {
        self.servicio.is_none()
    }
}
