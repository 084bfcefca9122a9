use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserRole {
    pub id: i32,
    pub rol: String,
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
pub struct UserRoleCreate {
    pub rol: String,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct UserRoleUpdate {
    pub rol: Option<String>,
    pub is_active: Option<bool>,
}

impl UserRoleUpdate {
    pub fn is_empty(&self) -> bool {
        self.rol.is_none() && self.is_active.is_none()
    }
}
