use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Material {
    pub id: i32,
    pub material: String,
}

#[derive(Debug, Deserialize)]
pub struct MaterialCreate {
    pub material: String,
}

#[derive(Debug, Deserialize)]
pub struct MaterialUpdate {
    pub material: Option<String>,
}

impl MaterialUpdate {
    pub fn is_empty(&self) -> bool {
        self.material.is_none()
    }
}
