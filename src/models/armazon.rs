use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Armazon {
    pub id: i32,
    pub marca: String,
}

#[derive(Debug, Deserialize)]
pub struct ArmazonCreate {
    pub marca: String,
}

#[derive(Debug, Deserialize)]
pub struct ArmazonUpdate {
    pub marca: Option<String>,
}

impl ArmazonUpdate {
    pub fn is_empty(&self) -> bool {
        self.marca.is_none()
    }
}
