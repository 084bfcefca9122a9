use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Staff account. The primary-branch column is historically named
/// `Sucursal` (capitalized) and that spelling is part of the wire contract,
/// as is the `sucursal_acces` field name. The password hash never leaves
/// the server.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    pub nombres: String,
    pub apellidos: String,
    pub usuario: String,
    pub email: String,
    pub telefono: String,
    #[serde(rename = "Sucursal")]
    #[sqlx(rename = "Sucursal")]
    pub sucursal: i32,
    pub sucursal_acces: Vec<i32>,
    pub roles: Vec<i32>,
    #[serde(skip_serializing)]
    pub hashed_password: String,
}

#[derive(Debug, Deserialize)]
pub struct UserSignUp {
    pub nombres: String,
    pub apellidos: String,
    pub usuario: String,
    pub email: String,
    pub telefono: String,
    #[serde(rename = "Sucursal")]
    pub sucursal: i32,
    pub sucursal_acces: Vec<i32>,
    pub roles: Vec<i32>,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UserLogin {
    pub usuario: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UserUpdate {
    pub nombres: Option<String>,
    pub apellidos: Option<String>,
    pub usuario: Option<String>,
    pub email: Option<String>,
    pub telefono: Option<String>,
    #[serde(rename = "Sucursal")]
    pub sucursal: Option<i32>,
    pub sucursal_acces: Option<Vec<i32>>,
    pub roles: Option<Vec<i32>>,
    pub password: Option<String>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.nombres.is_none()
            && self.apellidos.is_none()
            && self.usuario.is_none()
            && self.email.is_none()
            && self.telefono.is_none()
            && self.sucursal.is_none()
            && self.sucursal_acces.is_none()
            && self.roles.is_none()
            && self.password.is_none()
    }
}

/// Optional predicates for the user listing, ANDed together. Empty or zero
/// values are treated as absent.
#[derive(Debug, Default, Deserialize)]
pub struct UserFilter {
    pub usuario: Option<String>,
    pub sucursal_id: Option<i32>,
    pub rol_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_wire_names_and_hides_the_hash() {
        let user = User {
            id: 3,
            nombres: "Marina".to_string(),
            apellidos: "Rodriguez".to_string(),
            usuario: "mrodriguez".to_string(),
            email: "marina@example.com".to_string(),
            telefono: "5512345678".to_string(),
            sucursal: 1,
            sucursal_acces: vec![1, 2],
            roles: vec![1],
            hashed_password: "$2b$12$secret".to_string(),
        };

        let body = serde_json::to_value(&user).unwrap();
        assert_eq!(body["Sucursal"], 1);
        assert!(body.get("sucursal").is_none());
        assert!(body.get("hashed_password").is_none());
        assert_eq!(body["sucursal_acces"], serde_json::json!([1, 2]));
    }

    #[test]
    fn signup_accepts_the_capitalized_branch_field() {
        let payload: UserSignUp = serde_json::from_str(
            r#"{
                "nombres": "Marina",
                "apellidos": "Rodriguez",
                "usuario": "mrodriguez",
                "email": "marina@example.com",
                "telefono": "5512345678",
                "Sucursal": 2,
                "sucursal_acces": [2],
                "roles": [1],
                "password": "hunter2"
            }"#,
        )
        .unwrap();
        assert_eq!(payload.sucursal, 2);
    }

    #[test]
    fn empty_patch_is_detected() {
        let patch: UserUpdate = serde_json::from_str("{}").unwrap();
        assert!(patch.is_empty());

        let patch: UserUpdate = serde_json::from_str(r#"{"password": "nuevo"}"#).unwrap();
        assert!(!patch.is_empty());
    }
}
