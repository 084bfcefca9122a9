// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request - a uniqueness pre-check found an existing row
    Duplicate(String),

    // 400 Bad Request - a referenced id does not exist
    ReferenceNotFound(String),

    // 400 Bad Request - an update carried no fields to apply
    EmptyUpdate(String),

    // 400 Bad Request - any other business-rule violation
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 404 Not Found
    NotFound(String),

    // 422 Unprocessable Entity (body failed deserialization)
    UnprocessableEntity {
        message: String,
        detalle: Option<String>,
    },

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Duplicate(_) => 400,
            ApiError::ReferenceNotFound(_) => 400,
            ApiError::EmptyUpdate(_) => 400,
            ApiError::BadRequest(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::NotFound(_) => 404,
            ApiError::UnprocessableEntity { .. } => 422,
            ApiError::InternalServerError(_) => 500,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::Duplicate(msg) => msg,
            ApiError::ReferenceNotFound(msg) => msg,
            ApiError::EmptyUpdate(msg) => msg,
            ApiError::BadRequest(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::UnprocessableEntity { message, .. } => message,
            ApiError::InternalServerError(msg) => msg,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Duplicate(_) => "DUPLICATE",
            ApiError::ReferenceNotFound(_) => "REFERENCE_NOT_FOUND",
            ApiError::EmptyUpdate(_) => "EMPTY_UPDATE",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::UnprocessableEntity { .. } => "UNPROCESSABLE_ENTITY",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::UnprocessableEntity { message, detalle } => {
                let mut response = json!({
                    "error": true,
                    "message": message,
                    "code": "UNPROCESSABLE_ENTITY"
                });

                if let Some(detalle) = detalle {
                    response["detalle"] = json!(detalle);
                }

                response
            }
            _ => {
                json!({
                    "error": true,
                    "message": self.message(),
                    "code": self.error_code()
                })
            }
        }
    }
}

// Static constructor methods
impl ApiError {
    pub fn duplicate(message: impl Into<String>) -> Self {
        ApiError::Duplicate(message.into())
    }

    pub fn reference_not_found(message: impl Into<String>) -> Self {
        ApiError::ReferenceNotFound(message.into())
    }

    pub fn empty_update(message: impl Into<String>) -> Self {
        ApiError::EmptyUpdate(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn unprocessable_entity(message: impl Into<String>, detalle: Option<String>) -> Self {
        ApiError::UnprocessableEntity {
            message: message.into(),
            detalle,
        }
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }
}

// Convert lower-level error types to ApiError
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        // Log the real error but return generic message
        tracing::error!("SQLx error: {}", err);
        ApiError::internal_server_error("Error interno del servidor")
    }
}

impl From<crate::database::DatabaseError> for ApiError {
    fn from(err: crate::database::DatabaseError) -> Self {
        tracing::error!("Database error: {}", err);
        ApiError::internal_server_error("Error interno del servidor")
    }
}

impl From<bcrypt::BcryptError> for ApiError {
    fn from(err: bcrypt::BcryptError) -> Self {
        tracing::error!("Password hashing error: {}", err);
        ApiError::internal_server_error("Error interno del servidor")
    }
}

impl From<crate::auth::JwtError> for ApiError {
    fn from(err: crate::auth::JwtError) -> Self {
        tracing::error!("Token error: {}", err);
        ApiError::internal_server_error("Error interno del servidor")
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_variants_to_status_codes() {
        assert_eq!(ApiError::duplicate("x").status_code(), 400);
        assert_eq!(ApiError::reference_not_found("x").status_code(), 400);
        assert_eq!(ApiError::empty_update("x").status_code(), 400);
        assert_eq!(ApiError::unauthorized("x").status_code(), 401);
        assert_eq!(ApiError::not_found("x").status_code(), 404);
        assert_eq!(ApiError::unprocessable_entity("x", None).status_code(), 422);
        assert_eq!(ApiError::internal_server_error("x").status_code(), 500);
    }

    #[test]
    fn json_body_carries_message_and_code() {
        let body = ApiError::duplicate("Este armazón ya existe").to_json();
        assert_eq!(body["error"], json!(true));
        assert_eq!(body["message"], json!("Este armazón ya existe"));
        assert_eq!(body["code"], json!("DUPLICATE"));
    }

    #[test]
    fn unprocessable_entity_includes_detalle_when_present() {
        let body = ApiError::unprocessable_entity(
            "Datos incompletos o inválidos",
            Some("missing field `marca`".to_string()),
        )
        .to_json();
        assert_eq!(body["detalle"], json!("missing field `marca`"));

        let body = ApiError::unprocessable_entity("Datos incompletos o inválidos", None).to_json();
        assert!(body.get("detalle").is_none());
    }

    #[test]
    fn sqlx_errors_are_masked() {
        let err: ApiError = sqlx::Error::RowNotFound.into();
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.message(), "Error interno del servidor");
    }
}
