use bcrypt::{hash, verify, BcryptError, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

/// bcrypt only considers the first 72 bytes of input
const MAX_PASSWORD_BYTES: usize = 72;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub user_id: i32,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: i32, usuario: &str, expiry_minutes: i64) -> Self {
        let now = Utc::now();

        Self {
            sub: usuario.to_string(),
            user_id,
            exp: (now + Duration::minutes(expiry_minutes)).timestamp(),
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug)]
pub enum JwtError {
    TokenGeneration(String),
    InvalidSecret,
}

impl std::fmt::Display for JwtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JwtError::TokenGeneration(msg) => write!(f, "JWT generation error: {}", msg),
            JwtError::InvalidSecret => write!(f, "Invalid JWT secret"),
        }
    }
}

impl std::error::Error for JwtError {}

/// Mint a signed access token for the given claims. HS256, expiry carried
/// inside the claims.
pub fn access_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::default();

    encode(&header, claims, &encoding_key).map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

/// Hash a password with a per-hash random salt. Input is truncated to the
/// bcrypt limit before hashing so overlong passwords cannot error out.
pub fn hash_password(password: &str) -> Result<String, BcryptError> {
    hash(truncate(password), DEFAULT_COST)
}

/// Check a plaintext password against a stored hash, applying the same
/// truncation used at hashing time.
pub fn verify_password(password: &str, hashed: &str) -> Result<bool, BcryptError> {
    verify(truncate(password), hashed)
}

fn truncate(password: &str) -> &[u8] {
    let bytes = password.as_bytes();
    &bytes[..bytes.len().min(MAX_PASSWORD_BYTES)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_verify_and_are_salted() {
        let first = hash_password("hunter2").unwrap();
        let second = hash_password("hunter2").unwrap();

        // Random salt: same input, different digests
        assert_ne!(first, second);
        assert!(verify_password("hunter2", &first).unwrap());
        assert!(verify_password("hunter2", &second).unwrap());
        assert!(!verify_password("wrong", &first).unwrap());
    }

    #[test]
    fn overlong_passwords_are_truncated_consistently() {
        let long = "a".repeat(100);
        let prefix = "a".repeat(72);

        let hashed = hash_password(&long).unwrap();
        assert!(verify_password(&long, &hashed).unwrap());
        assert!(verify_password(&prefix, &hashed).unwrap());
    }

    #[test]
    fn claims_expire_in_the_future() {
        let claims = Claims::new(7, "mrodriguez", 120);
        assert_eq!(claims.sub, "mrodriguez");
        assert_eq!(claims.user_id, 7);
        assert!(claims.exp > claims.iat);
        assert_eq!(claims.exp - claims.iat, 120 * 60);
    }

    #[test]
    fn tokens_are_minted_with_a_secret() {
        let claims = Claims::new(1, "admin", 120);
        let token = access_token(&claims, "secret").unwrap();
        assert_eq!(token.split('.').count(), 3);

        assert!(matches!(
            access_token(&claims, ""),
            Err(JwtError::InvalidSecret)
        ));
    }
}
