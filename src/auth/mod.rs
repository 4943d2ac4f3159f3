use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(email: impl Into<String>, expiry_hours: i64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(expiry_hours)).timestamp();

        Self {
            email: email.into(),
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT secret is not configured")]
    MissingSecret,

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),
}

pub fn generate_jwt(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::MissingSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::default();

    encode(&header, claims, &encoding_key).map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

pub fn decode_jwt(token: &str, secret: &str) -> Result<Claims, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::MissingSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    decode::<Claims>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|e| JwtError::InvalidToken(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_round_trip() {
        let claims = Claims::new("student@learnhub.io", 5);
        let token = generate_jwt(&claims, SECRET).unwrap();
        let decoded = decode_jwt(&token, SECRET).unwrap();
        assert_eq!(decoded.email, "student@learnhub.io");
        assert_eq!(decoded.exp, claims.exp);
    }

    #[test]
    fn test_five_hour_expiry_window() {
        let claims = Claims::new("student@learnhub.io", 5);
        let lifetime = claims.exp - claims.iat;
        assert_eq!(lifetime, 5 * 3600);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let claims = Claims::new("student@learnhub.io", 5);
        let token = generate_jwt(&claims, SECRET).unwrap();
        assert!(matches!(
            decode_jwt(&token, "another-secret"),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let claims = Claims {
            email: "student@learnhub.io".to_string(),
            iat: Utc::now().timestamp() - 6 * 3600,
            exp: Utc::now().timestamp() - 3600,
        };
        let token = generate_jwt(&claims, SECRET).unwrap();
        assert!(matches!(
            decode_jwt(&token, SECRET),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_empty_secret_refused() {
        let claims = Claims::new("student@learnhub.io", 5);
        assert!(matches!(generate_jwt(&claims, ""), Err(JwtError::MissingSecret)));
    }
}
