//! HS256 access tokens

use crate::auth::models::{JwtClaims, TokenKind};
use chrono::{Duration, Utc};
use faculty_core::AppError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_hours: i64,
}

impl JwtService {
    pub fn new(secret: &str, expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry_hours,
        }
    }

    pub fn issue(&self, subject: &str, kind: TokenKind) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: subject.to_string(),
            kind,
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.expiry_hours)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    pub fn verify(&self, token: &str) -> Result<JwtClaims, AppError> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<JwtClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected access token");
                AppError::Unauthorized("Could not validate credentials".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn test_issued_token_verifies() {
        let jwt = JwtService::new(SECRET, 24);
        let token = jwt.issue("2025000001", TokenKind::Student).unwrap();

        let claims = jwt.verify(&token).unwrap();
        assert_eq!(claims.sub, "2025000001");
        assert_eq!(claims.kind, TokenKind::Student);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let token = JwtService::new(SECRET, 24)
            .issue("admin", TokenKind::Admin)
            .unwrap();
        let other = JwtService::new("another-secret-that-is-long-enough!!", 24);

        assert!(matches!(other.verify(&token), Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let jwt = JwtService::new(SECRET, -2);
        let token = jwt.issue("admin", TokenKind::Admin).unwrap();
        assert!(jwt.verify(&token).is_err());
    }
}
