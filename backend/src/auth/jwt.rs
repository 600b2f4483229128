//! JWT access token generation and validation
//!
//! HS256 tokens whose `sub` claim is the user UUID. Keys are derived once
//! and shared behind `Arc`.

use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

const ACCESS_TOKEN_TYPE: &str = "access";

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    ACCESS_TOKEN_TYPE.to_string()
}

impl Claims {
    /// User the token was issued for
    pub fn user_id(&self) -> Result<Uuid> {
        Uuid::parse_str(&self.sub).map_err(|_| anyhow::anyhow!("Invalid user ID in token"))
    }
}

/// Token verifier kept in `AppState`
#[derive(Clone)]
pub struct JwtService {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
    access_token_expiry_secs: i64,
}

impl JwtService {
    /// Derive keys from the shared secret. Call once at startup.
    pub fn new(secret: &str, access_token_expiry_secs: i64) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
            access_token_expiry_secs,
        }
    }

    /// Issue an access token for a user
    pub fn generate_access_token(&self, user_id: Uuid) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (now + Duration::seconds(self.access_token_expiry_secs)).timestamp(),
            iat: now.timestamp(),
            token_type: ACCESS_TOKEN_TYPE.to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to generate access token: {}", e))
    }

    /// Validate signature, expiry and token type
    pub fn validate_access_token(&self, token: &str) -> Result<Claims> {
        let claims = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|e| anyhow::anyhow!("Invalid token: {}", e))?
            .claims;

        if claims.token_type != ACCESS_TOKEN_TYPE {
            return Err(anyhow::anyhow!("Not an access token"));
        }
        Ok(claims)
    }

    #[inline]
    pub fn access_token_expiry_secs(&self) -> i64 {
        self.access_token_expiry_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> JwtService {
        JwtService::new("test-secret", 3600)
    }

    #[test]
    fn test_generate_and_validate_access_token() {
        let service = create_test_service();
        let user_id = Uuid::new_v4();

        let token = service.generate_access_token(user_id).unwrap();
        let claims = service.validate_access_token(&token).unwrap();

        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.token_type, "access");
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let token = JwtService::new("other-secret", 3600)
            .generate_access_token(Uuid::new_v4())
            .unwrap();
        assert!(create_test_service().validate_access_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        // Past the default 60s leeway
        let service = JwtService::new("test-secret", -120);
        let token = service.generate_access_token(Uuid::new_v4()).unwrap();
        assert!(service.validate_access_token(&token).is_err());
    }

    #[test]
    fn test_invalid_token_rejected() {
        let result = create_test_service().validate_access_token("invalid.token.here");
        assert!(result.is_err());
    }

    #[test]
    fn test_non_uuid_subject() {
        let claims = Claims {
            sub: "42".to_string(),
            exp: 0,
            iat: 0,
            token_type: "access".to_string(),
        };
        assert!(claims.user_id().is_err());
    }
}
