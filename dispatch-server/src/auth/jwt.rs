//! JWT token service
//!
//! Issues and validates the session tokens handed out by the login
//! endpoint. Tokens carry the role and, for contractors, the full
//! operating profile, so handlers never need a user lookup.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared::models::{ContractorProfile, Role};

/// JWT configuration
///
/// | Env var | Default | Notes |
/// |---------|---------|-------|
/// | JWT_SECRET | generated (dev only) | must be >= 32 chars |
/// | JWT_EXPIRATION_MINUTES | 1440 | 24h sessions |
/// | JWT_ISSUER | dispatch-server | |
/// | JWT_AUDIENCE | dispatch-clients | |
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Signing secret (at least 32 bytes)
    pub secret: String,
    pub expiration_minutes: i64,
    pub issuer: String,
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: load_jwt_secret(),
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1440),
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "dispatch-server".to_string()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "dispatch-clients".to_string()),
        }
    }
}

/// Read JWT_SECRET, or generate a session-lifetime key when unset.
///
/// A generated key invalidates all tokens on restart, which is acceptable
/// for development; deployments set JWT_SECRET.
fn load_jwt_secret() -> String {
    match std::env::var("JWT_SECRET") {
        Ok(secret) if secret.len() >= 32 => secret,
        Ok(_) => {
            tracing::warn!("JWT_SECRET is shorter than 32 characters, generating a temporary key");
            generate_printable_secret()
        }
        Err(_) => {
            tracing::warn!("JWT_SECRET not set, generating a temporary key for this run");
            generate_printable_secret()
        }
    }
}

/// 64 printable characters from the system CSPRNG.
pub fn generate_printable_secret() -> String {
    const ALPHABET: &[u8] =
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_!@#$%^&*";
    let rng = SystemRandom::new();
    let mut bytes = [0u8; 64];
    if rng.fill(&mut bytes).is_err() {
        // CSPRNG failure is effectively unreachable; fall back to a fixed
        // dev key rather than aborting startup.
        return "dispatch-server-development-fallback-key-0000".to_string();
    }
    bytes
        .iter()
        .map(|b| ALPHABET[*b as usize % ALPHABET.len()] as char)
        .collect()
}

/// Claims stored in the session token
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// Stable user id: OAuth uid for citizens, email for contractors,
    /// "admin" for the admin session
    pub sub: String,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    /// Contractor operating profile, absent for citizens and admins
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contractor: Option<ContractorProfile>,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
    pub aud: String,
}

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("token expired")]
    ExpiredToken,

    #[error("invalid signature")]
    InvalidSignature,

    #[error("token generation failed: {0}")]
    GenerationFailed(String),
}

/// JWT token service
#[derive(Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issue a session token for an authenticated identity.
    pub fn generate_token(
        &self,
        sub: &str,
        email: &str,
        display_name: &str,
        role: Role,
        contractor: Option<ContractorProfile>,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.config.expiration_minutes);

        let claims = Claims {
            sub: sub.to_string(),
            email: email.to_string(),
            display_name: display_name.to_string(),
            role,
            contractor,
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// Validate and decode a token.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(data.claims)
    }

    /// Extract the token from an `Authorization: Bearer <token>` header.
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

/// Current user context, parsed from validated claims.
///
/// Created by the auth middleware and injected into request extensions.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub contractor: Option<ContractorProfile>,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            display_name: claims.display_name,
            role: claims.role,
            contractor: claims.contractor,
        }
    }
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// The contractor profile, or 403 for non-contractor sessions.
    pub fn contractor_profile(&self) -> Result<&ContractorProfile, crate::utils::AppError> {
        self.contractor
            .as_ref()
            .filter(|_| self.role == Role::Contractor)
            .ok_or_else(|| crate::utils::AppError::forbidden("contractor session required"))
    }

    pub fn reporter(&self) -> crate::issues::Reporter {
        crate::issues::Reporter {
            uid: self.id.clone(),
            email: self.email.clone(),
            display_name: self.display_name.clone(),
        }
    }
}
