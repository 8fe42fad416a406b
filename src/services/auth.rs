//! Token issuing/verification and credential checks

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult, TokenError},
    models::AuthClaims,
};

/// A freshly signed token and the claims it carries
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: AuthClaims,
}

/// HS256 token signer/verifier
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl_hours: u64) -> AppResult<Self> {
        let ttl = i64::try_from(ttl_hours)
            .ok()
            .and_then(Duration::try_hours)
            .ok_or_else(|| AppError::Internal(format!("Token lifetime of {} hours is out of range", ttl_hours)))?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        })
    }

    pub fn from_config(config: &AuthConfig) -> AppResult<Self> {
        Self::new(&config.jwt_secret, config.jwt_expiration_hours)
    }

    pub fn issue(&self, subject: &str, is_admin: bool) -> AppResult<IssuedToken> {
        self.issue_at(subject, is_admin, Utc::now())
    }

    /// Issue a token as if the current time were `now`
    pub fn issue_at(&self, subject: &str, is_admin: bool, now: DateTime<Utc>) -> AppResult<IssuedToken> {
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::Internal("Token expiry is out of range".to_string()))?;
        let claims = AuthClaims {
            subject: subject.to_string(),
            is_admin,
            expires_at: expires_at.timestamp(),
            issued_at: now.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))?;

        Ok(IssuedToken { token, claims })
    }

    /// Check signature and expiry, returning the embedded claims
    pub fn verify(&self, token: &str) -> Result<AuthClaims, TokenError> {
        let data = decode::<AuthClaims>(token, &self.decoding, &self.validation)?;
        Ok(data.claims)
    }
}

/// Identity established by a successful credential check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub subject: String,
    pub is_admin: bool,
}

/// Verifies a username/password pair
pub trait CredentialVerifier: Send + Sync {
    fn authenticate(&self, username: &str, password: &str) -> Option<Principal>;
}

/// One configured account, password kept only as an Argon2 hash
pub struct StaticCredentials {
    username: String,
    password_hash: String,
    is_admin: bool,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>, is_admin: bool) -> AppResult<Self> {
        let password_hash = password_hash.into();
        PasswordHash::new(&password_hash)
            .map_err(|e| AppError::Internal(format!("Invalid password hash: {}", e)))?;

        Ok(Self {
            username: username.into(),
            password_hash,
            is_admin,
        })
    }

    /// Build from config, hashing a plaintext password when no hash is given
    pub fn from_config(config: &AuthConfig) -> AppResult<Self> {
        let hash = match (&config.password_hash, &config.password) {
            (Some(hash), _) => hash.clone(),
            (None, Some(password)) => hash_password(password)?,
            (None, None) => {
                return Err(AppError::Internal(
                    "auth.password or auth.password_hash must be set".to_string(),
                ))
            }
        };
        Self::new(config.username.clone(), hash, true)
    }
}

impl CredentialVerifier for StaticCredentials {
    fn authenticate(&self, username: &str, password: &str) -> Option<Principal> {
        if username != self.username {
            return None;
        }

        let parsed_hash = PasswordHash::new(&self.password_hash).ok()?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .ok()?;

        Some(Principal {
            subject: self.username.clone(),
            is_admin: self.is_admin,
        })
    }
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

#[derive(Clone)]
pub struct AuthService {
    tokens: TokenService,
    credentials: Arc<dyn CredentialVerifier>,
}

impl AuthService {
    pub fn new(tokens: TokenService, credentials: Arc<dyn CredentialVerifier>) -> Self {
        Self { tokens, credentials }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Check credentials and issue a token for the resulting principal
    pub fn login(&self, username: &str, password: &str) -> AppResult<IssuedToken> {
        let principal = self
            .credentials
            .authenticate(username, password)
            .ok_or_else(|| {
                tracing::warn!(username, "Rejected login attempt");
                AppError::Authentication("Invalid login or password".to_string())
            })?;

        let issued = self.tokens.issue(&principal.subject, principal.is_admin)?;
        tracing::info!(subject = %principal.subject, "Issued token");
        Ok(issued)
    }

    pub fn verify(&self, token: &str) -> Result<AuthClaims, TokenError> {
        self.tokens.verify(token)
    }
}
