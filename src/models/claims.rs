//! Token claims

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Claims carried by every issued token. Never persisted server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthClaims {
    #[serde(rename = "name")]
    pub subject: String,
    #[serde(rename = "admin")]
    pub is_admin: bool,
    /// Unix seconds
    #[serde(rename = "exp")]
    pub expires_at: i64,
    /// Unix seconds
    #[serde(rename = "iat", default)]
    pub issued_at: i64,
}

impl AuthClaims {
    pub fn require_admin(&self) -> AppResult<()> {
        if self.is_admin {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "Administrator privileges required".to_string(),
            ))
        }
    }
}
