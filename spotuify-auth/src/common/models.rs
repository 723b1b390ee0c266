use chrono::{serde::ts_seconds, DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Access/refresh token pair persisted between runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Space-separated list of granted scopes
    pub scope: String,
    #[serde(with = "ts_seconds")]
    pub expires_at: DateTime<Utc>,
}

impl TokenRecord {
    /// Build a record issued right now that lives for `expires_in`.
    ///
    /// The expiry is truncated to whole seconds so that it survives the
    /// on-disk representation unchanged. A lifetime that does not fit the
    /// calendar is a token endpoint error.
    pub fn issued_now(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        token_type: impl Into<String>,
        scope: impl Into<String>,
        expires_in: Duration,
    ) -> Result<Self, AuthError> {
        let expires_at = Utc::now()
            .checked_add_signed(expires_in)
            .ok_or_else(|| AuthError::TokenEndpoint("Invalid expiry".to_string()))?;

        Ok(Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            token_type: token_type.into(),
            scope: scope.into(),
            expires_at: expires_at.trunc_subsecs(0),
        })
    }

    /// True once `expires_at` falls within `margin` of the current time
    pub fn is_expired(&self, margin: Duration) -> bool {
        Utc::now()
            .checked_add_signed(margin)
            .is_none_or(|limit| self.expires_at <= limit)
    }

    pub fn remaining(&self) -> Duration {
        self.expires_at - Utc::now()
    }

    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.scope.split_whitespace()
    }
}

/// What the callback listener observed for a single flow attempt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorizationResult {
    pub authorization_code: Option<String>,
    pub error: Option<String>,
}

impl AuthorizationResult {
    pub fn code(code: impl Into<String>) -> Self {
        Self {
            authorization_code: Some(code.into()),
            error: None,
        }
    }

    pub fn denied(error: impl Into<String>) -> Self {
        Self {
            authorization_code: None,
            error: Some(error.into()),
        }
    }
}
