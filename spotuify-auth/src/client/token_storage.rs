use crate::common::TokenRecord;
use crate::error::AuthError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const TOKEN_FILE: &str = "token.json";

/// Single-record token cache on disk
#[derive(Debug, Clone)]
pub struct TokenStore {
    token_path: PathBuf,
}

impl TokenStore {
    pub fn new() -> Result<Self, AuthError> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| AuthError::Configuration("Could not find cache directory".to_string()))?
            .join("spotuify");

        Ok(Self::at(cache_dir.join(TOKEN_FILE)))
    }

    pub fn at(token_path: impl Into<PathBuf>) -> Self {
        Self {
            token_path: token_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.token_path
    }

    /// Write the record through a temporary file so readers never observe a
    /// half-written cache
    pub fn save_token(&self, token: &TokenRecord) -> Result<(), AuthError> {
        if let Some(parent) = self.token_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AuthError::TokenStorage(format!("Failed to create cache directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(token)?;
        let tmp_path = self.token_path.with_extension("json.tmp");

        fs::write(&tmp_path, json)
            .map_err(|e| AuthError::TokenStorage(format!("Failed to save token: {}", e)))?;

        // Owner read/write only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp_path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                AuthError::TokenStorage(format!("Failed to set file permissions: {}", e))
            })?;
        }

        fs::rename(&tmp_path, &self.token_path)
            .map_err(|e| AuthError::TokenStorage(format!("Failed to replace token: {}", e)))?;

        tracing::debug!(path = %self.token_path.display(), "Token saved");
        Ok(())
    }

    pub fn load_token(&self) -> Result<Option<TokenRecord>, AuthError> {
        let json = match fs::read_to_string(&self.token_path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AuthError::CorruptCache(format!("Failed to read token: {}", e)));
            }
        };

        serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| AuthError::CorruptCache(e.to_string()))
    }

    /// Remove the cached record; a missing file is not an error
    pub fn delete_token(&self) -> Result<(), AuthError> {
        match fs::remove_file(&self.token_path) {
            Ok(()) => {
                tracing::debug!(path = %self.token_path.display(), "Token deleted");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuthError::TokenStorage(format!(
                "Failed to delete token: {}",
                e
            ))),
        }
    }
}
