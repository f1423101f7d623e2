//! API credential loading.
//!
//! Security notes:
//! - The secret is held in a zeroizing buffer and wiped on drop.
//! - Credentials are loaded once at startup; no runtime rotation.
//! - Never log secret material; `Debug` redacts it.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;
use zeroize::Zeroizing;

/// Source of an API key/secret pair.
#[derive(Debug, Clone)]
pub enum CredentialSource {
    /// Load from environment variables (development).
    EnvVar {
        key_var: String,
        secret_var: String,
    },
    /// Load from files (production, recommend 0600 permissions).
    File {
        key_path: PathBuf,
        secret_path: PathBuf,
    },
}

/// Credential loading errors.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// API key pair for authenticated venue calls.
///
/// Both halves must be present: a request is either fully signed or fully
/// public, never signed with partial credentials.
pub struct Credentials {
    api_key: String,
    api_secret: Zeroizing<Vec<u8>>,
}

impl Credentials {
    /// Creates credentials from already-loaded material.
    pub fn new(api_key: impl Into<String>, api_secret: impl AsRef<[u8]>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: Zeroizing::new(api_secret.as_ref().to_vec()),
        }
    }

    /// Loads credentials from the given source.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError` when an environment variable is unset or
    /// a file cannot be read.
    pub fn load(source: &CredentialSource) -> Result<Self, CredentialError> {
        match source {
            CredentialSource::EnvVar {
                key_var,
                secret_var,
            } => {
                let api_key = std::env::var(key_var)
                    .map_err(|_| CredentialError::EnvVarNotFound(key_var.clone()))?;
                let api_secret = std::env::var(secret_var)
                    .map_err(|_| CredentialError::EnvVarNotFound(secret_var.clone()))?;
                Ok(Self::new(api_key.trim(), api_secret.trim()))
            }
            CredentialSource::File {
                key_path,
                secret_path,
            } => {
                let api_key = std::fs::read_to_string(key_path)?;
                let api_secret = std::fs::read_to_string(secret_path)?;
                Ok(Self::new(api_key.trim(), api_secret.trim()))
            }
        }
    }

    /// The API key, sent verbatim in the key header.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The signing secret.
    pub(crate) fn api_secret(&self) -> &[u8] {
        &self.api_secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secret() {
        let credentials = Credentials::new("key", "very-secret");
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("key"));
        assert!(!rendered.contains("very-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_env_var_not_found() {
        let source = CredentialSource::EnvVar {
            key_var: "GUARD_TEST_MISSING_KEY".to_owned(),
            secret_var: "GUARD_TEST_MISSING_SECRET".to_owned(),
        };
        assert!(matches!(
            Credentials::load(&source),
            Err(CredentialError::EnvVarNotFound(_))
        ));
    }
}
