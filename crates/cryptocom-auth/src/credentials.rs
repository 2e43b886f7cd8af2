//! API credentials for the Crypto.com Exchange
//!
//! # Security
//!
//! The secret key is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`
//!
//! # Rotation
//!
//! [`CredentialStore`] hands out immutable snapshots. A request takes one
//! snapshot and signs with it, so a concurrent [`CredentialStore::rotate`]
//! can never mix the key of one pair with the secret of another.

use parking_lot::RwLock;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tracing::info;

use crate::error::{AuthError, AuthResult};

/// API key and secret key pair
pub struct Credentials {
    /// API key (public, sent in every private request)
    api_key: String,
    /// Secret key (zeroized on drop)
    secret_key: SecretString,
}

impl Credentials {
    /// Create new credentials
    ///
    /// Both the key and the secret must be non-empty.
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> AuthResult<Self> {
        let api_key = api_key.into();
        let secret_key = secret_key.into();

        if api_key.is_empty() {
            return Err(AuthError::InvalidCredentials(
                "api key cannot be empty".to_string(),
            ));
        }
        if secret_key.is_empty() {
            return Err(AuthError::InvalidCredentials(
                "secret key cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            api_key,
            secret_key: SecretString::from(secret_key),
        })
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get the secret key
    pub fn secret_key(&self) -> &SecretString {
        &self.secret_key
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            secret_key: SecretString::from(self.secret_key.expose_secret().to_string()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

/// Shared, rotatable credential pair
#[derive(Debug)]
pub struct CredentialStore {
    current: RwLock<Arc<Credentials>>,
}

impl CredentialStore {
    /// Create a store holding `credentials`
    pub fn new(credentials: Credentials) -> Self {
        Self {
            current: RwLock::new(Arc::new(credentials)),
        }
    }

    /// Current pair
    ///
    /// The returned snapshot stays valid after a rotation.
    pub fn snapshot(&self) -> Arc<Credentials> {
        Arc::clone(&self.current.read())
    }

    /// Replace the pair used by subsequent requests
    pub fn rotate(&self, credentials: Credentials) {
        info!(api_key = %credentials.api_key(), "Rotating API credentials");
        *self.current.write() = Arc::new(credentials);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_rejected() {
        assert!(matches!(
            Credentials::new("", "secret"),
            Err(AuthError::InvalidCredentials(_))
        ));
        assert!(matches!(
            Credentials::new("key", ""),
            Err(AuthError::InvalidCredentials(_))
        ));
    }

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let creds = Credentials::new("my-key", "super-secret").unwrap();
        let debug = format!("{:?}", creds);

        assert!(debug.contains("my-key"));
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_clone_keeps_secret() {
        let creds = Credentials::new("k", "s").unwrap();
        let cloned = creds.clone();
        assert_eq!(cloned.api_key(), "k");
        assert_eq!(cloned.secret_key().expose_secret(), "s");
    }

    #[test]
    fn test_snapshot_survives_rotation() {
        let store = CredentialStore::new(Credentials::new("old-key", "old-secret").unwrap());
        let before = store.snapshot();

        store.rotate(Credentials::new("new-key", "new-secret").unwrap());
        let after = store.snapshot();

        assert_eq!(before.api_key(), "old-key");
        assert_eq!(before.secret_key().expose_secret(), "old-secret");
        assert_eq!(after.api_key(), "new-key");
        assert_eq!(after.secret_key().expose_secret(), "new-secret");
    }

    #[test]
    fn test_concurrent_rotation_never_mixes_pairs() {
        let store = Arc::new(CredentialStore::new(Credentials::new("k0", "s0").unwrap()));

        let writer = {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for i in 1..200 {
                    store.rotate(
                        Credentials::new(format!("k{}", i), format!("s{}", i)).unwrap(),
                    );
                }
            })
        };

        for _ in 0..1000 {
            let snap = store.snapshot();
            let key_suffix = &snap.api_key()[1..];
            let secret_suffix = &snap.secret_key().expose_secret()[1..];
            assert_eq!(key_suffix, secret_suffix);
        }

        writer.join().unwrap();
    }
}
