//! Persistent storage for the opaque bearer token.
//!
//! Priority: OS keychain, then the `TASKDECK_AUTH__TOKEN` environment
//! variable, then a 0600 file under `~/.taskdeck/`. Writes go to the
//! keychain and fall back to the file when no keyring backend is
//! available.

use std::fs;
use std::path::PathBuf;

use crate::error::GatewayError;

const DEFAULT_KEYRING_SERVICE: &str = "taskdeck";
const KEYRING_USER: &str = "auth-token";
const CREDENTIALS_FILE_NAME: &str = "credentials";

/// Returns the keyring service name.
///
/// Defaults to `"taskdeck"`. Override via `TASKDECK_KEYRING_SERVICE` for
/// testing to avoid touching production credentials.
fn keyring_service() -> String {
    std::env::var("TASKDECK_KEYRING_SERVICE")
        .unwrap_or_else(|_| DEFAULT_KEYRING_SERVICE.to_string())
}

/// Store the bearer token in the OS keychain. Falls back to file if the
/// keyring is unavailable.
///
/// # Errors
///
/// Returns [`GatewayError::TokenStore`] if both keyring and file storage fail.
pub fn store(token: &str) -> Result<(), GatewayError> {
    match keyring::Entry::new(&keyring_service(), KEYRING_USER) {
        Ok(entry) => match entry.set_password(token) {
            Ok(()) => Ok(()),
            Err(error) => {
                tracing::warn!(%error, "keyring store failed; falling back to file");
                store_file(token)
            }
        },
        Err(error) => {
            tracing::warn!(%error, "keyring unavailable; falling back to file");
            store_file(token)
        }
    }
}

/// Load the token. Priority: keyring → `TASKDECK_AUTH__TOKEN` env →
/// file (`~/.taskdeck/credentials`).
#[must_use]
pub fn load() -> Option<String> {
    // 1. Keyring
    if let Ok(entry) = keyring::Entry::new(&keyring_service(), KEYRING_USER)
        && let Ok(token) = entry.get_password()
        && !token.is_empty()
    {
        return Some(token);
    }

    // 2. Environment variable
    if let Ok(token) = std::env::var("TASKDECK_AUTH__TOKEN") {
        if !token.is_empty() {
            return Some(token);
        }
    }

    // 3. File fallback
    load_file()
}

/// Delete the stored token from keyring and file.
///
/// # Errors
///
/// Returns [`GatewayError::TokenStore`] if the credentials file cannot be
/// removed.
pub fn delete() -> Result<(), GatewayError> {
    // Delete from keyring (ignore errors — may not exist)
    if let Ok(entry) = keyring::Entry::new(&keyring_service(), KEYRING_USER) {
        let _ = entry.delete_credential();
    }

    // Delete credentials file
    let path = credentials_path()?;
    if path.exists() {
        fs::remove_file(&path).map_err(|e| {
            GatewayError::TokenStore(format!("failed to delete {}: {e}", path.display()))
        })?;
    }

    Ok(())
}

// --- Private file helpers ---

fn credentials_path() -> Result<PathBuf, GatewayError> {
    dirs::home_dir()
        .map(|h| h.join(".taskdeck").join(CREDENTIALS_FILE_NAME))
        .ok_or_else(|| {
            GatewayError::TokenStore("home directory not found — cannot store credentials".into())
        })
}

fn store_file(token: &str) -> Result<(), GatewayError> {
    let path = credentials_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| GatewayError::TokenStore(format!("mkdir {}: {e}", parent.display())))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
            }
        }
    }
    fs::write(&path, token)
        .map_err(|e| GatewayError::TokenStore(format!("write {}: {e}", path.display())))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600))
            .map_err(|e| GatewayError::TokenStore(format!("chmod {}: {e}", path.display())))?;
    }

    Ok(())
}

fn load_file() -> Option<String> {
    let path = credentials_path().ok()?;
    fs::read_to_string(&path)
        .ok()
        .filter(|s| !s.trim().is_empty())
}
