//! Credential persistence and session bootstrap.
//!
//! The client keeps exactly one thing on disk between runs: the access token
//! handed out by the login page. Everything else about the session is derived
//! from that token's claims at start-up.

use anyhow::{Context, Result, bail};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use taxipot_api::HttpRoomApi;
use taxipot_engine::SessionWriter;

pub const CREDENTIAL_FILE: &str = "credential";
pub const SNU_EMAIL_DOMAIN: &str = "@snu.ac.kr";

#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(CREDENTIAL_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let token = raw.trim();
        Ok((!token.is_empty()).then(|| token.to_string()))
    }

    pub fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        restrict_permissions(&self.path)?;
        Ok(())
    }

    /// Remove the stored token; `false` when there was none.
    pub fn clear(&self) -> Result<bool> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {}", self.path.display())),
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[derive(Debug, Deserialize)]
struct Claims {
    email: Option<String>,
}

/// `email` claim of a JWT. The signature is not checked; the server does that.
pub fn decode_email(token: &str) -> Result<String> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload)) = (segments.next(), segments.next()) else {
        bail!("Credential is not a JWT");
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .context("Credential payload is not base64url")?;
    let claims: Claims =
        serde_json::from_slice(&bytes).context("Credential payload is not JSON")?;

    claims
        .email
        .filter(|e| !e.is_empty())
        .context("Credential has no email claim")
}

/// Accept a freshly issued token only for SNU accounts.
pub fn verify_snu_token(token: &str) -> Result<String> {
    let email = decode_email(token)?;
    if !email.ends_with(SNU_EMAIL_DOMAIN) {
        bail!("Please log in with a SNU email ({} is not {})", email, SNU_EMAIL_DOMAIN);
    }
    Ok(email)
}

/// Restore the session from the stored credential.
///
/// Attaches the token to `api` and signs the writer in. A missing or
/// unreadable credential leaves the session signed out.
pub fn bootstrap(store: &CredentialStore, api: &HttpRoomApi, writer: &SessionWriter) -> bool {
    let token = match store.load() {
        Ok(Some(token)) => token,
        Ok(None) => return false,
        Err(e) => {
            tracing::warn!(error = %e, "could not read stored credential");
            return false;
        }
    };

    match decode_email(&token) {
        Ok(email) => {
            tracing::debug!(%email, "restored session");
            api.set_credential(Some(token));
            writer.sign_in(email);
            true
        }
        Err(e) => {
            tracing::warn!(error = %e, "ignoring stored credential");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taxipot_engine::session_store;
    use taxipot_testing::fixtures::jwt_with_email;
    use tempfile::TempDir;

    #[test]
    fn test_decode_email_from_payload() {
        let token = jwt_with_email("kim@snu.ac.kr");
        assert_eq!(decode_email(&token).unwrap(), "kim@snu.ac.kr");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_email("not-a-token").is_err());
        assert!(decode_email("a.!!!.c").is_err());
    }

    #[test]
    fn test_only_snu_accounts_are_accepted() {
        assert!(verify_snu_token(&jwt_with_email("kim@snu.ac.kr")).is_ok());
        let err = verify_snu_token(&jwt_with_email("kim@gmail.com")).unwrap_err();
        assert!(err.to_string().contains("SNU email"));
    }

    #[test]
    fn test_store_round_trip_and_clear() {
        let dir = TempDir::new().unwrap();
        let store = CredentialStore::new(dir.path());
        assert_eq!(store.load().unwrap(), None);

        store.save("abc.def.ghi").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("abc.def.ghi"));

        assert!(store.clear().unwrap());
        assert!(!store.clear().unwrap());
    }

    #[test]
    fn test_bootstrap_signs_in() {
        let dir = TempDir::new().unwrap();
        let store = CredentialStore::new(dir.path());
        store.save(&jwt_with_email("lee@snu.ac.kr")).unwrap();

        let api = HttpRoomApi::builder("http://127.0.0.1:9").build().unwrap();
        let (writer, handle) = session_store();
        assert!(bootstrap(&store, &api, &writer));
        assert!(api.has_credential());
        assert_eq!(handle.snapshot().email.as_deref(), Some("lee@snu.ac.kr"));
    }

    #[test]
    fn test_bootstrap_ignores_broken_credential() {
        let dir = TempDir::new().unwrap();
        let store = CredentialStore::new(dir.path());
        store.save("garbage").unwrap();

        let api = HttpRoomApi::builder("http://127.0.0.1:9").build().unwrap();
        let (writer, handle) = session_store();
        assert!(!bootstrap(&store, &api, &writer));
        assert!(!handle.is_logged_in());
        assert!(!api.has_credential());
    }
}
