use anyhow::{Result, bail};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use taxipot_api::HttpRoomApi;
use taxipot_engine::{SessionHandle, SessionWriter, session_store};
use tokio::runtime::Runtime;

use crate::auth::{self, CredentialStore};
use crate::config::{CONFIG_FILE, Config};

/// Everything a command needs: resolved config, the API client with the
/// stored credential attached, the session and a runtime to drive requests.
pub struct ClientContext {
    data_dir: PathBuf,
    config: Config,
    api: Arc<HttpRoomApi>,
    credentials: CredentialStore,
    session: SessionWriter,
    runtime: Runtime,
}

pub struct ShellResources {
    pub config: Config,
    pub api: Arc<HttpRoomApi>,
    pub credentials: CredentialStore,
    pub session: SessionWriter,
    pub runtime: Runtime,
}

impl ClientContext {
    pub fn new(data_dir: PathBuf, base_url: Option<String>) -> Result<Self> {
        let mut config = Config::load_from(&data_dir.join(CONFIG_FILE))?;
        if let Some(base_url) = base_url {
            config.base_url = base_url;
        }

        let api = HttpRoomApi::builder(config.base_url.clone())
            .timeout(config.request_timeout())
            .build()?;
        let credentials = CredentialStore::new(&data_dir);
        let (session, _) = session_store();
        auth::bootstrap(&credentials, &api, &session);

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;

        Ok(Self {
            data_dir,
            config,
            api: Arc::new(api),
            credentials,
            session,
            runtime,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn api(&self) -> &Arc<HttpRoomApi> {
        &self.api
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    pub fn session(&self) -> &SessionWriter {
        &self.session
    }

    pub fn session_handle(&self) -> SessionHandle {
        self.session.handle()
    }

    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    pub fn login_url(&self) -> Result<String> {
        Ok(self.api.login_url(&self.config.return_url)?)
    }

    /// The interactive shell becomes the only owner of the session writer.
    pub fn into_shell(self) -> ShellResources {
        ShellResources {
            config: self.config,
            api: self.api,
            credentials: self.credentials,
            session: self.session,
            runtime: self.runtime,
        }
    }

    pub fn require_login(&self) -> Result<()> {
        if !self.session.handle().is_logged_in() {
            bail!("Not logged in. Run `taxipot login` first.");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use taxipot_testing::fixtures::jwt_with_email;

    #[test]
    fn test_base_url_override_wins_over_config() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "base_url = \"http://127.0.0.1:1\"\n",
        )
        .unwrap();

        let ctx = ClientContext::new(dir.path().to_path_buf(), Some("http://127.0.0.1:2".into()))
            .unwrap();
        assert_eq!(ctx.api().base_url(), "http://127.0.0.1:2");
        assert!(ctx.require_login().is_err());
    }

    #[test]
    fn test_stored_credential_signs_in() {
        let dir = TempDir::new().unwrap();
        CredentialStore::new(dir.path())
            .save(&jwt_with_email("park@snu.ac.kr"))
            .unwrap();

        let ctx = ClientContext::new(dir.path().to_path_buf(), None).unwrap();
        assert!(ctx.require_login().is_ok());
        assert!(ctx.api().has_credential());
        assert_eq!(
            ctx.session_handle().snapshot().email.as_deref(),
            Some("park@snu.ac.kr")
        );
    }

    #[test]
    fn test_login_url_carries_return_address() {
        let dir = TempDir::new().unwrap();
        let ctx = ClientContext::new(dir.path().to_path_buf(), None).unwrap();
        assert_eq!(
            ctx.login_url().unwrap(),
            "https://snuxi.com/login?redirect_uri=http%3A%2F%2Flocalhost%3A5173"
        );
    }
}
