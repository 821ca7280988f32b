use std::sync::RwLock;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use taxipot_types::{CreateRoomRequest, PotRecord, RoomCreated, SearchPage};

use crate::client::RoomApi;
use crate::error::{ApiError, Result, extract_message};
use crate::query::SearchQuery;

pub const DEFAULT_BASE_URL: &str = "https://snuxi.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// reqwest-backed [`RoomApi`].
///
/// One instance is shared by the whole process. The bearer credential is set
/// after login and attached to every subsequent request.
pub struct HttpRoomApi {
    client: reqwest::Client,
    base_url: String,
    credential: RwLock<Option<String>>,
}

pub struct HttpRoomApiBuilder {
    base_url: String,
    timeout: Duration,
    credential: Option<String>,
}

impl HttpRoomApiBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn credential(mut self, token: Option<String>) -> Self {
        self.credential = token;
        self
    }

    pub fn build(self) -> Result<HttpRoomApi> {
        let parsed = Url::parse(&self.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(self.base_url));
        }

        let client = reqwest::Client::builder().timeout(self.timeout).build()?;

        Ok(HttpRoomApi {
            client,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            credential: RwLock::new(self.credential),
        })
    }
}

impl HttpRoomApi {
    pub fn builder(base_url: impl Into<String>) -> HttpRoomApiBuilder {
        HttpRoomApiBuilder {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            credential: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// External login page that sends the browser back to `return_to`.
    pub fn login_url(&self, return_to: &str) -> Result<String> {
        login_url(&self.base_url, return_to)
    }

    /// Replace the credential used for every following request.
    pub fn set_credential(&self, token: Option<String>) {
        match self.credential.write() {
            Ok(mut guard) => *guard = token,
            Err(poisoned) => *poisoned.into_inner() = token,
        }
    }

    pub fn has_credential(&self) -> bool {
        self.current_credential().is_some()
    }

    fn current_credential(&self) -> Option<String> {
        match self.credential.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.client.request(method, url);
        match self.current_credential() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        let status = response.status();
        tracing::debug!(url = %response.url(), status = status.as_u16(), "response");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Http {
            status: status.as_u16(),
            message: extract_message(&body),
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.send(builder).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// `<base>/login?redirect_uri=<return_to>`, with the return address encoded.
pub fn login_url(base_url: &str, return_to: &str) -> Result<String> {
    let login = format!("{}/login", base_url.trim_end_matches('/'));
    let url = Url::parse_with_params(&login, &[("redirect_uri", return_to)])
        .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", login, e)))?;
    Ok(url.into())
}

impl RoomApi for HttpRoomApi {
    async fn search(&self, query: &SearchQuery) -> Result<SearchPage> {
        tracing::debug!(page = query.page, filter = ?query.filter, "searching rooms");
        let builder = self
            .request(Method::GET, "/rooms/search")
            .query(&query.to_params());
        self.send_json(builder).await
    }

    async fn join(&self, room_id: u32) -> Result<()> {
        let path = format!("/rooms/{}/join", room_id);
        self.send(self.request(Method::POST, &path)).await?;
        Ok(())
    }

    async fn create_room(&self, request: &CreateRoomRequest) -> Result<RoomCreated> {
        let builder = self.request(Method::POST, "/room").json(request);
        self.send_json(builder).await
    }

    async fn current_pot(&self) -> Result<Option<PotRecord>> {
        let result = self.send(self.request(Method::GET, "/users/me/pot")).await;
        let response = match result {
            Ok(response) => response,
            Err(err) if err.is_not_found() => return Ok(None),
            Err(err) => return Err(err),
        };

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        Ok(serde_json::from_str(&body)?)
    }

    async fn leave_room(&self, room_id: u32) -> Result<()> {
        let path = format!("/rooms/{}", room_id);
        self.send(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }

    async fn logout(&self) -> Result<()> {
        self.send(self.request(Method::POST, "/logout")).await?;
        Ok(())
    }

    async fn upload_profile_picture(&self, file_name: &str, bytes: Vec<u8>) -> Result<()> {
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().part("picture", part);
        let builder = self
            .request(Method::POST, "/user/profile/picture")
            .multipart(form);
        self.send(builder).await?;
        Ok(())
    }
}
