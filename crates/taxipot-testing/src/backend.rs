//! Fake taxipot server.
//!
//! Serves the subset of the REST API the client uses from an in-memory room
//! list on an ephemeral localhost port, and records every request it sees.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::Result;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::json;
use taxipot_types::{CreateRoomRequest, PotRecord, PotStatus};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
}

impl RecordedRequest {
    /// Value of one query parameter, undecoded.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query.as_deref()?.split('&').find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            (key == name).then_some(value)
        })
    }
}

#[derive(Debug, Default)]
pub struct BackendState {
    pub pots: Vec<PotRecord>,
    /// Pot the authenticated user currently belongs to.
    pub current_pot: Option<u32>,
    /// Force the next joins to fail with this status and `errMsg`.
    pub join_rejection: Option<(u16, String)>,
    /// Reject authenticated endpoints without a bearer token.
    pub require_auth: bool,
    pub requests: Vec<RecordedRequest>,
}

impl BackendState {
    pub fn with_pots(pots: Vec<PotRecord>) -> Self {
        Self {
            pots,
            ..Self::default()
        }
    }
}

type Shared = Arc<Mutex<BackendState>>;

pub struct FakeBackend {
    addr: SocketAddr,
    state: Shared,
    server: JoinHandle<std::io::Result<()>>,
}

impl FakeBackend {
    pub async fn start(state: BackendState) -> Result<Self> {
        let state = Arc::new(Mutex::new(state));
        let app = Router::new()
            .route("/rooms/search", get(search))
            .route("/rooms/{id}/join", post(join))
            .route("/rooms/{id}", delete(leave))
            .route("/room", post(create))
            .route("/users/me/pot", get(current_pot))
            .route("/logout", post(logout))
            .route("/user/profile/picture", post(upload_picture))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let server = tokio::spawn(async move { axum::serve(listener, app).await });

        Ok(Self {
            addr,
            state,
            server,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.state).requests.clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        lock(&self.state).requests.last().cloned()
    }

    /// Inspect or mutate the server state between requests.
    pub fn with_state<T>(&self, f: impl FnOnce(&mut BackendState) -> T) -> T {
        f(&mut lock(&self.state))
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

fn lock(state: &Shared) -> MutexGuard<'_, BackendState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Record the request; answers 401 when auth is required and missing.
fn admit(
    state: &mut BackendState,
    method: Method,
    uri: &Uri,
    headers: &HeaderMap,
    needs_auth: bool,
) -> Option<Response> {
    let authorization = header_value(headers, header::AUTHORIZATION);
    state.requests.push(RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: authorization.clone(),
        content_type: header_value(headers, header::CONTENT_TYPE),
    });

    let authorized = authorization.is_some_and(|v| v.starts_with("Bearer "));
    if needs_auth && state.require_auth && !authorized {
        return Some(err_msg(StatusCode::UNAUTHORIZED, "로그인이 필요합니다."));
    }
    None
}

fn err_msg(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "errMsg": message }))).into_response()
}

async fn search(
    State(state): State<Shared>,
    uri: Uri,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mut state = lock(&state);
    if let Some(rejected) = admit(&mut state, Method::GET, &uri, &headers, false) {
        return rejected;
    }

    let number = |key: &str| params.get(key).and_then(|v| v.parse::<u32>().ok());
    let departure = number("departureId");
    let destination = number("destinationId");
    let page = number("page").unwrap_or(0) as usize;
    let size = number("size").unwrap_or(10).max(1) as usize;

    let mut matching: Vec<&PotRecord> = state
        .pots
        .iter()
        .filter(|p| departure.is_none_or(|id| p.departure_id == id))
        .filter(|p| destination.is_none_or(|id| p.destination_id == id))
        .collect();
    matching.sort_by_key(|p| p.departure_time);

    let start = (page * size).min(matching.len());
    let end = (start + size).min(matching.len());
    let content: Vec<&PotRecord> = matching[start..end].to_vec();
    let last = end >= matching.len();

    Json(json!({ "content": content, "last": last, "number": page })).into_response()
}

async fn join(
    State(state): State<Shared>,
    uri: Uri,
    headers: HeaderMap,
    Path(id): Path<u32>,
) -> Response {
    let mut state = lock(&state);
    if let Some(rejected) = admit(&mut state, Method::POST, &uri, &headers, true) {
        return rejected;
    }

    if let Some((status, message)) = state.join_rejection.clone() {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_REQUEST);
        return err_msg(status, &message);
    }
    if state.current_pot.is_some() {
        return err_msg(StatusCode::CONFLICT, "이미 참여 중인 방이 있습니다.");
    }

    let Some(pot) = state.pots.iter_mut().find(|p| p.id == id) else {
        return err_msg(StatusCode::NOT_FOUND, "존재하지 않는 방입니다.");
    };
    if pot.current_count >= pot.max_capacity {
        return err_msg(StatusCode::CONFLICT, "방이 가득 찼습니다");
    }
    pot.current_count += 1;
    if pot.current_count >= pot.max_capacity {
        pot.status = PotStatus::Full;
    }
    state.current_pot = Some(id);
    StatusCode::OK.into_response()
}

async fn leave(
    State(state): State<Shared>,
    uri: Uri,
    headers: HeaderMap,
    Path(id): Path<u32>,
) -> Response {
    let mut state = lock(&state);
    if let Some(rejected) = admit(&mut state, Method::DELETE, &uri, &headers, true) {
        return rejected;
    }
    if state.current_pot != Some(id) {
        return err_msg(StatusCode::NOT_FOUND, "참여 중인 방이 아닙니다.");
    }
    state.current_pot = None;
    if let Some(pot) = state.pots.iter_mut().find(|p| p.id == id) {
        pot.current_count = pot.current_count.saturating_sub(1);
        pot.status = PotStatus::Recruiting;
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn create(
    State(state): State<Shared>,
    uri: Uri,
    headers: HeaderMap,
    Json(request): Json<CreateRoomRequest>,
) -> Response {
    let mut state = lock(&state);
    if let Some(rejected) = admit(&mut state, Method::POST, &uri, &headers, true) {
        return rejected;
    }

    let id = state.pots.iter().map(|p| p.id).max().unwrap_or(0) + 1;
    state.pots.push(PotRecord {
        id,
        owner_id: 1,
        owner_name: None,
        departure_id: request.departure_id,
        destination_id: request.destination_id,
        departure_time: request.departure_time,
        min_capacity: request.min_capacity,
        max_capacity: request.max_capacity,
        current_count: 1,
        estimated_fee: request.estimated_fee,
        status: PotStatus::Recruiting,
    });
    state.current_pot = Some(id);
    (StatusCode::CREATED, Json(json!({ "createdPotId": id }))).into_response()
}

async fn current_pot(State(state): State<Shared>, uri: Uri, headers: HeaderMap) -> Response {
    let mut state = lock(&state);
    if let Some(rejected) = admit(&mut state, Method::GET, &uri, &headers, true) {
        return rejected;
    }
    let pot = state
        .current_pot
        .and_then(|id| state.pots.iter().find(|p| p.id == id));
    match pot {
        Some(pot) => Json(pot.clone()).into_response(),
        None => err_msg(StatusCode::NOT_FOUND, "참여 중인 방이 없습니다."),
    }
}

async fn logout(State(state): State<Shared>, uri: Uri, headers: HeaderMap) -> Response {
    let mut state = lock(&state);
    if let Some(rejected) = admit(&mut state, Method::POST, &uri, &headers, true) {
        return rejected;
    }
    StatusCode::OK.into_response()
}

async fn upload_picture(
    State(state): State<Shared>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let mut state = lock(&state);
    if let Some(rejected) = admit(&mut state, Method::POST, &uri, &headers, true) {
        return rejected;
    }
    if body.is_empty() {
        return err_msg(StatusCode::BAD_REQUEST, "파일이 없습니다.");
    }
    StatusCode::OK.into_response()
}
