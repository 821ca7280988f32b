//! In-memory [`RoomApi`] with scripted responses.
//!
//! Each endpoint pops the next scripted result; once a queue is empty the
//! endpoint answers with a neutral default (empty last page, successful join,
//! ...). Every call is recorded for later assertions.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use taxipot_api::{ApiError, Result, RoomApi, SearchQuery};
use taxipot_types::{CreateRoomRequest, PotRecord, RoomCreated, SearchPage};

#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    Search(SearchQuery),
    Join(u32),
    CreateRoom(CreateRoomRequest),
    CurrentPot,
    LeaveRoom(u32),
    Logout,
    UploadPicture { file_name: String, size: usize },
}

#[derive(Default)]
struct Script {
    searches: VecDeque<Result<SearchPage>>,
    joins: VecDeque<Result<()>>,
    creations: VecDeque<Result<RoomCreated>>,
    current_pot: Option<PotRecord>,
    calls: Vec<ApiCall>,
}

#[derive(Default)]
pub struct FakeRoomApi {
    script: Mutex<Script>,
}

impl FakeRoomApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(self, result: Result<SearchPage>) -> Self {
        self.lock().searches.push_back(result);
        self
    }

    pub fn with_page(self, page: SearchPage) -> Self {
        self.with_search(Ok(page))
    }

    pub fn with_join(self, result: Result<()>) -> Self {
        self.lock().joins.push_back(result);
        self
    }

    /// Reject the next join the way the server does: non-2xx with `errMsg`.
    pub fn rejecting_join(self, status: u16, message: &str) -> Self {
        self.with_join(Err(ApiError::Http {
            status,
            message: Some(message.to_string()),
        }))
    }

    pub fn with_creation(self, result: Result<RoomCreated>) -> Self {
        self.lock().creations.push_back(result);
        self
    }

    pub fn with_current_pot(self, pot: PotRecord) -> Self {
        self.lock().current_pot = Some(pot);
        self
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.lock().calls.clone()
    }

    pub fn search_calls(&self) -> Vec<SearchQuery> {
        self.lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                ApiCall::Search(query) => Some(query.clone()),
                _ => None,
            })
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RoomApi for FakeRoomApi {
    async fn search(&self, query: &SearchQuery) -> Result<SearchPage> {
        let mut script = self.lock();
        script.calls.push(ApiCall::Search(query.clone()));
        script.searches.pop_front().unwrap_or_else(|| {
            Ok(SearchPage {
                content: Vec::new(),
                last: Some(true),
            })
        })
    }

    async fn join(&self, room_id: u32) -> Result<()> {
        let mut script = self.lock();
        script.calls.push(ApiCall::Join(room_id));
        script.joins.pop_front().unwrap_or(Ok(()))
    }

    async fn create_room(&self, request: &CreateRoomRequest) -> Result<RoomCreated> {
        let mut script = self.lock();
        script.calls.push(ApiCall::CreateRoom(request.clone()));
        script
            .creations
            .pop_front()
            .unwrap_or(Ok(RoomCreated { created_pot_id: 1 }))
    }

    async fn current_pot(&self) -> Result<Option<PotRecord>> {
        let mut script = self.lock();
        script.calls.push(ApiCall::CurrentPot);
        Ok(script.current_pot.clone())
    }

    async fn leave_room(&self, room_id: u32) -> Result<()> {
        let mut script = self.lock();
        script.calls.push(ApiCall::LeaveRoom(room_id));
        match &script.current_pot {
            Some(pot) if pot.id == room_id => {
                script.current_pot = None;
                Ok(())
            }
            _ => Err(ApiError::Http {
                status: 404,
                message: Some("참여 중인 방이 아닙니다.".to_string()),
            }),
        }
    }

    async fn logout(&self) -> Result<()> {
        self.lock().calls.push(ApiCall::Logout);
        Ok(())
    }

    async fn upload_profile_picture(&self, file_name: &str, bytes: Vec<u8>) -> Result<()> {
        self.lock().calls.push(ApiCall::UploadPicture {
            file_name: file_name.to_string(),
            size: bytes.len(),
        });
        Ok(())
    }
}
