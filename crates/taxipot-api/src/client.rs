use std::future::Future;

use taxipot_types::{CreateRoomRequest, PotRecord, RoomCreated, SearchPage};

use crate::error::Result;
use crate::query::SearchQuery;

/// Everything the client asks of the service.
///
/// Futures are `Send` so callers can hand them to a multi-threaded runtime.
pub trait RoomApi: Send + Sync {
    /// `GET /rooms/search`
    fn search(&self, query: &SearchQuery) -> impl Future<Output = Result<SearchPage>> + Send;

    /// `POST /rooms/{room_id}/join`
    fn join(&self, room_id: u32) -> impl Future<Output = Result<()>> + Send;

    /// `POST /room`
    fn create_room(
        &self,
        request: &CreateRoomRequest,
    ) -> impl Future<Output = Result<RoomCreated>> + Send;

    /// `GET /users/me/pot`; `None` when the user is not in any pot.
    fn current_pot(&self) -> impl Future<Output = Result<Option<PotRecord>>> + Send;

    /// `DELETE /rooms/{room_id}`
    fn leave_room(&self, room_id: u32) -> impl Future<Output = Result<()>> + Send;

    /// `POST /logout`
    fn logout(&self) -> impl Future<Output = Result<()>> + Send;

    /// `POST /user/profile/picture` as multipart with a `picture` part.
    fn upload_profile_picture(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> impl Future<Output = Result<()>> + Send;
}
