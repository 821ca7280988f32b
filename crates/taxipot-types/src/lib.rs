pub mod error;
pub mod filter;
pub mod landmark;
pub mod pot;
pub mod room;
pub mod time;

pub use error::{Error, Result};
pub use filter::{LandmarkFilter, SearchFilter};
pub use landmark::{LANDMARKS, Landmark, UNKNOWN_LANDMARK, landmark_name};
pub use pot::{CreateRoomRequest, PotRecord, PotStatus, RoomCreated, SearchPage};
pub use room::Room;
pub use time::{SERVICE_UTC_OFFSET_SECS, format_service_time, parse_service_time, service_offset};
