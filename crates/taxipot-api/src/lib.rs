//! Gateway client for the taxipot REST API.
//!
//! [`RoomApi`] is the contract the rest of the client depends on;
//! [`HttpRoomApi`] is the reqwest implementation with a shared base URL and
//! a process-wide bearer credential.

pub mod client;
pub mod error;
pub mod http;
pub mod query;

pub use client::RoomApi;
pub use error::{ApiError, Result};
pub use http::{DEFAULT_BASE_URL, HttpRoomApi, HttpRoomApiBuilder, login_url};
pub use query::{DEFAULT_PAGE_SIZE, DEFAULT_SORT, SearchQuery};
