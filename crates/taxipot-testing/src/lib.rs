//! Testing infrastructure for taxipot integration tests.
//!
//! - `fixtures`: server records, pages and credentials
//! - `fake_api`: scripted in-memory [`taxipot_api::RoomApi`]
//! - `backend`: an axum server that speaks the taxipot REST API
//! - `world`: isolated data directories for CLI runs

pub mod backend;
pub mod fake_api;
pub mod fixtures;
pub mod world;

pub use backend::{BackendState, FakeBackend, RecordedRequest};
pub use fake_api::{ApiCall, FakeRoomApi};
pub use world::{CliResult, TestWorld};
