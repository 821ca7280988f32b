//! View-state for the taxipot client.
//!
//! Nothing in this crate performs I/O. Operations that need the network
//! return a ticket ([`FetchTicket`], [`JoinTicket`]); the owner executes it
//! through a [`taxipot_api::RoomApi`] and feeds the outcome back. That keeps
//! every state transition on the owner's thread and makes the machines
//! testable without a server.

pub mod create;
pub mod navigation;
pub mod search;
pub mod session;
pub mod viewport;

pub use create::{CreateRoomForm, FormError, MAX_PARTY, MIN_PARTY};
pub use navigation::{LoginRedirect, Navigation};
pub use search::{
    FailedFetch, FetchTicket, JOIN_FAILED_FALLBACK, JoinOutcome, JoinTicket, Modal, PageOutcome,
    SearchController,
};
pub use session::{DEFAULT_NICKNAME, Session, SessionHandle, SessionWriter, session_store};
pub use viewport::{SentinelSubscription, SubscriptionId, ViewportRegistry};
