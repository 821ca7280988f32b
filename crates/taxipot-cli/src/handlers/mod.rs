mod context;

pub mod landmarks;
pub mod login;
pub mod logout;
pub mod me;
pub mod rooms;
pub mod tui;

pub use context::HandlerContext;
