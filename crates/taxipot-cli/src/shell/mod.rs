//! Interactive shell: routing, page state and the network task plumbing.

pub mod app;
pub mod create;
pub mod route;

pub use app::{ApiEvent, App, AppEvent, Exit, ShellOptions};
pub use create::{CreateField, CreatePage};
pub use route::{Route, Tab};
