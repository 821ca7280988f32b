//! taxipot: a terminal client for the SNU shared-taxi service.
//!
//! One-shot commands (`rooms`, `me`, `login`, ...) render through the
//! presentation layer to stdout; `taxipot tui` runs the routed interactive
//! shell.

mod args;
pub mod auth;
mod commands;
pub mod config;
pub mod context;
mod handlers;
pub mod logging;
pub mod presentation;
pub mod shell;

pub use args::{Cli, Commands, MeCommand, RoomsCommand};
pub use commands::run;
