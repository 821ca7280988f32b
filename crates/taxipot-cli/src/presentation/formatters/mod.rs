pub mod text;
pub mod time;

pub use text::{headcount, status_label, won};
pub use time::{format_departure, to_display};
