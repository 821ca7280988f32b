pub mod account;
pub mod landmark;
pub mod room_card;
pub mod shell;

pub use account::{present_current_pot, present_pot, present_profile};
pub use landmark::present_landmarks;
pub use room_card::{
    present_filter, present_join_result, present_room_card, present_room_created,
    present_room_list,
};
pub use shell::{present_search_page, present_tabs};
