//! Screen assembly for the interactive shell.

use chrono::FixedOffset;
use taxipot_engine::{Modal, SearchController, Session};
use taxipot_types::{PotRecord, landmark_name};

use super::account::{present_pot, present_profile};
use super::room_card::{present_filter, present_room_card};
use crate::presentation::formatters::{format_departure, to_display, won};
use crate::presentation::view_models::{
    ChatPageViewModel, CreatePageViewModel, FormFieldViewModel, LoginPageViewModel,
    ModalViewModel, MyChatPageViewModel, MyPageViewModel, PageViewModel, SearchPageViewModel,
    ShellScreenViewModel, StatusBadge, TabViewModel,
};
use crate::shell::app::Page;
use crate::shell::create::{CreateField, CreatePage};
use crate::shell::route::{Route, Tab};

const UNSET: &str = "선택하세요";

pub(crate) fn present_screen(
    route: Route,
    page: &Page,
    session: &Session,
    notice: Option<&StatusBadge>,
    login_url: &str,
    offset: FixedOffset,
) -> ShellScreenViewModel {
    let page = match page {
        Page::Search(search) => PageViewModel::Search(present_search_page(search, offset)),
        Page::Create(create) => PageViewModel::Create(present_create_page(create, offset)),
        Page::MyChat(my_chat) => PageViewModel::MyChat(MyChatPageViewModel {
            loading: my_chat.loading,
            pot: my_chat.pot.as_ref().map(|p| present_pot(p, offset)),
            confirm_leave: my_chat.confirm_leave,
        }),
        Page::MyPage { uploading } => PageViewModel::MyPage(MyPageViewModel {
            profile: present_profile(session),
            uploading: *uploading,
        }),
        Page::Chat { room_id, pot } => PageViewModel::Chat(present_chat_page(*room_id, pot.as_ref(), offset)),
        Page::Login => PageViewModel::Login(LoginPageViewModel {
            url: (!session.logged_in).then(|| login_url.to_string()),
            logged_in: session.logged_in,
        }),
    };

    ShellScreenViewModel {
        path: route.to_string(),
        logged_in: session.logged_in,
        tabs: present_tabs(route.tab()),
        notice: notice.cloned(),
        page,
    }
}

pub fn present_tabs(active: Option<Tab>) -> Vec<TabViewModel> {
    Tab::ALL
        .iter()
        .map(|tab| TabViewModel {
            label: tab.label().to_string(),
            hotkey: tab.hotkey(),
            active: Some(*tab) == active,
        })
        .collect()
}

pub fn present_search_page(search: &SearchController, offset: FixedOffset) -> SearchPageViewModel {
    let filter = present_filter(search.filter());
    let modal = match search.modal() {
        Modal::None => ModalViewModel::None,
        Modal::LoginPrompt => ModalViewModel::LoginPrompt,
        Modal::JoinConfirm => ModalViewModel::JoinConfirm {
            room: search.selected_room().map(|r| present_room_card(r, offset)),
            pending: search.join_pending(),
        },
    };

    SearchPageViewModel {
        generation: search.generation(),
        departure: filter.departure,
        destination: filter.destination,
        rooms: search
            .rooms()
            .iter()
            .map(|r| present_room_card(r, offset))
            .collect(),
        has_more: search.has_more(),
        loading: search.is_loading(),
        failure: search.failure().map(|f| f.message.clone()),
        sentinel_row: search.sentinel_row(),
        modal,
    }
}

pub(crate) fn present_create_page(page: &CreatePage, offset: FixedOffset) -> CreatePageViewModel {
    let form = &page.form;
    let landmark = |id: u32| {
        if id == 0 {
            UNSET.to_string()
        } else {
            landmark_name(id).to_string()
        }
    };

    let fields = CreateField::ALL
        .iter()
        .map(|field| {
            let value = match field {
                CreateField::Departure => landmark(form.departure_id),
                CreateField::Destination => landmark(form.destination_id),
                CreateField::DepartureTime => form
                    .departure_time
                    .map(|t| format_departure(&to_display(&t, offset)))
                    .unwrap_or_else(|| UNSET.to_string()),
                CreateField::MinCapacity => format!("{}명", form.min_capacity()),
                CreateField::MaxCapacity => format!("{}명", form.max_capacity()),
                CreateField::EstimatedFee => {
                    won(u32::try_from(form.estimated_fee).unwrap_or(0))
                }
            };
            FormFieldViewModel {
                label: field.label().to_string(),
                value,
            }
        })
        .collect();

    CreatePageViewModel {
        fields,
        focused: page.focused,
        submitting: page.submitting,
    }
}

pub fn present_chat_page(
    room_id: u32,
    pot: Option<&PotRecord>,
    offset: FixedOffset,
) -> ChatPageViewModel {
    ChatPageViewModel {
        room_id,
        pot: pot.map(|p| present_pot(p, offset)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_highlights_search() {
        let tabs = present_tabs(Route::Home.tab());
        assert_eq!(tabs.len(), 4);
        assert!(tabs[0].active);
        assert!(tabs[1..].iter().all(|t| !t.active));
    }

    #[test]
    fn test_login_page_has_no_active_tab() {
        assert!(present_tabs(Route::Login.tab()).iter().all(|t| !t.active));
    }

    #[test]
    fn test_unset_create_fields() {
        let vm = present_create_page(&CreatePage::new(), taxipot_types::service_offset());
        let values: Vec<&str> = vm.fields.iter().map(|f| f.value.as_str()).collect();
        assert_eq!(values, vec![UNSET, UNSET, UNSET, "2명", "4명", "0원"]);
    }
}
