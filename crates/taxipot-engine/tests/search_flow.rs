//! Search page driven end to end against the in-memory API.

use std::collections::HashSet;

use taxipot_api::{ApiError, RoomApi};
use taxipot_engine::{
    FetchTicket, JoinOutcome, LoginRedirect, Modal, Navigation, PageOutcome, SearchController,
    ViewportRegistry, session_store,
};
use taxipot_testing::FakeRoomApi;
use taxipot_testing::fixtures::{page, pots};

async fn execute(
    search: &mut SearchController,
    api: &FakeRoomApi,
    ticket: Option<FetchTicket>,
) -> PageOutcome {
    let ticket = ticket.expect("a fetch should have been issued");
    let result = api.search(&ticket.query()).await;
    search.apply_page(&ticket, result)
}

#[tokio::test]
async fn test_filtered_search_accumulates_two_pages() {
    let api = FakeRoomApi::new()
        .with_page(page(pots(1..=10, 7, 3), Some(false)))
        .with_page(page(pots(11..=15, 7, 3), Some(true)));
    let mut search = SearchController::new(ViewportRegistry::new());

    let ticket = search.set_filter(7, 3);
    let outcome = execute(&mut search, &api, Some(ticket)).await;
    assert_eq!(
        outcome,
        PageOutcome::Loaded {
            added: 10,
            has_more: true
        }
    );
    assert_eq!(search.rooms().len(), 10);
    assert!(search.has_more());

    let next = search.advance_page();
    assert_eq!(next.as_ref().map(|t| (t.page, t.is_new_search)), Some((1, false)));
    execute(&mut search, &api, next).await;
    assert_eq!(search.rooms().len(), 15);
    assert!(!search.has_more());
    assert_eq!(search.page(), 1);

    let queries = api.search_calls();
    assert_eq!(queries.len(), 2);
    assert_eq!(queries[0].filter.departure.id(), 7);
    assert_eq!(queries[0].filter.destination.id(), 3);
    assert_eq!(queries[1].page, 1);

    assert_eq!(search.advance_page(), None);
}

#[tokio::test]
async fn test_overlapping_pages_never_duplicate_rooms() {
    let api = FakeRoomApi::new()
        .with_page(page(pots(1..=10, 1, 2), Some(false)))
        .with_page(page(pots(6..=14, 1, 2), Some(false)))
        .with_page(page(pots(14..=16, 1, 2), Some(true)));
    let mut search = SearchController::new(ViewportRegistry::new());

    let first = search.mount();
    execute(&mut search, &api, first).await;
    while let Some(ticket) = search.advance_page() {
        execute(&mut search, &api, Some(ticket)).await;
    }

    let ids: Vec<u32> = search.rooms().iter().map(|r| r.room_id).collect();
    let unique: HashSet<u32> = ids.iter().copied().collect();
    assert_eq!(ids.len(), unique.len());
    assert_eq!(ids, (1..=16).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_filter_change_replaces_results() {
    let api = FakeRoomApi::new()
        .with_page(page(pots(1..=10, 1, 2), Some(false)))
        .with_page(page(pots(11..=12, 1, 2), Some(false)))
        .with_page(page(pots(50..=52, 4, 5), Some(true)));
    let mut search = SearchController::new(ViewportRegistry::new());

    let first = search.mount();
    execute(&mut search, &api, first).await;
    let next = search.advance_page();
    execute(&mut search, &api, next).await;
    assert_eq!(search.rooms().len(), 12);
    assert_eq!(search.page(), 1);

    let ticket = search.set_filter(4, 5);
    assert_eq!(ticket.page, 0);
    assert!(ticket.is_new_search);
    assert_eq!(search.page(), 0);
    assert!(search.rooms().is_empty());

    execute(&mut search, &api, Some(ticket)).await;
    let ids: Vec<u32> = search.rooms().iter().map(|r| r.room_id).collect();
    assert_eq!(ids, vec![50, 51, 52]);
    assert_eq!(search.page(), 0);
}

#[tokio::test]
async fn test_slow_response_for_old_filter_is_discarded() {
    let api = FakeRoomApi::new()
        .with_page(page(pots(1..=10, 1, 2), Some(false)))
        .with_page(page(pots(20..=21, 7, 3), Some(true)));
    let mut search = SearchController::new(ViewportRegistry::new());

    let stale = search.mount().unwrap();
    let stale_result = api.search(&stale.query()).await;

    let current = search.set_filter(7, 3);
    let current_result = api.search(&current.query()).await;

    // current answer lands first, then the old one arrives late
    search.apply_page(&current, current_result);
    assert_eq!(search.apply_page(&stale, stale_result), PageOutcome::Stale);

    let ids: Vec<u32> = search.rooms().iter().map(|r| r.room_id).collect();
    assert_eq!(ids, vec![20, 21]);
    assert!(!search.has_more());
}

#[tokio::test]
async fn test_advance_is_ignored_while_loading() {
    let api = FakeRoomApi::new().with_page(page(pots(1..=10, 1, 2), Some(false)));
    let mut search = SearchController::new(ViewportRegistry::new());

    let ticket = search.mount();
    assert!(search.is_loading());
    assert_eq!(search.advance_page(), None);
    assert_eq!(search.fetch_page(3, false), None);

    execute(&mut search, &api, ticket).await;
    assert_eq!(api.search_calls().len(), 1);
}

#[tokio::test]
async fn test_failed_page_waits_for_retry() {
    let api = FakeRoomApi::new()
        .with_page(page(pots(1..=10, 1, 2), Some(false)))
        .with_search(Err(ApiError::Http {
            status: 503,
            message: None,
        }))
        .with_page(page(pots(11..=12, 1, 2), Some(true)));
    let registry = ViewportRegistry::new();
    let mut search = SearchController::new(registry.clone());

    let first = search.mount();
    execute(&mut search, &api, first).await;
    let next = search.advance_page();
    let outcome = execute(&mut search, &api, next).await;
    assert!(matches!(outcome, PageOutcome::Failed(_)));
    assert_eq!(search.rooms().len(), 10);
    assert!(search.has_more());
    assert!(!search.is_loading());

    // no sentinel while failed, so scrolling cannot loop on the error
    assert_eq!(search.sentinel_row(), None);
    assert_eq!(registry.active_count(), 0);
    assert_eq!(search.on_viewport(0..11), None);

    let retry = search.retry();
    assert_eq!(retry.as_ref().map(|t| t.page), Some(1));
    execute(&mut search, &api, retry).await;
    assert_eq!(search.rooms().len(), 12);
    assert!(search.failure().is_none());
}

#[tokio::test]
async fn test_sentinel_scroll_advances_one_page() {
    let api = FakeRoomApi::new()
        .with_page(page(pots(1..=10, 1, 2), Some(false)))
        .with_page(page(pots(11..=20, 1, 2), Some(false)));
    let registry = ViewportRegistry::new();
    let mut search = SearchController::new(registry.clone());

    let first = search.mount();
    assert_eq!(search.sentinel_row(), None);
    execute(&mut search, &api, first).await;
    assert_eq!(search.sentinel_row(), Some(10));
    assert_eq!(registry.active_count(), 1);

    assert_eq!(search.on_viewport(0..8), None);
    let ticket = search.on_viewport(3..11);
    assert_eq!(ticket.as_ref().map(|t| t.page), Some(1));
    assert_eq!(search.sentinel_row(), None);
    assert_eq!(search.on_viewport(3..11), None);

    execute(&mut search, &api, ticket).await;
    assert_eq!(search.sentinel_row(), Some(20));
    assert_eq!(registry.active_count(), 1);

    drop(search);
    assert_eq!(registry.active_count(), 0);
}

#[tokio::test]
async fn test_logged_out_selection_prompts_login() {
    let (_writer, session) = session_store();
    let mut search = SearchController::new(ViewportRegistry::new());

    assert_eq!(search.select_room(42, &session), Modal::LoginPrompt);
    assert_ne!(search.modal(), Modal::JoinConfirm);
    assert_eq!(search.confirm_join(), None);

    let redirect = LoginRedirect::new("https://snuxi.com/login?redirect_uri=http%3A%2F%2Flocalhost%3A5173");
    match search.confirm_login(&redirect) {
        Some(Navigation::External(url)) => assert!(url.starts_with("https://snuxi.com/login")),
        other => panic!("expected external navigation, got {:?}", other),
    }
}

#[tokio::test]
async fn test_rejected_join_shows_server_message() {
    let api = FakeRoomApi::new()
        .with_page(page(pots(1..=3, 1, 2), Some(true)))
        .rejecting_join(409, "방이 가득 찼습니다");
    let (writer, session) = session_store();
    writer.sign_in("kim@snu.ac.kr");
    let mut search = SearchController::new(ViewportRegistry::new());

    let first = search.mount();
    execute(&mut search, &api, first).await;

    assert_eq!(search.select_room(2, &session), Modal::JoinConfirm);
    let ticket = search.confirm_join().unwrap();
    assert!(search.join_pending());

    let result = api.join(ticket.room_id).await;
    let outcome = search.apply_join(ticket, result);
    assert_eq!(outcome, JoinOutcome::Rejected("방이 가득 찼습니다".to_string()));
    assert_eq!(outcome.navigation(), None);
    assert_eq!(search.modal(), Modal::None);
    assert_eq!(search.rooms().len(), 3);
}

#[tokio::test]
async fn test_successful_join_navigates_to_chat() {
    let api = FakeRoomApi::new();
    let (writer, session) = session_store();
    writer.sign_in("kim@snu.ac.kr");
    let mut search = SearchController::new(ViewportRegistry::new());

    search.select_room(7, &session);
    let ticket = search.confirm_join().unwrap();
    let outcome = search.apply_join(ticket, api.join(7).await);

    assert_eq!(outcome, JoinOutcome::Joined(7));
    assert_eq!(
        outcome.navigation(),
        Some(Navigation::Internal("/chat/7".to_string()))
    );
    assert!(!search.join_pending());
}

#[tokio::test]
async fn test_join_error_without_message_uses_fallback() {
    let api = FakeRoomApi::new().with_join(Err(ApiError::Http {
        status: 500,
        message: None,
    }));
    let (writer, session) = session_store();
    writer.sign_in("kim@snu.ac.kr");
    let mut search = SearchController::new(ViewportRegistry::new());

    search.select_room(1, &session);
    let ticket = search.confirm_join().unwrap();
    let outcome = search.apply_join(ticket, api.join(1).await);
    assert_eq!(
        outcome,
        JoinOutcome::Rejected(taxipot_engine::JOIN_FAILED_FALLBACK.to_string())
    );
}
