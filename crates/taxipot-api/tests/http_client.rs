use taxipot_api::{ApiError, HttpRoomApi, RoomApi, SearchQuery};
use taxipot_testing::fixtures::{PotBuilder, base_time, pots};
use taxipot_testing::{BackendState, FakeBackend};
use taxipot_types::{CreateRoomRequest, SearchFilter};

async fn backend_with(state: BackendState) -> (FakeBackend, HttpRoomApi) {
    let backend = FakeBackend::start(state).await.unwrap();
    let api = HttpRoomApi::builder(backend.base_url())
        .credential(Some("test-token".to_string()))
        .build()
        .unwrap();
    (backend, api)
}

#[tokio::test]
async fn test_search_omits_unconstrained_filters() {
    let (backend, api) = backend_with(BackendState::with_pots(pots(1..=3, 1, 3))).await;

    let page = api
        .search(&SearchQuery::new(SearchFilter::new(0, 3), 0))
        .await
        .unwrap();
    assert_eq!(page.content.len(), 3);
    assert_eq!(page.last, Some(true));

    let request = backend.last_request().unwrap();
    assert_eq!(request.path, "/rooms/search");
    assert_eq!(request.param("departureId"), None);
    assert_eq!(request.param("destinationId"), Some("3"));
    assert_eq!(request.param("page"), Some("0"));
    assert_eq!(request.param("size"), Some("10"));
    assert_eq!(request.param("sort"), Some("departureTime%2Casc"));
}

#[tokio::test]
async fn test_search_pages_through_results() {
    let (_backend, api) = backend_with(BackendState::with_pots(pots(1..=15, 7, 3))).await;
    let filter = SearchFilter::new(7, 3);

    let first = api.search(&SearchQuery::new(filter, 0)).await.unwrap();
    assert_eq!(first.content.len(), 10);
    assert_eq!(first.last, Some(false));

    let second = api.search(&SearchQuery::new(filter, 1)).await.unwrap();
    assert_eq!(second.content.len(), 5);
    assert_eq!(second.last, Some(true));
    assert_eq!(second.content[0].id, 11);
}

#[tokio::test]
async fn test_requests_carry_bearer_credential() {
    let (backend, api) = backend_with(BackendState::with_pots(pots([5], 1, 2))).await;

    api.join(5).await.unwrap();
    let request = backend.last_request().unwrap();
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/rooms/5/join");
    assert_eq!(request.authorization.as_deref(), Some("Bearer test-token"));
}

#[tokio::test]
async fn test_join_rejection_surfaces_err_msg() {
    let mut state = BackendState::with_pots(pots([9], 1, 2));
    state.join_rejection = Some((409, "방이 가득 찼습니다".to_string()));
    let (_backend, api) = backend_with(state).await;

    let err = api.join(9).await.unwrap_err();
    assert_eq!(err.status(), Some(409));
    assert_eq!(err.user_message("fallback"), "방이 가득 찼습니다");
}

#[tokio::test]
async fn test_full_room_is_rejected_by_server() {
    let full = PotBuilder::new(4).capacity(4, 4).build();
    let (_backend, api) = backend_with(BackendState::with_pots(vec![full])).await;

    let err = api.join(4).await.unwrap_err();
    assert_eq!(err.server_message(), Some("방이 가득 찼습니다"));
}

#[tokio::test]
async fn test_current_pot_lifecycle() {
    let (backend, api) = backend_with(BackendState::with_pots(pots([2], 1, 2))).await;

    assert_eq!(api.current_pot().await.unwrap(), None);

    api.join(2).await.unwrap();
    let pot = api.current_pot().await.unwrap().unwrap();
    assert_eq!(pot.id, 2);
    assert_eq!(pot.current_count, 2);

    api.leave_room(2).await.unwrap();
    assert_eq!(api.current_pot().await.unwrap(), None);
    assert_eq!(backend.with_state(|s| s.current_pot), None);
}

#[tokio::test]
async fn test_create_room_returns_new_id() {
    let (backend, api) = backend_with(BackendState::with_pots(pots([1, 2], 1, 2))).await;

    let created = api
        .create_room(&CreateRoomRequest {
            departure_id: 6,
            destination_id: 1,
            departure_time: base_time(),
            min_capacity: 2,
            max_capacity: 3,
            estimated_fee: 6000,
        })
        .await
        .unwrap();
    assert_eq!(created.created_pot_id, 3);

    let stored = backend.with_state(|s| s.pots.last().cloned()).unwrap();
    assert_eq!(stored.departure_id, 6);
    assert_eq!(stored.departure_time, base_time());
}

#[tokio::test]
async fn test_missing_credential_is_unauthorized() {
    let mut state = BackendState::default();
    state.require_auth = true;
    let backend = FakeBackend::start(state).await.unwrap();
    let api = HttpRoomApi::builder(backend.base_url()).build().unwrap();

    let err = api.logout().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.server_message(), Some("로그인이 필요합니다."));

    api.set_credential(Some("token".to_string()));
    api.logout().await.unwrap();
}

#[tokio::test]
async fn test_profile_picture_is_multipart() {
    let (backend, api) = backend_with(BackendState::default()).await;

    api.upload_profile_picture("me.png", vec![0x89, 0x50, 0x4e, 0x47])
        .await
        .unwrap();
    let request = backend.last_request().unwrap();
    assert_eq!(request.path, "/user/profile/picture");
    assert!(
        request
            .content_type
            .unwrap_or_default()
            .starts_with("multipart/form-data")
    );
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let api = HttpRoomApi::builder("http://127.0.0.1:1").build().unwrap();
    let err = api
        .search(&SearchQuery::new(SearchFilter::default(), 0))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
