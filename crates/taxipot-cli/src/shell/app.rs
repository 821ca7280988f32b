//! The routed shell: owns the mounted page, executes API calls as tokio
//! tasks and turns their outcomes back into state changes.
//!
//! Everything runs on the handler thread. Tasks never touch page state; they
//! send an [`ApiEvent`] and the owner applies it in [`App::handle`].

use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::sync::mpsc::Sender;

use chrono::{FixedOffset, Utc};
use taxipot_api::{ApiError, RoomApi};
use taxipot_engine::{
    FetchTicket, JoinOutcome, JoinTicket, LoginRedirect, Modal, Navigation, PageOutcome,
    SearchController, SessionHandle, SessionWriter, ViewportRegistry,
};
use taxipot_types::{PotRecord, RoomCreated, SearchPage};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::create::CreatePage;
use super::route::{Route, Tab};
use crate::presentation::presenters::shell as present;
use crate::presentation::renderers::{IntentSink, UiIntent};
use crate::presentation::view_models::{ShellScreenViewModel, StatusBadge};

pub const LOGIN_REQUIRED: &str = "로그인이 필요합니다.";
pub const ROOM_CREATED: &str = "방이 성공적으로 개설되었습니다!";
pub const CREATE_FAILED: &str = "방 개설 중 오류가 발생했습니다.";
pub const LEFT_ROOM: &str = "방에서 나갔습니다.";
pub const LEAVE_FAILED: &str = "방에서 나가는 중 오류가 발생했습니다.";
pub const PROFILE_UPDATED: &str = "프로필이 수정되었습니다!";
pub const POT_LOAD_FAILED: &str = "내 방 정보를 불러오지 못했습니다.";
pub const LOGGED_OUT: &str = "로그아웃되었습니다.";

/// Everything the shell loop reacts to.
#[derive(Debug)]
pub enum AppEvent {
    Ui(UiIntent),
    Api(ApiEvent),
}

impl IntentSink for Sender<AppEvent> {
    fn send_intent(&self, intent: UiIntent) -> bool {
        self.send(AppEvent::Ui(intent)).is_ok()
    }
}

/// Outcome of a network task.
#[derive(Debug)]
pub enum ApiEvent {
    Page {
        ticket: FetchTicket,
        result: Result<SearchPage, ApiError>,
    },
    Join {
        ticket: JoinTicket,
        result: Result<(), ApiError>,
    },
    Created(Result<RoomCreated, ApiError>),
    CurrentPot(Result<Option<PotRecord>, ApiError>),
    ChatPot {
        room_id: u32,
        result: Result<Option<PotRecord>, ApiError>,
    },
    Left {
        room_id: u32,
        result: Result<(), ApiError>,
    },
    LoggedOut(Result<(), ApiError>),
    PictureUploaded {
        file_name: String,
        result: Result<(), ApiError>,
    },
}

/// Why the shell stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exit {
    Quit,
    /// Hand the browser this URL; the shell's state is abandoned.
    External(String),
}

#[derive(Debug)]
pub(crate) struct MyChatPage {
    pub loading: bool,
    pub pot: Option<PotRecord>,
    pub confirm_leave: bool,
}

#[derive(Debug)]
pub(crate) enum Page {
    Search(SearchController),
    Create(CreatePage),
    MyChat(MyChatPage),
    MyPage { uploading: bool },
    Chat { room_id: u32, pot: Option<PotRecord> },
    Login,
}

/// Static settings for one shell run.
#[derive(Debug, Clone)]
pub struct ShellOptions {
    pub page_size: u32,
    /// `sort` parameter sent with every search.
    pub sort: String,
    pub display_offset: FixedOffset,
    pub login: LoginRedirect,
}

type LogoutHook = Box<dyn Fn() + Send>;

pub struct App<A> {
    api: Arc<A>,
    runtime: Handle,
    tx: Sender<AppEvent>,
    writer: SessionWriter,
    session: SessionHandle,
    options: ShellOptions,
    registry: ViewportRegistry,
    on_logout: Option<LogoutHook>,
    route: Route,
    page: Page,
    notice: Option<StatusBadge>,
    search_task: Option<JoinHandle<()>>,
    exit: Option<Exit>,
}

impl<A> App<A>
where
    A: RoomApi + 'static,
{
    pub fn new(
        api: Arc<A>,
        runtime: Handle,
        tx: Sender<AppEvent>,
        writer: SessionWriter,
        options: ShellOptions,
    ) -> Self {
        let session = writer.handle();
        Self {
            api,
            runtime,
            tx,
            writer,
            session,
            options,
            registry: ViewportRegistry::new(),
            on_logout: None,
            route: Route::Home,
            page: Page::Login,
            notice: None,
            search_task: None,
            exit: None,
        }
    }

    /// Called after the server session ends: forget the stored credential.
    pub fn with_logout_hook(mut self, hook: impl Fn() + Send + 'static) -> Self {
        self.on_logout = Some(Box::new(hook));
        self
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn exit(&self) -> Option<&Exit> {
        self.exit.as_ref()
    }

    pub fn notice(&self) -> Option<&StatusBadge> {
        self.notice.as_ref()
    }

    pub fn registry(&self) -> &ViewportRegistry {
        &self.registry
    }

    pub(crate) fn page(&self) -> &Page {
        &self.page
    }

    pub fn search(&self) -> Option<&SearchController> {
        match &self.page {
            Page::Search(search) => Some(search),
            _ => None,
        }
    }

    pub fn screen(&self) -> ShellScreenViewModel {
        present::present_screen(
            self.route,
            &self.page,
            &self.session.snapshot(),
            self.notice.as_ref(),
            self.options.login.url(),
            self.options.display_offset,
        )
    }

    pub fn navigate(&mut self, route: Route) {
        if let Some(task) = self.search_task.take() {
            task.abort();
        }
        self.notice = None;
        tracing::debug!(%route, "navigate");

        match route {
            Route::Home | Route::SearchRoom => {
                let mut search = SearchController::new(self.registry.clone())
                    .with_page_size(self.options.page_size);
                let ticket = search.mount();
                self.route = route;
                self.page = Page::Search(search);
                if let Some(ticket) = ticket {
                    self.spawn_search(ticket);
                }
            }
            Route::CreateRoom if !self.session.is_logged_in() => {
                self.navigate(Route::Login);
                self.notice = Some(StatusBadge::warning(LOGIN_REQUIRED));
            }
            Route::CreateRoom => {
                self.route = route;
                self.page = Page::Create(CreatePage::new());
            }
            Route::MyChat => {
                self.route = route;
                self.page = Page::MyChat(MyChatPage {
                    loading: true,
                    pot: None,
                    confirm_leave: false,
                });
                let api = Arc::clone(&self.api);
                self.spawn(async move { ApiEvent::CurrentPot(api.current_pot().await) });
            }
            Route::MyPage => {
                self.route = route;
                self.page = Page::MyPage { uploading: false };
            }
            Route::Chat(room_id) => {
                self.route = route;
                self.page = Page::Chat { room_id, pot: None };
                let api = Arc::clone(&self.api);
                self.spawn(async move {
                    ApiEvent::ChatPot {
                        room_id,
                        result: api.current_pot().await,
                    }
                });
            }
            Route::Login => {
                self.route = route;
                self.page = Page::Login;
            }
        }
    }

    pub fn handle(&mut self, event: AppEvent) {
        match event {
            AppEvent::Ui(intent) => self.handle_intent(intent),
            AppEvent::Api(outcome) => self.handle_api(outcome),
        }
    }

    fn handle_intent(&mut self, intent: UiIntent) {
        match intent {
            UiIntent::Quit => self.exit = Some(Exit::Quit),
            UiIntent::SwitchTab(index) => {
                if let Some(tab) = Tab::from_index(index) {
                    self.navigate(tab.route());
                }
            }
            UiIntent::NextTab => {
                let current = self.route.tab().unwrap_or(Tab::MyPage);
                self.navigate(current.next().route());
            }
            UiIntent::Navigate(path) => self.navigate(Route::parse(&path)),
            UiIntent::AccountAction => {
                if self.session.is_logged_in() {
                    self.logout();
                } else {
                    self.navigate(Route::Login);
                }
            }
            UiIntent::Viewport(rows) => {
                if let Page::Search(search) = &mut self.page
                    && let Some(ticket) = search.on_viewport(rows)
                {
                    self.spawn_search(ticket);
                }
            }
            UiIntent::CycleDeparture(delta) => self.change_filter(|filter| {
                let departure = if delta >= 0 {
                    filter.departure.next()
                } else {
                    filter.departure.prev()
                };
                (departure.id(), filter.destination.id())
            }),
            UiIntent::CycleDestination(delta) => self.change_filter(|filter| {
                let destination = if delta >= 0 {
                    filter.destination.next()
                } else {
                    filter.destination.prev()
                };
                (filter.departure.id(), destination.id())
            }),
            UiIntent::ClearFilter => self.change_filter(|_| (0, 0)),
            UiIntent::SelectRoom(room_id) => {
                if let Page::Search(search) = &mut self.page {
                    search.select_room(room_id, &self.session);
                }
            }
            UiIntent::Confirm => self.confirm(),
            UiIntent::Dismiss => {
                match &mut self.page {
                    Page::Search(search) => search.dismiss(),
                    Page::MyChat(page) => page.confirm_leave = false,
                    _ => {}
                }
                self.notice = None;
            }
            UiIntent::Retry => {
                if let Page::Search(search) = &mut self.page
                    && let Some(ticket) = search.retry()
                {
                    self.spawn_search(ticket);
                }
            }
            UiIntent::FocusField(delta) => {
                if let Page::Create(page) = &mut self.page {
                    page.focus(delta);
                }
            }
            UiIntent::Adjust(delta) => {
                if let Page::Create(page) = &mut self.page
                    && !page.submitting
                {
                    page.adjust(delta, Utc::now());
                }
            }
            UiIntent::Submit => self.submit_room(),
            UiIntent::Refresh => {
                if matches!(self.page, Page::MyChat(_)) {
                    self.navigate(Route::MyChat);
                }
            }
            UiIntent::Leave => {
                if let Page::MyChat(page) = &mut self.page
                    && page.pot.is_some()
                {
                    page.confirm_leave = true;
                }
            }
            UiIntent::OpenChat(room_id) => self.navigate(Route::Chat(room_id)),
            UiIntent::SaveNickname(nickname) => {
                let image = self.session.snapshot().profile_image;
                self.writer.update_profile(nickname, image);
                self.notice = Some(StatusBadge::success(PROFILE_UPDATED));
            }
            UiIntent::UploadPicture(path) => self.upload_picture(&path),
        }
    }

    fn handle_api(&mut self, outcome: ApiEvent) {
        match outcome {
            ApiEvent::Page { ticket, result } => {
                let Page::Search(search) = &mut self.page else {
                    return;
                };
                if let PageOutcome::Failed(message) = search.apply_page(&ticket, result) {
                    tracing::debug!(page = ticket.page, %message, "search page failed");
                }
            }
            ApiEvent::Join { ticket, result } => {
                // the user may have left the search page while the join ran
                let outcome = match &mut self.page {
                    Page::Search(search) => search.apply_join(ticket, result),
                    _ => JoinOutcome::from_result(ticket, result),
                };
                if let JoinOutcome::Rejected(message) = &outcome {
                    self.notice = Some(StatusBadge::error(message.clone()));
                }
                if let Some(navigation) = outcome.navigation() {
                    self.follow(navigation);
                }
            }
            ApiEvent::Created(result) => {
                if let Page::Create(page) = &mut self.page {
                    page.submitting = false;
                }
                match result {
                    Ok(created) => {
                        tracing::info!(room_id = created.created_pot_id, "room created");
                        self.navigate(Route::Chat(created.created_pot_id));
                        self.notice = Some(StatusBadge::success(ROOM_CREATED));
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "room creation failed");
                        self.notice = Some(StatusBadge::error(e.user_message(CREATE_FAILED)));
                    }
                }
            }
            ApiEvent::CurrentPot(result) => {
                let Page::MyChat(page) = &mut self.page else {
                    return;
                };
                page.loading = false;
                match result {
                    Ok(pot) => page.pot = pot,
                    Err(e) if e.is_unauthorized() => {
                        self.notice = Some(StatusBadge::warning(LOGIN_REQUIRED));
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "current pot lookup failed");
                        self.notice = Some(StatusBadge::error(e.user_message(POT_LOAD_FAILED)));
                    }
                }
            }
            ApiEvent::ChatPot { room_id, result } => {
                if let Page::Chat { room_id: open, pot } = &mut self.page
                    && *open == room_id
                {
                    match result {
                        Ok(found) => *pot = found.filter(|p| p.id == room_id),
                        Err(e) => tracing::warn!(error = %e, room_id, "chat room lookup failed"),
                    }
                }
            }
            ApiEvent::Left { room_id, result } => match result {
                Ok(()) => {
                    tracing::info!(room_id, "left room");
                    if let Page::MyChat(page) = &mut self.page {
                        page.pot = None;
                        page.confirm_leave = false;
                    }
                    self.notice = Some(StatusBadge::success(LEFT_ROOM));
                }
                Err(e) => {
                    tracing::warn!(error = %e, room_id, "leave failed");
                    if let Page::MyChat(page) = &mut self.page {
                        page.confirm_leave = false;
                    }
                    self.notice = Some(StatusBadge::error(e.user_message(LEAVE_FAILED)));
                }
            },
            ApiEvent::LoggedOut(result) => {
                if let Err(e) = result {
                    tracing::warn!(error = %e, "server logout failed; clearing local session");
                }
                if let Some(hook) = &self.on_logout {
                    hook();
                }
                self.writer.sign_out();
                self.navigate(Route::Login);
                self.notice = Some(StatusBadge::info(LOGGED_OUT));
            }
            ApiEvent::PictureUploaded { file_name, result } => {
                if let Page::MyPage { uploading } = &mut self.page {
                    *uploading = false;
                }
                match result {
                    Ok(()) => {
                        let nickname = self.session.snapshot().nickname;
                        self.writer.update_profile(nickname, Some(file_name));
                        self.notice = Some(StatusBadge::success(PROFILE_UPDATED));
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "profile picture upload failed");
                        self.notice = Some(StatusBadge::error(e.to_string()));
                    }
                }
            }
        }
    }

    fn confirm(&mut self) {
        match &mut self.page {
            Page::Search(search) => match search.modal() {
                Modal::JoinConfirm => {
                    if let Some(ticket) = search.confirm_join() {
                        let api = Arc::clone(&self.api);
                        self.spawn(async move {
                            let result = api.join(ticket.room_id).await;
                            ApiEvent::Join { ticket, result }
                        });
                    }
                }
                Modal::LoginPrompt => {
                    if let Some(navigation) = search.confirm_login(&self.options.login) {
                        self.follow(navigation);
                    }
                }
                Modal::None => {}
            },
            Page::MyChat(page) if page.confirm_leave => {
                page.confirm_leave = false;
                if let Some(room_id) = page.pot.as_ref().map(|p| p.id) {
                    let api = Arc::clone(&self.api);
                    self.spawn(async move {
                        ApiEvent::Left {
                            room_id,
                            result: api.leave_room(room_id).await,
                        }
                    });
                }
            }
            Page::Login if !self.session.is_logged_in() => {
                self.exit = Some(Exit::External(self.options.login.url().to_string()));
            }
            _ => {}
        }
    }

    fn follow(&mut self, navigation: Navigation) {
        match navigation {
            Navigation::Internal(path) => self.navigate(Route::parse(&path)),
            Navigation::External(url) => self.exit = Some(Exit::External(url)),
        }
    }

    fn change_filter(&mut self, next: impl FnOnce(taxipot_types::SearchFilter) -> (u32, u32)) {
        let Page::Search(search) = &mut self.page else {
            return;
        };
        if search.modal() != Modal::None {
            return;
        }
        let (departure, destination) = next(search.filter());
        if (departure, destination) == (search.filter().departure.id(), search.filter().destination.id()) {
            return;
        }
        let ticket = search.set_filter(departure, destination);
        self.spawn_search(ticket);
    }

    fn submit_room(&mut self) {
        let Page::Create(page) = &mut self.page else {
            return;
        };
        if page.submitting {
            return;
        }
        match page.form.validate(Utc::now()) {
            Ok(request) => {
                page.submitting = true;
                self.notice = None;
                let api = Arc::clone(&self.api);
                self.spawn(async move { ApiEvent::Created(api.create_room(&request).await) });
            }
            Err(e) => self.notice = Some(StatusBadge::warning(e.to_string())),
        }
    }

    fn logout(&mut self) {
        let api = Arc::clone(&self.api);
        self.spawn(async move { ApiEvent::LoggedOut(api.logout().await) });
    }

    fn upload_picture(&mut self, path: &Path) {
        let Page::MyPage { uploading } = &mut self.page else {
            return;
        };
        if !self.session.is_logged_in() {
            self.notice = Some(StatusBadge::warning(LOGIN_REQUIRED));
            return;
        }
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.notice = Some(StatusBadge::error(format!("{}: {}", path.display(), e)));
                return;
            }
        };
        *uploading = true;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "picture".to_string());
        let api = Arc::clone(&self.api);
        self.spawn(async move {
            let result = api.upload_profile_picture(&file_name, bytes).await;
            ApiEvent::PictureUploaded { file_name, result }
        });
    }

    /// A newer search supersedes the one in flight.
    fn spawn_search(&mut self, ticket: FetchTicket) {
        if let Some(task) = self.search_task.take() {
            task.abort();
        }
        tracing::debug!(
            generation = ticket.generation,
            page = ticket.page,
            "search issued"
        );
        let api = Arc::clone(&self.api);
        let query = ticket.query().with_sort(self.options.sort.clone());
        let task = self.spawn(async move {
            let result = api.search(&query).await;
            ApiEvent::Page { ticket, result }
        });
        self.search_task = Some(task);
    }

    fn spawn<F>(&self, task: F) -> JoinHandle<()>
    where
        F: Future<Output = ApiEvent> + Send + 'static,
    {
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let event = task.await;
            let _ = tx.send(AppEvent::Api(event));
        })
    }
}
