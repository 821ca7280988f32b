//! Room search view-state.
//!
//! [`SearchController`] owns the filter, the accumulated result pages and the
//! join/login confirmation flow for one mounted search page.
//!
//! Request discipline:
//! - At most one page fetch is live at a time. A trigger that arrives while
//!   one is outstanding is dropped, not queued.
//! - Every fetch is tagged with the generation of the filter session that
//!   issued it. Mounting and changing the filter start a new generation,
//!   drawn from the [`ViewportRegistry`] so it is unique across remounts.
//!   Responses from older generations, or for a page that is not the one in
//!   flight, are discarded in [`SearchController::apply_page`].
//! - The infinite-scroll sentinel is observed only while
//!   `has_more && !loading` and the last fetch did not fail.

mod modal;
mod pagination;

use std::ops::Range;

use serde::Serialize;
use taxipot_api::{ApiError, DEFAULT_PAGE_SIZE, SearchQuery};
use taxipot_types::{Room, SearchFilter, SearchPage};

use crate::navigation::{LoginRedirect, Navigation};
use crate::session::SessionHandle;
use crate::viewport::{SentinelSubscription, ViewportRegistry};

pub use modal::Modal;
pub use pagination::FailedFetch;

use modal::Selection;
use pagination::Pagination;

/// Shown when a join fails without a server-provided message.
pub const JOIN_FAILED_FALLBACK: &str = "방 참여에 실패했습니다.";

/// A page request to execute. Hand the outcome back to
/// [`SearchController::apply_page`] together with the ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchTicket {
    pub generation: u64,
    pub filter: SearchFilter,
    pub page: u32,
    pub size: u32,
    pub is_new_search: bool,
}

impl FetchTicket {
    pub fn query(&self) -> SearchQuery {
        SearchQuery::new(self.filter, self.page).with_size(self.size)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Loaded { added: usize, has_more: bool },
    Failed(String),
    /// Issued under a filter that is no longer current, or for a page that
    /// is not in flight; nothing changed.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JoinTicket {
    pub room_id: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    Joined(u32),
    Rejected(String),
}

impl JoinOutcome {
    /// Outcome of a join request, independent of any mounted search page.
    pub fn from_result(ticket: JoinTicket, result: Result<(), ApiError>) -> Self {
        match result {
            Ok(()) => {
                tracing::info!(room_id = ticket.room_id, "joined room");
                JoinOutcome::Joined(ticket.room_id)
            }
            Err(err) => {
                tracing::warn!(room_id = ticket.room_id, error = %err, "join rejected");
                JoinOutcome::Rejected(err.user_message(JOIN_FAILED_FALLBACK))
            }
        }
    }

    /// Where to go after the outcome, if anywhere.
    pub fn navigation(&self) -> Option<Navigation> {
        match self {
            JoinOutcome::Joined(room_id) => Some(Navigation::chat(*room_id)),
            JoinOutcome::Rejected(_) => None,
        }
    }
}

#[derive(Debug)]
pub struct SearchController {
    filter: SearchFilter,
    page_size: u32,
    generation: u64,
    pagination: Pagination,
    selection: Selection,
    registry: ViewportRegistry,
    sentinel: Option<SentinelSubscription>,
}

impl SearchController {
    pub fn new(registry: ViewportRegistry) -> Self {
        Self {
            filter: SearchFilter::default(),
            page_size: DEFAULT_PAGE_SIZE,
            generation: registry.next_generation(),
            pagination: Pagination::default(),
            selection: Selection::default(),
            registry,
            sentinel: None,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_filter(mut self, filter: SearchFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Initial load of page 0 for the current filter.
    pub fn mount(&mut self) -> Option<FetchTicket> {
        self.fetch_page(0, true)
    }

    // --------------------------------------------------------
    // Filter & pagination
    // --------------------------------------------------------

    /// Switch filters (`0` = unconstrained). Resets the accumulated pages,
    /// invalidates any outstanding request and issues page 0.
    pub fn set_filter(&mut self, departure_id: u32, destination_id: u32) -> FetchTicket {
        self.filter = SearchFilter::new(departure_id, destination_id);
        self.generation = self.registry.next_generation();
        self.pagination.reset();
        tracing::debug!(
            generation = self.generation,
            filter = ?self.filter,
            "filter changed"
        );
        self.issue(0, true)
    }

    /// Request `page`; `None` while another fetch is in flight.
    pub fn fetch_page(&mut self, page: u32, is_new_search: bool) -> Option<FetchTicket> {
        if self.pagination.loading {
            tracing::debug!(page, "fetch already in flight; trigger dropped");
            return None;
        }
        Some(self.issue(page, is_new_search))
    }

    /// Load the next page. No effect while loading, after the last page, or
    /// while a failed fetch has not been retried.
    pub fn advance_page(&mut self) -> Option<FetchTicket> {
        if self.pagination.loading || !self.pagination.has_more || self.pagination.failed.is_some()
        {
            return None;
        }
        self.fetch_page(self.pagination.page + 1, false)
    }

    /// Re-issue the request that last failed.
    pub fn retry(&mut self) -> Option<FetchTicket> {
        if self.pagination.loading {
            return None;
        }
        let failed = self.pagination.failed.take()?;
        self.fetch_page(failed.page, failed.is_new_search)
    }

    pub fn apply_page(
        &mut self,
        ticket: &FetchTicket,
        result: Result<SearchPage, ApiError>,
    ) -> PageOutcome {
        if ticket.generation != self.generation {
            tracing::debug!(
                stale = ticket.generation,
                current = self.generation,
                page = ticket.page,
                "discarding response for previous filter"
            );
            return PageOutcome::Stale;
        }
        if !self.pagination.loading || ticket.page != self.pagination.page {
            tracing::debug!(
                page = ticket.page,
                in_flight = ?self.pagination.loading.then_some(self.pagination.page),
                "discarding response for a page not in flight"
            );
            return PageOutcome::Stale;
        }

        self.pagination.loading = false;

        let outcome = match result {
            Ok(page) => {
                let new_rooms: Vec<Room> = page.content.iter().map(Room::from_record).collect();
                let has_more = match page.last {
                    Some(last) => !last,
                    None => !new_rooms.is_empty(),
                };

                let added = if ticket.is_new_search {
                    self.pagination.replace(new_rooms)
                } else {
                    self.pagination.append(new_rooms)
                };
                self.pagination.page = ticket.page;
                self.pagination.has_more = has_more;
                self.pagination.failed = None;

                tracing::debug!(
                    page = ticket.page,
                    added,
                    total = self.pagination.rooms.len(),
                    has_more,
                    "page loaded"
                );
                PageOutcome::Loaded { added, has_more }
            }
            Err(err) => {
                tracing::warn!(page = ticket.page, error = %err, "room search failed");
                self.pagination.page = if ticket.is_new_search {
                    0
                } else {
                    ticket.page.saturating_sub(1)
                };
                let message = err.to_string();
                self.pagination.failed = Some(FailedFetch {
                    page: ticket.page,
                    is_new_search: ticket.is_new_search,
                    message: message.clone(),
                });
                PageOutcome::Failed(message)
            }
        };

        self.refresh_sentinel();
        outcome
    }

    // --------------------------------------------------------
    // Viewport sentinel
    // --------------------------------------------------------

    /// Report the visible list rows (cards are rows `0..rooms.len()`, the
    /// sentinel is the row right after them). Advances one page when the
    /// sentinel has just come into view.
    pub fn on_viewport(&mut self, visible: Range<usize>) -> Option<FetchTicket> {
        let crossed = self.registry.report_visible(visible);
        let sentinel = self.sentinel.as_ref()?;
        if crossed.contains(&sentinel.id()) {
            self.advance_page()
        } else {
            None
        }
    }

    /// Row index of the observed sentinel, if one is active.
    pub fn sentinel_row(&self) -> Option<usize> {
        self.sentinel.as_ref().map(SentinelSubscription::target)
    }

    /// Re-subscribe after a dependency change (`has_more`, `loading`, room
    /// count); drops the subscription when observation is not wanted.
    fn refresh_sentinel(&mut self) {
        let wanted = self.pagination.has_more
            && !self.pagination.loading
            && self.pagination.failed.is_none();
        if !wanted {
            self.sentinel = None;
            return;
        }

        let target = self.pagination.rooms.len();
        if self.sentinel_row() != Some(target) {
            self.sentinel = Some(self.registry.observe(target));
        }
    }

    fn issue(&mut self, page: u32, is_new_search: bool) -> FetchTicket {
        self.pagination.loading = true;
        self.pagination.page = page;
        self.refresh_sentinel();

        FetchTicket {
            generation: self.generation,
            filter: self.filter,
            page,
            size: self.page_size,
            is_new_search,
        }
    }

    // --------------------------------------------------------
    // Selection & modals
    // --------------------------------------------------------

    /// Open the join confirmation when logged in, otherwise the login prompt.
    pub fn select_room(&mut self, room_id: u32, session: &SessionHandle) -> Modal {
        if self.selection.join_pending {
            return self.selection.modal;
        }
        let modal = if session.is_logged_in() {
            Modal::JoinConfirm
        } else {
            Modal::LoginPrompt
        };
        self.selection.open(room_id, modal);
        modal
    }

    pub fn confirm_join(&mut self) -> Option<JoinTicket> {
        if self.selection.modal != Modal::JoinConfirm || self.selection.join_pending {
            return None;
        }
        let room_id = self.selection.room_id?;
        self.selection.join_pending = true;
        tracing::info!(room_id, "joining room");
        Some(JoinTicket { room_id })
    }

    /// Close the modal and report the outcome. Pagination is left as is.
    pub fn apply_join(&mut self, ticket: JoinTicket, result: Result<(), ApiError>) -> JoinOutcome {
        self.selection.clear();
        JoinOutcome::from_result(ticket, result)
    }

    /// Leave for the external login page. Terminal for this view.
    pub fn confirm_login(&mut self, redirect: &LoginRedirect) -> Option<Navigation> {
        if self.selection.modal != Modal::LoginPrompt {
            return None;
        }
        self.selection.clear();
        Some(Navigation::External(redirect.url().to_string()))
    }

    pub fn dismiss(&mut self) {
        self.selection.clear();
    }

    // --------------------------------------------------------
    // Read access
    // --------------------------------------------------------

    pub fn filter(&self) -> SearchFilter {
        self.filter
    }

    pub fn rooms(&self) -> &[Room] {
        &self.pagination.rooms
    }

    pub fn page(&self) -> u32 {
        self.pagination.page
    }

    pub fn has_more(&self) -> bool {
        self.pagination.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.pagination.loading
    }

    pub fn failure(&self) -> Option<&FailedFetch> {
        self.pagination.failed.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn modal(&self) -> Modal {
        self.selection.modal
    }

    pub fn selected_room_id(&self) -> Option<u32> {
        self.selection.room_id
    }

    pub fn join_pending(&self) -> bool {
        self.selection.join_pending
    }

    pub fn selected_room(&self) -> Option<&Room> {
        let id = self.selection.room_id?;
        self.pagination.rooms.iter().find(|r| r.room_id == id)
    }
}
