use serde::Serialize;
use taxipot_types::SearchFilter;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// Ascending departure time; the search view relies on this order when
/// appending pages.
pub const DEFAULT_SORT: &str = "departureTime,asc";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    pub filter: SearchFilter,
    pub page: u32,
    pub size: u32,
    pub sort: String,
}

impl SearchQuery {
    pub fn new(filter: SearchFilter, page: u32) -> Self {
        Self {
            filter,
            page,
            size: DEFAULT_PAGE_SIZE,
            sort: DEFAULT_SORT.to_string(),
        }
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = sort.into();
        self
    }

    /// Query string pairs; unconstrained landmarks are omitted, never sent as 0.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(5);
        if let Some(id) = self.filter.departure.as_param() {
            params.push(("departureId", id.to_string()));
        }
        if let Some(id) = self.filter.destination.as_param() {
            params.push(("destinationId", id.to_string()));
        }
        params.push(("page", self.page.to_string()));
        params.push(("size", self.size.to_string()));
        params.push(("sort", self.sort.clone()));
        params
    }
}
