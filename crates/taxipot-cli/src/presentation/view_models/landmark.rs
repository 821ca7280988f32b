use serde::Serialize;
use std::fmt;

use super::{CreateView, ViewMode};

#[derive(Debug, Serialize)]
pub struct LandmarkEntryViewModel {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct LandmarkListViewModel {
    pub landmarks: Vec<LandmarkEntryViewModel>,
}

impl CreateView for LandmarkListViewModel {
    fn create_view<'a>(&'a self, mode: ViewMode) -> Box<dyn fmt::Display + 'a> {
        use crate::presentation::views::landmark::LandmarkListView;
        Box::new(LandmarkListView::new(self, mode))
    }
}
