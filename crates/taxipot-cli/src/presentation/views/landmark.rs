use std::fmt;

use crate::presentation::view_models::{LandmarkListViewModel, ViewMode};

pub struct LandmarkListView<'a> {
    data: &'a LandmarkListViewModel,
    mode: ViewMode,
}

impl<'a> LandmarkListView<'a> {
    pub fn new(data: &'a LandmarkListViewModel, mode: ViewMode) -> Self {
        Self { data, mode }
    }
}

impl<'a> fmt::Display for LandmarkListView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.mode == ViewMode::Minimal {
            for landmark in &self.data.landmarks {
                writeln!(f, "{}", landmark.id)?;
            }
            return Ok(());
        }

        writeln!(f, "{:<4} NAME", "ID")?;
        for landmark in &self.data.landmarks {
            writeln!(f, "{:<4} {}", landmark.id, landmark.name)?;
        }
        writeln!(f)?;
        writeln!(f, "Use 0 for \"any\" in `rooms search --from/--to`.")
    }
}
