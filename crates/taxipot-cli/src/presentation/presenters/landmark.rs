use taxipot_types::LANDMARKS;

use crate::presentation::view_models::{LandmarkEntryViewModel, LandmarkListViewModel};

pub fn present_landmarks() -> LandmarkListViewModel {
    LandmarkListViewModel {
        landmarks: LANDMARKS
            .iter()
            .map(|l| LandmarkEntryViewModel {
                id: l.id,
                name: l.name.to_string(),
            })
            .collect(),
    }
}
