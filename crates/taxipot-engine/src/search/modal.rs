use serde::Serialize;

/// Which confirmation dialog, if any, is open over the list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Modal {
    #[default]
    None,
    LoginPrompt,
    JoinConfirm,
}

#[derive(Debug, Default)]
pub(crate) struct Selection {
    pub room_id: Option<u32>,
    pub modal: Modal,
    pub join_pending: bool,
}

impl Selection {
    pub fn open(&mut self, room_id: u32, modal: Modal) {
        self.room_id = Some(room_id);
        self.modal = modal;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
