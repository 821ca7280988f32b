use serde::Serialize;

/// Where the shell should go next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum Navigation {
    /// A path inside the client (`/chat/42`).
    Internal(String),
    /// Leave the client entirely; in-memory state is abandoned.
    External(String),
}

impl Navigation {
    pub fn chat(room_id: u32) -> Self {
        Navigation::Internal(format!("/chat/{}", room_id))
    }

    /// The path or URL to go to.
    pub fn target(&self) -> &str {
        match self {
            Navigation::Internal(target) | Navigation::External(target) => target,
        }
    }
}

/// Fully-built external login URL carrying the return address.
///
/// Built by the caller (it owns the base URL); the search view only decides
/// *when* to leave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRedirect {
    url: String,
}

impl LoginRedirect {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}
