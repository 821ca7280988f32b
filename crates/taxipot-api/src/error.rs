use std::fmt;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug)]
pub enum ApiError {
    /// Request never produced a response (DNS, TLS, timeout, ...)
    Transport(reqwest::Error),

    /// Server answered with a non-2xx status
    Http { status: u16, message: Option<String> },

    /// Response body did not match the expected shape
    Decode(String),

    /// Base URL or request URL could not be built
    InvalidUrl(String),
}

impl ApiError {
    /// Message the server put in the error body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Http {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }

    /// Text to show a user: the server's own message verbatim, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(err) => write!(f, "Request failed: {}", err),
            ApiError::Http {
                status,
                message: Some(message),
            } => write!(f, "HTTP {}: {}", status, message),
            ApiError::Http {
                status,
                message: None,
            } => write!(f, "HTTP {}", status),
            ApiError::Decode(msg) => write!(f, "Unexpected response: {}", msg),
            ApiError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err)
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// Pull a human-readable message out of an error body.
///
/// The service uses `errMsg`; generic gateways use `message` or `error`.
pub(crate) fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["errMsg", "message", "error"]
        .iter()
        .filter_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::trim)
        .find(|msg| !msg.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_prefers_err_msg() {
        let body = r#"{"errMsg": "방이 가득 찼습니다", "message": "Conflict"}"#;
        assert_eq!(extract_message(body).as_deref(), Some("방이 가득 찼습니다"));
    }

    #[test]
    fn test_extract_falls_back_to_other_keys() {
        assert_eq!(
            extract_message(r#"{"message": "Bad Request"}"#).as_deref(),
            Some("Bad Request")
        );
        assert_eq!(
            extract_message(r#"{"error": "Unauthorized"}"#).as_deref(),
            Some("Unauthorized")
        );
        assert_eq!(extract_message(r#"{"errMsg": ""}"#), None);
        assert_eq!(extract_message("<html>502</html>"), None);
    }

    #[test]
    fn test_user_message_uses_fallback() {
        let err = ApiError::Http {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message("실패"), "실패");

        let err = ApiError::Http {
            status: 409,
            message: Some("방이 가득 찼습니다".to_string()),
        };
        assert_eq!(err.user_message("실패"), "방이 가득 찼습니다");
        assert_eq!(err.to_string(), "HTTP 409: 방이 가득 찼습니다");
    }
}
