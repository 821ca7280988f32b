use serde::Serialize;

/// How much of each room or record a text view prints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// `--quiet`: room ids, one per line
    Minimal,
    /// `--compact`: one line per room
    Compact,
    #[default]
    Standard,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl From<crate::args::OutputFormat> for OutputFormat {
    fn from(format: crate::args::OutputFormat) -> Self {
        match format {
            crate::args::OutputFormat::Plain => Self::Text,
            crate::args::OutputFormat::Json => Self::Json,
        }
    }
}

/// One-line outcome shown above a command's output or in the shell's
/// notice bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub level: StatusLevel,
    pub label: String,
}

impl StatusBadge {
    pub fn new(level: StatusLevel, label: impl Into<String>) -> Self {
        Self {
            level,
            label: label.into(),
        }
    }

    pub fn success(label: impl Into<String>) -> Self {
        Self::new(StatusLevel::Success, label)
    }

    pub fn info(label: impl Into<String>) -> Self {
        Self::new(StatusLevel::Info, label)
    }

    pub fn warning(label: impl Into<String>) -> Self {
        Self::new(StatusLevel::Warning, label)
    }

    pub fn error(label: impl Into<String>) -> Self {
        Self::new(StatusLevel::Error, label)
    }

    /// `[완료] 방에 참여했습니다.`
    pub fn line(&self) -> String {
        format!("{} {}", self.level.marker(), self.label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl StatusLevel {
    /// Bracketed tag printed before the label; plain text so it survives
    /// terminals without emoji fonts.
    pub fn marker(self) -> &'static str {
        match self {
            StatusLevel::Success => "[완료]",
            StatusLevel::Info => "[안내]",
            StatusLevel::Warning => "[주의]",
            StatusLevel::Error => "[실패]",
        }
    }
}

/// Follow-up hint after a command, e.g. the next page or a room to join.
#[derive(Debug, Clone, Serialize)]
pub struct Guidance {
    pub description: String,
    pub command: Option<String>,
}

impl Guidance {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            command: None,
        }
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_line_carries_level_marker() {
        assert_eq!(
            StatusBadge::success("방에서 나갔습니다.").line(),
            "[완료] 방에서 나갔습니다."
        );
        assert_eq!(StatusBadge::warning("로그인이 필요합니다.").line(), "[주의] 로그인이 필요합니다.");
    }
}
