use std::io::Write;

use anyhow::Result;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use serde::Serialize;

use super::traits::Renderer;
use crate::presentation::view_models::{
    CommandResultViewModel, CreateView, OutputFormat, StatusBadge, StatusLevel, ViewMode,
};

pub struct ConsoleRenderer {
    format: OutputFormat,
    view_mode: ViewMode,
    color: bool,
}

impl ConsoleRenderer {
    pub fn new(format: OutputFormat, view_mode: ViewMode) -> Self {
        Self {
            format,
            view_mode,
            color: std::io::stdout().is_terminal(),
        }
    }

    /// Render into `out` instead of stdout.
    pub fn render_to<T, W>(&self, out: &mut W, result: &CommandResultViewModel<T>) -> Result<()>
    where
        T: Serialize + CreateView,
        W: Write,
    {
        if self.format == OutputFormat::Json {
            writeln!(out, "{}", serde_json::to_string_pretty(result)?)?;
            return Ok(());
        }

        // --quiet output is for scripts: payload only
        let minimal = self.view_mode == ViewMode::Minimal;

        if !minimal && let Some(badge) = &result.badge {
            writeln!(out, "{}", self.badge_line(badge))?;
            writeln!(out)?;
        }

        write!(out, "{}", result.content.create_view(self.view_mode))?;

        if !minimal && !result.suggestions.is_empty() {
            writeln!(out)?;
            for tip in &result.suggestions {
                write!(out, "  • {}", tip.description)?;
                if let Some(cmd) = &tip.command {
                    if self.color {
                        write!(out, ": {}", cmd.cyan())?;
                    } else {
                        write!(out, ": {}", cmd)?;
                    }
                }
                writeln!(out)?;
            }
        }

        Ok(())
    }

    fn badge_line(&self, badge: &StatusBadge) -> String {
        if !self.color {
            return badge.line();
        }
        let label = match badge.level {
            StatusLevel::Success => badge.label.green().bold().to_string(),
            StatusLevel::Info => badge.label.cyan().bold().to_string(),
            StatusLevel::Warning => badge.label.yellow().bold().to_string(),
            StatusLevel::Error => badge.label.red().bold().to_string(),
        };
        format!("{} {}", badge.level.marker(), label)
    }
}

impl Renderer for ConsoleRenderer {
    fn render<T>(&self, result: CommandResultViewModel<T>) -> Result<()>
    where
        T: Serialize + CreateView + Send + Sync,
    {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.render_to(&mut out, &result)?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::view_models::{Guidance, JoinResultViewModel};

    fn plain(view_mode: ViewMode) -> ConsoleRenderer {
        ConsoleRenderer {
            format: OutputFormat::Text,
            view_mode,
            color: false,
        }
    }

    fn joined() -> CommandResultViewModel<JoinResultViewModel> {
        CommandResultViewModel::new(JoinResultViewModel {
            room_id: 7,
            chat_path: "/chat/7".to_string(),
        })
        .with_badge(StatusBadge::success("방에 참여했습니다."))
        .with_suggestion(Guidance::new("Check your pot").with_command("taxipot me pot"))
    }

    #[test]
    fn test_text_output_with_badge_and_tip() {
        let mut out = Vec::new();
        plain(ViewMode::Standard).render_to(&mut out, &joined()).unwrap();
        let text = String::from_utf8(out).unwrap();
        insta::assert_snapshot!(text.trim_end(), @r"
        [완료] 방에 참여했습니다.

        Joined room #7
        Chat: /chat/7

          • Check your pot: taxipot me pot
        ");
    }

    #[test]
    fn test_quiet_output_has_no_decorations() {
        let mut out = Vec::new();
        plain(ViewMode::Minimal).render_to(&mut out, &joined()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("[완료]"));
        assert!(!text.contains("taxipot me pot"));
    }

    #[test]
    fn test_json_output_is_the_envelope() {
        let renderer = ConsoleRenderer {
            format: OutputFormat::Json,
            view_mode: ViewMode::Standard,
            color: false,
        };
        let mut out = Vec::new();
        renderer.render_to(&mut out, &joined()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["content"]["room_id"], 7);
        assert_eq!(value["badge"]["level"], "success");
        assert_eq!(value["suggestions"][0]["command"], "taxipot me pot");
    }
}
