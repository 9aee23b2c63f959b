//! The installer's line format, shared by the console, the log file and
//! [`MemoryLog`](super::MemoryLog).
//!
//! A run prints one `==>` header per program and one indented status line
//! per action; warnings, errors and debug detail are set apart from those.
use std::fmt;

use tracing::Level;
use tracing::field::{Field, Visit};

/// Role of a log event in the installer's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum EventKind {
    /// `==> program`.
    Header,
    /// The one line reported for an action.
    Status,
    /// Status line of an action that was only previewed.
    DryRun,
    /// Warnings, errors and debug detail.
    Message,
}

impl EventKind {
    /// Name of the tracing field carrying the kind.
    pub(super) const FIELD: &'static str = "kind";

    pub(super) const fn as_str(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Status => "status",
            Self::DryRun => "dry_run",
            Self::Message => "message",
        }
    }

    fn from_field(value: &str) -> Self {
        match value {
            "header" => Self::Header,
            "status" => Self::Status,
            "dry_run" => Self::DryRun,
            _ => Self::Message,
        }
    }
}

/// Whether a rendered line may carry ANSI colour codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Style {
    Plain,
    Color,
}

/// The message and kind recorded on a tracing event.
#[derive(Debug)]
pub(super) struct EventFields {
    pub(super) message: String,
    pub(super) kind: EventKind,
}

impl EventFields {
    pub(super) fn of(event: &tracing::Event<'_>) -> Self {
        let mut fields = Self {
            message: String::new(),
            kind: EventKind::Message,
        };
        event.record(&mut fields);
        fields
    }
}

impl Visit for EventFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            EventKind::FIELD => self.kind = EventKind::from_field(value),
            _ => {}
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }
}

/// Render one event as a single output line, without the trailing newline.
pub(super) fn render(kind: EventKind, level: Level, msg: &str, style: Style) -> String {
    let paint = |code: &str, text: &str| match style {
        Style::Color => format!("\x1b[{code}m{text}\x1b[0m"),
        Style::Plain => text.to_string(),
    };
    match (kind, level) {
        (EventKind::Header, _) => format!("{} {}", paint("1;34", "==>"), paint("1", msg)),
        (EventKind::Status, _) | (EventKind::Message, Level::INFO) => format!("  {msg}"),
        (EventKind::DryRun, _) => format!("  {} {msg}", paint("33", "[DRY RUN]")),
        (EventKind::Message, Level::ERROR) => format!("{} {msg}", paint("31", "ERROR")),
        (EventKind::Message, Level::WARN) => format!("{}  {msg}", paint("33", "WARN")),
        (EventKind::Message, _) if style == Style::Plain => format!("  debug: {msg}"),
        (EventKind::Message, _) => format!("  {}", paint("2", msg)),
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn plain(kind: EventKind, level: Level, msg: &str) -> String {
        render(kind, level, msg, Style::Plain)
    }

    #[test]
    fn plain_lines_follow_the_output_contract() {
        let lines = [
            plain(EventKind::Header, Level::INFO, "vim"),
            plain(EventKind::Status, Level::INFO, "Symlink ~/.vimrc -> configs/vimrc"),
            plain(EventKind::Status, Level::INFO, "Skipping ~/.vimrc"),
            plain(EventKind::DryRun, Level::INFO, "Creating ~/.zshrc"),
            plain(EventKind::Message, Level::WARN, "2. teleport [] (unknown kind)"),
            plain(EventKind::Message, Level::ERROR, "vim: copy ~/.vimrc failed"),
            plain(EventKind::Message, Level::DEBUG, "vim: 1 applied, 0 skipped"),
        ];
        insta::assert_debug_snapshot!(lines, @r#"
        [
            "==> vim",
            "  Symlink ~/.vimrc -> configs/vimrc",
            "  Skipping ~/.vimrc",
            "  [DRY RUN] Creating ~/.zshrc",
            "WARN  2. teleport [] (unknown kind)",
            "ERROR vim: copy ~/.vimrc failed",
            "  debug: vim: 1 applied, 0 skipped",
        ]
        "#);
    }

    #[test]
    fn colour_wraps_only_the_markers() {
        assert_eq!(
            render(EventKind::Header, Level::INFO, "zsh", Style::Color),
            "\x1b[1;34m==>\x1b[0m \x1b[1mzsh\x1b[0m"
        );
        assert_eq!(
            render(EventKind::Status, Level::INFO, "Creating ~/.zshrc", Style::Color),
            "  Creating ~/.zshrc"
        );
    }

    #[test]
    fn unknown_kind_field_is_a_plain_message() {
        assert_eq!(EventKind::from_field("banner"), EventKind::Message);
        for kind in [EventKind::Header, EventKind::Status, EventKind::DryRun] {
            assert_eq!(EventKind::from_field(kind.as_str()), kind);
        }
    }
}
