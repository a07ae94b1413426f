//! Color and styling helpers for CLI output.
//!
//! Semantic Color Theme:
//!   - Done:        green
//!   - In Progress: yellow
//!   - Bug:         red
//!   - Keys:        cyan
//!   - Epic:        magenta
//!   - Field names: dimmed

use crate::domain::{IssueStatus, IssueType};
use colored::Colorize;

use super::OutputConfig;

/// Apply semantic "success" color (green) to text.
pub(crate) fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply color to status text based on issue status.
pub(crate) fn colorize_status(status: IssueStatus, config: &OutputConfig) -> String {
    let text = status.to_string();
    if !config.use_colors {
        return text;
    }
    match status {
        IssueStatus::Todo => text.white().to_string(),
        IssueStatus::InProgress => text.yellow().to_string(),
        IssueStatus::Done => text.green().to_string(),
    }
}

/// Apply color to the issue type label.
pub(crate) fn colorize_type(issue_type: IssueType, config: &OutputConfig) -> String {
    let text = issue_type.to_string();
    if !config.use_colors {
        return text;
    }
    match issue_type {
        IssueType::Epic => text.magenta().bold().to_string(),
        IssueType::Bug => text.red().to_string(),
        IssueType::Story => text.blue().to_string(),
        IssueType::Task | IssueType::Subtask => text,
    }
}

/// Colorize an issue key (cyan).
pub(crate) fn colorize_key(key: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return key.to_string();
    }
    key.cyan().to_string()
}

/// Dim a field label.
pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: OutputConfig = OutputConfig { use_colors: false };

    #[test]
    fn plain_config_returns_text_unchanged() {
        assert_eq!(colorize_status(IssueStatus::InProgress, &PLAIN), "In Progress");
        assert_eq!(colorize_type(IssueType::Epic, &PLAIN), "Epic");
        assert_eq!(colorize_key("EPIC-0", &PLAIN), "EPIC-0");
        assert_eq!(dimmed("Parent:", &PLAIN), "Parent:");
        assert_eq!(success("ok", &PLAIN), "ok");
    }
}
