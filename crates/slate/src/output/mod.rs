//! Output formatting for CLI commands.
//!
//! Issues are printed either as human-readable text or as the same JSON
//! object that is persisted in the document.

mod color;

use crate::domain::Issue;
use serde::Serialize;
use std::env;
use std::io::{self, Write};

use color::{colorize_key, colorize_status, colorize_type, dimmed, success};

/// Configuration for output formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create an OutputConfig by reading from environment variables.
    ///
    /// Colors are disabled when `NO_COLOR` is set (any value) or when
    /// `SLATE_COLOR` is `0` or `false`.
    pub fn from_env() -> Self {
        Self::from_values(
            env::var("NO_COLOR").ok().as_deref(),
            env::var("SLATE_COLOR").ok().as_deref(),
        )
    }

    fn from_values(no_color: Option<&str>, slate_color: Option<&str>) -> Self {
        let use_colors = no_color.is_none()
            && slate_color.is_none_or(|v| v != "0" && !v.eq_ignore_ascii_case("false"));
        Self { use_colors }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { use_colors: true }
    }
}

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

/// Print a newly created issue.
pub fn print_created(issue: &Issue, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => {
            let line = format!("Created {} {}", issue.issue_type(), issue.key());
            writeln!(handle, "{}", success(&line, &config))
        }
        OutputMode::Json => write_json(&mut handle, issue),
    }
}

/// Print an issue with full details (for the show command).
pub fn print_issue_details(issue: &Issue, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => write_issue_details(&mut handle, issue, &config),
        OutputMode::Json => write_json(&mut handle, issue),
    }
}

fn write_json<W: Write, T: Serialize + ?Sized>(w: &mut W, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(w, "{json}")
}

fn write_issue_details<W: Write>(
    w: &mut W,
    issue: &Issue,
    config: &OutputConfig,
) -> io::Result<()> {
    let fields = issue.fields();

    writeln!(
        w,
        "{} [{}] {}",
        colorize_key(fields.key.as_str(), config),
        colorize_type(issue.issue_type(), config),
        fields.summary
    )?;
    writeln!(
        w,
        "  {} {}",
        dimmed("Status: ", config),
        colorize_status(fields.status, config)
    )?;
    if let Some(parent) = &fields.parent_key {
        writeln!(
            w,
            "  {} {}",
            dimmed("Parent: ", config),
            colorize_key(parent.as_str(), config)
        )?;
    }
    if let Some(children) = issue.child_issue_keys()
        && !children.is_empty()
    {
        let keys: Vec<_> = children
            .iter()
            .map(|key| colorize_key(key.as_str(), config))
            .collect();
        writeln!(w, "  {} {}", dimmed("Children:", config), keys.join(", "))?;
    }
    writeln!(
        w,
        "  {} {}",
        dimmed("Created:", config),
        fields.created_at.to_rfc3339()
    )?;
    writeln!(
        w,
        "  {} {}",
        dimmed("Updated:", config),
        fields.updated_at.to_rfc3339()
    )?;

    if !fields.description.is_empty() {
        writeln!(w)?;
        for line in fields.description.lines() {
            writeln!(w, "  {line}")?;
        }
    }

    Ok(())
}
