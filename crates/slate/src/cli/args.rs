//! CLI argument structs for all commands.

use clap::Parser;

use super::validators::{validate_description, validate_issue_key};

/// Arguments for the `init` command
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Where to keep the issue document, relative to the current directory
    ///
    /// Defaults to `.slate/issues.json`.
    #[arg(long, value_name = "PATH")]
    pub data_file: Option<String>,

    /// Suppress output messages
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the `create` command
#[derive(Parser, Debug, Clone)]
pub struct CreateArgs {
    /// Issue title (required)
    #[arg(long)]
    pub title: Option<String>,

    /// Detailed description
    #[arg(short = 'D', long, value_parser = validate_description)]
    pub description: Option<String>,

    /// Issue type: task, story (or feature), epic, bug, subtask
    ///
    /// Case-insensitive. Defaults to task.
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub issue_type: Option<String>,

    /// Key of the parent issue (e.g. EPIC-0)
    ///
    /// Required for subtasks; not allowed for epics and bugs.
    #[arg(short, long, value_name = "KEY")]
    pub parent: Option<String>,
}

/// Arguments for the `show` command
#[derive(Parser, Debug, Clone)]
pub struct ShowArgs {
    /// Issue key to display
    #[arg(value_parser = validate_issue_key)]
    pub key: String,
}
