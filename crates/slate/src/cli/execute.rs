//! Command execution logic.

use anyhow::{Result, anyhow, bail};

use super::args::{CreateArgs, InitArgs, ShowArgs};
use crate::app::App;
use crate::domain::CreateIssueInput;
use crate::engine::EngineError;
use crate::output::{self, OutputMode};

/// Execute the init command
pub async fn execute_init(args: &InitArgs) -> Result<()> {
    use crate::commands::init;

    let current_dir = std::env::current_dir()?;

    if !args.quiet {
        println!("Initializing slate repository...");
    }

    let result = init::init(&current_dir, args.data_file.as_deref()).await?;

    if !args.quiet {
        println!("Initialized slate in {}", result.slate_dir.display());
        println!("  Config: {}", result.config_file.display());
        println!("  Issues: {}", result.document_file.display());
    }

    Ok(())
}

/// Execute the create command
pub async fn execute_create(app: &App, args: &CreateArgs, output_mode: OutputMode) -> Result<()> {
    let issue = app
        .engine()
        .create_issue(create_input(args))
        .await
        .map_err(engine_error)?;

    output::print_created(&issue, output_mode)?;
    Ok(())
}

/// Translate `create` flags into engine input. Absent flags stay absent so
/// the engine applies its own defaults and validation.
fn create_input(args: &CreateArgs) -> CreateIssueInput {
    let mut input = args
        .title
        .as_deref()
        .map(CreateIssueInput::titled)
        .unwrap_or_default();
    if let Some(description) = &args.description {
        input = input.with_description(description.as_str());
    }
    if let Some(issue_type) = &args.issue_type {
        input = input.with_type(issue_type.as_str());
    }
    if let Some(parent) = &args.parent {
        input = input.with_parent(parent.as_str());
    }
    input
}

/// Execute the show command
pub async fn execute_show(app: &App, args: &ShowArgs, output_mode: OutputMode) -> Result<()> {
    let Some(issue) = app.engine().get_issue_by_key(&args.key).await? else {
        bail!("Issue not found: {}", args.key);
    };

    output::print_issue_details(&issue, output_mode)?;
    Ok(())
}

/// Prefix an engine error with its stable code, e.g. `[MISSING_TITLE] ...`.
fn engine_error(error: EngineError) -> anyhow::Error {
    anyhow!("[{}] {}", error.kind().code(), error)
}
