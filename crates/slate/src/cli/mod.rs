//! CLI argument parsing and command dispatch.
//!
//! # Commands
//!
//! - `init`: Initialize a new slate repository
//! - `create`: Create a new issue
//! - `show`: Show issue details
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//!
//! # Example
//!
//! ```bash
//! slate init
//! slate create --title "Checkout" --type epic
//! slate create --title "Pay by card" --type story --parent EPIC-0
//! slate show STOR-1
//! ```

mod args;
mod execute;
mod validators;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub use args::{CreateArgs, InitArgs, ShowArgs};
pub use validators::{validate_description, validate_issue_key};

/// Slate - issue tracking with an Epic, Story/Task, Subtask hierarchy
///
/// Issues live in a single JSON document, `.slate/issues.json` by default.
#[derive(Parser, Debug)]
#[command(name = "slate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize a new slate repository
    ///
    /// Creates the `.slate/` directory with configuration and an empty
    /// issue document. Run this once in your project root.
    Init(InitArgs),

    /// Create a new issue
    ///
    /// Assigns the next key for the type and links the issue to its parent.
    Create(CreateArgs),

    /// Show detailed information about an issue
    Show(ShowArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    ///
    /// # Errors
    ///
    /// Returns the clap error for invalid arguments.
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened or the command
    /// fails. Engine errors are prefixed with their code.
    pub async fn execute(&self) -> Result<()> {
        use crate::app::App;
        use crate::output::OutputMode;

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        match &self.command {
            Some(Commands::Init(args)) => execute::execute_init(args).await,
            Some(Commands::Create(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_create(&app, args, output_mode).await
            }
            Some(Commands::Show(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_show(&app, args, output_mode).await
            }
            None => {
                println!("Slate issue tracker");
                println!("Use --help for more information");
                Ok(())
            }
        }
    }
}
