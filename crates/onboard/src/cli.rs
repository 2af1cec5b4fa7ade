// src/cli.rs
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::target::FormTarget;

#[derive(Parser)]
#[command(name = "onboard", version, about = "Onboarding form operator tool")]
pub struct Cli {
    /// Base directory for config, saved forms and logs
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand)]
pub enum Cmd {
    /// Print pages, packed rows and column classes of a form
    Layout {
        /// agent, borrower, lender, supervisor, partner, admin, monitoring or a schema .json
        form: FormTarget,
        /// Only this page
        #[arg(long)]
        page: Option<u32>,
    },
    /// Print the section title of every page
    Titles { form: FormTarget },
    /// Validate entered values page by page
    Check {
        form: FormTarget,
        /// JSON object of field key -> value
        #[arg(long)]
        data: PathBuf,
        /// Attach a file to an upload field (`fieldId=path`, repeatable)
        #[arg(long = "attach", value_name = "FIELD=PATH")]
        attachments: Vec<String>,
    },
    /// Inspect and manage saved progress
    Saved {
        #[command(subcommand)]
        action: SavedAction,
    },
    /// Validate a saved form and send it to the API
    Submit {
        form: FormTarget,
        /// Attach a file to an upload field (`fieldId=path`, repeatable)
        #[arg(long = "attach", value_name = "FIELD=PATH")]
        attachments: Vec<String>,
        /// Endpoint for the form payload (default `/api/onboarding/<form>`)
        #[arg(long)]
        endpoint: Option<String>,
        /// Keep the saved progress after a successful submission
        #[arg(long)]
        keep: bool,
    },
}

#[derive(Subcommand)]
pub enum SavedAction {
    /// List every saved form
    List,
    /// Print a saved form and its review summary
    Show { form: FormTarget },
    /// Save entered values as progress
    Import {
        form: FormTarget,
        #[arg(long)]
        data: PathBuf,
        /// Page to resume on
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Refresh the last-modified time of a saved form
    Touch { form: FormTarget },
    /// Drop a saved form
    Delete { form: FormTarget },
}
