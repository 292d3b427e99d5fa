//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use userdir_core::DEFAULT_QUERY;
use userdir_http::DEFAULT_API_URL;

use crate::commands::{create, delete, edit, list, show};

/// Browse and edit a local user directory.
#[derive(Parser, Debug)]
#[command(name = "userdir")]
#[command(author, version = env!("USERDIR_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub store: StoreArgs,

    /// Defaults to `list`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Where the directory lives and how it is first populated.
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Directory holding the snapshot (defaults to the user data dir)
    #[arg(long, env = "USERDIR_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Search API base URL
    #[arg(long, env = "USERDIR_API", default_value = DEFAULT_API_URL, global = true)]
    pub api: String,

    /// Search query used to populate an empty directory
    #[arg(long, env = "USERDIR_QUERY", default_value = DEFAULT_QUERY, global = true)]
    pub query: String,

    /// Bearer token sent to the search API
    #[arg(long, env = "USERDIR_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all users
    List(list::ListArgs),

    /// Show one user
    Show(show::ShowArgs),

    /// Add a user
    Create(create::CreateArgs),

    /// Change fields of a user
    Edit(edit::EditArgs),

    /// Remove a user
    Delete(delete::DeleteArgs),
}
