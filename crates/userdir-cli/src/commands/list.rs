//! List command implementation.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::cli::StoreArgs;
use crate::context;
use crate::output;

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Print users as a JSON array
    #[arg(long)]
    pub json: bool,
}

pub async fn run(store_args: &StoreArgs, args: ListArgs) -> Result<()> {
    let store = context::load_store(store_args).await?;

    if args.json {
        return output::json_pretty(&store.records());
    }

    if store.is_empty() {
        eprintln!("{}", "No users found.".dimmed());
        return Ok(());
    }

    for record in store.records() {
        output::record_row(record);
    }

    Ok(())
}
