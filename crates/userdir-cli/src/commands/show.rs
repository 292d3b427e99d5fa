//! Show command implementation.

use anyhow::{Result, bail};
use clap::Args;

use crate::cli::StoreArgs;
use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// User id
    pub id: String,

    /// Print the user as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(store_args: &StoreArgs, args: ShowArgs) -> Result<()> {
    let id = super::parse_id(&args.id)?;
    let store = context::load_local_store(store_args)?;

    let Some(record) = store.find_by_id(&id) else {
        bail!("No user with id {}", id);
    };

    if args.json {
        output::json_pretty(record)?;
    } else {
        output::record(record);
    }

    Ok(())
}
