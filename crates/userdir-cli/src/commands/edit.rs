//! Edit command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use tracing::warn;

use userdir_core::PatchInput;

use crate::cli::StoreArgs;
use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct EditArgs {
    /// User id
    pub id: String,

    /// New login (at least 3 characters)
    #[arg(long)]
    pub login: Option<String>,

    /// New score (digits only)
    #[arg(long)]
    pub score: Option<String>,

    /// New profile URL
    #[arg(long)]
    pub url: Option<String>,

    /// New PNG or JPEG avatar file
    #[arg(long)]
    pub avatar: Option<PathBuf>,
}

pub async fn run(store_args: &StoreArgs, args: EditArgs) -> Result<()> {
    let id = super::parse_id(&args.id)?;
    let avatar = args
        .avatar
        .as_deref()
        .map(super::read_avatar)
        .transpose()?;

    let input = PatchInput {
        login: args.login,
        score: args.score,
        url: args.url,
        avatar,
    };

    let patch = match input.validate() {
        Ok(patch) => patch,
        Err(errors) => {
            output::validation(&errors);
            bail!("Invalid user: {} field error(s)", errors.errors().len());
        }
    };

    let mut store = context::load_local_store(store_args)?;
    match store.update(&id, &patch) {
        Ok(record) => {
            output::success(&format!("Updated user {}", record.login));
            output::record(&record);
            Ok(())
        }
        Err(e) if e.is_not_found() => {
            warn!(%id, "Edit skipped, user not found");
            output::error(&format!("No user with id {}; nothing changed", id));
            Ok(())
        }
        Err(e) => Err(e).context("Failed to update user"),
    }
}
