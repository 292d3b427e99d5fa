//! Create command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;

use userdir_core::DraftInput;

use crate::cli::StoreArgs;
use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Login name (letters and digits, at least 3)
    #[arg(long)]
    pub login: Option<String>,

    /// Score (positive integer)
    #[arg(long)]
    pub score: Option<String>,

    /// Profile URL (http:// or https://)
    #[arg(long)]
    pub url: Option<String>,

    /// PNG or JPEG image file for the avatar
    #[arg(long)]
    pub avatar: Option<PathBuf>,

    /// Use this id instead of generating one
    #[arg(long)]
    pub id: Option<String>,
}

pub async fn run(store_args: &StoreArgs, args: CreateArgs) -> Result<()> {
    let avatar = args
        .avatar
        .as_deref()
        .map(super::read_avatar)
        .transpose()?;

    let input = DraftInput {
        id: args.id,
        login: args.login.unwrap_or_default(),
        score: args.score.unwrap_or_default(),
        url: args.url.unwrap_or_default(),
        avatar,
    };

    let draft = match input.validate() {
        Ok(draft) => draft,
        Err(errors) => {
            output::validation(&errors);
            bail!("Invalid user: {} field error(s)", errors.errors().len());
        }
    };

    let mut store = context::load_local_store(store_args)?;
    let record = store.create(draft).context("Failed to create user")?;

    output::success(&format!("Created user {}", record.login));
    output::record(&record);

    Ok(())
}
