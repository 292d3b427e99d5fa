//! Delete command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;
use tracing::warn;

use crate::cli::StoreArgs;
use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// User id
    #[arg(required_unless_present = "login")]
    pub id: Option<String>,

    /// Delete by login instead of id
    #[arg(long, conflicts_with = "id")]
    pub login: Option<String>,
}

pub async fn run(store_args: &StoreArgs, args: DeleteArgs) -> Result<()> {
    let id = args.id.as_deref().map(super::parse_id).transpose()?;
    let mut store = context::load_store(store_args).await?;

    let (result, target) = match (id, args.login) {
        (Some(id), _) => {
            let target = format!("id {}", id);
            (store.delete(&id), target)
        }
        (None, Some(login)) => {
            let target = format!("login {}", login);
            (store.delete_by_login(&login), target)
        }
        (None, None) => bail!("Either an id or --login is required"),
    };

    match result {
        Ok(record) => {
            output::success(&format!("Deleted user {} ({})", record.login, record.id));
            if store.is_empty() {
                output::field("note", "directory is empty; it will be refetched on next load");
            }
            Ok(())
        }
        Err(e) if e.is_not_found() => {
            warn!(%target, "Delete skipped, user not found");
            output::error(&format!("No user with {}; nothing changed", target));
            Ok(())
        }
        Err(e) => Err(e).context("Failed to delete user"),
    }
}
