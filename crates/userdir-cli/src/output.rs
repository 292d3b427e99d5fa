//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use userdir_core::error::ValidationErrors;
use userdir_core::{AvatarKind, Record};

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print one error line per failing field.
pub fn validation(errors: &ValidationErrors) {
    for err in errors.errors() {
        error(&format!("{}: {}", err.field, err.reason));
    }
}

/// Print every field of a record.
pub fn record(record: &Record) {
    field("id", &record.id.to_string());
    field("login", &record.login);
    field("score", &record.score.to_string());
    field("url", &record.url);
    field("avatar", &avatar_summary(record));
}

/// Print a record as one table row.
pub fn record_row(record: &Record) {
    println!(
        "{:>12}  {:<24} {:>6}  {}",
        record.id.to_string(),
        record.login.bold(),
        record.score,
        record.url.dimmed()
    );
}

/// Embedded images are too long to print; show their type instead.
fn avatar_summary(record: &Record) -> String {
    match record.avatar_kind() {
        AvatarKind::Remote => record.avatar.clone(),
        AvatarKind::Embedded => {
            let mime = record
                .avatar
                .strip_prefix("data:")
                .and_then(|rest| rest.split(';').next())
                .unwrap_or("image");
            format!("embedded {} ({} bytes encoded)", mime, record.avatar.len())
        }
    }
}
