//! The user record and its create/update inputs.

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::RecordId;

/// A user entry in the directory.
///
/// This is the persisted shape. Values are not re-validated when a snapshot
/// is read back; validation happens on the way in (see [`crate::validate`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub login: String,
    #[serde(deserialize_with = "score::deserialize")]
    pub score: u64,
    /// Profile URL. Older snapshots spell the key `URL`.
    #[serde(alias = "URL")]
    pub url: String,
    /// Remote image URL or `data:` URI.
    pub avatar: String,
}

/// Where a record's avatar image lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarKind {
    /// A URL pointing at a remote image.
    Remote,
    /// An image embedded as a `data:` URI.
    Embedded,
}

impl Record {
    /// Classify the avatar value.
    pub fn avatar_kind(&self) -> AvatarKind {
        if self.avatar.starts_with("data:") {
            AvatarKind::Embedded
        } else {
            AvatarKind::Remote
        }
    }
}

/// A validated record that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDraft {
    /// Preset id. The store generates one when this is `None`.
    pub id: Option<RecordId>,
    pub login: String,
    pub score: u64,
    pub url: String,
    pub avatar: String,
}

impl RecordDraft {
    /// Turn the draft into a record, using `fallback_id` when no id was preset.
    pub fn into_record(self, fallback_id: impl FnOnce() -> RecordId) -> Record {
        Record {
            id: self.id.unwrap_or_else(fallback_id),
            login: self.login,
            score: self.score,
            url: self.url,
            avatar: self.avatar,
        }
    }
}

/// A partial update. Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPatch {
    pub login: Option<String>,
    pub score: Option<u64>,
    pub url: Option<String>,
    pub avatar: Option<String>,
}

impl RecordPatch {
    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.login.is_none() && self.score.is_none() && self.url.is_none() && self.avatar.is_none()
    }

    /// Merge this patch over `base`. Patch fields win; the id never changes.
    pub fn apply(&self, base: &Record) -> Record {
        Record {
            id: base.id.clone(),
            login: self.login.clone().unwrap_or_else(|| base.login.clone()),
            score: self.score.unwrap_or(base.score),
            url: self.url.clone().unwrap_or_else(|| base.url.clone()),
            avatar: self.avatar.clone().unwrap_or_else(|| base.avatar.clone()),
        }
    }
}

mod score {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawScore {
        Int(u64),
        Float(f64),
        Text(String),
    }

    /// Accept integers, non-negative floats, and numeric strings.
    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawScore::deserialize(deserializer)? {
            RawScore::Int(n) => Ok(n),
            RawScore::Float(f) => from_float(f).map_err(serde::de::Error::custom),
            RawScore::Text(s) => s
                .trim()
                .parse::<u64>()
                .map_err(|_| serde::de::Error::custom(format!("invalid score '{}'", s))),
        }
    }

    fn from_float(f: f64) -> Result<u64, String> {
        if f.is_finite() && f >= 0.0 {
            Ok(f.round() as u64)
        } else {
            Err(format!("invalid score {}", f))
        }
    }
}
