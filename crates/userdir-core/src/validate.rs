//! Form validation for creating and editing records.
//!
//! Raw operator input is checked here, before anything reaches the
//! [`RecordStore`](crate::RecordStore). Every failing field is reported, not
//! just the first one.

use crate::avatar::AvatarImage;
use crate::error::{Field, ValidationErrors};
use crate::record::{RecordDraft, RecordPatch};
use crate::types::RecordId;

const MIN_LOGIN_LEN: usize = 3;
const MIN_URL_LEN: usize = 10;

/// Raw input from the create form.
#[derive(Debug, Clone, Default)]
pub struct DraftInput {
    /// Optional preset id; generated by the store when absent.
    pub id: Option<String>,
    pub login: String,
    pub score: String,
    pub url: String,
    /// Contents of the chosen avatar image file.
    pub avatar: Option<Vec<u8>>,
}

impl DraftInput {
    /// Check every field and build a draft.
    pub fn validate(self) -> Result<RecordDraft, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let id = match self.id {
            Some(raw) => match RecordId::new(&raw) {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.push(Field::Id, "cannot be empty");
                    None
                }
            },
            None => None,
        };

        check_login(&self.login, true, &mut errors);
        let score = check_score(&self.score, true, &mut errors);
        check_url(&self.url, &mut errors);

        let avatar = match self.avatar {
            Some(bytes) if !bytes.is_empty() => check_avatar(bytes, &mut errors),
            _ => {
                errors.push(Field::Avatar, "is required");
                None
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        // Both are Some when no error was recorded.
        match (score, avatar) {
            (Some(score), Some(avatar)) => Ok(RecordDraft {
                id,
                login: self.login,
                score,
                url: self.url,
                avatar,
            }),
            _ => Err(errors),
        }
    }
}

/// Raw input from the edit form. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct PatchInput {
    pub login: Option<String>,
    pub score: Option<String>,
    pub url: Option<String>,
    pub avatar: Option<Vec<u8>>,
}

impl PatchInput {
    /// Check the provided fields and build a patch.
    pub fn validate(self) -> Result<RecordPatch, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(ref login) = self.login {
            check_login(login, false, &mut errors);
        }
        let score = self
            .score
            .as_deref()
            .and_then(|s| check_score(s, false, &mut errors));
        if let Some(ref url) = self.url {
            check_url(url, &mut errors);
        }
        let avatar = match self.avatar {
            Some(bytes) if bytes.is_empty() => {
                errors.push(Field::Avatar, "is required");
                None
            }
            Some(bytes) => check_avatar(bytes, &mut errors),
            None => None,
        };

        errors.into_result(RecordPatch {
            login: self.login,
            score,
            url: self.url,
            avatar,
        })
    }
}

/// Create requires letters and digits only; edit only checks length.
fn check_login(login: &str, strict: bool, errors: &mut ValidationErrors) {
    if login.is_empty() {
        errors.push(Field::Login, "is required");
        return;
    }

    if login.chars().count() < MIN_LOGIN_LEN {
        errors.push(
            Field::Login,
            format!("must be at least {} characters", MIN_LOGIN_LEN),
        );
    }

    if strict && !login.chars().all(|c| c.is_ascii_alphanumeric()) {
        errors.push(Field::Login, "may only contain letters and digits");
    }
}

/// Create requires a positive integer without leading zeros; edit accepts
/// any run of digits.
fn check_score(score: &str, strict: bool, errors: &mut ValidationErrors) -> Option<u64> {
    if score.is_empty() {
        errors.push(Field::Score, "is required");
        return None;
    }

    if !score.chars().all(|c| c.is_ascii_digit()) {
        errors.push(Field::Score, "must contain only digits");
        return None;
    }

    if strict && score.starts_with('0') {
        errors.push(Field::Score, "must be a positive integer without leading zeros");
        return None;
    }

    match score.parse::<u64>() {
        Ok(n) => Some(n),
        Err(_) => {
            errors.push(Field::Score, "is too large");
            None
        }
    }
}

fn check_url(url: &str, errors: &mut ValidationErrors) {
    if url.is_empty() {
        errors.push(Field::Url, "is required");
        return;
    }

    if url.chars().count() < MIN_URL_LEN {
        errors.push(
            Field::Url,
            format!("must be at least {} characters", MIN_URL_LEN),
        );
    }

    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    if rest.is_none_or(str::is_empty) {
        errors.push(Field::Url, "must start with http:// or https://");
    }
}

fn check_avatar(bytes: Vec<u8>, errors: &mut ValidationErrors) -> Option<String> {
    match AvatarImage::from_bytes(bytes) {
        Some(image) => Some(image.to_data_uri()),
        None => {
            errors.push(Field::Avatar, "must be a PNG or JPEG image");
            None
        }
    }
}
