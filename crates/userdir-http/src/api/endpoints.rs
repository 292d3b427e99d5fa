//! Search API endpoint definitions and request/response types.

use serde::{Deserialize, Serialize};

use userdir_core::{Record, RecordId};

/// GET search/users
pub const SEARCH_USERS: &str = "search/users";

/// Query parameters for search/users.
#[derive(Debug, Serialize)]
pub struct SearchUsersQuery<'a> {
    pub q: &'a str,
}

/// Response body for search/users.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchUsersResponse {
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub incomplete_results: bool,
    pub items: Vec<SearchItem>,
}

/// One user in a search result.
///
/// Only the fields the directory keeps are decoded; the API sends many more.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    pub id: RecordId,
    pub login: String,
    pub avatar_url: String,
    pub html_url: String,
    #[serde(default)]
    pub score: f64,
}

impl SearchItem {
    /// Map the API shape onto a directory record.
    ///
    /// Relevance scores come back as floats; they are rounded to the
    /// nearest whole number and clamped at zero.
    pub fn into_record(self) -> Record {
        let score = if self.score.is_finite() && self.score > 0.0 {
            self.score.round() as u64
        } else {
            0
        };

        Record {
            id: self.id,
            login: self.login,
            score,
            url: self.html_url,
            avatar: self.avatar_url,
        }
    }
}

/// Error body sent with non-success responses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_maps_to_record() {
        let item: SearchItem = serde_json::from_value(serde_json::json!({
            "id": 583231,
            "login": "octocat",
            "node_id": "MDQ6VXNlcjU4MzIzMQ==",
            "avatar_url": "https://avatars.githubusercontent.com/u/583231?v=4",
            "html_url": "https://github.com/octocat",
            "type": "User",
            "score": 1.0
        }))
        .unwrap();

        let record = item.into_record();
        assert_eq!(record.id, RecordId::Number(583231));
        assert_eq!(record.score, 1);
        assert_eq!(record.url, "https://github.com/octocat");
        assert_eq!(
            record.avatar,
            "https://avatars.githubusercontent.com/u/583231?v=4"
        );
    }

    #[test]
    fn fractional_and_negative_scores() {
        let item = |score: f64| SearchItem {
            id: RecordId::Number(1),
            login: "abc".to_string(),
            avatar_url: String::new(),
            html_url: String::new(),
            score,
        };

        assert_eq!(item(4.6).into_record().score, 5);
        assert_eq!(item(-2.0).into_record().score, 0);
        assert_eq!(item(f64::NAN).into_record().score, 0);
    }

    #[test]
    fn response_without_counts() {
        let response: SearchUsersResponse =
            serde_json::from_str(r#"{"items":[]}"#).unwrap();
        assert!(response.items.is_empty());
        assert_eq!(response.total_count, None);
        assert!(!response.incomplete_results);
    }
}
