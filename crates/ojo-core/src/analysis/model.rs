//! Wire types for the analytics backend.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Login payload sent to the backend.
///
/// The password is write-only: it is serialized into the request body but
/// never restored when a payload is decoded (e.g. from a server echo).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    #[serde(skip_deserializing)]
    pub password: String,
    pub two_factor_code: Option<String>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            two_factor_code: None,
        }
    }

    #[must_use]
    pub fn with_two_factor_code(mut self, code: impl Into<String>) -> Self {
        self.two_factor_code = Some(code.into());
        self
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("two_factor_code", &self.two_factor_code)
            .finish()
    }
}

/// Follower/following comparison computed by the backend.
///
/// List order is whatever the backend returned; nothing here sorts or
/// deduplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub followers_count: u64,
    pub following_count: u64,
    pub not_following_back: Vec<String>,
    pub fans: Vec<String>,
}

impl AnalysisResult {
    pub fn not_following_back_count(&self) -> usize {
        self.not_following_back.len()
    }

    pub fn fans_count(&self) -> usize {
        self.fans.len()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_credentials_serialize_null_code() {
        let body = serde_json::to_value(Credentials::new("alice", "p1")).unwrap();
        assert_eq!(
            body,
            json!({"username": "alice", "password": "p1", "two_factor_code": null})
        );
    }

    #[test]
    fn test_credentials_echo_keeps_username_and_code_only() {
        let sent = Credentials::new("alice", "p1").with_two_factor_code("000000");
        let encoded = serde_json::to_string(&sent).unwrap();

        let echoed: Credentials = serde_json::from_str(&encoded).unwrap();

        assert_eq!(echoed.username, "alice");
        assert_eq!(echoed.two_factor_code.as_deref(), Some("000000"));
        assert!(echoed.password.is_empty());
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let rendered = format!("{:?}", Credentials::new("alice", "hunter2"));
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_result_decodes_in_order_and_ignores_unknown_keys() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "followers_count": 10,
            "following_count": 12,
            "not_following_back": ["zed", "bob"],
            "fans": ["carol", "dave"],
            "generated_at": "2024-01-01"
        }))
        .unwrap();

        assert_eq!(result.followers_count, 10);
        assert_eq!(result.following_count, 12);
        assert_eq!(result.not_following_back, vec!["zed", "bob"]);
        assert_eq!(result.fans_count(), 2);
        assert_eq!(result.not_following_back_count(), 2);
    }

    #[test]
    fn test_result_rejects_negative_counts() {
        let decoded = serde_json::from_value::<AnalysisResult>(json!({
            "followers_count": -1,
            "following_count": 0,
            "not_following_back": [],
            "fans": []
        }));
        assert!(decoded.is_err());
    }
}
