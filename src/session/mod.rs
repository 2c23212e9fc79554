//! Client-held sessions.
//!
//! A session is a small JSON payload carried in a signed cookie. Handlers never
//! touch the cookie format directly; they go through a [`SessionStore`] held in
//! the application state.

mod cookie_store;

pub use cookie_store::{cleared_cookie, session_cookie, session_token, CookieStore};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;

/// How long a login cookie stays valid in the browser.
pub const SESSION_MAX_AGE_SECS: i64 = 30 * 24 * 3600;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    // Kept as a raw JSON value: only a literal `true` grants admin access.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<Value>,
}

impl SessionData {
    pub fn authenticated(user: impl Into<String>, is_admin: bool) -> Self {
        Self {
            user: Some(user.into()),
            is_admin: Some(Value::Bool(is_admin)),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.is_admin, Some(Value::Bool(true)))
    }

    /// The username, if this session belongs to a logged-in administrator.
    pub fn admin_user(&self) -> Option<&str> {
        match self.user.as_deref() {
            Some(user) if self.is_admin() => Some(user),
            _ => None,
        }
    }
}

/// Storage for session state, addressed by an opaque token.
pub trait SessionStore: Send + Sync {
    /// Unknown, tampered or malformed tokens load as an empty session.
    fn load(&self, token: &str) -> SessionData;

    fn save(&self, data: &SessionData) -> Result<String, AppError>;

    fn clear(&self) -> Result<String, AppError> {
        self.save(&SessionData::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_admin_flag_is_strict() {
        let mut data = SessionData::authenticated("alice", true);
        assert_eq!(data.admin_user(), Some("alice"));

        for value in [json!("true"), json!(1), json!({"admin": true}), json!(false)] {
            data.is_admin = Some(value);
            assert!(!data.is_admin());
            assert_eq!(data.admin_user(), None);
        }
    }

    #[test]
    fn test_missing_user_is_not_admin() {
        let data = SessionData {
            user: None,
            is_admin: Some(Value::Bool(true)),
        };
        assert_eq!(data.admin_user(), None);
        assert_eq!(SessionData::default().admin_user(), None);
    }
}
