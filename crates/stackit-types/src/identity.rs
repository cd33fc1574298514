use serde::{Deserialize, Serialize};

use std::fmt;

/// Identifier of a user, as carried in the subject of a verified bearer token.
///
/// Opaque to this service: it is stored as the author of questions and
/// answers and compared for ownership checks, nothing more.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The authenticated caller of a request.
///
/// Produced only by the identity gate after a token has been verified, and
/// passed explicitly into every operation that needs to know who is asking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: UserId,
}

impl Caller {
    pub fn new(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }

    /// Whether this caller is the given user.
    pub fn is(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_serializes_transparently() {
        let id = UserId::from("64b7f0c2a1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"64b7f0c2a1\"");
    }

    #[test]
    fn test_caller_ownership() {
        let caller = Caller::new("u1");
        assert!(caller.is(&UserId::from("u1")));
        assert!(!caller.is(&UserId::from("u2")));
    }
}
