use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

/// The role value that unlocks administrative operations.
pub const ADMIN_ROLE: &str = "admin";

/// A stored user record.
///
/// `role` stays a free-form optional string rather than a closed enum: the
/// only value with meaning is `"admin"`, and a record with no role field or
/// any other value is an ordinary member. Stored documents may carry further
/// registration fields; they are ignored here and preserved in the store.
#[derive(Debug, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl User {
    /// The stored role is the sole gate for admin-only operations.
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(ADMIN_ROLE)
    }
}

/// Registration payload. The email keys the idempotency check; any other
/// fields the caller sends are stored verbatim.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response body for the self-service admin check.
#[derive(Debug, Serialize, Deserialize)]
pub struct AdminStatus {
    pub admin: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_only_the_admin_role_counts() {
        let mut user = User {
            id: "u1".to_string(),
            email: "a@example.com".to_string(),
            role: None,
        };
        assert!(!user.is_admin());

        user.role = Some("moderator".to_string());
        assert!(!user.is_admin());

        user.role = Some("admin".to_string());
        assert!(user.is_admin());
    }

    #[test]
    fn test_user_tolerates_extra_document_fields() {
        let user: User = serde_json::from_value(json!({
            "id": "u1",
            "email": "a@example.com",
            "name": "Ada",
            "photo": "https://example.com/ada.png"
        }))
        .unwrap();
        assert_eq!(user.email, "a@example.com");
        assert!(user.role.is_none());
    }

    #[test]
    fn test_new_user_keeps_extra_fields() {
        let new_user: NewUser = serde_json::from_value(json!({
            "email": "a@example.com",
            "name": "Ada"
        }))
        .unwrap();
        assert_eq!(new_user.email, "a@example.com");
        assert_eq!(new_user.extra.get("name"), Some(&json!("Ada")));

        let doc = serde_json::to_value(&new_user).unwrap();
        assert_eq!(doc["name"], "Ada");
    }

    #[test]
    fn test_new_user_presence_check() {
        let valid = NewUser {
            email: "a@example.com".to_string(),
            extra: Map::new(),
        };
        assert!(valid.validate().is_ok());

        let empty_email = NewUser {
            email: "".to_string(),
            extra: Map::new(),
        };
        assert!(empty_email.validate().is_err());
    }
}
