pub mod middleware;
pub mod token;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

// Re-export necessary items
pub use middleware::{AdminIdentity, BearerIdentity};
pub use token::{Claims, TokenSigner};

/// Identity payload posted to `POST /jwt`.
///
/// Only the email is required; any further fields are signed into the token
/// verbatim and never checked against the store.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct IssueTokenRequest {
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response body for `POST /jwt`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The signed access token for the posted identity.
    pub token: String,
}
