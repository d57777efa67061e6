use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AppError;

/// Tokens expire a fixed two hours after issuance.
const TOKEN_TTL_HOURS: i64 = 2;

/// Claims carried by an access token: the identity payload supplied at
/// issuance plus the expiry timestamp.
///
/// Whatever the caller put in the payload is signed verbatim, including a
/// `role` field if one was present. A token-embedded role is never consulted
/// for authorization; only the live store read in the role authorizer is.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub email: String,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
    /// Any further identity fields supplied at issuance.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Signs and verifies access tokens with the process-wide secret.
///
/// Constructed once at startup from `Config` and injected into handlers and
/// middleware through `AppState`; nothing reads the secret ambiently.
#[derive(Clone)]
pub struct TokenSigner {
    secret: String,
}

impl TokenSigner {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    /// Issues a token encoding exactly the supplied identity fields.
    ///
    /// The payload is not checked against the store; issuance is pure token
    /// construction with no side effects.
    pub fn issue(&self, email: &str, extra: Map<String, Value>) -> Result<String, AppError> {
        let expiration = Utc::now()
            .checked_add_signed(Duration::hours(TOKEN_TTL_HOURS))
            .expect("valid timestamp")
            .timestamp() as usize;

        let claims = Claims {
            email: email.to_string(),
            exp: expiration,
            extra,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::InternalServerError(format!("Failed to sign token: {}", e)))
    }

    /// Verifies signature and expiry, returning the decoded claims.
    ///
    /// Any failure (malformed token, bad signature, expired) maps to the
    /// invalid-token outcome: 401 with the `forbidden access` message.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| AppError::Unauthorized("forbidden access".to_string()))
    }
}
