//! The request-authorization pipeline.
//!
//! The two gates are modeled as `FromRequest` stages returning
//! `Result<_, AppError>`, short-circuiting on the first failure:
//!
//! * [`BearerIdentity`] verifies the bearer token from the
//!   `Authorization` header and yields the decoded claims. Stateless; the
//!   store is never consulted.
//! * [`AdminIdentity`] runs the same verification, then re-reads the
//!   caller's user record and requires the stored role to be `admin` at
//!   this moment. A role embedded in the token is never trusted.
//!
//! A handler opts into a gate by taking it as a parameter; routes without
//! one stay public.

use actix_web::dev::Payload;
use actix_web::{web, Error as ActixError, FromRequest, HttpRequest};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::token::Claims;
use crate::error::AppError;
use crate::models::User;
use crate::state::AppState;
use crate::store::Filter;

fn app_state(req: &HttpRequest) -> Result<web::Data<AppState>, AppError> {
    req.app_data::<web::Data<AppState>>()
        .cloned()
        .ok_or_else(|| AppError::InternalServerError("AppState is not configured".to_string()))
}

/// Runs the token-verification stage against a request.
///
/// A missing header is the unauthenticated outcome; a header that is
/// present but does not carry a verifiable token (wrong scheme, garbage,
/// bad signature, expired) is the invalid-token outcome.
fn bearer_claims(req: &HttpRequest) -> Result<Claims, AppError> {
    let state = app_state(req)?;
    let header = req
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("unauthorized access".to_string()))?;

    // The token is whatever follows the scheme word; a garbled header fails
    // verification rather than the presence check.
    let token = header.split_whitespace().nth(1).unwrap_or_default();
    state.tokens.verify(token)
}

/// Verified identity decoded from the request's bearer token.
#[derive(Debug, Clone)]
pub struct BearerIdentity(pub Claims);

impl FromRequest for BearerIdentity {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(bearer_claims(req).map(BearerIdentity).map_err(Into::into))
    }
}

/// Verified identity whose user record currently holds the admin role.
///
/// Every admin check is a point-in-time read of the store: no caching, so a
/// promotion takes effect on the caller's very next request with the same
/// token.
#[derive(Debug, Clone)]
pub struct AdminIdentity(pub Claims);

impl FromRequest for AdminIdentity {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = bearer_claims(req);
        let state = app_state(req);
        Box::pin(async move {
            let claims = claims?;
            let state = state?;
            let user = state
                .users
                .find_one(&Filter::by_field("email", claims.email.as_str()))
                .await
                .map_err(AppError::from)?;
            let is_admin = user
                .map(serde_json::from_value::<User>)
                .transpose()
                .map_err(AppError::from)?
                .map_or(false, |user| user.is_admin());
            if is_admin {
                Ok(AdminIdentity(claims))
            } else {
                Err(AppError::Forbidden("forbidden access".to_string()).into())
            }
        })
    }
}
