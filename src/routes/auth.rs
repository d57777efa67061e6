use crate::{
    auth::{IssueTokenRequest, TokenResponse},
    error::AppError,
    state::AppState,
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Issues a signed access token for the posted identity payload.
///
/// The payload is signed exactly as supplied (typically an email plus
/// whatever else the frontend session carries) and is not checked against
/// the store. Tokens expire two hours after issuance.
///
/// ## Responses:
/// - `200 OK`: `{token}`.
/// - `400 Bad Request`: the email field is missing or empty.
#[post("/jwt")]
pub async fn issue_token(
    state: web::Data<AppState>,
    identity: web::Json<IssueTokenRequest>,
) -> Result<impl Responder, AppError> {
    identity.validate()?;

    let token = state.tokens.issue(&identity.email, identity.extra.clone())?;
    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}
