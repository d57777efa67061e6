use crate::{
    auth::{AdminIdentity, BearerIdentity},
    error::AppError,
    models::{AdminStatus, NewUser, User, ADMIN_ROLE},
    state::AppState,
    store::Filter,
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use serde::Serialize;
use serde_json::json;
use validator::Validate;

/// No-op marker returned when a registration hits an existing email.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AlreadyRegistered {
    message: &'static str,
    inserted_id: Option<String>,
}

/// Lists every user record. Admin only.
///
/// ## Responses:
/// - `200 OK`: JSON array of user documents, stored fields included verbatim.
/// - `401 Unauthorized`: no or unverifiable bearer token.
/// - `403 Forbidden`: the caller's stored role is not `admin`.
#[get("")]
pub async fn list_users(
    state: web::Data<AppState>,
    _admin: AdminIdentity,
) -> Result<impl Responder, AppError> {
    let users = state.users.find().await?;
    Ok(HttpResponse::Ok().json(users))
}

/// Reports whether the given email belongs to an admin.
///
/// Callers may only query their own email: a cross-user check is rejected
/// with 403 no matter what role the caller holds. An unknown email reports
/// `{admin: false}`.
#[get("/admin/{email}")]
pub async fn admin_status(
    state: web::Data<AppState>,
    identity: BearerIdentity,
    email: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let email = email.into_inner();
    if email != identity.0.email {
        return Err(AppError::Forbidden("forbidden access".to_string()));
    }

    let user = state
        .users
        .find_one(&Filter::by_field("email", email.as_str()))
        .await?;
    let admin = match user {
        Some(doc) => serde_json::from_value::<User>(doc)?.is_admin(),
        None => false,
    };
    Ok(HttpResponse::Ok().json(AdminStatus { admin }))
}

/// Registers a user, keyed by email. Open to unauthenticated callers.
///
/// Re-registering an existing email is a no-op acknowledged with a null
/// insertedId and no duplicate record. A caller cannot grant itself a role
/// here; roles are only ever set through the promotion endpoint.
#[post("")]
pub async fn register_user(
    state: web::Data<AppState>,
    user: web::Json<NewUser>,
) -> Result<impl Responder, AppError> {
    user.validate()?;

    let existing = state
        .users
        .find_one(&Filter::by_field("email", user.email.as_str()))
        .await?;
    if existing.is_some() {
        return Ok(HttpResponse::Ok().json(AlreadyRegistered {
            message: "User already exists",
            inserted_id: None,
        }));
    }

    let mut doc = serde_json::to_value(&user.into_inner())?;
    if let Some(fields) = doc.as_object_mut() {
        fields.remove("role");
    }
    let ack = state.users.insert_one(doc).await?;
    Ok(HttpResponse::Ok().json(ack))
}

/// Promotes the user with the given id to admin. Admin only.
///
/// One-way: there is no demotion path. Re-promoting an admin matches the
/// record but modifies nothing.
#[patch("/admin/{id}")]
pub async fn promote_user(
    state: web::Data<AppState>,
    _admin: AdminIdentity,
    id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let ack = state
        .users
        .update_one(&Filter::by_id(&id), json!({ "role": ADMIN_ROLE }))
        .await?;
    Ok(HttpResponse::Ok().json(ack))
}

/// Deletes the user with the given id. Admin only.
///
/// A miss is acknowledged with a zero deletedCount, not an error.
#[delete("/{id}")]
pub async fn delete_user(
    state: web::Data<AppState>,
    _admin: AdminIdentity,
    id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let ack = state.users.delete_one(&Filter::by_id(&id)).await?;
    Ok(HttpResponse::Ok().json(ack))
}
