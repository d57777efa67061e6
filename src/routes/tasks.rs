use crate::{
    auth::BearerIdentity,
    error::AppError,
    models::{NewTask, TaskUpdate},
    state::AppState,
    store::Filter,
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

/// Retrieves every task record. Public: no token is required for reads.
///
/// ## Responses:
/// - `200 OK`: JSON array of task documents in insertion order.
#[get("")]
pub async fn list_tasks(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let tasks = state.tasks.find().await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Fetches one task by id. Public.
///
/// A lookup miss is not an error: the store's empty result propagates
/// verbatim as a 200 with a null body.
#[get("/{id}")]
pub async fn get_task(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let task = state.tasks.find_one(&Filter::by_id(&id)).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Creates a task from the posted fields. Any verified caller may create;
/// tasks carry no owner, so the identity is only a gate.
///
/// ## Responses:
/// - `200 OK`: insert acknowledgement with the new insertedId.
/// - `400 Bad Request`: one of the four modeled fields is missing.
/// - `401 Unauthorized`: no or unverifiable bearer token.
#[post("")]
pub async fn create_task(
    state: web::Data<AppState>,
    _identity: BearerIdentity,
    task: web::Json<NewTask>,
) -> Result<impl Responder, AppError> {
    task.validate()?;

    let ack = state
        .tasks
        .insert_one(serde_json::to_value(&task.into_inner())?)
        .await?;
    Ok(HttpResponse::Ok().json(ack))
}

/// Replaces the four mutable fields of a task. Any verified caller.
///
/// All four fields are always written: a field omitted from the body
/// overwrites the stored value with null. Partial bodies are not merged.
#[patch("/{id}")]
pub async fn update_task(
    state: web::Data<AppState>,
    _identity: BearerIdentity,
    id: web::Path<String>,
    update: web::Json<TaskUpdate>,
) -> Result<impl Responder, AppError> {
    let TaskUpdate {
        title,
        deadline,
        priority,
        description,
    } = update.into_inner();
    let fields = json!({
        "title": title,
        "deadline": deadline,
        "priority": priority,
        "description": description,
    });

    let ack = state.tasks.update_one(&Filter::by_id(&id), fields).await?;
    Ok(HttpResponse::Ok().json(ack))
}

/// Deletes one task by id. Any verified caller.
///
/// A miss is acknowledged with a zero deletedCount, not an error.
#[delete("/{id}")]
pub async fn delete_task(
    state: web::Data<AppState>,
    _identity: BearerIdentity,
    id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let ack = state.tasks.delete_one(&Filter::by_id(&id)).await?;
    Ok(HttpResponse::Ok().json(ack))
}
