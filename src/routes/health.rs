use actix_web::{get, HttpResponse, Responder};

/// Liveness probe.
///
/// Returns a plain string so deployment checks can poll the root path.
#[get("/")]
pub async fn liveness() -> impl Responder {
    HttpResponse::Ok().body("server running")
}
