pub mod auth;
pub mod health;
pub mod tasks;
pub mod users;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(health::liveness)
        .service(auth::issue_token)
        .service(
            web::scope("/users")
                .service(users::list_users)
                .service(users::admin_status)
                .service(users::register_user)
                .service(users::promote_user)
                .service(users::delete_user),
        )
        .service(
            web::scope("/task")
                .service(tasks::list_tasks)
                .service(tasks::create_task)
                .service(tasks::get_task)
                .service(tasks::update_task)
                .service(tasks::delete_task),
        );
}
