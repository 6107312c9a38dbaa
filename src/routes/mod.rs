pub mod auth;
pub mod health;
pub mod lists;
pub mod tasks;
pub mod users;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::register)
            .service(auth::login)
            .service(auth::logout)
            .service(auth::profile),
    )
    .service(
        web::scope("/users")
            .service(users::get_user)
            .service(users::update_user),
    )
    .service(
        web::scope("/tasks")
            .service(tasks::get_tasks)
            .service(tasks::create_task)
            .service(tasks::update_task)
            .service(tasks::update_task_status)
            .service(tasks::delete_task),
    )
    .service(
        web::scope("/lists")
            .service(lists::get_lists)
            .service(lists::create_list)
            .service(lists::get_list_tasks),
    );
}
