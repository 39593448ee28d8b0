pub mod health;
pub mod projects;
pub mod users;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .service(users::register)
            .service(users::login)
            .service(users::me)
            .service(users::my_contributions),
    )
    .service(
        web::scope("/projects")
            .service(projects::create_project)
            .service(projects::get_projects)
            .service(projects::get_project)
            .service(projects::create_contribution)
            .service(projects::get_contributions),
    );
}
