use actix_web::web;

use crate::types::error::AppError;

pub mod health;
pub mod pull_request;
pub mod statistics;
pub mod team;
pub mod users;

/// Registers every route plus extractor configs that turn malformed JSON or
/// query strings into `INVALID_REQUEST` bodies.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    );
    cfg.app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    );

    cfg.service(web::scope("/health").service(health::health));
    cfg.service(
        web::scope("/team")
            .service(team::add::add_team)
            .service(team::get::get_team),
    );
    cfg.service(
        web::scope("/users")
            .service(users::set_is_active::set_is_active)
            .service(users::get_review::get_review),
    );
    cfg.service(
        web::scope("/pullRequest")
            .service(pull_request::create::create_pr)
            .service(pull_request::merge::merge_pr)
            .service(pull_request::reassign::reassign),
    );
    cfg.service(web::scope("/statistics").service(statistics::statistics));
}
