use actix_web::web;

use crate::constants::API_PREFIX;
use crate::handlers::{home::home, json_error::not_found};

mod auth;
mod json_error;
mod system;
mod user;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.service(
        web::scope(API_PREFIX)
            .configure(auth::config_routes)
            .configure(system::config_routes)
            .configure(user::config_routes)
    );

    cfg.configure(json_error::config_routes);
    cfg.default_service(web::to(not_found));
}
