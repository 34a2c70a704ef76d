use actix_web::web;

use crate::handlers::profile;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/user")
            .route("/skills", web::post().to(profile::add_skill))
            .route("/skills/{skill_id}", web::delete().to(profile::delete_skill))
            .route("/achievements", web::post().to(profile::add_achievement))
            .route("/achievements/{achievement_id}", web::delete().to(profile::delete_achievement))
            .route("/experience", web::post().to(profile::add_experience))
            .route("/education", web::post().to(profile::add_education))
            .route("/portfolio", web::post().to(profile::add_portfolio_item))
            .route("/availability", web::patch().to(profile::update_availability))
            .route("/{user_id}/profile", web::get().to(profile::get_profile))
            .route("/{user_id}/skills/{skill_id}/endorse", web::post().to(profile::endorse_skill))
    );
}
