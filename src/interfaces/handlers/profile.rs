use actix_web::{web, HttpResponse, Responder, ResponseError};
use uuid::Uuid;

use crate::{
    entities::{
        achievement::{AchievementsResponse, NewAchievement},
        availability::UpdateAvailability,
        education::NewEducation,
        experience::NewExperience,
        portfolio::NewPortfolioItem,
        skill::{EndorseSkill, NewSkill, SkillsResponse},
    },
    errors::AppError,
    repositories::user::UserRepository,
    use_cases::extractors::AuthClaims,
    AppState,
};

/// Unwraps the caller's access or returns the auth error response.
macro_rules! access_or_respond {
    ($access:expr) => {
        match $access {
            Ok(access) => access,
            Err(e) => return e.error_response(),
        }
    };
}

pub async fn get_profile(
    _claims: AuthClaims,
    state: web::Data<AppState>,
    user_id: web::Path<Uuid>,
) -> impl Responder {
    let owner = user_id.into_inner();

    match state.auth_handler.user_repo.user_exists(&owner).await {
        Ok(true) => {}
        Ok(false) => return AppError::NotFound("User not found".to_string()).to_http_response(),
        Err(e) => return e.to_http_response(),
    }

    match state.profile_handler.get_profile(owner).await {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(e) => e.to_http_response(),
    }
}

pub async fn add_skill(
    claims: AuthClaims,
    state: web::Data<AppState>,
    body: web::Json<NewSkill>,
) -> impl Responder {
    let access = access_or_respond!(claims.own_profile());

    match state.profile_handler.add_skill(&access, body.into_inner()).await {
        Ok(skills) => HttpResponse::Created().json(SkillsResponse { skills }),
        Err(e) => e.to_http_response(),
    }
}

pub async fn delete_skill(
    claims: AuthClaims,
    state: web::Data<AppState>,
    skill_id: web::Path<Uuid>,
) -> impl Responder {
    let access = access_or_respond!(claims.own_profile());

    match state.profile_handler.delete_skill(&access, skill_id.into_inner()).await {
        Ok(skills) => HttpResponse::Ok().json(SkillsResponse { skills }),
        Err(e) => e.to_http_response(),
    }
}

pub async fn endorse_skill(
    claims: AuthClaims,
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
    body: Option<web::Json<EndorseSkill>>,
) -> impl Responder {
    let (owner, skill_id) = path.into_inner();
    let access = access_or_respond!(claims.access_to(owner));
    let request = body.map(web::Json::into_inner).unwrap_or_default();

    match state.profile_handler.endorse_skill(&access, skill_id, request).await {
        Ok(skill) => HttpResponse::Ok().json(skill),
        Err(e) => e.to_http_response(),
    }
}

pub async fn add_achievement(
    claims: AuthClaims,
    state: web::Data<AppState>,
    body: web::Json<NewAchievement>,
) -> impl Responder {
    let access = access_or_respond!(claims.own_profile());

    match state.profile_handler.add_achievement(&access, body.into_inner()).await {
        Ok(achievements) => HttpResponse::Created().json(AchievementsResponse { achievements }),
        Err(e) => e.to_http_response(),
    }
}

pub async fn delete_achievement(
    claims: AuthClaims,
    state: web::Data<AppState>,
    achievement_id: web::Path<Uuid>,
) -> impl Responder {
    let access = access_or_respond!(claims.own_profile());

    match state.profile_handler.delete_achievement(&access, achievement_id.into_inner()).await {
        Ok(achievements) => HttpResponse::Ok().json(AchievementsResponse { achievements }),
        Err(e) => e.to_http_response(),
    }
}

pub async fn add_experience(
    claims: AuthClaims,
    state: web::Data<AppState>,
    body: web::Json<NewExperience>,
) -> impl Responder {
    let access = access_or_respond!(claims.own_profile());

    match state.profile_handler.add_experience(&access, body.into_inner()).await {
        Ok(experience) => HttpResponse::Created().json(experience),
        Err(e) => e.to_http_response(),
    }
}

pub async fn add_education(
    claims: AuthClaims,
    state: web::Data<AppState>,
    body: web::Json<NewEducation>,
) -> impl Responder {
    let access = access_or_respond!(claims.own_profile());

    match state.profile_handler.add_education(&access, body.into_inner()).await {
        Ok(education) => HttpResponse::Created().json(education),
        Err(e) => e.to_http_response(),
    }
}

pub async fn add_portfolio_item(
    claims: AuthClaims,
    state: web::Data<AppState>,
    body: web::Json<NewPortfolioItem>,
) -> impl Responder {
    let access = access_or_respond!(claims.own_profile());

    match state.profile_handler.add_portfolio_item(&access, body.into_inner()).await {
        Ok(item) => HttpResponse::Created().json(item),
        Err(e) => e.to_http_response(),
    }
}

pub async fn update_availability(
    claims: AuthClaims,
    state: web::Data<AppState>,
    body: web::Json<UpdateAvailability>,
) -> impl Responder {
    let access = access_or_respond!(claims.own_profile());

    match state.profile_handler.update_availability(&access, body.into_inner()).await {
        Ok(availability) => HttpResponse::Ok().json(availability),
        Err(e) => e.to_http_response(),
    }
}
