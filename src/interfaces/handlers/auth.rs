use actix_web::{post, web, HttpRequest, HttpResponse, Responder, ResponseError};

use crate::entities::user::{LoginUser, NewUser};
use crate::errors::AppError;
use crate::limiter::rate_limiter::RateDecision;
use crate::utils::get_client_ip::get_client_ip;
use crate::AppState;

#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    user: web::Json<NewUser>
) -> impl Responder {
    match state.auth_handler.register(user.into_inner()).await {
        Ok(response) => HttpResponse::Created().json(response),
        Err(e) => e.to_http_response(),
    }
}

#[post("/login")]
pub async fn login(
    request: HttpRequest,
    state: web::Data<AppState>,
    user: web::Json<LoginUser>
) -> impl Responder {
    let client_ip = get_client_ip(&request, state.login_limiter.trusts_forwarded_for());

    if let RateDecision::Limited { retry_after_secs } = state.login_limiter.check(&client_ip) {
        tracing::warn!(client_ip = %client_ip, retry_after_secs, "Login rate limit exceeded");
        return AppError::RateLimited { retry_after_secs }.to_http_response();
    }

    match state.auth_handler.login(user.into_inner()).await {
        Ok(auth_response) => HttpResponse::Ok().json(auth_response),
        Err(e) => e.error_response(),
    }
}
