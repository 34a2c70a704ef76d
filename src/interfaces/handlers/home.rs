use actix_web::{get, HttpResponse, Responder};

use crate::constants::API_PREFIX;

#[get("/")]
pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Profile Hub API",
        "status": "Ok",
        "version": env!("CARGO_PKG_VERSION"),
        "api": API_PREFIX,
        "health": format!("{}/health", API_PREFIX)
    }))
}
