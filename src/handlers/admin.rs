// src/handlers/admin.rs
// DOCUMENTATION: Admin handlers for platform statistics and cache control
// PURPOSE: Operational endpoints behind the X-Admin-Token header

use crate::config::Config;
use crate::db::map_db_err;
use crate::errors::ApiError;
use crate::services::ResponseCache;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;

/// Response for the platform stats endpoint
#[derive(Debug, Serialize)]
pub struct PlatformStats {
    pub countries: i64,
    pub cities: i64,
    pub destinations: i64,
    pub hotel_cards: i64,
    pub hotel_rooms: i64,
    pub users: i64,
    /// Hotel cards added in the last 24 hours
    pub recent_hotel_cards: i64,
    pub average_star_rating: Option<f64>,
}

/// Helper to verify admin authentication
/// DOCUMENTATION: Checks X-Admin-Token header against configured admin token
fn verify_admin_token(req: &HttpRequest, config: &Config) -> Result<(), ApiError> {
    let token = req
        .headers()
        .get("X-Admin-Token")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            log::warn!("Admin request without token");
            ApiError::Unauthorized
        })?;

    if token != config.admin_token {
        log::warn!("Admin request with invalid token");
        return Err(ApiError::Forbidden);
    }

    Ok(())
}

/// GET /admin/stats
/// Entity counts and content quality indicators
pub async fn platform_stats(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
) -> Result<impl Responder, ApiError> {
    verify_admin_token(&req, &config)?;

    let counts: (i64, i64, i64, i64, i64, i64) = sqlx::query_as(
        r#"
        SELECT
            (SELECT COUNT(*) FROM countries),
            (SELECT COUNT(*) FROM cities),
            (SELECT COUNT(*) FROM destinations),
            (SELECT COUNT(*) FROM hotel_cards),
            (SELECT COUNT(*) FROM hotel_rooms),
            (SELECT COUNT(*) FROM users)
        "#,
    )
    .fetch_one(pool.get_ref())
    .await
    .map_err(map_db_err)?;

    let recent: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM hotel_cards WHERE created_at > NOW() - INTERVAL '24 hours'",
    )
    .fetch_one(pool.get_ref())
    .await
    .map_err(map_db_err)?;

    let avg_rating: (Option<f64>,) =
        sqlx::query_as("SELECT AVG(star_rating)::float8 FROM hotel_cards")
            .fetch_one(pool.get_ref())
            .await
            .map_err(map_db_err)?;

    let stats = PlatformStats {
        countries: counts.0,
        cities: counts.1,
        destinations: counts.2,
        hotel_cards: counts.3,
        hotel_rooms: counts.4,
        users: counts.5,
        recent_hotel_cards: recent.0,
        average_star_rating: avg_rating.0,
    };

    Ok(HttpResponse::Ok().json(stats))
}

/// GET /admin/cache/stats
pub async fn cache_stats(
    config: web::Data<Config>,
    cache: web::Data<Arc<ResponseCache>>,
    req: HttpRequest,
) -> Result<impl Responder, ApiError> {
    verify_admin_token(&req, &config)?;

    let stats = cache.stats().await;
    Ok(HttpResponse::Ok().json(stats))
}

/// POST /admin/cache/clear
pub async fn clear_cache(
    config: web::Data<Config>,
    cache: web::Data<Arc<ResponseCache>>,
    req: HttpRequest,
) -> Result<impl Responder, ApiError> {
    verify_admin_token(&req, &config)?;

    cache.clear().await;
    log::info!("Response cache cleared by admin request");

    Ok(HttpResponse::Ok().json(serde_json::json!({ "cleared": true })))
}

/// Configuration for admin routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/stats", web::get().to(platform_stats))
            .route("/cache/stats", web::get().to(cache_stats))
            .route("/cache/clear", web::post().to(clear_cache)),
    );
}
