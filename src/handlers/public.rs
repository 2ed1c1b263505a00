// src/handlers/public.rs
// DOCUMENTATION: Public-site read endpoint
// PURPOSE: Serve the aggregated hotel payload from the response cache

use crate::config::Config;
use crate::errors::ApiError;
use crate::models::{PublicHotelQuery, PublicInclude};
use crate::services::{PublicService, ResponseCache};
use actix_web::{web, HttpResponse, Responder};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// GET /api/public/hotels/{id}
/// ?include=basic (default) or all. Responses are cached per hotel and
/// depth; concurrent misses share one database fetch
pub async fn get_public_hotel(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    cache: web::Data<Arc<ResponseCache>>,
    path: web::Path<Uuid>,
    query: web::Query<PublicHotelQuery>,
) -> Result<impl Responder, ApiError> {
    let hotel_id = path.into_inner();
    let include = PublicInclude::parse(query.include.as_deref())?;

    let key = include.cache_key(hotel_id);
    let ttl = cache.default_ttl();
    let pool = pool.get_ref();

    let body = cache
        .get_or_fetch(&key, ttl, || async move {
            PublicService::build_hotel_payload(pool, hotel_id, include).await
        })
        .await?;

    Ok(HttpResponse::Ok()
        .insert_header((
            "Cache-Control",
            format!("public, max-age={}", config.public_cache_ttl),
        ))
        .content_type("application/json")
        .body(body))
}

/// Configuration for public routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/public").route("/hotels/{id}", web::get().to(get_public_hotel)),
    );
}
