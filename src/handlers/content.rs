// src/handlers/content.rs
// DOCUMENTATION: HTTP handlers for FAQs and booking policies
// PURPOSE: Includes the one paginated listing in the API (admin FAQ table)

use crate::db::ContentRepository;
use crate::errors::ApiError;
use crate::models::*;
use crate::services::{PublicService, ResponseCache};
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

// ---- FAQs ----

/// GET /api/hotel-faq
/// Paginated: ?page=&limit= with derived page metadata in the response
pub async fn list_faqs(
    pool: web::Data<PgPool>,
    query: web::Query<FaqListQuery>,
) -> Result<impl Responder, ApiError> {
    let query = query.into_inner();
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(20).clamp(1, 100);

    let (faqs, total_count) = ContentRepository::list_faqs(pool.get_ref(), &query).await?;

    Ok(HttpResponse::Ok().json(FaqListResponse::new(faqs, total_count, page, limit)))
}

/// GET /api/hotel-faq/{id}
pub async fn get_faq(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let faq = ContentRepository::get_faq(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(faq))
}

/// POST /api/hotel-faq
pub async fn create_faq(
    pool: web::Data<PgPool>,
    cache: web::Data<Arc<ResponseCache>>,
    req: web::Json<CreateFaqRequest>,
) -> Result<impl Responder, ApiError> {
    req.validate_fields()?;
    let faq = ContentRepository::create_faq(pool.get_ref(), &req).await?;
    PublicService::invalidate_hotel(cache.get_ref(), faq.hotel_card_id).await;
    Ok(HttpResponse::Created().json(faq))
}

/// PUT /api/hotel-faq/{id}
pub async fn update_faq(
    pool: web::Data<PgPool>,
    cache: web::Data<Arc<ResponseCache>>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateFaqRequest>,
) -> Result<impl Responder, ApiError> {
    req.validate_fields()?;
    let faq = ContentRepository::update_faq(pool.get_ref(), path.into_inner(), &req).await?;
    PublicService::invalidate_hotel(cache.get_ref(), faq.hotel_card_id).await;
    Ok(HttpResponse::Ok().json(faq))
}

/// DELETE /api/hotel-faq/{id}
pub async fn delete_faq(
    pool: web::Data<PgPool>,
    cache: web::Data<Arc<ResponseCache>>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let id = path.into_inner();
    let faq = ContentRepository::get_faq(pool.get_ref(), id).await?;
    ContentRepository::delete_faq(pool.get_ref(), id).await?;
    PublicService::invalidate_hotel(cache.get_ref(), faq.hotel_card_id).await;
    Ok(HttpResponse::Ok().json(json!({ "deleted": true })))
}

// ---- Policies ----

/// GET /api/hotel-policy
pub async fn list_policies(
    pool: web::Data<PgPool>,
    query: web::Query<PolicyListQuery>,
) -> Result<impl Responder, ApiError> {
    let policies = ContentRepository::list_policies(pool.get_ref(), &query).await?;
    Ok(HttpResponse::Ok().json(policies))
}

/// GET /api/hotel-policy/{id}
pub async fn get_policy(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let policy = ContentRepository::get_policy(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(policy))
}

/// POST /api/hotel-policy
pub async fn create_policy(
    pool: web::Data<PgPool>,
    cache: web::Data<Arc<ResponseCache>>,
    req: web::Json<CreatePolicyRequest>,
) -> Result<impl Responder, ApiError> {
    req.validate_fields()?;
    let policy = ContentRepository::create_policy(pool.get_ref(), &req).await?;
    PublicService::invalidate_hotel(cache.get_ref(), policy.hotel_card_id).await;
    Ok(HttpResponse::Created().json(policy))
}

/// PUT /api/hotel-policy/{id}
pub async fn update_policy(
    pool: web::Data<PgPool>,
    cache: web::Data<Arc<ResponseCache>>,
    path: web::Path<Uuid>,
    req: web::Json<UpdatePolicyRequest>,
) -> Result<impl Responder, ApiError> {
    req.validate_fields()?;
    let policy = ContentRepository::update_policy(pool.get_ref(), path.into_inner(), &req).await?;
    PublicService::invalidate_hotel(cache.get_ref(), policy.hotel_card_id).await;
    Ok(HttpResponse::Ok().json(policy))
}

/// DELETE /api/hotel-policy/{id}
pub async fn delete_policy(
    pool: web::Data<PgPool>,
    cache: web::Data<Arc<ResponseCache>>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let id = path.into_inner();
    let policy = ContentRepository::get_policy(pool.get_ref(), id).await?;
    ContentRepository::delete_policy(pool.get_ref(), id).await?;
    PublicService::invalidate_hotel(cache.get_ref(), policy.hotel_card_id).await;
    Ok(HttpResponse::Ok().json(json!({ "deleted": true })))
}

/// Configuration for content routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/hotel-faq")
            .route("", web::get().to(list_faqs))
            .route("", web::post().to(create_faq))
            .route("/{id}", web::get().to(get_faq))
            .route("/{id}", web::put().to(update_faq))
            .route("/{id}", web::delete().to(delete_faq)),
    );
    cfg.service(
        web::scope("/api/hotel-policy")
            .route("", web::get().to(list_policies))
            .route("", web::post().to(create_policy))
            .route("/{id}", web::get().to(get_policy))
            .route("/{id}", web::put().to(update_policy))
            .route("/{id}", web::delete().to(delete_policy)),
    );
}
