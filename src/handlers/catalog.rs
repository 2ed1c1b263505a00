// src/handlers/catalog.rs
// DOCUMENTATION: HTTP handlers for amenities, labels and highlights

use crate::db::CatalogRepository;
use crate::errors::ApiError;
use crate::models::*;
use crate::services::{PublicService, ResponseCache};
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

// ---- Amenities ----

/// GET /api/hotel-amenity
pub async fn list_amenities(
    pool: web::Data<PgPool>,
    query: web::Query<AmenityListQuery>,
) -> Result<impl Responder, ApiError> {
    let amenities = CatalogRepository::list_amenities(pool.get_ref(), &query).await?;
    Ok(HttpResponse::Ok().json(amenities))
}

/// GET /api/hotel-amenity/{id}
pub async fn get_amenity(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let amenity = CatalogRepository::get_amenity(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(amenity))
}

/// POST /api/hotel-amenity
pub async fn create_amenity(
    pool: web::Data<PgPool>,
    req: web::Json<CreateAmenityRequest>,
) -> Result<impl Responder, ApiError> {
    req.validate_fields()?;
    let amenity = CatalogRepository::create_amenity(pool.get_ref(), &req).await?;
    Ok(HttpResponse::Created().json(amenity))
}

/// PUT /api/hotel-amenity/{id}
/// Amenity data appears in cached public payloads of every linked hotel, so
/// edits drop the whole public cache
pub async fn update_amenity(
    pool: web::Data<PgPool>,
    cache: web::Data<Arc<ResponseCache>>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateAmenityRequest>,
) -> Result<impl Responder, ApiError> {
    req.validate_fields()?;
    let amenity = CatalogRepository::update_amenity(pool.get_ref(), path.into_inner(), &req).await?;
    cache.invalidate_prefix("public:hotel:").await;
    Ok(HttpResponse::Ok().json(amenity))
}

/// DELETE /api/hotel-amenity/{id}
pub async fn delete_amenity(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    CatalogRepository::delete_amenity(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "deleted": true })))
}

// ---- Labels ----

/// GET /api/label
pub async fn list_labels(
    pool: web::Data<PgPool>,
    query: web::Query<NameFilterQuery>,
) -> Result<impl Responder, ApiError> {
    let labels = CatalogRepository::list_labels(pool.get_ref(), query.name.as_deref()).await?;
    Ok(HttpResponse::Ok().json(labels))
}

/// GET /api/label/{id}
pub async fn get_label(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let label = CatalogRepository::get_label(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(label))
}

/// POST /api/label
pub async fn create_label(
    pool: web::Data<PgPool>,
    req: web::Json<CreateLabelRequest>,
) -> Result<impl Responder, ApiError> {
    req.validate_fields()?;
    let label = CatalogRepository::create_label(pool.get_ref(), &req).await?;
    Ok(HttpResponse::Created().json(label))
}

/// PUT /api/label/{id}
pub async fn update_label(
    pool: web::Data<PgPool>,
    cache: web::Data<Arc<ResponseCache>>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateLabelRequest>,
) -> Result<impl Responder, ApiError> {
    req.validate_fields()?;
    let label = CatalogRepository::update_label(pool.get_ref(), path.into_inner(), &req).await?;
    cache.invalidate_prefix("public:hotel:").await;
    Ok(HttpResponse::Ok().json(label))
}

/// DELETE /api/label/{id}
pub async fn delete_label(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    CatalogRepository::delete_label(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "deleted": true })))
}

// ---- Highlights ----

/// GET /api/hotel-highlight
pub async fn list_highlights(
    pool: web::Data<PgPool>,
    query: web::Query<HighlightListQuery>,
) -> Result<impl Responder, ApiError> {
    let highlights = CatalogRepository::list_highlights(pool.get_ref(), &query).await?;
    Ok(HttpResponse::Ok().json(highlights))
}

/// GET /api/hotel-highlight/{id}
pub async fn get_highlight(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let highlight = CatalogRepository::get_highlight(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(highlight))
}

/// POST /api/hotel-highlight
pub async fn create_highlight(
    pool: web::Data<PgPool>,
    cache: web::Data<Arc<ResponseCache>>,
    req: web::Json<CreateHighlightRequest>,
) -> Result<impl Responder, ApiError> {
    req.validate_fields()?;
    let highlight = CatalogRepository::create_highlight(pool.get_ref(), &req).await?;
    PublicService::invalidate_hotel(cache.get_ref(), highlight.hotel_card_id).await;
    Ok(HttpResponse::Created().json(highlight))
}

/// PUT /api/hotel-highlight/{id}
pub async fn update_highlight(
    pool: web::Data<PgPool>,
    cache: web::Data<Arc<ResponseCache>>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateHighlightRequest>,
) -> Result<impl Responder, ApiError> {
    req.validate_fields()?;
    let highlight =
        CatalogRepository::update_highlight(pool.get_ref(), path.into_inner(), &req).await?;
    PublicService::invalidate_hotel(cache.get_ref(), highlight.hotel_card_id).await;
    Ok(HttpResponse::Ok().json(highlight))
}

/// DELETE /api/hotel-highlight/{id}
pub async fn delete_highlight(
    pool: web::Data<PgPool>,
    cache: web::Data<Arc<ResponseCache>>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let id = path.into_inner();
    let highlight = CatalogRepository::get_highlight(pool.get_ref(), id).await?;
    CatalogRepository::delete_highlight(pool.get_ref(), id).await?;
    PublicService::invalidate_hotel(cache.get_ref(), highlight.hotel_card_id).await;
    Ok(HttpResponse::Ok().json(json!({ "deleted": true })))
}

/// Configuration for catalog routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/hotel-amenity")
            .route("", web::get().to(list_amenities))
            .route("", web::post().to(create_amenity))
            .route("/{id}", web::get().to(get_amenity))
            .route("/{id}", web::put().to(update_amenity))
            .route("/{id}", web::delete().to(delete_amenity)),
    );
    cfg.service(
        web::scope("/api/label")
            .route("", web::get().to(list_labels))
            .route("", web::post().to(create_label))
            .route("/{id}", web::get().to(get_label))
            .route("/{id}", web::put().to(update_label))
            .route("/{id}", web::delete().to(delete_label)),
    );
    cfg.service(
        web::scope("/api/hotel-highlight")
            .route("", web::get().to(list_highlights))
            .route("", web::post().to(create_highlight))
            .route("/{id}", web::get().to(get_highlight))
            .route("/{id}", web::put().to(update_highlight))
            .route("/{id}", web::delete().to(delete_highlight)),
    );
}
