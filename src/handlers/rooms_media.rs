// src/handlers/rooms_media.rs
// DOCUMENTATION: HTTP handlers for hotel rooms and gallery images

use crate::db::RoomMediaRepository;
use crate::errors::ApiError;
use crate::models::*;
use crate::services::{PublicService, ResponseCache};
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

// ---- Rooms ----

/// GET /api/hotel-room
pub async fn list_rooms(
    pool: web::Data<PgPool>,
    query: web::Query<RoomListQuery>,
) -> Result<impl Responder, ApiError> {
    query.validate_fields()?;
    let rooms = RoomMediaRepository::list_rooms(pool.get_ref(), &query).await?;
    Ok(HttpResponse::Ok().json(rooms))
}

/// GET /api/hotel-room/{id}
pub async fn get_room(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let room = RoomMediaRepository::get_room(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(room))
}

/// POST /api/hotel-room
pub async fn create_room(
    pool: web::Data<PgPool>,
    cache: web::Data<Arc<ResponseCache>>,
    req: web::Json<CreateRoomRequest>,
) -> Result<impl Responder, ApiError> {
    req.validate_fields()?;
    let room = RoomMediaRepository::create_room(pool.get_ref(), &req).await?;
    PublicService::invalidate_hotel(cache.get_ref(), room.hotel_card_id).await;
    Ok(HttpResponse::Created().json(room))
}

/// PUT /api/hotel-room/{id}
pub async fn update_room(
    pool: web::Data<PgPool>,
    cache: web::Data<Arc<ResponseCache>>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateRoomRequest>,
) -> Result<impl Responder, ApiError> {
    req.validate_fields()?;
    let room = RoomMediaRepository::update_room(pool.get_ref(), path.into_inner(), &req).await?;
    PublicService::invalidate_hotel(cache.get_ref(), room.hotel_card_id).await;
    Ok(HttpResponse::Ok().json(room))
}

/// DELETE /api/hotel-room/{id}
pub async fn delete_room(
    pool: web::Data<PgPool>,
    cache: web::Data<Arc<ResponseCache>>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let id = path.into_inner();
    let room = RoomMediaRepository::get_room(pool.get_ref(), id).await?;
    RoomMediaRepository::delete_room(pool.get_ref(), id).await?;
    PublicService::invalidate_hotel(cache.get_ref(), room.hotel_card_id).await;
    Ok(HttpResponse::Ok().json(json!({ "deleted": true })))
}

// ---- Images ----

/// GET /api/hotel-image
pub async fn list_images(
    pool: web::Data<PgPool>,
    query: web::Query<ImageListQuery>,
) -> Result<impl Responder, ApiError> {
    let images = RoomMediaRepository::list_images(pool.get_ref(), &query).await?;
    Ok(HttpResponse::Ok().json(images))
}

/// GET /api/hotel-image/{id}
pub async fn get_image(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let image = RoomMediaRepository::get_image(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(image))
}

/// POST /api/hotel-image
pub async fn create_image(
    pool: web::Data<PgPool>,
    cache: web::Data<Arc<ResponseCache>>,
    req: web::Json<CreateImageRequest>,
) -> Result<impl Responder, ApiError> {
    req.validate_fields()?;
    let image = RoomMediaRepository::create_image(pool.get_ref(), &req).await?;
    PublicService::invalidate_hotel(cache.get_ref(), image.hotel_card_id).await;
    Ok(HttpResponse::Created().json(image))
}

/// PUT /api/hotel-image/{id}
pub async fn update_image(
    pool: web::Data<PgPool>,
    cache: web::Data<Arc<ResponseCache>>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateImageRequest>,
) -> Result<impl Responder, ApiError> {
    req.validate_fields()?;
    let image = RoomMediaRepository::update_image(pool.get_ref(), path.into_inner(), &req).await?;
    PublicService::invalidate_hotel(cache.get_ref(), image.hotel_card_id).await;
    Ok(HttpResponse::Ok().json(image))
}

/// DELETE /api/hotel-image/{id}
pub async fn delete_image(
    pool: web::Data<PgPool>,
    cache: web::Data<Arc<ResponseCache>>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let id = path.into_inner();
    let image = RoomMediaRepository::get_image(pool.get_ref(), id).await?;
    RoomMediaRepository::delete_image(pool.get_ref(), id).await?;
    PublicService::invalidate_hotel(cache.get_ref(), image.hotel_card_id).await;
    Ok(HttpResponse::Ok().json(json!({ "deleted": true })))
}

/// Configuration for room and image routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/hotel-room")
            .route("", web::get().to(list_rooms))
            .route("", web::post().to(create_room))
            .route("/{id}", web::get().to(get_room))
            .route("/{id}", web::put().to(update_room))
            .route("/{id}", web::delete().to(delete_room)),
    );
    cfg.service(
        web::scope("/api/hotel-image")
            .route("", web::get().to(list_images))
            .route("", web::post().to(create_image))
            .route("/{id}", web::get().to(get_image))
            .route("/{id}", web::put().to(update_image))
            .route("/{id}", web::delete().to(delete_image)),
    );
}
