// src/handlers/hotels.rs
// DOCUMENTATION: HTTP handlers for the hotel listing entities
// PURPOSE: Accommodation types, hotel groups, addresses, hotel cards with
// aggregates and relation links, and the transactional composite create

use crate::db::{CatalogRepository, HotelRepository, RoomMediaRepository};
use crate::errors::ApiError;
use crate::models::*;
use crate::services::{PublicService, ResponseCache};
use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct HotelDetailsListQuery {
    pub hotel_card_id: Option<Uuid>,
}

// ---- Accommodation types ----

/// GET /api/accommodation-type
pub async fn list_accommodation_types(
    pool: web::Data<PgPool>,
    query: web::Query<NameFilterQuery>,
) -> Result<impl Responder, ApiError> {
    let types =
        HotelRepository::list_accommodation_types(pool.get_ref(), query.name.as_deref()).await?;
    Ok(HttpResponse::Ok().json(types))
}

/// GET /api/accommodation-type/{id}
pub async fn get_accommodation_type(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let accommodation_type =
        HotelRepository::get_accommodation_type(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(accommodation_type))
}

/// POST /api/accommodation-type
pub async fn create_accommodation_type(
    pool: web::Data<PgPool>,
    req: web::Json<CreateAccommodationTypeRequest>,
) -> Result<impl Responder, ApiError> {
    req.validate_fields()?;
    let accommodation_type =
        HotelRepository::create_accommodation_type(pool.get_ref(), &req).await?;
    Ok(HttpResponse::Created().json(accommodation_type))
}

/// PUT /api/accommodation-type/{id}
pub async fn update_accommodation_type(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateAccommodationTypeRequest>,
) -> Result<impl Responder, ApiError> {
    req.validate_fields()?;
    let accommodation_type =
        HotelRepository::update_accommodation_type(pool.get_ref(), path.into_inner(), &req)
            .await?;
    Ok(HttpResponse::Ok().json(accommodation_type))
}

/// DELETE /api/accommodation-type/{id}
pub async fn delete_accommodation_type(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    HotelRepository::delete_accommodation_type(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "deleted": true })))
}

// ---- Hotel groups ----

/// GET /api/hotel-group
pub async fn list_hotel_groups(
    pool: web::Data<PgPool>,
    query: web::Query<NameFilterQuery>,
) -> Result<impl Responder, ApiError> {
    let groups = HotelRepository::list_hotel_groups(pool.get_ref(), query.name.as_deref()).await?;
    Ok(HttpResponse::Ok().json(groups))
}

/// GET /api/hotel-group/{id}
pub async fn get_hotel_group(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let group = HotelRepository::get_hotel_group(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(group))
}

/// POST /api/hotel-group
pub async fn create_hotel_group(
    pool: web::Data<PgPool>,
    req: web::Json<CreateHotelGroupRequest>,
) -> Result<impl Responder, ApiError> {
    req.validate_fields()?;
    let group = HotelRepository::create_hotel_group(pool.get_ref(), &req).await?;
    Ok(HttpResponse::Created().json(group))
}

/// PUT /api/hotel-group/{id}
pub async fn update_hotel_group(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateHotelGroupRequest>,
) -> Result<impl Responder, ApiError> {
    req.validate_fields()?;
    let group = HotelRepository::update_hotel_group(pool.get_ref(), path.into_inner(), &req).await?;
    Ok(HttpResponse::Ok().json(group))
}

/// DELETE /api/hotel-group/{id}
pub async fn delete_hotel_group(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    HotelRepository::delete_hotel_group(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "deleted": true })))
}

// ---- Addresses ----

/// GET /api/address
pub async fn list_addresses(
    pool: web::Data<PgPool>,
    query: web::Query<AddressListQuery>,
) -> Result<impl Responder, ApiError> {
    let addresses = HotelRepository::list_addresses(pool.get_ref(), &query).await?;
    Ok(HttpResponse::Ok().json(addresses))
}

/// GET /api/address/{id}
pub async fn get_address(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let address = HotelRepository::get_address(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(address))
}

/// POST /api/address
pub async fn create_address(
    pool: web::Data<PgPool>,
    req: web::Json<CreateAddressRequest>,
) -> Result<impl Responder, ApiError> {
    req.validate_fields()?;
    let address = HotelRepository::create_address(pool.get_ref(), &req).await?;
    Ok(HttpResponse::Created().json(address))
}

/// PUT /api/address/{id}
/// Address data appears in cached public payloads, so every edit drops them
pub async fn update_address(
    pool: web::Data<PgPool>,
    cache: web::Data<Arc<ResponseCache>>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateAddressRequest>,
) -> Result<impl Responder, ApiError> {
    req.validate_fields()?;
    let address = HotelRepository::update_address(pool.get_ref(), path.into_inner(), &req).await?;
    cache.invalidate_prefix("public:hotel:").await;
    Ok(HttpResponse::Ok().json(address))
}

/// DELETE /api/address/{id}
pub async fn delete_address(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    HotelRepository::delete_address(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "deleted": true })))
}

// ---- Hotel cards ----

/// Assemble a detail response for one card: aggregates always, relations
/// only when asked for
async fn build_card_detail(
    pool: &PgPool,
    card: HotelCard,
    expand: bool,
) -> Result<HotelCardDetailResponse, ApiError> {
    let aggregates = HotelRepository::hotel_card_aggregates(pool, card.id).await?;

    if !expand {
        return Ok(HotelCardDetailResponse {
            card,
            aggregates,
            details: None,
            address: None,
            images: None,
            rooms: None,
        });
    }

    let details = HotelRepository::details_by_card(pool, card.id).await?;
    let address = match &details {
        Some(details) => Some(HotelRepository::get_address(pool, details.address_id).await?),
        None => None,
    };
    let images = RoomMediaRepository::images_by_card(pool, card.id).await?;
    let rooms = RoomMediaRepository::rooms_by_card(pool, card.id).await?;

    Ok(HotelCardDetailResponse {
        card,
        aggregates,
        details,
        address,
        images: Some(images),
        rooms: Some(rooms),
    })
}

/// GET /api/hotel-card
/// ?include=true expands each card with aggregates, details and address
pub async fn list_hotel_cards(
    pool: web::Data<PgPool>,
    query: web::Query<HotelCardListQuery>,
) -> Result<impl Responder, ApiError> {
    let query = query.into_inner();
    let cards = HotelRepository::list_hotel_cards(pool.get_ref(), &query).await?;

    if !query.include.unwrap_or(false) {
        return Ok(HttpResponse::Ok().json(cards));
    }

    let mut expanded = Vec::with_capacity(cards.len());
    for card in cards {
        expanded.push(build_card_detail(pool.get_ref(), card, true).await?);
    }

    Ok(HttpResponse::Ok().json(expanded))
}

/// GET /api/hotel-card/{id}
/// Always carries derived aggregates; ?include=true adds details, address,
/// images and rooms
pub async fn get_hotel_card(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    query: web::Query<IncludeQuery>,
) -> Result<impl Responder, ApiError> {
    let card = HotelRepository::get_hotel_card(pool.get_ref(), path.into_inner()).await?;
    let detail = build_card_detail(pool.get_ref(), card, query.expand()).await?;
    Ok(HttpResponse::Ok().json(detail))
}

/// POST /api/hotel-card
pub async fn create_hotel_card(
    pool: web::Data<PgPool>,
    req: web::Json<CreateHotelCardRequest>,
) -> Result<impl Responder, ApiError> {
    req.validate_fields()?;
    let card = HotelRepository::create_hotel_card(pool.get_ref(), &req).await?;
    Ok(HttpResponse::Created().json(card))
}

/// POST /api/hotel-card/full
/// Address + card + details created atomically
pub async fn create_hotel_card_full(
    pool: web::Data<PgPool>,
    req: web::Json<CreateHotelCardFullRequest>,
) -> Result<impl Responder, ApiError> {
    req.validate_fields()?;
    let response = HotelRepository::create_hotel_card_full(pool.get_ref(), &req).await?;
    Ok(HttpResponse::Created().json(response))
}

/// PUT /api/hotel-card/{id}
pub async fn update_hotel_card(
    pool: web::Data<PgPool>,
    cache: web::Data<Arc<ResponseCache>>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateHotelCardRequest>,
) -> Result<impl Responder, ApiError> {
    req.validate_fields()?;
    let id = path.into_inner();
    let card = HotelRepository::update_hotel_card(pool.get_ref(), id, &req).await?;
    PublicService::invalidate_hotel(cache.get_ref(), id).await;
    Ok(HttpResponse::Ok().json(card))
}

/// DELETE /api/hotel-card/{id}
pub async fn delete_hotel_card(
    pool: web::Data<PgPool>,
    cache: web::Data<Arc<ResponseCache>>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let id = path.into_inner();
    HotelRepository::delete_hotel_card(pool.get_ref(), id).await?;
    PublicService::invalidate_hotel(cache.get_ref(), id).await;
    Ok(HttpResponse::Ok().json(json!({ "deleted": true })))
}

// ---- Hotel card relation links ----

/// GET /api/hotel-card/{id}/amenity
pub async fn card_amenities(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let amenities = CatalogRepository::amenities_by_card(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(amenities))
}

/// POST /api/hotel-card/{id}/amenity
pub async fn link_amenity(
    pool: web::Data<PgPool>,
    cache: web::Data<Arc<ResponseCache>>,
    path: web::Path<Uuid>,
    req: web::Json<LinkRequest>,
) -> Result<impl Responder, ApiError> {
    let id = path.into_inner();
    CatalogRepository::link_amenity(pool.get_ref(), id, &req).await?;
    PublicService::invalidate_hotel(cache.get_ref(), id).await;
    Ok(HttpResponse::Created().json(json!({ "linked": true })))
}

/// DELETE /api/hotel-card/{id}/amenity/{amenity_id}
pub async fn unlink_amenity(
    pool: web::Data<PgPool>,
    cache: web::Data<Arc<ResponseCache>>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<impl Responder, ApiError> {
    let (card_id, amenity_id) = path.into_inner();
    CatalogRepository::unlink_amenity(pool.get_ref(), card_id, amenity_id).await?;
    PublicService::invalidate_hotel(cache.get_ref(), card_id).await;
    Ok(HttpResponse::Ok().json(json!({ "deleted": true })))
}

/// GET /api/hotel-card/{id}/label
pub async fn card_labels(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let labels = CatalogRepository::labels_by_card(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(labels))
}

/// POST /api/hotel-card/{id}/label
pub async fn link_label(
    pool: web::Data<PgPool>,
    cache: web::Data<Arc<ResponseCache>>,
    path: web::Path<Uuid>,
    req: web::Json<LinkRequest>,
) -> Result<impl Responder, ApiError> {
    let id = path.into_inner();
    CatalogRepository::link_label(pool.get_ref(), id, &req).await?;
    PublicService::invalidate_hotel(cache.get_ref(), id).await;
    Ok(HttpResponse::Created().json(json!({ "linked": true })))
}

/// DELETE /api/hotel-card/{id}/label/{label_id}
pub async fn unlink_label(
    pool: web::Data<PgPool>,
    cache: web::Data<Arc<ResponseCache>>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<impl Responder, ApiError> {
    let (card_id, label_id) = path.into_inner();
    CatalogRepository::unlink_label(pool.get_ref(), card_id, label_id).await?;
    PublicService::invalidate_hotel(cache.get_ref(), card_id).await;
    Ok(HttpResponse::Ok().json(json!({ "deleted": true })))
}

// ---- Hotel details ----

/// GET /api/hotel-details
pub async fn list_hotel_details(
    pool: web::Data<PgPool>,
    query: web::Query<HotelDetailsListQuery>,
) -> Result<impl Responder, ApiError> {
    let details = HotelRepository::list_hotel_details(pool.get_ref(), query.hotel_card_id).await?;
    Ok(HttpResponse::Ok().json(details))
}

/// GET /api/hotel-details/{id}
pub async fn get_hotel_details(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let details = HotelRepository::get_hotel_details(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(details))
}

/// POST /api/hotel-details
pub async fn create_hotel_details(
    pool: web::Data<PgPool>,
    cache: web::Data<Arc<ResponseCache>>,
    req: web::Json<CreateHotelDetailsRequest>,
) -> Result<impl Responder, ApiError> {
    req.validate_fields()?;
    let details = HotelRepository::create_hotel_details(pool.get_ref(), &req).await?;
    PublicService::invalidate_hotel(cache.get_ref(), details.hotel_card_id).await;
    Ok(HttpResponse::Created().json(details))
}

/// PUT /api/hotel-details/{id}
pub async fn update_hotel_details(
    pool: web::Data<PgPool>,
    cache: web::Data<Arc<ResponseCache>>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateHotelDetailsRequest>,
) -> Result<impl Responder, ApiError> {
    req.validate_fields()?;
    let details =
        HotelRepository::update_hotel_details(pool.get_ref(), path.into_inner(), &req).await?;
    PublicService::invalidate_hotel(cache.get_ref(), details.hotel_card_id).await;
    Ok(HttpResponse::Ok().json(details))
}

/// DELETE /api/hotel-details/{id}
pub async fn delete_hotel_details(
    pool: web::Data<PgPool>,
    cache: web::Data<Arc<ResponseCache>>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let id = path.into_inner();
    // Fetch first: the card id is needed for cache invalidation
    let details = HotelRepository::get_hotel_details(pool.get_ref(), id).await?;
    HotelRepository::delete_hotel_details(pool.get_ref(), id).await?;
    PublicService::invalidate_hotel(cache.get_ref(), details.hotel_card_id).await;
    Ok(HttpResponse::Ok().json(json!({ "deleted": true })))
}

/// Configuration for hotel routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/accommodation-type")
            .route("", web::get().to(list_accommodation_types))
            .route("", web::post().to(create_accommodation_type))
            .route("/{id}", web::get().to(get_accommodation_type))
            .route("/{id}", web::put().to(update_accommodation_type))
            .route("/{id}", web::delete().to(delete_accommodation_type)),
    );
    cfg.service(
        web::scope("/api/hotel-group")
            .route("", web::get().to(list_hotel_groups))
            .route("", web::post().to(create_hotel_group))
            .route("/{id}", web::get().to(get_hotel_group))
            .route("/{id}", web::put().to(update_hotel_group))
            .route("/{id}", web::delete().to(delete_hotel_group)),
    );
    cfg.service(
        web::scope("/api/address")
            .route("", web::get().to(list_addresses))
            .route("", web::post().to(create_address))
            .route("/{id}", web::get().to(get_address))
            .route("/{id}", web::put().to(update_address))
            .route("/{id}", web::delete().to(delete_address)),
    );
    cfg.service(
        web::scope("/api/hotel-card")
            .route("", web::get().to(list_hotel_cards))
            .route("", web::post().to(create_hotel_card))
            .route("/full", web::post().to(create_hotel_card_full))
            .route("/{id}", web::get().to(get_hotel_card))
            .route("/{id}", web::put().to(update_hotel_card))
            .route("/{id}", web::delete().to(delete_hotel_card))
            .route("/{id}/amenity", web::get().to(card_amenities))
            .route("/{id}/amenity", web::post().to(link_amenity))
            .route(
                "/{id}/amenity/{amenity_id}",
                web::delete().to(unlink_amenity),
            )
            .route("/{id}/label", web::get().to(card_labels))
            .route("/{id}/label", web::post().to(link_label))
            .route("/{id}/label/{label_id}", web::delete().to(unlink_label)),
    );
    cfg.service(
        web::scope("/api/hotel-details")
            .route("", web::get().to(list_hotel_details))
            .route("", web::post().to(create_hotel_details))
            .route("/{id}", web::get().to(get_hotel_details))
            .route("/{id}", web::put().to(update_hotel_details))
            .route("/{id}", web::delete().to(delete_hotel_details)),
    );
}
