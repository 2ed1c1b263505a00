// src/handlers/geo.rs
// DOCUMENTATION: HTTP handlers for geography resources
// PURPOSE: Parse requests, validate payloads, call the geo repository

use crate::db::GeoRepository;
use crate::errors::ApiError;
use crate::models::*;
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

// ---- Countries ----

/// GET /api/country
pub async fn list_countries(
    pool: web::Data<PgPool>,
    query: web::Query<NameFilterQuery>,
) -> Result<impl Responder, ApiError> {
    let countries = GeoRepository::list_countries(pool.get_ref(), query.name.as_deref()).await?;
    Ok(HttpResponse::Ok().json(countries))
}

/// GET /api/country/{id}
/// ?include=true attaches the country's cities
pub async fn get_country(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    query: web::Query<IncludeQuery>,
) -> Result<impl Responder, ApiError> {
    let id = path.into_inner();
    let country = GeoRepository::get_country(pool.get_ref(), id).await?;

    let cities = if query.expand() {
        Some(GeoRepository::cities_by_country(pool.get_ref(), id).await?)
    } else {
        None
    };

    Ok(HttpResponse::Ok().json(CountryDetailResponse { country, cities }))
}

/// POST /api/country
pub async fn create_country(
    pool: web::Data<PgPool>,
    req: web::Json<CreateCountryRequest>,
) -> Result<impl Responder, ApiError> {
    req.validate_fields()?;
    let country = GeoRepository::create_country(pool.get_ref(), &req).await?;
    Ok(HttpResponse::Created().json(country))
}

/// PUT /api/country/{id}
pub async fn update_country(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateCountryRequest>,
) -> Result<impl Responder, ApiError> {
    req.validate_fields()?;
    let country = GeoRepository::update_country(pool.get_ref(), path.into_inner(), &req).await?;
    Ok(HttpResponse::Ok().json(country))
}

/// DELETE /api/country/{id}
pub async fn delete_country(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    GeoRepository::delete_country(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "deleted": true })))
}

// ---- Cities ----

/// GET /api/city
/// ?include=true attaches each city's country (deduplicated lookups)
pub async fn list_cities(
    pool: web::Data<PgPool>,
    query: web::Query<CityListQuery>,
) -> Result<impl Responder, ApiError> {
    let query = query.into_inner();
    let cities = GeoRepository::list_cities(pool.get_ref(), &query).await?;

    if !query.include.unwrap_or(false) {
        return Ok(HttpResponse::Ok().json(cities));
    }

    let mut countries: HashMap<Uuid, Country> = HashMap::new();
    let mut expanded = Vec::with_capacity(cities.len());

    for city in cities {
        let country = match countries.get(&city.country_id) {
            Some(country) => country.clone(),
            None => {
                let country = GeoRepository::get_country(pool.get_ref(), city.country_id).await?;
                countries.insert(city.country_id, country.clone());
                country
            }
        };
        expanded.push(CityDetailResponse {
            city,
            country: Some(country),
            neighborhoods: None,
            landmarks: None,
        });
    }

    Ok(HttpResponse::Ok().json(expanded))
}

/// GET /api/city/{id}
/// ?include=true attaches country, neighborhoods and landmarks
pub async fn get_city(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    query: web::Query<IncludeQuery>,
) -> Result<impl Responder, ApiError> {
    let id = path.into_inner();
    let city = GeoRepository::get_city(pool.get_ref(), id).await?;

    if !query.expand() {
        return Ok(HttpResponse::Ok().json(city));
    }

    let country = GeoRepository::get_country(pool.get_ref(), city.country_id).await?;
    let neighborhoods = GeoRepository::neighborhoods_by_city(pool.get_ref(), id).await?;
    let landmarks = GeoRepository::landmarks_by_city(pool.get_ref(), id).await?;

    Ok(HttpResponse::Ok().json(CityDetailResponse {
        city,
        country: Some(country),
        neighborhoods: Some(neighborhoods),
        landmarks: Some(landmarks),
    }))
}

/// POST /api/city
pub async fn create_city(
    pool: web::Data<PgPool>,
    req: web::Json<CreateCityRequest>,
) -> Result<impl Responder, ApiError> {
    req.validate_fields()?;
    let city = GeoRepository::create_city(pool.get_ref(), &req).await?;
    Ok(HttpResponse::Created().json(city))
}

/// PUT /api/city/{id}
pub async fn update_city(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateCityRequest>,
) -> Result<impl Responder, ApiError> {
    req.validate_fields()?;
    let city = GeoRepository::update_city(pool.get_ref(), path.into_inner(), &req).await?;
    Ok(HttpResponse::Ok().json(city))
}

/// DELETE /api/city/{id}
pub async fn delete_city(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    GeoRepository::delete_city(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "deleted": true })))
}

// ---- Neighborhoods ----

/// GET /api/neighborhood
pub async fn list_neighborhoods(
    pool: web::Data<PgPool>,
    query: web::Query<NeighborhoodListQuery>,
) -> Result<impl Responder, ApiError> {
    let neighborhoods = GeoRepository::list_neighborhoods(pool.get_ref(), &query).await?;
    Ok(HttpResponse::Ok().json(neighborhoods))
}

/// GET /api/neighborhood/{id}
pub async fn get_neighborhood(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let neighborhood = GeoRepository::get_neighborhood(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(neighborhood))
}

/// POST /api/neighborhood
pub async fn create_neighborhood(
    pool: web::Data<PgPool>,
    req: web::Json<CreateNeighborhoodRequest>,
) -> Result<impl Responder, ApiError> {
    req.validate_fields()?;
    let neighborhood = GeoRepository::create_neighborhood(pool.get_ref(), &req).await?;
    Ok(HttpResponse::Created().json(neighborhood))
}

/// PUT /api/neighborhood/{id}
pub async fn update_neighborhood(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateNeighborhoodRequest>,
) -> Result<impl Responder, ApiError> {
    req.validate_fields()?;
    let neighborhood =
        GeoRepository::update_neighborhood(pool.get_ref(), path.into_inner(), &req).await?;
    Ok(HttpResponse::Ok().json(neighborhood))
}

/// DELETE /api/neighborhood/{id}
pub async fn delete_neighborhood(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    GeoRepository::delete_neighborhood(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "deleted": true })))
}

// ---- Landmarks ----

/// GET /api/landmark
pub async fn list_landmarks(
    pool: web::Data<PgPool>,
    query: web::Query<LandmarkListQuery>,
) -> Result<impl Responder, ApiError> {
    let landmarks = GeoRepository::list_landmarks(pool.get_ref(), &query).await?;
    Ok(HttpResponse::Ok().json(landmarks))
}

/// GET /api/landmark/{id}
pub async fn get_landmark(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let landmark = GeoRepository::get_landmark(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(landmark))
}

/// POST /api/landmark
pub async fn create_landmark(
    pool: web::Data<PgPool>,
    req: web::Json<CreateLandmarkRequest>,
) -> Result<impl Responder, ApiError> {
    req.validate_fields()?;
    let landmark = GeoRepository::create_landmark(pool.get_ref(), &req).await?;
    Ok(HttpResponse::Created().json(landmark))
}

/// PUT /api/landmark/{id}
pub async fn update_landmark(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateLandmarkRequest>,
) -> Result<impl Responder, ApiError> {
    req.validate_fields()?;
    let landmark = GeoRepository::update_landmark(pool.get_ref(), path.into_inner(), &req).await?;
    Ok(HttpResponse::Ok().json(landmark))
}

/// DELETE /api/landmark/{id}
pub async fn delete_landmark(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    GeoRepository::delete_landmark(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "deleted": true })))
}

// ---- Destinations ----

/// GET /api/destination
pub async fn list_destinations(
    pool: web::Data<PgPool>,
    query: web::Query<NameFilterQuery>,
) -> Result<impl Responder, ApiError> {
    let destinations =
        GeoRepository::list_destinations(pool.get_ref(), query.name.as_deref()).await?;
    Ok(HttpResponse::Ok().json(destinations))
}

/// GET /api/destination/{id}
/// ?include=true attaches linked cities in their display order
pub async fn get_destination(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    query: web::Query<IncludeQuery>,
) -> Result<impl Responder, ApiError> {
    let id = path.into_inner();
    let destination = GeoRepository::get_destination(pool.get_ref(), id).await?;

    let cities = if query.expand() {
        Some(GeoRepository::destination_cities(pool.get_ref(), id).await?)
    } else {
        None
    };

    Ok(HttpResponse::Ok().json(DestinationDetailResponse {
        destination,
        cities,
    }))
}

/// POST /api/destination
pub async fn create_destination(
    pool: web::Data<PgPool>,
    req: web::Json<CreateDestinationRequest>,
) -> Result<impl Responder, ApiError> {
    req.validate_fields()?;
    let destination = GeoRepository::create_destination(pool.get_ref(), &req).await?;
    Ok(HttpResponse::Created().json(destination))
}

/// PUT /api/destination/{id}
pub async fn update_destination(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateDestinationRequest>,
) -> Result<impl Responder, ApiError> {
    req.validate_fields()?;
    let destination =
        GeoRepository::update_destination(pool.get_ref(), path.into_inner(), &req).await?;
    Ok(HttpResponse::Ok().json(destination))
}

/// DELETE /api/destination/{id}
pub async fn delete_destination(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    GeoRepository::delete_destination(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "deleted": true })))
}

/// POST /api/destination/{id}/city
/// Attach a city to the destination
pub async fn link_city(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    req: web::Json<LinkCityRequest>,
) -> Result<impl Responder, ApiError> {
    GeoRepository::link_city(pool.get_ref(), path.into_inner(), &req).await?;
    Ok(HttpResponse::Created().json(json!({ "linked": true })))
}

/// DELETE /api/destination/{id}/city/{city_id}
pub async fn unlink_city(
    pool: web::Data<PgPool>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<impl Responder, ApiError> {
    let (destination_id, city_id) = path.into_inner();
    GeoRepository::unlink_city(pool.get_ref(), destination_id, city_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "deleted": true })))
}

/// Configuration for geography routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/country")
            .route("", web::get().to(list_countries))
            .route("", web::post().to(create_country))
            .route("/{id}", web::get().to(get_country))
            .route("/{id}", web::put().to(update_country))
            .route("/{id}", web::delete().to(delete_country)),
    );
    cfg.service(
        web::scope("/api/city")
            .route("", web::get().to(list_cities))
            .route("", web::post().to(create_city))
            .route("/{id}", web::get().to(get_city))
            .route("/{id}", web::put().to(update_city))
            .route("/{id}", web::delete().to(delete_city)),
    );
    cfg.service(
        web::scope("/api/neighborhood")
            .route("", web::get().to(list_neighborhoods))
            .route("", web::post().to(create_neighborhood))
            .route("/{id}", web::get().to(get_neighborhood))
            .route("/{id}", web::put().to(update_neighborhood))
            .route("/{id}", web::delete().to(delete_neighborhood)),
    );
    cfg.service(
        web::scope("/api/landmark")
            .route("", web::get().to(list_landmarks))
            .route("", web::post().to(create_landmark))
            .route("/{id}", web::get().to(get_landmark))
            .route("/{id}", web::put().to(update_landmark))
            .route("/{id}", web::delete().to(delete_landmark)),
    );
    cfg.service(
        web::scope("/api/destination")
            .route("", web::get().to(list_destinations))
            .route("", web::post().to(create_destination))
            .route("/{id}", web::get().to(get_destination))
            .route("/{id}", web::put().to(update_destination))
            .route("/{id}", web::delete().to(delete_destination))
            .route("/{id}/city", web::post().to(link_city))
            .route("/{id}/city/{city_id}", web::delete().to(unlink_city)),
    );
}
