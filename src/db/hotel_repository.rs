// src/db/hotel_repository.rs
// DOCUMENTATION: Database access for the hotel listing entities
// PURPOSE: Accommodation types, hotel groups, addresses, hotel cards and
// their 1:1 details, including the transactional composite create

use crate::db::geo_repository::GeoRepository;
use crate::db::{map_db_err, sql_escape};
use crate::errors::ApiError;
use crate::models::*;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

const ACCOMMODATION_TYPE_COLS: &str = "id, name, code, sort_order, created_at, updated_at";
const HOTEL_GROUP_COLS: &str = "id, name, website, sort_order, created_at, updated_at";
const ADDRESS_COLS: &str = "id, city_id, neighborhood_id, street, postal_code, latitude, \
     longitude, created_at, updated_at";
const HOTEL_CARD_COLS: &str = "id, name, accommodation_type_id, destination_id, hotel_group_id, \
     star_rating, popularity, priority, sort_order, created_at, updated_at";
const HOTEL_DETAILS_COLS: &str = "id, hotel_card_id, address_id, description, check_in_time, \
     check_out_time, created_at, updated_at";

/// HotelRepository: all database operations for listing entities
pub struct HotelRepository;

impl HotelRepository {
    // ---- Accommodation types ----

    pub async fn list_accommodation_types(
        pool: &PgPool,
        name: Option<&str>,
    ) -> Result<Vec<AccommodationType>, ApiError> {
        let where_clause = match name {
            Some(n) => format!("WHERE name ILIKE '%{}%'", sql_escape(n)),
            None => String::new(),
        };
        let sql = format!(
            "SELECT {} FROM accommodation_types {} ORDER BY sort_order ASC, name ASC",
            ACCOMMODATION_TYPE_COLS, where_clause
        );

        sqlx::query_as::<_, AccommodationType>(&sql)
            .fetch_all(pool)
            .await
            .map_err(map_db_err)
    }

    pub async fn get_accommodation_type(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<AccommodationType, ApiError> {
        let sql = format!(
            "SELECT {} FROM accommodation_types WHERE id = $1",
            ACCOMMODATION_TYPE_COLS
        );

        sqlx::query_as::<_, AccommodationType>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| ApiError::NotFound(format!("Accommodation type '{}' not found", id)))
    }

    pub async fn create_accommodation_type(
        pool: &PgPool,
        req: &CreateAccommodationTypeRequest,
    ) -> Result<AccommodationType, ApiError> {
        let sql = format!(
            r#"
            INSERT INTO accommodation_types (name, code, sort_order, created_at, updated_at)
            VALUES ($1, $2, COALESCE($3, 0), NOW(), NOW())
            RETURNING {}
            "#,
            ACCOMMODATION_TYPE_COLS
        );

        sqlx::query_as::<_, AccommodationType>(&sql)
            .bind(&req.name)
            .bind(&req.code)
            .bind(req.sort_order)
            .fetch_one(pool)
            .await
            .map_err(map_db_err)
    }

    pub async fn update_accommodation_type(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateAccommodationTypeRequest,
    ) -> Result<AccommodationType, ApiError> {
        let sql = format!(
            r#"
            UPDATE accommodation_types
            SET name = COALESCE($1, name),
                code = COALESCE($2, code),
                sort_order = COALESCE($3, sort_order),
                updated_at = NOW()
            WHERE id = $4
            RETURNING {}
            "#,
            ACCOMMODATION_TYPE_COLS
        );

        sqlx::query_as::<_, AccommodationType>(&sql)
            .bind(&req.name)
            .bind(&req.code)
            .bind(req.sort_order)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| ApiError::NotFound(format!("Accommodation type '{}' not found", id)))
    }

    pub async fn delete_accommodation_type(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let hotel_cards: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM hotel_cards WHERE accommodation_type_id = $1")
                .bind(id)
                .fetch_one(pool)
                .await
                .map_err(map_db_err)?;

        if hotel_cards.0 > 0 {
            return Err(ApiError::DeleteBlocked {
                message: "Accommodation type has dependent records".to_string(),
                details: json!({ "hotel_cards": hotel_cards.0 }),
            });
        }

        let rows = sqlx::query("DELETE FROM accommodation_types WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(map_db_err)?
            .rows_affected();

        if rows == 0 {
            return Err(ApiError::NotFound(format!(
                "Accommodation type '{}' not found",
                id
            )));
        }
        Ok(())
    }

    // ---- Hotel groups ----

    pub async fn list_hotel_groups(
        pool: &PgPool,
        name: Option<&str>,
    ) -> Result<Vec<HotelGroup>, ApiError> {
        let where_clause = match name {
            Some(n) => format!("WHERE name ILIKE '%{}%'", sql_escape(n)),
            None => String::new(),
        };
        let sql = format!(
            "SELECT {} FROM hotel_groups {} ORDER BY sort_order ASC, name ASC",
            HOTEL_GROUP_COLS, where_clause
        );

        sqlx::query_as::<_, HotelGroup>(&sql)
            .fetch_all(pool)
            .await
            .map_err(map_db_err)
    }

    pub async fn get_hotel_group(pool: &PgPool, id: Uuid) -> Result<HotelGroup, ApiError> {
        let sql = format!("SELECT {} FROM hotel_groups WHERE id = $1", HOTEL_GROUP_COLS);

        sqlx::query_as::<_, HotelGroup>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| ApiError::NotFound(format!("Hotel group '{}' not found", id)))
    }

    pub async fn create_hotel_group(
        pool: &PgPool,
        req: &CreateHotelGroupRequest,
    ) -> Result<HotelGroup, ApiError> {
        let sql = format!(
            r#"
            INSERT INTO hotel_groups (name, website, sort_order, created_at, updated_at)
            VALUES ($1, $2, COALESCE($3, 0), NOW(), NOW())
            RETURNING {}
            "#,
            HOTEL_GROUP_COLS
        );

        sqlx::query_as::<_, HotelGroup>(&sql)
            .bind(&req.name)
            .bind(&req.website)
            .bind(req.sort_order)
            .fetch_one(pool)
            .await
            .map_err(map_db_err)
    }

    pub async fn update_hotel_group(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateHotelGroupRequest,
    ) -> Result<HotelGroup, ApiError> {
        let sql = format!(
            r#"
            UPDATE hotel_groups
            SET name = COALESCE($1, name),
                website = COALESCE($2, website),
                sort_order = COALESCE($3, sort_order),
                updated_at = NOW()
            WHERE id = $4
            RETURNING {}
            "#,
            HOTEL_GROUP_COLS
        );

        sqlx::query_as::<_, HotelGroup>(&sql)
            .bind(&req.name)
            .bind(&req.website)
            .bind(req.sort_order)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| ApiError::NotFound(format!("Hotel group '{}' not found", id)))
    }

    pub async fn delete_hotel_group(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let hotel_cards: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM hotel_cards WHERE hotel_group_id = $1")
                .bind(id)
                .fetch_one(pool)
                .await
                .map_err(map_db_err)?;

        if hotel_cards.0 > 0 {
            return Err(ApiError::DeleteBlocked {
                message: "Hotel group has dependent records".to_string(),
                details: json!({ "hotel_cards": hotel_cards.0 }),
            });
        }

        let rows = sqlx::query("DELETE FROM hotel_groups WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(map_db_err)?
            .rows_affected();

        if rows == 0 {
            return Err(ApiError::NotFound(format!(
                "Hotel group '{}' not found",
                id
            )));
        }
        Ok(())
    }

    // ---- Addresses ----

    /// Cross-entity check: the neighborhood on an address must belong to the
    /// same city the address references
    pub async fn ensure_neighborhood_in_city(
        pool: &PgPool,
        neighborhood_id: Uuid,
        city_id: Uuid,
    ) -> Result<(), ApiError> {
        let neighborhood = GeoRepository::get_neighborhood(pool, neighborhood_id).await?;

        if neighborhood.city_id != city_id {
            return Err(ApiError::Validation(
                "Neighborhood does not belong to the address city".to_string(),
            ));
        }
        Ok(())
    }

    pub async fn list_addresses(
        pool: &PgPool,
        query: &AddressListQuery,
    ) -> Result<Vec<Address>, ApiError> {
        let mut where_clauses: Vec<String> = Vec::new();

        if let Some(city_id) = query.city_id {
            where_clauses.push(format!("city_id = '{}'", city_id));
        }
        if let Some(neighborhood_id) = query.neighborhood_id {
            where_clauses.push(format!("neighborhood_id = '{}'", neighborhood_id));
        }
        if let Some(postal_code) = &query.postal_code {
            where_clauses.push(format!("postal_code = '{}'", sql_escape(postal_code)));
        }

        let where_clause = if where_clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", where_clauses.join(" AND "))
        };

        let sql = format!(
            "SELECT {} FROM addresses {} ORDER BY created_at ASC",
            ADDRESS_COLS, where_clause
        );

        sqlx::query_as::<_, Address>(&sql)
            .fetch_all(pool)
            .await
            .map_err(map_db_err)
    }

    pub async fn get_address(pool: &PgPool, id: Uuid) -> Result<Address, ApiError> {
        let sql = format!("SELECT {} FROM addresses WHERE id = $1", ADDRESS_COLS);

        sqlx::query_as::<_, Address>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| ApiError::NotFound(format!("Address '{}' not found", id)))
    }

    pub async fn create_address(
        pool: &PgPool,
        req: &CreateAddressRequest,
    ) -> Result<Address, ApiError> {
        let _ = GeoRepository::get_city(pool, req.city_id).await?;
        if let Some(neighborhood_id) = req.neighborhood_id {
            Self::ensure_neighborhood_in_city(pool, neighborhood_id, req.city_id).await?;
        }

        let sql = format!(
            r#"
            INSERT INTO addresses
                (city_id, neighborhood_id, street, postal_code, latitude, longitude,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW())
            RETURNING {}
            "#,
            ADDRESS_COLS
        );

        sqlx::query_as::<_, Address>(&sql)
            .bind(req.city_id)
            .bind(req.neighborhood_id)
            .bind(&req.street)
            .bind(&req.postal_code)
            .bind(req.latitude)
            .bind(req.longitude)
            .fetch_one(pool)
            .await
            .map_err(map_db_err)
    }

    pub async fn update_address(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateAddressRequest,
    ) -> Result<Address, ApiError> {
        let existing = Self::get_address(pool, id).await?;

        // Re-run the cross-check only when a participating field changes
        if req.city_id.is_some() || req.neighborhood_id.is_some() {
            let city_id = req.city_id.unwrap_or(existing.city_id);
            if let Some(city_id_new) = req.city_id {
                let _ = GeoRepository::get_city(pool, city_id_new).await?;
            }
            let neighborhood_id = req.neighborhood_id.or(existing.neighborhood_id);
            if let Some(neighborhood_id) = neighborhood_id {
                Self::ensure_neighborhood_in_city(pool, neighborhood_id, city_id).await?;
            }
        }

        let sql = format!(
            r#"
            UPDATE addresses
            SET city_id = COALESCE($1, city_id),
                neighborhood_id = COALESCE($2, neighborhood_id),
                street = COALESCE($3, street),
                postal_code = COALESCE($4, postal_code),
                latitude = COALESCE($5, latitude),
                longitude = COALESCE($6, longitude),
                updated_at = NOW()
            WHERE id = $7
            RETURNING {}
            "#,
            ADDRESS_COLS
        );

        sqlx::query_as::<_, Address>(&sql)
            .bind(req.city_id)
            .bind(req.neighborhood_id)
            .bind(&req.street)
            .bind(&req.postal_code)
            .bind(req.latitude)
            .bind(req.longitude)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| ApiError::NotFound(format!("Address '{}' not found", id)))
    }

    pub async fn delete_address(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let counts: (i64, i64) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM hotel_details WHERE address_id = $1),
                (SELECT COUNT(*) FROM users WHERE address_id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(map_db_err)?;

        let (hotel_details, users) = counts;
        if hotel_details + users > 0 {
            return Err(ApiError::DeleteBlocked {
                message: "Address has dependent records".to_string(),
                details: json!({ "hotel_details": hotel_details, "users": users }),
            });
        }

        let rows = sqlx::query("DELETE FROM addresses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(map_db_err)?
            .rows_affected();

        if rows == 0 {
            return Err(ApiError::NotFound(format!("Address '{}' not found", id)));
        }
        Ok(())
    }

    // ---- Hotel cards ----

    pub async fn list_hotel_cards(
        pool: &PgPool,
        query: &HotelCardListQuery,
    ) -> Result<Vec<HotelCard>, ApiError> {
        let mut where_clauses: Vec<String> = Vec::new();

        if let Some(destination_id) = query.destination_id {
            where_clauses.push(format!("destination_id = '{}'", destination_id));
        }
        if let Some(accommodation_type_id) = query.accommodation_type_id {
            where_clauses.push(format!("accommodation_type_id = '{}'", accommodation_type_id));
        }
        if let Some(hotel_group_id) = query.hotel_group_id {
            where_clauses.push(format!("hotel_group_id = '{}'", hotel_group_id));
        }
        if let Some(min_star_rating) = query.min_star_rating {
            where_clauses.push(format!("star_rating >= {}", min_star_rating));
        }
        if let Some(name) = &query.name {
            where_clauses.push(format!("name ILIKE '%{}%'", sql_escape(name)));
        }

        let where_clause = if where_clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", where_clauses.join(" AND "))
        };

        // Listing order: editorial sort first, popularity breaks ties
        let sql = format!(
            "SELECT {} FROM hotel_cards {} ORDER BY sort_order ASC, popularity DESC, name ASC",
            HOTEL_CARD_COLS, where_clause
        );

        sqlx::query_as::<_, HotelCard>(&sql)
            .fetch_all(pool)
            .await
            .map_err(map_db_err)
    }

    pub async fn get_hotel_card(pool: &PgPool, id: Uuid) -> Result<HotelCard, ApiError> {
        let sql = format!("SELECT {} FROM hotel_cards WHERE id = $1", HOTEL_CARD_COLS);

        sqlx::query_as::<_, HotelCard>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| ApiError::NotFound(format!("Hotel card '{}' not found", id)))
    }

    /// Derived aggregates for the detail endpoint, computed by a second query
    pub async fn hotel_card_aggregates(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<HotelCardAggregates, ApiError> {
        let row: (i64, i64, Option<f64>, Option<f64>) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM hotel_images WHERE hotel_card_id = $1),
                (SELECT COUNT(*) FROM hotel_rooms WHERE hotel_card_id = $1),
                (SELECT MIN(price_per_night) FROM hotel_rooms WHERE hotel_card_id = $1),
                (SELECT AVG(capacity)::float8 FROM hotel_rooms WHERE hotel_card_id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(map_db_err)?;

        Ok(HotelCardAggregates {
            image_count: row.0,
            room_count: row.1,
            min_room_price: row.2,
            avg_room_capacity: row.3,
        })
    }

    /// Validate the parent references of a create/update payload
    async fn check_card_parents(
        pool: &PgPool,
        accommodation_type_id: Option<Uuid>,
        destination_id: Option<Uuid>,
        hotel_group_id: Option<Uuid>,
    ) -> Result<(), ApiError> {
        if let Some(id) = accommodation_type_id {
            let _ = Self::get_accommodation_type(pool, id).await?;
        }
        if let Some(id) = destination_id {
            let _ = GeoRepository::get_destination(pool, id).await?;
        }
        if let Some(id) = hotel_group_id {
            let _ = Self::get_hotel_group(pool, id).await?;
        }
        Ok(())
    }

    pub async fn create_hotel_card(
        pool: &PgPool,
        req: &CreateHotelCardRequest,
    ) -> Result<HotelCard, ApiError> {
        Self::check_card_parents(
            pool,
            Some(req.accommodation_type_id),
            Some(req.destination_id),
            req.hotel_group_id,
        )
        .await?;

        let sql = format!(
            r#"
            INSERT INTO hotel_cards
                (name, accommodation_type_id, destination_id, hotel_group_id,
                 star_rating, popularity, priority, sort_order, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, COALESCE($6, 0), COALESCE($7, 0), COALESCE($8, 0),
                    NOW(), NOW())
            RETURNING {}
            "#,
            HOTEL_CARD_COLS
        );

        let card = sqlx::query_as::<_, HotelCard>(&sql)
            .bind(&req.name)
            .bind(req.accommodation_type_id)
            .bind(req.destination_id)
            .bind(req.hotel_group_id)
            .bind(req.star_rating)
            .bind(req.popularity)
            .bind(req.priority)
            .bind(req.sort_order)
            .fetch_one(pool)
            .await
            .map_err(map_db_err)?;

        log::info!("Created hotel card {} ({})", card.name, card.id);
        Ok(card)
    }

    pub async fn update_hotel_card(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateHotelCardRequest,
    ) -> Result<HotelCard, ApiError> {
        Self::check_card_parents(
            pool,
            req.accommodation_type_id,
            req.destination_id,
            req.hotel_group_id,
        )
        .await?;

        let sql = format!(
            r#"
            UPDATE hotel_cards
            SET name = COALESCE($1, name),
                accommodation_type_id = COALESCE($2, accommodation_type_id),
                destination_id = COALESCE($3, destination_id),
                hotel_group_id = COALESCE($4, hotel_group_id),
                star_rating = COALESCE($5, star_rating),
                popularity = COALESCE($6, popularity),
                priority = COALESCE($7, priority),
                sort_order = COALESCE($8, sort_order),
                updated_at = NOW()
            WHERE id = $9
            RETURNING {}
            "#,
            HOTEL_CARD_COLS
        );

        sqlx::query_as::<_, HotelCard>(&sql)
            .bind(&req.name)
            .bind(req.accommodation_type_id)
            .bind(req.destination_id)
            .bind(req.hotel_group_id)
            .bind(req.star_rating)
            .bind(req.popularity)
            .bind(req.priority)
            .bind(req.sort_order)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| ApiError::NotFound(format!("Hotel card '{}' not found", id)))
    }

    pub async fn delete_hotel_card(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let counts: (i64, i64, i64, i64, i64, i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM hotel_details WHERE hotel_card_id = $1),
                (SELECT COUNT(*) FROM hotel_images WHERE hotel_card_id = $1),
                (SELECT COUNT(*) FROM hotel_rooms WHERE hotel_card_id = $1),
                (SELECT COUNT(*) FROM hotel_faqs WHERE hotel_card_id = $1),
                (SELECT COUNT(*) FROM hotel_policies WHERE hotel_card_id = $1),
                (SELECT COUNT(*) FROM hotel_highlights WHERE hotel_card_id = $1),
                (SELECT COUNT(*) FROM hotel_card_amenities WHERE hotel_card_id = $1),
                (SELECT COUNT(*) FROM hotel_card_labels WHERE hotel_card_id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(map_db_err)?;

        let (details, images, rooms, faqs, policies, highlights, amenities, labels) = counts;
        let total =
            details + images + rooms + faqs + policies + highlights + amenities + labels;

        if total > 0 {
            return Err(ApiError::DeleteBlocked {
                message: "Hotel card has dependent records".to_string(),
                details: json!({
                    "details": details,
                    "images": images,
                    "rooms": rooms,
                    "faqs": faqs,
                    "policies": policies,
                    "highlights": highlights,
                    "amenities": amenities,
                    "labels": labels,
                }),
            });
        }

        let rows = sqlx::query("DELETE FROM hotel_cards WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(map_db_err)?
            .rows_affected();

        if rows == 0 {
            return Err(ApiError::NotFound(format!("Hotel card '{}' not found", id)));
        }

        log::info!("Deleted hotel card {}", id);
        Ok(())
    }

    /// Composite create: address + card + details in one transaction
    /// DOCUMENTATION: Replaces the client-driven multi-step sequence; a
    /// failure at any step rolls everything back, no orphaned rows
    pub async fn create_hotel_card_full(
        pool: &PgPool,
        req: &CreateHotelCardFullRequest,
    ) -> Result<HotelCardFullResponse, ApiError> {
        // Parent and cross-entity checks up front, outside the transaction
        let _ = GeoRepository::get_city(pool, req.address.city_id).await?;
        if let Some(neighborhood_id) = req.address.neighborhood_id {
            Self::ensure_neighborhood_in_city(pool, neighborhood_id, req.address.city_id).await?;
        }
        Self::check_card_parents(
            pool,
            Some(req.card.accommodation_type_id),
            Some(req.card.destination_id),
            req.card.hotel_group_id,
        )
        .await?;

        let mut tx = pool.begin().await.map_err(map_db_err)?;

        let address_sql = format!(
            r#"
            INSERT INTO addresses
                (city_id, neighborhood_id, street, postal_code, latitude, longitude,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW())
            RETURNING {}
            "#,
            ADDRESS_COLS
        );

        let address = sqlx::query_as::<_, Address>(&address_sql)
            .bind(req.address.city_id)
            .bind(req.address.neighborhood_id)
            .bind(&req.address.street)
            .bind(&req.address.postal_code)
            .bind(req.address.latitude)
            .bind(req.address.longitude)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_err)?;

        let card_sql = format!(
            r#"
            INSERT INTO hotel_cards
                (name, accommodation_type_id, destination_id, hotel_group_id,
                 star_rating, popularity, priority, sort_order, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, COALESCE($6, 0), COALESCE($7, 0), COALESCE($8, 0),
                    NOW(), NOW())
            RETURNING {}
            "#,
            HOTEL_CARD_COLS
        );

        let card = sqlx::query_as::<_, HotelCard>(&card_sql)
            .bind(&req.card.name)
            .bind(req.card.accommodation_type_id)
            .bind(req.card.destination_id)
            .bind(req.card.hotel_group_id)
            .bind(req.card.star_rating)
            .bind(req.card.popularity)
            .bind(req.card.priority)
            .bind(req.card.sort_order)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_err)?;

        let details_sql = format!(
            r#"
            INSERT INTO hotel_details
                (hotel_card_id, address_id, description, check_in_time, check_out_time,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            RETURNING {}
            "#,
            HOTEL_DETAILS_COLS
        );

        let details = sqlx::query_as::<_, HotelDetails>(&details_sql)
            .bind(card.id)
            .bind(address.id)
            .bind(&req.details.description)
            .bind(&req.details.check_in_time)
            .bind(&req.details.check_out_time)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_err)?;

        tx.commit().await.map_err(map_db_err)?;

        log::info!(
            "Created hotel card {} with address and details in one transaction",
            card.id
        );

        Ok(HotelCardFullResponse {
            card,
            details,
            address,
        })
    }

    // ---- Hotel details ----

    pub async fn list_hotel_details(
        pool: &PgPool,
        hotel_card_id: Option<Uuid>,
    ) -> Result<Vec<HotelDetails>, ApiError> {
        let where_clause = match hotel_card_id {
            Some(id) => format!("WHERE hotel_card_id = '{}'", id),
            None => String::new(),
        };
        let sql = format!(
            "SELECT {} FROM hotel_details {} ORDER BY created_at ASC",
            HOTEL_DETAILS_COLS, where_clause
        );

        sqlx::query_as::<_, HotelDetails>(&sql)
            .fetch_all(pool)
            .await
            .map_err(map_db_err)
    }

    pub async fn get_hotel_details(pool: &PgPool, id: Uuid) -> Result<HotelDetails, ApiError> {
        let sql = format!("SELECT {} FROM hotel_details WHERE id = $1", HOTEL_DETAILS_COLS);

        sqlx::query_as::<_, HotelDetails>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| ApiError::NotFound(format!("Hotel details '{}' not found", id)))
    }

    pub async fn details_by_card(
        pool: &PgPool,
        hotel_card_id: Uuid,
    ) -> Result<Option<HotelDetails>, ApiError> {
        let sql = format!(
            "SELECT {} FROM hotel_details WHERE hotel_card_id = $1",
            HOTEL_DETAILS_COLS
        );

        sqlx::query_as::<_, HotelDetails>(&sql)
            .bind(hotel_card_id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_err)
    }

    pub async fn create_hotel_details(
        pool: &PgPool,
        req: &CreateHotelDetailsRequest,
    ) -> Result<HotelDetails, ApiError> {
        let _ = Self::get_hotel_card(pool, req.hotel_card_id).await?;
        let _ = Self::get_address(pool, req.address_id).await?;

        let sql = format!(
            r#"
            INSERT INTO hotel_details
                (hotel_card_id, address_id, description, check_in_time, check_out_time,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            RETURNING {}
            "#,
            HOTEL_DETAILS_COLS
        );

        sqlx::query_as::<_, HotelDetails>(&sql)
            .bind(req.hotel_card_id)
            .bind(req.address_id)
            .bind(&req.description)
            .bind(&req.check_in_time)
            .bind(&req.check_out_time)
            .fetch_one(pool)
            .await
            .map_err(map_db_err)
    }

    pub async fn update_hotel_details(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateHotelDetailsRequest,
    ) -> Result<HotelDetails, ApiError> {
        if let Some(address_id) = req.address_id {
            let _ = Self::get_address(pool, address_id).await?;
        }

        let sql = format!(
            r#"
            UPDATE hotel_details
            SET address_id = COALESCE($1, address_id),
                description = COALESCE($2, description),
                check_in_time = COALESCE($3, check_in_time),
                check_out_time = COALESCE($4, check_out_time),
                updated_at = NOW()
            WHERE id = $5
            RETURNING {}
            "#,
            HOTEL_DETAILS_COLS
        );

        sqlx::query_as::<_, HotelDetails>(&sql)
            .bind(req.address_id)
            .bind(&req.description)
            .bind(&req.check_in_time)
            .bind(&req.check_out_time)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| ApiError::NotFound(format!("Hotel details '{}' not found", id)))
    }

    /// Details rows have no dependents; delete is unconditional
    pub async fn delete_hotel_details(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let rows = sqlx::query("DELETE FROM hotel_details WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(map_db_err)?
            .rows_affected();

        if rows == 0 {
            return Err(ApiError::NotFound(format!(
                "Hotel details '{}' not found",
                id
            )));
        }
        Ok(())
    }
}
