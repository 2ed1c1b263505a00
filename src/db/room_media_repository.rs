// src/db/room_media_repository.rs
// DOCUMENTATION: Database access for hotel rooms and images

use crate::db::hotel_repository::HotelRepository;
use crate::db::map_db_err;
use crate::errors::ApiError;
use crate::models::*;
use sqlx::PgPool;
use uuid::Uuid;

const ROOM_COLS: &str = "id, hotel_card_id, name, capacity, price_per_night, sort_order, \
     created_at, updated_at";
const IMAGE_COLS: &str = "id, hotel_card_id, url, alt_text, is_primary, sort_order, \
     created_at, updated_at";

/// RoomMediaRepository: rooms and gallery images
pub struct RoomMediaRepository;

impl RoomMediaRepository {
    // ---- Rooms ----

    pub async fn list_rooms(
        pool: &PgPool,
        query: &RoomListQuery,
    ) -> Result<Vec<HotelRoom>, ApiError> {
        let mut where_clauses: Vec<String> = Vec::new();

        if let Some(hotel_card_id) = query.hotel_card_id {
            where_clauses.push(format!("hotel_card_id = '{}'", hotel_card_id));
        }
        if let Some(min_capacity) = query.min_capacity {
            where_clauses.push(format!("capacity >= {}", min_capacity));
        }
        if let Some(max_price) = query.max_price {
            where_clauses.push(format!("price_per_night <= {}", max_price));
        }

        let where_clause = if where_clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", where_clauses.join(" AND "))
        };

        let sql = format!(
            "SELECT {} FROM hotel_rooms {} ORDER BY sort_order ASC, price_per_night ASC",
            ROOM_COLS, where_clause
        );

        sqlx::query_as::<_, HotelRoom>(&sql)
            .fetch_all(pool)
            .await
            .map_err(map_db_err)
    }

    pub async fn get_room(pool: &PgPool, id: Uuid) -> Result<HotelRoom, ApiError> {
        let sql = format!("SELECT {} FROM hotel_rooms WHERE id = $1", ROOM_COLS);

        sqlx::query_as::<_, HotelRoom>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| ApiError::NotFound(format!("Room '{}' not found", id)))
    }

    pub async fn create_room(pool: &PgPool, req: &CreateRoomRequest) -> Result<HotelRoom, ApiError> {
        let _ = HotelRepository::get_hotel_card(pool, req.hotel_card_id).await?;

        let sql = format!(
            r#"
            INSERT INTO hotel_rooms
                (hotel_card_id, name, capacity, price_per_night, sort_order,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, COALESCE($5, 0), NOW(), NOW())
            RETURNING {}
            "#,
            ROOM_COLS
        );

        sqlx::query_as::<_, HotelRoom>(&sql)
            .bind(req.hotel_card_id)
            .bind(&req.name)
            .bind(req.capacity)
            .bind(req.price_per_night)
            .bind(req.sort_order)
            .fetch_one(pool)
            .await
            .map_err(map_db_err)
    }

    pub async fn update_room(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateRoomRequest,
    ) -> Result<HotelRoom, ApiError> {
        let sql = format!(
            r#"
            UPDATE hotel_rooms
            SET name = COALESCE($1, name),
                capacity = COALESCE($2, capacity),
                price_per_night = COALESCE($3, price_per_night),
                sort_order = COALESCE($4, sort_order),
                updated_at = NOW()
            WHERE id = $5
            RETURNING {}
            "#,
            ROOM_COLS
        );

        sqlx::query_as::<_, HotelRoom>(&sql)
            .bind(&req.name)
            .bind(req.capacity)
            .bind(req.price_per_night)
            .bind(req.sort_order)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| ApiError::NotFound(format!("Room '{}' not found", id)))
    }

    pub async fn delete_room(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let rows = sqlx::query("DELETE FROM hotel_rooms WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(map_db_err)?
            .rows_affected();

        if rows == 0 {
            return Err(ApiError::NotFound(format!("Room '{}' not found", id)));
        }
        Ok(())
    }

    pub async fn rooms_by_card(
        pool: &PgPool,
        hotel_card_id: Uuid,
    ) -> Result<Vec<HotelRoom>, ApiError> {
        let sql = format!(
            "SELECT {} FROM hotel_rooms WHERE hotel_card_id = $1 \
             ORDER BY sort_order ASC, price_per_night ASC",
            ROOM_COLS
        );

        sqlx::query_as::<_, HotelRoom>(&sql)
            .bind(hotel_card_id)
            .fetch_all(pool)
            .await
            .map_err(map_db_err)
    }

    // ---- Images ----

    pub async fn list_images(
        pool: &PgPool,
        query: &ImageListQuery,
    ) -> Result<Vec<HotelImage>, ApiError> {
        let mut where_clauses: Vec<String> = Vec::new();

        if let Some(hotel_card_id) = query.hotel_card_id {
            where_clauses.push(format!("hotel_card_id = '{}'", hotel_card_id));
        }
        if let Some(is_primary) = query.is_primary {
            where_clauses.push(format!("is_primary = {}", is_primary));
        }

        let where_clause = if where_clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", where_clauses.join(" AND "))
        };

        let sql = format!(
            "SELECT {} FROM hotel_images {} ORDER BY is_primary DESC, sort_order ASC",
            IMAGE_COLS, where_clause
        );

        sqlx::query_as::<_, HotelImage>(&sql)
            .fetch_all(pool)
            .await
            .map_err(map_db_err)
    }

    pub async fn get_image(pool: &PgPool, id: Uuid) -> Result<HotelImage, ApiError> {
        let sql = format!("SELECT {} FROM hotel_images WHERE id = $1", IMAGE_COLS);

        sqlx::query_as::<_, HotelImage>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| ApiError::NotFound(format!("Image '{}' not found", id)))
    }

    pub async fn create_image(
        pool: &PgPool,
        req: &CreateImageRequest,
    ) -> Result<HotelImage, ApiError> {
        let _ = HotelRepository::get_hotel_card(pool, req.hotel_card_id).await?;

        let sql = format!(
            r#"
            INSERT INTO hotel_images
                (hotel_card_id, url, alt_text, is_primary, sort_order, created_at, updated_at)
            VALUES ($1, $2, $3, COALESCE($4, false), COALESCE($5, 0), NOW(), NOW())
            RETURNING {}
            "#,
            IMAGE_COLS
        );

        sqlx::query_as::<_, HotelImage>(&sql)
            .bind(req.hotel_card_id)
            .bind(&req.url)
            .bind(&req.alt_text)
            .bind(req.is_primary)
            .bind(req.sort_order)
            .fetch_one(pool)
            .await
            .map_err(map_db_err)
    }

    pub async fn update_image(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateImageRequest,
    ) -> Result<HotelImage, ApiError> {
        let sql = format!(
            r#"
            UPDATE hotel_images
            SET url = COALESCE($1, url),
                alt_text = COALESCE($2, alt_text),
                is_primary = COALESCE($3, is_primary),
                sort_order = COALESCE($4, sort_order),
                updated_at = NOW()
            WHERE id = $5
            RETURNING {}
            "#,
            IMAGE_COLS
        );

        sqlx::query_as::<_, HotelImage>(&sql)
            .bind(&req.url)
            .bind(&req.alt_text)
            .bind(req.is_primary)
            .bind(req.sort_order)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| ApiError::NotFound(format!("Image '{}' not found", id)))
    }

    pub async fn delete_image(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let rows = sqlx::query("DELETE FROM hotel_images WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(map_db_err)?
            .rows_affected();

        if rows == 0 {
            return Err(ApiError::NotFound(format!("Image '{}' not found", id)));
        }
        Ok(())
    }

    pub async fn images_by_card(
        pool: &PgPool,
        hotel_card_id: Uuid,
    ) -> Result<Vec<HotelImage>, ApiError> {
        let sql = format!(
            "SELECT {} FROM hotel_images WHERE hotel_card_id = $1 \
             ORDER BY is_primary DESC, sort_order ASC",
            IMAGE_COLS
        );

        sqlx::query_as::<_, HotelImage>(&sql)
            .bind(hotel_card_id)
            .fetch_all(pool)
            .await
            .map_err(map_db_err)
    }

    /// Primary image for the basic public payload (first by ordering)
    pub async fn primary_image(
        pool: &PgPool,
        hotel_card_id: Uuid,
    ) -> Result<Option<HotelImage>, ApiError> {
        let sql = format!(
            "SELECT {} FROM hotel_images WHERE hotel_card_id = $1 \
             ORDER BY is_primary DESC, sort_order ASC LIMIT 1",
            IMAGE_COLS
        );

        sqlx::query_as::<_, HotelImage>(&sql)
            .bind(hotel_card_id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_err)
    }
}
