// src/db/catalog_repository.rs
// DOCUMENTATION: Database access for amenities, labels and highlights,
// including the hotel-card link tables that carry per-link ordering

use crate::db::hotel_repository::HotelRepository;
use crate::db::{map_db_err, sql_escape};
use crate::errors::ApiError;
use crate::models::*;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

const AMENITY_COLS: &str = "id, name, icon, category, sort_order, created_at, updated_at";
const LABEL_COLS: &str = "id, name, code, color, sort_order, created_at, updated_at";
const HIGHLIGHT_COLS: &str =
    "id, hotel_card_id, title, icon, sort_order, created_at, updated_at";

/// CatalogRepository: amenities, labels, highlights and their links
pub struct CatalogRepository;

impl CatalogRepository {
    // ---- Amenities ----

    pub async fn list_amenities(
        pool: &PgPool,
        query: &AmenityListQuery,
    ) -> Result<Vec<HotelAmenity>, ApiError> {
        let mut where_clauses: Vec<String> = Vec::new();

        if let Some(category) = &query.category {
            where_clauses.push(format!("category = '{}'", sql_escape(category)));
        }
        if let Some(name) = &query.name {
            where_clauses.push(format!("name ILIKE '%{}%'", sql_escape(name)));
        }

        let where_clause = if where_clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", where_clauses.join(" AND "))
        };

        let sql = format!(
            "SELECT {} FROM hotel_amenities {} ORDER BY sort_order ASC, name ASC",
            AMENITY_COLS, where_clause
        );

        sqlx::query_as::<_, HotelAmenity>(&sql)
            .fetch_all(pool)
            .await
            .map_err(map_db_err)
    }

    pub async fn get_amenity(pool: &PgPool, id: Uuid) -> Result<HotelAmenity, ApiError> {
        let sql = format!("SELECT {} FROM hotel_amenities WHERE id = $1", AMENITY_COLS);

        sqlx::query_as::<_, HotelAmenity>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| ApiError::NotFound(format!("Amenity '{}' not found", id)))
    }

    pub async fn create_amenity(
        pool: &PgPool,
        req: &CreateAmenityRequest,
    ) -> Result<HotelAmenity, ApiError> {
        let sql = format!(
            r#"
            INSERT INTO hotel_amenities (name, icon, category, sort_order, created_at, updated_at)
            VALUES ($1, $2, $3, COALESCE($4, 0), NOW(), NOW())
            RETURNING {}
            "#,
            AMENITY_COLS
        );

        sqlx::query_as::<_, HotelAmenity>(&sql)
            .bind(&req.name)
            .bind(&req.icon)
            .bind(&req.category)
            .bind(req.sort_order)
            .fetch_one(pool)
            .await
            .map_err(map_db_err)
    }

    pub async fn update_amenity(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateAmenityRequest,
    ) -> Result<HotelAmenity, ApiError> {
        let sql = format!(
            r#"
            UPDATE hotel_amenities
            SET name = COALESCE($1, name),
                icon = COALESCE($2, icon),
                category = COALESCE($3, category),
                sort_order = COALESCE($4, sort_order),
                updated_at = NOW()
            WHERE id = $5
            RETURNING {}
            "#,
            AMENITY_COLS
        );

        sqlx::query_as::<_, HotelAmenity>(&sql)
            .bind(&req.name)
            .bind(&req.icon)
            .bind(&req.category)
            .bind(req.sort_order)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| ApiError::NotFound(format!("Amenity '{}' not found", id)))
    }

    pub async fn delete_amenity(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let links: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM hotel_card_amenities WHERE amenity_id = $1")
                .bind(id)
                .fetch_one(pool)
                .await
                .map_err(map_db_err)?;

        if links.0 > 0 {
            return Err(ApiError::DeleteBlocked {
                message: "Amenity has dependent records".to_string(),
                details: json!({ "hotel_cards": links.0 }),
            });
        }

        let rows = sqlx::query("DELETE FROM hotel_amenities WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(map_db_err)?
            .rows_affected();

        if rows == 0 {
            return Err(ApiError::NotFound(format!("Amenity '{}' not found", id)));
        }
        Ok(())
    }

    /// Amenities linked to a hotel card, ordered by the join table
    pub async fn amenities_by_card(
        pool: &PgPool,
        hotel_card_id: Uuid,
    ) -> Result<Vec<LinkedAmenity>, ApiError> {
        sqlx::query_as::<_, LinkedAmenity>(
            r#"
            SELECT a.id, a.name, a.icon, a.category, a.sort_order,
                   a.created_at, a.updated_at,
                   ca.sort_order AS link_order
            FROM hotel_card_amenities ca
            JOIN hotel_amenities a ON a.id = ca.amenity_id
            WHERE ca.hotel_card_id = $1
            ORDER BY ca.sort_order ASC, a.name ASC
            "#,
        )
        .bind(hotel_card_id)
        .fetch_all(pool)
        .await
        .map_err(map_db_err)
    }

    pub async fn link_amenity(
        pool: &PgPool,
        hotel_card_id: Uuid,
        req: &LinkRequest,
    ) -> Result<(), ApiError> {
        let _ = HotelRepository::get_hotel_card(pool, hotel_card_id).await?;
        let _ = Self::get_amenity(pool, req.target_id).await?;

        sqlx::query(
            r#"
            INSERT INTO hotel_card_amenities (hotel_card_id, amenity_id, sort_order)
            VALUES ($1, $2, COALESCE($3, 0))
            "#,
        )
        .bind(hotel_card_id)
        .bind(req.target_id)
        .bind(req.sort_order)
        .execute(pool)
        .await
        .map_err(map_db_err)?;

        Ok(())
    }

    pub async fn unlink_amenity(
        pool: &PgPool,
        hotel_card_id: Uuid,
        amenity_id: Uuid,
    ) -> Result<(), ApiError> {
        let rows = sqlx::query(
            "DELETE FROM hotel_card_amenities WHERE hotel_card_id = $1 AND amenity_id = $2",
        )
        .bind(hotel_card_id)
        .bind(amenity_id)
        .execute(pool)
        .await
        .map_err(map_db_err)?
        .rows_affected();

        if rows == 0 {
            return Err(ApiError::NotFound(
                "Amenity is not linked to this hotel card".to_string(),
            ));
        }
        Ok(())
    }

    // ---- Labels ----

    pub async fn list_labels(pool: &PgPool, name: Option<&str>) -> Result<Vec<Label>, ApiError> {
        let where_clause = match name {
            Some(n) => format!("WHERE name ILIKE '%{}%'", sql_escape(n)),
            None => String::new(),
        };
        let sql = format!(
            "SELECT {} FROM labels {} ORDER BY sort_order ASC, name ASC",
            LABEL_COLS, where_clause
        );

        sqlx::query_as::<_, Label>(&sql)
            .fetch_all(pool)
            .await
            .map_err(map_db_err)
    }

    pub async fn get_label(pool: &PgPool, id: Uuid) -> Result<Label, ApiError> {
        let sql = format!("SELECT {} FROM labels WHERE id = $1", LABEL_COLS);

        sqlx::query_as::<_, Label>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| ApiError::NotFound(format!("Label '{}' not found", id)))
    }

    pub async fn create_label(pool: &PgPool, req: &CreateLabelRequest) -> Result<Label, ApiError> {
        let sql = format!(
            r#"
            INSERT INTO labels (name, code, color, sort_order, created_at, updated_at)
            VALUES ($1, $2, $3, COALESCE($4, 0), NOW(), NOW())
            RETURNING {}
            "#,
            LABEL_COLS
        );

        sqlx::query_as::<_, Label>(&sql)
            .bind(&req.name)
            .bind(&req.code)
            .bind(&req.color)
            .bind(req.sort_order)
            .fetch_one(pool)
            .await
            .map_err(map_db_err)
    }

    pub async fn update_label(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateLabelRequest,
    ) -> Result<Label, ApiError> {
        let sql = format!(
            r#"
            UPDATE labels
            SET name = COALESCE($1, name),
                code = COALESCE($2, code),
                color = COALESCE($3, color),
                sort_order = COALESCE($4, sort_order),
                updated_at = NOW()
            WHERE id = $5
            RETURNING {}
            "#,
            LABEL_COLS
        );

        sqlx::query_as::<_, Label>(&sql)
            .bind(&req.name)
            .bind(&req.code)
            .bind(&req.color)
            .bind(req.sort_order)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| ApiError::NotFound(format!("Label '{}' not found", id)))
    }

    pub async fn delete_label(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let links: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM hotel_card_labels WHERE label_id = $1")
                .bind(id)
                .fetch_one(pool)
                .await
                .map_err(map_db_err)?;

        if links.0 > 0 {
            return Err(ApiError::DeleteBlocked {
                message: "Label has dependent records".to_string(),
                details: json!({ "hotel_cards": links.0 }),
            });
        }

        let rows = sqlx::query("DELETE FROM labels WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(map_db_err)?
            .rows_affected();

        if rows == 0 {
            return Err(ApiError::NotFound(format!("Label '{}' not found", id)));
        }
        Ok(())
    }

    /// Labels linked to a hotel card, ordered by the join table
    pub async fn labels_by_card(
        pool: &PgPool,
        hotel_card_id: Uuid,
    ) -> Result<Vec<LinkedLabel>, ApiError> {
        sqlx::query_as::<_, LinkedLabel>(
            r#"
            SELECT l.id, l.name, l.code, l.color, l.sort_order,
                   l.created_at, l.updated_at,
                   cl.sort_order AS link_order
            FROM hotel_card_labels cl
            JOIN labels l ON l.id = cl.label_id
            WHERE cl.hotel_card_id = $1
            ORDER BY cl.sort_order ASC, l.name ASC
            "#,
        )
        .bind(hotel_card_id)
        .fetch_all(pool)
        .await
        .map_err(map_db_err)
    }

    pub async fn link_label(
        pool: &PgPool,
        hotel_card_id: Uuid,
        req: &LinkRequest,
    ) -> Result<(), ApiError> {
        let _ = HotelRepository::get_hotel_card(pool, hotel_card_id).await?;
        let _ = Self::get_label(pool, req.target_id).await?;

        sqlx::query(
            r#"
            INSERT INTO hotel_card_labels (hotel_card_id, label_id, sort_order)
            VALUES ($1, $2, COALESCE($3, 0))
            "#,
        )
        .bind(hotel_card_id)
        .bind(req.target_id)
        .bind(req.sort_order)
        .execute(pool)
        .await
        .map_err(map_db_err)?;

        Ok(())
    }

    pub async fn unlink_label(
        pool: &PgPool,
        hotel_card_id: Uuid,
        label_id: Uuid,
    ) -> Result<(), ApiError> {
        let rows = sqlx::query(
            "DELETE FROM hotel_card_labels WHERE hotel_card_id = $1 AND label_id = $2",
        )
        .bind(hotel_card_id)
        .bind(label_id)
        .execute(pool)
        .await
        .map_err(map_db_err)?
        .rows_affected();

        if rows == 0 {
            return Err(ApiError::NotFound(
                "Label is not linked to this hotel card".to_string(),
            ));
        }
        Ok(())
    }

    // ---- Highlights ----

    pub async fn list_highlights(
        pool: &PgPool,
        query: &HighlightListQuery,
    ) -> Result<Vec<HotelHighlight>, ApiError> {
        let where_clause = match query.hotel_card_id {
            Some(id) => format!("WHERE hotel_card_id = '{}'", id),
            None => String::new(),
        };
        let sql = format!(
            "SELECT {} FROM hotel_highlights {} ORDER BY sort_order ASC, title ASC",
            HIGHLIGHT_COLS, where_clause
        );

        sqlx::query_as::<_, HotelHighlight>(&sql)
            .fetch_all(pool)
            .await
            .map_err(map_db_err)
    }

    pub async fn get_highlight(pool: &PgPool, id: Uuid) -> Result<HotelHighlight, ApiError> {
        let sql = format!("SELECT {} FROM hotel_highlights WHERE id = $1", HIGHLIGHT_COLS);

        sqlx::query_as::<_, HotelHighlight>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| ApiError::NotFound(format!("Highlight '{}' not found", id)))
    }

    pub async fn create_highlight(
        pool: &PgPool,
        req: &CreateHighlightRequest,
    ) -> Result<HotelHighlight, ApiError> {
        let _ = HotelRepository::get_hotel_card(pool, req.hotel_card_id).await?;

        let sql = format!(
            r#"
            INSERT INTO hotel_highlights
                (hotel_card_id, title, icon, sort_order, created_at, updated_at)
            VALUES ($1, $2, $3, COALESCE($4, 0), NOW(), NOW())
            RETURNING {}
            "#,
            HIGHLIGHT_COLS
        );

        sqlx::query_as::<_, HotelHighlight>(&sql)
            .bind(req.hotel_card_id)
            .bind(&req.title)
            .bind(&req.icon)
            .bind(req.sort_order)
            .fetch_one(pool)
            .await
            .map_err(map_db_err)
    }

    pub async fn update_highlight(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateHighlightRequest,
    ) -> Result<HotelHighlight, ApiError> {
        let sql = format!(
            r#"
            UPDATE hotel_highlights
            SET title = COALESCE($1, title),
                icon = COALESCE($2, icon),
                sort_order = COALESCE($3, sort_order),
                updated_at = NOW()
            WHERE id = $4
            RETURNING {}
            "#,
            HIGHLIGHT_COLS
        );

        sqlx::query_as::<_, HotelHighlight>(&sql)
            .bind(&req.title)
            .bind(&req.icon)
            .bind(req.sort_order)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| ApiError::NotFound(format!("Highlight '{}' not found", id)))
    }

    /// Highlights have no dependents; delete is unconditional
    pub async fn delete_highlight(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let rows = sqlx::query("DELETE FROM hotel_highlights WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(map_db_err)?
            .rows_affected();

        if rows == 0 {
            return Err(ApiError::NotFound(format!("Highlight '{}' not found", id)));
        }
        Ok(())
    }

    /// Highlights of a hotel card, for the public aggregate
    pub async fn highlights_by_card(
        pool: &PgPool,
        hotel_card_id: Uuid,
    ) -> Result<Vec<HotelHighlight>, ApiError> {
        let sql = format!(
            "SELECT {} FROM hotel_highlights WHERE hotel_card_id = $1 \
             ORDER BY sort_order ASC, title ASC",
            HIGHLIGHT_COLS
        );

        sqlx::query_as::<_, HotelHighlight>(&sql)
            .bind(hotel_card_id)
            .fetch_all(pool)
            .await
            .map_err(map_db_err)
    }
}
