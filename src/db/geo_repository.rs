// src/db/geo_repository.rs
// DOCUMENTATION: Database access for geography resources
// PURPOSE: Countries, cities, neighborhoods, landmarks, destinations and
// the city-destination join table

use crate::db::{map_db_err, sql_escape};
use crate::errors::ApiError;
use crate::models::*;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

const COUNTRY_COLS: &str = "id, name, code, sort_order, created_at, updated_at";
const CITY_COLS: &str = "id, country_id, name, popularity, sort_order, created_at, updated_at";
const NEIGHBORHOOD_COLS: &str = "id, city_id, name, sort_order, created_at, updated_at";
const LANDMARK_COLS: &str =
    "id, city_id, name, category, latitude, longitude, sort_order, created_at, updated_at";
const DESTINATION_COLS: &str = "id, name, slug, sort_order, created_at, updated_at";

/// GeoRepository: all database operations for geography entities
pub struct GeoRepository;

impl GeoRepository {
    // ---- Countries ----

    pub async fn list_countries(
        pool: &PgPool,
        name: Option<&str>,
    ) -> Result<Vec<Country>, ApiError> {
        let where_clause = match name {
            Some(n) => format!("WHERE name ILIKE '%{}%'", sql_escape(n)),
            None => String::new(),
        };
        let sql = format!(
            "SELECT {} FROM countries {} ORDER BY sort_order ASC, name ASC",
            COUNTRY_COLS, where_clause
        );

        sqlx::query_as::<_, Country>(&sql)
            .fetch_all(pool)
            .await
            .map_err(map_db_err)
    }

    pub async fn get_country(pool: &PgPool, id: Uuid) -> Result<Country, ApiError> {
        let sql = format!("SELECT {} FROM countries WHERE id = $1", COUNTRY_COLS);

        sqlx::query_as::<_, Country>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| ApiError::NotFound(format!("Country '{}' not found", id)))
    }

    pub async fn create_country(
        pool: &PgPool,
        req: &CreateCountryRequest,
    ) -> Result<Country, ApiError> {
        let sql = format!(
            r#"
            INSERT INTO countries (name, code, sort_order, created_at, updated_at)
            VALUES ($1, $2, COALESCE($3, 0), NOW(), NOW())
            RETURNING {}
            "#,
            COUNTRY_COLS
        );

        let country = sqlx::query_as::<_, Country>(&sql)
            .bind(&req.name)
            .bind(&req.code)
            .bind(req.sort_order)
            .fetch_one(pool)
            .await
            .map_err(map_db_err)?;

        log::info!("Created country {} ({})", country.code, country.id);
        Ok(country)
    }

    pub async fn update_country(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateCountryRequest,
    ) -> Result<Country, ApiError> {
        let sql = format!(
            r#"
            UPDATE countries
            SET name = COALESCE($1, name),
                code = COALESCE($2, code),
                sort_order = COALESCE($3, sort_order),
                updated_at = NOW()
            WHERE id = $4
            RETURNING {}
            "#,
            COUNTRY_COLS
        );

        sqlx::query_as::<_, Country>(&sql)
            .bind(&req.name)
            .bind(&req.code)
            .bind(req.sort_order)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| ApiError::NotFound(format!("Country '{}' not found", id)))
    }

    pub async fn delete_country(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let cities: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cities WHERE country_id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
            .map_err(map_db_err)?;

        if cities.0 > 0 {
            return Err(ApiError::DeleteBlocked {
                message: "Country has dependent records".to_string(),
                details: json!({ "cities": cities.0 }),
            });
        }

        let rows = sqlx::query("DELETE FROM countries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(map_db_err)?
            .rows_affected();

        if rows == 0 {
            return Err(ApiError::NotFound(format!("Country '{}' not found", id)));
        }

        log::info!("Deleted country {}", id);
        Ok(())
    }

    // ---- Cities ----

    pub async fn list_cities(
        pool: &PgPool,
        query: &CityListQuery,
    ) -> Result<Vec<City>, ApiError> {
        let mut where_clauses: Vec<String> = Vec::new();

        if let Some(country_id) = query.country_id {
            where_clauses.push(format!("country_id = '{}'", country_id));
        }
        if let Some(name) = &query.name {
            where_clauses.push(format!("name ILIKE '%{}%'", sql_escape(name)));
        }
        if let Some(min_popularity) = query.min_popularity {
            where_clauses.push(format!("popularity >= {}", min_popularity));
        }

        let where_clause = if where_clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", where_clauses.join(" AND "))
        };

        let sql = format!(
            "SELECT {} FROM cities {} ORDER BY sort_order ASC, popularity DESC, name ASC",
            CITY_COLS, where_clause
        );

        sqlx::query_as::<_, City>(&sql)
            .fetch_all(pool)
            .await
            .map_err(map_db_err)
    }

    pub async fn get_city(pool: &PgPool, id: Uuid) -> Result<City, ApiError> {
        let sql = format!("SELECT {} FROM cities WHERE id = $1", CITY_COLS);

        sqlx::query_as::<_, City>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| ApiError::NotFound(format!("City '{}' not found", id)))
    }

    pub async fn create_city(pool: &PgPool, req: &CreateCityRequest) -> Result<City, ApiError> {
        // Parent lookup first so a missing country is a clean 404
        let _ = Self::get_country(pool, req.country_id).await?;

        let sql = format!(
            r#"
            INSERT INTO cities (country_id, name, popularity, sort_order, created_at, updated_at)
            VALUES ($1, $2, COALESCE($3, 0), COALESCE($4, 0), NOW(), NOW())
            RETURNING {}
            "#,
            CITY_COLS
        );

        let city = sqlx::query_as::<_, City>(&sql)
            .bind(req.country_id)
            .bind(&req.name)
            .bind(req.popularity)
            .bind(req.sort_order)
            .fetch_one(pool)
            .await
            .map_err(map_db_err)?;

        log::info!("Created city {} ({})", city.name, city.id);
        Ok(city)
    }

    pub async fn update_city(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateCityRequest,
    ) -> Result<City, ApiError> {
        if let Some(country_id) = req.country_id {
            let _ = Self::get_country(pool, country_id).await?;
        }

        let sql = format!(
            r#"
            UPDATE cities
            SET country_id = COALESCE($1, country_id),
                name = COALESCE($2, name),
                popularity = COALESCE($3, popularity),
                sort_order = COALESCE($4, sort_order),
                updated_at = NOW()
            WHERE id = $5
            RETURNING {}
            "#,
            CITY_COLS
        );

        sqlx::query_as::<_, City>(&sql)
            .bind(req.country_id)
            .bind(&req.name)
            .bind(req.popularity)
            .bind(req.sort_order)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| ApiError::NotFound(format!("City '{}' not found", id)))
    }

    pub async fn delete_city(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let counts: (i64, i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM neighborhoods WHERE city_id = $1),
                (SELECT COUNT(*) FROM landmarks WHERE city_id = $1),
                (SELECT COUNT(*) FROM addresses WHERE city_id = $1),
                (SELECT COUNT(*) FROM city_destinations WHERE city_id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(map_db_err)?;

        let (neighborhoods, landmarks, addresses, destinations) = counts;
        if neighborhoods + landmarks + addresses + destinations > 0 {
            return Err(ApiError::DeleteBlocked {
                message: "City has dependent records".to_string(),
                details: json!({
                    "neighborhoods": neighborhoods,
                    "landmarks": landmarks,
                    "addresses": addresses,
                    "destinations": destinations,
                }),
            });
        }

        let rows = sqlx::query("DELETE FROM cities WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(map_db_err)?
            .rows_affected();

        if rows == 0 {
            return Err(ApiError::NotFound(format!("City '{}' not found", id)));
        }

        log::info!("Deleted city {}", id);
        Ok(())
    }

    /// Cities of every listed country in one query (list include expansion)
    pub async fn cities_by_country(pool: &PgPool, country_id: Uuid) -> Result<Vec<City>, ApiError> {
        let sql = format!(
            "SELECT {} FROM cities WHERE country_id = $1 ORDER BY sort_order ASC, name ASC",
            CITY_COLS
        );

        sqlx::query_as::<_, City>(&sql)
            .bind(country_id)
            .fetch_all(pool)
            .await
            .map_err(map_db_err)
    }

    // ---- Neighborhoods ----

    pub async fn list_neighborhoods(
        pool: &PgPool,
        query: &NeighborhoodListQuery,
    ) -> Result<Vec<Neighborhood>, ApiError> {
        let mut where_clauses: Vec<String> = Vec::new();

        if let Some(city_id) = query.city_id {
            where_clauses.push(format!("city_id = '{}'", city_id));
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
            "SELECT {} FROM neighborhoods {} ORDER BY sort_order ASC, name ASC",
            NEIGHBORHOOD_COLS, where_clause
        );

        sqlx::query_as::<_, Neighborhood>(&sql)
            .fetch_all(pool)
            .await
            .map_err(map_db_err)
    }

    pub async fn get_neighborhood(pool: &PgPool, id: Uuid) -> Result<Neighborhood, ApiError> {
        let sql = format!(
            "SELECT {} FROM neighborhoods WHERE id = $1",
            NEIGHBORHOOD_COLS
        );

        sqlx::query_as::<_, Neighborhood>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| ApiError::NotFound(format!("Neighborhood '{}' not found", id)))
    }

    pub async fn create_neighborhood(
        pool: &PgPool,
        req: &CreateNeighborhoodRequest,
    ) -> Result<Neighborhood, ApiError> {
        let _ = Self::get_city(pool, req.city_id).await?;

        let sql = format!(
            r#"
            INSERT INTO neighborhoods (city_id, name, sort_order, created_at, updated_at)
            VALUES ($1, $2, COALESCE($3, 0), NOW(), NOW())
            RETURNING {}
            "#,
            NEIGHBORHOOD_COLS
        );

        sqlx::query_as::<_, Neighborhood>(&sql)
            .bind(req.city_id)
            .bind(&req.name)
            .bind(req.sort_order)
            .fetch_one(pool)
            .await
            .map_err(map_db_err)
    }

    pub async fn update_neighborhood(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateNeighborhoodRequest,
    ) -> Result<Neighborhood, ApiError> {
        if let Some(city_id) = req.city_id {
            let _ = Self::get_city(pool, city_id).await?;
        }

        let sql = format!(
            r#"
            UPDATE neighborhoods
            SET city_id = COALESCE($1, city_id),
                name = COALESCE($2, name),
                sort_order = COALESCE($3, sort_order),
                updated_at = NOW()
            WHERE id = $4
            RETURNING {}
            "#,
            NEIGHBORHOOD_COLS
        );

        sqlx::query_as::<_, Neighborhood>(&sql)
            .bind(req.city_id)
            .bind(&req.name)
            .bind(req.sort_order)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| ApiError::NotFound(format!("Neighborhood '{}' not found", id)))
    }

    pub async fn delete_neighborhood(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let addresses: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM addresses WHERE neighborhood_id = $1")
                .bind(id)
                .fetch_one(pool)
                .await
                .map_err(map_db_err)?;

        if addresses.0 > 0 {
            return Err(ApiError::DeleteBlocked {
                message: "Neighborhood has dependent records".to_string(),
                details: json!({ "addresses": addresses.0 }),
            });
        }

        let rows = sqlx::query("DELETE FROM neighborhoods WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(map_db_err)?
            .rows_affected();

        if rows == 0 {
            return Err(ApiError::NotFound(format!(
                "Neighborhood '{}' not found",
                id
            )));
        }
        Ok(())
    }

    pub async fn neighborhoods_by_city(
        pool: &PgPool,
        city_id: Uuid,
    ) -> Result<Vec<Neighborhood>, ApiError> {
        let sql = format!(
            "SELECT {} FROM neighborhoods WHERE city_id = $1 ORDER BY sort_order ASC, name ASC",
            NEIGHBORHOOD_COLS
        );

        sqlx::query_as::<_, Neighborhood>(&sql)
            .bind(city_id)
            .fetch_all(pool)
            .await
            .map_err(map_db_err)
    }

    // ---- Landmarks ----

    pub async fn list_landmarks(
        pool: &PgPool,
        query: &LandmarkListQuery,
    ) -> Result<Vec<Landmark>, ApiError> {
        let mut where_clauses: Vec<String> = Vec::new();

        if let Some(city_id) = query.city_id {
            where_clauses.push(format!("city_id = '{}'", city_id));
        }
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
            "SELECT {} FROM landmarks {} ORDER BY sort_order ASC, name ASC",
            LANDMARK_COLS, where_clause
        );

        sqlx::query_as::<_, Landmark>(&sql)
            .fetch_all(pool)
            .await
            .map_err(map_db_err)
    }

    pub async fn get_landmark(pool: &PgPool, id: Uuid) -> Result<Landmark, ApiError> {
        let sql = format!("SELECT {} FROM landmarks WHERE id = $1", LANDMARK_COLS);

        sqlx::query_as::<_, Landmark>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| ApiError::NotFound(format!("Landmark '{}' not found", id)))
    }

    pub async fn create_landmark(
        pool: &PgPool,
        req: &CreateLandmarkRequest,
    ) -> Result<Landmark, ApiError> {
        let _ = Self::get_city(pool, req.city_id).await?;

        let sql = format!(
            r#"
            INSERT INTO landmarks
                (city_id, name, category, latitude, longitude, sort_order, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, COALESCE($6, 0), NOW(), NOW())
            RETURNING {}
            "#,
            LANDMARK_COLS
        );

        sqlx::query_as::<_, Landmark>(&sql)
            .bind(req.city_id)
            .bind(&req.name)
            .bind(&req.category)
            .bind(req.latitude)
            .bind(req.longitude)
            .bind(req.sort_order)
            .fetch_one(pool)
            .await
            .map_err(map_db_err)
    }

    pub async fn update_landmark(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateLandmarkRequest,
    ) -> Result<Landmark, ApiError> {
        if let Some(city_id) = req.city_id {
            let _ = Self::get_city(pool, city_id).await?;
        }

        let sql = format!(
            r#"
            UPDATE landmarks
            SET city_id = COALESCE($1, city_id),
                name = COALESCE($2, name),
                category = COALESCE($3, category),
                latitude = COALESCE($4, latitude),
                longitude = COALESCE($5, longitude),
                sort_order = COALESCE($6, sort_order),
                updated_at = NOW()
            WHERE id = $7
            RETURNING {}
            "#,
            LANDMARK_COLS
        );

        sqlx::query_as::<_, Landmark>(&sql)
            .bind(req.city_id)
            .bind(&req.name)
            .bind(&req.category)
            .bind(req.latitude)
            .bind(req.longitude)
            .bind(req.sort_order)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| ApiError::NotFound(format!("Landmark '{}' not found", id)))
    }

    /// Landmarks have no dependents; delete is unconditional
    pub async fn delete_landmark(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let rows = sqlx::query("DELETE FROM landmarks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(map_db_err)?
            .rows_affected();

        if rows == 0 {
            return Err(ApiError::NotFound(format!("Landmark '{}' not found", id)));
        }
        Ok(())
    }

    pub async fn landmarks_by_city(pool: &PgPool, city_id: Uuid) -> Result<Vec<Landmark>, ApiError> {
        let sql = format!(
            "SELECT {} FROM landmarks WHERE city_id = $1 ORDER BY sort_order ASC, name ASC",
            LANDMARK_COLS
        );

        sqlx::query_as::<_, Landmark>(&sql)
            .bind(city_id)
            .fetch_all(pool)
            .await
            .map_err(map_db_err)
    }

    // ---- Destinations ----

    pub async fn list_destinations(
        pool: &PgPool,
        name: Option<&str>,
    ) -> Result<Vec<Destination>, ApiError> {
        let where_clause = match name {
            Some(n) => format!("WHERE name ILIKE '%{}%'", sql_escape(n)),
            None => String::new(),
        };
        let sql = format!(
            "SELECT {} FROM destinations {} ORDER BY sort_order ASC, name ASC",
            DESTINATION_COLS, where_clause
        );

        sqlx::query_as::<_, Destination>(&sql)
            .fetch_all(pool)
            .await
            .map_err(map_db_err)
    }

    pub async fn get_destination(pool: &PgPool, id: Uuid) -> Result<Destination, ApiError> {
        let sql = format!("SELECT {} FROM destinations WHERE id = $1", DESTINATION_COLS);

        sqlx::query_as::<_, Destination>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| ApiError::NotFound(format!("Destination '{}' not found", id)))
    }

    pub async fn create_destination(
        pool: &PgPool,
        req: &CreateDestinationRequest,
    ) -> Result<Destination, ApiError> {
        let sql = format!(
            r#"
            INSERT INTO destinations (name, slug, sort_order, created_at, updated_at)
            VALUES ($1, $2, COALESCE($3, 0), NOW(), NOW())
            RETURNING {}
            "#,
            DESTINATION_COLS
        );

        sqlx::query_as::<_, Destination>(&sql)
            .bind(&req.name)
            .bind(&req.slug)
            .bind(req.sort_order)
            .fetch_one(pool)
            .await
            .map_err(map_db_err)
    }

    pub async fn update_destination(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateDestinationRequest,
    ) -> Result<Destination, ApiError> {
        let sql = format!(
            r#"
            UPDATE destinations
            SET name = COALESCE($1, name),
                slug = COALESCE($2, slug),
                sort_order = COALESCE($3, sort_order),
                updated_at = NOW()
            WHERE id = $4
            RETURNING {}
            "#,
            DESTINATION_COLS
        );

        sqlx::query_as::<_, Destination>(&sql)
            .bind(&req.name)
            .bind(&req.slug)
            .bind(req.sort_order)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| ApiError::NotFound(format!("Destination '{}' not found", id)))
    }

    pub async fn delete_destination(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let counts: (i64, i64) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM hotel_cards WHERE destination_id = $1),
                (SELECT COUNT(*) FROM city_destinations WHERE destination_id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(map_db_err)?;

        let (hotel_cards, cities) = counts;
        if hotel_cards + cities > 0 {
            return Err(ApiError::DeleteBlocked {
                message: "Destination has dependent records".to_string(),
                details: json!({ "hotel_cards": hotel_cards, "cities": cities }),
            });
        }

        let rows = sqlx::query("DELETE FROM destinations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(map_db_err)?
            .rows_affected();

        if rows == 0 {
            return Err(ApiError::NotFound(format!(
                "Destination '{}' not found",
                id
            )));
        }
        Ok(())
    }

    /// Cities attached to a destination, ordered by the join table
    pub async fn destination_cities(
        pool: &PgPool,
        destination_id: Uuid,
    ) -> Result<Vec<DestinationCity>, ApiError> {
        sqlx::query_as::<_, DestinationCity>(
            r#"
            SELECT c.id, c.country_id, c.name, c.popularity, c.sort_order,
                   c.created_at, c.updated_at,
                   cd.display_order
            FROM city_destinations cd
            JOIN cities c ON c.id = cd.city_id
            WHERE cd.destination_id = $1
            ORDER BY cd.display_order ASC, c.name ASC
            "#,
        )
        .bind(destination_id)
        .fetch_all(pool)
        .await
        .map_err(map_db_err)
    }

    pub async fn link_city(
        pool: &PgPool,
        destination_id: Uuid,
        req: &LinkCityRequest,
    ) -> Result<(), ApiError> {
        let _ = Self::get_destination(pool, destination_id).await?;
        let _ = Self::get_city(pool, req.city_id).await?;

        sqlx::query(
            r#"
            INSERT INTO city_destinations (city_id, destination_id, display_order)
            VALUES ($1, $2, COALESCE($3, 0))
            "#,
        )
        .bind(req.city_id)
        .bind(destination_id)
        .bind(req.display_order)
        .execute(pool)
        .await
        .map_err(map_db_err)?;

        Ok(())
    }

    pub async fn unlink_city(
        pool: &PgPool,
        destination_id: Uuid,
        city_id: Uuid,
    ) -> Result<(), ApiError> {
        let rows = sqlx::query(
            "DELETE FROM city_destinations WHERE destination_id = $1 AND city_id = $2",
        )
        .bind(destination_id)
        .bind(city_id)
        .execute(pool)
        .await
        .map_err(map_db_err)?
        .rows_affected();

        if rows == 0 {
            return Err(ApiError::NotFound(
                "City is not linked to this destination".to_string(),
            ));
        }
        Ok(())
    }
}
