// src/db/user_repository.rs
// DOCUMENTATION: Database access for back-office users

use crate::db::hotel_repository::HotelRepository;
use crate::db::{map_db_err, sql_escape};
use crate::errors::ApiError;
use crate::models::*;
use sqlx::PgPool;
use uuid::Uuid;

const USER_COLS: &str = "id, email, display_name, role, address_id, created_at, updated_at";

/// UserRepository: all database operations for users
pub struct UserRepository;

impl UserRepository {
    pub async fn list_users(pool: &PgPool, query: &UserListQuery) -> Result<Vec<User>, ApiError> {
        let mut where_clauses: Vec<String> = Vec::new();

        if let Some(role) = &query.role {
            where_clauses.push(format!("role = '{}'", sql_escape(role)));
        }
        if let Some(search) = &query.search {
            let escaped = sql_escape(search);
            where_clauses.push(format!(
                "(email ILIKE '%{}%' OR display_name ILIKE '%{}%')",
                escaped, escaped
            ));
        }

        let where_clause = if where_clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", where_clauses.join(" AND "))
        };

        let sql = format!(
            "SELECT {} FROM users {} ORDER BY created_at ASC",
            USER_COLS, where_clause
        );

        sqlx::query_as::<_, User>(&sql)
            .fetch_all(pool)
            .await
            .map_err(map_db_err)
    }

    pub async fn get_user(pool: &PgPool, id: Uuid) -> Result<User, ApiError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLS);

        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| ApiError::NotFound(format!("User '{}' not found", id)))
    }

    pub async fn create_user(pool: &PgPool, req: &CreateUserRequest) -> Result<User, ApiError> {
        if let Some(address_id) = req.address_id {
            let _ = HotelRepository::get_address(pool, address_id).await?;
        }

        let sql = format!(
            r#"
            INSERT INTO users (email, display_name, role, address_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            RETURNING {}
            "#,
            USER_COLS
        );

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(&req.email)
            .bind(&req.display_name)
            .bind(&req.role)
            .bind(req.address_id)
            .fetch_one(pool)
            .await
            .map_err(map_db_err)?;

        log::info!("Created user {} ({})", user.email, user.id);
        Ok(user)
    }

    pub async fn update_user(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateUserRequest,
    ) -> Result<User, ApiError> {
        if let Some(address_id) = req.address_id {
            let _ = HotelRepository::get_address(pool, address_id).await?;
        }

        let sql = format!(
            r#"
            UPDATE users
            SET email = COALESCE($1, email),
                display_name = COALESCE($2, display_name),
                role = COALESCE($3, role),
                address_id = COALESCE($4, address_id),
                updated_at = NOW()
            WHERE id = $5
            RETURNING {}
            "#,
            USER_COLS
        );

        sqlx::query_as::<_, User>(&sql)
            .bind(&req.email)
            .bind(&req.display_name)
            .bind(&req.role)
            .bind(req.address_id)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| ApiError::NotFound(format!("User '{}' not found", id)))
    }

    /// Users have no dependents; delete is unconditional
    pub async fn delete_user(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let rows = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(map_db_err)?
            .rows_affected();

        if rows == 0 {
            return Err(ApiError::NotFound(format!("User '{}' not found", id)));
        }
        Ok(())
    }
}
