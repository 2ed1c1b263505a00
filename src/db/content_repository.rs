// src/db/content_repository.rs
// DOCUMENTATION: Database access for FAQs and policies
// PURPOSE: Includes the one paginated listing in the API (admin FAQ table)

use crate::db::hotel_repository::HotelRepository;
use crate::db::map_db_err;
use crate::errors::ApiError;
use crate::models::*;
use sqlx::PgPool;
use uuid::Uuid;

const FAQ_COLS: &str =
    "id, hotel_card_id, question, answer, sort_order, created_at, updated_at";
const POLICY_COLS: &str = "id, hotel_card_id, check_in_time, check_out_time, \
     cancellation_policy, pets_allowed, smoking_allowed, created_at, updated_at";

/// ContentRepository: FAQs and booking policies
pub struct ContentRepository;

impl ContentRepository {
    // ---- FAQs ----

    /// Paginated FAQ listing
    /// Returns tuple: (results, total_count) so the handler derives page
    /// metadata
    pub async fn list_faqs(
        pool: &PgPool,
        query: &FaqListQuery,
    ) -> Result<(Vec<HotelFaq>, i64), ApiError> {
        let limit = query.limit.unwrap_or(20).clamp(1, 100);
        let page = query.page.unwrap_or(1).max(1);
        let offset = (page - 1) * limit;

        let where_clause = match query.hotel_card_id {
            Some(id) => format!("WHERE hotel_card_id = '{}'", id),
            None => String::new(),
        };

        let count_sql = format!("SELECT COUNT(*) FROM hotel_faqs {}", where_clause);
        let total: (i64,) = sqlx::query_as(&count_sql)
            .fetch_one(pool)
            .await
            .map_err(map_db_err)?;

        let sql = format!(
            "SELECT {} FROM hotel_faqs {} ORDER BY sort_order ASC, created_at ASC \
             LIMIT {} OFFSET {}",
            FAQ_COLS, where_clause, limit, offset
        );

        let faqs = sqlx::query_as::<_, HotelFaq>(&sql)
            .fetch_all(pool)
            .await
            .map_err(map_db_err)?;

        Ok((faqs, total.0))
    }

    pub async fn get_faq(pool: &PgPool, id: Uuid) -> Result<HotelFaq, ApiError> {
        let sql = format!("SELECT {} FROM hotel_faqs WHERE id = $1", FAQ_COLS);

        sqlx::query_as::<_, HotelFaq>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| ApiError::NotFound(format!("FAQ '{}' not found", id)))
    }

    pub async fn create_faq(pool: &PgPool, req: &CreateFaqRequest) -> Result<HotelFaq, ApiError> {
        let _ = HotelRepository::get_hotel_card(pool, req.hotel_card_id).await?;

        let sql = format!(
            r#"
            INSERT INTO hotel_faqs
                (hotel_card_id, question, answer, sort_order, created_at, updated_at)
            VALUES ($1, $2, $3, COALESCE($4, 0), NOW(), NOW())
            RETURNING {}
            "#,
            FAQ_COLS
        );

        sqlx::query_as::<_, HotelFaq>(&sql)
            .bind(req.hotel_card_id)
            .bind(&req.question)
            .bind(&req.answer)
            .bind(req.sort_order)
            .fetch_one(pool)
            .await
            .map_err(map_db_err)
    }

    pub async fn update_faq(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateFaqRequest,
    ) -> Result<HotelFaq, ApiError> {
        let sql = format!(
            r#"
            UPDATE hotel_faqs
            SET question = COALESCE($1, question),
                answer = COALESCE($2, answer),
                sort_order = COALESCE($3, sort_order),
                updated_at = NOW()
            WHERE id = $4
            RETURNING {}
            "#,
            FAQ_COLS
        );

        sqlx::query_as::<_, HotelFaq>(&sql)
            .bind(&req.question)
            .bind(&req.answer)
            .bind(req.sort_order)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| ApiError::NotFound(format!("FAQ '{}' not found", id)))
    }

    pub async fn delete_faq(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let rows = sqlx::query("DELETE FROM hotel_faqs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(map_db_err)?
            .rows_affected();

        if rows == 0 {
            return Err(ApiError::NotFound(format!("FAQ '{}' not found", id)));
        }
        Ok(())
    }

    pub async fn faqs_by_card(
        pool: &PgPool,
        hotel_card_id: Uuid,
    ) -> Result<Vec<HotelFaq>, ApiError> {
        let sql = format!(
            "SELECT {} FROM hotel_faqs WHERE hotel_card_id = $1 \
             ORDER BY sort_order ASC, created_at ASC",
            FAQ_COLS
        );

        sqlx::query_as::<_, HotelFaq>(&sql)
            .bind(hotel_card_id)
            .fetch_all(pool)
            .await
            .map_err(map_db_err)
    }

    // ---- Policies ----

    pub async fn list_policies(
        pool: &PgPool,
        query: &PolicyListQuery,
    ) -> Result<Vec<HotelPolicy>, ApiError> {
        let where_clause = match query.hotel_card_id {
            Some(id) => format!("WHERE hotel_card_id = '{}'", id),
            None => String::new(),
        };
        let sql = format!(
            "SELECT {} FROM hotel_policies {} ORDER BY created_at ASC",
            POLICY_COLS, where_clause
        );

        sqlx::query_as::<_, HotelPolicy>(&sql)
            .fetch_all(pool)
            .await
            .map_err(map_db_err)
    }

    pub async fn get_policy(pool: &PgPool, id: Uuid) -> Result<HotelPolicy, ApiError> {
        let sql = format!("SELECT {} FROM hotel_policies WHERE id = $1", POLICY_COLS);

        sqlx::query_as::<_, HotelPolicy>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| ApiError::NotFound(format!("Policy '{}' not found", id)))
    }

    pub async fn create_policy(
        pool: &PgPool,
        req: &CreatePolicyRequest,
    ) -> Result<HotelPolicy, ApiError> {
        let _ = HotelRepository::get_hotel_card(pool, req.hotel_card_id).await?;

        let sql = format!(
            r#"
            INSERT INTO hotel_policies
                (hotel_card_id, check_in_time, check_out_time, cancellation_policy,
                 pets_allowed, smoking_allowed, created_at, updated_at)
            VALUES ($1, $2, $3, $4, COALESCE($5, false), COALESCE($6, false), NOW(), NOW())
            RETURNING {}
            "#,
            POLICY_COLS
        );

        sqlx::query_as::<_, HotelPolicy>(&sql)
            .bind(req.hotel_card_id)
            .bind(&req.check_in_time)
            .bind(&req.check_out_time)
            .bind(&req.cancellation_policy)
            .bind(req.pets_allowed)
            .bind(req.smoking_allowed)
            .fetch_one(pool)
            .await
            .map_err(map_db_err)
    }

    pub async fn update_policy(
        pool: &PgPool,
        id: Uuid,
        req: &UpdatePolicyRequest,
    ) -> Result<HotelPolicy, ApiError> {
        let sql = format!(
            r#"
            UPDATE hotel_policies
            SET check_in_time = COALESCE($1, check_in_time),
                check_out_time = COALESCE($2, check_out_time),
                cancellation_policy = COALESCE($3, cancellation_policy),
                pets_allowed = COALESCE($4, pets_allowed),
                smoking_allowed = COALESCE($5, smoking_allowed),
                updated_at = NOW()
            WHERE id = $6
            RETURNING {}
            "#,
            POLICY_COLS
        );

        sqlx::query_as::<_, HotelPolicy>(&sql)
            .bind(&req.check_in_time)
            .bind(&req.check_out_time)
            .bind(&req.cancellation_policy)
            .bind(req.pets_allowed)
            .bind(req.smoking_allowed)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| ApiError::NotFound(format!("Policy '{}' not found", id)))
    }

    pub async fn delete_policy(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let rows = sqlx::query("DELETE FROM hotel_policies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(map_db_err)?
            .rows_affected();

        if rows == 0 {
            return Err(ApiError::NotFound(format!("Policy '{}' not found", id)));
        }
        Ok(())
    }

    pub async fn policy_by_card(
        pool: &PgPool,
        hotel_card_id: Uuid,
    ) -> Result<Option<HotelPolicy>, ApiError> {
        let sql = format!(
            "SELECT {} FROM hotel_policies WHERE hotel_card_id = $1",
            POLICY_COLS
        );

        sqlx::query_as::<_, HotelPolicy>(&sql)
            .bind(hotel_card_id)
            .fetch_optional(pool)
            .await
            .map_err(map_db_err)
    }
}
