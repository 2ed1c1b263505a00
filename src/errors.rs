// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::error::{JsonPayloadError, QueryPayloadError, ResponseError};
use actix_web::{http::StatusCode, HttpRequest, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Comprehensive error enum for all possible failures
/// Each variant maps to appropriate HTTP status code and error response
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    /// Delete blocked by dependent child rows; carries per-relation counts
    #[error("{message}")]
    DeleteBlocked {
        message: String,
        details: serde_json::Value,
    },

    /// Foreign key violation surfaced by the database
    #[error("{0}")]
    ForeignKey(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Forbidden access")]
    Forbidden,
}

/// Convert ApiError to HTTP response
/// DOCUMENTATION: Maps error types to HTTP status codes and JSON responses
/// Body contract is a flat { "error": string }, with a "details" object of
/// dependent-row counts for blocked deletes
impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        let body = match self {
            ApiError::DeleteBlocked { message, details } => json!({
                "error": message,
                "details": details,
            }),
            // Never leak database errors to callers
            ApiError::Database(inner) => {
                log::error!("Database error: {}", inner);
                json!({ "error": "Internal server error" })
            }
            other => json!({ "error": other.to_string() }),
        };

        HttpResponse::build(status).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::DeleteBlocked { .. } => StatusCode::CONFLICT,
            ApiError::ForeignKey(_) => StatusCode::BAD_REQUEST,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
        }
    }
}

/// Body deserialization failures respond with the same JSON error body as
/// every other 400; registered via `web::JsonConfig` in main.rs
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::Validation(err.to_string()).into()
}

/// Same contract for query string deserialization failures
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::Validation(err.to_string()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test as actix_test, web, App};
    use serde::Deserialize;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::NotFound("missing".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Validation("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Conflict("dup".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::ForeignKey("fk".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Database("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_delete_blocked_is_conflict() {
        let err = ApiError::DeleteBlocked {
            message: "City has dependent records".into(),
            details: serde_json::json!({ "neighborhoods": 3 }),
        };
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[derive(Deserialize)]
    struct EchoBody {
        name: String,
    }

    #[actix_web::test]
    async fn test_malformed_body_keeps_json_error_contract() {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .route(
                    "/echo",
                    web::post().to(|body: web::Json<EchoBody>| async move {
                        HttpResponse::Ok().json(json!({ "name": body.name }))
                    }),
                ),
        )
        .await;

        // Required field missing: extraction fails before the handler runs
        let req = actix_test::TestRequest::post()
            .uri("/echo")
            .set_json(json!({}))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        assert!(body["error"].is_string());
    }

    #[derive(Deserialize)]
    struct EchoQuery {
        limit: i64,
    }

    #[actix_web::test]
    async fn test_bad_query_param_keeps_json_error_contract() {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .route(
                    "/echo",
                    web::get().to(|query: web::Query<EchoQuery>| async move {
                        HttpResponse::Ok().json(json!({ "limit": query.limit }))
                    }),
                ),
        )
        .await;

        let req = actix_test::TestRequest::get().uri("/echo?limit=abc").to_request();
        let resp = actix_test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        assert!(body["error"].is_string());
    }
}
