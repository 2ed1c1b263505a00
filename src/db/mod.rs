// src/db/mod.rs
// DOCUMENTATION: Database access layer organization
// PURPOSE: Re-export repositories and classify driver errors once

pub mod catalog_repository;
pub mod content_repository;
pub mod geo_repository;
pub mod hotel_repository;
pub mod room_media_repository;
pub mod user_repository;

pub use catalog_repository::CatalogRepository;
pub use content_repository::ContentRepository;
pub use geo_repository::GeoRepository;
pub use hotel_repository::HotelRepository;
pub use room_media_repository::RoomMediaRepository;
pub use user_repository::UserRepository;

use crate::errors::ApiError;
use thiserror::Error;

/// Structured database error taxonomy
/// DOCUMENTATION: Classified once from the driver error so handlers never
/// sniff provider-specific code strings
#[derive(Error, Debug)]
pub enum DbError {
    #[error("unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    #[error("foreign key constraint violated: {constraint}")]
    ForeignKeyViolation { constraint: String },

    #[error(transparent)]
    Other(#[from] sqlx::Error),
}

/// Classify a sqlx error into the structured taxonomy
/// Postgres SQLSTATE: 23505 = unique_violation, 23503 = foreign_key_violation
pub fn classify(err: sqlx::Error) -> DbError {
    if let Some(db_err) = err.as_database_error() {
        let code = db_err.code().map(|c| c.to_string()).unwrap_or_default();
        let constraint = db_err.constraint().unwrap_or("").to_string();

        match code.as_str() {
            "23505" => return DbError::UniqueViolation { constraint },
            "23503" => return DbError::ForeignKeyViolation { constraint },
            _ => {}
        }
    }

    DbError::Other(err)
}

/// Human-readable message for a known unique constraint
/// DOCUMENTATION: Constraint names match migrations/0001_init.sql
pub fn constraint_message(constraint: &str) -> String {
    match constraint {
        "countries_code_key" => "Country code already exists".to_string(),
        "cities_country_id_name_key" => "City name already exists in this country".to_string(),
        "destinations_slug_key" => "Destination slug already exists".to_string(),
        "accommodation_types_code_key" => "Accommodation type code already exists".to_string(),
        "hotel_amenities_name_key" => "Amenity name already exists".to_string(),
        "labels_code_key" => "Label code already exists".to_string(),
        "users_email_key" => "Email already exists".to_string(),
        "hotel_details_hotel_card_id_key" => "Hotel card already has details".to_string(),
        "hotel_policies_hotel_card_id_key" => "Hotel card already has a policy".to_string(),
        "hotel_card_amenities_pkey" => "Amenity already linked to this hotel card".to_string(),
        "hotel_card_labels_pkey" => "Label already linked to this hotel card".to_string(),
        "city_destinations_pkey" => "City already linked to this destination".to_string(),
        other if !other.is_empty() => format!("Unique constraint violated: {}", other),
        _ => "Unique constraint violated".to_string(),
    }
}

/// Map a classified database error onto the HTTP error taxonomy
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation { constraint } => {
                ApiError::Conflict(constraint_message(&constraint))
            }
            DbError::ForeignKeyViolation { constraint } => ApiError::ForeignKey(format!(
                "Referenced record does not exist ({})",
                constraint
            )),
            DbError::Other(inner) => ApiError::Database(inner.to_string()),
        }
    }
}

/// Shorthand used by every repository call site
pub fn map_db_err(err: sqlx::Error) -> ApiError {
    classify(err).into()
}

/// Escape a user-supplied string for interpolation into a dynamic WHERE
/// clause (substring filters built the way the search query builder does)
pub(crate) fn sql_escape(s: &str) -> String {
    s.replace('\'', "''")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_messages_for_known_keys() {
        assert_eq!(
            constraint_message("countries_code_key"),
            "Country code already exists"
        );
        assert_eq!(
            constraint_message("cities_country_id_name_key"),
            "City name already exists in this country"
        );
        assert_eq!(
            constraint_message("labels_code_key"),
            "Label code already exists"
        );
        assert_eq!(constraint_message("users_email_key"), "Email already exists");
    }

    #[test]
    fn test_constraint_message_fallbacks() {
        assert_eq!(
            constraint_message("some_new_table_key"),
            "Unique constraint violated: some_new_table_key"
        );
        assert_eq!(constraint_message(""), "Unique constraint violated");
    }

    #[test]
    fn test_unique_violation_maps_to_conflict() {
        let err: ApiError = DbError::UniqueViolation {
            constraint: "countries_code_key".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::Conflict(msg) if msg == "Country code already exists"));
    }

    #[test]
    fn test_fk_violation_maps_to_bad_request() {
        let err: ApiError = DbError::ForeignKeyViolation {
            constraint: "cities_country_id_fkey".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::ForeignKey(_)));
    }
}
