// src/models/validation.rs
// DOCUMENTATION: Field-level validators shared by create/update DTOs
// PURPOSE: One place for the format and range rules the API contract fixes

use crate::errors::ApiError;

/// Landmark categories accepted by the API
pub const LANDMARK_CATEGORIES: &[&str] = &[
    "museum",
    "monument",
    "park",
    "beach",
    "shopping",
    "transport",
    "entertainment",
];

/// Amenity categories accepted by the API
/// Accessibility options are amenities with category "accessibility"
pub const AMENITY_CATEGORIES: &[&str] = &[
    "general",
    "wellness",
    "dining",
    "connectivity",
    "accessibility",
];

/// Postal codes are exactly 5 ASCII digits
pub fn validate_postal_code(postal_code: &str) -> Result<(), ApiError> {
    if postal_code.len() != 5 || !postal_code.chars().all(|c| c.is_ascii_digit()) {
        return Err(ApiError::Validation(
            "Postal code must be 5 digits".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_latitude(latitude: f64) -> Result<(), ApiError> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ApiError::Validation(
            "Latitude must be between -90 and 90".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_longitude(longitude: f64) -> Result<(), ApiError> {
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ApiError::Validation(
            "Longitude must be between -180 and 180".to_string(),
        ));
    }
    Ok(())
}

/// Country codes are ISO-3166 style: exactly 2 uppercase ASCII letters
pub fn validate_country_code(code: &str) -> Result<(), ApiError> {
    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(ApiError::Validation(
            "Country code must be 2 uppercase letters".to_string(),
        ));
    }
    Ok(())
}

/// Natural-key codes (accommodation type, label): 2-10 chars,
/// uppercase letters, digits or underscores
pub fn validate_key_code(code: &str) -> Result<(), ApiError> {
    let valid_len = (2..=10).contains(&code.len());
    let valid_chars = code
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_');

    if !valid_len || !valid_chars {
        return Err(ApiError::Validation(
            "Code must be 2-10 uppercase letters, digits or underscores".to_string(),
        ));
    }
    Ok(())
}

/// Display colors are #RRGGBB hex values
pub fn validate_hex_color(color: &str) -> Result<(), ApiError> {
    let mut chars = color.chars();
    let valid = color.len() == 7
        && chars.next() == Some('#')
        && chars.all(|c| c.is_ascii_hexdigit());

    if !valid {
        return Err(ApiError::Validation(
            "Color must be a #RRGGBB hex value".to_string(),
        ));
    }
    Ok(())
}

/// URL slugs are non-empty, lowercase letters, digits and hyphens
pub fn validate_slug(slug: &str) -> Result<(), ApiError> {
    let valid = !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

    if !valid {
        return Err(ApiError::Validation(
            "Slug must contain only lowercase letters, digits and hyphens".to_string(),
        ));
    }
    Ok(())
}

/// Check-in/check-out times are "HH:MM" wall-clock strings
pub fn validate_time_of_day(time: &str) -> Result<(), ApiError> {
    let parts: Vec<&str> = time.split(':').collect();
    let valid = parts.len() == 2
        && parts[0].len() == 2
        && parts[1].len() == 2
        && matches!(parts[0].parse::<u8>(), Ok(h) if h < 24)
        && matches!(parts[1].parse::<u8>(), Ok(m) if m < 60);

    if !valid {
        return Err(ApiError::Validation(
            "Time must be in HH:MM format".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_popularity(popularity: i32) -> Result<(), ApiError> {
    if !(0..=100).contains(&popularity) {
        return Err(ApiError::Validation(
            "Popularity must be between 0 and 100".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_priority(priority: i32) -> Result<(), ApiError> {
    if !(0..=10).contains(&priority) {
        return Err(ApiError::Validation(
            "Priority must be between 0 and 10".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_star_rating(star_rating: i32) -> Result<(), ApiError> {
    if !(1..=5).contains(&star_rating) {
        return Err(ApiError::Validation(
            "Star rating must be between 1 and 5".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_capacity(capacity: i32) -> Result<(), ApiError> {
    if !(1..=20).contains(&capacity) {
        return Err(ApiError::Validation(
            "Capacity must be between 1 and 20".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_price(price: f64) -> Result<(), ApiError> {
    if price <= 0.0 {
        return Err(ApiError::Validation(
            "Price per night must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_landmark_category(category: &str) -> Result<(), ApiError> {
    if !LANDMARK_CATEGORIES.contains(&category) {
        return Err(ApiError::Validation(format!(
            "Invalid landmark category '{}'; expected one of: {}",
            category,
            LANDMARK_CATEGORIES.join(", ")
        )));
    }
    Ok(())
}

pub fn validate_amenity_category(category: &str) -> Result<(), ApiError> {
    if !AMENITY_CATEGORIES.contains(&category) {
        return Err(ApiError::Validation(format!(
            "Invalid amenity category '{}'; expected one of: {}",
            category,
            AMENITY_CATEGORIES.join(", ")
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(result: Result<(), ApiError>) -> String {
        match result {
            Err(ApiError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_postal_code() {
        assert!(validate_postal_code("28013").is_ok());
        assert_eq!(
            message(validate_postal_code("123")),
            "Postal code must be 5 digits"
        );
        assert!(validate_postal_code("1234a").is_err());
        assert!(validate_postal_code("123456").is_err());
    }

    #[test]
    fn test_coordinates() {
        assert!(validate_latitude(40.4168).is_ok());
        assert!(validate_latitude(-90.0).is_ok());
        assert_eq!(
            message(validate_latitude(95.0)),
            "Latitude must be between -90 and 90"
        );
        assert!(validate_longitude(-3.7038).is_ok());
        assert!(validate_longitude(180.1).is_err());
    }

    #[test]
    fn test_country_code() {
        assert!(validate_country_code("ES").is_ok());
        assert!(validate_country_code("es").is_err());
        assert!(validate_country_code("ESP").is_err());
        assert!(validate_country_code("E1").is_err());
    }

    #[test]
    fn test_key_code() {
        assert!(validate_key_code("HOTEL").is_ok());
        assert!(validate_key_code("B_B").is_ok());
        assert!(validate_key_code("APT2").is_ok());
        assert!(validate_key_code("X").is_err());
        assert!(validate_key_code("lowercase").is_err());
        assert!(validate_key_code("WAY_TOO_LONG_CODE").is_err());
    }

    #[test]
    fn test_hex_color() {
        assert!(validate_hex_color("#FF8800").is_ok());
        assert!(validate_hex_color("#12ZZ34").is_err());
        assert!(validate_hex_color("FF8800").is_err());
        assert!(validate_hex_color("#FFF").is_err());
    }

    #[test]
    fn test_slug() {
        assert!(validate_slug("mediterranean-escapes").is_ok());
        assert!(validate_slug("top-10-beaches").is_ok());
        assert!(validate_slug("").is_err());
        assert!(validate_slug("Not A Slug!!").is_err());
        assert!(validate_slug("Uppercase").is_err());
    }

    #[test]
    fn test_time_of_day() {
        assert!(validate_time_of_day("15:00").is_ok());
        assert!(validate_time_of_day("00:00").is_ok());
        assert!(validate_time_of_day("24:00").is_err());
        assert!(validate_time_of_day("9:00").is_err());
        assert!(validate_time_of_day("nine").is_err());
    }

    #[test]
    fn test_ranges() {
        assert!(validate_popularity(0).is_ok());
        assert!(validate_popularity(100).is_ok());
        assert!(validate_popularity(101).is_err());
        assert!(validate_priority(10).is_ok());
        assert!(validate_priority(11).is_err());
        assert!(validate_star_rating(5).is_ok());
        assert!(validate_star_rating(0).is_err());
        assert!(validate_capacity(20).is_ok());
        assert!(validate_capacity(21).is_err());
        assert!(validate_price(120.5).is_ok());
        assert!(validate_price(0.0).is_err());
    }

    #[test]
    fn test_categories() {
        assert!(validate_landmark_category("museum").is_ok());
        assert!(validate_landmark_category("casino").is_err());
        assert!(validate_amenity_category("accessibility").is_ok());
        assert!(validate_amenity_category("misc").is_err());
    }
}
