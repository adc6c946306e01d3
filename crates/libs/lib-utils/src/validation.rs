//! # Validation Utilities
//!
//! Input validation helpers shared by the gateway handlers and the chat client.

/// Validate that a string is not empty.
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Validate email format (basic check).
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.contains('@') && email.contains('.') {
        Ok(())
    } else {
        Err("Invalid email format".to_string())
    }
}

/// Validate minimum length.
pub fn validate_min_length(value: &str, min: usize, field_name: &str) -> Result<(), String> {
    if value.chars().count() < min {
        Err(format!("{} must be at least {} characters", field_name, min))
    } else {
        Ok(())
    }
}

/// Validate a latitude/longitude pair.
///
/// Both values must be present and inside the WGS84 range.
pub fn validate_coordinates(latitude: Option<f64>, longitude: Option<f64>) -> Result<(f64, f64), String> {
    let (Some(lat), Some(lon)) = (latitude, longitude) else {
        return Err("Latitude and longitude are required.".to_string());
    };

    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err("Latitude must be between -90 and 90".to_string());
    }
    if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
        return Err("Longitude must be between -180 and 180".to_string());
    }

    Ok((lat, lon))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_empty_trims() {
        assert!(validate_not_empty("   ", "Title").is_err());
        assert!(validate_not_empty(" ok ", "Title").is_ok());
    }

    #[test]
    fn test_coordinates_required() {
        assert_eq!(
            validate_coordinates(Some(6.5), None),
            Err("Latitude and longitude are required.".to_string())
        );
    }

    #[test]
    fn test_coordinates_range() {
        assert!(validate_coordinates(Some(91.0), Some(3.0)).is_err());
        assert!(validate_coordinates(Some(6.5), Some(-181.0)).is_err());
        assert_eq!(validate_coordinates(Some(6.5), Some(3.4)), Ok((6.5, 3.4)));
    }
}
