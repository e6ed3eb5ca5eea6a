use thiserror::Error;

/// Rejection raised by the calculators when an input lies outside its
/// physical domain.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("invalid {field} = {value}: {reason}")]
    InvalidInput {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
}

impl ModelError {
    pub fn invalid(field: &'static str, value: f64, reason: &'static str) -> Self {
        ModelError::InvalidInput { field, value, reason }
    }
}

/// Accepts finite values strictly greater than zero.
pub fn require_positive(field: &'static str, value: f64) -> Result<f64, ModelError> {
    if !value.is_finite() {
        return Err(ModelError::invalid(field, value, "must be a finite number"));
    }
    if value <= 0.0 {
        return Err(ModelError::invalid(field, value, "must be greater than zero"));
    }
    Ok(value)
}

/// Accepts finite values greater than or equal to zero.
pub fn require_non_negative(field: &'static str, value: f64) -> Result<f64, ModelError> {
    if !value.is_finite() {
        return Err(ModelError::invalid(field, value, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(ModelError::invalid(field, value, "must not be negative"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_rejects_zero_and_nan() {
        assert!(require_positive("area", 0.0).is_err());
        assert!(require_positive("area", -1.0).is_err());
        assert!(require_positive("area", f64::NAN).is_err());
        assert_eq!(require_positive("area", 2.5), Ok(2.5));
    }

    #[test]
    fn test_non_negative_accepts_zero() {
        assert_eq!(require_non_negative("concentration", 0.0), Ok(0.0));
        assert!(require_non_negative("concentration", -0.1).is_err());
        assert!(require_non_negative("concentration", f64::INFINITY).is_err());
    }

    #[test]
    fn test_message_names_field() {
        let err = require_positive("thickness_mm", -3.0).unwrap_err();
        assert_eq!(err.to_string(), "invalid thickness_mm = -3: must be greater than zero");
    }
}
