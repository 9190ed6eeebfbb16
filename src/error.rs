// src/error.rs
use thiserror::Error;

/// Error types for the option-payoffs engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptionError {
    /// A numeric input violates its domain (non-positive spot, negative time, ...)
    #[error("Invalid parameter '{parameter}' = {value}: {constraint}")]
    InvalidParameter {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Structural problem with the inputs rather than a single value
    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfiguration { field: String, reason: String },

    /// Closed-form evaluation produced a non-finite value
    #[error("Numerical instability in {method}: {reason}")]
    NumericalInstability { method: String, reason: String },

    /// Operation is not defined for the given contract or strategy
    #[error("Unsupported operation '{operation}' in context: {context}")]
    UnsupportedOperation { operation: String, context: String },

    /// Engine configuration could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(String),
}

/// Result type alias for option-payoffs operations
pub type OptionResult<T> = Result<T, OptionError>;

/// Validation utilities
pub mod validation {
    use super::{OptionError, OptionResult};

    /// Validate that a parameter is finite and strictly positive
    pub fn validate_positive(name: &str, value: f64) -> OptionResult<()> {
        validate_finite(name, value)?;
        if value <= 0.0 {
            Err(OptionError::InvalidParameter {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is finite and non-negative
    pub fn validate_non_negative(name: &str, value: f64) -> OptionResult<()> {
        validate_finite(name, value)?;
        if value < 0.0 {
            Err(OptionError::InvalidParameter {
                parameter: name.to_string(),
                value,
                constraint: "must be non-negative (≥ 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> OptionResult<()> {
        if !value.is_finite() {
            Err(OptionError::InvalidParameter {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is finite and different from zero
    pub fn validate_non_zero(name: &str, value: f64) -> OptionResult<()> {
        validate_finite(name, value)?;
        if value == 0.0 {
            Err(OptionError::InvalidParameter {
                parameter: name.to_string(),
                value,
                constraint: "must be non-zero".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that `low < high`, reporting the offending upper value
    pub fn validate_ordered(low_name: &str, low: f64, high_name: &str, high: f64) -> OptionResult<()> {
        if low < high {
            Ok(())
        } else {
            Err(OptionError::InvalidParameter {
                parameter: high_name.to_string(),
                value: high,
                constraint: format!("must be greater than '{}' ({})", low_name, low),
            })
        }
    }

    /// Validate a sample grid: non-empty, finite and strictly increasing
    pub fn validate_strictly_increasing(name: &str, values: &[f64]) -> OptionResult<()> {
        if values.is_empty() {
            return Err(OptionError::InvalidConfiguration {
                field: name.to_string(),
                reason: "must contain at least one sample".to_string(),
            });
        }
        for &v in values {
            validate_finite(name, v)?;
        }
        if let Some(i) = values.windows(2).position(|w| w[1] <= w[0]) {
            return Err(OptionError::InvalidConfiguration {
                field: name.to_string(),
                reason: format!(
                    "must be strictly increasing (sample {} = {} follows {})",
                    i + 1,
                    values[i + 1],
                    values[i]
                ),
            });
        }
        Ok(())
    }

    /// Validate that two aligned sequences have the same length
    pub fn validate_same_len(name: &str, expected: usize, actual: usize) -> OptionResult<()> {
        if expected != actual {
            Err(OptionError::InvalidConfiguration {
                field: name.to_string(),
                reason: format!("length {} does not match price grid length {}", actual, expected),
            })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::validation::*;
    use super::*;

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive("strike", 100.0).is_ok());
        assert!(validate_positive("strike", 0.0).is_err());
        assert!(validate_positive("strike", -1.0).is_err());
        assert!(validate_positive("strike", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("time_to_expiry", 0.0).is_ok());
        assert!(validate_non_negative("time_to_expiry", -1e-9).is_err());
    }

    #[test]
    fn test_validate_non_zero() {
        assert!(validate_non_zero("quantity", -2.0).is_ok());
        assert!(validate_non_zero("quantity", 0.0).is_err());
        assert!(validate_non_zero("quantity", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_finite() {
        assert!(validate_finite("value", 1.0).is_ok());
        assert!(validate_finite("value", f64::NAN).is_err());
        assert!(validate_finite("value", f64::INFINITY).is_err());
        assert!(validate_finite("value", f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_validate_strictly_increasing() {
        assert!(validate_strictly_increasing("prices", &[1.0, 2.0, 3.0]).is_ok());
        assert!(validate_strictly_increasing("prices", &[]).is_err());
        assert!(validate_strictly_increasing("prices", &[1.0, 1.0]).is_err());
        assert!(validate_strictly_increasing("prices", &[3.0, 2.0]).is_err());
    }

    #[test]
    fn test_validate_ordered_names_upper_field() {
        let err = validate_ordered("lower", 110.0, "upper", 90.0).unwrap_err();
        match err {
            OptionError::InvalidParameter { parameter, value, .. } => {
                assert_eq!(parameter, "upper");
                assert_eq!(value, 90.0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_display() {
        let error = OptionError::InvalidParameter {
            parameter: "volatility".to_string(),
            value: -0.1,
            constraint: "must be positive".to_string(),
        };

        let display = format!("{}", error);
        assert!(display.contains("volatility"));
        assert!(display.contains("-0.1"));
        assert!(display.contains("positive"));
    }
}
