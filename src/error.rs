//! Error types for dualgeom operations.

use thiserror::Error;

/// Errors reported by the checked construction entry points.
///
/// The unchecked `compute` / `construct` methods never fail; small or
/// degenerate inputs simply produce empty results.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DualError {
    /// An input point has a NaN or infinite coordinate.
    #[error("input point {index} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Position of the offending point in the input slice.
        index: usize,
    },

    /// A configuration value is outside its valid range.
    #[error("invalid configuration `{name}`: {reason}")]
    InvalidConfig {
        /// Name of the offending field.
        name: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DualError>;

/// Rejects inputs containing NaN or infinite coordinates.
pub(crate) fn check_finite<F: num_traits::Float>(points: &[crate::Point2<F>]) -> Result<()> {
    match points.iter().position(|p| !p.is_finite()) {
        Some(index) => Err(DualError::NonFiniteCoordinate { index }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point2;

    #[test]
    fn test_check_finite() {
        let good = [Point2::new(0.0_f64, 0.0), Point2::new(1.0, 2.0)];
        assert_eq!(check_finite(&good), Ok(()));

        let bad = [Point2::new(0.0_f64, 0.0), Point2::new(f64::NAN, 2.0)];
        assert_eq!(check_finite(&bad), Err(DualError::NonFiniteCoordinate { index: 1 }));
    }

    #[test]
    fn test_display() {
        let err = DualError::NonFiniteCoordinate { index: 3 };
        assert_eq!(err.to_string(), "input point 3 has a non-finite coordinate");

        let err = DualError::InvalidConfig {
            name: "margin_fraction",
            reason: "must be finite and non-negative",
        };
        assert_eq!(
            err.to_string(),
            "invalid configuration `margin_fraction`: must be finite and non-negative"
        );
    }
}
