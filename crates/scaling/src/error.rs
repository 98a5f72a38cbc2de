//! Error types for the climattr-scaling crate.

use chrono::NaiveDate;

/// Error type for all fallible operations in the climattr-scaling crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ScalingError {
    /// Returned when no climatology entry falls inside the baseline window.
    #[error("no climatology values between {start} and {end} (inclusive)")]
    EmptyBaseline {
        /// First day of the baseline window.
        start: NaiveDate,
        /// Last day of the baseline window.
        end: NaiveDate,
    },

    /// Returned when the method is unknown or cannot be applied to the data.
    #[error("invalid scaling method {method:?}: {reason}")]
    InvalidScalingMethod {
        /// The method that was requested.
        method: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Returned when the baseline window contains a NaN or infinite value.
    #[error("non-finite climatology value {value} on {date}")]
    NonFiniteClimatology {
        /// Date of the offending entry.
        date: NaiveDate,
        /// The offending value.
        value: f64,
    },

    /// Returned when dates and values of a dated series differ in length.
    #[error("length mismatch: {dates} dates but {values} values")]
    LengthMismatch {
        /// Number of dates.
        dates: usize,
        /// Number of values.
        values: usize,
    },

    /// Returned when the series to scale is empty.
    #[error("series to scale is empty")]
    EmptySeries,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn display_empty_baseline() {
        let e = ScalingError::EmptyBaseline {
            start: date(1961, 1, 1),
            end: date(1990, 12, 31),
        };
        assert_eq!(
            e.to_string(),
            "no climatology values between 1961-01-01 and 1990-12-31 (inclusive)"
        );
    }

    #[test]
    fn display_invalid_method() {
        let e = ScalingError::InvalidScalingMethod {
            method: "log".to_string(),
            reason: "unknown method".to_string(),
        };
        assert_eq!(e.to_string(), "invalid scaling method \"log\": unknown method");
    }

    #[test]
    fn display_non_finite() {
        let e = ScalingError::NonFiniteClimatology {
            date: date(1970, 6, 1),
            value: f64::NAN,
        };
        assert_eq!(e.to_string(), "non-finite climatology value NaN on 1970-06-01");
    }

    #[test]
    fn display_length_mismatch() {
        let e = ScalingError::LengthMismatch {
            dates: 3,
            values: 2,
        };
        assert_eq!(e.to_string(), "length mismatch: 3 dates but 2 values");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<ScalingError>();
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<ScalingError>();
    }
}
