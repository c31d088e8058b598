//! Error Types for Request Validation and Dataset Records
//!
//! ## Design Philosophy
//!
//! The fusion core has very few ways to fail, by construction:
//!
//! 1. **Request-level**: the caller asked for something impossible (a latitude
//!    of 120°, a date range that ends before it starts). These are rejected
//!    before any acquisition starts and are the only errors a caller ever
//!    sees as a failed request.
//!
//! 2. **Slot-level**: a single dataset could not be used (unknown id, a record
//!    carrying NaN). These never fail the request; the slot is treated as
//!    absent and the indices fall back to their documented defaults.
//!
//! Arithmetic is total: division by zero, empty component sets and
//! out-of-domain values are handled by the normalizers and never surface as
//! errors.
//!
//! ## Error Categories
//!
//! ### Request errors ([`InputError`])
//! - `LatitudeOutOfRange` / `LongitudeOutOfRange`
//! - `NonFiniteCoordinate`
//! - `ReversedDateRange`
//!
//! ### Slot errors ([`DatasetError`])
//! - `Unknown`: id outside the fixed enumeration (never retried)
//! - `NonFiniteField`: record failed boundary validation
//! - `Mismatch`: a source answered with a different dataset than requested

use alloc::string::String;
use thiserror_no_std::Error;

use crate::types::DatasetId;

/// Result type for request validation
pub type InputResult<T> = Result<T, InputError>;

/// Invalid request input - fatal to the single request
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum InputError {
    /// Latitude outside [-90, 90]
    #[error("Latitude {value} outside [-90, 90]")]
    LatitudeOutOfRange {
        /// The rejected latitude
        value: f64,
    },

    /// Longitude outside [-180, 180]
    #[error("Longitude {value} outside [-180, 180]")]
    LongitudeOutOfRange {
        /// The rejected longitude
        value: f64,
    },

    /// Coordinate is NaN or infinite
    #[error("Coordinates must be finite numbers")]
    NonFiniteCoordinate,

    /// Date range start is after its end
    #[error("Date range start is after end")]
    ReversedDateRange,
}

/// Dataset slot errors - scoped to one dataset, never fatal to a request
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DatasetError {
    /// Requested id is not one of the supported datasets
    #[error("Unknown dataset: {name}")]
    Unknown {
        /// The id as requested
        name: String,
    },

    /// A numeric field is NaN or infinite
    #[error("Dataset {dataset} field {field} is not a finite number")]
    NonFiniteField {
        /// Dataset carrying the bad value
        dataset: DatasetId,
        /// Offending field name
        field: &'static str,
    },

    /// The record belongs to a different dataset than the slot it was fetched for
    #[error("Expected {expected} record, received {received}")]
    Mismatch {
        /// Dataset that was requested
        expected: DatasetId,
        /// Dataset that was delivered
        received: DatasetId,
    },
}

impl DatasetError {
    /// Whether retrying the fetch could change the outcome
    pub fn is_retryable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn input_error_messages_name_the_value() {
        let err = InputError::LatitudeOutOfRange { value: 91.5 };
        assert_eq!(err.to_string(), "Latitude 91.5 outside [-90, 90]");
    }

    #[test]
    fn dataset_errors_are_permanent() {
        let err = DatasetError::Unknown { name: "sentinel_2".into() };
        assert!(!err.is_retryable());
        assert_eq!(err.to_string(), "Unknown dataset: sentinel_2");
    }
}
