#![warn(missing_docs)]
//! # risk-lens-core
//!
//! ## Purpose
//! Defines the pure data model used across the `risk-lens` workspace.
//!
//! ## Responsibilities
//! - Coerce raw measurement text into validated numeric values.
//! - Represent a validated set of vitals measurements.
//! - Build the canonical analysis request payload with fixed value order.
//! - Encode/decode request payloads for transport.
//!
//! ## Data flow
//! Form text enters through [`parse_measurement`] / [`VitalsReading::from_text`].
//! A validated [`VitalsReading`] plus an [`AggregationMode`] produce an
//! [`AnalysisRequest`] for submission.
//!
//! ## Ownership and lifetimes
//! Readings and requests own their values; no borrowed form text escapes the
//! coercion boundary.
//!
//! ## Error model
//! Validation failures (empty, non-numeric, or non-positive measurement text)
//! return [`CoreError`] variants naming the offending field.
//!
//! ## Example
//! ```rust
//! use risk_lens_core::{AggregationMode, AnalysisRequest, VitalsReading};
//!
//! let reading = VitalsReading::from_text("45", "90", "120").unwrap();
//! let request = AnalysisRequest::from_reading(&reading, AggregationMode::Average);
//! assert_eq!(request.values, [45.0, 90.0, 120.0]);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of measurement values carried by one analysis request.
pub const MEASUREMENT_VALUE_COUNT: usize = 3;

/// Identifies one of the three collected measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementField {
    /// Patient age in years.
    Age,
    /// Blood glucose level.
    GlucoseLevel,
    /// Blood pressure reading.
    BloodPressure,
}

impl MeasurementField {
    /// Returns the stable field name used in errors and logs.
    pub fn name(&self) -> &'static str {
        match self {
            MeasurementField::Age => "age",
            MeasurementField::GlucoseLevel => "glucose level",
            MeasurementField::BloodPressure => "blood pressure",
        }
    }
}

impl std::fmt::Display for MeasurementField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Coerces one raw measurement text value into a validated number.
///
/// # Semantics
/// Leading/trailing whitespace is ignored. The text must convert to a finite
/// number strictly greater than zero; there is no upper bound or unit check.
///
/// # Errors
/// Returns [`CoreError::EmptyMeasurement`] for blank text,
/// [`CoreError::NonNumericMeasurement`] when conversion fails, and
/// [`CoreError::NonPositiveMeasurement`] for zero, negative, or non-finite
/// values.
pub fn parse_measurement(field: MeasurementField, raw: &str) -> Result<f64, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::EmptyMeasurement(field));
    }

    let value = trimmed
        .parse::<f64>()
        .map_err(|_| CoreError::NonNumericMeasurement(field))?;

    if !value.is_finite() || value <= 0.0 {
        return Err(CoreError::NonPositiveMeasurement(field));
    }

    Ok(value)
}

/// Validated set of the three vitals measurements.
///
/// Values are guaranteed finite and strictly positive by construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VitalsReading {
    /// Patient age in years.
    pub age: f64,
    /// Blood glucose level.
    pub glucose_level: f64,
    /// Blood pressure reading.
    pub blood_pressure: f64,
}

impl VitalsReading {
    /// Constructs a validated reading from numeric values.
    ///
    /// # Errors
    /// Returns [`CoreError::NonPositiveMeasurement`] when any value is zero,
    /// negative, or non-finite.
    pub fn new(age: f64, glucose_level: f64, blood_pressure: f64) -> Result<Self, CoreError> {
        for (field, value) in [
            (MeasurementField::Age, age),
            (MeasurementField::GlucoseLevel, glucose_level),
            (MeasurementField::BloodPressure, blood_pressure),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CoreError::NonPositiveMeasurement(field));
            }
        }

        Ok(Self {
            age,
            glucose_level,
            blood_pressure,
        })
    }

    /// Constructs a validated reading from raw form text.
    ///
    /// # Errors
    /// Returns the first per-field coercion failure in field order
    /// (age, glucose level, blood pressure).
    pub fn from_text(age: &str, glucose_level: &str, blood_pressure: &str) -> Result<Self, CoreError> {
        Ok(Self {
            age: parse_measurement(MeasurementField::Age, age)?,
            glucose_level: parse_measurement(MeasurementField::GlucoseLevel, glucose_level)?,
            blood_pressure: parse_measurement(MeasurementField::BloodPressure, blood_pressure)?,
        })
    }
}

/// Server-side combination mode requested for the three measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationMode {
    /// Arithmetic mean of the submitted values.
    #[default]
    Average,
    /// Sum of the submitted values.
    Sum,
}

impl AggregationMode {
    /// Returns the wire name used in the request payload.
    pub fn wire_name(&self) -> &'static str {
        match self {
            AggregationMode::Average => "average",
            AggregationMode::Sum => "sum",
        }
    }

    /// Parses a user-supplied mode name.
    ///
    /// # Errors
    /// Returns [`CoreError::UnknownAggregationMode`] for anything other than
    /// `average` or `sum` (case-insensitive).
    pub fn from_name(raw: &str) -> Result<Self, CoreError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "average" => Ok(AggregationMode::Average),
            "sum" => Ok(AggregationMode::Sum),
            other => Err(CoreError::UnknownAggregationMode(other.to_string())),
        }
    }
}

/// Canonical request payload sent to the analysis service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Measurement values in fixed wire order.
    pub values: [f64; MEASUREMENT_VALUE_COUNT],
    /// Requested server-side combination mode.
    pub operation: AggregationMode,
}

impl AnalysisRequest {
    /// Builds a request from a validated reading.
    ///
    /// # Semantics
    /// Only field ordering happens here; validation is the reading's job.
    pub fn from_reading(reading: &VitalsReading, operation: AggregationMode) -> Self {
        // Invariant:
        // - Wire order is age, glucose level, blood pressure and must never
        //   change; the service indexes the array positionally.
        Self {
            values: [reading.age, reading.glucose_level, reading.blood_pressure],
            operation,
        }
    }

    /// Serializes the request to compact JSON bytes.
    ///
    /// # Errors
    /// Returns [`CoreError::Codec`] when JSON serialization fails.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, CoreError> {
        serde_json::to_vec(self).map_err(CoreError::Codec)
    }

    /// Deserializes a request from JSON bytes.
    ///
    /// # Errors
    /// Returns [`CoreError::Codec`] when JSON decoding fails.
    pub fn from_json_bytes(raw: &[u8]) -> Result<Self, CoreError> {
        serde_json::from_slice(raw).map_err(CoreError::Codec)
    }
}

/// Error type for measurement validation and codec failures.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Measurement text is blank.
    #[error("{0} measurement is empty")]
    EmptyMeasurement(MeasurementField),
    /// Measurement text does not convert to a number.
    #[error("{0} measurement is not numeric")]
    NonNumericMeasurement(MeasurementField),
    /// Measurement value is zero, negative, or non-finite.
    #[error("{0} measurement must be a positive finite number")]
    NonPositiveMeasurement(MeasurementField),
    /// Aggregation mode name is not part of the closed enumeration.
    #[error("unknown aggregation mode: {0}")]
    UnknownAggregationMode(String),
    /// JSON encoding/decoding error.
    #[error("request codec failure: {0}")]
    Codec(#[from] serde_json::Error),
}
