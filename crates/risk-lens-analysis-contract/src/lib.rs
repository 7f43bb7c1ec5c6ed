#![warn(missing_docs)]
//! # risk-lens-analysis-contract
//!
//! ## Purpose
//! Defines the analysis service response schema and the risk tier mapping.
//!
//! ## Responsibilities
//! - Parse analysis response payloads.
//! - Classify the returned numeric score into a discrete risk tier.
//! - Provide the display rendering of the raw score.
//!
//! ## Data flow
//! Raw JSON response -> [`parse_analysis_response`] -> [`interpret_response`]
//! -> submission state and UI projection.
//!
//! ## Ownership and lifetimes
//! Parsed values are owned structs to avoid borrowing from transient network
//! buffers.
//!
//! ## Error model
//! Bodies that cannot be interpreted as an analysis response return
//! [`AnalysisContractError`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Score threshold above which the tier is [`RiskTier::High`].
pub const HIGH_RISK_THRESHOLD: f64 = 100.0;

/// Score threshold above which the tier is at least [`RiskTier::Medium`].
pub const MEDIUM_RISK_THRESHOLD: f64 = 70.0;

/// Parsed analysis response from the remote service.
///
/// Only the numeric result is consumed; unknown fields are ignored so newly
/// introduced server fields do not break the client.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    /// Numeric score computed server-side from the submitted values.
    pub result: f64,
}

/// Discrete risk tier derived from the analysis result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    /// Low risk.
    Low,
    /// Medium risk.
    Medium,
    /// High risk.
    High,
}

impl RiskTier {
    /// Returns the display label for this tier.
    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Medium => "Medium",
            RiskTier::High => "High",
        }
    }
}

/// Resolved outcome of one successful submission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisOutcome {
    /// Raw score returned by the service.
    pub result: f64,
    /// Tier derived from the score.
    pub tier: RiskTier,
}

impl AnalysisOutcome {
    /// Renders the raw score with two decimal places for display.
    pub fn display_result(&self) -> String {
        format!("{:.2}", self.result)
    }
}

/// Parses raw JSON into a validated analysis response.
///
/// # Errors
/// Returns [`AnalysisContractError::Decode`] when the body is not valid JSON
/// or lacks a numeric `result` field.
pub fn parse_analysis_response(raw: &str) -> Result<AnalysisResponse, AnalysisContractError> {
    serde_json::from_str(raw).map_err(AnalysisContractError::Decode)
}

/// Classifies an analysis score into a risk tier.
///
/// # Semantics
/// `High` iff `result > 100`; else `Medium` iff `result > 70`; else `Low`.
/// Total over all inputs; zero and negative scores classify as `Low`.
pub fn classify_risk(result: f64) -> RiskTier {
    if result > HIGH_RISK_THRESHOLD {
        RiskTier::High
    } else if result > MEDIUM_RISK_THRESHOLD {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}

/// Maps a parsed response into the resolved submission outcome.
pub fn interpret_response(response: &AnalysisResponse) -> AnalysisOutcome {
    AnalysisOutcome {
        result: response.result,
        tier: classify_risk(response.result),
    }
}

/// Analysis contract errors.
#[derive(Debug, Error)]
pub enum AnalysisContractError {
    /// Body could not be interpreted as an analysis response.
    #[error("analysis decode failure: {0}")]
    Decode(#[from] serde_json::Error),
}
