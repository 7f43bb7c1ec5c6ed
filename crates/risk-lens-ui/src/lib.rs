#![warn(missing_docs)]
//! # risk-lens-ui
//!
//! ## Purpose
//! Defines the UI-facing state model for the risk assessment workflow.
//!
//! ## Responsibilities
//! - Hold raw measurement text and the aggregation mode selector.
//! - Expose the validity gate that enables the submit control.
//! - Project the submission state into display-safe text.
//!
//! ## Data flow
//! Field edits mutate [`MeasurementForm`]; the app orchestrator drives the
//! embedded submission machine; rendering reads the projections on
//! [`UiState`].
//!
//! ## Ownership and lifetimes
//! `UiState` owns all text and state values to keep event handling free of
//! cross-thread borrowing.
//!
//! ## Error model
//! This crate favors explicit state over recoverable errors. Invalid input
//! never errors here; it only disables the submit gate.

use risk_lens_core::{AggregationMode, CoreError, VitalsReading};
use risk_lens_submit::{SubmissionState, SubmissionStateMachine};

/// Raw form state for the three measurement fields and the mode selector.
///
/// Fields hold unvalidated text and may be edited at any time, including
/// while a submission is pending.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MeasurementForm {
    /// Raw age text.
    pub age: String,
    /// Raw glucose level text.
    pub glucose_level: String,
    /// Raw blood pressure text.
    pub blood_pressure: String,
    /// Selected aggregation mode.
    pub mode: AggregationMode,
}

impl MeasurementForm {
    /// Creates an empty form with the default mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the age field.
    pub fn set_age(&mut self, raw: impl Into<String>) {
        self.age = raw.into();
    }

    /// Sets the glucose level field.
    pub fn set_glucose_level(&mut self, raw: impl Into<String>) {
        self.glucose_level = raw.into();
    }

    /// Sets the blood pressure field.
    pub fn set_blood_pressure(&mut self, raw: impl Into<String>) {
        self.blood_pressure = raw.into();
    }

    /// Sets the aggregation mode.
    pub fn set_mode(&mut self, mode: AggregationMode) {
        self.mode = mode;
    }

    /// Returns `true` when all three fields coerce to positive finite numbers.
    pub fn is_valid(&self) -> bool {
        self.to_reading().is_ok()
    }

    /// Coerces the current field text into a validated reading.
    ///
    /// # Errors
    /// Returns the first per-field [`CoreError`] in field order.
    pub fn to_reading(&self) -> Result<VitalsReading, CoreError> {
        VitalsReading::from_text(&self.age, &self.glucose_level, &self.blood_pressure)
    }
}

/// Aggregate UI runtime state.
#[derive(Debug, Clone)]
pub struct UiState {
    /// App version string sourced from root `VERSION`.
    pub version: String,
    /// Measurement form state.
    pub form: MeasurementForm,
    /// Submission lifecycle machine; the single owner of result, tier, and
    /// error text.
    pub submission: SubmissionStateMachine,
}

impl UiState {
    /// Creates default UI state.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            form: MeasurementForm::new(),
            submission: SubmissionStateMachine::new(),
        }
    }

    /// Returns `true` when the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        self.submission.can_submit(self.form.is_valid())
    }

    /// Returns the human-readable status line for the current state.
    pub fn status_line(&self) -> String {
        match self.submission.state() {
            SubmissionState::Idle => "No analysis yet".to_string(),
            SubmissionState::Pending => "Analyzing measurements...".to_string(),
            SubmissionState::Succeeded(outcome) => format!("{} risk", outcome.tier.label()),
            SubmissionState::Failed { message } => message.clone(),
        }
    }

    /// Returns the two-decimal result text when the last submission succeeded.
    pub fn result_text(&self) -> Option<String> {
        match self.submission.state() {
            SubmissionState::Succeeded(outcome) => Some(outcome.display_result()),
            _ => None,
        }
    }

    /// Returns the risk tier label when the last submission succeeded.
    pub fn risk_label(&self) -> Option<&'static str> {
        match self.submission.state() {
            SubmissionState::Succeeded(outcome) => Some(outcome.tier.label()),
            _ => None,
        }
    }

    /// Returns the failure text when the last submission failed.
    pub fn error_text(&self) -> Option<&str> {
        match self.submission.state() {
            SubmissionState::Failed { message } => Some(message.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for the submit gate and display projections.

    use risk_lens_analysis_contract::{AnalysisOutcome, RiskTier};
    use risk_lens_submit::GENERIC_FAILURE_MESSAGE;

    use super::*;

    fn filled_state() -> UiState {
        let mut state = UiState::new("v0.1.0");
        state.form.set_age("45");
        state.form.set_glucose_level("90");
        state.form.set_blood_pressure("120");
        state
    }

    #[test]
    fn submit_gate_requires_all_fields() {
        let mut state = filled_state();
        assert!(state.can_submit());

        state.form.set_age("");
        assert!(!state.can_submit(), "blank age must disable submit");
    }

    #[test]
    fn submit_gate_blocks_while_pending() {
        let mut state = filled_state();
        state.submission.begin();
        assert!(!state.can_submit());
    }

    #[test]
    fn projections_follow_submission_state() {
        let mut state = filled_state();
        assert_eq!(state.status_line(), "No analysis yet");
        assert_eq!(state.result_text(), None);

        state.submission.begin();
        state.submission.complete(AnalysisOutcome {
            result: 85.0,
            tier: RiskTier::Medium,
        });
        assert_eq!(state.result_text().as_deref(), Some("85.00"));
        assert_eq!(state.risk_label(), Some("Medium"));
        assert_eq!(state.status_line(), "Medium risk");

        state.submission.begin();
        state.submission.fail(GENERIC_FAILURE_MESSAGE);
        assert_eq!(state.result_text(), None, "stale result must be cleared");
        assert_eq!(state.error_text(), Some(GENERIC_FAILURE_MESSAGE));
    }
}
