#![warn(missing_docs)]
//! # risk-lens-submit
//!
//! ## Purpose
//! Implements the submission side of the risk assessment workflow: endpoint
//! policy, the transport abstraction, the analysis client, and the submission
//! lifecycle state machine.
//!
//! ## Responsibilities
//! - Validate the analysis endpoint before any request is sent.
//! - Execute submissions through an injectable transport abstraction.
//! - Collapse transport, status, and decode failures behind one generic
//!   user-facing message while keeping structured kinds for diagnostics.
//! - Model legal submission state transitions.
//!
//! ## Data flow
//! Validated request -> [`SubmitClient::submit`] sends bytes through
//! [`SubmitTransport`] -> reply status/body checks -> parsed outcome ->
//! [`SubmissionStateMachine`] transition.
//!
//! ## Ownership and lifetimes
//! Envelopes and replies own their buffers so the worker thread never borrows
//! from caller state.
//!
//! ## Error model
//! Endpoint policy violations and submission failures surface as
//! [`SubmitError`]; [`classify_submit_error`] yields the internal
//! [`FailureKind`] used for logging only.
//!
//! ## Example
//! ```rust
//! use risk_lens_submit::{SubmissionState, SubmissionStateMachine};
//!
//! let machine = SubmissionStateMachine::new();
//! assert!(matches!(machine.state(), SubmissionState::Idle));
//! ```

use std::sync::Arc;

use risk_lens_analysis_contract::{
    AnalysisContractError, AnalysisOutcome, interpret_response, parse_analysis_response,
};
use risk_lens_core::{AnalysisRequest, CoreError};
use thiserror::Error;
use url::Url;

/// Required analysis path suffix.
pub const REQUIRED_ANALYZE_PATH: &str = "/analyze";

/// Content type header value attached to every submission.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// The only failure text ever shown to the user.
///
/// All failure detail stays internal; see [`classify_submit_error`].
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Unable to analyze data. Please ensure services are running.";

/// One prepared submission handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionEnvelope {
    /// Fully qualified analysis endpoint URL.
    pub endpoint: String,
    /// Content type header value.
    pub content_type: &'static str,
    /// Serialized JSON request body.
    pub body: Vec<u8>,
}

/// Raw reply captured from the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportReply {
    /// HTTP status code.
    pub status: u16,
    /// Response body text.
    pub body: String,
}

impl TransportReply {
    /// Returns `true` when the status code indicates success.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Abstract transport used by the submit client.
pub trait SubmitTransport: Send + Sync {
    /// Sends one prepared envelope to the analysis service.
    ///
    /// # Errors
    /// Returns [`SubmitError::Transport`] for connection-level failures.
    /// Non-success statuses are returned as a reply, not an error; status
    /// interpretation belongs to the client.
    fn send(&self, envelope: &SubmissionEnvelope) -> Result<TransportReply, SubmitError>;
}

/// Real HTTP transport backed by a blocking `reqwest` client.
///
/// # Notes
/// The client is built without a request timeout: an in-flight submission
/// always runs to completion, and there is no abort path.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Creates the real transport.
    ///
    /// # Errors
    /// Returns [`SubmitError::Transport`] when the underlying client cannot
    /// be constructed.
    pub fn new() -> Result<Self, SubmitError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<std::time::Duration>)
            .build()
            .map_err(|error| SubmitError::Transport(error.to_string()))?;

        Ok(Self { client })
    }
}

impl SubmitTransport for HttpTransport {
    fn send(&self, envelope: &SubmissionEnvelope) -> Result<TransportReply, SubmitError> {
        let response = self
            .client
            .post(&envelope.endpoint)
            .header("Content-Type", envelope.content_type)
            .body(envelope.body.clone())
            .send()
            .map_err(|error| SubmitError::Transport(error.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|error| SubmitError::Transport(error.to_string()))?;

        Ok(TransportReply { status, body })
    }
}

/// Client that validates endpoint policy and executes submissions.
#[derive(Clone)]
pub struct SubmitClient {
    endpoint: String,
    transport: Arc<dyn SubmitTransport>,
}

impl SubmitClient {
    /// Creates a validated submit client.
    ///
    /// # Errors
    /// Returns [`SubmitError::InvalidEndpoint`] when the URL is not
    /// `http`/`https` or its path does not end with `/analyze`.
    pub fn new(
        endpoint: impl Into<String>,
        transport: Arc<dyn SubmitTransport>,
    ) -> Result<Self, SubmitError> {
        let endpoint = endpoint.into();
        validate_analysis_endpoint(&endpoint)?;
        Ok(Self {
            endpoint,
            transport,
        })
    }

    /// Submits one request and resolves it into an analysis outcome.
    ///
    /// # Errors
    /// Returns [`SubmitError::Encode`] when the request cannot be serialized,
    /// [`SubmitError::Transport`] for connection failures,
    /// [`SubmitError::Status`] for non-2xx replies, and
    /// [`SubmitError::Decode`] when the reply body is not an analysis
    /// response.
    pub fn submit(&self, request: &AnalysisRequest) -> Result<AnalysisOutcome, SubmitError> {
        let body = request.to_json_bytes().map_err(SubmitError::Encode)?;
        let envelope = SubmissionEnvelope {
            endpoint: self.endpoint.clone(),
            content_type: CONTENT_TYPE_JSON,
            body,
        };

        let reply = self.transport.send(&envelope)?;
        if !reply.is_success() {
            return Err(SubmitError::Status(reply.status));
        }

        let response = parse_analysis_response(&reply.body).map_err(SubmitError::Decode)?;
        Ok(interpret_response(&response))
    }

    /// Returns the configured analysis endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Validates analysis endpoint constraints.
///
/// # Errors
/// Returns [`SubmitError::InvalidEndpoint`] for unparsable URLs, schemes
/// other than `http`/`https`, or a path that does not end with `/analyze`.
pub fn validate_analysis_endpoint(endpoint: &str) -> Result<(), SubmitError> {
    let parsed = Url::parse(endpoint)
        .map_err(|error| SubmitError::InvalidEndpoint(format!("invalid analysis url: {error}")))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(SubmitError::InvalidEndpoint(
            "analysis endpoint must use http or https".to_string(),
        ));
    }

    if !parsed.path().ends_with(REQUIRED_ANALYZE_PATH) {
        return Err(SubmitError::InvalidEndpoint(format!(
            "analysis endpoint path must end with {REQUIRED_ANALYZE_PATH}"
        )));
    }

    Ok(())
}

/// Errors produced by the submission layer.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Endpoint violates policy requirements.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    /// Request payload could not be serialized.
    #[error("request encode failure: {0}")]
    Encode(CoreError),
    /// Connection-level transport failure.
    #[error("submission transport failure: {0}")]
    Transport(String),
    /// Service replied with a non-success status.
    #[error("analysis service returned status {0}")]
    Status(u16),
    /// Reply body could not be interpreted as an analysis response.
    #[error("analysis response decode failure: {0}")]
    Decode(AnalysisContractError),
}

/// Internal failure classification used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Endpoint policy violation.
    Endpoint,
    /// Request-side encode failure.
    Encode,
    /// Connection-level failure.
    Transport,
    /// Non-success status reply.
    Status,
    /// Reply body decode failure.
    Decode,
}

/// Classifies a submit error for internal logging.
///
/// The classification never reaches the user; every kind renders as
/// [`GENERIC_FAILURE_MESSAGE`].
pub fn classify_submit_error(error: &SubmitError) -> FailureKind {
    match error {
        SubmitError::InvalidEndpoint(_) => FailureKind::Endpoint,
        SubmitError::Encode(_) => FailureKind::Encode,
        SubmitError::Transport(_) => FailureKind::Transport,
        SubmitError::Status(_) => FailureKind::Status,
        SubmitError::Decode(_) => FailureKind::Decode,
    }
}

/// Submission lifecycle state.
///
/// Exactly one variant is active at a time; a new submission replaces the
/// whole value, so a stale result can never be shown next to a fresh error.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState {
    /// No submission has been made yet.
    Idle,
    /// A submission is in flight.
    Pending,
    /// The last submission resolved successfully.
    Succeeded(AnalysisOutcome),
    /// The last submission failed.
    Failed {
        /// User-facing failure text.
        message: String,
    },
}

impl SubmissionState {
    /// Returns the stable state name used in status projection and logs.
    pub fn name(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "Idle",
            SubmissionState::Pending => "Pending",
            SubmissionState::Succeeded(_) => "Succeeded",
            SubmissionState::Failed { .. } => "Failed",
        }
    }
}

/// Submission state machine with explicit legal transitions.
#[derive(Debug, Clone)]
pub struct SubmissionStateMachine {
    state: SubmissionState,
}

impl SubmissionStateMachine {
    /// Creates a new machine in `Idle` state.
    pub fn new() -> Self {
        Self {
            state: SubmissionState::Idle,
        }
    }

    /// Returns the current state snapshot.
    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Returns `true` while a submission is in flight.
    pub fn is_pending(&self) -> bool {
        matches!(self.state, SubmissionState::Pending)
    }

    /// Returns `true` when a new submission may begin.
    pub fn can_submit(&self, inputs_valid: bool) -> bool {
        inputs_valid && !self.is_pending()
    }

    /// Applies the submit transition.
    ///
    /// # Returns
    /// `false` when a submission is already pending (the request must not be
    /// dispatched); `true` otherwise.
    ///
    /// # Side effects
    /// Entering `Pending` drops any previous result, tier, or error text.
    pub fn begin(&mut self) -> bool {
        if self.is_pending() {
            return false;
        }

        self.state = SubmissionState::Pending;
        true
    }

    /// Applies the success transition.
    ///
    /// Resolution is only meaningful for an in-flight submission; calls in
    /// any other state are ignored.
    pub fn complete(&mut self, outcome: AnalysisOutcome) {
        if self.is_pending() {
            self.state = SubmissionState::Succeeded(outcome);
        }
    }

    /// Applies the failure transition.
    ///
    /// Resolution is only meaningful for an in-flight submission; calls in
    /// any other state are ignored.
    pub fn fail(&mut self, message: impl Into<String>) {
        if self.is_pending() {
            self.state = SubmissionState::Failed {
                message: message.into(),
            };
        }
    }
}

impl Default for SubmissionStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
