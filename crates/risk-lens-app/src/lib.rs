#![warn(missing_docs)]
//! # risk-lens-app
//!
//! ## Purpose
//! Orchestrates form input, request building, the submission worker, and UI
//! state for the risk assessment workflow.
//!
//! ## Responsibilities
//! - Build analysis requests from validated form state.
//! - Run submissions on a dedicated worker thread so the caller stays
//!   responsive while one request is in flight.
//! - Enforce the submit gate: invalid input or a pending submission never
//!   dispatches a request.
//! - Project workflow state into a flat runtime status snapshot.
//!
//! ## Data flow
//! Form edits -> [`WorkflowController::request_submission`] -> worker command
//! -> [`risk_lens_submit::SubmitClient`] -> worker event -> submission state
//! transition -> UI projection.
//!
//! ## Ownership and lifetimes
//! Requests and events cross the worker boundary as owned values over mpsc
//! channels; the submission state is replaced wholesale on each transition.
//!
//! ## Error model
//! Wiring failures are wrapped in [`AppError`]. Submission failures never
//! escape as errors: they resolve into the `Failed` state carrying the
//! generic user-facing message, with the structured kind kept for logging.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::JoinHandle;

use risk_lens_analysis_contract::AnalysisOutcome;
use risk_lens_core::{AnalysisRequest, CoreError};
use risk_lens_submit::{
    FailureKind, GENERIC_FAILURE_MESSAGE, SubmitClient, SubmitError, classify_submit_error,
};
use risk_lens_ui::{MeasurementForm, UiState};
use thiserror::Error;

/// Build-time application version loaded from root `VERSION` file.
pub const APP_VERSION: &str = env!("RISK_LENS_VERSION");

/// Endpoint used when no override is configured.
pub const DEFAULT_ANALYSIS_ENDPOINT: &str = "http://localhost:5050/analyze";

/// Returns the app version sourced from root `VERSION`.
pub fn app_version() -> &'static str {
    APP_VERSION
}

/// Resolves the analysis endpoint from the environment.
///
/// Semantics:
/// - `RISK_LENS_ANALYSIS_ENDPOINT` set to non-blank text => that endpoint.
/// - Unset or blank => [`DEFAULT_ANALYSIS_ENDPOINT`].
pub fn analysis_endpoint_from_env() -> String {
    match std::env::var("RISK_LENS_ANALYSIS_ENDPOINT") {
        Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => DEFAULT_ANALYSIS_ENDPOINT.to_string(),
    }
}

/// Builds the analysis request from current form state.
///
/// # Errors
/// Returns [`AppError::Core`] when any field fails measurement coercion.
pub fn build_request(form: &MeasurementForm) -> Result<AnalysisRequest, AppError> {
    let reading = form.to_reading().map_err(AppError::Core)?;
    Ok(AnalysisRequest::from_reading(&reading, form.mode))
}

/// Consolidated runtime status snapshot for simple UI projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeStatus {
    /// Whether the submit control is currently enabled.
    pub submit_allowed: bool,
    /// Submission lifecycle phase name.
    pub phase: String,
    /// Two-decimal result text, or `none`.
    pub result: String,
    /// Risk tier label, or `none`.
    pub risk: String,
    /// Human-readable status line.
    pub status_line: String,
}

/// Projects UI runtime state into a flat status snapshot.
pub fn project_runtime_status(state: &UiState) -> RuntimeStatus {
    RuntimeStatus {
        submit_allowed: state.can_submit(),
        phase: state.submission.state().name().to_string(),
        result: state.result_text().unwrap_or_else(|| "none".to_string()),
        risk: state.risk_label().unwrap_or("none").to_string(),
        status_line: state.status_line(),
    }
}

/// Commands accepted by the submission worker.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerCommand {
    /// Submit one prepared request.
    Submit(AnalysisRequest),
    /// Stop the worker loop.
    Shutdown,
}

/// Events emitted by the submission worker.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerEvent {
    /// The in-flight submission resolved successfully.
    SubmissionSucceeded {
        /// Parsed and classified outcome.
        outcome: AnalysisOutcome,
    },
    /// The in-flight submission failed.
    SubmissionFailed {
        /// Internal failure classification for logging.
        kind: FailureKind,
        /// Internal failure detail for logging; never shown to the user.
        detail: String,
    },
}

/// Handle to the running submission worker.
#[derive(Debug)]
pub struct SubmissionRuntime {
    command_tx: Sender<WorkerCommand>,
    event_rx: Receiver<WorkerEvent>,
    worker_join: JoinHandle<()>,
}

impl SubmissionRuntime {
    /// Sends one request to the worker.
    ///
    /// # Errors
    /// Returns [`AppError::Worker`] when the worker channel is closed.
    fn dispatch(&self, request: AnalysisRequest) -> Result<(), AppError> {
        self.command_tx
            .send(WorkerCommand::Submit(request))
            .map_err(|error| AppError::Worker(format!("submission dispatch failed: {error}")))
    }

    /// Returns the next event without blocking.
    ///
    /// # Errors
    /// Returns [`AppError::Worker`] when the worker channel disconnected.
    fn try_next_event(&self) -> Result<Option<WorkerEvent>, AppError> {
        match self.event_rx.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(AppError::Worker(
                "submission worker channel disconnected".to_string(),
            )),
        }
    }

    /// Blocks until the next event arrives.
    ///
    /// # Errors
    /// Returns [`AppError::Worker`] when the worker channel disconnected.
    fn wait_event(&self) -> Result<WorkerEvent, AppError> {
        self.event_rx.recv().map_err(|_| {
            AppError::Worker("submission worker channel disconnected".to_string())
        })
    }
}

/// Spawns the submission worker that owns the submit client.
///
/// One worker resolves one submission at a time; the state-machine guard on
/// the controller side ensures at most one is ever in flight.
///
/// # Errors
/// Returns [`AppError::Worker`] when the worker thread cannot be spawned.
pub fn spawn_submission_worker(client: SubmitClient) -> Result<SubmissionRuntime, AppError> {
    let (command_tx, command_rx) = mpsc::channel::<WorkerCommand>();
    let (event_tx, event_rx) = mpsc::channel::<WorkerEvent>();

    let worker_join = std::thread::Builder::new()
        .name("risk-lens-submission-worker".to_string())
        .spawn(move || {
            while let Ok(command) = command_rx.recv() {
                match command {
                    WorkerCommand::Submit(request) => {
                        let event = match client.submit(&request) {
                            Ok(outcome) => WorkerEvent::SubmissionSucceeded { outcome },
                            Err(error) => WorkerEvent::SubmissionFailed {
                                kind: classify_submit_error(&error),
                                detail: error.to_string(),
                            },
                        };
                        if event_tx.send(event).is_err() {
                            break;
                        }
                    }
                    WorkerCommand::Shutdown => break,
                }
            }
        })
        .map_err(|error| {
            AppError::Worker(format!("failed to spawn submission worker thread: {error}"))
        })?;

    Ok(SubmissionRuntime {
        command_tx,
        event_rx,
        worker_join,
    })
}

/// Drives the full workflow: form state, submit gate, worker dispatch, and
/// submission state transitions.
#[derive(Debug)]
pub struct WorkflowController {
    ui: UiState,
    runtime: SubmissionRuntime,
}

impl WorkflowController {
    /// Creates a controller around a spawned submission runtime.
    pub fn new(runtime: SubmissionRuntime) -> Self {
        Self {
            ui: UiState::new(app_version()),
            runtime,
        }
    }

    /// Returns the current UI state snapshot.
    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    /// Returns the measurement form for editing.
    ///
    /// Edits are accepted at any time, including while a submission is
    /// pending; they never cancel the in-flight request.
    pub fn form_mut(&mut self) -> &mut MeasurementForm {
        &mut self.ui.form
    }

    /// Attempts to submit the current form.
    ///
    /// # Returns
    /// `Ok(false)` when the submit gate is closed (invalid input or a pending
    /// submission) — nothing is dispatched. `Ok(true)` when exactly one
    /// request was handed to the worker and the state moved to `Pending`.
    ///
    /// # Errors
    /// Returns [`AppError`] for request-build or worker wiring failures.
    pub fn request_submission(&mut self) -> Result<bool, AppError> {
        if !self.ui.can_submit() {
            return Ok(false);
        }

        let request = build_request(&self.ui.form)?;
        self.runtime.dispatch(request)?;
        self.ui.submission.begin();
        Ok(true)
    }

    /// Applies all queued worker events and returns them for logging.
    ///
    /// # Errors
    /// Returns [`AppError::Worker`] when the worker channel disconnected.
    pub fn drain_events(&mut self) -> Result<Vec<WorkerEvent>, AppError> {
        let mut drained = Vec::new();
        while let Some(event) = self.runtime.try_next_event()? {
            self.apply_event(&event);
            drained.push(event);
        }
        Ok(drained)
    }

    /// Blocks until the in-flight submission resolves, applies the event, and
    /// returns it for logging.
    ///
    /// # Errors
    /// Returns [`AppError::Worker`] when the worker channel disconnected.
    pub fn block_until_resolved(&mut self) -> Result<WorkerEvent, AppError> {
        let event = self.runtime.wait_event()?;
        self.apply_event(&event);
        Ok(event)
    }

    fn apply_event(&mut self, event: &WorkerEvent) {
        match event {
            WorkerEvent::SubmissionSucceeded { outcome } => {
                self.ui.submission.complete(*outcome);
            }
            WorkerEvent::SubmissionFailed { .. } => {
                // Failure detail stays internal; the user sees one fixed
                // message regardless of cause.
                self.ui.submission.fail(GENERIC_FAILURE_MESSAGE);
            }
        }
    }

    /// Stops the worker and waits for it to exit.
    ///
    /// # Errors
    /// Returns [`AppError::Worker`] when the worker thread panicked.
    pub fn shutdown(self) -> Result<(), AppError> {
        let _ = self.runtime.command_tx.send(WorkerCommand::Shutdown);
        self.runtime
            .worker_join
            .join()
            .map_err(|_| AppError::Worker("submission worker thread panicked".to_string()))
    }
}

/// App integration error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Measurement or request model error.
    #[error("core model error: {0}")]
    Core(CoreError),
    /// Submission layer error.
    #[error("submission error: {0}")]
    Submit(#[from] SubmitError),
    /// Worker wiring error.
    #[error("submission worker error: {0}")]
    Worker(String),
}
