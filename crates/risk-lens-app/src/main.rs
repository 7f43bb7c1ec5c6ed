#![warn(missing_docs)]
//! # risk-lens-app binary
//!
//! Command-line entry point for the risk assessment workflow.

/// CLI entry point.
fn main() {
    if let Err(error) = cli::run() {
        eprintln!("risk-lens: {error}");
        std::process::exit(1);
    }
}

mod cli {
    //! Line-oriented front end: collects the three measurements and the
    //! aggregation mode from arguments, drives the submission worker, and
    //! prints the analysis outcome with per-run stage logging.

    use std::sync::Arc;

    use risk_lens_app::{
        WorkerEvent, WorkflowController, analysis_endpoint_from_env, app_version,
        spawn_submission_worker,
    };
    use risk_lens_core::AggregationMode;
    use risk_lens_submit::{HttpTransport, SubmitClient};
    use time::OffsetDateTime;

    /// Runs the workflow once and blocks until the submission resolves.
    pub fn run() -> Result<(), String> {
        let endpoint = analysis_endpoint_from_env();
        log_info(
            "bootstrap",
            "startup",
            &format!("version={} endpoint={endpoint}", app_version()),
        );

        let arguments: Vec<String> = std::env::args().skip(1).collect();
        let (age, glucose_level, blood_pressure, mode) =
            parse_arguments(&arguments).map_err(|error| {
                print_usage();
                error
            })?;

        let transport = HttpTransport::new()
            .map_err(|error| format!("transport initialization failed: {error}"))?;
        let client = SubmitClient::new(endpoint.as_str(), Arc::new(transport))
            .map_err(|error| format!("submit client initialization failed: {error}"))?;
        let runtime = spawn_submission_worker(client)
            .map_err(|error| format!("worker startup failed: {error}"))?;

        let mut controller = WorkflowController::new(runtime);
        controller.form_mut().set_age(age);
        controller.form_mut().set_glucose_level(glucose_level);
        controller.form_mut().set_blood_pressure(blood_pressure);
        controller.form_mut().set_mode(mode);

        let dispatched = controller
            .request_submission()
            .map_err(|error| format!("submission dispatch failed: {error}"))?;
        if !dispatched {
            log_info("validate", "blocked", "submit gate closed for current input");
            let _ = controller.shutdown();
            return Err(
                "submission blocked (requires three positive numeric measurements)".to_string(),
            );
        }

        log_info(
            "submit",
            "dispatched",
            &format!("mode={} values=3", mode.wire_name()),
        );

        let event = controller
            .block_until_resolved()
            .map_err(|error| format!("submission resolution failed: {error}"))?;
        match &event {
            WorkerEvent::SubmissionSucceeded { outcome } => log_info(
                "submit",
                "resolved",
                &format!(
                    "result={} tier={}",
                    outcome.display_result(),
                    outcome.tier.label()
                ),
            ),
            WorkerEvent::SubmissionFailed { kind, detail } => {
                log_error("submit", "failed", &format!("kind={kind:?} detail={detail}"));
            }
        }

        let result_text = controller.ui().result_text();
        let risk_label = controller.ui().risk_label();
        let error_text = controller.ui().error_text().map(str::to_string);

        controller
            .shutdown()
            .map_err(|error| format!("worker shutdown failed: {error}"))?;

        if let (Some(result), Some(risk)) = (result_text, risk_label) {
            println!("Result: {result}");
            println!("Risk Level: {risk}");
            return Ok(());
        }

        Err(error_text.unwrap_or_else(|| "submission did not resolve".to_string()))
    }

    fn parse_arguments(
        arguments: &[String],
    ) -> Result<(String, String, String, AggregationMode), String> {
        if arguments.len() < 3 || arguments.len() > 4 {
            return Err(format!(
                "expected 3 measurements and an optional mode, got {} arguments",
                arguments.len()
            ));
        }

        let mode = match arguments.get(3) {
            Some(raw) => AggregationMode::from_name(raw).map_err(|error| error.to_string())?,
            None => AggregationMode::default(),
        };

        Ok((
            arguments[0].clone(),
            arguments[1].clone(),
            arguments[2].clone(),
            mode,
        ))
    }

    fn print_usage() {
        eprintln!("risk-lens {}", app_version());
        eprintln!("usage: risk-lens-app <age> <glucose-level> <blood-pressure> [average|sum]");
    }

    fn log_info(stage: &str, action: &str, detail: &str) {
        write_log_line("INFO", stage, action, detail);
    }

    fn log_error(stage: &str, action: &str, detail: &str) {
        write_log_line("ERROR", stage, action, detail);
    }

    fn write_log_line(level: &str, stage: &str, action: &str, detail: &str) {
        let timestamp = timestamp_compact_utc();
        eprintln!("{timestamp} | {level} | {stage} | {action} | {detail}");
    }

    fn timestamp_compact_utc() -> String {
        let now = OffsetDateTime::now_utc();
        format!(
            "{:04}{:02}{:02}_{:02}{:02}{:02}",
            now.year(),
            now.month() as u8,
            now.day(),
            now.hour(),
            now.minute(),
            now.second()
        )
    }
}
