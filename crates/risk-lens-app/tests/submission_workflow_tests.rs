//! Integration tests for the end-to-end submission workflow.

mod common;

use std::sync::Arc;

use risk_lens_core::AggregationMode;
use risk_lens_submit::GENERIC_FAILURE_MESSAGE;

#[test]
fn submission_workflow_tests_average_scenario_resolves_medium_tier() {
    let transport = Arc::new(common::ScriptedTransport::new(vec![(
        200,
        r#"{"result": 85}"#,
    )]));
    let mut controller = common::controller_with_transport(Arc::clone(&transport));
    common::fill_valid_form(&mut controller);

    assert!(controller
        .request_submission()
        .expect("dispatch should work"));
    controller
        .block_until_resolved()
        .expect("submission should resolve");

    assert_eq!(controller.ui().result_text().as_deref(), Some("85.00"));
    assert_eq!(controller.ui().risk_label(), Some("Medium"));

    let body = transport.last_body().expect("transport should see a body");
    let json: serde_json::Value =
        serde_json::from_slice(&body).expect("body should be valid json");
    assert_eq!(json["values"], serde_json::json!([45.0, 90.0, 120.0]));
    assert_eq!(json["operation"], "average");

    controller.shutdown().expect("worker should stop");
}

#[test]
fn submission_workflow_tests_sum_scenario_resolves_high_tier() {
    let transport = Arc::new(common::ScriptedTransport::new(vec![(
        200,
        r#"{"result": 240}"#,
    )]));
    let mut controller = common::controller_with_transport(Arc::clone(&transport));
    controller.form_mut().set_age("30");
    controller.form_mut().set_glucose_level("80");
    controller.form_mut().set_blood_pressure("80");
    controller.form_mut().set_mode(AggregationMode::Sum);

    assert!(controller
        .request_submission()
        .expect("dispatch should work"));
    controller
        .block_until_resolved()
        .expect("submission should resolve");

    assert_eq!(controller.ui().risk_label(), Some("High"));

    let body = transport.last_body().expect("transport should see a body");
    let json: serde_json::Value =
        serde_json::from_slice(&body).expect("body should be valid json");
    assert_eq!(json["operation"], "sum");

    controller.shutdown().expect("worker should stop");
}

#[test]
fn submission_workflow_tests_server_error_clears_prior_success() {
    let transport = Arc::new(common::ScriptedTransport::new(vec![
        (200, r#"{"result": 85}"#),
        (500, "internal error"),
    ]));
    let mut controller = common::controller_with_transport(Arc::clone(&transport));
    common::fill_valid_form(&mut controller);

    assert!(controller
        .request_submission()
        .expect("dispatch should work"));
    controller
        .block_until_resolved()
        .expect("first submission should resolve");
    assert_eq!(controller.ui().result_text().as_deref(), Some("85.00"));

    assert!(controller
        .request_submission()
        .expect("second dispatch should work"));
    controller
        .block_until_resolved()
        .expect("second submission should resolve");

    assert_eq!(
        controller.ui().error_text(),
        Some(GENERIC_FAILURE_MESSAGE),
        "failure must surface only the fixed message"
    );
    assert_eq!(
        controller.ui().result_text(),
        None,
        "stale result must not outlive the failed submission"
    );
    assert_eq!(controller.ui().risk_label(), None);

    controller.shutdown().expect("worker should stop");
}

#[test]
fn submission_workflow_tests_malformed_body_fails_with_fixed_message() {
    let transport = Arc::new(common::ScriptedTransport::new(vec![(
        200,
        r#"{"score": 85}"#,
    )]));
    let mut controller = common::controller_with_transport(transport);
    common::fill_valid_form(&mut controller);

    assert!(controller
        .request_submission()
        .expect("dispatch should work"));
    controller
        .block_until_resolved()
        .expect("submission should resolve");

    assert_eq!(controller.ui().error_text(), Some(GENERIC_FAILURE_MESSAGE));
    controller.shutdown().expect("worker should stop");
}
