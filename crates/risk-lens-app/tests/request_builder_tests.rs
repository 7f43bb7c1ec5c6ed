//! Integration tests for form-to-request building.

use risk_lens_app::{AppError, build_request};
use risk_lens_core::AggregationMode;
use risk_lens_ui::MeasurementForm;

#[test]
fn request_builder_tests_orders_values_age_glucose_blood_pressure() {
    let mut form = MeasurementForm::new();
    form.set_age("45");
    form.set_glucose_level("90");
    form.set_blood_pressure("120");
    form.set_mode(AggregationMode::Sum);

    let request = build_request(&form).expect("request should build");
    assert_eq!(request.values, [45.0, 90.0, 120.0]);
    assert_eq!(request.operation, AggregationMode::Sum);
}

#[test]
fn request_builder_tests_refuses_invalid_form() {
    let mut form = MeasurementForm::new();
    form.set_age("45");
    form.set_glucose_level("ninety");
    form.set_blood_pressure("120");

    let error = build_request(&form).expect_err("invalid form must not build");
    assert!(matches!(error, AppError::Core(_)));
}
