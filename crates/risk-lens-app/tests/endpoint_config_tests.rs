//! Integration tests for endpoint environment configuration.

use risk_lens_app::{DEFAULT_ANALYSIS_ENDPOINT, analysis_endpoint_from_env};

#[test]
fn endpoint_config_tests_env_override_and_default() {
    // Safety:
    // - Integration tests mutate process env in a single-threaded test body.
    // - We reset the variable before returning.
    unsafe { std::env::set_var("RISK_LENS_ANALYSIS_ENDPOINT", "http://10.0.0.7:5050/analyze") };
    assert_eq!(
        analysis_endpoint_from_env(),
        "http://10.0.0.7:5050/analyze"
    );

    // Safety: see rationale above.
    unsafe { std::env::set_var("RISK_LENS_ANALYSIS_ENDPOINT", "   ") };
    assert_eq!(analysis_endpoint_from_env(), DEFAULT_ANALYSIS_ENDPOINT);

    // Safety: see rationale above.
    unsafe { std::env::remove_var("RISK_LENS_ANALYSIS_ENDPOINT") };
    assert_eq!(analysis_endpoint_from_env(), DEFAULT_ANALYSIS_ENDPOINT);
}
