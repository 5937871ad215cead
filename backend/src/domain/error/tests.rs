//! Regression coverage for this module.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn base_error() -> Error {
    Error::invalid_request("bad")
}

#[rstest]
fn invalid_request_constructor_sets_code(base_error: Error) {
    assert_eq!(base_error.code(), ErrorCode::InvalidRequest);
    assert_eq!(base_error.message(), "bad");
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn new_falls_back_to_default_wording() {
    let error = Error::new(ErrorCode::ServiceUnavailable, "");
    assert_eq!(error.message(), "service unavailable");
}

#[rstest]
fn try_with_trace_id_rejects_empty_values(base_error: Error) {
    let result = base_error.try_with_trace_id("   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyTraceId)));
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[tokio::test]
async fn new_captures_trace_id_in_scope() {
    let trace_id: TraceId = TRACE_ID.parse().expect("valid uuid");
    let error = TraceId::scope(trace_id, async move { Error::forbidden("nope") }).await;
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn serialises_camel_case_payload(base_error: Error) {
    let value = serde_json::to_value(
        base_error
            .with_trace_id(TRACE_ID)
            .with_details(json!({ "field": "nom" })),
    )
    .expect("serialise error");
    assert_eq!(
        value,
        json!({
            "code": "invalid_request",
            "message": "bad",
            "traceId": TRACE_ID,
            "details": { "field": "nom" }
        })
    );
}

#[rstest]
#[case(json!({ "code": "not_found", "message": "  " }))]
#[case(json!({ "code": "not_found", "message": "gone", "traceId": " " }))]
fn deserialisation_enforces_invariants(#[case] payload: serde_json::Value) {
    let result = serde_json::from_value::<Error>(payload);
    assert!(result.is_err());
}

#[rstest]
fn accepts_snake_case_trace_alias() {
    let error: Error = serde_json::from_value(json!({
        "code": "service_unavailable",
        "message": "down",
        "trace_id": TRACE_ID
    }))
    .expect("payload decodes");
    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
#[case(ErrorCode::InvalidRequest, false)]
#[case(ErrorCode::Conflict, false)]
#[case(ErrorCode::NotFound, false)]
#[case(ErrorCode::ServiceUnavailable, true)]
#[case(ErrorCode::InternalError, true)]
fn server_side_codes_are_flagged(#[case] code: ErrorCode, #[case] expected: bool) {
    assert_eq!(code.is_server_side(), expected);
}

#[rstest]
fn blank_trace_id_leaves_existing_value(base_error: Error) {
    let error = base_error.with_trace_id(TRACE_ID).with_trace_id("  ");
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}
