//! Error body test helpers for backend testing
//!
//! The backend answers failures with one of two JSON shapes:
//! `{"msg": "..."}` for single-message errors and
//! `{"errors": [{"msg": "...", ...}]}` for field/validation errors.
//! These helpers assert on those shapes without depending on backend types.

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use serde_json::Value;

/// Read a response body and parse it as JSON.
pub async fn read_json<B>(resp: ServiceResponse<B>) -> (StatusCode, Value)
where
    B: MessageBody,
{
    let status = resp.status();
    let body = actix_web::test::read_body(resp).await;
    let json: Value =
        serde_json::from_slice(&body).expect("Response body should be valid JSON");
    (status, json)
}

/// Assert that a response is exactly `{"msg": expected_msg}` with the given status.
pub async fn assert_msg_response<B>(
    resp: ServiceResponse<B>,
    expected_status: StatusCode,
    expected_msg: &str,
) where
    B: MessageBody,
{
    let (status, json) = read_json(resp).await;
    assert_eq!(status, expected_status);
    assert_eq!(
        json,
        serde_json::json!({ "msg": expected_msg }),
        "unexpected error body"
    );
}

/// Assert that a response is a 400 `{"errors": [...]}` body whose messages
/// include every entry of `expected_msgs`.
pub async fn assert_errors_response<B>(resp: ServiceResponse<B>, expected_msgs: &[&str])
where
    B: MessageBody,
{
    let (status, json) = read_json(resp).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let msgs: Vec<&str> = json["errors"]
        .as_array()
        .expect("errors field should be an array")
        .iter()
        .filter_map(|e| e["msg"].as_str())
        .collect();

    for expected in expected_msgs {
        assert!(
            msgs.contains(expected),
            "Expected errors to contain '{expected}', got {msgs:?}"
        );
    }
}
