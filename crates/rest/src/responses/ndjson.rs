//! Newline-delimited JSON responses.
//!
//! Streamed responses commit their `200` status before the first value is
//! produced. A failure after that point cannot change the status; it is
//! logged and turned into a body error, which aborts the connection.

use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use futures::{StreamExt, stream::BoxStream};
use serde_json::Value;

use crate::error::{RestError, RestResult, abort_committed};

/// Media type for newline-delimited JSON.
pub const NDJSON: &str = "application/x-ndjson";

/// Returns true if the `Accept` header asks for NDJSON.
pub fn wants_ndjson(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::ACCEPT)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .filter_map(|range| range.trim().parse::<mime::Mime>().ok())
        .any(|m| m.essence_str() == NDJSON)
}

/// Encodes one value as a line.
pub fn encode_line(value: &Value) -> RestResult<Bytes> {
    let mut line = serde_json::to_vec(value).map_err(|e| RestError::BackendFailure {
        message: format!("failed to encode value: {}", e),
        source: None,
    })?;
    line.push(b'\n');
    Ok(Bytes::from(line))
}

/// Streams values as an NDJSON response.
pub fn ndjson_response(values: BoxStream<'static, RestResult<Value>>) -> Response {
    let lines = values.map(|item| item.and_then(|value| encode_line(&value)).map_err(abort_committed));

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, HeaderValue::from_static(NDJSON))],
        Body::from_stream(lines),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::json;

    #[test]
    fn test_wants_ndjson() {
        let mut headers = HeaderMap::new();
        assert!(!wants_ndjson(&headers));

        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        assert!(!wants_ndjson(&headers));

        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("text/html, application/x-ndjson;q=0.9"),
        );
        assert!(wants_ndjson(&headers));
    }

    #[tokio::test]
    async fn test_lines() {
        let values = futures::stream::iter(vec![Ok(json!(1)), Ok(json!({"a": "b"}))]).boxed();
        let response = ndjson_response(values);

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], NDJSON);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"1\n{\"a\":\"b\"}\n");
    }

    #[tokio::test]
    async fn test_failure_after_commit_errors_the_body() {
        let values = futures::stream::iter(vec![
            Ok(json!(1)),
            Err(RestError::malformed("backend went away")),
        ])
        .boxed();
        let response = ndjson_response(values);

        assert_eq!(response.status(), StatusCode::OK);
        assert!(to_bytes(response.into_body(), usize::MAX).await.is_err());
    }
}
