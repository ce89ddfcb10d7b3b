//! Request body extractors.
//!
//! Bodies may be JSON or `application/x-www-form-urlencoded`. An empty body
//! is an empty object.
//!
//! - [`RequestBody`] - The body exactly as sent; used by writes and opens
//! - [`RequestParams`] - The body with URL query parameters folded in
//!   underneath, so `GET /db/events/iterator?limit=2` works without a body

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header,
};
use serde_json::{Map, Value};

use crate::error::RestError;

/// The request body as a JSON value.
///
/// # Example
///
/// ```rust,ignore
/// use orbitgate_rest::extractors::RequestBody;
///
/// async fn handler(RequestBody(body): RequestBody) {
///     println!("{}", body["val"]);
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RequestBody(pub Value);

impl RequestBody {
    /// Consumes the extractor and returns the inner Value.
    pub fn into_inner(self) -> Value {
        self.0
    }

    /// Returns a field of an object body.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.as_object().and_then(|object| object.get(name))
    }
}

impl<S> FromRequest<S> for RequestBody
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        read_body(req, state).await.map(RequestBody)
    }
}

/// Read parameters: the body merged over the URL query parameters.
///
/// Body fields win over query fields. A non-object body is kept as is.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestParams(pub Value);

impl RequestParams {
    /// Consumes the extractor and returns the inner Value.
    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl<S> FromRequest<S> for RequestParams
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let query = fold_pairs(req.uri().query().unwrap_or("").as_bytes());
        let body = read_body(req, state).await?;
        Ok(RequestParams(merge_under(query, body)))
    }
}

async fn read_body<S>(req: Request, state: &S) -> Result<Value, RestError>
where
    S: Send + Sync,
{
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let bytes = Bytes::from_request(req, state)
        .await
        .map_err(|e| RestError::malformed(format!("unreadable body: {}", e)))?;

    if is_form(&content_type) {
        Ok(Value::Object(fold_pairs(&bytes)))
    } else if bytes.iter().all(u8::is_ascii_whitespace) {
        Ok(Value::Object(Map::new()))
    } else {
        serde_json::from_slice(&bytes)
            .map_err(|e| RestError::malformed(format!("invalid JSON: {}", e)))
    }
}

fn is_form(content_type: &str) -> bool {
    content_type
        .parse::<mime::Mime>()
        .map(|m| m.essence_str() == mime::APPLICATION_WWW_FORM_URLENCODED.essence_str())
        .unwrap_or(false)
}

/// Folds urlencoded `key=value` pairs into an object.
///
/// Keys written as `name[]` or `name[n]` collect into an array, so
/// `values[]=2&values[]=0` becomes `{"values": ["2", "0"]}`.
fn fold_pairs(encoded: &[u8]) -> Map<String, Value> {
    let mut object = Map::new();
    for (key, value) in url::form_urlencoded::parse(encoded) {
        let value = value.into_owned();
        match array_key(&key) {
            Some(name) => {
                let slot = object
                    .entry(name.to_string())
                    .or_insert_with(|| Value::Array(Vec::new()));
                match slot {
                    Value::Array(items) => items.push(Value::String(value)),
                    scalar => {
                        let previous = scalar.take();
                        *scalar = Value::Array(vec![previous, Value::String(value)]);
                    }
                }
            }
            None => {
                object.insert(key.to_string(), Value::String(value));
            }
        }
    }
    object
}

fn array_key(key: &str) -> Option<&str> {
    let (name, rest) = key.split_once('[')?;
    let index = rest.strip_suffix(']')?;
    (!name.is_empty() && index.bytes().all(|b| b.is_ascii_digit())).then_some(name)
}

fn merge_under(mut query: Map<String, Value>, body: Value) -> Value {
    match body {
        Value::Object(fields) => {
            query.extend(fields);
            Value::Object(query)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde_json::json;

    async fn extract(req: Request) -> Result<Value, RestError> {
        RequestBody::from_request(req, &()).await.map(RequestBody::into_inner)
    }

    async fn extract_params(req: Request) -> Result<Value, RestError> {
        RequestParams::from_request(req, &())
            .await
            .map(RequestParams::into_inner)
    }

    #[tokio::test]
    async fn test_empty_body_is_empty_object() {
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        assert_eq!(extract(req).await.unwrap(), json!({}));
    }

    #[tokio::test]
    async fn test_json_body() {
        let req = Request::builder()
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"key": "a", "value": [1, 2]}"#))
            .unwrap();
        assert_eq!(extract(req).await.unwrap(), json!({"key": "a", "value": [1, 2]}));
    }

    #[tokio::test]
    async fn test_json_without_content_type() {
        let req = Request::builder().uri("/").body(Body::from("\"hello\"")).unwrap();
        assert_eq!(extract(req).await.unwrap(), json!("hello"));
    }

    #[tokio::test]
    async fn test_form_body_with_arrays() {
        let req = Request::builder()
            .uri("/")
            .header(
                header::CONTENT_TYPE,
                "application/x-www-form-urlencoded; charset=utf-8",
            )
            .body(Body::from("comp=%25&propname=n&values[]=2&values[]=0"))
            .unwrap();
        assert_eq!(
            extract(req).await.unwrap(),
            json!({"comp": "%", "propname": "n", "values": ["2", "0"]})
        );
    }

    #[tokio::test]
    async fn test_query_string_underneath_params() {
        let req = Request::builder()
            .uri("/?limit=2&reverse=true")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"limit": 5}"#))
            .unwrap();
        assert_eq!(
            extract_params(req).await.unwrap(),
            json!({"limit": 5, "reverse": "true"})
        );
    }

    #[tokio::test]
    async fn test_body_ignores_query_string() {
        let req = Request::builder()
            .uri("/?debug=1")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"n": 1}"#))
            .unwrap();
        assert_eq!(extract(req).await.unwrap(), json!({"n": 1}));
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let req = Request::builder().uri("/").body(Body::from("{nope")).unwrap();
        let err = extract(req).await.unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::MalformedRequest);
    }

    #[tokio::test]
    async fn test_form_body_on_get() {
        let req = Request::builder()
            .method("GET")
            .uri("/?reverse=true")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("limit=1"))
            .unwrap();
        assert_eq!(
            extract_params(req).await.unwrap(),
            json!({"reverse": "true", "limit": "1"})
        );
    }

    #[test]
    fn test_array_key() {
        assert_eq!(array_key("values[]"), Some("values"));
        assert_eq!(array_key("values[3]"), Some("values"));
        assert_eq!(array_key("values"), None);
        assert_eq!(array_key("[]"), None);
        assert_eq!(array_key("a[b]"), None);
    }
}
