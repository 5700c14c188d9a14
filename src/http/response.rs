// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP response types and response body transformation

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::trace;
use url::Url;

use super::APPLICATION_JSON;
use crate::error::{Error, Result};

/// HTTP response representation
#[derive(Debug, Clone)]
pub struct Response {
    /// Response status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: Bytes,
    /// Final URL (after redirects)
    pub url: Url,
    /// Whether this was a redirect
    pub redirected: bool,
    /// Response time in milliseconds
    pub response_time_ms: u64,
}

impl Response {
    /// Create a new response
    pub fn new(
        status: StatusCode,
        headers: HeaderMap,
        body: Bytes,
        url: Url,
        redirected: bool,
        response_time_ms: u64,
    ) -> Self {
        Self {
            status,
            headers,
            body,
            url,
            redirected,
            response_time_ms,
        }
    }

    /// Check if status is success (2xx)
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Get status code as u16
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Get body as text
    pub fn text(&self) -> Result<String> {
        String::from_utf8(self.body.to_vec()).map_err(|e| Error::Other(e.to_string()))
    }

    /// Parse body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(Error::from)
    }

    /// Get a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get content type
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Content type begins with `application/json`
    pub fn is_json(&self) -> bool {
        self.content_type()
            .map(|ct| ct.starts_with(APPLICATION_JSON))
            .unwrap_or(false)
    }

    /// Get raw body bytes
    pub fn bytes(&self) -> &Bytes {
        &self.body
    }
}

/// What a verb call resolves to
#[derive(Debug, Clone)]
pub enum ResponseBody {
    /// Parsed JSON body
    Json(Value),
    /// Any other content type: the response, untouched
    Raw(Response),
}

impl ResponseBody {
    pub fn is_json(&self) -> bool {
        matches!(self, ResponseBody::Json(_))
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Raw(_) => None,
        }
    }

    pub fn as_raw(&self) -> Option<&Response> {
        match self {
            ResponseBody::Raw(response) => Some(response),
            ResponseBody::Json(_) => None,
        }
    }

    /// Deserialize a JSON body into `T`; raw responses are parsed from
    /// their bytes.
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T> {
        match self {
            ResponseBody::Json(value) => Ok(serde_json::from_value(value)?),
            ResponseBody::Raw(response) => response.json(),
        }
    }

    pub fn into_raw(self) -> Option<Response> {
        match self {
            ResponseBody::Raw(response) => Some(response),
            ResponseBody::Json(_) => None,
        }
    }
}

/// Parse JSON responses, hand everything else back as-is.
///
/// Status codes play no part: a 500 with a JSON body resolves to the
/// parsed body like a 200 would.
pub fn transform_response(response: Response) -> Result<ResponseBody> {
    if response.is_json() {
        trace!(status = response.status_code(), "parsing JSON response body");
        let value = serde_json::from_slice(&response.body)?;
        Ok(ResponseBody::Json(value))
    } else {
        trace!(
            status = response.status_code(),
            content_type = response.content_type().unwrap_or(""),
            "returning raw response"
        );
        Ok(ResponseBody::Raw(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;
    use serde_json::json;

    fn response(status: u16, content_type: Option<&'static str>, body: &'static str) -> Response {
        let mut headers = HeaderMap::new();
        if let Some(ct) = content_type {
            headers.insert("content-type", HeaderValue::from_static(ct));
        }
        Response::new(
            StatusCode::from_u16(status).unwrap(),
            headers,
            Bytes::from(body),
            Url::parse("https://app.example/api").unwrap(),
            false,
            12,
        )
    }

    #[test]
    fn test_json_response_parsed() {
        let resp = response(200, Some("application/json;charset=utf-8"), r#"{"a":1}"#);
        let body = transform_response(resp).unwrap();
        assert_eq!(body.as_json(), Some(&json!({"a": 1})));
    }

    #[test]
    fn test_text_response_raw() {
        let resp = response(200, Some("text/plain"), "hello");
        let body = transform_response(resp).unwrap();

        let raw = body.as_raw().unwrap();
        assert_eq!(raw.text().unwrap(), "hello");
        assert_eq!(raw.status_code(), 200);
    }

    #[test]
    fn test_missing_content_type_raw() {
        let body = transform_response(response(204, None, "")).unwrap();
        assert!(!body.is_json());
    }

    #[test]
    fn test_error_status_not_special() {
        let resp = response(500, Some("application/json"), r#"{"error":"boom"}"#);
        let body = transform_response(resp).unwrap();
        assert_eq!(body.as_json(), Some(&json!({"error": "boom"})));
    }

    #[test]
    fn test_invalid_json_fails() {
        let resp = response(200, Some("application/json"), "{not json");
        let err = transform_response(resp).unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_json_prefix_match_only() {
        let resp = response(200, Some("text/html; profile=application/json"), "<p>");
        assert!(!transform_response(resp).unwrap().is_json());

        let resp = response(200, Some("application/json-patch+json"), "[]");
        assert!(transform_response(resp).unwrap().is_json());
    }

    #[test]
    fn test_into_json_typed() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Item {
            id: u32,
        }

        let body = transform_response(response(200, Some("application/json"), r#"{"id":4}"#)).unwrap();
        assert_eq!(body.into_json::<Item>().unwrap(), Item { id: 4 });
    }
}
