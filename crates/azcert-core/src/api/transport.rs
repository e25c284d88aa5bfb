//! The HTTP seam between the data-access layer and the network.
//!
//! [`ServiceClient`](super::ServiceClient) builds transport-neutral
//! [`ApiRequest`]s; a [`Transport`] turns them into real requests. The web
//! app fetches through `web-sys`, the CLI through `reqwest`, tests through
//! the scripted mock.

use std::sync::Arc;

use serde::Serialize;

use crate::error::TransportError;
use crate::models::UploadFile;

pub const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// Request body.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    /// Serialized JSON text.
    Json(String),
    /// A single file sent as `multipart/form-data`.
    Multipart(UploadFile),
}

/// A request to the certificate API.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    /// Absolute URL without the query string.
    pub url: String,
    /// Query parameters, not yet percent-encoded.
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, url)
    }

    /// Request with `body` serialized as JSON.
    pub fn with_json<T: Serialize>(
        method: HttpMethod,
        url: impl Into<String>,
        body: &T,
    ) -> Result<Self, TransportError> {
        let json = serde_json::to_string(body)
            .map_err(|e| TransportError::RequestCreationFailed(e.to_string()))?;
        Ok(Self {
            body: RequestBody::Json(json),
            ..Self::new(method, url)
        })
    }

    pub fn multipart(url: impl Into<String>, file: UploadFile) -> Self {
        Self {
            body: RequestBody::Multipart(file),
            ..Self::new(HttpMethod::Post, url)
        }
    }

    /// Append a query parameter.
    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    /// Headers to send. Multipart requests leave `Content-Type` to the
    /// transport so it can add the boundary.
    pub fn headers(&self) -> Vec<(&'static str, &'static str)> {
        match self.body {
            RequestBody::Multipart(_) => Vec::new(),
            _ => vec![("Content-Type", JSON_CONTENT_TYPE), ("Accept", JSON_CONTENT_TYPE)],
        }
    }

    /// Value of a query parameter.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The JSON body, if any, parsed back into a value.
    pub fn json_body(&self) -> Option<serde_json::Value> {
        match &self.body {
            RequestBody::Json(text) => serde_json::from_str(text).ok(),
            _ => None,
        }
    }
}

/// Status and raw body of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Sends [`ApiRequest`]s.
///
/// Any HTTP status, 4xx and 5xx included, is a successful send. An `Err`
/// means no response was obtained at all.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

impl<T: Transport> Transport for Arc<T> {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        (**self).send(request).await
    }
}

impl<T: Transport> Transport for &T {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        (**self).send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_request_headers_and_body() {
        let request = ApiRequest::with_json(
            HttpMethod::Post,
            "https://example.com/Services/create",
            &json!({ "name": "x" }),
        )
        .unwrap();

        assert_eq!(request.method.as_str(), "POST");
        assert_eq!(request.json_body(), Some(json!({ "name": "x" })));
        assert!(request.headers().contains(&("Content-Type", JSON_CONTENT_TYPE)));
    }

    #[test]
    fn test_multipart_has_no_json_headers() {
        let request = ApiRequest::multipart("u", UploadFile::new("a.xlsx", vec![1, 2]));
        assert_eq!(request.method, HttpMethod::Post);
        assert!(request.headers().is_empty());
        assert_eq!(request.json_body(), None);
    }

    #[test]
    fn test_query_values() {
        let request = ApiRequest::get("u").query("search", "a b&c");
        assert_eq!(request.query_value("search"), Some("a b&c"));
        assert_eq!(request.query_value("missing"), None);
    }

    #[test]
    fn test_response_success_range() {
        assert!(ApiResponse::new(200, "").is_success());
        assert!(ApiResponse::new(204, "").is_success());
        assert!(!ApiResponse::new(404, "").is_success());
        assert!(!ApiResponse::new(301, "").is_success());
    }
}
