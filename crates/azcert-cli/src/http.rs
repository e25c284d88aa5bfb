//! Native transport over `reqwest`.

use azcert_core::api::{ApiRequest, ApiResponse, HttpMethod, RequestBody, Transport};
use azcert_core::config::UPLOAD_FIELD_NAME;
use azcert_core::error::TransportError;
use reqwest::multipart::{Form, Part};

#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

fn method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut builder = self
            .client
            .request(method(request.method), &request.url)
            .query(&request.query);
        for (name, value) in request.headers() {
            builder = builder.header(name, value);
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(json) => builder.body(json),
            RequestBody::Multipart(file) => {
                let part = Part::bytes(file.bytes)
                    .file_name(file.file_name)
                    .mime_str(&file.content_type)
                    .map_err(|e| TransportError::RequestCreationFailed(e.to_string()))?;
                builder.multipart(Form::new().part(UPLOAD_FIELD_NAME, part))
            }
        };

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|_| TransportError::ResponseReadFailed)?;

        tracing::trace!(status, bytes = body.len(), "response read");
        Ok(ApiResponse::new(status, body))
    }
}
