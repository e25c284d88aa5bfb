//! Browser transport over the Fetch API, with timeout support.

use azcert_core::api::{ApiRequest, ApiResponse, RequestBody, Transport};
use azcert_core::config::UPLOAD_FIELD_NAME;
use azcert_core::error::TransportError;
use azcert_core::models::UploadFile;
use js_sys::{Array, Promise, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Request, RequestInit, RequestMode, Response};

use crate::config::FETCH_TIMEOUT_MS;

// =============================================================================
// Promise Racing
// =============================================================================

/// Result of a promise race with timeout.
#[derive(Debug)]
pub enum RaceResult {
    /// The promise completed before timeout.
    Completed(JsValue),
    /// Timeout occurred before promise completed.
    TimedOut,
    /// Promise rejected with an error.
    Error(String),
}

/// Race a promise against a timeout using `Promise.race`.
pub async fn race_with_timeout(promise: Promise, timeout_ms: i32) -> RaceResult {
    let Some(window) = web_sys::window() else {
        return RaceResult::Error("Window not available".to_string());
    };

    // Resolves to undefined when the timer fires
    let timeout_promise = Promise::new(&mut |resolve, _| {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout_ms);
    });

    let race_array = Array::new();
    race_array.push(&promise);
    race_array.push(&timeout_promise);

    match JsFuture::from(Promise::race(&race_array)).await {
        Ok(result) if result.is_undefined() => RaceResult::TimedOut,
        Ok(result) => RaceResult::Completed(result),
        Err(e) => RaceResult::Error(e.as_string().unwrap_or_else(|| "Unknown error".to_string())),
    }
}

// =============================================================================
// FetchTransport
// =============================================================================

/// [`Transport`] backed by `window.fetch`.
///
/// A request that outlives `FETCH_TIMEOUT_MS` fails as a network error.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

fn creation_failed(e: JsValue) -> TransportError {
    TransportError::RequestCreationFailed(format!("{:?}", e))
}

/// Wrap the file bytes in a `FormData` with a single blob field.
fn form_data(file: &UploadFile) -> Result<FormData, TransportError> {
    let parts = Array::of1(&Uint8Array::from(file.bytes.as_slice()));
    let options = BlobPropertyBag::new();
    options.set_type(&file.content_type);

    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(creation_failed)?;
    let form = FormData::new().map_err(creation_failed)?;
    form.append_with_blob_and_filename(UPLOAD_FIELD_NAME, &blob, &file.file_name)
        .map_err(creation_failed)?;
    Ok(form)
}

/// Append percent-encoded query parameters to `url`.
fn url_with_query(request: &ApiRequest) -> String {
    if request.query.is_empty() {
        return request.url.clone();
    }
    let query = request
        .query
        .iter()
        .map(|(k, v)| {
            let key = String::from(js_sys::encode_uri_component(k));
            let value = String::from(js_sys::encode_uri_component(v));
            format!("{}={}", key, value)
        })
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", request.url, query)
}

fn build_request(request: &ApiRequest) -> Result<Request, TransportError> {
    let opts = RequestInit::new();
    opts.set_method(request.method.as_str());
    opts.set_mode(RequestMode::Cors);

    match &request.body {
        RequestBody::Empty => {}
        RequestBody::Json(json) => opts.set_body(&JsValue::from_str(json)),
        RequestBody::Multipart(file) => opts.set_body(&form_data(file)?.into()),
    }

    let fetch_request =
        Request::new_with_str_and_init(&url_with_query(request), &opts).map_err(creation_failed)?;
    for (name, value) in request.headers() {
        fetch_request
            .headers()
            .set(name, value)
            .map_err(creation_failed)?;
    }
    Ok(fetch_request)
}

impl Transport for FetchTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let window =
            web_sys::window().ok_or_else(|| TransportError::Network("no window".to_string()))?;
        let fetch_request = build_request(&request)?;

        let fetch_promise = window.fetch_with_request(&fetch_request);
        let resp: Response = match race_with_timeout(fetch_promise, FETCH_TIMEOUT_MS).await {
            RaceResult::TimedOut => {
                return Err(TransportError::Network("request timed out".to_string()));
            }
            RaceResult::Error(msg) => return Err(TransportError::Network(msg)),
            RaceResult::Completed(result) => result
                .dyn_into()
                .map_err(|_| TransportError::ResponseReadFailed)?,
        };

        let text = JsFuture::from(resp.text().map_err(|_| TransportError::ResponseReadFailed)?)
            .await
            .map_err(|_| TransportError::ResponseReadFailed)?;

        Ok(ApiResponse::new(resp.status(), text.as_string().unwrap_or_default()))
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use azcert_core::api::HttpMethod;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn query_values_are_percent_encoded() {
        let request =
            ApiRequest::get("https://api.test/searchByName").query("name", "Ahmed & Sons");
        assert_eq!(
            url_with_query(&request),
            "https://api.test/searchByName?name=Ahmed%20%26%20Sons"
        );
    }

    #[wasm_bindgen_test]
    fn url_without_query_is_untouched() {
        let request = ApiRequest::new(HttpMethod::Delete, "https://api.test/delete/4");
        assert_eq!(url_with_query(&request), "https://api.test/delete/4");
    }
}
