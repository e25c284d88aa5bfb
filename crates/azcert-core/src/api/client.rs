//! Certificate data-access client.
//!
//! Read paths go through the [`RequestCache`]; successful writes invalidate
//! every cached list and search result. Searches fail soft to an empty list,
//! everything else returns one categorized [`ApiError`].

use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde_json::{Value, json};

use super::status::Operation;
use super::transport::{ApiRequest, ApiResponse, HttpMethod, Transport};
use crate::cache::RequestCache;
use crate::clock::{Clock, SystemClock};
use crate::config::{ClientConfig, cache as keys, endpoints};
use crate::error::ApiError;
use crate::models::{
    CertificateDraft, CertificateRecord, EmailMessage, UploadFile, UploadReport,
    parse_certificate_id, record_from_value, records_from_value,
};
use crate::search::SearchMode;

const INVALID_UPLOAD_RESPONSE: &str = "Invalid response format from server";

static WRITE_INVALIDATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(keys::WRITE_INVALIDATION_PATTERN).expect("write invalidation pattern is valid")
});

/// Client for the remote certificate API.
pub struct ServiceClient<T> {
    config: ClientConfig,
    transport: T,
    cache: RequestCache,
    clock: Arc<dyn Clock>,
}

impl<T: Transport> ServiceClient<T> {
    /// Client against the production API.
    pub fn new(transport: T) -> Self {
        Self::with_config(ClientConfig::default(), transport)
    }

    pub fn with_config(config: ClientConfig, transport: T) -> Self {
        Self::with_clock(config, transport, Arc::new(SystemClock))
    }

    /// Client whose cache and default dates follow `clock`.
    pub fn with_clock(config: ClientConfig, transport: T, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            transport,
            cache: RequestCache::with_clock(clock.clone()),
            clock,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn cache(&self) -> &RequestCache {
        &self.cache
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Every certificate. Cached for the TTL.
    pub async fn get_all(&self) -> Result<Vec<CertificateRecord>, ApiError> {
        if let Some(records) = self.cache.get(keys::ALL_SERVICES_KEY) {
            return Ok(records);
        }

        let response = self
            .dispatch(ApiRequest::get(self.config.url(endpoints::LIST)))
            .await?;
        let body = Self::checked(response, Operation::List)?;
        let records = match body.trim() {
            "" => Vec::new(),
            text => serde_json::from_str(text)
                .map(records_from_value)
                .map_err(|_| Operation::List.generic_error())?,
        };

        Ok(self.cache.set(keys::ALL_SERVICES_KEY, records))
    }

    /// Certificates whose holder name matches `query`. Never fails.
    pub async fn search_by_name(&self, query: &str) -> Vec<CertificateRecord> {
        self.search(endpoints::SEARCH_BY_NAME, keys::SEARCH_BY_NAME_PREFIX, query)
            .await
    }

    /// Certificates whose serial number matches `query`. Never fails.
    pub async fn search_by_serial(&self, query: &str) -> Vec<CertificateRecord> {
        self.search(endpoints::SEARCH_BY_SERIAL, keys::SEARCH_BY_SERIAL_PREFIX, query)
            .await
    }

    async fn search(&self, path: &str, prefix: &str, query: &str) -> Vec<CertificateRecord> {
        let key = format!("{}:{}", prefix, query);
        if let Some(records) = self.cache.get(&key) {
            return records;
        }

        let request = ApiRequest::get(self.config.url(path)).query("search", query);
        let response = match self.dispatch(request).await {
            Ok(response) if response.is_success() => response,
            Ok(response) => {
                tracing::debug!(status = response.status, %key, "search failed soft");
                return Vec::new();
            }
            Err(_) => return Vec::new(),
        };

        match response.json() {
            Ok(value @ Value::Array(_)) => self.cache.set(&key, records_from_value(value)),
            _ => Vec::new(),
        }
    }

    /// One certificate by server id. Not cached.
    pub async fn get_by_id(&self, id: i64) -> Result<CertificateRecord, ApiError> {
        let request = ApiRequest::get(self.config.url(endpoints::GET_BY_ID)).query("id", id.to_string());
        let response = self.dispatch(request).await?;
        let body = Self::checked(response, Operation::GetById)?;

        serde_json::from_str(&body)
            .ok()
            .and_then(record_from_value)
            .ok_or_else(|| Operation::GetById.generic_error())
    }

    /// Look a certificate up by serial number, then by id.
    ///
    /// Every failure reads as "not found".
    pub async fn find(&self, query: &str) -> Option<CertificateRecord> {
        if let Some(record) = self.search_by_serial(query).await.into_iter().next() {
            return Some(record);
        }
        let id = parse_certificate_id(query)?;
        self.get_by_id(id).await.ok()
    }

    /// Public verification search. `None` for a blank query.
    pub async fn verify(&self, query: &str, mode: SearchMode) -> Option<Vec<CertificateRecord>> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        let records = match mode {
            SearchMode::Serial => self.search_by_serial(query).await,
            SearchMode::Name => self.search_by_name(query).await,
            SearchMode::All => {
                let by_serial = self.search_by_serial(query).await;
                if by_serial.is_empty() {
                    self.search_by_name(query).await
                } else {
                    by_serial
                }
            }
        };
        Some(records)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    pub async fn create(&self, draft: CertificateDraft) -> Result<CertificateRecord, ApiError> {
        let payload = draft.into_payload(None, self.clock.now());
        let request = ApiRequest::with_json(HttpMethod::Post, self.config.url(endpoints::CREATE), &payload)?;

        let body = self.write(request, Operation::Create).await?;
        Self::record_or(&body, || payload.to_record(), Operation::Create)
    }

    pub async fn update(
        &self,
        id: i64,
        draft: CertificateDraft,
    ) -> Result<CertificateRecord, ApiError> {
        let payload = draft.into_payload(Some(id), self.clock.now());
        let url = self.config.url(&format!("{}/{}", endpoints::UPDATE, id));
        let request = ApiRequest::with_json(HttpMethod::Put, url, &payload)?;

        let body = self.write(request, Operation::Update).await?;
        Self::record_or(&body, || payload.to_record(), Operation::Update)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let url = self.config.url(&format!("{}/{}", endpoints::DELETE, id));
        self.write(ApiRequest::delete(url), Operation::Delete).await?;
        Ok(())
    }

    /// Bulk-create certificates from a spreadsheet.
    pub async fn upload_excel(&self, file: UploadFile) -> Result<UploadReport, ApiError> {
        let request = ApiRequest::multipart(self.config.url(endpoints::UPLOAD_EXCEL), file);
        let body = self.write(request, Operation::Upload).await?;

        UploadReport::from_body(&body)
            .ok_or_else(|| ApiError::Retryable(INVALID_UPLOAD_RESPONSE.to_string()))
    }

    /// Send a contact-form message.
    pub async fn send_email(&self, message: &EmailMessage) -> Result<Value, ApiError> {
        let request =
            ApiRequest::with_json(HttpMethod::Post, self.config.url(endpoints::SEND_EMAIL), message)?;
        let response = self.dispatch(request).await?;
        let body = Self::checked(response, Operation::SendEmail)?;

        Ok(match body.trim() {
            "" => json!({ "success": true }),
            text => serde_json::from_str(text)
                .unwrap_or_else(|_| json!({ "success": true, "data": text })),
        })
    }

    // =========================================================================
    // Plumbing
    // =========================================================================

    async fn dispatch(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        tracing::debug!(method = request.method.as_str(), url = %request.url, "api request");
        let response = self.transport.send(request).await?;
        tracing::trace!(status = response.status, "api response");
        Ok(response)
    }

    /// Send a write and, once it succeeded, drop every cached read.
    async fn write(&self, request: ApiRequest, operation: Operation) -> Result<String, ApiError> {
        let response = self.dispatch(request).await?;
        let body = Self::checked(response, operation)?;
        self.cache.invalidate(&*WRITE_INVALIDATION);
        Ok(body)
    }

    fn checked(response: ApiResponse, operation: Operation) -> Result<String, ApiError> {
        if response.is_success() {
            Ok(response.body)
        } else {
            Err(operation.error_for_status(response.status))
        }
    }

    fn record_or(
        body: &str,
        synthesize: impl FnOnce() -> CertificateRecord,
        operation: Operation,
    ) -> Result<CertificateRecord, ApiError> {
        if body.trim().is_empty() {
            return Ok(synthesize());
        }
        serde_json::from_str(body)
            .ok()
            .and_then(record_from_value)
            .ok_or_else(|| operation.generic_error())
    }
}

impl<T> std::fmt::Debug for ServiceClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceClient")
            .field("config", &self.config)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
