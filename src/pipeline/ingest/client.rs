//! HTTP client for the extraction service.
//!
//! `submit` uploads a document and returns the job handle; `fetch_results`
//! answers `NotReady` for every failure, because the service responds
//! non-2xx until extraction finishes and the original contract treats any
//! result-check failure as "still processing". Stateless between calls;
//! retry policy lives in the poller.

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use crate::config::ServiceConfig;

use super::error::IngestError;
use super::types::{JobHandle, RawExtractionResult, SubmitAck, UploadFile, PDF_MEDIA_TYPE};

const API_KEY_HEADER: &str = "X-API-Key";

/// Request timeout for both service calls.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Transport seam between the poll orchestrator and the network.
#[async_trait]
pub trait ExtractionApi: Send + Sync {
    /// Submit a document for extraction. Rejects a wrong media type before
    /// any network I/O; a non-success response is terminal.
    async fn submit(&self, file: &UploadFile) -> Result<JobHandle, IngestError>;

    /// Check for results. `Err(NotReady)` is the ordinary "still
    /// processing" answer, not a fault.
    async fn fetch_results(&self, handle: &JobHandle) -> Result<RawExtractionResult, IngestError>;
}

/// reqwest-backed client for the real extraction service.
pub struct HttpExtractionClient {
    config: ServiceConfig,
    client: reqwest::Client,
}

impl HttpExtractionClient {
    pub fn new(config: ServiceConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }
}

#[async_trait]
impl ExtractionApi for HttpExtractionClient {
    async fn submit(&self, file: &UploadFile) -> Result<JobHandle, IngestError> {
        if !file.is_pdf() {
            return Err(IngestError::UnsupportedMediaType(file.media_type.clone()));
        }

        let part = reqwest::multipart::Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(PDF_MEDIA_TYPE)
            .map_err(|e| IngestError::Connection(e.to_string()))?;
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("client_name", self.config.client_name.clone())
            .text("apartado", self.config.section.clone())
            .text("period", self.config.period.clone());

        let url = format!("{}/process-file/", self.config.base_url);
        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| IngestError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IngestError::Transport { status: status.as_u16() });
        }

        let ack: SubmitAck = response
            .json()
            .await
            .map_err(|e| IngestError::ResponseParsing(e.to_string()))?;

        tracing::info!(job = %ack.session_id, file = %file.file_name, "Document submitted for extraction");
        Ok(JobHandle::new(ack.session_id))
    }

    async fn fetch_results(&self, handle: &JobHandle) -> Result<RawExtractionResult, IngestError> {
        let url = format!(
            "{}/results/{}/{}",
            self.config.base_url, handle, self.config.section
        );

        let response = match self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(job = %handle, error = %e, "Result check could not reach the service");
                return Err(IngestError::NotReady);
            }
        };

        if !response.status().is_success() {
            tracing::debug!(job = %handle, status = %response.status(), "Results not ready");
            return Err(IngestError::NotReady);
        }

        response.json::<RawExtractionResult>().await.map_err(|e| {
            tracing::debug!(job = %handle, error = %e, "Result body did not parse; treating as not ready");
            IngestError::NotReady
        })
    }
}

/// Mock extraction client for testing — scripted submit outcome and result
/// sequence, with call counters standing in for network traffic.
pub struct MockExtractionClient {
    session_id: String,
    submit_failure: Option<u16>,
    fetch_failure: Option<u16>,
    /// Number of `NotReady` answers before the result becomes available.
    ready_after: u32,
    result: RawExtractionResult,
    submit_calls: AtomicU32,
    fetch_calls: AtomicU32,
}

impl MockExtractionClient {
    pub fn new() -> Self {
        Self {
            session_id: "job-1".to_string(),
            submit_failure: None,
            fetch_failure: None,
            ready_after: 0,
            result: RawExtractionResult::default(),
            submit_calls: AtomicU32::new(0),
            fetch_calls: AtomicU32::new(0),
        }
    }

    pub fn with_result(mut self, result: RawExtractionResult) -> Self {
        self.result = result;
        self
    }

    /// Answer `NotReady` for the first `checks` result checks.
    pub fn ready_after(mut self, checks: u32) -> Self {
        self.ready_after = checks;
        self
    }

    pub fn never_ready(mut self) -> Self {
        self.ready_after = u32::MAX;
        self
    }

    pub fn failing_submit(mut self, status: u16) -> Self {
        self.submit_failure = Some(status);
        self
    }

    /// Make every result check fail hard instead of answering `NotReady`.
    pub fn failing_fetch(mut self, status: u16) -> Self {
        self.fetch_failure = Some(status);
        self
    }

    /// Network calls issued by `submit` (validation rejections don't count).
    pub fn submit_calls(&self) -> u32 {
        self.submit_calls.load(Ordering::SeqCst)
    }

    /// Network calls issued by `fetch_results`.
    pub fn fetch_calls(&self) -> u32 {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockExtractionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExtractionApi for MockExtractionClient {
    async fn submit(&self, file: &UploadFile) -> Result<JobHandle, IngestError> {
        if !file.is_pdf() {
            return Err(IngestError::UnsupportedMediaType(file.media_type.clone()));
        }
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        match self.submit_failure {
            Some(status) => Err(IngestError::Transport { status }),
            None => Ok(JobHandle::new(self.session_id.clone())),
        }
    }

    async fn fetch_results(&self, _handle: &JobHandle) -> Result<RawExtractionResult, IngestError> {
        let call = self.fetch_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(status) = self.fetch_failure {
            return Err(IngestError::Transport { status });
        }
        if call > self.ready_after {
            Ok(self.result.clone())
        } else {
            Err(IngestError::NotReady)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf() -> UploadFile {
        UploadFile::new("report.pdf", PDF_MEDIA_TYPE, b"%PDF-1.4".to_vec())
    }

    #[tokio::test]
    async fn http_client_rejects_non_pdf_before_any_network_call() {
        // Unroutable base URL: if validation did not short-circuit, this
        // test would hang or fail on connection.
        let client = HttpExtractionClient::new(ServiceConfig::new("http://127.0.0.1:1", "key"));
        let file = UploadFile::new("data.csv", "text/csv", vec![1, 2, 3]);

        let err = client.submit(&file).await.unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedMediaType(t) if t == "text/csv"));
    }

    #[tokio::test]
    async fn mock_rejects_non_pdf_without_counting_a_call() {
        let mock = MockExtractionClient::new();
        let file = UploadFile::new("data.csv", "text/csv", vec![]);

        let err = mock.submit(&file).await.unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedMediaType(_)));
        assert_eq!(mock.submit_calls(), 0);
    }

    #[tokio::test]
    async fn mock_submit_returns_handle() {
        let mock = MockExtractionClient::new();
        let handle = mock.submit(&pdf()).await.unwrap();
        assert_eq!(handle.as_str(), "job-1");
        assert_eq!(mock.submit_calls(), 1);
    }

    #[tokio::test]
    async fn mock_failing_submit_reports_status() {
        let mock = MockExtractionClient::new().failing_submit(422);
        let err = mock.submit(&pdf()).await.unwrap_err();
        assert!(matches!(err, IngestError::Transport { status: 422 }));
    }

    #[tokio::test]
    async fn mock_becomes_ready_after_configured_checks() {
        let mock = MockExtractionClient::new().ready_after(2);
        let handle = JobHandle::new("job-1");

        assert!(matches!(
            mock.fetch_results(&handle).await,
            Err(IngestError::NotReady)
        ));
        assert!(matches!(
            mock.fetch_results(&handle).await,
            Err(IngestError::NotReady)
        ));
        assert!(mock.fetch_results(&handle).await.is_ok());
        assert_eq!(mock.fetch_calls(), 3);
    }
}
