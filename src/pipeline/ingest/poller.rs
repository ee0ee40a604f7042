//! Bounded fixed-interval polling around the extraction service.
//!
//! The completion time of a job is unknown, so the orchestrator trades total
//! wait predictability for simplicity: a constant interval between attempts
//! and a hard attempt ceiling (30 × 2s ≈ 60s), no exponential backoff.

use std::time::Duration;

use super::client::ExtractionApi;
use super::error::IngestError;
use super::types::{JobHandle, RawExtractionResult};

/// Retry policy for the poll loop.
///
/// Both knobs are constructor parameters rather than constants so tests
/// can shrink them independently.
#[derive(Debug, Clone)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 30,
            interval: Duration::from_millis(2000),
        }
    }
}

/// Drives `fetch_results` until the job is ready or attempts are exhausted.
///
/// Attempts are strictly sequential — a new check is never issued before the
/// previous one resolves. There is no mid-flight cancellation: once polling
/// starts, it runs to a terminal state.
pub struct PollOrchestrator<'a, A: ExtractionApi> {
    api: &'a A,
    policy: PollPolicy,
}

impl<'a, A: ExtractionApi> PollOrchestrator<'a, A> {
    pub fn new(api: &'a A, policy: PollPolicy) -> Self {
        Self { api, policy }
    }

    /// Poll until ready. `on_attempt` is invoked with the 1-based attempt
    /// number before each check.
    ///
    /// `NotReady` answers are absorbed here; exhausting the ceiling yields
    /// `TimeoutExceeded`, while any hard error from a check is terminal.
    pub async fn wait_for_results(
        &self,
        handle: &JobHandle,
        mut on_attempt: impl FnMut(u32) + Send,
    ) -> Result<RawExtractionResult, IngestError> {
        for attempt in 1..=self.policy.max_attempts {
            on_attempt(attempt);

            match self.api.fetch_results(handle).await {
                Ok(result) => {
                    tracing::info!(job = %handle, attempt, "Extraction results ready");
                    return Ok(result);
                }
                Err(IngestError::NotReady) => {
                    tracing::debug!(
                        job = %handle,
                        attempt,
                        max_attempts = self.policy.max_attempts,
                        "Results not ready"
                    );
                    if attempt < self.policy.max_attempts {
                        tokio::time::sleep(self.policy.interval).await;
                    }
                }
                Err(other) => return Err(other),
            }
        }

        tracing::warn!(
            job = %handle,
            attempts = self.policy.max_attempts,
            "Polling exhausted without a result"
        );
        Err(IngestError::TimeoutExceeded {
            attempts: self.policy.max_attempts,
        })
    }
}
