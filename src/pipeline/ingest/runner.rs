//! End-to-end ingestion: submit → poll → normalize → save.
//!
//! A report is persisted only after normalization fully succeeds; no
//! partial report is ever written. Each run is independent, with its own
//! attempt counter — there is no mutual exclusion across runs.

use serde::Serialize;
use tokio::sync::watch;

use crate::connectivity::ConnectivityMonitor;
use crate::models::Report;
use crate::pipeline::normalize;
use crate::storage::ReportStore;

use super::client::ExtractionApi;
use super::error::IngestError;
use super::poller::{PollOrchestrator, PollPolicy};
use super::types::UploadFile;

/// Observable phase of one ingestion run, published for the UI shell.
///
/// Transitions: Idle → Submitting → Polling → {Ready, Failed}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestPhase {
    Idle,
    Submitting,
    Polling { attempt: u32 },
    Ready,
    Failed,
}

/// Facade wiring the transport client, poll orchestrator, normalizer and
/// report store together for one caller-facing `ingest` operation.
pub struct IngestService<A, S> {
    api: A,
    store: S,
    policy: PollPolicy,
    connectivity: Option<ConnectivityMonitor>,
    phase: watch::Sender<IngestPhase>,
}

impl<A: ExtractionApi, S: ReportStore> IngestService<A, S> {
    pub fn new(api: A, store: S, policy: PollPolicy) -> Self {
        let (phase, _) = watch::channel(IngestPhase::Idle);
        Self {
            api,
            store,
            policy,
            connectivity: None,
            phase,
        }
    }

    /// Observe an externally-owned reachability flag; when offline, runs
    /// fail fast instead of burning the submit call.
    pub fn with_connectivity(mut self, monitor: ConnectivityMonitor) -> Self {
        self.connectivity = Some(monitor);
        self
    }

    /// Subscribe to phase transitions for this service.
    pub fn phases(&self) -> watch::Receiver<IngestPhase> {
        self.phase.subscribe()
    }

    /// The report store backing this service.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run one full ingestion and return the saved report.
    ///
    /// `NotReady` never escapes the poll loop; every other failure is
    /// terminal, sets the `Failed` phase, and surfaces as one readable
    /// message.
    pub async fn ingest(
        &self,
        file: UploadFile,
        display_name: &str,
    ) -> Result<Report, IngestError> {
        if let Some(connectivity) = &self.connectivity {
            if !connectivity.is_online() {
                self.phase.send_replace(IngestPhase::Failed);
                return Err(IngestError::Connection("network is offline".to_string()));
            }
        }

        self.phase.send_replace(IngestPhase::Submitting);
        let handle = match self.api.submit(&file).await {
            Ok(handle) => handle,
            Err(e) => {
                self.phase.send_replace(IngestPhase::Failed);
                return Err(e);
            }
        };

        let poller = PollOrchestrator::new(&self.api, self.policy.clone());
        let raw = match poller
            .wait_for_results(&handle, |attempt| {
                self.phase.send_replace(IngestPhase::Polling { attempt });
            })
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                self.phase.send_replace(IngestPhase::Failed);
                return Err(e);
            }
        };

        let normalized = normalize::normalize(&raw);
        let report = Report::new(
            display_name,
            &file.file_name,
            normalized.report_type,
            normalized.rows,
            normalized.fields,
        );

        if let Err(e) = self.store.save(&report) {
            self.phase.send_replace(IngestPhase::Failed);
            return Err(e.into());
        }

        self.phase.send_replace(IngestPhase::Ready);
        tracing::info!(
            report = %report.id,
            rows = report.rows.len(),
            fields = report.fields.len(),
            "Report saved"
        );
        Ok(report)
    }
}
