//! Report store implementations: JSON-file blob and in-memory fake.

use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use crate::models::Report;

use super::StorageError;

/// Repository seam so the core stays testable with an in-memory fake.
///
/// The store is the sole source of truth for what the presentation layer
/// renders; insertion order is preserved (newest last).
pub trait ReportStore: Send + Sync {
    /// Append a report. Ids are generated fresh per save; save never
    /// merges with or overwrites an existing entry.
    fn save(&self, report: &Report) -> Result<(), StorageError>;

    /// All reports in insertion order.
    fn list(&self) -> Result<Vec<Report>, StorageError>;

    fn find_by_id(&self, id: &str) -> Result<Option<Report>, StorageError>;

    /// Idempotent — deleting a missing id is a no-op, not an error.
    fn delete_by_id(&self, id: &str) -> Result<(), StorageError>;
}

/// File-backed store: the whole collection serialized as one JSON array.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location under the app data directory.
    pub fn default_location() -> Self {
        Self::new(crate::config::reports_path())
    }

    /// Absent blob ⇒ empty collection; unreadable blob ⇒ empty collection
    /// (logged, never surfaced).
    fn load(&self) -> Vec<Report> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(_) => return Vec::new(),
        };

        match serde_json::from_slice(&bytes) {
            Ok(reports) => reports,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Report collection unreadable; starting from an empty collection"
                );
                Vec::new()
            }
        }
    }

    fn write(&self, reports: &[Report]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec(reports)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl ReportStore for JsonFileStore {
    fn save(&self, report: &Report) -> Result<(), StorageError> {
        let mut reports = self.load();
        reports.push(report.clone());
        self.write(&reports)?;
        tracing::debug!(report = %report.id, total = reports.len(), "Report persisted");
        Ok(())
    }

    fn list(&self) -> Result<Vec<Report>, StorageError> {
        Ok(self.load())
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Report>, StorageError> {
        Ok(self.load().into_iter().find(|r| r.id == id))
    }

    fn delete_by_id(&self, id: &str) -> Result<(), StorageError> {
        let mut reports = self.load();
        reports.retain(|r| r.id != id);
        self.write(&reports)
    }
}

/// In-memory store for tests and previews.
#[derive(Default)]
pub struct InMemoryStore {
    reports: Mutex<Vec<Report>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Report>> {
        self.reports.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ReportStore for InMemoryStore {
    fn save(&self, report: &Report) -> Result<(), StorageError> {
        self.lock().push(report.clone());
        Ok(())
    }

    fn list(&self) -> Result<Vec<Report>, StorageError> {
        Ok(self.lock().clone())
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Report>, StorageError> {
        Ok(self.lock().iter().find(|r| r.id == id).cloned())
    }

    fn delete_by_id(&self, id: &str) -> Result<(), StorageError> {
        self.lock().retain(|r| r.id != id);
        Ok(())
    }
}
