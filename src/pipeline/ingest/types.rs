//! Wire types for the extraction service.

use std::fmt;
use std::io;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

/// Accepted upload media type, validated before any network call.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Opaque token identifying one in-flight extraction job.
///
/// Issued by the service on submission and used for every result check;
/// never reused across submissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle(String);

impl JobHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A document handed over by the UI shell for ingestion.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    /// Declared media type (e.g. from the picker); checked client-side.
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Read a document from disk, guessing the media type from the extension.
    pub async fn from_path(path: &Path) -> io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let media_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Ok(Self { file_name, media_type, bytes })
    }

    pub fn is_pdf(&self) -> bool {
        self.media_type == PDF_MEDIA_TYPE
    }
}

/// Acknowledgement body for a successful submission.
#[derive(Debug, Deserialize)]
pub struct SubmitAck {
    pub session_id: String,
}

/// One raw extraction record: field name → value of unknown shape,
/// one per reporting period.
pub type RawRecord = Map<String, Value>;

/// Unprocessed extraction result.
///
/// The service returns either a flat array of records or an object wrapping
/// a `data` array with optional metadata; both shapes deserialize into this.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "WirePayload")]
pub struct RawExtractionResult {
    pub records: Vec<RawRecord>,
    pub period: Option<String>,
    pub report_type: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WirePayload {
    Flat(Vec<RawRecord>),
    Wrapped {
        data: Vec<RawRecord>,
        #[serde(default)]
        period: Option<String>,
        #[serde(default, rename = "reportType")]
        report_type: Option<String>,
    },
}

impl From<WirePayload> for RawExtractionResult {
    fn from(payload: WirePayload) -> Self {
        match payload {
            WirePayload::Flat(records) => Self {
                records,
                period: None,
                report_type: None,
            },
            WirePayload::Wrapped { data, period, report_type } => Self {
                records: data,
                period,
                report_type,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_array_payload_is_accepted() {
        let result: RawExtractionResult =
            serde_json::from_str(r#"[{"ordinal": 1, "litres": 1000}]"#).unwrap();
        assert_eq!(result.records.len(), 1);
        assert!(result.period.is_none());
        assert!(result.report_type.is_none());
    }

    #[test]
    fn wrapped_payload_is_accepted() {
        let result: RawExtractionResult = serde_json::from_str(
            r#"{"period": "2025", "reportType": "production", "data": [{"ordinal": 1}, {"ordinal": 2}]}"#,
        )
        .unwrap();
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.period.as_deref(), Some("2025"));
        assert_eq!(result.report_type.as_deref(), Some("production"));
    }

    #[test]
    fn wrapped_payload_metadata_is_optional() {
        let result: RawExtractionResult =
            serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert!(result.records.is_empty());
        assert!(result.period.is_none());
    }

    #[test]
    fn object_without_data_array_is_rejected() {
        let result: Result<RawExtractionResult, _> =
            serde_json::from_str(r#"{"status": "processing"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn pdf_media_type_check() {
        let pdf = UploadFile::new("report.pdf", PDF_MEDIA_TYPE, vec![]);
        assert!(pdf.is_pdf());

        let csv = UploadFile::new("report.csv", "text/csv", vec![]);
        assert!(!csv.is_pdf());
    }

    #[tokio::test]
    async fn from_path_guesses_media_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("january.pdf");
        tokio::fs::write(&path, b"%PDF-1.4").await.unwrap();

        let file = UploadFile::from_path(&path).await.unwrap();
        assert_eq!(file.file_name, "january.pdf");
        assert_eq!(file.media_type, PDF_MEDIA_TYPE);
        assert_eq!(file.bytes, b"%PDF-1.4");
    }

    #[test]
    fn job_handle_displays_its_id() {
        let handle = JobHandle::new("abc-123");
        assert_eq!(handle.to_string(), "abc-123");
        assert_eq!(handle.as_str(), "abc-123");
    }
}
