//! Export artifact: `{ "daily": [...], "monthly": [...] }`
//!
//! Mirrors the persisted shape exactly, pretty-printed.

use shared::report::ReportSnapshot;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Pretty JSON document for a snapshot
pub fn to_pretty_json(snapshot: &ReportSnapshot) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// Write the export artifact to `path`, creating parent directories
pub fn write_export(path: &Path, snapshot: &ReportSnapshot) -> Result<PathBuf, ExportError> {
    let json = to_pretty_json(snapshot)?;
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, json).map_err(io_err)?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::report::{ReportBucket, ReportItem};

    fn snapshot() -> ReportSnapshot {
        let bucket = |key: &str| ReportBucket {
            period_key: key.to_string(),
            items: vec![ReportItem {
                name: "Tea".into(),
                qty: 3,
                total_price: Decimal::from(30),
            }],
        };
        ReportSnapshot {
            daily: vec![bucket("2026-10-16")],
            monthly: vec![bucket("October 2026")],
        }
    }

    #[test]
    fn test_export_document_shape() {
        let json = to_pretty_json(&snapshot()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["daily"][0]["periodKey"], "2026-10-16");
        assert_eq!(value["monthly"][0]["periodKey"], "October 2026");
        assert_eq!(value["monthly"][0]["items"][0]["qty"], 3);
        // pretty printed
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_write_export_to_nested_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exports").join("report.json");
        let written = write_export(&path, &snapshot()).unwrap();
        assert_eq!(written, path);

        let back: ReportSnapshot =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, snapshot());
    }
}
