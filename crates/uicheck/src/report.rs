//! Shared report plumbing.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use tracing::info;

use crate::error::CheckError;

/// Outcome of a single responsive test step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TestStatus {
    /// Checked and passed.
    Pass,
    /// Checked and failed.
    Fail,
    /// Nothing to check.
    Skipped,
}

/// Serializes a timestamp as RFC 3339 with millisecond precision and `Z`.
pub(crate) fn rfc3339_millis<S: Serializer>(
    timestamp: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Writes a report as pretty-printed JSON.
pub async fn write_report<T: Serialize + Sync>(path: &Path, report: &T) -> Result<(), CheckError> {
    let json = serde_json::to_vec_pretty(report)?;
    tokio::fs::write(path, json)
        .await
        .map_err(|source| CheckError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    info!(path = %path.display(), "report saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[derive(Serialize)]
    struct Stamped {
        #[serde(serialize_with = "rfc3339_millis")]
        timestamp: DateTime<Utc>,
        status: TestStatus,
    }

    #[test]
    fn test_timestamp_and_status_format() {
        let report = Stamped {
            timestamp: Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 5).unwrap(),
            status: TestStatus::Skipped,
        };
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            serde_json::json!({"timestamp": "2025-03-01T12:30:05.000Z", "status": "SKIPPED"})
        );
    }

    #[tokio::test]
    async fn test_write_report_pretty_prints() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        write_report(&path, &serde_json::json!({"ok": true})).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "{\n  \"ok\": true\n}");
    }

    #[tokio::test]
    async fn test_write_report_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("report.json");

        let err = write_report(&path, &1).await.unwrap_err();
        assert!(matches!(err, CheckError::Io { .. }));
    }
}
