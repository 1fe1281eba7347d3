//! The transfer task
//!
//! One linear procedure per invocation: resolve destination variables,
//! connect to the warehouse, fetch the configured query, write the local
//! artifact, upload it, release the connection. Any failure is logged at
//! error severity and propagated so the external scheduler observes it;
//! the connection is released on every exit path.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};

use crate::artifact;
use crate::config::TransferProfile;
use crate::error::{Error, Result};
use crate::output::ObjectDestination;
use crate::vars::VariableStore;
use crate::warehouse::{RowSource, WarehouseEngine};

/// Outcome of a successful transfer
#[derive(Debug, Clone)]
pub struct TransferReport {
    /// Profile name
    pub profile: String,
    /// Rows written to the artifact
    pub rows: usize,
    /// Artifact size in bytes
    pub bytes: usize,
    /// Full path of the uploaded object
    pub object_path: String,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

/// Build the destination object key
///
/// The prefix is concatenated as-is; `p/` + `file.csv` yields `p/file.csv`.
/// No validation of the prefix shape is performed.
pub fn object_key(prefix: &str, filename: &str) -> String {
    format!("{prefix}{filename}")
}

/// A configured transfer task
pub struct TransferTask {
    profile: TransferProfile,
    vars: VariableStore,
}

impl TransferTask {
    /// Create a task from a profile and variable store
    pub fn new(profile: TransferProfile, vars: VariableStore) -> Self {
        Self { profile, vars }
    }

    /// Execute the transfer once
    ///
    /// `destination_override` replaces the variable-derived destination with
    /// a URL or local path; the object key is then just the filename.
    pub async fn run(&self, destination_override: Option<&str>) -> Result<TransferReport> {
        // Destination variables resolve first; a missing key fails the task
        // before any warehouse connection is attempted.
        let (dest, key) = if let Some(url) = destination_override {
            (
                ObjectDestination::parse(url)?,
                self.profile.destination.filename.clone(),
            )
        } else {
            let bucket = self.vars.get(&self.profile.destination.bucket_var)?;
            let prefix = self.vars.get(&self.profile.destination.prefix_var)?;
            (
                ObjectDestination::from_bucket(&self.profile.destination.scheme, &bucket)?,
                object_key(&prefix, &self.profile.destination.filename),
            )
        };

        let query = self.profile.source.build_query()?;
        let mut source = WarehouseEngine::new(&self.profile.warehouse)?;
        tracing::info!(
            profile = %self.profile.name,
            warehouse = %source.connection_info(),
            "Starting transfer"
        );

        execute(
            &mut source,
            &query,
            &self.profile.artifact.path,
            &dest,
            &key,
            &self.profile.name,
        )
        .await
    }

    /// The loaded profile
    pub fn profile(&self) -> &TransferProfile {
        &self.profile
    }
}

/// Run the transfer steps against any row source
///
/// The source is closed on every exit path. Errors are logged with their
/// message and returned unchanged; retries belong to the scheduler.
pub async fn execute<S: RowSource>(
    source: &mut S,
    query: &str,
    artifact_path: &str,
    dest: &ObjectDestination,
    key: &str,
    name: &str,
) -> Result<TransferReport> {
    let started_at = Utc::now();
    let start = Instant::now();

    let result = async {
        let rows = source.fetch_all(query)?;
        tracing::info!(rows = rows.len(), "Query fetched");

        let info = artifact::write_artifact(artifact_path, &rows)?;
        tracing::debug!(path = artifact_path, bytes = info.bytes, "Artifact written");

        let data = artifact::read_artifact(artifact_path)?;
        let object_path = dest.put(key, Bytes::from(data)).await?;

        Ok::<_, Error>((info, object_path))
    }
    .await;

    source.close();

    match result {
        Ok((info, object_path)) => {
            let report = TransferReport {
                profile: name.to_string(),
                rows: info.rows,
                bytes: info.bytes,
                object_path,
                started_at,
                elapsed: start.elapsed(),
            };
            tracing::info!(
                profile = %report.profile,
                rows = report.rows,
                object = %report.object_path,
                elapsed_ms = report.elapsed.as_millis() as u64,
                "Transfer completed"
            );
            Ok(report)
        }
        Err(e) => {
            tracing::error!(profile = %name, "Transfer failed: {e}");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SourceConfig, WarehouseConnection, WarehouseKind};
    use crate::row::{Row, Scalar};
    use pretty_assertions::assert_eq;

    struct MockSource {
        rows: Vec<Row>,
        fail: bool,
        fetched: bool,
        closed: bool,
    }

    impl MockSource {
        fn with_rows(rows: Vec<Row>) -> Self {
            Self {
                rows,
                fail: false,
                fetched: false,
                closed: false,
            }
        }

        fn failing() -> Self {
            Self {
                rows: vec![],
                fail: true,
                fetched: false,
                closed: false,
            }
        }
    }

    impl RowSource for MockSource {
        fn fetch_all(&mut self, _query: &str) -> Result<Vec<Row>> {
            self.fetched = true;
            if self.fail {
                return Err(Error::query("boom"));
            }
            Ok(self.rows.clone())
        }

        fn close(&mut self) {
            self.closed = true;
        }
    }

    fn sample_rows() -> Vec<Row> {
        vec![
            vec![Scalar::Int(1), Scalar::Text("A".to_string())],
            vec![Scalar::Int(2), Scalar::Text("B".to_string())],
        ]
    }

    #[test]
    fn test_object_key_concatenation() {
        assert_eq!(object_key("p/", "file.csv"), "p/file.csv");
        // No validation: a prefix without a trailing slash is used as-is
        assert_eq!(object_key("p", "file.csv"), "pfile.csv");
        assert_eq!(object_key("", "file.csv"), "file.csv");
    }

    #[tokio::test]
    async fn test_execute_happy_path() {
        let dir = tempfile::tempdir().unwrap();
        let artifact_path = dir.path().join("data.csv");
        let dest_dir = dir.path().join("bucket");
        let dest = ObjectDestination::parse(dest_dir.to_str().unwrap()).unwrap();

        let mut source = MockSource::with_rows(sample_rows());
        let report = execute(
            &mut source,
            "SELECT 1",
            artifact_path.to_str().unwrap(),
            &dest,
            "p/file.csv",
            "test",
        )
        .await
        .unwrap();

        assert_eq!(report.rows, 2);
        assert_eq!(report.bytes, 8);
        assert_eq!(report.object_path, "file://p/file.csv");
        assert!(source.closed);

        // Artifact and object hold the same comma-joined content
        assert_eq!(
            std::fs::read_to_string(&artifact_path).unwrap(),
            "1,A\n2,B\n"
        );
        assert_eq!(
            std::fs::read_to_string(dest_dir.join("p/file.csv")).unwrap(),
            "1,A\n2,B\n"
        );
    }

    #[tokio::test]
    async fn test_query_failure_skips_upload_and_closes() {
        let dir = tempfile::tempdir().unwrap();
        let artifact_path = dir.path().join("data.csv");
        let dest_dir = dir.path().join("bucket");
        let dest = ObjectDestination::parse(dest_dir.to_str().unwrap()).unwrap();

        let mut source = MockSource::failing();
        let err = execute(
            &mut source,
            "SELECT 1",
            artifact_path.to_str().unwrap(),
            &dest,
            "file.csv",
            "test",
        )
        .await
        .unwrap_err();

        assert!(matches!(err, Error::Query { .. }));
        assert!(source.closed);
        // No artifact, no object
        assert!(!artifact_path.exists());
        assert!(!dest_dir.join("file.csv").exists());
    }

    #[tokio::test]
    async fn test_upload_failure_still_closes_source() {
        let dir = tempfile::tempdir().unwrap();
        let artifact_path = dir.path().join("data.csv");
        let dest_dir = dir.path().join("bucket");
        let dest = ObjectDestination::parse(dest_dir.to_str().unwrap()).unwrap();

        // A regular file where the key needs a directory makes the PUT fail
        std::fs::write(dest_dir.join("p"), b"in the way").unwrap();

        let mut source = MockSource::with_rows(sample_rows());
        let result = execute(
            &mut source,
            "SELECT 1",
            artifact_path.to_str().unwrap(),
            &dest,
            "p/file.csv",
            "test",
        )
        .await;

        assert!(result.is_err());
        assert!(source.closed);
        // The artifact was written before the upload failed
        assert!(artifact_path.exists());
    }

    #[tokio::test]
    async fn test_second_run_replaces_object() {
        let dir = tempfile::tempdir().unwrap();
        let artifact_path = dir.path().join("data.csv");
        let dest_dir = dir.path().join("bucket");
        let dest = ObjectDestination::parse(dest_dir.to_str().unwrap()).unwrap();

        let mut first = MockSource::with_rows(sample_rows());
        execute(
            &mut first,
            "SELECT 1",
            artifact_path.to_str().unwrap(),
            &dest,
            "file.csv",
            "test",
        )
        .await
        .unwrap();

        let mut second = MockSource::with_rows(vec![vec![Scalar::Int(3)]]);
        execute(
            &mut second,
            "SELECT 1",
            artifact_path.to_str().unwrap(),
            &dest,
            "file.csv",
            "test",
        )
        .await
        .unwrap();

        assert_eq!(
            std::fs::read_to_string(dest_dir.join("file.csv")).unwrap(),
            "3\n"
        );
    }

    /// A postgres profile pointed at nothing: if variable resolution did
    /// not come first, a run would fail with a warehouse error instead.
    fn unreachable_warehouse_profile() -> TransferProfile {
        TransferProfile {
            name: "vars_first".to_string(),
            warehouse: WarehouseConnection {
                engine: WarehouseKind::Postgres,
                host: Some("nonexistent.invalid".to_string()),
                ..WarehouseConnection::default()
            },
            source: SourceConfig {
                table: Some("t".to_string()),
                ..SourceConfig::default()
            },
            artifact: crate::config::ArtifactConfig::default(),
            destination: crate::config::DestinationConfig::default(),
        }
    }

    #[tokio::test]
    async fn test_missing_bucket_variable_fails_before_warehouse() {
        let task = TransferTask::new(unreachable_warehouse_profile(), VariableStore::new());
        let err = task.run(None).await.unwrap_err();
        assert!(matches!(err, Error::MissingVariable { ref name } if name == "gcs_bucket"));
    }

    #[tokio::test]
    async fn test_missing_prefix_variable_fails_before_warehouse() {
        // The bucket alone is not enough; the prefix must also resolve
        // before any warehouse connection is attempted.
        let mut vars = VariableStore::new();
        vars.set("gcs_bucket", "b");

        let task = TransferTask::new(unreachable_warehouse_profile(), vars);
        let err = task.run(None).await.unwrap_err();
        assert!(matches!(err, Error::MissingVariable { ref name } if name == "gcs_path"));
    }
}
