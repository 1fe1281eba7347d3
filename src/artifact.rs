//! Local CSV artifact
//!
//! Rows are rendered as comma-joined lines, one row per line. Fields are
//! written verbatim with no quoting or escaping, so embedded delimiters or
//! newlines corrupt the line structure. That matches the upstream system
//! this export feeds and is deliberately preserved.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::row::Row;

/// Result of writing an artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactInfo {
    /// Rows written (one line each)
    pub rows: usize,
    /// Bytes written
    pub bytes: usize,
}

/// Render rows as comma-joined lines
///
/// The invariant: line count equals row count, and each line has as many
/// fields as the row has cells.
pub fn render_rows(rows: &[Row]) -> String {
    let mut out = String::new();
    for row in rows {
        let line = row
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Write rows to the artifact path, truncating any prior content
pub fn write_artifact(path: impl AsRef<Path>, rows: &[Row]) -> Result<ArtifactInfo> {
    let path = path.as_ref();
    let content = render_rows(rows);

    fs::write(path, &content).map_err(|e| {
        Error::artifact(format!("Failed to write {}: {e}", path.display()))
    })?;

    Ok(ArtifactInfo {
        rows: rows.len(),
        bytes: content.len(),
    })
}

/// Read the artifact back as bytes for upload
pub fn read_artifact(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).map_err(|e| Error::artifact(format!("Failed to read {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::Scalar;
    use pretty_assertions::assert_eq;

    fn sample_rows() -> Vec<Row> {
        vec![
            vec![Scalar::Int(1), Scalar::Text("A".to_string())],
            vec![Scalar::Int(2), Scalar::Text("B".to_string())],
        ]
    }

    #[test]
    fn test_render_rows_exact_bytes() {
        assert_eq!(render_rows(&sample_rows()), "1,A\n2,B\n");
    }

    #[test]
    fn test_render_empty_result() {
        assert_eq!(render_rows(&[]), "");
    }

    #[test]
    fn test_render_null_and_mixed() {
        let rows = vec![vec![
            Scalar::Null,
            Scalar::Bool(true),
            Scalar::Float(3.5),
        ]];
        assert_eq!(render_rows(&rows), ",true,3.5\n");
    }

    #[test]
    fn test_no_escaping() {
        // A comma inside a field is written as-is; the line gains a field
        let rows = vec![vec![
            Scalar::Text("a,b".to_string()),
            Scalar::Int(1),
        ]];
        assert_eq!(render_rows(&rows), "a,b,1\n");
    }

    #[test]
    fn test_write_artifact_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");

        let info = write_artifact(&path, &sample_rows()).unwrap();
        assert_eq!(info, ArtifactInfo { rows: 2, bytes: 8 });

        // Second run with a smaller result leaves only the new content
        let info = write_artifact(&path, &[vec![Scalar::Int(9)]]).unwrap();
        assert_eq!(info, ArtifactInfo { rows: 1, bytes: 2 });
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "9\n");
    }

    #[test]
    fn test_read_artifact_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        write_artifact(&path, &sample_rows()).unwrap();
        assert_eq!(read_artifact(&path).unwrap(), b"1,A\n2,B\n".to_vec());
    }

    #[test]
    fn test_write_to_bad_path_is_error() {
        let err = write_artifact("/nonexistent-dir/data.csv", &sample_rows()).unwrap_err();
        assert!(err.to_string().starts_with("Artifact error"));
    }
}
