//! Object storage destinations (GCS, S3, Azure, local)

use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::azure::MicrosoftAzureBuilder;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::local::LocalFileSystem;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use std::sync::Arc;

use crate::error::{Error, Result};

/// Object storage destination parsed from a URL
#[derive(Debug, Clone)]
pub struct ObjectDestination {
    /// The object store implementation
    store: Arc<dyn ObjectStore>,
    /// Base path prefix within the bucket/container
    prefix: String,
    /// Original URL scheme for logging
    scheme: String,
}

impl ObjectDestination {
    /// Parse a destination URL and create the matching object store
    ///
    /// Supported formats:
    /// - `gs://bucket/path/` - Google Cloud Storage
    /// - `s3://bucket/path/` - AWS S3
    /// - `az://container/path/` - Azure Blob Storage
    /// - `/local/path/` or `./path/` - Local filesystem
    pub fn parse(url: &str) -> Result<Self> {
        if url.starts_with("gs://") {
            Self::parse_gcs(url)
        } else if url.starts_with("s3://") {
            Self::parse_s3(url)
        } else if url.starts_with("az://") {
            Self::parse_azure(url)
        } else {
            Self::parse_local(url)
        }
    }

    /// Build a destination from a scheme and bucket resolved at run time
    pub fn from_bucket(scheme: &str, bucket: &str) -> Result<Self> {
        if bucket.is_empty() {
            return Err(Error::config("Destination bucket must not be empty"));
        }
        Self::parse(&format!("{scheme}://{bucket}"))
    }

    fn split_bucket(without_scheme: &str) -> (&str, String) {
        match without_scheme.find('/') {
            Some(idx) => (
                &without_scheme[..idx],
                without_scheme[idx + 1..].to_string(),
            ),
            None => (without_scheme, String::new()),
        }
    }

    /// Parse GCS URL
    fn parse_gcs(url: &str) -> Result<Self> {
        let without_scheme = url
            .strip_prefix("gs://")
            .ok_or_else(|| Error::config(format!("Invalid GCS URL: {url}")))?;

        let (bucket, prefix) = Self::split_bucket(without_scheme);

        let store = GoogleCloudStorageBuilder::from_env()
            .with_bucket_name(bucket)
            .build()
            .map_err(|e| Error::config(format!("Failed to create GCS client: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            prefix,
            scheme: "gs".to_string(),
        })
    }

    /// Parse S3 URL
    fn parse_s3(url: &str) -> Result<Self> {
        let without_scheme = url
            .strip_prefix("s3://")
            .ok_or_else(|| Error::config(format!("Invalid S3 URL: {url}")))?;

        let (bucket, prefix) = Self::split_bucket(without_scheme);

        let store = AmazonS3Builder::from_env()
            .with_bucket_name(bucket)
            .build()
            .map_err(|e| Error::config(format!("Failed to create S3 client: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            prefix,
            scheme: "s3".to_string(),
        })
    }

    /// Parse Azure Blob URL
    fn parse_azure(url: &str) -> Result<Self> {
        let without_scheme = url
            .strip_prefix("az://")
            .ok_or_else(|| Error::config(format!("Invalid Azure URL: {url}")))?;

        let (container, prefix) = Self::split_bucket(without_scheme);

        let store = MicrosoftAzureBuilder::from_env()
            .with_container_name(container)
            .build()
            .map_err(|e| Error::config(format!("Failed to create Azure client: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            prefix,
            scheme: "az".to_string(),
        })
    }

    /// Parse local filesystem path
    fn parse_local(path: &str) -> Result<Self> {
        let path = path.strip_prefix("file://").unwrap_or(path);

        std::fs::create_dir_all(path)
            .map_err(|e| Error::config(format!("Failed to create directory {path}: {e}")))?;

        let store = LocalFileSystem::new_with_prefix(path)
            .map_err(|e| Error::config(format!("Failed to create local store: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            prefix: String::new(),
            scheme: "file".to_string(),
        })
    }

    /// Check if this is a cloud destination (not local)
    pub fn is_cloud(&self) -> bool {
        self.scheme != "file"
    }

    /// Get the scheme (gs, s3, az, file)
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Upload bytes at the given key, replacing any existing object
    ///
    /// The key is used as-is; any base prefix from the destination URL is
    /// prepended. Returns the full path for logging.
    pub async fn put(&self, key: &str, data: Bytes) -> Result<String> {
        let path = if self.prefix.is_empty() {
            ObjectPath::from(key)
        } else {
            ObjectPath::from(format!("{}/{key}", self.prefix.trim_end_matches('/')))
        };

        self.store
            .put(&path, data.into())
            .await
            .map_err(|e| Error::upload(format!("Failed to write {path}: {e}")))?;

        Ok(format!("{}://{path}", self.scheme))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_local_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().to_str().unwrap();
        let dest = ObjectDestination::parse(path).unwrap();
        assert_eq!(dest.scheme(), "file");
        assert!(!dest.is_cloud());
    }

    #[test]
    fn test_from_bucket_rejects_empty() {
        let err = ObjectDestination::from_bucket("gs", "").unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[tokio::test]
    async fn test_put_writes_at_key() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dest = ObjectDestination::parse(temp_dir.path().to_str().unwrap()).unwrap();

        let full = dest.put("p/file.csv", Bytes::from_static(b"1,A\n")).await.unwrap();
        assert_eq!(full, "file://p/file.csv");
        assert_eq!(
            std::fs::read_to_string(temp_dir.path().join("p/file.csv")).unwrap(),
            "1,A\n"
        );
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dest = ObjectDestination::parse(temp_dir.path().to_str().unwrap()).unwrap();

        dest.put("file.csv", Bytes::from_static(b"1,A\n2,B\n"))
            .await
            .unwrap();
        dest.put("file.csv", Bytes::from_static(b"3,C\n"))
            .await
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(temp_dir.path().join("file.csv")).unwrap(),
            "3,C\n"
        );
    }
}
