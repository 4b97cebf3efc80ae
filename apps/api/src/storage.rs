//! Resume Storage — where uploaded CV documents are written.
//!
//! Files are never deduplicated or cleaned up.

use std::path::PathBuf;

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("S3 error: {0}")]
    S3(String),
}

#[async_trait]
pub trait ResumeStorage: Send + Sync {
    /// Stores `data` under `key` and returns a reference to the stored document.
    async fn put(
        &self,
        key: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> Result<String, StorageError>;

    /// "local" | "s3" — logged at startup.
    fn backend(&self) -> &'static str;
}

/// Writes documents below a directory on the local filesystem.
pub struct LocalResumeStorage {
    root: PathBuf,
}

impl LocalResumeStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ResumeStorage for LocalResumeStorage {
    async fn put(
        &self,
        key: &str,
        data: Bytes,
        _content_type: Option<&str>,
    ) -> Result<String, StorageError> {
        let path = self.root.join(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, &data).await?;
        info!(path = %path.display(), bytes = data.len(), "stored resume");
        Ok(path.display().to_string())
    }

    fn backend(&self) -> &'static str {
        "local"
    }
}

/// Writes documents to an S3 (or MinIO) bucket.
pub struct S3ResumeStorage {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3ResumeStorage {
    pub fn new(client: aws_sdk_s3::Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[async_trait]
impl ResumeStorage for S3ResumeStorage {
    async fn put(
        &self,
        key: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> Result<String, StorageError> {
        let size = data.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .set_content_type(content_type.map(str::to_string))
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| StorageError::S3(e.to_string()))?;

        info!(bucket = %self.bucket, key, bytes = size, "stored resume in S3");
        Ok(format!("s3://{}/{}", self.bucket, key))
    }

    fn backend(&self) -> &'static str {
        "s3"
    }
}

/// Storage key for an uploaded resume: `resumes/<job_id>/<uuid>-<file name>`.
pub fn resume_key(job_id: &str, file_name: Option<&str>) -> String {
    let name = file_name
        .map(sanitize_file_name)
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "resume".to_string());
    format!(
        "resumes/{}/{}-{}",
        sanitize_file_name(job_id),
        Uuid::new_v4(),
        name
    )
}

/// Keeps the final path component and replaces anything outside `[A-Za-z0-9._-]`.
fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_directories_and_odd_chars() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\docs\\my cv.pdf"), "my_cv.pdf");
        assert_eq!(sanitize_file_name("résumé.txt"), "r_sum_.txt");
    }

    #[test]
    fn test_resume_key_layout() {
        let key = resume_key("job-1", Some("cv.pdf"));
        assert!(key.starts_with("resumes/job-1/"));
        assert!(key.ends_with("-cv.pdf"));

        let unnamed = resume_key("job-1", None);
        assert!(unnamed.ends_with("-resume"));
    }

    #[tokio::test]
    async fn test_local_storage_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalResumeStorage::new(dir.path());
        let reference = storage
            .put("resumes/j/abc-cv.txt", Bytes::from_static(b"hello"), Some("text/plain"))
            .await
            .unwrap();

        let written = tokio::fs::read(&reference).await.unwrap();
        assert_eq!(written, b"hello");
        assert!(reference.starts_with(&dir.path().display().to_string()));
        assert_eq!(storage.backend(), "local");
    }
}
