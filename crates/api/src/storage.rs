//! Filesystem-backed blob store for uploaded media and documents.
//!
//! Filenames are server-generated as `{unix-millis}-{sanitized original
//! name}`, which makes collisions between concurrent uploads practically
//! impossible without any directory locking. Orphaned files left behind by
//! replaced or deleted records are not garbage-collected.

use std::io;
use std::path::{Path, PathBuf};

/// Writes uploads under a root directory and hands back public URLs.
#[derive(Debug)]
pub struct MediaStore {
    root: PathBuf,
    public_base: String,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.into(),
        }
    }

    /// The directory uploads are written to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the upload directory if it does not exist yet.
    pub async fn ensure_root(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Write `bytes` under a server-generated unique filename and return
    /// the public URL of the stored file.
    pub async fn put(&self, bytes: &[u8], suggested_name: &str) -> io::Result<String> {
        let filename = format!(
            "{}-{}",
            chrono::Utc::now().timestamp_millis(),
            sanitize_filename(suggested_name)
        );
        tokio::fs::write(self.root.join(&filename), bytes).await?;
        Ok(format!("{}/{}", self.public_base, filename))
    }
}

/// Reduce an uploaded filename to `[A-Za-z0-9._-]`, replacing everything
/// else with hyphens. Strips any path components a client might smuggle in.
fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect();
    if cleaned.trim_matches('-').is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}
