use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::models::file::UploadedFile;

const MAX_NAME_ATTEMPTS: i64 = 16;

/// Where uploads go and what is accepted.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub dir: PathBuf,
    pub max_bytes: usize,
    pub public_url: String,
}

impl UploadPolicy {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            dir: config.upload_dir.clone(),
            max_bytes: config.upload_max_bytes,
            public_url: config.server_url.clone(),
        }
    }

    /// Only `image/*` content is accepted.
    pub fn check_mime(&self, content_type: Option<&str>) -> AppResult<String> {
        match content_type {
            Some(mime) if mime.starts_with("image/") => Ok(mime.to_string()),
            _ => Err(AppError::UnsupportedMediaType(
                "Only image files are supported".into(),
            )),
        }
    }

    /// Creates the destination file for an upload named `original_name`.
    pub async fn open(&self, original_name: &str, mime_type: String) -> AppResult<UploadSink> {
        self.open_at(original_name, mime_type, chrono::Utc::now().timestamp_millis())
            .await
    }

    /// Never replaces an existing file: a taken name moves to the next millisecond.
    async fn open_at(
        &self,
        original_name: &str,
        mime_type: String,
        millis: i64,
    ) -> AppResult<UploadSink> {
        tokio::fs::create_dir_all(&self.dir).await?;

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let name = stored_file_name(original_name, millis + attempt);
            let path = self.dir.join(&name);
            let file = match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            };
            debug!(path = %path.display(), "Receiving upload");

            return Ok(UploadSink {
                file,
                path,
                name,
                mime_type,
                written: 0,
                max_bytes: self.max_bytes as u64,
                public_url: self.public_url.clone(),
            });
        }

        Err(AppError::Conflict(format!(
            "Could not find a free name for '{}'",
            original_name
        )))
    }
}

/// An upload being streamed to disk under the size ceiling.
pub struct UploadSink {
    file: tokio::fs::File,
    path: PathBuf,
    name: String,
    mime_type: String,
    written: u64,
    max_bytes: u64,
    public_url: String,
}

impl UploadSink {
    pub async fn write(&mut self, chunk: &[u8]) -> AppResult<()> {
        self.written += chunk.len() as u64;
        if self.written > self.max_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "File exceeds the {} byte limit",
                self.max_bytes
            )));
        }
        self.file.write_all(chunk).await?;
        Ok(())
    }

    pub async fn finish(mut self) -> AppResult<UploadedFile> {
        self.file.flush().await?;
        Ok(UploadedFile {
            path: format!("/{}", self.name),
            url: format!("{}/{}", self.public_url, self.name),
            mime_type: self.mime_type,
            size: self.written,
        })
    }

    /// Drops the partial file.
    pub async fn discard(self) {
        let UploadSink { file, path, .. } = self;
        drop(file);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            warn!(path = %path.display(), "Failed to remove partial upload: {}", e);
        }
    }
}

/// `<millis>-<slug of stem><extension>`, using only the final path component.
pub fn stored_file_name(original_name: &str, millis: i64) -> String {
    let normalized = original_name.replace('\\', "/");
    let file_name = normalized.rsplit('/').next().unwrap_or_default();
    // A bare ".png" is an extension with an empty stem, not a hidden file.
    let (stem, extension) = match file_name.strip_prefix('.') {
        Some(rest) if !rest.contains('.') => ("", Some(rest)),
        _ => {
            let path = Path::new(file_name);
            (
                path.file_stem().and_then(|s| s.to_str()).unwrap_or_default(),
                path.extension().and_then(|s| s.to_str()),
            )
        }
    };
    let extension = extension
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext))
        .unwrap_or_default();

    let slug = slugify(stem);
    let slug = if slug.is_empty() { "file".to_string() } else { slug };

    format!("{}-{}{}", millis, slug, extension)
}

pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
