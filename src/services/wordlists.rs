//! Wordlist files on local disk, registered for use by the fuzzer.

use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use futures_util::{Stream, StreamExt};
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};
use uuid::Uuid;

use crate::db::WordlistRegistry;
use crate::error::{AppError, AppResult};
use crate::models::Wordlist;

/// Saves uploads under a directory and keeps the registry in sync.
#[derive(Clone)]
pub struct WordlistStore {
    dir: PathBuf,
    max_size: usize,
    registry: Arc<dyn WordlistRegistry>,
}

impl WordlistStore {
    pub fn new(dir: PathBuf, max_size: usize, registry: Arc<dyn WordlistRegistry>) -> Self {
        Self {
            dir,
            max_size,
            registry,
        }
    }

    /// Stream an upload to `{dir}/{id}_{basename}` and register it.
    pub async fn save<S, B, E>(&self, filename: &str, mut chunks: S) -> AppResult<Wordlist>
    where
        S: Stream<Item = Result<B, E>> + Unpin,
        B: AsRef<[u8]>,
        E: Display,
    {
        let name = base_name(filename)
            .ok_or_else(|| AppError::InvalidInput(format!("Invalid filename: {}", filename)))?;

        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            AppError::Storage(format!("Failed to create wordlist directory: {}", e))
        })?;

        let id = Uuid::new_v4();
        let path = self.dir.join(format!("{}_{}", id, name));
        let mut file = tokio::fs::File::create(&path)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to create file {}: {}", name, e)))?;

        let mut file_size: usize = 0;
        let mut line_count: usize = 0;

        while let Some(chunk) = chunks.next().await {
            let data = match chunk {
                Ok(data) => data,
                Err(e) => {
                    discard(&path).await;
                    return Err(AppError::InvalidInput(format!("Read error: {}", e)));
                }
            };
            let data = data.as_ref();
            file_size += data.len();

            if file_size > self.max_size {
                discard(&path).await;
                return Err(AppError::PayloadTooLarge(format!(
                    "Wordlist exceeds {} bytes",
                    self.max_size
                )));
            }

            line_count += data.iter().filter(|b| **b == b'\n').count();
            if let Err(e) = file.write_all(data).await {
                discard(&path).await;
                return Err(AppError::Storage(format!("Failed to write file: {}", e)));
            }
        }

        file.flush()
            .await
            .map_err(|e| AppError::Storage(format!("Failed to flush file: {}", e)))?;

        let wordlist = Wordlist {
            id,
            name: name.to_string(),
            path: path.to_string_lossy().into_owned(),
            line_count: line_count as i64,
            file_size: file_size as i64,
            created_at: Utc::now(),
        };

        if let Err(e) = self.registry.insert_wordlist(&wordlist).await {
            discard(&path).await;
            return Err(e);
        }

        info!(
            "Saved wordlist {} ({} lines, {} bytes) as {}",
            wordlist.name, wordlist.line_count, wordlist.file_size, wordlist.id
        );
        Ok(wordlist)
    }

    pub async fn list(&self) -> AppResult<Vec<Wordlist>> {
        self.registry.list_wordlists().await
    }

    /// Remove the file and its registration.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let wordlist = self
            .registry
            .get_wordlist(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Wordlist {}", id)))?;

        match tokio::fs::remove_file(&wordlist.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("Wordlist file {} was already gone", wordlist.path);
            }
            Err(e) => {
                return Err(AppError::Storage(format!(
                    "Failed to delete {}: {}",
                    wordlist.path, e
                )));
            }
        }

        self.registry.delete_wordlist(id).await?;
        info!("Deleted wordlist {}", id);
        Ok(())
    }
}

/// Final path component of an uploaded filename.
fn base_name(filename: &str) -> Option<&str> {
    let normalized = filename.rsplit(['/', '\\']).next()?;
    match normalized {
        "" | "." | ".." => None,
        name => Some(name),
    }
}

async fn discard(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        warn!("Failed to remove partial upload {}: {}", path.display(), e);
    }
}
