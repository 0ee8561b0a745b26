use chrono::{DateTime, Utc};
use moka::future::Cache;
use moka::notification::RemovalCause;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use uuid::Uuid;

/// Translated text and its synthesized audio for one request
#[derive(Debug, Clone)]
pub struct StoredArtifact {
    pub id: Uuid,
    pub text: String,
    pub audio_path: PathBuf,
    pub created_at: DateTime<Utc>,
}

/// Temporary storage for per-request artifacts.
///
/// Audio lives in a process-scoped temporary directory. An artifact left
/// untouched for the configured idle time is evicted and its file deleted;
/// whatever remains goes away with the directory when the store is dropped.
pub struct AudioStore {
    dir: TempDir,
    artifacts: Cache<Uuid, StoredArtifact>,
}

impl AudioStore {
    pub fn new(time_to_idle: Duration) -> std::io::Result<Self> {
        let dir = tempfile::Builder::new().prefix("tamil-translate-").tempdir()?;

        let artifacts = Cache::builder()
            .max_capacity(1000)
            .time_to_idle(time_to_idle)
            .eviction_listener(|id: Arc<Uuid>, artifact: StoredArtifact, cause: RemovalCause| {
                if let Err(e) = std::fs::remove_file(&artifact.audio_path) {
                    if e.kind() != std::io::ErrorKind::NotFound {
                        tracing::warn!(
                            artifact_id = %id,
                            error = %e,
                            "Failed to delete evicted audio file"
                        );
                    }
                }
                tracing::debug!(artifact_id = %id, cause = ?cause, "Artifact evicted");
            })
            .build();

        tracing::info!(dir = %dir.path().display(), "Audio store ready");

        Ok(Self { dir, artifacts })
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Persist audio to a new file and remember the artifact
    pub async fn save(&self, text: &str, audio: &[u8]) -> std::io::Result<StoredArtifact> {
        let id = Uuid::new_v4();
        let audio_path = self.dir.path().join(format!("{}.mp3", id));
        tokio::fs::write(&audio_path, audio).await?;

        let artifact = StoredArtifact {
            id,
            text: text.to_string(),
            audio_path,
            created_at: Utc::now(),
        };
        self.artifacts.insert(id, artifact.clone()).await;

        tracing::debug!(
            artifact_id = %id,
            audio_size = audio.len(),
            "Artifact stored"
        );

        Ok(artifact)
    }

    pub async fn get(&self, id: Uuid) -> Option<StoredArtifact> {
        self.artifacts.get(&id).await
    }

    /// Read an artifact's audio back. `Ok(None)` when the id is unknown or
    /// already evicted.
    pub async fn read_audio(&self, id: Uuid) -> std::io::Result<Option<Vec<u8>>> {
        let Some(artifact) = self.get(id).await else {
            return Ok(None);
        };
        match tokio::fs::read(&artifact.audio_path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn remove(&self, id: Uuid) {
        self.artifacts.invalidate(&id).await;
    }
}
