use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::models::TrialRecord;

/// Errors that can occur when loading the trial corpus
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read corpus file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse corpus file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

const CORPUS_KEY: &str = "corpus";

/// File-backed trial corpus with an in-process TTL cache
///
/// Corpus acquisition and refresh happen outside the engine boundary; the
/// store reads the already-parsed JSON file the operator points at and
/// keeps the parsed records warm between requests.
pub struct CorpusStore {
    path: PathBuf,
    cache: moka::future::Cache<&'static str, Arc<Vec<TrialRecord>>>,
}

impl CorpusStore {
    pub fn new(path: impl Into<PathBuf>, ttl_secs: u64) -> Self {
        let cache = moka::future::CacheBuilder::new(1)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self {
            path: path.into(),
            cache,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parsed corpus, reloaded from disk when the cached copy expires
    pub async fn load(&self) -> Result<Arc<Vec<TrialRecord>>, CorpusError> {
        if let Some(records) = self.cache.get(CORPUS_KEY).await {
            tracing::trace!("corpus cache hit ({} trials)", records.len());
            return Ok(records);
        }

        let records = Arc::new(self.read_from_disk().await?);
        self.cache.insert(CORPUS_KEY, records.clone()).await;
        tracing::debug!(
            "corpus loaded from {} ({} trials)",
            self.path.display(),
            records.len()
        );
        Ok(records)
    }

    async fn read_from_disk(&self) -> Result<Vec<TrialRecord>, CorpusError> {
        let path = self.path.display().to_string();
        let bytes = tokio::fs::read(&self.path).await.map_err(|source| CorpusError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| CorpusError::Parse { path, source })
    }
}
