//! Compressed game archives
//!
//! Uploaded games sit on disk as zstd frames named `gameNNNNNN.zst`, one
//! directory per region.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::models::Region;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decompress {path}: {source}")]
    Decompress {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("game id {0} is out of range")]
    InvalidId(i64),

    #[error("archive task failed: {0}")]
    Task(String),
}

/// Read access to the decompressed game archives
#[async_trait]
pub trait ContentArchive: Send + Sync {
    async fn load(&self, region: Region, sid: i64) -> Result<Vec<u8>, ArchiveError>;
}

/// File name of a game's archive
pub fn archive_file_name(sid: i64) -> Result<String, ArchiveError> {
    if !(0..=999_999).contains(&sid) {
        return Err(ArchiveError::InvalidId(sid));
    }
    Ok(format!("game{:06}.zst", sid))
}

/// Archives stored as zstd files under one directory per region
#[derive(Debug, Clone)]
pub struct FsArchive {
    us_dir: PathBuf,
    jp_dir: PathBuf,
}

impl FsArchive {
    pub fn new(us_dir: impl Into<PathBuf>, jp_dir: impl Into<PathBuf>) -> Self {
        Self {
            us_dir: us_dir.into(),
            jp_dir: jp_dir.into(),
        }
    }

    fn region_dir(&self, region: Region) -> &Path {
        match region {
            Region::Us => &self.us_dir,
            Region::Jpn => &self.jp_dir,
        }
    }

    pub fn archive_path(&self, region: Region, sid: i64) -> Result<PathBuf, ArchiveError> {
        Ok(self.region_dir(region).join(archive_file_name(sid)?))
    }
}

fn read_and_decompress(path: PathBuf) -> Result<Vec<u8>, ArchiveError> {
    let compressed = std::fs::read(&path).map_err(|source| ArchiveError::Read {
        path: path.clone(),
        source,
    })?;

    zstd::stream::decode_all(compressed.as_slice())
        .map_err(|source| ArchiveError::Decompress { path, source })
}

#[async_trait]
impl ContentArchive for FsArchive {
    async fn load(&self, region: Region, sid: i64) -> Result<Vec<u8>, ArchiveError> {
        let path = self.archive_path(region, sid)?;
        debug!("Loading archive {}", path.display());

        tokio::task::spawn_blocking(move || read_and_decompress(path))
            .await
            .map_err(|e| ArchiveError::Task(e.to_string()))?
    }
}
