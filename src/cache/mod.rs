//! Disk-backed memoization of analysis results.
//!
//! Entries are keyed by a SHA-256 content fingerprint (dimension name plus
//! every review's identity, text and timestamp), so only datasets with
//! identical content share an entry. One JSON file per (dimension,
//! fingerprint); freshness comes from the file's modification time.

use crate::analysis::AnalysisResult;
use crate::config::CacheSettings;
use crate::data::Review;
use crate::error::{AnalysisError, Result};
use log::{info, warn};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};
use walkdir::WalkDir;

pub struct CacheStore {
    dir: PathBuf,
    ttl: Duration,
    enabled: bool,
    // Per-fingerprint locks make the read-check-compute-write sequence
    // single-flight when dimensions run concurrently.
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl CacheStore {
    pub fn new(settings: &CacheSettings) -> Result<Self> {
        let dir = PathBuf::from(&settings.dir);
        if settings.enabled {
            fs::create_dir_all(&dir).map_err(|e| {
                AnalysisError::Resource(format!("cannot create cache dir {:?}: {}", dir, e))
            })?;
        }

        Ok(Self {
            dir,
            ttl: Duration::from_secs(settings.ttl_secs),
            enabled: settings.enabled,
            locks: Mutex::new(HashMap::new()),
        })
    }

    /// Content fingerprint of an (analyzer, dataset) pair.
    pub fn fingerprint(dimension: &str, reviews: &[Review]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(dimension.as_bytes());
        hasher.update(reviews.len().to_le_bytes());
        for review in reviews {
            hasher.update(review.reviewer.as_bytes());
            hasher.update([0]);
            hasher.update(review.text.as_bytes());
            hasher.update([0]);
            if let Some(ts) = review.timestamp {
                hasher.update(ts.timestamp().to_le_bytes());
            }
            hasher.update([0xff]);
        }
        format!("{:x}", hasher.finalize())
    }

    /// The lock guarding all cache operations for one fingerprint.
    pub fn lock_for(&self, fingerprint: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(|p| p.into_inner());
        locks
            .entry(fingerprint.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Fetch a fresh entry; stale entries are deleted and treated as a
    /// miss. Read failures degrade to a miss.
    pub fn load(&self, dimension: &str, fingerprint: &str) -> Option<AnalysisResult> {
        if !self.enabled {
            return None;
        }

        let path = self.entry_path(dimension, fingerprint);
        if !path.exists() {
            return None;
        }

        if self.is_expired(&path) {
            info!("Cache entry for {dimension} expired, removing");
            if let Err(e) = fs::remove_file(&path) {
                warn!("Failed to remove expired cache file {:?}: {}", path, e);
            }
            return None;
        }

        match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(result) => {
                    info!("Using cached result for {dimension}");
                    Some(result)
                }
                Err(e) => {
                    warn!("Corrupt cache entry {:?}: {}", path, e);
                    let _ = fs::remove_file(&path);
                    None
                }
            },
            Err(e) => {
                warn!("Failed to read cache entry {:?}: {}", path, e);
                None
            }
        }
    }

    /// Persist a result. Failures are logged, never fatal.
    pub fn store(&self, dimension: &str, fingerprint: &str, result: &AnalysisResult) {
        if !self.enabled {
            return;
        }

        let path = self.entry_path(dimension, fingerprint);
        match serde_json::to_string_pretty(result) {
            Ok(json) => {
                if let Err(e) = fs::write(&path, json) {
                    warn!("Failed to write cache entry {:?}: {}", path, e);
                }
            }
            Err(e) => warn!("Failed to serialize result for cache: {}", e),
        }
    }

    /// Delete every expired entry in the cache directory.
    pub fn sweep_expired(&self) {
        if !self.enabled {
            return;
        }

        for entry in WalkDir::new(&self.dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if self.is_expired(path) {
                if let Err(e) = fs::remove_file(path) {
                    warn!("Failed to remove expired cache file {:?}: {}", path, e);
                } else {
                    info!("Removed expired cache file: {:?}", path.file_name());
                }
            }
        }
    }

    fn entry_path(&self, dimension: &str, fingerprint: &str) -> PathBuf {
        self.dir.join(format!("{dimension}_{fingerprint}.json"))
    }

    fn is_expired(&self, path: &std::path::Path) -> bool {
        let age = fs::metadata(path)
            .and_then(|m| m.modified())
            .ok()
            .and_then(|mtime| SystemTime::now().duration_since(mtime).ok());
        match age {
            Some(age) => age > self.ttl,
            // Unreadable metadata: treat as stale rather than serve it.
            None => true,
        }
    }
}
