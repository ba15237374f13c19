//! JSON persistence for the service list.
//!
//! The whole list is rewritten on every mutation. Writes go to a `.tmp`
//! sibling first and are renamed into place.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use rambox_common::{ServiceError, ServiceId};

use crate::model::Service;

/// Current on-disk format version.
pub const STORE_VERSION: u32 = 1;

fn default_version() -> u32 {
    STORE_VERSION
}

fn default_next_id() -> u32 {
    1
}

/// The contents of `services.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredServices {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_next_id")]
    pub next_id: u32,
    #[serde(default)]
    pub last_active: Option<ServiceId>,
    #[serde(default)]
    pub services: Vec<Service>,
}

impl Default for StoredServices {
    fn default() -> Self {
        Self {
            version: STORE_VERSION,
            next_id: default_next_id(),
            last_active: None,
            services: Vec::new(),
        }
    }
}

impl StoredServices {
    /// Drop duplicate ids (first wins) and make sure `next_id` is past every
    /// id in use. A store holding `u32::MAX` leaves `next_id` there, which
    /// `add` treats as exhausted.
    fn normalize(mut self) -> Self {
        let mut seen = HashSet::new();
        self.services.retain(|s| {
            let fresh = seen.insert(s.id);
            if !fresh {
                warn!(service_id = %s.id, "duplicate service id in store, dropping record");
            }
            fresh
        });

        let max_id = self.services.iter().map(|s| s.id.0).max().unwrap_or(0);
        if self.next_id <= max_id {
            self.next_id = max_id.saturating_add(1);
        }
        if self.next_id == 0 {
            self.next_id = 1;
        }

        if let Some(id) = self.last_active {
            if !self.services.iter().any(|s| s.id == id) {
                self.last_active = None;
            }
        }
        self
    }
}

/// Parse store JSON. Unknown `align` values and malformed records are errors.
pub fn parse_store(json: &str) -> Result<StoredServices, ServiceError> {
    let stored: StoredServices = serde_json::from_str(json)
        .map_err(|e| ServiceError::Store(format!("failed to parse services store: {e}")))?;
    Ok(stored.normalize())
}

/// File-backed store for the service list.
#[derive(Debug, Clone)]
pub struct ServiceStore {
    path: PathBuf,
}

impl ServiceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".bak");
        PathBuf::from(name)
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Load the stored list.
    ///
    /// A missing file is an empty list. A corrupt file is copied to
    /// `services.json.bak` and also treated as empty.
    pub fn load(&self) -> Result<StoredServices, ServiceError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no services store yet");
            return Ok(StoredServices::default());
        }

        let contents = std::fs::read_to_string(&self.path)?;
        match parse_store(&contents) {
            Ok(stored) => {
                debug!(
                    path = %self.path.display(),
                    count = stored.services.len(),
                    "services store loaded"
                );
                Ok(stored)
            }
            Err(e) => {
                let backup = self.backup_path();
                warn!(
                    path = %self.path.display(),
                    backup = %backup.display(),
                    error = %e,
                    "services store is corrupt, starting with an empty list"
                );
                if let Err(copy_err) = std::fs::copy(&self.path, &backup) {
                    warn!(error = %copy_err, "failed to back up corrupt services store");
                }
                Ok(StoredServices::default())
            }
        }
    }

    /// Write the whole list, creating parent directories as needed.
    pub fn save(&self, stored: &StoredServices) -> Result<(), ServiceError> {
        let json = serde_json::to_string_pretty(stored)
            .map_err(|e| ServiceError::Store(format!("failed to serialize services: {e}")))?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let tmp_path = self.tmp_path();
        std::fs::write(&tmp_path, &json)?;

        if let Err(e) = std::fs::rename(&tmp_path, &self.path) {
            // Windows refuses to rename over an open file
            warn!("atomic rename failed ({}), falling back to direct write", e);
            std::fs::write(&self.path, &json)?;
            let _ = std::fs::remove_file(&tmp_path);
        }

        debug!(
            path = %self.path.display(),
            count = stored.services.len(),
            "services store saved"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Align, NewService};
    use tempfile::TempDir;

    fn sample() -> StoredServices {
        StoredServices {
            version: STORE_VERSION,
            next_id: 3,
            last_active: Some(ServiceId(2)),
            services: vec![
                NewService::new("gmail", "Gmail", "https://mail.google.com/")
                    .into_service(ServiceId(1)),
                NewService::new("slack", "Slack", "https://acme.slack.com/")
                    .align(Align::Right)
                    .muted(true)
                    .into_service(ServiceId(2)),
            ],
        }
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = ServiceStore::new(dir.path().join("services.json"));
        let loaded = store.load().unwrap();
        assert!(loaded.services.is_empty());
        assert_eq!(loaded.next_id, 1);
    }

    #[test]
    fn save_then_load_preserves_order_and_fields() {
        let dir = TempDir::new().unwrap();
        let store = ServiceStore::new(dir.path().join("services.json"));
        let data = sample();

        store.save(&data).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, data);
        assert_eq!(loaded.services[0].name, "Gmail");
        assert_eq!(loaded.services[1].align, Align::Right);
        assert!(loaded.services[1].muted);
    }

    #[test]
    fn save_creates_parent_dirs_and_cleans_tmp() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("services.json");
        let store = ServiceStore::new(&path);

        store.save(&sample()).unwrap();

        assert!(path.exists());
        assert!(!dir.path().join("nested").join("services.json.tmp").exists());
    }

    #[test]
    fn corrupt_file_is_backed_up_and_treated_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("services.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = ServiceStore::new(&path);
        let loaded = store.load().unwrap();

        assert!(loaded.services.is_empty());
        let backup = dir.path().join("services.json.bak");
        assert_eq!(std::fs::read_to_string(backup).unwrap(), "{ not json");
    }

    #[test]
    fn unknown_align_is_a_store_error() {
        let json = r#"{"services":[{"id":1,"type":"custom","name":"X","url":"https://x.example","align":"middle"}]}"#;
        let err = parse_store(json).unwrap_err();
        assert!(matches!(err, ServiceError::Store(_)));
    }

    #[test]
    fn next_id_is_bumped_past_existing_ids() {
        let json = r#"{"next_id":1,"services":[{"id":7,"type":"custom","name":"X","url":"https://x.example"}]}"#;
        let stored = parse_store(json).unwrap();
        assert_eq!(stored.next_id, 8);
    }

    #[test]
    fn largest_id_loads_without_overflow() {
        let json = format!(
            r#"{{"next_id":1,"services":[{{"id":{},"type":"custom","name":"X","url":"https://x.example"}}]}}"#,
            u32::MAX
        );
        let stored = parse_store(&json).unwrap();
        assert_eq!(stored.services.len(), 1);
        assert_eq!(stored.next_id, u32::MAX);
    }

    #[test]
    fn duplicate_ids_keep_first_record() {
        let json = r#"{"services":[
            {"id":1,"type":"custom","name":"First","url":"https://a.example"},
            {"id":1,"type":"custom","name":"Second","url":"https://b.example"}
        ]}"#;
        let stored = parse_store(json).unwrap();
        assert_eq!(stored.services.len(), 1);
        assert_eq!(stored.services[0].name, "First");
    }

    #[test]
    fn dangling_last_active_is_dropped() {
        let json = r#"{"last_active":5,"services":[{"id":1,"type":"custom","name":"X","url":"https://x.example"}]}"#;
        let stored = parse_store(json).unwrap();
        assert_eq!(stored.last_active, None);
    }
}
