//! Snapshot and restore of project files around a mutating operation.
//!
//! Layout under the project root:
//!
//! ```text
//! {backup_dir}/{id}/manifest.json
//! {backup_dir}/{id}/files/{original relative path}
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::application::ApplicationError;
use crate::application::ports::FileStore;
use crate::domain::BackupManifest;
use crate::error::{ArchforgeError, ArchforgeResult, Context};

/// Backup root used when none is configured, relative to the project.
pub const DEFAULT_BACKUP_DIR: &str = ".archforge/backups";

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

pub struct BackupCoordinator {
    store: Arc<dyn FileStore>,
    backup_dir: PathBuf,
}

impl BackupCoordinator {
    /// `backup_dir` is relative to each project root.
    pub fn new(store: Arc<dyn FileStore>, backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            backup_dir: backup_dir.into(),
        }
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Millisecond timestamp, a per-process sequence number and a random
    /// suffix. Ids from one process sort in creation order.
    pub fn next_id() -> String {
        let sequence = SEQUENCE.fetch_add(1, Ordering::Relaxed) % 1_000_000;
        let uuid = Uuid::new_v4().simple().to_string();
        format!(
            "backup_{}_{sequence:06}_{}",
            Utc::now().format("%Y%m%d_%H%M%S_%3f"),
            &uuid[..8]
        )
    }

    /// Copy every existing path in `paths` (relative to `root`) into a new
    /// backup and return its id. Missing files are skipped.
    #[instrument(skip_all, fields(root = %root.display(), files = paths.len()))]
    pub fn create_backup(&self, root: &Path, paths: &[PathBuf]) -> ArchforgeResult<String> {
        let id = Self::next_id();
        let backup_root = self.location(root, &id);

        match self.write_snapshot(root, &id, paths) {
            Ok(manifest) => {
                debug!(backup_id = %id, saved = manifest.entries.len(), "Backup created");
                Ok(id)
            }
            Err(e) => {
                if let Err(cleanup) = self.store.remove(&backup_root) {
                    warn!(error = %cleanup, path = %backup_root.display(), "Partial backup cleanup failed");
                }
                Err(ApplicationError::BackupFailed {
                    reason: e.to_string(),
                    guidance: None,
                }
                .into())
            }
        }
    }

    fn write_snapshot(
        &self,
        root: &Path,
        id: &str,
        paths: &[PathBuf],
    ) -> ArchforgeResult<BackupManifest> {
        let mut manifest = BackupManifest::new(id, Utc::now());
        let files_dir = self.backup_dir.join(id).join("files");

        for relative in paths {
            let original = root.join(relative);
            if !self.store.exists(&original) || manifest.contains(relative) {
                continue;
            }
            let snapshot = files_dir.join(relative);
            let content = self.store.read(&original)?;
            self.store.write(&root.join(&snapshot), &content)?;
            manifest.record(relative.clone(), snapshot);
        }

        let json = serde_json::to_string_pretty(&manifest).context("serializing backup manifest")?;
        self.store.write(&self.manifest_path(root, id), &json)?;
        Ok(manifest)
    }

    /// Replay every entry of backup `id` over the project.
    #[instrument(skip_all, fields(root = %root.display(), backup_id = %id))]
    pub fn restore_backup(&self, root: &Path, id: &str) -> ArchforgeResult<()> {
        let manifest = self.read_manifest(root, id)?;

        for (original, snapshot) in &manifest.entries {
            let replay = self
                .store
                .read(&root.join(snapshot))
                .and_then(|content| self.store.write(&root.join(original), &content));
            if let Err(e) = replay {
                return Err(ApplicationError::BackupFailed {
                    reason: format!(
                        "restoring {} from backup '{id}': {e}",
                        original.display()
                    ),
                    guidance: Some(format!(
                        "Manual recovery may be required; snapshots remain in {}",
                        self.location(root, id).display()
                    )),
                }
                .into());
            }
        }

        info!(restored = manifest.entries.len(), "Backup restored");
        Ok(())
    }

    /// Remove backup `id`. Deleting a missing backup is a no-op.
    pub fn delete_backup(&self, root: &Path, id: &str) -> ArchforgeResult<()> {
        self.store.remove(&self.location(root, id))
    }

    pub fn read_manifest(&self, root: &Path, id: &str) -> ArchforgeResult<BackupManifest> {
        let path = self.manifest_path(root, id);
        if !self.store.exists(&path) {
            return Err(ApplicationError::BackupNotFound { id: id.to_string() }.into());
        }
        let text = self.store.read(&path)?;
        serde_json::from_str(&text).map_err(|e| {
            ArchforgeError::from(ApplicationError::BackupFailed {
                reason: format!("manifest of backup '{id}' is corrupt: {e}"),
                guidance: Some(format!("Inspect {} by hand", path.display())),
            })
        })
    }

    fn location(&self, root: &Path, id: &str) -> PathBuf {
        root.join(&self.backup_dir).join(id)
    }

    fn manifest_path(&self, root: &Path, id: &str) -> PathBuf {
        self.location(root, id).join(BackupManifest::FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::testing::InMemoryStore;

    fn setup() -> (Arc<InMemoryStore>, BackupCoordinator) {
        let store = Arc::new(InMemoryStore::new());
        let coordinator = BackupCoordinator::new(store.clone(), DEFAULT_BACKUP_DIR);
        (store, coordinator)
    }

    #[test]
    fn ids_are_unique_and_sortable() {
        let a = BackupCoordinator::next_id();
        let b = BackupCoordinator::next_id();
        assert_ne!(a, b);
        assert!(a.starts_with("backup_"));
        assert_eq!(a.len(), "backup_20260101_000000_000_000000_abcdef12".len());

        // Same millisecond or not, later ids sort after earlier ones.
        let ids: Vec<String> = (0..200).map(|_| BackupCoordinator::next_id()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(sorted, ids);
    }

    #[test]
    fn round_trip_restores_original_content() {
        let (store, backups) = setup();
        let root = Path::new("/p");
        store.put("/p/settings.gradle.kts", "include(\"a\")\n");
        store.put("/p/app/application.yml", "server:\n  port: 8080\n");

        let id = backups
            .create_backup(
                root,
                &[
                    PathBuf::from("settings.gradle.kts"),
                    PathBuf::from("app/application.yml"),
                    PathBuf::from("missing.txt"),
                ],
            )
            .unwrap();

        store.put("/p/settings.gradle.kts", "garbage");
        store.put("/p/app/application.yml", "garbage");

        backups.restore_backup(root, &id).unwrap();
        assert_eq!(store.get("/p/settings.gradle.kts").unwrap(), "include(\"a\")\n");
        assert_eq!(store.get("/p/app/application.yml").unwrap(), "server:\n  port: 8080\n");

        let manifest = backups.read_manifest(root, &id).unwrap();
        assert_eq!(manifest.entries.len(), 2);
        assert!(!manifest.contains(Path::new("missing.txt")));
    }

    #[test]
    fn restore_of_unknown_backup_fails() {
        let (_, backups) = setup();
        let err = backups.restore_backup(Path::new("/p"), "backup_nope").unwrap_err();
        assert!(matches!(
            err,
            ArchforgeError::Application(ApplicationError::BackupNotFound { .. })
        ));
    }

    #[test]
    fn delete_is_idempotent() {
        let (store, backups) = setup();
        store.put("/p/a.txt", "a");
        let id = backups
            .create_backup(Path::new("/p"), &[PathBuf::from("a.txt")])
            .unwrap();
        backups.delete_backup(Path::new("/p"), &id).unwrap();
        backups.delete_backup(Path::new("/p"), &id).unwrap();
        assert!(backups.restore_backup(Path::new("/p"), &id).is_err());
    }

    #[test]
    fn failed_copy_cleans_up_and_reports() {
        let (store, backups) = setup();
        store.put("/p/a.txt", "a");
        store.fail_writes_containing("files/a.txt");

        let err = backups
            .create_backup(Path::new("/p"), &[PathBuf::from("a.txt")])
            .unwrap_err();
        assert!(matches!(
            err,
            ArchforgeError::Application(ApplicationError::BackupFailed { .. })
        ));
        assert!(store.paths_under("/p/.archforge").is_empty());
    }
}
