use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use urna_catalog::Identifier;

use crate::error::{Result, StoreError};

/// `o00407-{council}{zone}{section}.bu`
pub fn artifact_file_name(id: &Identifier) -> String {
    id.artifact_file_name()
}

/// Confirmation of one persisted artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Written {
    pub id: Identifier,
    pub path: PathBuf,
    pub bytes: u64,
}

/// Flat directory of artifacts.
///
/// Distinct identifiers map to distinct file names, so concurrent writes for
/// one batch never touch the same file.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, id: &Identifier) -> PathBuf {
        self.root.join(artifact_file_name(id))
    }

    /// Create the output directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|source| StoreError::OutputDir {
                path: self.root.clone(),
                source,
            })
    }

    /// Create or replace the artifact file for `id`.
    ///
    /// Returns once the bytes are synced to disk and renamed into place.
    pub async fn write(&self, id: &Identifier, content: &[u8]) -> Result<Written> {
        let name = artifact_file_name(id);
        let path = self.root.join(&name);
        let staging = self.root.join(format!(".{name}.tmp"));

        let fail = |path: &Path| {
            let path = path.to_path_buf();
            move |source| StoreError::Write {
                id: id.clone(),
                path,
                source,
            }
        };

        if let Err(e) = stage(&staging, content).await {
            let _ = fs::remove_file(&staging).await;
            return Err(fail(&staging)(e));
        }

        if let Err(e) = fs::rename(&staging, &path).await {
            let _ = fs::remove_file(&staging).await;
            return Err(fail(&path)(e));
        }

        debug!(%id, path = %path.display(), bytes = content.len(), "artifact written");

        Ok(Written {
            id: id.clone(),
            path,
            bytes: content.len() as u64,
        })
    }
}

/// Write `content` to a fresh file at `staging` and sync it.
async fn stage(staging: &Path, content: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(staging).await?;
    file.write_all(content).await?;
    file.flush().await?;
    file.sync_all().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn id() -> Identifier {
        Identifier::new("rr", "06122", "0007", "0181")
    }

    #[test]
    fn target_name_is_deterministic() {
        let store = ArtifactStore::new("/data/bu");
        assert_eq!(artifact_file_name(&id()), "o00407-0612200070181.bu");
        assert_eq!(
            store.path_for(&id()),
            PathBuf::from("/data/bu/o00407-0612200070181.bu")
        );
    }

    #[tokio::test]
    async fn write_creates_file_and_leaves_no_staging() {
        let dir = tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());

        let written = store.write(&id(), b"\x30\x82payload").await.unwrap();

        assert_eq!(written.bytes, 9);
        assert_eq!(std::fs::read(&written.path).unwrap(), b"\x30\x82payload");

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["o00407-0612200070181.bu".to_string()]);
    }

    #[tokio::test]
    async fn write_overwrites_existing() {
        let dir = tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());

        store.write(&id(), b"old content").await.unwrap();
        store.write(&id(), b"new").await.unwrap();

        assert_eq!(std::fs::read(store.path_for(&id())).unwrap(), b"new");
    }

    #[tokio::test]
    async fn write_into_missing_directory_fails_with_id() {
        let dir = tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().join("absent"));

        match store.write(&id(), b"x").await {
            Err(StoreError::Write { id: got, .. }) => assert_eq!(got, id()),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn failed_staging_write_is_cleaned_up() {
        // Opening the staging name succeeds, every write then fails with ENOSPC.
        let full = Path::new("/dev/full");
        if !full.exists() {
            return;
        }
        let dir = tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        let staging = dir.path().join(".o00407-0612200070181.bu.tmp");
        std::os::unix::fs::symlink(full, &staging).unwrap();

        match store.write(&id(), &vec![0u8; 64 * 1024]).await {
            Err(StoreError::Write { id: got, path, .. }) => {
                assert_eq!(got, id());
                assert_eq!(path, staging);
            }
            other => panic!("unexpected result: {other:?}"),
        }

        assert!(std::fs::symlink_metadata(&staging).is_err());
        assert!(!store.path_for(&id()).exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn ensure_dir_creates_nested_root() {
        let dir = tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().join("a").join("b"));

        store.ensure_dir().await.unwrap();
        store.write(&id(), b"x").await.unwrap();

        assert!(store.path_for(&id()).exists());
    }
}
