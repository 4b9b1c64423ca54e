//! Model store rooted at a local directory
//!
//! The store is owned by another program; this module only reads from it.

use modelxfer_core::{
    layout, map_to_paths, Digest, Manifest, ModelIdentifier, RelativePathSet, XferError,
    XferResult,
};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read-only view of a model store
#[derive(Debug, Clone)]
pub struct ModelStore {
    /// Store root holding `manifests/` and `blobs/`
    root: PathBuf,
}

impl ModelStore {
    /// Create a store handle for `root`
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of the manifest for `id`
    pub fn manifest_path(&self, id: &ModelIdentifier) -> PathBuf {
        self.root.join(layout::manifest_path(id))
    }

    /// Read and parse the manifest for `id`
    pub async fn read_manifest(&self, id: &ModelIdentifier) -> XferResult<Manifest> {
        let path = self.manifest_path(id);

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
                return Err(XferError::ManifestNotFound(path));
            }
            Err(e) => {
                let is_dir = tokio::fs::metadata(&path)
                    .await
                    .map_or(false, |m| m.is_dir());
                if !is_dir {
                    return Err(e.into());
                }
                debug!(path = %path.display(), error = %e, "Manifest path is a directory");
                return Err(XferError::ManifestNotFound(path));
            }
        };

        Manifest::from_slice(&bytes).map_err(|e| match e {
            XferError::ManifestMalformed(msg) => {
                XferError::ManifestMalformed(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Config digest followed by layer digests for `id`
    pub async fn resolve(&self, id: &ModelIdentifier) -> XferResult<Vec<Digest>> {
        let digests = self.read_manifest(id).await?.digests()?;
        debug!(model = %id, digests = digests.len(), "Resolved manifest");
        Ok(digests)
    }

    /// Relative file set making up `id`
    pub async fn resolve_paths(&self, id: &ModelIdentifier) -> XferResult<RelativePathSet> {
        let digests = self.resolve(id).await?;
        Ok(map_to_paths(id, &digests))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MANIFEST: &str = r#"{
        "schemaVersion": 2,
        "config": {"digest": "sha256:aaa", "size": 10},
        "layers": [{"digest": "sha256:bbb", "size": 20}]
    }"#;

    fn write_manifest(root: &Path, id: &ModelIdentifier, content: &str) {
        let path = root.join(layout::manifest_path(id));
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[tokio::test]
    async fn test_resolve_paths() {
        let dir = TempDir::new().unwrap();
        let id = ModelIdentifier::parse("llama3").unwrap();
        write_manifest(dir.path(), &id, MANIFEST);

        let store = ModelStore::new(dir.path().to_path_buf());
        let set = store.resolve_paths(&id).await.unwrap();
        let paths: Vec<&Path> = set.iter().collect();
        assert_eq!(
            paths,
            vec![
                Path::new("manifests/registry.ollama.ai/library/llama3/latest"),
                Path::new("blobs/sha256-aaa"),
                Path::new("blobs/sha256-bbb"),
            ]
        );
    }

    #[tokio::test]
    async fn test_resolve_missing_manifest() {
        let dir = TempDir::new().unwrap();
        let store = ModelStore::new(dir.path().to_path_buf());
        let id = ModelIdentifier::parse("mistral:7b").unwrap();

        let err = store.resolve(&id).await.unwrap_err();
        match err {
            XferError::ManifestNotFound(path) => {
                assert_eq!(path, store.manifest_path(&id));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_resolve_other_tag_not_found() {
        let dir = TempDir::new().unwrap();
        let id = ModelIdentifier::parse("mistral:7b").unwrap();
        write_manifest(dir.path(), &id, MANIFEST);

        let store = ModelStore::new(dir.path().to_path_buf());
        let other = ModelIdentifier::parse("mistral").unwrap();
        assert!(matches!(
            store.resolve(&other).await,
            Err(XferError::ManifestNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_resolve_malformed_manifest() {
        let dir = TempDir::new().unwrap();
        let id = ModelIdentifier::parse("llama3").unwrap();
        write_manifest(dir.path(), &id, r#"{"layers": []}"#);

        let store = ModelStore::new(dir.path().to_path_buf());
        assert!(matches!(
            store.resolve(&id).await,
            Err(XferError::ManifestMalformed(_))
        ));
    }

    #[tokio::test]
    async fn test_resolve_bad_digest() {
        let dir = TempDir::new().unwrap();
        let id = ModelIdentifier::parse("llama3").unwrap();
        write_manifest(dir.path(), &id, r#"{"config": {"digest": "../../etc/passwd"}}"#);

        let store = ModelStore::new(dir.path().to_path_buf());
        assert!(matches!(
            store.resolve(&id).await,
            Err(XferError::ManifestMalformed(_))
        ));
    }

    #[tokio::test]
    async fn test_resolve_manifest_path_is_directory() {
        let dir = TempDir::new().unwrap();
        let id = ModelIdentifier::parse("llama3").unwrap();

        let store = ModelStore::new(dir.path().to_path_buf());
        std::fs::create_dir_all(store.manifest_path(&id)).unwrap();

        assert!(matches!(
            store.resolve(&id).await,
            Err(XferError::ManifestNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_resolve_parent_is_file() {
        let dir = TempDir::new().unwrap();
        let store = ModelStore::new(dir.path().to_path_buf());
        let id = ModelIdentifier::parse("llama3:8b").unwrap();

        // .../library/llama3 exists as a file, so .../llama3/8b cannot
        let model_entry = store.manifest_path(&id).parent().unwrap().to_path_buf();
        std::fs::create_dir_all(model_entry.parent().unwrap()).unwrap();
        std::fs::write(&model_entry, b"not a directory").unwrap();

        assert!(matches!(
            store.resolve(&id).await,
            Err(XferError::ManifestNotFound(_))
        ));
    }
}
