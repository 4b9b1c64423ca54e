//! Store layout convention
//!
//! A store root holds manifests at `manifests/<host>/<namespace>/<model>/<tag>`
//! and blobs at `blobs/<algorithm>-<hex>`. Everything here is relative to the
//! root and does no I/O.

use crate::{Digest, ModelIdentifier};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub const MANIFESTS_DIR: &str = "manifests";
pub const BLOBS_DIR: &str = "blobs";

/// Relative path of the manifest for `id`
pub fn manifest_path(id: &ModelIdentifier) -> PathBuf {
    [MANIFESTS_DIR, id.host(), id.namespace(), id.model(), id.tag()]
        .iter()
        .collect()
}

/// Relative path of the blob for `digest`
pub fn blob_path(digest: &Digest) -> PathBuf {
    Path::new(BLOBS_DIR).join(digest.blob_file_name())
}

/// Files making up one model version, relative to the store root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativePathSet {
    manifest: PathBuf,
    blobs: Vec<PathBuf>,
}

impl RelativePathSet {
    pub fn manifest(&self) -> &Path {
        &self.manifest
    }

    pub fn blobs(&self) -> &[PathBuf] {
        &self.blobs
    }

    /// Manifest first, then blobs in manifest order
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        std::iter::once(self.manifest.as_path()).chain(self.blobs.iter().map(PathBuf::as_path))
    }

    pub fn len(&self) -> usize {
        1 + self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Map an identifier and its digests to the store-relative file set.
///
/// Repeated digests are listed once, at their first position.
pub fn map_to_paths(id: &ModelIdentifier, digests: &[Digest]) -> RelativePathSet {
    let mut seen = HashSet::new();
    let blobs = digests
        .iter()
        .filter(|digest| seen.insert(*digest))
        .map(blob_path)
        .collect();

    RelativePathSet {
        manifest: manifest_path(id),
        blobs,
    }
}
