//! Archiving tool trait definitions

use async_trait::async_trait;
use modelxfer_core::{RelativePathSet, XferResult};
use std::path::Path;
use tokio::io::AsyncWrite;

/// External tool that packs and extracts model archives
#[async_trait]
pub trait ArchiveTool: Send + Sync {
    /// Write an uncompressed archive of `paths`, relative to `root`, to `output`.
    ///
    /// Returns the number of bytes written.
    async fn pack(
        &self,
        root: &Path,
        paths: &RelativePathSet,
        output: &mut (dyn AsyncWrite + Unpin + Send),
    ) -> XferResult<u64>;

    /// Extract `archive` directly under `root`
    async fn extract(&self, archive: &Path, root: &Path) -> XferResult<()>;

    /// Get the tool name
    fn name(&self) -> &'static str;
}
