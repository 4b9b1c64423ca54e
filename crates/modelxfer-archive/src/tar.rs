//! tar-based archive tool
//!
//! Archives are produced and consumed by the system `tar` binary running as
//! a child process. The child's exit status is always checked, so a failed
//! run never looks like a successful one.

use async_trait::async_trait;
use modelxfer_core::{ArchiverConfig, RelativePathSet, XferError, XferResult};
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::format::ArchiveFormat;
use crate::traits::ArchiveTool;

/// Archive tool driving an external `tar` binary
pub struct TarArchiver {
    config: ArchiverConfig,
}

impl TarArchiver {
    /// Create a new tar archiver
    pub fn new(config: ArchiverConfig) -> Self {
        Self { config }
    }

    /// Build the command writing an uncompressed archive to stdout
    fn pack_command(&self, root: &Path, paths: &RelativePathSet) -> Command {
        let mut cmd = Command::new(&self.config.tar_path);
        cmd.arg("-c").arg("-f").arg("-");
        cmd.arg("-C").arg(root);
        for path in paths.iter() {
            cmd.arg(path);
        }

        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        cmd
    }

    /// Build the command extracting `archive` under `root`
    fn extract_command(&self, format: ArchiveFormat, archive: &Path, root: &Path) -> Command {
        let mut cmd = Command::new(&self.config.tar_path);
        cmd.arg("-x");
        if let Some(flag) = format.tar_flag() {
            cmd.arg(flag);
        }
        cmd.arg("-f").arg(archive);
        cmd.arg("-C").arg(root);

        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::null());
        cmd.stderr(Stdio::piped());

        cmd
    }
}

/// Fail unless every path is a regular file under `root`
async fn check_inputs(root: &Path, paths: &RelativePathSet) -> XferResult<()> {
    for path in paths.iter() {
        let full = root.join(path);
        match tokio::fs::metadata(&full).await {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => {
                return Err(XferError::ArchiveWriteError(format!(
                    "not a regular file: {}",
                    full.display()
                )));
            }
            Err(e) => {
                return Err(XferError::ArchiveWriteError(format!(
                    "cannot read {}: {}",
                    full.display(),
                    e
                )));
            }
        }
    }
    Ok(())
}

/// Kill and reap the child, and stop draining its stderr
async fn abort(child: &mut Child, stderr_task: JoinHandle<Vec<u8>>) {
    if let Err(e) = child.kill().await {
        debug!(error = %e, "tar already exited");
    }
    stderr_task.abort();
}

#[async_trait]
impl ArchiveTool for TarArchiver {
    async fn pack(
        &self,
        root: &Path,
        paths: &RelativePathSet,
        output: &mut (dyn AsyncWrite + Unpin + Send),
    ) -> XferResult<u64> {
        check_inputs(root, paths).await?;

        info!(
            root = %root.display(),
            files = paths.len(),
            "Packing archive"
        );

        let mut child = self.pack_command(root, paths).spawn().map_err(|e| {
            error!(tar = %self.config.tar_path.display(), error = %e, "Failed to spawn tar");
            XferError::ArchiveWriteError(format!("failed to run tar: {}", e))
        })?;

        let (Some(mut stdout), Some(mut stderr)) = (child.stdout.take(), child.stderr.take())
        else {
            let _ = child.kill().await;
            return Err(XferError::ArchiveWriteError(
                "tar output streams unavailable".to_string(),
            ));
        };

        // Drain stderr alongside stdout so a chatty tar cannot block.
        let stderr_task = tokio::spawn(async move {
            let mut buf = Vec::new();
            let _ = stderr.read_to_end(&mut buf).await;
            buf
        });

        let copied = match tokio::io::copy(&mut stdout, &mut *output).await {
            Ok(n) => n,
            Err(e) => {
                abort(&mut child, stderr_task).await;
                return Err(XferError::ArchiveWriteError(format!(
                    "failed to write archive: {}",
                    e
                )));
            }
        };
        if let Err(e) = output.flush().await {
            abort(&mut child, stderr_task).await;
            return Err(XferError::ArchiveWriteError(format!(
                "failed to flush archive: {}",
                e
            )));
        }

        let status = match child.wait().await {
            Ok(status) => status,
            Err(e) => {
                abort(&mut child, stderr_task).await;
                return Err(XferError::ArchiveWriteError(format!(
                    "failed to wait for tar: {}",
                    e
                )));
            }
        };
        let stderr = stderr_task.await.unwrap_or_default();

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr);
            error!(status = %status, stderr = %stderr.trim(), "tar exited with failure");
            return Err(XferError::ArchiveWriteError(format!(
                "tar failed ({}): {}",
                status,
                stderr.trim()
            )));
        }

        debug!(bytes = copied, "Archive written");
        Ok(copied)
    }

    async fn extract(&self, archive: &Path, root: &Path) -> XferResult<()> {
        let format = ArchiveFormat::from_path(archive)?;

        info!(
            archive = %archive.display(),
            root = %root.display(),
            format = %format,
            "Extracting archive"
        );

        tokio::fs::create_dir_all(root).await.map_err(|e| {
            XferError::ArchiveReadError(format!("cannot create {}: {}", root.display(), e))
        })?;

        let output = self
            .extract_command(format, archive, root)
            .output()
            .await
            .map_err(|e| {
                error!(tar = %self.config.tar_path.display(), error = %e, "Failed to spawn tar");
                XferError::ArchiveReadError(format!("failed to run tar: {}", e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!(status = %output.status, stderr = %stderr.trim(), "tar exited with failure");
            return Err(XferError::ArchiveReadError(format!(
                "tar failed ({}): {}",
                output.status,
                stderr.trim()
            )));
        }

        debug!(archive = %archive.display(), "Archive extracted");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "tar"
    }
}
