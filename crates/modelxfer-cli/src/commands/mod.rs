//! CLI commands implementation

use anyhow::{bail, Result};
use modelxfer_archive::ArchiveTool;
use modelxfer_core::ModelIdentifier;
use modelxfer_store::ModelStore;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tokio::io::BufWriter;
use tracing::{info, warn};

/// Export a model from the store at `root`
pub async fn save(
    root: &Path,
    archiver: &dyn ArchiveTool,
    model: &str,
    output: Option<PathBuf>,
    dry_run: bool,
) -> Result<()> {
    let id = ModelIdentifier::parse(model)?;
    let store = ModelStore::new(root.to_path_buf());
    let paths = store.resolve_paths(&id).await?;

    if dry_run {
        for path in paths.iter() {
            println!("{}", path.display());
        }
        return Ok(());
    }

    match output {
        Some(file) => {
            let mut writer = BufWriter::new(tokio::fs::File::create(&file).await?);
            match archiver.pack(store.root(), &paths, &mut writer).await {
                Ok(bytes) => {
                    info!(model = %id, file = %file.display(), bytes = bytes, "Model saved");
                }
                Err(e) => {
                    drop(writer);
                    if let Err(rm) = tokio::fs::remove_file(&file).await {
                        warn!(file = %file.display(), error = %rm, "Failed to remove partial archive");
                    }
                    return Err(e.into());
                }
            }
        }
        None => {
            if std::io::stdout().is_terminal() {
                bail!("refusing to write archive data to a terminal; redirect stdout or use --output");
            }
            let mut stdout = tokio::io::stdout();
            let bytes = archiver.pack(store.root(), &paths, &mut stdout).await?;
            info!(model = %id, bytes = bytes, "Model saved");
        }
    }

    Ok(())
}

/// Import an archive into the store at `root`
pub async fn load(root: &Path, archiver: &dyn ArchiveTool, archive: &Path) -> Result<()> {
    archiver.extract(archive, root).await?;
    info!(archive = %archive.display(), root = %root.display(), "Model loaded");
    Ok(())
}
