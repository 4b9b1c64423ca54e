//! Archive format selection

use modelxfer_core::{XferError, XferResult};
use std::fmt;
use std::path::Path;

/// Compression applied around the tar stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// Plain tar
    Tar,
    /// gzip-compressed tar
    Gzip,
    /// bzip2-compressed tar
    Bzip2,
    /// xz-compressed tar
    Xz,
}

const SUFFIXES: &[(&str, ArchiveFormat)] = &[
    (".tar", ArchiveFormat::Tar),
    (".tar.gz", ArchiveFormat::Gzip),
    (".tar.bz", ArchiveFormat::Bzip2),
    (".tar.xz", ArchiveFormat::Xz),
];

impl ArchiveFormat {
    /// Select the format from the archive's file name suffix.
    ///
    /// Only the name is inspected, never the file contents.
    pub fn from_path(path: &Path) -> XferResult<Self> {
        let unsupported = || XferError::UnsupportedArchiveFormat(path.display().to_string());

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(unsupported)?;

        SUFFIXES
            .iter()
            .find(|(suffix, _)| name.ends_with(suffix))
            .map(|(_, format)| *format)
            .ok_or_else(unsupported)
    }

    /// tar flag selecting the decompression filter
    pub fn tar_flag(&self) -> Option<&'static str> {
        match self {
            ArchiveFormat::Tar => None,
            ArchiveFormat::Gzip => Some("-z"),
            ArchiveFormat::Bzip2 => Some("-j"),
            ArchiveFormat::Xz => Some("-J"),
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveFormat::Tar => write!(f, "tar"),
            ArchiveFormat::Gzip => write!(f, "gzip"),
            ArchiveFormat::Bzip2 => write!(f, "bzip2"),
            ArchiveFormat::Xz => write!(f, "xz"),
        }
    }
}
