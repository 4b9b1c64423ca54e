//! modelxfer-archive: Archive packing and extraction
//!
//! This crate moves a model's file set in and out of a single archive:
//! - Archive format selection from the file name suffix
//! - An `ArchiveTool` abstraction over the external archiving utility
//! - A `tar` based implementation driving the system binary

pub mod format;
pub mod tar;
pub mod traits;

pub use format::ArchiveFormat;
pub use tar::TarArchiver;
pub use traits::ArchiveTool;
