//! modelxfer-core: Core types for modelxfer
//!
//! This crate provides the data model shared by the export and import paths:
//! - Model reference parsing into canonical identifiers
//! - Manifest documents and content digests
//! - The store's relative on-disk layout
//! - Configuration types
//! - Error handling

pub mod config;
pub mod error;
pub mod layout;
pub mod manifest;
pub mod reference;

pub use config::*;
pub use error::*;
pub use layout::{map_to_paths, RelativePathSet};
pub use manifest::*;
pub use reference::*;
