//! modelxfer-store: Local model store access
//!
//! This crate resolves model identifiers against a store root:
//! - Manifest lookup and parsing
//! - Derivation of the relative file set for one model version

pub mod store;

pub use store::ModelStore;
