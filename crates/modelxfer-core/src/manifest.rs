//! Manifest documents and content digests

use crate::{XferError, XferResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Content digest of the form `<algorithm>:<hex>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digest {
    algorithm: String,
    hex: String,
}

impl Digest {
    /// Parse a `<algorithm>:<hex>` digest string.
    ///
    /// The string is split on its first `:`. The algorithm may not contain
    /// `-` so that the blob file name can be split back unambiguously, and
    /// neither half may contain a path separator.
    pub fn parse(s: &str) -> XferResult<Self> {
        let malformed = || XferError::ManifestMalformed(format!("invalid digest: {:?}", s));

        let (algorithm, hex) = s.split_once(':').ok_or_else(malformed)?;
        if algorithm.is_empty()
            || hex.is_empty()
            || !algorithm
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '_'))
            || !hex.chars().all(|c| c.is_ascii_alphanumeric() || c == '=' || c == '_')
        {
            return Err(malformed());
        }

        Ok(Self {
            algorithm: algorithm.to_string(),
            hex: hex.to_string(),
        })
    }

    /// Recover a digest from its blob file name (`<algorithm>-<hex>`).
    pub fn from_blob_file_name(name: &str) -> XferResult<Self> {
        let (algorithm, hex) = name.split_once('-').ok_or_else(|| {
            XferError::ManifestMalformed(format!("invalid blob file name: {:?}", name))
        })?;
        Self::parse(&format!("{}:{}", algorithm, hex))
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn hex(&self) -> &str {
        &self.hex
    }

    /// File name of the blob inside `blobs/`
    pub fn blob_file_name(&self) -> String {
        format!("{}-{}", self.algorithm, self.hex)
    }
}

impl FromStr for Digest {
    type Err = XferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.hex)
    }
}

/// Manifest describing one model version
///
/// Only `config.digest` and `layers[].digest` are required; the remaining
/// fields are kept when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    /// Model configuration object
    pub config: Descriptor,
    /// Model layers in document order
    #[serde(default)]
    pub layers: Vec<Descriptor>,
}

/// Reference to one content-addressed blob
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Descriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    pub digest: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl Manifest {
    /// Parse a manifest document.
    pub fn from_slice(bytes: &[u8]) -> XferResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Config digest followed by every layer digest, in document order.
    pub fn digests(&self) -> XferResult<Vec<Digest>> {
        std::iter::once(&self.config)
            .chain(self.layers.iter())
            .map(|descriptor| Digest::parse(&descriptor.digest))
            .collect()
    }
}
