//! Model reference parsing
//!
//! A model reference is the short name a user types, e.g. `mistral:7b` or
//! `myorg/custom`. It is resolved into a [`ModelIdentifier`] naming exactly
//! one manifest in the store.
//!
//! Accepted forms, tried in order, first match wins:
//!
//! 1. `namespace/model:tag`
//! 2. `namespace/model`
//! 3. `model:tag`
//! 4. `model`
//!
//! The host is never part of the reference and always takes
//! [`DEFAULT_HOST`].

use crate::{XferError, XferResult};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Registry host every reference resolves under
pub const DEFAULT_HOST: &str = "registry.ollama.ai";
/// Namespace used when the reference has none
pub const DEFAULT_NAMESPACE: &str = "library";
/// Tag used when the reference has none
pub const DEFAULT_TAG: &str = "latest";

static REFERENCE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^(?P<namespace>[^/:]+)/(?P<model>[^/:]+):(?P<tag>[^/]+)$",
        r"^(?P<namespace>[^/:]+)/(?P<model>[^/:]+)$",
        r"^(?P<model>[^/:]+):(?P<tag>[^/]+)$",
        r"^(?P<model>[^/:]+)$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

/// Canonical four-part name of one model version
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelIdentifier {
    host: String,
    namespace: String,
    model: String,
    tag: String,
}

impl ModelIdentifier {
    /// Parse a user-supplied model reference.
    pub fn parse(reference: &str) -> XferResult<Self> {
        let captures = REFERENCE_PATTERNS
            .iter()
            .find_map(|pattern| pattern.captures(reference))
            .ok_or_else(|| XferError::InvalidReferenceFormat(reference.to_string()))?;

        let field = |name: &str, default: &str| {
            captures
                .name(name)
                .map_or_else(|| default.to_string(), |m| m.as_str().to_string())
        };

        let id = Self {
            host: DEFAULT_HOST.to_string(),
            namespace: field("namespace", DEFAULT_NAMESPACE),
            model: field("model", ""),
            tag: field("tag", DEFAULT_TAG),
        };

        // Each field becomes a path component under manifests/.
        if [&id.namespace, &id.model, &id.tag]
            .iter()
            .any(|part| part.as_str() == "." || part.as_str() == "..")
        {
            return Err(XferError::InvalidReferenceFormat(reference.to_string()));
        }

        Ok(id)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl FromStr for ModelIdentifier {
    type Err = XferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ModelIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}:{}",
            self.host, self.namespace, self.model, self.tag
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(id: &ModelIdentifier) -> (&str, &str, &str, &str) {
        (id.host(), id.namespace(), id.model(), id.tag())
    }

    #[test]
    fn test_parse_model_and_tag() {
        let id = ModelIdentifier::parse("mistral:7b").unwrap();
        assert_eq!(
            parts(&id),
            ("registry.ollama.ai", "library", "mistral", "7b")
        );
    }

    #[test]
    fn test_parse_namespace_and_model() {
        let id = ModelIdentifier::parse("myorg/custom").unwrap();
        assert_eq!(
            parts(&id),
            ("registry.ollama.ai", "myorg", "custom", "latest")
        );
    }

    #[test]
    fn test_parse_full_reference() {
        let id = ModelIdentifier::parse("myorg/custom:q4_0").unwrap();
        assert_eq!(
            parts(&id),
            ("registry.ollama.ai", "myorg", "custom", "q4_0")
        );
    }

    #[test]
    fn test_parse_bare_model() {
        let id = ModelIdentifier::parse("llama3").unwrap();
        assert_eq!(
            parts(&id),
            ("registry.ollama.ai", "library", "llama3", "latest")
        );
    }

    #[test]
    fn test_parse_tag_keeps_dots_and_dashes() {
        let id = ModelIdentifier::parse("llama3.1:8b-instruct-q4_K_M").unwrap();
        assert_eq!(id.model(), "llama3.1");
        assert_eq!(id.tag(), "8b-instruct-q4_K_M");
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        let id = ModelIdentifier::parse("MyOrg/Custom:Latest").unwrap();
        assert_eq!(id.namespace(), "MyOrg");
        assert_eq!(id.model(), "Custom");
        assert_eq!(id.tag(), "Latest");
    }

    #[test]
    fn test_parse_is_deterministic() {
        let a = ModelIdentifier::parse("myorg/custom:v1").unwrap();
        let b = ModelIdentifier::parse("myorg/custom:v1").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_rejects_invalid_references() {
        for reference in [
            "",
            ":",
            "model:",
            ":tag",
            "/model",
            "namespace/",
            "a/b/c",
            "host.example/ns/model:tag",
            "ns/model:tag/extra",
            "..",
            "ns/..",
            "model:..",
            "./model",
        ] {
            let err = ModelIdentifier::parse(reference).unwrap_err();
            assert!(
                matches!(err, XferError::InvalidReferenceFormat(_)),
                "expected rejection of {:?}",
                reference
            );
        }
    }

    #[test]
    fn test_namespace_with_colon_rejected() {
        // A colon before the slash would otherwise end up inside the namespace.
        for reference in ["a:b/c", "host:5000/model", "a:b/c:d"] {
            assert!(matches!(
                ModelIdentifier::parse(reference),
                Err(XferError::InvalidReferenceFormat(_))
            ));
        }
    }

    #[test]
    fn test_parsed_fields_never_contain_slash() {
        for reference in ["a", "a:b", "a/b", "a/b:c", "a:b:c"] {
            let id = ModelIdentifier::parse(reference).unwrap();
            assert!(!id.model().contains('/'));
            assert!(!id.tag().contains('/'));
            assert!(!id.namespace().is_empty());
            assert!(!id.model().is_empty());
            assert!(!id.tag().is_empty());
        }
    }

    #[test]
    fn test_from_str_and_display() {
        let id: ModelIdentifier = "myorg/custom:v2".parse().unwrap();
        assert_eq!(id.to_string(), "registry.ollama.ai/myorg/custom:v2");
    }
}
