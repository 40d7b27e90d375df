//! Entity identity: URI references, the shared identity core, and version
//! ordering.
//!
//! Every entity in a design document carries an [`Identified`] core: a
//! globally unique identity URI, an optional persistent identity that is
//! stable across versions of the same conceptual entity, and an optional
//! version string. Provenance edges (derivation lineage and generating
//! activities) also live here because every entity kind may carry them.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// A URI-valued reference to another entity, in this document or elsewhere.
///
/// References are plain values: resolution happens through the
/// [`Document`](crate::model::Document), and a reference that fails to
/// resolve is absent, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Uri(String);

impl Uri {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Uri {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for Uri {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl PartialEq<str> for Uri {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Uri {
    fn eq(&self, other: &&str) -> bool {
        self.0 == **other
    }
}

static DISPLAY_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("display id pattern"));

/// Whether `candidate` is a legal display id: a letter or underscore followed
/// by letters, digits and underscores.
pub fn is_display_id(candidate: &str) -> bool {
    DISPLAY_ID.is_match(candidate)
}

/// Identity core embedded in every entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Identified {
    pub identity: Uri,
    pub persistent_identity: Option<Uri>,
    pub display_id: Option<String>,
    pub version: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Derivation lineage: prior or template entities this one was derived
    /// from.
    pub derived_froms: Vec<Uri>,
    /// Activities that generated this entity.
    pub generated_bys: Vec<Uri>,
}

impl Identified {
    pub fn new(identity: impl Into<Uri>) -> Self {
        Self {
            identity: identity.into(),
            ..Self::default()
        }
    }

    /// Builds a compliant identity from its parts:
    /// `prefix "/" display_id "/" version`.
    pub fn compliant(prefix: &str, display_id: &str, version: &str) -> Self {
        let persistent = format!("{prefix}/{display_id}");
        Self {
            identity: Uri::new(format!("{persistent}/{version}")),
            persistent_identity: Some(Uri::new(persistent)),
            display_id: Some(display_id.to_owned()),
            version: Some(version.to_owned()),
            ..Self::default()
        }
    }

    pub fn derived_from(mut self, uri: impl Into<Uri>) -> Self {
        self.derived_froms.push(uri.into());
        self
    }

    pub fn generated_by(mut self, uri: impl Into<Uri>) -> Self {
        self.generated_bys.push(uri.into());
        self
    }
}

/// Orders two version strings: dot-separated segments, numeric segments
/// compared numerically, anything else lexically. An equal prefix with extra
/// segments counts as newer.
pub fn is_first_version_newer(first: &str, second: &str) -> bool {
    let firsts: Vec<&str> = first.split('.').collect();
    let seconds: Vec<&str> = second.split('.').collect();
    for (a, b) in firsts.iter().zip(seconds.iter()) {
        match (a.parse::<u64>(), b.parse::<u64>()) {
            (Ok(na), Ok(nb)) => {
                if na != nb {
                    return na > nb;
                }
            }
            _ => {
                if a != b {
                    return a > b;
                }
            }
        }
    }
    firsts.len() > seconds.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_versions_compare_numerically() {
        assert!(is_first_version_newer("2", "1"));
        assert!(is_first_version_newer("10", "9"));
        assert!(!is_first_version_newer("1", "2"));
        assert!(!is_first_version_newer("1", "1"));
    }

    #[test]
    fn dotted_versions_compare_by_segment() {
        assert!(is_first_version_newer("1.2", "1.1"));
        assert!(is_first_version_newer("1.0.1", "1.0"));
        assert!(!is_first_version_newer("1.0", "1.0.1"));
        assert!(is_first_version_newer("1.10", "1.9"));
    }

    #[test]
    fn mixed_segments_fall_back_to_lexical() {
        assert!(is_first_version_newer("1.beta", "1.alpha"));
        assert!(!is_first_version_newer("1.alpha", "1.alpha"));
    }

    #[test]
    fn display_id_shape() {
        assert!(is_display_id("promoter_1"));
        assert!(is_display_id("_p"));
        assert!(!is_display_id("1promoter"));
        assert!(!is_display_id("has-dash"));
        assert!(!is_display_id(""));
    }

    #[test]
    fn compliant_identity_parts() {
        let ident = Identified::compliant("https://synbio.example/designs", "gate", "1.0");
        assert_eq!(
            ident.identity.as_str(),
            "https://synbio.example/designs/gate/1.0"
        );
        assert_eq!(
            ident.persistent_identity,
            Some(Uri::new("https://synbio.example/designs/gate"))
        );
    }
}
