//! Offline cache manifest documents.
//!
//! A manifest lists every resource a permutation caches, followed by a
//! network section whose single `*` entry lets any other request fall
//! through to the network:
//!
//! ```text
//! CACHE MANIFEST
//! CACHE:
//! app/5F2C9A.cache.js
//! app/app.nocache.js
//! index.html
//! NETWORK:
//! *
//! ```

use std::collections::BTreeSet;
use std::fmt::{self, Write as _};

use crate::error::LinkError;

const HEADER: &str = "CACHE MANIFEST";
const CACHE_SECTION: &str = "CACHE:";
const NETWORK_SECTION: &str = "NETWORK:";
const FALLBACK_SECTION: &str = "FALLBACK:";

/// Network entry that sends every uncached request to the network.
pub const NETWORK_WILDCARD: &str = "*";

/// The sections of one cache manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestDescriptor {
    /// Resources stored in the offline cache, in document order.
    pub cached_resources: Vec<String>,
    /// Resources always fetched from the network.
    pub network_resources: Vec<String>,
}

#[derive(Clone, Copy)]
enum Section {
    Cache,
    Network,
    Fallback,
}

impl ManifestDescriptor {
    /// Renders the manifest document.
    ///
    /// Fails on any entry that [`ManifestDescriptor::parse`] would not read
    /// back unchanged: blank entries, entries with a line break or
    /// surrounding whitespace, entries starting with `#`, and entries shaped
    /// like a section header.
    pub fn render(&self) -> Result<String, String> {
        for entry in self.cached_resources.iter().chain(&self.network_resources) {
            check_entry(entry)?;
        }
        Ok(self.to_string())
    }

    /// Parses a manifest document.
    ///
    /// Blank lines and `#` comments are ignored. Entries before the first
    /// section header belong to the cache section; fallback entries are
    /// accepted but not retained.
    pub fn parse(content: &str) -> Result<Self, LinkError> {
        let mut lines = content.lines();
        match lines.next().map(str::trim_end) {
            Some(HEADER) => {}
            other => {
                return Err(LinkError::ManifestParse {
                    reason: format!("expected '{HEADER}' header, found {other:?}"),
                })
            }
        }

        let mut descriptor = Self::default();
        let mut section = Section::Cache;
        for line in lines.map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line {
                CACHE_SECTION => section = Section::Cache,
                NETWORK_SECTION => section = Section::Network,
                FALLBACK_SECTION => section = Section::Fallback,
                _ if is_section_header(line) => {
                    return Err(LinkError::ManifestParse {
                        reason: format!("unknown manifest section '{line}'"),
                    })
                }
                entry => match section {
                    Section::Cache => descriptor.cached_resources.push(entry.to_string()),
                    Section::Network => descriptor.network_resources.push(entry.to_string()),
                    Section::Fallback => {}
                },
            }
        }
        Ok(descriptor)
    }
}

fn check_entry(entry: &str) -> Result<(), String> {
    if entry.trim().is_empty() {
        return Err("manifest entries must not be blank".to_string());
    }
    if entry.contains(['\n', '\r']) {
        return Err(format!("manifest entry {entry:?} contains a line break"));
    }
    if entry.trim() != entry {
        return Err(format!("manifest entry {entry:?} has surrounding whitespace"));
    }
    if entry.starts_with('#') {
        return Err(format!("manifest entry {entry:?} would be read as a comment"));
    }
    if is_section_header(entry) {
        return Err(format!("manifest entry {entry:?} would be read as a section header"));
    }
    Ok(())
}

fn is_section_header(line: &str) -> bool {
    line.ends_with(':') && !line.contains(char::is_whitespace)
}

impl fmt::Display for ManifestDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{HEADER}")?;
        writeln!(f, "{CACHE_SECTION}")?;
        for resource in &self.cached_resources {
            writeln!(f, "{resource}")?;
        }
        writeln!(f, "{NETWORK_SECTION}")?;
        for resource in &self.network_resources {
            writeln!(f, "{resource}")?;
        }
        Ok(())
    }
}

/// Renders the manifest for one permutation.
///
/// `static_resources` (the configured always-cache files) and
/// `cache_resources` (the permutation's partitioned files) are merged,
/// deduplicated and sorted; the network section is the `*` wildcard.
/// `artifact` names the document in errors.
pub fn write_manifest(
    artifact: &str,
    static_resources: &[String],
    cache_resources: &BTreeSet<String>,
) -> Result<String, LinkError> {
    let cached: BTreeSet<&String> = static_resources.iter().chain(cache_resources).collect();
    let descriptor = ManifestDescriptor {
        cached_resources: cached.into_iter().cloned().collect(),
        network_resources: vec![NETWORK_WILDCARD.to_string()],
    };
    descriptor
        .render()
        .map_err(|reason| LinkError::Serialization {
            artifact: artifact.to_string(),
            reason,
        })
}

/// Lists the cached resources of a rendered manifest, one per line.
///
/// Used by hosts that want a quick textual summary of an emitted manifest.
pub fn summarize(descriptor: &ManifestDescriptor) -> String {
    let mut out = String::new();
    for resource in &descriptor.cached_resources {
        let _ = writeln!(out, "  {resource}");
    }
    out
}
