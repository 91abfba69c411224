//! Asset labels: CPU architecture and display name derived from a release asset filename.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// OS label attached to every enriched asset. Only Linux builds are published.
pub const LINUX_OS: &str = "Linux";

/// Prefix of every display name, e.g. "Balena for x86".
pub const DISPLAY_PREFIX: &str = "Balena for";

static ARM_PATTERN: OnceLock<Regex> = OnceLock::new();

fn arm_pattern() -> &'static Regex {
    ARM_PATTERN.get_or_init(|| Regex::new(r"arm[0-9]+").expect("arm pattern is a valid regex"))
}

/// Architecture recognized in an asset filename.
///
/// Serializes as a plain string, an array of strings, or `null`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ArchResult {
    /// One label, e.g. "x86" or "i386".
    Single(String),
    /// Every `arm<digits>` occurrence, in order of appearance.
    Multiple(Vec<String>),
    /// Nothing recognized.
    Unknown,
}

impl ArchResult {
    pub fn is_unknown(&self) -> bool {
        matches!(self, ArchResult::Unknown)
    }
}

/// `Multiple` joins with a bare comma and `Unknown` renders as "undefined",
/// matching what the landing page has always shown for these cases.
impl fmt::Display for ArchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchResult::Single(label) => write!(f, "{}", label),
            ArchResult::Multiple(labels) => write!(f, "{}", labels.join(",")),
            ArchResult::Unknown => write!(f, "undefined"),
        }
    }
}

/// Classify an asset filename by architecture.
///
/// ARM matches win over "amd64", which wins over "386". Matching is case-sensitive.
pub fn resolve_architecture(name: &str) -> ArchResult {
    let arm: Vec<String> = arm_pattern()
        .find_iter(name)
        .map(|m| m.as_str().to_string())
        .collect();
    if !arm.is_empty() {
        ArchResult::Multiple(arm)
    } else if name.contains("amd64") {
        ArchResult::Single("x86".to_string())
    } else if name.contains("386") {
        ArchResult::Single("i386".to_string())
    } else {
        ArchResult::Unknown
    }
}

/// Human-readable asset name, e.g. "Balena for x86".
pub fn resolve_display_name(name: &str) -> String {
    format!("{} {}", DISPLAY_PREFIX, resolve_architecture(name))
}
