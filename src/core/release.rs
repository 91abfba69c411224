//! Release and asset records as published by the host, plus their enriched form.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::arch::{self, ArchResult};

/// Keys added by enrichment. Stripped from pass-through fields so re-enriching
/// replaces them instead of emitting duplicate keys.
const DERIVED_KEYS: [&str; 3] = ["prettyName", "arch", "os"];

/// A distributable belonging to a release. Fields other than `name` are kept as-is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Asset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: Map::new(),
        }
    }
}

/// An asset with display labels attached.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EnrichedAsset {
    #[serde(flatten)]
    pub asset: Asset,
    #[serde(rename = "prettyName")]
    pub pretty_name: String,
    pub arch: ArchResult,
    pub os: String,
}

impl EnrichedAsset {
    /// Build the enriched record from a copy of `asset`; the source is left untouched.
    pub fn from_asset(asset: &Asset) -> Self {
        let mut base = asset.clone();
        for key in DERIVED_KEYS {
            base.extra.shift_remove(key);
        }
        Self {
            pretty_name: arch::resolve_display_name(&asset.name),
            arch: arch::resolve_architecture(&asset.name),
            os: arch::LINUX_OS.to_string(),
            asset: base,
        }
    }
}

/// A set of assets published together. Other release fields (tag, body, ...) are kept as-is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Release<A> {
    pub assets: Vec<A>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<A> Release<A> {
    /// Release tag for logging: `tag_name` (GitHub) or `name`, if present.
    pub fn tag(&self) -> Option<&str> {
        self.extra
            .get("tag_name")
            .or_else(|| self.extra.get("name"))
            .and_then(Value::as_str)
    }
}

/// Attach labels to every asset, keeping order and count.
pub fn enrich_release(release: Release<Asset>) -> Release<EnrichedAsset> {
    Release {
        assets: release.assets.iter().map(EnrichedAsset::from_asset).collect(),
        extra: release.extra,
    }
}
