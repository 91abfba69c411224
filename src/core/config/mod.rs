//! Landing page configuration: theme, copy, features, and analytics identifiers.
//!
//! Defaults are the balena-engine page from `config/landr.json` (embedded at compile time).
//! A JSON file with the same shape replaces them entirely; analytics identifiers can also
//! come from the environment so tokens stay out of the file.

mod validation;


use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::paths;

const BUNDLED_CONFIG: &str = include_str!("../../../config/landr.json");

/// Environment variables overriding `settings.analytics`, in field order.
pub const ENV_MIXPANEL_TOKEN: &str = "LANDR_MIXPANEL_TOKEN";
pub const ENV_GOSQUARED_ID: &str = "LANDR_GOSQUARED_ID";
pub const ENV_GA_SITE: &str = "LANDR_GA_SITE";
pub const ENV_GA_ID: &str = "LANDR_GA_ID";

/// Top-level configuration object handed to the page generator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Theme module identifier, e.g. "landr-theme-basic".
    pub theme: String,
    pub settings: Settings,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub lead: String,
    #[serde(default)]
    pub analytics: Analytics,
    pub theme: ThemeSettings,
    /// Shown to visitors, never executed.
    pub call_to_action_command: String,
    #[serde(default)]
    pub features: Vec<Feature>,
    /// HTML-bearing paragraphs.
    #[serde(default)]
    pub motivation: Vec<String>,
}

/// Analytics provider identifiers. Empty strings mean "disabled".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Analytics {
    pub mixpanel_token: String,
    pub gosquared_id: String,
    pub ga_site: String,
    pub ga_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeSettings {
    pub colors: Colors,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Colors {
    /// Hex color, `#RGB` or `#RRGGBB`.
    pub primary: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub title: String,
    pub image: String,
    pub description: String,
}

/// Error loading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid JSON in {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid config: {0}")]
    Validation(String),
}

/// Parse and validate a configuration document. `origin` names it in error messages.
pub fn parse(json: &str, origin: &str) -> Result<SiteConfig, ConfigError> {
    let config: SiteConfig = serde_json::from_str(json).map_err(|source| ConfigError::Json {
        origin: origin.to_string(),
        source,
    })?;
    validation::validate(&config)?;
    Ok(config)
}

/// The built-in balena-engine configuration.
pub fn bundled() -> Result<SiteConfig, ConfigError> {
    parse(BUNDLED_CONFIG, "bundled landr.json")
}

/// Read a configuration file from disk.
pub fn from_file(path: &Path) -> Result<SiteConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content, &path.display().to_string())
}

/// File that replaces the bundled defaults: `explicit` if given, else the user config file
/// when it exists. `None` means the bundled configuration is used.
pub fn override_path(explicit: Option<&Path>) -> Option<PathBuf> {
    resolve_override(explicit, paths::config_file())
}

fn resolve_override(explicit: Option<&Path>, user_file: Option<PathBuf>) -> Option<PathBuf> {
    match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => user_file.filter(|p| p.is_file()),
    }
}

/// Overwrite analytics identifiers with non-empty values returned by `lookup`.
pub fn apply_analytics_overrides<F>(analytics: &mut Analytics, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let fields = [
        (ENV_MIXPANEL_TOKEN, &mut analytics.mixpanel_token),
        (ENV_GOSQUARED_ID, &mut analytics.gosquared_id),
        (ENV_GA_SITE, &mut analytics.ga_site),
        (ENV_GA_ID, &mut analytics.ga_id),
    ];
    for (key, field) in fields {
        if let Some(value) = lookup(key).map(|v| v.trim().to_string())
            && !value.is_empty()
        {
            log::debug!("Analytics override from {}", key);
            *field = value;
        }
    }
}

/// Load the effective configuration: bundled defaults or an override file,
/// then analytics identifiers from the environment.
pub fn load(explicit: Option<&Path>) -> Result<SiteConfig, ConfigError> {
    let mut config = match override_path(explicit) {
        Some(path) => {
            log::info!("Loading config from {}", path.display());
            from_file(&path)?
        }
        None => bundled()?,
    };
    apply_analytics_overrides(&mut config.settings.analytics, |key| env::var(key).ok());
    Ok(config)
}
