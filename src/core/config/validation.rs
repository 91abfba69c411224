//! Config validation: rules the page generator relies on but JSON parsing cannot express.

use std::sync::OnceLock;

use regex::Regex;

use super::{ConfigError, SiteConfig};

static HEX_COLOR: OnceLock<Regex> = OnceLock::new();

fn hex_color() -> &'static Regex {
    HEX_COLOR.get_or_init(|| {
        Regex::new(r"^#(?:[0-9A-Fa-f]{3}|[0-9A-Fa-f]{6})$").expect("hex color regex is valid")
    })
}

pub(crate) fn validate(config: &SiteConfig) -> Result<(), ConfigError> {
    if config.theme.trim().is_empty() {
        return Err(ConfigError::Validation("theme cannot be empty".to_string()));
    }

    let primary = &config.settings.theme.colors.primary;
    if !hex_color().is_match(primary) {
        return Err(ConfigError::Validation(format!(
            "settings.theme.colors.primary must be a hex color like #00A375, got '{}'",
            primary
        )));
    }

    if config.settings.call_to_action_command.trim().is_empty() {
        return Err(ConfigError::Validation(
            "settings.callToActionCommand cannot be empty".to_string(),
        ));
    }

    for (i, feature) in config.settings.features.iter().enumerate() {
        if feature.title.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "Feature at index {}: title cannot be empty",
                i
            )));
        }
        if feature.image.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "Feature '{}': image cannot be empty",
                feature.title
            )));
        }
    }

    Ok(())
}
