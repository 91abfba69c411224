//! Build script: validates the bundled landr.json at compile time.

use std::path::PathBuf;

fn main() {
    let manifest_dir =
        std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR set by Cargo");
    let config_path: PathBuf = [&manifest_dir, "config", "landr.json"].iter().collect();
    println!("cargo:rerun-if-changed={}", config_path.display());

    let json = std::fs::read_to_string(&config_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read {}: {}. landr.json must exist and be valid.",
            config_path.display(),
            e
        )
    });

    #[derive(serde::Deserialize)]
    #[allow(dead_code)]
    struct FeatureEntry {
        title: String,
        image: String,
        description: String,
    }
    #[derive(serde::Deserialize)]
    #[allow(dead_code)]
    struct ColorsEntry {
        primary: String,
    }
    #[derive(serde::Deserialize)]
    #[allow(dead_code)]
    struct ThemeEntry {
        colors: ColorsEntry,
    }
    #[derive(serde::Deserialize)]
    #[allow(dead_code)]
    #[serde(rename_all = "camelCase")]
    struct AnalyticsEntry {
        mixpanel_token: String,
        gosquared_id: String,
        ga_site: String,
        ga_id: String,
    }
    #[derive(serde::Deserialize)]
    #[allow(dead_code)]
    #[serde(rename_all = "camelCase")]
    struct SettingsEntry {
        lead: String,
        analytics: AnalyticsEntry,
        theme: ThemeEntry,
        call_to_action_command: String,
        features: Vec<FeatureEntry>,
        motivation: Vec<String>,
    }
    #[derive(serde::Deserialize)]
    #[allow(dead_code)]
    struct LandrEntry {
        theme: String,
        settings: SettingsEntry,
    }

    let _: LandrEntry = serde_json::from_str(&json).unwrap_or_else(|e| {
        panic!(
            "landr.json is invalid JSON: {}. Fix the file and rebuild.",
            e
        )
    });
}
