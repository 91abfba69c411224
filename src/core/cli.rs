//! CLI commands: enrich releases, label asset names, show configuration.
//!
//! These produce plain text or JSON on stdout; diagnostics go through `log` to stderr.

use std::fs;
use std::io;
use std::path::Path;

use serde_json::Value;

use crate::core::config::{self, SiteConfig};
use crate::core::middleware::{Action, Context, Pipeline};
use crate::core::paths;
use crate::core::release::{Asset, EnrichedAsset};

/// Read a document from `input`, where "-" means stdin.
fn read_input(input: &str) -> io::Result<String> {
    if input == "-" {
        io::read_to_string(io::stdin())
    } else {
        fs::read_to_string(input)
    }
}

/// Run each item of `document` (or the document itself) through the landr pipeline.
///
/// Items are releases wrapped as `ADD_RELEASE` actions, or full action envelopes when
/// `as_actions` is set. Releases come back as enriched payloads, envelopes as actions.
pub fn enrich_document(
    config: &SiteConfig,
    document: Value,
    as_actions: bool,
) -> Result<Value, Box<dyn std::error::Error>> {
    let pipeline = Pipeline::landr();
    let ctx = Context { config };
    log::debug!("Dispatching through {} middleware", pipeline.len());

    let dispatch_one = |item: Value| -> Result<Value, Box<dyn std::error::Error>> {
        if as_actions {
            let action: Action = serde_json::from_value(item)?;
            Ok(serde_json::to_value(pipeline.dispatch(&ctx, action)?)?)
        } else {
            let action = pipeline.dispatch(&ctx, Action::add_release(item))?;
            Ok(action.payload)
        }
    };

    match document {
        Value::Array(items) => {
            log::info!("Processing {} item(s)", items.len());
            items
                .into_iter()
                .map(dispatch_one)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array)
        }
        item => dispatch_one(item),
    }
}

/// Run the `enrich` command: read releases (or actions) and print the pipeline output.
pub fn run_enrich(
    config: &SiteConfig,
    input: &str,
    as_actions: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(input).map_err(|e| format!("Failed to read {}: {}", input, e))?;
    let document: Value = serde_json::from_str(&text)?;
    let output = enrich_document(config, document, as_actions)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// One `name<TAB>arch<TAB>prettyName` line for an asset filename.
pub fn arch_line(name: &str) -> String {
    let enriched = EnrichedAsset::from_asset(&Asset::new(name));
    if enriched.arch.is_unknown() {
        log::warn!("No architecture recognized in '{}'", name);
    }
    format!("{}\t{}\t{}", name, enriched.arch, enriched.pretty_name)
}

/// Run the `arch` command: label each asset filename.
pub fn run_arch(names: &[String]) {
    for name in names {
        println!("{}", arch_line(name));
    }
}

/// Run the `config` command: print the effective configuration, or where it comes from.
pub fn run_config(
    explicit: Option<&Path>,
    show_paths: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if show_paths {
        let config_file = paths::config_file()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "-".to_string());
        let cache_dir = paths::cache_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "-".to_string());
        let source = config::override_path(explicit)
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "bundled".to_string());

        println!("Config file:  {}", config_file);
        println!("Cache:        {}", cache_dir);
        println!("Active:       {}", source);
        println!(
            "Analytics:    {}, {}, {}, {}",
            config::ENV_MIXPANEL_TOKEN,
            config::ENV_GOSQUARED_ID,
            config::ENV_GA_SITE,
            config::ENV_GA_ID
        );
        return Ok(());
    }

    let site = config::load(explicit)?;
    println!("{}", serde_json::to_string_pretty(&site)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::core::middleware::ADD_RELEASE;

    fn site() -> SiteConfig {
        config::bundled().unwrap()
    }

    #[test]
    fn enrich_single_release() {
        let out = enrich_document(
            &site(),
            json!({ "assets": [{ "name": "x-amd64.tar.gz" }] }),
            false,
        )
        .unwrap();
        assert_eq!(out["assets"][0]["prettyName"], "Balena for x86");
    }

    #[test]
    fn enrich_release_list() {
        let out = enrich_document(
            &site(),
            json!([
                { "tag_name": "v1", "assets": [{ "name": "a-386.tgz" }] },
                { "tag_name": "v2", "assets": [] }
            ]),
            false,
        )
        .unwrap();
        let releases = out.as_array().unwrap();
        assert_eq!(releases.len(), 2);
        assert_eq!(releases[0]["assets"][0]["arch"], "i386");
        assert_eq!(releases[1]["assets"], json!([]));
    }

    #[test]
    fn enrich_action_envelopes() {
        let out = enrich_document(
            &site(),
            json!([
                { "type": ADD_RELEASE, "payload": { "assets": [{ "name": "a-arm64" }] } },
                { "type": "SET_TITLE", "payload": "hello" }
            ]),
            true,
        )
        .unwrap();
        assert_eq!(out[0]["payload"]["assets"][0]["arch"], json!(["arm64"]));
        assert_eq!(out[1], json!({ "type": "SET_TITLE", "payload": "hello" }));
    }

    #[test]
    fn enrich_reports_malformed_release() {
        let err = enrich_document(&site(), json!({ "tag_name": "v1" }), false).unwrap_err();
        assert!(err.to_string().contains("ADD_RELEASE payload is not a release"));
    }

    #[test]
    fn arch_line_format() {
        assert_eq!(
            arch_line("balena-engine-amd64.tar.gz"),
            "balena-engine-amd64.tar.gz\tx86\tBalena for x86"
        );
        assert_eq!(
            arch_line("readme.txt"),
            "readme.txt\tundefined\tBalena for undefined"
        );
    }
}
