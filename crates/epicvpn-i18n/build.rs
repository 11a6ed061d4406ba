//! Build script for epicvpn-i18n
//!
//! The built-in translation table embeds `locales/*.json`, so every file
//! must parse as an object whose leaves are strings. Key differences
//! between locales are reported as warnings only: the table is allowed to
//! be incomplete.

use std::collections::{BTreeMap, BTreeSet};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use serde_json::Value;

/// Collect dot-joined keys of string leaves
fn collect_keys(prefix: &str, value: &Value, keys: &mut BTreeSet<String>) -> Result<(), String> {
    match value {
        Value::Object(map) => {
            for (name, child) in map {
                let key = if prefix.is_empty() {
                    name.clone()
                } else {
                    format!("{prefix}.{name}")
                };
                collect_keys(&key, child, keys)?;
            }
            Ok(())
        }
        Value::String(_) => {
            keys.insert(prefix.to_string());
            Ok(())
        }
        other => Err(format!("'{prefix}' is not a string: {other}")),
    }
}

/// Validate a single locale file
fn validate_locale_file(path: &Path) -> Result<BTreeSet<String>, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let value: Value = serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;

    if !value.is_object() {
        return Err(format!("{} must contain a JSON object", path.display()));
    }

    let mut keys = BTreeSet::new();
    collect_keys("", &value, &mut keys).map_err(|e| format!("{}: {}", path.display(), e))?;
    Ok(keys)
}

/// Find all locale files
fn find_locale_files() -> Result<BTreeMap<String, PathBuf>, String> {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").map_err(|_| "CARGO_MANIFEST_DIR not set")?;
    let locales_dir = Path::new(&manifest_dir).join("../../locales");

    if !locales_dir.exists() {
        return Err(format!("Locales directory not found: {}", locales_dir.display()));
    }

    let mut locale_files = BTreeMap::new();
    for entry in fs::read_dir(&locales_dir)
        .map_err(|e| format!("Failed to read locales directory: {}", e))?
    {
        let path = entry
            .map_err(|e| format!("Failed to read directory entry: {}", e))?
            .path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        if let Some(code) = path.file_stem().and_then(|stem| stem.to_str()) {
            locale_files.insert(code.to_string(), path.clone());
        }
    }

    if locale_files.is_empty() {
        return Err("No locale files found".to_string());
    }

    Ok(locale_files)
}

fn validate_locales() -> Result<(), String> {
    println!("cargo:rerun-if-changed=../../locales");

    let locale_files = find_locale_files()?;
    let mut all_keys = BTreeMap::new();
    let mut errors = Vec::new();

    for (locale, path) in &locale_files {
        match validate_locale_file(path) {
            Ok(keys) => {
                all_keys.insert(locale.clone(), keys);
            }
            Err(e) => errors.push(e),
        }
    }

    if !errors.is_empty() {
        return Err(errors.join("\n"));
    }

    let union: BTreeSet<&String> = all_keys.values().flatten().collect();
    for (locale, keys) in &all_keys {
        let missing = union.iter().filter(|key| !keys.contains(**key)).count();
        if missing > 0 {
            println!("cargo:warning=locale '{locale}' is missing {missing} keys present in other locales");
        }
    }

    Ok(())
}

fn main() {
    if let Err(e) = validate_locales() {
        eprintln!("Locale validation failed:\n{}", e);
        process::exit(1);
    }
}
