//! Stored-animation JSON fixtures shared by tests and benches.
//!
//! Fixtures live in `<workspace>/fixtures` and are addressed by the names in
//! `fixtures/manifest.json`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    animations: BTreeMap<String, String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn relative_path(name: &str) -> Result<&'static str> {
    MANIFEST
        .animations
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("unknown animation fixture '{name}'"))
}

/// Fixture names in sorted order.
pub fn names() -> Vec<&'static str> {
    MANIFEST.animations.keys().map(String::as_str).collect()
}

pub fn path(name: &str) -> Result<PathBuf> {
    Ok(fixtures_root().join(relative_path(name)?))
}

/// Raw JSON text of a fixture.
pub fn json(name: &str) -> Result<String> {
    let path = path(name)?;
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

/// Fixture parsed into any serde type (e.g. `serde_json::Value`).
pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
    let text = json(name)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture '{name}'"))
}
