use anyhow::{Context, Result};
use mathrun_sim::{Profile, ProfileCatalog};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Load a profile catalog from `path`, or fall back to the built-in list.
pub fn load_catalog<P>(path: Option<&Path>, builtin: fn() -> Vec<P>) -> Result<ProfileCatalog<P>>
where
    P: Profile + DeserializeOwned,
{
    let Some(path) = path else {
        return ProfileCatalog::new(builtin()).context("built-in profile catalog is invalid");
    };

    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read profiles from {}", path.display()))?;
    let catalog = ProfileCatalog::from_json(&json)
        .with_context(|| format!("invalid profile catalog {}", path.display()))?;
    log::warn!(
        "using {} profile override(s) from {}",
        catalog.len(),
        path.display()
    );
    Ok(catalog)
}
