pub mod classify;
pub mod normalize;
pub mod routes;

use anyhow::{Context, Result};
use nexroute::RouterContext;
use std::path::Path;

/// Context from an optional `[router]` TOML file
pub fn load_context(config: Option<&Path>) -> Result<RouterContext> {
    let Some(path) = config else {
        return Ok(RouterContext::new());
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    RouterContext::from_toml_str(&content)
        .with_context(|| format!("Invalid router config in {}", path.display()))
}
