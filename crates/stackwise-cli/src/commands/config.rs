//! Config command implementation

use anyhow::{Context, Result};
use stackwise_core::config::default_config_path;
use stackwise_core::EngineConfig;

pub fn cmd_config(config: &EngineConfig) -> Result<()> {
    if let Some(path) = default_config_path() {
        let state = if path.exists() { "active" } else { "not present" };
        println!("# Override: {} ({})", path.display(), state);
    }
    println!("{}", config.to_toml().context("Failed to render config")?);
    Ok(())
}
