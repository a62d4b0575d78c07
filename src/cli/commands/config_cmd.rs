//! Configuration management commands.

use console::style;

use typewriter::config::Config;

use crate::cli::icons::dim_arrow;

/// Show the effective configuration.
pub fn cmd_config_show(config: &Config) -> anyhow::Result<()> {
    let source = config
        .source_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());

    eprintln!("{} Source: {}", dim_arrow(), style(source).cyan());
    print!("{}", config.to_toml()?);
    Ok(())
}
