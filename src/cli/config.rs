//! `wfadmin config` — inspect or create the config file.

use crate::cli::GlobalOptions;
use crate::config::{self, Config};
use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::fs;

/// Print the effective configuration. The token is masked.
pub fn run_config_show(globals: &GlobalOptions) -> Result<()> {
    let config = globals.load_config()?;

    println!();
    println!("  {}", "Effective configuration".bold());
    println!();
    println!("  Server:       {}", config.server_url.cyan());
    println!(
        "  Token:        {}",
        match &config.token {
            Some(t) => mask(t),
            None => "(none)".dimmed().to_string(),
        }
    );
    println!("  Timeout:      {}s", config.timeout_secs);
    println!("  Default type: {}", config.default_type);
    println!(
        "  Source:       {}",
        match &config.source {
            Some(path) => path.display().to_string(),
            None => "built-in defaults".dimmed().to_string(),
        }
    );
    println!();
    Ok(())
}

/// Write a config file holding the defaults (plus any flags given).
pub fn run_config_init(globals: &GlobalOptions, force: bool) -> Result<()> {
    let path = match &globals.config {
        Some(p) => p.clone(),
        None => config::default_path()?,
    };
    if path.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite it.",
            path.display()
        );
    }

    // Start from defaults so an unreadable existing file can be replaced.
    let mut effective = Config::default();
    if let Some(url) = &globals.server {
        effective.server_url = url.clone();
    }
    if let Some(secs) = globals.timeout_secs {
        effective.timeout_secs = secs;
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let body = format!(
        "# wfadmin configuration\n# token: <access token with admin scope>\n{}",
        effective.to_yaml(false)?
    );
    fs::write(&path, body)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    println!();
    println!("  {} Wrote {}", "✓".green().bold(), path.display());
    println!();
    Ok(())
}

fn mask(token: &str) -> String {
    let visible: String = token.chars().take(4).collect();
    if token.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{}****", visible)
    }
}
