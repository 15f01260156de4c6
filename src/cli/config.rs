//
//  klog-sdk
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI configuration commands
//!
//! Reads and writes the keys of the `klog` config file. These commands never
//! contact the server.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;

use crate::config::CONFIG_KEYS;

use super::GlobalOptions;

/// Manage the klog configuration file
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Print a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Print the configuration file path
    Path,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// One of base_url, timeout_ms, token_store
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// One of base_url, timeout_ms, token_store
    pub key: String,

    pub value: String,
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Get(args) => get(args, global),
            ConfigSubcommand::Set(args) => set(args, global),
            ConfigSubcommand::Path => path(global),
        }
    }
}

fn get(args: &GetArgs, global: &GlobalOptions) -> Result<()> {
    if !CONFIG_KEYS.contains(&args.key.as_str()) {
        bail!(
            "Unknown configuration key '{}'. Valid keys: {}",
            args.key,
            CONFIG_KEYS.join(", ")
        );
    }

    let config = global.load_config()?;
    let value = config.get(&args.key);

    let result = serde_json::json!({
        "key": args.key,
        "value": value,
    });
    global
        .writer()
        .write_plain(&result, value.as_deref().unwrap_or(""))
}

fn set(args: &SetArgs, global: &GlobalOptions) -> Result<()> {
    let path = global.config_path()?;
    let mut config = global.load_config()?;
    config.set(&args.key, &args.value)?;
    config.save_to(&path)?;

    if global.json {
        let result = serde_json::json!({
            "success": true,
            "key": args.key,
            "value": config.get(&args.key),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "{} Set {} = {}",
            style("✓").green(),
            style(&args.key).cyan(),
            args.value
        );
    }

    Ok(())
}

fn path(global: &GlobalOptions) -> Result<()> {
    let path = global.config_path()?;
    let display = path.display().to_string();
    global
        .writer()
        .write_plain(&serde_json::json!({ "path": display }), &display)
}
