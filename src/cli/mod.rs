//
//  klog-sdk
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Command-line interface for the `klog` binary.
//!
//! Every command builds a [`Klog`] from the global options and the config
//! file through [`Session::open`], then calls one or two SDK methods.

mod auth;
mod config;
mod media;
mod post;
mod setting;
mod taxonomy;

pub use auth::AuthCommand;
pub use config::ConfigCommand;
pub use media::MediaCommand;
pub use post::PostCommand;
pub use setting::SettingCommand;
pub use taxonomy::{CategoryCommand, TagCommand};

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::output::{OutputFormat, OutputWriter};
use crate::sdk::{Klog, KlogConfig};

#[derive(Parser, Debug)]
#[command(
    name = "klog",
    version,
    about = "Work with a KLog blog from the command line",
    long_about = "klog talks to a KLog server: sign in, browse posts, manage media and settings.\n\n\
                  Point it at a server with --base-url, KLOG_BASE_URL, or `klog config set base_url <url>`.",
    propagate_version = true,
    after_help = "Use 'klog <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// KLog server address (overrides the config file)
    #[arg(long, global = true, env = "KLOG_BASE_URL")]
    pub base_url: Option<String>,

    /// Path to an alternative config file
    #[arg(long, global = true, env = "KLOG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,
}

impl GlobalOptions {
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Config::config_path(),
        }
    }

    pub fn load_config(&self) -> Result<Config> {
        Config::load_from(&self.config_path()?)
    }

    pub fn writer(&self) -> OutputWriter {
        OutputWriter::new(OutputFormat::from_json_flag(self.json))
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and out
    Auth(AuthCommand),

    /// Browse and manage posts
    Post(PostCommand),

    /// List categories
    Category(CategoryCommand),

    /// List tags
    Tag(TagCommand),

    /// Upload and manage media files
    Media(MediaCommand),

    /// Read and write site settings
    Setting(SettingCommand),

    /// Manage the klog configuration file
    Config(ConfigCommand),

    /// Show version information
    Version,
}

/// An SDK instance built from the command line and config file.
pub struct Session {
    pub sdk: Klog,
    pub config: Config,
}

impl Session {
    /// Builds the SDK.
    ///
    /// The base URL comes from `--base-url`/`KLOG_BASE_URL`, then the config
    /// file. The token store backend and timeout come from the config file.
    pub fn open(global: &GlobalOptions) -> Result<Self> {
        let config = global.load_config()?;

        let base_url = global
            .base_url
            .clone()
            .or_else(|| config.base_url.clone())
            .context("no KLog server configured; pass --base-url or run `klog config set base_url <url>`")?;

        let sdk = Klog::new(
            KlogConfig::new(base_url)
                .timeout(config.timeout())
                .shared_token_store(config.token_store.build())
                .on_token_expired(|| {
                    tracing::warn!("session expired or token rejected; run `klog auth login`");
                }),
        )?;

        Ok(Self { sdk, config })
    }
}
