//
//  klog-sdk
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use klog_sdk::cli::{Cli, Commands};
use klog_sdk::{exit_codes, KlogError};

#[tokio::main]
async fn main() {
    init_logging();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_code(&e));
        }
    }
}

/// Initialize logging from `KLOG_DEBUG` (e.g. `KLOG_DEBUG=debug`)
fn init_logging() {
    let filter = EnvFilter::try_from_env("KLOG_DEBUG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Picks the exit code from the first API error in the chain.
fn exit_code(error: &anyhow::Error) -> i32 {
    let Some(api_error) = error.chain().find_map(|e| e.downcast_ref::<KlogError>()) else {
        return exit_codes::ERROR;
    };

    if api_error.is_auth_error() {
        exit_codes::AUTH_ERROR
    } else if api_error.is_not_found_error() {
        exit_codes::NOT_FOUND
    } else if api_error.is_network_error() {
        exit_codes::NETWORK
    } else {
        exit_codes::ERROR
    }
}

/// Main command dispatcher
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Auth(cmd) => cmd.run(&cli.global).await,
        Commands::Post(cmd) => cmd.run(&cli.global).await,
        Commands::Category(cmd) => cmd.run(&cli.global).await,
        Commands::Tag(cmd) => cmd.run(&cli.global).await,
        Commands::Media(cmd) => cmd.run(&cli.global).await,
        Commands::Setting(cmd) => cmd.run(&cli.global).await,
        Commands::Config(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("klog version {}", klog_sdk::VERSION);
            Ok(())
        }
    }
}
