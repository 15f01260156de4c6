//
//  klog-sdk
//  cli/setting.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Site setting commands.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};

use crate::api::resources::{Setting, SettingBatchRequest, SettingUpsertRequest};
use crate::interactive::prompt_confirm_with_default;
use crate::output::{print_field, TableOutput, TableRow};
use crate::util::truncate;

use super::{GlobalOptions, Session};

/// Read and write site settings
#[derive(Args, Debug)]
pub struct SettingCommand {
    #[command(subcommand)]
    pub command: SettingSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum SettingSubcommand {
    /// List every setting
    #[command(visible_alias = "ls")]
    List,

    /// Show one setting
    Get(GetArgs),

    /// Create or update settings
    Set(SetArgs),

    /// Delete a setting
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct GetArgs {
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// One or more KEY=VALUE pairs; several are written in a single batch
    #[arg(required = true, value_name = "KEY=VALUE")]
    pub pairs: Vec<String>,

    /// Description to store with a single setting
    #[arg(long, short = 'd')]
    pub description: Option<String>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    pub key: String,

    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl SettingCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            SettingSubcommand::List => list(global).await,
            SettingSubcommand::Get(args) => get(args, global).await,
            SettingSubcommand::Set(args) => set(args, global).await,
            SettingSubcommand::Delete(args) => delete(args, global).await,
        }
    }
}

impl TableRow for Setting {
    const HEADERS: &'static [&'static str] = &["KEY", "VALUE", "DESCRIPTION"];

    fn row(&self, _color: bool) -> Vec<String> {
        vec![
            self.key.clone(),
            truncate(&self.value, 60),
            self.description.clone().unwrap_or_default(),
        ]
    }
}

impl TableOutput for Setting {
    fn print_table(&self, color: bool) {
        print_field("Key", &self.key, color);
        print_field("Value", &self.value, color);
        if let Some(description) = &self.description {
            print_field("Description", description, color);
        }
        if let Some(updated) = &self.updated_at {
            print_field("Updated", updated, color);
        }
    }
}

/// Splits `KEY=VALUE`. The value may itself contain `=`.
fn parse_pair(pair: &str) -> Result<SettingUpsertRequest> {
    match pair.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok(SettingUpsertRequest::new(key, value)),
        _ => bail!("expected KEY=VALUE, got `{pair}`"),
    }
}

async fn list(global: &GlobalOptions) -> Result<()> {
    let session = Session::open(global)?;
    let settings = session.sdk.settings.list().await?;
    if settings.is_empty() && !global.json {
        println!("No settings found.");
        return Ok(());
    }
    global.writer().write_list(&settings)
}

async fn get(args: &GetArgs, global: &GlobalOptions) -> Result<()> {
    let session = Session::open(global)?;
    let setting = session.sdk.settings.get(&args.key).await?;
    global.writer().write(&setting)
}

async fn set(args: &SetArgs, global: &GlobalOptions) -> Result<()> {
    let mut requests = args
        .pairs
        .iter()
        .map(|p| parse_pair(p))
        .collect::<Result<Vec<_>>>()?;

    if args.description.is_some() && requests.len() > 1 {
        bail!("--description can only be used with a single KEY=VALUE");
    }

    let session = Session::open(global)?;
    let writer = global.writer();

    if requests.len() == 1 {
        let mut request = requests.remove(0);
        request.description = args.description.clone();
        let setting = session.sdk.settings.upsert(&request).await?;
        writer.write_success(&format!("Set {}", setting.key));
        if writer.is_json() {
            writer.write(&setting)?;
        }
        return Ok(());
    }

    let response = session
        .sdk
        .settings
        .batch_upsert(&SettingBatchRequest { settings: requests })
        .await?;
    writer.write_success(&format!("Set {} setting(s)", response.settings.len()));
    if writer.is_json() {
        writer.write_list(&response.settings)?;
    }
    Ok(())
}

async fn delete(args: &DeleteArgs, global: &GlobalOptions) -> Result<()> {
    let session = Session::open(global)?;

    if !args.yes && !prompt_confirm_with_default(&format!("Delete setting `{}`?", args.key), false)? {
        println!("Cancelled.");
        return Ok(());
    }

    session.sdk.settings.delete(&args.key).await?;
    global.writer().write_success(&format!("Deleted {}", args.key));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pair() {
        let req = parse_pair("site_url=https://x.io/?a=b").unwrap();
        assert_eq!(req.key, "site_url");
        assert_eq!(req.value, "https://x.io/?a=b");
        assert!(parse_pair("novalue").is_err());
        assert!(parse_pair("=value").is_err());
    }
}
