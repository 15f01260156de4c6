//
//  klog-sdk
//  cli/taxonomy.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Category and tag commands.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::resources::{Category, Tag};
use crate::output::TableRow;

use super::{GlobalOptions, Session};

/// List categories
#[derive(Args, Debug)]
pub struct CategoryCommand {
    #[command(subcommand)]
    pub command: CategorySubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CategorySubcommand {
    /// List every category
    #[command(visible_alias = "ls")]
    List,
}

/// List tags
#[derive(Args, Debug)]
pub struct TagCommand {
    #[command(subcommand)]
    pub command: TagSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum TagSubcommand {
    /// List every tag
    #[command(visible_alias = "ls")]
    List,
}

impl TableRow for Category {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "SLUG", "DESCRIPTION"];

    fn row(&self, _color: bool) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.slug.clone(),
            self.description.clone().unwrap_or_default(),
        ]
    }
}

impl TableRow for Tag {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "SLUG"];

    fn row(&self, _color: bool) -> Vec<String> {
        vec![self.id.to_string(), self.name.clone(), self.slug.clone()]
    }
}

impl CategoryCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            CategorySubcommand::List => {
                let session = Session::open(global)?;
                let categories = session.sdk.categories.list().await?;
                if categories.is_empty() && !global.json {
                    println!("No categories found.");
                    return Ok(());
                }
                global.writer().write_list(&categories)
            }
        }
    }
}

impl TagCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            TagSubcommand::List => {
                let session = Session::open(global)?;
                let tags = session.sdk.tags.list().await?;
                if tags.is_empty() && !global.json {
                    println!("No tags found.");
                    return Ok(());
                }
                global.writer().write_list(&tags)
            }
        }
    }
}
