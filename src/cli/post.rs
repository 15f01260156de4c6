//
//  klog-sdk
//  cli/post.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Post commands.

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};

use crate::api::resources::{Post, PostQueryParams, PostStatus, SortOrder};
use crate::interactive::prompt_confirm_with_default;
use crate::output::{format_status, print_field, print_header, write_json, TableOutput, TableRow};
use crate::util::{format_date, truncate};

use super::{GlobalOptions, Session};

/// Browse and manage posts
#[derive(Args, Debug)]
pub struct PostCommand {
    #[command(subcommand)]
    pub command: PostSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PostSubcommand {
    /// List posts
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show a post
    View(ViewArgs),

    /// Delete a post
    Delete(DeleteArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Draft,
    Published,
    Archived,
}

impl From<StatusArg> for PostStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Draft => Self::Draft,
            StatusArg::Published => Self::Published,
            StatusArg::Archived => Self::Archived,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OrderArg {
    Asc,
    Desc,
}

impl From<OrderArg> for SortOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Asc => Self::Asc,
            OrderArg::Desc => Self::Desc,
        }
    }
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Page number (1-based)
    #[arg(long)]
    pub page: Option<u32>,

    /// Posts per page
    #[arg(long, short = 'L')]
    pub limit: Option<u32>,

    /// Only posts in this state
    #[arg(long, short = 's', value_enum)]
    pub status: Option<StatusArg>,

    /// Category slug
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Tag slug
    #[arg(long, short = 't')]
    pub tag: Option<String>,

    /// Field to sort by, e.g. created_at
    #[arg(long)]
    pub sort_by: Option<String>,

    /// Sort direction
    #[arg(long, value_enum)]
    pub order: Option<OrderArg>,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Post ID
    pub id: u64,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Post ID
    pub id: u64,

    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl PostCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            PostSubcommand::List(args) => list(args, global).await,
            PostSubcommand::View(args) => view(args, global).await,
            PostSubcommand::Delete(args) => delete(args, global).await,
        }
    }
}

impl TableRow for Post {
    const HEADERS: &'static [&'static str] = &["ID", "STATUS", "TITLE", "SLUG", "VIEWS", "CREATED"];

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.id.to_string(),
            format_status(&self.status.to_string(), color),
            truncate(&self.title, 50),
            self.slug.clone(),
            self.view_count.to_string(),
            format_date(&self.created_at),
        ]
    }
}

impl TableOutput for Post {
    fn print_table(&self, color: bool) {
        print_header(&format!("{} #{}", self.title, self.id), color);
        print_field("Status", &format_status(&self.status.to_string(), color), color);
        print_field("Slug", &self.slug, color);
        if let Some(author) = &self.author {
            print_field("Author", &author.username, color);
        }
        if let Some(category) = &self.category {
            print_field("Category", &category.name, color);
        }
        if let Some(tags) = self.tags.as_ref().filter(|t| !t.is_empty()) {
            let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
            print_field("Tags", &names.join(", "), color);
        }
        print_field("Views", &self.view_count.to_string(), color);
        if let Some(published) = &self.published_at {
            print_field("Published", published, color);
        }
        print_field("Updated", &self.updated_at, color);

        if !self.content.is_empty() {
            println!();
            println!("{}", "-".repeat(60));
            println!("{}", self.content);
        }
    }
}

async fn list(args: &ListArgs, global: &GlobalOptions) -> Result<()> {
    let session = Session::open(global)?;
    let params = PostQueryParams {
        page: args.page,
        limit: args.limit,
        status: args.status.map(Into::into),
        category: args.category.clone(),
        tag: args.tag.clone(),
        sort_by: args.sort_by.clone(),
        order: args.order.map(Into::into),
        detail: None,
    };

    let page = session.sdk.posts.list(&params).await?;
    let writer = global.writer();

    if writer.is_json() {
        return write_json(&page);
    }

    if page.is_empty() {
        println!("No posts found.");
        return Ok(());
    }

    writer.write_list(&page.data)?;
    println!(
        "Page {} of {} ({} post(s) total)",
        page.page,
        page.total_pages().max(1),
        page.total
    );
    Ok(())
}

async fn view(args: &ViewArgs, global: &GlobalOptions) -> Result<()> {
    let session = Session::open(global)?;
    let post = session.sdk.posts.get(args.id).await?;
    global.writer().write(&post)
}

async fn delete(args: &DeleteArgs, global: &GlobalOptions) -> Result<()> {
    let session = Session::open(global)?;

    if !args.yes && !prompt_confirm_with_default(&format!("Delete post #{}?", args.id), false)? {
        println!("Cancelled.");
        return Ok(());
    }

    session.sdk.posts.delete(args.id).await?;
    global.writer().write_success(&format!("Deleted post #{}", args.id));
    Ok(())
}
