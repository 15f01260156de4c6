//
//  klog-sdk
//  cli/media.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Media commands.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::api::resources::{Media, MediaQueryParams, MediaUploadRequest, MediaUploadResponse};
use crate::interactive::prompt_confirm_with_default;
use crate::output::{print_field, write_json, TableOutput, TableRow};
use crate::util::{format_date, format_size, guess_mime_type, truncate};

use super::{GlobalOptions, Session};

/// Upload and manage media files
#[derive(Args, Debug)]
pub struct MediaCommand {
    #[command(subcommand)]
    pub command: MediaSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum MediaSubcommand {
    /// List uploaded files
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Upload a file
    Upload(UploadArgs),

    /// Delete an uploaded file
    Delete(DeleteArgs),

    /// Print the public URL of a stored file
    Url(UrlArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    #[arg(long, short = 'L', default_value_t = 20)]
    pub limit: u32,
}

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// File to upload
    pub path: PathBuf,

    /// MIME type (guessed from the extension when omitted)
    #[arg(long)]
    pub mime_type: Option<String>,

    /// Send the file base64-encoded in a JSON body instead of multipart
    #[arg(long)]
    pub base64: bool,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Media ID
    pub id: u64,

    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct UrlArgs {
    /// Storage path as returned by `media list`
    pub file_path: String,
}

impl MediaCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            MediaSubcommand::List(args) => list(args, global).await,
            MediaSubcommand::Upload(args) => upload(args, global).await,
            MediaSubcommand::Delete(args) => delete(args, global).await,
            MediaSubcommand::Url(args) => url(args, global),
        }
    }
}

impl TableRow for Media {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "TYPE", "SIZE", "PATH", "CREATED"];

    fn row(&self, _color: bool) -> Vec<String> {
        vec![
            self.id.to_string(),
            truncate(&self.file_name, 40),
            self.mime_type.clone(),
            format_size(self.size),
            self.file_path.clone(),
            format_date(&self.created_at),
        ]
    }
}

impl TableOutput for MediaUploadResponse {
    fn print_table(&self, color: bool) {
        print_field("ID", &self.id.to_string(), color);
        print_field("Name", &self.file_name, color);
        print_field("Type", &self.mime_type, color);
        print_field("Size", &format_size(self.size), color);
        print_field("URL", &self.url, color);
    }
}

async fn list(args: &ListArgs, global: &GlobalOptions) -> Result<()> {
    let session = Session::open(global)?;
    let page = session
        .sdk
        .media
        .list(MediaQueryParams {
            page: args.page,
            limit: args.limit,
        })
        .await?;

    let writer = global.writer();
    if writer.is_json() {
        return write_json(&page);
    }

    if page.is_empty() {
        println!("No media found.");
        return Ok(());
    }

    writer.write_list(&page.data)?;
    println!(
        "Page {} of {} ({} file(s) total)",
        page.page,
        page.total_pages().max(1),
        page.total
    );
    Ok(())
}

async fn upload(args: &UploadArgs, global: &GlobalOptions) -> Result<()> {
    let session = Session::open(global)?;

    let bytes = fs::read(&args.path).with_context(|| format!("failed to read {}", args.path.display()))?;
    let file_name = args
        .path
        .file_name()
        .and_then(|n| n.to_str())
        .context("file name is not valid UTF-8")?
        .to_string();
    let mime_type = args
        .mime_type
        .clone()
        .unwrap_or_else(|| guess_mime_type(&args.path));

    let stored = if args.base64 {
        let request = MediaUploadRequest::from_bytes(&file_name, &mime_type, &bytes);
        session.sdk.media.upload_base64(&request).await?
    } else {
        let pb = if global.json {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(100)
        };
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos:>3}% {msg}")?
                .progress_chars("#>-"),
        );
        pb.set_message(file_name.clone());

        let progress = pb.clone();
        let result = session
            .sdk
            .media
            .upload_file(
                &file_name,
                &mime_type,
                bytes,
                Some(Arc::new(move |percent: u32| progress.set_position(u64::from(percent)))),
            )
            .await;
        pb.finish_and_clear();
        result?
    };

    let writer = global.writer();
    writer.write_success(&format!("Uploaded {file_name}"));
    writer.write(&stored)
}

async fn delete(args: &DeleteArgs, global: &GlobalOptions) -> Result<()> {
    let session = Session::open(global)?;

    if !args.yes && !prompt_confirm_with_default(&format!("Delete media #{}?", args.id), false)? {
        println!("Cancelled.");
        return Ok(());
    }

    session.sdk.media.delete(args.id).await?;
    global.writer().write_success(&format!("Deleted media #{}", args.id));
    Ok(())
}

#[derive(Serialize)]
struct MediaUrl<'a> {
    file_path: &'a str,
    url: String,
}

fn url(args: &UrlArgs, global: &GlobalOptions) -> Result<()> {
    let session = Session::open(global)?;
    let url = session.sdk.media.media_url(&args.file_path);
    global.writer().write_plain(
        &MediaUrl {
            file_path: &args.file_path,
            url: url.clone(),
        },
        &url,
    )
}
