//
//  klog-sdk
//  cli/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Authentication commands.

use std::io::{self, BufRead};

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::api::resources::{LoginRequest, UserInfoResponse};
use crate::config::TokenBackend;
use crate::interactive::{prompt_confirm_with_default, prompt_input, prompt_password};
use crate::output::{print_field, TableOutput};

use super::{GlobalOptions, Session};

/// Sign in and out
#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Log in and store the token
    Login(LoginArgs),

    /// End the session and forget the token
    Logout(LogoutArgs),

    /// Show whether a token is stored
    Status,

    /// Show the signed-in user
    Whoami,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Username or email
    #[arg(long, short = 'u')]
    pub login: Option<String>,

    /// Read the password from standard input
    #[arg(long)]
    pub password_stdin: bool,
}

#[derive(Args, Debug)]
pub struct LogoutArgs {
    /// Forget the local token even if the server call fails
    #[arg(long)]
    pub force: bool,
}

impl AuthCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AuthSubcommand::Login(args) => login(args, global).await,
            AuthSubcommand::Logout(args) => logout(args, global).await,
            AuthSubcommand::Status => status(global),
            AuthSubcommand::Whoami => whoami(global).await,
        }
    }
}

async fn login(args: &LoginArgs, global: &GlobalOptions) -> Result<()> {
    let session = Session::open(global)?;
    let writer = global.writer();

    if session.sdk.is_authenticated()
        && !args.password_stdin
        && !prompt_confirm_with_default("A token is already stored. Log in again?", false)?
    {
        return Ok(());
    }

    let login = match &args.login {
        Some(login) => login.clone(),
        None => prompt_input("Username or email")?,
    };

    let password = if args.password_stdin {
        read_password_from_stdin()?
    } else {
        prompt_password("Password")?
    };

    if password.is_empty() {
        bail!("Password cannot be empty");
    }

    session
        .sdk
        .auth
        .login(&LoginRequest { login: login.clone(), password })
        .await
        .context("login failed")?;

    if session.config.token_store == TokenBackend::Memory {
        writer.write_warning("token_store is `memory`; the token will be forgotten when klog exits");
    }
    writer.write_success(&format!("Logged in to {} as {}", session.sdk.client().base_url(), login));
    Ok(())
}

async fn logout(args: &LogoutArgs, global: &GlobalOptions) -> Result<()> {
    let session = Session::open(global)?;
    let writer = global.writer();

    if !session.sdk.is_authenticated() {
        writer.write_success("Not logged in");
        return Ok(());
    }

    match session.sdk.auth.logout().await {
        Ok(()) => {}
        Err(e) if args.force => {
            writer.write_warning(&format!("server logout failed ({e}); clearing local token anyway"));
            session.sdk.clear_token();
        }
        Err(e) => return Err(e).context("logout failed; use --force to clear the local token anyway"),
    }

    writer.write_success("Logged out");
    Ok(())
}

#[derive(Debug, Serialize)]
struct AuthStatus {
    base_url: String,
    token_store: String,
    authenticated: bool,
}

impl TableOutput for AuthStatus {
    fn print_table(&self, color: bool) {
        print_field("Server", &self.base_url, color);
        print_field("Token store", &self.token_store, color);
        print_field(
            "Status",
            if self.authenticated { "Logged in" } else { "Not logged in" },
            color,
        );
    }
}

fn status(global: &GlobalOptions) -> Result<()> {
    let session = Session::open(global)?;
    let status = AuthStatus {
        base_url: session.sdk.client().base_url().to_string(),
        token_store: session.config.token_store.to_string(),
        authenticated: session.sdk.is_authenticated(),
    };
    global.writer().write(&status)
}

impl TableOutput for UserInfoResponse {
    fn print_table(&self, color: bool) {
        print_field("ID", &self.id.to_string(), color);
        print_field("Username", &self.username, color);
        print_field("Nickname", &self.nickname, color);
        print_field("Email", &self.email, color);
        if let Some(bio) = self.bio.as_deref().filter(|b| !b.is_empty()) {
            print_field("Bio", bio, color);
        }
    }
}

async fn whoami(global: &GlobalOptions) -> Result<()> {
    let session = Session::open(global)?;
    let me = session.sdk.auth.me().await?;
    global.writer().write(&me)
}

fn read_password_from_stdin() -> Result<String> {
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
