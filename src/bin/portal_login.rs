//! Terminal login client for the staff portal.
//!
//! Runs the same form state machine as the login page, against a live
//! authentication endpoint, and keeps the session in a JSON file instead of
//! browser storage.
//!
//! # Usage
//!
//! ```bash
//! # Sign in as an employee, prompting for email and password
//! cargo run --bin portal-login -- login
//!
//! # Sign in as an admin and remember the email for next time
//! cargo run --bin portal-login -- login --role admin --email a@b.com --remember
//!
//! # Sign in and forget a previously remembered email
//! cargo run --bin portal-login -- login --no-remember
//!
//! # Show the stored session
//! cargo run --bin portal-login -- session
//!
//! # Probe a gateway
//! cargo run --bin portal-login -- check --base http://localhost:5000
//! ```
//!
//! # Environment Variables
//!
//! - `PORTAL_LOGIN_ENDPOINT`: login endpoint (default `http://localhost:5000/api/auth/login`)
//! - `PORTAL_SESSION_FILE`: session file (default `.portal-session.json`)

use staff_portal::client::{
    FileStorage, HttpAuthClient, LoginForm, Redirect, SessionRecord, SubmitOutcome,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use std::path::{Path, PathBuf};
use url::Url;

/// CLI client for the staff portal login flow.
#[derive(Parser)]
#[command(name = "portal-login")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Session file used as client storage
    #[arg(long, env = "PORTAL_SESSION_FILE", default_value = ".portal-session.json")]
    session_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session
    Login {
        /// Authentication endpoint
        #[arg(
            long,
            env = "PORTAL_LOGIN_ENDPOINT",
            default_value = "http://localhost:5000/api/auth/login"
        )]
        endpoint: Url,

        /// Role to sign in as (admin or employee)
        #[arg(short, long, default_value = "employee")]
        role: String,

        /// Email (prompted when omitted)
        #[arg(short, long)]
        email: Option<String>,

        /// Remember the email for the next login
        #[arg(long, overrides_with = "no_remember")]
        remember: bool,

        /// Forget any remembered email (asked interactively when neither flag is set)
        #[arg(long, overrides_with = "remember")]
        no_remember: bool,
    },

    /// Show the stored session
    Session,

    /// Probe a gateway's liveness and readiness routes
    Check {
        /// Gateway base URL
        #[arg(long, default_value = "http://localhost:5000")]
        base: Url,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Login {
            endpoint,
            role,
            email,
            remember,
            no_remember,
        } => {
            let remember = remember_flag(remember, no_remember);
            handle_login(&cli.session_file, endpoint, &role, email, remember).await?
        }
        Commands::Session => handle_session(&cli.session_file)?,
        Commands::Check { base } => handle_check(&base).await?,
    }

    Ok(())
}

/// `Some` when the remember-me choice was given on the command line.
fn remember_flag(remember: bool, no_remember: bool) -> Option<bool> {
    match (remember, no_remember) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

/// Runs one submission.
///
/// # Flow
///
/// 1. Restore remembered email from the session file
/// 2. Apply role (unknown values are ignored), email and remember-me
/// 3. Prompt for missing fields
/// 4. Submit once and report the outcome
async fn handle_login(
    session_file: &Path,
    endpoint: Url,
    role: &str,
    email: Option<String>,
    remember: Option<bool>,
) -> Result<()> {
    println!("{}", "Staff Portal Login".bright_blue().bold());
    println!();

    let mut storage = FileStorage::open(session_file)
        .with_context(|| format!("Failed to open {}", session_file.display()))?;

    let mut form = LoginForm::restore(&storage);

    if !form.select_role(role) {
        println!(
            "{}",
            format!("Unknown role '{}', keeping '{}'", role, form.role()).yellow()
        );
    }

    match email {
        Some(email) => form.set_email(email),
        None => {
            let email: String = Input::new()
                .with_prompt("Email")
                .with_initial_text(form.email())
                .interact_text()?;
            form.set_email(email);
        }
    }

    form.set_password(Password::new().with_prompt("Password").interact()?);

    let remember = match remember {
        Some(remember) => remember,
        None => Confirm::new()
            .with_prompt("Remember email")
            .default(form.remember_me())
            .interact()?,
    };
    form.set_remember_me(remember);

    println!();
    println!("  Role:     {}", form.role().to_string().cyan());
    println!("  Email:    {}", form.email().cyan());
    println!("  Endpoint: {}", endpoint.as_str().bright_black());
    println!();
    println!("{}", "Signing in...".bright_black());

    let client = HttpAuthClient::new(endpoint);

    match form.submit(&client, &mut storage).await {
        SubmitOutcome::Redirect(redirect) => print_success(redirect, &storage),
        SubmitOutcome::Failed(message) => {
            println!("{}", message.red().bold());
            std::process::exit(1);
        }
        SubmitOutcome::Blocked(e) => anyhow::bail!(e),
    }

    Ok(())
}

fn print_success(redirect: Redirect, storage: &FileStorage) {
    println!();
    println!("{}", "Signed in".green().bold());
    println!("  Landing page: {}", redirect.target().bright_white());
    println!(
        "  Session saved to {}",
        storage.path().display().to_string().bright_black()
    );
    println!();
}

/// Prints the stored session, hiding most of the token.
fn handle_session(session_file: &Path) -> Result<()> {
    let storage = FileStorage::open(session_file)
        .with_context(|| format!("Failed to open {}", session_file.display()))?;

    match SessionRecord::load(&storage) {
        Some(record) => {
            println!("{}", "Stored session".bright_blue().bold());
            println!();
            println!("  Token:  {}", mask_token(&record.token).bright_yellow());
            println!("  Role:   {}", record.user_role.to_string().cyan());
            if let Some(email) = record.remembered_email {
                println!("  Email:  {}", email.cyan());
            }
            println!();
        }
        None => {
            println!("{}", "No session stored".yellow());
        }
    }

    Ok(())
}

/// Queries `GET /` and `GET /health`.
async fn handle_check(base: &Url) -> Result<()> {
    println!("{}", "Checking gateway...".bright_blue());

    let client = reqwest::Client::new();

    let live = client
        .get(base.join("/")?)
        .send()
        .await
        .context("Gateway unreachable")?;
    let live_ok = live.status().is_success();
    let live_body = live.text().await.unwrap_or_default();
    println!(
        "  Liveness:  {} {}",
        status_label(live_ok),
        live_body.bright_black()
    );

    let ready = client.get(base.join("/health")?).send().await?;
    let ready_ok = ready.status().is_success();
    println!("  Readiness: {}", status_label(ready_ok));

    if !(live_ok && ready_ok) {
        std::process::exit(1);
    }

    Ok(())
}

fn status_label(ok: bool) -> ColoredString {
    if ok { "OK".green().bold() } else { "FAIL".red().bold() }
}

fn mask_token(token: &str) -> String {
    let visible: String = token.chars().take(6).collect();
    if token.chars().count() > 6 {
        format!("{}...", visible)
    } else {
        visible
    }
}
