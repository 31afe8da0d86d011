//! CLI administration tool for layered-api.
//!
//! Provides commands for issuing tokens, inspecting users and checking the
//! database without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Issue a bearer token
//! cargo run --bin admin -- token issue alice
//!
//! # List users, optionally by email domain
//! cargo run --bin admin -- users list
//! cargo run --bin admin -- users by-domain example.com
//!
//! # Delete a user
//! cargo run --bin admin -- users delete 6f1c2a7e-0b7d-4d8e-9a51-2f4f1f0c9b11
//!
//! # Check database connection and apply migrations
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see [`layered_api::config`].
//!
//! The admin tool talks to the store directly and does not share the server's
//! cache. With the in-memory cache, servers keep serving cached entries until
//! they expire.

use layered_api::application::dto::UserDto;
use layered_api::application::services::{AuthService, UserService};
use layered_api::config::{self, Config};
use layered_api::infrastructure::cache::NullCache;
use layered_api::infrastructure::persistence::Store;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;
use uuid::Uuid;

/// CLI tool for managing layered-api.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Issue bearer tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Inspect and manage users
    Users {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum TokenAction {
    /// Sign a token for a subject using the configured JWT settings
    Issue {
        /// Token subject
        username: String,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// List all users
    List,

    /// List users whose email belongs to a domain
    ByDomain {
        /// Domain without the `@`, e.g. `example.com`
        domain: String,
    },

    /// Delete a user
    Delete {
        /// User id
        id: Uuid,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection and apply pending migrations
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env().context("Failed to load configuration")?;

    match cli.command {
        Commands::Token { action } => handle_token_action(action, &config)?,
        Commands::Users { action } => handle_user_action(action, &config).await?,
        Commands::Db { action } => handle_db_action(action, &config).await?,
    }

    Ok(())
}

fn handle_token_action(action: TokenAction, config: &Config) -> Result<()> {
    match action {
        TokenAction::Issue { username } => {
            let auth = AuthService::new(
                &config.jwt,
                config.auth_username.clone(),
                config.auth_password.clone(),
            );
            let token = auth
                .issue_token(&username)
                .map_err(|e| anyhow::anyhow!("Failed to issue token: {}", e))?;

            println!("{}", "Token issued".bright_blue().bold());
            println!();
            println!("  Subject: {}", username.cyan());
            println!(
                "  Expires: {} minutes",
                config.jwt.expire_minutes.to_string().bright_white()
            );
            println!();
            println!("{}", token.bright_yellow());
            println!();
            println!("{}", "Example:".bright_white());
            println!(
                "  curl -H \"Authorization: Bearer {}\" http://localhost:3000/users",
                token.bright_yellow()
            );
        }
    }

    Ok(())
}

async fn handle_user_action(action: UserAction, config: &Config) -> Result<()> {
    let store = Store::connect(config).await?;
    let service = UserService::new(
        store.user_repository(),
        Arc::new(NullCache::new()),
        config.cache_ttl(),
    );

    match action {
        UserAction::List => {
            let users = service
                .get_all()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;
            print_users("Users", &users);
        }
        UserAction::ByDomain { domain } => {
            let users = service
                .get_by_email_domain(&domain)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;
            print_users(&format!("Users @{}", domain), &users);
        }
        UserAction::Delete { id, yes } => delete_user(&service, id, yes).await?,
    }

    Ok(())
}

/// Prints users as a table.
///
/// ```text
/// Users
///
///   ID                                    Name                      Email
///   ──────────────────────────────────────────────────────────────────────────────────
///   6f1c2a7e-0b7d-4d8e-9a51-2f4f1f0c9b11  Ada Lovelace              ada@example.com
/// ```
fn print_users(title: &str, users: &[UserDto]) {
    println!("{}", title.bright_blue().bold());
    println!();

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        return;
    }

    println!(
        "  {:<37} {:<25} {}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Email".bright_white().bold()
    );
    println!("  {}", "─".repeat(90).bright_black());

    for user in users {
        println!(
            "  {:<37} {:<25} {}",
            user.id.to_string().bright_black(),
            user.full_name.cyan(),
            user.email
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
}

async fn delete_user(service: &UserService, id: Uuid, skip_confirm: bool) -> Result<()> {
    let user = service
        .get_by_id(id)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("User not found")?;

    println!("  User:  {}", user.full_name.cyan());
    println!("  Email: {}", user.email);
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this user?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let deleted = service
        .delete(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete user: {}", e))?;

    if deleted {
        println!("{}", "User deleted".green().bold());
    } else {
        println!("{}", "User was already gone".yellow());
    }

    Ok(())
}

async fn handle_db_action(action: DbAction, config: &Config) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            let store = Store::connect(config).await?;
            store
                .ping()
                .await
                .map_err(|e| anyhow::anyhow!("Database ping failed: {}", e))?;

            println!(
                "{} {} store reachable, migrations applied",
                "OK".green().bold(),
                store.kind()
            );
        }
    }

    Ok(())
}
