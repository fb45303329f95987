//! CLI administration tool for shortlink.
//!
//! Talks to the same store as the server, through the same service, using the
//! same environment configuration.
//!
//! # Usage
//!
//! ```bash
//! # Create a short link
//! cargo run --bin admin -- shorten https://example.com/some/long/path
//!
//! # Show where a short code points
//! cargo run --bin admin -- resolve k9xZ2aB1
//!
//! # Check store connectivity
//! cargo run --bin admin -- check
//!
//! # Delete expired links from stores without native TTL
//! cargo run --bin admin -- purge-expired
//! ```
//!
//! # Environment Variables
//!
//! See [`shortlink::config`]. `BASE_URL` and `TABLE_NAME` are required.

use shortlink::api::dto::ShortenRequest;
use shortlink::application::services::LinkService;
use shortlink::config::{self, StoreConfig};
use shortlink::error::AppError;
use shortlink::infrastructure::persistence;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use validator::Validate;

/// CLI tool for managing shortlink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a short link
    Shorten {
        /// Long URL (http:// or https://)
        url: String,
    },

    /// Show the long URL behind a short code
    Resolve {
        /// Short code to look up
        code: String,
    },

    /// Check store connection
    Check,

    /// Delete expired links (no-op for stores with native TTL)
    PurgeExpired {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env().context("Invalid configuration")?;

    if config.store == StoreConfig::Memory {
        println!(
            "{}",
            "Warning: STORE_BACKEND=memory, changes are lost when this command exits".yellow()
        );
    }

    let repository = persistence::connect(&config).await?;
    let service = LinkService::new(repository, config.base_url.clone());

    match cli.command {
        Commands::Shorten { url } => shorten(&service, url).await?,
        Commands::Resolve { code } => resolve(&service, &code).await?,
        Commands::Check => check(&service).await?,
        Commands::PurgeExpired { yes } => purge_expired(&service, yes).await?,
    }

    Ok(())
}

/// Creates a short link after the same validation the HTTP API applies.
async fn shorten(service: &LinkService, url: String) -> Result<()> {
    let request = ShortenRequest::new(url.trim());
    request.validate().map_err(AppError::from)?;

    let link = service.create_short_link(request.long_url).await?;

    println!("{}", "Short link created".green().bold());
    println!();
    println!(
        "  Short URL:  {}",
        service.short_url(&link.short_code).bright_yellow().bold()
    );
    println!("  Code:       {}", link.short_code.cyan());
    println!("  Long URL:   {}", link.long_url);
    println!(
        "  Expires at: {}",
        link.expires_at
            .format("%Y-%m-%d %H:%M UTC")
            .to_string()
            .bright_black()
    );
    println!();

    Ok(())
}

async fn resolve(service: &LinkService, code: &str) -> Result<()> {
    match service.resolve(code.trim()).await {
        Ok(link) => {
            println!("  {} -> {}", link.short_code.cyan(), link.long_url);
            println!(
                "  Created {}, expires {}",
                link.created_at.format("%Y-%m-%d %H:%M"),
                link.expires_at.format("%Y-%m-%d %H:%M")
            );
        }
        Err(AppError::NotFound { message }) => {
            println!("{}", message.yellow());
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

async fn check(service: &LinkService) -> Result<()> {
    println!(
        "{}",
        format!("Checking {} store connection...", service.backend()).bright_blue()
    );

    if !service.health_check().await {
        anyhow::bail!("{} store is unreachable", service.backend());
    }

    println!("{}", "Store connection OK".green().bold());
    Ok(())
}

/// Deletes expired links, with confirmation (default: No).
async fn purge_expired(service: &LinkService, skip_confirm: bool) -> Result<()> {
    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete expired links from the {} store?",
                service.backend()
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let removed = service.purge_expired().await?;

    println!(
        "  Removed: {}",
        removed.to_string().bright_green().bold()
    );

    Ok(())
}
