//! EcoConnect CLI
//!
//! Maintenance commands for the booking database.
//!
//! ```sh
//! # Create or upgrade the schema
//! ecoconnect migrate
//!
//! # Demo account, provider and calendar (safe to repeat)
//! ecoconnect seed
//!
//! # Browse providers
//! ecoconnect providers --category solar --location wind --page 2
//!
//! # Show the effective configuration
//! ecoconnect --config ./config.toml check
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use ecoconnect::application::{seed_demo_data, DeliveryMode};
use ecoconnect::config::AppConfig;
use ecoconnect::domain::{Category, ProviderFilter};
use ecoconnect::shared::AppError;
use ecoconnect::{AppContext, AppOptions};

/// EcoConnect: eco-service providers, availability and bookings.
#[derive(Parser, Debug)]
#[command(
    name = "ecoconnect",
    version,
    about = "EcoConnect booking core maintenance tool",
    long_about = "EcoConnect: provider directory, availability calendar and bookings.\n\n\
                  Default config: <config dir>/ecoconnect/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "ECOCONNECT_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Override the database URL.
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply pending database migrations.
    Migrate,
    /// Create the demo user and provider, and reset its calendar.
    Seed,
    /// List providers, newest first.
    Providers {
        /// Service category (solar, insulation, compost, rainwater).
        #[arg(long)]
        category: Option<Category>,
        /// Case-insensitive substring of the location.
        #[arg(long)]
        location: Option<String>,
        /// 1-based page number.
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        page: i64,
    },
    /// Print the effective configuration and exit.
    Check,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(ecoconnect::default_config_path);

    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(ref url) = cli.database_url {
        config.database.url = url.clone();
    }
    // A short-lived process must not exit before mail goes out.
    config.mail.delivery = DeliveryMode::Inline;

    ecoconnect::logging::init(&config.logging);
    if let Some(e) = load_error {
        error!("Failed to load config from {}: {}", config_path.display(), e);
        error!("Using default configuration.");
    }

    match cli.command {
        Command::Check => {
            println!("Configuration is valid");
            println!("   Config file : {}", config_path.display());
            println!("   Database    : {}", config.database.url);
            println!("   Log level   : {}", config.logging.level);
            println!("   Media root  : {}", config.media.root.display());
            println!();
            print!("{}", config.to_toml()?);
        }
        Command::Migrate => {
            AppContext::start(AppOptions {
                config,
                auto_migrate: true,
            })
            .await?;
            info!("Database is up to date");
        }
        Command::Seed => {
            let ctx = AppContext::start(AppOptions {
                config,
                auto_migrate: true,
            })
            .await?;
            let report = seed_demo_data(ctx.repos.as_ref(), &ctx.hasher, ctx.clock.as_ref()).await?;
            println!(
                "Seeded demo data: user '{}', provider #{} '{}', {} available dates",
                report.user.username,
                report.provider.id,
                report.provider.name,
                report.dates.len()
            );
        }
        Command::Providers {
            category,
            location,
            page,
        } => {
            let ctx = AppContext::start(AppOptions {
                config,
                auto_migrate: true,
            })
            .await?;
            let filter = ProviderFilter::new(category, location.as_deref());
            let result = ctx.listing.list_providers(&filter, page).await?;

            println!(
                "Page {} of {} ({} providers)",
                result.page, result.total_pages, result.total
            );
            for p in &result.items {
                println!("#{:<5} {:<30} {:<12} {}", p.id, p.name, p.category.label(), p.location);
                if !p.price_note.is_empty() {
                    println!("       {}", p.price_note);
                }
            }
        }
    }

    Ok(())
}
