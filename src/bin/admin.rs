//! CLI administration tool for car-rental.
//!
//! Provides commands for inspecting the fleet, registering cars, and
//! performing database operations without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Apply pending migrations
//! cargo run --bin admin -- db migrate
//!
//! # View record counts
//! cargo run --bin admin -- stats
//!
//! # Which cars are free on a date
//! cargo run --bin admin -- availability --date 2024-03-15 --rules strict
//!
//! # Register a car interactively
//! cargo run --bin admin -- car add
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `BOOKING_RULES` (optional): default rule set for `availability`

use car_rental::application::services::AvailabilityService;
use car_rental::domain::availability::CarFilter;
use car_rental::domain::booking::BookingRules;
use car_rental::domain::clock::{Clock, FixedClock, SystemClock};
use car_rental::domain::entities::NewCar;
use car_rental::domain::repositories::CarRepository;
use car_rental::infrastructure::cache::NullCache;
use car_rental::infrastructure::persistence::{PgCarRepository, PgReservationRepository};
use car_rental::utils::dates::parse_date;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::mpsc;

/// CLI tool for managing car-rental.
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
    /// Show record counts
    Stats,

    /// Show which cars are free on a date
    Availability {
        /// Target date, YYYY-MM-DD (default: today)
        #[arg(short, long)]
        date: Option<String>,

        /// Rule set: legacy or strict (default: BOOKING_RULES or strict)
        #[arg(short, long)]
        rules: Option<String>,
    },

    /// Manage cars
    Car {
        #[command(subcommand)]
        action: CarAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Car management subcommands.
#[derive(Subcommand)]
enum CarAction {
    /// Register a new car
    Add {
        /// Registration plate, e.g. "KA-01-AB-1234"
        #[arg(long)]
        vehicle_number: Option<String>,

        /// Model name
        #[arg(long)]
        model: Option<String>,

        /// Seating capacity
        #[arg(long)]
        capacity: Option<i32>,

        /// Rent per day
        #[arg(long)]
        rent: Option<i32>,

        /// Dealer id to link the car to
        #[arg(long)]
        dealer: Option<i64>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Availability { date, rules } => handle_availability(&pool, date, rules).await?,
        Commands::Car { action } => handle_car_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Displays record counts for every table.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    for (label, table) in [
        ("Customers", "customers"),
        ("Dealers", "dealers"),
        ("Cars", "cars"),
        ("Reservations", "reservations"),
    ] {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(pool)
            .await?;

        println!(
            "  {:<14} {}",
            format!("{label}:"),
            count.to_string().bright_green().bold()
        );
    }
    println!();

    Ok(())
}

/// Prints every car with its availability on the target date.
///
/// # Output Format
///
/// ```text
/// 🚗 Availability on 2024-03-15 (strict)
///
///   ID  Vehicle              Model                          Seats  Status
///   ───────────────────────────────────────────────────────────────────────
///   1   KA-01-AB-1234        Swift                          5      FREE
///   2   KA-02-CD-5678        Innova                         7      BOOKED
/// ```
async fn handle_availability(
    pool: &PgPool,
    date: Option<String>,
    rules: Option<String>,
) -> Result<()> {
    let date: NaiveDate = match date {
        Some(raw) => parse_date("date", &raw)?,
        None => SystemClock.today(),
    };

    let rules = match rules.or_else(|| std::env::var("BOOKING_RULES").ok()) {
        Some(raw) => BookingRules::from_str(&raw).map_err(|e| anyhow::anyhow!(e))?,
        None => BookingRules::default(),
    };

    // Same computation as `GET /api/cars/status`, without the cache. The
    // snapshot the service publishes is left unread.
    let pool = Arc::new(pool.clone());
    let (snapshots, _pending) = mpsc::channel(1);
    let service = AvailabilityService::new(
        Arc::new(PgCarRepository::new(pool.clone())),
        Arc::new(PgReservationRepository::new(pool)),
        Arc::new(NullCache),
        snapshots,
        Arc::new(FixedClock(date)),
        rules,
    );

    let projected = service
        .cars_on_date(date, &CarFilter::new())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to compute availability: {}", e))?;

    println!(
        "{}",
        format!("🚗 Availability on {date} ({rules})")
            .bright_blue()
            .bold()
    );
    println!();

    if projected.is_empty() {
        println!("{}", "  No cars registered".yellow());
        println!();
        println!(
            "  Register one with: {} admin car add",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<3} {:<20} {:<30} {:<6} {:<8}",
        "ID".bright_white().bold(),
        "Vehicle".bright_white().bold(),
        "Model".bright_white().bold(),
        "Seats".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(71).bright_black());

    let free = projected.iter().filter(|c| c.available).count();

    for item in &projected {
        let status = if item.available {
            "FREE".green()
        } else {
            "BOOKED".red()
        };

        println!(
            "  {:<3} {:<20} {:<30} {:<6} {}",
            item.car.id.to_string().bright_black(),
            item.car.vehicle_number.cyan(),
            item.car.model,
            item.car.seating_capacity,
            status
        );
    }

    println!();
    println!(
        "  Free: {} of {}",
        free.to_string().bright_green().bold(),
        projected.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Dispatches car management commands.
async fn handle_car_action(action: CarAction, pool: &PgPool) -> Result<()> {
    let repo = PgCarRepository::new(Arc::new(pool.clone()));

    match action {
        CarAction::Add {
            vehicle_number,
            model,
            capacity,
            rent,
            dealer,
            yes,
        } => {
            let new_car = prompt_car(vehicle_number, model, capacity, rent, dealer)?;
            add_car(&repo, new_car, yes).await?;
        }
    }

    Ok(())
}

/// Fills in missing car fields from interactive prompts.
fn prompt_car(
    vehicle_number: Option<String>,
    model: Option<String>,
    capacity: Option<i32>,
    rent: Option<i32>,
    dealer_id: Option<i64>,
) -> Result<NewCar> {
    let vehicle_number = match vehicle_number {
        Some(v) => v,
        None => Input::new()
            .with_prompt("Vehicle number")
            .validate_with(|input: &String| -> Result<(), &'static str> {
                if input.is_empty() || input.len() > 20 {
                    Err("Vehicle number must be 1 to 20 characters")
                } else {
                    Ok(())
                }
            })
            .interact_text()?,
    };

    let model = match model {
        Some(m) => m,
        None => Input::new()
            .with_prompt("Model")
            .validate_with(|input: &String| -> Result<(), &'static str> {
                if input.is_empty() || input.len() > 50 {
                    Err("Model must be 1 to 50 characters")
                } else {
                    Ok(())
                }
            })
            .interact_text()?,
    };

    let seating_capacity = match capacity {
        Some(c) => c,
        None => Input::new()
            .with_prompt("Seating capacity")
            .default(5)
            .interact_text()?,
    };

    let rent_per_day = match rent {
        Some(r) => r,
        None => Input::new().with_prompt("Rent per day").interact_text()?,
    };

    if seating_capacity < 1 {
        anyhow::bail!("Seating capacity must be at least 1");
    }
    if rent_per_day < 0 {
        anyhow::bail!("Rent per day must not be negative");
    }

    Ok(NewCar {
        vehicle_number,
        model,
        seating_capacity,
        rent_per_day,
        dealer_id,
    })
}

/// Shows the car details, confirms, and stores it.
async fn add_car(repo: &PgCarRepository, new_car: NewCar, skip_confirm: bool) -> Result<()> {
    println!();
    println!("{}", "Car details:".bright_white().bold());
    println!("  Vehicle:  {}", new_car.vehicle_number.cyan());
    println!("  Model:    {}", new_car.model.cyan());
    println!("  Seats:    {}", new_car.seating_capacity);
    println!("  Rent/day: {}", new_car.rent_per_day);
    if let Some(dealer_id) = new_car.dealer_id {
        println!("  Dealer:   {}", dealer_id.to_string().bright_black());
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Register this car?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let car = repo
        .create(new_car)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to register car: {}", e))?;

    println!();
    println!(
        "{} {}",
        "✅ Car registered with id".green().bold(),
        car.id.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
        DbAction::Migrate => {
            println!("{}", "🛠️  Applying migrations...".bright_blue());

            sqlx::migrate!("./migrations")
                .run(pool)
                .await
                .context("Failed to apply migrations")?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}
