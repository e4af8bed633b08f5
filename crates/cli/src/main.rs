//! Sari CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! sari-cli migrate
//!
//! # Seed the first operator (prints the generated login code)
//! sari-cli seed operator -f Maria -l Santos -b 1990-04-12 -p 'Str0ng!Pass'
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed operator` - Create a person and operator for first login

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sari-cli")]
#[command(author, version, about = "Sari backend CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed database records
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Create a person and operator for first login
    Operator {
        /// First name
        #[arg(short, long)]
        first_name: String,

        /// Last name
        #[arg(short, long)]
        last_name: String,

        /// Birthdate (YYYY-MM-DD)
        #[arg(short, long)]
        birthdate: String,

        /// Password (validated against the login rules)
        #[arg(short, long)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { target } => match target {
            SeedTarget::Operator {
                first_name,
                last_name,
                birthdate,
                password,
            } => {
                commands::seed::operator(&first_name, &last_name, &birthdate, &password).await?;
            }
        },
    }
    Ok(())
}
