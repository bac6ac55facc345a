//! stencil CLI
//!
//! Command-line access to the template tools: describe classes from a
//! catalog the way a template sees them, and read or build cookie headers.

mod commands;
mod config;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use commands::{cookies, inspect};

#[derive(Parser)]
#[command(name = "stencil")]
#[command(about = "Template tool helpers: class introspection and cookies", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Describe a class: fields, constructors, methods, referenced types
    Inspect {
        /// Qualified class name (defaults to `[class].inspect`, then java.lang.Object)
        class: Option<String>,
        /// Extra class catalog (JSON or TOML); may be repeated
        #[arg(long = "catalog")]
        catalogs: Vec<PathBuf>,
        /// Config file (defaults to ./stencil.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,
        /// List members of every visibility (disables safe mode)
        #[arg(long)]
        all: bool,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
        /// Color output: auto, always, never
        #[arg(long)]
        color: Option<String>,
    },

    /// Read or build cookies
    Cookies {
        #[command(subcommand)]
        action: CookieAction,
    },
}

#[derive(Subcommand)]
enum CookieAction {
    /// List the cookies of a `Cookie` header, or print one value
    Get {
        /// Header value, e.g. "id=42; theme=dark"
        #[arg(long)]
        header: String,
        /// Cookie name to look up
        name: Option<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the `Set-Cookie` header for a new cookie
    Set {
        name: String,
        value: String,
        /// Max age in seconds
        #[arg(long, allow_hyphen_values = true)]
        max_age: Option<String>,
    },
}

/// Log to stderr, filtered by `STENCIL_LOG` (falling back to `RUST_LOG`).
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_env("STENCIL_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect {
            class,
            catalogs,
            config,
            all,
            json,
            color,
        } => inspect::execute(inspect::InspectArgs {
            class,
            catalogs,
            config,
            all,
            json,
            color,
        }),

        Commands::Cookies { action } => match action {
            CookieAction::Get { header, name, json } => {
                cookies::get(&header, name.as_deref(), json)
            }
            CookieAction::Set {
                name,
                value,
                max_age,
            } => cookies::set(&name, &value, max_age.as_deref()),
        },
    }
}
