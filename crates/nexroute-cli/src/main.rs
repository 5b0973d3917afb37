mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nexroute")]
#[command(version, about = "Nexroute CLI - inspect directory-convention routes", long_about = None)]
struct Cli {
    /// Log route generation details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the route list generated from a set of route files
    Routes {
        /// Route file identifiers (read from stdin, one per line, when omitted)
        identifiers: Vec<String>,

        /// TOML file with a [router] section
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory holding the route files
        #[arg(short, long)]
        pages_dir: Option<String>,

        /// Emit JSON instead of a tree
        #[arg(long)]
        json: bool,

        /// Build a fresh unit per route instead of sharing cached ones
        #[arg(long)]
        no_lazy: bool,
    },

    /// Show the route syntax of directory segments
    Normalize {
        /// Segments such as (group), [id] or [...slug]
        #[arg(required = true)]
        segments: Vec<String>,
    },

    /// Show which role each file plays and the route path it maps to
    Classify {
        /// File paths
        #[arg(required = true)]
        paths: Vec<String>,

        /// TOML file with a [router] section
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Routes {
            identifiers,
            config,
            pages_dir,
            json,
            no_lazy,
        } => {
            let options = commands::routes::RoutesOptions {
                config,
                pages_dir,
                json,
                lazy: !no_lazy,
            };
            commands::routes::execute(identifiers, &options)?;
        }
        Commands::Normalize { segments } => {
            commands::normalize::execute(&segments)?;
        }
        Commands::Classify { paths, config } => {
            commands::classify::execute(&paths, config.as_deref())?;
        }
    }

    Ok(())
}
