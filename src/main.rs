//! CLI entry point for hachenotes

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "hachenotes")]
#[command(version)]
#[command(about = "Site layer of the HacheNotes blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new blog post
    New {
        /// Title of the new post
        title: String,
    },

    /// Write the home page, feed items and site configuration
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Generate, then serve the output directory
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Disable rebuild and live reload
        #[arg(long)]
        r#static: bool,
    },

    /// Remove the output directory
    Clean,

    /// List site information
    List {
        /// What to list (posts, docs, feed, nav, footer)
        #[arg(default_value = "posts")]
        r#type: String,
    },

    /// Print the resolved configuration as JSON
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        "hachenotes=debug,info"
    } else {
        "hachenotes=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Cannot read the current directory")?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            hachenotes::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New { title } => {
            let site = hachenotes::Site::new(&base_dir)?;
            let path = site.new_post(&title)?;
            println!("Created: {:?}", path);
        }

        Commands::Generate { watch } => {
            let site = hachenotes::Site::new(&base_dir)?;
            site.generate()?;
            println!("Generated successfully!");

            if watch {
                tokio::task::spawn_blocking(move || hachenotes::commands::generate::watch(&site))
                    .await??;
            }
        }

        Commands::Serve { port, ip, r#static } => {
            let site = hachenotes::Site::new(&base_dir)?;
            site.generate()?;
            hachenotes::server::start(&site, &ip, port, !r#static).await?;
        }

        Commands::Clean => {
            let site = hachenotes::Site::new(&base_dir)?;
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let site = hachenotes::Site::new(&base_dir)?;
            hachenotes::commands::list::run(&site, &r#type)?;
        }

        Commands::Config => {
            let site = hachenotes::Site::new(&base_dir)?;
            println!("{}", serde_json::to_string_pretty(&site.config)?);
        }
    }

    Ok(())
}
