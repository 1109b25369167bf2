mod commands;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use lightfolio_core::config::SiteConfig;
use lightfolio_core::Site;

/// Lightfolio: portfolio gallery browser
#[derive(Parser)]
#[command(name = "lightfolio", version, about)]
struct Cli {
    /// Path to the site config (JSON). Built-in defaults are used if it does not exist.
    #[arg(long, default_value = "site.json")]
    config: PathBuf,

    /// Override the asset root from the config
    #[arg(long)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every catalog item with its gallery, category and slug
    Catalog,
    /// Show the filter strip of a gallery
    Categories {
        /// Gallery id (e.g. portfolio, stories)
        gallery: String,
    },
    /// Render a gallery page the way a visitor would see it
    Browse {
        /// Gallery id; defaults to the one selected by --link, then the site default
        gallery: Option<String>,
        /// Category to filter by
        #[arg(long)]
        filter: Option<String>,
        /// Number of times the visitor scrolls to the end of the grid
        #[arg(long, default_value_t = 0)]
        scroll: usize,
        /// Location fragment to open with, e.g. '#lg=stories&slide=summit'
        #[arg(long)]
        link: Option<String>,
        /// Replace titles with captions embedded in the rendered images
        #[arg(long)]
        enrich: bool,
        /// Password for private galleries
        #[arg(long)]
        password: Option<String>,
    },
    /// Print the caption embedded in an image file
    Caption {
        /// Path to the image
        path: PathBuf,
    },
    /// Print the digest to store as `gate_digest` for a password
    Digest {
        /// The password
        password: String,
    },
}

fn open_site(config_path: &Path, root: Option<PathBuf>) -> Result<Site> {
    let mut config = if config_path.exists() {
        SiteConfig::load(config_path)?
    } else {
        tracing::debug!(path = %config_path.display(), "no config file, using defaults");
        SiteConfig::default()
    };
    if let Some(root) = root {
        config.asset_root = root;
    }
    Ok(Site::open(config)?)
}

fn main() -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let Cli {
        config,
        root,
        command,
    } = Cli::parse();

    match command {
        Commands::Catalog => commands::catalog::list(&open_site(&config, root)?)?,
        Commands::Categories { gallery } => {
            commands::catalog::categories(&open_site(&config, root)?, &gallery)?
        }
        Commands::Browse {
            gallery,
            filter,
            scroll,
            link,
            enrich,
            password,
        } => commands::browse::run(
            &mut open_site(&config, root)?,
            commands::browse::BrowseArgs {
                gallery,
                filter,
                scroll,
                link,
                enrich,
                password,
            },
        )?,
        Commands::Caption { path } => commands::caption::caption(&path)?,
        Commands::Digest { password } => commands::caption::digest(&password)?,
    }

    Ok(())
}
