use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::{error, info};

use calc_catalog::catalog::Catalog;
use calc_catalog::config::Config;
use calc_catalog::error::CatalogError;
use calc_catalog::seo::structured_data;
use calc_catalog::{logging, metrics, server, sitemap, Category};

#[derive(Parser)]
#[command(name = "calc_catalog")]
#[command(about = "Engineering calculator catalog, SEO metadata and sitemap service")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve sitemap.xml, robots.txt and the catalog JSON API
    Serve {
        /// Port to listen on (overrides config and PORT)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Write the sitemap document
    Sitemap {
        /// Output file; stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
        /// Date stamped on every entry (YYYY-MM-DD); today when omitted
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Print robots.txt
    Robots,
    /// Print derived SEO metadata and JSON-LD for one calculator
    Seo {
        /// Calculator id, e.g. ohms-law
        id: String,
    },
    /// List calculators, grouped by category
    List {
        /// Only this category (display name, e.g. "Wire & Cable")
        #[arg(long)]
        category: Option<String>,
    },
    /// Check the built-in catalog for duplicate ids/paths and stray overrides
    Validate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let _log_guard = logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load().context("loading configuration")?;

    match cli.command {
        Commands::Validate => validate(config)?,
        Commands::Serve { port } => {
            let catalog = load_catalog(&config)?;
            if config.metrics.enabled {
                metrics::init_metrics(config.metrics.port);
            }
            let port = port.unwrap_or(config.server.port);
            let addr: SocketAddr = format!("{}:{}", config.server.host, port)
                .parse()
                .map_err(CatalogError::from)?;
            server::start_server(Arc::new(catalog), addr).await?;
        }
        Commands::Sitemap { out, date } => {
            let catalog = load_catalog(&config)?;
            let base_url = &catalog.site().base_url;
            let entries = match date {
                Some(date) => sitemap::generate(catalog.registry(), base_url, date),
                None => sitemap::generate_now(catalog.registry(), base_url),
            };
            let xml = sitemap::render_xml(&entries)?;
            match out {
                Some(path) => {
                    fs::write(&path, xml)
                        .with_context(|| format!("writing sitemap to {}", path.display()))?;
                    info!(entries = entries.len(), path = %path.display(), "Sitemap written");
                    println!("✅ Wrote {} sitemap entries to {}", entries.len(), path.display());
                }
                None => print!("{}", xml),
            }
        }
        Commands::Robots => {
            let catalog = load_catalog(&config)?;
            println!("{}", sitemap::robots_txt(&catalog.site().base_url));
        }
        Commands::Seo { id } => {
            let catalog = load_catalog(&config)?;
            let (Some(calc), Some(metadata)) =
                (catalog.registry().find_by_id(&id), catalog.seo().derive(&id))
            else {
                bail!("no calculator with id '{}'", id);
            };
            let output = serde_json::json!({
                "metadata": metadata,
                "meta_tags": metadata.meta_tags(),
                "structured_data": structured_data::for_calculator(&metadata, calc),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::List { category } => {
            let filter = match category.as_deref() {
                Some(name) => match Category::from_name(name) {
                    Some(c) => Some(c),
                    None => bail!("unknown category '{}'", name),
                },
                None => None,
            };
            let catalog = load_catalog(&config)?;
            for group in catalog.registry().category_groups() {
                if filter.is_some_and(|c| c != group.category) {
                    continue;
                }
                println!("\n📂 {} (/category/{})", group.category, group.slug);
                for calc in group.calculators {
                    println!("   {:<28} {}", calc.id, calc.path);
                }
            }
        }
    }
    Ok(())
}

fn load_catalog(config: &Config) -> anyhow::Result<Catalog> {
    Catalog::builtin(config.site.clone()).context("loading calculator catalog")
}

fn validate(config: Config) -> anyhow::Result<()> {
    match Catalog::builtin(config.site) {
        Ok(catalog) => {
            let registry = catalog.registry();
            println!(
                "✅ Catalog OK: {} calculators in {} categories",
                registry.len(),
                registry.list_categories().len()
            );
            Ok(())
        }
        Err(CatalogError::Integrity(violations)) => {
            for violation in &violations {
                error!("{}", violation);
                println!("   - {}", violation);
            }
            bail!("{} integrity violation(s)", violations.len())
        }
        Err(e) => Err(e.into()),
    }
}
