//! Hono Registry Migration CLI
//!
//! Transforms one collection dump of the file-based device registry into
//! MongoDB registry documents, printed as JSON on stdout.

use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use hono_registry_migrate::{Collection, RecordTransformer, TransformOptions};

#[derive(Parser)]
#[command(name = "hono-registry-migrate")]
#[command(version)]
#[command(
    about = "Transform Hono collections from the file-based registry to MongoDB",
    long_about = None
)]
struct Cli {
    /// Type of dump
    #[arg(value_enum)]
    collection: Collection,

    /// JSON dump to import
    dump: PathBuf,

    /// YAML options file (ignored_tenants, indent)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Tenant to drop; repeat to ignore several (replaces the default set)
    #[arg(long = "ignore-tenant", value_name = "TENANT_ID")]
    ignore_tenants: Vec<String>,

    /// Migrate every tenant, including the built-in ones
    #[arg(long, conflicts_with = "ignore_tenants")]
    keep_all_tenants: bool,

    /// Write the documents to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn options(&self) -> anyhow::Result<TransformOptions> {
        let mut options = match &self.config {
            Some(path) => {
                info!("Loading options from {:?}", path);
                TransformOptions::from_file(path)?
            }
            None => TransformOptions::default(),
        };

        if self.keep_all_tenants {
            options.ignored_tenants.clear();
        } else if !self.ignore_tenants.is_empty() {
            options.ignored_tenants = self.ignore_tenants.clone();
        }

        options.validate()?;
        Ok(options)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr, stdout carries the documents
    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::WARN
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let options = cli.options()?;
    info!("Ignoring tenants: {:?}", options.ignored_tenants);

    let transformer = RecordTransformer::with_options(cli.collection, cli.dump.clone(), options);

    let stats = match &cli.output {
        Some(path) => {
            let (rendered, stats) = transformer.render()?;
            std::fs::write(path, format!("{rendered}\n"))
                .map_err(|e| anyhow::anyhow!("Failed to write '{}': {}", path.display(), e))?;
            info!("Wrote {} documents to {:?}", stats.documents, path);
            stats
        }
        None => transformer.transform()?,
    };

    info!(
        "Migration of {} complete: {} documents, {} entries skipped",
        cli.collection, stats.documents, stats.skipped
    );

    Ok(())
}
