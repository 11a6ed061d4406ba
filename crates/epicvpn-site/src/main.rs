//! Epic Cash VPN site tooling - translation table inspection

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use epicvpn_common::{init_logging, LoggingConfig};
use epicvpn_config::{Config, ConfigLoader};
use epicvpn_i18n::Locale;
use epicvpn_site::{load_table, AuditReport};
use std::path::PathBuf;
use tracing::{debug, info};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "epicvpn-site", author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level, overriding the configuration
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Report keys missing from each locale
    Audit {
        /// Translations directory instead of the configured table
        #[arg(short, long, value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Locale the others are compared with
        #[arg(short, long, default_value = "en")]
        reference: String,

        /// Fail when any locale is incomplete
        #[arg(long)]
        strict: bool,
    },

    /// Print a single translation
    Lookup {
        /// Locale code
        #[arg(value_name = "LOCALE")]
        locale: String,

        /// Translation key
        #[arg(value_name = "KEY")]
        key: String,
    },

    /// List locales and their key counts
    Locales,
}

fn load_configuration(path: Option<&PathBuf>) -> Result<Config> {
    let config = match path {
        Some(path) => ConfigLoader::load_config(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => ConfigLoader::load().context("Failed to load configuration")?,
    };
    Ok(config)
}

fn run_audit(config: &Config, dir: Option<PathBuf>, reference: &str, strict: bool) -> Result<()> {
    let mut settings = config.i18n.clone();
    if let Some(dir) = dir {
        settings.translations_dir = Some(dir.display().to_string());
    }
    let table = load_table(&settings)?;
    let reference = Locale::new(reference);

    let Some(report) = AuditReport::build(&table, &reference) else {
        bail!("Reference locale '{}' has no translations", reference);
    };

    println!("{}: {} keys (reference)", report.reference, report.reference_keys);
    for coverage in &report.locales {
        println!(
            "{}: {} keys, {} missing, {} extra",
            coverage.locale,
            coverage.keys,
            coverage.missing.len(),
            coverage.extra.len()
        );
        for key in &coverage.missing {
            println!("  - {key}");
        }
        for key in &coverage.extra {
            println!("  + {key}");
        }
    }

    if strict && !report.is_complete() {
        bail!("{} translations missing", report.total_missing());
    }
    Ok(())
}

fn run_lookup(config: &Config, locale: &str, key: &str) -> Result<()> {
    let table = load_table(&config.i18n)?;
    let locale = Locale::new(locale);
    match table.lookup(&locale, key) {
        Some(text) => {
            println!("{text}");
            Ok(())
        }
        None => bail!("No translation for '{}' in locale {}", key, locale),
    }
}

fn run_locales(config: &Config) -> Result<()> {
    let table = load_table(&config.i18n)?;
    for locale in table.locales() {
        println!("{}\t{} keys", locale, table.len(locale));
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_configuration(cli.config.as_ref())?;
    let mut logging = LoggingConfig::from(&config.logging);
    if let Some(level) = cli.log_level {
        logging.level = level;
    }
    init_logging(logging)?;

    info!("Starting epicvpn-site {}", env!("CARGO_PKG_VERSION"));
    debug!("Command: {:?}", cli.command);

    match cli.command {
        Commands::Audit {
            dir,
            reference,
            strict,
        } => run_audit(&config, dir, &reference, strict),
        Commands::Lookup { locale, key } => run_lookup(&config, &locale, &key),
        Commands::Locales => run_locales(&config),
    }
}
