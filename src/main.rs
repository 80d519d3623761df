use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use linkscout::config::Config;
use linkscout::extractor::{Link, LinkExtractor};
use linkscout::filter::{follow_links_in_regions, requests_to_follow};
use linkscout::parser::{read_document, HtmlPage};
use linkscout::utils::{normalize_whitespace, truncate_text};

#[derive(Parser)]
#[command(
    name = "linkscout",
    version,
    about = "Extract and filter crawlable links from HTML documents",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); defaults to LINKSCOUT_LOG_FORMAT or text
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract links from an HTML file
    Extract {
        /// HTML file to read
        file: PathBuf,

        /// URL the document was fetched from
        #[arg(short, long)]
        url: String,

        /// Declared character encoding of the file
        #[arg(short, long)]
        encoding: Option<String>,

        /// TOML configuration file (defaults to LINKSCOUT_* environment variables)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Only print normalized links accepted by the filter, deduplicated
        #[arg(long, default_value = "false")]
        follow_only: bool,

        /// Restrict extraction to these markup fragments of the page (implies --follow-only)
        #[arg(long = "region")]
        regions: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,
    },

    /// Validate a configuration file
    CheckConfig {
        /// TOML configuration file
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = Config::from_env()
        .map(|config| config.logging)
        .unwrap_or_default();
    let format = cli.log_format.as_deref().unwrap_or(&logging.format);
    setup_tracing(format, &logging.level, cli.verbose)?;

    match cli.command {
        Commands::Extract {
            file,
            url,
            encoding,
            config,
            follow_only,
            regions,
            format,
        } => {
            tracing::info!(
                file = %file.display(),
                url = %url,
                encoding = ?encoding,
                follow_only = %follow_only,
                regions = regions.len(),
                "Starting extract command"
            );
            let config = load_config(config.as_deref())?;
            let encoding = encoding.unwrap_or_else(|| config.extraction.default_encoding.clone());
            extract(&file, url, encoding, &config, follow_only, &regions, format)?;
        }

        Commands::CheckConfig { file } => {
            tracing::info!(file = %file.display(), "Starting check-config command");
            let config = load_config(Some(file.as_path()))?;
            println!(
                "{}: ok ({} follow, {} exclude patterns, links_to_follow = {:?})",
                file.display(),
                config.filter.follow_patterns.len(),
                config.filter.exclude_patterns.len(),
                config.filter.links_to_follow
            );
        }
    }

    Ok(())
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("linkscout=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_new(format!("linkscout={level},warn"))
            .context("Invalid log level")?
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };

    if let Err(err) = config.validate() {
        tracing::warn!(error = %format!("{err:#}"), "Rejected configuration");
        return Err(err);
    }

    Ok(config)
}

fn extract(
    file: &Path,
    url: String,
    encoding: String,
    config: &Config,
    follow_only: bool,
    regions: &[PathBuf],
    format: OutputFormat,
) -> Result<()> {
    let page = HtmlPage::from_file(file, url, &encoding)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let links: Vec<Link> = if follow_only || !regions.is_empty() {
        let extractor = LinkExtractor::new(&config.extraction);
        let filter = config.link_filter()?;
        if regions.is_empty() {
            requests_to_follow(extractor.links_to_follow(&page), &filter).collect()
        } else {
            let regions = regions
                .iter()
                .map(|path| {
                    read_document(path, &encoding)
                        .with_context(|| format!("Failed to read {}", path.display()))
                })
                .collect::<Result<Vec<_>>>()?;
            follow_links_in_regions(&page, &regions, &extractor, &filter)
        }
    } else {
        page.links().collect()
    };

    tracing::info!(url = %page.url, links = links.len(), "Extraction finished");

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for link in &links {
        match format {
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(link)?)?,
            OutputFormat::Text => {
                let text = link
                    .text
                    .as_deref()
                    .map(|t| truncate_text(&normalize_whitespace(t), 80))
                    .unwrap_or_default();
                let flag = if link.nofollow { "nofollow" } else { "-" };
                writeln!(out, "{}\t{flag}\t{text}", link.url)?;
            }
        }
    }
    out.flush()?;

    Ok(())
}
