use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use url::Url;

use sotrack_client::{CollectorConfig, HttpSubmitter, ReqwestFetcher};
use sotrack_core::{
    ApiConfig, NullSubmitter, PageInfo, PageInfoService, PageInfoValidator, PageSource,
};

/// Shown to the user for any failure; details only go to the log.
const USER_ALERT: &str = "Stack Overflow Tracker Error: Our apologies - there was an error analyzing this page. Please try refreshing the page or visiting it later.";

#[derive(Parser)]
#[command(name = "sotrack", version, about = "Stack Overflow page tracker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a question page and send its page info to the collector
    Track {
        /// Question page URL, e.g. https://stackoverflow.com/questions/7222449/slug
        #[arg(short, long)]
        url: String,

        /// Collector endpoint receiving page info records
        #[arg(long, env = "SOTRACK_COLLECTOR_URL", required_unless_present = "dry_run")]
        collector_url: Option<String>,

        /// Opaque login token sent with each submission
        #[arg(long, env = "SOTRACK_LOGIN_TOKEN", required_unless_present = "dry_run")]
        login_token: Option<String>,

        /// Stack Exchange API base URL
        #[arg(
            long,
            env = "SOTRACK_API_BASE_URL",
            default_value = "https://api.stackexchange.com/2.2"
        )]
        api_base_url: String,

        /// Stack Exchange site parameter
        #[arg(long, env = "SOTRACK_SITE", default_value = "stackoverflow")]
        site: String,

        /// HTTP timeout in seconds for every request
        #[arg(long, env = "SOTRACK_TIMEOUT_SECS", default_value_t = 30)]
        timeout_secs: u64,

        /// Resolve and validate only; do not submit
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },

    /// Check a stored page info record against the collector schema
    Validate {
        /// Path to a JSON page info record
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Setup tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("sotrack=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Track {
            url,
            collector_url,
            login_token,
            api_base_url,
            site,
            timeout_secs,
            dry_run,
        } => {
            let source = page_source(&url)?;
            let api = ApiConfig::new(api_base_url).with_site(site);
            let timeout = Duration::from_secs(timeout_secs);

            let collector = match (dry_run, collector_url, login_token) {
                (true, _, _) => None,
                (false, Some(url), Some(token)) => Some(CollectorConfig::new(&url, token)?),
                _ => bail!("--collector-url and --login-token are required unless --dry-run"),
            };

            match cmd_track(&source, api, collector, timeout).await {
                Ok(info) => println!("{}", serde_json::to_string_pretty(&info)?),
                Err(e) => {
                    tracing::error!(question_id = source.question_id, "{e:#}");
                    eprintln!("{USER_ALERT}");
                    std::process::exit(1);
                }
            }
        }
        Commands::Validate { file } => cmd_validate(&file)?,
    }

    Ok(())
}

/// Extract the page source from a question URL (`/questions/<id>/<slug>`).
fn page_source(page_url: &str) -> Result<PageSource> {
    let parsed = Url::parse(page_url).with_context(|| format!("Invalid page URL: {page_url}"))?;
    let path = parsed.path().to_string();

    let mut segments = path.split('/').filter(|s| !s.is_empty());
    let question_id = match (segments.next(), segments.next()) {
        (Some("questions"), Some(id)) => id
            .parse::<u64>()
            .with_context(|| format!("Not a question id: {id}"))?,
        _ => bail!("Not a question page: {page_url}"),
    };

    Ok(PageSource {
        url: page_url.to_string(),
        path,
        question_id,
    })
}

async fn cmd_track(
    source: &PageSource,
    api: ApiConfig,
    collector: Option<CollectorConfig>,
    timeout: Duration,
) -> Result<PageInfo> {
    let fetcher = ReqwestFetcher::with_timeout(timeout).context("Failed to create HTTP client")?;

    let info = match collector {
        Some(config) => {
            let submitter = HttpSubmitter::with_timeout(config, timeout)
                .context("Failed to create collector client")?;
            PageInfoService::new(fetcher, api, submitter)?
                .track(source)
                .await?
        }
        None => {
            let info = PageInfoService::new(fetcher, api, NullSubmitter)?
                .inspect(source)
                .await?;
            tracing::info!(question_id = info.question_id, "Dry run, not submitted");
            info
        }
    };

    Ok(info)
}

fn cmd_validate(path: &Path) -> Result<()> {
    let record_str = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read record file: {}", path.display()))?;
    let record: serde_json::Value =
        serde_json::from_str(&record_str).context("Invalid JSON in record file")?;

    let validator = PageInfoValidator::new()?;
    match validator.validate_value(&record) {
        Ok(()) => println!("{}: valid", path.display()),
        Err(e) => {
            println!("{}: invalid", path.display());
            for field in e.violations() {
                println!("  - {field}");
            }
            std::process::exit(1);
        }
    }

    Ok(())
}
