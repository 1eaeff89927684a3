mod echo;
mod logging;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use serialist_core::fetch::DEFAULT_USER_AGENT;
use serialist_core::pipeline::DEFAULT_OUTPUT_DIR;
use serialist_core::{
    ChapterWindow, Pipeline, PipelineConfig, ProfileParser, SiteProfile, StyleFingerprintProfile, TranslationConfig,
};
use url::Url;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit status when the run finished but some chapters were skipped.
const EXIT_PARTIAL: u8 = 3;

/// Scrape novel chapters from an index page and optionally translate them
#[derive(Parser, Debug)]
#[command(name = "serialist")]
#[command(author = "Serialist Contributors")]
#[command(version)]
#[command(about = "Scrape novel chapters from an index page and optionally translate them", long_about = None)]
struct Args {
    /// Index page URL that lists all chapters
    #[arg(value_name = "INDEX_URL", required_unless_present = "completions")]
    index_url: Option<String>,

    /// Directory where output .txt files are stored
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR, value_name = "DIR")]
    output_dir: PathBuf,

    /// 0-based index in the chapter list to start from
    #[arg(long, default_value = "0", value_name = "N")]
    start_from: usize,

    /// Maximum number of chapters to process from --start-from (default: all)
    #[arg(long, value_name = "N")]
    max_chapters: Option<usize>,

    /// Disable translation and save only the original text
    #[arg(long)]
    no_translate: bool,

    /// Source language code for translation
    #[arg(long, default_value = "zh-TW", value_name = "LANG")]
    src_lang: String,

    /// Target language code for translation
    #[arg(long, default_value = "en", value_name = "LANG")]
    dest_lang: String,

    /// Seconds to sleep between chapter requests and between retries
    #[arg(long, default_value = "3", value_name = "SECS", value_parser = parse_seconds)]
    request_delay: Duration,

    /// Seconds to sleep after each translated line
    #[arg(long, default_value = "0.5", value_name = "SECS", value_parser = parse_seconds)]
    line_delay: Duration,

    /// Number of attempts for each HTTP request
    #[arg(long, default_value = "3", value_name = "NUM", value_parser = clap::value_parser!(u32).range(1..))]
    retries: u32,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "15", value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, default_value = DEFAULT_USER_AGENT, value_name = "UA")]
    user_agent: String,

    /// Site profile file describing the chapter list and content container
    #[arg(long, value_name = "FILE")]
    site_config: Option<PathBuf>,

    /// Generate shell completion script and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Parses a non-negative number of seconds, fractions allowed.
fn parse_seconds(value: &str) -> Result<Duration, String> {
    let secs: f64 = value.parse().map_err(|_| format!("Invalid number of seconds: {}", value))?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(format!("Seconds must be a non-negative number: {}", value));
    }
    Ok(Duration::from_secs_f64(secs))
}

/// Validates the index URL; only http and https are fetched.
fn parse_index_url(input: &str) -> anyhow::Result<Url> {
    let url = Url::parse(input).with_context(|| format!("Invalid URL: {}", input))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        bail!("Invalid URL: {} (must be http or https)", input);
    }
    Ok(url)
}

fn load_profile(path: Option<&PathBuf>) -> anyhow::Result<Arc<dyn SiteProfile>> {
    match path {
        Some(path) => {
            let profile = ProfileParser::parse_file(path)
                .with_context(|| format!("Failed to load site config: {}", path.display()))?;
            Ok(Arc::new(profile))
        }
        None => Ok(Arc::new(StyleFingerprintProfile::default())),
    }
}

fn build_config(args: &Args, index_url: Url) -> PipelineConfig {
    let mut config = PipelineConfig::new(index_url);
    config.output_dir = args.output_dir.clone();
    config.window = ChapterWindow::new(args.start_from, args.max_chapters);
    config.request_delay = args.request_delay;
    config.fetch.timeout = args.timeout;
    config.fetch.user_agent = args.user_agent.clone();
    config.fetch.retries = args.retries;
    config.fetch.retry_delay = args.request_delay;
    config.translation = (!args.no_translate).then(|| TranslationConfig {
        source: args.src_lang.clone(),
        dest: args.dest_lang.clone(),
        line_delay: args.line_delay,
    });
    config
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), "serialist", &mut io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    logging::init(args.verbose)?;

    let index_url = parse_index_url(args.index_url.as_deref().unwrap_or_default())?;
    let profile = load_profile(args.site_config.as_ref())?;
    tracing::debug!(?profile, "site profile loaded");
    let config = build_config(&args, index_url);

    if args.verbose {
        echo::print_banner();
        echo::print_config(&config);
    }

    let pipeline = Pipeline::over_http(config, profile).context("Failed to set up HTTP clients")?;
    let summary = pipeline.run().await.context("Run aborted")?;

    echo::print_summary(&summary);

    if summary.has_failures() { Ok(ExitCode::from(EXIT_PARTIAL)) } else { Ok(ExitCode::SUCCESS) }
}
