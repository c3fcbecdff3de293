//! Configuration types and CLI options.
//!
//! `Config` is the library configuration and can be built without clap;
//! `Opt` is the command-line surface that converts into it.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    parse_seconds, secs_to_duration, DEFAULT_DELAY_SECS, DEFAULT_MAX_DEPTH, DEFAULT_MIN_SIZE,
    DEFAULT_OUTPUT_ROOT, DEFAULT_SETTLE_SECS, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use crate::filter::FilterMode;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use jsharvest::Config;
/// use jsharvest::filter::FilterMode;
///
/// let config = Config {
///     target: Some("https://example.com".to_string()),
///     filter_mode: FilterMode::Relaxed,
///     crawl: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Single target URL (ignored when `url_file` is set)
    pub target: Option<String>,

    /// File with one target URL per line
    pub url_file: Option<PathBuf>,

    /// Root directory for collected assets
    pub output_root: PathBuf,

    /// Navigation timeout per page
    pub timeout: Duration,

    /// Delay between crawl requests
    pub delay: Duration,

    /// Settle wait after the root page navigation
    pub settle: Duration,

    /// Record every save/skip decision and write `verbose.log`
    pub verbose: bool,

    /// Interestingness rule set
    pub filter_mode: FilterMode,

    /// Minimum asset size in bytes
    pub min_size: usize,

    /// Follow same-domain links
    pub crawl: bool,

    /// Maximum crawl depth
    pub max_depth: u32,

    /// Keep assets served from other hosts
    pub include_cross_origin: bool,

    /// Remove the output directory before the run
    pub clear_output: bool,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: None,
            url_file: None,
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            timeout: secs_to_duration(DEFAULT_TIMEOUT_SECS),
            delay: secs_to_duration(DEFAULT_DELAY_SECS),
            settle: secs_to_duration(DEFAULT_SETTLE_SECS),
            verbose: false,
            filter_mode: FilterMode::Strict,
            min_size: DEFAULT_MIN_SIZE,
            crawl: false,
            max_depth: DEFAULT_MAX_DEPTH,
            include_cross_origin: false,
            clear_output: false,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Single page, strict filtering
/// jsharvest https://example.com
///
/// # Crawl two levels deep, keep third-party scripts
/// jsharvest https://example.com --crawl --max-depth 2 --cross-origin
///
/// # Batch of targets
/// jsharvest --url-file targets.txt --filter relaxed -o ./out
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "jsharvest",
    version,
    about = "Download and archive the JavaScript (external and inline) a site serves."
)]
pub struct Opt {
    /// Target URL to analyze (e.g. https://example.com)
    pub url: Option<String>,

    /// Text file with one URL per line, run after the positional URL
    #[arg(long, value_parser)]
    pub url_file: Option<PathBuf>,

    /// Directory to save collected JavaScript into
    #[arg(short, long, value_parser, default_value = DEFAULT_OUTPUT_ROOT)]
    pub output: PathBuf,

    /// Navigation timeout per page (seconds)
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = parse_seconds)]
    pub timeout: f64,

    /// Delay between crawl requests (seconds)
    #[arg(short = 'r', long, default_value_t = DEFAULT_DELAY_SECS, value_parser = parse_seconds)]
    pub delay: f64,

    /// Wait after the root page loads so late scripts arrive (seconds)
    #[arg(long, default_value_t = DEFAULT_SETTLE_SECS, value_parser = parse_seconds)]
    pub settle: f64,

    /// Verbose output; also writes every save/skip decision to verbose.log
    #[arg(short, long)]
    pub verbose: bool,

    /// Filtering mode for uninteresting JavaScript
    #[arg(long = "filter", value_enum, default_value_t = FilterMode::Strict)]
    pub filter_mode: FilterMode,

    /// Minimum file size in bytes to save
    #[arg(long, default_value_t = DEFAULT_MIN_SIZE)]
    pub min_size: usize,

    /// Crawl same-domain links found on the page
    #[arg(long)]
    pub crawl: bool,

    /// Maximum crawl depth for following links
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: u32,

    /// Include JavaScript served from other hosts
    #[arg(long)]
    pub cross_origin: bool,

    /// Clear the output directory before saving new files
    #[arg(long)]
    pub clear: bool,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        // --verbose implies debug unless a level was asked for explicitly
        let log_level = if opt.verbose && opt.log_level == LogLevel::Info {
            LogLevel::Debug
        } else {
            opt.log_level
        };
        Self {
            target: opt.url,
            url_file: opt.url_file,
            output_root: opt.output,
            timeout: secs_to_duration(opt.timeout),
            delay: secs_to_duration(opt.delay),
            settle: secs_to_duration(opt.settle),
            verbose: opt.verbose,
            filter_mode: opt.filter_mode,
            min_size: opt.min_size,
            crawl: opt.crawl,
            max_depth: opt.max_depth,
            include_cross_origin: opt.cross_origin,
            clear_output: opt.clear,
            user_agent: opt.user_agent,
            log_level,
            log_format: opt.log_format,
        }
    }
}
