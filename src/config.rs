use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_STATS_CSV: &str = "data/premier_league_2024_25.csv";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
const DEFAULT_SCRAPE_DELAY_MS: u64 = 3000;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub stats_csv: PathBuf,
    pub bind_addr: String,
    pub scrape_delay: Duration,
    pub http_timeout: Duration,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            stats_csv: PathBuf::from(DEFAULT_STATS_CSV),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            scrape_delay: Duration::from_millis(DEFAULT_SCRAPE_DELAY_MS),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl BotConfig {
    /// Read settings from the environment. Call `load_dotenv` first when
    /// `.env` files should be honoured.
    pub fn from_env() -> Self {
        let stats_csv = opt_env("FBREF_STATS_CSV")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATS_CSV));
        let bind_addr =
            opt_env("FBREF_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let scrape_delay = Duration::from_millis(
            opt_env("FBREF_SCRAPE_DELAY_MS")
                .and_then(|val| val.parse::<u64>().ok())
                .unwrap_or(DEFAULT_SCRAPE_DELAY_MS)
                .max(500),
        );
        let http_timeout = Duration::from_secs(
            opt_env("FBREF_HTTP_TIMEOUT_SECS")
                .and_then(|val| val.parse::<u64>().ok())
                .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS)
                .max(1),
        );
        Self {
            stats_csv,
            bind_addr,
            scrape_delay,
            http_timeout,
        }
    }

    /// `--csv <path>` or `--csv=<path>` wins over `FBREF_STATS_CSV`.
    pub fn with_args(mut self, args: &[String]) -> Self {
        if let Some(path) = parse_path_arg(args, "--csv") {
            self.stats_csv = path;
        }
        self
    }
}

pub fn load_dotenv() {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
}

/// Install the tracing subscriber used by every binary.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fbref_bot=info,chat_api=info,stats_ingest=info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn opt_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .and_then(|val| if val.trim().is_empty() { None } else { Some(val) })
}

pub fn parse_path_arg(args: &[String], flag: &str) -> Option<PathBuf> {
    let prefix = format!("{flag}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(path) = arg.strip_prefix(&prefix) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        if arg == flag {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(PathBuf::from(next));
            }
        }
    }
    None
}
