use anyhow::{Context, Result};

use fbref_bot::config::{self, BotConfig};
use fbref_bot::http_client::http_client;
use fbref_bot::ingest;

fn main() -> Result<()> {
    config::load_dotenv();
    config::init_tracing();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let cfg = BotConfig::from_env().with_args(&args);
    let client = http_client(cfg.http_timeout).context("unable to build http client")?;

    let summary = match parse_url_arg(&args) {
        Some(url) => ingest::scrape_single_team(client, &url, &cfg.stats_csv)
            .with_context(|| format!("failed to scrape {url}"))?,
        None => ingest::scrape_all_teams(
            client,
            ingest::TEAM_URLS,
            &cfg.stats_csv,
            cfg.scrape_delay,
        )?,
    };

    println!("FBref ingest complete");
    println!("CSV: {}", summary.csv_path.display());
    println!(
        "Teams: {}/{}",
        summary.teams_succeeded, summary.teams_total
    );
    println!("Rows written: {}", summary.rows_written);
    println!("Finished UTC: {}", summary.finished_at.format("%Y-%m-%d %H:%M:%S"));
    if !summary.errors.is_empty() {
        println!("Errors: {}", summary.errors.len());
        for err in summary.errors.iter().take(8) {
            println!(" - {err}");
        }
    }

    Ok(())
}

/// `--url <page>` scrapes a single squad page and merges it in; without it
/// every known team is scraped and the file rewritten.
fn parse_url_arg(args: &[String]) -> Option<String> {
    for (idx, arg) in args.iter().enumerate() {
        if let Some(url) = arg.strip_prefix("--url=") {
            let trimmed = url.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if arg == "--url" {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(next.trim().to_string());
            }
        }
    }
    None
}
