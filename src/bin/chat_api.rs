//! HTTP front end for the football stats chatbot.
//!
//! ```bash
//! cargo run --bin chat_api
//! curl -X POST http://127.0.0.1:5000/query \
//!   -H "Content-Type: application/json" \
//!   -d '{"query": "arsenal top scorers"}'
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use fbref_bot::config::{self, BotConfig};
use fbref_bot::{QueryEngine, StatsStore, api};

#[tokio::main]
async fn main() -> Result<()> {
    config::load_dotenv();
    config::init_tracing();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let cfg = BotConfig::from_env().with_args(&args);

    let engine = Arc::new(QueryEngine::new(StatsStore::load(&cfg.stats_csv)));
    let app = api::router(engine);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.bind_addr))?;
    info!(addr = %cfg.bind_addr, "chat api listening");
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
