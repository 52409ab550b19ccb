use fbref_bot::config::{self, BotConfig, parse_path_arg};
use fbref_bot::{QueryEngine, StatsStore};

/// ask [--csv <path>] <question words...>
fn main() {
    config::load_dotenv();
    config::init_tracing();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let cfg = BotConfig::from_env().with_args(&args);

    let mut words = Vec::new();
    let mut skip_next = false;
    for arg in &args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg == "--csv" {
            skip_next = true;
            continue;
        }
        if parse_path_arg(std::slice::from_ref(arg), "--csv").is_some() {
            continue;
        }
        words.push(arg.as_str());
    }

    let engine = QueryEngine::new(StatsStore::load(&cfg.stats_csv));
    println!("{}", engine.handle_query(&words.join(" ")));
}
