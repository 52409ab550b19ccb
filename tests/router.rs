use std::path::PathBuf;

use fbref_bot::router::{KNOWN_TEAMS, TEAM_LIMIT};
use fbref_bot::{QueryEngine, StatsStore};

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

fn engine() -> QueryEngine {
    let store = StatsStore::try_load(&fixture_path("players.csv")).expect("fixture should load");
    QueryEngine::new(store)
}

#[test]
fn single_player_profile() {
    let reply = engine().handle_query("Mohamed Salah stats");
    assert_eq!(
        reply,
        "📊 Mohamed Salah (Liverpool)\nPosition: FW\nAge: 32-345\nGoals: 29\nAssists: 18\nG+A: 47"
    );
}

#[test]
fn name_containing_and_reads_as_comparison() {
    let engine = engine();
    for text in ["sandro tonali stats", "alexander isak stats"] {
        assert_eq!(
            engine.handle_query(text),
            "❌ Sorry, I couldn't find data for both players.",
            "input {text:?}"
        );
    }
    // The surname alone avoids the split.
    assert!(engine.handle_query("tonali stats").starts_with("📊 Sandro Tonali (Newcastle United)"));
}

#[test]
fn single_player_not_found() {
    assert_eq!(
        engine().handle_query("who is messi"),
        "❌ Sorry, I couldn't find data for 'who is messi'."
    );
}

#[test]
fn stop_words_only_is_not_understood() {
    let engine = engine();
    for text in ["", "   ", "show stats", "how many goals does have"] {
        assert_eq!(
            engine.handle_query(text),
            "❌ Sorry, I couldn't understand your question.",
            "input {text:?}"
        );
    }
}

#[test]
fn comparison_keeps_query_order() {
    let reply = engine().handle_query("compare haaland and salah");
    let lines: Vec<_> = reply.lines().collect();
    assert_eq!(lines[0], "📊 Erling Haaland vs. Mohamed Salah");
    assert!(lines[2].starts_with("Stat         | Erling Haaland  | Mohamed Salah"));
    assert_eq!(
        lines[4],
        format!("{:<12} | {:<15} | {:<15}", "Team", "Manchester City", "Liverpool")
    );
    assert_eq!(lines.len(), 8);
}

#[test]
fn comparison_reads_the_same_records_both_ways() {
    let engine = engine();
    let ab = engine.handle_query("salah vs haaland");
    let ba = engine.handle_query("haaland vs salah");
    let swap = |text: &str| -> Vec<(String, String)> {
        text.lines()
            .skip(2)
            .filter(|l| l.contains('|'))
            .map(|l| {
                let cols: Vec<_> = l.split('|').map(|c| c.trim().to_string()).collect();
                (cols[1].clone(), cols[2].clone())
            })
            .collect()
    };
    let ab_cols = swap(&ab);
    let ba_cols: Vec<_> = swap(&ba).into_iter().map(|(l, r)| (r, l)).collect();
    assert_eq!(ab_cols, ba_cols);
}

#[test]
fn comparison_with_unknown_player() {
    assert_eq!(
        engine().handle_query("salah vs pele"),
        "❌ Sorry, I couldn't find data for both players."
    );
}

#[test]
fn comparison_wins_over_league_leaderboard() {
    assert_eq!(
        engine().handle_query("top scorer salah vs haaland"),
        "❌ Sorry, I couldn't find data for both players."
    );
}

#[test]
fn team_prefix_top_scorers() {
    assert_eq!(
        engine().handle_query("Chelsea top scorers"),
        "📊 🏆 Top Scorers for Chelsea:\n\n1. Cole Palmer - 15 goals\n2. Nicolas Jackson - 10 goals\n3. Christopher Nkunku - 10 goals"
    );
}

#[test]
fn team_prefix_lists_only_that_team() {
    let engine = engine();
    for team in ["liverpool", "manchester city", "chelsea", "newcastle", "brentford"] {
        let reply = engine.handle_query(&format!("{team} top scorers"));
        let entries: Vec<_> = reply.lines().skip(2).collect();
        assert!(!entries.is_empty() && entries.len() <= TEAM_LIMIT, "{reply}");
        let store = engine.store();
        for line in entries {
            let name = line
                .split_once(". ")
                .and_then(|(_, rest)| rest.split(" - ").next())
                .expect("numbered line");
            let record = store.find_first(name).expect("listed player exists");
            assert!(
                record.team.to_lowercase().contains(team),
                "{name} is not at {team}"
            );
        }
    }
}

#[test]
fn team_prefix_unknown_team() {
    assert_eq!(
        engine().handle_query("arsenal top goals"),
        "❌ No data found for team 'arsenal'."
    );
}

#[test]
fn team_prefix_ga() {
    assert_eq!(
        engine().handle_query("brentford top g+a"),
        "📊 ⚡ Top G+A Contributors for Brentford:\n\n1. Bryan Mbeumo - 27 ga\n2. Yoane Wissa - 23 ga"
    );
}

#[test]
fn phrased_team_assists() {
    assert_eq!(
        engine().handle_query("top assists from newcastle"),
        "📊 🎯 Top Assist Providers for Newcastle:\n\n1. Alexander Isak - 6 assists\n2. Sandro Tonali - 5 assists"
    );
}

#[test]
fn phrased_team_defaults_to_goals() {
    let reply = engine().handle_query("best players for liverpool");
    assert!(reply.starts_with("📊 🏆 Top Performers for Liverpool:\n\n1. Mohamed Salah - 29 goals"));
}

#[test]
fn phrased_team_garbage_phrase() {
    assert_eq!(
        engine().handle_query("top scorers from atlantis"),
        "❌ No data found for team 'atlantis'."
    );
}

#[test]
fn league_top_goals() {
    let reply = engine().handle_query("top goals");
    let lines: Vec<_> = reply.lines().collect();
    assert_eq!(lines[0], "🏆 Top Goal Scorers:");
    assert_eq!(lines[2], "1. Mohamed Salah (Liverpool) - 29 goals");
    assert_eq!(lines[3], "2. Alexander Isak (Newcastle United) - 23 goals");
    // Three players tie on 10; table order decides.
    assert_eq!(lines[9], "8. Cody Gakpo (Liverpool) - 10 goals");
    assert_eq!(lines[10], "9. Nicolas Jackson (Chelsea) - 10 goals");
    assert_eq!(lines[11], "10. Christopher Nkunku (Chelsea) - 10 goals");
    assert_eq!(lines.len(), 12);
}

#[test]
fn league_top_on_empty_store() {
    let engine = QueryEngine::new(StatsStore::empty());
    assert_eq!(engine.handle_query("top assists"), "🎯 Top Assist Providers:\n");
}

#[test]
fn missing_file_degrades_to_not_found() {
    let engine = QueryEngine::new(StatsStore::load(&fixture_path("does_not_exist.csv")));
    assert!(engine.store().is_empty());
    assert_eq!(
        engine.handle_query("Mohamed Salah stats"),
        "❌ Sorry, I couldn't find data for 'mohamed salah'."
    );
}

#[test]
fn never_panics_on_odd_input() {
    let engine = engine();
    let mut inputs = vec![
        "vs".to_string(),
        "and and".to_string(),
        "for".to_string(),
        "from".to_string(),
        "top".to_string(),
        "g+a".to_string(),
        "🤖🤖🤖".to_string(),
        "compare".to_string(),
        "x".repeat(10_000),
    ];
    inputs.extend(KNOWN_TEAMS.iter().map(|t| format!("{t} top")));
    for text in inputs {
        let reply = engine.handle_query(&text);
        assert!(!reply.is_empty(), "empty reply for {text:?}");
    }
}
