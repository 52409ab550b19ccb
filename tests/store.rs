use std::fs;
use std::path::PathBuf;

use fbref_bot::ingest::{ScrapedRow, merge_rows, read_rows, write_rows};
use fbref_bot::leaderboard::{Stat, top_league, top_team};
use fbref_bot::matching::ExactMatcher;
use fbref_bot::{LoadError, QueryError, StatsStore};

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

fn fixture_store() -> StatsStore {
    StatsStore::try_load(&fixture_path("players.csv")).expect("fixture should load")
}

#[test]
fn fixture_loads_every_row() {
    let store = fixture_store();
    assert_eq!(store.len(), 17);
    assert!(store.integrity_issues().is_empty());
    let diaz = store.find_first("díaz").expect("accented names match");
    assert_eq!(diaz.position, "FW,MF");
    let keeper = store.find_first("bettinelli").expect("keeper row");
    assert_eq!((keeper.goals, keeper.assists, keeper.ga), (None, None, None));
}

#[test]
fn ga_always_equals_goals_plus_assists() {
    let store = fixture_store();
    for stat in [Stat::Goals, Stat::Assists, Stat::Ga] {
        for entry in top_league(&store, stat, usize::MAX) {
            let r = entry.record;
            assert_eq!(r.ga, Some(r.goals.unwrap() + r.assists.unwrap()), "{}", r.player);
        }
    }
}

#[test]
fn stored_ga_disagreement_is_flagged() {
    let csv = "player,team,goals,assists,ga\nA,X,3,4,7\nB,X,2,2,9\nC,X,,1,1\n";
    let store = StatsStore::from_reader(csv.as_bytes()).expect("csv should parse");
    let issues = store.integrity_issues();
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].player, "B");
    assert_eq!(issues[0].stored_ga, "9");
    assert_eq!(issues[0].computed_ga, Some(4));
    assert_eq!(issues[1].player, "C");
    assert_eq!(issues[1].computed_ga, None);
    assert_eq!(store.records()[1].ga, Some(4));
}

#[test]
fn columns_found_by_name() {
    let csv = "goals,extra,team,player\n5,zzz,Fulham,Raúl Jiménez\n";
    let store = StatsStore::from_reader(csv.as_bytes()).expect("csv should parse");
    let r = store.find_first("jiménez").unwrap();
    assert_eq!(r.goals, Some(5));
    assert_eq!(r.assists, None);
    assert_eq!(r.position, "");
}

#[test]
fn missing_player_column_is_a_load_error() {
    let csv = "name,team\nA,X\n";
    assert!(matches!(
        StatsStore::from_reader(csv.as_bytes()),
        Err(LoadError::MissingColumn("player"))
    ));
}

#[test]
fn missing_file_is_io_error_and_empty_store() {
    let path = fixture_path("nope.csv");
    assert!(matches!(StatsStore::try_load(&path), Err(LoadError::Io { .. })));
    assert!(StatsStore::load(&path).is_empty());
}

#[test]
fn non_numeric_values_never_ranked() {
    let store = fixture_store();
    let all = top_league(&store, Stat::Goals, usize::MAX);
    assert_eq!(all.len(), 16);
    assert!(all.iter().all(|e| e.record.player != "Marcus Bettinelli"));
}

#[test]
fn exact_matcher_can_replace_substring() {
    let store = fixture_store().with_matcher(ExactMatcher);
    assert!(matches!(store.find_first("salah"), Err(QueryError::NotFound(_))));
    assert_eq!(store.find_first("Mohamed Salah").unwrap().team, "Liverpool");
    assert!(top_team(&store, "chelsea", Stat::Goals, 3).is_ok());
    assert!(top_team(&store, "newcastle", Stat::Goals, 3).is_err());
}

fn scraped(player: &str, team: &str, goals: u32, assists: u32) -> ScrapedRow {
    ScrapedRow {
        team: team.to_string(),
        player: player.to_string(),
        position: "FW".to_string(),
        age: "25-100".to_string(),
        goals,
        assists,
        ga: goals + assists,
    }
}

#[test]
fn ingest_output_loads_into_store() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("data").join("season.csv");

    write_rows(&path, &[scraped("Bukayo Saka", "Arsenal", 6, 10)]).expect("write");
    let update = merge_rows(
        read_rows(&path).expect("read"),
        vec![
            scraped("Bukayo Saka", "Arsenal", 7, 10),
            scraped("Kai Havertz", "Arsenal", 9, 3),
        ],
    );
    write_rows(&path, &update).expect("rewrite");
    assert!(!path.with_extension("csv.tmp").exists());

    let raw = fs::read_to_string(&path).expect("csv text");
    assert!(raw.starts_with("team,player,position,age,goals,assists,ga\n"));

    let store = StatsStore::load(&path);
    assert_eq!(store.len(), 2);
    assert!(store.integrity_issues().is_empty());
    let saka = store.find_first("saka").unwrap();
    assert_eq!((saka.goals, saka.ga), (Some(7), Some(17)));
}
