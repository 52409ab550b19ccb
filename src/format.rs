use crate::leaderboard::{RankedEntry, Stat};
use crate::store::PlayerRecord;

fn count_cell(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

pub fn player_profile(record: &PlayerRecord) -> String {
    format!(
        "📊 {} ({})\nPosition: {}\nAge: {}\nGoals: {}\nAssists: {}\nG+A: {}",
        record.player,
        record.team,
        record.position,
        record.age,
        count_cell(record.goals),
        count_cell(record.assists),
        count_cell(record.ga),
    )
}

pub fn comparison_table(left: &PlayerRecord, right: &PlayerRecord) -> String {
    let mut lines = vec![
        format!("📊 {} vs. {}", left.player, right.player),
        String::new(),
        format!("{:<12} | {:<15} | {:<15}", "Stat", left.player, right.player),
        "-".repeat(45),
    ];
    let rows = [
        ("Team", left.team.clone(), right.team.clone()),
        ("Goals", count_cell(left.goals), count_cell(right.goals)),
        ("Assists", count_cell(left.assists), count_cell(right.assists)),
        ("G+A", count_cell(left.ga), count_cell(right.ga)),
    ];
    for (label, l, r) in rows {
        lines.push(format!("{label:<12} | {l:<15} | {r:<15}"));
    }
    lines.join("\n")
}

pub fn league_leaderboard(title: &str, stat: Stat, entries: &[RankedEntry<'_>]) -> String {
    let mut lines = vec![format!("{title}:\n")];
    for e in entries {
        lines.push(format!(
            "{}. {} ({}) - {} {}",
            e.rank,
            e.record.player,
            e.record.team,
            e.value,
            stat.column()
        ));
    }
    lines.join("\n")
}

pub fn team_leaderboard(
    title: &str,
    team_phrase: &str,
    stat: Stat,
    entries: &[RankedEntry<'_>],
) -> String {
    let mut lines = vec![format!("📊 {title} for {}:\n", title_case(team_phrase))];
    for e in entries {
        lines.push(format!(
            "{}. {} - {} {}",
            e.rank,
            e.record.player,
            e.value,
            stat.column()
        ));
    }
    lines.join("\n")
}

/// Uppercase the first letter of every alphabetic run: "man city" -> "Man City".
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}
