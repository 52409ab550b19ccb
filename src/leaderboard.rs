use crate::error::QueryError;
use crate::store::{PlayerRecord, StatsStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    Goals,
    Assists,
    Ga,
}

impl Stat {
    /// Column name, also used as the unit in leaderboard lines.
    pub fn column(self) -> &'static str {
        match self {
            Stat::Goals => "goals",
            Stat::Assists => "assists",
            Stat::Ga => "ga",
        }
    }

    /// `None` when the field is absent or not a plain non-negative integer.
    pub fn value(self, record: &PlayerRecord) -> Option<u32> {
        match self {
            Stat::Goals => record.goals,
            Stat::Assists => record.assists,
            Stat::Ga => record.ga,
        }
    }

    /// Keyword priority shared by every leaderboard rule: goal/scorer, then
    /// assist, then g+a/ga.
    pub fn from_keywords(lowered: &str) -> Option<Stat> {
        if lowered.contains("goal") || lowered.contains("scorer") {
            Some(Stat::Goals)
        } else if lowered.contains("assist") {
            Some(Stat::Assists)
        } else if lowered.contains("g+a") || lowered.contains("ga") {
            Some(Stat::Ga)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry<'a> {
    /// 1-based.
    pub rank: usize,
    pub record: &'a PlayerRecord,
    pub value: u32,
}

/// Highest `stat` across the whole table.
pub fn top_league(store: &StatsStore, stat: Stat, limit: usize) -> Vec<RankedEntry<'_>> {
    rank(store.records().iter(), stat, limit)
}

/// Highest `stat` among rows whose team matches `team_phrase`. The empty
/// phrase matches every team.
pub fn top_team<'a>(
    store: &'a StatsStore,
    team_phrase: &str,
    stat: Stat,
    limit: usize,
) -> Result<Vec<RankedEntry<'a>>, QueryError> {
    let phrase = team_phrase.trim().to_lowercase();
    let rows: Vec<&PlayerRecord> = store
        .records()
        .iter()
        .filter(|r| store.team_matches(r, &phrase))
        .collect();
    if rows.is_empty() {
        return Err(QueryError::TeamNotFound(team_phrase.to_string()));
    }
    Ok(rank(rows.into_iter(), stat, limit))
}

fn rank<'a>(
    records: impl Iterator<Item = &'a PlayerRecord>,
    stat: Stat,
    limit: usize,
) -> Vec<RankedEntry<'a>> {
    let mut scored: Vec<(&PlayerRecord, u32)> = records
        .filter_map(|r| stat.value(r).map(|v| (r, v)))
        .collect();
    // sort_by is stable: ties keep table order.
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(idx, (record, value))| RankedEntry {
            rank: idx + 1,
            record,
            value,
        })
        .collect()
}
