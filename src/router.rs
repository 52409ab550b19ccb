use tracing::debug;

use crate::error::QueryError;
use crate::extract::{extract_comparison_pair, extract_single_player};
use crate::format;
use crate::leaderboard::{Stat, top_league, top_team};
use crate::store::StatsStore;

pub const TEAM_LIMIT: usize = 3;
pub const LEAGUE_LIMIT: usize = 10;

/// Checked in list order; the first prefix that fits wins.
pub const KNOWN_TEAMS: &[&str] = &[
    "arsenal",
    "aston villa",
    "bournemouth",
    "brentford",
    "brighton",
    "burnley",
    "chelsea",
    "crystal palace",
    "everton",
    "fulham",
    "ipswich",
    "liverpool",
    "manchester city",
    "man city",
    "manchester united",
    "man united",
    "newcastle",
    "nottingham forest",
    "sheffield united",
    "tottenham",
    "spurs",
    "west ham",
    "wolverhampton",
    "wolves",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryIntent {
    /// "arsenal top scorers"
    TeamLeaderboard { team: &'static str, stat: Stat },
    /// "top assists from chelsea"; `stat` is `None` when no keyword was given.
    PhrasedTeamLeaderboard { team: String, stat: Option<Stat> },
    /// "saka vs palmer"
    Comparison { first: String, second: String },
    /// "top g+a"
    LeagueLeaderboard { stat: Stat },
    /// Anything else.
    SinglePlayer,
}

/// A query as the rules see it: the raw text plus its trimmed, lowercased form.
pub struct Query<'a> {
    pub raw: &'a str,
    pub lowered: String,
}

impl<'a> Query<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw,
            lowered: raw.trim().to_lowercase(),
        }
    }
}

pub struct Rule {
    pub name: &'static str,
    pub detect: fn(&Query<'_>) -> Option<QueryIntent>,
}

/// Priority order. Single-player is not listed: it is what is left.
pub const RULES: &[Rule] = &[
    Rule {
        name: "team-prefix leaderboard",
        detect: detect_team_prefix,
    },
    Rule {
        name: "phrased team leaderboard",
        detect: detect_phrased_team,
    },
    Rule {
        name: "comparison",
        detect: detect_comparison,
    },
    Rule {
        name: "league leaderboard",
        detect: detect_league,
    },
];

fn detect_team_prefix(query: &Query<'_>) -> Option<QueryIntent> {
    if !query.lowered.contains("top") {
        return None;
    }
    // A team prefix without a stat keyword falls through to the next rule.
    KNOWN_TEAMS
        .iter()
        .copied()
        .find(|team| query.lowered.starts_with(team))
        .and_then(|team| {
            Stat::from_keywords(&query.lowered)
                .map(|stat| QueryIntent::TeamLeaderboard { team, stat })
        })
}

fn detect_phrased_team(query: &Query<'_>) -> Option<QueryIntent> {
    let lowered = &query.lowered;
    if !lowered.contains("from") && !lowered.contains("for") {
        return None;
    }
    let tokens: Vec<&str> = lowered.split_whitespace().collect();
    let idx = tokens
        .iter()
        .position(|t| *t == "from")
        .or_else(|| tokens.iter().position(|t| *t == "for"));
    let team = idx
        .map(|idx| tokens[idx + 1..].join(" "))
        .unwrap_or_default();
    Some(QueryIntent::PhrasedTeamLeaderboard {
        team,
        stat: Stat::from_keywords(lowered),
    })
}

fn detect_comparison(query: &Query<'_>) -> Option<QueryIntent> {
    extract_comparison_pair(query.raw)
        .map(|(first, second)| QueryIntent::Comparison { first, second })
}

fn detect_league(query: &Query<'_>) -> Option<QueryIntent> {
    if !query.lowered.contains("top") {
        return None;
    }
    Stat::from_keywords(&query.lowered).map(|stat| QueryIntent::LeagueLeaderboard { stat })
}

pub fn classify(text: &str) -> QueryIntent {
    let query = Query::new(text);
    for rule in RULES {
        if let Some(intent) = (rule.detect)(&query) {
            debug!(rule = rule.name, ?intent, "query routed");
            return intent;
        }
    }
    debug!("query routed to single-player fallback");
    QueryIntent::SinglePlayer
}

fn team_title(stat: Option<Stat>) -> &'static str {
    match stat {
        Some(Stat::Goals) => "🏆 Top Scorers",
        Some(Stat::Assists) => "🎯 Top Assist Providers",
        Some(Stat::Ga) => "⚡ Top G+A Contributors",
        None => "🏆 Top Performers",
    }
}

fn league_title(stat: Stat) -> &'static str {
    match stat {
        Stat::Goals => "🏆 Top Goal Scorers",
        Stat::Assists => "🎯 Top Assist Providers",
        Stat::Ga => "⚡ Top G+A Contributors",
    }
}

/// The query engine: an explicitly owned, read-only store plus the rules.
pub struct QueryEngine {
    store: StatsStore,
}

impl QueryEngine {
    pub fn new(store: StatsStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &StatsStore {
        &self.store
    }

    /// Always returns a reply; failures come back as their fixed messages.
    pub fn handle_query(&self, text: &str) -> String {
        let intent = classify(text);
        self.respond(text, &intent)
            .unwrap_or_else(|err| err.reply())
    }

    pub fn respond(&self, text: &str, intent: &QueryIntent) -> Result<String, QueryError> {
        match intent {
            QueryIntent::TeamLeaderboard { team, stat } => {
                self.team_board(team, *stat, team_title(Some(*stat)))
            }
            QueryIntent::PhrasedTeamLeaderboard { team, stat } => {
                self.team_board(team, stat.unwrap_or(Stat::Goals), team_title(*stat))
            }
            QueryIntent::Comparison { first, second } => {
                let (Ok(left), Ok(right)) =
                    (self.store.find_first(first), self.store.find_first(second))
                else {
                    return Err(QueryError::BothPlayersNotFound(
                        first.clone(),
                        second.clone(),
                    ));
                };
                Ok(format::comparison_table(left, right))
            }
            QueryIntent::LeagueLeaderboard { stat } => {
                let entries = top_league(&self.store, *stat, LEAGUE_LIMIT);
                Ok(format::league_leaderboard(league_title(*stat), *stat, &entries))
            }
            QueryIntent::SinglePlayer => {
                let name = extract_single_player(text)?;
                let record = self.store.find_first(&name)?;
                Ok(format::player_profile(record))
            }
        }
    }

    fn team_board(&self, team: &str, stat: Stat, title: &str) -> Result<String, QueryError> {
        let entries = top_team(&self.store, team, stat, TEAM_LIMIT)?;
        Ok(format::team_leaderboard(title, team, stat, &entries))
    }
}
