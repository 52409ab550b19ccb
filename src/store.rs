use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{error, info, warn};

use crate::error::{LoadError, QueryError};
use crate::matching::{SubstringMatcher, TextMatcher};

/// One row of the season table: a player at one team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRecord {
    /// Name as it appears in the source.
    pub player: String,
    /// Lowercased `player`, used for matching.
    pub key: String,
    pub team: String,
    pub position: String,
    /// Free-form; FBref writes `years-days`, older exports a bare number.
    pub age: String,
    pub goals: Option<u32>,
    pub assists: Option<u32>,
    /// Always goals + assists, never taken from the source.
    pub ga: Option<u32>,
}

/// A row exactly as the data source hands it over.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRow {
    pub player: String,
    pub team: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub goals: String,
    #[serde(default)]
    pub assists: String,
    #[serde(default)]
    pub ga: Option<String>,
}

/// A stored `ga` that disagrees with goals + assists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrityIssue {
    pub row: usize,
    pub player: String,
    pub team: String,
    pub stored_ga: String,
    pub computed_ga: Option<u32>,
}

impl PlayerRecord {
    fn from_raw(raw: RawRow) -> Self {
        let goals = parse_count(&raw.goals);
        let assists = parse_count(&raw.assists);
        let ga = match (goals, assists) {
            (Some(g), Some(a)) => g.checked_add(a),
            _ => None,
        };
        Self {
            key: raw.player.trim().to_lowercase(),
            player: raw.player.trim().to_string(),
            team: raw.team.trim().to_string(),
            position: raw.position.trim().to_string(),
            age: raw.age.trim().to_string(),
            goals,
            assists,
            ga,
        }
    }
}

/// Digits only: "12" parses, "", "-", "12.0" and "+3" do not.
pub fn parse_count(raw: &str) -> Option<u32> {
    let s = raw.trim();
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse::<u32>().ok()
}

/// In-memory, read-only player table. Built once, then only queried.
pub struct StatsStore {
    records: Vec<PlayerRecord>,
    integrity: Vec<IntegrityIssue>,
    matcher: Box<dyn TextMatcher>,
}

impl Default for StatsStore {
    fn default() -> Self {
        Self::empty()
    }
}

impl StatsStore {
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            integrity: Vec::new(),
            matcher: Box::new(SubstringMatcher),
        }
    }

    pub fn from_rows(rows: impl IntoIterator<Item = RawRow>) -> Self {
        let mut records = Vec::new();
        let mut integrity = Vec::new();
        for (idx, raw) in rows.into_iter().enumerate() {
            let stored_ga = raw.ga.clone();
            let record = PlayerRecord::from_raw(raw);
            if let Some(stored) = stored_ga {
                let stored = stored.trim().to_string();
                if !stored.is_empty() && parse_count(&stored) != record.ga {
                    warn!(
                        row = idx,
                        player = %record.player,
                        stored = %stored,
                        computed = ?record.ga,
                        "stored ga disagrees with goals + assists"
                    );
                    integrity.push(IntegrityIssue {
                        row: idx,
                        player: record.player.clone(),
                        team: record.team.clone(),
                        stored_ga: stored,
                        computed_ga: record.ga,
                    });
                }
            }
            records.push(record);
        }
        Self {
            records,
            integrity,
            matcher: Box::new(SubstringMatcher),
        }
    }

    /// Load the table, degrading to an empty store on any failure.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(store) => {
                info!(
                    path = %path.display(),
                    players = store.len(),
                    "loaded player stats"
                );
                store
            }
            Err(err) => {
                error!(path = %path.display(), "failed to load player stats: {err}");
                Self::empty()
            }
        }
    }

    pub fn try_load(path: &Path) -> Result<Self, LoadError> {
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .flexible(true)
            .from_reader(reader);
        let headers = reader.headers()?.clone();
        for required in ["player", "team"] {
            if !headers.iter().any(|h| h == required) {
                return Err(LoadError::MissingColumn(required));
            }
        }
        let mut rows = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let line = idx + 2;
            let mut record = match result {
                Ok(record) => record,
                Err(err) if err.is_io_error() => return Err(err.into()),
                Err(err) => {
                    warn!(line, "skipping unreadable row: {err}");
                    continue;
                }
            };
            // Short rows read as blank trailing fields.
            while record.len() < headers.len() {
                record.push_field("");
            }
            match record.deserialize::<RawRow>(Some(&headers)) {
                Ok(row) if !row.player.trim().is_empty() => rows.push(row),
                Ok(_) => warn!(line, "skipping row without a player name"),
                Err(err) => warn!(line, "skipping malformed row: {err}"),
            }
        }
        Ok(Self::from_rows(rows))
    }

    pub fn with_matcher(mut self, matcher: impl TextMatcher + 'static) -> Self {
        self.matcher = Box::new(matcher);
        self
    }

    /// First record, in table order, whose name matches `query`.
    pub fn find_first(&self, query: &str) -> Result<&PlayerRecord, QueryError> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Err(QueryError::NotFound(needle));
        }
        self.records
            .iter()
            .find(|r| self.matcher.matches(&r.key, &needle))
            .ok_or(QueryError::NotFound(needle))
    }

    /// `phrase` must already be lowercased.
    pub fn team_matches(&self, record: &PlayerRecord, phrase: &str) -> bool {
        self.matcher.matches(&record.team.to_lowercase(), phrase)
    }

    pub fn records(&self) -> &[PlayerRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn integrity_issues(&self) -> &[IntegrityIssue] {
        &self.integrity
    }
}
