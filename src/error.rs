use std::path::PathBuf;

use thiserror::Error;

/// Failures detected while answering a query. None of these leave the
/// router: each one is turned into its reply string where it is detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Couldn't extract player name.")]
    Extraction,
    #[error("no player matches '{0}'")]
    NotFound(String),
    #[error("no player matches one of '{0}' / '{1}'")]
    BothPlayersNotFound(String, String),
    #[error("no team matches '{0}'")]
    TeamNotFound(String),
}

impl QueryError {
    /// Fixed user-facing text for each failure; callers match on these strings.
    pub fn reply(&self) -> String {
        match self {
            QueryError::Extraction => "❌ Sorry, I couldn't understand your question.".to_string(),
            QueryError::NotFound(name) => format!("❌ Sorry, I couldn't find data for '{name}'."),
            QueryError::BothPlayersNotFound(..) => {
                "❌ Sorry, I couldn't find data for both players.".to_string()
            }
            QueryError::TeamNotFound(team) => format!("❌ No data found for team '{team}'."),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing column '{0}'")]
    MissingColumn(&'static str),
}
