use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::http_client::fetch_page;
use crate::store::parse_count;

const STATS_TABLE_ID: &str = "stats_standard_combined";

/// FBref 2024-25 squad pages, all competitions.
pub const TEAM_URLS: &[&str] = &[
    "https://fbref.com/en/squads/18bb7c10/2024-2025/all_comps/Arsenal-Stats-All-Competitions",
    "https://fbref.com/en/squads/8602292d/2024-2025/all_comps/Aston-Villa-Stats-All-Competitions",
    "https://fbref.com/en/squads/4ba7cbea/2024-2025/all_comps/Bournemouth-Stats-All-Competitions",
    "https://fbref.com/en/squads/cd051869/2024-2025/all_comps/Brentford-Stats-All-Competitions",
    "https://fbref.com/en/squads/d07537b9/2024-2025/all_comps/Brighton-and-Hove-Albion-Stats-All-Competitions",
    "https://fbref.com/en/squads/943e8050/2024-2025/all_comps/Burnley-Stats-All-Competitions",
    "https://fbref.com/en/squads/cff3d9bb/2024-2025/all_comps/Chelsea-Stats-All-Competitions",
    "https://fbref.com/en/squads/47c64c55/2024-2025/all_comps/Crystal-Palace-Stats-All-Competitions",
    "https://fbref.com/en/squads/d3fd31cc/2024-2025/all_comps/Everton-Stats-All-Competitions",
    "https://fbref.com/en/squads/fd962109/2024-2025/all_comps/Fulham-Stats-All-Competitions",
    "https://fbref.com/en/squads/b74092de/2024-2025/all_comps/Ipswich-Town-Stats-All-Competitions",
    "https://fbref.com/en/squads/822bd0ba/2024-2025/all_comps/Liverpool-Stats-All-Competitions",
    "https://fbref.com/en/squads/b8fd03ef/2024-2025/all_comps/Manchester-City-Stats-All-Competitions",
    "https://fbref.com/en/squads/19538871/2024-2025/all_comps/Manchester-United-Stats-All-Competitions",
    "https://fbref.com/en/squads/b2b47a98/2024-2025/all_comps/Newcastle-United-Stats-All-Competitions",
    "https://fbref.com/en/squads/e4a775cb/2024-2025/all_comps/Nottingham-Forest-Stats-All-Competitions",
    "https://fbref.com/en/squads/1df6b87e/2024-2025/all_comps/Sheffield-United-Stats-All-Competitions",
    "https://fbref.com/en/squads/361ca564/2024-2025/all_comps/Tottenham-Hotspur-Stats-All-Competitions",
    "https://fbref.com/en/squads/7c21e445/2024-2025/all_comps/West-Ham-United-Stats-All-Competitions",
    "https://fbref.com/en/squads/8cec06e1/2024-2025/all_comps/Wolverhampton-Wanderers-Stats-All-Competitions",
];

/// Row layout of the stats CSV the chatbot loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedRow {
    pub team: String,
    pub player: String,
    pub position: String,
    pub age: String,
    pub goals: u32,
    pub assists: u32,
    pub ga: u32,
}

impl ScrapedRow {
    fn new(
        team: &str,
        player: String,
        position: String,
        age: String,
        goals: &str,
        assists: &str,
    ) -> Self {
        // Blank or decorated counts are taken as zero at scrape time.
        let goals = parse_count(goals).unwrap_or(0);
        let assists = parse_count(assists).unwrap_or(0);
        Self {
            team: team.to_string(),
            player,
            position,
            age,
            goals,
            assists,
            ga: goals + assists,
        }
    }
}

#[derive(Debug, Clone)]
pub struct IngestSummary {
    pub csv_path: PathBuf,
    pub teams_total: usize,
    pub teams_succeeded: usize,
    pub rows_written: usize,
    pub finished_at: DateTime<Utc>,
    pub errors: Vec<String>,
}

/// Team name and player rows from one squad page.
pub fn parse_team_page(html: &str) -> Result<(String, Vec<ScrapedRow>)> {
    let heading = block_after(html, "<h1", "</h1>").context("team page has no <h1>")?;
    let team = strip_tags(heading).replace(" Stats", "").trim().to_string();
    if team.is_empty() {
        return Err(anyhow!("team page has an empty <h1>"));
    }

    let table_at = html
        .find(&format!("id=\"{STATS_TABLE_ID}\""))
        .ok_or_else(|| anyhow!("no player stats table found for {team}"))?;
    let Some(body) = block_after(&html[table_at..], "<tbody", "</tbody>") else {
        return Ok((team, Vec::new()));
    };

    let mut rows = Vec::new();
    let mut rest = body;
    while let Some(start) = rest.find("<tr") {
        let after = &rest[start..];
        let end = after.find("</tr>").map(|e| e + "</tr>".len()).unwrap_or(after.len());
        let tr = &after[..end];
        rest = &after[end..];
        if !tr.contains("<td") {
            continue;
        }
        let Some(player) = cell_text(tr, "player").filter(|p| !p.is_empty()) else {
            continue;
        };
        rows.push(ScrapedRow::new(
            &team,
            player,
            cell_text(tr, "position").unwrap_or_default(),
            cell_text(tr, "age").unwrap_or_default(),
            &cell_text(tr, "goals").unwrap_or_default(),
            &cell_text(tr, "assists").unwrap_or_default(),
        ));
    }
    Ok((team, rows))
}

/// Inner html of the first `open ... close` block.
fn block_after<'a>(html: &'a str, open: &str, close: &str) -> Option<&'a str> {
    let start = html.find(open)?;
    let inner_start = html[start..].find('>')? + start + 1;
    let inner_end = html[inner_start..].find(close)? + inner_start;
    Some(&html[inner_start..inner_end])
}

/// Text of the `<th>`/`<td>` carrying `data-stat="<stat>"`.
fn cell_text(row: &str, stat: &str) -> Option<String> {
    let marker = format!("data-stat=\"{stat}\"");
    let at = row.find(&marker)?;
    let tag_start = row[..at].rfind('<')?;
    let tag = if row[tag_start..].starts_with("<th") { "</th>" } else { "</td>" };
    let inner = block_after(&row[tag_start..], "<", tag)?;
    Some(strip_tags(inner))
}

fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    decode_entities(out.split_whitespace().collect::<Vec<_>>().join(" "))
}

fn decode_entities(s: String) -> String {
    if !s.contains('&') {
        return s;
    }
    s.replace("&nbsp;", " ")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

pub fn scrape_team(client: &Client, url: &str) -> Result<(String, Vec<ScrapedRow>)> {
    let html = fetch_page(client, url)?;
    parse_team_page(&html).with_context(|| format!("parse {url}"))
}

/// Scrape every url and rewrite `csv_path` with the result. A team that fails
/// is logged and skipped.
pub fn scrape_all_teams(
    client: &Client,
    urls: &[&str],
    csv_path: &Path,
    delay: Duration,
) -> Result<IngestSummary> {
    let mut all_rows = Vec::new();
    let mut errors = Vec::new();
    let mut teams_succeeded = 0;

    for (idx, url) in urls.iter().enumerate() {
        if idx > 0 {
            thread::sleep(delay);
        }
        info!(url = %url, "scraping team page");
        match scrape_team(client, url) {
            Ok((team, rows)) => {
                if rows.is_empty() {
                    warn!(team = %team, "no player rows on team page");
                }
                teams_succeeded += 1;
                all_rows.extend(rows);
            }
            Err(err) => {
                warn!(url = %url, "failed to scrape: {err:#}");
                errors.push(format!("{url}: {err:#}"));
            }
        }
    }

    let rows = merge_rows(Vec::new(), all_rows);
    write_rows(csv_path, &rows)?;
    Ok(IngestSummary {
        csv_path: csv_path.to_path_buf(),
        teams_total: urls.len(),
        teams_succeeded,
        rows_written: rows.len(),
        finished_at: Utc::now(),
        errors,
    })
}

/// Scrape one team and merge it into the existing file.
pub fn scrape_single_team(client: &Client, url: &str, csv_path: &Path) -> Result<IngestSummary> {
    let (team, fresh) = scrape_team(client, url)?;
    let existing = if csv_path.exists() {
        read_rows(csv_path)?
    } else {
        Vec::new()
    };
    let rows = merge_rows(existing, fresh);
    write_rows(csv_path, &rows)?;
    info!(team = %team, rows = rows.len(), "merged team into stats file");
    Ok(IngestSummary {
        csv_path: csv_path.to_path_buf(),
        teams_total: 1,
        teams_succeeded: 1,
        rows_written: rows.len(),
        finished_at: Utc::now(),
        errors: Vec::new(),
    })
}

/// One row per (player, team). A later row replaces an earlier one in place.
pub fn merge_rows(old: Vec<ScrapedRow>, new: Vec<ScrapedRow>) -> Vec<ScrapedRow> {
    let mut out: Vec<ScrapedRow> = Vec::with_capacity(old.len() + new.len());
    let mut index: HashMap<(String, String), usize> = HashMap::new();
    for row in old.into_iter().chain(new) {
        let key = (row.player.clone(), row.team.clone());
        match index.get(&key) {
            Some(&pos) => out[pos] = row,
            None => {
                index.insert(key, out.len());
                out.push(row);
            }
        }
    }
    out
}

pub fn read_rows(path: &Path) -> Result<Vec<ScrapedRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("open {}", path.display()))?;
    reader
        .deserialize::<ScrapedRow>()
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("read rows from {}", path.display()))
}

/// Write through a temp file so readers never see a half-written table.
pub fn write_rows(path: &Path, rows: &[ScrapedRow]) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        }
    }
    let tmp = path.with_extension("csv.tmp");
    {
        let mut writer = csv::Writer::from_path(&tmp)
            .with_context(|| format!("create {}", tmp.display()))?;
        for row in rows {
            writer.serialize(row).context("serialize row")?;
        }
        writer.flush().context("flush csv")?;
    }
    fs::rename(&tmp, path).with_context(|| format!("swap {}", path.display()))?;
    Ok(())
}
