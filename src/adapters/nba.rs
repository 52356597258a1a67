//! NBA Stats API client.
//!
//! stats.nba.com responses are tabular: named result sets carrying a
//! header row plus untyped row arrays. Rows are decoded positionally by
//! header name, so column reordering upstream stays harmless.

use reqwest::header::{HeaderMap, HeaderValue, REFERER};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{BotError, Result};

const DEFAULT_NBA_API_BASE: &str = "https://stats.nba.com/stats";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    #[serde(default)]
    pub result_sets: Vec<ResultSet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSet {
    pub name: String,
    pub headers: Vec<String>,
    pub row_set: Vec<Vec<Value>>,
}

impl ResultSet {
    fn column(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.eq_ignore_ascii_case(header))
    }
}

/// One decoded standings row
#[derive(Debug, Clone)]
pub struct NbaStandingRow {
    pub team_id: i64,
    pub team_city: String,
    pub team_name: String,
    pub conference: Option<String>,
    pub division: Option<String>,
    pub wins: u32,
    pub losses: u32,
    pub win_pct: Option<f64>,
    pub playoff_rank: Option<i64>,
}

fn cell_str(row: &[Value], col: Option<usize>) -> Option<String> {
    col.and_then(|i| row.get(i))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn cell_i64(row: &[Value], col: Option<usize>) -> Option<i64> {
    let value = col.and_then(|i| row.get(i))?;
    value.as_i64().or_else(|| value.as_f64().map(|f| f as i64))
}

fn cell_f64(row: &[Value], col: Option<usize>) -> Option<f64> {
    col.and_then(|i| row.get(i)).and_then(Value::as_f64)
}

fn decode_standings(set: &ResultSet) -> Result<Vec<NbaStandingRow>> {
    let team_id = set.column("TeamID");
    let team_city = set.column("TeamCity");
    let team_name = set.column("TeamName");
    let conference = set.column("Conference");
    let division = set.column("Division");
    let wins = set.column("WINS");
    let losses = set.column("LOSSES");
    let win_pct = set.column("WinPCT");
    let playoff_rank = set.column("PlayoffRank");

    let mut rows = Vec::with_capacity(set.row_set.len());
    for row in &set.row_set {
        let id = cell_i64(row, team_id)
            .ok_or_else(|| BotError::fetch("NBA", "standings row without TeamID"))?;
        rows.push(NbaStandingRow {
            team_id: id,
            team_city: cell_str(row, team_city).unwrap_or_default(),
            team_name: cell_str(row, team_name).unwrap_or_default(),
            conference: cell_str(row, conference),
            division: cell_str(row, division),
            wins: cell_i64(row, wins).unwrap_or(0) as u32,
            losses: cell_i64(row, losses).unwrap_or(0) as u32,
            win_pct: cell_f64(row, win_pct),
            playoff_rank: cell_i64(row, playoff_rank),
        });
    }
    Ok(rows)
}

pub struct NbaClient {
    http: Client,
    base_url: String,
}

impl NbaClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_NBA_API_BASE)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        // stats.nba.com rejects requests without a browser-ish referer
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, HeaderValue::from_static("https://stats.nba.com/"));

        let http = Client::builder()
            .user_agent(concat!("pennant/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| BotError::fetch("NBA", format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// League standings for a season like "2025-26". The result doubles
    /// as the league's team listing; when standings sync is disabled only
    /// the identity columns are consumed.
    pub async fn standings(&self, season: &str) -> Result<Vec<NbaStandingRow>> {
        let resp = self
            .http
            .get(format!("{}/leaguestandingsv3", self.base_url))
            .query(&[
                ("LeagueID", "00"),
                ("Season", season),
                ("SeasonType", "Regular Season"),
            ])
            .send()
            .await
            .map_err(|e| BotError::fetch("NBA", e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(BotError::fetch(
                "NBA",
                format!("leaguestandingsv3 returned {status}"),
            ));
        }

        let stats: StatsResponse = resp
            .json()
            .await
            .map_err(|e| BotError::fetch("NBA", format!("leaguestandingsv3 decode failed: {e}")))?;

        let set = stats
            .result_sets
            .iter()
            .find(|set| set.name == "Standings")
            .ok_or_else(|| BotError::fetch("NBA", "response carried no Standings result set"))?;
        decode_standings(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STANDINGS_JSON: &str = r#"{
        "resultSets": [{
            "name": "Standings",
            "headers": ["TeamID", "TeamCity", "TeamName", "Conference", "Division", "WINS", "LOSSES", "WinPCT", "PlayoffRank"],
            "rowSet": [
                [1610612750, "Minnesota", "Timberwolves", "West", "Northwest", 56, 26, 0.683, 1],
                [1610612747, "Los Angeles", "Lakers", "West", "Pacific", 47, 35, 0.573, 7]
            ]
        }]
    }"#;

    #[test]
    fn test_decode_standings_by_header_name() {
        let stats: StatsResponse = serde_json::from_str(STANDINGS_JSON).unwrap();
        let rows = decode_standings(&stats.result_sets[0]).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].team_id, 1610612750);
        assert_eq!(rows[0].team_city, "Minnesota");
        assert_eq!(rows[0].team_name, "Timberwolves");
        assert_eq!(rows[0].wins, 56);
        assert_eq!(rows[0].win_pct, Some(0.683));
        assert_eq!(rows[1].playoff_rank, Some(7));
    }

    #[test]
    fn test_decode_survives_reordered_columns() {
        let reordered = STANDINGS_JSON
            .replace(
                r#"["TeamID", "TeamCity", "TeamName""#,
                r#"["TeamCity", "TeamID", "TeamName""#,
            )
            .replace(r#"[1610612750, "Minnesota""#, r#"["Minnesota", 1610612750"#)
            .replace(r#"[1610612747, "Los Angeles""#, r#"["Los Angeles", 1610612747"#);
        let stats: StatsResponse = serde_json::from_str(&reordered).unwrap();
        let rows = decode_standings(&stats.result_sets[0]).unwrap();
        assert_eq!(rows[0].team_id, 1610612750);
        assert_eq!(rows[0].team_city, "Minnesota");
    }

    #[test]
    fn test_row_without_team_id_is_a_fetch_failure() {
        let stats: StatsResponse = serde_json::from_str(
            r#"{"resultSets": [{"name": "Standings", "headers": ["WINS"], "rowSet": [[10]]}]}"#,
        )
        .unwrap();
        assert!(decode_standings(&stats.result_sets[0]).is_err());
    }
}
