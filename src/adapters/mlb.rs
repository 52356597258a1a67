//! MLB Stats API client.
//!
//! statsapi.mlb.com is unauthenticated. Teams are hydrated with league
//! and division metadata; standings cover both leagues for the regular
//! season.

use reqwest::Client;
use serde::Deserialize;

use crate::error::{BotError, Result};

const DEFAULT_MLB_API_BASE: &str = "https://statsapi.mlb.com/api/v1";

#[derive(Debug, Clone, Deserialize)]
pub struct Named {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MlbTeam {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub team_name: String,
    #[serde(default)]
    pub abbreviation: String,
    #[serde(default)]
    pub league: Option<Named>,
    #[serde(default)]
    pub division: Option<Named>,
}

#[derive(Debug, Deserialize)]
struct TeamsResponse {
    #[serde(default)]
    teams: Vec<MlbTeam>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MlbTeamStub {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MlbTeamRecord {
    pub team: MlbTeamStub,
    pub wins: u32,
    pub losses: u32,
    #[serde(default)]
    pub winning_percentage: Option<String>,
    #[serde(default)]
    pub games_back: Option<String>,
    #[serde(default)]
    pub division_rank: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MlbRecord {
    #[serde(default)]
    pub division: Option<Named>,
    #[serde(default)]
    pub team_records: Vec<MlbTeamRecord>,
}

#[derive(Debug, Deserialize)]
struct StandingsResponse {
    #[serde(default)]
    records: Vec<MlbRecord>,
}

pub struct MlbClient {
    http: Client,
    base_url: String,
}

impl MlbClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_MLB_API_BASE)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("pennant/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| BotError::fetch("MLB", format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        let resp = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| BotError::fetch("MLB", e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(BotError::fetch("MLB", format!("GET {path} returned {status}")));
        }
        resp.json::<T>()
            .await
            .map_err(|e| BotError::fetch("MLB", format!("GET {path} decode failed: {e}")))
    }

    pub async fn teams(&self) -> Result<Vec<MlbTeam>> {
        let resp: TeamsResponse = self
            .get_json(
                "/teams",
                &[
                    ("sportId", "1".to_string()),
                    ("hydrate", "league,division".to_string()),
                ],
            )
            .await?;
        Ok(resp.teams)
    }

    /// Regular-season standings for both leagues, grouped by division
    pub async fn standings(&self, season: i32) -> Result<Vec<MlbRecord>> {
        let resp: StandingsResponse = self
            .get_json(
                "/standings",
                &[
                    ("leagueId", "103,104".to_string()),
                    ("season", season.to_string()),
                    ("standingsTypes", "regularSeason".to_string()),
                    ("hydrate", "team".to_string()),
                ],
            )
            .await?;
        Ok(resp.records)
    }
}
