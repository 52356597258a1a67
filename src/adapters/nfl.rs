//! NFL API client.
//!
//! api.nfl.com is token-gated: client credentials are exchanged for a
//! short-lived bearer token before anything else. The adapter reconnects
//! (and so re-exchanges) once per update cycle rather than tracking
//! expiry.

use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;

use crate::error::{BotError, Result};
use crate::sports::CurrentWeek;

const DEFAULT_NFL_API_BASE: &str = "https://api.nfl.com";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NflToken {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NflTeam {
    pub abbreviation: String,
    pub full_name: String,
    #[serde(default)]
    pub nick_name: Option<String>,
    #[serde(default)]
    pub conference_abbr: Option<String>,
    #[serde(default)]
    pub division_full_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TeamsResponse {
    #[serde(default)]
    teams: Vec<NflTeam>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NflTeamStub {
    pub abbreviation: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub nick_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NflRecord {
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub ties: u32,
    #[serde(default)]
    pub win_pct: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NflStandingRow {
    pub team: NflTeamStub,
    #[serde(default)]
    pub overall: Option<NflRecord>,
}

#[derive(Debug, Deserialize)]
struct StandingsWeek {
    #[serde(default)]
    standings: Vec<NflStandingRow>,
}

#[derive(Debug, Deserialize)]
struct StandingsResponse {
    #[serde(default)]
    weeks: Vec<StandingsWeek>,
}

#[derive(Debug)]
pub struct NflClient {
    http: Client,
    base_url: String,
    token: NflToken,
}

impl NflClient {
    /// Exchange client credentials for a bearer token and build a client
    /// around it
    pub async fn connect(base_url: Option<&str>) -> Result<Self> {
        let base_url = base_url
            .unwrap_or(DEFAULT_NFL_API_BASE)
            .trim_end_matches('/')
            .to_string();
        let http = Client::builder()
            .user_agent(concat!("pennant/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| BotError::fetch("NFL", format!("failed to build HTTP client: {e}")))?;

        let token = Self::fetch_token(&http, &base_url).await?;
        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    async fn fetch_token(http: &Client, base_url: &str) -> Result<NflToken> {
        tracing::debug!("Retrieving fresh NFL API token...");
        let resp = http
            .post(format!("{base_url}/v1/reroute"))
            .header("x-domain-id", "100")
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| BotError::fetch("NFL", format!("token request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(BotError::fetch(
                "NFL",
                format!("token request returned {status}"),
            ));
        }
        resp.json::<NflToken>()
            .await
            .map_err(|e| BotError::fetch("NFL", format!("token decode failed: {e}")))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let resp = self
            .http
            .get(format!("{}{path}", self.base_url))
            .bearer_auth(&self.token.access_token)
            .query(query)
            .send()
            .await
            .map_err(|e| BotError::fetch("NFL", e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(BotError::fetch("NFL", format!("GET {path} returned {status}")));
        }
        resp.json::<T>()
            .await
            .map_err(|e| BotError::fetch("NFL", format!("GET {path} decode failed: {e}")))
    }

    /// Which season/week a calendar date falls in
    pub async fn week_by_date(&self, date: NaiveDate) -> Result<CurrentWeek> {
        self.get_json(
            &format!("/football/v2/weeks/date/{}", date.format("%Y-%m-%d")),
            &[],
        )
        .await
    }

    pub async fn teams(&self, season: i32) -> Result<Vec<NflTeam>> {
        let resp: TeamsResponse = self
            .get_json("/football/v2/teams", &[("season", season.to_string())])
            .await?;
        Ok(resp.teams)
    }

    /// Standings for one week; the response nests them one level down
    pub async fn standings(
        &self,
        season: i32,
        season_type: &str,
        week: u32,
    ) -> Result<Vec<NflStandingRow>> {
        let resp: StandingsResponse = self
            .get_json(
                "/football/v2/standings",
                &[
                    ("season", season.to_string()),
                    ("seasonType", season_type.to_string()),
                    ("week", week.to_string()),
                ],
            )
            .await?;
        Ok(resp.weeks.into_iter().next().map(|w| w.standings).unwrap_or_default())
    }
}
