//! NHL web API client.
//!
//! Two hosts: the stats REST API for the team roster (numeric ids, tri
//! codes) and the newer web API for the live standings table. Standings
//! rows identify teams only by tri code; the sport adapter joins them
//! back to numeric ids.

use reqwest::Client;
use serde::Deserialize;

use crate::error::{BotError, Result};

const DEFAULT_NHL_WEB_API_BASE: &str = "https://api-web.nhle.com/v1";
const DEFAULT_NHL_STATS_API_BASE: &str = "https://api.nhle.com/stats/rest/en";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NhlTeam {
    pub id: i64,
    pub full_name: String,
    #[serde(default)]
    pub tri_code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TeamsResponse {
    #[serde(default)]
    data: Vec<NhlTeam>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocalizedString {
    #[serde(default)]
    pub default: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NhlStandingRow {
    #[serde(default)]
    pub team_abbrev: LocalizedString,
    #[serde(default)]
    pub team_name: LocalizedString,
    #[serde(default)]
    pub team_common_name: LocalizedString,
    #[serde(default)]
    pub games_played: u32,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub ot_losses: u32,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub division_name: Option<String>,
    #[serde(default)]
    pub conference_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StandingsResponse {
    #[serde(default)]
    standings: Vec<NhlStandingRow>,
}

pub struct NhlClient {
    http: Client,
    web_base: String,
    stats_base: String,
}

impl NhlClient {
    pub fn new() -> Result<Self> {
        Self::with_base_urls(DEFAULT_NHL_WEB_API_BASE, DEFAULT_NHL_STATS_API_BASE)
    }

    pub fn with_base_urls(web_base: &str, stats_base: &str) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("pennant/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| BotError::fetch("NHL", format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            web_base: web_base.trim_end_matches('/').to_string(),
            stats_base: stats_base.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: String) -> Result<T> {
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| BotError::fetch("NHL", e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(BotError::fetch("NHL", format!("GET {url} returned {status}")));
        }
        resp.json::<T>()
            .await
            .map_err(|e| BotError::fetch("NHL", format!("GET {url} decode failed: {e}")))
    }

    pub async fn teams(&self) -> Result<Vec<NhlTeam>> {
        let resp: TeamsResponse = self.get_json(format!("{}/team", self.stats_base)).await?;
        Ok(resp.data)
    }

    pub async fn standings_now(&self) -> Result<Vec<NhlStandingRow>> {
        let resp: StandingsResponse = self
            .get_json(format!("{}/standings/now", self.web_base))
            .await?;
        Ok(resp.standings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_standings_now_decodes_localized_fields() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/standings/now")
            .with_status(200)
            .with_body(
                r#"{"standings": [{
                    "teamAbbrev": {"default": "MIN"},
                    "teamName": {"default": "Minnesota Wild"},
                    "teamCommonName": {"default": "Wild"},
                    "gamesPlayed": 82,
                    "wins": 45,
                    "losses": 30,
                    "otLosses": 7,
                    "points": 97,
                    "divisionName": "Central",
                    "conferenceName": "Western"
                }]}"#,
            )
            .create_async()
            .await;

        let client = NhlClient::with_base_urls(&server.url(), &server.url()).unwrap();
        let rows = client.standings_now().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].team_abbrev.default, "MIN");
        assert_eq!(rows[0].points, 97);
        assert_eq!(rows[0].ot_losses, 7);
    }

    #[tokio::test]
    async fn test_teams_decodes_roster() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/team")
            .with_status(200)
            .with_body(
                r#"{"data": [
                    {"id": 30, "fullName": "Minnesota Wild", "triCode": "MIN"},
                    {"id": 1, "fullName": "New Jersey Devils", "triCode": "NJD"}
                ]}"#,
            )
            .create_async()
            .await;

        let client = NhlClient::with_base_urls(&server.url(), &server.url()).unwrap();
        let teams = client.teams().await.unwrap();
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].id, 30);
        assert_eq!(teams[0].tri_code.as_deref(), Some("MIN"));
    }
}
