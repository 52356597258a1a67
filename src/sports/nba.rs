//! NBA adapter.
//!
//! The league's standings table is also its team listing; one call
//! serves both.

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Utc};
use tracing::debug;

use crate::adapters::nba::{NbaClient, NbaStandingRow};
use crate::error::Result;

use super::{
    resolve_team, team_subs, Sport, SportAdapter, SportSnapshot, StandingRow, StandingsSnapshot,
    TeamInfo,
};

pub struct NbaAdapter {
    client: NbaClient,
    selector: String,
    standings_enabled: bool,
}

impl NbaAdapter {
    pub fn new(selector: String, standings_enabled: bool) -> Result<Self> {
        Ok(Self {
            client: NbaClient::new()?,
            selector,
            standings_enabled,
        })
    }

}

/// Season string for a date, e.g. "2025-26". Seasons roll over in
/// August: before that, the prior start year is still current.
pub fn season_for(date: NaiveDate) -> String {
    let start_year = if date.month() >= 8 {
        date.year()
    } else {
        date.year() - 1
    };
    format!("{start_year}-{:02}", (start_year + 1) % 100)
}

fn normalize_team(row: &NbaStandingRow) -> TeamInfo {
    TeamInfo {
        id: row.team_id.to_string(),
        name: format!("{} {}", row.team_city, row.team_name).trim().to_string(),
        display_name: row.team_name.clone(),
    }
}

fn normalize_standings(rows: &[NbaStandingRow]) -> StandingsSnapshot {
    StandingsSnapshot {
        rows: rows
            .iter()
            .map(|row| StandingRow {
                team: normalize_team(row),
                wins: row.wins,
                losses: row.losses,
                win_pct: row.win_pct.map(|pct| format!("{pct:.3}")),
                rank: row.playoff_rank.map(|rank| rank.to_string()),
                division: row.division.clone(),
                conference: row.conference.clone(),
                ..StandingRow::default()
            })
            .collect(),
    }
}

#[async_trait]
impl SportAdapter for NbaAdapter {
    fn sport(&self) -> Sport {
        Sport::Nba
    }

    async fn fetch(&self) -> Result<SportSnapshot> {
        let season = season_for(Utc::now().date_naive());
        let provider_rows = self.client.standings(&season).await?;

        let all_teams: Vec<TeamInfo> = provider_rows.iter().map(normalize_team).collect();
        let standings = self
            .standings_enabled
            .then(|| normalize_standings(&provider_rows));

        let my_team = resolve_team(&self.selector, &all_teams);
        debug!(sport = "NBA", season = %season, my_team = ?my_team, "fetched provider data");

        Ok(SportSnapshot {
            my_team,
            all_teams,
            standings,
            team_subs: team_subs::for_sport(Sport::Nba),
            current_week: None,
        })
    }
}
