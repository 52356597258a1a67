//! MLB adapter.

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use tracing::debug;

use crate::adapters::mlb::{MlbClient, MlbRecord, MlbTeam};
use crate::error::Result;

use super::{
    resolve_team, team_subs, Sport, SportAdapter, SportSnapshot, StandingRow, StandingsSnapshot,
    TeamInfo,
};

pub struct MlbAdapter {
    client: MlbClient,
    selector: String,
    standings_enabled: bool,
}

impl MlbAdapter {
    pub fn new(selector: String, standings_enabled: bool) -> Result<Self> {
        Ok(Self {
            client: MlbClient::new()?,
            selector,
            standings_enabled,
        })
    }

    #[cfg(test)]
    pub fn with_client(client: MlbClient, selector: String, standings_enabled: bool) -> Self {
        Self {
            client,
            selector,
            standings_enabled,
        }
    }
}

fn normalize_team(team: &MlbTeam) -> TeamInfo {
    TeamInfo {
        id: team.id.to_string(),
        name: team.name.clone(),
        display_name: if team.team_name.is_empty() {
            team.name.clone()
        } else {
            team.team_name.clone()
        },
    }
}

fn normalize_standings(records: Vec<MlbRecord>) -> StandingsSnapshot {
    let mut rows = Vec::new();
    for record in records {
        let division = record.division.map(|d| d.name);
        for team_record in record.team_records {
            rows.push(StandingRow {
                team: TeamInfo {
                    id: team_record.team.id.to_string(),
                    name: team_record.team.name.clone(),
                    display_name: team_record.team.name,
                },
                wins: team_record.wins,
                losses: team_record.losses,
                win_pct: team_record.winning_percentage,
                games_back: team_record.games_back,
                rank: team_record.division_rank,
                division: division.clone(),
                ..StandingRow::default()
            });
        }
    }
    StandingsSnapshot { rows }
}

#[async_trait]
impl SportAdapter for MlbAdapter {
    fn sport(&self) -> Sport {
        Sport::Mlb
    }

    async fn fetch(&self) -> Result<SportSnapshot> {
        let season = Utc::now().year();
        let all_teams: Vec<TeamInfo> = self
            .client
            .teams()
            .await?
            .iter()
            .map(normalize_team)
            .collect();

        let standings = if self.standings_enabled {
            Some(normalize_standings(self.client.standings(season).await?))
        } else {
            None
        };

        let my_team = resolve_team(&self.selector, &all_teams);
        debug!(sport = "MLB", my_team = ?my_team, teams = all_teams.len(), "fetched provider data");

        Ok(SportSnapshot {
            my_team,
            all_teams,
            standings,
            team_subs: team_subs::for_sport(Sport::Mlb),
            current_week: None,
        })
    }
}
