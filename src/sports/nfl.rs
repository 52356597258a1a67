//! NFL adapter.
//!
//! The only schedule-driven variant: the current week must be resolved
//! before standings can be requested, and the provider token is
//! re-exchanged on every cycle.

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use crate::adapters::nfl::{NflClient, NflStandingRow, NflTeam};
use crate::error::Result;

use super::{
    resolve_team, team_subs, CurrentWeek, SeasonType, Sport, SportAdapter, SportSnapshot,
    StandingRow, StandingsSnapshot, TeamInfo,
};

/// Week index to request standings for. Post-season standings freeze at
/// the final regular-season week; off-season and pre-season fall back to
/// week 1.
pub fn standings_week(current: &CurrentWeek) -> u32 {
    match current.season_type {
        SeasonType::Reg => current.week,
        SeasonType::Post => 18,
        SeasonType::Pre | SeasonType::Off => 1,
    }
}

pub struct NflAdapter {
    base_url: Option<String>,
    selector: String,
    standings_enabled: bool,
}

impl NflAdapter {
    pub fn new(selector: String, standings_enabled: bool) -> Result<Self> {
        Ok(Self {
            base_url: None,
            selector,
            standings_enabled,
        })
    }

    #[cfg(test)]
    pub fn with_base_url(base_url: &str, selector: String, standings_enabled: bool) -> Self {
        Self {
            base_url: Some(base_url.to_string()),
            selector,
            standings_enabled,
        }
    }
}

fn normalize_team(team: &NflTeam) -> TeamInfo {
    TeamInfo {
        id: team.abbreviation.clone(),
        name: team.full_name.clone(),
        display_name: team
            .nick_name
            .clone()
            .unwrap_or_else(|| team.full_name.clone()),
    }
}

fn normalize_standings(rows: Vec<NflStandingRow>) -> StandingsSnapshot {
    StandingsSnapshot {
        rows: rows
            .into_iter()
            .map(|row| {
                let record = row.overall.unwrap_or_default();
                let name = row
                    .team
                    .full_name
                    .clone()
                    .unwrap_or_else(|| row.team.abbreviation.clone());
                StandingRow {
                    team: TeamInfo {
                        id: row.team.abbreviation,
                        display_name: row.team.nick_name.unwrap_or_else(|| name.clone()),
                        name,
                    },
                    wins: record.wins,
                    losses: record.losses,
                    ties: Some(record.ties),
                    win_pct: record.win_pct.map(|pct| format!("{pct:.3}")),
                    ..StandingRow::default()
                }
            })
            .collect(),
    }
}

#[async_trait]
impl SportAdapter for NflAdapter {
    fn sport(&self) -> Sport {
        Sport::Nfl
    }

    async fn fetch(&self) -> Result<SportSnapshot> {
        // Fresh token per cycle; a failed exchange fails this fetch only
        let client = NflClient::connect(self.base_url.as_deref()).await?;

        let current_week = client.week_by_date(Utc::now().date_naive()).await?;
        debug!(sport = "NFL", ?current_week, "resolved current week");

        let all_teams: Vec<TeamInfo> = client
            .teams(current_week.season)
            .await?
            .iter()
            .map(normalize_team)
            .collect();

        let standings = if self.standings_enabled {
            let week = standings_week(&current_week);
            let rows = client
                .standings(current_week.season, SeasonType::Reg.as_str(), week)
                .await?;
            Some(normalize_standings(rows))
        } else {
            None
        };

        let my_team = resolve_team(&self.selector, &all_teams);

        Ok(SportSnapshot {
            my_team,
            all_teams,
            standings,
            team_subs: team_subs::for_sport(Sport::Nfl),
            current_week: Some(current_week),
        })
    }
}
