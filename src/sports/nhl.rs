//! NHL adapter.
//!
//! Standings rows carry tri codes only; they are joined back to the
//! roster's numeric ids so the community link table keys keep working.

use async_trait::async_trait;
use std::collections::HashMap;
use tracing::debug;

use crate::adapters::nhl::{NhlClient, NhlStandingRow, NhlTeam};
use crate::error::Result;

use super::{
    resolve_team, team_subs, Sport, SportAdapter, SportSnapshot, StandingRow, StandingsSnapshot,
    TeamInfo,
};

pub struct NhlAdapter {
    client: NhlClient,
    selector: String,
    standings_enabled: bool,
}

impl NhlAdapter {
    pub fn new(selector: String, standings_enabled: bool) -> Result<Self> {
        Ok(Self {
            client: NhlClient::new()?,
            selector,
            standings_enabled,
        })
    }

}

fn normalize_team(team: &NhlTeam) -> TeamInfo {
    TeamInfo {
        id: team.id.to_string(),
        name: team.full_name.clone(),
        display_name: team.full_name.clone(),
    }
}

fn normalize_standings(rows: Vec<NhlStandingRow>, roster: &[NhlTeam]) -> StandingsSnapshot {
    let ids_by_tri_code: HashMap<&str, i64> = roster
        .iter()
        .filter_map(|team| team.tri_code.as_deref().map(|code| (code, team.id)))
        .collect();

    StandingsSnapshot {
        rows: rows
            .into_iter()
            .map(|row| {
                let id = ids_by_tri_code
                    .get(row.team_abbrev.default.as_str())
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| row.team_abbrev.default.clone());
                StandingRow {
                    team: TeamInfo {
                        id,
                        name: row.team_name.default.clone(),
                        display_name: if row.team_common_name.default.is_empty() {
                            row.team_name.default
                        } else {
                            row.team_common_name.default
                        },
                    },
                    wins: row.wins,
                    losses: row.losses,
                    ot_losses: Some(row.ot_losses),
                    games_played: Some(row.games_played),
                    points: Some(row.points),
                    division: row.division_name,
                    conference: row.conference_name,
                    ..StandingRow::default()
                }
            })
            .collect(),
    }
}

#[async_trait]
impl SportAdapter for NhlAdapter {
    fn sport(&self) -> Sport {
        Sport::Nhl
    }

    async fn fetch(&self) -> Result<SportSnapshot> {
        let roster = self.client.teams().await?;
        let all_teams: Vec<TeamInfo> = roster.iter().map(normalize_team).collect();

        let standings = if self.standings_enabled {
            Some(normalize_standings(
                self.client.standings_now().await?,
                &roster,
            ))
        } else {
            None
        };

        let my_team = resolve_team(&self.selector, &all_teams);
        debug!(sport = "NHL", my_team = ?my_team, teams = all_teams.len(), "fetched provider data");

        Ok(SportSnapshot {
            my_team,
            all_teams,
            standings,
            team_subs: team_subs::for_sport(Sport::Nhl),
            current_week: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::nhl::LocalizedString;

    fn localized(text: &str) -> LocalizedString {
        LocalizedString {
            default: text.to_string(),
        }
    }

    fn roster() -> Vec<NhlTeam> {
        vec![
            NhlTeam {
                id: 30,
                full_name: "Minnesota Wild".to_string(),
                tri_code: Some("MIN".to_string()),
            },
            NhlTeam {
                id: 1,
                full_name: "New Jersey Devils".to_string(),
                tri_code: Some("NJD".to_string()),
            },
        ]
    }

    fn standings_row(abbrev: &str, name: &str, points: u32) -> NhlStandingRow {
        NhlStandingRow {
            team_abbrev: localized(abbrev),
            team_name: localized(name),
            team_common_name: LocalizedString::default(),
            games_played: 82,
            wins: 45,
            losses: 30,
            ot_losses: 7,
            points,
            division_name: Some("Central".to_string()),
            conference_name: Some("Western".to_string()),
        }
    }

    #[test]
    fn test_standings_join_back_to_numeric_ids() {
        let rows = vec![standings_row("MIN", "Minnesota Wild", 97)];
        let snapshot = normalize_standings(rows, &roster());

        let row = &snapshot.rows[0];
        assert_eq!(row.team.id, "30");
        assert_eq!(row.points, Some(97));
        assert_eq!(row.ot_losses, Some(7));
    }

    #[test]
    fn test_unknown_tri_code_keeps_abbrev_as_id() {
        let rows = vec![standings_row("UTA", "Utah Hockey Club", 80)];
        let snapshot = normalize_standings(rows, &roster());
        assert_eq!(snapshot.rows[0].team.id, "UTA");
    }
}
