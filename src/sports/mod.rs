//! Sport adapters.
//!
//! One variant per league, each normalizing its provider's shapes into
//! the common `SportSnapshot` consumed by rendering. The controller
//! depends only on the `SportAdapter` trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::{BotError, Result};

pub mod mlb;
pub mod nba;
pub mod nfl;
pub mod nhl;
pub mod team_subs;

pub use mlb::MlbAdapter;
pub use nba::NbaAdapter;
pub use nfl::NflAdapter;
pub use nhl::NhlAdapter;

/// Supported leagues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sport {
    Mlb,
    Nba,
    Nfl,
    Nhl,
}

impl Sport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sport::Mlb => "MLB",
            Sport::Nba => "NBA",
            Sport::Nfl => "NFL",
            Sport::Nhl => "NHL",
        }
    }

    /// Lowercase key used for config fields and template names
    pub fn key(&self) -> &'static str {
        match self {
            Sport::Mlb => "mlb",
            Sport::Nba => "nba",
            Sport::Nfl => "nfl",
            Sport::Nhl => "nhl",
        }
    }

    pub fn default_template_name(&self) -> String {
        format!("{}_standings.md", self.key())
    }
}

impl std::fmt::Display for Sport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normalized team record; `id` is the provider's identifier rendered as
/// a string (numeric for MLB/NBA/NHL, abbreviation for NFL)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TeamInfo {
    pub id: String,
    pub name: String,
    pub display_name: String,
}

/// One normalized standings row; optional fields apply per sport
#[derive(Debug, Clone, Default, Serialize)]
pub struct StandingRow {
    pub team: TeamInfo,
    pub wins: u32,
    pub losses: u32,
    pub ties: Option<u32>,
    pub ot_losses: Option<u32>,
    pub games_played: Option<u32>,
    pub points: Option<u32>,
    pub win_pct: Option<String>,
    pub games_back: Option<String>,
    pub rank: Option<String>,
    pub division: Option<String>,
    pub conference: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StandingsSnapshot {
    pub rows: Vec<StandingRow>,
}

/// NFL season phase, as reported by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SeasonType {
    Pre,
    Reg,
    Post,
    #[serde(other)]
    Off,
}

impl SeasonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeasonType::Pre => "PRE",
            SeasonType::Reg => "REG",
            SeasonType::Post => "POST",
            SeasonType::Off => "OFF",
        }
    }
}

/// Current period for schedule-driven sports. Field names arrive
/// camelCased from the provider but serialize snake_cased for templates.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct CurrentWeek {
    pub season: i32,
    pub season_type: SeasonType,
    pub week: u32,
}

/// Everything one fetch produces, normalized for rendering
#[derive(Debug, Clone, Default, Serialize)]
pub struct SportSnapshot {
    pub my_team: Option<TeamInfo>,
    pub all_teams: Vec<TeamInfo>,
    pub standings: Option<StandingsSnapshot>,
    pub team_subs: HashMap<String, String>,
    pub current_week: Option<CurrentWeek>,
}

/// Per-league fetch capability
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SportAdapter: Send + Sync {
    fn sport(&self) -> Sport;

    /// One cycle's worth of fresh provider data
    async fn fetch(&self) -> Result<SportSnapshot>;
}

/// Resolve a `"label|id"` selector against a team list by exact id
/// match. No match is `None`, not an error; rendering degrades
/// gracefully without a chosen team.
pub fn resolve_team(selector: &str, teams: &[TeamInfo]) -> Option<TeamInfo> {
    let id = selector_id(selector)?;
    teams.iter().find(|team| team.id == id).cloned()
}

/// The id half of a `"label|id"` selector
pub fn selector_id(selector: &str) -> Option<&str> {
    selector
        .split('|')
        .nth(1)
        .map(str::trim)
        .filter(|id| !id.is_empty())
}

/// Build the adapter for the configured sport. The config is validated
/// by the time this runs, so a missing selector is a hard error.
pub fn adapter_for(sport: Sport, config: &AppConfig) -> Result<Arc<dyn SportAdapter>> {
    let selector = config
        .team_selector(sport)
        .ok_or_else(|| {
            BotError::Validation(format!("no team selected for {sport}"))
        })?
        .to_string();
    let standings_enabled = config.lemmy.standings_enabled;

    Ok(match sport {
        Sport::Mlb => Arc::new(MlbAdapter::new(selector, standings_enabled)?),
        Sport::Nba => Arc::new(NbaAdapter::new(selector, standings_enabled)?),
        Sport::Nfl => Arc::new(NflAdapter::new(selector, standings_enabled)?),
        Sport::Nhl => Arc::new(NhlAdapter::new(selector, standings_enabled)?),
    })
}
