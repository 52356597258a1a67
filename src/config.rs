use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::sports::Sport;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub bot: BotConfig,
    pub lemmy: LemmyConfig,
    #[serde(default)]
    pub teams: TeamsConfig,
    #[serde(default)]
    pub prowl: ProwlConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Bot instance name; scopes scheduled-job ids and notifier identity
    #[serde(default = "default_bot_name")]
    pub name: String,
    /// Which league to sync standings for. Required; the engine refuses to
    /// run without it.
    pub sport: Option<Sport>,
    /// Machine name of the target community
    pub community: String,
    /// Minutes between sidebar updates (>= 1)
    #[serde(default = "default_update_interval")]
    pub update_interval_minutes: u64,
    /// Optional directory of template overrides, searched before the
    /// bundled defaults
    #[serde(default)]
    pub template_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LemmyConfig {
    /// Instance base URL, e.g. "https://fanaticus.social"
    pub instance: String,
    pub username: String,
    pub password: String,
    /// Master switch for the standings sync; the bot has no idle mode
    #[serde(default)]
    pub standings_enabled: bool,
    /// Template name override; defaults to "<sport>_standings.md"
    #[serde(default)]
    pub standings_template: Option<String>,
    /// Splice pattern override; defaults to the marker-pair pattern
    #[serde(default)]
    pub standings_pattern: Option<String>,
    /// Maximum standings rows passed to the template
    #[serde(default = "default_num_to_show")]
    pub standings_num_to_show: usize,
}

/// Per-sport "label|id" team selectors. Only the active sport's entry is
/// required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamsConfig {
    #[serde(default)]
    pub mlb: Option<String>,
    #[serde(default)]
    pub nba: Option<String>,
    #[serde(default)]
    pub nfl: Option<String>,
    #[serde(default)]
    pub nhl: Option<String>,
}

/// Prowl error notifications; disabled unless both fields are set
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProwlConfig {
    #[serde(default)]
    pub error_api_key: Option<String>,
    #[serde(default)]
    pub error_priority: Option<i8>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable JSON formatted logs
    #[serde(default)]
    pub json: bool,
    /// Optional directory for a daily-rotating log file
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            dir: None,
        }
    }
}

fn default_bot_name() -> String {
    "pennant".to_string()
}

fn default_update_interval() -> u64 {
    60
}

fn default_num_to_show() -> usize {
    99
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load configuration from files and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            // Load default config file
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Load environment-specific config (e.g., config/production.toml)
            .add_source(
                File::from(config_dir.join(
                    std::env::var("PENNANT_ENV").unwrap_or_else(|_| "development".to_string()),
                ))
                .required(false),
            )
            // Override with environment variables (PENNANT_LEMMY__INSTANCE, etc.)
            .add_source(
                Environment::with_prefix("PENNANT")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration values, collecting every problem
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.bot.sport.is_none() {
            errors.push(
                "no sport selected! Set bot.sport to one of MLB, NBA, NFL, NHL".to_string(),
            );
        }

        if self.bot.community.trim().is_empty() {
            errors.push("bot.community must be set".to_string());
        }

        if self.bot.update_interval_minutes < 1 {
            errors.push("bot.update_interval_minutes must be at least 1".to_string());
        }

        for (field, value) in [
            ("lemmy.instance", &self.lemmy.instance),
            ("lemmy.username", &self.lemmy.username),
            ("lemmy.password", &self.lemmy.password),
        ] {
            if value.trim().is_empty() {
                errors.push(format!("{field} must be set"));
            }
        }

        if let Some(sport) = self.bot.sport {
            match self.team_selector(sport) {
                None => errors.push(format!(
                    "no team selected! Set teams.{} to a \"label|id\" selector",
                    sport.key()
                )),
                Some(selector) if !selector.contains('|') => errors.push(format!(
                    "teams.{} must be of the form \"label|id\", got [{selector}]",
                    sport.key()
                )),
                Some(_) => {}
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// The configured "label|id" selector for a sport, if any
    pub fn team_selector(&self, sport: Sport) -> Option<&str> {
        let selector = match sport {
            Sport::Mlb => self.teams.mlb.as_deref(),
            Sport::Nba => self.teams.nba.as_deref(),
            Sport::Nfl => self.teams.nfl.as_deref(),
            Sport::Nhl => self.teams.nhl.as_deref(),
        };
        selector.filter(|s| !s.trim().is_empty())
    }

    /// Template to render for a sport, honoring the configured override
    pub fn standings_template_name(&self, sport: Sport) -> String {
        self.lemmy
            .standings_template
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| sport.default_template_name())
    }

    /// Identity key for the cross-instance auth lock; bots sharing a login
    /// share this key
    pub fn credential_identity(&self) -> String {
        format!("{}:{}", self.lemmy.instance, self.lemmy.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> AppConfig {
        AppConfig {
            bot: BotConfig {
                name: "pennant".to_string(),
                sport: Some(Sport::Mlb),
                community: "baseball".to_string(),
                update_interval_minutes: 60,
                template_dir: None,
            },
            lemmy: LemmyConfig {
                instance: "https://fanaticus.social".to_string(),
                username: "pennant-bot".to_string(),
                password: "hunter2".to_string(),
                standings_enabled: true,
                standings_template: None,
                standings_pattern: None,
                standings_num_to_show: 99,
            },
            teams: TeamsConfig {
                mlb: Some("Minnesota Twins|142".to_string()),
                ..TeamsConfig::default()
            },
            prowl: ProwlConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_missing_sport_rejected() {
        let mut config = base_config();
        config.bot.sport = None;
        let errors = config.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.contains("no sport selected")));
    }

    #[test]
    fn test_missing_team_selector_rejected() {
        let mut config = base_config();
        config.teams.mlb = None;
        let errors = config.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.contains("no team selected")));
    }

    #[test]
    fn test_malformed_team_selector_rejected() {
        let mut config = base_config();
        config.teams.mlb = Some("just-a-label".to_string());
        let errors = config.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.contains("label|id")));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut config = base_config();
        config.bot.update_interval_minutes = 0;
        let errors = config.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.contains("update_interval_minutes")));
    }

    #[test]
    fn test_template_name_defaults_per_sport() {
        let mut config = base_config();
        assert_eq!(config.standings_template_name(Sport::Nhl), "nhl_standings.md");
        config.lemmy.standings_template = Some("my_custom.md".to_string());
        assert_eq!(config.standings_template_name(Sport::Nhl), "my_custom.md");
    }
}
