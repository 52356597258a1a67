//! Externally observable bot status.
//!
//! `DetailedState` is published for the embedding process to poll. Writers
//! replace the whole object; there is no field-level merge, so the status
//! job and the update cycle can interleave without torn reads.

use chrono::Local;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::adapters::lemmy::Community;
use crate::sports::Sport;

pub const TIMESTAMP_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

/// Human-readable summary in the three forms observers consume
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StateSummary {
    pub text: String,
    pub html: String,
    pub markdown: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetailedState {
    pub last_updated: Option<String>,
    pub summary: StateSummary,
}

impl DetailedState {
    /// A plain message state, identical in all three forms
    pub fn message(text: &str) -> Self {
        Self {
            last_updated: None,
            summary: StateSummary {
                text: text.to_string(),
                html: text.to_string(),
                markdown: text.to_string(),
            },
        }
    }

    /// The steady-state status line for a running bot
    pub fn for_community(community: &Community, sport: Sport, standings_enabled: bool) -> Self {
        let suffix = format!(
            "\n\nSport: {sport}\n\nLemmy Enabled (Standings): {standings_enabled}"
        );
        let html_suffix = format!(
            "<br /><br />Sport: {sport}<br /><br />Lemmy Enabled (Standings): {standings_enabled}"
        );
        Self {
            last_updated: Some(Local::now().format(TIMESTAMP_FORMAT).to_string()),
            summary: StateSummary {
                text: format!("Community: {}{suffix}", community.name),
                html: format!(
                    "Community: <a href=\"{}\" target=\"_blank\">{}</a>{html_suffix}",
                    community.actor_id, community.title
                ),
                markdown: format!(
                    "Community: [{}]({}){suffix}",
                    community.title, community.actor_id
                ),
            },
        }
    }
}

/// Shared slot holding the most recently published state
#[derive(Clone, Default)]
pub struct StatusBoard {
    state: Arc<RwLock<DetailedState>>,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whole-object replacement; never merges fields
    pub async fn publish(&self, state: DetailedState) {
        *self.state.write().await = state;
    }

    pub async fn snapshot(&self) -> DetailedState {
        self.state.read().await.clone()
    }
}
