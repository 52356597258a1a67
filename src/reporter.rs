//! Status publishing and error alerting.
//!
//! One reporter per bot run. Failures it forwards to the notifier are
//! best-effort: a dead notifier never takes the schedule down with it.

use std::sync::Arc;
use tracing::debug;

use crate::adapters::prowl::ProwlClient;
use crate::status::{DetailedState, StatusBoard};

pub struct Reporter {
    bot_name: String,
    board: StatusBoard,
    prowl: Option<Arc<ProwlClient>>,
}

impl Reporter {
    pub fn new(bot_name: &str, prowl: Option<Arc<ProwlClient>>) -> Self {
        Self {
            bot_name: bot_name.to_string(),
            board: StatusBoard::new(),
            prowl,
        }
    }

    /// Handle for external status polling
    pub fn board(&self) -> StatusBoard {
        self.board.clone()
    }

    pub async fn publish(&self, state: DetailedState) {
        debug!("Bot status: {state:?}");
        self.board.publish(state).await;
    }

    /// Push an error alert for an unexpected failure. `detail` carries the
    /// flattened error chain; send failures are logged by the client and
    /// swallowed.
    pub async fn error_notification(&self, action: &str, detail: &str) {
        let Some(prowl) = &self.prowl else {
            return;
        };
        prowl
            .notify(
                &format!("{} - {action}!", self.bot_name),
                &format!("{action} for bot [{}]!\n\n{detail}", self.bot_name),
            )
            .await;
    }
}
