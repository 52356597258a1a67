//! Prowl push notifications.
//!
//! Error alerts go out through Prowl's public "add" endpoint. Send
//! failures are logged and swallowed; the notifier is never allowed to
//! take the schedule down with it.

use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::config::ProwlConfig;

const PROWL_ADD_URL: &str = "https://api.prowlapp.com/publicapi/add";

pub struct ProwlClient {
    http: Client,
    add_url: String,
    api_key: String,
    priority: i8,
    app_name: String,
}

impl ProwlClient {
    /// Build from config; notifications are enabled only when both the
    /// API key and a priority are set.
    pub fn from_config(config: &ProwlConfig, bot_name: &str) -> Option<Arc<Self>> {
        let api_key = config
            .error_api_key
            .clone()
            .filter(|key| !key.trim().is_empty())?;
        let priority = config.error_priority?;
        info!("Prowl error notifications enabled");
        Some(Arc::new(Self {
            http: Client::new(),
            add_url: PROWL_ADD_URL.to_string(),
            api_key,
            priority,
            app_name: format!("pennant - {bot_name}"),
        }))
    }

    #[cfg(test)]
    fn with_add_url(add_url: &str, api_key: &str, priority: i8, app_name: &str) -> Self {
        Self {
            http: Client::new(),
            add_url: add_url.to_string(),
            api_key: api_key.to_string(),
            priority,
            app_name: app_name.to_string(),
        }
    }

    /// Send a notification. Never propagates failure.
    pub async fn notify(&self, event: &str, description: &str) {
        debug!(
            "Sending notification to Prowl. Event: {event}, Priority: {}...",
            self.priority
        );
        let priority = self.priority.to_string();
        let form = [
            ("apikey", self.api_key.as_str()),
            ("application", self.app_name.as_str()),
            ("event", event),
            ("description", description),
            ("priority", priority.as_str()),
        ];

        match self.http.post(&self.add_url).form(&form).send().await {
            Ok(resp) if resp.status().is_success() => {
                info!("Notification successfully sent to Prowl");
            }
            Ok(resp) => {
                let status = resp.status();
                let body = resp.text().await.unwrap_or_default();
                error!("Error sending notification to Prowl: {status} - {body}");
            }
            Err(e) => {
                error!("Error sending notification to Prowl: {e}");
            }
        }
    }
}
