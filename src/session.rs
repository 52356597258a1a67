//! Platform session establishment.
//!
//! Multiple bot instances may share one login, so establishment is
//! serialized through the per-credential lock. The lock covers login and
//! community lookup only, never the update cycle.

use std::sync::Arc;
use tracing::{debug, error, info};

use crate::adapters::lemmy::{Community, CommunityApi, LemmyClient};
use crate::config::AppConfig;
use crate::context::AuthLockRegistry;
use crate::error::{error_chain, Result};
use crate::reporter::Reporter;

pub struct Session {
    pub lemmy: Arc<LemmyClient>,
    pub community: Community,
}

/// Log in and fetch the target community. Failures are reported to the
/// notifier and re-raised; they abort startup.
pub async fn initialize(
    config: &AppConfig,
    auth_locks: &AuthLockRegistry,
    reporter: &Reporter,
) -> Result<Session> {
    let lock = auth_locks.lock_for(&config.credential_identity()).await;
    let _guard = lock.lock().await;

    match establish(config).await {
        Ok(session) => Ok(session),
        Err(e) => {
            error!("Error encountered attempting to initialize Lemmy: {e}");
            reporter
                .error_notification("Error initializing Lemmy", &error_chain(&e))
                .await;
            Err(e)
        }
    }
}

async fn establish(config: &AppConfig) -> Result<Session> {
    debug!("Initiating Lemmy API session...");
    let lemmy = Arc::new(LemmyClient::new(&config.lemmy.instance)?);
    lemmy
        .login(&config.lemmy.username, &config.lemmy.password)
        .await?;

    info!("Fetching community [{}]", config.bot.community);
    let response = lemmy.get_community(&config.bot.community).await?;

    if !response.has_moderator(&config.lemmy.username) {
        // Not fatal; a later write attempt will fail explicitly instead
        error!(
            "User [{}] is not a moderator of community [{}]",
            config.lemmy.username, config.bot.community
        );
    }

    Ok(Session {
        lemmy,
        community: response.community_view.community,
    })
}
