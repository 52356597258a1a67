//! Update cycle controller.
//!
//! The state machine for one bot run: establish the platform session,
//! register the status and update jobs, invoke the first update
//! immediately, then idle on the stop signal. Steady-state failures are
//! contained to their tick; only configuration and initialization
//! failures terminate the run.

use regex::Regex;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::adapters::lemmy::CommunityApi;
use crate::adapters::prowl::ProwlClient;
use crate::config::AppConfig;
use crate::context::RunContext;
use crate::error::{error_chain, BotError, Result};
use crate::render::{Rendered, TemplateRenderer};
use crate::reporter::Reporter;
use crate::session;
use crate::sidebar;
use crate::sports::{self, SportAdapter, SportSnapshot};
use crate::status::DetailedState;

pub struct SidebarUpdater {
    config: Arc<AppConfig>,
    ctx: RunContext,
    reporter: Arc<Reporter>,
    renderer: Arc<TemplateRenderer>,
    pattern: Regex,
}

impl SidebarUpdater {
    pub fn new(config: AppConfig, ctx: RunContext) -> Result<Self> {
        let renderer = TemplateRenderer::new(config.bot.template_dir.as_deref())?;

        let pattern = match config
            .lemmy
            .standings_pattern
            .as_deref()
            .filter(|p| !p.trim().is_empty())
        {
            Some(pattern) => sidebar::compile_pattern(pattern)
                .map_err(|e| BotError::Validation(format!("invalid standings pattern: {e}")))?,
            None => sidebar::default_pattern().clone(),
        };

        let prowl = ProwlClient::from_config(&config.prowl, &config.bot.name);
        let reporter = Arc::new(Reporter::new(&config.bot.name, prowl));

        Ok(Self {
            config: Arc::new(config),
            ctx,
            reporter,
            renderer: Arc::new(renderer),
            pattern,
        })
    }

    /// Handle for external status polling
    pub fn reporter(&self) -> Arc<Reporter> {
        self.reporter.clone()
    }

    pub async fn run(self) -> Result<()> {
        self.reporter
            .publish(DetailedState::message("Starting up, please wait 1 minute..."))
            .await;

        let session =
            match session::initialize(&self.config, &self.ctx.auth_locks, &self.reporter).await {
                Ok(session) => session,
                Err(e) => {
                    self.ctx.stop.set();
                    self.shutdown().await;
                    return Err(e);
                }
            };

        let Some(sport) = self.config.bot.sport else {
            error!("No sport selected! Please set bot.sport. Aborting...");
            self.ctx.stop.set();
            self.shutdown().await;
            return Err(BotError::Validation("no sport selected".to_string()));
        };
        debug!("Bot set to sport: {sport}");

        if !self.config.lemmy.standings_enabled {
            warn!("Lemmy standings sync is disabled. Nothing to do!");
            self.ctx.stop.set();
            self.shutdown().await;
            return Ok(());
        }

        // Jobs already present mean an unclean prior shutdown; start clean
        let existing = self.ctx.scheduler.job_states().await;
        if !existing.is_empty() {
            warn!("Scheduler already has job(s) at startup: {existing:?}. Removing all...");
            self.ctx.scheduler.remove_all().await;
        }

        let adapter = sports::adapter_for(sport, &self.config)?;
        let cycle = Arc::new(UpdateCycle {
            adapter,
            platform: session.lemmy.clone(),
            renderer: self.renderer.clone(),
            reporter: self.reporter.clone(),
            pattern: self.pattern.clone(),
            community_name: self.config.bot.community.clone(),
            template_name: self.config.standings_template_name(sport),
            num_to_show: self.config.lemmy.standings_num_to_show,
        });

        // Status job: short interval, decoupled from the update cycle so
        // a stalled update never stalls status visibility
        let status_reporter = self.reporter.clone();
        let community = session.community.clone();
        let standings_enabled = self.config.lemmy.standings_enabled;
        self.ctx
            .scheduler
            .add_job(
                &format!("bot-{}-status-task", self.config.bot.name),
                Duration::from_secs(60),
                move || {
                    let reporter = status_reporter.clone();
                    let community = community.clone();
                    async move {
                        reporter
                            .publish(DetailedState::for_community(
                                &community,
                                sport,
                                standings_enabled,
                            ))
                            .await;
                    }
                },
            )
            .await;

        info!(
            "Scheduling sidebar update every [{}] minute(s)...",
            self.config.bot.update_interval_minutes
        );
        let scheduled_cycle = cycle.clone();
        self.ctx
            .scheduler
            .add_job(
                &format!("bot-{}-sidebar-update-task", self.config.bot.name),
                Duration::from_secs(self.config.bot.update_interval_minutes * 60),
                move || {
                    let cycle = scheduled_cycle.clone();
                    async move { cycle.tick().await }
                },
            )
            .await;

        debug!("Running the update once to get things started...");
        cycle.tick().await;

        while !self.ctx.stop.is_set() {
            tokio::select! {
                _ = self.ctx.stop.wait() => {}
                _ = tokio::time::sleep(Duration::from_secs(60)) => {
                    debug!(
                        "Scheduler jobs w/ next run times: {:?}",
                        self.ctx.scheduler.job_states().await
                    );
                }
            }
        }

        self.shutdown().await;
        Ok(())
    }

    /// Idempotent; reachable from any state
    async fn shutdown(&self) {
        self.ctx.scheduler.remove_all().await;
        self.ctx.stop.set();
        self.reporter
            .publish(DetailedState::message("The bot has been shut down."))
            .await;
        info!("Shutting down...");
    }
}

/// One sidebar update: fetch, render, splice, write. Any failure
/// abandons the tick; the schedule continues and the interval itself is
/// the retry mechanism.
pub struct UpdateCycle {
    pub adapter: Arc<dyn SportAdapter>,
    pub platform: Arc<dyn CommunityApi>,
    pub renderer: Arc<TemplateRenderer>,
    pub reporter: Arc<Reporter>,
    pub pattern: Regex,
    pub community_name: String,
    pub template_name: String,
    pub num_to_show: usize,
}

impl UpdateCycle {
    pub async fn tick(&self) {
        if let Err(e) = self.run_update().await {
            error!("Sidebar update failed: {e}");
            self.reporter
                .error_notification("Error updating sidebar", &error_chain(&e))
                .await;
        }
    }

    async fn run_update(&self) -> Result<()> {
        let snapshot = self.adapter.fetch().await?;

        let context = template_context(&snapshot, self.num_to_show);
        let standings_text = match self.renderer.render(&self.template_name, &context) {
            Rendered::Text(text) => text,
            Rendered::Failed(detail) => {
                self.reporter
                    .error_notification(
                        &format!("Error rendering template [{}]", self.template_name),
                        &detail,
                    )
                    .await;
                return Ok(());
            }
        };
        // Trim so the marker pair frames the block exactly; stray trailing
        // whitespace would otherwise accumulate outside the matched span
        // on every replace.
        let standings_text = standings_text.trim();
        if standings_text.is_empty() {
            warn!("Standings text is blank, skipping sidebar update/insert.");
            return Ok(());
        }

        // Re-read the description inside the same operation that writes
        // it back; the session-init snapshot may be stale by now
        let response = self.platform.get_community(&self.community_name).await?;
        let community = response.community_view.community;
        let existing = community.description.unwrap_or_default();

        let new_sidebar = sidebar::merge(&existing, standings_text, &self.pattern);

        let status = self
            .platform
            .edit_community_description(community.id, &new_sidebar)
            .await?;
        if status.is_success() {
            debug!("Finished updating sidebar for community [{}]", community.name);
        } else {
            error!("Failed to edit community sidebar (status {status})");
        }
        Ok(())
    }
}

fn template_context(snapshot: &SportSnapshot, num_to_show: usize) -> tera::Context {
    let mut context = tera::Context::new();
    context.insert("my_team", &snapshot.my_team);
    context.insert("all_teams", &snapshot.all_teams);
    context.insert("standings", &snapshot.standings);
    context.insert("team_subs", &snapshot.team_subs);
    context.insert("current_week", &snapshot.current_week);
    context.insert("num_to_show", &num_to_show);
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::lemmy::{Community, CommunityResponse, CommunityView, MockCommunityApi};
    use crate::sports::{MockSportAdapter, StandingRow, StandingsSnapshot, TeamInfo};
    use mockall::Sequence;
    use reqwest::StatusCode;

    fn snapshot() -> SportSnapshot {
        SportSnapshot {
            my_team: Some(TeamInfo {
                id: "142".to_string(),
                name: "Minnesota Twins".to_string(),
                display_name: "Twins".to_string(),
            }),
            standings: Some(StandingsSnapshot {
                rows: vec![StandingRow {
                    team: TeamInfo {
                        id: "142".to_string(),
                        name: "Minnesota Twins".to_string(),
                        display_name: "Twins".to_string(),
                    },
                    wins: 48,
                    losses: 33,
                    ..StandingRow::default()
                }],
            }),
            ..SportSnapshot::default()
        }
    }

    fn community_response(description: &str) -> CommunityResponse {
        CommunityResponse {
            community_view: CommunityView {
                community: Community {
                    id: 42,
                    name: "baseball".to_string(),
                    title: "Baseball".to_string(),
                    description: Some(description.to_string()),
                    actor_id: "https://fanaticus.social/c/baseball".to_string(),
                },
            },
            moderators: Vec::new(),
        }
    }

    fn cycle(adapter: MockSportAdapter, platform: MockCommunityApi) -> UpdateCycle {
        UpdateCycle {
            adapter: Arc::new(adapter),
            platform: Arc::new(platform),
            renderer: Arc::new(TemplateRenderer::new(None).unwrap()),
            reporter: Arc::new(Reporter::new("pennant", None)),
            pattern: sidebar::default_pattern().clone(),
            community_name: "baseball".to_string(),
            template_name: "mlb_standings.md".to_string(),
            num_to_show: 99,
        }
    }

    #[tokio::test]
    async fn test_failed_tick_does_not_block_the_next_one() {
        let mut adapter = MockSportAdapter::new();
        let mut seq = Sequence::new();
        adapter
            .expect_fetch()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Err(BotError::fetch("MLB", "provider down")));
        adapter
            .expect_fetch()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(snapshot()));

        let mut platform = MockCommunityApi::new();
        platform
            .expect_get_community()
            .times(1)
            .returning(|_| Ok(community_response("welcome")));
        platform
            .expect_edit_community_description()
            .times(1)
            .withf(|id, description| *id == 42 && description.contains("[](/pennant/standings)"))
            .returning(|_, _| Ok(StatusCode::OK));

        let cycle = cycle(adapter, platform);
        // First tick fails inside the fetch; second proceeds on schedule
        cycle.tick().await;
        cycle.tick().await;
    }

    #[tokio::test]
    async fn test_render_failure_skips_the_write() {
        let mut adapter = MockSportAdapter::new();
        adapter.expect_fetch().times(1).returning(|| Ok(snapshot()));

        // No platform expectations: any call would panic the test
        let platform = MockCommunityApi::new();

        let mut cycle = cycle(adapter, platform);
        cycle.template_name = "no_such_template.md".to_string();
        cycle.tick().await;
    }

    #[tokio::test]
    async fn test_blank_render_skips_the_write() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("blank.md")).unwrap();
        write!(file, "   \n  ").unwrap();

        let mut adapter = MockSportAdapter::new();
        adapter.expect_fetch().times(1).returning(|| Ok(snapshot()));
        let platform = MockCommunityApi::new();

        let mut cycle = cycle(adapter, platform);
        cycle.renderer = Arc::new(TemplateRenderer::new(Some(dir.path())).unwrap());
        cycle.template_name = "blank.md".to_string();
        cycle.tick().await;
    }

    #[tokio::test]
    async fn test_write_failure_status_is_logged_not_raised() {
        let mut adapter = MockSportAdapter::new();
        adapter.expect_fetch().times(1).returning(|| Ok(snapshot()));

        let mut platform = MockCommunityApi::new();
        platform
            .expect_get_community()
            .times(1)
            .returning(|_| Ok(community_response("welcome")));
        platform
            .expect_edit_community_description()
            .times(1)
            .returning(|_, _| Ok(StatusCode::BAD_REQUEST));

        cycle(adapter, platform).tick().await;
    }
}
