//! Standings template rendering.
//!
//! Bundled default templates ship in the binary, one per sport; a
//! configured override directory is layered on top and wins on name
//! collision. Render failures degrade to `Rendered::Failed` instead of
//! propagating; callers must treat that (or blank output) as "nothing to
//! publish this cycle".

use std::path::Path;
use tera::Tera;
use tracing::{debug, error};

use crate::error::{error_chain, Result};

const BUNDLED_TEMPLATES: &[(&str, &str)] = &[
    ("mlb_standings.md", include_str!("../templates/mlb_standings.md")),
    ("nba_standings.md", include_str!("../templates/nba_standings.md")),
    ("nfl_standings.md", include_str!("../templates/nfl_standings.md")),
    ("nhl_standings.md", include_str!("../templates/nhl_standings.md")),
];

/// Outcome of a render: text to publish, or a failure already logged.
/// `Failed` carries the flattened error detail for the notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Text(String),
    Failed(String),
}

impl Rendered {
    pub fn is_failed(&self) -> bool {
        matches!(self, Rendered::Failed(_))
    }
}

pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Build the renderer from the bundled set plus an optional override
    /// directory. A missing override directory is a startup error; a
    /// malformed template in it is too.
    pub fn new(override_dir: Option<&Path>) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(BUNDLED_TEMPLATES.to_vec())?;

        if let Some(dir) = override_dir {
            for entry in std::fs::read_dir(dir)? {
                let path = entry?.path();
                if !path.is_file() {
                    continue;
                }
                let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned())
                else {
                    continue;
                };
                debug!("Loading template override [{name}] from {}", dir.display());
                tera.add_template_file(&path, Some(&name))?;
            }
        }

        // Output is markdown; never HTML-escape
        tera.autoescape_on(vec![]);

        Ok(Self { tera })
    }

    /// Render a template by name. Never propagates render errors.
    pub fn render(&self, template_name: &str, context: &tera::Context) -> Rendered {
        debug!("Rendering template [{template_name}]...");
        match self.tera.render(template_name, context) {
            Ok(text) => {
                debug!("Rendered template [{template_name}]: {text}");
                Rendered::Text(text)
            }
            Err(e) => {
                let detail = error_chain(&e);
                error!("Error rendering template [{template_name}]: {detail}");
                Rendered::Failed(detail)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sports::{StandingRow, StandingsSnapshot, TeamInfo};
    use std::collections::HashMap;
    use std::io::Write;

    fn team(id: &str, name: &str, display: &str) -> TeamInfo {
        TeamInfo {
            id: id.to_string(),
            name: name.to_string(),
            display_name: display.to_string(),
        }
    }

    fn row(id: &str, name: &str, wins: u32, losses: u32) -> StandingRow {
        StandingRow {
            team: team(id, name, name),
            wins,
            losses,
            ..StandingRow::default()
        }
    }

    fn context_with_standings() -> tera::Context {
        let my_team = team("142", "Minnesota Twins", "Twins");
        let standings = StandingsSnapshot {
            rows: vec![row("114", "Cleveland Guardians", 50, 31), row("142", "Minnesota Twins", 48, 33)],
        };
        let mut subs = HashMap::new();
        subs.insert("142".to_string(), "/c/minnesotatwins@fanaticus.social".to_string());

        let mut ctx = tera::Context::new();
        ctx.insert("my_team", &Some(my_team));
        ctx.insert("standings", &Some(standings));
        ctx.insert("team_subs", &subs);
        ctx.insert("num_to_show", &99usize);
        ctx.insert("all_teams", &Vec::<TeamInfo>::new());
        ctx.insert("current_week", &Option::<crate::sports::CurrentWeek>::None);
        ctx
    }

    #[test]
    fn test_bundled_template_renders_markers_and_rows() {
        let renderer = TemplateRenderer::new(None).unwrap();
        let rendered = renderer.render("mlb_standings.md", &context_with_standings());

        let Rendered::Text(text) = rendered else {
            panic!("expected rendered text");
        };
        assert_eq!(text.matches("[](/pennant/standings)").count(), 2);
        assert!(text.contains("[Minnesota Twins](/c/minnesotatwins@fanaticus.social)"));
        assert!(text.contains("| Cleveland Guardians | 50 | 31 |"));
    }

    #[test]
    fn test_no_standings_still_renders() {
        let renderer = TemplateRenderer::new(None).unwrap();
        let mut ctx = context_with_standings();
        ctx.insert("standings", &Option::<StandingsSnapshot>::None);

        let rendered = renderer.render("mlb_standings.md", &ctx);
        let Rendered::Text(text) = rendered else {
            panic!("expected rendered text");
        };
        assert_eq!(text.matches("[](/pennant/standings)").count(), 2);
        assert!(!text.contains("| Team |"));
    }

    #[test]
    fn test_missing_template_fails_without_panicking() {
        let renderer = TemplateRenderer::new(None).unwrap();
        let rendered = renderer.render("no_such_template.md", &tera::Context::new());
        assert!(rendered.is_failed());
    }

    #[test]
    fn test_num_to_show_limits_rows() {
        let renderer = TemplateRenderer::new(None).unwrap();
        let mut ctx = context_with_standings();
        ctx.insert("num_to_show", &1usize);

        let Rendered::Text(text) = renderer.render("mlb_standings.md", &ctx) else {
            panic!("expected rendered text");
        };
        assert!(text.contains("Cleveland Guardians"));
        assert!(!text.contains("| [Minnesota Twins]"));
    }

    #[test]
    fn test_override_directory_wins_over_bundled() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("mlb_standings.md")).unwrap();
        writeln!(file, "custom {{{{ num_to_show }}}}").unwrap();

        let renderer = TemplateRenderer::new(Some(dir.path())).unwrap();
        let Rendered::Text(text) = renderer.render("mlb_standings.md", &context_with_standings())
        else {
            panic!("expected rendered text");
        };
        assert_eq!(text.trim(), "custom 99");
    }
}
