//! Terminal output: styling, renderers and progress.
//!
//! Commands hand their results to a [`Renderer`] chosen once per run by
//! [`crate::app::AppContext`]; only this module decides how they look.

pub mod human;
pub mod json;
pub mod progress;
pub mod reporter;
pub mod styles;

use std::path::Path;

use anyhow::Result;
use console::Term;
use fleetprobe_common::{FleetConfig, PollReport};
use owo_colors::{OwoColorize as _, Style};

pub use human::HumanRenderer;
pub use json::JsonRenderer;
pub use styles::Styles;

/// Styling and terminal state shared by the renderers.
pub struct OutputContext {
    pub styles: Styles,
    /// Whether stdout is a terminal.
    pub is_tty: bool,
    /// Suppresses everything except errors and endpoint rows.
    pub quiet: bool,
}

impl OutputContext {
    /// Colours apply only when stdout is a terminal and `no_color` is off.
    ///
    /// `no_color` already folds in the `NO_COLOR` environment variable.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let mut styles = Styles::default();
        if is_tty && !no_color {
            styles.colorize();
        }
        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    pub fn success(&self, msg: &str) {
        self.status("✓", self.styles.success, msg);
    }

    pub fn warn(&self, msg: &str) {
        self.status("⚠", self.styles.warning, msg);
    }

    pub fn info(&self, msg: &str) {
        self.status("ℹ", self.styles.info, msg);
    }

    /// A step reported by an application service.
    pub fn step(&self, msg: &str) {
        self.status("→", self.styles.info, msg);
    }

    /// Report a failed command on stderr. Ignores `quiet`.
    pub fn error(&self, msg: &str) {
        eprintln!("{} {msg}", "Error:".style(self.styles.error));
    }

    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.style(self.styles.header));
        }
    }

    /// Dimmed key followed by its value.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", key.style(self.styles.dim));
        }
    }

    fn status(&self, glyph: &str, style: Style, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", glyph.style(style));
        }
    }
}

/// Output sink for command results, one variant per `--json` setting.
pub enum Renderer<'a> {
    Human(HumanRenderer<'a>),
    Json(JsonRenderer),
}

impl Renderer<'_> {
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn version(&self, version: &str) -> Result<()> {
        match self {
            Self::Human(r) => r.render_version(version),
            Self::Json(r) => r.render_version(version)?,
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn report(&self, report: &PollReport) -> Result<()> {
        match self {
            Self::Human(r) => r.render_report(report),
            Self::Json(r) => r.render_report(report)?,
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn probe(&self, address: &str, port: u16, reachable: bool) -> Result<()> {
        match self {
            Self::Human(r) => r.render_probe(address, port, reachable),
            Self::Json(r) => r.render_probe(address, port, reachable)?,
        }
        Ok(())
    }

    /// Cleanup totals. Human mode already saw each removal as a progress
    /// step, so only JSON mode prints a result.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn cleanup(&self, backend: &str, removed: usize, failed: usize) -> Result<()> {
        if let Self::Json(r) = self {
            r.render_cleanup(backend, removed, failed)?;
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn config_summary(&self, config: &FleetConfig, path: &Path) -> Result<()> {
        match self {
            Self::Human(r) => r.render_config_summary(config, path),
            Self::Json(r) => r.render_config_summary(config)?,
        }
        Ok(())
    }
}
