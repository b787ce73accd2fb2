//! Per-run state handed to every command handler.

use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer};

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

/// Output state built once from the global flags.
pub struct AppContext {
    pub output: OutputContext,
    pub mode: OutputMode,
}

impl AppContext {
    /// Progress lines are suppressed in JSON mode so stdout carries only
    /// the JSON document.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool, json: bool) -> Self {
        let mode = if json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };
        Self {
            output: OutputContext::new(no_color, quiet || json),
            mode,
        }
    }

    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Renderer for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }
}
