//! Version command

use anyhow::Result;

use crate::app::AppContext;

/// Run the version command.
///
/// # Errors
///
/// Returns an error if JSON output cannot be produced.
pub fn run(app: &AppContext) -> Result<()> {
    app.renderer().version(env!("CARGO_PKG_VERSION"))
}
