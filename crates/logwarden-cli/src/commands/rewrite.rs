//! Rewrite command implementation.

use crate::cli::RewriteArgs;
use crate::error::{CliError, Result};
use logwarden_janitor::{Janitor, LogwardenConfig};
use std::fs;

/// Compute the rewritten content of one file.
///
/// Content without stanzas comes back unchanged. The path is made absolute
/// first so overrides keyed by absolute path match relative arguments.
pub fn render_file(args: &RewriteArgs, mut config: LogwardenConfig) -> Result<String> {
    if let Some(retention) = args.retention {
        config.retention = retention;
    }

    let io_error = |source| CliError::Io {
        path: args.file.clone(),
        source,
    };
    let file = fs::canonicalize(&args.file).map_err(io_error)?;
    let raw = fs::read_to_string(&file).map_err(io_error)?;

    let janitor = Janitor::new(config);
    match janitor.render(&file, &raw)? {
        Some(rendered) => Ok(rendered.content),
        None => {
            tracing::info!("{} has no stanzas", args.file.display());
            Ok(raw)
        }
    }
}

/// Execute the rewrite command.
pub fn execute_rewrite(args: RewriteArgs, config: LogwardenConfig) -> Result<()> {
    print!("{}", render_file(&args, config)?);
    Ok(())
}
