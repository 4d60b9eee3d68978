//! CLI help and command-name contract for logging.

use crate::cli::parse::Commands;

/// Command name string for log events (e.g. "layout", "scan").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Layout { .. } => "layout",
        Commands::Scan { .. } => "scan",
        Commands::Config => "config",
    }
}
