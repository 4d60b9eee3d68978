//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
///
/// List-valued settings (walk ignore patterns, logging modules) are left to
/// their serde defaults so a file that sets them replaces the list outright.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("layout.cell_size", 6.0)?
        .set_default("layout.min_intersection_buffer", 1.0)?
        .set_default("layout.max_anchor_attempts", 4096)?
        .set_default("layout.tie_break", "prefer_north")?
        .set_default("layout.on_exhausted", "abort")?
        .set_default("walk.follow_symlinks", false)?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")
}
