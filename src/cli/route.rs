//! CLI route: single route table and run context. Dispatches to the library and presentation.

use crate::cli::help::command_name;
use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_layout_ascii, format_layout_json, format_layout_summary, format_scan_summary,
};
use crate::config::{CityConfig, ConfigLoader};
use crate::error::CityError;
use crate::layout::{build_layout, LayoutConfig, TieBreak};
use crate::tree::walker::Walker;
use crate::tree::SourceTree;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Runtime context for CLI execution: workspace and loaded configuration.
/// Built from workspace path and optional config path using ConfigLoader only.
pub struct RunContext {
    workspace_root: PathBuf,
    config: CityConfig,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, CityError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        Ok(Self::with_config(workspace_root, config))
    }

    /// Create run context with an already loaded configuration.
    pub fn with_config(workspace_root: PathBuf, config: CityConfig) -> Self {
        Self {
            workspace_root,
            config,
        }
    }

    pub fn config(&self) -> &CityConfig {
        &self.config
    }

    /// Run one command and return its printable output.
    pub fn execute(&self, command: &Commands) -> Result<String, CityError> {
        let started = Instant::now();
        let result = match command {
            Commands::Layout {
                tree,
                root,
                format,
                max_depth,
                tie_break,
                color,
            } => self.handle_layout(
                tree.as_deref(),
                root.as_deref(),
                format,
                *max_depth,
                *tie_break,
                *color,
            ),
            Commands::Scan { root, format } => self.handle_scan(root.as_deref(), format),
            Commands::Config => self.config.to_toml(),
        };
        info!(
            command = command_name(command),
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis(),
            "Command finished"
        );
        result
    }

    fn handle_layout(
        &self,
        tree_file: Option<&Path>,
        root: Option<&Path>,
        format: &str,
        max_depth: Option<u32>,
        tie_break: Option<TieBreak>,
        color: bool,
    ) -> Result<String, CityError> {
        let tree = match tree_file {
            Some(path) => {
                let json = std::fs::read_to_string(path)?;
                SourceTree::from_json(&json)?
            }
            None => self.scan(root)?,
        };

        let layout_config = self.layout_config(max_depth, tie_break)?;
        let layout = build_layout(&tree, &layout_config)?;

        match format {
            "ascii" => Ok(format_layout_ascii(&layout, color)),
            "summary" => Ok(format_layout_summary(&layout)),
            _ => format_layout_json(&layout),
        }
    }

    fn handle_scan(&self, root: Option<&Path>, format: &str) -> Result<String, CityError> {
        let tree = self.scan(root)?;
        match format {
            "summary" => Ok(format_scan_summary(&tree)),
            _ => tree.to_json(),
        }
    }

    fn scan(&self, root: Option<&Path>) -> Result<SourceTree, CityError> {
        let root = root.unwrap_or(&self.workspace_root);
        debug!(root = %root.display(), "Scanning source tree");
        let walker = Walker::with_config(root.to_path_buf(), self.config.walk.clone());
        Ok(walker.scan()?)
    }

    /// Configured layout settings with command-line overrides applied
    fn layout_config(
        &self,
        max_depth: Option<u32>,
        tie_break: Option<TieBreak>,
    ) -> Result<LayoutConfig, CityError> {
        let mut layout = self.config.layout.clone();
        if max_depth.is_some() {
            layout.max_depth = max_depth;
        }
        if let Some(tie_break) = tie_break {
            layout.tie_break = tie_break;
        }
        layout.validate().map_err(CityError::ConfigError)?;
        Ok(layout)
    }
}
