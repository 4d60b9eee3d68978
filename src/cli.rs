//! CLI domain: parse, route, help, output, and presentation only.
//! No layout logic; the route table dispatches to the library.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{
    format_layout_ascii, format_layout_json, format_layout_summary, format_scan_summary,
};
pub use route::RunContext;
