//! CodeCity: deterministic city layouts for file trees
//!
//! Directories become streets, files become buildings. The layout engine
//! turns a validated [`tree::SourceTree`] into a collision-free integer tile
//! grid ([`layout::CityLayout`]) that renderers scale by a cell size.

pub mod cli;
pub mod config;
pub mod error;
pub mod layout;
pub mod logging;
pub mod tree;
