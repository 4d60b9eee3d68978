//! Integration tests for the CodeCity layout engine

mod config_integration;
mod layout_determinism;
mod scan_integration;
mod test_utils;
