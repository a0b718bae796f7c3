//! Update a fixed set of command-line AI tools concurrently, with a live
//! status table and before/after version numbers.

pub mod cli;
pub mod config;
pub mod display;
pub mod probe;
pub mod process;
pub mod progress;
pub mod registry;
pub mod report;
pub mod runner;
pub mod types;
pub mod updater;
pub mod version;
