//! Interview Coach Terminal Service
//!
//! Configuration, argument parsing and the interactive terminal front-end
//! around the `coach-core` session controller. The `coach` binary is a thin
//! wrapper around this library.

pub mod app;
pub mod cli;
pub mod config;
pub mod render;
