//! CLI library components for the slide shuffler.

pub mod cli;
pub mod exit;
pub mod logging;
pub mod paths;
pub mod summary;
