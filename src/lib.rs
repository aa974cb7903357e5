pub mod analyzer;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod prefs;
pub mod probe;
pub mod report;
pub mod scoring;
pub mod util;
