pub mod cli;
pub mod configuration;
pub mod error;
pub mod progress;
pub mod puzzle_file;
pub mod report;
pub mod trace;
