pub mod checker;
pub mod cli;
pub mod config;
pub mod deps;
pub mod error;
pub mod format;
pub mod hash;
pub mod orchestrator;
pub mod output;
pub mod record;
pub mod report;
pub mod scanner;
pub mod spreadsheet;
pub mod status;

pub use error::{Result, VeriscanError};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ISSUES_FOUND: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
