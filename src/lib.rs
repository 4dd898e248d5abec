//! Copy images matching a set of glob patterns
//! from a source directory into a destination directory.

pub mod config;
pub mod copy;
pub mod report;

pub use config::Config;
pub use copy::{copy_file_with_metadata, run, run_with};
pub use report::{CopyOutcome, CopyReport};
