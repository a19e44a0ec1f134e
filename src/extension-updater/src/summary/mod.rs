//! Run summary types and helpers.

mod outcome;
mod run_summary;

pub use outcome::PublishOutcome;
pub use run_summary::RunSummary;
