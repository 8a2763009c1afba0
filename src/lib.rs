//! DASS-21 score analytics for student psychology test histories.
//!
//! - `severity`: sub-scale score to severity level and display color
//! - `history`: backend records to a numbered, display-ready history
//! - `trend`: change between two consecutive tests
//!
//! None of these return errors. Degenerate input maps to sentinel values
//! (`SeverityLevel::UNKNOWN`, empty history, `None` comparison).

pub mod history;
pub mod models;
pub mod report;
pub mod severity;
pub mod source;
pub mod trend;

#[cfg(test)]
mod test_support;

pub use history::transform_history;
pub use models::{ComparisonResult, NormalizedResult, OverallTrend, RawTestRecord, SeverityLevel};
pub use severity::classify;
pub use trend::compare;
