// Public modules
pub mod config;
pub mod error;
pub mod output;
pub mod rewrite;

// Re-export common types for convenience
pub use config::{FailurePolicy, RewriteConfig};
pub use error::{Error, ErrorCode, Result};
pub use output::{FileOutcome, FileStatus, RewriteReport, RewriteSummary};
pub use rewrite::{MatchMode, SubstitutionRule};
