//! Save, skip and error records kept for the verbose log.

use std::fmt;

use chrono::{DateTime, Utc};
use strum_macros::EnumIter;

/// Why a candidate asset was not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter)]
pub enum SkipReason {
    /// Below the configured minimum size
    TooSmall,
    /// Content fingerprint already claimed this session
    Duplicate,
    /// Inline script matched a filter rule
    Uninteresting,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::TooSmall => "small",
            SkipReason::Duplicate => "duplicate",
            SkipReason::Uninteresting => "uninteresting",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One save or skip decision, or a recorded error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub at: DateTime<Utc>,
    pub kind: DecisionKind,
    /// Source URL, `inline:<domain>` for inline scripts, or the error context
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionKind {
    Saved { filename: String },
    Skipped(SkipReason),
    Failed { message: String },
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let at = self.at.format("%Y-%m-%d %H:%M:%S%.3f");
        match &self.kind {
            DecisionKind::Saved { filename } => {
                write!(f, "{at} - SAVED - {filename} ({})", self.source)
            }
            DecisionKind::Skipped(reason) => {
                write!(f, "{at} - SKIPPED ({reason}) - {}", self.source)
            }
            DecisionKind::Failed { message } => {
                write!(f, "{at} - ERROR - {} - {message}", self.source)
            }
        }
    }
}
