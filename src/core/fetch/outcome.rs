//! Fetch result types

use crate::core::transform::NormalizationStats;
use crate::domain::{Dataset, TickerError};
use std::fmt;

/// Why pagination stopped
#[derive(Debug)]
pub enum Termination {
    /// The last page carried no `next_url`
    Exhausted,

    /// A page request failed; records from earlier pages are kept
    Failed { page: usize, error: TickerError },

    /// `max_pages` pages were fetched and a continuation remained
    PageLimit { max_pages: usize },

    /// The API returned a cursor it had already handed out
    CursorRepeated { page: usize },
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Exhausted => write!(f, "exhausted"),
            Termination::Failed { page, error } => write!(f, "failed on page {page}: {error}"),
            Termination::PageLimit { max_pages } => write!(f, "page limit of {max_pages} reached"),
            Termination::CursorRepeated { page } => write!(f, "cursor repeated after page {page}"),
        }
    }
}

/// Records gathered by one fetch, plus how the walk ended
#[derive(Debug)]
pub struct FetchOutcome {
    /// Normalized records in arrival order
    pub dataset: Dataset,

    /// Pages successfully decoded
    pub pages: usize,

    pub termination: Termination,

    pub normalization: NormalizationStats,
}

impl FetchOutcome {
    /// True if every page was retrieved
    pub fn is_complete(&self) -> bool {
        matches!(self.termination, Termination::Exhausted)
    }

    /// The error that ended pagination, if any
    pub fn error(&self) -> Option<&TickerError> {
        match &self.termination {
            Termination::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}
