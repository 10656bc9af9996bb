//! Import summary type

use std::fmt;

/// What happened to a single data line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// Parsed and inserted
    Imported,
    /// Parsed, but the id already existed in the store
    Duplicate,
    /// Failed parsing or validation
    Malformed,
}

/// Counts produced by one import invocation
///
/// Returned only once every file has finished; a cancelled import yields no
/// outcome at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportOutcome {
    /// Records inserted into the store
    pub imported: usize,

    /// Well-formed records whose id already existed in the store
    pub duplicate: usize,

    /// Lines that failed parsing or validation
    pub malformed: usize,
}

impl ImportOutcome {
    pub fn new(imported: usize, duplicate: usize, malformed: usize) -> Self {
        Self {
            imported,
            duplicate,
            malformed,
        }
    }

    /// Count one line's outcome
    pub fn record(&mut self, outcome: LineOutcome) {
        match outcome {
            LineOutcome::Imported => self.imported += 1,
            LineOutcome::Duplicate => self.duplicate += 1,
            LineOutcome::Malformed => self.malformed += 1,
        }
    }

    /// Number of data lines accounted for
    pub fn total(&self) -> usize {
        self.imported + self.duplicate + self.malformed
    }
}

impl fmt::Display for ImportOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Imported: {}, Duplicates: {}, Malformed: {}",
            self.imported, self.duplicate, self.malformed
        )
    }
}
