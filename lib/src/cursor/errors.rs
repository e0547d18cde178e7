use std::error;
use std::fmt;

/// Navigation requests that can't be honoured
///
/// The cursor state is left untouched whenever one of these is returned.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum NavigationError {
    /// Requested index is past the end of a collection with `available` entries
    OutOfRange { requested: usize, available: usize },

    /// The current instruction evaluation has no sub-trace with any steps in it
    NoNestedEvaluations,

    /// The cursor is already at the top level
    NotNested,
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::OutOfRange {
                requested,
                available,
            } => write!(f, "index {} is out of range ({} available)", requested, available),
            NavigationError::NoNestedEvaluations => {
                write!(f, "instruction has no nested block evaluations")
            }
            NavigationError::NotNested => write!(f, "not inside a nested block evaluation"),
        }
    }
}

impl error::Error for NavigationError {}
