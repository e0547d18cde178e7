use std::fmt;

/// Indices into one level of block evaluations
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct Frame {
    /// Index of the block evaluation
    pub block: usize,

    /// Index of the instruction evaluation within the block evaluation
    pub eval: usize,
}

impl Frame {
    pub const START: Frame = Frame { block: 0, eval: 0 };

    pub fn new(block: usize, eval: usize) -> Frame {
        Frame { block, eval }
    }
}

/// Top-level position of a cursor
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct Position {
    pub method: usize,
    pub block: usize,
    pub eval: usize,
}

impl Position {
    pub const START: Position = Position {
        method: 0,
        block: 0,
        eval: 0,
    };

    pub fn new(method: usize, block: usize, eval: usize) -> Position {
        Position {
            method,
            block,
            eval,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.method, self.block, self.eval)
    }
}
