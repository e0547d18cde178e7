//! Recorded partial evaluator runs
//!
//! ### Structure
//!
//! A [`Trace`] is an ordered list of [`MethodTrace`]s, one per evaluated code attribute. Within a
//! method, evaluation happens one [`BlockEvaluation`] at a time: a block evaluation starts at some
//! offset with some abstract variables and stack, and then evaluates straight-line instructions
//! until it hits a branch, a return, or an instruction/context pair it has already seen. Each of
//! those steps is an [`InstructionEvaluation`], which captures the state _before_ the instruction
//! executes.
//!
//! Subroutines (`jsr`/`ret`) are evaluated as a recursive sub-trace: the instruction evaluation
//! invoking the subroutine carries its own sequence of block evaluations, with the same structure
//! as the top level.
//!
//! ### Ordering
//!
//! Every sequence in the model is in execution order. Nothing here reorders or deduplicates.
//!
//! ### Ownership
//!
//! Traces are never mutated after loading. Share them with [`std::sync::Arc`] rather than cloning.

mod block;
mod evaluation;
mod flags;
mod method;
mod statistics;

pub use block::*;
pub use evaluation::*;
pub use flags::*;
pub use method::*;
pub use statistics::*;

pub use crate::util::Offset;

use serde::{Deserialize, Serialize};

/// Full recorded history of one partial evaluator run
#[derive(Debug, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
pub struct Trace {
    /// Evaluated methods, in the order in which they were evaluated
    #[serde(rename = "codeAttributes")]
    pub methods: Vec<MethodTrace>,
}

impl Trace {
    pub fn new(methods: Vec<MethodTrace>) -> Trace {
        Trace { methods }
    }

    pub fn method_count(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Number of top-level instruction evaluations across all methods
    ///
    /// This is the number of distinct positions a top-level cursor can visit. Evaluations nested
    /// inside subroutine sub-traces are not included.
    pub fn total_evaluation_count(&self) -> usize {
        self.methods.iter().map(MethodTrace::evaluation_count).sum()
    }

    /// Find the index of the first method trace for the given class and method
    pub fn find_method(&self, class_name: &str, method_name: &str) -> Option<usize> {
        self.methods
            .iter()
            .position(|method| method.class_name == class_name && method.method_name == method_name)
    }
}
