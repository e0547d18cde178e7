use super::{InstructionEvaluation, Offset};
use serde::{Deserialize, Serialize};

/// One evaluation pass over a contiguous run of instructions, starting from some context
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockEvaluation {
    /// Offset of the first instruction evaluated
    pub start_offset: Offset,

    /// Abstract values of the local variables on entry
    pub start_variables: Vec<String>,

    /// Abstract values on the operand stack on entry
    pub start_stack: Vec<String>,

    /// Present iff this block is the entry into a registered exception handler
    #[serde(default, rename = "exceptionHandlerInfo")]
    pub exception_handler: Option<ExceptionHandler>,

    /// Pending blocks, as the worklist stood when this block evaluation began
    #[serde(rename = "branchEvaluationStack")]
    pub worklist: Vec<BranchTarget>,

    /// Instruction evaluations, in evaluation order
    ///
    /// This can be empty when the block is cut short immediately, because its start has already
    /// been evaluated in the same context.
    pub evaluations: Vec<InstructionEvaluation>,
}

impl BlockEvaluation {
    pub fn evaluation_count(&self) -> usize {
        self.evaluations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.evaluations.is_empty()
    }

    pub fn is_exception_handler(&self) -> bool {
        self.exception_handler.is_some()
    }

    /// Worklist as it stands once the instruction evaluation at `eval_index` is done
    ///
    /// This is the updated worklist of the latest evaluation up to and including `eval_index` that
    /// changed the worklist, falling back to the worklist the block started with. An update made
    /// by the evaluation at `eval_index` itself is included, so unlike its `variables_before` and
    /// `stack_before` this is state after the instruction.
    pub fn worklist_at(&self, eval_index: usize) -> &[BranchTarget] {
        let end = eval_index.saturating_add(1).min(self.evaluations.len());
        self.evaluations[..end]
            .iter()
            .rev()
            .find_map(|evaluation| evaluation.updated_worklist.as_deref())
            .unwrap_or(&self.worklist[..])
    }
}

/// Exception handler that a block evaluation is evaluating
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionHandler {
    /// Start of the protected range (inclusive)
    pub catch_start_offset: Offset,

    /// End of the protected range (exclusive)
    pub catch_end_offset: Offset,

    /// Entry point of the handler code
    pub handler_start_offset: Offset,

    /// Caught exception class, or `None` for a handler catching everything (eg. `finally`)
    #[serde(default)]
    pub catch_type: Option<String>,
}

impl ExceptionHandler {
    /// Is the offset within the protected range?
    pub fn covers(&self, offset: Offset) -> bool {
        self.catch_start_offset <= offset && offset < self.catch_end_offset
    }
}

/// Block that is waiting on the worklist to be evaluated
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchTarget {
    pub start_offset: Offset,

    /// Local variables to use once the block is evaluated
    pub start_variables: Vec<String>,

    /// Operand stack to use once the block is evaluated
    pub start_stack: Vec<String>,
}
