use crate::trace::{BranchTarget, EvaluationError, EvaluationFlags, ExceptionHandler, Offset};

/// Everything there is to show about the step a cursor is on
///
/// This borrows from the trace, so it is cheap to build after every command. When the cursor is
/// not on any step (eg. the trace is empty), every field is empty or `None`.
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct Projection<'a> {
    pub method_index: usize,
    pub block_index: usize,
    pub eval_index: usize,

    /// Subroutine nesting level (0 at the top level)
    pub depth: usize,

    pub class_name: &'a str,
    pub method_name: &'a str,
    pub method_error: Option<&'a EvaluationError>,

    pub instruction_text: &'a str,
    pub instruction_offset: Option<Offset>,

    /// Local variables immediately before the instruction
    pub variables_before: &'a [String],

    /// Operand stack immediately before the instruction
    pub stack_before: &'a [String],

    pub block_start_offset: Option<Offset>,

    /// Pending blocks, including any worklist update made by this step's own instruction
    pub pending_branch_worklist: &'a [BranchTarget],

    /// New worklist, if this very step changed it
    pub updated_worklist: Option<&'a [BranchTarget]>,

    pub flags: EvaluationFlags,
    pub visit_count: Option<u32>,

    /// Handler being evaluated, if the enclosing block evaluation is an exception handler
    pub exception_handler: Option<&'a ExceptionHandler>,

    /// The instruction has a subroutine sub-trace that can be entered
    pub has_nested: bool,
}

impl<'a> Projection<'a> {
    /// Is there no step to show?
    pub fn is_empty(&self) -> bool {
        self.instruction_offset.is_none()
    }

    pub fn skip(&self) -> bool {
        self.flags.contains(EvaluationFlags::SKIP)
    }

    pub fn is_generalization(&self) -> bool {
        self.flags.contains(EvaluationFlags::GENERALIZATION)
    }
}
