use super::{BlockEvaluation, BranchTarget, EvaluationFlags, Offset};
use crate::util::null_as_default;
use serde::{Deserialize, Serialize};

/// State immediately before one instruction is evaluated
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructionEvaluation {
    /// This instruction was already evaluated in this exact context, so the branch is cut here
    #[serde(rename = "skipEvaluation", default, deserialize_with = "null_as_default")]
    pub skip: bool,

    /// The evaluator has seen this offset often enough that it generalized the tracked values
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_generalization: bool,

    /// How many times this offset had been visited when generalizing
    #[serde(rename = "evaluationCount", default)]
    pub visit_count: Option<u32>,

    /// Disassembled instruction
    pub instruction: String,

    pub instruction_offset: Offset,

    /// New worklist, present only if evaluating this instruction changed it
    #[serde(rename = "updatedEvaluationStack", default)]
    pub updated_worklist: Option<Vec<BranchTarget>>,

    pub variables_before: Vec<String>,

    pub stack_before: Vec<String>,

    /// Sub-trace of the subroutine invoked by this instruction
    #[serde(rename = "jsrBlockEvaluations", default)]
    pub nested_blocks: Option<Vec<BlockEvaluation>>,
}

impl InstructionEvaluation {
    pub fn flags(&self) -> EvaluationFlags {
        let mut flags = EvaluationFlags::empty();
        flags.set(EvaluationFlags::SKIP, self.skip);
        flags.set(EvaluationFlags::GENERALIZATION, self.is_generalization);
        flags
    }

    pub fn nested_blocks(&self) -> Option<&[BlockEvaluation]> {
        self.nested_blocks.as_deref()
    }

    pub fn changes_worklist(&self) -> bool {
        self.updated_worklist.is_some()
    }
}
