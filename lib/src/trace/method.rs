use super::{BlockEvaluation, MethodStatistics, Offset};
use crate::util::null_as_default;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Evaluation trace of one code attribute
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodTrace {
    /// Binary name of the class owning the method (eg. `com/example/Foo`)
    #[serde(rename = "clazz")]
    pub class_name: String,

    /// Method name and descriptor (eg. `bar(I)V`)
    #[serde(rename = "method")]
    pub method_name: String,

    /// Disassembled code, sorted by offset
    pub instructions: Vec<Instruction>,

    /// Printable abstract values of the method parameters
    #[serde(default, deserialize_with = "null_as_default")]
    pub parameters: Vec<String>,

    /// Fatal failure that aborted evaluation of the method
    #[serde(default)]
    pub error: Option<EvaluationError>,

    /// Block evaluations, in evaluation order
    pub block_evaluations: Vec<BlockEvaluation>,
}

impl MethodTrace {
    pub fn block_count(&self) -> usize {
        self.block_evaluations.len()
    }

    /// Number of top-level instruction evaluations in this method
    pub fn evaluation_count(&self) -> usize {
        self.block_evaluations
            .iter()
            .map(BlockEvaluation::evaluation_count)
            .sum()
    }

    /// Look up an instruction by its offset
    ///
    /// Note: this uses binary search, relying on instructions being sorted by offset
    pub fn instruction_at(&self, offset: Offset) -> Option<&Instruction> {
        self.instructions
            .binary_search_by_key(&offset, |instruction| instruction.offset)
            .ok()
            .map(|idx| &self.instructions[idx])
    }

    pub fn statistics(&self) -> MethodStatistics {
        MethodStatistics::of_blocks(&self.block_evaluations)
    }
}

impl fmt::Display for MethodTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.class_name, self.method_name)
    }
}

/// Disassembled instruction at some offset in the code
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub offset: Offset,

    #[serde(rename = "instruction")]
    pub text: String,
}

/// Failure that made the evaluator give up on a method
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct EvaluationError {
    /// Offset of the instruction whose evaluation failed
    #[serde(rename = "instructionOffset")]
    pub offset: Offset,

    pub message: String,
}
