#![allow(dead_code)]

use evalviz::loader;
use evalviz::trace::*;
use std::path::PathBuf;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

pub fn load_fixture(name: &str) -> Trace {
    match loader::load_path(fixture_path(name)) {
        Ok(trace) => trace,
        Err(err) => panic!("fixture {} failed to load: {}", name, err),
    }
}

pub fn evaluation(offset: usize) -> InstructionEvaluation {
    InstructionEvaluation {
        skip: false,
        is_generalization: false,
        visit_count: None,
        instruction: format!("insn@{}", offset),
        instruction_offset: Offset(offset),
        updated_worklist: None,
        variables_before: vec![],
        stack_before: vec![],
        nested_blocks: None,
    }
}

pub fn block(evaluations: Vec<InstructionEvaluation>) -> BlockEvaluation {
    BlockEvaluation {
        start_offset: evaluations
            .first()
            .map_or(Offset(0), |evaluation| evaluation.instruction_offset),
        start_variables: vec![],
        start_stack: vec![],
        exception_handler: None,
        worklist: vec![],
        evaluations,
    }
}

pub fn method(name: &str, blocks: Vec<BlockEvaluation>) -> MethodTrace {
    MethodTrace {
        class_name: String::from("com/example/Generated"),
        method_name: String::from(name),
        instructions: vec![],
        parameters: vec![],
        error: None,
        block_evaluations: blocks,
    }
}
