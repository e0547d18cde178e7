use super::ParseError;
use crate::trace::{BlockEvaluation, MethodTrace, Trace};

/// Check the structural invariants of a decoded trace
///
///   - instruction offsets within a method are strictly increasing (they are addresses in the
///     method code, so there can't be two instructions at the same offset)
///   - exception handler ranges don't end before they start
///
/// Sub-traces are walked with an explicit work stack, so deeply nested subroutines are fine.
pub fn validate(trace: &Trace) -> Result<(), ParseError> {
    for (method_idx, method) in trace.methods.iter().enumerate() {
        validate_method(method, &format!("codeAttributes[{}]", method_idx))?;
    }
    Ok(())
}

fn validate_method(method: &MethodTrace, path: &str) -> Result<(), ParseError> {
    for (idx, pair) in method.instructions.windows(2).enumerate() {
        if pair[1].offset <= pair[0].offset {
            return Err(ParseError::Invalid {
                path: format!("{}.instructions[{}].offset", path, idx + 1),
                message: format!(
                    "instruction offset {} does not follow previous offset {}",
                    pair[1].offset, pair[0].offset
                ),
            });
        }
    }

    let mut pending: Vec<(String, &[BlockEvaluation])> =
        vec![(format!("{}.blockEvaluations", path), &method.block_evaluations[..])];
    while let Some((blocks_path, blocks)) = pending.pop() {
        for (block_idx, block) in blocks.iter().enumerate() {
            if let Some(handler) = &block.exception_handler {
                if handler.catch_end_offset < handler.catch_start_offset {
                    return Err(ParseError::Invalid {
                        path: format!("{}[{}].exceptionHandlerInfo", blocks_path, block_idx),
                        message: format!(
                            "catch range ends at {} before it starts at {}",
                            handler.catch_end_offset, handler.catch_start_offset
                        ),
                    });
                }
            }

            for (eval_idx, evaluation) in block.evaluations.iter().enumerate() {
                if let Some(nested) = evaluation.nested_blocks() {
                    let nested_path = format!(
                        "{}[{}].evaluations[{}].jsrBlockEvaluations",
                        blocks_path, block_idx, eval_idx
                    );
                    pending.push((nested_path, nested));
                }
            }
        }
    }

    Ok(())
}
