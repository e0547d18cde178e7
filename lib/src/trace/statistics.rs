use super::BlockEvaluation;

/// Aggregate counts over a method trace, including nested subroutine sub-traces
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub struct MethodStatistics {
    /// Block evaluations at every depth
    pub blocks: usize,

    /// Instruction evaluations at every depth
    pub evaluations: usize,

    /// Instruction evaluations marked as skipped
    pub skipped: usize,

    /// Instruction evaluations marked as generalizations
    pub generalized: usize,

    /// Block evaluations evaluating an exception handler
    pub exception_handler_blocks: usize,

    /// Block evaluations that are part of a subroutine sub-trace
    pub nested_blocks: usize,

    /// Deepest subroutine nesting (0 if there are no sub-traces)
    pub max_depth: usize,
}

impl MethodStatistics {
    /// Tally up a sequence of block evaluations
    ///
    /// Sub-traces are visited with an explicit work stack, so deep nesting doesn't grow the call
    /// stack.
    pub fn of_blocks(blocks: &[BlockEvaluation]) -> MethodStatistics {
        let mut stats = MethodStatistics::default();
        let mut pending: Vec<(usize, &[BlockEvaluation])> = vec![(0, blocks)];

        while let Some((depth, blocks)) = pending.pop() {
            stats.max_depth = stats.max_depth.max(depth);
            for block in blocks {
                stats.blocks += 1;
                if depth > 0 {
                    stats.nested_blocks += 1;
                }
                if block.is_exception_handler() {
                    stats.exception_handler_blocks += 1;
                }
                for evaluation in &block.evaluations {
                    stats.evaluations += 1;
                    if evaluation.skip {
                        stats.skipped += 1;
                    }
                    if evaluation.is_generalization {
                        stats.generalized += 1;
                    }
                    if let Some(nested) = evaluation.nested_blocks() {
                        pending.push((depth + 1, nested));
                    }
                }
            }
        }

        stats
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::trace::{ExceptionHandler, InstructionEvaluation, Offset};

    fn evaluation(skip: bool, generalized: bool) -> InstructionEvaluation {
        InstructionEvaluation {
            skip,
            is_generalization: generalized,
            visit_count: if generalized { Some(5) } else { None },
            instruction: String::from("nop"),
            instruction_offset: Offset(0),
            updated_worklist: None,
            variables_before: vec![],
            stack_before: vec![],
            nested_blocks: None,
        }
    }

    fn block(evaluations: Vec<InstructionEvaluation>) -> BlockEvaluation {
        BlockEvaluation {
            start_offset: Offset(0),
            start_variables: vec![],
            start_stack: vec![],
            exception_handler: None,
            worklist: vec![],
            evaluations,
        }
    }

    #[test]
    fn counts_include_subroutines() {
        let mut jsr = evaluation(false, false);
        let mut inner_jsr = evaluation(false, false);
        inner_jsr.nested_blocks = Some(vec![block(vec![evaluation(true, false)])]);
        jsr.nested_blocks = Some(vec![
            block(vec![evaluation(false, true), inner_jsr]),
            block(vec![]),
        ]);

        let mut handler = block(vec![evaluation(false, false)]);
        handler.exception_handler = Some(ExceptionHandler {
            catch_start_offset: Offset(0),
            catch_end_offset: Offset(4),
            handler_start_offset: Offset(7),
            catch_type: None,
        });

        let stats = MethodStatistics::of_blocks(&[block(vec![jsr, evaluation(true, true)]), handler]);
        assert_eq!(
            stats,
            MethodStatistics {
                blocks: 5,
                evaluations: 6,
                skipped: 2,
                generalized: 2,
                exception_handler_blocks: 1,
                nested_blocks: 3,
                max_depth: 2,
            }
        );
    }

    #[test]
    fn empty_method() {
        assert_eq!(MethodStatistics::of_blocks(&[]), MethodStatistics::default());
    }
}
