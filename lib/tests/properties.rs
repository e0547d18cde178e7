mod support;

use evalviz::cursor::{Cursor, Position};
use evalviz::loader;
use evalviz::trace::*;
use proptest::prelude::*;
use std::sync::Arc;
use support::*;

fn values_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[iajfd]:[0-9?]{1,3}", 0..3)
}

fn branch_target_strategy() -> impl Strategy<Value = BranchTarget> {
    (0usize..64, values_strategy(), values_strategy()).prop_map(
        |(offset, start_variables, start_stack)| BranchTarget {
            start_offset: Offset(offset),
            start_variables,
            start_stack,
        },
    )
}

fn worklist_strategy() -> impl Strategy<Value = Vec<BranchTarget>> {
    prop::collection::vec(branch_target_strategy(), 0..3)
}

fn handler_strategy() -> impl Strategy<Value = ExceptionHandler> {
    (
        0usize..32,
        0usize..32,
        0usize..64,
        prop::option::of("java/lang/[A-Z][a-z]{2,8}Exception"),
    )
        .prop_map(|(a, b, handler, catch_type)| ExceptionHandler {
            catch_start_offset: Offset(a.min(b)),
            catch_end_offset: Offset(a.max(b)),
            handler_start_offset: Offset(handler),
            catch_type,
        })
}

fn evaluation_strategy<N>(nested: N) -> impl Strategy<Value = InstructionEvaluation>
where
    N: Strategy<Value = Option<Vec<BlockEvaluation>>>,
{
    (
        (0usize..64, any::<bool>(), any::<bool>()),
        prop::option::of(1u32..10),
        prop::option::of(worklist_strategy()),
        (values_strategy(), values_strategy()),
        nested,
    )
        .prop_map(
            |((offset, skip, generalized), visit_count, updated_worklist, (variables, stack), nested)| {
                InstructionEvaluation {
                    skip,
                    is_generalization: generalized,
                    visit_count,
                    updated_worklist,
                    variables_before: variables,
                    stack_before: stack,
                    nested_blocks: nested,
                    ..evaluation(offset)
                }
            },
        )
}

fn block_strategy<E>(evaluation: E) -> impl Strategy<Value = BlockEvaluation>
where
    E: Strategy<Value = InstructionEvaluation>,
{
    (
        prop::collection::vec(evaluation, 0..4),
        prop::option::of(handler_strategy()),
        worklist_strategy(),
        (values_strategy(), values_strategy()),
    )
        .prop_map(|(evaluations, handler, worklist, (variables, stack))| BlockEvaluation {
            exception_handler: handler,
            worklist,
            start_variables: variables,
            start_stack: stack,
            ..block(evaluations)
        })
}

/// Block evaluation sequences, with subroutine sub-traces nested a few levels deep
fn blocks_strategy() -> impl Strategy<Value = Vec<BlockEvaluation>> {
    let flat = prop::collection::vec(block_strategy(evaluation_strategy(Just(None))), 0..4);
    flat.prop_recursive(3, 32, 4, |inner| {
        let nested = prop::option::weighted(0.25, inner);
        prop::collection::vec(block_strategy(evaluation_strategy(nested)), 0..4)
    })
}

fn error_strategy() -> impl Strategy<Value = EvaluationError> {
    (0usize..100, "[a-z][a-z ]{0,24}").prop_map(|(offset, message)| EvaluationError {
        offset: Offset(offset),
        message,
    })
}

fn method_strategy() -> impl Strategy<Value = MethodTrace> {
    (
        blocks_strategy(),
        prop::collection::btree_set(0usize..100, 0..6),
        values_strategy(),
        prop::option::of(error_strategy()),
    )
        .prop_map(|(blocks, offsets, parameters, error)| MethodTrace {
            instructions: offsets
                .into_iter()
                .map(|offset| Instruction {
                    offset: Offset(offset),
                    text: format!("insn@{}", offset),
                })
                .collect(),
            parameters,
            error,
            ..method("m()V", blocks)
        })
}

fn trace_strategy() -> impl Strategy<Value = Trace> {
    prop::collection::vec(method_strategy(), 0..4).prop_map(Trace::new)
}

/// Every position a cursor visits, stepping forward from the start
fn reachable_positions(trace: &Arc<Trace>) -> Vec<Position> {
    let mut cursor = Cursor::new(trace.clone());
    let mut positions = vec![cursor.position()];
    while cursor.step_forward() {
        positions.push(cursor.position());
    }
    positions
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(200))]

    #[test]
    fn forward_reaches_the_end(trace in trace_strategy()) {
        let total = trace.total_evaluation_count();
        prop_assume!(total > 0);
        let mut cursor = Cursor::new(Arc::new(trace));
        for _ in 0..total - 1 {
            prop_assert!(cursor.step_forward());
        }
        prop_assert!(!cursor.can_step_forward());
        let last = cursor.position();
        prop_assert!(!cursor.step_forward());
        prop_assert_eq!(cursor.position(), last);
    }

    #[test]
    fn every_step_is_visited_once(trace in trace_strategy()) {
        let trace = Arc::new(trace);
        let positions = reachable_positions(&trace);
        if trace.total_evaluation_count() == 0 {
            prop_assert_eq!(positions.len(), 1);
            prop_assert!(Cursor::new(trace).projection().is_empty());
        } else {
            prop_assert_eq!(positions.len(), trace.total_evaluation_count());
            prop_assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }

    #[test]
    fn forward_then_backward_is_identity(trace in trace_strategy()) {
        let trace = Arc::new(trace);
        for (step, position) in reachable_positions(&trace).into_iter().enumerate() {
            let mut cursor = Cursor::new(trace.clone());
            if cursor.jump_to_step(step).is_err() {
                continue;
            }
            prop_assert_eq!(cursor.position(), position);
            if cursor.step_forward() {
                prop_assert!(cursor.step_backward());
            }
            prop_assert_eq!(cursor.position(), position);
        }
    }

    #[test]
    fn backward_then_forward_is_identity(trace in trace_strategy()) {
        let trace = Arc::new(trace);
        let positions = reachable_positions(&trace);
        for (step, position) in positions.iter().copied().enumerate() {
            let mut cursor = Cursor::new(trace.clone());
            if cursor.jump_to_step(step).is_err() {
                continue;
            }
            if step == 0 {
                prop_assert!(!cursor.step_backward());
            } else {
                prop_assert!(cursor.step_backward());
                prop_assert_eq!(cursor.position(), positions[step - 1]);
                prop_assert!(cursor.step_forward());
            }
            prop_assert_eq!(cursor.position(), position);
        }
    }

    #[test]
    fn predicates_match_boundaries(trace in trace_strategy()) {
        let trace = Arc::new(trace);
        let total = trace.total_evaluation_count();
        for step in 0..total {
            let mut cursor = Cursor::new(trace.clone());
            cursor.jump_to_step(step).unwrap();
            prop_assert_eq!(cursor.step_index(), Some(step));
            prop_assert_eq!(cursor.can_step_backward(), step != 0);
            prop_assert_eq!(cursor.can_step_forward(), step + 1 != total);
        }
    }

    #[test]
    fn initial_position_is_origin_when_first_block_has_steps(trace in trace_strategy()) {
        let starts_at_origin = trace
            .methods
            .first()
            .and_then(|method| method.block_evaluations.first())
            .map_or(false, |block| !block.is_empty());
        prop_assume!(starts_at_origin);
        let cursor = Cursor::new(Arc::new(trace));
        prop_assert_eq!(cursor.position(), Position::START);
        prop_assert!(!cursor.can_step_backward());
    }

    #[test]
    fn projection_matches_recorded_evaluation(trace in trace_strategy()) {
        let trace = Arc::new(trace);
        let mut cursor = Cursor::new(trace.clone());
        while cursor.is_on_step() {
            let position = cursor.position();
            let block = &trace.methods[position.method].block_evaluations[position.block];
            let recorded = &block.evaluations[position.eval];
            let projection = cursor.projection();
            prop_assert_eq!(projection.instruction_offset, Some(recorded.instruction_offset));
            prop_assert_eq!(projection.skip(), recorded.skip);
            prop_assert_eq!(projection.is_generalization(), recorded.is_generalization);
            prop_assert_eq!(projection.visit_count, recorded.visit_count);
            prop_assert_eq!(projection.block_start_offset, Some(block.start_offset));
            if let Some(updated) = &recorded.updated_worklist {
                prop_assert_eq!(projection.pending_branch_worklist, &updated[..]);
            }
            if !cursor.step_forward() {
                break;
            }
        }
    }

    #[test]
    fn subroutine_steps_return_to_their_owner(trace in trace_strategy()) {
        let trace = Arc::new(trace);
        for step in 0..trace.total_evaluation_count() {
            let mut cursor = Cursor::new(trace.clone());
            cursor.jump_to_step(step).unwrap();
            if !cursor.can_enter_nested() {
                continue;
            }
            let owner = cursor.position();
            let expected: usize = cursor
                .current_evaluation()
                .and_then(|evaluation| evaluation.nested_blocks())
                .map_or(0, |blocks| blocks.iter().map(BlockEvaluation::evaluation_count).sum());

            cursor.enter_nested().unwrap();
            prop_assert_eq!(cursor.depth(), 1);
            let mut visited = 1;
            loop {
                let frame = cursor.nested_frames()[0];
                if !cursor.step_forward() {
                    break;
                }
                visited += 1;
                let after = cursor.nested_frames()[0];
                prop_assert!(cursor.step_backward());
                prop_assert_eq!(cursor.nested_frames()[0], frame);
                prop_assert!(cursor.step_forward());
                prop_assert_eq!(cursor.nested_frames()[0], after);
                prop_assert_eq!(cursor.position(), owner);
            }
            prop_assert_eq!(visited, expected);

            // Descend as far as possible, then climb back out
            while cursor.enter_nested().is_ok() {}
            while cursor.leave_nested().is_ok() {}
            prop_assert_eq!(cursor.depth(), 0);
            prop_assert_eq!(cursor.position(), owner);
        }
    }

    #[test]
    fn written_traces_reload_identically(trace in trace_strategy()) {
        let encoded = trace.to_json_string(false).unwrap();
        let reloaded = loader::load_str(&encoded).unwrap();
        prop_assert_eq!(reloaded, trace);
    }
}
