use super::{Frame, NavigationError, Position, Projection};
use crate::trace::{BlockEvaluation, InstructionEvaluation, MethodTrace, Trace};
use std::sync::Arc;

/// Current step in a shared, immutable trace
///
/// Moving the cursor requires `&mut self`, so concurrent step commands against one cursor can't
/// happen: readers always see a consistent position. Cloning a cursor is cheap and produces an
/// independent cursor over the same trace.
#[derive(Debug, Clone)]
pub struct Cursor {
    trace: Arc<Trace>,

    /// Index of the current method
    method: usize,

    /// Position among the top-level block evaluations of the current method
    top: Frame,

    /// One frame per level of subroutine sub-trace entered (innermost last)
    nested: Vec<Frame>,
}

impl Cursor {
    /// Cursor on the first step of the trace
    ///
    /// If the trace has no steps at all, the cursor is left inert at `0:0:0`.
    pub fn new(trace: Arc<Trace>) -> Cursor {
        let mut cursor = Cursor {
            trace,
            method: 0,
            top: Frame::START,
            nested: vec![],
        };
        cursor.reset();
        cursor
    }

    /// Go back to the first step of the trace
    pub fn reset(&mut self) {
        self.nested.clear();
        match self.first_step_from(0) {
            Some((method, frame)) => {
                self.method = method;
                self.top = frame;
            }
            None => {
                self.method = 0;
                self.top = Frame::START;
            }
        }
    }

    pub fn trace(&self) -> &Arc<Trace> {
        &self.trace
    }

    /// Top-level position (ignoring any entered sub-traces)
    pub fn position(&self) -> Position {
        Position::new(self.method, self.top.block, self.top.eval)
    }

    /// Frames of the entered sub-traces, outermost first
    pub fn nested_frames(&self) -> &[Frame] {
        &self.nested
    }

    /// Number of sub-traces entered
    pub fn depth(&self) -> usize {
        self.nested.len()
    }

    /// Is the cursor on an actual instruction evaluation (as opposed to inert)?
    pub fn is_on_step(&self) -> bool {
        self.current_evaluation().is_some()
    }

    pub fn current_method(&self) -> Option<&MethodTrace> {
        self.trace.methods.get(self.method)
    }

    pub fn current_block(&self) -> Option<&BlockEvaluation> {
        self.current_blocks().get(self.current_frame().block)
    }

    pub fn current_evaluation(&self) -> Option<&InstructionEvaluation> {
        evaluation_at(self.current_blocks(), self.current_frame())
    }

    pub fn can_step_forward(&self) -> bool {
        self.next_position().is_some()
    }

    pub fn can_step_backward(&self) -> bool {
        self.previous_position().is_some()
    }

    /// Move to the next step, returning whether the cursor moved
    ///
    /// On the last step, this does nothing.
    pub fn step_forward(&mut self) -> bool {
        match self.next_position() {
            Some(target) => {
                self.move_to(target);
                log::trace!("Stepped forward to {}", self.position());
                true
            }
            None => false,
        }
    }

    /// Move to the previous step, returning whether the cursor moved
    ///
    /// On the first step, this does nothing.
    pub fn step_backward(&mut self) -> bool {
        match self.previous_position() {
            Some(target) => {
                self.move_to(target);
                log::trace!("Stepped backward to {}", self.position());
                true
            }
            None => false,
        }
    }

    /// Select a method, moving to its first step
    ///
    /// Any entered sub-traces are left. If the method has no steps, the cursor is left inert at
    /// the start of the method.
    pub fn jump_to_method(&mut self, method: usize) -> Result<(), NavigationError> {
        let target = self
            .trace
            .methods
            .get(method)
            .ok_or(NavigationError::OutOfRange {
                requested: method,
                available: self.trace.method_count(),
            })?;
        self.top = first_step(&target.block_evaluations, 0).unwrap_or(Frame::START);
        self.method = method;
        self.nested.clear();
        log::trace!("Jumped to method {} ({})", method, target);
        Ok(())
    }

    /// Select a block evaluation at the current nesting level, moving to its first step
    ///
    /// If the block evaluation is empty, this moves to the first step of a later block evaluation
    /// at the same level instead, or leaves the cursor inert on the empty block evaluation if
    /// there are none.
    pub fn jump_to_block(&mut self, block: usize) -> Result<(), NavigationError> {
        let blocks = self.current_blocks();
        if block >= blocks.len() {
            return Err(NavigationError::OutOfRange {
                requested: block,
                available: blocks.len(),
            });
        }
        let frame = first_step(blocks, block).unwrap_or(Frame::new(block, 0));
        *self.current_frame_mut() = frame;
        Ok(())
    }

    /// Go to a step, numbered in top-level execution order across the whole trace
    pub fn jump_to_step(&mut self, step: usize) -> Result<(), NavigationError> {
        let mut remaining = step;
        for (method_idx, method) in self.trace.methods.iter().enumerate() {
            for (block_idx, block) in method.block_evaluations.iter().enumerate() {
                if remaining < block.evaluation_count() {
                    self.method = method_idx;
                    self.top = Frame::new(block_idx, remaining);
                    self.nested.clear();
                    return Ok(());
                }
                remaining -= block.evaluation_count();
            }
        }
        Err(NavigationError::OutOfRange {
            requested: step,
            available: self.trace.total_evaluation_count(),
        })
    }

    /// Number of the current step in top-level execution order (see [`Self::jump_to_step`])
    ///
    /// This is `None` inside sub-traces and when the cursor is inert.
    pub fn step_index(&self) -> Option<usize> {
        if !self.nested.is_empty() || !self.is_on_step() {
            return None;
        }
        let methods = self.trace.methods.get(..self.method)?;
        let before_method: usize = methods.iter().map(MethodTrace::evaluation_count).sum();
        let blocks = self
            .current_method()?
            .block_evaluations
            .get(..self.top.block)?;
        let before_block: usize = blocks.iter().map(BlockEvaluation::evaluation_count).sum();
        Some(before_method + before_block + self.top.eval)
    }

    /// Does the current instruction evaluation have a sub-trace with steps to enter?
    pub fn can_enter_nested(&self) -> bool {
        self.first_nested_step().is_some()
    }

    /// Enter the sub-trace of the current instruction evaluation, moving to its first step
    pub fn enter_nested(&mut self) -> Result<(), NavigationError> {
        let frame = self
            .first_nested_step()
            .ok_or(NavigationError::NoNestedEvaluations)?;
        self.nested.push(frame);
        log::trace!("Entered sub-trace at depth {}", self.nested.len());
        Ok(())
    }

    /// Leave the innermost sub-trace, returning to the instruction evaluation that owns it
    pub fn leave_nested(&mut self) -> Result<(), NavigationError> {
        self.nested.pop().ok_or(NavigationError::NotNested)?;
        log::trace!("Left sub-trace, back at depth {}", self.nested.len());
        Ok(())
    }

    /// Read out the current step
    pub fn projection(&self) -> Projection<'_> {
        let method = match self.current_method() {
            Some(method) => method,
            None => return Projection::default(),
        };
        let frame = self.current_frame();
        let mut projection = Projection {
            method_index: self.method,
            block_index: frame.block,
            eval_index: frame.eval,
            depth: self.nested.len(),
            class_name: &method.class_name,
            method_name: &method.method_name,
            method_error: method.error.as_ref(),
            ..Projection::default()
        };

        let block = match self.current_blocks().get(frame.block) {
            Some(block) => block,
            None => return projection,
        };
        projection.block_start_offset = Some(block.start_offset);
        projection.exception_handler = block.exception_handler.as_ref();
        projection.pending_branch_worklist = block.worklist_at(frame.eval);

        let evaluation = match block.evaluations.get(frame.eval) {
            Some(evaluation) => evaluation,
            None => return projection,
        };
        projection.instruction_text = &evaluation.instruction;
        projection.instruction_offset = Some(evaluation.instruction_offset);
        projection.variables_before = &evaluation.variables_before;
        projection.stack_before = &evaluation.stack_before;
        projection.updated_worklist = evaluation.updated_worklist.as_deref();
        projection.flags = evaluation.flags();
        projection.visit_count = evaluation.visit_count;
        projection.has_nested = evaluation
            .nested_blocks()
            .map_or(false, |blocks| first_step(blocks, 0).is_some());
        projection
    }

    fn current_frame(&self) -> Frame {
        *self.nested.last().unwrap_or(&self.top)
    }

    fn current_frame_mut(&mut self) -> &mut Frame {
        self.nested.last_mut().unwrap_or(&mut self.top)
    }

    /// Block evaluations at the innermost entered level
    fn current_blocks(&self) -> &[BlockEvaluation] {
        let mut blocks = match self.current_method() {
            Some(method) => &method.block_evaluations[..],
            None => return &[],
        };
        let mut owner = self.top;
        for frame in &self.nested {
            blocks = match evaluation_at(blocks, owner).and_then(|eval| eval.nested_blocks()) {
                Some(nested) => nested,
                None => return &[],
            };
            owner = *frame;
        }
        blocks
    }

    fn first_nested_step(&self) -> Option<Frame> {
        let nested = self.current_evaluation()?.nested_blocks()?;
        first_step(nested, 0)
    }

    fn next_position(&self) -> Option<(usize, Frame)> {
        if let Some(frame) = next_step(self.current_blocks(), self.current_frame()) {
            return Some((self.method, frame));
        }
        if self.nested.is_empty() {
            self.first_step_from(self.method + 1)
        } else {
            None
        }
    }

    fn previous_position(&self) -> Option<(usize, Frame)> {
        if let Some(frame) = previous_step(self.current_blocks(), self.current_frame()) {
            return Some((self.method, frame));
        }
        if self.nested.is_empty() {
            self.last_step_before(self.method)
        } else {
            None
        }
    }

    fn move_to(&mut self, (method, frame): (usize, Frame)) {
        if self.nested.is_empty() {
            self.method = method;
        }
        *self.current_frame_mut() = frame;
    }

    /// First step of the first method at or after `method` that has any steps
    fn first_step_from(&self, method: usize) -> Option<(usize, Frame)> {
        self.trace
            .methods
            .iter()
            .enumerate()
            .skip(method)
            .find_map(|(idx, method)| first_step(&method.block_evaluations, 0).map(|f| (idx, f)))
    }

    /// Last step of the last method before `method` that has any steps
    fn last_step_before(&self, method: usize) -> Option<(usize, Frame)> {
        let end = method.min(self.trace.method_count());
        self.trace.methods[..end]
            .iter()
            .enumerate()
            .rev()
            .find_map(|(idx, method)| {
                let blocks = &method.block_evaluations;
                last_step(blocks, blocks.len()).map(|f| (idx, f))
            })
    }
}

fn evaluation_at(blocks: &[BlockEvaluation], frame: Frame) -> Option<&InstructionEvaluation> {
    blocks.get(frame.block)?.evaluations.get(frame.eval)
}

/// First step in a non-empty block evaluation at or after `block`
fn first_step(blocks: &[BlockEvaluation], block: usize) -> Option<Frame> {
    blocks
        .iter()
        .enumerate()
        .skip(block)
        .find(|(_, candidate)| !candidate.is_empty())
        .map(|(idx, _)| Frame::new(idx, 0))
}

/// Last step in a non-empty block evaluation before `block`
fn last_step(blocks: &[BlockEvaluation], block: usize) -> Option<Frame> {
    let end = block.min(blocks.len());
    blocks[..end]
        .iter()
        .enumerate()
        .rev()
        .find(|(_, candidate)| !candidate.is_empty())
        .map(|(idx, candidate)| Frame::new(idx, candidate.evaluation_count() - 1))
}

fn next_step(blocks: &[BlockEvaluation], frame: Frame) -> Option<Frame> {
    if let Some(block) = blocks.get(frame.block) {
        if frame.eval + 1 < block.evaluation_count() {
            return Some(Frame::new(frame.block, frame.eval + 1));
        }
    }
    first_step(blocks, frame.block + 1)
}

fn previous_step(blocks: &[BlockEvaluation], frame: Frame) -> Option<Frame> {
    if let Some(block) = blocks.get(frame.block) {
        if frame.eval > 0 && frame.eval <= block.evaluation_count() {
            return Some(Frame::new(frame.block, frame.eval - 1));
        }
    }
    last_step(blocks, frame.block)
}
