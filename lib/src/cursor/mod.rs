//! Stepping through a trace
//!
//! ### Positions
//!
//! A [`Cursor`] addresses one instruction evaluation in a [`crate::trace::Trace`] by a path of
//! indices: a method index, then a `(block, eval)` [`Frame`] for the top-level block evaluations
//! of that method. When the cursor has [entered](Cursor::enter_nested) the sub-trace of a
//! subroutine call, another frame is pushed for each level of nesting, indexing into the nested
//! block evaluations of the instruction evaluation selected by the frame below.
//!
//! ### Stepping
//!
//! Stepping forward moves to the next instruction evaluation in execution order, crossing into
//! the next block evaluation and then the next method when the current one runs out. Stepping
//! backward is the exact inverse. Block evaluations with no instruction evaluations contribute no
//! steps and are passed over transparently. Method boundaries are only crossed at the top level:
//! inside a sub-trace, stepping stops at the first and last steps of that sub-trace.
//!
//! The cursor never indexes out of bounds. Degenerate traces (no methods, methods with no block
//! evaluations) leave it on an inert position with an empty [`Projection`].

mod errors;
mod navigation;
mod position;
mod projection;

pub use errors::*;
pub use navigation::*;
pub use position::*;
pub use projection::*;
