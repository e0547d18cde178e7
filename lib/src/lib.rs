//! Inspect the step-by-step traces recorded by a JVM bytecode partial evaluator
//!
//! A partial evaluator evaluates the code attribute of a method block-by-block: every time control
//! diverges (conditional branches, exception handlers, subroutine calls) the pending targets are
//! pushed onto a branch worklist, and evaluation continues until every reachable
//! instruction/context pair has been seen. The evaluator can record that process as a JSON
//! document, which this crate loads into a [`trace::Trace`] and lets you replay one instruction
//! evaluation at a time.
//!
//!   - [`trace`] contains the recorded data (methods, block evaluations, instruction evaluations)
//!   - [`loader`] turns JSON documents into traces (and traces back into JSON)
//!   - [`cursor`] navigates a loaded trace, forwards and backwards
//!   - [`session`] owns the trace currently on display and handles replacing it
//!
//! ### Example
//!
//! ```
//! use evalviz::cursor::Cursor;
//! use evalviz::loader;
//! use std::sync::Arc;
//!
//! # fn step_through() -> Result<(), loader::ParseError> {
//! let trace = loader::load_str(r#"{
//!     "codeAttributes": [{
//!         "clazz": "Foo",
//!         "method": "bar()V",
//!         "instructions": [
//!             { "offset": 0, "instruction": "iconst_0" },
//!             { "offset": 1, "instruction": "return" }
//!         ],
//!         "error": null,
//!         "blockEvaluations": [{
//!             "startOffset": 0,
//!             "startVariables": [],
//!             "startStack": [],
//!             "branchEvaluationStack": [],
//!             "evaluations": [
//!                 { "instruction": "iconst_0", "instructionOffset": 0,
//!                   "variablesBefore": [], "stackBefore": [] },
//!                 { "instruction": "return", "instructionOffset": 1,
//!                   "variablesBefore": [], "stackBefore": ["i:0"] }
//!             ]
//!         }]
//!     }]
//! }"#)?;
//!
//! let mut cursor = Cursor::new(Arc::new(trace));
//! assert_eq!(cursor.projection().instruction_text, "iconst_0");
//! cursor.step_forward();
//! assert_eq!(cursor.projection().stack_before, ["i:0"]);
//! assert!(!cursor.can_step_forward());
//! # Ok(())
//! # }
//! ```

pub mod cursor;
pub mod loader;
pub mod session;
pub mod trace;
mod util;
