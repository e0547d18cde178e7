//! Reading and writing trace documents
//!
//! Traces are exchanged as JSON, in the shape produced by the partial evaluator's state tracker:
//!
//! ```text
//! { "codeAttributes": [
//!     { "clazz": .., "method": .., "instructions": [..], "error": null,
//!       "blockEvaluations": [
//!         { "startOffset": .., "startVariables": [..], "startStack": [..],
//!           "exceptionHandlerInfo": null, "branchEvaluationStack": [..],
//!           "evaluations": [
//!             { "skipEvaluation": .., "isGeneralization": .., "evaluationCount": ..,
//!               "instruction": .., "instructionOffset": .., "updatedEvaluationStack": null,
//!               "variablesBefore": [..], "stackBefore": [..], "jsrBlockEvaluations": null }
//!           ] }
//!       ] }
//! ] }
//! ```
//!
//! Optional fields may be either absent or `null`; both mean "not present", which is different
//! from an empty list. Unknown fields are ignored.
//!
//! After decoding, documents are checked against the structural invariants of traces (see
//! [`validate`]). Anything wrong is reported as a [`ParseError`], and a partial trace is never
//! returned.

mod errors;
mod validate;
mod writer;

pub use errors::*;
pub use validate::*;

use crate::trace::Trace;
use std::fs;
use std::io;
use std::path::Path;

/// Load a trace from raw JSON bytes
///
/// There is no limit on how deeply subroutine sub-traces nest: the recursion limit of the JSON
/// decoder is lifted, and the stack is grown on demand while decoding.
pub fn load_slice(bytes: &[u8]) -> Result<Trace, ParseError> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    deserializer.disable_recursion_limit();
    let stacked = serde_stacker::Deserializer::new(&mut deserializer);
    let trace: Trace = serde_path_to_error::deserialize(stacked)?;
    deserializer.end()?;
    finish(trace)
}

/// Load a trace from a JSON string
pub fn load_str(source: &str) -> Result<Trace, ParseError> {
    load_slice(source.as_bytes())
}

/// Load a trace from a reader
///
/// The reader is consumed in full before decoding starts.
pub fn load_reader<R: io::Read>(mut reader: R) -> Result<Trace, ParseError> {
    let mut bytes = vec![];
    reader.read_to_end(&mut bytes)?;
    load_slice(&bytes)
}

/// Load a trace from a file
pub fn load_path<P: AsRef<Path>>(path: P) -> Result<Trace, ParseError> {
    let path = path.as_ref();
    log::debug!("Reading trace '{}'", path.display());
    let bytes = fs::read(path)?;
    load_slice(&bytes)
}

fn finish(trace: Trace) -> Result<Trace, ParseError> {
    validate(&trace)?;
    log::debug!(
        "Loaded trace with {} methods and {} top-level steps",
        trace.method_count(),
        trace.total_evaluation_count()
    );
    Ok(trace)
}
