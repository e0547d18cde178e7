use crate::trace::Trace;
use std::fs::File;
use std::io;
use std::io::Write;
use std::path::Path;

impl Trace {
    /// Encode the trace into the JSON interchange format
    ///
    /// Loading the output produces a trace equal to this one.
    pub fn to_json_string(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }

    /// Write the trace in the JSON interchange format
    pub fn write_to<W: Write>(&self, writer: W, pretty: bool) -> io::Result<()> {
        if pretty {
            serde_json::to_writer_pretty(writer, self)?;
        } else {
            serde_json::to_writer(writer, self)?;
        }
        Ok(())
    }

    /// Save the trace to a file, optionally overwriting an existing file
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P, overwrite: bool) -> io::Result<()> {
        let path = path.as_ref();
        let file = if overwrite {
            File::create(path)?
        } else {
            File::options().write(true).create_new(true).open(path)?
        };
        let mut writer = io::BufWriter::new(file);
        self.write_to(&mut writer, true)?;
        writer.flush()
    }
}

#[cfg(test)]
mod test {
    use super::super::{load_path, load_str};
    use crate::trace::*;

    fn sample() -> Trace {
        let branch = BranchTarget {
            start_offset: Offset(9),
            start_variables: vec![String::from("i:?")],
            start_stack: vec![],
        };
        let nested = BlockEvaluation {
            start_offset: Offset(20),
            start_variables: vec![String::from("i:?")],
            start_stack: vec![String::from("a:ret@3")],
            exception_handler: None,
            worklist: vec![],
            evaluations: vec![InstructionEvaluation {
                skip: true,
                is_generalization: false,
                visit_count: None,
                instruction: String::from("astore_2"),
                instruction_offset: Offset(20),
                updated_worklist: None,
                variables_before: vec![String::from("i:?")],
                stack_before: vec![String::from("a:ret@3")],
                nested_blocks: None,
            }],
        };
        Trace::new(vec![MethodTrace {
            class_name: String::from("com/example/Loops"),
            method_name: String::from("count(I)I"),
            instructions: vec![
                Instruction {
                    offset: Offset(0),
                    text: String::from("iload_0"),
                },
                Instruction {
                    offset: Offset(1),
                    text: String::from("ifeq 9"),
                },
            ],
            parameters: vec![String::from("i:?")],
            error: Some(EvaluationError {
                offset: Offset(1),
                message: String::from("stack underflow"),
            }),
            block_evaluations: vec![BlockEvaluation {
                start_offset: Offset(0),
                start_variables: vec![String::from("i:?")],
                start_stack: vec![],
                exception_handler: Some(ExceptionHandler {
                    catch_start_offset: Offset(0),
                    catch_end_offset: Offset(4),
                    handler_start_offset: Offset(7),
                    catch_type: Some(String::from("java/lang/Throwable")),
                }),
                worklist: vec![],
                evaluations: vec![
                    InstructionEvaluation {
                        skip: false,
                        is_generalization: true,
                        visit_count: Some(3),
                        instruction: String::from("iload_0"),
                        instruction_offset: Offset(0),
                        updated_worklist: None,
                        variables_before: vec![String::from("i:?")],
                        stack_before: vec![],
                        nested_blocks: Some(vec![nested]),
                    },
                    InstructionEvaluation {
                        skip: false,
                        is_generalization: false,
                        visit_count: None,
                        instruction: String::from("ifeq 9"),
                        instruction_offset: Offset(1),
                        updated_worklist: Some(vec![branch]),
                        variables_before: vec![String::from("i:?")],
                        stack_before: vec![String::from("i:?")],
                        nested_blocks: None,
                    },
                ],
            }],
        }])
    }

    #[test]
    fn written_traces_load_back_unchanged() {
        let trace = sample();
        for pretty in [false, true] {
            let encoded = trace.to_json_string(pretty).unwrap();
            assert_eq!(load_str(&encoded).unwrap(), trace);
        }
    }

    #[test]
    fn uses_interchange_field_names() {
        let encoded: serde_json::Value =
            serde_json::from_str(&sample().to_json_string(false).unwrap()).unwrap();
        let method = &encoded["codeAttributes"][0];
        assert_eq!(method["clazz"], "com/example/Loops");
        assert_eq!(method["error"]["instructionOffset"], 1);
        let block = &method["blockEvaluations"][0];
        assert_eq!(block["exceptionHandlerInfo"]["catchType"], "java/lang/Throwable");
        let eval = &block["evaluations"][0];
        assert_eq!(eval["isGeneralization"], true);
        assert_eq!(eval["evaluationCount"], 3);
        assert_eq!(eval["jsrBlockEvaluations"][0]["evaluations"][0]["skipEvaluation"], true);
        assert_eq!(block["evaluations"][1]["updatedEvaluationStack"][0]["startOffset"], 9);
    }

    #[test]
    fn save_refuses_to_overwrite_unless_asked() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let trace = sample();

        trace.save_to_path(&path, false).unwrap();
        assert!(trace.save_to_path(&path, false).is_err());
        trace.save_to_path(&path, true).unwrap();
        assert_eq!(load_path(&path).unwrap(), trace);
    }
}
