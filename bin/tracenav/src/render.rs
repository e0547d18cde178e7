use crate::error::CliError;
use crate::settings::RenderSettings;
use evalviz::cursor::{Cursor, Projection};
use evalviz::trace::{BranchTarget, Trace};
use std::io;
use std::io::Write;
use std::path::Path;
use termcolor::{Color, ColorSpec, StandardStream, WriteColor};

/// Prints traces and cursor projections (to stdout, unless given another output)
pub struct Renderer {
    out: Box<dyn WriteColor>,
    settings: RenderSettings,
}

impl Renderer {
    pub fn new(settings: RenderSettings) -> Renderer {
        let out = StandardStream::stdout(settings.color);
        Renderer::with_output(settings, Box::new(out))
    }

    pub fn with_output(settings: RenderSettings, out: Box<dyn WriteColor>) -> Renderer {
        Renderer { out, settings }
    }

    /// Per-method overview of a trace
    pub fn summary(&mut self, path: &Path, trace: &Trace) -> io::Result<()> {
        self.out.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(
            self.out,
            "{} ({} methods, {} steps)",
            path.display(),
            trace.method_count(),
            trace.total_evaluation_count()
        )?;
        self.out.reset()?;

        for (idx, method) in trace.methods.iter().enumerate() {
            let stats = method.statistics();
            writeln!(
                self.out,
                "  [{}] {}: {} blocks, {} steps ({} skipped, {} generalized, {} handler blocks, {} subroutine blocks)",
                idx,
                method,
                stats.blocks,
                stats.evaluations,
                stats.skipped,
                stats.generalized,
                stats.exception_handler_blocks,
                stats.nested_blocks,
            )?;
            if let Some(error) = &method.error {
                self.colored(Color::Red, |out| {
                    writeln!(out, "      error at {}: {}", error.offset, error.message)
                })?;
            }
        }
        Ok(())
    }

    /// Full view of the step the cursor is on
    pub fn view(&mut self, cursor: &Cursor) -> io::Result<()> {
        let projection = cursor.projection();
        if cursor.current_method().is_none() {
            return writeln!(self.out, "(empty trace)");
        }

        self.out.set_color(ColorSpec::new().set_bold(true))?;
        write!(
            self.out,
            "{}#{}",
            projection.class_name, projection.method_name
        )?;
        self.out.reset()?;
        write!(
            self.out,
            "  [method {}, block {}, eval {}",
            projection.method_index, projection.block_index, projection.eval_index
        )?;
        match cursor.step_index() {
            Some(step) => write!(
                self.out,
                ", step {}/{}]",
                step + 1,
                cursor.trace().total_evaluation_count()
            )?,
            None if projection.depth > 0 => write!(self.out, ", depth {}]", projection.depth)?,
            None => write!(self.out, "]")?,
        }
        writeln!(self.out)?;

        if let Some(error) = projection.method_error {
            self.colored(Color::Red, |out| {
                writeln!(out, "  evaluation failed at {}: {}", error.offset, error.message)
            })?;
        }

        if projection.is_empty() {
            return writeln!(self.out, "  (no instruction evaluations)");
        }

        self.step_line(&projection)?;
        if let Some(start) = projection.block_start_offset {
            write!(self.out, "  block starts at {}", start)?;
        }
        if let Some(handler) = projection.exception_handler {
            write!(
                self.out,
                " (exception handler for {}..{}, catches {})",
                handler.catch_start_offset,
                handler.catch_end_offset,
                handler.catch_type.as_deref().unwrap_or("any")
            )?;
        }
        writeln!(self.out)?;
        let limit = self.settings.value_limit;
        writeln!(
            self.out,
            "  variables: {}",
            values(projection.variables_before, limit)
        )?;
        writeln!(self.out, "  stack:     {}", values(projection.stack_before, limit))?;
        if self.settings.show_worklist {
            self.worklist(&projection)?;
        }
        if projection.has_nested {
            writeln!(self.out, "  (subroutine sub-trace available, `enter` to step into it)")?;
        }
        Ok(())
    }

    /// Print every step of a method, in order
    pub fn dump_method(&mut self, cursor: &mut Cursor, method: usize) -> Result<(), CliError> {
        cursor.jump_to_method(method)?;
        if let Some(trace) = cursor.current_method() {
            self.out.set_color(ColorSpec::new().set_bold(true))?;
            writeln!(self.out, "[{}] {}", method, trace)?;
            self.out.reset()?;
        }
        if !cursor.is_on_step() {
            writeln!(self.out, "  (no instruction evaluations)")?;
            return Ok(());
        }

        loop {
            self.step_line(&cursor.projection())?;
            if self.settings.show_nested && cursor.enter_nested().is_ok() {
                continue;
            }

            // Step onwards, leaving sub-traces that have run out
            while !cursor.step_forward() {
                if cursor.leave_nested().is_err() {
                    return Ok(());
                }
            }
            if cursor.depth() == 0 && cursor.position().method != method {
                return Ok(());
            }
        }
    }

    /// One-line rendering of a step
    pub fn step_line(&mut self, projection: &Projection<'_>) -> io::Result<()> {
        let indent = "  ".repeat(projection.depth + 1);
        let offset = projection
            .instruction_offset
            .map_or(String::from("-"), |offset| offset.to_string());
        write!(
            self.out,
            "{}{:>5} {:<24}",
            indent, offset, projection.instruction_text
        )?;

        let color = if projection.skip() {
            Some(Color::Yellow)
        } else if projection.is_generalization() {
            Some(Color::Magenta)
        } else {
            None
        };
        let marker = match projection.visit_count {
            Some(count) if projection.is_generalization() => {
                format!("{} x{}", projection.flags.marker(), count)
            }
            _ => String::from(projection.flags.marker()),
        };
        match color {
            Some(color) => self.colored(color, |out| write!(out, " {:<6}", marker))?,
            None => write!(self.out, " {:<6}", marker)?,
        }
        let stack = values(projection.stack_before, self.settings.value_limit);
        writeln!(self.out, " stack {}", stack)
    }

    pub fn error(&mut self, message: &str) -> io::Result<()> {
        self.colored(Color::Red, |out| writeln!(out, "{}", message))
    }

    fn worklist(&mut self, projection: &Projection<'_>) -> io::Result<()> {
        let changed = if projection.updated_worklist.is_some() {
            " (updated)"
        } else {
            ""
        };
        if projection.pending_branch_worklist.is_empty() {
            return writeln!(self.out, "  worklist:  empty{}", changed);
        }
        writeln!(self.out, "  worklist:{}", changed)?;
        for target in projection.pending_branch_worklist {
            let rendered = branch_target(target, self.settings.value_limit);
            writeln!(self.out, "    {}", rendered)?;
        }
        Ok(())
    }

    fn colored<F>(&mut self, color: Color, print: F) -> io::Result<()>
    where
        F: FnOnce(&mut dyn WriteColor) -> io::Result<()>,
    {
        self.out.set_color(ColorSpec::new().set_fg(Some(color)))?;
        let result = print(&mut *self.out);
        self.out.reset()?;
        result
    }
}

fn branch_target(target: &BranchTarget, limit: Option<usize>) -> String {
    format!(
        "@{} variables {} stack {}",
        target.start_offset,
        values(&target.start_variables, limit),
        values(&target.start_stack, limit)
    )
}

/// Render a list of values, cutting it off after `limit` values
fn values(values: &[String], limit: Option<usize>) -> String {
    let shown = limit.map_or(values.len(), |limit| limit.min(values.len()));
    let mut rendered = values[..shown].join(", ");
    if shown < values.len() {
        if shown > 0 {
            rendered.push_str(", ");
        }
        rendered.push_str(&format!("... {} more", values.len() - shown));
    }
    format!("[{}]", rendered)
}
