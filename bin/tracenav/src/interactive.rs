use crate::error::CliError;
use crate::render::Renderer;
use evalviz::session::{LoadOutcome, Session};
use std::io;
use std::io::BufRead;
use std::path::PathBuf;

const HELP: &str = "\
commands:
  n, next          step forward
  p, prev          step backward
  m <index>        jump to method
  b <index>        jump to block evaluation
  s <step>         jump to step (1-based)
  enter            step into the subroutine sub-trace
  leave            return from the subroutine sub-trace
  r, reset         back to the first step
  load <path>      replace the trace
  h, help          show this help
  q, quit          exit";

#[derive(Debug, Clone, Eq, PartialEq)]
enum Command {
    Next,
    Previous,
    Method(usize),
    Block(usize),
    Step(usize),
    Enter,
    Leave,
    Reset,
    Load(PathBuf),
    Help,
    Quit,
}

impl Command {
    /// Parse one line of input (`Ok(None)` for a blank line)
    fn parse(line: &str) -> Result<Option<Command>, String> {
        let mut words = line.split_whitespace();
        let name = match words.next() {
            Some(name) => name,
            None => return Ok(None),
        };
        let argument = words.next();
        if words.next().is_some() {
            return Err(format!("too many arguments to `{}`", name));
        }

        let index = |what: &str| -> Result<usize, String> {
            let argument = argument.ok_or_else(|| format!("`{}` needs {}", name, what))?;
            argument
                .parse::<usize>()
                .map_err(|_| format!("`{}` is not a valid {}", argument, what))
        };

        let command = match name {
            "n" | "next" => Command::Next,
            "p" | "prev" => Command::Previous,
            "m" | "method" => Command::Method(index("method index")?),
            "b" | "block" => Command::Block(index("block index")?),
            "s" | "step" => match index("step number")? {
                0 => return Err(String::from("steps are numbered from 1")),
                step => Command::Step(step - 1),
            },
            "enter" => Command::Enter,
            "leave" => Command::Leave,
            "r" | "reset" => Command::Reset,
            "load" => match argument {
                Some(path) => Command::Load(PathBuf::from(path)),
                None => return Err(String::from("`load` needs a path")),
            },
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            other => return Err(format!("unknown command `{}` (try `help`)", other)),
        };
        Ok(Some(command))
    }
}

/// Read commands from stdin until it closes (or `quit`), showing the current step after each one
pub fn run(session: &mut Session, renderer: &mut Renderer) -> Result<(), CliError> {
    show(session, renderer)?;
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let command = match Command::parse(&line?) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                renderer.error(&message)?;
                continue;
            }
        };
        log::debug!("Interactive command {:?}", command);

        match command {
            Command::Quit => break,
            Command::Help => {
                println!("{}", HELP);
                continue;
            }
            Command::Load(path) => {
                if session.load_path(&path) == LoadOutcome::Failed {
                    if let Some(err) = session.last_error() {
                        renderer.error(&format!("{} - {}", path.display(), err))?;
                    }
                }
            }
            command => {
                let cursor = match session.cursor_mut() {
                    Some(cursor) => cursor,
                    None => {
                        renderer.error("no trace loaded (use `load <path>`)")?;
                        continue;
                    }
                };
                let result = match command {
                    Command::Next => Ok(cursor.step_forward()),
                    Command::Previous => Ok(cursor.step_backward()),
                    Command::Method(method) => cursor.jump_to_method(method).map(|_| true),
                    Command::Block(block) => cursor.jump_to_block(block).map(|_| true),
                    Command::Step(step) => cursor.jump_to_step(step).map(|_| true),
                    Command::Enter => cursor.enter_nested().map(|_| true),
                    Command::Leave => cursor.leave_nested().map(|_| true),
                    Command::Reset => {
                        cursor.reset();
                        Ok(true)
                    }
                    Command::Load(_) | Command::Help | Command::Quit => Ok(false),
                };
                match result {
                    Ok(true) => (),
                    Ok(false) => renderer.error("can't step any further")?,
                    Err(err) => renderer.error(&err.to_string())?,
                }
            }
        }
        show(session, renderer)?;
    }
    Ok(())
}

fn show(session: &Session, renderer: &mut Renderer) -> io::Result<()> {
    match session.cursor() {
        Some(cursor) => renderer.view(cursor),
        None => renderer.error("no trace loaded (use `load <path>`)"),
    }
}
