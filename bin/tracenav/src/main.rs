mod error;
mod interactive;
mod render;
mod settings;

use clap::{crate_version, value_parser, Arg, ArgAction, ArgMatches, Command};
use error::CliError;
use evalviz::cursor::Cursor;
use evalviz::loader;
use evalviz::session::{LoadOutcome, Session};
use evalviz::trace::Trace;
use render::Renderer;
use settings::RenderSettings;
use std::path::{Path, PathBuf};
use std::process::exit;
use std::sync::Arc;
use walkdir::WalkDir;

fn main() {
    env_logger::init();

    let matches = cli().get_matches();

    let mut settings = RenderSettings::new();
    settings.show_worklist = !matches.get_flag("no-worklist");
    settings.show_nested = matches.get_flag("nested");
    if let Some(color) = matches
        .get_one::<String>("color")
        .and_then(|choice| RenderSettings::parse_color(choice))
    {
        settings.color = color;
    }
    settings.value_limit = matches.get_one::<usize>("limit").copied();
    let mut renderer = Renderer::new(settings);

    if let Err(err) = run(&matches, &mut renderer) {
        report(&mut renderer, &err);
        exit(1);
    }
}

/// Print a fatal error, falling back to plain stderr if the renderer can't write
///
/// Returns whether the renderer printed the error.
fn report(renderer: &mut Renderer, err: &CliError) -> bool {
    match renderer.error(&err.to_string()) {
        Ok(()) => true,
        Err(write_err) => {
            eprintln!("{}", err);
            log::debug!("Failed to print error: {}", write_err);
            false
        }
    }
}

fn cli() -> Command {
    Command::new("Partial evaluator trace navigator")
        .version(crate_version!())
        .about("Step through the traces recorded by a JVM bytecode partial evaluator")
        .arg(
            Arg::new("method")
                .long("method")
                .value_name("INDEX|CLASS#METHOD")
                .help("Select a method by index or by name (eg. `com/example/Foo#bar(I)V`)"),
        )
        .arg(
            Arg::new("step")
                .long("step")
                .value_name("STEP")
                .value_parser(value_parser!(u64).range(1..))
                .conflicts_with("method")
                .help("Show the step with this number (1-based, counted across the whole trace)"),
        )
        .arg(
            Arg::new("dump")
                .long("dump")
                .action(ArgAction::SetTrue)
                .help("Print every step of the selected method (or of all methods)"),
        )
        .arg(
            Arg::new("interactive")
                .long("interactive")
                .short('i')
                .action(ArgAction::SetTrue)
                .help("Read navigation commands from stdin"),
        )
        .arg(
            Arg::new("no-worklist")
                .long("no-worklist")
                .action(ArgAction::SetTrue)
                .help("Don't print the pending branch worklist"),
        )
        .arg(
            Arg::new("nested")
                .long("nested")
                .action(ArgAction::SetTrue)
                .help("Include subroutine sub-traces when dumping"),
        )
        .arg(
            Arg::new("color")
                .long("color")
                .value_name("WHEN")
                .value_parser(["auto", "always", "never"])
                .default_value("auto")
                .help("When to color output"),
        )
        .arg(
            Arg::new("limit")
                .long("limit")
                .value_name("COUNT")
                .value_parser(value_parser!(usize))
                .help("Print at most this many values per variables/stack list"),
        )
        .arg(
            Arg::new("INPUT")
                .help("Trace file, or folder of `.json` trace files to summarize")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .index(1),
        )
}

fn run(matches: &ArgMatches, renderer: &mut Renderer) -> Result<(), CliError> {
    let input = matches
        .get_one::<PathBuf>("INPUT")
        .cloned()
        .unwrap_or_default();

    if input.is_dir() {
        return summarize_directory(&input, renderer);
    }

    if matches.get_flag("interactive") {
        let mut session = Session::new();
        if session.load_path(&input) == LoadOutcome::Failed {
            if let Some(err) = session.last_error() {
                renderer.error(&format!("{} - {}", input.display(), err))?;
            }
        }
        if let (Some(cursor), Some(method)) =
            (session.cursor_mut(), matches.get_one::<String>("method"))
        {
            let index = method_index(cursor.trace(), method)?;
            cursor.jump_to_method(index)?;
        }
        return interactive::run(&mut session, renderer);
    }

    let trace = Arc::new(load(&input)?);
    let method = match matches.get_one::<String>("method") {
        Some(method) => Some(method_index(&trace, method)?),
        None => None,
    };
    let mut cursor = Cursor::new(trace.clone());

    if matches.get_flag("dump") {
        let methods = match method {
            Some(method) => method..method + 1,
            None => 0..trace.method_count(),
        };
        for method in methods {
            renderer.dump_method(&mut cursor, method)?;
        }
        return Ok(());
    }

    match (method, matches.get_one::<u64>("step")) {
        (_, Some(step)) => cursor.jump_to_step((step - 1) as usize)?,
        (Some(method), None) => cursor.jump_to_method(method)?,
        (None, None) => {
            renderer.summary(&input, &trace)?;
            return Ok(());
        }
    }
    renderer.view(&cursor)?;
    Ok(())
}

fn load(path: &Path) -> Result<Trace, CliError> {
    log::info!("Reading trace '{}'", path.display());
    loader::load_path(path).map_err(|err| CliError::Load(path.to_path_buf(), err))
}

/// Summarize every `.json` trace under a directory
///
/// Traces that fail to load are reported and skipped.
fn summarize_directory(directory: &Path, renderer: &mut Renderer) -> Result<(), CliError> {
    let traces: Vec<PathBuf> = WalkDir::new(directory)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|e| e.is_file() && e.extension().map_or(false, |ex| ex == "json"))
        .collect();
    if traces.is_empty() {
        return Err(CliError::NoTraces(directory.to_path_buf()));
    }

    let mut failures = 0;
    for path in &traces {
        match load(path) {
            Ok(trace) => renderer.summary(path, &trace)?,
            Err(err) => {
                failures += 1;
                renderer.error(&err.to_string())?;
            }
        }
    }
    log::info!(
        "Summarized {} traces ({} failed to load)",
        traces.len() - failures,
        failures
    );
    Ok(())
}

/// Resolve a `--method` argument, which is either an index or `CLASS#METHOD`
fn method_index(trace: &Trace, method: &str) -> Result<usize, CliError> {
    if let Ok(index) = method.parse::<usize>() {
        return if index < trace.method_count() {
            Ok(index)
        } else {
            Err(CliError::UnknownMethod(method.to_string()))
        };
    }
    method
        .split_once('#')
        .and_then(|(class_name, method_name)| trace.find_method(class_name, method_name))
        .ok_or_else(|| CliError::UnknownMethod(method.to_string()))
}
