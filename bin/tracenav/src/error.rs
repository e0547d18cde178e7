use evalviz::cursor::NavigationError;
use evalviz::loader::ParseError;
use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum CliError {
    Io(io::Error),
    Load(PathBuf, ParseError),
    Navigation(NavigationError),
    UnknownMethod(String),
    NoTraces(PathBuf),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(err) => write!(f, "IO - {}", err),
            CliError::Load(path, err) => write!(f, "{} - {}", path.display(), err),
            CliError::Navigation(err) => write!(f, "navigation - {}", err),
            CliError::UnknownMethod(method) => write!(f, "no method trace matches `{}`", method),
            CliError::NoTraces(path) => write!(f, "no `.json` traces found in {}", path.display()),
        }
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> CliError {
        CliError::Io(err)
    }
}

impl From<NavigationError> for CliError {
    fn from(err: NavigationError) -> CliError {
        CliError::Navigation(err)
    }
}
