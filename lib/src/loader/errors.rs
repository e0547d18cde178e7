use std::error;
use std::fmt;
use std::io;

/// Ways loading a trace document can fail
///
/// Loading is atomic: whenever one of these is returned, no trace was produced.
#[derive(Debug)]
pub enum ParseError {
    /// The document could not be read
    Io(io::Error),

    /// The document is not valid JSON, or doesn't have the shape of a trace (missing fields,
    /// mismatched types, malformed offsets)
    Syntax {
        /// Location in the document of the offending value (eg. `codeAttributes[0].instructions`)
        path: String,
        source: serde_json::Error,
    },

    /// The document has the right shape but breaks an invariant of traces
    Invalid { path: String, message: String },
}

impl ParseError {
    /// Line in the document where decoding failed (1-based, 0 if unknown)
    pub fn line(&self) -> usize {
        match self {
            ParseError::Syntax { source, .. } => source.line(),
            ParseError::Io(_) | ParseError::Invalid { .. } => 0,
        }
    }

    /// Column in the document where decoding failed (1-based, 0 if unknown)
    pub fn column(&self) -> usize {
        match self {
            ParseError::Syntax { source, .. } => source.column(),
            ParseError::Io(_) | ParseError::Invalid { .. } => 0,
        }
    }

    /// Location in the document of the offending value, if known
    pub fn path(&self) -> Option<&str> {
        match self {
            ParseError::Syntax { path, .. } | ParseError::Invalid { path, .. } if path != "." => {
                Some(path.as_str())
            }
            _ => None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Io(err) => write!(f, "failed to read trace: {}", err),
            ParseError::Syntax { source, .. } => match self.path() {
                Some(path) => write!(f, "malformed trace at `{}`: {}", path, source),
                None => write!(f, "malformed trace: {}", source),
            },
            ParseError::Invalid { path, message } => {
                write!(f, "invalid trace at `{}`: {}", path, message)
            }
        }
    }
}

impl error::Error for ParseError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ParseError::Io(err) => Some(err),
            ParseError::Syntax { source, .. } => Some(source),
            ParseError::Invalid { .. } => None,
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(err: io::Error) -> ParseError {
        ParseError::Io(err)
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> ParseError {
        if err.is_io() {
            ParseError::Io(io::Error::from(err))
        } else {
            ParseError::Syntax {
                path: String::from("."),
                source: err,
            }
        }
    }
}

impl From<serde_path_to_error::Error<serde_json::Error>> for ParseError {
    fn from(err: serde_path_to_error::Error<serde_json::Error>) -> ParseError {
        let path = err.path().to_string();
        match ParseError::from(err.into_inner()) {
            ParseError::Syntax { source, .. } => ParseError::Syntax { path, source },
            other => other,
        }
    }
}
