use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Every way a simulation run can fail. All of them are fatal, the simulator never skips a record
/// or reports partial results
#[derive(Debug)]
pub enum SimError {
    /// Bad cache size, mapping, or organization
    Configuration(String),
    /// The trace (or configuration) file could not be opened or read
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A trace line which isn't `<I|D> <hex address>`
    MalformedRecord {
        line: usize,
        content: String,
        reason: String,
    },
}

impl SimError {
    pub fn configuration(message: impl Into<String>) -> Self {
        SimError::Configuration(message.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SimError::Io {
            path: path.into(),
            source,
        }
    }
}

impl Display for SimError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SimError::Configuration(message) => write!(f, "Invalid cache configuration: {message}"),
            SimError::Io { path, source } => write!(f, "Couldn't read {}: {source}", path.display()),
            SimError::MalformedRecord { line, content, reason } => {
                write!(f, "Malformed trace record on line {line} ({content:?}): {reason}")
            }
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
