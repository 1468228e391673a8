use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Stage of an iteration a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Load,
    Parse,
    Render,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ErrorKind::Load => "load",
            ErrorKind::Parse => "parse",
            ErrorKind::Render => "render",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed trade data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("record {index}: unparseable time {value:?}")]
    Timestamp { index: usize, value: String },
    #[error("no trades to plot")]
    Empty,
    #[error("chart rendering failed: {0}")]
    Render(String),
    #[error("cannot write chart to {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PlotError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PlotError::Io { .. } => ErrorKind::Load,
            PlotError::Parse(_) | PlotError::Timestamp { .. } | PlotError::Empty => {
                ErrorKind::Parse
            }
            PlotError::Render(_) | PlotError::Output { .. } => ErrorKind::Render,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PlotError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PlotError::Output {
            path: path.into(),
            source,
        }
    }
}
