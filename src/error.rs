// Error taxonomy for track parsing and layout
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackError {
    /// Malformed tabular record. `line` is 1-based.
    #[error("line {line}, {field}: {reason}")]
    Parse {
        line: usize,
        field: String,
        reason: String,
    },

    /// Members of one transcript disagree on chromosome
    #[error("transcript {transcript}: members lie on both {first} and {other}")]
    DataInconsistency {
        transcript: String,
        first: String,
        other: String,
    },

    /// Lane assignment gave up with intervals still unplaced
    #[error("{unplaced} of {total} intervals left unplaced after {lanes} lanes (is the lane floor offset large enough?)")]
    LaneBudgetExceeded {
        lanes: usize,
        unplaced: usize,
        total: usize,
    },

    #[error("invalid region: {0}")]
    InvalidRegion(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TrackError {
    pub(crate) fn parse(line: usize, field: impl Into<String>, reason: impl Into<String>) -> Self {
        TrackError::Parse {
            line,
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TrackError>;
