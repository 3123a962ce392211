use std::fmt;
use std::io;

use crate::parser::event::ListenerFailure;

/// Target type of a numeric conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    Byte,
    Int,
    Long,
    Double,
}

impl fmt::Display for NumberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Byte => "byte",
            Self::Int => "int",
            Self::Long => "long",
            Self::Double => "double",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unexpected character '{found}', expected {expected}")]
    UnexpectedChar { found: char, expected: String },

    #[error("Unexpected end of token, expected {expected}")]
    UnexpectedEnd { expected: String },

    #[error("Undefined symbol: {0}")]
    UndefinedSymbol(String),

    #[error("Cannot convert '{value}' to {kind}")]
    Conversion { kind: NumberKind, value: String },

    #[error("Invalid key signature: {0}")]
    InvalidKeySignature(String),

    #[error("Note value {0} is outside 0-127")]
    NoteOutOfRange(i32),

    #[error("{what} value {value} is outside {min}-{max}")]
    ValueOutOfRange {
        what: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("Invalid velocity prefix '{0}'")]
    InvalidVelocityPrefix(char),

    #[error("Invalid chord inversion: {0}")]
    InvalidInversion(String),

    #[error("Dictionary lookup of '{0}' does not terminate")]
    DictionaryCycle(String),

    #[error("Malformed number: '{0}'")]
    MalformedNumber(String),

    #[error("Parse error in token '{token}' at position {position}: {source}")]
    Parse {
        token: String,
        position: usize,
        #[source]
        source: Box<Error>,
    },

    #[error("Listener error: {}", describe_failures(.0))]
    Listener(Vec<ListenerFailure>),

    #[error("Parse cancelled after {0} tokens")]
    Cancelled(usize),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn unexpected(found: Option<char>, expected: impl Into<String>) -> Self {
        match found {
            Some(found) => Self::UnexpectedChar {
                found,
                expected: expected.into(),
            },
            None => Self::UnexpectedEnd {
                expected: expected.into(),
            },
        }
    }

    /// The error underneath any `Parse` wrapping
    pub fn root_cause(&self) -> &Error {
        match self {
            Self::Parse { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

fn describe_failures(failures: &[ListenerFailure]) -> String {
    failures
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, Error>;
