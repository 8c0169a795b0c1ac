use std::{error::Error, fmt};

pub type DecodeResult<T> = Result<T, DecodeError>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodeError {
    Empty,
    UnknownSymbol {
        offset: usize,
        symbol: char,
    },
    Unterminated {
        offset: usize,
        open: char,
    },
    MissingDigits {
        offset: usize,
        production: &'static str,
    },
    Malformed {
        offset: usize,
        production: &'static str,
    },
    MissingBlockMarker {
        offset: usize,
    },
    TrailingInput {
        offset: usize,
        rest: String,
    },
    MissingReturnType,
}

impl DecodeError {
    /// Byte offset into the input where the failure was detected, if it has one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            DecodeError::UnknownSymbol { offset, .. }
            | DecodeError::Unterminated { offset, .. }
            | DecodeError::MissingDigits { offset, .. }
            | DecodeError::Malformed { offset, .. }
            | DecodeError::MissingBlockMarker { offset }
            | DecodeError::TrailingInput { offset, .. } => Some(*offset),
            DecodeError::Empty | DecodeError::MissingReturnType => None,
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Empty => write!(f, "type encoding is empty"),
            DecodeError::UnknownSymbol { offset, symbol } => {
                write!(f, "unknown type symbol '{symbol}' at offset {offset}")
            }
            DecodeError::Unterminated { offset, open } => {
                write!(f, "'{open}' at offset {offset} is never closed")
            }
            DecodeError::MissingDigits { offset, production } => {
                write!(f, "{production} at offset {offset} requires digits")
            }
            DecodeError::Malformed { offset, production } => {
                write!(f, "malformed {production} at offset {offset}")
            }
            DecodeError::MissingBlockMarker { offset } => write!(
                f,
                "block signature at offset {offset} lacks the '@?' self marker"
            ),
            DecodeError::TrailingInput { offset, rest } => {
                write!(f, "unexpected trailing input '{rest}' at offset {offset}")
            }
            DecodeError::MissingReturnType => {
                write!(f, "method signature has no return type")
            }
        }
    }
}

impl Error for DecodeError {}
