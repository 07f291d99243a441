use thiserror::Error;

/// Error types
#[derive(Debug, Error)]
pub enum Error {
    #[error("vote_aggregator: invalid tally data length {0}")]
    MalformedTally(usize),

    #[error("vote_aggregator: invalid action data length {0}")]
    MalformedAction(usize),

    #[error("vote_aggregator: malformed witness args: {0}")]
    Witness(String),

    #[error("vote_aggregator: the query did not match any cell")]
    NotFound,

    #[error("vote_aggregator: the query must return exactly one cell, found {0}")]
    AmbiguousLookup(usize),

    #[error("vote_aggregator: cell lookup failed: {0}")]
    Lookup(String),

    #[error("vote_aggregator: invalid hex - missing 0x prefix")]
    HexMissingPrefix,

    #[error("vote_aggregator: invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("vote_aggregator: invalid hex - wrong length, expected {0} bytes")]
    HexBadLen(usize),

    #[error("vote_aggregator: invalid hex quantity {0}")]
    HexQuantity(String),

    #[error("vote_aggregator: {0}")]
    Validation(#[from] ValidationError),
}

impl Error {
    /// Stable code for reporting this error over a transport such as JSON-RPC
    pub fn code(&self) -> i64 {
        match self {
            Error::MalformedTally(_) => -1,
            Error::MalformedAction(_) => -2,
            Error::Witness(_) => -3,
            Error::NotFound => -4,
            Error::AmbiguousLookup(_) => -5,
            Error::Lookup(_) => -6,
            Error::HexMissingPrefix
            | Error::Hex(_)
            | Error::HexBadLen(_)
            | Error::HexQuantity(_) => -7,
            Error::Validation(err) => err.code(),
        }
    }
}

/// Partial transaction validation errors
///
/// `fragment` is the zero-based position of the rejected partial transaction in the request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("validation: fragment {fragment} has {inputs} inputs but {witnesses} witnesses")]
    ArityMismatch {
        fragment: usize,
        inputs: usize,
        witnesses: usize,
    },

    #[error("validation: fragment {fragment} has {outputs_data} outputs data for {outputs} outputs")]
    OutputsDataMismatch {
        fragment: usize,
        outputs: usize,
        outputs_data: usize,
    },

    #[error("validation: fragment {fragment} action is missing")]
    MissingAction { fragment: usize },

    #[error("validation: fragment {fragment} first witness is not valid witness args")]
    MalformedWitness { fragment: usize },

    #[error("validation: fragment {fragment} has invalid action data length {len}")]
    MalformedAction { fragment: usize, len: usize },

    #[error("validation: fragment {fragment} votes for candidate {index}, only {candidates} exist")]
    IndexOutOfRange {
        fragment: usize,
        index: u32,
        candidates: usize,
    },
}

impl ValidationError {
    /// Position of the offending fragment
    pub fn fragment(&self) -> usize {
        match *self {
            ValidationError::ArityMismatch { fragment, .. }
            | ValidationError::OutputsDataMismatch { fragment, .. }
            | ValidationError::MissingAction { fragment }
            | ValidationError::MalformedWitness { fragment }
            | ValidationError::MalformedAction { fragment, .. }
            | ValidationError::IndexOutOfRange { fragment, .. } => fragment,
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            ValidationError::ArityMismatch { .. } => -10,
            ValidationError::OutputsDataMismatch { .. } => -11,
            ValidationError::MissingAction { .. } => -12,
            ValidationError::MalformedWitness { .. } => -13,
            ValidationError::MalformedAction { .. } => -2,
            ValidationError::IndexOutOfRange { .. } => -14,
        }
    }
}
