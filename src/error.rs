//! randseq-specific errors
//!
//! Only [`RandSeqError::EntropySourceUnavailable`] can happen when generating
//! a sequence, the other variants come from parsing and testing sequences.
use thiserror::Error;

/// An error that randseq could end up producing.
///
/// There are two families of errors:
/// - related to _seeding_ the generator
/// - related to reading and testing binary sequences
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RandSeqError {
    /// `{0}` is the message of the underlying entropy source failure.
    #[error("could not seed the generator, entropy source unavailable: {0}")]
    EntropySourceUnavailable(String),
    #[error("sequence is empty")]
    EmptySequence,
    #[error("expected only '0' and '1' in sequence, found {found:?} at index {index}")]
    InvalidSequence { index: usize, found: char },
    #[error("expected exactly {expected} bits, found {found}")]
    InvalidLength { expected: usize, found: usize },
    #[error("sequence is too short: expected at least {expected} bits, found {found}")]
    SequenceTooShort { expected: usize, found: usize },
}
