//! Error types for ISM decoding.

/// Errors that can occur while decoding an ISM file.
///
/// Decoding is all-or-nothing: any of these aborts the decode immediately
/// and no partial record is returned.
#[derive(Debug, thiserror::Error)]
pub enum IsmError {
    /// I/O error while opening or reading the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input ended before a declared field could be read in full
    #[error("truncated input: {field} needs {needed} bytes, only {available} available")]
    TruncatedInput {
        /// Name of the field being read when the input ran out
        field: &'static str,
        /// Bytes required by the field
        needed: usize,
        /// Bytes actually remaining
        available: usize,
    },

    /// The declared element count is negative, yielding no samples
    #[error("invalid element count: raw count {0} yields no samples")]
    InvalidCount(i64),

    /// The embedded date field could not be parsed as a calendar date
    #[error("invalid measurement date: {0}")]
    InvalidDate(String),
}
