//! Error results that can be returned from the ferrite parsers
use thiserror::Error;

/// Errors produced by the token stream, the lookahead buffer or a grammar.
///
/// `Eof` is the terminal value of a stream that ran out of input; it is not a
/// fault. Callers that inspect a parser's error after a full parse see `Eof`
/// on success and one of the other variants on failure.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Error forwarded verbatim from the upstream tokenizer
    #[error("tokenizer error: {0}")]
    Stream(String),

    /// End of input, the terminal state of a healthy stream
    #[error("end of input")]
    Eof,

    /// The grammar required more lookahead than the buffer permits
    #[error("looking too far ahead")]
    LookaheadExhausted,

    /// Expected one of a set of token kinds, got another
    #[error("{message} in {context} at offset {offset}")]
    GrammarMismatch {
        /// Human readable expectation, e.g. "expected ';' instead of '}'"
        message: String,
        /// Byte offset of the offending token in the source
        offset: usize,
        /// The production being parsed, e.g. "for statement"
        context: &'static str,
    },
}

/// Result that can be returned which holds either T or a ParseError
pub type SharedResult<T> = Result<T, ParseError>;
