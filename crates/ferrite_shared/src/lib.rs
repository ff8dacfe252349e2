//! Shared framework for the ferrite parsers: the token stream contract, the
//! lookahead buffer both grammars pull from, and the common error taxonomy.

pub mod buffer;
pub mod errors;
pub mod testing;
pub mod token;

pub use buffer::{BufferConfig, TokenBuffer};
pub use errors::{ParseError, SharedResult};
pub use token::{CopyHook, SourceArena, Token, TokenKind, TokenStream, TokenText};
