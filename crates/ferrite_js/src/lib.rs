//! Recursive descent script parser.
//!
//! The parser consumes an externally supplied token stream (the tokenizer is
//! not part of this crate) through the shared lookahead ring and produces a
//! uniform tree of `{ grammar, children, kind, data }` nodes. Expressions
//! keep their operator and operand tokens as flat ordered sequences; no
//! precedence tree is materialized, which leaves precedence-aware
//! interpretation to the caller.
//!
//! The tree is returned even when parsing failed; the accompanying error is
//! [`ParseError::Eof`] on success and a grammar mismatch with byte offset
//! and production context on failure.

use ferrite_shared::ParseError;

pub mod node;
pub mod parser;
pub mod testing;
pub mod tokens;
pub mod walker;

pub use node::{GrammarType, Node};
pub use parser::Parser;
pub use tokens::{ScriptStream, TokenType};

/// Parses a module off the given token stream.
pub fn parse<S: ScriptStream>(stream: S) -> (Node, ParseError) {
    let mut parser = Parser::new(stream);
    let module = parser.parse_module();
    let err = parser.err().unwrap_or(ParseError::Eof);
    (module, err)
}
