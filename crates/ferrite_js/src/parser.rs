use crate::node::{GrammarType, Node};
use crate::tokens::{ScriptStream, TokenType};
use ferrite_shared::{BufferConfig, ParseError, TokenBuffer};

mod binding;
mod expr;
mod stmt;

/// Recursive descent parser for the script grammar.
///
/// The parser holds the current token (`kind`/`data`), whether a line
/// terminator appeared before it (which drives the automatic semicolon
/// rules), and the first grammar mismatch. After a mismatch the current
/// token is forced to the error kind and every further `next()` is a no-op,
/// so the open productions unwind and the partial tree is still returned.
pub struct Parser<S: ScriptStream> {
    buffer: TokenBuffer<S>,
    kind: TokenType,
    data: Vec<u8>,
    offset: usize,
    prev_line_terminator: bool,
    err: Option<ParseError>,
}

impl<S: ScriptStream> Parser<S> {
    /// Creates a parser reading from the given token stream, primed on the
    /// first significant token.
    pub fn new(stream: S) -> Self {
        Self::with_config(stream, BufferConfig::default())
    }

    /// Creates a parser with explicit lookahead buffer bounds.
    pub fn with_config(stream: S, config: BufferConfig) -> Self {
        let mut parser = Self {
            buffer: TokenBuffer::with_config(stream, config),
            kind: TokenType::Whitespace,
            data: Vec::new(),
            offset: 0,
            prev_line_terminator: false,
            err: None,
        };
        parser.next();
        parser
    }

    /// Consumes statements until end of input and returns the module node.
    pub fn parse_module(&mut self) -> Node {
        log::trace!("parse_module");

        let mut nodes = Vec::new();
        loop {
            match self.kind {
                TokenType::Error => return Node::new(GrammarType::Module, nodes),
                TokenType::Import | TokenType::Export => {
                    // reserved module syntax without a fixed inner grammar;
                    // reported through the regular error path
                    self.fail("module statement", &[]);
                }
                _ => nodes.push(self.parse_stmt()),
            }
        }
    }

    /// The terminal result: the first grammar mismatch if one occurred,
    /// otherwise the stream's terminal error (`Eof` on success), otherwise
    /// `None` while input remains.
    pub fn err(&self) -> Option<ParseError> {
        self.err.clone().or_else(|| self.buffer.error())
    }

    /// Advances to the next significant token, skipping whitespace and line
    /// terminators while recording whether a line terminator was crossed.
    /// No-op once the current token is the error kind.
    pub(crate) fn next(&mut self) {
        if self.kind == TokenType::Error {
            return;
        }
        self.prev_line_terminator = false;

        loop {
            let token = self.buffer.shift();
            match token.kind {
                TokenType::Whitespace => {}
                TokenType::LineTerminator => self.prev_line_terminator = true,
                kind => {
                    self.kind = kind;
                    self.offset = token.offset;
                    self.data = token.text.into_vec();
                    return;
                }
            }
        }
    }

    /// Records a grammar mismatch for the current token and forces the
    /// error kind. Only the first mismatch is kept.
    pub(crate) fn fail(&mut self, context: &'static str, expected: &[TokenType]) {
        if self.err.is_some() {
            return;
        }

        let mut message = String::from("unexpected");
        if !expected.is_empty() {
            message = String::from("expected");
            for (i, kind) in expected[..expected.len() - 1].iter().enumerate() {
                if i > 0 {
                    message.push(',');
                }
                message.push_str(&format!(" '{kind}'"));
            }
            if expected.len() > 2 {
                message.push_str(", or");
            } else if expected.len() > 1 {
                message.push_str(" or");
            }
            message.push_str(&format!(" '{}' instead of", expected[expected.len() - 1]));
        }

        let at = if self.kind == TokenType::Error {
            self.buffer
                .error()
                .map_or_else(|| "error".to_string(), |error| error.to_string())
        } else {
            format!("'{}'", String::from_utf8_lossy(&self.data))
        };
        message.push_str(&format!(" {at}"));
        log::trace!("{message} in {context}");

        self.err = Some(ParseError::GrammarMismatch {
            message,
            offset: self.offset,
            context,
        });
        self.kind = TokenType::Error;
        self.data = Vec::new();
    }

    /// Consumes the expected token kind or records a mismatch.
    pub(crate) fn consume(&mut self, context: &'static str, kind: TokenType) -> bool {
        if self.kind != kind {
            self.fail(context, &[kind]);
            return false;
        }
        self.next();
        true
    }

    /// Moves the current token into a leaf node and advances.
    pub(crate) fn parse_token(&mut self) -> Node {
        let node = Node::token(self.kind, std::mem::take(&mut self.data));
        self.next();
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptReplayStream;

    fn parser(tokens: Vec<(TokenType, &[u8])>) -> Parser<ScriptReplayStream> {
        let tokens = tokens.into_iter().map(|(kind, bytes)| (kind, bytes.to_vec())).collect();
        Parser::new(ScriptReplayStream::new(tokens))
    }

    #[test]
    fn expectation_message_lists_alternatives() {
        let mut parser = parser(vec![
            (TokenType::Do, b"do"),
            (TokenType::Semicolon, b";"),
            (TokenType::Identifier, b"x"),
        ]);
        parser.parse_module();

        match parser.err() {
            Some(ParseError::GrammarMismatch { message, context, .. }) => {
                assert_eq!(message, "expected 'while' instead of 'x'");
                assert_eq!(context, "do statement");
            }
            other => panic!("expected a grammar mismatch, got {other:?}"),
        }
    }

    #[test]
    fn import_and_export_are_reported_not_parsed() {
        let mut parser = parser(vec![
            (TokenType::Import, b"import"),
            (TokenType::Identifier, b"x"),
        ]);
        let module = parser.parse_module();

        assert_eq!(module.grammar, GrammarType::Module);
        match parser.err() {
            Some(ParseError::GrammarMismatch { message, .. }) => {
                assert_eq!(message, "unexpected 'import'");
            }
            other => panic!("expected a grammar mismatch, got {other:?}"),
        }
    }

    #[test]
    fn error_offset_points_at_offending_token() {
        // `var x =` … missing initializer expression
        let mut parser = parser(vec![
            (TokenType::Var, b"var"),
            (TokenType::Whitespace, b" "),
            (TokenType::Identifier, b"x"),
            (TokenType::Whitespace, b" "),
            (TokenType::Eq, b"="),
            (TokenType::Whitespace, b" "),
            (TokenType::Semicolon, b";"),
        ]);
        parser.parse_module();

        match parser.err() {
            Some(ParseError::GrammarMismatch { offset, context, .. }) => {
                assert_eq!(offset, 8);
                assert_eq!(context, "expression");
            }
            other => panic!("expected a grammar mismatch, got {other:?}"),
        }
    }
}
