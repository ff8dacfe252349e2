//! Test support: a scripted stream implementing the script contract,
//! including regular-expression re-reads.

use crate::tokens::{ScriptStream, TokenType};
use ferrite_shared::testing::ReplayStream;
use ferrite_shared::{CopyHook, ParseError, Token, TokenStream, TokenText};
use std::collections::HashMap;

/// Plays back a prepared script token sequence and answers regex re-reads
/// from a side table keyed by token index.
///
/// A grammar-driven re-read replaces the token most recently handed out, so
/// `with_regexps` takes the index of the `/` (or `/=`) token to replace and
/// the regular-expression token that a real lexer would have produced there.
pub struct ScriptReplayStream {
    inner: ReplayStream<TokenType>,
    regexps: HashMap<usize, (TokenType, Vec<u8>)>,
    last_offset: usize,
}

impl ScriptReplayStream {
    pub fn new(tokens: Vec<(TokenType, Vec<u8>)>) -> Self {
        Self::with_regexps(tokens, Vec::new())
    }

    pub fn with_regexps(
        tokens: Vec<(TokenType, Vec<u8>)>,
        regexps: Vec<(usize, TokenType, Vec<u8>)>,
    ) -> Self {
        Self {
            inner: ReplayStream::new(tokens),
            regexps: regexps
                .into_iter()
                .map(|(index, kind, bytes)| (index, (kind, bytes)))
                .collect(),
            last_offset: 0,
        }
    }
}

impl TokenStream for ScriptReplayStream {
    type Kind = TokenType;

    fn next_token(&mut self) -> Token<TokenType> {
        let token = self.inner.next_token();
        self.last_offset = token.offset;
        token
    }

    fn attach_copy_hook(&mut self, hook: CopyHook) {
        self.inner.attach_copy_hook(hook);
    }

    fn error(&self) -> Option<ParseError> {
        self.inner.error()
    }
}

impl ScriptStream for ScriptReplayStream {
    fn re_lex_regexp(&mut self) -> Token<TokenType> {
        let index = self.inner.position().saturating_sub(1);
        match self.regexps.get(&index) {
            Some((kind, bytes)) => Token::new(*kind, TokenText::owned(bytes.clone()), self.last_offset),
            None => Token::new(TokenType::Error, TokenText::empty(), self.last_offset),
        }
    }
}
