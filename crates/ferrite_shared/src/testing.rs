//! Test support: a scripted token stream honoring the full stream contract.

use crate::errors::ParseError;
use crate::token::{CopyHook, SourceArena, Token, TokenKind, TokenStream, TokenText};

/// Plays back a prepared token sequence through the [`TokenStream`] contract.
///
/// The stream owns a real [`SourceArena`] and overwrites it for every token
/// it hands out, firing the copy hook first. That is the worst-case behavior
/// the contract permits, so parsers driven by a `ReplayStream` exercise the
/// aliasing protocol on every single token.
pub struct ReplayStream<K: TokenKind> {
    tokens: Vec<(K, Vec<u8>)>,
    pos: usize,
    offset: usize,
    arena: SourceArena,
    hook: Option<CopyHook>,
    terminal: ParseError,
}

impl<K: TokenKind> ReplayStream<K> {
    pub fn new(tokens: Vec<(K, Vec<u8>)>) -> Self {
        Self {
            tokens,
            pos: 0,
            offset: 0,
            arena: SourceArena::new(),
            hook: None,
            terminal: ParseError::Eof,
        }
    }

    /// A stream that terminates with the given error instead of end-of-input.
    pub fn with_error(tokens: Vec<(K, Vec<u8>)>, error: ParseError) -> Self {
        let mut stream = Self::new(tokens);
        stream.terminal = error;
        stream
    }

    /// Index of the next token to play back.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Byte offset right after the last token handed out.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl<K: TokenKind> TokenStream for ReplayStream<K> {
    type Kind = K;

    fn next_token(&mut self) -> Token<K> {
        if self.pos >= self.tokens.len() {
            return Token::new(K::error(), TokenText::empty(), self.offset);
        }

        // about to overwrite the arena: detach everything handed out so far
        if let Some(hook) = &self.hook {
            hook();
        }

        let (kind, bytes) = self.tokens[self.pos].clone();
        let span = self.arena.replace(&bytes);
        let token = Token::new(kind, TokenText::aliased(self.arena.clone(), span), self.offset);
        self.pos += 1;
        self.offset += bytes.len();
        token
    }

    fn attach_copy_hook(&mut self, hook: CopyHook) {
        self.hook = Some(hook);
    }

    fn error(&self) -> Option<ParseError> {
        if self.pos >= self.tokens.len() {
            Some(self.terminal.clone())
        } else {
            None
        }
    }
}
