//! Lookahead ring over an external token stream.
//!
//! The buffer materializes tokens on demand (`peek`), consumes them in
//! source order (`shift`) and detaches aliased token text from the stream's
//! arena when the stream announces invalidation through the copy hook.

use crate::errors::ParseError;
use crate::token::{Token, TokenKind, TokenStream, TokenText};
use std::cell::RefCell;
use std::rc::Rc;

/// Growth bounds of the lookahead ring.
#[derive(Clone, Copy, Debug)]
pub struct BufferConfig {
    /// Logical capacity the ring starts out with
    pub initial_capacity: usize,
    /// Hard bound the ring never grows past; peeking further yields a
    /// synthetic error token instead
    pub max_capacity: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 16,
            max_capacity: 4096,
        }
    }
}

struct Ring<K> {
    tokens: Vec<Token<K>>,
    /// Index of the next token to consume. Everything at and after `pos` is
    /// live; everything before it has been shifted out.
    pos: usize,
}

/// Lookahead buffer with `peek(i)`/`shift()` over a [`TokenStream`].
///
/// Whitespace runs are collapsed so that no two adjacent buffered tokens are
/// both whitespace, and comment tokens are filtered out entirely. When the
/// ring runs out of room it either doubles its capacity (live suffix longer
/// than half the capacity) or compacts the live suffix to the front; a peek
/// distance that still does not fit produces a synthetic error token with
/// the "looking too far ahead" message.
pub struct TokenBuffer<S: TokenStream> {
    stream: S,
    ring: Rc<RefCell<Ring<S::Kind>>>,
    capacity: usize,
    max_capacity: usize,
}

impl<S: TokenStream> TokenBuffer<S> {
    pub fn new(stream: S) -> Self {
        Self::with_config(stream, BufferConfig::default())
    }

    pub fn with_config(mut stream: S, config: BufferConfig) -> Self {
        let ring = Rc::new(RefCell::new(Ring {
            tokens: Vec::with_capacity(config.initial_capacity),
            pos: 0,
        }));

        // The stream invokes this immediately before it overwrites shared
        // storage; every live token must own its bytes afterwards.
        let hook_ring = Rc::clone(&ring);
        stream.attach_copy_hook(Rc::new(move || {
            let mut ring = hook_ring.borrow_mut();
            let pos = ring.pos;
            for token in ring.tokens[pos..].iter_mut() {
                token.text.detach();
            }
        }));

        Self {
            stream,
            ring,
            capacity: config.initial_capacity.max(1),
            max_capacity: config.max_capacity.max(config.initial_capacity),
        }
    }

    /// Materializes and returns the i-th upcoming token without consuming it.
    pub fn peek(&mut self, i: usize) -> Token<S::Kind> {
        if !self.ensure(i) {
            return self.exhausted_token();
        }
        let ring = self.ring.borrow();
        ring.tokens[ring.pos + i].clone()
    }

    /// Kind of the i-th upcoming token; cheaper than [`TokenBuffer::peek`].
    pub fn peek_kind(&mut self, i: usize) -> S::Kind {
        if !self.ensure(i) {
            return S::Kind::error();
        }
        let ring = self.ring.borrow();
        ring.tokens[ring.pos + i].kind
    }

    /// Runs `f` against the text of the i-th upcoming token.
    pub fn peek_with_text<R>(&mut self, i: usize, f: impl FnOnce(&[u8]) -> R) -> R {
        if !self.ensure(i) {
            return f(&[]);
        }
        let ring = self.ring.borrow();
        ring.tokens[ring.pos + i].text.with_bytes(f)
    }

    /// Consumes and returns the next token. The returned token always owns
    /// its bytes: consumption is the ownership transfer boundary between the
    /// stream's arena and the caller's tree.
    pub fn shift(&mut self) -> Token<S::Kind> {
        if !self.ensure(0) {
            return self.exhausted_token();
        }
        let mut ring = self.ring.borrow_mut();
        let pos = ring.pos;
        // the consumed slot keeps its kind: whitespace collapsing in read()
        // checks the last buffered token, consumed or not
        let (kind, offset) = {
            let token = &ring.tokens[pos];
            (token.kind, token.offset)
        };
        let placeholder = Token::new(kind, TokenText::empty(), offset);
        let mut token = std::mem::replace(&mut ring.tokens[pos], placeholder);
        ring.pos += 1;
        drop(ring);
        token.text.detach();
        token
    }

    /// The stream's terminal error, if it has one.
    pub fn error(&self) -> Option<ParseError> {
        self.stream.error()
    }

    /// Asks the stream to re-tokenize at its current position, replacing
    /// nothing in the ring. Only legal while the ring holds no materialized
    /// unconsumed tokens, which is the case for grammars that never peek
    /// past the current token.
    pub fn re_lex_with<F>(&mut self, f: F) -> Token<S::Kind>
    where
        F: FnOnce(&mut S) -> Token<S::Kind>,
    {
        debug_assert!({
            let ring = self.ring.borrow();
            ring.pos == ring.tokens.len()
        });
        f(&mut self.stream)
    }

    /// Makes sure the token at distance `i` is materialized. Returns false
    /// when the request exceeds the ring's bounded capacity.
    fn ensure(&mut self, i: usize) -> bool {
        {
            let mut ring = self.ring.borrow_mut();
            if ring.pos + i < ring.tokens.len() {
                return true;
            }
            if ring.pos + i >= self.capacity {
                let live = ring.tokens.len() - ring.pos;
                if 2 * live > self.capacity && 2 * self.capacity <= self.max_capacity {
                    self.capacity *= 2;
                }
                let pos = ring.pos;
                ring.tokens.drain(..pos);
                ring.pos = 0;
                if i >= self.capacity {
                    log::trace!("lookahead exhausted at distance {i}");
                    return false;
                }
            }
        }

        loop {
            {
                let ring = self.ring.borrow();
                if ring.tokens.len() > ring.pos + i {
                    return true;
                }
            }
            // read outside any ring borrow: the stream may fire the copy hook
            let token = self.read();
            self.ring.borrow_mut().tokens.push(token);
        }
    }

    /// Pulls the next token from the stream, dropping comments and
    /// collapsing whitespace runs against the last buffered token.
    fn read(&mut self) -> Token<S::Kind> {
        loop {
            let token = self.stream.next_token();
            if token.kind.is_comment() {
                continue;
            }
            if token.kind.is_whitespace() {
                let last_is_whitespace = {
                    let ring = self.ring.borrow();
                    ring.tokens.last().is_some_and(|t| t.kind.is_whitespace())
                };
                if last_is_whitespace {
                    continue;
                }
            }
            return token;
        }
    }

    fn exhausted_token(&self) -> Token<S::Kind> {
        let offset = {
            let ring = self.ring.borrow();
            ring.tokens.last().map_or(0, |t| t.offset)
        };
        Token::new(
            S::Kind::error(),
            TokenText::owned(ParseError::LookaheadExhausted.to_string().into_bytes()),
            offset,
        )
    }
}
