//! Token model shared by the stylesheet and script parsers.
//!
//! Tokens come out of an external tokenizer as `(kind, bytes)` pairs. The
//! bytes may alias storage the tokenizer reuses: they stay valid only until
//! the stream announces the next invalidation through the registered copy
//! hook. [`TokenText`] tracks which side of that boundary a payload is on.

use crate::errors::ParseError;
use std::cell::RefCell;
use std::fmt;
use std::ops::Range;
use std::rc::Rc;

/// Handle to the byte arena a tokenizer writes its token text into.
///
/// Cloning the handle is cheap; all clones observe the same storage. The
/// stream that owns the arena may overwrite it, but only after invoking the
/// copy hook registered by the lookahead buffer.
#[derive(Clone, Default)]
pub struct SourceArena(Rc<RefCell<Vec<u8>>>);

impl SourceArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the arena contents and returns the span of the new bytes.
    /// The caller must have fired the copy hook first.
    pub fn replace(&self, bytes: &[u8]) -> Range<usize> {
        let mut buf = self.0.borrow_mut();
        buf.clear();
        buf.extend_from_slice(bytes);
        0..bytes.len()
    }

    /// Runs `f` against the current arena contents.
    pub fn with<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        f(&self.0.borrow())
    }
}

impl fmt::Debug for SourceArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SourceArena({} bytes)", self.0.borrow().len())
    }
}

/// Token payload: either a view into the tokenizer's shared arena, or a
/// private copy detached from it.
#[derive(Clone)]
pub enum TokenText {
    /// View into shared storage, valid until the next copy-hook call
    Aliased {
        /// Arena the span points into
        arena: SourceArena,
        /// Byte range of this token's text within the arena
        span: Range<usize>,
    },
    /// Privately owned copy
    Owned(Vec<u8>),
}

impl TokenText {
    pub fn empty() -> Self {
        TokenText::Owned(Vec::new())
    }

    pub fn owned(bytes: Vec<u8>) -> Self {
        TokenText::Owned(bytes)
    }

    pub fn aliased(arena: SourceArena, span: Range<usize>) -> Self {
        TokenText::Aliased { arena, span }
    }

    /// Converts an aliased payload into an owned copy. Idempotent: owned
    /// text is left untouched, so a token is copied at most once per alias
    /// generation.
    pub fn detach(&mut self) {
        if let TokenText::Aliased { arena, span } = self {
            let bytes = arena.with(|buf| buf.get(span.clone()).map(<[u8]>::to_vec).unwrap_or_default());
            *self = TokenText::Owned(bytes);
        }
    }

    /// Runs `f` against the token bytes.
    pub fn with_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        match self {
            TokenText::Aliased { arena, span } => {
                arena.with(|buf| f(buf.get(span.clone()).unwrap_or_default()))
            }
            TokenText::Owned(bytes) => f(bytes),
        }
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.with_bytes(<[u8]>::to_vec)
    }

    /// Consumes the payload, yielding owned bytes without an extra copy when
    /// already detached.
    pub fn into_vec(self) -> Vec<u8> {
        match self {
            TokenText::Owned(bytes) => bytes,
            aliased => aliased.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TokenText::Aliased { span, .. } => span.len(),
            TokenText::Owned(bytes) => bytes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn first(&self) -> Option<u8> {
        self.with_bytes(|bytes| bytes.first().copied())
    }

    pub fn eq_bytes(&self, other: &[u8]) -> bool {
        self.with_bytes(|bytes| bytes == other)
    }

    pub fn eq_ignore_ascii_case(&self, other: &[u8]) -> bool {
        self.with_bytes(|bytes| bytes.eq_ignore_ascii_case(other))
    }

    /// Returns true while the payload still points into shared storage.
    pub fn is_aliased(&self) -> bool {
        matches!(self, TokenText::Aliased { .. })
    }
}

impl fmt::Debug for TokenText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with_bytes(|bytes| write!(f, "{:?}", String::from_utf8_lossy(bytes)))
    }
}

/// A single lexed token: kind, text and the byte offset of its start.
#[derive(Clone, Debug)]
pub struct Token<K> {
    pub kind: K,
    pub text: TokenText,
    pub offset: usize,
}

impl<K> Token<K> {
    pub fn new(kind: K, text: TokenText, offset: usize) -> Self {
        Self { kind, text, offset }
    }
}

/// The closed set of token categories of one language.
///
/// `error()` names the kind used both for the stream's terminal token and
/// for tokens the buffer synthesizes itself. Kinds are plain data-free
/// enums, hence `'static` (the copy hook owns a handle to the buffered
/// tokens).
pub trait TokenKind: Copy + PartialEq + fmt::Debug + 'static {
    fn is_whitespace(self) -> bool;
    fn is_comment(self) -> bool;
    fn error() -> Self;
}

/// Callback a token stream must invoke before invalidating previously
/// returned aliased bytes.
pub type CopyHook = Rc<dyn Fn()>;

/// Contract of the external tokenizer.
///
/// `next_token` keeps returning tokens of the error kind once the stream is
/// terminal; `error` then reports [`ParseError::Eof`] on clean exhaustion or
/// the forwarded tokenizer fault. Before any operation that invalidates
/// bytes handed out earlier, the stream MUST call the attached copy hook.
pub trait TokenStream {
    type Kind: TokenKind;

    fn next_token(&mut self) -> Token<Self::Kind>;

    fn attach_copy_hook(&mut self, hook: CopyHook);

    /// The terminal error, or None while the stream is still producing.
    fn error(&self) -> Option<ParseError>;
}
