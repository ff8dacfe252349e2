//! Streaming stylesheet parser.
//!
//! The parser pulls from an externally supplied token stream (the tokenizer
//! is not part of this crate) through the shared lookahead ring, recovers
//! stylesheet structure despite malformed input, and exposes the result both
//! as a push-style event sequence ([`Css3::next_event`]) and as a full tree
//! ([`Css3::parse`]). The tree is returned even when an error cut the parse
//! short; callers inspect [`Css3::err`] afterwards and see
//! [`ParseError::Eof`] on success.

use crate::node::{Node, NodeType};
use crate::parser::GrammarEvent;
use crate::parser::ParserState;
use crate::tokens::TokenType;
use ferrite_shared::{BufferConfig, ParseError, TokenBuffer, TokenStream};

pub mod node;
pub mod parser;
pub mod tokens;
pub mod walker;

/// Stylesheet grammar parser over an external token stream.
pub struct Css3<S: TokenStream<Kind = TokenType>> {
    /// Lookahead ring over the external tokenizer
    buffer: TokenBuffer<S>,
    /// Stack of open constructs; the last entry drives event dispatch
    state: Vec<ParserState>,
}

impl<S: TokenStream<Kind = TokenType>> Css3<S> {
    /// Creates a parser reading from the given token stream.
    pub fn new(stream: S) -> Self {
        Self::with_config(stream, BufferConfig::default())
    }

    /// Creates a parser with explicit lookahead buffer bounds.
    pub fn with_config(stream: S, config: BufferConfig) -> Self {
        Self {
            buffer: TokenBuffer::with_config(stream, config),
            state: vec![ParserState::Stylesheet],
        }
    }

    /// Consumes the event sequence and reconstructs the nesting hierarchy
    /// into a single `Stylesheet` node. Stops at the first error event; the
    /// partial tree built so far is still returned.
    pub fn parse(&mut self) -> Node {
        log::trace!("parse");

        let mut children = Vec::new();
        loop {
            match self.next_event() {
                GrammarEvent::Error => break,
                event => {
                    let (node, ok) = self.collect_nested(event);
                    children.push(node);
                    if !ok {
                        break;
                    }
                }
            }
        }

        Node::new(NodeType::Stylesheet { children })
    }

    /// The terminal error of the underlying stream: `Eof` after a clean
    /// parse, the forwarded tokenizer error otherwise, `None` while tokens
    /// are still being produced.
    pub fn err(&self) -> Option<ParseError> {
        self.buffer.error()
    }

    /// Rebuilds one event's subtree. At-rules re-collect every nested event
    /// until their `EndAtRule`; rulesets keep only declaration events until
    /// their `EndRuleset`. The bool is false when an error event terminated
    /// the nesting early.
    fn collect_nested(&mut self, event: GrammarEvent) -> (Node, bool) {
        match event {
            GrammarEvent::AtRule(mut node) => loop {
                match self.next_event() {
                    GrammarEvent::Error => return (node, false),
                    GrammarEvent::EndAtRule(_) => return (node, true),
                    inner => {
                        let (child, ok) = self.collect_nested(inner);
                        if let NodeType::AtRule { rules, .. } = node.node_type.as_mut() {
                            rules.push(child);
                        }
                        if !ok {
                            return (node, false);
                        }
                    }
                }
            },
            GrammarEvent::Ruleset(mut node) => loop {
                match self.next_event() {
                    GrammarEvent::Error => return (node, false),
                    GrammarEvent::EndRuleset(_) => return (node, true),
                    GrammarEvent::Declaration(declaration) => {
                        if let NodeType::Ruleset { declarations, .. } = node.node_type.as_mut() {
                            declarations.push(declaration);
                        }
                    }
                    _ => {
                        // rulesets hold declarations only
                    }
                }
            },
            GrammarEvent::Declaration(node)
            | GrammarEvent::Token(node)
            | GrammarEvent::EndAtRule(node)
            | GrammarEvent::EndRuleset(node) => (node, true),
            // the callers filter error events out before recursing
            GrammarEvent::Error => (Node::new(NodeType::Stylesheet { children: Vec::new() }), false),
        }
    }
}
