use crate::node::{Node, TokenNode};
use crate::tokens::TokenType;
use crate::Css3;
use ferrite_shared::TokenStream;

mod at_rule;
mod block;
mod declaration;
mod function;
mod ruleset;
mod selector;

/// The construct the parser is currently inside of.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParserState {
    Stylesheet,
    AtRule,
    Ruleset,
}

/// One step of the push-style event sequence. Matching `AtRule`/`EndAtRule`
/// and `Ruleset`/`EndRuleset` pairs bracket nested content; `Error` surfaces
/// end-of-input and tokenizer errors.
#[derive(Debug, PartialEq, Clone)]
pub enum GrammarEvent {
    Error,
    AtRule(Node),
    EndAtRule(Node),
    Ruleset(Node),
    EndRuleset(Node),
    Declaration(Node),
    Token(Node),
}

impl<S: TokenStream<Kind = TokenType>> Css3<S> {
    /// Produces the next grammar event.
    pub fn next_event(&mut self) -> GrammarEvent {
        log::trace!("next_event");

        if self.at(TokenType::Error) {
            return GrammarEvent::Error;
        }
        self.skip_whitespace();

        // close an open construct on its terminator
        let state = self.state();
        if self.at(TokenType::RCurly) && (state == ParserState::AtRule || state == ParserState::Ruleset)
            || self.at(TokenType::Semicolon) && state == ParserState::AtRule
        {
            let terminator = self.shift();
            self.skip_while(TokenType::Semicolon);

            self.state.pop();
            return match state {
                ParserState::AtRule => GrammarEvent::EndAtRule(Node::token(terminator)),
                _ => GrammarEvent::EndRuleset(Node::token(terminator)),
            };
        }

        if self.at(TokenType::Cdo) || self.at(TokenType::Cdc) {
            return GrammarEvent::Token(Node::token(self.shift()));
        }
        if let Some(node) = self.parse_at_rule() {
            return GrammarEvent::AtRule(node);
        }
        if let Some(node) = self.parse_ruleset() {
            return GrammarEvent::Ruleset(node);
        }
        if let Some(node) = self.parse_declaration() {
            return GrammarEvent::Declaration(node);
        }
        if self.at(TokenType::Error) {
            return GrammarEvent::Error;
        }
        GrammarEvent::Token(self.shift_component())
    }

    /// The innermost open construct.
    pub fn state(&self) -> ParserState {
        *self.state.last().unwrap_or(&ParserState::Stylesheet)
    }

    /// A component: a block, a function call, or a single token.
    pub(crate) fn shift_component(&mut self) -> Node {
        if let Some(node) = self.parse_block() {
            node
        } else if let Some(node) = self.parse_function() {
            node
        } else {
            Node::token(self.shift())
        }
    }

    pub(crate) fn at(&mut self, token_type: TokenType) -> bool {
        self.buffer.peek_kind(0) == token_type
    }

    pub(crate) fn at_delim(&mut self, delimiter: u8) -> bool {
        self.at(TokenType::Delim)
            && self
                .buffer
                .peek_with_text(0, |bytes| bytes.first().copied() == Some(delimiter))
    }

    /// Consumes the current token into an owned tree leaf.
    pub(crate) fn shift(&mut self) -> TokenNode {
        TokenNode::from(self.buffer.shift())
    }

    /// Skips a single leading whitespace token; the buffer already collapsed
    /// any run into one.
    pub(crate) fn skip_whitespace(&mut self) {
        if self.at(TokenType::Whitespace) {
            self.buffer.shift();
        }
    }

    /// Skips every following token of the given type, plus whitespace.
    pub(crate) fn skip_while(&mut self, token_type: TokenType) {
        while self.at(token_type) || self.at(TokenType::Whitespace) {
            self.buffer.shift();
        }
    }
}
