use crate::node::{Node, NodeType, TokenNode};
use crate::tokens::TokenType;
use crate::Css3;
use ferrite_shared::TokenStream;

impl<S: TokenStream<Kind = TokenType>> Css3<S> {
    /// Collects one selector, terminating at `,`, `{` or error. Combinator
    /// delimiters (`>`, `+`, `~`) elide their surrounding whitespace;
    /// attribute brackets are collected up to the matching `]`; a single
    /// whitespace token is carried forward as a descendant combinator iff a
    /// further element follows it.
    pub(crate) fn parse_selector(&mut self) -> Option<Node> {
        log::trace!("parse_selector");

        let mut elements: Vec<Node> = Vec::new();
        let mut pending_whitespace: Option<TokenNode> = None;

        while !self.at(TokenType::Comma) && !self.at(TokenType::LCurly) && !self.at(TokenType::Error) {
            if self.at_delim(b'>') || self.at_delim(b'+') || self.at_delim(b'~') {
                elements.push(Node::token(self.shift()));
                self.skip_whitespace();
            } else if self.at(TokenType::LBracket) {
                while !self.at(TokenType::RBracket) && !self.at(TokenType::Error) {
                    elements.push(Node::token(self.shift()));
                    self.skip_whitespace();
                }
                if self.at(TokenType::RBracket) {
                    elements.push(Node::token(self.shift()));
                }
            } else {
                if let Some(whitespace) = pending_whitespace.take() {
                    elements.push(Node::token(whitespace));
                }
                elements.push(Node::token(self.shift()));
            }

            pending_whitespace = if self.at(TokenType::Whitespace) {
                Some(self.shift())
            } else {
                None
            };
        }

        if elements.is_empty() {
            return None;
        }
        Some(Node::new(NodeType::Selector { elements }))
    }
}
