use crate::node::{Node, NodeType};
use crate::tokens::TokenType;
use crate::Css3;
use ferrite_shared::TokenStream;

impl<S: TokenStream<Kind = TokenType>> Css3<S> {
    /// Recognizes a `property: value` declaration. Returns None when the
    /// current token is not an identifier or no `:` follows it; the tokens
    /// consumed by the failed attempt are dropped, which is the greedy
    /// recovery the event fallback relies on.
    pub(crate) fn parse_declaration(&mut self) -> Option<Node> {
        if !self.at(TokenType::Ident) {
            return None;
        }
        log::trace!("parse_declaration");

        let property = self.shift();
        self.skip_whitespace();
        if !self.at(TokenType::Colon) {
            log::trace!("abandoning declaration: no colon after property");
            return None;
        }
        self.buffer.shift();
        self.skip_whitespace();

        let mut value = Vec::new();
        let mut important = false;
        while !self.at(TokenType::Semicolon) && !self.at(TokenType::RCurly) && !self.at(TokenType::Error) {
            if self.at_delim(b'!') {
                let exclamation = self.shift();
                self.skip_whitespace();
                if self.at(TokenType::Ident)
                    && self.buffer.peek_with_text(0, |bytes| bytes.eq_ignore_ascii_case(b"important"))
                {
                    important = true;
                    self.buffer.shift();
                } else {
                    // a bare `!` stays part of the value
                    value.push(Node::token(exclamation));
                }
            } else if let Some(function) = self.parse_function() {
                value.push(function);
            } else {
                value.push(Node::token(self.shift()));
            }
            self.skip_whitespace();
        }
        self.skip_while(TokenType::Semicolon);

        Some(Node::new(NodeType::Declaration {
            property,
            value,
            important,
        }))
    }
}
