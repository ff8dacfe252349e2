use crate::node::{Node, NodeType};
use crate::tokens::TokenType;
use crate::Css3;
use ferrite_shared::TokenStream;

impl<S: TokenStream<Kind = TokenType>> Css3<S> {
    /// Recognizes a bracketed block opened by `(`, `{` or `[`. Components
    /// are collected until any closing bracket or an error; the closer is
    /// retained in the node and absent on unterminated input.
    pub(crate) fn parse_block(&mut self) -> Option<Node> {
        if !self.at(TokenType::LParen) && !self.at(TokenType::LCurly) && !self.at(TokenType::LBracket) {
            return None;
        }
        log::trace!("parse_block");

        let open = self.shift();
        self.skip_whitespace();

        let mut children = Vec::new();
        loop {
            if self.at(TokenType::RCurly)
                || self.at(TokenType::RParen)
                || self.at(TokenType::RBracket)
                || self.at(TokenType::Error)
            {
                break;
            }
            children.push(self.shift_component());
            self.skip_whitespace();
        }

        let close = if !self.at(TokenType::Error) {
            Some(self.shift())
        } else {
            None
        };

        Some(Node::new(NodeType::Block {
            open,
            children,
            close,
        }))
    }
}
