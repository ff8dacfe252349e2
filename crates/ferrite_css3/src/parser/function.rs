use crate::node::{Node, NodeType};
use crate::tokens::TokenType;
use crate::Css3;
use ferrite_shared::TokenStream;

impl<S: TokenStream<Kind = TokenType>> Css3<S> {
    /// Recognizes a function call: a function-open token followed by
    /// comma-separated argument lists up to `)`. Unterminated input (error
    /// before the closing paren) abandons the node.
    pub(crate) fn parse_function(&mut self) -> Option<Node> {
        if !self.at(TokenType::Function) {
            return None;
        }
        log::trace!("parse_function");

        let name = self.shift();
        self.skip_whitespace();

        let mut arguments = Vec::new();
        while !self.at(TokenType::RParen) && !self.at(TokenType::Error) {
            if self.at(TokenType::Comma) {
                self.buffer.shift();
                self.skip_whitespace();
                continue;
            }
            arguments.push(self.parse_argument());
        }
        if self.at(TokenType::Error) {
            return None;
        }
        self.buffer.shift();

        Some(Node::new(NodeType::Function { name, arguments }))
    }

    /// One argument: components up to `,`, `)` or error.
    fn parse_argument(&mut self) -> Node {
        log::trace!("parse_argument");

        let mut children = Vec::new();
        while !self.at(TokenType::Comma) && !self.at(TokenType::RParen) && !self.at(TokenType::Error) {
            children.push(self.shift_component());
            self.skip_whitespace();
        }
        Node::new(NodeType::Argument { children })
    }
}
