use crate::node::{Node, NodeType};
use crate::parser::ParserState;
use crate::tokens::TokenType;
use crate::Css3;
use ferrite_shared::TokenStream;

impl<S: TokenStream<Kind = TokenType>> Css3<S> {
    /// Recognizes an at-rule: an at-keyword followed by prelude components
    /// up to `;` or `{`. Returns None when the current token is not an
    /// at-keyword.
    pub(crate) fn parse_at_rule(&mut self) -> Option<Node> {
        if !self.at(TokenType::AtKeyword) {
            return None;
        }
        log::trace!("parse_at_rule");

        let name = self.shift();
        self.skip_whitespace();

        let mut prelude = Vec::new();
        while !self.at(TokenType::Semicolon) && !self.at(TokenType::LCurly) && !self.at(TokenType::Error) {
            prelude.push(self.shift_component());
            self.skip_whitespace();
        }

        if self.at(TokenType::LCurly) {
            self.buffer.shift();
        }
        // statement-form at-rules push state too; the next event observes
        // the `;` in at-rule state and closes them right away
        self.state.push(ParserState::AtRule);

        Some(Node::new(NodeType::AtRule {
            name,
            prelude,
            rules: Vec::new(),
        }))
    }
}
