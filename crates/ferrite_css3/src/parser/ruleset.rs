use crate::node::{Node, NodeType};
use crate::parser::ParserState;
use crate::tokens::TokenType;
use crate::Css3;
use ferrite_shared::TokenStream;

impl<S: TokenStream<Kind = TokenType>> Css3<S> {
    /// Recognizes a ruleset. A ruleset is only attempted when a `{` appears
    /// in the upcoming stream before any `;` or error; the scan distance is
    /// bounded by the lookahead ring, so an absurdly long prelude resolves
    /// to the synthetic lookahead-exhausted token and the attempt is
    /// abandoned.
    pub(crate) fn parse_ruleset(&mut self) -> Option<Node> {
        let mut i = 0;
        loop {
            match self.buffer.peek_kind(i) {
                TokenType::LCurly => break,
                TokenType::Semicolon | TokenType::Error => return None,
                _ => i += 1,
            }
        }
        log::trace!("parse_ruleset");

        let mut selectors = Vec::new();
        while !self.at(TokenType::LCurly) && !self.at(TokenType::Error) {
            if self.at(TokenType::Comma) {
                self.buffer.shift();
                self.skip_whitespace();
                continue;
            }
            if let Some(selector) = self.parse_selector() {
                selectors.push(selector);
            }
            self.skip_whitespace();
        }
        if self.at(TokenType::Error) {
            return None;
        }

        self.buffer.shift();
        self.state.push(ParserState::Ruleset);

        Some(Node::new(NodeType::Ruleset {
            selectors,
            declarations: Vec::new(),
        }))
    }
}
