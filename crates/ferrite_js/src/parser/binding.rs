use crate::node::{GrammarType, Node};
use crate::parser::Parser;
use crate::tokens::{is_identifier, ScriptStream, TokenType};

impl<S: ScriptStream> Parser<S> {
    /// A binding element: a binding with an optional `= AssignExpr` default.
    pub(crate) fn parse_binding_element(&mut self) -> Node {
        log::trace!("parse_binding_element");

        let mut binding = self.parse_binding();
        if self.kind == TokenType::Eq {
            binding.children.push(self.parse_token());
            binding.children.push(self.parse_assignment_expr());
        }
        binding
    }

    /// A binding: an identifier-like token, an array binding pattern with
    /// elision/rest/defaults, or an object binding pattern with shorthand,
    /// rest, computed keys and defaults.
    pub(crate) fn parse_binding(&mut self) -> Node {
        log::trace!("parse_binding");

        let mut nodes = Vec::new();
        if matches!(
            self.kind,
            TokenType::Identifier | TokenType::Yield | TokenType::Await
        ) {
            nodes.push(self.parse_token());
        } else if self.kind == TokenType::OpenBracket {
            nodes.push(self.parse_token());
            while self.kind != TokenType::CloseBracket {
                // elision
                while self.kind == TokenType::Comma {
                    self.next();
                }
                // binding rest element
                if self.kind == TokenType::Ellipsis {
                    nodes.push(self.parse_token());
                    nodes.push(self.parse_binding());
                    if self.kind != TokenType::CloseBracket {
                        self.fail("array binding pattern", &[TokenType::CloseBracket]);
                        return Node::none();
                    }
                    break;
                }

                nodes.push(self.parse_binding_element());

                if self.kind == TokenType::Comma {
                    while self.kind == TokenType::Comma {
                        self.next();
                    }
                } else if self.kind != TokenType::CloseBracket {
                    self.fail(
                        "array binding pattern",
                        &[TokenType::Comma, TokenType::CloseBracket],
                    );
                    return Node::none();
                }
            }
            nodes.push(self.parse_token());
        } else if self.kind == TokenType::OpenBrace {
            nodes.push(self.parse_token());
            while self.kind != TokenType::CloseBrace {
                // binding rest property
                if self.kind == TokenType::Ellipsis {
                    nodes.push(self.parse_token());
                    if !matches!(
                        self.kind,
                        TokenType::Identifier | TokenType::Yield | TokenType::Await
                    ) {
                        self.fail("object binding pattern", &[TokenType::Identifier]);
                    }
                    nodes.push(Node::new(GrammarType::Binding, vec![self.parse_token()]));
                    if self.kind != TokenType::CloseBrace {
                        self.fail("object binding pattern", &[TokenType::CloseBrace]);
                        return Node::none();
                    }
                    break;
                }

                if matches!(
                    self.kind,
                    TokenType::Identifier | TokenType::Yield | TokenType::Await
                ) {
                    // single name binding, or property name + : + element
                    let ident = self.parse_token();
                    if self.kind == TokenType::Colon {
                        nodes.push(ident);
                        nodes.push(self.parse_token());
                        nodes.push(self.parse_binding_element());
                    } else {
                        let mut binding = vec![ident];
                        if self.kind == TokenType::Eq {
                            binding.push(self.parse_token());
                            binding.push(self.parse_assignment_expr());
                        }
                        nodes.push(Node::new(GrammarType::Binding, binding));
                    }
                } else if is_identifier(self.kind)
                    || matches!(
                        self.kind,
                        TokenType::String | TokenType::Numeric | TokenType::OpenBracket
                    )
                {
                    // property name + : + binding element
                    if self.kind == TokenType::OpenBracket {
                        nodes.push(self.parse_token());
                        nodes.push(self.parse_assignment_expr());
                        if self.kind != TokenType::CloseBracket {
                            self.fail("object binding pattern", &[TokenType::CloseBracket]);
                            return Node::none();
                        }
                        nodes.push(self.parse_token());
                    } else {
                        nodes.push(self.parse_token());
                    }
                    if self.kind != TokenType::Colon {
                        self.fail("object binding pattern", &[TokenType::Colon]);
                        return Node::none();
                    }
                    nodes.push(self.parse_token());
                    nodes.push(self.parse_binding_element());
                } else {
                    self.fail(
                        "object binding pattern",
                        &[
                            TokenType::Identifier,
                            TokenType::String,
                            TokenType::Numeric,
                            TokenType::OpenBracket,
                        ],
                    );
                    return Node::none();
                }

                if self.kind == TokenType::Comma {
                    self.next();
                } else if self.kind != TokenType::CloseBrace {
                    self.fail(
                        "object binding pattern",
                        &[TokenType::Comma, TokenType::CloseBrace],
                    );
                    return Node::none();
                }
            }
            nodes.push(self.parse_token());
        } else {
            self.fail("binding", &[]);
            return Node::none();
        }
        Node::new(GrammarType::Binding, nodes)
    }
}

#[cfg(test)]
mod tests {
    use crate::node::GrammarType;
    use crate::parser::Parser;
    use crate::testing::ScriptReplayStream;
    use crate::tokens::TokenType;

    fn parse_decl(tokens: Vec<(TokenType, &[u8])>) -> crate::node::Node {
        let tokens = tokens.into_iter().map(|(kind, bytes)| (kind, bytes.to_vec())).collect();
        let mut parser = Parser::new(ScriptReplayStream::new(tokens));
        let module = parser.parse_module();
        assert_eq!(parser.err(), Some(ferrite_shared::ParseError::Eof));
        module
    }

    #[test]
    fn array_pattern_with_elision_and_rest() {
        // let [a, , ...rest] = xs
        let module = parse_decl(vec![
            (TokenType::Let, b"let"),
            (TokenType::Whitespace, b" "),
            (TokenType::OpenBracket, b"["),
            (TokenType::Identifier, b"a"),
            (TokenType::Comma, b","),
            (TokenType::Comma, b","),
            (TokenType::Ellipsis, b"..."),
            (TokenType::Identifier, b"rest"),
            (TokenType::CloseBracket, b"]"),
            (TokenType::Eq, b"="),
            (TokenType::Identifier, b"xs"),
        ]);

        let stmt = &module.children[0];
        let binding = &stmt.children[1];
        assert_eq!(binding.grammar, GrammarType::Binding);
        // [ a ... Binding(rest) ] = Expr(xs)
        assert_eq!(binding.children[0].kind, TokenType::OpenBracket);
        assert_eq!(binding.children[1].grammar, GrammarType::Binding);
        assert_eq!(binding.children[2].kind, TokenType::Ellipsis);
        assert_eq!(binding.children[3].grammar, GrammarType::Binding);
        assert_eq!(binding.children[4].kind, TokenType::CloseBracket);
        assert_eq!(binding.children[5].kind, TokenType::Eq);
        assert_eq!(binding.children[6].grammar, GrammarType::Expr);
    }

    #[test]
    fn object_pattern_shorthand_and_default() {
        // var {a, b = 1} = o
        let module = parse_decl(vec![
            (TokenType::Var, b"var"),
            (TokenType::Whitespace, b" "),
            (TokenType::OpenBrace, b"{"),
            (TokenType::Identifier, b"a"),
            (TokenType::Comma, b","),
            (TokenType::Identifier, b"b"),
            (TokenType::Whitespace, b" "),
            (TokenType::Eq, b"="),
            (TokenType::Whitespace, b" "),
            (TokenType::Numeric, b"1"),
            (TokenType::CloseBrace, b"}"),
            (TokenType::Eq, b"="),
            (TokenType::Identifier, b"o"),
        ]);

        let binding = &module.children[0].children[1];
        // { Binding(a) Binding(b = Expr(1)) } = Expr(o)
        assert_eq!(binding.children[1].grammar, GrammarType::Binding);
        assert_eq!(binding.children[1].children[0].data, b"a");
        let with_default = &binding.children[2];
        assert_eq!(with_default.grammar, GrammarType::Binding);
        assert_eq!(with_default.children[0].data, b"b");
        assert_eq!(with_default.children[1].kind, TokenType::Eq);
        assert_eq!(with_default.children[2].grammar, GrammarType::Expr);
    }

    #[test]
    fn object_pattern_keyed_binding() {
        // const {a: [x]} = o
        let module = parse_decl(vec![
            (TokenType::Const, b"const"),
            (TokenType::Whitespace, b" "),
            (TokenType::OpenBrace, b"{"),
            (TokenType::Identifier, b"a"),
            (TokenType::Colon, b":"),
            (TokenType::OpenBracket, b"["),
            (TokenType::Identifier, b"x"),
            (TokenType::CloseBracket, b"]"),
            (TokenType::CloseBrace, b"}"),
            (TokenType::Eq, b"="),
            (TokenType::Identifier, b"o"),
        ]);

        let binding = &module.children[0].children[1];
        // { a : Binding([x]) } = Expr(o)
        assert_eq!(binding.children[1].data, b"a");
        assert_eq!(binding.children[2].kind, TokenType::Colon);
        let nested = &binding.children[3];
        assert_eq!(nested.grammar, GrammarType::Binding);
        assert_eq!(nested.children[0].kind, TokenType::OpenBracket);
    }
}
