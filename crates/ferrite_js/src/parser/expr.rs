use crate::node::{GrammarType, Node};
use crate::parser::Parser;
use crate::tokens::{is_assignment_operator, is_binary_operator, is_identifier, ScriptStream, TokenType};

impl<S: ScriptStream> Parser<S> {
    /// Parses a comma sequence of assignment expressions into one flat
    /// expression node.
    pub(crate) fn parse_expr(&mut self) -> Node {
        log::trace!("parse_expr");

        let mut node = self.parse_assignment_expr();
        while self.kind == TokenType::Comma {
            self.next();
            let next = self.parse_assignment_expr();
            node.children.extend(next.children);
        }
        node
    }

    /// Parses one assignment expression. Binary and unary operators are
    /// concatenated as a flat ordered sequence of operator and operand
    /// tokens; no precedence tree is materialized.
    pub(crate) fn parse_assignment_expr(&mut self) -> Node {
        log::trace!("parse_assignment_expr");

        let mut nodes = Vec::new();
        if self.kind == TokenType::Yield {
            nodes.push(self.parse_token());
            if self.kind == TokenType::Arrow {
                // `yield` was the arrow's parameter after all
                if let Some(param) = nodes.pop() {
                    nodes.push(Node::new(GrammarType::Binding, vec![param]));
                }
                nodes.push(self.parse_token());
                if self.kind == TokenType::OpenBrace {
                    nodes.push(self.parse_block_stmt("arrow function expression"));
                } else {
                    nodes.push(self.parse_assignment_expr());
                }
            } else if !self.prev_line_terminator {
                if self.kind == TokenType::Mul {
                    nodes.push(self.parse_token());
                }
                nodes.push(self.parse_assignment_expr());
            }
            return Node::new(GrammarType::Expr, nodes);
        } else if self.kind == TokenType::Async {
            nodes.push(self.parse_token());
            if self.prev_line_terminator {
                self.fail("async function expression", &[]);
                return Node::none();
            }
            if self.kind == TokenType::Function {
                // primary expression
                self.parse_func_decl(&mut nodes);
            } else if matches!(
                self.kind,
                TokenType::Identifier | TokenType::Yield | TokenType::Await
            ) {
                nodes.push(Node::new(GrammarType::Binding, vec![self.parse_token()]));
                if self.kind != TokenType::Arrow {
                    self.fail("async arrow function expression", &[TokenType::Arrow]);
                    return Node::none();
                }
                nodes.push(self.parse_token());
                if self.kind == TokenType::OpenBrace {
                    nodes.push(self.parse_block_stmt("async arrow function expression"));
                } else {
                    nodes.push(self.parse_assignment_expr());
                }
            } else {
                self.fail(
                    "async function expression",
                    &[TokenType::Function, TokenType::Identifier],
                );
                return Node::none();
            }
            return Node::new(GrammarType::Expr, nodes);
        }

        loop {
            if self.kind == TokenType::Incr || self.kind == TokenType::Decr {
                nodes.push(self.parse_token());
            }
            nodes = self.parse_lhs_expr(nodes);
            // postfix increment and decrement never cross a line terminator
            if !self.prev_line_terminator
                && (self.kind == TokenType::Incr || self.kind == TokenType::Decr)
            {
                nodes.push(self.parse_token());
            }

            if is_binary_operator(self.kind) {
                nodes.push(self.parse_token());
                continue;
            }
            if is_assignment_operator(self.kind) {
                nodes.push(self.parse_token());
                nodes.push(self.parse_assignment_expr());
            } else if self.kind == TokenType::Question {
                nodes.push(self.parse_token());
                nodes.push(self.parse_assignment_expr());
                if self.kind != TokenType::Colon {
                    self.fail("conditional expression", &[TokenType::Colon]);
                    return Node::none();
                }
                nodes.push(self.parse_token());
                nodes.push(self.parse_assignment_expr());
            } else if self.kind == TokenType::Arrow {
                // the parameter list is the preceding LHS: a single
                // identifier-like token is retagged as a binding, anything
                // else must have ended at `)`
                let retag = match nodes.last() {
                    Some(last)
                        if last.grammar == GrammarType::Token
                            && matches!(
                                last.kind,
                                TokenType::Identifier | TokenType::Yield | TokenType::Await
                            ) =>
                    {
                        true
                    }
                    Some(last) if last.kind == TokenType::CloseParen => false,
                    _ => {
                        self.fail("arrow function expression", &[]);
                        return Node::none();
                    }
                };
                if retag {
                    if let Some(param) = nodes.pop() {
                        nodes.push(Node::new(GrammarType::Binding, vec![param]));
                    }
                }
                nodes.push(self.parse_token());
                if self.kind == TokenType::OpenBrace {
                    nodes.push(self.parse_block_stmt("arrow function expression"));
                } else {
                    nodes.push(self.parse_assignment_expr());
                }
            }
            break;
        }
        Node::new(GrammarType::Expr, nodes)
    }

    /// Parses a left-hand-side expression: optional `new` chains (with
    /// `new.target`), `super`, `import(` call-forms or a primary expression,
    /// followed by call/index/member/tagged-template continuations and
    /// optional chaining.
    pub(crate) fn parse_lhs_expr(&mut self, mut nodes: Vec<Node>) -> Vec<Node> {
        log::trace!("parse_lhs_expr");

        let mut new_target = false;
        while self.kind == TokenType::New {
            nodes.push(self.parse_token());
            if self.kind == TokenType::Dot {
                nodes.push(self.parse_token());
                if self.kind != TokenType::Identifier || self.data != b"target" {
                    self.fail("left hand side expression", &[TokenType::Target]);
                    return Vec::new();
                }
                nodes.push(self.parse_token());
                new_target = true;
                break;
            }
        }

        if !new_target {
            if self.kind == TokenType::Super {
                nodes.push(self.parse_token());
                if self.kind == TokenType::Template || self.kind == TokenType::TemplateStart {
                    // no tagged templates on super
                    self.fail("left hand side expression", &[]);
                }
                nodes = self.parse_lhs_expr_end(nodes);
            } else if self.kind == TokenType::Import {
                nodes.push(self.parse_token());
                if self.kind != TokenType::OpenParen {
                    self.fail("left hand side expression", &[TokenType::OpenParen]);
                    return Vec::new();
                }
                self.next();
                nodes.push(self.parse_expr());
                if self.kind != TokenType::CloseParen {
                    self.fail("left hand side expression", &[TokenType::CloseParen]);
                    return Vec::new();
                }
                self.next();
            } else {
                nodes = self.parse_primary_expr(nodes);
            }
        }

        // call, index, member and tagged-template continuations
        while matches!(
            self.kind,
            TokenType::OpenParen
                | TokenType::OpenBracket
                | TokenType::Dot
                | TokenType::Template
                | TokenType::TemplateStart
        ) {
            nodes = self.parse_lhs_expr_end(nodes);
        }

        // optional chaining
        while self.kind == TokenType::OptChain {
            nodes.push(self.parse_token());
            if is_identifier(self.kind) {
                nodes.push(self.parse_token());
            } else if matches!(
                self.kind,
                TokenType::OpenParen
                    | TokenType::OpenBracket
                    | TokenType::Template
                    | TokenType::TemplateStart
            ) {
                nodes = self.parse_lhs_expr_end(nodes);
            } else {
                self.fail(
                    "left hand side expression",
                    &[
                        TokenType::Identifier,
                        TokenType::OpenParen,
                        TokenType::OpenBracket,
                        TokenType::Template,
                    ],
                );
                return Vec::new();
            }
            while matches!(
                self.kind,
                TokenType::OpenParen
                    | TokenType::OpenBracket
                    | TokenType::Dot
                    | TokenType::Template
                    | TokenType::TemplateStart
            ) {
                nodes = self.parse_lhs_expr_end(nodes);
            }
        }
        nodes
    }

    /// One continuation piece: call arguments, an index expression, a member
    /// access or a tagged template.
    pub(crate) fn parse_lhs_expr_end(&mut self, mut nodes: Vec<Node>) -> Vec<Node> {
        log::trace!("parse_lhs_expr_end");

        if self.kind == TokenType::OpenParen {
            nodes.push(self.parse_token());
            loop {
                if self.kind == TokenType::Error || self.kind == TokenType::CloseParen {
                    break;
                } else if self.kind == TokenType::Comma {
                    self.next();
                } else if self.kind == TokenType::Ellipsis {
                    nodes.push(self.parse_token());
                    nodes.push(self.parse_assignment_expr());
                    break;
                } else {
                    nodes.push(self.parse_assignment_expr());
                }
            }
            if self.kind == TokenType::Comma {
                self.next();
            }
            if self.kind != TokenType::CloseParen {
                self.fail("left hand side expression", &[TokenType::CloseParen]);
                return Vec::new();
            }
            nodes.push(self.parse_token());
        } else if self.kind == TokenType::OpenBracket {
            nodes.push(self.parse_token());
            nodes.push(self.parse_expr());
            if self.kind != TokenType::CloseBracket {
                self.fail("left hand side expression", &[TokenType::CloseBracket]);
                return Vec::new();
            }
            nodes.push(self.parse_token());
        } else if self.kind == TokenType::Dot {
            nodes.push(self.parse_token());
            if !is_identifier(self.kind) {
                self.fail("left hand side expression", &[TokenType::Identifier]);
                return Vec::new();
            }
            nodes.push(self.parse_token());
        } else if self.kind == TokenType::Template || self.kind == TokenType::TemplateStart {
            nodes = self.parse_template_literal(nodes);
        } else {
            self.fail(
                "left hand side expression",
                &[
                    TokenType::OpenParen,
                    TokenType::OpenBracket,
                    TokenType::Dot,
                    TokenType::Template,
                ],
            );
            return Vec::new();
        }
        nodes
    }

    /// Parses a primary expression. A `/` or `/=` here must begin a regular
    /// expression literal, so the lexer is asked to re-read the current
    /// position; this is the sole permitted lexical re-read.
    pub(crate) fn parse_primary_expr(&mut self, mut nodes: Vec<Node>) -> Vec<Node> {
        log::trace!("parse_primary_expr");

        if self.kind == TokenType::Div || self.kind == TokenType::DivEq {
            let token = self.buffer.re_lex_with(|stream| stream.re_lex_regexp());
            self.kind = token.kind;
            self.offset = token.offset;
            self.data = token.text.into_vec();
        }

        match self.kind {
            TokenType::This
            | TokenType::Identifier
            | TokenType::Yield
            | TokenType::Await
            | TokenType::Null
            | TokenType::True
            | TokenType::False
            | TokenType::Numeric
            | TokenType::String
            | TokenType::Regexp => {
                nodes.push(self.parse_token());
            }
            TokenType::Template | TokenType::TemplateStart => {
                nodes = self.parse_template_literal(nodes);
            }
            TokenType::OpenBracket => {
                // array literal with elision and spread
                nodes.push(self.parse_token());
                while self.kind != TokenType::CloseBracket && self.kind != TokenType::Error {
                    if self.kind == TokenType::Ellipsis || self.kind == TokenType::Comma {
                        nodes.push(self.parse_token());
                    } else {
                        nodes.push(self.parse_assignment_expr());
                    }
                }
                nodes.push(self.parse_token());
            }
            TokenType::OpenBrace => {
                nodes = self.parse_object_literal(nodes);
            }
            TokenType::OpenParen => {
                // parenthesized expression or arrow parameter list
                nodes.push(self.parse_token());
                while self.kind != TokenType::CloseParen && self.kind != TokenType::Error {
                    if self.kind == TokenType::Ellipsis {
                        nodes.push(self.parse_token());
                        nodes.push(self.parse_binding());
                    } else if self.kind == TokenType::Comma {
                        nodes.push(self.parse_token());
                    } else {
                        nodes.push(self.parse_assignment_expr());
                    }
                }
                nodes.push(self.parse_token());
            }
            TokenType::Class => {
                self.parse_class_decl(&mut nodes);
            }
            TokenType::Function => {
                self.parse_func_decl(&mut nodes);
            }
            TokenType::Async => {
                // async function expression
                nodes.push(self.parse_token());
                if !self.prev_line_terminator {
                    if self.kind == TokenType::Function {
                        self.parse_func_decl(&mut nodes);
                    } else {
                        self.fail("async function expression", &[TokenType::Function]);
                        return Vec::new();
                    }
                }
            }
            _ => {
                self.fail("expression", &[]);
                return Vec::new();
            }
        }
        nodes
    }

    /// Parses an object literal: spreads, shorthand properties with optional
    /// defaults, `key: value` pairs with plain, string, numeric or computed
    /// keys, and method definitions.
    pub(crate) fn parse_object_literal(&mut self, mut nodes: Vec<Node>) -> Vec<Node> {
        log::trace!("parse_object_literal");

        // assume we're on {
        nodes.push(self.parse_token());
        while self.kind != TokenType::CloseBrace && self.kind != TokenType::Error {
            if self.kind == TokenType::Ellipsis {
                nodes.push(self.parse_token());
                nodes.push(self.parse_assignment_expr());
            } else if self.kind == TokenType::Comma {
                nodes.push(self.parse_token());
            } else {
                let mut property = Vec::new();
                while self.kind == TokenType::Mul
                    || self.kind == TokenType::Async
                    || is_identifier(self.kind)
                {
                    property.push(self.parse_token());
                }

                let single_shorthand = matches!(
                    self.kind,
                    TokenType::Eq | TokenType::Comma | TokenType::CloseBrace
                ) && property.len() == 1
                    && matches!(
                        property[0].kind,
                        TokenType::Identifier | TokenType::Yield | TokenType::Await
                    );
                let keyed = !property.is_empty()
                    && is_identifier(property[property.len() - 1].kind)
                    || matches!(
                        self.kind,
                        TokenType::String | TokenType::Numeric | TokenType::OpenBracket
                    );

                if single_shorthand {
                    if let Some(name) = property.pop() {
                        nodes.push(name);
                    }
                    if self.kind == TokenType::Eq {
                        nodes.push(self.parse_token());
                        nodes.push(self.parse_assignment_expr());
                    }
                } else if keyed {
                    if self.kind == TokenType::String || self.kind == TokenType::Numeric {
                        property.push(self.parse_token());
                    } else if self.kind == TokenType::OpenBracket {
                        // computed key
                        property.push(self.parse_token());
                        property.push(self.parse_assignment_expr());
                        if self.kind != TokenType::CloseBracket {
                            self.fail("object literal", &[TokenType::CloseBracket]);
                            return Vec::new();
                        }
                        property.push(self.parse_token());
                    }

                    if self.kind == TokenType::Colon {
                        nodes.append(&mut property);
                        nodes.push(self.parse_token());
                        nodes.push(self.parse_assignment_expr());
                    } else if self.kind == TokenType::OpenParen {
                        if !self.parse_func_params("method definition", &mut property) {
                            property.clear();
                        }
                        property.push(self.parse_block_stmt("method definition"));
                        nodes.push(Node::new(GrammarType::Method, property));
                    } else {
                        self.fail("object literal", &[TokenType::Colon, TokenType::OpenParen]);
                        return Vec::new();
                    }
                } else {
                    self.fail(
                        "object literal",
                        &[
                            TokenType::Eq,
                            TokenType::Comma,
                            TokenType::CloseBrace,
                            TokenType::Ellipsis,
                            TokenType::Identifier,
                            TokenType::String,
                            TokenType::Numeric,
                            TokenType::OpenBracket,
                        ],
                    );
                    return Vec::new();
                }
            }
        }
        if self.kind == TokenType::CloseBrace {
            nodes.push(self.parse_token());
        }
        nodes
    }

    /// Parses a template literal with any number of interpolated spans.
    pub(crate) fn parse_template_literal(&mut self, mut nodes: Vec<Node>) -> Vec<Node> {
        log::trace!("parse_template_literal");

        // assume we're on Template or TemplateStart
        while self.kind == TokenType::TemplateStart || self.kind == TokenType::TemplateMiddle {
            nodes.push(self.parse_token());
            nodes.push(self.parse_expr());
            if self.kind == TokenType::TemplateEnd {
                nodes.push(self.parse_token());
                return nodes;
            }
            if self.kind != TokenType::TemplateMiddle {
                self.fail("template literal", &[TokenType::Template]);
                return Vec::new();
            }
        }
        nodes.push(self.parse_token());
        nodes
    }
}
