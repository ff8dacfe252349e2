use crate::node::{GrammarType, Node};
use crate::parser::Parser;
use crate::tokens::{is_identifier, ScriptStream, TokenType};

impl<S: ScriptStream> Parser<S> {
    /// Parses a single statement, dispatching on the current token kind.
    /// A trailing `;` is consumed.
    pub(crate) fn parse_stmt(&mut self) -> Node {
        log::trace!("parse_stmt");

        let mut nodes = Vec::new();
        match self.kind {
            TokenType::OpenBrace => return self.parse_block_stmt("block statement"),
            TokenType::Let | TokenType::Const | TokenType::Var => {
                self.parse_var_decl(&mut nodes);
            }
            TokenType::Continue | TokenType::Break => {
                nodes.push(self.parse_token());
                // an optional label must sit on the same line
                if !self.prev_line_terminator
                    && matches!(
                        self.kind,
                        TokenType::Identifier | TokenType::Yield | TokenType::Await
                    )
                {
                    nodes.push(self.parse_token());
                }
            }
            TokenType::Return => {
                nodes.push(self.parse_token());
                if !self.prev_line_terminator
                    && self.kind != TokenType::Semicolon
                    && self.kind != TokenType::LineTerminator
                    && self.kind != TokenType::Error
                {
                    nodes.push(self.parse_expr());
                }
            }
            TokenType::If => {
                nodes.push(self.parse_token());
                if !self.consume("if statement", TokenType::OpenParen) {
                    return Node::none();
                }
                nodes.push(self.parse_expr());
                if !self.consume("if statement", TokenType::CloseParen) {
                    return Node::none();
                }
                nodes.push(self.parse_stmt());
                if self.kind == TokenType::Else {
                    nodes.push(self.parse_token());
                    nodes.push(self.parse_stmt());
                }
            }
            TokenType::With => {
                nodes.push(self.parse_token());
                if !self.consume("with statement", TokenType::OpenParen) {
                    return Node::none();
                }
                nodes.push(self.parse_expr());
                if !self.consume("with statement", TokenType::CloseParen) {
                    return Node::none();
                }
                nodes.push(self.parse_stmt());
            }
            TokenType::Do => {
                nodes.push(self.parse_token());
                nodes.push(self.parse_stmt());
                if self.kind != TokenType::While {
                    self.fail("do statement", &[TokenType::While]);
                    return Node::none();
                }
                nodes.push(self.parse_token());
                if !self.consume("do statement", TokenType::OpenParen) {
                    return Node::none();
                }
                nodes.push(self.parse_expr());
                if !self.consume("do statement", TokenType::CloseParen) {
                    return Node::none();
                }
            }
            TokenType::While => {
                nodes.push(self.parse_token());
                if !self.consume("while statement", TokenType::OpenParen) {
                    return Node::none();
                }
                nodes.push(self.parse_expr());
                if !self.consume("while statement", TokenType::CloseParen) {
                    return Node::none();
                }
                nodes.push(self.parse_stmt());
            }
            TokenType::For => {
                nodes.push(self.parse_token());
                if self.kind == TokenType::Await {
                    nodes.push(self.parse_token());
                }
                if !self.consume("for statement", TokenType::OpenParen) {
                    return Node::none();
                }
                if matches!(self.kind, TokenType::Var | TokenType::Let | TokenType::Const) {
                    let mut decl_nodes = Vec::new();
                    self.parse_var_decl(&mut decl_nodes);
                    nodes.push(Node::new(GrammarType::Stmt, decl_nodes));
                } else {
                    let lhs = self.parse_lhs_expr(Vec::new());
                    nodes.push(Node::new(GrammarType::Expr, lhs));
                }

                if self.kind == TokenType::Semicolon {
                    self.next();
                    nodes.push(self.parse_expr());
                    if !self.consume("for statement", TokenType::Semicolon) {
                        return Node::none();
                    }
                    nodes.push(self.parse_expr());
                } else if self.kind == TokenType::In {
                    nodes.push(self.parse_token());
                    nodes.push(self.parse_expr());
                } else if self.kind == TokenType::Identifier && self.data == b"of" {
                    nodes.push(self.parse_token());
                    nodes.push(self.parse_assignment_expr());
                } else {
                    self.fail(
                        "for statement",
                        &[TokenType::In, TokenType::Of, TokenType::Semicolon],
                    );
                    return Node::none();
                }
                if !self.consume("for statement", TokenType::CloseParen) {
                    return Node::none();
                }
                nodes.push(self.parse_stmt());
            }
            TokenType::Identifier | TokenType::Yield | TokenType::Await => {
                // could be an expression or a labelled statement; parse the
                // expression first and retag a single token followed by `:`
                let mut expr = self.parse_expr();
                if self.kind == TokenType::Colon && expr.children.len() == 1 {
                    if let Some(label) = expr.children.pop() {
                        nodes.push(label);
                    }
                    self.next();
                    nodes.push(self.parse_stmt());
                } else {
                    nodes.push(expr);
                }
            }
            TokenType::Switch => {
                nodes.push(self.parse_token());
                if !self.consume("switch statement", TokenType::OpenParen) {
                    return Node::none();
                }
                nodes.push(self.parse_expr());
                if !self.consume("switch statement", TokenType::CloseParen) {
                    return Node::none();
                }

                // case block
                if !self.consume("switch statement", TokenType::OpenBrace) {
                    return Node::none();
                }
                while self.kind != TokenType::Error {
                    if self.kind == TokenType::CloseBrace {
                        self.next();
                        break;
                    }

                    let mut clause_nodes = Vec::new();
                    if self.kind == TokenType::Case {
                        clause_nodes.push(self.parse_token());
                        clause_nodes.push(self.parse_expr());
                    } else if self.kind == TokenType::Default {
                        clause_nodes.push(self.parse_token());
                    } else {
                        self.fail("switch statement", &[TokenType::Case, TokenType::Default]);
                        return Node::none();
                    }
                    if !self.consume("switch statement", TokenType::Colon) {
                        return Node::none();
                    }
                    while self.kind != TokenType::Case
                        && self.kind != TokenType::Default
                        && self.kind != TokenType::CloseBrace
                        && self.kind != TokenType::Error
                    {
                        clause_nodes.push(self.parse_stmt());
                    }
                    nodes.push(Node::new(GrammarType::Clause, clause_nodes));
                }
            }
            TokenType::Function => {
                self.parse_func_decl(&mut nodes);
            }
            TokenType::Async => {
                // async function
                nodes.push(self.parse_token());
                if self.kind != TokenType::Function {
                    self.fail("async function statement", &[TokenType::Function]);
                    return Node::none();
                }
                self.parse_func_decl(&mut nodes);
            }
            TokenType::Class => {
                self.parse_class_decl(&mut nodes);
            }
            TokenType::Throw => {
                nodes.push(self.parse_token());
                if !self.prev_line_terminator {
                    nodes.push(self.parse_expr());
                }
            }
            TokenType::Try => {
                nodes.push(self.parse_token());
                nodes.push(self.parse_block_stmt("try statement"));

                if self.kind == TokenType::Catch {
                    nodes.push(self.parse_token());
                    if self.kind == TokenType::OpenParen {
                        self.next();
                        nodes.push(self.parse_binding());
                        if self.kind != TokenType::CloseParen {
                            self.fail("try statement", &[TokenType::CloseParen]);
                            return Node::none();
                        }
                        self.next();
                    }
                    nodes.push(self.parse_block_stmt("try statement"));
                }
                if self.kind == TokenType::Finally {
                    nodes.push(self.parse_token());
                    nodes.push(self.parse_block_stmt("try statement"));
                }
            }
            TokenType::Debugger => {
                nodes.push(self.parse_token());
            }
            TokenType::Semicolon | TokenType::LineTerminator => {
                // empty statement
            }
            _ => {
                let expr = self.parse_expr();
                if !expr.children.is_empty() {
                    nodes.push(expr);
                } else {
                    self.fail("statement", &[]);
                    return Node::none();
                }
            }
        }
        if self.kind == TokenType::Semicolon || self.kind == TokenType::LineTerminator {
            self.next();
        }
        Node::new(GrammarType::Stmt, nodes)
    }

    /// Parses a variable declaration starting at `var`, `let` or `const`:
    /// comma-separated binding elements.
    pub(crate) fn parse_var_decl(&mut self, nodes: &mut Vec<Node>) {
        log::trace!("parse_var_decl");

        nodes.push(self.parse_token());
        loop {
            nodes.push(self.parse_binding_element());
            if self.kind == TokenType::Comma {
                self.next();
            } else {
                break;
            }
        }
    }

    /// Parses a function declaration starting at `function`.
    pub(crate) fn parse_func_decl(&mut self, nodes: &mut Vec<Node>) {
        log::trace!("parse_func_decl");

        nodes.push(self.parse_token());
        if self.kind == TokenType::Mul {
            nodes.push(self.parse_token());
        }
        if matches!(
            self.kind,
            TokenType::Identifier | TokenType::Yield | TokenType::Await
        ) {
            nodes.push(self.parse_token());
        }
        if !self.parse_func_params("function declaration", nodes) {
            nodes.clear();
        }
        nodes.push(self.parse_block_stmt("function declaration"));
    }

    /// Parses a parenthesized parameter list of binding elements, with an
    /// optional trailing rest binding.
    pub(crate) fn parse_func_params(&mut self, context: &'static str, nodes: &mut Vec<Node>) -> bool {
        if !self.consume(context, TokenType::OpenParen) {
            return false;
        }

        while self.kind != TokenType::CloseParen {
            // binding rest element
            if self.kind == TokenType::Ellipsis {
                nodes.push(self.parse_token());
                nodes.push(self.parse_binding());
                break;
            }

            nodes.push(self.parse_binding_element());

            if self.kind == TokenType::Comma {
                self.next();
            } else if self.kind == TokenType::CloseParen {
                break;
            } else {
                self.fail(context, &[TokenType::Comma, TokenType::CloseParen]);
                return false;
            }
        }
        self.consume(context, TokenType::CloseParen)
    }

    /// Parses a brace-delimited statement list including both braces.
    pub(crate) fn parse_block_stmt(&mut self, context: &'static str) -> Node {
        log::trace!("parse_block_stmt");

        if self.kind != TokenType::OpenBrace {
            self.fail(context, &[TokenType::OpenBrace]);
            return Node::none();
        }
        let mut nodes = Vec::new();
        nodes.push(self.parse_token());
        while self.kind != TokenType::Error {
            if self.kind == TokenType::CloseBrace {
                nodes.push(self.parse_token());
                break;
            }
            nodes.push(self.parse_stmt());
        }
        Node::new(GrammarType::Stmt, nodes)
    }

    /// Parses a class declaration starting at `class`: optional name,
    /// optional `extends` heritage, and a brace-delimited body of method
    /// definitions separated by `;`.
    pub(crate) fn parse_class_decl(&mut self, nodes: &mut Vec<Node>) {
        log::trace!("parse_class_decl");

        nodes.push(self.parse_token());
        if matches!(
            self.kind,
            TokenType::Identifier | TokenType::Yield | TokenType::Await
        ) {
            nodes.push(self.parse_token());
        }
        if self.kind == TokenType::Extends {
            nodes.push(self.parse_token());
            let lhs = self.parse_lhs_expr(Vec::new());
            nodes.push(Node::new(GrammarType::Expr, lhs));
        }

        if !self.consume("class statement", TokenType::OpenBrace) {
            nodes.clear();
            return;
        }
        while self.kind != TokenType::Error {
            if self.kind == TokenType::Semicolon {
                self.next();
                continue;
            }
            if self.kind == TokenType::CloseBrace {
                break;
            }
            nodes.push(self.parse_method_def());
        }
        if !self.consume("class statement", TokenType::CloseBrace) {
            nodes.clear();
        }
    }

    /// Parses one method definition with its optional `static`, `async`,
    /// `*`, `get` and `set` modifiers.
    pub(crate) fn parse_method_def(&mut self) -> Node {
        log::trace!("parse_method_def");

        let mut nodes = Vec::new();
        if self.kind == TokenType::Static {
            nodes.push(self.parse_token());
        }
        if self.kind == TokenType::Async || self.kind == TokenType::Mul {
            if self.kind == TokenType::Async {
                nodes.push(self.parse_token());
            }
            if self.kind == TokenType::Mul {
                nodes.push(self.parse_token());
            }
        } else if self.kind == TokenType::Identifier && (self.data == b"get" || self.data == b"set") {
            nodes.push(self.parse_token());
        }

        if is_identifier(self.kind) || self.kind == TokenType::String || self.kind == TokenType::Numeric {
            nodes.push(self.parse_token());
        } else if self.kind == TokenType::OpenBracket {
            // computed name
            nodes.push(self.parse_token());
            nodes.push(self.parse_assignment_expr());
            if self.kind != TokenType::CloseBracket {
                self.fail("method definition", &[TokenType::CloseBracket]);
                return Node::none();
            }
            nodes.push(self.parse_token());
        } else {
            self.fail(
                "method definition",
                &[
                    TokenType::Identifier,
                    TokenType::String,
                    TokenType::Numeric,
                    TokenType::OpenBracket,
                ],
            );
            return Node::none();
        }
        if !self.parse_func_params("method definition", &mut nodes) {
            nodes.clear();
        }
        nodes.push(self.parse_block_stmt("method definition"));
        Node::new(GrammarType::Method, nodes)
    }
}
