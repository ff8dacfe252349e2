use ferrite_js::testing::ScriptReplayStream;
use ferrite_js::walker::Walker;
use ferrite_js::{parse, GrammarType, Parser, TokenType};
use ferrite_shared::ParseError;

fn tokens(list: Vec<(TokenType, &[u8])>) -> Vec<(TokenType, Vec<u8>)> {
    list.into_iter().map(|(kind, bytes)| (kind, bytes.to_vec())).collect()
}

#[test]
fn var_declaration_tree() {
    // var x = 1;
    let (module, err) = parse(ScriptReplayStream::new(tokens(vec![
        (TokenType::Var, b"var"),
        (TokenType::Whitespace, b" "),
        (TokenType::Identifier, b"x"),
        (TokenType::Whitespace, b" "),
        (TokenType::Eq, b"="),
        (TokenType::Whitespace, b" "),
        (TokenType::Numeric, b"1"),
        (TokenType::Semicolon, b";"),
    ])));

    assert_eq!(err, ParseError::Eof);
    assert_eq!(
        Walker::new(&module).walk_to_string(),
        "[Module]\n\
         \x20 [Stmt]\n\
         \x20   [Var] var\n\
         \x20   [Binding]\n\
         \x20     [Identifier] x\n\
         \x20     [Eq] =\n\
         \x20     [Expr]\n\
         \x20       [Numeric] 1\n"
    );
}

#[test]
fn return_across_newline_yields_two_statements() {
    // return\n1
    let (module, err) = parse(ScriptReplayStream::new(tokens(vec![
        (TokenType::Return, b"return"),
        (TokenType::LineTerminator, b"\n"),
        (TokenType::Numeric, b"1"),
    ])));

    assert_eq!(err, ParseError::Eof);
    assert_eq!(module.children.len(), 2);
    let return_stmt = &module.children[0];
    assert_eq!(return_stmt.children.len(), 1);
    assert_eq!(return_stmt.children[0].data, b"return");
    let expr_stmt = &module.children[1];
    assert_eq!(expr_stmt.children[0].grammar, GrammarType::Expr);
    assert_eq!(expr_stmt.children[0].children[0].data, b"1");
}

#[test]
fn return_on_same_line_takes_the_expression() {
    // return 1
    let (module, err) = parse(ScriptReplayStream::new(tokens(vec![
        (TokenType::Return, b"return"),
        (TokenType::Whitespace, b" "),
        (TokenType::Numeric, b"1"),
    ])));

    assert_eq!(err, ParseError::Eof);
    assert_eq!(module.children.len(), 1);
    assert_eq!(module.children[0].children.len(), 2);
}

#[test]
fn arrow_function_tree() {
    // x => x+1
    let (module, err) = parse(ScriptReplayStream::new(tokens(vec![
        (TokenType::Identifier, b"x"),
        (TokenType::Whitespace, b" "),
        (TokenType::Arrow, b"=>"),
        (TokenType::Whitespace, b" "),
        (TokenType::Identifier, b"x"),
        (TokenType::Add, b"+"),
        (TokenType::Numeric, b"1"),
    ])));

    assert_eq!(err, ParseError::Eof);
    let expr = &module.children[0].children[0];
    assert_eq!(expr.grammar, GrammarType::Expr);
    assert_eq!(expr.children[0].grammar, GrammarType::Binding);
    assert_eq!(expr.children[0].children[0].data, b"x");
    assert_eq!(expr.children[1].kind, TokenType::Arrow);
    assert_eq!(expr.children[2].grammar, GrammarType::Expr);
}

#[test]
fn leaf_bytes_reproduce_the_input() {
    // function f(a) { return a; }
    let source: Vec<(TokenType, Vec<u8>)> = tokens(vec![
        (TokenType::Function, b"function"),
        (TokenType::Whitespace, b" "),
        (TokenType::Identifier, b"f"),
        (TokenType::OpenParen, b"("),
        (TokenType::Identifier, b"a"),
        (TokenType::CloseParen, b")"),
        (TokenType::Whitespace, b" "),
        (TokenType::OpenBrace, b"{"),
        (TokenType::Whitespace, b" "),
        (TokenType::Return, b"return"),
        (TokenType::Whitespace, b" "),
        (TokenType::Identifier, b"a"),
        (TokenType::Semicolon, b";"),
        (TokenType::Whitespace, b" "),
        (TokenType::CloseBrace, b"}"),
    ]);
    let (module, err) = parse(ScriptReplayStream::new(source));

    assert_eq!(err, ParseError::Eof);
    let replayed: Vec<u8> = module
        .leaves()
        .iter()
        .flat_map(|leaf| leaf.data.clone())
        .collect();
    // whitespace is dropped, and the parameter-list parens and statement
    // semicolon are structural tokens consumed without leaving a leaf
    assert_eq!(replayed, b"functionfa{returna}".to_vec());
}

#[test]
fn grammar_mismatch_returns_partial_tree() {
    // if (x — unterminated condition
    let mut parser = Parser::new(ScriptReplayStream::new(tokens(vec![
        (TokenType::If, b"if"),
        (TokenType::Whitespace, b" "),
        (TokenType::OpenParen, b"("),
        (TokenType::Identifier, b"x"),
    ])));
    let module = parser.parse_module();

    assert_eq!(module.grammar, GrammarType::Module);
    assert!(!module.children.is_empty());
    match parser.err() {
        Some(ParseError::GrammarMismatch { context, .. }) => {
            assert_eq!(context, "if statement");
        }
        other => panic!("expected a grammar mismatch, got {other:?}"),
    }
}

#[test]
fn dynamic_import_call_in_expression_position() {
    // x = import("m")
    let (module, err) = parse(ScriptReplayStream::new(tokens(vec![
        (TokenType::Identifier, b"x"),
        (TokenType::Whitespace, b" "),
        (TokenType::Eq, b"="),
        (TokenType::Whitespace, b" "),
        (TokenType::Import, b"import"),
        (TokenType::OpenParen, b"("),
        (TokenType::String, b"\"m\""),
        (TokenType::CloseParen, b")"),
    ])));

    assert_eq!(err, ParseError::Eof);
    let expr = &module.children[0].children[0];
    // x = Expr(import Expr("m"))
    assert_eq!(expr.children[0].data, b"x");
    assert_eq!(expr.children[1].kind, TokenType::Eq);
    let rhs = &expr.children[2];
    assert_eq!(rhs.children[0].data, b"import");
    assert_eq!(rhs.children[1].grammar, GrammarType::Expr);
}

#[test]
fn conditional_expression_triple() {
    // a ? b : c
    let (module, err) = parse(ScriptReplayStream::new(tokens(vec![
        (TokenType::Identifier, b"a"),
        (TokenType::Question, b"?"),
        (TokenType::Identifier, b"b"),
        (TokenType::Colon, b":"),
        (TokenType::Identifier, b"c"),
    ])));

    assert_eq!(err, ParseError::Eof);
    let expr = &module.children[0].children[0];
    assert_eq!(expr.children[1].kind, TokenType::Question);
    assert_eq!(expr.children[2].grammar, GrammarType::Expr);
    assert_eq!(expr.children[3].kind, TokenType::Colon);
    assert_eq!(expr.children[4].grammar, GrammarType::Expr);
}

#[test]
fn class_declaration_with_methods() {
    // class A extends B { m() {} static get p() {} }
    let (module, err) = parse(ScriptReplayStream::new(tokens(vec![
        (TokenType::Class, b"class"),
        (TokenType::Whitespace, b" "),
        (TokenType::Identifier, b"A"),
        (TokenType::Whitespace, b" "),
        (TokenType::Extends, b"extends"),
        (TokenType::Whitespace, b" "),
        (TokenType::Identifier, b"B"),
        (TokenType::Whitespace, b" "),
        (TokenType::OpenBrace, b"{"),
        (TokenType::Identifier, b"m"),
        (TokenType::OpenParen, b"("),
        (TokenType::CloseParen, b")"),
        (TokenType::OpenBrace, b"{"),
        (TokenType::CloseBrace, b"}"),
        (TokenType::Whitespace, b" "),
        (TokenType::Static, b"static"),
        (TokenType::Whitespace, b" "),
        (TokenType::Identifier, b"get"),
        (TokenType::Whitespace, b" "),
        (TokenType::Identifier, b"p"),
        (TokenType::OpenParen, b"("),
        (TokenType::CloseParen, b")"),
        (TokenType::OpenBrace, b"{"),
        (TokenType::CloseBrace, b"}"),
        (TokenType::CloseBrace, b"}"),
    ])));

    assert_eq!(err, ParseError::Eof);
    let stmt = &module.children[0];
    let methods: Vec<_> = stmt
        .children
        .iter()
        .filter(|n| n.grammar == GrammarType::Method)
        .collect();
    assert_eq!(methods.len(), 2);
    assert_eq!(methods[0].children[0].data, b"m");
    assert_eq!(methods[1].children[0].data, b"static");
    assert_eq!(methods[1].children[1].data, b"get");
    assert_eq!(methods[1].children[2].data, b"p");
}

#[test]
fn async_arrow_expression() {
    // f = async x => x — the async arrow form exists in expression position
    let (module, err) = parse(ScriptReplayStream::new(tokens(vec![
        (TokenType::Identifier, b"f"),
        (TokenType::Whitespace, b" "),
        (TokenType::Eq, b"="),
        (TokenType::Whitespace, b" "),
        (TokenType::Async, b"async"),
        (TokenType::Whitespace, b" "),
        (TokenType::Identifier, b"x"),
        (TokenType::Whitespace, b" "),
        (TokenType::Arrow, b"=>"),
        (TokenType::Whitespace, b" "),
        (TokenType::Identifier, b"x"),
    ])));

    assert_eq!(err, ParseError::Eof);
    let expr = &module.children[0].children[0];
    assert_eq!(expr.children[1].kind, TokenType::Eq);
    let arrow = &expr.children[2];
    assert_eq!(arrow.children[0].data, b"async");
    assert_eq!(arrow.children[1].grammar, GrammarType::Binding);
    assert_eq!(arrow.children[2].kind, TokenType::Arrow);
}

#[test]
fn spread_arguments_in_call() {
    // f(...xs)
    let (module, err) = parse(ScriptReplayStream::new(tokens(vec![
        (TokenType::Identifier, b"f"),
        (TokenType::OpenParen, b"("),
        (TokenType::Ellipsis, b"..."),
        (TokenType::Identifier, b"xs"),
        (TokenType::CloseParen, b")"),
    ])));

    assert_eq!(err, ParseError::Eof);
    let expr = &module.children[0].children[0];
    let leaves: Vec<Vec<u8>> = expr.leaves().iter().map(|n| n.data.clone()).collect();
    assert_eq!(
        leaves,
        vec![
            b"f".to_vec(),
            b"(".to_vec(),
            b"...".to_vec(),
            b"xs".to_vec(),
            b")".to_vec()
        ]
    );
}

#[test]
fn empty_expression_is_an_error_never_an_empty_node() {
    let mut parser = Parser::new(ScriptReplayStream::new(tokens(vec![(
        TokenType::Colon,
        b":",
    )])));
    let module = parser.parse_module();

    fn no_empty_expr(node: &ferrite_js::Node) {
        if node.grammar == GrammarType::Expr {
            assert!(!node.children.is_empty(), "empty Expr node in tree");
        }
        for child in &node.children {
            no_empty_expr(child);
        }
    }
    no_empty_expr(&module);
    assert!(matches!(
        parser.err(),
        Some(ParseError::GrammarMismatch { .. })
    ));
}
