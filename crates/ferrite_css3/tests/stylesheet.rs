use ferrite_css3::node::NodeType;
use ferrite_css3::parser::GrammarEvent;
use ferrite_css3::tokens::TokenType;
use ferrite_css3::walker::Walker;
use ferrite_css3::Css3;
use ferrite_shared::testing::ReplayStream;
use ferrite_shared::ParseError;

fn tokens(list: Vec<(TokenType, &[u8])>) -> Vec<(TokenType, Vec<u8>)> {
    list.into_iter().map(|(kind, bytes)| (kind, bytes.to_vec())).collect()
}

/// `a { color: red !important; }`
fn important_ruleset() -> Vec<(TokenType, Vec<u8>)> {
    tokens(vec![
        (TokenType::Ident, b"a"),
        (TokenType::Whitespace, b" "),
        (TokenType::LCurly, b"{"),
        (TokenType::Whitespace, b" "),
        (TokenType::Ident, b"color"),
        (TokenType::Colon, b":"),
        (TokenType::Whitespace, b" "),
        (TokenType::Ident, b"red"),
        (TokenType::Whitespace, b" "),
        (TokenType::Delim, b"!"),
        (TokenType::Ident, b"important"),
        (TokenType::Semicolon, b";"),
        (TokenType::Whitespace, b" "),
        (TokenType::RCurly, b"}"),
    ])
}

/// `@media screen { a{b:c} }`
fn media_rule() -> Vec<(TokenType, Vec<u8>)> {
    tokens(vec![
        (TokenType::AtKeyword, b"@media"),
        (TokenType::Whitespace, b" "),
        (TokenType::Ident, b"screen"),
        (TokenType::Whitespace, b" "),
        (TokenType::LCurly, b"{"),
        (TokenType::Whitespace, b" "),
        (TokenType::Ident, b"a"),
        (TokenType::LCurly, b"{"),
        (TokenType::Ident, b"b"),
        (TokenType::Colon, b":"),
        (TokenType::Ident, b"c"),
        (TokenType::RCurly, b"}"),
        (TokenType::Whitespace, b" "),
        (TokenType::RCurly, b"}"),
    ])
}

#[test]
fn important_declaration_tree() {
    let mut parser = Css3::new(ReplayStream::new(important_ruleset()));
    let stylesheet = parser.parse();

    assert_eq!(
        Walker::new(&stylesheet).walk_to_string(),
        "[Stylesheet (1)]\n\
         \x20 [Ruleset]\n\
         \x20   [Selector]\n\
         \x20     [Ident] a\n\
         \x20   [Declaration] property: color important: true\n\
         \x20     [Ident] red\n"
    );
    assert_eq!(parser.err(), Some(ParseError::Eof));
}

#[test]
fn important_ruleset_event_sequence() {
    let mut parser = Css3::new(ReplayStream::new(important_ruleset()));

    match parser.next_event() {
        GrammarEvent::Ruleset(node) => {
            let (selectors, _) = node.as_ruleset();
            assert_eq!(selectors.len(), 1);
            let elements = selectors[0].as_selector();
            assert_eq!(elements.len(), 1);
            assert_eq!(elements[0].as_token().data, b"a");
        }
        event => panic!("expected Ruleset, got {event:?}"),
    }
    match parser.next_event() {
        GrammarEvent::Declaration(node) => {
            let (property, value, important) = node.as_declaration();
            assert_eq!(property.data, b"color");
            assert_eq!(value.len(), 1);
            assert!(*important);
        }
        event => panic!("expected Declaration, got {event:?}"),
    }
    assert!(matches!(parser.next_event(), GrammarEvent::EndRuleset(_)));
    assert!(matches!(parser.next_event(), GrammarEvent::Error));
}

#[test]
fn media_rule_nesting() {
    let mut parser = Css3::new(ReplayStream::new(media_rule()));
    let stylesheet = parser.parse();

    assert_eq!(
        Walker::new(&stylesheet).walk_to_string(),
        "[Stylesheet (1)]\n\
         \x20 [AtRule] name: @media\n\
         \x20   [Ident] screen\n\
         \x20   [Ruleset]\n\
         \x20     [Selector]\n\
         \x20       [Ident] a\n\
         \x20     [Declaration] property: b important: false\n\
         \x20       [Ident] c\n"
    );
}

#[test]
fn events_are_strictly_nested() {
    let mut parser = Css3::new(ReplayStream::new(media_rule()));

    let mut depth = 0usize;
    let mut max_depth = 0usize;
    loop {
        match parser.next_event() {
            GrammarEvent::Error => break,
            GrammarEvent::AtRule(_) | GrammarEvent::Ruleset(_) => {
                depth += 1;
                max_depth = max_depth.max(depth);
            }
            GrammarEvent::EndAtRule(_) | GrammarEvent::EndRuleset(_) => {
                assert!(depth > 0, "end event without a matching open");
                depth -= 1;
            }
            _ => {}
        }
    }
    assert_eq!(depth, 0, "every open event is matched by an end event");
    assert_eq!(max_depth, 2);
}

#[test]
fn next_then_reconstruct_equals_parse() {
    let mut tree_parser = Css3::new(ReplayStream::new(media_rule()));
    let expected = tree_parser.parse();

    // rebuild the nesting by hand from the event sequence
    let mut parser = Css3::new(ReplayStream::new(media_rule()));
    let mut at_rule = match parser.next_event() {
        GrammarEvent::AtRule(node) => node,
        event => panic!("expected AtRule, got {event:?}"),
    };
    let mut ruleset = match parser.next_event() {
        GrammarEvent::Ruleset(node) => node,
        event => panic!("expected Ruleset, got {event:?}"),
    };
    let declaration = match parser.next_event() {
        GrammarEvent::Declaration(node) => node,
        event => panic!("expected Declaration, got {event:?}"),
    };
    if let NodeType::Ruleset { declarations, .. } = ruleset.node_type.as_mut() {
        declarations.push(declaration);
    }
    assert!(matches!(parser.next_event(), GrammarEvent::EndRuleset(_)));
    if let NodeType::AtRule { rules, .. } = at_rule.node_type.as_mut() {
        rules.push(ruleset);
    }
    assert!(matches!(parser.next_event(), GrammarEvent::EndAtRule(_)));
    assert!(matches!(parser.next_event(), GrammarEvent::Error));

    assert_eq!(&at_rule, &expected.as_stylesheet()[0]);
}

#[test]
fn serialize_and_reparse_round_trip() {
    let mut parser = Css3::new(ReplayStream::new(media_rule()));
    let first = parser.parse();

    let mut replayed = Vec::new();
    first.to_tokens(&mut replayed);

    let mut reparser = Css3::new(ReplayStream::new(replayed));
    let second = reparser.parse();

    assert_eq!(
        Walker::new(&first).walk_to_string(),
        Walker::new(&second).walk_to_string()
    );
}

#[test]
fn tokenizer_error_is_forwarded() {
    let stream = ReplayStream::with_error(
        tokens(vec![(TokenType::Ident, b"a"), (TokenType::Whitespace, b" ")]),
        ParseError::Stream("bad escape".to_string()),
    );
    let mut parser = Css3::new(stream);

    let stylesheet = parser.parse();
    // the partial tree is still returned
    assert!(stylesheet.is_stylesheet());
    assert_eq!(parser.err(), Some(ParseError::Stream("bad escape".to_string())));
}

#[test]
fn cdo_and_cdc_pass_through_as_tokens() {
    let mut parser = Css3::new(ReplayStream::new(tokens(vec![
        (TokenType::Cdo, b"<!--"),
        (TokenType::Whitespace, b" "),
        (TokenType::Cdc, b"-->"),
    ])));

    match parser.next_event() {
        GrammarEvent::Token(node) => assert_eq!(node.as_token().kind, TokenType::Cdo),
        event => panic!("expected Token, got {event:?}"),
    }
    match parser.next_event() {
        GrammarEvent::Token(node) => assert_eq!(node.as_token().kind, TokenType::Cdc),
        event => panic!("expected Token, got {event:?}"),
    }
    assert!(matches!(parser.next_event(), GrammarEvent::Error));
}
