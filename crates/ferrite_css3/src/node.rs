use crate::tokens::TokenType;
use ferrite_shared::Token;
use std::fmt;

/// A consumed token kept as a tree leaf: kind, owned bytes and source offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenNode {
    pub kind: TokenType,
    pub data: Vec<u8>,
    pub offset: usize,
}

impl From<Token<TokenType>> for TokenNode {
    fn from(token: Token<TokenType>) -> Self {
        Self {
            kind: token.kind,
            offset: token.offset,
            data: token.text.into_vec(),
        }
    }
}

impl fmt::Display for TokenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.data))
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum NodeType {
    Stylesheet {
        children: Vec<Node>,
    },
    AtRule {
        name: TokenNode,
        prelude: Vec<Node>,
        rules: Vec<Node>,
    },
    Ruleset {
        selectors: Vec<Node>,
        declarations: Vec<Node>,
    },
    Selector {
        elements: Vec<Node>,
    },
    Declaration {
        property: TokenNode,
        value: Vec<Node>,
        important: bool,
    },
    Function {
        name: TokenNode,
        arguments: Vec<Node>,
    },
    Argument {
        children: Vec<Node>,
    },
    /// A bracketed component; `close` is absent on unterminated input
    Block {
        open: TokenNode,
        children: Vec<Node>,
        close: Option<TokenNode>,
    },
    Token(TokenNode),
}

/// A node is a single element in the stylesheet tree
#[derive(Debug, PartialEq, Clone)]
pub struct Node {
    pub node_type: Box<NodeType>,
}

impl Node {
    pub(crate) fn new(node_type: NodeType) -> Self {
        Self {
            node_type: Box::new(node_type),
        }
    }

    pub(crate) fn token(token: TokenNode) -> Self {
        Self::new(NodeType::Token(token))
    }

    #[must_use]
    pub fn is_stylesheet(&self) -> bool {
        matches!(&*self.node_type, NodeType::Stylesheet { .. })
    }

    #[must_use]
    pub fn as_stylesheet(&self) -> &Vec<Node> {
        match &*self.node_type {
            NodeType::Stylesheet { children } => children,
            _ => panic!("Node is not a stylesheet"),
        }
    }

    #[must_use]
    pub fn is_at_rule(&self) -> bool {
        matches!(&*self.node_type, NodeType::AtRule { .. })
    }

    #[must_use]
    pub fn as_at_rule(&self) -> (&TokenNode, &Vec<Node>, &Vec<Node>) {
        match &*self.node_type {
            NodeType::AtRule {
                name,
                prelude,
                rules,
            } => (name, prelude, rules),
            _ => panic!("Node is not an at-rule"),
        }
    }

    #[must_use]
    pub fn is_ruleset(&self) -> bool {
        matches!(&*self.node_type, NodeType::Ruleset { .. })
    }

    #[must_use]
    pub fn as_ruleset(&self) -> (&Vec<Node>, &Vec<Node>) {
        match &*self.node_type {
            NodeType::Ruleset {
                selectors,
                declarations,
            } => (selectors, declarations),
            _ => panic!("Node is not a ruleset"),
        }
    }

    #[must_use]
    pub fn is_selector(&self) -> bool {
        matches!(&*self.node_type, NodeType::Selector { .. })
    }

    #[must_use]
    pub fn as_selector(&self) -> &Vec<Node> {
        match &*self.node_type {
            NodeType::Selector { elements } => elements,
            _ => panic!("Node is not a selector"),
        }
    }

    #[must_use]
    pub fn is_declaration(&self) -> bool {
        matches!(&*self.node_type, NodeType::Declaration { .. })
    }

    #[must_use]
    pub fn as_declaration(&self) -> (&TokenNode, &Vec<Node>, &bool) {
        match &*self.node_type {
            NodeType::Declaration {
                property,
                value,
                important,
            } => (property, value, important),
            _ => panic!("Node is not a declaration"),
        }
    }

    #[must_use]
    pub fn is_function(&self) -> bool {
        matches!(&*self.node_type, NodeType::Function { .. })
    }

    #[must_use]
    pub fn as_function(&self) -> (&TokenNode, &Vec<Node>) {
        match &*self.node_type {
            NodeType::Function { name, arguments } => (name, arguments),
            _ => panic!("Node is not a function"),
        }
    }

    #[must_use]
    pub fn is_block(&self) -> bool {
        matches!(&*self.node_type, NodeType::Block { .. })
    }

    #[must_use]
    pub fn is_token(&self) -> bool {
        matches!(&*self.node_type, NodeType::Token(_))
    }

    #[must_use]
    pub fn as_token(&self) -> &TokenNode {
        match &*self.node_type {
            NodeType::Token(token) => token,
            _ => panic!("Node is not a token"),
        }
    }

    /// Re-serializes the subtree into the token sequence it was built from.
    /// Structural tokens the parser consumed (`:`, `;`, `{`, `}`, `,`) are
    /// reinserted; dropped whitespace and comments are not, so re-parsing the
    /// result yields an equivalent tree up to whitespace normalization.
    pub fn to_tokens(&self, out: &mut Vec<(TokenType, Vec<u8>)>) {
        match &*self.node_type {
            NodeType::Stylesheet { children } => {
                for child in children {
                    child.to_tokens(out);
                }
            }
            NodeType::AtRule {
                name,
                prelude,
                rules,
            } => {
                out.push((name.kind, name.data.clone()));
                if !prelude.is_empty() {
                    out.push((TokenType::Whitespace, b" ".to_vec()));
                }
                for node in prelude {
                    node.to_tokens(out);
                }
                if rules.is_empty() {
                    out.push((TokenType::Semicolon, b";".to_vec()));
                } else {
                    out.push((TokenType::LCurly, b"{".to_vec()));
                    for rule in rules {
                        rule.to_tokens(out);
                    }
                    out.push((TokenType::RCurly, b"}".to_vec()));
                }
            }
            NodeType::Ruleset {
                selectors,
                declarations,
            } => {
                for (i, selector) in selectors.iter().enumerate() {
                    if i > 0 {
                        out.push((TokenType::Comma, b",".to_vec()));
                    }
                    selector.to_tokens(out);
                }
                out.push((TokenType::LCurly, b"{".to_vec()));
                for declaration in declarations {
                    declaration.to_tokens(out);
                }
                out.push((TokenType::RCurly, b"}".to_vec()));
            }
            NodeType::Selector { elements } => {
                for element in elements {
                    element.to_tokens(out);
                }
            }
            NodeType::Declaration {
                property,
                value,
                important,
            } => {
                out.push((property.kind, property.data.clone()));
                out.push((TokenType::Colon, b":".to_vec()));
                for (i, node) in value.iter().enumerate() {
                    if i > 0 {
                        out.push((TokenType::Whitespace, b" ".to_vec()));
                    }
                    node.to_tokens(out);
                }
                if *important {
                    out.push((TokenType::Delim, b"!".to_vec()));
                    out.push((TokenType::Ident, b"important".to_vec()));
                }
                out.push((TokenType::Semicolon, b";".to_vec()));
            }
            NodeType::Function { name, arguments } => {
                out.push((name.kind, name.data.clone()));
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        out.push((TokenType::Comma, b",".to_vec()));
                    }
                    argument.to_tokens(out);
                }
                out.push((TokenType::RParen, b")".to_vec()));
            }
            NodeType::Argument { children } => {
                for child in children {
                    child.to_tokens(out);
                }
            }
            NodeType::Block {
                open,
                children,
                close,
            } => {
                out.push((open.kind, open.data.clone()));
                for child in children {
                    child.to_tokens(out);
                }
                if let Some(close) = close {
                    out.push((close.kind, close.data.clone()));
                }
            }
            NodeType::Token(token) => {
                out.push((token.kind, token.data.clone()));
            }
        }
    }
}
