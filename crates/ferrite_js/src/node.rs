use crate::tokens::TokenType;

/// The grammar category a node belongs to. The tag distinguishes roles; the
/// producing grammar rules impose the structural schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrammarType {
    /// Extra node produced when a production is abandoned on error
    Error,
    Module,
    Token,
    Comment,
    Binding,
    Clause,
    Method,
    Expr,
    Stmt,
}

/// A uniform script tree node. Token leaves carry `kind` and `data`; every
/// other node carries an ordered `children` list and leaves `kind` at its
/// `Error` placeholder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub grammar: GrammarType,
    pub children: Vec<Node>,
    pub kind: TokenType,
    pub data: Vec<u8>,
}

impl Node {
    pub(crate) fn new(grammar: GrammarType, children: Vec<Node>) -> Self {
        Self {
            grammar,
            children,
            kind: TokenType::Error,
            data: Vec::new(),
        }
    }

    pub(crate) fn token(kind: TokenType, data: Vec<u8>) -> Self {
        Self {
            grammar: GrammarType::Token,
            children: Vec::new(),
            kind,
            data,
        }
    }

    /// The zero node returned when a production gives up.
    pub(crate) fn none() -> Self {
        Self::new(GrammarType::Error, Vec::new())
    }

    pub fn is_token(&self) -> bool {
        self.grammar == GrammarType::Token
    }

    /// Token leaves of this subtree in source order.
    pub fn leaves(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Node>) {
        if self.is_token() {
            out.push(self);
            return;
        }
        for child in &self.children {
            child.collect_leaves(out);
        }
    }
}
