use crate::node::{Node, NodeType};
use std::io::Write;

/// The walker is used to walk the stylesheet tree and print it.
pub struct Walker<'a> {
    root: &'a Node,
}

impl<'a> Walker<'a> {
    pub fn new(root: &'a Node) -> Self {
        Self { root }
    }

    pub fn walk_stdout(&self) {
        let _ = inner_walk(self.root, 0, &mut std::io::stdout());
    }

    pub fn walk_to_string(&self) -> String {
        let mut output: Vec<u8> = Vec::new();

        let _ = inner_walk(self.root, 0, &mut output);

        String::from_utf8_lossy(&output).into_owned()
    }
}

fn inner_walk(node: &Node, depth: usize, f: &mut dyn Write) -> Result<(), std::io::Error> {
    let prefix = " ".repeat(depth * 2);

    match &*node.node_type {
        NodeType::Stylesheet { children } => {
            writeln!(f, "{}[Stylesheet ({})]", prefix, children.len())?;
            for child in children.iter() {
                inner_walk(child, depth + 1, f)?;
            }
        }
        NodeType::AtRule {
            name,
            prelude,
            rules,
        } => {
            writeln!(f, "{}[AtRule] name: {}", prefix, name)?;
            for child in prelude.iter() {
                inner_walk(child, depth + 1, f)?;
            }
            for child in rules.iter() {
                inner_walk(child, depth + 1, f)?;
            }
        }
        NodeType::Ruleset {
            selectors,
            declarations,
        } => {
            writeln!(f, "{}[Ruleset]", prefix)?;
            for child in selectors.iter() {
                inner_walk(child, depth + 1, f)?;
            }
            for child in declarations.iter() {
                inner_walk(child, depth + 1, f)?;
            }
        }
        NodeType::Selector { elements } => {
            writeln!(f, "{}[Selector]", prefix)?;
            for child in elements.iter() {
                inner_walk(child, depth + 1, f)?;
            }
        }
        NodeType::Declaration {
            property,
            value,
            important,
        } => {
            writeln!(
                f,
                "{}[Declaration] property: {} important: {}",
                prefix, property, important
            )?;
            for child in value.iter() {
                inner_walk(child, depth + 1, f)?;
            }
        }
        NodeType::Function { name, arguments } => {
            writeln!(f, "{}[Function] name: {}", prefix, name)?;
            for child in arguments.iter() {
                inner_walk(child, depth + 1, f)?;
            }
        }
        NodeType::Argument { children } => {
            writeln!(f, "{}[Argument]", prefix)?;
            for child in children.iter() {
                inner_walk(child, depth + 1, f)?;
            }
        }
        NodeType::Block {
            open,
            children,
            close,
        } => {
            match close {
                Some(close) => writeln!(f, "{}[Block] open: {} close: {}", prefix, open, close)?,
                None => writeln!(f, "{}[Block] open: {} close: <none>", prefix, open)?,
            }
            for child in children.iter() {
                inner_walk(child, depth + 1, f)?;
            }
        }
        NodeType::Token(token) => {
            writeln!(f, "{}[{:?}] {}", prefix, token.kind, token)?;
        }
    }
    Ok(())
}
