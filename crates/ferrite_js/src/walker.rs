use crate::node::Node;
use std::io::Write;

/// The walker is used to walk the script tree and print it.
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

    if node.is_token() {
        writeln!(f, "{}[{:?}] {}", prefix, node.kind, String::from_utf8_lossy(&node.data))?;
        return Ok(());
    }

    writeln!(f, "{}[{:?}]", prefix, node.grammar)?;
    for child in node.children.iter() {
        inner_walk(child, depth + 1, f)?;
    }
    Ok(())
}
