//! Parenthesized text rendering of a subtree, for logs and test
//! diagnostics. This is not a wire format; the Pool encoding is.

use itertools::Itertools;

use crate::arena::SexpArena;
use crate::node::{NodeId, NodeKind};

/// Renders the subtree rooted at `id` as `(op arg ...)` text.
pub fn render(arena: &SexpArena, id: NodeId) -> String {
    let node = &arena[id];
    match node.kind {
        NodeKind::Operator => {
            if arena.first_child_of(id).is_none() {
                format!("({})", node.text)
            } else {
                format!(
                    "({} {})",
                    node.text,
                    arena.children(id).map(|c| render(arena, c)).join(" ")
                )
            }
        }
        NodeKind::ContainerData => format!(
            "{}[{}]",
            node.text,
            arena.children(id).map(|c| render(arena, c)).join(" ")
        ),
        _ => node.to_string(),
    }
}
