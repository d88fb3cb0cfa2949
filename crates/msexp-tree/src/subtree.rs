use smol_str::SmolStr;

use crate::arena::SexpArena;
use crate::node::{NodeFlags, NodeId, NodeKind, NodeStyle};

/// An owned, detached deep copy of one subtree.
///
/// Snapshots live outside the arena, so a clipboard slot or an external
/// undo snapshot survives any amount of arena mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Subtree {
    pub kind: NodeKind,
    pub flags: NodeFlags,
    pub style: NodeStyle,
    pub text: SmolStr,
    pub children: Vec<Subtree>,
}

impl Subtree {
    /// Deep-copies the subtree rooted at `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale.
    pub fn capture(arena: &SexpArena, id: NodeId) -> Self {
        let node = &arena[id];
        Self {
            kind: node.kind,
            flags: node.flags,
            style: node.style,
            text: node.text.clone(),
            children: arena
                .children(id)
                .map(|child| Self::capture(arena, child))
                .collect(),
        }
    }

    /// Instantiates the snapshot as a fresh detached branch and returns
    /// its root handle.
    pub fn graft(&self, arena: &mut SexpArena) -> NodeId {
        let id = arena.allocate(None, None);
        arena.set_node(id, self.kind, &self.text);
        arena[id].flags = self.flags;
        arena[id].style = self.style;
        for child in &self.children {
            let child_id = child.graft(arena);
            arena.append_as_child(id, child_id);
        }
        id
    }

    /// Nodes in the snapshot, root included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Subtree::node_count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(arena: &mut SexpArena) -> NodeId {
        let root = arena.allocate(None, None);
        arena.set_node(root, NodeKind::Operator, "and");
        for text in ["true", "false"] {
            let child = arena.allocate(Some(root), None);
            arena.set_node(child, NodeKind::Operator, text);
        }
        root
    }

    #[test]
    fn test_capture_then_graft_is_structurally_equal() {
        let mut arena = SexpArena::new();
        let root = sample(&mut arena);

        let snapshot = Subtree::capture(&arena, root);
        let copy = snapshot.graft(&mut arena);

        assert_ne!(copy, root);
        assert_eq!(Subtree::capture(&arena, copy), snapshot);
        assert!(arena[copy].is_root());
        assert!(arena.is_well_linked());
    }

    #[test]
    fn test_snapshot_survives_source_free() {
        let mut arena = SexpArena::new();
        let root = sample(&mut arena);
        let snapshot = Subtree::capture(&arena, root);

        arena.detach_and_free(root, false);
        assert_eq!(snapshot.node_count(), 3);

        let restored = snapshot.graft(&mut arena);
        assert_eq!(arena.child_count(restored), 2);
    }
}
