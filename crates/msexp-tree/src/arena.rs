use std::ops::{Index, IndexMut};

use slotmap::SlotMap;

use crate::node::{NodeId, NodeKind, NodeStyle, SexpNode, clamp_text};

/// Arena owning every node of an editing session.
///
/// Slots are recycled through the slot map's free list, so allocation is
/// O(1) and handles of untouched nodes never change. The arena never
/// compacts.
///
/// Structural detachment and recursive release are split on purpose:
/// [`detach`] only unlinks, the private release primitive only reclaims,
/// and [`detach_and_free`] is the single destruction entry point composing
/// both — destruction is never started on a node still linked into a live
/// structure.
///
/// [`detach`]: SexpArena::detach
/// [`detach_and_free`]: SexpArena::detach_and_free
#[derive(Debug, Clone, Default)]
pub struct SexpArena {
    nodes: SlotMap<NodeId, SexpNode>,
}

impl SexpArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
        }
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node behind `id`, or `None` for a stale handle.
    pub fn get(&self, id: NodeId) -> Option<&SexpNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Allocates a blank `Number` node and links it under `parent`.
    ///
    /// Insertion walks the child chain from `first_child` looking for
    /// `after`; if the reference sibling is not in the chain (or `after`
    /// is `None`) the node is appended at the tail. Hosts rely on the
    /// lenient tail fallback when they pass a stale sibling reference.
    pub fn allocate(&mut self, parent: Option<NodeId>, after: Option<NodeId>) -> NodeId {
        let id = self.nodes.insert(SexpNode::new(NodeKind::Number, ""));
        if let Some(parent_id) = parent {
            self.link_under(parent_id, id, after);
        }
        id
    }

    /// Overwrites kind and text in place. Text is truncated to the kind's
    /// cap; display style is reset for the new kind; flags are untouched.
    pub fn set_node(&mut self, id: NodeId, kind: NodeKind, text: &str) {
        let node = &mut self.nodes[id];
        node.kind = kind;
        node.text = clamp_text(kind, text);
        node.style = NodeStyle::for_kind(kind);
    }

    /// Replaces the text payload, clamped to the node's current kind.
    pub fn set_text(&mut self, id: NodeId, text: &str) {
        let kind = self.nodes[id].kind;
        self.nodes[id].text = clamp_text(kind, text);
    }

    /// Unlinks `id` from its parent's child list and from the preceding
    /// sibling's next pointer. Never frees; a detached node stays live as
    /// an independent root.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent_id) = self.nodes[id].parent else {
            return;
        };
        let next = self.nodes[id].next_sibling;
        if self.nodes[parent_id].first_child == Some(id) {
            self.nodes[parent_id].first_child = next;
        } else if let Some(prev) = self.prev_sibling_of(id) {
            self.nodes[prev].next_sibling = next;
        }
        let node = &mut self.nodes[id];
        node.parent = None;
        node.next_sibling = None;
    }

    /// Detaches `id`, then recursively releases its subtree.
    ///
    /// With `cascade` the whole trailing sibling chain (and subtrees) goes
    /// too: the predecessor link is cut once and every following sibling
    /// is released. Without it only `id`'s subtree is reclaimed and the
    /// former neighbors are spliced back together.
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale.
    pub fn detach_and_free(&mut self, id: NodeId, cascade: bool) {
        if cascade {
            if let Some(parent_id) = self.nodes[id].parent {
                if self.nodes[parent_id].first_child == Some(id) {
                    self.nodes[parent_id].first_child = None;
                } else if let Some(prev) = self.prev_sibling_of(id) {
                    self.nodes[prev].next_sibling = None;
                }
            }
            self.release(id, true);
        } else {
            self.detach(id);
            self.release(id, false);
        }
    }

    /// Recursive release primitive: reclaims the slot, the subtree below
    /// it and, when cascading, the trailing sibling chain. Assumes the
    /// head node is already unlinked.
    fn release(&mut self, id: NodeId, cascade: bool) {
        let node = self
            .nodes
            .remove(id)
            .unwrap_or_else(|| panic!("release hit a stale node handle: {id:?}"));
        if let Some(child) = node.first_child {
            self.release(child, true);
        }
        if cascade && let Some(next) = node.next_sibling {
            self.release(next, true);
        }
    }

    /// Appends an already-detached node at the tail of `parent`'s chain.
    pub fn append_as_child(&mut self, parent: NodeId, id: NodeId) {
        debug_assert!(self.nodes[id].parent.is_none(), "append of a linked node");
        self.link_under(parent, id, None);
    }

    /// Links an already-detached node into `parent`'s chain directly
    /// after `after`, or as the new first child when `after` is `None`.
    /// Unlike allocation's lenient walk, `after` must be a current child.
    pub fn insert_child(&mut self, parent: NodeId, id: NodeId, after: Option<NodeId>) {
        debug_assert!(self.nodes[id].parent.is_none(), "insert of a linked node");
        self.nodes[id].parent = Some(parent);
        match after {
            None => {
                self.nodes[id].next_sibling = self.nodes[parent].first_child;
                self.nodes[parent].first_child = Some(id);
            }
            Some(prev) => {
                debug_assert_eq!(self.nodes[prev].parent, Some(parent));
                self.nodes[id].next_sibling = self.nodes[prev].next_sibling;
                self.nodes[prev].next_sibling = Some(id);
            }
        }
    }

    /// Detaches `source` and re-parents it; `None` leaves it a free root.
    pub fn move_branch(&mut self, source: NodeId, new_parent: Option<NodeId>) {
        self.detach(source);
        if let Some(parent_id) = new_parent {
            self.append_as_child(parent_id, source);
        }
    }

    fn link_under(&mut self, parent: NodeId, id: NodeId, after: Option<NodeId>) {
        self.nodes[id].parent = Some(parent);
        match self.nodes[parent].first_child {
            None => self.nodes[parent].first_child = Some(id),
            Some(first) => {
                let mut at = first;
                while Some(at) != after
                    && let Some(next) = self.nodes[at].next_sibling
                {
                    at = next;
                }
                self.nodes[id].next_sibling = self.nodes[at].next_sibling;
                self.nodes[at].next_sibling = Some(id);
            }
        }
    }

    /// Number of nodes in the sibling chain starting at `first`.
    pub fn count_args(&self, first: Option<NodeId>) -> usize {
        self.chain_from(first).count()
    }

    /// Number of children directly below `parent`.
    pub fn child_count(&self, parent: NodeId) -> usize {
        self.count_args(self.nodes[parent].first_child)
    }

    #[inline(always)]
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    #[inline(always)]
    pub fn first_child_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].first_child
    }

    #[inline(always)]
    pub fn next_sibling_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].next_sibling
    }

    /// Walks the parent's chain for the node preceding `id`.
    pub fn prev_sibling_of(&self, id: NodeId) -> Option<NodeId> {
        let parent_id = self.nodes[id].parent?;
        self.children(parent_id)
            .find(|&c| self.nodes[c].next_sibling == Some(id))
    }

    pub fn child_at(&self, parent: NodeId, index: usize) -> Option<NodeId> {
        self.children(parent).nth(index)
    }

    pub fn last_child_of(&self, parent: NodeId) -> Option<NodeId> {
        self.children(parent).last()
    }

    /// Argument position of `id` below its parent; `None` for a root.
    pub fn position_of(&self, id: NodeId) -> Option<usize> {
        let parent_id = self.nodes[id].parent?;
        self.children(parent_id).position(|c| c == id)
    }

    /// Iterates the direct children of `parent` in chain order.
    pub fn children(&self, parent: NodeId) -> ChainIter<'_> {
        self.chain_from(self.nodes[parent].first_child)
    }

    /// Iterates a sibling chain starting at `first`.
    pub fn chain_from(&self, first: Option<NodeId>) -> ChainIter<'_> {
        ChainIter { arena: self, at: first }
    }

    /// Live nodes with no parent, in arbitrary order.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(id, _)| id)
    }

    /// Checks the structural invariant: every non-root node appears
    /// exactly once in its parent's child chain, and every child chain
    /// points back at its parent.
    pub fn is_well_linked(&self) -> bool {
        self.nodes.iter().all(|(id, node)| {
            let chain_ok = match node.parent {
                None => true,
                Some(parent_id) => self.children(parent_id).filter(|&c| c == id).count() == 1,
            };
            chain_ok
                && self
                    .children(id)
                    .all(|c| self.nodes[c].parent == Some(id))
        })
    }
}

impl Index<NodeId> for SexpArena {
    type Output = SexpNode;

    /// # Panics
    ///
    /// Panics on a stale handle.
    fn index(&self, id: NodeId) -> &SexpNode {
        &self.nodes[id]
    }
}

impl IndexMut<NodeId> for SexpArena {
    fn index_mut(&mut self, id: NodeId) -> &mut SexpNode {
        &mut self.nodes[id]
    }
}

/// Iterator over a next-sibling chain.
pub struct ChainIter<'a> {
    arena: &'a SexpArena,
    at: Option<NodeId>,
}

impl Iterator for ChainIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.at?;
        self.at = self.arena[id].next_sibling;
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn chain(arena: &mut SexpArena, parent: NodeId, texts: &[&str]) -> Vec<NodeId> {
        texts
            .iter()
            .map(|text| {
                let id = arena.allocate(Some(parent), None);
                arena.set_node(id, NodeKind::String, text);
                id
            })
            .collect()
    }

    #[test]
    fn test_allocate_links_in_order() {
        let mut arena = SexpArena::new();
        let root = arena.allocate(None, None);
        let kids = chain(&mut arena, root, &["a", "b", "c"]);

        let listed: Vec<_> = arena.children(root).collect();
        assert_eq!(listed, kids);
        assert!(arena.is_well_linked());
    }

    #[test]
    fn test_allocate_after_sibling() {
        let mut arena = SexpArena::new();
        let root = arena.allocate(None, None);
        let kids = chain(&mut arena, root, &["a", "c"]);

        let b = arena.allocate(Some(root), Some(kids[0]));
        arena.set_node(b, NodeKind::String, "b");

        let texts: Vec<_> = arena
            .children(root)
            .map(|c| arena[c].text.to_string())
            .collect();
        assert_eq!(texts, ["a", "b", "c"]);
    }

    #[test]
    fn test_insert_child_at_head() {
        let mut arena = SexpArena::new();
        let root = arena.allocate(None, None);
        let kids = chain(&mut arena, root, &["b", "c"]);

        let a = arena.allocate(None, None);
        arena.set_node(a, NodeKind::String, "a");
        arena.insert_child(root, a, None);

        let listed: Vec<_> = arena.children(root).collect();
        assert_eq!(listed, vec![a, kids[0], kids[1]]);
        assert!(arena.is_well_linked());
    }

    #[test]
    fn test_allocate_after_unknown_sibling_appends_at_tail() {
        let mut arena = SexpArena::new();
        let root = arena.allocate(None, None);
        chain(&mut arena, root, &["a", "b"]);

        let stranger = arena.allocate(None, None);
        let d = arena.allocate(Some(root), Some(stranger));
        arena.set_node(d, NodeKind::String, "d");

        assert_eq!(arena.last_child_of(root), Some(d));
        assert!(arena.is_well_linked());
    }

    #[rstest]
    #[case(false, 2)]
    #[case(true, 0)]
    fn test_detach_and_free_cascade(#[case] cascade: bool, #[case] left: usize) {
        let mut arena = SexpArena::new();
        let root = arena.allocate(None, None);
        let kids = chain(&mut arena, root, &["a", "b", "c"]);

        arena.detach_and_free(kids[0], cascade);
        assert_eq!(arena.child_count(root), left);
        assert!(arena.is_well_linked());
    }

    #[test]
    fn test_detach_and_free_splices_neighbors() {
        let mut arena = SexpArena::new();
        let root = arena.allocate(None, None);
        let kids = chain(&mut arena, root, &["a", "b", "c"]);

        arena.detach_and_free(kids[1], false);
        let listed: Vec<_> = arena.children(root).collect();
        assert_eq!(listed, vec![kids[0], kids[2]]);
    }

    #[test]
    fn test_free_recurses_into_subtree() {
        let mut arena = SexpArena::new();
        let root = arena.allocate(None, None);
        let branch = arena.allocate(Some(root), None);
        chain(&mut arena, branch, &["x", "y"]);

        assert_eq!(arena.len(), 4);
        arena.detach_and_free(branch, false);
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_freed_handle_is_stale() {
        let mut arena = SexpArena::new();
        let root = arena.allocate(None, None);
        let child = arena.allocate(Some(root), None);

        arena.detach_and_free(child, false);
        assert!(arena.get(child).is_none());
        assert!(!arena.contains(child));
    }

    #[test]
    fn test_move_branch() {
        let mut arena = SexpArena::new();
        let root = arena.allocate(None, None);
        let a = arena.allocate(Some(root), None);
        let b = arena.allocate(Some(root), None);
        let leaf = arena.allocate(Some(a), None);

        arena.move_branch(leaf, Some(b));
        assert_eq!(arena.first_child_of(a), None);
        assert_eq!(arena.first_child_of(b), Some(leaf));
        assert_eq!(arena.parent_of(leaf), Some(b));
        assert!(arena.is_well_linked());
    }

    #[test]
    fn test_positions_and_siblings() {
        let mut arena = SexpArena::new();
        let root = arena.allocate(None, None);
        let kids = chain(&mut arena, root, &["a", "b", "c"]);

        assert_eq!(arena.position_of(kids[1]), Some(1));
        assert_eq!(arena.prev_sibling_of(kids[1]), Some(kids[0]));
        assert_eq!(arena.prev_sibling_of(kids[0]), None);
        assert_eq!(arena.child_at(root, 2), Some(kids[2]));
        assert_eq!(arena.position_of(root), None);
        assert_eq!(arena.count_args(Some(kids[0])), 3);
    }

    #[test]
    fn test_detached_node_is_a_root() {
        let mut arena = SexpArena::new();
        let root = arena.allocate(None, None);
        let child = arena.allocate(Some(root), None);

        arena.detach(child);
        assert!(arena[child].is_root());
        assert_eq!(arena.roots().count(), 2);
        assert!(arena.is_well_linked());
    }
}
