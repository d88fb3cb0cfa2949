use msexp_opf::{Candidate, MissionCatalogs, OpfFormat, OpfResolver};
use msexp_tree::{NodeId, NodeKind, SexpArena, Subtree};
use tracing::debug;

use crate::action::{EditAction, EnablementHook, NodeRef};
use crate::clipboard::Clipboard;

/// The negation operator spliced in and out by [`SexpEditor::toggle_not`].
pub const NEGATION_OPERATOR: &str = "not";

// custom operator tables may cycle through operator defaults; the
// argument fill stops descending past this depth
const MAX_FILL_DEPTH: usize = 8;

/// One editing session over one tree.
///
/// Owns the arena and the session clipboard; reads the catalogs. All
/// mutations are synchronous and single-threaded; a host wanting undo
/// snapshots the document externally (see [`Subtree::capture`]).
pub struct SexpEditor<'a> {
    arena: SexpArena,
    catalogs: &'a MissionCatalogs,
    clipboard: Clipboard,
    hook: Option<Box<dyn EnablementHook + 'a>>,
}

impl<'a> SexpEditor<'a> {
    pub fn new(catalogs: &'a MissionCatalogs) -> Self {
        Self::from_arena(SexpArena::new(), catalogs)
    }

    /// Adopts an arena built elsewhere, typically by the codec.
    pub fn from_arena(arena: SexpArena, catalogs: &'a MissionCatalogs) -> Self {
        Self {
            arena,
            catalogs,
            clipboard: Clipboard::default(),
            hook: None,
        }
    }

    pub fn arena(&self) -> &SexpArena {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut SexpArena {
        &mut self.arena
    }

    pub fn catalogs(&self) -> &'a MissionCatalogs {
        self.catalogs
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn resolver(&self) -> OpfResolver<'a> {
        OpfResolver::new(self.catalogs)
    }

    /// Installs the host enablement override.
    pub fn set_hook(&mut self, hook: Box<dyn EnablementHook + 'a>) {
        self.hook = Some(hook);
    }

    pub fn clear_hook(&mut self) {
        self.hook = None;
    }

    pub(crate) fn hook(&self) -> Option<&(dyn EnablementHook + 'a)> {
        self.hook.as_deref()
    }

    // === mutations ===

    /// Frees `id`'s subtree and relinks its former neighbors. Fails on a
    /// root, a protected container modifier, or an argument at the
    /// parent's arity floor.
    pub fn delete(&mut self, id: NodeId) -> bool {
        if !self.enabled(EditAction::Delete, NodeRef::Real(id)) {
            return false;
        }
        debug!(?id, "delete subtree");
        self.arena.detach_and_free(id, false);
        true
    }

    /// Snapshots `id` into the clipboard, replacing any prior content.
    pub fn copy(&mut self, id: NodeId) -> bool {
        if !self.enabled(EditAction::Copy, NodeRef::Real(id)) {
            return false;
        }
        self.clipboard.set(Subtree::capture(&self.arena, id));
        true
    }

    pub fn cut(&mut self, id: NodeId) -> bool {
        if !self.enabled(EditAction::Cut, NodeRef::Real(id)) {
            return false;
        }
        self.clipboard.set(Subtree::capture(&self.arena, id));
        debug!(?id, "cut subtree");
        self.arena.detach_and_free(id, false);
        true
    }

    /// Replaces `id`'s entire subtree with the clipboard content, in
    /// place: `id` keeps its handle and its position.
    pub fn paste_overwrite(&mut self, id: NodeId) -> bool {
        if !self.enabled(EditAction::PasteOverwrite, NodeRef::Real(id)) {
            return false;
        }
        let snapshot = self
            .clipboard
            .get()
            .expect("enablement guarantees clipboard content")
            .clone();
        debug!(?id, "paste over subtree");
        if let Some(first) = self.arena.first_child_of(id) {
            self.arena.detach_and_free(first, true);
        }
        self.arena.set_node(id, snapshot.kind, &snapshot.text);
        self.arena[id].flags = snapshot.flags;
        self.arena[id].style = snapshot.style;
        for child in &snapshot.children {
            let child_id = child.graft(&mut self.arena);
            self.arena.append_as_child(id, child_id);
        }
        true
    }

    /// Appends the clipboard content as a new trailing argument of `id`.
    pub fn paste_add(&mut self, id: NodeId) -> bool {
        if !self.enabled(EditAction::PasteAdd, NodeRef::Real(id)) {
            return false;
        }
        let snapshot = self
            .clipboard
            .get()
            .expect("enablement guarantees clipboard content")
            .clone();
        debug!(?id, "paste as trailing argument");
        let child_id = snapshot.graft(&mut self.arena);
        self.arena.append_as_child(id, child_id);
        true
    }

    /// Three-pointer sibling swap with the previous sibling.
    pub fn move_up(&mut self, id: NodeId) -> bool {
        if !self.enabled(EditAction::MoveUp, NodeRef::Real(id)) {
            return false;
        }
        let parent = self.arena.parent_of(id).expect("movable node has a parent");
        let prev = self
            .arena
            .prev_sibling_of(id)
            .expect("enablement guarantees a previous sibling");
        let before_prev = self.arena.prev_sibling_of(prev);
        self.arena.detach(id);
        self.arena.insert_child(parent, id, before_prev);
        true
    }

    /// Three-pointer sibling swap with the next sibling.
    pub fn move_down(&mut self, id: NodeId) -> bool {
        if !self.enabled(EditAction::MoveDown, NodeRef::Real(id)) {
            return false;
        }
        let parent = self.arena.parent_of(id).expect("movable node has a parent");
        let next = self
            .arena
            .next_sibling_of(id)
            .expect("enablement guarantees a next sibling");
        self.arena.detach(id);
        self.arena.insert_child(parent, id, Some(next));
        true
    }

    /// Overwrites `id`'s operator in place, then reconciles the argument
    /// list against the new operator: appends type-correct defaults up to
    /// the minimum and frees everything beyond the maximum.
    pub fn replace_operator(&mut self, id: NodeId, name: &str) -> bool {
        let catalogs = self.catalogs;
        let Some(entry) = catalogs.operators.lookup(name) else {
            return false;
        };
        debug!(?id, operator = name, "replace operator");
        self.arena.set_node(id, NodeKind::Operator, &entry.name);

        if let Some(max) = entry.max
            && self.arena.child_count(id) > max
        {
            let first_excess = self.arena.child_at(id, max).expect("count exceeds max");
            self.arena.detach_and_free(first_excess, true);
        }
        let have = self.arena.child_count(id);
        for position in have..entry.min {
            let argument = self.synthesize(entry.arg_format(position), 0);
            self.arena.append_as_child(id, argument);
        }
        true
    }

    /// Wraps `id` in the negation operator, or unwraps it when `id`
    /// already is a negation with exactly one child. Both directions go
    /// through one splice where a root position simply skips sibling
    /// surgery. Returns the node now standing in `id`'s former position.
    pub fn toggle_not(&mut self, id: NodeId) -> Option<NodeId> {
        let node = &self.arena[id];
        if node.is_operator() && node.text == NEGATION_OPERATOR {
            let child = self.arena.first_child_of(id)?;
            if self.arena.next_sibling_of(child).is_some() {
                return None;
            }
            debug!(?id, "unwrap negation");
            self.arena.detach(child);
            self.splice(id, child);
            self.arena.detach_and_free(id, false);
            Some(child)
        } else {
            debug!(?id, "wrap in negation");
            let negation = self.arena.allocate(None, None);
            self.arena
                .set_node(negation, NodeKind::Operator, NEGATION_OPERATOR);
            self.splice(id, negation);
            self.arena.append_as_child(negation, id);
            Some(negation)
        }
    }

    /// Appends exactly one resolver-synthesized trailing argument.
    pub fn add_argument(&mut self, id: NodeId) -> bool {
        if !self.arena[id].is_operator() {
            return false;
        }
        let entry = self.lookup_operator(id);
        let count = self.arena.child_count(id);
        if let Some(max) = entry.max
            && count >= max
        {
            return false;
        }
        let argument = self.synthesize(entry.arg_format(count), 0);
        self.arena.append_as_child(id, argument);
        true
    }

    /// Truncates exactly one trailing argument; fails at the arity floor
    /// and leaves the tree untouched.
    pub fn remove_argument(&mut self, id: NodeId) -> bool {
        if !self.arena[id].is_operator() {
            return false;
        }
        let entry = self.lookup_operator(id);
        let count = self.arena.child_count(id);
        if count <= entry.min {
            return false;
        }
        let last = self.arena.last_child_of(id).expect("count is positive");
        self.arena.detach_and_free(last, false);
        true
    }

    /// Frees the whole argument subtree and resynthesizes a fresh
    /// minimum-arity argument list.
    pub fn reset_to_defaults(&mut self, id: NodeId) -> bool {
        if !self.arena[id].is_operator() {
            return false;
        }
        let entry = self.lookup_operator(id);
        debug!(?id, operator = %entry.name, "reset arguments to defaults");
        if let Some(first) = self.arena.first_child_of(id) {
            self.arena.detach_and_free(first, true);
        }
        for position in 0..entry.min {
            let argument = self.synthesize(entry.arg_format(position), 0);
            self.arena.append_as_child(id, argument);
        }
        true
    }

    /// Appends a named operator (with its minimum arguments synthesized)
    /// as a new trailing argument of `id`.
    pub fn add_operator(&mut self, id: NodeId, name: &str) -> bool {
        if !self.enabled(EditAction::AddOperator, NodeRef::Real(id)) {
            return false;
        }
        let catalogs = self.catalogs;
        let Some(entry) = catalogs.operators.lookup(name) else {
            return false;
        };
        let child = self.arena.allocate(None, None);
        self.arena.set_node(child, NodeKind::Operator, &entry.name);
        for position in 0..entry.min {
            let argument = self.synthesize(entry.arg_format(position), 1);
            self.arena.append_as_child(child, argument);
        }
        self.arena.append_as_child(id, child);
        true
    }

    /// Appends a data node, typed for the slot, as a new trailing
    /// argument of `id`.
    pub fn add_data(&mut self, id: NodeId, text: &str) -> bool {
        if !self.enabled(EditAction::AddData, NodeRef::Real(id)) {
            return false;
        }
        let format = self
            .next_slot_format(id)
            .expect("enablement guarantees an open slot");
        let kind = if format.is_pure_numeric() {
            NodeKind::Number
        } else {
            NodeKind::String
        };
        let child = self.arena.allocate(None, None);
        self.arena.set_node(child, kind, text);
        self.arena.append_as_child(id, child);
        true
    }

    // === internals ===

    /// Replaces `old` with `new` at `old`'s tree position. A root
    /// participates in no sibling chain, so the root case is simply "no
    /// sibling surgery": both nodes end up as roots and the caller keeps
    /// the one it wants.
    fn splice(&mut self, old: NodeId, new: NodeId) {
        debug_assert!(self.arena[new].is_root(), "splice target must be detached");
        if let Some(parent) = self.arena.parent_of(old) {
            let before = self.arena.prev_sibling_of(old);
            self.arena.detach(old);
            self.arena.insert_child(parent, new, before);
        }
    }

    /// Builds a detached default argument for `format` via the resolver;
    /// operator defaults recurse into their own minimum arguments.
    fn synthesize(&mut self, format: OpfFormat, depth: usize) -> NodeId {
        let catalogs = self.catalogs;
        match self.resolver().default_candidate(format) {
            Candidate::Data {
                kind,
                text,
                variable,
            } => {
                let id = self.arena.allocate(None, None);
                self.arena.set_node(id, kind, &text);
                if variable {
                    self.arena[id].flags.variable = true;
                    self.arena[id].style.combined = true;
                    self.arena[id].style.editable = false;
                }
                id
            }
            Candidate::Operator { name, .. } => {
                let id = self.arena.allocate(None, None);
                self.arena.set_node(id, NodeKind::Operator, &name);
                if depth < MAX_FILL_DEPTH
                    && let Some(entry) = catalogs.operators.lookup(&name)
                {
                    for position in 0..entry.min {
                        let argument = self.synthesize(entry.arg_format(position), depth + 1);
                        self.arena.append_as_child(id, argument);
                    }
                }
                id
            }
        }
    }
}
