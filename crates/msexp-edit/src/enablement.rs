//! Pure per-node enablement rules, expressed through arity bounds,
//! slot-format vs clipboard compatibility, and structural position.

use msexp_opf::{OpReturn, OperatorEntry, OpfFormat};
use msexp_tree::{NodeId, NodeKind, Subtree};

use crate::action::{EditAction, NodeRef};
use crate::editor::SexpEditor;

impl<'a> SexpEditor<'a> {
    /// Final enablement: the computed rule, overridable by the host hook.
    pub fn enabled(&self, action: EditAction, node: NodeRef) -> bool {
        let computed = self.computed_enabled(action, node);
        match self.hook() {
            Some(hook) => hook.override_enabled(action, node, computed),
            None => computed,
        }
    }

    /// The computed rule alone. A `SyntheticRoot` has no arena node, so
    /// everything computes to `false` for it.
    pub fn computed_enabled(&self, action: EditAction, node: NodeRef) -> bool {
        let Some(id) = node.node() else {
            return false;
        };
        match action {
            EditAction::EditText => self.arena()[id].style.editable,
            EditAction::Delete | EditAction::Cut => self.can_delete(id),
            EditAction::Copy => true,
            EditAction::PasteOverwrite => self.can_paste_overwrite(id),
            EditAction::PasteAdd => self.can_paste_add(id),
            EditAction::AddOperator => self.can_add(id, OpfFormat::admits_operators),
            EditAction::AddData => self.can_add(id, OpfFormat::admits_data),
            EditAction::MoveUp => self.arena().prev_sibling_of(id).is_some(),
            EditAction::MoveDown => {
                self.arena().parent_of(id).is_some()
                    && self.arena().next_sibling_of(id).is_some()
            }
        }
    }

    /// A root cannot be deleted; a container-data node's first child is a
    /// protected index/key modifier; an argument at or below the parent
    /// operator's minimum cannot be deleted.
    fn can_delete(&self, id: NodeId) -> bool {
        let Some(parent) = self.arena().parent_of(id) else {
            return false;
        };
        let parent_node = &self.arena()[parent];
        if parent_node.kind == NodeKind::ContainerData
            && self.arena().position_of(id) == Some(0)
        {
            return false;
        }
        if parent_node.is_operator() {
            let entry = self.lookup_operator(parent);
            if self.arena().child_count(parent) <= entry.min {
                return false;
            }
        }
        true
    }

    fn can_paste_overwrite(&self, id: NodeId) -> bool {
        let Some(snapshot) = self.clipboard().get() else {
            return false;
        };
        let Some(format) = self.slot_format(id) else {
            return false;
        };
        self.subtree_fits(format, snapshot)
    }

    fn can_paste_add(&self, id: NodeId) -> bool {
        let Some(snapshot) = self.clipboard().get() else {
            return false;
        };
        self.can_add(id, |format| self.subtree_fits(format, snapshot))
    }

    fn can_add(&self, id: NodeId, slot_admits: impl Fn(OpfFormat) -> bool) -> bool {
        let node = &self.arena()[id];
        match node.kind {
            NodeKind::Operator => {
                let entry = self.lookup_operator(id);
                let count = self.arena().child_count(id);
                if let Some(max) = entry.max
                    && count >= max
                {
                    return false;
                }
                slot_admits(entry.arg_format(count))
            }
            NodeKind::ContainerData => self
                .next_slot_format(id)
                .is_some_and(slot_admits),
            _ => false,
        }
    }

    /// Expected format of the slot `id` currently occupies. A root slot
    /// expects a boolean trigger; the protected modifier slot of a
    /// container-data node reports `None`.
    pub fn slot_format(&self, id: NodeId) -> Option<OpfFormat> {
        let Some(parent) = self.arena().parent_of(id) else {
            return Some(OpfFormat::Bool);
        };
        let parent_node = &self.arena()[parent];
        match parent_node.kind {
            NodeKind::Operator => {
                let entry = self.lookup_operator(parent);
                let position = self
                    .arena()
                    .position_of(id)
                    .expect("a linked child has a position");
                Some(entry.arg_format(position))
            }
            NodeKind::ContainerData => match self.arena().position_of(id) {
                Some(0) => None,
                _ => Some(OpfFormat::Ambiguous),
            },
            _ => None,
        }
    }

    /// Expected format of the next appended argument below `id`.
    pub fn next_slot_format(&self, id: NodeId) -> Option<OpfFormat> {
        let node = &self.arena()[id];
        match node.kind {
            NodeKind::Operator => {
                let entry = self.lookup_operator(id);
                Some(entry.arg_format(self.arena().child_count(id)))
            }
            NodeKind::ContainerData => {
                if self.arena().first_child_of(id).is_none() {
                    // the first slot takes a modifier marker or map key
                    Some(OpfFormat::StringText)
                } else {
                    Some(OpfFormat::Ambiguous)
                }
            }
            _ => None,
        }
    }

    /// Whether a clipboard subtree fits a slot format: operator roots
    /// match on return type, data roots on payload kind. An operator
    /// missing from the catalog (a clipboard from other tables) never
    /// fits.
    pub fn subtree_fits(&self, format: OpfFormat, snapshot: &Subtree) -> bool {
        match snapshot.kind {
            NodeKind::Operator => self
                .catalogs()
                .operators
                .lookup(&snapshot.text)
                .is_some_and(|entry| return_fits(format, entry.returns)),
            kind => data_kind_fits(format, kind),
        }
    }

    /// Operator-table lookup for a node whose kind claims `Operator`.
    ///
    /// # Panics
    ///
    /// Panics on a lookup miss: the tree was built against this catalog,
    /// a miss is a bug, not sanitizable input.
    pub(crate) fn lookup_operator(&self, id: NodeId) -> &'a OperatorEntry {
        let node = &self.arena()[id];
        debug_assert!(node.is_operator(), "operator lookup on a data node");
        self.catalogs()
            .operators
            .lookup(&node.text)
            .unwrap_or_else(|| panic!("operator `{}` missing from the catalog", node.text))
    }
}

fn return_fits(format: OpfFormat, returns: OpReturn) -> bool {
    match format {
        OpfFormat::Bool => returns == OpReturn::Bool,
        OpfFormat::Number | OpfFormat::PositiveNumber => {
            matches!(returns, OpReturn::Number | OpReturn::Positive)
        }
        OpfFormat::Null => returns == OpReturn::Null,
        OpfFormat::AiGoal => returns == OpReturn::AiGoal,
        OpfFormat::FlexibleArgument => returns == OpReturn::FlexibleArgument,
        OpfFormat::Anything | OpfFormat::Ambiguous => true,
        _ => false,
    }
}

fn data_kind_fits(format: OpfFormat, kind: NodeKind) -> bool {
    if !format.admits_data() {
        return false;
    }
    match kind {
        NodeKind::Number => {
            format.is_pure_numeric()
                || matches!(format, OpfFormat::Anything | OpfFormat::Ambiguous)
        }
        NodeKind::String => !format.is_pure_numeric(),
        NodeKind::ContainerName => matches!(
            format,
            OpfFormat::ContainerName
                | OpfFormat::ListContainer
                | OpfFormat::MapContainer
                | OpfFormat::Anything
                | OpfFormat::Ambiguous
        ),
        // a container-data node stands for the value it yields
        NodeKind::ContainerData => true,
        NodeKind::Operator => false,
    }
}

#[cfg(test)]
mod tests {
    use msexp_opf::MissionCatalogs;
    use rstest::rstest;

    use super::*;

    fn op(editor: &mut SexpEditor, parent: Option<NodeId>, name: &str) -> NodeId {
        let id = editor.arena_mut().allocate(parent, None);
        editor.arena_mut().set_node(id, NodeKind::Operator, name);
        id
    }

    fn data(editor: &mut SexpEditor, parent: NodeId, kind: NodeKind, text: &str) -> NodeId {
        let id = editor.arena_mut().allocate(Some(parent), None);
        editor.arena_mut().set_node(id, kind, text);
        id
    }

    /// `(when (has-docked-delay "Alpha 1" "Cargo 1" 5) (do-nothing))`
    fn docking_editor(catalogs: &MissionCatalogs) -> (SexpEditor<'_>, NodeId, NodeId) {
        let mut editor = SexpEditor::new(catalogs);
        let root = op(&mut editor, None, "when");
        let cond = op(&mut editor, Some(root), "has-docked-delay");
        data(&mut editor, cond, NodeKind::String, "Alpha 1");
        data(&mut editor, cond, NodeKind::String, "Cargo 1");
        data(&mut editor, cond, NodeKind::Number, "5");
        op(&mut editor, Some(root), "do-nothing");
        (editor, root, cond)
    }

    #[rstest]
    #[case(EditAction::Delete)]
    #[case(EditAction::Copy)]
    #[case(EditAction::MoveUp)]
    #[case(EditAction::EditText)]
    fn test_synthetic_root_computes_false(#[case] action: EditAction) {
        let catalogs = MissionCatalogs::sample();
        let editor = SexpEditor::new(&catalogs);
        assert!(!editor.enabled(action, NodeRef::SyntheticRoot));
    }

    #[test]
    fn test_hook_can_force_enable_synthetic_root() {
        let catalogs = MissionCatalogs::sample();
        let mut editor = SexpEditor::new(&catalogs);
        editor.set_hook(Box::new(|action: EditAction, node: NodeRef, computed: bool| {
            if action == EditAction::Delete && node == NodeRef::SyntheticRoot {
                true
            } else {
                computed
            }
        }));

        assert!(editor.enabled(EditAction::Delete, NodeRef::SyntheticRoot));
        assert!(!editor.enabled(EditAction::Copy, NodeRef::SyntheticRoot));
    }

    #[test]
    fn test_edit_text_follows_editable_style() {
        let catalogs = MissionCatalogs::sample();
        let (editor, root, cond) = docking_editor(&catalogs);
        let ship = editor.arena().first_child_of(cond).unwrap();

        assert!(editor.enabled(EditAction::EditText, NodeRef::Real(ship)));
        assert!(!editor.enabled(EditAction::EditText, NodeRef::Real(root)));
    }

    #[test]
    fn test_root_cannot_be_deleted_or_moved() {
        let catalogs = MissionCatalogs::sample();
        let (editor, root, _) = docking_editor(&catalogs);

        assert!(!editor.enabled(EditAction::Delete, NodeRef::Real(root)));
        assert!(!editor.enabled(EditAction::MoveUp, NodeRef::Real(root)));
        assert!(!editor.enabled(EditAction::MoveDown, NodeRef::Real(root)));
    }

    #[test]
    fn test_argument_at_minimum_cannot_be_deleted() {
        let catalogs = MissionCatalogs::sample();
        let (editor, root, cond) = docking_editor(&catalogs);

        // when holds exactly its minimum of two arguments
        assert!(!editor.enabled(EditAction::Delete, NodeRef::Real(cond)));

        // has-docked-delay is at min 3 of max 4: its args are protected too
        let ship = editor.arena().first_child_of(cond).unwrap();
        assert!(!editor.enabled(EditAction::Delete, NodeRef::Real(ship)));
        let _ = root;
    }

    #[test]
    fn test_argument_above_minimum_can_be_deleted() {
        let catalogs = MissionCatalogs::sample();
        let (mut editor, root, _) = docking_editor(&catalogs);
        let extra = op(&mut editor, Some(root), "do-nothing");

        assert!(editor.enabled(EditAction::Delete, NodeRef::Real(extra)));
    }

    #[test]
    fn test_container_first_modifier_is_protected() {
        let catalogs = MissionCatalogs::sample();
        let mut editor = SexpEditor::new(&catalogs);
        let root = op(&mut editor, None, "when");
        let container = data(&mut editor, root, NodeKind::ContainerData, "Convoy Ships");
        let first = data(&mut editor, container, NodeKind::String, "at-index");
        let second = data(&mut editor, container, NodeKind::Number, "2");

        assert!(!editor.enabled(EditAction::Delete, NodeRef::Real(first)));
        assert!(editor.enabled(EditAction::Delete, NodeRef::Real(second)));
    }

    #[test]
    fn test_move_enablement_at_chain_edges() {
        let catalogs = MissionCatalogs::sample();
        let (editor, root, cond) = docking_editor(&catalogs);
        let action = editor.arena().next_sibling_of(cond).unwrap();

        assert!(!editor.enabled(EditAction::MoveUp, NodeRef::Real(cond)));
        assert!(editor.enabled(EditAction::MoveDown, NodeRef::Real(cond)));
        assert!(editor.enabled(EditAction::MoveUp, NodeRef::Real(action)));
        assert!(!editor.enabled(EditAction::MoveDown, NodeRef::Real(action)));
        let _ = root;
    }

    #[test]
    fn test_paste_requires_clipboard_and_type_fit() {
        let catalogs = MissionCatalogs::sample();
        let (mut editor, root, cond) = docking_editor(&catalogs);

        // nothing on the clipboard yet
        assert!(!editor.enabled(EditAction::PasteOverwrite, NodeRef::Real(cond)));

        // a boolean subtree fits the bool condition slot of `when`
        assert!(editor.copy(cond));
        assert!(editor.enabled(EditAction::PasteOverwrite, NodeRef::Real(cond)));

        // but not a numeric leaf slot
        let delay = editor.arena().child_at(cond, 2).unwrap();
        assert!(!editor.enabled(EditAction::PasteOverwrite, NodeRef::Real(delay)));
        let _ = root;
    }

    #[test]
    fn test_paste_add_checks_arity_and_type() {
        let catalogs = MissionCatalogs::sample();
        let (mut editor, root, cond) = docking_editor(&catalogs);

        // has-docked-delay's fourth slot takes a positive number
        let delay = editor.arena().child_at(cond, 2).unwrap();
        assert!(editor.copy(delay));
        assert!(editor.enabled(EditAction::PasteAdd, NodeRef::Real(cond)));

        // when's trailing slots take actions, a number does not fit
        assert!(!editor.enabled(EditAction::PasteAdd, NodeRef::Real(root)));

        // at max arity nothing can be added
        assert!(editor.paste_add(cond));
        assert!(!editor.enabled(EditAction::PasteAdd, NodeRef::Real(cond)));
    }

    #[test]
    fn test_add_enablement_respects_slot_class() {
        let catalogs = MissionCatalogs::sample();
        let (editor, root, cond) = docking_editor(&catalogs);

        // when's next slot is an action slot: operators yes, data no
        assert!(editor.enabled(EditAction::AddOperator, NodeRef::Real(root)));
        assert!(!editor.enabled(EditAction::AddData, NodeRef::Real(root)));

        // has-docked-delay's fourth slot is numeric data
        assert!(editor.enabled(EditAction::AddData, NodeRef::Real(cond)));
    }

    #[test]
    fn test_slot_format_for_root_is_bool() {
        let catalogs = MissionCatalogs::sample();
        let (editor, root, cond) = docking_editor(&catalogs);

        assert_eq!(editor.slot_format(root), Some(OpfFormat::Bool));
        assert_eq!(editor.slot_format(cond), Some(OpfFormat::Bool));
    }

    #[rstest]
    #[case(OpfFormat::Bool, NodeKind::String, false)]
    #[case(OpfFormat::Number, NodeKind::Number, true)]
    #[case(OpfFormat::Number, NodeKind::String, false)]
    #[case(OpfFormat::Ship, NodeKind::String, true)]
    #[case(OpfFormat::Null, NodeKind::String, false)]
    #[case(OpfFormat::Ambiguous, NodeKind::Number, true)]
    fn test_data_kind_fits(
        #[case] format: OpfFormat,
        #[case] kind: NodeKind,
        #[case] expected: bool,
    ) {
        assert_eq!(data_kind_fits(format, kind), expected);
    }
}
