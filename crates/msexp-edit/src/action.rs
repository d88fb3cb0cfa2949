use msexp_tree::NodeId;

/// Structural edits whose per-node enablement hosts query before showing
/// a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditAction {
    EditText,
    Delete,
    Cut,
    Copy,
    PasteOverwrite,
    AddOperator,
    AddData,
    PasteAdd,
    MoveUp,
    MoveDown,
}

/// Classification of the node an action targets.
///
/// `SyntheticRoot` labels a host-drawn wrapper row with no arena node
/// behind it; every computed enablement for it is `false`, and only a
/// host hook can turn one on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef {
    SyntheticRoot,
    Real(NodeId),
}

impl NodeRef {
    pub fn node(self) -> Option<NodeId> {
        match self {
            NodeRef::SyntheticRoot => None,
            NodeRef::Real(id) => Some(id),
        }
    }
}

/// Host override consulted after the computed enablement: an embedding
/// editor can force-enable or force-disable a specific action on a
/// specific node (e.g. permit deleting an otherwise-protected synthetic
/// root in one host but not another).
pub trait EnablementHook {
    fn override_enabled(&self, action: EditAction, node: NodeRef, computed: bool) -> bool;
}

impl<F> EnablementHook for F
where
    F: Fn(EditAction, NodeRef, bool) -> bool,
{
    fn override_enabled(&self, action: EditAction, node: NodeRef, computed: bool) -> bool {
        self(action, node, computed)
    }
}
