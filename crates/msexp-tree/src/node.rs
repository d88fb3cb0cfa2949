use std::fmt;

#[cfg(feature = "pool-json")]
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

slotmap::new_key_type! {
    /// Generation-tagged handle to a node stored in a [`SexpArena`].
    ///
    /// A handle to a freed slot misses on [`SexpArena::get`] and panics on
    /// indexing rather than silently aliasing a recycled node.
    ///
    /// [`SexpArena`]: crate::SexpArena
    /// [`SexpArena::get`]: crate::SexpArena::get
    pub struct NodeId;
}

/// Base kind of a SEXP tree node.
#[cfg_attr(feature = "pool-json", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Operator,
    Number,
    String,
    ContainerName,
    ContainerData,
}

impl NodeKind {
    /// Maximum text length for this kind.
    ///
    /// `Number` and `String` are sized so a `name(value)` variable display
    /// always fits.
    pub const fn max_text_len(self) -> usize {
        match self {
            NodeKind::Operator => 32,
            NodeKind::Number => 66,
            NodeKind::String => 128,
            NodeKind::ContainerName | NodeKind::ContainerData => 64,
        }
    }

    #[inline(always)]
    pub fn is_operator(self) -> bool {
        matches!(self, NodeKind::Operator)
    }

    #[inline(always)]
    pub fn is_container(self) -> bool {
        matches!(self, NodeKind::ContainerName | NodeKind::ContainerData)
    }

    /// Literal data kinds, as opposed to operators.
    #[inline(always)]
    pub fn is_data(self) -> bool {
        !self.is_operator()
    }
}

/// Attributes orthogonal to [`NodeKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeFlags {
    /// The node's text is a `name(value)` display of a session variable.
    pub variable: bool,
    /// The node indexes/keys into a container rather than being an
    /// ordinary argument.
    pub modifier: bool,
}

/// Host-facing editing/display style of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeStyle {
    /// Text may be edited in place.
    pub editable: bool,
    /// Rendered combined with its value, as variable displays are.
    pub combined: bool,
    /// Participates in operand-style display.
    pub operand: bool,
}

impl NodeStyle {
    /// Default style for a freshly created node of `kind`.
    pub fn for_kind(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Operator => Self {
                operand: true,
                ..Self::default()
            },
            _ => Self {
                editable: true,
                ..Self::default()
            },
        }
    }
}

/// A single node of the SEXP tree.
///
/// Structural links are arena handles; a `None` parent marks a root.
#[derive(Debug, Clone, PartialEq)]
pub struct SexpNode {
    pub kind: NodeKind,
    pub flags: NodeFlags,
    pub style: NodeStyle,
    pub text: SmolStr,
    pub parent: Option<NodeId>,
    pub first_child: Option<NodeId>,
    pub next_sibling: Option<NodeId>,
}

impl SexpNode {
    pub fn new(kind: NodeKind, text: &str) -> Self {
        Self {
            kind,
            flags: NodeFlags::default(),
            style: NodeStyle::for_kind(kind),
            text: clamp_text(kind, text),
            parent: None,
            first_child: None,
            next_sibling: None,
        }
    }

    #[inline(always)]
    pub fn is_operator(&self) -> bool {
        self.kind.is_operator()
    }

    #[inline(always)]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    #[inline(always)]
    pub fn is_modifier(&self) -> bool {
        self.flags.modifier
    }

    #[inline(always)]
    pub fn is_variable(&self) -> bool {
        self.flags.variable
    }
}

impl fmt::Display for SexpNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NodeKind::String if !self.flags.variable => write!(f, "\"{}\"", self.text),
            _ => write!(f, "{}", self.text),
        }
    }
}

/// Truncates `text` to the kind's cap on a char boundary.
pub(crate) fn clamp_text(kind: NodeKind, text: &str) -> SmolStr {
    let max = kind.max_text_len();
    if text.len() <= max {
        return SmolStr::from(text);
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    SmolStr::from(&text[..end])
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(NodeKind::Operator, true, false)]
    #[case(NodeKind::Number, false, true)]
    #[case(NodeKind::String, false, true)]
    #[case(NodeKind::ContainerName, false, true)]
    #[case(NodeKind::ContainerData, false, true)]
    fn test_kind_predicates(
        #[case] kind: NodeKind,
        #[case] operator: bool,
        #[case] data: bool,
    ) {
        assert_eq!(kind.is_operator(), operator);
        assert_eq!(kind.is_data(), data);
    }

    #[test]
    fn test_default_style() {
        let op = SexpNode::new(NodeKind::Operator, "and");
        assert!(op.style.operand);
        assert!(!op.style.editable);

        let num = SexpNode::new(NodeKind::Number, "5");
        assert!(num.style.editable);
        assert!(!num.style.operand);
    }

    #[test]
    fn test_clamp_text_ascii() {
        let long = "x".repeat(100);
        let node = SexpNode::new(NodeKind::Operator, &long);
        assert_eq!(node.text.len(), NodeKind::Operator.max_text_len());
    }

    #[test]
    fn test_clamp_text_char_boundary() {
        let text = format!("{}é", "x".repeat(31));
        let clamped = clamp_text(NodeKind::Operator, &text);
        assert_eq!(clamped.as_str(), "x".repeat(31));
    }

    #[test]
    fn test_variable_display_fits_number_cap() {
        let display = format!("{}({})", "n".repeat(32), "v".repeat(32));
        assert!(display.len() <= NodeKind::Number.max_text_len());
    }
}
