//! `msexp-edit` is the command layer of the mission SEXP editor: per-node
//! enablement of structural edits (overridable by the embedding host)
//! and the mutations themselves, built on the arena in [`msexp_tree`]
//! and the candidate resolver in [`msexp_opf`].
//!
//! ## Examples
//!
//! ```
//! use msexp_edit::{EditAction, NodeRef, SexpEditor};
//! use msexp_opf::MissionCatalogs;
//! use msexp_tree::NodeKind;
//!
//! let catalogs = MissionCatalogs::sample();
//! let mut editor = SexpEditor::new(&catalogs);
//!
//! let root = editor.arena_mut().allocate(None, None);
//! editor.arena_mut().set_node(root, NodeKind::Operator, "when");
//! editor.reset_to_defaults(root);
//!
//! // the root itself is protected
//! assert!(!editor.enabled(EditAction::Delete, NodeRef::Real(root)));
//! assert_eq!(editor.arena().child_count(root), 2);
//! ```

mod action;
mod clipboard;
mod editor;
mod enablement;

pub use action::{EditAction, EnablementHook, NodeRef};
pub use clipboard::Clipboard;
pub use editor::{NEGATION_OPERATOR, SexpEditor};
