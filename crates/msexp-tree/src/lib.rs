//! `msexp-tree` is the arena-backed SEXP tree at the core of the mission
//! authoring tools: a mutable, serializable n-ary tree of boolean
//! triggers and their data arguments.
//!
//! ## Examples
//!
//! ```
//! use msexp_tree::{NodeKind, SexpArena, TokenPool, VariableTable, codec};
//!
//! let mut arena = SexpArena::new();
//! let root = arena.allocate(None, None);
//! arena.set_node(root, NodeKind::Operator, "when");
//!
//! let arg = arena.allocate(Some(root), None);
//! arena.set_node(arg, NodeKind::Operator, "true");
//!
//! let mut pool = TokenPool::new();
//! let token = codec::save(&arena, root, &mut pool);
//!
//! let mut reloaded = SexpArena::new();
//! let new_root = codec::load(&pool, token, &VariableTable::default(), &mut reloaded);
//! assert_eq!(reloaded[new_root].text, "when");
//! ```

mod arena;
pub mod codec;
mod node;
mod pool;
pub mod render;
mod subtree;
mod variables;

pub use arena::{ChainIter, SexpArena};
pub use node::{NodeFlags, NodeId, NodeKind, NodeStyle, SexpNode};
pub use pool::{AtomSubtype, PoolToken, TokenId, TokenKind, TokenPool};
pub use subtree::Subtree;
pub use variables::{
    SexpVariable, VariableKind, VariableTable, split_variable_display, variable_display,
};
