//! Conversion between the arena's linked form and the flat Pool encoding.
//!
//! `List` tokens are transparent on load: their contents become direct
//! children of the current target parent. An `Operator` atom terminates
//! its chain — the atom's `rest` is its argument list — which is why
//! [`save`] re-wraps every non-root operator subtree in a synthetic
//! `List` token (the top-level operator itself is never wrapped).
//!
//! Round-trips are lossless for Operator/Number/String trees. Variable
//! nodes rehydrate through the *current* [`VariableTable`] value, so a
//! table change between save and load changes the display text (the
//! documented lossy edge). Container nodes round-trip structurally.

use crate::arena::SexpArena;
use crate::node::{NodeId, NodeKind};
use crate::pool::{AtomSubtype, PoolToken, TokenId, TokenKind, TokenPool};
use crate::variables::{VariableTable, split_variable_display, variable_display};

/// Rebuilds an arena tree from the Pool encoding, returning the new root.
///
/// Old mission files store a bare `Number` atom at the document root; it
/// is coerced to the boolean operator `true` (non-zero) or `false` (zero
/// or unparsable), not a literal node.
///
/// # Panics
///
/// Panics on malformed pool data: a `List` or non-operator atom at the
/// root, or a variable-flagged atom naming an unknown session variable.
/// A loaded pool is previously-validated state; violations are bugs.
pub fn load(
    pool: &TokenPool,
    root: TokenId,
    vars: &VariableTable,
    arena: &mut SexpArena,
) -> NodeId {
    let token = &pool[root];
    match (token.kind, token.subtype) {
        (TokenKind::Atom, AtomSubtype::Number) => {
            let truth = token.text.parse::<i64>().is_ok_and(|n| n != 0);
            let id = arena.allocate(None, None);
            arena.set_node(id, NodeKind::Operator, if truth { "true" } else { "false" });
            id
        }
        (TokenKind::Atom, AtomSubtype::Operator) => {
            let id = arena.allocate(None, None);
            arena.set_node(id, NodeKind::Operator, &token.text);
            load_chain(pool, token.rest, vars, arena, id);
            id
        }
        _ => panic!("malformed pool: document root must be an operator or numeric atom"),
    }
}

fn load_chain(
    pool: &TokenPool,
    chain: Option<TokenId>,
    vars: &VariableTable,
    arena: &mut SexpArena,
    parent: NodeId,
) {
    let mut at = chain;
    while let Some(token_id) = at {
        let token = &pool[token_id];
        match (token.kind, token.subtype) {
            (TokenKind::List, _) => {
                load_chain(pool, token.first, vars, arena, parent);
                at = token.rest;
            }
            (TokenKind::Atom, AtomSubtype::Operator) => {
                let id = arena.allocate(Some(parent), None);
                arena.set_node(id, NodeKind::Operator, &token.text);
                // the operator's rest chain is its argument list
                load_chain(pool, token.rest, vars, arena, id);
                return;
            }
            (TokenKind::Atom, AtomSubtype::ContainerData) => {
                let id = arena.allocate(Some(parent), None);
                arena.set_node(id, NodeKind::ContainerData, &token.text);
                load_chain(pool, token.first, vars, arena, id);
                for modifier in arena.children(id).collect::<Vec<_>>() {
                    arena[modifier].flags.modifier = true;
                }
                at = token.rest;
            }
            (TokenKind::Atom, subtype) => {
                let id = arena.allocate(Some(parent), None);
                let kind = node_kind(subtype);
                if token.variable {
                    let variable = vars.lookup(&token.text).unwrap_or_else(|| {
                        panic!("malformed pool: unknown session variable `{}`", token.text)
                    });
                    arena.set_node(id, kind, &variable_display(&token.text, &variable.value));
                    arena[id].flags.variable = true;
                    arena[id].style.combined = true;
                    arena[id].style.editable = false;
                } else {
                    arena.set_node(id, kind, &token.text);
                }
                at = token.rest;
            }
        }
    }
}

/// Serializes the subtree rooted at `root` into `pool`.
///
/// # Panics
///
/// Panics unless `root` is the arena's only root, has no trailing
/// sibling, and is an operator node; panics on a variable-flagged node
/// whose text is not in `name(value)` display form.
pub fn save(arena: &SexpArena, root: NodeId, pool: &mut TokenPool) -> TokenId {
    let node = &arena[root];
    assert!(node.parent.is_none(), "save: root has a parent");
    assert!(node.next_sibling.is_none(), "save: root has a trailing sibling");
    assert_eq!(arena.roots().count(), 1, "save: arena holds more than one root");
    assert!(node.is_operator(), "save: root must be an operator");

    let args = save_chain(arena, arena.first_child_of(root), pool);
    pool.alloc(PoolToken::atom(AtomSubtype::Operator, &node.text).with_rest(args))
}

/// Builds the token chain for a sibling run, right to left so every
/// `rest` link exists before its predecessor is allocated.
fn save_chain(arena: &SexpArena, first: Option<NodeId>, pool: &mut TokenPool) -> Option<TokenId> {
    let chain: Vec<NodeId> = arena.chain_from(first).collect();
    let mut rest = None;
    for &id in chain.iter().rev() {
        rest = Some(save_node(arena, id, pool, rest));
    }
    rest
}

fn save_node(
    arena: &SexpArena,
    id: NodeId,
    pool: &mut TokenPool,
    rest: Option<TokenId>,
) -> TokenId {
    let node = &arena[id];
    match node.kind {
        NodeKind::Operator => {
            let args = save_chain(arena, node.first_child, pool);
            let inner = pool.alloc(PoolToken::atom(AtomSubtype::Operator, &node.text).with_rest(args));
            pool.alloc(PoolToken::list(Some(inner)).with_rest(rest))
        }
        NodeKind::ContainerData => {
            let modifiers = save_chain(arena, node.first_child, pool);
            pool.alloc(
                PoolToken::atom(AtomSubtype::ContainerData, &node.text)
                    .with_first(modifiers)
                    .with_rest(rest),
            )
        }
        kind => {
            let subtype = atom_subtype(kind);
            if node.flags.variable {
                let (name, _) = split_variable_display(&node.text).unwrap_or_else(|| {
                    panic!("variable node text not in display form: `{}`", node.text)
                });
                pool.alloc(
                    PoolToken::atom(subtype, name)
                        .with_variable(true)
                        .with_rest(rest),
                )
            } else {
                pool.alloc(PoolToken::atom(subtype, &node.text).with_rest(rest))
            }
        }
    }
}

fn node_kind(subtype: AtomSubtype) -> NodeKind {
    match subtype {
        AtomSubtype::Operator => NodeKind::Operator,
        AtomSubtype::Number => NodeKind::Number,
        AtomSubtype::String => NodeKind::String,
        AtomSubtype::ContainerName => NodeKind::ContainerName,
        AtomSubtype::ContainerData => NodeKind::ContainerData,
    }
}

fn atom_subtype(kind: NodeKind) -> AtomSubtype {
    match kind {
        NodeKind::Operator => AtomSubtype::Operator,
        NodeKind::Number => AtomSubtype::Number,
        NodeKind::String => AtomSubtype::String,
        NodeKind::ContainerName => AtomSubtype::ContainerName,
        NodeKind::ContainerData => AtomSubtype::ContainerData,
    }
}
