//! Pure candidate sub-builders.
//!
//! Each function reads exactly one read-only catalog (a fixed table being
//! the degenerate case) and returns an ordered [`CandidateList`]; the
//! resolver composes and de-duplicates them. Every builder is testable
//! against a catalog snapshot alone.

pub mod assets;
pub mod entities;
pub mod logic;
pub mod mission;

use msexp_tree::NodeKind;
use smol_str::SmolStr;

use crate::candidates::{Candidate, CandidateList};

/// Catalog order is the candidate order.
pub(crate) fn name_candidates(names: &[SmolStr]) -> CandidateList {
    names
        .iter()
        .map(|name| Candidate::data(NodeKind::String, name))
        .collect()
}

pub(crate) fn fixed_candidates(names: &[&str]) -> CandidateList {
    names
        .iter()
        .map(|name| Candidate::data(NodeKind::String, name))
        .collect()
}
