use itertools::Itertools;
use msexp_tree::NodeKind;
use smol_str::SmolStr;

use crate::operators::OpReturn;

/// Sentinel text for the contextual-argument candidate.
pub const ARGUMENT_SENTINEL: &str = "<argument>";

/// One way to fill an argument slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Candidate {
    /// Insert an operator subtree with the given return type.
    Operator { name: SmolStr, returns: OpReturn },
    /// Insert this literal/name token.
    Data {
        kind: NodeKind,
        text: SmolStr,
        /// The text is a `name(value)` variable display; the inserted
        /// node gets the variable flag.
        variable: bool,
    },
}

impl Candidate {
    pub fn data(kind: NodeKind, text: &str) -> Self {
        Candidate::Data {
            kind,
            text: SmolStr::from(text),
            variable: false,
        }
    }

    pub fn operator(name: &str, returns: OpReturn) -> Self {
        Candidate::Operator {
            name: SmolStr::from(name),
            returns,
        }
    }

    /// The contextual-argument sentinel.
    pub fn argument_sentinel() -> Self {
        Candidate::data(NodeKind::String, ARGUMENT_SENTINEL)
    }

    pub fn text(&self) -> &str {
        match self {
            Candidate::Operator { name, .. } => name,
            Candidate::Data { text, .. } => text,
        }
    }

    #[inline(always)]
    pub fn is_operator(&self) -> bool {
        matches!(self, Candidate::Operator { .. })
    }

    #[inline(always)]
    pub fn is_data(&self) -> bool {
        !self.is_operator()
    }
}

/// An ordered candidate sequence. Order is significant: it is the menu
/// order hosts present, stable for identical resolver inputs.
pub type CandidateList = Vec<Candidate>;

/// Suppresses case-insensitive duplicates, keeping the first occurrence.
///
/// Operators and data entries are de-duplicated separately: a literal
/// named like an operator is not a duplicate of it.
pub fn dedup_candidates(candidates: CandidateList) -> CandidateList {
    candidates
        .into_iter()
        .unique_by(|candidate| (candidate.is_operator(), candidate.text().to_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_is_case_insensitive_and_order_preserving() {
        let list = vec![
            Candidate::data(NodeKind::String, "Alpha 1"),
            Candidate::data(NodeKind::String, "Beta 2"),
            Candidate::data(NodeKind::String, "ALPHA 1"),
        ];
        let deduped = dedup_candidates(list);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].text(), "Alpha 1");
        assert_eq!(deduped[1].text(), "Beta 2");
    }

    #[test]
    fn test_operator_and_data_do_not_collapse() {
        let list = vec![
            Candidate::operator("true", OpReturn::Bool),
            Candidate::data(NodeKind::String, "true"),
        ];
        assert_eq!(dedup_candidates(list).len(), 2);
    }
}
