//! Listers over the operator table: operators filtered by return type.

use crate::candidates::{Candidate, CandidateList};
use crate::operators::{OpReturn, OperatorTable};

/// Operators whose return type is in `returns`, in table order.
pub fn operators_returning(table: &OperatorTable, returns: &[OpReturn]) -> CandidateList {
    table
        .entries()
        .iter()
        .filter(|entry| returns.contains(&entry.returns))
        .map(|entry| Candidate::operator(&entry.name, entry.returns))
        .collect()
}

pub fn bool_operators(table: &OperatorTable) -> CandidateList {
    operators_returning(table, &[OpReturn::Bool])
}

pub fn number_operators(table: &OperatorTable) -> CandidateList {
    operators_returning(table, &[OpReturn::Number, OpReturn::Positive])
}

pub fn action_operators(table: &OperatorTable) -> CandidateList {
    operators_returning(table, &[OpReturn::Null])
}

pub fn ai_goal_operators(table: &OperatorTable) -> CandidateList {
    operators_returning(table, &[OpReturn::AiGoal])
}

pub fn flexible_argument_operators(table: &OperatorTable) -> CandidateList {
    operators_returning(table, &[OpReturn::FlexibleArgument])
}
