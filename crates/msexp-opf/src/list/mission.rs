//! Listers over mission-level catalogs: messages, named goals and
//! events, variables and containers.

use msexp_tree::{NodeKind, VariableKind, VariableTable, variable_display};
use smol_str::SmolStr;

use crate::candidates::{Candidate, CandidateList};
use crate::catalog::ShipEntry;
use crate::containers::{ContainerEntry, ContainerKind, ContainerTable, MODIFIER_MARKERS};

use super::{fixed_candidates, name_candidates};

pub const COMMAND_SENDER: &str = "#Command";
pub const ANY_WINGMAN_SENDER: &str = "<any wingman>";

pub fn messages(names: &[SmolStr]) -> CandidateList {
    name_candidates(names)
}

/// Message senders: the special senders, then every ship with a persona.
pub fn message_senders(ships: &[ShipEntry]) -> CandidateList {
    let mut list = fixed_candidates(&[COMMAND_SENDER, ANY_WINGMAN_SENDER]);
    list.extend(
        ships
            .iter()
            .filter(|ship| ship.persona.is_some())
            .map(|ship| Candidate::data(NodeKind::String, &ship.name)),
    );
    list
}

pub fn message_priorities() -> CandidateList {
    fixed_candidates(&["High", "Normal", "Low"])
}

pub fn mission_names(names: &[SmolStr]) -> CandidateList {
    name_candidates(names)
}

pub fn goal_names(names: &[SmolStr]) -> CandidateList {
    name_candidates(names)
}

pub fn event_names(names: &[SmolStr]) -> CandidateList {
    name_candidates(names)
}

pub fn keypresses(names: &[SmolStr]) -> CandidateList {
    name_candidates(names)
}

pub fn medals(names: &[SmolStr]) -> CandidateList {
    name_candidates(names)
}

pub fn cargo_types(names: &[SmolStr]) -> CandidateList {
    name_candidates(names)
}

pub fn personas(names: &[SmolStr]) -> CandidateList {
    name_candidates(names)
}

pub fn intel_entries(names: &[SmolStr]) -> CandidateList {
    name_candidates(names)
}

pub fn skill_levels() -> CandidateList {
    fixed_candidates(&["Very Easy", "Easy", "Medium", "Hard", "Insane"])
}

pub fn arrival_locations() -> CandidateList {
    fixed_candidates(&["Hyperspace", "Near Ship", "In Front of Ship", "Docking Bay"])
}

pub fn departure_locations() -> CandidateList {
    fixed_candidates(&["Hyperspace", "Docking Bay"])
}

/// Arrival anchors: the wildcard anchors, then every ship.
pub fn arrival_anchors(ships: &[ShipEntry]) -> CandidateList {
    let mut list = fixed_candidates(&["<any friendly>", "<any hostile>"]);
    list.extend(
        ships
            .iter()
            .map(|ship| Candidate::data(NodeKind::String, &ship.name)),
    );
    list
}

/// Session variables, presented in `name(value)` display form.
pub fn variables(table: &VariableTable) -> CandidateList {
    table
        .entries()
        .iter()
        .map(|variable| Candidate::Data {
            kind: match variable.kind {
                VariableKind::Number => NodeKind::Number,
                VariableKind::String => NodeKind::String,
            },
            text: variable_display(&variable.name, &variable.value),
            variable: true,
        })
        .collect()
}

pub fn number_variables(table: &VariableTable) -> CandidateList {
    variables_of_kind(table, VariableKind::Number)
}

pub fn string_variables(table: &VariableTable) -> CandidateList {
    variables_of_kind(table, VariableKind::String)
}

fn variables_of_kind(table: &VariableTable, kind: VariableKind) -> CandidateList {
    table
        .entries()
        .iter()
        .filter(|variable| variable.kind == kind)
        .map(|variable| Candidate::Data {
            kind: match kind {
                VariableKind::Number => NodeKind::Number,
                VariableKind::String => NodeKind::String,
            },
            text: variable_display(&variable.name, &variable.value),
            variable: true,
        })
        .collect()
}

pub fn containers(table: &ContainerTable) -> CandidateList {
    table
        .entries()
        .iter()
        .map(|entry| Candidate::data(NodeKind::ContainerName, &entry.name))
        .collect()
}

pub fn list_containers(table: &ContainerTable) -> CandidateList {
    containers_of_kind(table, ContainerKind::List)
}

pub fn map_containers(table: &ContainerTable) -> CandidateList {
    containers_of_kind(table, ContainerKind::Map)
}

fn containers_of_kind(table: &ContainerTable, kind: ContainerKind) -> CandidateList {
    table
        .entries()
        .iter()
        .filter(|entry| entry.kind == kind)
        .map(|entry| Candidate::data(NodeKind::ContainerName, &entry.name))
        .collect()
}

/// The fixed modifier markers, offered in a container-data node's first
/// child slot.
pub fn modifier_markers() -> CandidateList {
    MODIFIER_MARKERS
        .iter()
        .map(|marker| Candidate::data(NodeKind::String, marker.name))
        .collect()
}

/// Known keys of a map container, offered alongside the markers.
pub fn map_keys(entry: &ContainerEntry) -> CandidateList {
    name_candidates(&entry.keys)
}
