//! Listers over the live mission entities: ships, wings, waypoints and
//! their subsystems and dock points.

use msexp_tree::NodeKind;
use smol_str::SmolStr;

use crate::candidates::{Candidate, CandidateList};
use crate::catalog::{ShipEntry, SubsystemKind, WaypointPathEntry, WingEntry};

use super::{fixed_candidates, name_candidates};

pub const NONE_SENTINEL: &str = "<none>";

pub fn ships(ships: &[ShipEntry]) -> CandidateList {
    ships
        .iter()
        .map(|ship| Candidate::data(NodeKind::String, &ship.name))
        .collect()
}

pub fn ships_not_player(ships: &[ShipEntry]) -> CandidateList {
    ships
        .iter()
        .filter(|ship| !ship.player_start)
        .map(|ship| Candidate::data(NodeKind::String, &ship.name))
        .collect()
}

pub fn ships_or_none(all: &[ShipEntry]) -> CandidateList {
    let mut list = vec![Candidate::data(NodeKind::String, NONE_SENTINEL)];
    list.extend(ships(all));
    list
}

pub fn ships_with_bay(ships: &[ShipEntry]) -> CandidateList {
    ships
        .iter()
        .filter(|ship| ship.has_bay)
        .map(|ship| Candidate::data(NodeKind::String, &ship.name))
        .collect()
}

pub fn wings(wings: &[WingEntry]) -> CandidateList {
    wings
        .iter()
        .map(|wing| Candidate::data(NodeKind::String, &wing.name))
        .collect()
}

pub fn waypoint_paths(paths: &[WaypointPathEntry]) -> CandidateList {
    paths
        .iter()
        .map(|path| Candidate::data(NodeKind::String, &path.name))
        .collect()
}

/// Individual waypoints, named `path:ordinal` starting at 1.
pub fn waypoints(paths: &[WaypointPathEntry]) -> CandidateList {
    paths
        .iter()
        .flat_map(|path| {
            (1..=path.point_count)
                .map(|ordinal| Candidate::data(NodeKind::String, &format!("{}:{}", path.name, ordinal)))
        })
        .collect()
}

pub fn nav_points(names: &[SmolStr]) -> CandidateList {
    name_candidates(names)
}

/// Dock points of the docking ship already named in a sibling slot.
/// No resolved ship means nothing fillable.
pub fn dock_points(ship: Option<&ShipEntry>) -> CandidateList {
    ship.map(|ship| name_candidates(&ship.dock_points))
        .unwrap_or_default()
}

pub fn subsystems(ship: Option<&ShipEntry>) -> CandidateList {
    ship.map(|ship| {
        ship.subsystems
            .iter()
            .map(|subsystem| Candidate::data(NodeKind::String, &subsystem.name))
            .collect()
    })
    .unwrap_or_default()
}

pub fn subsystems_or_none(ship: Option<&ShipEntry>) -> CandidateList {
    let mut list = vec![Candidate::data(NodeKind::String, NONE_SENTINEL)];
    list.extend(subsystems(ship));
    list
}

pub fn awacs_subsystems(ship: Option<&ShipEntry>) -> CandidateList {
    subsystems_of_kind(ship, SubsystemKind::Awacs)
}

pub fn rotating_subsystems(ship: Option<&ShipEntry>) -> CandidateList {
    subsystems_of_kind(ship, SubsystemKind::Rotating)
}

fn subsystems_of_kind(ship: Option<&ShipEntry>, kind: SubsystemKind) -> CandidateList {
    ship.map(|ship| {
        ship.subsystems
            .iter()
            .filter(|subsystem| subsystem.kind == kind)
            .map(|subsystem| Candidate::data(NodeKind::String, &subsystem.name))
            .collect()
    })
    .unwrap_or_default()
}

pub fn subsystem_types() -> CandidateList {
    fixed_candidates(&[
        "Engines", "Turrets", "Radar", "Navigation", "Communication", "Weapons", "Sensors",
    ])
}

pub fn iff_teams(names: &[SmolStr]) -> CandidateList {
    name_candidates(names)
}

pub fn ai_classes(names: &[SmolStr]) -> CandidateList {
    name_candidates(names)
}

pub fn ai_orders(names: &[SmolStr]) -> CandidateList {
    name_candidates(names)
}
