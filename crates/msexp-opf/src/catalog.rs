use msexp_tree::{VariableKind, VariableTable};
use smol_str::SmolStr;

use crate::containers::{ContainerEntry, ContainerKind, ContainerTable, ContainerValueType};
use crate::operators::OperatorTable;

/// Role of a ship subsystem, used by the filtered subsystem formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubsystemKind {
    Generic,
    Awacs,
    Rotating,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubsystemEntry {
    pub name: SmolStr,
    pub kind: SubsystemKind,
}

impl SubsystemEntry {
    pub fn new(name: &str, kind: SubsystemKind) -> Self {
        Self {
            name: SmolStr::from(name),
            kind,
        }
    }
}

/// A ship currently present in the mission being edited.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipEntry {
    pub name: SmolStr,
    pub class: SmolStr,
    pub player_start: bool,
    pub has_bay: bool,
    pub persona: Option<SmolStr>,
    pub subsystems: Vec<SubsystemEntry>,
    pub dock_points: Vec<SmolStr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WingEntry {
    pub name: SmolStr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WaypointPathEntry {
    pub name: SmolStr,
    pub point_count: usize,
}

/// Read-only catalogs the resolver queries.
///
/// The rendering, physics and UI subsystems expose these as ordered name
/// sequences or structured records; the core never mutates them, and the
/// host must not mutate them mid-query.
#[derive(Debug, Clone)]
pub struct MissionCatalogs {
    pub ships: Vec<ShipEntry>,
    pub wings: Vec<WingEntry>,
    pub waypoint_paths: Vec<WaypointPathEntry>,
    pub nav_points: Vec<SmolStr>,
    pub iff_teams: Vec<SmolStr>,
    pub ai_classes: Vec<SmolStr>,
    pub ai_orders: Vec<SmolStr>,
    pub ship_classes: Vec<SmolStr>,
    pub support_ship_classes: Vec<SmolStr>,
    pub ship_types: Vec<SmolStr>,
    pub weapon_classes: Vec<SmolStr>,
    pub intel_entries: Vec<SmolStr>,
    pub cargo_types: Vec<SmolStr>,
    pub messages: Vec<SmolStr>,
    pub personas: Vec<SmolStr>,
    pub mission_names: Vec<SmolStr>,
    pub goal_names: Vec<SmolStr>,
    pub event_names: Vec<SmolStr>,
    pub keypresses: Vec<SmolStr>,
    pub medals: Vec<SmolStr>,
    pub sound_entries: Vec<SmolStr>,
    pub soundtracks: Vec<SmolStr>,
    pub fonts: Vec<SmolStr>,
    pub hud_gauges: Vec<SmolStr>,
    pub skybox_models: Vec<SmolStr>,
    pub damage_types: Vec<SmolStr>,
    pub armor_types: Vec<SmolStr>,
    pub ship_effects: Vec<SmolStr>,
    pub post_effects: Vec<SmolStr>,
    pub nebula_patterns: Vec<SmolStr>,
    pub team_colors: Vec<SmolStr>,
    pub mission_moods: Vec<SmolStr>,
    pub animation_types: Vec<SmolStr>,
    pub turret_target_orders: Vec<SmolStr>,
    pub variables: VariableTable,
    pub containers: ContainerTable,
    pub operators: OperatorTable,
}

impl Default for MissionCatalogs {
    fn default() -> Self {
        Self::new()
    }
}

impl MissionCatalogs {
    /// Empty catalogs over the built-in operator table.
    pub fn new() -> Self {
        Self {
            ships: Vec::new(),
            wings: Vec::new(),
            waypoint_paths: Vec::new(),
            nav_points: Vec::new(),
            iff_teams: Vec::new(),
            ai_classes: Vec::new(),
            ai_orders: Vec::new(),
            ship_classes: Vec::new(),
            support_ship_classes: Vec::new(),
            ship_types: Vec::new(),
            weapon_classes: Vec::new(),
            intel_entries: Vec::new(),
            cargo_types: Vec::new(),
            messages: Vec::new(),
            personas: Vec::new(),
            mission_names: Vec::new(),
            goal_names: Vec::new(),
            event_names: Vec::new(),
            keypresses: Vec::new(),
            medals: Vec::new(),
            sound_entries: Vec::new(),
            soundtracks: Vec::new(),
            fonts: Vec::new(),
            hud_gauges: Vec::new(),
            skybox_models: Vec::new(),
            damage_types: Vec::new(),
            armor_types: Vec::new(),
            ship_effects: Vec::new(),
            post_effects: Vec::new(),
            nebula_patterns: Vec::new(),
            team_colors: Vec::new(),
            mission_moods: Vec::new(),
            animation_types: Vec::new(),
            turret_target_orders: Vec::new(),
            variables: VariableTable::default(),
            containers: ContainerTable::default(),
            operators: OperatorTable::standard(),
        }
    }

    /// Case-insensitive live-ship lookup; `None` is a recoverable miss.
    pub fn ship(&self, name: &str) -> Option<&ShipEntry> {
        self.ships
            .iter()
            .find(|ship| ship.name.eq_ignore_ascii_case(name))
    }

    /// A small populated catalog for tests, examples and host bring-up.
    pub fn sample() -> Self {
        let names = |items: &[&str]| items.iter().map(|s| SmolStr::from(*s)).collect::<Vec<_>>();

        let mut variables = VariableTable::default();
        variables.add("kills", "0", VariableKind::Number);
        variables.add("callsign", "Alpha 1", VariableKind::String);

        let containers = ContainerTable::new(vec![
            ContainerEntry {
                name: SmolStr::from("Convoy Ships"),
                kind: ContainerKind::List,
                value_type: ContainerValueType::String,
                key_type: None,
                keys: Vec::new(),
            },
            ContainerEntry {
                name: SmolStr::from("Bonus Payouts"),
                kind: ContainerKind::Map,
                value_type: ContainerValueType::Number,
                key_type: Some(ContainerValueType::String),
                keys: names(&["escort", "recon"]),
            },
        ])
        .expect("sample containers are valid");

        Self {
            ships: vec![
                ShipEntry {
                    name: SmolStr::from("Alpha 1"),
                    class: SmolStr::from("GTF Myrmidon"),
                    player_start: true,
                    has_bay: false,
                    persona: None,
                    subsystems: vec![
                        SubsystemEntry::new("engine", SubsystemKind::Generic),
                        SubsystemEntry::new("weapons", SubsystemKind::Generic),
                    ],
                    dock_points: Vec::new(),
                },
                ShipEntry {
                    name: SmolStr::from("Cargo 1"),
                    class: SmolStr::from("TC 2"),
                    player_start: false,
                    has_bay: false,
                    persona: None,
                    subsystems: vec![SubsystemEntry::new("cargo", SubsystemKind::Generic)],
                    dock_points: names(&["cargo dock"]),
                },
                ShipEntry {
                    name: SmolStr::from("GTD Orion"),
                    class: SmolStr::from("GTD Orion#Carrier"),
                    player_start: false,
                    has_bay: true,
                    persona: Some(SmolStr::from("Command")),
                    subsystems: vec![
                        SubsystemEntry::new("fighterbay", SubsystemKind::Generic),
                        SubsystemEntry::new("awacs array", SubsystemKind::Awacs),
                        SubsystemEntry::new("radar dish", SubsystemKind::Rotating),
                    ],
                    dock_points: names(&["port dock", "starboard dock"]),
                },
            ],
            wings: vec![
                WingEntry { name: SmolStr::from("Alpha") },
                WingEntry { name: SmolStr::from("Beta") },
            ],
            waypoint_paths: vec![
                WaypointPathEntry { name: SmolStr::from("Patrol path"), point_count: 3 },
                WaypointPathEntry { name: SmolStr::from("Retreat path"), point_count: 2 },
            ],
            nav_points: names(&["Nav Alpha", "Nav Beta"]),
            iff_teams: names(&["Friendly", "Hostile", "Neutral", "Unknown"]),
            ai_classes: names(&["Coward", "Lieutenant", "Captain", "General"]),
            ai_orders: names(&["Attack my target", "Form on my wing", "Cover me"]),
            ship_classes: names(&["GTF Myrmidon", "GTF Perseus", "TC 2", "GTD Orion#Carrier"]),
            support_ship_classes: names(&["TSP Hygeia"]),
            ship_types: names(&["Fighter", "Bomber", "Transport", "Capital"]),
            weapon_classes: names(&["Subach HL-7", "Prometheus R", "Harpoon"]),
            intel_entries: names(&["Shivans", "GTVA"]),
            cargo_types: names(&["Nothing", "Foodstuffs", "Weapons parts"]),
            messages: names(&["Attack order", "Retreat order"]),
            personas: names(&["Command", "Wingman 1"]),
            mission_names: names(&["SM1-01", "SM1-02"]),
            goal_names: names(&["Destroy convoy", "Protect station"]),
            event_names: names(&["Convoy arrived", "Station destroyed"]),
            keypresses: names(&["Alt-J", "Alt-M"]),
            medals: names(&["Epsilon Pegasi Liberation", "Distinguished Flying Cross"]),
            sound_entries: names(&["snd_warp_in", "snd_warp_out"]),
            soundtracks: names(&["Aquitaine", "Deuteronomy"]),
            fonts: names(&["font01", "font02"]),
            hud_gauges: names(&["radar", "weapons", "escort"]),
            skybox_models: names(&["starfield01", "nebula02"]),
            damage_types: names(&["laser", "beam", "shockwave"]),
            armor_types: names(&["light hull", "capital hull"]),
            ship_effects: names(&["cloak", "emp"]),
            post_effects: names(&["bloom", "saturation"]),
            nebula_patterns: names(&["standard", "cyclone"]),
            team_colors: names(&["Blue", "Red"]),
            mission_moods: names(&["ambient", "combat"]),
            animation_types: names(&["docking-stage-1", "fighterbay"]),
            turret_target_orders: names(&["bombs", "ships"]),
            variables,
            containers,
            operators: OperatorTable::standard(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ship_lookup_is_case_insensitive() {
        let catalogs = MissionCatalogs::sample();
        assert!(catalogs.ship("alpha 1").is_some());
        assert!(catalogs.ship("GTD ORION").is_some());
        assert!(catalogs.ship("missing").is_none());
    }

    #[test]
    fn test_new_starts_with_standard_operators() {
        let catalogs = MissionCatalogs::new();
        assert!(catalogs.operators.lookup("when").is_some());
        assert!(catalogs.ships.is_empty());
    }
}
