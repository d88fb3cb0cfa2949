//! The operand-format resolver: turns a format code and a tree position
//! into an ordered candidate list by querying the read-only catalogs.

use msexp_tree::{NodeId, NodeKind, SexpArena};
use smol_str::SmolStr;

use crate::candidates::{Candidate, CandidateList, dedup_candidates};
use crate::catalog::{MissionCatalogs, ShipEntry};
use crate::containers::{ContainerKind, modifier_marker};
use crate::format::OpfFormat;
use crate::list::{assets, entities, logic, mission};
use crate::operators::OpReturn;

/// Result of the contextual-argument ancestor search: the marker operator
/// found and which of its argument positions the path traversed.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextualArgument {
    pub marker: SmolStr,
    pub position: usize,
}

/// Ships resolved from the slot's surroundings, feeding the sub-builders
/// that list per-ship data (subsystems, dock points).
#[derive(Default)]
struct ShipContext<'a> {
    /// A live ship named by a sibling argument of the same operator.
    sibling: Option<&'a ShipEntry>,
    /// A live ship named by an argument of an enclosing operator.
    ancestor: Option<&'a ShipEntry>,
}

/// Candidate resolver over one set of mission catalogs.
pub struct OpfResolver<'a> {
    catalogs: &'a MissionCatalogs,
}

impl<'a> OpfResolver<'a> {
    /// Operators beneath which the contextual-argument sentinel applies.
    pub const CONTEXTUAL_MARKERS: &'static [&'static str] =
        &["when-argument", "every-time-argument"];

    pub fn new(catalogs: &'a MissionCatalogs) -> Self {
        Self { catalogs }
    }

    /// Produces the ordered, de-duplicated candidate list for an argument
    /// slot below `parent` at `arg_position`.
    ///
    /// An empty list means "nothing fillable here", never an error.
    pub fn resolve(
        &self,
        format: OpfFormat,
        arena: &SexpArena,
        parent: Option<NodeId>,
        arg_position: usize,
    ) -> CandidateList {
        let mut format = format;

        if let Some(parent_id) = parent
            && arena[parent_id].kind == NodeKind::ContainerData
        {
            let entry = self.catalogs.containers.lookup(&arena[parent_id].text);
            if arg_position == 0 {
                // the protected first slot holds a modifier marker or map key
                let mut list = mission::modifier_markers();
                if let Some(entry) = entry
                    && entry.kind == ContainerKind::Map
                {
                    list.extend(mission::map_keys(entry));
                }
                return dedup_candidates(list);
            }
            if self.has_single_index_modifier(arena, parent_id) {
                format = OpfFormat::Number;
            }
        }

        let context = ShipContext {
            sibling: parent.and_then(|p| self.sibling_ship(arena, p)),
            ancestor: parent.and_then(|p| self.ancestor_ship(arena, p)),
        };

        let mut list = self.candidates_for(format, &context);
        if !format.is_pure_numeric()
            && self
                .contextual_argument(arena, parent, arg_position)
                .is_some()
        {
            list.insert(0, Candidate::argument_sentinel());
        }
        dedup_candidates(list)
    }

    /// Walks ancestors from the slot's parent looking for a contextual
    /// marker operator, recording which argument position of the marker
    /// the path traversed. Reaching a root without a match means the slot
    /// is ineligible.
    pub fn contextual_argument(
        &self,
        arena: &SexpArena,
        parent: Option<NodeId>,
        arg_position: usize,
    ) -> Option<ContextualArgument> {
        let mut cur = parent?;
        let mut traversed = arg_position;
        loop {
            let node = &arena[cur];
            if node.is_operator()
                && Self::CONTEXTUAL_MARKERS
                    .iter()
                    .any(|marker| node.text.eq_ignore_ascii_case(marker))
            {
                return Some(ContextualArgument {
                    marker: node.text.clone(),
                    position: traversed,
                });
            }
            let next = arena.parent_of(cur)?;
            traversed = arena
                .position_of(cur)
                .expect("a linked child has a position");
            cur = next;
        }
    }

    /// Synthesizes the default fill for a slot with no tree context:
    /// fixed defaults for the operator-bearing classes, else the first
    /// data candidate, else a typed placeholder.
    pub fn default_candidate(&self, format: OpfFormat) -> Candidate {
        match format {
            OpfFormat::Number | OpfFormat::PositiveNumber => {
                Candidate::data(NodeKind::Number, "0")
            }
            OpfFormat::Bool => Candidate::operator("true", OpReturn::Bool),
            OpfFormat::Null => Candidate::operator("do-nothing", OpReturn::Null),
            OpfFormat::AiGoal => logic::ai_goal_operators(&self.catalogs.operators)
                .into_iter()
                .next()
                .unwrap_or_else(|| Candidate::data(NodeKind::String, "<text>")),
            OpfFormat::FlexibleArgument => Candidate::argument_sentinel(),
            _ => self
                .candidates_for(format, &ShipContext::default())
                .into_iter()
                .find(Candidate::is_data)
                .unwrap_or_else(|| Candidate::data(NodeKind::String, "<text>")),
        }
    }

    /// Exactly one modifier is present below `parent` and it marks an
    /// index-based access.
    fn has_single_index_modifier(&self, arena: &SexpArena, parent: NodeId) -> bool {
        let mut modifiers = arena
            .children(parent)
            .filter(|&child| arena[child].is_modifier());
        match (modifiers.next(), modifiers.next()) {
            (Some(only), None) => {
                modifier_marker(&arena[only].text).is_some_and(|marker| marker.index_based)
            }
            _ => false,
        }
    }

    fn sibling_ship(&self, arena: &SexpArena, parent: NodeId) -> Option<&'a ShipEntry> {
        arena
            .children(parent)
            .find_map(|child| self.catalogs.ship(&arena[child].text))
    }

    fn ancestor_ship(&self, arena: &SexpArena, parent: NodeId) -> Option<&'a ShipEntry> {
        let mut cur = parent;
        while let Some(parent_id) = arena.parent_of(cur) {
            if let Some(ship) = self.sibling_ship(arena, parent_id) {
                return Some(ship);
            }
            cur = parent_id;
        }
        None
    }

    /// Dispatch from format code to sub-builders. Composition order is
    /// the documented catalog sequence; de-duplication happens after.
    fn candidates_for(&self, format: OpfFormat, context: &ShipContext<'a>) -> CandidateList {
        let c = self.catalogs;
        match format {
            OpfFormat::None => Vec::new(),
            OpfFormat::Null => logic::action_operators(&c.operators),
            OpfFormat::Bool => logic::bool_operators(&c.operators),
            OpfFormat::Number | OpfFormat::PositiveNumber => concat(vec![
                logic::number_operators(&c.operators),
                mission::number_variables(&c.variables),
            ]),
            OpfFormat::Ambiguous => mission::variables(&c.variables),
            // anything goes: the host types or pastes freely
            OpfFormat::Anything => Vec::new(),
            OpfFormat::FlexibleArgument => logic::flexible_argument_operators(&c.operators),
            OpfFormat::StringText => mission::string_variables(&c.variables),
            OpfFormat::Ship => entities::ships(&c.ships),
            OpfFormat::ShipNotPlayer => entities::ships_not_player(&c.ships),
            OpfFormat::ShipOrNone => entities::ships_or_none(&c.ships),
            OpfFormat::Wing => entities::wings(&c.wings),
            OpfFormat::ShipOrWing => concat(vec![
                entities::ships(&c.ships),
                entities::wings(&c.wings),
            ]),
            OpfFormat::ShipWingOrPoint => concat(vec![
                entities::ships(&c.ships),
                entities::wings(&c.wings),
                entities::waypoints(&c.waypoint_paths),
            ]),
            OpfFormat::ShipWingPointOrTeam => concat(vec![
                entities::ships(&c.ships),
                entities::wings(&c.wings),
                entities::waypoints(&c.waypoint_paths),
                entities::iff_teams(&c.iff_teams),
            ]),
            OpfFormat::ShipWithBay => entities::ships_with_bay(&c.ships),
            OpfFormat::ShipOrPoint => concat(vec![
                entities::ships(&c.ships),
                entities::waypoints(&c.waypoint_paths),
            ]),
            OpfFormat::Waypoint => entities::waypoints(&c.waypoint_paths),
            OpfFormat::WaypointPath => entities::waypoint_paths(&c.waypoint_paths),
            OpfFormat::NavPoint => entities::nav_points(&c.nav_points),
            OpfFormat::DockerPoint => entities::dock_points(context.ancestor),
            OpfFormat::DockeePoint => entities::dock_points(context.sibling),
            OpfFormat::Subsystem => {
                entities::subsystems(context.sibling.or(context.ancestor))
            }
            OpfFormat::SubsystemOrNone => {
                entities::subsystems_or_none(context.sibling.or(context.ancestor))
            }
            OpfFormat::AwacsSubsystem => {
                entities::awacs_subsystems(context.sibling.or(context.ancestor))
            }
            OpfFormat::RotatingSubsystem => {
                entities::rotating_subsystems(context.sibling.or(context.ancestor))
            }
            OpfFormat::SubsystemType => entities::subsystem_types(),
            OpfFormat::IffTeam => entities::iff_teams(&c.iff_teams),
            OpfFormat::AiClass => entities::ai_classes(&c.ai_classes),
            OpfFormat::AiGoal => logic::ai_goal_operators(&c.operators),
            OpfFormat::AiOrder => entities::ai_orders(&c.ai_orders),
            OpfFormat::ShipClass => assets::ship_classes(&c.ship_classes),
            OpfFormat::ShipType => assets::ship_types(&c.ship_types),
            OpfFormat::WeaponClass => assets::weapon_classes(&c.weapon_classes),
            OpfFormat::SupportShipClass => {
                assets::support_ship_classes(&c.support_ship_classes)
            }
            OpfFormat::IntelEntry => mission::intel_entries(&c.intel_entries),
            OpfFormat::CargoType => mission::cargo_types(&c.cargo_types),
            OpfFormat::Message => mission::messages(&c.messages),
            OpfFormat::MessageSender => mission::message_senders(&c.ships),
            OpfFormat::MessagePriority => mission::message_priorities(),
            OpfFormat::MissionName => mission::mission_names(&c.mission_names),
            OpfFormat::GoalName => mission::goal_names(&c.goal_names),
            OpfFormat::EventName => mission::event_names(&c.event_names),
            OpfFormat::Keypress => mission::keypresses(&c.keypresses),
            OpfFormat::Medal => mission::medals(&c.medals),
            OpfFormat::SkillLevel => mission::skill_levels(),
            OpfFormat::ArrivalLocation => mission::arrival_locations(),
            OpfFormat::DepartureLocation => mission::departure_locations(),
            OpfFormat::ArrivalAnchor => mission::arrival_anchors(&c.ships),
            OpfFormat::SoundEntry => assets::sound_entries(&c.sound_entries),
            OpfFormat::Soundtrack => assets::soundtracks(&c.soundtracks),
            OpfFormat::Persona => mission::personas(&c.personas),
            OpfFormat::Font => assets::fonts(&c.fonts),
            OpfFormat::HudGauge => assets::hud_gauges(&c.hud_gauges),
            OpfFormat::SkyboxModel => assets::skybox_models(&c.skybox_models),
            OpfFormat::DamageType => assets::damage_types(&c.damage_types),
            OpfFormat::ArmorType => assets::armor_types(&c.armor_types),
            OpfFormat::ShipEffect => assets::ship_effects(&c.ship_effects),
            OpfFormat::PostEffect => assets::post_effects(&c.post_effects),
            OpfFormat::NebulaPattern => assets::nebula_patterns(&c.nebula_patterns),
            OpfFormat::TeamColor => assets::team_colors(&c.team_colors),
            OpfFormat::MissionMood => assets::mission_moods(&c.mission_moods),
            OpfFormat::AnimationType => assets::animation_types(&c.animation_types),
            OpfFormat::TurretTargetOrder => {
                assets::turret_target_orders(&c.turret_target_orders)
            }
            OpfFormat::ExplosionOption => assets::explosion_options(),
            OpfFormat::HullOrSim => assets::hull_or_sim_options(),
            OpfFormat::Variable => mission::variables(&c.variables),
            OpfFormat::NumberVariable => mission::number_variables(&c.variables),
            OpfFormat::StringVariable => mission::string_variables(&c.variables),
            OpfFormat::ContainerName => mission::containers(&c.containers),
            OpfFormat::ListContainer => mission::list_containers(&c.containers),
            OpfFormat::MapContainer => mission::map_containers(&c.containers),
        }
    }
}

fn concat(lists: Vec<CandidateList>) -> CandidateList {
    lists.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use msexp_tree::SexpArena;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    use crate::candidates::ARGUMENT_SENTINEL;

    use super::*;

    fn op(arena: &mut SexpArena, parent: Option<NodeId>, name: &str) -> NodeId {
        let id = arena.allocate(parent, None);
        arena.set_node(id, NodeKind::Operator, name);
        id
    }

    fn data(arena: &mut SexpArena, parent: NodeId, kind: NodeKind, text: &str) -> NodeId {
        let id = arena.allocate(Some(parent), None);
        arena.set_node(id, kind, text);
        id
    }

    #[test]
    fn test_sentinel_prepended_under_marker() {
        let catalogs = MissionCatalogs::sample();
        let resolver = OpfResolver::new(&catalogs);
        let mut arena = SexpArena::new();

        let marker = op(&mut arena, None, "when-argument");
        let condition = op(&mut arena, Some(marker), "and");

        let list = resolver.resolve(OpfFormat::Bool, &arena, Some(condition), 0);
        assert_eq!(list[0].text(), ARGUMENT_SENTINEL);
    }

    #[test]
    fn test_sentinel_suppressed_for_pure_numeric() {
        let catalogs = MissionCatalogs::sample();
        let resolver = OpfResolver::new(&catalogs);
        let mut arena = SexpArena::new();

        let marker = op(&mut arena, None, "when-argument");
        let condition = op(&mut arena, Some(marker), "=");

        let list = resolver.resolve(OpfFormat::Number, &arena, Some(condition), 0);
        assert!(list.iter().all(|c| c.text() != ARGUMENT_SENTINEL));
    }

    #[test]
    fn test_no_marker_means_no_sentinel() {
        let catalogs = MissionCatalogs::sample();
        let resolver = OpfResolver::new(&catalogs);
        let mut arena = SexpArena::new();

        let root = op(&mut arena, None, "when");
        let condition = op(&mut arena, Some(root), "and");

        let list = resolver.resolve(OpfFormat::Bool, &arena, Some(condition), 0);
        assert!(list.iter().all(|c| c.text() != ARGUMENT_SENTINEL));
    }

    #[test]
    fn test_contextual_argument_records_traversed_position() {
        let catalogs = MissionCatalogs::sample();
        let resolver = OpfResolver::new(&catalogs);
        let mut arena = SexpArena::new();

        let marker = op(&mut arena, None, "when-argument");
        op(&mut arena, Some(marker), "any-of");
        let condition = op(&mut arena, Some(marker), "and");

        let found = resolver
            .contextual_argument(&arena, Some(condition), 3)
            .unwrap();
        assert_eq!(found.marker, "when-argument");
        // the path enters the marker through its second argument
        assert_eq!(found.position, 1);

        let direct = resolver
            .contextual_argument(&arena, Some(marker), 3)
            .unwrap();
        assert_eq!(direct.position, 3);
    }

    #[test]
    fn test_modifier_slot_lists_markers_and_map_keys() {
        let catalogs = MissionCatalogs::sample();
        let resolver = OpfResolver::new(&catalogs);
        let mut arena = SexpArena::new();

        let root = op(&mut arena, None, "when");
        let payouts = data(&mut arena, root, NodeKind::ContainerData, "Bonus Payouts");

        let list = resolver.resolve(OpfFormat::Ambiguous, &arena, Some(payouts), 0);
        let texts: Vec<_> = list.iter().map(Candidate::text).collect();
        assert!(texts.contains(&"at-index"));
        assert!(texts.contains(&"escort"));
        assert!(texts.contains(&"recon"));
    }

    #[test]
    fn test_single_index_modifier_restricts_to_numbers() {
        let catalogs = MissionCatalogs::sample();
        let resolver = OpfResolver::new(&catalogs);
        let mut arena = SexpArena::new();

        let root = op(&mut arena, None, "when");
        let convoy = data(&mut arena, root, NodeKind::ContainerData, "Convoy Ships");
        let index = data(&mut arena, convoy, NodeKind::String, "at-index");
        arena[index].flags.modifier = true;

        let restricted = resolver.resolve(OpfFormat::Ambiguous, &arena, Some(convoy), 1);
        let plain = resolver.resolve(OpfFormat::Number, &arena, Some(root), 0);
        assert_eq!(restricted, plain);
    }

    #[test]
    fn test_dockee_point_from_sibling_ship() {
        let catalogs = MissionCatalogs::sample();
        let resolver = OpfResolver::new(&catalogs);
        let mut arena = SexpArena::new();

        let dock = op(&mut arena, None, "ai-dock");
        data(&mut arena, dock, NodeKind::String, "Cargo 1");

        let list = resolver.resolve(OpfFormat::DockeePoint, &arena, Some(dock), 2);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].text(), "cargo dock");
    }

    #[test]
    fn test_docker_point_from_ancestor_ship() {
        let catalogs = MissionCatalogs::sample();
        let resolver = OpfResolver::new(&catalogs);
        let mut arena = SexpArena::new();

        let goal = op(&mut arena, None, "add-goal");
        data(&mut arena, goal, NodeKind::String, "GTD Orion");
        let dock = op(&mut arena, Some(goal), "ai-dock");

        let list = resolver.resolve(OpfFormat::DockerPoint, &arena, Some(dock), 1);
        let texts: Vec<_> = list.iter().map(Candidate::text).collect();
        assert_eq!(texts, ["port dock", "starboard dock"]);
    }

    #[test]
    fn test_aggregated_formats_dedup_case_insensitively() {
        let mut catalogs = MissionCatalogs::sample();
        // a wing sharing a ship's name, differing only in case
        catalogs.wings.push(crate::catalog::WingEntry {
            name: "ALPHA 1".into(),
        });
        let resolver = OpfResolver::new(&catalogs);
        let arena = SexpArena::new();

        let list = resolver.resolve(OpfFormat::ShipOrWing, &arena, None, 0);
        let alphas = list
            .iter()
            .filter(|c| c.text().eq_ignore_ascii_case("alpha 1"))
            .count();
        assert_eq!(alphas, 1);
        // first occurrence (the ship) wins
        assert!(list.iter().any(|c| c.text() == "Alpha 1"));
    }

    #[test]
    fn test_resolve_is_stable() {
        let catalogs = MissionCatalogs::sample();
        let resolver = OpfResolver::new(&catalogs);
        let arena = SexpArena::new();

        for format in OpfFormat::iter() {
            let first = resolver.resolve(format, &arena, None, 0);
            let second = resolver.resolve(format, &arena, None, 0);
            assert_eq!(first, second, "unstable order for {format}");
        }
    }

    #[rstest]
    #[case(OpfFormat::Number, "0")]
    #[case(OpfFormat::PositiveNumber, "0")]
    #[case(OpfFormat::Bool, "true")]
    #[case(OpfFormat::Null, "do-nothing")]
    #[case(OpfFormat::FlexibleArgument, ARGUMENT_SENTINEL)]
    #[case(OpfFormat::Ship, "Alpha 1")]
    #[case(OpfFormat::MessagePriority, "High")]
    fn test_default_candidates(#[case] format: OpfFormat, #[case] expected: &str) {
        let catalogs = MissionCatalogs::sample();
        let resolver = OpfResolver::new(&catalogs);
        assert_eq!(resolver.default_candidate(format).text(), expected);
    }

    #[test]
    fn test_default_falls_back_to_placeholder() {
        let catalogs = MissionCatalogs::new();
        let resolver = OpfResolver::new(&catalogs);
        // no ships in an empty catalog
        assert_eq!(resolver.default_candidate(OpfFormat::Ship).text(), "<text>");
    }

    #[test]
    fn test_empty_catalog_resolves_to_empty_not_error() {
        let catalogs = MissionCatalogs::new();
        let resolver = OpfResolver::new(&catalogs);
        let arena = SexpArena::new();
        assert!(resolver.resolve(OpfFormat::Wing, &arena, None, 0).is_empty());
    }
}
