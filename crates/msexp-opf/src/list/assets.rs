//! Listers over the static asset catalogs exposed by the game data
//! tables.

use smol_str::SmolStr;

use crate::candidates::CandidateList;

use super::{fixed_candidates, name_candidates};

pub const DEFAULT_SKYBOX: &str = "<default>";

pub fn ship_classes(names: &[SmolStr]) -> CandidateList {
    name_candidates(names)
}

pub fn support_ship_classes(names: &[SmolStr]) -> CandidateList {
    name_candidates(names)
}

pub fn ship_types(names: &[SmolStr]) -> CandidateList {
    name_candidates(names)
}

pub fn weapon_classes(names: &[SmolStr]) -> CandidateList {
    name_candidates(names)
}

pub fn sound_entries(names: &[SmolStr]) -> CandidateList {
    name_candidates(names)
}

pub fn soundtracks(names: &[SmolStr]) -> CandidateList {
    name_candidates(names)
}

pub fn fonts(names: &[SmolStr]) -> CandidateList {
    name_candidates(names)
}

pub fn hud_gauges(names: &[SmolStr]) -> CandidateList {
    name_candidates(names)
}

pub fn skybox_models(names: &[SmolStr]) -> CandidateList {
    let mut list = fixed_candidates(&[DEFAULT_SKYBOX]);
    list.extend(name_candidates(names));
    list
}

pub fn damage_types(names: &[SmolStr]) -> CandidateList {
    name_candidates(names)
}

pub fn armor_types(names: &[SmolStr]) -> CandidateList {
    name_candidates(names)
}

pub fn ship_effects(names: &[SmolStr]) -> CandidateList {
    name_candidates(names)
}

pub fn post_effects(names: &[SmolStr]) -> CandidateList {
    name_candidates(names)
}

pub fn nebula_patterns(names: &[SmolStr]) -> CandidateList {
    name_candidates(names)
}

pub fn team_colors(names: &[SmolStr]) -> CandidateList {
    name_candidates(names)
}

pub fn mission_moods(names: &[SmolStr]) -> CandidateList {
    name_candidates(names)
}

pub fn animation_types(names: &[SmolStr]) -> CandidateList {
    name_candidates(names)
}

pub fn turret_target_orders(names: &[SmolStr]) -> CandidateList {
    name_candidates(names)
}

pub fn explosion_options() -> CandidateList {
    fixed_candidates(&["damage", "blast", "inner radius", "outer radius", "shockwave speed"])
}

pub fn hull_or_sim_options() -> CandidateList {
    fixed_candidates(&["Hull", "Simulated Hull"])
}

#[cfg(test)]
mod tests {
    use crate::candidates::Candidate;
    use crate::catalog::MissionCatalogs;

    use super::*;

    #[test]
    fn test_skybox_leads_with_default() {
        let catalogs = MissionCatalogs::sample();
        let list = skybox_models(&catalogs.skybox_models);
        assert_eq!(list[0].text(), DEFAULT_SKYBOX);
        assert_eq!(list.len(), catalogs.skybox_models.len() + 1);
    }

    #[test]
    fn test_fixed_lists_are_stable() {
        let first: Vec<_> = explosion_options().iter().map(Candidate::text).map(String::from).collect();
        let second: Vec<_> = explosion_options().iter().map(Candidate::text).map(String::from).collect();
        assert_eq!(first, second);
    }
}
