use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::error::CatalogError;

/// Shape of a runtime-resident container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    List,
    Map,
}

/// Payload type constraint for container values and map keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerValueType {
    Number,
    String,
}

/// One read-only container catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerEntry {
    pub name: SmolStr,
    pub kind: ContainerKind,
    pub value_type: ContainerValueType,
    /// Key constraint; only maps have one.
    pub key_type: Option<ContainerValueType>,
    /// Known map keys, listed as candidates for the key modifier slot.
    pub keys: Vec<SmolStr>,
}

/// The container catalog, indexed by case-insensitive name.
#[derive(Debug, Clone, Default)]
pub struct ContainerTable {
    entries: Vec<ContainerEntry>,
    by_name: FxHashMap<String, usize>,
}

impl ContainerTable {
    pub fn new(entries: Vec<ContainerEntry>) -> Result<Self, CatalogError> {
        let mut by_name = FxHashMap::default();
        for (index, entry) in entries.iter().enumerate() {
            if by_name.insert(entry.name.to_lowercase(), index).is_some() {
                return Err(CatalogError::DuplicateContainer(entry.name.clone()));
            }
        }
        Ok(Self { entries, by_name })
    }

    pub fn lookup(&self, name: &str) -> Option<&ContainerEntry> {
        self.by_name
            .get(&name.to_lowercase())
            .map(|&index| &self.entries[index])
    }

    pub fn entries(&self) -> &[ContainerEntry] {
        &self.entries
    }
}

/// A fixed modifier marker accepted in a container-data node's first
/// (protected) child slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModifierMarker {
    pub name: &'static str,
    /// Marks index-based access; the following slot is then a pure number.
    pub index_based: bool,
}

/// The fixed modifier marker set.
pub const MODIFIER_MARKERS: &[ModifierMarker] = &[
    ModifierMarker { name: "get-first", index_based: false },
    ModifierMarker { name: "get-last", index_based: false },
    ModifierMarker { name: "remove-first", index_based: false },
    ModifierMarker { name: "remove-last", index_based: false },
    ModifierMarker { name: "get-random", index_based: false },
    ModifierMarker { name: "remove-random", index_based: false },
    ModifierMarker { name: "at-index", index_based: true },
];

/// Case-insensitive marker lookup; `None` is a recoverable miss.
pub fn modifier_marker(name: &str) -> Option<&'static ModifierMarker> {
    MODIFIER_MARKERS
        .iter()
        .find(|marker| marker.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn list_entry(name: &str) -> ContainerEntry {
        ContainerEntry {
            name: SmolStr::from(name),
            kind: ContainerKind::List,
            value_type: ContainerValueType::String,
            key_type: None,
            keys: Vec::new(),
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let table = ContainerTable::new(vec![list_entry("Convoy Ships")]).unwrap();
        assert!(table.lookup("convoy ships").is_some());
        assert!(table.lookup("unknown").is_none());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let result = ContainerTable::new(vec![list_entry("A"), list_entry("a")]);
        assert_eq!(
            result.unwrap_err(),
            CatalogError::DuplicateContainer(SmolStr::from("a"))
        );
    }

    #[rstest]
    #[case("at-index", true)]
    #[case("At-Index", true)]
    #[case("get-first", false)]
    fn test_modifier_markers(#[case] name: &str, #[case] index_based: bool) {
        assert_eq!(modifier_marker(name).unwrap().index_based, index_based);
    }

    #[test]
    fn test_unknown_marker_is_none() {
        assert!(modifier_marker("no-such-marker").is_none());
    }
}
