use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use smol_str::SmolStr;

use crate::error::CatalogError;
use crate::format::OpfFormat;

/// Per-position argument formats; nearly every operator fits inline.
pub type ArgFormats = SmallVec<[OpfFormat; 4]>;

/// Return type of an operator, matched against argument-slot formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpReturn {
    Number,
    Bool,
    /// Action operators: no value, usable where a `Null` slot is expected.
    Null,
    AiGoal,
    Positive,
    String,
    Ambiguous,
    FlexibleArgument,
}

/// One read-only operator catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorEntry {
    pub name: SmolStr,
    pub id: u32,
    pub min: usize,
    /// `None` means unbounded.
    pub max: Option<usize>,
    pub returns: OpReturn,
    /// Expected format per argument position; the last entry repeats for
    /// trailing variadic positions.
    pub arg_formats: ArgFormats,
}

impl OperatorEntry {
    /// Expected format at `position`; the trailing format repeats.
    pub fn arg_format(&self, position: usize) -> OpfFormat {
        self.arg_formats
            .get(position)
            .or_else(|| self.arg_formats.last())
            .copied()
            .unwrap_or(OpfFormat::None)
    }

    #[inline(always)]
    pub fn is_variadic(&self) -> bool {
        self.max.is_none()
    }
}

/// The operator catalog, indexed by case-insensitive name.
#[derive(Debug, Clone, Default)]
pub struct OperatorTable {
    entries: Vec<OperatorEntry>,
    by_name: FxHashMap<String, usize>,
}

impl OperatorTable {
    /// Builds the table, validating host data.
    pub fn new(entries: Vec<OperatorEntry>) -> Result<Self, CatalogError> {
        let mut by_name = FxHashMap::default();
        for (index, entry) in entries.iter().enumerate() {
            if entry.name.is_empty() {
                return Err(CatalogError::EmptyOperatorName(entry.id));
            }
            if let Some(max) = entry.max
                && entry.min > max
            {
                return Err(CatalogError::InvertedArity {
                    name: entry.name.clone(),
                    min: entry.min,
                    max,
                });
            }
            if by_name.insert(entry.name.to_lowercase(), index).is_some() {
                return Err(CatalogError::DuplicateOperator(entry.name.clone()));
            }
        }
        Ok(Self { entries, by_name })
    }

    /// Case-insensitive lookup; `None` is a recoverable miss.
    pub fn lookup(&self, name: &str) -> Option<&OperatorEntry> {
        self.by_name
            .get(&name.to_lowercase())
            .map(|&index| &self.entries[index])
    }

    pub fn entries(&self) -> &[OperatorEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The built-in mission operator set.
    ///
    /// Hosts with a richer table load their own entries; this one keeps
    /// the editor usable against stock missions and backs the test
    /// suites.
    pub fn standard() -> Self {
        use OpReturn as R;
        use OpfFormat as F;

        let specs: Vec<(&str, usize, Option<usize>, OpReturn, Vec<OpfFormat>)> = vec![
            // logical
            ("true", 0, Some(0), R::Bool, vec![]),
            ("false", 0, Some(0), R::Bool, vec![]),
            ("and", 2, None, R::Bool, vec![F::Bool]),
            ("or", 2, None, R::Bool, vec![F::Bool]),
            ("not", 1, Some(1), R::Bool, vec![F::Bool]),
            ("xor", 2, None, R::Bool, vec![F::Bool]),
            ("=", 2, None, R::Bool, vec![F::Number]),
            (">", 2, None, R::Bool, vec![F::Number]),
            ("<", 2, None, R::Bool, vec![F::Number]),
            ("string-equals", 2, None, R::Bool, vec![F::StringText]),
            // arithmetic
            ("+", 2, None, R::Number, vec![F::Number]),
            ("-", 2, None, R::Number, vec![F::Number]),
            ("*", 2, None, R::Number, vec![F::Number]),
            ("/", 2, None, R::Number, vec![F::Number]),
            ("mod", 2, Some(2), R::Number, vec![F::Number, F::Number]),
            ("rand", 2, Some(3), R::Number, vec![F::Number, F::Number, F::Number]),
            // status queries
            ("mission-time", 0, Some(0), R::Number, vec![]),
            ("distance", 2, Some(2), R::Number, vec![F::ShipWingOrPoint, F::ShipWingOrPoint]),
            ("hits-left", 1, Some(1), R::Positive, vec![F::Ship]),
            ("shields-left", 1, Some(1), R::Positive, vec![F::Ship]),
            ("hits-left-subsystem", 2, Some(2), R::Positive, vec![F::Ship, F::Subsystem]),
            ("time-ship-destroyed", 1, Some(1), R::Number, vec![F::Ship]),
            ("time-ship-arrived", 1, Some(1), R::Number, vec![F::Ship]),
            ("time-ship-departed", 1, Some(1), R::Number, vec![F::Ship]),
            ("time-docked", 3, Some(3), R::Number, vec![F::Ship, F::Ship, F::PositiveNumber]),
            ("time-undocked", 3, Some(3), R::Number, vec![F::Ship, F::Ship, F::PositiveNumber]),
            // boolean triggers
            ("has-docked-delay", 3, Some(4), R::Bool, vec![F::Ship, F::Ship, F::PositiveNumber, F::PositiveNumber]),
            ("has-undocked-delay", 3, Some(4), R::Bool, vec![F::Ship, F::Ship, F::PositiveNumber, F::PositiveNumber]),
            ("has-arrived-delay", 2, None, R::Bool, vec![F::PositiveNumber, F::ShipOrWing]),
            ("has-departed-delay", 2, None, R::Bool, vec![F::PositiveNumber, F::ShipOrWing]),
            ("is-destroyed-delay", 2, None, R::Bool, vec![F::PositiveNumber, F::ShipOrWing]),
            ("is-disabled-delay", 2, None, R::Bool, vec![F::PositiveNumber, F::Ship]),
            ("is-disarmed-delay", 2, None, R::Bool, vec![F::PositiveNumber, F::Ship]),
            ("is-subsystem-destroyed-delay", 3, Some(3), R::Bool, vec![F::Ship, F::Subsystem, F::PositiveNumber]),
            ("is-cargo-known-delay", 2, None, R::Bool, vec![F::PositiveNumber, F::Ship]),
            ("is-iff", 2, None, R::Bool, vec![F::IffTeam, F::ShipOrWing]),
            ("percent-ships-destroyed", 2, None, R::Bool, vec![F::PositiveNumber, F::ShipOrWing]),
            ("waypoints-done-delay", 3, Some(3), R::Bool, vec![F::Ship, F::WaypointPath, F::PositiveNumber]),
            ("key-pressed", 1, Some(2), R::Bool, vec![F::Keypress, F::PositiveNumber]),
            ("is-goal-true-delay", 2, Some(2), R::Bool, vec![F::GoalName, F::PositiveNumber]),
            ("is-goal-false-delay", 2, Some(2), R::Bool, vec![F::GoalName, F::PositiveNumber]),
            ("is-event-true-delay", 2, Some(2), R::Bool, vec![F::EventName, F::PositiveNumber]),
            ("is-event-false-delay", 2, Some(2), R::Bool, vec![F::EventName, F::PositiveNumber]),
            // triggers and argument machinery
            ("when", 2, None, R::Null, vec![F::Bool, F::Null]),
            ("every-time", 2, None, R::Null, vec![F::Bool, F::Null]),
            ("when-argument", 3, None, R::Null, vec![F::FlexibleArgument, F::Bool, F::Null]),
            ("every-time-argument", 3, None, R::Null, vec![F::FlexibleArgument, F::Bool, F::Null]),
            ("any-of", 1, None, R::FlexibleArgument, vec![F::Anything]),
            ("every-of", 1, None, R::FlexibleArgument, vec![F::Anything]),
            ("random-of", 1, None, R::FlexibleArgument, vec![F::Anything]),
            ("number-of", 2, None, R::FlexibleArgument, vec![F::PositiveNumber, F::Anything]),
            ("invalidate-argument", 1, None, R::Null, vec![F::Anything]),
            // actions
            ("do-nothing", 0, Some(0), R::Null, vec![]),
            ("send-message", 3, Some(3), R::Null, vec![F::MessageSender, F::MessagePriority, F::Message]),
            ("send-message-list", 4, None, R::Null, vec![F::MessageSender, F::MessagePriority, F::Message, F::PositiveNumber]),
            ("change-iff", 2, None, R::Null, vec![F::IffTeam, F::ShipOrWing]),
            ("add-goal", 2, Some(2), R::Null, vec![F::ShipOrWing, F::AiGoal]),
            ("clear-goals", 1, None, R::Null, vec![F::ShipOrWing]),
            ("sabotage-subsystem", 3, Some(3), R::Null, vec![F::Ship, F::Subsystem, F::PositiveNumber]),
            ("repair-subsystem", 3, Some(4), R::Null, vec![F::Ship, F::Subsystem, F::PositiveNumber, F::Bool]),
            ("set-subsystem-strength", 3, Some(4), R::Null, vec![F::Ship, F::Subsystem, F::Number, F::Bool]),
            ("protect-ship", 1, None, R::Null, vec![F::Ship]),
            ("unprotect-ship", 1, None, R::Null, vec![F::Ship]),
            ("grant-medal", 1, Some(1), R::Null, vec![F::Medal]),
            ("grant-promotion", 0, Some(0), R::Null, vec![]),
            ("modify-variable", 2, Some(2), R::Null, vec![F::Variable, F::Ambiguous]),
            // ai goals
            ("ai-chase", 2, Some(2), R::AiGoal, vec![F::ShipOrWing, F::PositiveNumber]),
            ("ai-chase-any", 1, Some(1), R::AiGoal, vec![F::PositiveNumber]),
            ("ai-dock", 4, Some(4), R::AiGoal, vec![F::Ship, F::DockerPoint, F::DockeePoint, F::PositiveNumber]),
            ("ai-undock", 1, Some(2), R::AiGoal, vec![F::PositiveNumber, F::Ship]),
            ("ai-waypoints", 2, Some(2), R::AiGoal, vec![F::WaypointPath, F::PositiveNumber]),
            ("ai-warp-out", 1, Some(1), R::AiGoal, vec![F::PositiveNumber]),
            ("ai-destroy-subsystem", 3, Some(3), R::AiGoal, vec![F::Ship, F::Subsystem, F::PositiveNumber]),
            ("ai-disable-ship", 2, Some(2), R::AiGoal, vec![F::Ship, F::PositiveNumber]),
            ("ai-disarm-ship", 2, Some(2), R::AiGoal, vec![F::Ship, F::PositiveNumber]),
            ("ai-guard", 2, Some(2), R::AiGoal, vec![F::ShipOrWing, F::PositiveNumber]),
            ("ai-ignore", 2, Some(2), R::AiGoal, vec![F::Ship, F::PositiveNumber]),
            ("ai-stay-near-ship", 2, Some(2), R::AiGoal, vec![F::Ship, F::PositiveNumber]),
        ];

        let entries = specs
            .into_iter()
            .enumerate()
            .map(|(id, (name, min, max, returns, arg_formats))| OperatorEntry {
                name: SmolStr::from(name),
                id: id as u32,
                min,
                max,
                returns,
                arg_formats: ArgFormats::from_vec(arg_formats),
            })
            .collect();

        Self::new(entries).expect("the built-in operator table is valid")
    }
}
