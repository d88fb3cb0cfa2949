use strum::{Display, EnumIter};

/// Operand format: the category of value expected in an argument slot.
///
/// Each variant maps to one candidate sub-builder (or a small composition
/// of them) in [`crate::list`]; the resolver dispatches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum OpfFormat {
    /// No argument expected at this position.
    None,
    /// An action operator (returns nothing).
    Null,
    Bool,
    Number,
    PositiveNumber,
    /// Data of any payload type.
    Ambiguous,
    /// Anything at all, operators included.
    Anything,
    /// The contextual-argument family (`<argument>` and its producers).
    FlexibleArgument,
    /// Free text.
    StringText,
    Ship,
    ShipNotPlayer,
    ShipOrNone,
    Wing,
    ShipOrWing,
    ShipWingOrPoint,
    ShipWingPointOrTeam,
    ShipWithBay,
    ShipOrPoint,
    Waypoint,
    WaypointPath,
    NavPoint,
    DockerPoint,
    DockeePoint,
    Subsystem,
    SubsystemOrNone,
    AwacsSubsystem,
    RotatingSubsystem,
    SubsystemType,
    IffTeam,
    AiClass,
    AiGoal,
    AiOrder,
    ShipClass,
    ShipType,
    WeaponClass,
    SupportShipClass,
    IntelEntry,
    CargoType,
    Message,
    MessageSender,
    MessagePriority,
    MissionName,
    GoalName,
    EventName,
    Keypress,
    Medal,
    SkillLevel,
    ArrivalLocation,
    DepartureLocation,
    ArrivalAnchor,
    SoundEntry,
    Soundtrack,
    Persona,
    Font,
    HudGauge,
    SkyboxModel,
    DamageType,
    ArmorType,
    ShipEffect,
    PostEffect,
    NebulaPattern,
    TeamColor,
    MissionMood,
    AnimationType,
    TurretTargetOrder,
    ExplosionOption,
    HullOrSim,
    Variable,
    NumberVariable,
    StringVariable,
    ContainerName,
    ListContainer,
    MapContainer,
}

impl OpfFormat {
    /// Formats that accept only numeric literals; these never get the
    /// contextual-argument sentinel.
    #[inline(always)]
    pub fn is_pure_numeric(self) -> bool {
        matches!(self, OpfFormat::Number | OpfFormat::PositiveNumber)
    }

    /// Formats whose slots can hold an operator subtree.
    #[inline(always)]
    pub fn admits_operators(self) -> bool {
        matches!(
            self,
            OpfFormat::Null
                | OpfFormat::Bool
                | OpfFormat::Number
                | OpfFormat::PositiveNumber
                | OpfFormat::Anything
                | OpfFormat::AiGoal
                | OpfFormat::FlexibleArgument
        )
    }

    /// Formats whose slots can hold plain data.
    #[inline(always)]
    pub fn admits_data(self) -> bool {
        !matches!(
            self,
            OpfFormat::None | OpfFormat::Null | OpfFormat::Bool | OpfFormat::AiGoal
        )
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use strum::IntoEnumIterator;

    use super::*;

    #[rstest]
    #[case(OpfFormat::Number, true)]
    #[case(OpfFormat::PositiveNumber, true)]
    #[case(OpfFormat::Bool, false)]
    #[case(OpfFormat::Ship, false)]
    fn test_is_pure_numeric(#[case] format: OpfFormat, #[case] expected: bool) {
        assert_eq!(format.is_pure_numeric(), expected);
    }

    #[test]
    fn test_display_is_kebab_case() {
        assert_eq!(OpfFormat::ShipWingOrPoint.to_string(), "ship-wing-or-point");
        assert_eq!(OpfFormat::Bool.to_string(), "bool");
    }

    #[test]
    fn test_every_format_classifies() {
        // the three predicates stay total as variants are added
        for format in OpfFormat::iter() {
            let _ = format.is_pure_numeric();
            let _ = format.admits_operators();
            let _ = format.admits_data();
        }
    }
}
