//! `msexp-opf` resolves operand formats into candidate lists for the
//! mission SEXP editor: given the format code of an argument slot and
//! its tree position, it produces the ordered set of operators and
//! literals a host can offer there, by querying read-only mission
//! catalogs.
//!
//! ## Examples
//!
//! ```
//! use msexp_opf::{MissionCatalogs, OpfFormat, OpfResolver};
//! use msexp_tree::SexpArena;
//!
//! let catalogs = MissionCatalogs::sample();
//! let resolver = OpfResolver::new(&catalogs);
//! let arena = SexpArena::new();
//!
//! let ships = resolver.resolve(OpfFormat::Ship, &arena, None, 0);
//! assert_eq!(ships.first().unwrap().text(), "Alpha 1");
//! ```

mod candidates;
mod catalog;
mod containers;
mod error;
mod format;
pub mod list;
mod operators;
mod resolve;

pub use candidates::{ARGUMENT_SENTINEL, Candidate, CandidateList, dedup_candidates};
pub use catalog::{
    MissionCatalogs, ShipEntry, SubsystemEntry, SubsystemKind, WaypointPathEntry, WingEntry,
};
pub use containers::{
    ContainerEntry, ContainerKind, ContainerTable, ContainerValueType, MODIFIER_MARKERS,
    ModifierMarker, modifier_marker,
};
pub use error::CatalogError;
pub use format::OpfFormat;
pub use operators::{ArgFormats, OpReturn, OperatorEntry, OperatorTable};
pub use resolve::{ContextualArgument, OpfResolver};
