// Draft engine core: turn order, weighted bot picks, and the pick state
// machine. No I/O lives in this crate.

pub mod catalog;
pub mod engine;
pub mod error;
pub mod order;
pub mod rates;
pub mod selector;
pub mod setup;
pub mod snapshot;

pub use catalog::{Catalog, Game, UnitDef};
pub use engine::{DraftEngine, DraftPlan, DraftStatus, Participant, ParticipantKind, PickRecord};
pub use error::{ConfigurationError, ContractViolation};
pub use order::{DraftMode, RoundPosition};
pub use rates::PickRateTable;
pub use setup::DraftSetup;
pub use snapshot::{DraftResults, DraftSnapshot};
