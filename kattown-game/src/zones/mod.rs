//! The three zones of Kat Town.
//!
//! Each zone rebuilds its controller from scratch in `on_enter`, so no
//! movement state survives a switch. Chat sessions do survive: they live
//! in the registry, which is handed in per tick from outside.

mod court;
mod lab;
mod village;

pub use court::VolleyballCourtZone;
pub use lab::ComputerLabZone;
pub use village::VillageZone;

use kattown_core::types::ZoneId;

/// Identifier of the village zone.
#[must_use]
pub fn village_id() -> ZoneId {
    ZoneId::new("village")
}

/// Identifier of the computer-lab zone.
#[must_use]
pub fn computer_lab_id() -> ZoneId {
    ZoneId::new("computer-lab")
}

/// Identifier of the volleyball-court zone.
#[must_use]
pub fn volleyball_court_id() -> ZoneId {
    ZoneId::new("volleyball-court")
}
