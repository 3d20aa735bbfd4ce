//! Stat system.
//!
//! ```text
//! [ Attributes ]
//!      ↓
//! [ StatSnapshot (attributes, gear, proficiencies, element, resistances) ]
//!      ↓
//! [ Effect adjustments (StatSnapshot::with_adjustments) ]
//! ```
//!
//! ## Principles
//!
//! 1. **Stored**: attributes, gear, ranks. Everything else is derived.
//! 2. **Snapshot Consistency**: one snapshot per resolution, never mutated.
//! 3. **Clamped adjustments**: effect modifiers are flat and clamped per
//!    category ([`StatBounds`]).

pub mod attributes;
pub mod bounds;
pub mod gear;
pub mod proficiency;
pub mod snapshot;

pub use attributes::Attributes;
pub use bounds::StatBounds;
pub use gear::GearStats;
pub use proficiency::{Discipline, MAX_RANK, Proficiencies, WeaponType, proficiency_multiplier};
pub use snapshot::{AttackTypeResistances, SnapshotBuilder, StatKey, StatSnapshot};
