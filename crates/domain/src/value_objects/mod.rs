//! Value objects for the character rules.
//!
//! Explicit re-exports so the public surface stays deliberate.

mod dice;
mod names;
mod save;
mod size;
mod skill;
mod stat;

pub use dice::{HitDice, HitDie};
pub use names::CharacterName;
pub use save::{Save, SaveProfile, SaveTier};
pub use size::Size;
pub use skill::{Skill, SkillPointMap, SKILL_TOTAL_MAX};
pub use stat::{Stat, StatAxis, StatMap, STAT_MAX, STAT_MIN};
