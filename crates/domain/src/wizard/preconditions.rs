//! What each step requires before the user may confirm it.
//!
//! These checks belong to the steps. The reducer never calls them, so a
//! caller that skips them can still walk the wizard with an incomplete draft.

use crate::catalog::CatalogRegistry;
use crate::error::DomainError;
use crate::value_objects::{CharacterName, Stat, StatAxis, StatMap};

use super::{DraftPatch, WizardStep};

/// Points a new character spends across skills.
pub const DEFAULT_SKILL_POINT_BUDGET: u32 = 4;

/// Tunable step rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepRules {
    pub skill_point_budget: u32,
}

impl Default for StepRules {
    fn default() -> Self {
        Self {
            skill_point_budget: DEFAULT_SKILL_POINT_BUDGET,
        }
    }
}

/// Check that `patch` satisfies what `step` requires.
pub fn check_step(
    step: WizardStep,
    patch: &DraftPatch,
    registry: &CatalogRegistry,
    rules: &StepRules,
) -> Result<(), DomainError> {
    match step {
        WizardStep::ChooseClass => {
            let id = required_choice(patch.class_id.as_deref(), "class")?;
            if !registry.classes().contains_id(id) {
                return Err(DomainError::not_found("Class", id));
            }
            Ok(())
        }
        WizardStep::ChooseAncestry => {
            let id = required_choice(patch.ancestry_id.as_deref(), "ancestry")?;
            if !registry.ancestries().contains_id(id) {
                return Err(DomainError::not_found("Ancestry", id));
            }
            Ok(())
        }
        WizardStep::ChooseBackground => {
            let id = required_choice(patch.background_id.as_deref(), "background")?;
            if !registry.backgrounds().contains_id(id) {
                return Err(DomainError::not_found("Background", id));
            }
            Ok(())
        }
        WizardStep::AssignStats => {
            let stats = patch
                .stats
                .as_ref()
                .ok_or_else(|| DomainError::validation("Assign a value to every stat"))?;
            for axis in StatAxis::ALL {
                let value = stats.get(&axis).ok_or_else(|| {
                    DomainError::validation(format!("Missing value for {}", axis.display_name()))
                })?;
                Stat::for_axis(axis, *value)?;
            }
            Ok(())
        }
        WizardStep::AssignSkills => {
            let points = patch
                .skill_points
                .as_ref()
                .ok_or_else(|| DomainError::validation("Spend your skill points"))?;
            let spent = points.values().map(|p| u64::from(*p)).sum::<u64>();
            let budget = u64::from(rules.skill_point_budget);
            if spent != budget {
                return Err(DomainError::validation(format!(
                    "Spend exactly {} skill points ({} spent)",
                    budget, spent
                )));
            }
            Ok(())
        }
        WizardStep::CharacterDetails => {
            let fields = [
                ("name", &patch.name),
                ("height", &patch.height),
                ("weight", &patch.weight),
                ("age", &patch.age),
            ];
            let missing: Vec<&str> = fields
                .iter()
                .filter(|(_, value)| value.as_deref().map_or(true, |v| v.trim().is_empty()))
                .map(|(field, _)| *field)
                .collect();
            if !missing.is_empty() {
                return Err(DomainError::validation(format!(
                    "Fill in {}",
                    missing.join(", ")
                )));
            }
            CharacterName::check_entry(patch.name.as_deref().unwrap_or_default())
        }
        WizardStep::Review => Ok(()),
    }
}

fn required_choice<'a>(id: Option<&'a str>, kind: &str) -> Result<&'a str, DomainError> {
    id.filter(|id| !id.trim().is_empty())
        .ok_or_else(|| DomainError::validation(format!("Choose a {}", kind)))
}

/// Preset stat arrays offered by the Assign Stats step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatArray {
    Standard,
    Balanced,
    MinMax,
}

impl StatArray {
    pub const ALL: [StatArray; 3] = [Self::Standard, Self::Balanced, Self::MinMax];

    pub fn label(self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Balanced => "Balanced",
            Self::MinMax => "Min-Max",
        }
    }

    /// Values in the order they are handed out.
    pub fn values(self) -> [i32; 4] {
        match self {
            Self::Standard => [2, 2, 0, -1],
            Self::Balanced => [2, 1, 1, 0],
            Self::MinMax => [3, 1, -1, -1],
        }
    }

    /// Hand the array's values to the given axes, first value to first axis.
    /// Every axis must appear exactly once.
    pub fn assign(self, order: [StatAxis; 4]) -> Result<StatMap, DomainError> {
        let stats: StatMap = order.into_iter().zip(self.values()).collect();
        if stats.len() != StatAxis::ALL.len() {
            return Err(DomainError::validation(
                "Each stat must receive exactly one value",
            ));
        }
        Ok(stats)
    }
}
