//! Character creation wizard as a pure reducer.
//!
//! The state is `(step, draft)`. Each transition consumes the current state
//! and returns a new one; persistence and rendering live elsewhere.

mod draft;
mod preconditions;

pub use draft::{CharacterDraft, DraftPatch};
pub use preconditions::{check_step, StatArray, StepRules, DEFAULT_SKILL_POINT_BUDGET};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// The seven wizard steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum WizardStep {
    ChooseClass,
    ChooseAncestry,
    ChooseBackground,
    AssignStats,
    AssignSkills,
    CharacterDetails,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 7] = [
        Self::ChooseClass,
        Self::ChooseAncestry,
        Self::ChooseBackground,
        Self::AssignStats,
        Self::AssignSkills,
        Self::CharacterDetails,
        Self::Review,
    ];

    pub const FIRST: WizardStep = Self::ChooseClass;
    pub const TERMINAL: WizardStep = Self::Review;

    /// 1-based position of the step.
    pub fn number(self) -> u8 {
        match self {
            Self::ChooseClass => 1,
            Self::ChooseAncestry => 2,
            Self::ChooseBackground => 3,
            Self::AssignStats => 4,
            Self::AssignSkills => 5,
            Self::CharacterDetails => 6,
            Self::Review => 7,
        }
    }

    pub fn from_number(number: u8) -> Result<Self, DomainError> {
        Self::ALL
            .into_iter()
            .find(|step| step.number() == number)
            .ok_or_else(|| {
                DomainError::invalid_state_transition(format!(
                    "No wizard step {} (valid steps are 1..={})",
                    number,
                    Self::ALL.len()
                ))
            })
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::ChooseClass => "Choose Class",
            Self::ChooseAncestry => "Choose Ancestry",
            Self::ChooseBackground => "Choose Background",
            Self::AssignStats => "Assign Stats",
            Self::AssignSkills => "Assign Skills",
            Self::CharacterDetails => "Character Details",
            Self::Review => "Review",
        }
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1).ok()
    }

    pub fn previous(self) -> Option<Self> {
        self.number()
            .checked_sub(1)
            .and_then(|n| Self::from_number(n).ok())
    }

    pub fn is_terminal(self) -> bool {
        self == Self::TERMINAL
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.title())
    }
}

impl TryFrom<u8> for WizardStep {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_number(value)
    }
}

impl From<WizardStep> for u8 {
    fn from(step: WizardStep) -> u8 {
        step.number()
    }
}

/// A user action the wizard reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardAction {
    /// Merge the patch into the draft and advance one step.
    Confirm(DraftPatch),
    /// Go back one step, keeping every draft field.
    Back,
    /// Move directly to any step (used from Review to revisit a choice).
    JumpTo(WizardStep),
}

/// The wizard state: where the user is and what they have entered so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardState {
    step: WizardStep,
    draft: CharacterDraft,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardState {
    /// Step 1 with an empty draft.
    pub fn new() -> Self {
        Self {
            step: WizardStep::FIRST,
            draft: CharacterDraft::default(),
        }
    }

    /// Resume from a saved point. The caller decides whether to resume.
    pub fn resume(step: WizardStep, draft: CharacterDraft) -> Self {
        Self { step, draft }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &CharacterDraft {
        &self.draft
    }

    pub fn into_parts(self) -> (WizardStep, CharacterDraft) {
        (self.step, self.draft)
    }

    /// Apply one action. Returns the next state or why the action is not allowed.
    ///
    /// Confirm never validates the patch; step preconditions are checked by
    /// the steps themselves (see [`check_step`]).
    pub fn reduce(self, action: WizardAction) -> Result<Self, DomainError> {
        match action {
            WizardAction::Confirm(patch) => {
                let next = self.step.next().ok_or_else(|| {
                    DomainError::invalid_state_transition(
                        "Review cannot be confirmed; complete the wizard instead",
                    )
                })?;
                Ok(Self {
                    step: next,
                    draft: self.draft.merged(patch),
                })
            }
            WizardAction::Back => {
                let previous = self.step.previous().ok_or_else(|| {
                    DomainError::invalid_state_transition("Already at the first step")
                })?;
                Ok(Self {
                    step: previous,
                    draft: self.draft,
                })
            }
            WizardAction::JumpTo(step) => Ok(Self {
                step,
                draft: self.draft,
            }),
        }
    }
}
