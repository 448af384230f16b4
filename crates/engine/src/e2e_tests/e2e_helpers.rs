//! Shared setup for the end-to-end tests.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use nimbleforge_domain::{DraftPatch, SkillPointMap, StatMap, WizardStep};

use crate::app::App;
use crate::infrastructure::clock::{FixedClock, SequentialIds};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::persistence::InMemoryKeyValueStore;
use crate::test_fixtures::fixture_registry;
use crate::use_cases::CharacterCreation;

/// A fully wired app over in-memory storage.
pub struct E2ETestContext {
    pub app: App,
    /// The raw store under the app, for inspecting what was written.
    pub storage: Arc<InMemoryKeyValueStore>,
}

impl E2ETestContext {
    pub fn setup() -> Self {
        let storage = Arc::new(InMemoryKeyValueStore::new());
        let app = app_over(storage.clone());
        Self { app, storage }
    }

    /// A second app over the same storage, as after a restart.
    pub fn restart(&self) -> App {
        app_over(self.storage.clone())
    }

    pub fn new_session(&self) -> CharacterCreation {
        self.app
            .use_cases
            .creation
            .start_new()
            .expect("new session should start")
    }
}

fn app_over(storage: Arc<InMemoryKeyValueStore>) -> App {
    let clock = FixedClock(Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap());
    App::new(
        AppConfig::default(),
        fixture_registry(),
        storage,
        Arc::new(clock),
        Arc::new(SequentialIds::new()),
    )
}

/// Everything a user enters across the six input steps.
#[derive(Debug, Clone)]
pub struct WizardInputs {
    pub class: &'static str,
    pub ancestry: &'static str,
    pub background: &'static str,
    pub stats: StatMap,
    pub skills: SkillPointMap,
    pub name: &'static str,
}

impl WizardInputs {
    /// The patch the given step confirms. Review confirms nothing.
    pub fn patch_for(&self, step: WizardStep) -> Option<DraftPatch> {
        match step {
            WizardStep::ChooseClass => Some(DraftPatch::class(self.class)),
            WizardStep::ChooseAncestry => Some(DraftPatch::ancestry(self.ancestry)),
            WizardStep::ChooseBackground => Some(DraftPatch::background(self.background)),
            WizardStep::AssignStats => Some(DraftPatch::stats(self.stats.clone())),
            WizardStep::AssignSkills => Some(DraftPatch::skills(self.skills.clone())),
            WizardStep::CharacterDetails => {
                Some(DraftPatch::details(self.name, "5ft 10in", "170lb", "27"))
            }
            WizardStep::Review => None,
        }
    }
}

/// Confirm every remaining step until the session reaches Review.
pub fn confirm_until_review(session: &mut CharacterCreation, inputs: &WizardInputs) {
    while let Some(patch) = inputs.patch_for(session.step()) {
        let outcome = session.confirm_step(patch).expect("confirm should succeed");
        assert!(!outcome.autosave.is_failed(), "auto-save should not fail");
    }
    assert_eq!(session.step(), WizardStep::Review);
}
