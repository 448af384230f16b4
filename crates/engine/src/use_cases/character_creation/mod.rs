//! Character creation use cases.
//!
//! [`CharacterCreator`] opens wizard sessions; a [`CharacterCreation`]
//! session drives one character from the first step to the saved record.
//! The session owns the wizard state, auto-saves the draft after every
//! confirmed step and finalizes through the character model on completion.

mod error;

use std::sync::Arc;

pub use error::CharacterCreationError;

use nimbleforge_domain::{
    check_step, CatalogEntry, CatalogRegistry, Character, CharacterDraft, CharacterId,
    CharacterIdentity, CharacterName, DomainError, DraftPatch, StepRules, WizardAction,
    WizardState, WizardStep, CREATION_LEVEL,
};

use crate::infrastructure::ports::{CharacterStore, StorageError};

/// Result of a best-effort write that must not block the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistStatus {
    Saved,
    /// Nothing was written. Reaching Review keeps the last snapshot.
    Skipped,
    Failed(StorageError),
}

impl PersistStatus {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmOutcome {
    /// The step the wizard moved to.
    pub step: WizardStep,
    pub autosave: PersistStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionOutcome {
    pub id: CharacterId,
    pub character: Character,
    /// Whether the in-progress draft was removed after the save.
    pub draft_cleared: PersistStatus,
}

/// Opens creation sessions against one catalog and one store.
pub struct CharacterCreator {
    registry: Arc<CatalogRegistry>,
    store: Arc<dyn CharacterStore>,
    rules: StepRules,
}

impl CharacterCreator {
    pub fn new(
        registry: Arc<CatalogRegistry>,
        store: Arc<dyn CharacterStore>,
        rules: StepRules,
    ) -> Self {
        Self {
            registry,
            store,
            rules,
        }
    }

    /// Start from step 1 with an empty draft, discarding any saved draft.
    pub fn start_new(&self) -> Result<CharacterCreation, CharacterCreationError> {
        self.store.clear_draft()?;
        tracing::info!("Starting new character");
        Ok(self.session(WizardState::new()))
    }

    /// Resume the saved draft, if there is one.
    pub fn resume(&self) -> Result<Option<CharacterCreation>, CharacterCreationError> {
        let Some(snapshot) = self.store.load_draft()? else {
            return Ok(None);
        };
        tracing::info!(
            step = snapshot.current_step.number(),
            last_saved = %snapshot.last_saved,
            "Resuming character draft"
        );
        Ok(Some(self.session(WizardState::resume(
            snapshot.current_step,
            snapshot.draft,
        ))))
    }

    /// Start a session from an explicit state. The caller decides where it begins.
    pub fn session(&self, state: WizardState) -> CharacterCreation {
        CharacterCreation {
            registry: self.registry.clone(),
            store: self.store.clone(),
            rules: self.rules,
            state,
            completed: None,
        }
    }

    pub fn has_draft(&self) -> Result<bool, CharacterCreationError> {
        Ok(self.store.has_draft()?)
    }
}

/// One pass through the creation wizard.
pub struct CharacterCreation {
    registry: Arc<CatalogRegistry>,
    store: Arc<dyn CharacterStore>,
    rules: StepRules,
    state: WizardState,
    completed: Option<CharacterId>,
}

impl CharacterCreation {
    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn step(&self) -> WizardStep {
        self.state.step()
    }

    pub fn draft(&self) -> &CharacterDraft {
        self.state.draft()
    }

    /// Check `patch` against the current step's requirements without moving.
    pub fn validate_step(&self, patch: &DraftPatch) -> Result<(), DomainError> {
        check_step(self.state.step(), patch, &self.registry, &self.rules)
    }

    /// Merge `patch`, advance one step and auto-save the draft.
    ///
    /// A failed auto-save does not undo the move; it is logged and reported
    /// in the outcome. Landing on Review writes nothing, so the stored
    /// snapshot stays at Character Details.
    pub fn confirm_step(
        &mut self,
        patch: DraftPatch,
    ) -> Result<ConfirmOutcome, CharacterCreationError> {
        let from = self.state.step();
        self.apply(WizardAction::Confirm(patch))?;
        let step = self.state.step();
        tracing::debug!(from = from.number(), to = step.number(), "Step confirmed");

        if step.is_terminal() {
            return Ok(ConfirmOutcome {
                step,
                autosave: PersistStatus::Skipped,
            });
        }

        let autosave = match self.store.save_draft(self.state.draft(), step) {
            Ok(()) => PersistStatus::Saved,
            Err(e) => {
                tracing::warn!(error = %e, step = step.number(), "Draft auto-save failed");
                PersistStatus::Failed(e)
            }
        };
        Ok(ConfirmOutcome { step, autosave })
    }

    /// Go back one step. Draft fields are kept.
    pub fn back(&mut self) -> Result<WizardStep, CharacterCreationError> {
        self.apply(WizardAction::Back)?;
        tracing::debug!(to = self.state.step().number(), "Stepped back");
        Ok(self.state.step())
    }

    /// Move straight to `step`, usually from Review to revise a choice.
    pub fn jump_to(&mut self, step: WizardStep) -> Result<WizardStep, CharacterCreationError> {
        self.apply(WizardAction::JumpTo(step))?;
        tracing::debug!(to = step.number(), "Jumped to step");
        Ok(step)
    }

    /// Finalize the draft, save the character and clear the saved draft.
    ///
    /// On any failure the session stays at Review with its draft intact.
    pub fn complete(&mut self) -> Result<CompletionOutcome, CharacterCreationError> {
        if let Some(id) = self.completed {
            return Err(CharacterCreationError::AlreadyCompleted(id));
        }
        if !self.state.step().is_terminal() {
            return Err(CharacterCreationError::NotAtReview(self.state.step()));
        }

        let character = self.finalize_draft()?;
        let id = self.store.save_character(&character)?;
        self.completed = Some(id);

        let draft_cleared = match self.store.clear_draft() {
            Ok(()) => PersistStatus::Saved,
            Err(e) => {
                tracing::warn!(error = %e, character_id = %id, "Could not clear draft after save");
                PersistStatus::Failed(e)
            }
        };

        tracing::info!(
            character_id = %id,
            name = %character.name(),
            class = %character.class().name(),
            "Character created"
        );
        Ok(CompletionOutcome {
            id,
            character,
            draft_cleared,
        })
    }

    /// Drop the saved draft and start over from step 1.
    pub fn discard_draft(&mut self) -> Result<(), CharacterCreationError> {
        self.store.clear_draft()?;
        self.state = WizardState::new();
        self.completed = None;
        tracing::info!("Character draft discarded");
        Ok(())
    }

    fn apply(&mut self, action: WizardAction) -> Result<(), CharacterCreationError> {
        if let Some(id) = self.completed {
            return Err(CharacterCreationError::AlreadyCompleted(id));
        }
        let next = self
            .state
            .clone()
            .reduce(action)
            .map_err(|e| CharacterCreationError::Navigation(e.to_string()))?;
        self.state = next;
        Ok(())
    }

    fn finalize_draft(&self) -> Result<Character, CharacterCreationError> {
        let draft = self.state.draft();
        let catalogs = &self.registry;
        let class = resolve(draft.class_id.as_deref(), "class", |id| {
            catalogs.classes().get_by_id(id)
        })?;
        let ancestry = resolve(draft.ancestry_id.as_deref(), "ancestry", |id| {
            catalogs.ancestries().get_by_id(id)
        })?;
        let background = resolve(draft.background_id.as_deref(), "background", |id| {
            catalogs.backgrounds().get_by_id(id)
        })?;

        let name = CharacterName::new(draft.name.clone().unwrap_or_default());
        let identity = CharacterIdentity::new(name)
            .with_height(draft.height.clone().unwrap_or_default())
            .with_weight(draft.weight.clone().unwrap_or_default())
            .with_age(draft.age.clone().unwrap_or_default());

        let character = Character::finalize(
            identity,
            CREATION_LEVEL,
            class,
            ancestry,
            background,
            &draft.stats,
            &draft.skill_points,
        )
        .inspect_err(|e| tracing::info!(error = %e, "Character rejected at review"))?;
        Ok(character)
    }
}

fn resolve<'a, D: CatalogEntry + 'a>(
    id: Option<&str>,
    selection: &'static str,
    lookup: impl FnOnce(&str) -> Option<&'a D>,
) -> Result<&'a D, CharacterCreationError> {
    let id = id.ok_or(CharacterCreationError::MissingSelection(selection))?;
    lookup(id).ok_or_else(|| CharacterCreationError::UnknownDefinition {
        kind: D::KIND,
        id: id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockCharacterStore;
    use crate::test_fixtures::{fixture_registry, scenario_skills, scenario_stats};
    use nimbleforge_domain::{Skill, SkillPointMap, StatAxis, StatMap};

    fn creator(store: MockCharacterStore) -> CharacterCreator {
        CharacterCreator::new(fixture_registry(), Arc::new(store), StepRules::default())
    }

    fn accepting_store() -> MockCharacterStore {
        let mut store = MockCharacterStore::new();
        store.expect_save_draft().returning(|_, _| Ok(()));
        store.expect_clear_draft().returning(|| Ok(()));
        store
    }

    fn walk_to_review(session: &mut CharacterCreation, skills: SkillPointMap) {
        session.confirm_step(DraftPatch::class("fighter")).unwrap();
        session.confirm_step(DraftPatch::ancestry("human")).unwrap();
        session.confirm_step(DraftPatch::background("sage")).unwrap();
        session
            .confirm_step(DraftPatch::stats(scenario_stats()))
            .unwrap();
        session.confirm_step(DraftPatch::skills(skills)).unwrap();
        session
            .confirm_step(DraftPatch::details("Test", "6ft", "180lb", "30"))
            .unwrap();
        assert_eq!(session.step(), WizardStep::Review);
    }

    #[test]
    fn every_confirm_autosaves_the_new_step() {
        let mut store = MockCharacterStore::new();
        store.expect_clear_draft().times(1).returning(|| Ok(()));
        store
            .expect_save_draft()
            .withf(|draft, step| {
                *step == WizardStep::ChooseAncestry && draft.class_id.as_deref() == Some("fighter")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let mut session = creator(store).start_new().unwrap();
        let outcome = session.confirm_step(DraftPatch::class("fighter")).unwrap();
        assert_eq!(outcome.step, WizardStep::ChooseAncestry);
        assert!(outcome.autosave.is_saved());
    }

    #[test]
    fn failed_autosave_still_advances() {
        let mut store = MockCharacterStore::new();
        store
            .expect_save_draft()
            .returning(|_, _| Err(StorageError::backend("set", "quota exceeded")));

        let mut session = creator(store).session(WizardState::new());
        let outcome = session.confirm_step(DraftPatch::class("fighter")).unwrap();
        assert_eq!(outcome.step, WizardStep::ChooseAncestry);
        assert!(matches!(outcome.autosave, PersistStatus::Failed(_)));
        assert_eq!(session.draft().class_id.as_deref(), Some("fighter"));
    }

    #[test]
    fn reaching_review_does_not_autosave() {
        let mut store = MockCharacterStore::new();
        store
            .expect_save_draft()
            .withf(|_, step| *step != WizardStep::Review)
            .times(5)
            .returning(|_, _| Ok(()));

        let mut session = creator(store).session(WizardState::new());
        walk_to_review(&mut session, scenario_skills());

        let state = WizardState::resume(
            WizardStep::CharacterDetails,
            session.draft().clone(),
        );
        let mut store = MockCharacterStore::new();
        store.expect_save_draft().never();
        let mut session = creator(store).session(state);
        let outcome = session
            .confirm_step(DraftPatch::details("Test", "6ft", "180lb", "30"))
            .unwrap();
        assert_eq!(outcome.step, WizardStep::Review);
        assert_eq!(outcome.autosave, PersistStatus::Skipped);
    }

    #[test]
    fn back_and_jump_do_not_persist() {
        // No save_draft expectation: a call would panic the mock.
        let store = MockCharacterStore::new();
        let state = WizardState::resume(WizardStep::Review, CharacterDraft::default());
        let mut session = creator(store).session(state);

        assert_eq!(session.back().unwrap(), WizardStep::CharacterDetails);
        assert_eq!(
            session.jump_to(WizardStep::ChooseClass).unwrap(),
            WizardStep::ChooseClass
        );
        assert!(matches!(
            session.back(),
            Err(CharacterCreationError::Navigation(_))
        ));
    }

    #[test]
    fn complete_saves_and_clears_draft() {
        let mut store = accepting_store();
        let id = CharacterId::new();
        store
            .expect_save_character()
            .withf(|c| c.skill(Skill::Arcana) == 7 && c.skill(Skill::Might) == 4)
            .times(1)
            .returning(move |_| Ok(id));

        let mut session = creator(store).session(WizardState::new());
        walk_to_review(
            &mut session,
            SkillPointMap::from([(Skill::Arcana, 2), (Skill::Might, 3)]),
        );

        let outcome = session.complete().unwrap();
        assert_eq!(outcome.id, id);
        assert!(outcome.draft_cleared.is_saved());
        assert_eq!(outcome.character.hit_points(), 10);
        assert!(matches!(
            session.complete(),
            Err(CharacterCreationError::AlreadyCompleted(_))
        ));
    }

    #[test]
    fn rule_violation_keeps_session_at_review() {
        let mut store = MockCharacterStore::new();
        store.expect_save_draft().returning(|_, _| Ok(()));
        store.expect_save_character().never();
        store.expect_clear_draft().never();

        let mut session = creator(store).session(WizardState::new());
        walk_to_review(&mut session, SkillPointMap::from([(Skill::Arcana, 8)]));

        let err = session.complete().unwrap_err();
        assert!(matches!(
            err,
            CharacterCreationError::Rules(DomainError::SkillTotalExceeded {
                skill: Skill::Arcana,
                total: 13,
                ..
            })
        ));
        assert_eq!(session.step(), WizardStep::Review);
        assert_eq!(
            session.draft().skill_points,
            SkillPointMap::from([(Skill::Arcana, 8)])
        );
    }

    #[test]
    fn nameless_draft_still_completes() {
        let mut store = MockCharacterStore::new();
        store
            .expect_save_character()
            .withf(|c| c.name().is_empty())
            .times(1)
            .returning(|_| Ok(CharacterId::new()));
        store.expect_clear_draft().times(1).returning(|| Ok(()));

        let draft = CharacterDraft::default()
            .merged(DraftPatch::class("fighter"))
            .merged(DraftPatch::ancestry("human"))
            .merged(DraftPatch::background("sage"))
            .merged(DraftPatch::stats(scenario_stats()))
            .merged(DraftPatch::skills(scenario_skills()));
        let state = WizardState::resume(WizardStep::Review, draft);
        let mut session = creator(store).session(state);

        let outcome = session.complete().unwrap();
        assert_eq!(outcome.character.name().as_str(), "");
        assert_eq!(outcome.character.skill(Skill::Arcana), 7);
    }

    #[test]
    fn complete_before_review_is_rejected() {
        let mut session = creator(MockCharacterStore::new()).session(WizardState::new());
        assert!(matches!(
            session.complete(),
            Err(CharacterCreationError::NotAtReview(WizardStep::ChooseClass))
        ));
    }

    #[test]
    fn unknown_or_missing_definitions_are_reported() {
        let draft = CharacterDraft::default()
            .merged(DraftPatch::class("wizard"))
            .merged(DraftPatch::details("Test", "", "", ""));
        let state = WizardState::resume(WizardStep::Review, draft);
        let mut session = creator(MockCharacterStore::new()).session(state);
        assert!(matches!(
            session.complete(),
            Err(CharacterCreationError::UnknownDefinition { kind: "Class", .. })
        ));

        let state = WizardState::resume(WizardStep::Review, CharacterDraft::default());
        let mut session = creator(MockCharacterStore::new()).session(state);
        assert!(matches!(
            session.complete(),
            Err(CharacterCreationError::MissingSelection("class"))
        ));
    }

    #[test]
    fn storage_failure_on_save_is_surfaced() {
        let mut store = MockCharacterStore::new();
        store.expect_save_draft().returning(|_, _| Ok(()));
        store
            .expect_save_character()
            .returning(|_| Err(StorageError::backend("set", "read-only")));
        store.expect_clear_draft().never();

        let mut session = creator(store).session(WizardState::new());
        walk_to_review(
            &mut session,
            SkillPointMap::from([(Skill::Arcana, 2), (Skill::Might, 2)]),
        );
        assert!(matches!(
            session.complete(),
            Err(CharacterCreationError::Storage(_))
        ));
        assert_eq!(session.step(), WizardStep::Review);
    }

    #[test]
    fn validate_step_uses_current_step_and_budget() {
        let session = creator(MockCharacterStore::new())
            .session(WizardState::resume(WizardStep::AssignSkills, CharacterDraft::default()));
        assert!(session
            .validate_step(&DraftPatch::skills(SkillPointMap::from([(Skill::Lore, 4)])))
            .is_ok());
        assert!(session
            .validate_step(&DraftPatch::skills(SkillPointMap::from([(Skill::Lore, 5)])))
            .is_err());

        let session = creator(MockCharacterStore::new())
            .session(WizardState::resume(WizardStep::AssignStats, CharacterDraft::default()));
        assert!(session
            .validate_step(&DraftPatch::stats(StatMap::from([(StatAxis::Will, 2)])))
            .is_err());
    }

    #[test]
    fn resume_uses_saved_snapshot() {
        let mut store = MockCharacterStore::new();
        store.expect_load_draft().returning(|| {
            Ok(Some(nimbleforge_domain::DraftSnapshot::new(
                CharacterDraft::default().merged(DraftPatch::class("hunter")),
                WizardStep::ChooseAncestry,
                chrono::Utc::now(),
            )))
        });

        let session = creator(store).resume().unwrap().unwrap();
        assert_eq!(session.step(), WizardStep::ChooseAncestry);
        assert_eq!(session.draft().class_id.as_deref(), Some("hunter"));
    }

    #[test]
    fn discard_resets_to_first_step() {
        let mut store = MockCharacterStore::new();
        store.expect_clear_draft().times(1).returning(|| Ok(()));
        let state = WizardState::resume(
            WizardStep::AssignStats,
            CharacterDraft::default().merged(DraftPatch::class("fighter")),
        );
        let mut session = creator(store).session(state);

        session.discard_draft().unwrap();
        assert_eq!(session.step(), WizardStep::ChooseClass);
        assert_eq!(session.draft(), &CharacterDraft::default());
    }
}
