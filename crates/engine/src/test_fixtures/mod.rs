//! Common test helpers: a small catalog and ready-made characters.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_fixtures::{fixture_registry, sample_character};
//!
//! #[test]
//! fn test_roster_lists_saved() {
//!     let character = sample_character("Ada");
//!     // ... test logic
//! }
//! ```

use std::sync::Arc;

use nimbleforge_domain::{
    CatalogData, CatalogRegistry, Character, CharacterIdentity, CharacterName, Skill,
    SkillPointMap, StatAxis, StatMap, CREATION_LEVEL,
};

// =============================================================================
// Catalog
// =============================================================================

/// Fighter / Human / Sage, plus one extra entry per catalog for "pick another" tests.
pub const FIXTURE_CATALOG: &str = r#"{
    "classes": [
        {
            "id": "fighter", "name": "Fighter", "image": "", "teasers": [],
            "hitPoints": 10,
            "hitDice": { "dice": "d10", "quantity": 1 },
            "saves": { "strength": "Advantaged", "dexterity": "Normal",
                       "intelligence": "Disadvantaged", "will": "Normal" }
        },
        {
            "id": "hunter", "name": "The Hunter", "image": "", "teasers": [],
            "hitPoints": 13,
            "hitDice": { "dice": "d8", "quantity": 1 },
            "saves": { "strength": "Normal", "dexterity": "Advantaged",
                       "intelligence": "Disadvantaged", "will": "Normal" }
        }
    ],
    "ancestries": [
        { "id": "human", "name": "Human", "image": "", "teasers": [],
          "description": "Adaptable and everywhere.", "size": "Medium" },
        { "id": "elf", "name": "Elf", "image": "", "teasers": [],
          "description": "Long-lived and keen-eyed.", "size": "medium" }
    ],
    "backgrounds": [
        { "id": "sage", "name": "Sage", "description": "A life of study.",
          "teasers": [], "image": "" },
        { "id": "soldier", "name": "Soldier", "description": "Trained for war.",
          "teasers": [], "image": "" }
    ]
}"#;

pub fn fixture_registry() -> Arc<CatalogRegistry> {
    let data = CatalogData::from_json(FIXTURE_CATALOG).expect("fixture catalog parses");
    Arc::new(CatalogRegistry::from_data(data).expect("fixture catalog is valid"))
}

// =============================================================================
// Wizard Inputs
// =============================================================================

pub fn scenario_stats() -> StatMap {
    StatMap::from([
        (StatAxis::Strength, 1),
        (StatAxis::Dexterity, 3),
        (StatAxis::Intelligence, 5),
        (StatAxis::Will, 2),
    ])
}

pub fn scenario_skills() -> SkillPointMap {
    SkillPointMap::from([(Skill::Arcana, 2), (Skill::Might, 3)])
}

// =============================================================================
// Characters
// =============================================================================

/// A finalized Fighter / Human / Sage with the given name.
pub fn sample_character(name: &str) -> Character {
    let registry = fixture_registry();
    let identity = CharacterIdentity::new(CharacterName::new(name))
        .with_height("6ft")
        .with_weight("180lb")
        .with_age("30");
    Character::finalize(
        identity,
        CREATION_LEVEL,
        registry.classes().get_by_id("fighter").expect("fighter"),
        registry.ancestries().get_by_id("human").expect("human"),
        registry.backgrounds().get_by_id("sage").expect("sage"),
        &scenario_stats(),
        &scenario_skills(),
    )
    .expect("sample character is valid")
}
