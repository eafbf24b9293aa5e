//! Seed scenarios a session can start from.

use std::{fs, path::Path};

use rand::Rng;

use crate::{domain::Scenario, error::CatalogError};

const BUILTIN: &[(&str, [&str; 3])] = &[
    (
        "You wake up in a mysterious forest. The trees whisper ancient secrets, and a faint light flickers between the trunks.",
        ["Follow the light", "Climb the tallest tree", "Listen to the whispers"],
    ),
    (
        "Rain hammers the deck of a ship drifting without a crew. Below you, something knocks on the hull from the inside.",
        ["Go below deck", "Search the captain's cabin", "Signal for help"],
    ),
    (
        "The last train out of the city stops at a station that is not on any map. The doors slide open onto silence.",
        ["Step onto the platform", "Stay in your seat", "Wake the sleeping passenger"],
    ),
    (
        "A dragon lands in the village square and asks, politely, for directions to the castle.",
        ["Give honest directions", "Send it the wrong way", "Ask what it wants there"],
    ),
    (
        "Your lantern gutters at the entrance of a dwarven mine. Fresh footprints lead inside, but none lead out.",
        ["Follow the footprints", "Relight the lantern", "Call into the darkness"],
    ),
    (
        "An old map falls out of a library book. An X marks a spot beneath the town clock tower.",
        ["Visit the clock tower", "Ask the librarian about the book", "Study the map closely"],
    ),
];

#[derive(Debug, Clone)]
pub struct ScenarioCatalog {
    scenarios: Vec<Scenario>,
}

impl ScenarioCatalog {
    pub const MIN_CHOICES: usize = 3;

    pub fn builtin() -> Self {
        Self {
            scenarios: BUILTIN
                .iter()
                .map(|(story, choices)| Scenario {
                    story: (*story).to_string(),
                    choices: choices.iter().map(|choice| (*choice).to_string()).collect(),
                })
                .collect(),
        }
    }

    pub fn new(scenarios: Vec<Scenario>) -> Result<Self, CatalogError> {
        if scenarios.is_empty() {
            return Err(CatalogError::Empty);
        }

        for (index, scenario) in scenarios.iter().enumerate() {
            if scenario.story.trim().is_empty() {
                return Err(CatalogError::BlankStory { index });
            }
            if scenario.choices.len() < Self::MIN_CHOICES {
                return Err(CatalogError::TooFewChoices {
                    index,
                    found: scenario.choices.len(),
                    required: Self::MIN_CHOICES,
                });
            }
        }

        Ok(Self { scenarios })
    }

    /// Reads a JSON array of `{ "story", "choices" }` records.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let scenarios: Vec<Scenario> =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        Self::new(scenarios)
    }

    /// Uniform pick by index over the whole catalog.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &Scenario {
        let index = rng.gen_range(0..self.scenarios.len());
        &self.scenarios[index]
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}
