use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Narrative,
    PlayerAction,
}

/// One line of the transcript. Rendering is left to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub kind: EntryKind,
    pub text: String,
}

impl Entry {
    pub fn narrative(text: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Narrative,
            text: text.into(),
        }
    }

    pub fn player_action(text: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::PlayerAction,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub story: String,
    pub choices: Vec<String>,
}

/// Options offered to the player for the current turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChoiceSet(Vec<String>);

impl ChoiceSet {
    pub const MAX_CHOICES: usize = 3;

    /// Keeps at most the first [`Self::MAX_CHOICES`] options.
    pub fn new<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            choices
                .into_iter()
                .take(Self::MAX_CHOICES)
                .map(Into::into)
                .collect(),
        )
    }

    pub fn from_scenario(scenario: &Scenario) -> Self {
        Self::new(scenario.choices.iter().cloned())
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn contains(&self, choice: &str) -> bool {
        self.0.iter().any(|candidate| candidate == choice)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}
