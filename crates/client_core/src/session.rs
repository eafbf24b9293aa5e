use shared::{
    domain::{ChoiceSet, Entry, Scenario},
    protocol::StoryRequest,
};
use uuid::Uuid;

/// What the player has lined up for the next turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingAction {
    pub selected_choice: Option<String>,
    pub addon: String,
}

impl PendingAction {
    pub fn has_input(&self) -> bool {
        self.selected_choice.is_some() || !self.addon.trim().is_empty()
    }

    pub fn to_request(&self) -> StoryRequest {
        StoryRequest {
            choice: self.selected_choice.clone().unwrap_or_default(),
            addon: self.addon.trim().to_string(),
        }
    }

    /// Text echoed back into the transcript; typed input wins over a choice.
    pub fn echo_text(&self) -> String {
        let addon = self.addon.trim();
        if addon.is_empty() {
            self.selected_choice.clone().unwrap_or_default()
        } else {
            addon.to_string()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub transcript: Vec<Entry>,
    pub choices: ChoiceSet,
    pub pending: PendingAction,
    pub loading: bool,
}

impl SessionSnapshot {
    pub fn can_submit(&self) -> bool {
        !self.loading && self.pending.has_input()
    }
}

#[derive(Debug, Clone)]
pub enum SessionEvent {
    StateChanged(SessionSnapshot),
    /// The view should bring this transcript entry into sight.
    ScrollToLatest { entry_index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Guard rejected the submission; nothing was sent.
    Skipped,
    Advanced,
    Failed,
}

pub(crate) struct SessionState {
    pub(crate) session_id: Uuid,
    pub(crate) transcript: Vec<Entry>,
    pub(crate) choices: ChoiceSet,
    pub(crate) pending: PendingAction,
    pub(crate) loading: bool,
}

impl SessionState {
    pub(crate) fn seeded(scenario: &Scenario) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            transcript: vec![Entry::narrative(scenario.story.clone())],
            choices: ChoiceSet::from_scenario(scenario),
            pending: PendingAction::default(),
            loading: false,
        }
    }

    pub(crate) fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.session_id,
            transcript: self.transcript.clone(),
            choices: self.choices.clone(),
            pending: self.pending.clone(),
            loading: self.loading,
        }
    }

    pub(crate) fn latest_entry_index(&self) -> usize {
        self.transcript.len().saturating_sub(1)
    }
}
