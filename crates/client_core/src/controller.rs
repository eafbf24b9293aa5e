//! Turn-taking loop between player input and the transcript.

use std::{sync::Arc, time::Duration};

use rand::Rng;
use shared::{
    catalog::ScenarioCatalog,
    domain::{ChoiceSet, Entry},
};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use crate::{
    session::{SessionEvent, SessionSnapshot, SessionState, TurnOutcome},
    transport::StoryBackend,
};

pub const DEFAULT_SCROLL_DELAY: Duration = Duration::from_millis(100);
const EVENT_CAPACITY: usize = 64;

pub struct TurnController {
    backend: Arc<dyn StoryBackend>,
    inner: Mutex<SessionState>,
    events: broadcast::Sender<SessionEvent>,
    scroll_delay: Duration,
}

impl TurnController {
    /// Starts a session from a uniformly chosen scenario.
    pub fn init<R: Rng + ?Sized>(
        catalog: &ScenarioCatalog,
        rng: &mut R,
        backend: Arc<dyn StoryBackend>,
    ) -> Self {
        let scenario = catalog.pick(rng);
        let state = SessionState::seeded(scenario);
        info!(
            session_id = %state.session_id,
            choices = state.choices.len(),
            "story session started"
        );
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Self {
            backend,
            inner: Mutex::new(state),
            events,
            scroll_delay: DEFAULT_SCROLL_DELAY,
        }
    }

    pub fn with_scroll_delay(mut self, scroll_delay: Duration) -> Self {
        self.scroll_delay = scroll_delay;
        self
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.inner.lock().await.snapshot()
    }

    pub async fn can_submit(&self) -> bool {
        self.snapshot().await.can_submit()
    }

    /// Replaces any earlier selection. An empty choice clears it.
    pub async fn select_choice(&self, choice: impl Into<String>) {
        let choice = choice.into();
        let snapshot = {
            let mut inner = self.inner.lock().await;
            inner.pending.selected_choice = (!choice.is_empty()).then_some(choice);
            inner.snapshot()
        };
        self.publish(SessionEvent::StateChanged(snapshot));
    }

    /// Selects the choice shown at `index`. Choice controls are inert while a
    /// turn is in flight.
    pub async fn select_choice_at(&self, index: usize) -> Option<String> {
        let (choice, snapshot) = {
            let mut inner = self.inner.lock().await;
            if inner.loading {
                return None;
            }
            let choice = inner.choices.get(index)?.to_string();
            inner.pending.selected_choice = Some(choice.clone());
            (choice, inner.snapshot())
        };
        self.publish(SessionEvent::StateChanged(snapshot));
        Some(choice)
    }

    /// Stored verbatim; trimming happens at submission.
    pub async fn set_addon(&self, text: impl Into<String>) {
        let snapshot = {
            let mut inner = self.inner.lock().await;
            inner.pending.addon = text.into();
            inner.snapshot()
        };
        self.publish(SessionEvent::StateChanged(snapshot));
    }

    /// Runs one turn. Silently skipped while another turn is outstanding or
    /// when there is nothing to send.
    pub async fn submit(&self) -> TurnOutcome {
        let (session_id, request, echo, snapshot) = {
            let mut inner = self.inner.lock().await;
            if inner.loading || !inner.pending.has_input() {
                debug!(
                    session_id = %inner.session_id,
                    loading = inner.loading,
                    "submission ignored"
                );
                return TurnOutcome::Skipped;
            }
            inner.loading = true;
            (
                inner.session_id,
                inner.pending.to_request(),
                inner.pending.echo_text(),
                inner.snapshot(),
            )
        };
        self.publish(SessionEvent::StateChanged(snapshot));

        info!(
            %session_id,
            has_choice = !request.choice.is_empty(),
            has_addon = !request.addon.is_empty(),
            "submitting turn"
        );
        let result = self.backend.continue_story(&request).await;

        let (outcome, snapshot, entry_index) = {
            let mut inner = self.inner.lock().await;
            let outcome = match result {
                Ok(response) => {
                    inner.transcript.push(Entry::player_action(echo));
                    if let Some(choices) = response.new_choices() {
                        inner.choices = ChoiceSet::new(choices.iter().cloned());
                    }
                    inner.transcript.push(Entry::narrative(response.story));
                    inner.pending = Default::default();
                    info!(
                        %session_id,
                        transcript_len = inner.transcript.len(),
                        "turn merged"
                    );
                    TurnOutcome::Advanced
                }
                Err(error) => {
                    warn!(%session_id, %error, "story submission failed");
                    TurnOutcome::Failed
                }
            };
            inner.loading = false;
            (outcome, inner.snapshot(), inner.latest_entry_index())
        };
        self.publish(SessionEvent::StateChanged(snapshot));
        self.schedule_scroll(entry_index);

        outcome
    }

    /// Ends the session and hands back its final state.
    pub fn teardown(self) -> SessionSnapshot {
        let state = self.inner.into_inner();
        info!(
            session_id = %state.session_id,
            transcript_len = state.transcript.len(),
            "story session ended"
        );
        state.snapshot()
    }

    fn schedule_scroll(&self, entry_index: usize) {
        let events = self.events.clone();
        let delay = self.scroll_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events.send(SessionEvent::ScrollToLatest { entry_index });
        });
    }

    fn publish(&self, event: SessionEvent) {
        // No subscribers is fine; the view may not be attached yet.
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
