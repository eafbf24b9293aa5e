//! Maps session state onto terminal lines.

use std::io::{self, Write};

use client_core::SessionSnapshot;
use shared::domain::{ChoiceSet, Entry, EntryKind};

pub const TITLE: &str = "🌟 AI Dungeon Master 🌟";

pub fn render_entry(entry: &Entry) -> String {
    match entry.kind {
        EntryKind::Narrative => format!("{}\n", entry.text),
        EntryKind::PlayerAction => format!("🔹 You said: {}\n", entry.text),
    }
}

pub fn render_choices(choices: &ChoiceSet, selected: Option<&str>) -> String {
    let mut out = String::from("What will you do?\n");
    for (index, choice) in choices.iter().enumerate() {
        let marker = if selected == Some(choice) { '>' } else { ' ' };
        out.push_str(&format!("{marker} [{}] {choice}\n", index + 1));
    }
    out
}

pub fn submit_label(snapshot: &SessionSnapshot) -> &'static str {
    if snapshot.loading {
        "Loading..."
    } else if snapshot.can_submit() {
        "Submit (enter)"
    } else {
        "Submit (pick a choice or type an action)"
    }
}

/// Keeps track of what has already been printed so only new entries are
/// written.
#[derive(Debug, Default)]
pub struct TranscriptView {
    rendered: usize,
    was_loading: bool,
}

impl TranscriptView {
    pub fn on_state(&mut self, snapshot: &SessionSnapshot, out: &mut impl Write) -> io::Result<()> {
        for entry in snapshot.transcript.iter().skip(self.rendered) {
            writeln!(out, "{}", render_entry(entry))?;
        }
        self.rendered = snapshot.transcript.len();

        if snapshot.loading && !self.was_loading {
            writeln!(out, "{}", submit_label(snapshot))?;
        }
        self.was_loading = snapshot.loading;
        out.flush()
    }

    /// Brings the latest entry and the controls back to the bottom of the
    /// screen.
    pub fn on_scroll(
        &mut self,
        snapshot: &SessionSnapshot,
        entry_index: usize,
        out: &mut impl Write,
    ) -> io::Result<()> {
        self.on_state(snapshot, out)?;
        if entry_index + 1 < snapshot.transcript.len() {
            return Ok(());
        }
        write!(
            out,
            "{}",
            render_choices(
                &snapshot.choices,
                snapshot.pending.selected_choice.as_deref()
            )
        )?;
        writeln!(out, "{}", submit_label(snapshot))?;
        out.flush()
    }

    pub fn prompt(&self, snapshot: &SessionSnapshot, out: &mut impl Write) -> io::Result<()> {
        let selected = snapshot.pending.selected_choice.as_deref().unwrap_or("-");
        writeln!(
            out,
            "[choice: {selected}] [action: {}] {}",
            snapshot.pending.addon,
            submit_label(snapshot)
        )?;
        out.flush()
    }
}
