//! Interactive loop: player input on stdin, session events to stdout.

use std::{io, sync::Arc};

use anyhow::Context;
use client_core::{SessionEvent, TurnController, TurnOutcome};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::broadcast::error::RecvError,
};
use tracing::{debug, warn};

use crate::{
    command::{parse_command, Command},
    render::{TranscriptView, TITLE},
};

pub async fn run_play(controller: Arc<TurnController>) -> anyhow::Result<()> {
    let mut events = controller.subscribe_events();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut view = TranscriptView::default();
    let mut stdout = io::stdout();

    println!("{TITLE}");
    println!("Controls: 1-3 pick a choice, type to add an action, Enter or /go to submit, /clear, /quit");
    println!();
    let snapshot = controller.snapshot().await;
    view.on_scroll(&snapshot, snapshot.transcript.len().saturating_sub(1), &mut stdout)?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read player input")? else {
                    break;
                };
                match parse_command(&line) {
                    Command::Quit => break,
                    Command::Select(index) => {
                        if controller.select_choice_at(index).await.is_none() {
                            println!("No choice {} right now.", index + 1);
                        }
                        view.prompt(&controller.snapshot().await, &mut stdout)?;
                    }
                    Command::Addon(text) => {
                        controller.set_addon(text).await;
                        view.prompt(&controller.snapshot().await, &mut stdout)?;
                    }
                    Command::ClearAddon => {
                        controller.set_addon("").await;
                        view.prompt(&controller.snapshot().await, &mut stdout)?;
                    }
                    Command::Submit => {
                        let controller = controller.clone();
                        tokio::spawn(async move {
                            let outcome = controller.submit().await;
                            if outcome == TurnOutcome::Skipped {
                                debug!("nothing to submit");
                            }
                        });
                    }
                }
            }
            event = events.recv() => match event {
                Ok(SessionEvent::StateChanged(snapshot)) => view.on_state(&snapshot, &mut stdout)?,
                Ok(SessionEvent::ScrollToLatest { entry_index }) => {
                    let snapshot = controller.snapshot().await;
                    view.on_scroll(&snapshot, entry_index, &mut stdout)?;
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "view fell behind session events");
                    view.on_state(&controller.snapshot().await, &mut stdout)?;
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    Ok(())
}
