//! Async document controller: a single-writer loop over edit intents.
//!
//! One task owns the [`Editor`]. Every mutation arrives as an [`Intent`]
//! on a queue and is applied in arrival order, so there is no interleaving
//! to reason about. Background fetches run concurrently off the loop; only
//! their completed outcomes re-enter it, where the staleness rule decides
//! whether they still matter.

use std::sync::Arc;

use collage_core::{Background, EmojiId};
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch};
use tracing::debug;
use url::Url;

use crate::decode::ImageDecoder;
use crate::editor::{Editor, EditorSnapshot};
use crate::fetch::{BackgroundFetcher, FetchError};

/// A user-initiated document mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "args", rename_all = "snake_case")]
pub enum Intent {
    /// Replace the background.
    SetBackground(Background),
    /// Add an emoji at a model-space position.
    AddEmoji {
        /// The glyph to place.
        text: String,
        /// Horizontal offset from the canvas center.
        x: i64,
        /// Vertical offset from the canvas center.
        y: i64,
        /// Font size in model units.
        size: i64,
    },
    /// Move one emoji by a model-space offset.
    MoveEmoji {
        /// Target id.
        id: EmojiId,
        /// Horizontal delta.
        dx: i64,
        /// Vertical delta.
        dy: i64,
    },
    /// Scale one emoji's size by a factor.
    ResizeEmoji {
        /// Target id.
        id: EmojiId,
        /// Multiplier applied to the current size.
        factor: f64,
    },
    /// Move every selected emoji by a model-space offset.
    MoveSelected {
        /// Horizontal delta.
        dx: i64,
        /// Vertical delta.
        dy: i64,
    },
    /// Scale every selected emoji's size by a factor.
    ScaleSelected {
        /// Multiplier applied to each current size.
        factor: f64,
    },
    /// Toggle one emoji's selection flag.
    ToggleSelected(EmojiId),
    /// Clear the selection.
    DeselectAll,
    /// Delete one emoji.
    Delete(EmojiId),
}

type FetchOutcome = (Url, Result<Vec<u8>, FetchError>);

/// Handle to a running document controller.
///
/// Cheap to clone; all clones feed the same loop. Dropping every handle
/// closes the intent queue and stops the loop, discarding any fetch still
/// in flight.
#[derive(Debug, Clone)]
pub struct DocumentController {
    intents: mpsc::UnboundedSender<Intent>,
    snapshots: watch::Receiver<EditorSnapshot>,
}

impl DocumentController {
    /// Spawn the controller task on the current runtime.
    #[must_use]
    pub fn spawn(fetcher: Arc<dyn BackgroundFetcher>, decoder: Arc<dyn ImageDecoder>) -> Self {
        let (intent_tx, intent_rx) = mpsc::unbounded_channel();
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        let editor = Editor::new(decoder);
        let (snapshot_tx, snapshot_rx) = watch::channel(editor.snapshot());
        tokio::spawn(run_loop(
            editor,
            fetcher,
            intent_rx,
            outcome_rx,
            outcome_tx,
            snapshot_tx,
        ));
        Self {
            intents: intent_tx,
            snapshots: snapshot_rx,
        }
    }

    /// Queue an intent for the controller loop.
    ///
    /// Intents queued after the controller has stopped are dropped with a
    /// debug log; there is nowhere left to apply them.
    pub fn apply(&self, intent: Intent) {
        if self.intents.send(intent).is_err() {
            debug!("controller stopped, intent dropped");
        }
    }

    /// Watch snapshots. A new value is published after every applied
    /// intent and every landed fetch outcome, including discarded ones.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<EditorSnapshot> {
        self.snapshots.clone()
    }

    /// The most recently published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> EditorSnapshot {
        self.snapshots.borrow().clone()
    }
}

async fn run_loop(
    mut editor: Editor,
    fetcher: Arc<dyn BackgroundFetcher>,
    mut intents: mpsc::UnboundedReceiver<Intent>,
    mut outcomes: mpsc::UnboundedReceiver<FetchOutcome>,
    outcome_tx: mpsc::UnboundedSender<FetchOutcome>,
    snapshots: watch::Sender<EditorSnapshot>,
) {
    loop {
        tokio::select! {
            intent = intents.recv() => {
                let Some(intent) = intent else {
                    debug!("intent queue closed, controller stopping");
                    break;
                };
                debug!(?intent, "applying intent");
                if let Some(url) = handle_intent(&mut editor, intent) {
                    spawn_fetch(Arc::clone(&fetcher), url, outcome_tx.clone());
                }
                let _ = snapshots.send(editor.snapshot());
            }
            Some((url, result)) = outcomes.recv() => {
                editor.apply_fetch_result(&url, result);
                let _ = snapshots.send(editor.snapshot());
            }
        }
    }
}

/// Apply one intent, returning a URL when a background fetch must start.
fn handle_intent(editor: &mut Editor, intent: Intent) -> Option<Url> {
    match intent {
        Intent::SetBackground(background) => return editor.set_background(background),
        Intent::AddEmoji { text, x, y, size } => {
            editor.document_mut().add_emoji(text, x, y, size);
        }
        Intent::MoveEmoji { id, dx, dy } => editor.document_mut().move_emoji(id, dx, dy),
        Intent::ResizeEmoji { id, factor } => editor.document_mut().resize_emoji(id, factor),
        Intent::MoveSelected { dx, dy } => editor.document_mut().move_selected(dx, dy),
        Intent::ScaleSelected { factor } => editor.document_mut().scale_selected(factor),
        Intent::ToggleSelected(id) => editor.document_mut().toggle_selected(id),
        Intent::DeselectAll => editor.document_mut().deselect_all(),
        Intent::Delete(id) => {
            editor.document_mut().remove(id);
        }
    }
    None
}

fn spawn_fetch(
    fetcher: Arc<dyn BackgroundFetcher>,
    url: Url,
    outcomes: mpsc::UnboundedSender<FetchOutcome>,
) {
    tokio::spawn(async move {
        debug!(%url, "background fetch task started");
        let result = fetcher.fetch(&url).await;
        debug!(%url, ok = result.is_ok(), "background fetch task finished");
        let _ = outcomes.send((url, result));
    });
}
