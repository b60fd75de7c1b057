//! Autosave Service
//!
//! Converts a live, frequently-edited canvas into a bounded write rate
//! against the canvas store: trailing-edge debounce with a 500ms window.
//! Every edit marks the canvas unsaved and reschedules the single pending
//! flush; only when edits pause for the full window is the snapshot written.
//!
//! Note: gloo_timers::Timeout is not Send+Sync in WASM, so instead of holding
//! and cancelling timer handles we use .forget() and a generation counter.
//! A superseded timer observes a newer generation and returns without
//! writing. Generation checks run on the single-threaded event loop, so
//! cancellation cannot race a concurrent edit.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::services::canvas_store::{Canvas, CanvasStore};

// ============================================================================
// Constants
// ============================================================================

/// Debounce window in milliseconds
pub const AUTOSAVE_DEBOUNCE_MS: u32 = 500;

// ============================================================================
// Save Status
// ============================================================================

/// Persistence state of the canvas being edited
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SaveStatus {
    /// Store matches the in-memory canvas
    Saved,
    /// Edits pending, flush scheduled
    Pending,
    /// Last flush was rejected by the store
    Failed,
}

impl SaveStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SaveStatus::Saved => "✓ Saved",
            SaveStatus::Pending => "Saving...",
            SaveStatus::Failed => "Save failed",
        }
    }
}

// ============================================================================
// Autosave Controller
// ============================================================================

/// Debounced writer for a single canvas editing session.
///
/// `schedule` is called on every edit with a snapshot of the canvas; the
/// snapshot taken at the *last* call before the window elapses is the one
/// written. The storage handle is opened at flush time, which keeps the
/// controller `Copy` (only signals inside) so event handlers can share it
/// freely. There is no cross-tab coordination: two tabs autosaving the same
/// id are last-write-wins.
#[derive(Clone, Copy)]
pub struct AutosaveController {
    status: RwSignal<SaveStatus>,
    generation: RwSignal<u64>,
}

impl AutosaveController {
    pub fn new() -> Self {
        Self {
            status: RwSignal::new(SaveStatus::Saved),
            generation: RwSignal::new(0),
        }
    }

    /// Reactive save status for the indicator in the editor header
    pub fn status(&self) -> RwSignal<SaveStatus> {
        self.status
    }

    /// Mark the canvas unsaved and (re)start the debounce window with this
    /// snapshot. A later call before the window elapses supersedes this one.
    pub fn schedule(&self, snapshot: Canvas) {
        let generation = self.generation.get_untracked() + 1;
        self.generation.set(generation);
        self.status.set(SaveStatus::Pending);

        let status = self.status;
        let current = self.generation;

        Timeout::new(AUTOSAVE_DEBOUNCE_MS, move || {
            // The editor may have been unmounted while this timer was in
            // flight, which disposes its signals. A disposed generation
            // means the editing session is over; the editor flushes any
            // pending snapshot in its own cleanup, so stay quiet here.
            let Some(live) = current.try_get_untracked() else {
                return;
            };
            // Superseded by a newer edit; its timer owns the write now
            if live != generation {
                return;
            }
            match CanvasStore::new().and_then(|store| store.put(&snapshot)) {
                Ok(()) => {
                    let _ = status.try_set(SaveStatus::Saved);
                }
                Err(e) => {
                    log::warn!("Autosave failed for canvas {}: {}", snapshot.id, e);
                    let _ = status.try_set(SaveStatus::Failed);
                }
            }
        })
        .forget();
    }
}

impl Default for AutosaveController {
    fn default() -> Self {
        Self::new()
    }
}
