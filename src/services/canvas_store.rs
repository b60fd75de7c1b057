//! Canvas Storage Service
//!
//! Persists canvas records as JSON in `window.localStorage`, one entry per
//! canvas under a `"canvas:" + id` key. The store is browser-scoped: there is
//! no server sync, no schema versioning, and no delete operation. Concurrent
//! tabs editing the same id are last-write-wins with no version check.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use web_sys::Storage;

// ============================================================================
// Constants
// ============================================================================

/// Key prefix for canvas records in localStorage
pub const CANVAS_KEY_PREFIX: &str = "canvas:";

/// Title assigned to freshly created canvases
pub const DEFAULT_TITLE: &str = "Untitled";

// ============================================================================
// Canvas Model
// ============================================================================

/// A single user-editable canvas: title, free text, and an optional image.
///
/// Serialized with camelCase keys (`updatedAt`) to stay compatible with
/// records written by earlier versions of the app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Canvas {
    /// Opaque identifier, assigned at creation, never reassigned
    pub id: String,
    /// User-editable title; empty displays as "Untitled"
    pub title: String,
    /// Object URL of the attached image. Transient: object URLs do not
    /// survive a page reload, so a stale value simply fails to render.
    pub image: Option<String>,
    /// Free text content
    pub content: String,
    /// Milliseconds since epoch, rewritten on every mutation
    pub updated_at: i64,
}

impl Canvas {
    /// Fresh canvas with placeholder title and empty content
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: DEFAULT_TITLE.to_string(),
            image: None,
            content: String::new(),
            updated_at: now_ms(),
        }
    }

    pub fn set_title(&mut self, title: String) {
        self.title = title;
        self.touch();
    }

    pub fn set_content(&mut self, content: String) {
        self.content = content;
        self.touch();
    }

    /// Attach an image object URL, returning the previous URL (if any) so the
    /// caller can release it.
    pub fn set_image(&mut self, url: String) -> Option<String> {
        let previous = self.image.replace(url);
        self.touch();
        previous
    }

    /// Detach the image, returning the URL so the caller can release it.
    /// No-op when no image is attached: the record is left untouched.
    pub fn clear_image(&mut self) -> Option<String> {
        let previous = self.image.take()?;
        self.touch();
        Some(previous)
    }

    /// Title with the placeholder fallback applied
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            DEFAULT_TITLE
        } else {
            &self.title
        }
    }

    fn touch(&mut self) {
        self.updated_at = now_ms();
    }
}

/// Current wall-clock time in milliseconds since epoch
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Sort canvases by `updated_at` descending. Ties break by id ascending so
/// listing order is deterministic regardless of storage iteration order.
pub fn sort_by_recency(canvases: &mut [Canvas]) {
    canvases.sort_by(|a, b| {
        b.updated_at
            .cmp(&a.updated_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}

// ============================================================================
// Canvas Store
// ============================================================================

/// Handle to the browser-local canvas namespace
#[derive(Clone)]
pub struct CanvasStore {
    storage: Storage,
}

impl CanvasStore {
    /// Open the store over `window.localStorage`. Fails when the browser
    /// denies storage access (e.g. some private-browsing modes).
    pub fn new() -> Result<Self, String> {
        let storage = web_sys::window()
            .ok_or("no window")?
            .local_storage()
            .map_err(|_| "localStorage access denied".to_string())?
            .ok_or("localStorage unavailable")?;
        Ok(Self { storage })
    }

    fn key(id: &str) -> String {
        format!("{}{}", CANVAS_KEY_PREFIX, id)
    }

    /// Read a canvas by id. Absent and malformed records both yield `None`;
    /// a malformed record is logged, never surfaced.
    pub fn get(&self, id: &str) -> Option<Canvas> {
        let raw = self.storage.get_item(&Self::key(id)).ok()??;
        match serde_json::from_str(&raw) {
            Ok(canvas) => Some(canvas),
            Err(e) => {
                log::warn!("Dropping malformed canvas record {}: {}", id, e);
                None
            }
        }
    }

    /// Write a canvas record. Fails on serialization errors or when the
    /// browser rejects the write (storage quota exhausted).
    pub fn put(&self, canvas: &Canvas) -> Result<(), String> {
        let raw = serde_json::to_string(canvas)
            .map_err(|e| format!("failed to serialize canvas {}: {}", canvas.id, e))?;
        self.storage
            .set_item(&Self::key(&canvas.id), &raw)
            .map_err(|_| format!("failed to store canvas {} (quota exceeded?)", canvas.id))
    }

    /// Load the canvas for `id`, creating and persisting a fresh one when no
    /// record exists. Absence is "new document", not an error.
    pub fn load_or_create(&self, id: &str) -> Result<Canvas, String> {
        if let Some(existing) = self.get(id) {
            return Ok(existing);
        }
        let fresh = Canvas::new(id);
        self.put(&fresh)?;
        Ok(fresh)
    }

    /// All stored canvases, most recently edited first. Entries that fail to
    /// parse are dropped from the listing with a logged warning.
    pub fn list_all(&self) -> Vec<Canvas> {
        let mut canvases = Vec::new();
        let len = self.storage.length().unwrap_or(0);

        for i in 0..len {
            let Ok(Some(key)) = self.storage.key(i) else {
                continue;
            };
            if !key.starts_with(CANVAS_KEY_PREFIX) {
                continue;
            }
            let Ok(Some(raw)) = self.storage.get_item(&key) else {
                continue;
            };
            match serde_json::from_str::<Canvas>(&raw) {
                Ok(canvas) => canvases.push(canvas),
                Err(e) => log::warn!("Skipping malformed record under {}: {}", key, e),
            }
        }

        sort_by_recency(&mut canvases);
        canvases
    }
}

// ============================================================================
// Tests
// ============================================================================
