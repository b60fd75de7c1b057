//! Autosave Tests
//!
//! Verifies the trailing-edge debounce: a flush happens only after edits
//! pause for the full window, bursts collapse to the final snapshot, and no
//! intermediate write is observable.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use vessel::services::autosave::{AutosaveController, SaveStatus, AUTOSAVE_DEBOUNCE_MS};
use vessel::services::canvas_store::{Canvas, CanvasStore};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn reset_storage() {
    web_sys::window()
        .unwrap()
        .local_storage()
        .unwrap()
        .unwrap()
        .clear()
        .unwrap();
}

fn snapshot(id: &str, content: &str) -> Canvas {
    let mut canvas = Canvas::new(id);
    canvas.content = content.to_string();
    canvas
}

#[wasm_bindgen_test]
async fn test_flush_after_debounce_window() {
    reset_storage();
    let store = CanvasStore::new().unwrap();
    let controller = AutosaveController::new();

    controller.schedule(snapshot("single", "hello"));
    assert_eq!(controller.status().get_untracked(), SaveStatus::Pending);

    TimeoutFuture::new(AUTOSAVE_DEBOUNCE_MS + 200).await;

    let stored = store.get("single").unwrap();
    assert_eq!(stored.content, "hello");
    assert_eq!(controller.status().get_untracked(), SaveStatus::Saved);
}

#[wasm_bindgen_test]
async fn test_no_write_before_window_elapses() {
    reset_storage();
    let store = CanvasStore::new().unwrap();
    let controller = AutosaveController::new();

    controller.schedule(snapshot("early", "draft"));
    TimeoutFuture::new(100).await;

    assert_eq!(store.get("early"), None);
    assert_eq!(controller.status().get_untracked(), SaveStatus::Pending);
}

#[wasm_bindgen_test]
async fn test_burst_persists_only_final_state() {
    reset_storage();
    let store = CanvasStore::new().unwrap();
    let controller = AutosaveController::new();

    controller.schedule(snapshot("burst", "first"));
    TimeoutFuture::new(250).await;
    // Second edit inside the window supersedes the first
    controller.schedule(snapshot("burst", "second"));

    // Past the first edit's deadline, before the second's: the first timer
    // has fired and must not have written
    TimeoutFuture::new(350).await;
    assert_eq!(store.get("burst"), None);

    TimeoutFuture::new(300).await;
    let stored = store.get("burst").unwrap();
    assert_eq!(stored.content, "second");
    assert_eq!(controller.status().get_untracked(), SaveStatus::Saved);
}

#[wasm_bindgen_test]
async fn test_unmount_before_flush_is_silent() {
    reset_storage();
    let store = CanvasStore::new().unwrap();
    let document = web_sys::window().unwrap().document().unwrap();
    let host: web_sys::HtmlElement = document
        .create_element("div")
        .unwrap()
        .unchecked_into();
    document.body().unwrap().append_child(&host).unwrap();

    let handle = leptos::mount::mount_to(host, || {
        let controller = AutosaveController::new();
        controller.schedule(snapshot("leftover", "pending"));
        view! { <span>"editing"</span> }
    });
    // Navigate away before the debounce window elapses; this disposes the
    // controller's signals while its timer is still in flight
    drop(handle);
    TimeoutFuture::new(AUTOSAVE_DEBOUNCE_MS + 200).await;

    // The orphaned timer must neither panic nor write
    assert_eq!(store.get("leftover"), None);
}
