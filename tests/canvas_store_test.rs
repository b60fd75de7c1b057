//! Canvas Store Tests
//!
//! Exercises localStorage-backed persistence: creation defaults, listing
//! order, prefix filtering, and malformed-record handling.

use vessel::services::canvas_store::{now_ms, Canvas, CanvasStore, CANVAS_KEY_PREFIX};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn storage() -> web_sys::Storage {
    web_sys::window().unwrap().local_storage().unwrap().unwrap()
}

fn reset_storage() {
    storage().clear().unwrap();
}

#[wasm_bindgen_test]
fn test_get_absent_is_none() {
    reset_storage();
    let store = CanvasStore::new().unwrap();
    assert_eq!(store.get("missing"), None);
}

#[wasm_bindgen_test]
fn test_put_then_get_roundtrip() {
    reset_storage();
    let store = CanvasStore::new().unwrap();

    let mut canvas = Canvas::new("doc-1");
    canvas.title = "Plans".to_string();
    canvas.content = "step one".to_string();
    store.put(&canvas).unwrap();

    assert_eq!(store.get("doc-1"), Some(canvas));
}

#[wasm_bindgen_test]
fn test_load_or_create_unknown_id_persists_defaults() {
    reset_storage();
    let store = CanvasStore::new().unwrap();
    let before = now_ms();

    let created = store.load_or_create("abc").unwrap();
    assert_eq!(created.id, "abc");
    assert_eq!(created.title, "Untitled");
    assert_eq!(created.image, None);
    assert_eq!(created.content, "");
    assert!(created.updated_at >= before);

    // Persisted immediately, not just held in memory
    assert_eq!(store.get("abc"), Some(created));
}

#[wasm_bindgen_test]
fn test_load_or_create_returns_existing() {
    reset_storage();
    let store = CanvasStore::new().unwrap();

    let mut canvas = Canvas::new("keep");
    canvas.content = "do not overwrite".to_string();
    store.put(&canvas).unwrap();

    assert_eq!(store.load_or_create("keep").unwrap(), canvas);
}

#[wasm_bindgen_test]
fn test_list_all_sorts_by_recency() {
    reset_storage();
    let store = CanvasStore::new().unwrap();

    for (id, ts) in [("a", 100), ("b", 300), ("c", 200)] {
        let mut canvas = Canvas::new(id);
        canvas.updated_at = ts;
        store.put(&canvas).unwrap();
    }

    let order: Vec<i64> = store.list_all().iter().map(|c| c.updated_at).collect();
    assert_eq!(order, vec![300, 200, 100]);
}

#[wasm_bindgen_test]
fn test_list_all_ignores_foreign_keys() {
    reset_storage();
    let store = CanvasStore::new().unwrap();

    storage().set_item("theme", "dark").unwrap();
    storage().set_item("vessel:session", "{}").unwrap();
    store.put(&Canvas::new("only")).unwrap();

    let listed = store.list_all();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, "only");
}

#[wasm_bindgen_test]
fn test_list_all_drops_malformed_records() {
    reset_storage();
    let store = CanvasStore::new().unwrap();

    store.put(&Canvas::new("good")).unwrap();
    storage()
        .set_item(&format!("{}broken", CANVAS_KEY_PREFIX), "not json {")
        .unwrap();

    let listed = store.list_all();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, "good");
}

#[wasm_bindgen_test]
fn test_malformed_get_is_none() {
    reset_storage();
    storage()
        .set_item(&format!("{}bad", CANVAS_KEY_PREFIX), "[1,2,3]")
        .unwrap();

    let store = CanvasStore::new().unwrap();
    assert_eq!(store.get("bad"), None);
}
