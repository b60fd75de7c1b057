//! Canvas Editor Page
//!
//! Loads (or initializes) the canvas for the route's id, wires every edit to
//! the debounced autosave, and renders the title / image / content editor.
//! Image attachments are object URLs with manual release: replacing or
//! removing an image revokes the old URL so the blob is not kept alive for
//! the rest of the page's lifetime.

use leptos::ev;
use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params};
use leptos_router::params::Params;
use web_sys::HtmlInputElement;

use crate::components::dashboard::format_edit_date;
use crate::services::auth::{current_user, use_require_session};
use crate::services::autosave::{AutosaveController, SaveStatus};
use crate::services::canvas_store::{Canvas, CanvasStore};

/// Release an image object URL back to the browser
fn revoke_image_url(url: &str) {
    if let Err(e) = web_sys::Url::revoke_object_url(url) {
        log::warn!("Failed to revoke object URL: {:?}", e);
    }
}

/// Load or initialize the canvas for a visit. Signed-out visitors get
/// `None`: the session gate owns that visit, and a page about to redirect
/// to login must not write storage.
pub fn load_canvas(id: &str) -> Option<Canvas> {
    current_user()?;
    match CanvasStore::new().and_then(|store| store.load_or_create(id)) {
        Ok(loaded) => Some(loaded),
        Err(e) => {
            log::warn!("Failed to initialize canvas {}: {}", id, e);
            // Still editable; autosave will retry persisting it
            Some(Canvas::new(id))
        }
    }
}

#[derive(Params, PartialEq, Clone)]
struct CanvasParams {
    id: Option<String>,
}

#[component]
pub fn CanvasPage() -> impl IntoView {
    use_require_session();

    let params = use_params::<CanvasParams>();
    let navigate = use_navigate();

    let canvas: RwSignal<Option<Canvas>> = RwSignal::new(None);

    let controller = AutosaveController::new();
    let status = controller.status();

    // Flush a still-pending edit when leaving the editor; the in-flight
    // timer sees a disposed generation afterwards and stays quiet
    on_cleanup(move || {
        if status.try_get_untracked() != Some(SaveStatus::Pending) {
            return;
        }
        let Some(snapshot) = canvas.try_get_untracked().flatten() else {
            return;
        };
        if let Err(e) = CanvasStore::new().and_then(|store| store.put(&snapshot)) {
            log::warn!("Failed to flush canvas {} on leave: {}", snapshot.id, e);
        }
    });

    // Load or create the canvas for the route id
    Effect::new(move |_| {
        let Some(id) = params.get().ok().and_then(|p| p.id) else {
            return;
        };
        if canvas.read_untracked().as_ref().is_some_and(|c| c.id == id) {
            return;
        }
        if let Some(loaded) = load_canvas(&id) {
            canvas.set(Some(loaded));
        }
    });

    // Every mutation below snapshots the canvas and reschedules the flush
    let schedule_save = move || {
        if let Some(snapshot) = canvas.get_untracked() {
            controller.schedule(snapshot);
        }
    };

    let handle_title = move |ev: ev::Event| {
        let value = event_target_value(&ev);
        canvas.update(|c| {
            if let Some(c) = c {
                c.set_title(value);
            }
        });
        schedule_save();
    };

    let handle_content = move |ev: ev::Event| {
        let value = event_target_value(&ev);
        canvas.update(|c| {
            if let Some(c) = c {
                c.set_content(value);
            }
        });
        schedule_save();
    };

    let handle_image_upload = move |ev: ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        let url = match web_sys::Url::create_object_url_with_blob(&file) {
            Ok(url) => url,
            Err(e) => {
                log::warn!("Failed to create object URL: {:?}", e);
                return;
            }
        };
        canvas.update(|c| {
            if let Some(c) = c {
                if let Some(previous) = c.set_image(url) {
                    revoke_image_url(&previous);
                }
            }
        });
        schedule_save();
    };

    let handle_image_remove = move |_: ev::MouseEvent| {
        let mut removed = None;
        canvas.update(|c| {
            if let Some(c) = c {
                removed = c.clear_image();
            }
        });
        // Nothing attached: no release, no write
        let Some(previous) = removed else {
            return;
        };
        revoke_image_url(&previous);
        schedule_save();
    };

    let handle_back = move |_: ev::MouseEvent| {
        navigate("/dashboard", Default::default());
    };

    view! {
        <Show when=move || canvas.read().is_some()>
            <div class="min-h-screen bg-gradient-to-br from-gray-50 to-white">
                <header class="sticky top-0 z-10 bg-white/80 backdrop-blur border-b border-gray-200">
                    <div class="w-full px-4 sm:px-6 lg:px-8 py-4">
                        <div class="max-w-4xl mx-auto flex items-center justify-between">
                            <button
                                on:click=handle_back.clone()
                                class="flex items-center gap-2 text-gray-600 hover:text-gray-900 transition-colors"
                            >
                                <span class="font-medium">"← Dashboard"</span>
                            </button>

                            <span class=move || format!(
                                "text-sm transition-colors {}",
                                match status.get() {
                                    SaveStatus::Saved => "text-green-600",
                                    SaveStatus::Pending => "text-gray-400",
                                    SaveStatus::Failed => "text-red-500",
                                }
                            )>
                                {move || status.get().label()}
                            </span>
                        </div>
                    </div>
                </header>

                <main class="w-full px-4 sm:px-6 lg:px-8 py-8 sm:py-12">
                    <div class="max-w-4xl mx-auto space-y-6 sm:space-y-8">
                        <input
                            prop:value=move || {
                                canvas.read().as_ref().map(|c| c.title.clone()).unwrap_or_default()
                            }
                            on:input=handle_title
                            placeholder="Untitled canvas"
                            class="w-full text-3xl sm:text-4xl lg:text-5xl font-bold outline-none placeholder-gray-300 bg-transparent border-none px-0"
                        />

                        <div class="flex items-center gap-3 sm:gap-4 text-xs sm:text-sm text-gray-500">
                            <span>
                                {move || {
                                    let edited = canvas
                                        .read()
                                        .as_ref()
                                        .map(|c| format_edit_date(c.updated_at))
                                        .unwrap_or_default();
                                    format!("Last edited {}", edited)
                                }}
                            </span>
                            <span>"•"</span>
                            <span>
                                {move || {
                                    let count = canvas
                                        .read()
                                        .as_ref()
                                        .map(|c| c.content.chars().count())
                                        .unwrap_or(0);
                                    format!("{} characters", count)
                                }}
                            </span>
                        </div>

                        <Show
                            when=move || canvas.read().as_ref().is_some_and(|c| c.image.is_some())
                            fallback=move || {
                                view! {
                                    <label class="block border-2 border-dashed border-gray-200 rounded-xl sm:rounded-2xl p-8 sm:p-12 text-center hover:border-gray-300 hover:bg-gray-50/50 transition-all cursor-pointer">
                                        <input
                                            type="file"
                                            accept="image/*"
                                            class="hidden"
                                            on:change=handle_image_upload
                                        />
                                        <div class="space-y-3">
                                            <p class="font-medium text-gray-700 text-sm sm:text-base">"Add an image"</p>
                                            <p class="text-xs sm:text-sm text-gray-500 mt-1">"Click to upload"</p>
                                        </div>
                                    </label>
                                }
                            }
                        >
                            <div class="relative group">
                                <img
                                    src=move || {
                                        canvas
                                            .read()
                                            .as_ref()
                                            .and_then(|c| c.image.clone())
                                            .unwrap_or_default()
                                    }
                                    alt="Canvas visual"
                                    class="rounded-xl sm:rounded-2xl max-h-[300px] sm:max-h-[420px] w-full object-cover border border-gray-200"
                                />
                                <button
                                    on:click=handle_image_remove
                                    class="absolute top-3 right-3 sm:top-4 sm:right-4 px-3 py-1.5 text-xs sm:text-sm bg-black/70 text-white rounded-lg opacity-0 group-hover:opacity-100 transition-opacity hover:bg-black/90"
                                >
                                    "Remove"
                                </button>
                            </div>
                        </Show>

                        <div class="bg-white rounded-xl sm:rounded-2xl border border-gray-200 p-4 sm:p-6 lg:p-8 shadow-sm hover:shadow-md transition-shadow">
                            <textarea
                                prop:value=move || {
                                    canvas
                                        .read()
                                        .as_ref()
                                        .map(|c| c.content.clone())
                                        .unwrap_or_default()
                                }
                                on:input=handle_content
                                placeholder="Start thinking here…"
                                class="w-full min-h-[400px] sm:min-h-[500px] resize-none text-base sm:text-lg leading-relaxed outline-none placeholder-gray-300 bg-transparent"
                            ></textarea>
                        </div>
                    </div>
                </main>
            </div>
        </Show>
    }
}
