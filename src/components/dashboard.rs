//! Dashboard Page
//!
//! Grid of the user's canvases, most recently edited first, with a tile to
//! create a new one. Creating only allocates an id and navigates; the record
//! itself is written when the editor initializes it.

use chrono::{Local, TimeZone};
use leptos::ev;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use uuid::Uuid;

use crate::services::auth::{sign_out, use_require_session};
use crate::services::canvas_store::{Canvas, CanvasStore};

/// Epoch milliseconds rendered as a local calendar date
pub fn format_edit_date(ms: i64) -> String {
    match Local.timestamp_millis_opt(ms).single() {
        Some(date) => date.format("%-m/%-d/%Y").to_string(),
        None => String::new(),
    }
}

/// Card for one existing canvas
#[component]
fn CanvasCard(canvas: Canvas) -> impl IntoView {
    let navigate = use_navigate();
    let canvas_id = canvas.id.clone();
    let title = canvas.display_title().to_string();
    let preview = if canvas.content.is_empty() {
        "No content yet".to_string()
    } else {
        canvas.content.clone()
    };

    let handle_open = move |_: ev::MouseEvent| {
        navigate(&format!("/canvas/{}", canvas_id), Default::default());
    };

    view! {
        <button
            on:click=handle_open
            class="aspect-[4/3] rounded-2xl bg-white p-6 border border-gray-200 flex flex-col justify-between hover:shadow-xl transition-shadow text-left"
        >
            <div>
                <div class="text-sm text-gray-500 mb-2">
                    {format_edit_date(canvas.updated_at)}
                </div>
                <h3 class="font-semibold text-gray-900 line-clamp-2">{title}</h3>
            </div>
            <div class="text-sm text-gray-600 line-clamp-2">{preview}</div>
        </button>
    }
}

#[component]
pub fn Dashboard() -> impl IntoView {
    use_require_session();

    let navigate = use_navigate();
    let canvases = RwSignal::new(Vec::<Canvas>::new());

    // Load all stored canvases once on mount
    Effect::new(move |_| match CanvasStore::new() {
        Ok(store) => canvases.set(store.list_all()),
        Err(e) => log::warn!("Canvas store unavailable: {}", e),
    });

    let handle_create = {
        let navigate = navigate.clone();
        move |_: ev::MouseEvent| {
            let id = Uuid::new_v4();
            navigate(&format!("/canvas/{}", id), Default::default());
        }
    };

    let handle_sign_out = {
        let navigate = navigate.clone();
        move |_: ev::MouseEvent| {
            sign_out();
            navigate("/", Default::default());
        }
    };

    view! {
        <main class="min-h-screen bg-gradient-to-br from-gray-50 to-gray-100">
            <header class="bg-white border-b border-gray-200 sticky top-0 z-10 backdrop-blur bg-white/80">
                <div class="max-w-7xl mx-auto px-6 py-4 flex items-center justify-between">
                    <h1 class="text-2xl font-bold bg-gradient-to-r from-gray-900 to-gray-700 bg-clip-text text-transparent">
                        "vessel.ai"
                    </h1>
                    <button
                        on:click=handle_sign_out
                        class="px-4 py-2 text-sm text-gray-600 hover:text-gray-900 transition-colors"
                    >
                        "Sign out"
                    </button>
                </div>
            </header>

            <div class="max-w-7xl mx-auto px-6 py-12">
                <div class="mb-8">
                    <h2 class="text-3xl font-bold text-gray-900 mb-2">"Your Dashboard"</h2>
                    <p class="text-gray-600">"Create and manage your visual thinking spaces."</p>
                </div>

                <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 xl:grid-cols-4 gap-6">
                    <button
                        on:click=handle_create
                        class="group relative aspect-[4/3] rounded-2xl border-2 border-dashed border-gray-300 hover:border-gray-400 bg-white hover:bg-gray-50 transition-all duration-300 hover:shadow-xl"
                    >
                        <div class="absolute inset-0 flex flex-col items-center justify-center gap-3">
                            <div class="w-12 h-12 rounded-full bg-black text-white flex items-center justify-center text-2xl group-hover:scale-110 transition-transform">
                                "+"
                            </div>
                            <span class="font-semibold text-gray-700">"New Canvas"</span>
                        </div>
                    </button>

                    <For
                        each=move || canvases.get()
                        key=|canvas| (canvas.id.clone(), canvas.updated_at)
                        children=|canvas| view! { <CanvasCard canvas=canvas /> }
                    />
                </div>

                <Show when=move || canvases.read().is_empty()>
                    <div class="mt-12 text-center text-gray-500">
                        <p class="mb-2">"This is your space."</p>
                        <p>"Start with your first canvas."</p>
                    </div>
                </Show>
            </div>
        </main>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_edit_date_invalid_is_empty() {
        assert_eq!(format_edit_date(i64::MAX), "");
    }
}
