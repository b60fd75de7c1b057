//! Login Page
//!
//! Single sign-in option: OAuth via the identity provider. The button hands
//! the whole page over to the provider; we come back at /auth/callback.

use leptos::ev;
use leptos::prelude::*;

use crate::services::auth::sign_in_with_oauth;

#[component]
pub fn Login() -> impl IntoView {
    let handle_google = move |_: ev::MouseEvent| {
        if let Err(e) = sign_in_with_oauth("google") {
            log::error!("Failed to start OAuth sign-in: {}", e);
        }
    };

    view! {
        <main class="min-h-screen flex items-center justify-center">
            <div class="w-[360px] border rounded-xl p-6 space-y-4">
                <h1 class="text-xl font-semibold">"vessel.ai"</h1>

                <p class="text-sm text-gray-500">
                    "Sign in to save and continue your thinking."
                </p>

                <button
                    on:click=handle_google
                    class="w-full border rounded-md py-2 hover:bg-gray-50"
                >
                    "Continue with Google"
                </button>
            </div>
        </main>
    }
}
