//! OAuth Callback Page
//!
//! Lands here when the identity provider redirects back with an
//! authorization code. A missing code goes straight back to /login with no
//! exchange attempted; a failed exchange does the same after logging.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_query_map};
use leptos_router::NavigateOptions;

use crate::services::auth::{exchange_code_for_session, plan_callback, CallbackAction};

#[component]
pub fn AuthCallback() -> impl IntoView {
    let query = use_query_map();
    let navigate = use_navigate();

    Effect::new(move |_| {
        let navigate = navigate.clone();
        let replace = NavigateOptions { replace: true, ..Default::default() };

        match plan_callback(query.read().get("code")) {
            CallbackAction::BackToLogin => navigate("/login", replace),
            CallbackAction::Exchange(code) => {
                spawn_local(async move {
                    match exchange_code_for_session(&code).await {
                        Ok(_) => navigate("/dashboard", replace),
                        Err(e) => {
                            log::error!("Code exchange failed: {}", e);
                            navigate("/login", replace);
                        }
                    }
                });
            }
        }
    });

    view! {
        <main class="min-h-screen flex items-center justify-center">
            <p class="text-sm text-gray-500">"Signing you in..."</p>
        </main>
    }
}
