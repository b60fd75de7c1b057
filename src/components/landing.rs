//! Landing Page
//!
//! Public marketing page. Signed-in visitors are bounced straight to the
//! dashboard by the session gate.

use leptos::prelude::*;

use crate::services::auth::use_redirect_authenticated;

/// Feature card on the landing grid
#[component]
fn FeatureCard(
    #[prop(into)] icon: String,
    #[prop(into)] title: String,
    #[prop(into)] blurb: String,
) -> impl IntoView {
    view! {
        <div class="p-6 rounded-2xl bg-white/50 backdrop-blur border border-gray-100 hover:shadow-lg transition-shadow">
            <div class="text-3xl mb-3">{icon}</div>
            <h3 class="font-semibold mb-2">{title}</h3>
            <p class="text-sm text-gray-600">{blurb}</p>
        </div>
    }
}

#[component]
pub fn Landing() -> impl IntoView {
    use_redirect_authenticated();

    view! {
        <main class="min-h-screen flex items-center justify-center bg-gradient-to-br from-gray-50 via-white to-gray-100">
            <div class="text-center space-y-8 px-4">
                <div class="space-y-4">
                    <h1 class="text-6xl font-bold bg-gradient-to-r from-gray-900 via-gray-700 to-gray-900 bg-clip-text text-transparent">
                        "vessel.ai"
                    </h1>
                    <p class="text-xl text-gray-600 max-w-md mx-auto">
                        "A visual space to think and create."
                    </p>
                </div>

                <div class="flex flex-col sm:flex-row gap-4 justify-center items-center pt-4">
                    <a
                        href="/login"
                        class="px-8 py-4 bg-black text-white rounded-xl font-medium transition-all duration-300 hover:scale-105 hover:shadow-2xl"
                    >
                        "Start thinking"
                    </a>
                    <a
                        href="#features"
                        class="px-8 py-4 border-2 border-gray-200 rounded-xl font-medium hover:border-gray-300 hover:bg-gray-50 transition-all duration-300"
                    >
                        "Learn more"
                    </a>
                </div>

                <div id="features" class="pt-12 grid grid-cols-1 sm:grid-cols-3 gap-6 max-w-3xl mx-auto">
                    <FeatureCard icon="✨" title="Intuitive" blurb="Simple and clean interface" />
                    <FeatureCard icon="🎨" title="Creative" blurb="Visual thinking space" />
                    <FeatureCard icon="☁️" title="Cloud Sync" blurb="Access anywhere" />
                </div>
            </div>
        </main>
    }
}
