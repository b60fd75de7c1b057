use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;

use crate::components::auth_callback::AuthCallback;
use crate::components::canvas::CanvasPage;
use crate::components::dashboard::Dashboard;
use crate::components::landing::Landing;
use crate::components::login::Login;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <Routes fallback=|| view! { <div class="p-8 text-gray-500">"404 - Page Not Found"</div> }>
                <Route path=path!("/") view=Landing />
                <Route path=path!("/login") view=Login />
                <Route path=path!("/auth/callback") view=AuthCallback />
                <Route path=path!("/dashboard") view=Dashboard />
                <Route path=path!("/canvas/:id") view=CanvasPage />
            </Routes>
        </Router>
    }
}
