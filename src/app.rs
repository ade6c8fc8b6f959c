use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;

use crate::config::AppConfig;
use crate::pages::resume_analyzer::ResumeAnalyzerPage;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    provide_context(config);

    view! {
        <Router>
            <main class="content">
                <Routes fallback=|| view! { <p>"Page not found"</p> }>
                    <Route path=path!("/") view=ResumeAnalyzerPage />
                </Routes>
            </main>
        </Router>
    }
}
