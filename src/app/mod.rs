use crate::pages::{
    DocumentEditorPage, DocumentsPage, LoginPage, PlainEditorPage, RegisterPage, RequireSession,
    UserDocumentPage,
};
use crate::session::SessionContext;
use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    provide_context(SessionContext::restore());

    view! {
        <Router>
            <Routes fallback=|| view! { <div class="px-4 py-8 text-xs text-muted-foreground">"Not found"</div> }>
                <Route path=path!("login") view=LoginPage />
                <Route path=path!("register") view=RegisterPage />
                <Route path=path!("documents") view=move || view! {
                    <RequireSession>
                        <DocumentsPage />
                    </RequireSession>
                } />
                <Route path=path!("documents/:id") view=move || view! {
                    <RequireSession>
                        <DocumentEditorPage />
                    </RequireSession>
                } />
                <Route path=path!("documents/:id/plain") view=move || view! {
                    <RequireSession>
                        <PlainEditorPage />
                    </RequireSession>
                } />
                <Route path=path!("document") view=move || view! {
                    <RequireSession>
                        <UserDocumentPage />
                    </RequireSession>
                } />
                <Route path=path!("user") view=move || view! {
                    <RequireSession>
                        <UserDocumentPage fixed_title=true />
                    </RequireSession>
                } />
                <Route path=path!("") view=|| view! { <Redirect path="/documents" /> } />
            </Routes>
        </Router>
    }
}
