use crate::drafts::{EditorDraft, SaveTarget};
use crate::editor::RichTextEditor;
use crate::models::DocumentId;
use crate::notice::Notices;
use crate::pages::shared::{
    load_draft, save_draft, AppHeader, DraftEndpoint, LoadingPlaceholder, NoticeBanner,
    SaveButton, TitleBar,
};
use crate::session::SessionContext;
use leptos::prelude::*;
use leptos_router::hooks::use_params;
use leptos_router::params::Params;

#[derive(Params, PartialEq, Clone, Debug)]
pub struct DocumentRouteParams {
    pub id: Option<String>,
}

fn route_document_id() -> DocumentId {
    use_params::<DocumentRouteParams>()
        .get_untracked()
        .ok()
        .and_then(|p| p.id)
        .map(DocumentId::new)
        .unwrap_or_default()
}

/// Header, title bar, save button and notices shared by every editor view.
/// Loads the draft once on creation.
#[component]
fn EditorLayout(
    draft: RwSignal<EditorDraft>,
    endpoint: DraftEndpoint,
    #[prop(optional)] title_editable: bool,
    #[prop(optional)] back_to_documents: bool,
    children: Children,
) -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let notices = Notices::new();
    let endpoint = StoredValue::new(endpoint);

    load_draft(session, notices, draft, endpoint.get_value());

    let save = move |target: SaveTarget| {
        save_draft(session, notices, draft, endpoint.get_value(), target);
    };
    let loading = move || draft.with(|d| d.loading);

    view! {
        <div class="min-h-screen bg-background">
            <AppHeader back_to_documents=back_to_documents />

            <main class="mx-auto max-w-5xl px-4 py-8">
                <div class="mb-4 flex items-center justify-between gap-4">
                    <TitleBar
                        draft=draft
                        editable=title_editable
                        on_save_title=Callback::new(move |_| save(SaveTarget::Title))
                    />
                    <SaveButton draft=draft on_save=Callback::new(move |_| save(SaveTarget::Body)) />
                </div>

                <NoticeBanner notices=notices />

                <Show when=loading fallback=|| ().into_view()>
                    <LoadingPlaceholder label="Loading document..." />
                </Show>
                <div class:hidden=loading>{children()}</div>
            </main>
        </div>
    }
}

#[component]
fn PlainTextArea(draft: RwSignal<EditorDraft>) -> impl IntoView {
    view! {
        <textarea
            class="min-h-[420px] w-full resize-y rounded-md border border-border bg-background px-4 py-3 text-sm leading-relaxed outline-none focus-visible:ring-2 focus-visible:ring-ring/50"
            placeholder="Start writing..."
            prop:value=move || draft.with(|d| d.content.clone())
            on:input=move |ev| {
                let value = event_target_value(&ev);
                draft.update(|d| d.content = value);
            }
        ></textarea>
    }
}

/// `/documents/:id`: the formatting editor.
#[component]
pub fn DocumentEditorPage() -> impl IntoView {
    let draft = RwSignal::new(EditorDraft::default());

    view! {
        <EditorLayout
            draft=draft
            endpoint=DraftEndpoint::Document(route_document_id())
            title_editable=true
            back_to_documents=true
        >
            <RichTextEditor draft=draft />
        </EditorLayout>
    }
}

/// `/documents/:id/plain`: the same document edited as raw text.
#[component]
pub fn PlainEditorPage() -> impl IntoView {
    let draft = RwSignal::new(EditorDraft::default());

    view! {
        <EditorLayout
            draft=draft
            endpoint=DraftEndpoint::Document(route_document_id())
            title_editable=true
            back_to_documents=true
        >
            <PlainTextArea draft=draft />
        </EditorLayout>
    }
}

/// The one document tied to the signed-in user (`/document`, `/user`).
/// With `fixed_title` the title cannot be edited and saves send only content.
#[component]
pub fn UserDocumentPage(#[prop(optional)] fixed_title: bool) -> impl IntoView {
    let draft = RwSignal::new(EditorDraft::default());

    view! {
        <EditorLayout
            draft=draft
            endpoint=DraftEndpoint::UserDocument { with_title: !fixed_title }
            title_editable=!fixed_title
        >
            <PlainTextArea draft=draft />
        </EditorLayout>
    }
}
