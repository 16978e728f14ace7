use crate::api::{ApiClient, ApiResult, SaveUserDocumentRequest, UpdateDocumentRequest};
use crate::components::ui::{
    Alert, AlertDescription, AlertTone, Button, ButtonSize, ButtonVariant, Spinner,
};
use crate::drafts::{EditorDraft, SaveTarget};
use crate::models::{DocumentBody, DocumentId};
use crate::notice::{NoticeKind, Notices};
use crate::session::SessionContext;
use icons::X;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Where an editor view loads from and saves to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum DraftEndpoint {
    Document(DocumentId),
    /// The per-user document. Without a title, saves send only the content.
    UserDocument { with_title: bool },
}

impl DraftEndpoint {
    async fn load(&self, client: &ApiClient) -> ApiResult<DocumentBody> {
        match self {
            Self::Document(id) => client.get_document(id).await,
            Self::UserDocument { .. } => client.get_user_document().await,
        }
    }

    async fn save(&self, client: &ApiClient, req: UpdateDocumentRequest) -> ApiResult<()> {
        match self {
            Self::Document(id) => client.update_document(id, &req).await,
            Self::UserDocument { with_title } => {
                client
                    .save_user_document(&user_document_request(req, *with_title))
                    .await
            }
        }
    }
}

/// Without a title the per-user save sends only the content.
fn user_document_request(req: UpdateDocumentRequest, with_title: bool) -> SaveUserDocumentRequest {
    if with_title {
        req.into()
    } else {
        SaveUserDocumentRequest {
            title: None,
            content: req.content,
        }
    }
}

pub(crate) fn load_draft(
    session: SessionContext,
    notices: Notices,
    draft: RwSignal<EditorDraft>,
    endpoint: DraftEndpoint,
) {
    let client = session.client();
    spawn_local(async move {
        let result = endpoint.load(&client).await;
        if session.end_if_unauthorized(&result) {
            return;
        }
        let notice = draft.try_update(|d| d.finish_load(result)).flatten();
        notices.show_opt(notice);
    });
}

/// Sends the whole draft. Does nothing while a save is already in flight.
pub(crate) fn save_draft(
    session: SessionContext,
    notices: Notices,
    draft: RwSignal<EditorDraft>,
    endpoint: DraftEndpoint,
    target: SaveTarget,
) {
    let Some(req) = draft.try_update(|d| d.begin_save()).flatten() else {
        return;
    };
    let client = session.client();
    spawn_local(async move {
        let result = endpoint.save(&client, req).await;
        if session.end_if_unauthorized(&result) {
            return;
        }
        let notice = draft.try_update(|d| d.finish_save(target, result)).flatten();
        notices.show_opt(notice);
    });
}

#[component]
pub fn NoticeBanner(notices: Notices) -> impl IntoView {
    view! {
        {move || {
            notices.current().map(|notice| {
                let tone = match notice.kind {
                    NoticeKind::Success => AlertTone::Success,
                    NoticeKind::Error => AlertTone::Destructive,
                };
                view! {
                    <Alert tone=tone class="mb-4 flex items-start justify-between gap-3">
                        <AlertDescription class="text-xs">{notice.message}</AlertDescription>
                        <button
                            type="button"
                            class="text-muted-foreground hover:text-foreground"
                            aria-label="Dismiss"
                            on:click=move |_| notices.dismiss()
                        >
                            <X class="size-3.5" />
                        </button>
                    </Alert>
                }
            })
        }}
    }
}

/// Brand bar. Editor views show a way back to the list; the list shows
/// who is signed in and a sign-out button.
#[component]
pub fn AppHeader(#[prop(optional)] back_to_documents: bool) -> impl IntoView {
    let session = expect_context::<SessionContext>();

    view! {
        <header class="border-b border-border bg-background">
            <div class="mx-auto flex h-14 max-w-5xl items-center justify-between px-4">
                <a href="/documents" class="flex items-center gap-2">
                    <span class="flex size-7 items-center justify-center rounded-md bg-primary text-sm font-bold text-primary-foreground">
                        "D"
                    </span>
                    <span class="text-sm font-semibold text-foreground">"SharedDoc"</span>
                </a>

                <Show
                    when=move || back_to_documents
                    fallback=move || view! {
                        <div class="flex items-center gap-3 text-xs text-muted-foreground">
                            {move || session.username()}
                            <Button
                                variant=ButtonVariant::Ghost
                                size=ButtonSize::Sm
                                on:click=move |_| session.end()
                            >
                                "Sign out"
                            </Button>
                        </div>
                    }
                >
                    <a href="/documents" class="text-xs text-muted-foreground hover:text-foreground">
                        "← Back to Documents"
                    </a>
                </Show>
            </div>
        </header>
    }
}

/// Document title with its view/edit toggle.
#[component]
pub fn TitleBar(
    draft: RwSignal<EditorDraft>,
    editable: bool,
    on_save_title: Callback<()>,
) -> impl IntoView {
    let editing = move || editable && draft.with(|d| d.editing_title);
    let saving = move || draft.with(|d| d.saving);

    view! {
        <Show
            when=editing
            fallback=move || view! {
                <button
                    type="button"
                    class="rounded px-2 py-1 text-left text-2xl font-semibold text-foreground hover:bg-accent disabled:hover:bg-transparent"
                    title=if editable { "Click to edit title" } else { "" }
                    disabled=!editable
                    on:click=move |_| draft.update(|d| d.begin_title_edit())
                >
                    {move || draft.with(|d| d.title.clone())}
                </button>
            }
        >
            <div class="flex items-center gap-2">
                <input
                    class="border-b-2 border-primary bg-transparent px-2 py-1 text-2xl font-semibold text-foreground outline-none"
                    autofocus=true
                    prop:value=move || draft.with(|d| d.title.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        draft.update(|d| d.title = value);
                    }
                    on:keydown=move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
                        "Enter" => on_save_title.run(()),
                        "Escape" => draft.update(|d| d.cancel_title_edit()),
                        _ => {}
                    }
                />
                <Button
                    variant=ButtonVariant::Success
                    size=ButtonSize::Sm
                    attr:disabled=saving
                    on:click=move |_| on_save_title.run(())
                >
                    "Save"
                </Button>
                <Button
                    variant=ButtonVariant::Outline
                    size=ButtonSize::Sm
                    attr:disabled=saving
                    on:click=move |_| draft.update(|d| d.cancel_title_edit())
                >
                    "Cancel"
                </Button>
            </div>
        </Show>
    }
}

#[component]
pub fn SaveButton(draft: RwSignal<EditorDraft>, on_save: Callback<()>) -> impl IntoView {
    let busy = move || draft.with(|d| d.saving || d.loading);

    view! {
        <Button size=ButtonSize::Sm attr:disabled=busy on:click=move |_| on_save.run(())>
            <span class="inline-flex items-center gap-2">
                <Show when=move || draft.with(|d| d.saving) fallback=|| ().into_view()>
                    <Spinner />
                </Show>
                {move || if draft.with(|d| d.saving) { "Saving..." } else { "Save" }}
            </span>
        </Button>
    }
}

#[component]
pub fn LoadingPlaceholder(#[prop(into)] label: String) -> impl IntoView {
    view! {
        <div class="flex items-center gap-2 py-16 text-xs text-muted-foreground justify-center">
            <Spinner />
            {label}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft_request() -> UpdateDocumentRequest {
        UpdateDocumentRequest {
            title: "Journal".to_string(),
            content: "<div>today</div>".to_string(),
        }
    }

    #[test]
    fn fixed_title_save_sends_content_only() {
        let req = user_document_request(draft_request(), false);
        assert_eq!(req.title, None);
        assert_eq!(req.content, "<div>today</div>");
        assert_eq!(
            serde_json::to_value(&req).expect("serialize"),
            serde_json::json!({ "content": "<div>today</div>" })
        );
    }

    #[test]
    fn editable_title_save_sends_both_fields() {
        let req = user_document_request(draft_request(), true);
        assert_eq!(req.title.as_deref(), Some("Journal"));
        assert_eq!(req.content, "<div>today</div>");
    }
}
