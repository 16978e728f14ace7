use crate::components::ui::{Button, ButtonSize, ButtonVariant, Card, CardContent, Spinner};
use crate::documents::DocumentList;
use crate::models::{Document, DocumentId};
use crate::notice::Notices;
use crate::pages::shared::{AppHeader, LoadingPlaceholder, NoticeBanner};
use crate::session::SessionContext;
use crate::util::display_date;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn DocumentsPage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let notices = Notices::new();
    let list = RwSignal::new(DocumentList::new());

    let refresh = move || {
        list.update(|l| l.begin_load());
        let client = session.client();
        spawn_local(async move {
            let result = client.list_documents().await;
            if session.end_if_unauthorized(&result) {
                return;
            }
            let notice = list.try_update(|l| l.finish_load(result)).flatten();
            notices.show_opt(notice);
        });
    };

    refresh();

    let create = move || {
        let Some(req) = list.try_update(|l| l.begin_create()).flatten() else {
            return;
        };
        let client = session.client();
        spawn_local(async move {
            let result = client.create_document(&req).await;
            if session.end_if_unauthorized(&result) {
                return;
            }
            let notice = list.try_update(|l| l.finish_create(result)).flatten();
            notices.show_opt(notice);
        });
    };

    let confirm_delete = move || {
        let Some(id) = list.try_update(|l| l.confirm_delete()).flatten() else {
            return;
        };
        let client = session.client();
        spawn_local(async move {
            let result = client.delete_document(&id).await;
            if session.end_if_unauthorized(&result) {
                return;
            }
            let notice = list.try_update(|l| l.finish_delete(&id, result)).flatten();
            notices.show_opt(notice);
        });
    };

    let is_empty = move || list.with(|l| l.documents.is_empty());

    view! {
        <div class="min-h-screen bg-background">
            <AppHeader />

            <main class="mx-auto max-w-5xl px-4 py-8">
                <div class="mb-6 flex items-center justify-between">
                    <h1 class="text-xl font-semibold text-foreground">"My Documents"</h1>
                    <div class="flex items-center gap-2">
                        <Button
                            variant=ButtonVariant::Outline
                            size=ButtonSize::Sm
                            attr:disabled=move || list.with(|l| l.refreshing)
                            on:click=move |_| refresh()
                        >
                            "Refresh"
                        </Button>
                        <Button
                            size=ButtonSize::Sm
                            on:click=move |_| list.update(|l| l.toggle_create_form())
                        >
                            {move || if list.with(|l| l.show_create_form) { "Cancel" } else { "New Document" }}
                        </Button>
                    </div>
                </div>

                <NoticeBanner notices=notices />

                <Show when=move || list.with(|l| l.show_create_form) fallback=|| ().into_view()>
                    <Card class="mb-6 py-4">
                        <CardContent class="flex items-center gap-2 px-4">
                            <input
                                class="h-9 flex-1 rounded-md border border-input bg-transparent px-3 text-sm outline-none focus-visible:ring-2 focus-visible:ring-ring/50"
                                placeholder="Enter document title..."
                                autofocus=true
                                prop:value=move || list.with(|l| l.new_title.clone())
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    list.update(|l| l.new_title = value);
                                }
                                on:keydown=move |ev: web_sys::KeyboardEvent| {
                                    if ev.key() == "Enter" {
                                        create();
                                    }
                                }
                            />
                            <Button
                                size=ButtonSize::Sm
                                attr:disabled=move || !list.with(|l| l.can_create())
                                on:click=move |_| create()
                            >
                                <span class="inline-flex items-center gap-2">
                                    <Show when=move || list.with(|l| l.creating) fallback=|| ().into_view()>
                                        <Spinner />
                                    </Show>
                                    {move || if list.with(|l| l.creating) { "Creating..." } else { "Create" }}
                                </span>
                            </Button>
                        </CardContent>
                    </Card>
                </Show>

                <Show
                    when=move || !list.with(|l| l.loading)
                    fallback=|| view! { <LoadingPlaceholder label="Loading documents..." /> }
                >
                    <Show when=move || !is_empty() fallback=move || view! { <EmptyState list=list /> }>
                        <ul class="flex flex-col gap-3">
                            <For
                                each=move || list.with(|l| l.documents.clone())
                                key=|doc: &Document| doc.id.clone()
                                children=move |doc: Document| {
                                    view! { <DocumentRow doc=doc list=list /> }
                                }
                            />
                        </ul>
                    </Show>
                </Show>
            </main>

            <Show
                when=move || list.with(|l| l.pending_delete.is_some())
                fallback=|| ().into_view()
            >
                <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/30 px-4">
                    <div class="w-full max-w-sm rounded-md border border-border bg-background p-4 shadow-lg">
                        <div class="mb-3 space-y-1">
                            <div class="text-sm font-medium">"Delete document"</div>
                            <div class="text-xs text-muted-foreground">
                                {move || {
                                    let title = list
                                        .with(|l| l.pending_delete_title())
                                        .unwrap_or_else(|| "this document".to_string());
                                    format!("Are you sure you want to delete \"{title}\"?")
                                }}
                            </div>
                        </div>

                        <div class="flex items-center justify-end gap-2 pt-2">
                            <Button
                                variant=ButtonVariant::Outline
                                size=ButtonSize::Sm
                                attr:disabled=move || list.with(|l| l.deleting)
                                on:click=move |_| list.update(|l| l.cancel_delete())
                            >
                                "Cancel"
                            </Button>
                            <Button
                                variant=ButtonVariant::Destructive
                                size=ButtonSize::Sm
                                attr:disabled=move || list.with(|l| l.deleting)
                                on:click=move |_| confirm_delete()
                            >
                                <span class="inline-flex items-center gap-2">
                                    <Show when=move || list.with(|l| l.deleting) fallback=|| ().into_view()>
                                        <Spinner />
                                    </Show>
                                    "Delete"
                                </span>
                            </Button>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}

#[component]
fn DocumentRow(doc: Document, list: RwSignal<DocumentList>) -> impl IntoView {
    let href = format!("/documents/{}", urlencoding::encode(doc.id.as_str()));
    let plain_href = format!("{href}/plain");
    let id: DocumentId = doc.id.clone();

    view! {
        <li class="flex items-center justify-between rounded-md border border-border bg-card px-4 py-3 shadow-xs">
            <a href=href.clone() class="min-w-0 flex-1">
                <div class="truncate text-sm font-medium text-foreground">{doc.display_title().to_string()}</div>
                <div class="mt-1 text-xs text-muted-foreground">
                    {format!(
                        "Created: {} | Updated: {}",
                        display_date(doc.created_at.as_deref()),
                        display_date(doc.updated_at.as_deref()),
                    )}
                </div>
            </a>
            <div class="ml-4 flex shrink-0 items-center gap-1">
                <a href=href class="rounded px-2 py-1 text-xs text-primary hover:bg-accent">"Open"</a>
                <a href=plain_href class="rounded px-2 py-1 text-xs text-muted-foreground hover:bg-accent">
                    "Plain"
                </a>
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Sm
                    class="text-destructive"
                    on:click=move |_| list.update(|l| l.request_delete(id.clone()))
                >
                    "Delete"
                </Button>
            </div>
        </li>
    }
}

#[component]
fn EmptyState(list: RwSignal<DocumentList>) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center gap-3 rounded-md border border-dashed border-border py-16 text-center">
            <div class="text-sm font-medium text-foreground">"No documents yet"</div>
            <div class="text-xs text-muted-foreground">"Create one to get started."</div>
            <Show when=move || !list.with(|l| l.show_create_form) fallback=|| ().into_view()>
                <Button size=ButtonSize::Sm on:click=move |_| list.update(|l| l.toggle_create_form())>
                    "Create Your First Document"
                </Button>
            </Show>
        </div>
    }
}
