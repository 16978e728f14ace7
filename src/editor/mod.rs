mod browser;
mod command;
mod headless;
mod markup;
mod prompt;
mod surface;
mod toolbar;

use browser::{BrowserSurface, SelectionBookmark};
use command::RichTextCommand;
use headless::HeadlessDocument;
use prompt::{PromptKind, PromptResolution, UrlPrompt};
use surface::{EditableSurface, SurfaceSync};
use toolbar::{Toolbar, ToolbarState};

use crate::components::ui::{Button, ButtonSize, ButtonVariant, Label};
use crate::drafts::EditorDraft;
use leptos::html;
use leptos::prelude::*;
use web_sys::HtmlElement;

/// Character count of stored markup, as a reader would see it.
pub(crate) fn visible_length(markup: &str) -> usize {
    HeadlessDocument::from_markup(markup)
        .plain_text()
        .chars()
        .count()
}

/// Content-editable surface with a formatting toolbar, bound to `draft`.
///
/// The surface is seeded from `draft.content` once, after the first
/// successful load. From then on it owns the content and is mirrored back
/// into the draft on every input and on blur.
#[component]
pub fn RichTextEditor(draft: RwSignal<EditorDraft>) -> impl IntoView {
    let surface_ref: NodeRef<html::Div> = NodeRef::new();
    let sync = StoredValue::new(SurfaceSync::default());
    let toolbar = RwSignal::new(ToolbarState::default());
    let prompt = RwSignal::new(UrlPrompt::default());
    // Selection saved when focus leaves the surface; cleared when it returns.
    let bookmark = StoredValue::new_local(None::<SelectionBookmark>);

    let surface = move || {
        surface_ref
            .get_untracked()
            .map(|el| BrowserSurface::new(HtmlElement::from(el)))
    };

    let loaded_revision = Memo::new(move |_| draft.with(|d| d.loaded_revision));

    Effect::new(move |_| {
        let revision = loaded_revision.get();
        let Some(el) = surface_ref.get() else {
            return;
        };
        if revision == 0 {
            return;
        }
        let content = draft.with_untracked(|d| d.content.clone());
        let mut surface = BrowserSurface::new(HtmlElement::from(el));
        sync.update_value(|s| {
            if s.seed(&mut surface, revision, &content) {
                tracing::debug!(revision, "editor surface seeded");
            }
        });
    });

    let mirror = move || {
        let Some(surface) = surface() else {
            return;
        };
        draft.update(|d| {
            sync.with_value(|s| s.mirror(&surface, &mut d.content));
        });
    };

    let run_command = move |command: RichTextCommand| {
        let Some(mut surface) = surface() else {
            return;
        };
        let mut saved = None;
        bookmark.update_value(|b| saved = b.take());
        if let Some(saved) = saved {
            surface.focus();
            saved.restore();
        }
        sync.with_value(|s| s.dispatch(&mut surface, &command));
        mirror();
    };

    let on_prompt = Callback::new(move |kind: PromptKind| {
        if let Some(el) = surface_ref.get_untracked() {
            if let Some(captured) = SelectionBookmark::capture(&el) {
                bookmark.set_value(Some(captured));
            }
        }
        prompt.update(|p| p.open(kind));
    });

    let confirm_prompt = move || match prompt.try_update(|p| p.confirm()) {
        Some(PromptResolution::Confirmed(command)) => run_command(command),
        _ => {
            let mut saved = None;
            bookmark.update_value(|b| saved = b.take());
            if let (Some(mut surface), Some(saved)) = (surface(), saved) {
                surface.focus();
                saved.restore();
            }
        }
    };

    let cancel_prompt = move || {
        prompt.update(|p| p.cancel());
        confirm_prompt();
    };

    let chars = Memo::new(move |_| draft.with(|d| visible_length(&d.content)));

    view! {
        <div class="rounded-md border border-border bg-background">
            <Toolbar state=toolbar on_command=Callback::new(run_command) on_prompt=on_prompt />
            <div
                node_ref=surface_ref
                data-name="RichTextSurface"
                contenteditable="true"
                class="min-h-[420px] px-4 py-3 text-sm leading-relaxed outline-none [&_ol]:list-decimal [&_ol]:pl-6 [&_ul]:list-disc [&_ul]:pl-6 [&_a]:text-primary [&_a]:underline [&_img]:max-w-full"
                on:input=move |_| mirror()
                on:focus=move |_| bookmark.set_value(None)
                on:blur=move |_| {
                    if let Some(el) = surface_ref.get_untracked() {
                        bookmark.set_value(SelectionBookmark::capture(&el));
                    }
                    mirror();
                }
            ></div>
            <div class="border-t border-border px-3 py-1 text-[11px] text-muted-foreground">
                {move || format!("{} characters", chars.get())}
            </div>
        </div>

        <Show when=move || prompt.with(|p| p.is_open()) fallback=|| ().into_view()>
            <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/30 px-4">
                <div class="w-full max-w-sm rounded-md border border-border bg-background p-4 shadow-lg">
                    <div class="mb-3 text-sm font-medium">
                        {move || prompt.with(|p| p.kind().map(|k| k.title()).unwrap_or_default())}
                    </div>
                    <div class="space-y-1">
                        <Label html_for="url-prompt" class="text-xs">"URL"</Label>
                        <input
                            id="url-prompt"
                            autofocus=true
                            class="h-8 w-full rounded-md border border-border bg-background px-3 text-sm outline-none focus-visible:ring-2 focus-visible:ring-ring/50"
                            placeholder=move || prompt.with(|p| p.kind().map(|k| k.placeholder()).unwrap_or_default())
                            prop:value=move || prompt.with(|p| p.value().to_string())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                prompt.update(|p| p.set_value(value));
                            }
                            on:keydown=move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
                                "Enter" => {
                                    ev.prevent_default();
                                    confirm_prompt();
                                }
                                "Escape" => cancel_prompt(),
                                _ => {}
                            }
                        />
                    </div>
                    <div class="flex items-center justify-end gap-2 pt-3">
                        <Button
                            variant=ButtonVariant::Outline
                            size=ButtonSize::Sm
                            on:click=move |_| cancel_prompt()
                        >
                            "Cancel"
                        </Button>
                        <Button size=ButtonSize::Sm on:click=move |_| confirm_prompt()>
                            "Insert"
                        </Button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
