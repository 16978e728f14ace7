use leptos::prelude::*;
use strum::IntoEnumIterator;

use super::command::{Align, FontSize, InlineFormat, ListKind, RichTextCommand};
use super::prompt::PromptKind;

pub(crate) const FONT_FAMILIES: &[&str] = &[
    "Arial",
    "Georgia",
    "Helvetica",
    "Times New Roman",
    "Courier New",
    "Verdana",
];

/// Last values the user picked in the toolbar controls.
///
/// This is display state only. Native editing does not report the style at
/// the caret, so these can disagree with the text under the cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ToolbarState {
    pub font_family: String,
    pub font_size: FontSize,
    pub text_color: String,
    pub highlight_color: String,
}

impl Default for ToolbarState {
    fn default() -> Self {
        Self {
            font_family: FONT_FAMILIES[0].to_string(),
            font_size: FontSize::DEFAULT,
            text_color: "#000000".to_string(),
            highlight_color: "#ffff00".to_string(),
        }
    }
}

impl ToolbarState {
    pub fn record(&mut self, command: &RichTextCommand) {
        match command {
            RichTextCommand::FontFamily(family) => self.font_family = family.clone(),
            RichTextCommand::FontSize(size) => self.font_size = *size,
            RichTextCommand::TextColor(color) => self.text_color = color.clone(),
            RichTextCommand::HighlightColor(color) => self.highlight_color = color.clone(),
            _ => {}
        }
    }
}

fn align_label(align: Align) -> &'static str {
    match align {
        Align::Left => "Left",
        Align::Center => "Center",
        Align::Right => "Right",
        Align::Justify => "Justify",
    }
}

fn list_label(kind: ListKind) -> &'static str {
    match kind {
        ListKind::Ordered => "1. List",
        ListKind::Unordered => "• List",
    }
}

const TOOL_CLASS: &str = "h-7 min-w-7 rounded px-2 text-xs text-foreground hover:bg-accent";
const SELECT_CLASS: &str = "h-7 rounded border border-border bg-background px-1 text-xs";

/// Formatting controls. Buttons keep focus (and the selection) in the surface
/// by swallowing mousedown.
#[component]
pub(crate) fn Toolbar(
    state: RwSignal<ToolbarState>,
    on_command: Callback<RichTextCommand>,
    on_prompt: Callback<PromptKind>,
) -> impl IntoView {
    let keep_selection = |ev: web_sys::MouseEvent| ev.prevent_default();

    let tool = move |label: &'static str, title: String, command: RichTextCommand| {
        view! {
            <button
                type="button"
                class=TOOL_CLASS
                title=title
                on:mousedown=keep_selection
                on:click=move |_| on_command.run(command.clone())
            >
                {label}
            </button>
        }
    };

    let formats = InlineFormat::iter()
        .map(|f| tool(f.label(), format!("{f:?}"), RichTextCommand::Toggle(f)))
        .collect_view();
    let aligns = Align::iter()
        .map(|a| tool(align_label(a), format!("Align {}", a.css()), RichTextCommand::Align(a)))
        .collect_view();
    let lists = ListKind::iter()
        .map(|k| tool(list_label(k), list_label(k).to_string(), RichTextCommand::List(k)))
        .collect_view();

    let pick = move |command: RichTextCommand| {
        state.update(|s| s.record(&command));
        on_command.run(command);
    };

    view! {
        <div
            data-name="Toolbar"
            class="flex flex-wrap items-center gap-1 rounded-t-md border border-border bg-muted/40 px-2 py-1"
        >
            <select
                class=SELECT_CLASS
                title="Font"
                prop:value=move || state.get().font_family
                on:change=move |ev| pick(RichTextCommand::FontFamily(event_target_value(&ev)))
            >
                {FONT_FAMILIES
                    .iter()
                    .map(|f| view! { <option value=*f>{*f}</option> })
                    .collect_view()}
            </select>
            <select
                class=SELECT_CLASS
                title="Size"
                prop:value=move || state.get().font_size.step().to_string()
                on:change=move |ev| {
                    let size = event_target_value(&ev)
                        .parse::<u8>()
                        .ok()
                        .and_then(FontSize::new);
                    if let Some(size) = size {
                        pick(RichTextCommand::FontSize(size));
                    }
                }
            >
                {FontSize::all()
                    .map(|s| view! { <option value=s.step().to_string()>{s.label()}</option> })
                    .collect_view()}
            </select>

            <span class="mx-1 h-5 w-px bg-border"></span>
            {formats}
            <span class="mx-1 h-5 w-px bg-border"></span>
            {aligns}
            <span class="mx-1 h-5 w-px bg-border"></span>
            {lists}
            <span class="mx-1 h-5 w-px bg-border"></span>

            <label class="inline-flex items-center gap-1 text-xs text-muted-foreground" title="Text color">
                "A"
                <input
                    type="color"
                    class="h-6 w-6 cursor-pointer border-0 bg-transparent p-0"
                    prop:value=move || state.get().text_color
                    on:change=move |ev| pick(RichTextCommand::TextColor(event_target_value(&ev)))
                />
            </label>
            <label class="inline-flex items-center gap-1 text-xs text-muted-foreground" title="Highlight">
                "H"
                <input
                    type="color"
                    class="h-6 w-6 cursor-pointer border-0 bg-transparent p-0"
                    prop:value=move || state.get().highlight_color
                    on:change=move |ev| pick(RichTextCommand::HighlightColor(event_target_value(&ev)))
                />
            </label>

            <span class="mx-1 h-5 w-px bg-border"></span>
            <button
                type="button"
                class=TOOL_CLASS
                on:mousedown=keep_selection
                on:click=move |_| on_prompt.run(PromptKind::Link)
            >
                "Link"
            </button>
            <button
                type="button"
                class=TOOL_CLASS
                on:mousedown=keep_selection
                on:click=move |_| on_prompt.run(PromptKind::Image)
            >
                "Image"
            </button>
            {tool("Clear", "Clear formatting".to_string(), RichTextCommand::ClearFormatting)}
            {tool("Undo", "Undo".to_string(), RichTextCommand::Undo)}
            {tool("Redo", "Redo".to_string(), RichTextCommand::Redo)}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_only_style_picks() {
        let mut state = ToolbarState::default();
        state.record(&RichTextCommand::FontFamily("Georgia".to_string()));
        state.record(&RichTextCommand::HighlightColor("#00ff00".to_string()));
        state.record(&RichTextCommand::Toggle(InlineFormat::Bold));
        assert_eq!(state.font_family, "Georgia");
        assert_eq!(state.highlight_color, "#00ff00");
        assert_eq!(state.text_color, "#000000");
        assert_eq!(state.font_size, FontSize::DEFAULT);
    }
}
