use wasm_bindgen::JsCast;
use web_sys::{HtmlDocument, HtmlElement, Node, Range};

use super::command::RichTextCommand;
use super::surface::EditableSurface;

/// A content-editable element driven by the browser's native editing commands.
pub(crate) struct BrowserSurface(HtmlElement);

impl BrowserSurface {
    pub fn new(element: HtmlElement) -> Self {
        Self(element)
    }

    fn html_document(&self) -> Option<HtmlDocument> {
        self.0.owner_document()?.dyn_into::<HtmlDocument>().ok()
    }
}

impl EditableSurface for BrowserSurface {
    fn execute(&mut self, command: &RichTextCommand) -> bool {
        let Some(doc) = self.html_document() else {
            return false;
        };
        let (name, value) = command.native();
        let result = match value {
            Some(value) => doc.exec_command_with_show_ui_and_value(name, false, &value),
            None => doc.exec_command(name),
        };
        match result {
            Ok(applied) => applied,
            Err(e) => {
                tracing::warn!(command = name, error = ?e, "native command failed");
                false
            }
        }
    }

    fn markup(&self) -> String {
        self.0.inner_html()
    }

    fn set_markup(&mut self, markup: &str) {
        self.0.set_inner_html(markup);
    }

    fn focus(&mut self) {
        let _ = self.0.focus();
    }
}

/// The selection inside an element, saved while focus is elsewhere (for
/// example in the URL prompt input).
pub(crate) struct SelectionBookmark(Range);

impl SelectionBookmark {
    /// `None` when nothing inside `within` is selected.
    pub fn capture(within: &Node) -> Option<Self> {
        let selection = web_sys::window()?.get_selection().ok()??;
        if selection.range_count() == 0 {
            return None;
        }
        let range = selection.get_range_at(0).ok()?;
        let container = range.common_ancestor_container().ok()?;
        within.contains(Some(&container)).then_some(Self(range))
    }

    pub fn restore(&self) {
        let Some(selection) = web_sys::window().and_then(|w| w.get_selection().ok().flatten())
        else {
            return;
        };
        let _ = selection.remove_all_ranges();
        let _ = selection.add_range(&self.0);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn editable() -> HtmlElement {
        let document = web_sys::window().unwrap().document().unwrap();
        let el = document
            .create_element("div")
            .unwrap()
            .dyn_into::<HtmlElement>()
            .unwrap();
        el.set_attribute("contenteditable", "true").unwrap();
        document.body().unwrap().append_child(&el).unwrap();
        el
    }

    #[wasm_bindgen_test]
    fn markup_round_trips_through_the_element() {
        let mut surface = BrowserSurface::new(editable());
        surface.set_markup("<b>hi</b>");
        assert_eq!(surface.markup(), "<b>hi</b>");
    }

    #[wasm_bindgen_test]
    fn bookmark_ignores_selections_elsewhere() {
        let el = editable();
        let outside = editable();
        outside.set_inner_html("x");

        let document = web_sys::window().unwrap().document().unwrap();
        let range = document.create_range().unwrap();
        range.select_node_contents(&outside).unwrap();
        let selection = web_sys::window().unwrap().get_selection().unwrap().unwrap();
        selection.remove_all_ranges().unwrap();
        selection.add_range(&range).unwrap();

        assert!(SelectionBookmark::capture(&el).is_none());
        assert!(SelectionBookmark::capture(&outside).is_some());
    }
}
