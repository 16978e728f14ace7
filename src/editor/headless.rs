//! An in-memory rich-text document with its own selection.
//!
//! Content is a list of blocks (paragraphs or list items), each a list of
//! styled cells. Offsets count cells, plus one position between adjacent
//! blocks, so `"ab"` + `"c"` spans offsets `0..=4`.

// Selection, typing and history are only driven by tests and the surface
// trait; app builds read markup and text.
#![cfg_attr(not(test), allow(dead_code))]

use std::collections::VecDeque;

use super::command::{Align, FontSize, InlineFormat, ListKind, RichTextCommand};
use super::markup::{escape_attr, escape_text, style_property, tokenize, Token};
use super::surface::EditableSurface;

const HISTORY_LIMIT: usize = 100;

const BLOCK_TAGS: &[&str] = &[
    "div", "p", "li", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "pre",
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn caret(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn is_caret(&self) -> bool {
        self.start == self.end
    }

    pub fn normalize(self) -> Self {
        if self.start <= self.end {
            self
        } else {
            Self::new(self.end, self.start)
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct InlineStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub font_family: Option<String>,
    pub font_size: Option<FontSize>,
    pub color: Option<String>,
    pub highlight: Option<String>,
    pub link: Option<String>,
}

impl InlineStyle {
    pub fn flag(&self, format: InlineFormat) -> bool {
        match format {
            InlineFormat::Bold => self.bold,
            InlineFormat::Italic => self.italic,
            InlineFormat::Underline => self.underline,
            InlineFormat::Strikethrough => self.strikethrough,
        }
    }

    fn set_flag(&mut self, format: InlineFormat, on: bool) {
        match format {
            InlineFormat::Bold => self.bold = on,
            InlineFormat::Italic => self.italic = on,
            InlineFormat::Underline => self.underline = on,
            InlineFormat::Strikethrough => self.strikethrough = on,
        }
    }

    /// Clear-formatting keeps links, like the native command does.
    fn cleared(&self) -> Self {
        Self {
            link: self.link.clone(),
            ..Default::default()
        }
    }

    fn has_font(&self) -> bool {
        self.font_family.is_some() || self.font_size.is_some() || self.color.is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Atom {
    Char(char),
    Image(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Cell {
    atom: Atom,
    style: InlineStyle,
}

impl Cell {
    fn is_char(&self) -> bool {
        matches!(self.atom, Atom::Char(_))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Block {
    align: Align,
    list: Option<ListKind>,
    cells: Vec<Cell>,
}

impl Block {
    fn with_layout(align: Align, list: Option<ListKind>) -> Self {
        Self {
            align,
            list,
            cells: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Snapshot {
    blocks: Vec<Block>,
    selection: TextRange,
}

#[derive(Clone, Debug)]
pub(crate) struct HeadlessDocument {
    blocks: Vec<Block>,
    selection: TextRange,
    /// Style for the next typed text when a format was toggled at a caret.
    pending: Option<InlineStyle>,
    undo: VecDeque<Snapshot>,
    redo: Vec<Snapshot>,
    focused: bool,
}

impl Default for HeadlessDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessDocument {
    pub fn new() -> Self {
        Self {
            blocks: vec![Block::default()],
            selection: TextRange::default(),
            pending: None,
            undo: VecDeque::new(),
            redo: Vec::new(),
            focused: false,
        }
    }

    pub fn from_markup(markup: &str) -> Self {
        let mut doc = Self::new();
        doc.load(markup);
        doc
    }

    pub fn len(&self) -> usize {
        let cells: usize = self.blocks.iter().map(|b| b.cells.len()).sum();
        cells + self.blocks.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn selection(&self) -> TextRange {
        self.selection
    }

    pub fn select(&mut self, start: usize, end: usize) {
        let len = self.len();
        self.selection = TextRange::new(start.min(len), end.min(len));
        self.pending = None;
    }

    pub fn select_all(&mut self) {
        self.select(0, self.len());
    }

    pub fn set_caret(&mut self, offset: usize) {
        self.select(offset, offset);
    }

    /// Text content, blocks joined by newlines and images shown as U+FFFC.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|b| {
                b.cells
                    .iter()
                    .map(|c| match &c.atom {
                        Atom::Char(ch) => *ch,
                        Atom::Image(_) => '\u{fffc}',
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Type at the selection, replacing it. `\n` starts a new block.
    pub fn type_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let before = self.snapshot();

        let style = self
            .pending
            .take()
            .unwrap_or_else(|| self.style_at_caret());
        self.delete_selection();

        for ch in text.chars() {
            if ch == '\n' {
                self.split_block();
            } else {
                self.insert_cell(Cell {
                    atom: Atom::Char(ch),
                    style: style.clone(),
                });
            }
        }

        self.commit(before);
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            blocks: self.blocks.clone(),
            selection: self.selection,
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.blocks = snapshot.blocks;
        self.selection = snapshot.selection;
        self.pending = None;
    }

    fn commit(&mut self, before: Snapshot) {
        if before.blocks == self.blocks {
            return;
        }
        self.undo.push_back(before);
        if self.undo.len() > HISTORY_LIMIT {
            self.undo.pop_front();
        }
        self.redo.clear();
    }

    fn undo_step(&mut self) -> bool {
        let Some(previous) = self.undo.pop_back() else {
            return false;
        };
        self.redo.push(self.snapshot());
        self.restore(previous);
        true
    }

    fn redo_step(&mut self) -> bool {
        let Some(next) = self.redo.pop() else {
            return false;
        };
        self.undo.push_back(self.snapshot());
        self.restore(next);
        true
    }

    /// (block index, cell index) for a document offset, clamped to the end.
    fn locate(&self, offset: usize) -> (usize, usize) {
        let mut rest = offset;
        for (b, block) in self.blocks.iter().enumerate() {
            if rest <= block.cells.len() {
                return (b, rest);
            }
            rest -= block.cells.len() + 1;
        }
        let last = self.blocks.len() - 1;
        (last, self.blocks[last].cells.len())
    }

    /// Cell positions covered by `range`.
    fn positions(&self, range: TextRange) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        let mut base = 0;
        for (b, block) in self.blocks.iter().enumerate() {
            for i in 0..block.cells.len() {
                let offset = base + i;
                if offset >= range.start && offset < range.end {
                    out.push((b, i));
                }
            }
            base += block.cells.len() + 1;
        }
        out
    }

    /// Blocks the selection touches; a caret touches its own block.
    fn touched_blocks(&self, range: TextRange) -> std::ops::RangeInclusive<usize> {
        let (first, _) = self.locate(range.start);
        let (mut last, last_idx) = self.locate(range.end);
        if !range.is_caret() && last_idx == 0 && last > first {
            last -= 1;
        }
        first..=last
    }

    fn style_at_caret(&self) -> InlineStyle {
        let (b, i) = self.locate(self.selection.normalize().start);
        let cells = &self.blocks[b].cells;
        let neighbor = if i > 0 { cells.get(i - 1) } else { cells.first() };
        neighbor
            .filter(|c| c.is_char())
            .map(|c| InlineStyle {
                link: None,
                ..c.style.clone()
            })
            .unwrap_or_default()
    }

    fn delete_selection(&mut self) {
        let range = self.selection.normalize();
        self.selection = TextRange::caret(range.start);
        if range.is_caret() {
            return;
        }

        let (b1, i1) = self.locate(range.start);
        let (b2, i2) = self.locate(range.end);
        if b1 == b2 {
            self.blocks[b1].cells.drain(i1..i2);
        } else {
            let tail = self.blocks[b2].cells.split_off(i2);
            self.blocks[b1].cells.truncate(i1);
            self.blocks[b1].cells.extend(tail);
            self.blocks.drain(b1 + 1..=b2);
        }
    }

    fn insert_cell(&mut self, cell: Cell) {
        let caret = self.selection.start;
        let (b, i) = self.locate(caret);
        self.blocks[b].cells.insert(i, cell);
        self.selection = TextRange::caret(caret + 1);
    }

    fn split_block(&mut self) {
        let caret = self.selection.start;
        let (b, i) = self.locate(caret);
        let tail = self.blocks[b].cells.split_off(i);
        let mut next = Block::with_layout(self.blocks[b].align, self.blocks[b].list);
        next.cells = tail;
        self.blocks.insert(b + 1, next);
        self.selection = TextRange::caret(caret + 1);
    }

    /// Apply `edit` to every text cell in the selection, or to the pending
    /// caret style when nothing is selected.
    fn restyle(&mut self, mut edit: impl FnMut(&mut InlineStyle)) -> bool {
        let range = self.selection.normalize();
        if range.is_caret() {
            let mut style = self
                .pending
                .take()
                .unwrap_or_else(|| self.style_at_caret());
            edit(&mut style);
            self.pending = Some(style);
            return true;
        }

        let positions = self.positions(range);
        let mut touched = false;
        for (b, i) in positions {
            let cell = &mut self.blocks[b].cells[i];
            if cell.is_char() {
                edit(&mut cell.style);
                touched = true;
            }
        }
        touched
    }

    fn toggle(&mut self, format: InlineFormat) -> bool {
        let range = self.selection.normalize();
        if range.is_caret() {
            return self.restyle(|s| s.set_flag(format, !s.flag(format)));
        }

        let all_on = self
            .positions(range)
            .into_iter()
            .map(|(b, i)| &self.blocks[b].cells[i])
            .filter(|c| c.is_char())
            .all(|c| c.style.flag(format));
        self.restyle(|s| s.set_flag(format, !all_on))
    }

    fn align(&mut self, align: Align) -> bool {
        for b in self.touched_blocks(self.selection.normalize()) {
            self.blocks[b].align = align;
        }
        true
    }

    fn toggle_list(&mut self, kind: ListKind) -> bool {
        let blocks = self.touched_blocks(self.selection.normalize());
        let all_in_list = blocks.clone().all(|b| self.blocks[b].list == Some(kind));
        let next = if all_in_list { None } else { Some(kind) };
        for b in blocks {
            self.blocks[b].list = next;
        }
        true
    }

    fn insert_link(&mut self, url: &str) -> bool {
        let url = url.trim();
        if url.is_empty() {
            return false;
        }
        if !self.selection.is_caret() {
            return self.restyle(|s| s.link = Some(url.to_string()));
        }

        let style = InlineStyle {
            link: Some(url.to_string()),
            ..self.pending.take().unwrap_or_else(|| self.style_at_caret())
        };
        for ch in url.chars() {
            self.insert_cell(Cell {
                atom: Atom::Char(ch),
                style: style.clone(),
            });
        }
        true
    }

    fn insert_image(&mut self, src: &str) -> bool {
        let src = src.trim();
        if src.is_empty() {
            return false;
        }
        self.delete_selection();
        self.insert_cell(Cell {
            atom: Atom::Image(src.to_string()),
            style: InlineStyle::default(),
        });
        true
    }

    fn apply(&mut self, command: &RichTextCommand) -> bool {
        match command {
            RichTextCommand::Toggle(format) => self.toggle(*format),
            RichTextCommand::Align(align) => self.align(*align),
            RichTextCommand::List(kind) => self.toggle_list(*kind),
            RichTextCommand::ClearFormatting => self.restyle(|s| *s = s.cleared()),
            RichTextCommand::FontFamily(family) => {
                self.restyle(|s| s.font_family = Some(family.clone()))
            }
            RichTextCommand::FontSize(size) => self.restyle(|s| s.font_size = Some(*size)),
            RichTextCommand::TextColor(color) => self.restyle(|s| s.color = Some(color.clone())),
            RichTextCommand::HighlightColor(color) => {
                self.restyle(|s| s.highlight = Some(color.clone()))
            }
            RichTextCommand::InsertLink(url) => self.insert_link(url),
            RichTextCommand::InsertImage(src) => self.insert_image(src),
            RichTextCommand::Undo => self.undo_step(),
            RichTextCommand::Redo => self.redo_step(),
        }
    }

    pub fn to_html(&self) -> String {
        if self.blocks.len() == 1 && self.blocks[0] == Block::default() {
            return String::new();
        }

        let mut out = String::new();
        let mut i = 0;
        while i < self.blocks.len() {
            match self.blocks[i].list {
                Some(kind) => {
                    out.push_str(&format!("<{}>", kind.tag()));
                    while i < self.blocks.len() && self.blocks[i].list == Some(kind) {
                        write_block(&mut out, "li", &self.blocks[i]);
                        i += 1;
                    }
                    out.push_str(&format!("</{}>", kind.tag()));
                }
                None => {
                    write_block(&mut out, "div", &self.blocks[i]);
                    i += 1;
                }
            }
        }
        out
    }

    fn load(&mut self, markup: &str) {
        self.blocks = if markup.contains('<') {
            parse_blocks(markup)
        } else {
            plain_blocks(markup)
        };
        self.undo.clear();
        self.redo.clear();
        self.pending = None;
        self.selection = TextRange::caret(self.len());
    }
}

impl EditableSurface for HeadlessDocument {
    fn execute(&mut self, command: &RichTextCommand) -> bool {
        if !command.is_edit() {
            return self.apply(command);
        }
        let before = self.snapshot();
        let applied = self.apply(command);
        self.commit(before);
        applied
    }

    fn markup(&self) -> String {
        self.to_html()
    }

    fn set_markup(&mut self, markup: &str) {
        self.load(markup);
    }

    fn focus(&mut self) {
        self.focused = true;
    }
}

fn write_block(out: &mut String, tag: &str, block: &Block) {
    out.push('<');
    out.push_str(tag);
    if block.align != Align::Left {
        out.push_str(&format!(" style=\"text-align: {};\"", block.align.css()));
    }
    out.push('>');

    if block.cells.is_empty() {
        out.push_str("<br>");
    }

    let mut i = 0;
    while i < block.cells.len() {
        match &block.cells[i].atom {
            Atom::Image(src) => {
                out.push_str(&format!("<img src=\"{}\">", escape_attr(src)));
                i += 1;
            }
            Atom::Char(_) => {
                let style = &block.cells[i].style;
                let mut text = String::new();
                while let Some(Cell {
                    atom: Atom::Char(ch),
                    style: s,
                }) = block.cells.get(i)
                {
                    if s != style {
                        break;
                    }
                    text.push(*ch);
                    i += 1;
                }
                write_run(out, style, &text);
            }
        }
    }

    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn write_run(out: &mut String, style: &InlineStyle, text: &str) {
    let mut closers: Vec<&str> = Vec::new();

    if let Some(href) = &style.link {
        out.push_str(&format!("<a href=\"{}\">", escape_attr(href)));
        closers.push("</a>");
    }
    if let Some(color) = &style.highlight {
        out.push_str(&format!(
            "<span style=\"background-color: {};\">",
            escape_attr(color)
        ));
        closers.push("</span>");
    }
    if style.has_font() {
        out.push_str("<font");
        if let Some(face) = &style.font_family {
            out.push_str(&format!(" face=\"{}\"", escape_attr(face)));
        }
        if let Some(size) = style.font_size {
            out.push_str(&format!(" size=\"{}\"", size.step()));
        }
        if let Some(color) = &style.color {
            out.push_str(&format!(" color=\"{}\"", escape_attr(color)));
        }
        out.push('>');
        closers.push("</font>");
    }
    for (on, open, close) in [
        (style.bold, "<b>", "</b>"),
        (style.italic, "<i>", "</i>"),
        (style.underline, "<u>", "</u>"),
        (style.strikethrough, "<strike>", "</strike>"),
    ] {
        if on {
            out.push_str(open);
            closers.push(close);
        }
    }

    out.push_str(&escape_text(text));
    for close in closers.iter().rev() {
        out.push_str(close);
    }
}

fn plain_blocks(text: &str) -> Vec<Block> {
    text.replace("\r\n", "\n")
        .split('\n')
        .map(|line| Block {
            cells: line
                .chars()
                .map(|ch| Cell {
                    atom: Atom::Char(ch),
                    style: InlineStyle::default(),
                })
                .collect(),
            ..Default::default()
        })
        .collect()
}

/// Builds blocks from markup, keeping what the model can express and
/// dropping the rest (unknown tags keep their text).
struct BlockBuilder {
    blocks: Vec<Block>,
    current: Block,
    /// The current block was opened by a tag and should be kept even if empty.
    opened: bool,
    styles: Vec<(String, InlineStyle)>,
    lists: Vec<ListKind>,
}

impl BlockBuilder {
    fn new() -> Self {
        Self {
            blocks: Vec::new(),
            current: Block::default(),
            opened: false,
            styles: Vec::new(),
            lists: Vec::new(),
        }
    }

    fn style(&self) -> InlineStyle {
        self.styles
            .last()
            .map(|(_, s)| s.clone())
            .unwrap_or_default()
    }

    fn flush(&mut self, keep_empty: bool) {
        if !self.current.cells.is_empty() || (keep_empty && self.opened) {
            let layout = Block::with_layout(self.current.align, self.current.list);
            self.blocks
                .push(std::mem::replace(&mut self.current, layout));
        }
        self.opened = false;
    }

    fn open_block(&mut self, align: Align) {
        self.flush(false);
        self.current = Block::with_layout(align, self.lists.last().copied());
        self.opened = true;
    }

    fn line_break(&mut self) {
        let layout = Block::with_layout(self.current.align, self.current.list);
        let finished = std::mem::replace(&mut self.current, layout);
        self.blocks.push(finished);
        self.opened = false;
    }

    fn text(&mut self, text: &str) {
        if text.trim().is_empty() && text.contains('\n') {
            return;
        }
        let style = self.style();
        for ch in text.chars() {
            let ch = match ch {
                '\r' => continue,
                '\n' | '\t' => ' ',
                other => other,
            };
            self.current.cells.push(Cell {
                atom: Atom::Char(ch),
                style: style.clone(),
            });
        }
    }

    fn start(&mut self, name: &str, attrs: &[(String, String)]) {
        let style_attr = Token::attr(attrs, "style").unwrap_or_default();

        if BLOCK_TAGS.contains(&name) {
            let align = style_property(style_attr, "text-align")
                .as_deref()
                .or(Token::attr(attrs, "align"))
                .and_then(Align::from_css)
                .unwrap_or_default();
            self.open_block(align);
            return;
        }

        match name {
            "ul" | "ol" => {
                self.flush(false);
                self.lists.push(if name == "ol" {
                    ListKind::Ordered
                } else {
                    ListKind::Unordered
                });
                self.current.list = self.lists.last().copied();
            }
            "br" => self.line_break(),
            "img" => {
                if let Some(src) = Token::attr(attrs, "src").filter(|s| !s.trim().is_empty()) {
                    self.current.cells.push(Cell {
                        atom: Atom::Image(src.to_string()),
                        style: InlineStyle::default(),
                    });
                }
            }
            _ => {
                let mut style = self.style();
                if apply_inline_tag(&mut style, name, attrs, style_attr) {
                    self.styles.push((name.to_string(), style));
                }
            }
        }
    }

    fn end(&mut self, name: &str) {
        if BLOCK_TAGS.contains(&name) {
            self.flush(true);
            return;
        }
        match name {
            "ul" | "ol" => {
                self.flush(false);
                self.lists.pop();
                self.current.list = self.lists.last().copied();
            }
            _ => {
                if let Some(pos) = self.styles.iter().rposition(|(n, _)| n == name) {
                    self.styles.truncate(pos);
                }
            }
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush(false);
        if self.blocks.is_empty() {
            self.blocks.push(Block::default());
        }
        self.blocks
    }
}

/// Returns false for tags that carry no inline style.
fn apply_inline_tag(
    style: &mut InlineStyle,
    name: &str,
    attrs: &[(String, String)],
    style_attr: &str,
) -> bool {
    match name {
        "b" | "strong" => style.bold = true,
        "i" | "em" => style.italic = true,
        "u" | "ins" => style.underline = true,
        "s" | "strike" | "del" => style.strikethrough = true,
        "a" => {
            if let Some(href) = Token::attr(attrs, "href") {
                style.link = Some(href.to_string());
            }
        }
        "font" => {
            if let Some(face) = Token::attr(attrs, "face") {
                style.font_family = Some(face.to_string());
            }
            if let Some(size) = Token::attr(attrs, "size")
                .and_then(|s| s.trim().parse::<u8>().ok())
                .and_then(FontSize::new)
            {
                style.font_size = Some(size);
            }
            if let Some(color) = Token::attr(attrs, "color") {
                style.color = Some(color.to_string());
            }
        }
        "span" => {}
        _ => return false,
    }

    if let Some(bg) = style_property(style_attr, "background-color") {
        style.highlight = Some(bg);
    }
    if let Some(color) = style_property(style_attr, "color") {
        style.color = Some(color);
    }
    if let Some(family) = style_property(style_attr, "font-family") {
        style.font_family = Some(family.trim_matches(['"', '\'']).to_string());
    }
    if let Some(weight) = style_property(style_attr, "font-weight") {
        style.bold = weight == "bold" || weight.parse::<u16>().is_ok_and(|w| w >= 600);
    }
    if style_property(style_attr, "font-style").as_deref() == Some("italic") {
        style.italic = true;
    }
    if let Some(decoration) = style_property(style_attr, "text-decoration") {
        style.underline |= decoration.contains("underline");
        style.strikethrough |= decoration.contains("line-through");
    }
    true
}

fn parse_blocks(markup: &str) -> Vec<Block> {
    let mut builder = BlockBuilder::new();
    for token in tokenize(markup) {
        match token {
            Token::Start { name, attrs, .. } => builder.start(&name, &attrs),
            Token::End { name } => builder.end(&name),
            Token::Text(text) => builder.text(&text),
        }
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drafts::EditorDraft;
    use crate::editor::surface::SurfaceSync;
    use crate::models::DocumentBody;

    fn run(doc: &mut HeadlessDocument, command: RichTextCommand) {
        assert!(doc.execute(&command), "{command:?} should apply");
    }

    #[test]
    fn empty_document_serializes_to_nothing() {
        let doc = HeadlessDocument::new();
        assert_eq!(doc.markup(), "");
        assert!(doc.is_empty());
    }

    #[test]
    fn bold_at_caret_applies_to_typed_text() {
        let mut doc = HeadlessDocument::from_markup("Hi ");
        run(&mut doc, RichTextCommand::Toggle(InlineFormat::Bold));
        doc.type_text("there");
        assert_eq!(doc.markup(), "<div>Hi <b>there</b></div>");
    }

    #[test]
    fn toggling_a_fully_bold_selection_removes_bold() {
        let mut doc = HeadlessDocument::from_markup("<div><b>abc</b>d</div>");
        doc.select(0, 3);
        run(&mut doc, RichTextCommand::Toggle(InlineFormat::Bold));
        assert_eq!(doc.markup(), "<div>abcd</div>");

        doc.select(1, 4);
        run(&mut doc, RichTextCommand::Toggle(InlineFormat::Italic));
        assert_eq!(doc.markup(), "<div>a<i>bcd</i></div>");
    }

    #[test]
    fn font_color_and_highlight_nest_in_a_stable_order() {
        let mut doc = HeadlessDocument::from_markup("word");
        doc.select_all();
        run(&mut doc, RichTextCommand::FontFamily("Georgia".to_string()));
        run(&mut doc, RichTextCommand::FontSize(FontSize::new(5).expect("size")));
        run(&mut doc, RichTextCommand::TextColor("#ff0000".to_string()));
        run(&mut doc, RichTextCommand::HighlightColor("#ffff00".to_string()));
        run(&mut doc, RichTextCommand::Toggle(InlineFormat::Underline));
        assert_eq!(
            doc.markup(),
            "<div><span style=\"background-color: #ffff00;\">\
             <font face=\"Georgia\" size=\"5\" color=\"#ff0000\"><u>word</u></font></span></div>"
        );

        run(&mut doc, RichTextCommand::ClearFormatting);
        assert_eq!(doc.markup(), "<div>word</div>");
    }

    #[test]
    fn alignment_and_lists_are_per_block() {
        let mut doc = HeadlessDocument::from_markup("one\ntwo\nthree");
        doc.select(4, 9);
        run(&mut doc, RichTextCommand::List(ListKind::Unordered));
        doc.set_caret(0);
        run(&mut doc, RichTextCommand::Align(Align::Center));
        assert_eq!(
            doc.markup(),
            "<div style=\"text-align: center;\">one</div><ul><li>two</li><li>three</li></ul>"
        );

        doc.select(4, 9);
        run(&mut doc, RichTextCommand::List(ListKind::Unordered));
        assert_eq!(
            doc.markup(),
            "<div style=\"text-align: center;\">one</div><div>two</div><div>three</div>"
        );
    }

    #[test]
    fn links_wrap_a_selection_or_insert_the_url() {
        let mut doc = HeadlessDocument::from_markup("see docs");
        doc.select(4, 8);
        run(&mut doc, RichTextCommand::InsertLink("https://example.com/?a=1&b=2".to_string()));
        assert_eq!(
            doc.markup(),
            "<div>see <a href=\"https://example.com/?a=1&amp;b=2\">docs</a></div>"
        );

        let mut doc = HeadlessDocument::new();
        run(&mut doc, RichTextCommand::InsertLink("http://x.io".to_string()));
        assert_eq!(doc.markup(), "<div><a href=\"http://x.io\">http://x.io</a></div>");

        assert!(!doc.execute(&RichTextCommand::InsertLink("  ".to_string())));
    }

    #[test]
    fn images_replace_the_selection() {
        let mut doc = HeadlessDocument::from_markup("abc");
        doc.select(1, 2);
        run(&mut doc, RichTextCommand::InsertImage("/a.png".to_string()));
        assert_eq!(doc.markup(), "<div>a<img src=\"/a.png\">c</div>");
        assert_eq!(doc.plain_text(), "a\u{fffc}c");
    }

    #[test]
    fn undo_and_redo_walk_history() {
        let mut doc = HeadlessDocument::from_markup("abc");
        doc.select_all();
        run(&mut doc, RichTextCommand::Toggle(InlineFormat::Bold));
        doc.set_caret(3);
        doc.type_text("!");
        assert_eq!(doc.markup(), "<div><b>abc!</b></div>");

        run(&mut doc, RichTextCommand::Undo);
        assert_eq!(doc.markup(), "<div><b>abc</b></div>");
        run(&mut doc, RichTextCommand::Undo);
        assert_eq!(doc.markup(), "<div>abc</div>");
        assert!(!doc.can_undo());
        assert!(!doc.execute(&RichTextCommand::Undo));

        run(&mut doc, RichTextCommand::Redo);
        assert_eq!(doc.markup(), "<div><b>abc</b></div>");

        doc.type_text("x");
        assert!(!doc.can_redo());
    }

    #[test]
    fn history_keeps_only_the_newest_steps() {
        let mut doc = HeadlessDocument::new();
        for _ in 0..HISTORY_LIMIT + 5 {
            doc.type_text("a");
        }
        for _ in 0..HISTORY_LIMIT {
            run(&mut doc, RichTextCommand::Undo);
        }
        assert!(!doc.can_undo());
        assert_eq!(doc.plain_text(), "aaaaa");
    }

    #[test]
    fn typing_newlines_splits_blocks_and_deleting_joins_them() {
        let mut doc = HeadlessDocument::new();
        doc.type_text("ab\ncd");
        assert_eq!(doc.plain_text(), "ab\ncd");
        assert_eq!(doc.len(), 5);

        doc.select(1, 4);
        doc.type_text("-");
        assert_eq!(doc.plain_text(), "a-d");
    }

    #[test]
    fn reads_browser_style_markup() {
        let html = "first<div><br></div><ol><li>a</li>\n<li align=\"right\">b</li></ol>\
                    <p><strong>x</strong><span style=\"font-weight: 700; color: red\">y</span></p>";
        let doc = HeadlessDocument::from_markup(html);
        assert_eq!(doc.plain_text(), "first\n\na\nb\nxy");
        assert_eq!(
            doc.markup(),
            "<div>first</div><div><br></div><ol><li>a</li><li style=\"text-align: right;\">b</li></ol>\
             <div><b>x</b><font color=\"red\"><b>y</b></font></div>"
        );
    }

    #[test]
    fn own_markup_reads_back_unchanged() {
        let mut doc = HeadlessDocument::from_markup("alpha\nbeta");
        doc.select(0, 5);
        run(&mut doc, RichTextCommand::Toggle(InlineFormat::Bold));
        run(&mut doc, RichTextCommand::HighlightColor("#ffff00".to_string()));
        doc.select(6, 6);
        run(&mut doc, RichTextCommand::List(ListKind::Ordered));
        run(&mut doc, RichTextCommand::InsertImage("/i.png".to_string()));

        let markup = doc.markup();
        assert_eq!(HeadlessDocument::from_markup(&markup).markup(), markup);
    }

    #[test]
    fn bold_typing_then_blur_reaches_the_draft() {
        let mut sync = SurfaceSync::default();
        let mut surface = HeadlessDocument::new();
        let mut content = String::from("<div>Hello</div>");
        assert!(sync.seed(&mut surface, 1, &content));

        surface.set_caret(surface.len());
        assert!(sync.dispatch(&mut surface, &RichTextCommand::Toggle(InlineFormat::Bold)));
        assert!(surface.is_focused());
        surface.type_text(" world");
        surface.blur();

        assert!(sync.mirror(&surface, &mut content));
        assert_eq!(content, "<div>Hello<b> world</b></div>");
        assert!(!sync.mirror(&surface, &mut content));
    }

    #[test]
    fn save_sends_the_mirrored_markup() {
        let mut draft = EditorDraft::default();
        draft.finish_load(Ok(DocumentBody {
            title: Some("Notes".to_string()),
            content: Some("<div>Hello</div>".to_string()),
        }));

        let mut sync = SurfaceSync::default();
        let mut surface = HeadlessDocument::new();
        assert!(sync.seed(&mut surface, draft.loaded_revision, &draft.content));
        surface.set_caret(surface.len());
        assert!(sync.dispatch(&mut surface, &RichTextCommand::Toggle(InlineFormat::Italic)));
        surface.type_text("!");
        assert!(sync.mirror(&surface, &mut draft.content));

        let req = draft.begin_save().expect("request");
        assert_eq!(req.content, surface.markup());
        assert_eq!(req.content, "<div>Hello<i>!</i></div>");
        assert_eq!(req.title, "Notes");
    }

    #[test]
    fn seeding_happens_once() {
        let mut sync = SurfaceSync::default();
        let mut surface = HeadlessDocument::new();
        assert!(sync.seed(&mut surface, 1, "server v1"));
        surface.type_text(" local edit");
        assert!(!sync.seed(&mut surface, 2, "server v2"));
        assert_eq!(surface.plain_text(), "server v1 local edit");
    }
}
