//! Named rich-text operations.
//!
//! A `RichTextCommand` says *what* to do to the current selection. Each
//! editing backend decides how; the browser backend maps commands onto the
//! native command names returned by [`RichTextCommand::native`].

use strum::EnumIter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
pub(crate) enum InlineFormat {
    Bold,
    Italic,
    Underline,
    Strikethrough,
}

impl InlineFormat {
    pub fn label(self) -> &'static str {
        match self {
            Self::Bold => "B",
            Self::Italic => "I",
            Self::Underline => "U",
            Self::Strikethrough => "S",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter)]
pub(crate) enum Align {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl Align {
    pub fn css(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Justify => "justify",
        }
    }

    pub fn from_css(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "left" | "start" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" | "end" => Some(Self::Right),
            "justify" => Some(Self::Justify),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
pub(crate) enum ListKind {
    Ordered,
    Unordered,
}

impl ListKind {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Ordered => "ol",
            Self::Unordered => "ul",
        }
    }
}

/// HTML font size step, 1 through 7 (3 is the browser default).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct FontSize(u8);

impl FontSize {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 7;
    pub const DEFAULT: FontSize = FontSize(3);

    pub fn new(step: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&step).then_some(Self(step))
    }

    pub fn step(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = FontSize> {
        (Self::MIN..=Self::MAX).map(FontSize)
    }

    /// Rough point size a browser renders for this step.
    pub fn label(self) -> &'static str {
        match self.0 {
            1 => "8pt",
            2 => "10pt",
            3 => "12pt",
            4 => "14pt",
            5 => "18pt",
            6 => "24pt",
            _ => "36pt",
        }
    }
}

impl Default for FontSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum RichTextCommand {
    Toggle(InlineFormat),
    Align(Align),
    List(ListKind),
    ClearFormatting,
    Undo,
    Redo,
    FontFamily(String),
    FontSize(FontSize),
    TextColor(String),
    HighlightColor(String),
    InsertLink(String),
    InsertImage(String),
}

impl RichTextCommand {
    /// Native command name and value (`document.execCommand` vocabulary).
    pub fn native(&self) -> (&'static str, Option<String>) {
        match self {
            Self::Toggle(InlineFormat::Bold) => ("bold", None),
            Self::Toggle(InlineFormat::Italic) => ("italic", None),
            Self::Toggle(InlineFormat::Underline) => ("underline", None),
            Self::Toggle(InlineFormat::Strikethrough) => ("strikeThrough", None),
            Self::Align(Align::Left) => ("justifyLeft", None),
            Self::Align(Align::Center) => ("justifyCenter", None),
            Self::Align(Align::Right) => ("justifyRight", None),
            Self::Align(Align::Justify) => ("justifyFull", None),
            Self::List(ListKind::Ordered) => ("insertOrderedList", None),
            Self::List(ListKind::Unordered) => ("insertUnorderedList", None),
            Self::ClearFormatting => ("removeFormat", None),
            Self::Undo => ("undo", None),
            Self::Redo => ("redo", None),
            Self::FontFamily(family) => ("fontName", Some(family.clone())),
            Self::FontSize(size) => ("fontSize", Some(size.step().to_string())),
            Self::TextColor(color) => ("foreColor", Some(color.clone())),
            Self::HighlightColor(color) => ("hiliteColor", Some(color.clone())),
            Self::InsertLink(url) => ("createLink", Some(url.clone())),
            Self::InsertImage(url) => ("insertImage", Some(url.clone())),
        }
    }

    /// Commands that change document content (as opposed to history moves).
    pub fn is_edit(&self) -> bool {
        !matches!(self, Self::Undo | Self::Redo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn font_size_is_bounded() {
        assert!(FontSize::new(0).is_none());
        assert!(FontSize::new(8).is_none());
        assert_eq!(FontSize::new(5).map(FontSize::step), Some(5));
        assert_eq!(FontSize::all().count(), 7);
    }

    #[test]
    fn native_names_cover_every_toolbar_action() {
        let mut commands: Vec<RichTextCommand> = Vec::new();
        commands.extend(InlineFormat::iter().map(RichTextCommand::Toggle));
        commands.extend(Align::iter().map(RichTextCommand::Align));
        commands.extend(ListKind::iter().map(RichTextCommand::List));
        commands.extend([
            RichTextCommand::ClearFormatting,
            RichTextCommand::Undo,
            RichTextCommand::Redo,
            RichTextCommand::FontFamily("Georgia".to_string()),
            RichTextCommand::FontSize(FontSize::DEFAULT),
            RichTextCommand::TextColor("#ff0000".to_string()),
            RichTextCommand::HighlightColor("#ffff00".to_string()),
            RichTextCommand::InsertLink("https://example.com".to_string()),
            RichTextCommand::InsertImage("https://example.com/a.png".to_string()),
        ]);
        assert_eq!(commands.len(), 19);

        let names: std::collections::HashSet<&str> =
            commands.iter().map(|c| c.native().0).collect();
        assert_eq!(names.len(), commands.len());

        assert_eq!(
            RichTextCommand::FontSize(FontSize::DEFAULT).native(),
            ("fontSize", Some("3".to_string()))
        );
    }

    #[test]
    fn align_parses_css_values() {
        assert_eq!(Align::from_css(" Center "), Some(Align::Center));
        assert_eq!(Align::from_css("start"), Some(Align::Left));
        assert_eq!(Align::from_css("inherit"), None);
    }
}
