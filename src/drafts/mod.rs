mod document;

pub(crate) use document::{EditorDraft, SaveTarget};
