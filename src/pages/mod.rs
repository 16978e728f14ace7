mod auth;
mod documents;
mod editor;
mod shared;

pub use auth::{LoginPage, RegisterPage, RequireSession};
pub use documents::DocumentsPage;
pub use editor::{DocumentEditorPage, PlainEditorPage, UserDocumentPage};
