use crate::api::{ApiResult, UpdateDocumentRequest};
use crate::models::{DocumentBody, UNTITLED_DOCUMENT};
use crate::notice::Notice;

/// Which control triggered a save. The request is identical either way
/// because the backend update is not field-granular.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SaveTarget {
    Body,
    Title,
}

/// In-memory title/content an editor view works on until it is saved.
///
/// Nothing here is compared against the server: the last successful save wins.
#[derive(Clone, Debug)]
pub(crate) struct EditorDraft {
    pub title: String,
    pub content: String,
    pub loading: bool,
    pub saving: bool,
    pub editing_title: bool,
    /// Bumped on every successful load so surfaces know when to reseed.
    pub loaded_revision: u64,

    title_before_edit: Option<String>,
    /// Title carried by the save in flight.
    sent_title: Option<String>,
}

impl Default for EditorDraft {
    fn default() -> Self {
        Self {
            title: UNTITLED_DOCUMENT.to_string(),
            content: String::new(),
            loading: true,
            saving: false,
            editing_title: false,
            loaded_revision: 0,
            title_before_edit: None,
            sent_title: None,
        }
    }
}

impl EditorDraft {
    pub fn finish_load(&mut self, result: ApiResult<DocumentBody>) -> Option<Notice> {
        self.loading = false;
        match result {
            Ok(body) => {
                self.title = body
                    .title
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| UNTITLED_DOCUMENT.to_string());
                self.content = body.content.unwrap_or_default();
                self.loaded_revision += 1;
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load document");
                Some(Notice::error("Failed to load document"))
            }
        }
    }

    pub fn begin_title_edit(&mut self) {
        if !self.editing_title {
            self.title_before_edit = Some(self.title.clone());
            self.editing_title = true;
        }
    }

    pub fn cancel_title_edit(&mut self) {
        if let Some(previous) = self.title_before_edit.take() {
            self.title = previous;
        }
        self.editing_title = false;
    }

    /// `None` while a save is already in flight.
    pub fn begin_save(&mut self) -> Option<UpdateDocumentRequest> {
        if self.saving || self.loading {
            return None;
        }
        self.saving = true;
        self.sent_title = Some(self.title.clone());
        Some(UpdateDocumentRequest {
            title: self.title.clone(),
            content: self.content.clone(),
        })
    }

    pub fn finish_save(&mut self, target: SaveTarget, result: ApiResult<()>) -> Option<Notice> {
        self.saving = false;
        let sent_title = self.sent_title.take();
        match (target, result) {
            (SaveTarget::Body, Ok(())) => {
                // Cancelling a title edit must not roll back past what the server holds.
                if self.editing_title {
                    self.title_before_edit = sent_title;
                }
                Some(Notice::success("Document saved!"))
            }
            (SaveTarget::Title, Ok(())) => {
                self.title_before_edit = None;
                self.editing_title = false;
                None
            }
            (SaveTarget::Body, Err(e)) => {
                tracing::warn!(error = %e, "failed to save document");
                Some(Notice::error("Failed to save document."))
            }
            (SaveTarget::Title, Err(e)) => {
                tracing::warn!(error = %e, "failed to save title");
                Some(Notice::error("Failed to save title."))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use reqwest::StatusCode;

    fn loaded(title: Option<&str>, content: Option<&str>) -> EditorDraft {
        let mut d = EditorDraft::default();
        d.finish_load(Ok(DocumentBody {
            title: title.map(str::to_string),
            content: content.map(str::to_string),
        }));
        d
    }

    fn bad_request() -> ApiError {
        ApiError::http(StatusCode::BAD_REQUEST, String::new(), "Failed")
    }

    #[test]
    fn null_title_and_empty_content_use_defaults() {
        let d = loaded(None, Some(""));
        assert_eq!(d.title, "Untitled Document");
        assert_eq!(d.content, "");
        assert!(!d.loading);
        assert_eq!(d.loaded_revision, 1);
    }

    #[test]
    fn failed_load_keeps_initial_defaults() {
        let mut d = EditorDraft::default();
        let notice = d.finish_load(Err(bad_request())).expect("notice");
        assert!(notice.is_error());
        assert_eq!(d.title, UNTITLED_DOCUMENT);
        assert_eq!(d.content, "");
        assert_eq!(d.loaded_revision, 0);
    }

    #[test]
    fn save_sends_full_draft_and_blocks_duplicates() {
        let mut d = loaded(Some("Plan"), Some("body"));
        d.content.push_str(" more");
        let req = d.begin_save().expect("request");
        assert_eq!(req.title, "Plan");
        assert_eq!(req.content, "body more");
        assert!(d.begin_save().is_none());

        let notice = d.finish_save(SaveTarget::Body, Ok(())).expect("notice");
        assert!(!notice.is_error());
        assert!(!d.saving);
    }

    #[test]
    fn failed_save_preserves_draft_and_raises_one_notice() {
        let mut d = loaded(Some("Plan"), Some("body"));
        d.content = "edited".to_string();
        d.begin_save().expect("request");
        let notice = d.finish_save(SaveTarget::Body, Err(bad_request()));
        assert!(notice.expect("exactly one notice").is_error());
        assert_eq!(d.title, "Plan");
        assert_eq!(d.content, "edited");
        assert!(d.begin_save().is_some());
    }

    #[test]
    fn title_save_leaves_edit_mode_only_on_success() {
        let mut d = loaded(Some("Plan"), Some(""));
        d.begin_title_edit();
        d.title = "Plan v2".to_string();

        d.begin_save().expect("request");
        assert!(d.finish_save(SaveTarget::Title, Err(bad_request())).is_some());
        assert!(d.editing_title);
        assert_eq!(d.title, "Plan v2");

        d.begin_save().expect("request");
        assert!(d.finish_save(SaveTarget::Title, Ok(())).is_none());
        assert!(!d.editing_title);
    }

    #[test]
    fn cancel_after_body_save_keeps_the_saved_title() {
        let mut d = loaded(Some("Old"), Some("body"));
        d.begin_title_edit();
        d.title = "New".to_string();

        let req = d.begin_save().expect("request");
        assert_eq!(req.title, "New");
        d.title = "Newer".to_string();
        assert!(d.finish_save(SaveTarget::Body, Ok(())).is_some());
        assert!(d.editing_title);

        d.cancel_title_edit();
        assert_eq!(d.title, "New");
        assert_eq!(d.begin_save().expect("request").title, "New");
    }

    #[test]
    fn failed_body_save_still_cancels_to_the_loaded_title() {
        let mut d = loaded(Some("Old"), Some(""));
        d.begin_title_edit();
        d.title = "New".to_string();
        d.begin_save().expect("request");
        d.finish_save(SaveTarget::Body, Err(bad_request()));

        d.cancel_title_edit();
        assert_eq!(d.title, "Old");
    }

    #[test]
    fn cancel_restores_title_seen_before_editing() {
        let mut d = loaded(Some("Plan"), Some(""));
        d.begin_title_edit();
        d.title = "Scratch".to_string();
        d.cancel_title_edit();
        assert_eq!(d.title, "Plan");
        assert!(!d.editing_title);
    }

    #[test]
    fn nothing_is_saved_before_load_finishes() {
        let mut d = EditorDraft::default();
        assert!(d.begin_save().is_none());
    }
}
