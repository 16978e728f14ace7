use crate::api::{ApiResult, CreateDocumentRequest};
use crate::models::{Document, DocumentId};
use crate::notice::Notice;

/// State of the document list page.
///
/// Each `begin_*` returns what to send (or `None` when nothing may be sent);
/// the matching `finish_*` applies the response. 401s are intercepted by the
/// session before a `finish_*` is reached.
#[derive(Clone, Debug, Default)]
pub(crate) struct DocumentList {
    pub documents: Vec<Document>,
    /// True until the first list call completes.
    pub loading: bool,
    pub refreshing: bool,

    pub show_create_form: bool,
    pub new_title: String,
    pub creating: bool,

    pub pending_delete: Option<DocumentId>,
    pub deleting: bool,
}

impl DocumentList {
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Default::default()
        }
    }

    pub fn begin_load(&mut self) {
        self.refreshing = true;
    }

    pub fn finish_load(&mut self, result: ApiResult<Vec<Document>>) -> Option<Notice> {
        self.loading = false;
        self.refreshing = false;
        match result {
            Ok(documents) => {
                self.documents = documents;
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load documents");
                self.documents.clear();
                Some(Notice::error(
                    "Failed to load documents. Please try refreshing the page.",
                ))
            }
        }
    }

    pub fn toggle_create_form(&mut self) {
        self.show_create_form = !self.show_create_form;
    }

    pub fn can_create(&self) -> bool {
        !self.creating && !self.new_title.trim().is_empty()
    }

    pub fn begin_create(&mut self) -> Option<CreateDocumentRequest> {
        if !self.can_create() {
            return None;
        }
        self.creating = true;
        Some(CreateDocumentRequest {
            title: self.new_title.trim().to_string(),
        })
    }

    pub fn finish_create(&mut self, result: ApiResult<Document>) -> Option<Notice> {
        self.creating = false;
        match result {
            Ok(doc) => {
                self.documents.insert(0, doc);
                self.new_title.clear();
                self.show_create_form = false;
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to create document");
                Some(Notice::error("Failed to create document"))
            }
        }
    }

    pub fn request_delete(&mut self, id: DocumentId) {
        if !self.deleting {
            self.pending_delete = Some(id);
        }
    }

    pub fn cancel_delete(&mut self) {
        if !self.deleting {
            self.pending_delete = None;
        }
    }

    pub fn pending_delete_title(&self) -> Option<String> {
        let id = self.pending_delete.as_ref()?;
        self.documents
            .iter()
            .find(|d| &d.id == id)
            .map(|d| d.display_title().to_string())
    }

    pub fn confirm_delete(&mut self) -> Option<DocumentId> {
        if self.deleting {
            return None;
        }
        let id = self.pending_delete.clone()?;
        self.deleting = true;
        Some(id)
    }

    pub fn finish_delete(&mut self, id: &DocumentId, result: ApiResult<()>) -> Option<Notice> {
        self.deleting = false;
        self.pending_delete = None;
        match result {
            Ok(()) => {
                self.documents.retain(|d| &d.id != id);
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, %id, "failed to delete document");
                Some(Notice::error("Failed to delete document"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use reqwest::StatusCode;

    fn doc(id: &str, title: &str) -> Document {
        Document {
            id: DocumentId::new(id),
            title: Some(title.to_string()),
            created_at: None,
            updated_at: None,
        }
    }

    fn server_error() -> ApiError {
        ApiError::http(StatusCode::INTERNAL_SERVER_ERROR, String::new(), "Failed")
    }

    fn ids(list: &DocumentList) -> Vec<&str> {
        list.documents.iter().map(|d| d.id.as_str()).collect()
    }

    #[test]
    fn load_keeps_server_order() {
        let mut list = DocumentList::new();
        list.begin_load();
        let notice = list.finish_load(Ok(vec![doc("3", "c"), doc("1", "a"), doc("2", "b")]));
        assert!(notice.is_none());
        assert!(!list.loading);
        assert_eq!(ids(&list), vec!["3", "1", "2"]);
    }

    #[test]
    fn failed_load_empties_list_with_one_notice() {
        let mut list = DocumentList::new();
        list.finish_load(Ok(vec![doc("1", "a")]));
        let notice = list.finish_load(Err(server_error())).expect("notice");
        assert!(notice.is_error());
        assert!(list.documents.is_empty());
    }

    #[test]
    fn create_prepends_and_clears_input() {
        let mut list = DocumentList::new();
        list.finish_load(Ok(vec![doc("1", "Old")]));
        list.show_create_form = true;
        list.new_title = "  Report ".to_string();

        let req = list.begin_create().expect("request");
        assert_eq!(req.title, "Report");
        assert!(list.creating);
        // A second click while the call is in flight sends nothing.
        assert!(list.begin_create().is_none());

        assert!(list.finish_create(Ok(doc("2", "Report"))).is_none());
        assert_eq!(ids(&list), vec!["2", "1"]);
        assert_eq!(list.documents[0].display_title(), "Report");
        assert!(list.new_title.is_empty());
        assert!(!list.show_create_form);
        assert!(!list.creating);
    }

    #[test]
    fn blank_titles_issue_no_request() {
        let mut list = DocumentList::new();
        for title in ["", "   ", "\t\n"] {
            list.new_title = title.to_string();
            assert!(list.begin_create().is_none());
            assert!(!list.creating);
        }
    }

    #[test]
    fn failed_create_keeps_input_for_retry() {
        let mut list = DocumentList::new();
        list.new_title = "Draft".to_string();
        list.begin_create().expect("request");
        let notice = list.finish_create(Err(server_error()));
        assert!(notice.expect("notice").is_error());
        assert_eq!(list.new_title, "Draft");
        assert!(list.documents.is_empty());
        assert!(list.begin_create().is_some());
    }

    #[test]
    fn cancelled_delete_changes_nothing() {
        let mut list = DocumentList::new();
        list.finish_load(Ok(vec![doc("1", "a"), doc("2", "b")]));
        list.request_delete(DocumentId::new("1"));
        assert_eq!(list.pending_delete_title().as_deref(), Some("a"));
        list.cancel_delete();
        assert!(list.confirm_delete().is_none());
        assert_eq!(ids(&list), vec!["1", "2"]);
    }

    #[test]
    fn confirmed_delete_removes_exactly_that_id() {
        let mut list = DocumentList::new();
        list.finish_load(Ok(vec![doc("1", "a"), doc("2", "b"), doc("3", "c")]));
        list.request_delete(DocumentId::new("2"));
        let id = list.confirm_delete().expect("id to delete");
        assert!(list.deleting);
        assert!(list.finish_delete(&id, Ok(())).is_none());
        assert_eq!(ids(&list), vec!["1", "3"]);
        assert!(list.pending_delete.is_none());
    }

    #[test]
    fn failed_delete_is_not_optimistic() {
        let mut list = DocumentList::new();
        list.finish_load(Ok(vec![doc("1", "a")]));
        list.request_delete(DocumentId::new("1"));
        let id = list.confirm_delete().expect("id");
        let notice = list.finish_delete(&id, Err(server_error()));
        assert!(notice.expect("notice").is_error());
        assert_eq!(ids(&list), vec!["1"]);
    }
}
