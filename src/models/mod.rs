use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub(crate) const UNTITLED_DOCUMENT: &str = "Untitled Document";

/// Server-assigned document identifier.
///
/// The backend currently hands out integers, but the front-end never does
/// arithmetic on ids, so they are kept as opaque strings.
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub(crate) struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Str(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(n) => Self(n.to_string()),
            Raw::Str(s) => Self(s),
        })
    }
}

/// A row of `GET /documents`, also returned by `POST /documents`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct Document {
    pub id: DocumentId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Document {
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(UNTITLED_DOCUMENT)
    }
}

/// Body of `GET /documents/{id}` and `GET /document`.
///
/// Both fields may be null or absent; callers apply the editor defaults.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub(crate) struct DocumentBody {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct UserOut {
    pub id: DocumentId,
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_id_accepts_numbers_and_strings() {
        let a: DocumentId = serde_json::from_str("42").expect("int id");
        let b: DocumentId = serde_json::from_str("\"abc-1\"").expect("string id");
        assert_eq!(a.as_str(), "42");
        assert_eq!(b.as_str(), "abc-1");
    }

    #[test]
    fn document_list_row_tolerates_missing_fields() {
        let json = r#"[
            {"id": 1, "title": "Report", "created_at": "2024-05-01T10:00:00", "updated_at": "2024-05-02T08:30:00"},
            {"id": 2, "title": null}
        ]"#;
        let docs: Vec<Document> = serde_json::from_str(json).expect("list should parse");
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].display_title(), "Report");
        assert_eq!(docs[1].display_title(), UNTITLED_DOCUMENT);
        assert!(docs[1].created_at.is_none());
    }

    #[test]
    fn document_body_null_fields_parse_as_none() {
        let body: DocumentBody =
            serde_json::from_str(r#"{"title": null, "content": ""}"#).expect("body");
        assert!(body.title.is_none());
        assert_eq!(body.content.as_deref(), Some(""));
    }

    #[test]
    fn token_response_contract_deserialize() {
        let parsed: TokenResponse =
            serde_json::from_str(r#"{"access_token": "jwt", "token_type": "bearer"}"#)
                .expect("token response should parse");
        assert_eq!(parsed.access_token, "jwt");
        assert_eq!(parsed.token_type.as_deref(), Some("bearer"));
    }
}
