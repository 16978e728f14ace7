use crate::models::{Document, DocumentBody, DocumentId, TokenResponse, UserOut};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Unauthorized,
    Network,
    Http,
    Parse,
}

#[derive(Clone, Debug, thiserror::Error)]
#[error("{message}")]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: e.to_string(),
        }
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: e.to_string(),
        }
    }

    pub(crate) fn unauthorized() -> Self {
        Self {
            kind: ApiErrorKind::Unauthorized,
            message: "Unauthorized".to_string(),
        }
    }

    /// FastAPI-style `{"detail": "..."}` bodies are shown by their detail only.
    pub(crate) fn http(status: StatusCode, body: String, ctx: &str) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("detail")?.as_str().map(str::to_string));
        let message = match detail {
            Some(detail) => format!("{ctx}: {detail}"),
            None => format!("{ctx} ({status}): {body}"),
        };
        Self {
            kind: ApiErrorKind::Http,
            message,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ApiErrorKind::Unauthorized
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
}

impl EnvConfig {
    pub fn new() -> Self {
        // `window.ENV.API_URL` wins over the lowercase spelling.
        if let Some(window) = web_sys::window() {
            if let Some(env) = window.get("ENV") {
                if !env.is_undefined() && env.is_object() {
                    for key in ["API_URL", "api_url"] {
                        if let Ok(api_url) = js_sys::Reflect::get(&env, &key.into()) {
                            if let Some(url_str) = api_url.as_string() {
                                return Self::with_api_url(&url_str);
                            }
                        }
                    }
                }
            }
        }

        Self::with_api_url(DEFAULT_API_URL)
    }

    pub fn with_api_url(api_url: &str) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize, Clone, Debug)]
pub(crate) struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct CreateDocumentRequest {
    pub title: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct UpdateDocumentRequest {
    pub title: String,
    pub content: String,
}

/// Body of `POST /document`; the title is optional on this endpoint.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct SaveUserDocumentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
}

impl From<UpdateDocumentRequest> for SaveUserDocumentRequest {
    fn from(req: UpdateDocumentRequest) -> Self {
        Self {
            title: Some(req.title),
            content: req.content,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
    pub(crate) token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            token: None,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub(crate) fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn document_path(id: &DocumentId) -> String {
        format!("/documents/{}", urlencoding::encode(id.as_str()))
    }

    fn build(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let client = reqwest::Client::new();
        let mut req = client.request(method, self.url(path));
        if let Some(header) = self.auth_header() {
            req = req.header("Authorization", header);
        }
        req
    }

    async fn send(&self, req: reqwest::RequestBuilder, ctx: &str) -> ApiResult<reqwest::Response> {
        let res = req.send().await.map_err(|e| {
            tracing::warn!(error = %e, "{ctx}: network failure");
            ApiError::network(e)
        })?;

        let status = res.status();
        if status.is_success() {
            Ok(res)
        } else if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("{ctx}: unauthorized");
            Err(ApiError::unauthorized())
        } else {
            let body = res.text().await.unwrap_or_default();
            tracing::warn!(%status, %body, "{ctx}: request failed");
            Err(ApiError::http(status, body, ctx))
        }
    }

    async fn request_json<T: serde::de::DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&impl Serialize>,
        ctx: &str,
    ) -> ApiResult<T> {
        tracing::debug!(%method, path, "api request");
        let mut req = self.build(method, path);
        if let Some(b) = body {
            req = req.json(b);
        }
        let res = self.send(req, ctx).await?;
        res.json().await.map_err(ApiError::parse)
    }

    async fn request_empty(
        &self,
        method: Method,
        path: &str,
        body: Option<&impl Serialize>,
        ctx: &str,
    ) -> ApiResult<()> {
        tracing::debug!(%method, path, "api request");
        let mut req = self.build(method, path);
        if let Some(b) = body {
            req = req.json(b);
        }
        self.send(req, ctx).await.map(|_| ())
    }

    /// OAuth2 password flow: the backend expects a form body, not JSON.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<TokenResponse> {
        tracing::debug!(username, "api login");
        let req = self.build(Method::POST, "/login").form(&LoginForm {
            username: username.to_string(),
            password: password.to_string(),
        });
        let res = self.send(req, "Login failed").await?;
        res.json().await.map_err(ApiError::parse)
    }

    pub async fn register(&self, username: &str, password: &str) -> ApiResult<UserOut> {
        self.request_json(
            Method::POST,
            "/register",
            Some(&RegisterRequest {
                username: username.to_string(),
                password: password.to_string(),
            }),
            "Registration failed",
        )
        .await
    }

    pub async fn list_documents(&self) -> ApiResult<Vec<Document>> {
        self.request_json(
            Method::GET,
            "/documents",
            None::<&()>,
            "Failed to fetch documents",
        )
        .await
    }

    pub async fn create_document(&self, req: &CreateDocumentRequest) -> ApiResult<Document> {
        self.request_json(
            Method::POST,
            "/documents",
            Some(req),
            "Failed to create document",
        )
        .await
    }

    pub async fn get_document(&self, id: &DocumentId) -> ApiResult<DocumentBody> {
        self.request_json(
            Method::GET,
            &Self::document_path(id),
            None::<&()>,
            "Failed to fetch document",
        )
        .await
    }

    pub async fn update_document(
        &self,
        id: &DocumentId,
        req: &UpdateDocumentRequest,
    ) -> ApiResult<()> {
        self.request_empty(
            Method::PUT,
            &Self::document_path(id),
            Some(req),
            "Failed to save document",
        )
        .await
    }

    pub async fn delete_document(&self, id: &DocumentId) -> ApiResult<()> {
        self.request_empty(
            Method::DELETE,
            &Self::document_path(id),
            None::<&()>,
            "Failed to delete document",
        )
        .await
    }

    pub async fn get_user_document(&self) -> ApiResult<DocumentBody> {
        self.request_json(
            Method::GET,
            "/document",
            None::<&()>,
            "Failed to fetch document",
        )
        .await
    }

    pub async fn save_user_document(&self, req: &SaveUserDocumentRequest) -> ApiResult<()> {
        self.request_empty(
            Method::POST,
            "/document",
            Some(req),
            "Failed to save document",
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new("http://localhost:8000".to_string())
    }

    #[test]
    fn test_api_client_new_has_no_token() {
        let c = client();
        assert_eq!(c.base_url, "http://localhost:8000");
        assert!(!c.is_authenticated());
        assert!(c.auth_header().is_none());
    }

    #[test]
    fn test_auth_header_uses_bearer_scheme() {
        let c = client().with_token(Some("my-jwt-token".to_string()));
        assert!(c.is_authenticated());
        assert_eq!(c.auth_header().as_deref(), Some("Bearer my-jwt-token"));
    }

    #[test]
    fn test_document_path_encodes_id() {
        assert_eq!(
            ApiClient::document_path(&DocumentId::new("7")),
            "/documents/7"
        );
        assert_eq!(
            ApiClient::document_path(&DocumentId::new("a b/c")),
            "/documents/a%20b%2Fc"
        );
        assert_eq!(
            client().url("/documents"),
            "http://localhost:8000/documents"
        );
    }

    #[test]
    fn test_env_config_trims_trailing_slash() {
        assert_eq!(
            EnvConfig::with_api_url("https://docs.example.com/").api_url,
            "https://docs.example.com"
        );
    }

    #[test]
    fn test_update_request_serializes_title_and_content() {
        let v = serde_json::to_value(UpdateDocumentRequest {
            title: "Report".to_string(),
            content: "<div><b>hi</b></div>".to_string(),
        })
        .expect("should serialize");
        assert_eq!(v["title"], "Report");
        assert_eq!(v["content"], "<div><b>hi</b></div>");
    }

    #[test]
    fn test_save_user_document_omits_missing_title() {
        let v = serde_json::to_value(SaveUserDocumentRequest {
            title: None,
            content: "body".to_string(),
        })
        .expect("should serialize");
        assert!(v.get("title").is_none());
        assert_eq!(v["content"], "body");

        let from_update: SaveUserDocumentRequest = UpdateDocumentRequest {
            title: "T".to_string(),
            content: "c".to_string(),
        }
        .into();
        assert_eq!(from_update.title.as_deref(), Some("T"));
    }

    #[test]
    fn test_api_error_display_and_kind() {
        let e = ApiError::http(StatusCode::INTERNAL_SERVER_ERROR, "boom".to_string(), "Failed");
        assert_eq!(e.kind, ApiErrorKind::Http);
        assert_eq!(e.to_string(), "Failed (500 Internal Server Error): boom");
        assert!(!e.is_unauthorized());
        assert!(ApiError::unauthorized().is_unauthorized());
    }

    #[test]
    fn test_api_error_prefers_detail_field() {
        let e = ApiError::http(
            StatusCode::BAD_REQUEST,
            r#"{"detail":"Incorrect username or password"}"#.to_string(),
            "Login failed",
        );
        assert_eq!(e.to_string(), "Login failed: Incorrect username or password");
    }
}
