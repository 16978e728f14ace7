use crate::api::{ApiClient, ApiResult, EnvConfig};
use crate::storage;
use leptos::prelude::*;

/// What a protected view should do when it is activated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Activation {
    /// No credential: go to the login page and issue no API call.
    RedirectToLogin,
    Proceed,
}

impl Activation {
    pub fn for_client(client: &ApiClient) -> Self {
        if client.is_authenticated() {
            Self::Proceed
        } else {
            Self::RedirectToLogin
        }
    }
}

/// Returns true when the result means the server no longer accepts the token.
pub(crate) fn is_unauthorized<T>(result: &ApiResult<T>) -> bool {
    matches!(result, Err(e) if e.is_unauthorized())
}

/// The one holder of the bearer credential.
///
/// Provided at the app root. `begin` is the login step and `end` the
/// logout / expired-session step; views read the client from here and
/// never touch localStorage directly.
#[derive(Clone, Copy)]
pub(crate) struct SessionContext {
    api_client: RwSignal<ApiClient>,
    username: RwSignal<Option<String>>,
}

impl SessionContext {
    pub fn restore() -> Self {
        let client =
            ApiClient::new(EnvConfig::new().api_url).with_token(storage::load_token());
        let username = if client.is_authenticated() {
            storage::load_username()
        } else {
            None
        };

        Self {
            api_client: RwSignal::new(client),
            username: RwSignal::new(username),
        }
    }

    /// Tracked: flips protected views to the login redirect when the session ends.
    pub fn activation(&self) -> Activation {
        self.api_client.with(Activation::for_client)
    }

    pub fn client(&self) -> ApiClient {
        self.api_client.get_untracked()
    }

    pub fn username(&self) -> Option<String> {
        self.username.get()
    }

    pub fn begin(&self, token: String, username: String) {
        tracing::info!(%username, "session started");
        storage::save_token(&token);
        storage::save_username(&username);
        self.api_client.update(|c| c.token = Some(token));
        self.username.set(Some(username));
    }

    pub fn end(&self) {
        tracing::info!("session ended");
        storage::clear_session();
        let _ = self.api_client.try_update(|c| c.token = None);
        let _ = self.username.try_set(None);
    }

    /// Ends the session when `result` is a 401. Callers must stop handling
    /// the response when this returns true.
    pub fn end_if_unauthorized<T>(&self, result: &ApiResult<T>) -> bool {
        if is_unauthorized(result) {
            self.end();
            true
        } else {
            false
        }
    }
}
