pub(crate) const TOKEN_KEY: &str = "token";
pub(crate) const USER_KEY: &str = "shared_doc_user";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

pub(crate) fn load_token() -> Option<String> {
    local_storage()
        .and_then(|s| s.get_item(TOKEN_KEY).ok().flatten())
        .filter(|t| !t.trim().is_empty())
}

pub(crate) fn save_token(token: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(TOKEN_KEY, token);
    }
}

pub(crate) fn save_username(username: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(USER_KEY, username);
    }
}

pub(crate) fn load_username() -> Option<String> {
    local_storage().and_then(|s| s.get_item(USER_KEY).ok().flatten())
}

pub(crate) fn clear_session() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(TOKEN_KEY);
        let _ = storage.remove_item(USER_KEY);
    }
}

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn token_roundtrip_and_clear() {
        clear_session();
        assert!(load_token().is_none());

        save_token("t1");
        save_username("alice");
        assert_eq!(load_token().as_deref(), Some("t1"));
        assert_eq!(load_username().as_deref(), Some("alice"));

        clear_session();
        assert!(load_token().is_none());
        assert!(load_username().is_none());
    }

    #[wasm_bindgen_test]
    fn blank_token_counts_as_absent() {
        save_token("   ");
        assert!(load_token().is_none());
        clear_session();
    }
}
