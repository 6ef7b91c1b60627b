use leptos::logging::warn;
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Home,
    Login,
    Channels,
}

impl Page {
    pub fn path(self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::Login => "/login",
            Page::Channels => "/channels",
        }
    }

    /// Unknown paths fall back to the auth check on `/`.
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/login" => Page::Login,
            "/channels" => Page::Channels,
            _ => Page::Home,
        }
    }

    pub fn title(self) -> Option<&'static str> {
        match self {
            Page::Home => None,
            Page::Login => Some("Login - LiveTV!"),
            Page::Channels => Some("Channel List - LiveTV!"),
        }
    }
}

pub fn current_page() -> Page {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .map(|p| Page::from_path(&p))
        .unwrap_or(Page::Home)
}

/// Writes the page to the address bar. `replace` keeps the back button
/// from returning to pages that only redirect.
pub fn push_history(page: Page, replace: bool) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let state = serde_wasm_bindgen::to_value(&page).unwrap_or(JsValue::NULL);
    let res = if replace {
        history.replace_state_with_url(&state, "", Some(page.path()))
    } else {
        history.push_state_with_url(&state, "", Some(page.path()))
    };
    if let Err(e) = res {
        warn!("history update to {} failed: {:?}", page.path(), e);
    }
}

/// Page stored by [`push_history`], or the one the address bar names.
pub fn page_from_state(state: JsValue) -> Page {
    serde_wasm_bindgen::from_value::<Page>(state).unwrap_or_else(|_| current_page())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(Page::from_path("/login"), Page::Login);
        assert_eq!(Page::from_path("/channels/"), Page::Channels);
        assert_eq!(Page::from_path("/"), Page::Home);
        assert_eq!(Page::from_path("/nope"), Page::Home);
    }

    #[test]
    fn test_login_page_is_at_login_path() {
        assert_eq!(Page::Login.path(), "/login");
        assert_eq!(Page::Login.title(), Some("Login - LiveTV!"));
    }

    #[test]
    fn test_paths_round_trip() {
        for page in [Page::Home, Page::Login, Page::Channels] {
            assert_eq!(Page::from_path(page.path()), page);
        }
    }
}
