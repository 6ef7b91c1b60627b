//! Editable state behind the dialogs, with the client-side checks that run
//! before anything is sent.

use indexmap::IndexMap;
use crate::config::DEFAULT_PARSER;
use crate::types::{Channel, ChannelRequest, ProxyMode, ServerConfig};

/// Inline validation messages keyed by field name, in form order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldErrors(IndexMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require(&mut self, field: &'static str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.0.insert(field, message.to_string());
        }
    }

    pub fn get(&self, field: &str) -> Option<String> {
        self.0.get(field).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DialogMode {
    #[default]
    Add,
    Edit,
    View,
}

impl DialogMode {
    pub fn title(self) -> &'static str {
        match self {
            DialogMode::Add => "New Channel",
            DialogMode::Edit => "Edit Channel",
            DialogMode::View => "View Channel",
        }
    }

    pub fn read_only(self) -> bool {
        self == DialogMode::View
    }
}

/// Fields of the channel dialog.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChannelForm {
    pub id: String,
    pub name: String,
    pub url: String,
    pub parser: String,
    pub category: String,
    /// "0" / "1" / "2", see [`ProxyMode::selector_value`]
    pub proxy_selector: String,
    pub ts_proxy: String,
    pub use_proxy: bool,
    pub proxy_url: String,
}

impl ChannelForm {
    pub fn empty() -> Self {
        Self {
            parser: DEFAULT_PARSER.to_string(),
            proxy_selector: ProxyMode::NoProxy.selector_value().to_string(),
            ..Default::default()
        }
    }

    pub fn from_channel(ch: &Channel) -> Self {
        let mode = ch.proxy_mode();
        let ts_proxy = match &mode {
            ProxyMode::Custom(url) => url.clone(),
            _ => String::new(),
        };
        Self {
            id: ch.id.clone(),
            name: ch.name.clone(),
            url: ch.url.clone(),
            parser: if ch.parser.trim().is_empty() { DEFAULT_PARSER.to_string() } else { ch.parser.clone() },
            category: ch.category.clone(),
            proxy_selector: mode.selector_value().to_string(),
            ts_proxy,
            use_proxy: !ch.proxy_url.trim().is_empty(),
            proxy_url: ch.proxy_url.clone(),
        }
    }

    /// Form state for a freshly opened dialog.
    pub fn open(mode: DialogMode, channel: Option<&Channel>) -> Self {
        match (mode, channel) {
            (DialogMode::Add, _) | (_, None) => Self::empty(),
            (_, Some(ch)) => Self::from_channel(ch),
        }
    }

    pub fn proxy_mode(&self) -> ProxyMode {
        ProxyMode::from_selector(&self.proxy_selector, &self.ts_proxy)
    }

    pub fn shows_custom_proxy(&self) -> bool {
        matches!(self.proxy_mode(), ProxyMode::Custom(_))
    }

    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require("name", &self.name, "Please input the channel name");
        errors.require("url", &self.url, "Please input the live URL");
        if self.shows_custom_proxy() {
            errors.require("tsproxy", &self.ts_proxy, "Please input the stream proxy URL");
        }
        if self.use_proxy {
            errors.require("proxyurl", &self.proxy_url, "Please input the proxy");
        }
        errors
    }

    /// Collapses the dialog's proxy controls into the backend fields. The
    /// upstream proxy is dropped unless "use proxy" is checked.
    pub fn to_request(&self) -> ChannelRequest {
        let (proxy, ts_proxy) = self.proxy_mode().to_wire();
        let id = self.id.trim();
        ChannelRequest {
            id: (!id.is_empty()).then(|| id.to_string()),
            url: self.url.trim().to_string(),
            name: self.name.trim().to_string(),
            proxy,
            parser: self.parser.clone(),
            proxy_url: if self.use_proxy { self.proxy_url.trim().to_string() } else { String::new() },
            ts_proxy,
            category: self.category.trim().to_string(),
        }
    }
}

/// Config tab state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConfigForm(pub ServerConfig);

impl ConfigForm {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require("cmd", &self.0.cmd, "Please input the command");
        errors.require("args", &self.0.args, "Please input the arguments");
        errors.require("baseurl", &self.0.baseurl, "Please input the base URL");
        errors
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PasswordForm {
    pub password: String,
    pub password2: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PasswordCheck {
    Invalid(FieldErrors),
    Mismatch,
    Ready,
}

impl PasswordForm {
    pub fn check(&self) -> PasswordCheck {
        let mut errors = FieldErrors::new();
        errors.require("password", &self.password, "Input your password");
        errors.require("password2", &self.password2, "Repeat your password");
        if !errors.is_empty() {
            PasswordCheck::Invalid(errors)
        } else if self.password != self.password2 {
            PasswordCheck::Mismatch
        } else {
            PasswordCheck::Ready
        }
    }
}

pub fn delete_prompt(ch: &Channel) -> String {
    format!("Do you want to delete the channel \"{}\" permanently?", ch.name)
}

/// Id to delete, or `None` when the user backs out of the prompt.
pub fn confirm_delete(ch: &Channel, confirm: impl FnOnce(&str) -> bool) -> Option<String> {
    confirm(&delete_prompt(ch)).then(|| ch.id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_form_has_no_proxy() {
        let form = ChannelForm::empty();
        assert_eq!(form.proxy_selector, "0");
        assert_eq!(form.parser, "http");
        assert!(!form.use_proxy);
        assert!(!form.shows_custom_proxy());
    }

    #[test]
    fn test_open_add_ignores_selected_record() {
        let ch = Channel { id: "3".into(), name: "old".into(), ..Default::default() };
        assert_eq!(ChannelForm::open(DialogMode::Add, Some(&ch)), ChannelForm::empty());
        assert_eq!(ChannelForm::open(DialogMode::View, Some(&ch)).name, "old");
    }

    #[test]
    fn test_required_fields() {
        let errors = ChannelForm::empty().validate();
        assert_eq!(errors.len(), 2);
        assert!(errors.get("name").is_some());
        assert!(errors.get("url").is_some());
    }

    #[test]
    fn test_config_requires_cmd_args_baseurl() {
        let form = ConfigForm(ServerConfig { cmd: "yt-dlp".into(), ..Default::default() });
        let errors = form.validate();
        assert!(errors.get("cmd").is_none());
        assert!(errors.get("args").is_some());
        assert!(errors.get("baseurl").is_some());
        assert!(errors.get("secret").is_none());
    }

    #[test]
    fn test_dialog_titles() {
        assert_eq!(DialogMode::Add.title(), "New Channel");
        assert!(DialogMode::View.read_only());
        assert!(!DialogMode::Edit.read_only());
    }
}
