use crate::api::FormBody;
use crate::forms::{confirm_delete, ChannelForm, DialogMode, PasswordCheck, PasswordForm};
use crate::types::{Channel, ChannelListing};

// --- FIXTURES ---

fn edited_record(proxy_url: &str) -> Channel {
    Channel {
        id: "42".to_string(),
        name: "Morning News".to_string(),
        url: "https://www.youtube.com/watch?v=abc".to_string(),
        parser: "youtube".to_string(),
        proxy: true,
        ts_proxy: "http://relay.local:8080".to_string(),
        proxy_url: proxy_url.to_string(),
        ..Default::default()
    }
}

fn filled_form(selector: &str, ts_proxy: &str) -> ChannelForm {
    ChannelForm {
        name: "Morning News".to_string(),
        url: "https://www.youtube.com/watch?v=abc".to_string(),
        parser: "http".to_string(),
        proxy_selector: selector.to_string(),
        ts_proxy: ts_proxy.to_string(),
        ..ChannelForm::empty()
    }
}

// --- THE TESTS ---

#[test]
fn test_custom_proxy_sends_tsproxy_and_flag() {
    let form = filled_form("2", "http://relay.local:8080");
    assert!(form.validate().is_empty());

    let body = FormBody::from(&form.to_request());
    assert_eq!(body.get("proxy"), Some("true"));
    assert_eq!(body.get("tsproxy"), Some("http://relay.local:8080"));
}

#[test]
fn test_no_proxy_always_clears_tsproxy() {
    // A leftover custom URL in the hidden text box must not leak out
    let form = filled_form("0", "http://relay.local:8080");

    let body = FormBody::from(&form.to_request());
    assert_eq!(body.get("proxy"), Some("false"));
    assert_eq!(body.get("tsproxy"), Some(""));
}

#[test]
fn test_same_as_base_sends_flag_without_url() {
    let body = FormBody::from(&filled_form("1", "http://relay.local:8080").to_request());
    assert_eq!(body.get("proxy"), Some("true"));
    assert_eq!(body.get("tsproxy"), Some(""));
}

#[test]
fn test_custom_proxy_requires_url() {
    let errors = filled_form("2", "  ").validate();
    assert!(errors.get("tsproxy").is_some());
}

#[test]
fn test_edit_with_upstream_proxy_checks_use_proxy() {
    let form = ChannelForm::open(DialogMode::Edit, Some(&edited_record("socks5://10.0.0.1:1080")));

    assert!(form.use_proxy);
    assert_eq!(form.proxy_url, "socks5://10.0.0.1:1080");
    assert_eq!(form.proxy_selector, "2");
    assert_eq!(form.ts_proxy, "http://relay.local:8080");
}

#[test]
fn test_edit_without_upstream_proxy_hides_field() {
    let form = ChannelForm::open(DialogMode::Edit, Some(&edited_record("")));
    assert!(!form.use_proxy);
}

#[test]
fn test_unchecked_use_proxy_drops_proxy_string() {
    let mut form = ChannelForm::open(DialogMode::Edit, Some(&edited_record("socks5://10.0.0.1:1080")));
    form.use_proxy = false;

    let req = form.to_request();
    assert_eq!(req.proxy_url, "");
    assert_eq!(req.id.as_deref(), Some("42"));
}

#[test]
fn test_new_channel_defaults_to_http_parser() {
    let mut form = ChannelForm::open(DialogMode::Add, None);
    form.name = "Morning News".to_string();
    form.url = "https://example.com/live".to_string();

    let body = FormBody::from(&form.to_request());
    assert_eq!(body.get("parser"), Some("http"));
}

#[test]
fn test_edit_keeps_record_parser() {
    let form = ChannelForm::open(DialogMode::Edit, Some(&edited_record("")));
    assert_eq!(FormBody::from(&form.to_request()).get("parser"), Some("youtube"));
}

#[test]
fn test_new_channel_omits_id() {
    let body = FormBody::from(&filled_form("0", "").to_request());
    assert_eq!(body.get("id"), None);
    assert!(!body.encode().contains("id="));
}

#[test]
fn test_channel_list_head_becomes_playlist_url() {
    let raw = serde_json::json!([
        { "ID": "", "Name": "", "M3U8": "http://tv.local/lives.m3u" },
        { "ID": "a", "Name": "One", "M3U8": "http://tv.local/live.m3u8?c=a", "Status": 1 },
    ]);
    let records: Vec<Channel> = serde_json::from_value(raw).unwrap();

    let listing = ChannelListing::from_records(records);
    assert_eq!(listing.playlist_url.as_deref(), Some("http://tv.local/lives.m3u"));
    assert_eq!(listing.rows.len(), 1);
    assert_eq!(listing.rows[0].name, "One");
}

#[test]
fn test_delete_needs_confirmation() {
    let ch = edited_record("");
    let mut asked = String::new();

    let cancelled = confirm_delete(&ch, |prompt| {
        asked = prompt.to_string();
        false
    });
    assert!(cancelled.is_none());
    assert!(asked.contains("Morning News"));

    assert_eq!(confirm_delete(&ch, |_| true), Some("42".to_string()));
}

#[test]
fn test_password_mismatch_blocks_submit() {
    let form = PasswordForm { password: "hunter2".into(), password2: "hunter3".into() };
    assert_eq!(form.check(), PasswordCheck::Mismatch);

    let form = PasswordForm { password: "hunter2".into(), password2: "hunter2".into() };
    assert_eq!(form.check(), PasswordCheck::Ready);

    let form = PasswordForm { password: "hunter2".into(), password2: String::new() };
    assert!(matches!(form.check(), PasswordCheck::Invalid(e) if e.get("password2").is_some()));
}
