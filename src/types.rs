use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};
use crate::config::{DEFAULT_PAGE_SIZE, DEFAULT_PARSER, PAGE_SIZE_OPTIONS};

/// A channel record exactly as `/channels` returns it.
#[serde_as]
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Channel {
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "URL", default)]
    pub url: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub parser: String,
    #[serde(rename = "M3U8", default)]
    pub m3u8: String,
    #[serde(default)]
    pub proxy: bool,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub ts_proxy: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub proxy_url: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub status: i64,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub message: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub last_update: String,
    #[serde(rename = "Virtual", default)]
    pub is_virtual: bool,
    // Row index assigned on fetch, never sent back
    #[serde(skip)]
    pub no: usize,
}

impl Channel {
    pub fn health(&self) -> ChannelStatus {
        ChannelStatus::from_code(self.status)
    }

    pub fn proxy_mode(&self) -> ProxyMode {
        ProxyMode::from_wire(self.proxy, &self.ts_proxy)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelStatus {
    Unknown,
    Ok,
    Warning,
    Error,
    Degraded,
}

impl ChannelStatus {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => ChannelStatus::Ok,
            2 => ChannelStatus::Warning,
            3 => ChannelStatus::Error,
            4 => ChannelStatus::Degraded,
            _ => ChannelStatus::Unknown,
        }
    }

    /// (glyph, color class) rendered in the M3U8 column.
    pub fn icon(self) -> (&'static str, &'static str) {
        match self {
            ChannelStatus::Unknown => ("?", "text-base-content/30"),
            ChannelStatus::Ok => ("✔", "text-success"),
            ChannelStatus::Warning | ChannelStatus::Degraded => ("⚠", "text-warning"),
            ChannelStatus::Error => ("✖", "text-error"),
        }
    }
}

/// How the media stream of a channel is relayed for playback.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum ProxyMode {
    #[default]
    NoProxy,
    SameAsBase,
    Custom(String),
}

impl ProxyMode {
    /// The backend stores this as a boolean plus an optional relay URL.
    pub fn from_wire(proxy: bool, ts_proxy: &str) -> Self {
        match (proxy, ts_proxy.trim()) {
            (false, _) => ProxyMode::NoProxy,
            (true, "") => ProxyMode::SameAsBase,
            (true, url) => ProxyMode::Custom(url.to_string()),
        }
    }

    /// `(proxy, tsproxy)` as sent to `/newchannel` and `/updatechannel`.
    pub fn to_wire(&self) -> (bool, String) {
        match self {
            ProxyMode::NoProxy => (false, String::new()),
            ProxyMode::SameAsBase => (true, String::new()),
            ProxyMode::Custom(url) => (true, url.clone()),
        }
    }

    /// Value of the three-way selector in the channel dialog.
    pub fn selector_value(&self) -> &'static str {
        match self {
            ProxyMode::NoProxy => "0",
            ProxyMode::SameAsBase => "1",
            ProxyMode::Custom(_) => "2",
        }
    }

    pub fn from_selector(value: &str, custom_url: &str) -> Self {
        match value {
            "1" => ProxyMode::SameAsBase,
            "2" => ProxyMode::Custom(custom_url.trim().to_string()),
            _ => ProxyMode::NoProxy,
        }
    }
}

/// Body of a channel create/update call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChannelRequest {
    pub id: Option<String>,
    pub url: String,
    pub name: String,
    pub proxy: bool,
    pub parser: String,
    pub proxy_url: String,
    pub ts_proxy: String,
    pub category: String,
}

/// Rows shown in the table plus the playlist URL carried by the list head.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChannelListing {
    pub rows: Vec<Channel>,
    pub playlist_url: Option<String>,
}

impl ChannelListing {
    /// The backend prepends a pseudo record whose `M3U8` is the playlist
    /// URL. It is split off here; numbering starts before the split so the
    /// first real row is `#1`.
    pub fn from_records(mut records: Vec<Channel>) -> Self {
        if records.is_empty() {
            return Self::default();
        }

        for (idx, ch) in records.iter_mut().enumerate() {
            if ch.parser.trim().is_empty() {
                ch.parser = DEFAULT_PARSER.to_string();
            }
            ch.no = idx;
        }

        let head = records.remove(0);
        Self { rows: records, playlist_url: Some(head.m3u8) }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaylistType {
    #[default]
    M3u,
    Txt,
}

impl PlaylistType {
    pub const ALL: [PlaylistType; 2] = [PlaylistType::M3u, PlaylistType::Txt];

    pub fn label(self) -> &'static str {
        match self {
            PlaylistType::M3u => "M3U",
            PlaylistType::Txt => "TXT",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            PlaylistType::M3u => "lives.m3u",
            PlaylistType::Txt => "lives.txt",
        }
    }

    pub fn from_file_name(name: &str) -> Self {
        if name == PlaylistType::Txt.file_name() { PlaylistType::Txt } else { PlaylistType::M3u }
    }

    /// The list head always advertises the M3U file.
    pub fn playlist_url(self, base: &str) -> String {
        base.replace(PlaylistType::M3u.file_name(), self.file_name())
    }
}

/// Server options edited in the Config tab.
#[serde_as]
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ServerConfig {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub cmd: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub args: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub baseurl: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub proxyurl: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub secret: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub apikey: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct CaptchaInfo {
    /// Image as a data URL
    pub data: String,
    pub captcha_id: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Credential {
    pub password: String,
    pub answer: String,
    pub captcha_id: String,
    pub crsf: String,
}

/// Preferences kept in the browser between sessions.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UiPrefs {
    #[serde(default)]
    pub playlist_type: PlaylistType,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for UiPrefs {
    fn default() -> Self {
        Self { playlist_type: PlaylistType::M3u, page_size: DEFAULT_PAGE_SIZE }
    }
}

impl UiPrefs {
    /// Drops values a stale or hand-edited store may hold.
    pub fn sanitized(mut self) -> Self {
        if !PAGE_SIZE_OPTIONS.contains(&self.page_size) {
            self.page_size = DEFAULT_PAGE_SIZE;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, m3u8: &str) -> Channel {
        Channel { id: id.to_string(), m3u8: m3u8.to_string(), ..Default::default() }
    }

    #[test]
    fn test_channel_decodes_backend_names() {
        let raw = r#"{
            "ID": "7", "Name": "News", "URL": "https://youtu.be/x", "Parser": null,
            "M3U8": "http://tv/live.m3u8?c=7", "Proxy": true, "TsProxy": "",
            "ProxyUrl": "socks5://127.0.0.1:1080", "Category": "Info",
            "Status": 1, "Message": "ok", "LastUpdate": "2024-01-01 10:00:00", "Virtual": false
        }"#;
        let ch: Channel = serde_json::from_str(raw).unwrap();

        assert_eq!(ch.id, "7");
        assert_eq!(ch.url, "https://youtu.be/x");
        assert_eq!(ch.parser, "");
        assert_eq!(ch.proxy_url, "socks5://127.0.0.1:1080");
        assert_eq!(ch.health(), ChannelStatus::Ok);
        assert_eq!(ch.proxy_mode(), ProxyMode::SameAsBase);
    }

    #[test]
    fn test_status_codes_map_to_icons() {
        assert_eq!(ChannelStatus::from_code(0), ChannelStatus::Unknown);
        assert_eq!(ChannelStatus::from_code(3).icon().1, "text-error");
        assert_eq!(ChannelStatus::from_code(2).icon(), ChannelStatus::from_code(4).icon());
        assert_eq!(ChannelStatus::from_code(9), ChannelStatus::Unknown);
        assert_eq!(ChannelStatus::from_code(-1), ChannelStatus::Unknown);
    }

    #[test]
    fn test_proxy_mode_from_wire() {
        assert_eq!(ProxyMode::from_wire(false, "http://relay"), ProxyMode::NoProxy);
        assert_eq!(ProxyMode::from_wire(true, "  "), ProxyMode::SameAsBase);
        assert_eq!(ProxyMode::from_wire(true, "http://relay"), ProxyMode::Custom("http://relay".into()));
    }

    #[test]
    fn test_listing_splits_head_record() {
        let listing = ChannelListing::from_records(vec![
            record("", "http://tv/lives.m3u"),
            record("1", "http://tv/1.m3u8"),
            record("2", "http://tv/2.m3u8"),
        ]);

        assert_eq!(listing.playlist_url.as_deref(), Some("http://tv/lives.m3u"));
        assert_eq!(listing.rows.len(), 2);
        assert_eq!(listing.rows[0].id, "1");
        assert_eq!(listing.rows[0].no, 1);
        assert_eq!(listing.rows[1].parser, "http");
    }

    #[test]
    fn test_listing_of_head_only() {
        let listing = ChannelListing::from_records(vec![record("", "http://tv/lives.m3u")]);
        assert!(listing.rows.is_empty());
        assert_eq!(listing.playlist_url.as_deref(), Some("http://tv/lives.m3u"));

        assert_eq!(ChannelListing::from_records(vec![]), ChannelListing::default());
    }

    #[test]
    fn test_playlist_url_swaps_file_name() {
        let base = "http://tv:9000/lives.m3u?token=abc";
        assert_eq!(PlaylistType::M3u.playlist_url(base), base);
        assert_eq!(PlaylistType::Txt.playlist_url(base), "http://tv:9000/lives.txt?token=abc");
        assert_eq!(PlaylistType::from_file_name("lives.txt"), PlaylistType::Txt);
    }

    #[test]
    fn test_prefs_sanitized() {
        let prefs: UiPrefs = serde_json::from_str(r#"{"playlist_type":"txt","page_size":33}"#).unwrap();
        let prefs = prefs.sanitized();
        assert_eq!(prefs.playlist_type, PlaylistType::Txt);
        assert_eq!(prefs.page_size, 20);
    }
}
