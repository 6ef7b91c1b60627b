use std::ops::Range;
use chrono::NaiveDateTime;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use crate::config::DEFAULT_PAGE_SIZE;

/// Backend timestamps come as RFC 3339 or `YYYY-MM-DD HH:MM:SS`; anything
/// else is shown verbatim.
pub fn format_last_update(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(ts) = chrono::DateTime::parse_from_rfc3339(raw) {
        return ts.format("%Y-%m-%d %H:%M:%S").to_string();
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return ts.format("%Y-%m-%d %H:%M:%S").to_string();
    }
    raw.to_string()
}

pub async fn copy_to_clipboard(text: &str) -> bool {
    let Some(window) = web_sys::window() else { return false };
    JsFuture::from(window.navigator().clipboard().write_text(text)).await.is_ok()
}

pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

pub fn set_document_title(title: &str) {
    if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
        doc.set_title(title);
    }
}

pub fn delete_cookie(name: &str) {
    let Some(doc) = web_sys::window().and_then(|w| w.document()) else { return };
    if let Ok(html) = doc.dyn_into::<web_sys::HtmlDocument>() {
        let _ = html.set_cookie(&expired_cookie(name));
    }
}

pub fn expired_cookie(name: &str) -> String {
    format!("{}=; expires=Thu, 01 Jan 1970 00:00:00 UTC; path=/", name)
}

pub fn site_origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

pub fn random_secret() -> String {
    base36_fraction(js_sys::Math::random())
}

/// Base-36 digits after the point of `x` in `[0, 1)`.
pub fn base36_fraction(mut x: f64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut out = String::new();
    // an f64 mantissa holds about 10 base-36 digits
    while x > 0.0 && out.len() < 11 {
        x *= 36.0;
        let digit = x.floor() as usize;
        out.push(DIGITS[digit.min(35)] as char);
        x -= digit as f64;
    }
    out
}

/// Client-side pagination over the table rows. Pages are 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pager {
    pub page: usize,
    pub page_size: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self { page: 1, page_size: DEFAULT_PAGE_SIZE }
    }
}

impl Pager {
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size.max(1)).max(1)
    }

    /// Keeps `page` in range after the row count changed.
    pub fn clamp(self, total: usize) -> Self {
        Self { page: self.page.clamp(1, self.page_count(total)), ..self }
    }

    pub fn with_page_size(self, page_size: usize) -> Self {
        Self { page: 1, page_size }
    }

    pub fn range(&self, total: usize) -> Range<usize> {
        let clamped = self.clamp(total);
        let start = ((clamped.page - 1) * self.page_size).min(total);
        start..(start + self.page_size).min(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_last_update() {
        assert_eq!(format_last_update("2024-03-01T08:30:00+08:00"), "2024-03-01 08:30:00");
        assert_eq!(format_last_update("2024-03-01 08:30:00"), "2024-03-01 08:30:00");
        assert_eq!(format_last_update("just now"), "just now");
    }

    #[test]
    fn test_base36_fraction() {
        assert_eq!(base36_fraction(0.5), "i");
        assert_eq!(base36_fraction(0.0), "");
        let s = base36_fraction(0.123456789);
        assert!(!s.is_empty() && s.len() <= 11);
        assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_expired_cookie() {
        assert_eq!(expired_cookie("mysession"), "mysession=; expires=Thu, 01 Jan 1970 00:00:00 UTC; path=/");
    }

    #[test]
    fn test_pager_ranges() {
        let pager = Pager { page: 2, page_size: 20 };
        assert_eq!(pager.page_count(45), 3);
        assert_eq!(pager.range(45), 20..40);
        assert_eq!(Pager { page: 3, page_size: 20 }.range(45), 40..45);
        assert_eq!(pager.page_count(0), 1);
        assert_eq!(pager.range(0), 0..0);
    }

    #[test]
    fn test_pager_clamps_after_shrink() {
        let pager = Pager { page: 5, page_size: 10 }.clamp(23);
        assert_eq!(pager.page, 3);
        assert_eq!(Pager { page: 4, page_size: 10 }.with_page_size(50).page, 1);
    }
}
