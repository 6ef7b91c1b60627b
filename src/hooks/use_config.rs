use leptos::logging::warn;
use crate::config::PREFS_STORAGE_KEY;
use crate::types::UiPrefs;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

pub fn load_ui_prefs() -> UiPrefs {
    let Some(raw) = local_storage().and_then(|s| s.get_item(PREFS_STORAGE_KEY).ok().flatten()) else {
        return UiPrefs::default();
    };
    match serde_json::from_str::<UiPrefs>(&raw) {
        Ok(prefs) => prefs.sanitized(),
        Err(e) => {
            warn!("Ignoring stored preferences: {}", e);
            UiPrefs::default()
        }
    }
}

pub fn save_ui_prefs(prefs: &UiPrefs) {
    let Some(storage) = local_storage() else { return };
    match serde_json::to_string(prefs) {
        Ok(raw) => {
            if let Err(e) = storage.set_item(PREFS_STORAGE_KEY, &raw) {
                warn!("Failed to persist preferences: {:?}", e);
            }
        }
        Err(e) => warn!("Failed to encode preferences: {}", e),
    }
}
