//! Internationalization (i18n) module for ThemeSplit.
//!
//! Uses a simple key→string HashMap loaded at runtime from embedded translation data.
//! The `t!("key")` macro looks up the current language, falling back to English.
//! Language can be switched at runtime via `set_language()`.

use std::collections::HashMap;
use std::sync::Mutex;

/// Global translation state.
static I18N: Mutex<Option<I18nState>> = Mutex::new(None);

struct I18nState {
    current_lang: String,
    /// lang_code → (key → translated_string)
    translations: HashMap<String, HashMap<String, String>>,
}

/// Supported languages: (code, native_name).
/// French first shipped with the tool; keep it in sync with `locales/`.
pub const LANGUAGES: &[(&str, &str)] = &[("en", "English"), ("fr", "Français")];

/// Embedded translation files, one per supported language.
const LOCALES: &[(&str, &str)] = &[
    ("en", include_str!("../locales/en.txt")),
    ("fr", include_str!("../locales/fr.txt")),
];

/// Initialize the i18n system with embedded translations.
/// Call once at startup.
pub fn init() {
    let mut translations: HashMap<String, HashMap<String, String>> = HashMap::new();
    for (code, data) in LOCALES {
        translations.insert((*code).to_string(), parse_translations(data));
    }

    let state = I18nState {
        current_lang: "en".to_string(),
        translations,
    };
    *I18N.lock().unwrap() = Some(state);
}

/// Set the active language. If `code` is not a known language, falls back to "en".
pub fn set_language(code: &str) {
    if let Ok(mut guard) = I18N.lock()
        && let Some(ref mut state) = *guard
    {
        if state.translations.contains_key(code) {
            state.current_lang = code.to_string();
        } else {
            state.current_lang = "en".to_string();
        }
    }
}

/// Get the current language code.
pub fn current_language() -> String {
    if let Ok(guard) = I18N.lock()
        && let Some(ref state) = *guard
    {
        return state.current_lang.clone();
    }
    "en".to_string()
}

/// Look up a translation key. Returns the translated string if found,
/// or falls back to English, or returns the key itself as last resort.
pub fn translate(key: &str) -> String {
    if let Ok(guard) = I18N.lock()
        && let Some(ref state) = *guard
    {
        // Try current language
        if let Some(map) = state.translations.get(&state.current_lang)
            && let Some(val) = map.get(key)
        {
            return val.clone();
        }
        // Fallback to English
        if state.current_lang != "en"
            && let Some(map) = state.translations.get("en")
            && let Some(val) = map.get(key)
        {
            return val.clone();
        }
    }
    // Last resort: return the key itself
    key.to_string()
}

/// Detect the system language and return the best matching language code.
/// Returns "en" if no match is found.
pub fn detect_system_language() -> String {
    // LANG / LC_ALL environment variables (Linux/macOS, sometimes set on Windows)
    for var in &["LANG", "LC_ALL", "LC_MESSAGES", "LANGUAGE"] {
        if let Ok(val) = std::env::var(var)
            && let Some(lang) = match_system_locale(&val)
        {
            return lang;
        }
    }

    "en".to_string()
}

/// Match a system locale string (e.g. "fr_FR.UTF-8", "fr-CA", "en_US") to our supported languages.
fn match_system_locale(locale: &str) -> Option<String> {
    // Normalize: lowercase, replace _ with -
    let normalized = locale.to_lowercase().replace('_', "-");

    // Extract language part (before any '.' or '@')
    let lang_part = normalized.split('.').next().unwrap_or(&normalized);
    let lang_part = lang_part.split('@').next().unwrap_or(lang_part);

    // Try exact match first
    for &(code, _) in LANGUAGES {
        if code.to_lowercase() == lang_part {
            return Some(code.to_string());
        }
    }

    // Try prefix match (e.g., "fr-ca" → "fr")
    let primary = lang_part.split('-').next().unwrap_or(lang_part);
    for &(code, _) in LANGUAGES {
        if code.to_lowercase() == primary {
            return Some(code.to_string());
        }
    }

    None
}

/// Parse a simple key=value translation file.
/// Format: one `key=value` per line. Lines starting with `#` are comments. Empty lines ignored.
fn parse_translations(data: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in data.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, val)) = line.split_once('=') {
            map.insert(key.trim().to_string(), val.trim().to_string());
        }
    }
    map
}

/// Translation macro. Usage: `t!("menu.file")` or `t!("status.exported", path = "out.png")`
#[macro_export]
macro_rules! t {
    ($key:expr) => {
        $crate::i18n::translate($key)
    };
    ($key:expr, $($name:ident = $val:expr),+ $(,)?) => {{
        let mut s = $crate::i18n::translate($key);
        $(
            s = s.replace(concat!("{", stringify!($name), "}"), &format!("{}", $val));
        )+
        s
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_translations_skips_comments_and_blanks() {
        let map = parse_translations("# comment\n\nslot.light=Light mode\nbad line\nk = v \n");
        assert_eq!(map.get("slot.light").map(String::as_str), Some("Light mode"));
        assert_eq!(map.get("k").map(String::as_str), Some("v"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_match_system_locale() {
        assert_eq!(match_system_locale("fr_FR.UTF-8").as_deref(), Some("fr"));
        assert_eq!(match_system_locale("fr-CA").as_deref(), Some("fr"));
        assert_eq!(match_system_locale("en_US").as_deref(), Some("en"));
        assert_eq!(match_system_locale("ja_JP").as_deref(), None);
    }

    #[test]
    fn test_translate_falls_back_to_key() {
        init();
        assert_eq!(translate("no.such.key"), "no.such.key");
    }

    #[test]
    fn test_every_en_key_has_a_fr_twin() {
        let en = parse_translations(LOCALES[0].1);
        let fr = parse_translations(LOCALES[1].1);
        for key in en.keys() {
            assert!(fr.contains_key(key), "missing French translation for {key}");
        }
    }
}
