//! Application settings — a tiny key=value config file in the platform
//! config directory.  Unknown keys are ignored so old files keep working
//! across versions.

use std::path::PathBuf;

/// User-tunable application settings.
#[derive(Clone, Debug, PartialEq)]
pub struct AppSettings {
    /// Language code (e.g. "en", "fr"). Empty string = auto-detect system language.
    pub language: String,
    /// Draw the transparency checkerboard behind the preview surface.
    pub show_checkerboard: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            language: String::new(), // empty = auto-detect on first boot
            show_checkerboard: true,
        }
    }
}

impl AppSettings {
    /// Path to the settings file.
    /// On Linux:   ~/.config/themesplit/themesplit_settings.cfg  (XDG_CONFIG_HOME respected)
    /// On Windows: %APPDATA%\ThemeSplit\themesplit_settings.cfg
    /// On macOS:   ~/Library/Application Support/ThemeSplit/themesplit_settings.cfg
    /// Fallback:   same directory as the executable.
    pub(crate) fn settings_path() -> Option<PathBuf> {
        #[cfg(target_os = "linux")]
        {
            let config_dir = std::env::var("XDG_CONFIG_HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    let home = std::env::var("HOME").unwrap_or_else(|_| "~".to_string());
                    PathBuf::from(home).join(".config")
                })
                .join("themesplit");
            let _ = std::fs::create_dir_all(&config_dir);
            return Some(config_dir.join("themesplit_settings.cfg"));
        }
        #[cfg(target_os = "windows")]
        {
            // %APPDATA% keeps the settings in the user profile, isolated from
            // other users.
            let appdata = std::env::var("APPDATA")
                .or_else(|_| std::env::var("USERPROFILE"))
                .unwrap_or_else(|_| {
                    std::env::current_exe()
                        .ok()
                        .and_then(|p| p.parent().map(|d| d.to_string_lossy().into_owned()))
                        .unwrap_or_default()
                });
            let config_dir = PathBuf::from(appdata).join("ThemeSplit");
            let _ = std::fs::create_dir_all(&config_dir);
            return Some(config_dir.join("themesplit_settings.cfg"));
        }
        #[cfg(target_os = "macos")]
        {
            let home = std::env::var("HOME").unwrap_or_else(|_| "~".to_string());
            let config_dir = PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("ThemeSplit");
            let _ = std::fs::create_dir_all(&config_dir);
            return Some(config_dir.join("themesplit_settings.cfg"));
        }
        #[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
        {
            std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|d| d.join("themesplit_settings.cfg")))
        }
    }

    /// Render the settings as config-file content.
    fn to_config_string(&self) -> String {
        format!(
            "language={}\n\
             show_checkerboard={}\n",
            self.language, self.show_checkerboard,
        )
    }

    /// Parse config-file content. Missing or malformed keys keep their defaults.
    fn parse(content: &str) -> Self {
        let mut settings = Self::default();
        for line in content.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            match key.trim() {
                "language" => settings.language = value.trim().to_string(),
                "show_checkerboard" => {
                    if let Ok(v) = value.trim().parse::<bool>() {
                        settings.show_checkerboard = v;
                    }
                }
                _ => {} // unknown key — ignore
            }
        }
        settings
    }

    /// Save settings to disk.
    pub fn save(&self) {
        let Some(path) = Self::settings_path() else {
            return;
        };
        let _ = std::fs::write(path, self.to_config_string());
    }

    /// Load settings from disk (returns default if file missing or corrupt).
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            return Self::default();
        };
        let Ok(content) = std::fs::read_to_string(&path) else {
            return Self::default();
        };
        Self::parse(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_round_trip() {
        let settings = AppSettings {
            language: "fr".to_string(),
            show_checkerboard: false,
        };
        assert_eq!(AppSettings::parse(&settings.to_config_string()), settings);
    }

    #[test]
    fn test_parse_ignores_unknown_keys_and_junk() {
        let parsed = AppSettings::parse("nonsense\nfuture_key=42\nlanguage=fr\n");
        assert_eq!(parsed.language, "fr");
        assert!(parsed.show_checkerboard);
    }

    #[test]
    fn test_parse_empty_is_default() {
        assert_eq!(AppSettings::parse(""), AppSettings::default());
    }
}
