//! User settings stored in `settings.toml`, plus the legacy `settings.ini`
//! approach-time override.

use super::engine::constants::{
    DEFAULT_APPROACH_MS, DEFAULT_MISS_MS, DEFAULT_SLACK_MS, DEFAULT_START_DELAY_MS, MAX_SPEED,
    MIN_SPEED,
};
use super::engine::hit_window::TimingWindows;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const SETTINGS_PATH: &str = "settings.toml";
pub const LEGACY_SETTINGS_PATH: &str = "settings.ini";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 900,
            height: 600,
        }
    }
}

/// Key names use winit's `KeyCode` spelling (`KeyA`, `Enter`, `ArrowUp`...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeySettings {
    pub lanes: Vec<String>,
    pub confirm: String,
    pub back: String,
    pub up: String,
    pub down: String,
    pub speed_up: String,
    pub speed_down: String,
    pub pause: String,
    pub rescan: String,
    pub quick_play: String,
    pub quit: String,
}

impl Default for KeySettings {
    fn default() -> Self {
        Self {
            lanes: ["KeyA", "KeyS", "KeyK", "KeyL"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            confirm: "Enter".to_string(),
            back: "Escape".to_string(),
            up: "ArrowUp".to_string(),
            down: "ArrowDown".to_string(),
            speed_up: "PageUp".to_string(),
            speed_down: "PageDown".to_string(),
            pause: "Space".to_string(),
            rescan: "F8".to_string(),
            quick_play: "F10".to_string(),
            quit: "F4".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub approach_ms: f64,
    pub miss_ms: f64,
    pub slack_ms: f64,
    pub speed: f64,
    pub start_delay_ms: i64,
    pub maps_dir: PathBuf,
    pub volume: f32,
    pub font_path: PathBuf,
    pub window: WindowSettings,
    pub keys: KeySettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            approach_ms: DEFAULT_APPROACH_MS,
            miss_ms: DEFAULT_MISS_MS,
            slack_ms: DEFAULT_SLACK_MS,
            speed: 1.0,
            start_delay_ms: DEFAULT_START_DELAY_MS,
            maps_dir: PathBuf::from("maps"),
            volume: 0.5,
            font_path: PathBuf::from("assets/font.ttf"),
            window: WindowSettings::default(),
            keys: KeySettings::default(),
        }
    }
}

impl Settings {
    /// Loads `settings.toml` and `settings.ini` from the working directory.
    pub fn load() -> Self {
        Self::load_from(Path::new(SETTINGS_PATH), Path::new(LEGACY_SETTINGS_PATH))
    }

    /// Loads settings, falling back to defaults on any problem.
    ///
    /// A missing TOML file is created with the defaults. The legacy file is
    /// optional and only contributes the `at=` approach time.
    pub fn load_from(path: &Path, legacy_path: &Path) -> Self {
        let mut settings = if path.exists() {
            match fs::read_to_string(path)
                .map_err(|e| e.to_string())
                .and_then(|content| toml::from_str::<Settings>(&content).map_err(|e| e.to_string()))
            {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("SETTINGS: Failed to parse {:?}, using defaults: {}", path, e);
                    Settings::default()
                }
            }
        } else {
            let settings = Settings::default();
            if let Err(e) = settings.save(path) {
                log::warn!("SETTINGS: Could not write defaults to {:?}: {}", path, e);
            }
            settings
        };

        if let Ok(content) = fs::read_to_string(legacy_path) {
            settings.apply_legacy(&content);
        }

        settings.sanitize();
        settings
    }

    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content = toml::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, content).map_err(|e| e.to_string())
    }

    /// Applies `key=value` lines from the legacy settings file.
    pub fn apply_legacy(&mut self, content: &str) {
        for line in content.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            if key.trim() != "at" {
                continue;
            }
            match value.trim().parse::<f64>() {
                Ok(at) => {
                    log::info!("SETTINGS: Approach time overridden to {} ms", at);
                    self.approach_ms = at;
                }
                Err(e) => log::warn!("SETTINGS: Ignoring invalid at={:?}: {}", value, e),
            }
        }
    }

    fn sanitize(&mut self) {
        let defaults = Settings::default();
        if !(self.approach_ms.is_finite() && self.approach_ms > 0.0) {
            log::warn!("SETTINGS: approach_ms must be positive, using default");
            self.approach_ms = defaults.approach_ms;
        }
        if !(self.miss_ms.is_finite() && self.miss_ms >= 0.0) {
            self.miss_ms = defaults.miss_ms;
        }
        if !(self.slack_ms.is_finite() && self.slack_ms >= 0.0) {
            self.slack_ms = defaults.slack_ms;
        }
        if !self.speed.is_finite() {
            self.speed = defaults.speed;
        }
        self.speed = self.speed.clamp(MIN_SPEED, MAX_SPEED);
        self.start_delay_ms = self.start_delay_ms.max(0);
        self.volume = self.volume.clamp(0.0, 1.0);
    }

    pub fn timing_windows(&self) -> TimingWindows {
        TimingWindows::new(self.approach_ms, self.miss_ms, self.slack_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        let settings = Settings::load_from(&path, &dir.path().join("settings.ini"));
        assert_eq!(settings, Settings::default());
        assert!(path.exists());

        let reloaded = Settings::load_from(&path, &dir.path().join("settings.ini"));
        assert_eq!(reloaded, settings);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "speed = 1.5\n[keys]\nlanes = [\"KeyD\", \"KeyF\", \"KeyJ\", \"KeyK\"]\n")
            .unwrap();
        let settings = Settings::load_from(&path, &dir.path().join("settings.ini"));
        assert_eq!(settings.speed, 1.5);
        assert_eq!(settings.keys.lanes[0], "KeyD");
        assert_eq!(settings.keys.confirm, "Enter");
        assert_eq!(settings.approach_ms, DEFAULT_APPROACH_MS);
    }

    #[test]
    fn broken_toml_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "speed = \"fast\"").unwrap();
        let settings = Settings::load_from(&path, &dir.path().join("settings.ini"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn legacy_at_overrides_approach_time() {
        let dir = tempfile::tempdir().unwrap();
        let legacy = dir.path().join("settings.ini");
        fs::write(&legacy, "volume=3\nat=700\n").unwrap();
        let settings = Settings::load_from(&dir.path().join("settings.toml"), &legacy);
        assert_eq!(settings.approach_ms, 700.0);
    }

    #[test]
    fn invalid_values_are_sanitized() {
        let mut settings = Settings::default();
        settings.apply_legacy("at=abc\n");
        assert_eq!(settings.approach_ms, DEFAULT_APPROACH_MS);

        settings.apply_legacy("at=-5");
        settings.speed = 9.0;
        settings.sanitize();
        assert_eq!(settings.approach_ms, DEFAULT_APPROACH_MS);
        assert_eq!(settings.speed, MAX_SPEED);
    }
}
