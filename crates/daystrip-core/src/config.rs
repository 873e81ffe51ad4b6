use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::calendar::CalendarClock;
use crate::month_table::{MonthEntry, MonthTable};

/// Largest month label slide, in rows
pub const MAX_LABEL_RISE: f64 = 64.0;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub strip: StripConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Initial date of the strip
    #[serde(default)]
    pub start: StartDate,
    /// Replacement month table (12 entries); February stays at 28 days unless overridden here
    #[serde(default)]
    pub months: Option<Vec<MonthEntry>>,
}

impl CalendarConfig {
    /// Build the month table, falling back to the Gregorian default
    pub fn month_table(&self) -> crate::Result<MonthTable> {
        match &self.months {
            Some(entries) => MonthTable::new(entries.clone()),
            None => Ok(MonthTable::gregorian()),
        }
    }

    /// Build the clock at the configured start date
    pub fn clock(&self) -> crate::Result<CalendarClock> {
        let table = self.month_table()?;
        match self.start {
            StartDate::Today => Ok(CalendarClock::today(table)),
            StartDate::Fixed { month, day } => {
                // Configured months are 1-based
                let month_index = (month as usize).checked_sub(1).ok_or_else(|| {
                    crate::Error::Config("calendar.start.month must be 1 or greater".to_string())
                })?;
                CalendarClock::new(table, month_index, day)
            }
        }
    }
}

/// Start date: either the string "today" or `{ month = 6, day = 29 }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartDate {
    #[default]
    Today,
    /// One-based month and day
    Fixed { month: u32, day: u32 },
}

impl Serialize for StartDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        match self {
            StartDate::Today => serializer.serialize_str("today"),
            StartDate::Fixed { month, day } => {
                let mut state = serializer.serialize_struct("StartDate", 2)?;
                state.serialize_field("month", month)?;
                state.serialize_field("day", day)?;
                state.end()
            }
        }
    }
}

// Accept either the "today" keyword or a month/day map
impl<'de> Deserialize<'de> for StartDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};
        use std::fmt;

        struct StartDateVisitor;

        impl<'de> Visitor<'de> for StartDateVisitor {
            type Value = StartDate;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("\"today\" or a map with 'month' and 'day'")
            }

            fn visit_str<E>(self, value: &str) -> Result<StartDate, E>
            where
                E: de::Error,
            {
                if value.eq_ignore_ascii_case("today") {
                    Ok(StartDate::Today)
                } else {
                    Err(E::invalid_value(de::Unexpected::Str(value), &self))
                }
            }

            fn visit_map<M>(self, mut map: M) -> Result<StartDate, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut month: Option<u32> = None;
                let mut day: Option<u32> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "month" => month = Some(map.next_value()?),
                        "day" => day = Some(map.next_value()?),
                        _ => {
                            let _: de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(StartDate::Fixed {
                    month: month.ok_or_else(|| de::Error::missing_field("month"))?,
                    day: day.ok_or_else(|| de::Error::missing_field("day"))?,
                })
            }
        }

        deserializer.deserialize_any(StartDateVisitor)
    }
}

/// Easing curve for the month label slide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    None,
    Linear,
    #[default]
    Cubic,
    Quintic,
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripConfig {
    /// Animate steps; when off every step finishes on its first frame
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Frames needed to scroll one tile
    #[serde(default = "default_frames_per_step")]
    pub frames_per_step: u32,
    /// Tile width in layout units, also the scroll distance of one step
    #[serde(default = "default_cell_width")]
    pub cell_width: f64,
    /// Tiles drawn before the anchor tile
    #[serde(default = "default_tiles_before")]
    pub tiles_before: u32,
    /// Tiles drawn after the anchor tile
    #[serde(default = "default_tiles_after")]
    pub tiles_after: u32,
    /// Scale step speed by the queue length, so a long chain starts fast and
    /// slows as the queue drains
    #[serde(default)]
    pub momentum: bool,
    /// Steps queued by a single fling
    #[serde(default = "default_fling_steps")]
    pub fling_steps: u32,
    /// Distance the month label slides during a month change
    #[serde(default = "default_label_rise")]
    pub label_rise: f64,
    /// Easing of the month label slide
    #[serde(default)]
    pub easing: EasingType,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            frames_per_step: default_frames_per_step(),
            cell_width: default_cell_width(),
            tiles_before: default_tiles_before(),
            tiles_after: default_tiles_after(),
            momentum: false,
            fling_steps: default_fling_steps(),
            label_rise: default_label_rise(),
            easing: EasingType::default(),
        }
    }
}

impl StripConfig {
    /// Check values that would make the layout meaningless
    pub fn validate(&self) -> crate::Result<()> {
        if !self.cell_width.is_finite() || self.cell_width <= 0.0 {
            return Err(crate::Error::Config(format!(
                "strip.cell_width must be positive, got {}",
                self.cell_width
            )));
        }
        if !(0.0..=MAX_LABEL_RISE).contains(&self.label_rise) {
            return Err(crate::Error::Config(format!(
                "strip.label_rise must be between 0 and {}, got {}",
                MAX_LABEL_RISE, self.label_rise
            )));
        }
        // The current day sits one tile after the anchor
        if self.tiles_after == 0 {
            return Err(crate::Error::Config(
                "strip.tiles_after must be at least 1".to_string(),
            ));
        }
        if self.fling_steps == 0 {
            return Err(crate::Error::Config(
                "strip.fling_steps must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether steps are actually animated
    #[inline]
    pub fn is_smooth(&self) -> bool {
        self.smooth_enabled && self.frames_per_step > 0
    }

    /// Offset added per frame
    pub fn speed(&self) -> f64 {
        if self.is_smooth() {
            self.cell_width / f64::from(self.frames_per_step)
        } else {
            self.cell_width
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Frame rate of the strip animation
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            animation_fps: default_animation_fps(),
            theme: ThemeConfig::default(),
        }
    }
}

impl UiConfig {
    /// Time between frames
    pub fn frame_interval(&self) -> std::time::Duration {
        if self.animation_fps == 0 {
            std::time::Duration::from_millis(16) // ~60fps fallback
        } else {
            std::time::Duration::from_secs_f64(1.0 / f64::from(self.animation_fps))
        }
    }
}

/// Theme configuration
/// Can be specified as a simple string (theme name) or as a full struct with overrides
#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    /// Theme name (e.g., "gruvbox-dark", "nord")
    pub name: String,
    /// Optional color overrides for semantic colors
    pub colors: ThemeColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: ThemeColorOverrides::default(),
        }
    }
}

impl<'de> Deserialize<'de> for ThemeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};
        use std::fmt;

        struct ThemeConfigVisitor;

        impl<'de> Visitor<'de> for ThemeConfigVisitor {
            type Value = ThemeConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter
                    .write_str("a string (theme name) or a map with 'name' and optional 'colors'")
            }

            fn visit_str<E>(self, value: &str) -> Result<ThemeConfig, E>
            where
                E: de::Error,
            {
                Ok(ThemeConfig {
                    name: value.to_string(),
                    colors: ThemeColorOverrides::default(),
                })
            }

            fn visit_map<M>(self, mut map: M) -> Result<ThemeConfig, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut name: Option<String> = None;
                let mut colors: Option<ThemeColorOverrides> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "name" => name = Some(map.next_value()?),
                        "colors" => colors = Some(map.next_value()?),
                        _ => {
                            let _: de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(ThemeConfig {
                    name: name.unwrap_or_else(default_theme_name),
                    colors: colors.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(ThemeConfigVisitor)
    }
}

/// Optional color overrides, each a hex string ("#ff0000" or "ff0000")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    /// Screen background
    pub background: Option<String>,
    /// Tile fill
    pub tile: Option<String>,
    /// Day number on a tile
    pub tile_text: Option<String>,
    /// Frame around the selected tile
    pub selection: Option<String>,
    /// Month label
    pub month: Option<String>,
    /// Status bar background
    pub status_bg: Option<String>,
    /// Status bar text
    pub status_fg: Option<String>,
    /// Accent color
    pub accent: Option<String>,
}

/// Keymap configuration using Vim-style notation
/// Format: "h", "L" (Shift+l), "<C-n>" (Ctrl+n), "<Right>", "<S-Right>", "<Esc>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Quit the application
    #[serde(default = "default_key_quit")]
    pub quit: String,
    /// Scroll one day back
    #[serde(default = "default_key_move_left")]
    pub move_left: String,
    /// Scroll one day forward
    #[serde(default = "default_key_move_right")]
    pub move_right: String,
    /// Queue several days back at once
    #[serde(default = "default_key_fling_left")]
    pub fling_left: String,
    /// Queue several days forward at once
    #[serde(default = "default_key_fling_right")]
    pub fling_right: String,
    /// Toggle the help popup
    #[serde(default = "default_key_help")]
    pub help: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            move_left: default_key_move_left(),
            move_right: default_key_move_right(),
            fling_left: default_key_fling_left(),
            fling_right: default_key_fling_right(),
            help: default_key_help(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_move_left() -> String { "h".to_string() }
fn default_key_move_right() -> String { "l".to_string() }
fn default_key_fling_left() -> String { "H".to_string() }
fn default_key_fling_right() -> String { "L".to_string() }
fn default_key_help() -> String { "?".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("daystrip")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_frames_per_step() -> u32 {
    30
}

fn default_cell_width() -> f64 {
    9.0
}

fn default_tiles_before() -> u32 {
    3
}

fn default_tiles_after() -> u32 {
    6
}

fn default_fling_steps() -> u32 {
    25
}

fn default_label_rise() -> f64 {
    2.0
}

fn default_animation_fps() -> u32 {
    60
}

fn default_theme_name() -> String {
    "gruvbox-dark".to_string()
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from the default path or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.strip.validate()?;
        Ok(config)
    }

    /// Render as TOML
    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/daystrip/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("daystrip")
            .join("config.toml")
    }

    /// Get the log file path used while the terminal UI owns the screen
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("daystrip.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.strip.smooth_enabled);
        assert_eq!(config.strip.frames_per_step, 30);
        assert_eq!(config.strip.tiles_before, 3);
        assert_eq!(config.strip.tiles_after, 6);
        assert_eq!(config.strip.easing, EasingType::Cubic);
        assert_eq!(config.calendar.start, StartDate::Today);
        assert_eq!(config.ui.animation_fps, 60);
        assert_eq!(config.keymap.move_right, "l");
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.ui.theme.name, "gruvbox-dark");
        assert_eq!(config.strip.fling_steps, 25);
    }

    #[test]
    fn test_fixed_start_date() {
        let config = AppConfig::from_toml(
            r#"
            [calendar]
            start = { month = 6, day = 29 }
            "#,
        )
        .unwrap();
        assert_eq!(config.calendar.start, StartDate::Fixed { month: 6, day: 29 });

        let clock = config.calendar.clock().unwrap();
        assert_eq!(clock.month_index(), 5);
        assert_eq!(clock.day_of_month(), 29);
    }

    #[test]
    fn test_start_date_rejects_month_zero() {
        let config = AppConfig::from_toml("[calendar]\nstart = { month = 0, day = 1 }").unwrap();
        assert!(config.calendar.clock().is_err());
    }

    #[test]
    fn test_start_date_rejects_unknown_keyword() {
        assert!(AppConfig::from_toml("[calendar]\nstart = \"tomorrow\"").is_err());
    }

    #[test]
    fn test_month_table_override() {
        let mut doc = String::from("[calendar]\nmonths = [\n");
        for (name, days) in [
            ("Jan", 31), ("Feb", 29), ("Mar", 31), ("Apr", 30), ("May", 31), ("Jun", 30),
            ("Jul", 31), ("Aug", 31), ("Sep", 30), ("Oct", 31), ("Nov", 30), ("Dec", 31),
        ] {
            doc.push_str(&format!("  {{ name = \"{}\", days = {} }},\n", name, days));
        }
        doc.push(']');

        let config = AppConfig::from_toml(&doc).unwrap();
        let table = config.calendar.month_table().unwrap();
        assert_eq!(table.day_count(1), 29);
        assert_eq!(table.name(1), "Feb");
    }

    #[test]
    fn test_short_month_table_is_rejected() {
        let config = AppConfig::from_toml(
            "[calendar]\nmonths = [{ name = \"Only\", days = 30 }]",
        )
        .unwrap();
        assert!(config.calendar.month_table().is_err());
    }

    #[test]
    fn test_theme_accepts_string_or_map() {
        let config = AppConfig::from_toml("[ui]\ntheme = \"nord\"").unwrap();
        assert_eq!(config.ui.theme.name, "nord");

        let config = AppConfig::from_toml(
            "[ui.theme]\nname = \"dracula\"\ncolors = { accent = \"#ff0000\" }",
        )
        .unwrap();
        assert_eq!(config.ui.theme.name, "dracula");
        assert_eq!(config.ui.theme.colors.accent.as_deref(), Some("#ff0000"));
    }

    #[test]
    fn test_invalid_cell_width() {
        let err = AppConfig::from_toml("[strip]\ncell_width = 0.0").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_label_rise_bounds() {
        let err = AppConfig::from_toml("[strip]\nlabel_rise = 40000.0").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
        let err = AppConfig::from_toml("[strip]\nlabel_rise = -1.0").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));

        let config = AppConfig::from_toml("[strip]\nlabel_rise = 64.0").unwrap();
        assert_eq!(config.strip.label_rise, MAX_LABEL_RISE);
    }

    #[test]
    fn test_speed() {
        let strip = StripConfig {
            cell_width: 9.0,
            frames_per_step: 30,
            ..Default::default()
        };
        assert!((strip.speed() - 0.3).abs() < 1e-9);

        let instant = StripConfig {
            smooth_enabled: false,
            ..strip
        };
        assert!(!instant.is_smooth());
        assert!((instant.speed() - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_round_trip_through_toml() {
        let mut config = AppConfig::default();
        config.calendar.start = StartDate::Fixed { month: 1, day: 31 };
        config.strip.easing = EasingType::EaseOut;

        let text = config.to_toml().unwrap();
        let parsed = AppConfig::from_toml(&text).unwrap();
        assert_eq!(parsed.calendar.start, StartDate::Fixed { month: 1, day: 31 });
        assert_eq!(parsed.strip.easing, EasingType::EaseOut);
    }

    #[test]
    fn test_frame_interval() {
        let ui = UiConfig::default();
        assert_eq!(ui.frame_interval().as_millis(), 16);
    }
}
