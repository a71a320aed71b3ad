//! Sprite view configuration resource.
//!
//! Describes one animated sprite sheet: which sheet, how it is divided and
//! how it is played back. Values come from an INI file, a JSON document, or
//! the defaults below. Every value is coerced into range on load, so a
//! loaded configuration is always usable by
//! [`SpriteView::reconfigure`](crate::components::spriteview::SpriteView::reconfigure).
//!
//! # Configuration File Format
//!
//! ```ini
//! [sheet]
//! key = tile
//! path = assets/tile.png
//! width = 600
//! height = 600
//!
//! [grid]
//! columns = 8
//! rows = 8
//!
//! [playback]
//! fps = 16
//! ; last_frame defaults to columns * rows
//! last_frame = 64
//! render_row = 0
//! fixed_row = false
//! auto_play = true
//!
//! [window]
//! width = 600
//! height = 600
//! ```

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use serde::{Deserialize, Serialize};

use crate::components::grid::GridConfig;
use crate::components::playback::PlaybackConfig;
use crate::components::spritesheet::SpriteSheet;
use crate::error::ConfigError;

const DEFAULT_SHEET_KEY: &str = "tile";
const DEFAULT_SHEET_PATH: &str = "./assets/tile.png";
const DEFAULT_WINDOW_WIDTH: u32 = 600;
const DEFAULT_WINDOW_HEIGHT: u32 = 600;
const DEFAULT_CONFIG_PATH: &str = "./spriterunner.ini";

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteViewConfig {
    /// Key of the sheet in the [`SheetStore`](crate::resources::sheetstore::SheetStore).
    pub sheet_key: String,
    /// Image file the windowed host decodes.
    pub sheet_path: PathBuf,
    /// Intrinsic sheet size, used when no decoder reports one.
    pub sheet_width: u32,
    pub sheet_height: u32,
    pub grid: GridConfig,
    pub playback: PlaybackConfig,
    pub window_width: u32,
    pub window_height: u32,
    /// Where [`SpriteViewConfig::load_from_file`] reads from.
    #[serde(skip)]
    pub config_path: PathBuf,
}

impl Default for SpriteViewConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SpriteViewConfig {
    pub fn new() -> Self {
        Self {
            sheet_key: DEFAULT_SHEET_KEY.to_string(),
            sheet_path: PathBuf::from(DEFAULT_SHEET_PATH),
            sheet_width: 0,
            sheet_height: 0,
            grid: GridConfig::default(),
            playback: PlaybackConfig::default(),
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Sheet handle declared by the configuration, if it has a size.
    pub fn declared_sheet(&self) -> Option<SpriteSheet> {
        (self.sheet_width > 0 && self.sheet_height > 0).then(|| {
            SpriteSheet::new(self.sheet_key.as_str(), self.sheet_width, self.sheet_height)
        })
    }

    /// Load values from the INI file at `config_path`.
    ///
    /// Missing keys keep their current values.
    pub fn load_from_file(&mut self) -> Result<(), ConfigError> {
        let mut ini = Ini::new();
        ini.load(&self.config_path)
            .map_err(|message| ConfigError::Load {
                path: self.config_path.clone(),
                message,
            })?;
        self.apply_ini(&ini)?;
        info!("Loaded sprite config from {:?}", self.config_path);
        Ok(())
    }

    /// Load values from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), ConfigError> {
        let mut ini = Ini::new();
        ini.read(text.to_string())
            .map_err(|message| ConfigError::Parse { message })?;
        self.apply_ini(&ini)
    }

    fn apply_ini(&mut self, ini: &Ini) -> Result<(), ConfigError> {
        // [sheet]
        if let Some(key) = ini.get("sheet", "key") {
            self.sheet_key = key;
        }
        if let Some(path) = ini.get("sheet", "path") {
            self.sheet_path = PathBuf::from(path);
        }
        if let Some(width) = get_uint(ini, "sheet", "width")? {
            self.sheet_width = width;
        }
        if let Some(height) = get_uint(ini, "sheet", "height")? {
            self.sheet_height = height;
        }

        // [grid]
        let columns = get_int(ini, "grid", "columns")?.unwrap_or(self.grid.columns() as i32);
        let rows = get_int(ini, "grid", "rows")?.unwrap_or(self.grid.rows() as i32);
        self.grid = GridConfig::new(columns, rows);

        // [playback]
        let mut playback = self.playback;
        if let Some(fps) = get_int(ini, "playback", "fps")? {
            playback = playback.with_fps(fps);
        }
        if let Some(last_frame) = get_int(ini, "playback", "last_frame")? {
            playback = playback.with_last_frame(last_frame);
        }
        if let Some(render_row) = get_int(ini, "playback", "render_row")? {
            playback = playback.with_render_row(render_row);
        }
        if let Some(fixed_row) = get_bool(ini, "playback", "fixed_row")? {
            playback = playback.with_fixed_row(fixed_row);
        }
        if let Some(auto_play) = get_bool(ini, "playback", "auto_play")? {
            playback = playback.with_auto_play(auto_play);
        }
        self.playback = playback;

        // [window]
        if let Some(width) = get_uint(ini, "window", "width")? {
            self.window_width = width;
        }
        if let Some(height) = get_uint(ini, "window", "height")? {
            self.window_height = height;
        }

        info!(
            "Sprite config: sheet='{}' {}x{} grid, fps={}, last_frame={}, fixed_row={}, auto_play={}",
            self.sheet_key,
            self.grid.columns(),
            self.grid.rows(),
            self.playback.fps(),
            self.playback.last_frame_for(&self.grid),
            self.playback.fixed_row(),
            self.playback.auto_play()
        );
        Ok(())
    }

    /// Save to the INI file at `config_path`, creating it if needed.
    pub fn save_to_file(&self) -> Result<(), ConfigError> {
        let mut ini = Ini::new();

        ini.set("sheet", "key", Some(self.sheet_key.clone()));
        ini.set(
            "sheet",
            "path",
            Some(self.sheet_path.to_string_lossy().into_owned()),
        );
        ini.set("sheet", "width", Some(self.sheet_width.to_string()));
        ini.set("sheet", "height", Some(self.sheet_height.to_string()));

        ini.set("grid", "columns", Some(self.grid.columns().to_string()));
        ini.set("grid", "rows", Some(self.grid.rows().to_string()));

        ini.set("playback", "fps", Some(self.playback.fps().to_string()));
        if let Some(last_frame) = self.playback.explicit_last_frame() {
            ini.set("playback", "last_frame", Some(last_frame.to_string()));
        }
        ini.set(
            "playback",
            "render_row",
            Some(self.playback.render_row().to_string()),
        );
        ini.set(
            "playback",
            "fixed_row",
            Some(self.playback.fixed_row().to_string()),
        );
        ini.set(
            "playback",
            "auto_play",
            Some(self.playback.auto_play().to_string()),
        );

        ini.set("window", "width", Some(self.window_width.to_string()));
        ini.set("window", "height", Some(self.window_height.to_string()));

        ini.write(&self.config_path)
            .map_err(|source| ConfigError::Save {
                path: self.config_path.clone(),
                source,
            })?;

        info!("Saved sprite config to {:?}", self.config_path);
        Ok(())
    }

    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn invalid(section: &str, key: &str, message: String) -> ConfigError {
    ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        message,
    }
}

fn get_int(ini: &Ini, section: &str, key: &str) -> Result<Option<i32>, ConfigError> {
    let value = ini
        .getint(section, key)
        .map_err(|message| invalid(section, key, message))?;
    Ok(value.map(|v| v.clamp(i32::MIN as i64, i32::MAX as i64) as i32))
}

fn get_uint(ini: &Ini, section: &str, key: &str) -> Result<Option<u32>, ConfigError> {
    let value = ini
        .getuint(section, key)
        .map_err(|message| invalid(section, key, message))?;
    Ok(value.map(|v| v.min(u32::MAX as u64) as u32))
}

fn get_bool(ini: &Ini, section: &str, key: &str) -> Result<Option<bool>, ConfigError> {
    ini.getbool(section, key)
        .map_err(|message| invalid(section, key, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "
[sheet]
key = hero
path = assets/hero.png
width = 800
height = 400

[grid]
columns = 8
rows = 4

[playback]
fps = 12
render_row = 2
fixed_row = true
auto_play = false
";

    #[test]
    fn ini_values_override_defaults() {
        let mut config = SpriteViewConfig::new();
        config.load_from_str(SAMPLE).unwrap();
        assert_eq!(config.sheet_key, "hero");
        assert_eq!(config.sheet_path, PathBuf::from("assets/hero.png"));
        assert_eq!(config.grid, GridConfig::new(8, 4));
        assert_eq!(config.playback.fps(), 12);
        assert_eq!(config.playback.render_row(), 2);
        assert!(config.playback.fixed_row());
        assert!(!config.playback.auto_play());
        // untouched
        assert_eq!(config.window_width, 600);
        assert_eq!(config.playback.last_frame_for(&config.grid), 32);
        assert_eq!(
            config.declared_sheet(),
            Some(SpriteSheet::new("hero", 800, 400))
        );
    }

    #[test]
    fn ini_values_are_coerced() {
        let mut config = SpriteViewConfig::new();
        config
            .load_from_str("[grid]\ncolumns = 0\nrows = -4\n[playback]\nfps = -1\nlast_frame = -3\n")
            .unwrap();
        assert_eq!(config.grid, GridConfig::new(1, 1));
        assert_eq!(config.playback.fps(), 1);
        assert_eq!(config.playback.explicit_last_frame(), Some(0));
    }

    #[test]
    fn malformed_value_is_reported() {
        let mut config = SpriteViewConfig::new();
        let err = config
            .load_from_str("[grid]\ncolumns = many\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "columns"));
    }

    #[test]
    fn missing_file_is_reported() {
        let mut config = SpriteViewConfig::with_path("/nonexistent/spriterunner.ini");
        assert!(matches!(
            config.load_from_file(),
            Err(ConfigError::Load { .. })
        ));
    }

    #[test]
    fn saved_file_loads_back() {
        let path = std::env::temp_dir().join(format!(
            "spriterunner-config-{}.ini",
            std::process::id()
        ));
        let mut original = SpriteViewConfig::with_path(&path);
        original.load_from_str(SAMPLE).unwrap();
        original.playback = original.playback.with_last_frame(20);
        original.save_to_file().unwrap();

        let mut loaded = SpriteViewConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, original);
    }

    #[test]
    fn json_missing_fields_take_defaults() {
        let config = SpriteViewConfig::from_json_str(
            r#"{"sheet_key": "coin", "grid": {"columns": 6, "rows": 1}}"#,
        )
        .unwrap();
        assert_eq!(config.sheet_key, "coin");
        assert_eq!(config.grid.cell_count(), 6);
        assert_eq!(config.playback, PlaybackConfig::default());
        assert!(config.declared_sheet().is_none());

        let text = config.to_json_string().unwrap();
        assert_eq!(SpriteViewConfig::from_json_str(&text).unwrap().grid, config.grid);
    }
}
