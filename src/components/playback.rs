//! Playback parameters and the playback state enum.

use serde::{Deserialize, Serialize};

use crate::components::grid::GridConfig;

/// Default playback rate, matching the 4×4 default grid.
pub const DEFAULT_FPS: u32 = 16;

/// Lifecycle of a [`SpriteView`](crate::components::spriteview::SpriteView).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Running,
    Paused,
}

/// How an animation is played back.
///
/// `last_frame` is the inclusive linear frame index after which the frame
/// counter wraps. When unset it follows the grid's cell count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPlayback", into = "RawPlayback")]
pub struct PlaybackConfig {
    fps: u32,
    last_frame: Option<u32>,
    render_row: u32,
    fixed_row: bool,
    auto_play: bool,
}

#[derive(Serialize, Deserialize)]
#[serde(default)]
struct RawPlayback {
    fps: i32,
    last_frame: Option<i32>,
    render_row: i32,
    fixed_row: bool,
    auto_play: bool,
}

impl Default for RawPlayback {
    fn default() -> Self {
        PlaybackConfig::default().into()
    }
}

impl From<RawPlayback> for PlaybackConfig {
    fn from(raw: RawPlayback) -> Self {
        let mut config = PlaybackConfig::new(raw.fps)
            .with_render_row(raw.render_row)
            .with_fixed_row(raw.fixed_row)
            .with_auto_play(raw.auto_play);
        if let Some(last_frame) = raw.last_frame {
            config = config.with_last_frame(last_frame);
        }
        config
    }
}

impl From<PlaybackConfig> for RawPlayback {
    fn from(config: PlaybackConfig) -> Self {
        RawPlayback {
            fps: config.fps as i32,
            last_frame: config.last_frame.map(|f| f as i32),
            render_row: config.render_row as i32,
            fixed_row: config.fixed_row,
            auto_play: config.auto_play,
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            last_frame: None,
            render_row: 0,
            fixed_row: false,
            auto_play: true,
        }
    }
}

impl PlaybackConfig {
    /// Playback at `fps` frames per second, coerced to at least 1.
    pub fn new(fps: i32) -> Self {
        Self {
            fps: fps.max(1) as u32,
            ..Self::default()
        }
    }

    /// Negative values are coerced to 0.
    pub fn with_last_frame(mut self, last_frame: i32) -> Self {
        self.last_frame = Some(last_frame.max(0) as u32);
        self
    }

    /// Let `last_frame` follow the grid's cell count again.
    pub fn with_default_last_frame(mut self) -> Self {
        self.last_frame = None;
        self
    }

    pub fn with_render_row(mut self, render_row: i32) -> Self {
        self.render_row = render_row.max(0) as u32;
        self
    }

    pub fn with_fixed_row(mut self, fixed_row: bool) -> Self {
        self.fixed_row = fixed_row;
        self
    }

    pub fn with_auto_play(mut self, auto_play: bool) -> Self {
        self.auto_play = auto_play;
        self
    }

    pub fn with_fps(mut self, fps: i32) -> Self {
        self.fps = fps.max(1) as u32;
        self
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn render_row(&self) -> u32 {
        self.render_row
    }

    pub fn fixed_row(&self) -> bool {
        self.fixed_row
    }

    pub fn auto_play(&self) -> bool {
        self.auto_play
    }

    /// Explicit `last_frame`, if one was configured.
    pub fn explicit_last_frame(&self) -> Option<u32> {
        self.last_frame
    }

    /// Effective `last_frame` for `grid`.
    pub fn last_frame_for(&self, grid: &GridConfig) -> u32 {
        self.last_frame.unwrap_or_else(|| grid.cell_count())
    }

    /// Tick period in whole milliseconds, `floor(1000 / fps)`.
    ///
    /// Zero once fps exceeds 1000; such a rate cannot be scheduled.
    pub fn period_millis(&self) -> u64 {
        1000 / self.fps as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_is_coerced_to_at_least_one() {
        assert_eq!(PlaybackConfig::new(0).fps(), 1);
        assert_eq!(PlaybackConfig::new(-20).fps(), 1);
    }

    #[test]
    fn period_is_floor_of_thousand_over_fps() {
        assert_eq!(PlaybackConfig::new(10).period_millis(), 100);
        assert_eq!(PlaybackConfig::new(3).period_millis(), 333);
        assert_eq!(PlaybackConfig::new(1500).period_millis(), 0);
    }

    #[test]
    fn last_frame_defaults_to_cell_count() {
        let config = PlaybackConfig::default();
        assert_eq!(config.last_frame_for(&GridConfig::new(8, 4)), 32);
        let config = config.with_last_frame(5);
        assert_eq!(config.last_frame_for(&GridConfig::new(8, 4)), 5);
        assert_eq!(config.with_last_frame(-1).explicit_last_frame(), Some(0));
    }

    #[test]
    fn defaults_play_sixteen_fps_on_load() {
        let config = PlaybackConfig::default();
        assert_eq!(config.fps(), 16);
        assert!(config.auto_play());
        assert!(!config.fixed_row());
        assert_eq!(config.render_row(), 0);
    }

    #[test]
    fn deserialize_fills_missing_fields_with_defaults() {
        let config: PlaybackConfig = serde_json::from_str(r#"{"fps": 0, "fixed_row": true}"#).unwrap();
        assert_eq!(config.fps(), 1);
        assert!(config.fixed_row());
        assert!(config.auto_play());
        assert_eq!(config.explicit_last_frame(), None);
    }
}
