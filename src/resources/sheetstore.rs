//! Sprite-sheet registry.
//!
//! Hosts decode images themselves and register the resulting
//! [`SpriteSheet`] handles here under a string key, so configuration can
//! refer to sheets by name.

use bevy_ecs::prelude::Resource;
use log::info;
use rustc_hash::FxHashMap;

use crate::components::spritesheet::SpriteSheet;

#[derive(Resource, Default, Debug)]
pub struct SheetStore {
    pub map: FxHashMap<String, SpriteSheet>,
}

impl SheetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sheet under its own texture key.
    pub fn insert(&mut self, sheet: SpriteSheet) {
        info!(
            "[sheets] registered '{}' ({}x{})",
            sheet.tex_key, sheet.width, sheet.height
        );
        self.map.insert(sheet.tex_key.to_string(), sheet);
    }

    pub fn get(&self, key: &str) -> Option<&SpriteSheet> {
        self.map.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<SpriteSheet> {
        self.map.remove(key)
    }
}

/// Integer downsampling factor for decoding a `width × height` image that
/// only needs to cover `req_width × req_height`.
///
/// 1 when the image already fits, otherwise the smaller of the rounded
/// height and width ratios, so the decoded image never ends up smaller than
/// requested along both axes.
pub fn in_sample_size(width: u32, height: u32, req_width: u32, req_height: u32) -> u32 {
    if req_width == 0 || req_height == 0 {
        return 1;
    }
    if height > req_height || width > req_width {
        let height_ratio = (height as f32 / req_height as f32).round() as u32;
        let width_ratio = (width as f32 / req_width as f32).round() as u32;
        height_ratio.min(width_ratio).max(1)
    } else {
        1
    }
}

/// Pixel size of a `width × height` image once decoded for a
/// `req_width × req_height` target: each side divided by
/// [`in_sample_size`], never below one pixel.
pub fn sampled_size(width: u32, height: u32, req_width: u32, req_height: u32) -> (u32, u32) {
    let sample = in_sample_size(width, height, req_width, req_height);
    ((width / sample).max(1), (height / sample).max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_round_trip_by_key() {
        let mut store = SheetStore::new();
        store.insert(SpriteSheet::new("tile", 600, 600));
        assert_eq!(store.get("tile").map(|s| s.width), Some(600));
        assert!(store.get("missing").is_none());
        assert!(store.remove("tile").is_some());
        assert!(store.get("tile").is_none());
    }

    #[test]
    fn sample_size_is_one_when_image_fits() {
        assert_eq!(in_sample_size(500, 400, 600, 600), 1);
        assert_eq!(in_sample_size(600, 600, 600, 600), 1);
    }

    #[test]
    fn sample_size_uses_smaller_rounded_ratio() {
        assert_eq!(in_sample_size(2400, 1200, 600, 600), 2);
        assert_eq!(in_sample_size(2048, 2048, 600, 600), 3);
    }

    #[test]
    fn sample_size_never_drops_below_one() {
        // one axis barely over, the other well under
        assert_eq!(in_sample_size(700, 100, 600, 600), 1);
        assert_eq!(in_sample_size(10, 10, 0, 0), 1);
    }

    #[test]
    fn sampled_size_divides_both_sides() {
        assert_eq!(sampled_size(2048, 2048, 600, 600), (682, 682));
        assert_eq!(sampled_size(2400, 1200, 600, 600), (1200, 600));
        assert_eq!(sampled_size(500, 400, 600, 600), (500, 400));
    }
}
