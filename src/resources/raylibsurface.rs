//! raylib drawing surface (feature `raylib`).
//!
//! [`TextureStore`] owns the GPU textures of loaded sheets and hands out
//! matching [`SpriteSheet`] handles; [`RaylibSurface`] resolves those handles
//! back to textures when the renderer blits.
//!
//! # Note
//! Textures must stay on the thread that created the raylib window, so the
//! store is kept out of the ECS world (or inserted as a non-send resource).

use log::debug;
use raylib::prelude::*;
use rustc_hash::FxHashMap;

use crate::components::grid::PixelRect;
use crate::components::spritesheet::SpriteSheet;
use crate::resources::sheetstore::{in_sample_size, sampled_size};
use crate::resources::surface::Surface;

#[derive(Default)]
pub struct TextureStore {
    pub map: FxHashMap<String, Texture2D>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `path` into a texture stored under `key`, downsampled with
    /// [`in_sample_size`] so it only needs to cover `req_width × req_height`.
    ///
    /// Returns the sheet handle carrying the uploaded texture's pixel size.
    pub fn load(
        &mut self,
        rl: &mut RaylibHandle,
        th: &RaylibThread,
        key: &str,
        path: &str,
        req_width: u32,
        req_height: u32,
    ) -> Result<SpriteSheet, String> {
        let mut image = Image::load_image(path)
            .map_err(|e| format!("Failed to load image '{}': {}", path, e))?;
        let (width, height) = (image.width.max(0) as u32, image.height.max(0) as u32);
        let (sampled_w, sampled_h) = sampled_size(width, height, req_width, req_height);
        if (sampled_w, sampled_h) != (width, height) {
            debug!(
                "[textures] '{}' sampled by {}: {}x{} -> {}x{}",
                key,
                in_sample_size(width, height, req_width, req_height),
                width,
                height,
                sampled_w,
                sampled_h
            );
            image.resize(sampled_w as i32, sampled_h as i32);
        }
        let texture = rl
            .load_texture_from_image(th, &image)
            .map_err(|e| format!("Failed to upload texture '{}': {}", path, e))?;
        let sheet = SpriteSheet::new(key, texture.width.max(0) as u32, texture.height.max(0) as u32);
        self.map.insert(key.to_string(), texture);
        Ok(sheet)
    }

    pub fn get(&self, key: &str) -> Option<&Texture2D> {
        self.map.get(key)
    }
}

fn to_rect(rect: PixelRect) -> Rectangle {
    Rectangle::new(
        rect.left as f32,
        rect.top as f32,
        rect.width() as f32,
        rect.height() as f32,
    )
}

/// Surface drawing into an open raylib draw scope.
pub struct RaylibSurface<'a, D: RaylibDraw> {
    d: &'a mut D,
    textures: &'a TextureStore,
    width: i32,
    height: i32,
}

impl<'a, D: RaylibDraw> RaylibSurface<'a, D> {
    pub fn new(d: &'a mut D, textures: &'a TextureStore, width: i32, height: i32) -> Self {
        Self {
            d,
            textures,
            width,
            height,
        }
    }
}

impl<D: RaylibDraw> Surface for RaylibSurface<'_, D> {
    fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    fn blit(&mut self, sheet: &SpriteSheet, src: PixelRect, dst: PixelRect) {
        if let Some(tex) = self.textures.get(&sheet.tex_key) {
            self.d.draw_texture_pro(
                tex,
                to_rect(src),
                to_rect(dst),
                Vector2::zero(),
                0.0,
                Color::WHITE,
            );
        }
    }
}
