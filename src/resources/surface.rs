//! Drawing surfaces.
//!
//! The renderer never talks to a graphics API directly. It asks a
//! [`Surface`] for its size and hands it one blit per frame: a sheet, a
//! source rectangle in sheet pixels, and a destination rectangle in surface
//! pixels. Hosts implement the trait on top of whatever they draw with.
//!
//! - [`RecordingSurface`] keeps blits in memory (tests, headless runs).
//! - [`Viewport`] confines another surface to a sub-rectangle.
//! - `RaylibSurface` (feature `raylib`) draws with raylib textures.

use std::sync::Arc;

use crate::components::grid::PixelRect;
use crate::components::spritesheet::SpriteSheet;

pub trait Surface {
    /// Drawable width and height in pixels.
    fn size(&self) -> (i32, i32);

    /// Copy `src` of `sheet` into `dst`, scaling as needed.
    fn blit(&mut self, sheet: &SpriteSheet, src: PixelRect, dst: PixelRect);
}

/// One recorded [`Surface::blit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blit {
    pub tex_key: Arc<str>,
    pub src: PixelRect,
    pub dst: PixelRect,
}

/// In-memory surface that remembers every blit it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub width: i32,
    pub height: i32,
    pub blits: Vec<Blit>,
}

impl RecordingSurface {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            blits: Vec::new(),
        }
    }

    pub fn last(&self) -> Option<&Blit> {
        self.blits.last()
    }

    pub fn clear(&mut self) {
        self.blits.clear();
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    fn blit(&mut self, sheet: &SpriteSheet, src: PixelRect, dst: PixelRect) {
        self.blits.push(Blit {
            tex_key: sheet.tex_key.clone(),
            src,
            dst,
        });
    }
}

/// A sub-rectangle of another surface.
///
/// Reports the sub-rectangle's size and shifts destinations by its origin,
/// so a view can "fill the surface" while only covering its own bounds.
pub struct Viewport<'a, S: Surface + ?Sized> {
    inner: &'a mut S,
    bounds: PixelRect,
}

impl<'a, S: Surface + ?Sized> Viewport<'a, S> {
    pub fn new(inner: &'a mut S, bounds: PixelRect) -> Self {
        Self { inner, bounds }
    }
}

impl<S: Surface + ?Sized> Surface for Viewport<'_, S> {
    fn size(&self) -> (i32, i32) {
        (self.bounds.width(), self.bounds.height())
    }

    fn blit(&mut self, sheet: &SpriteSheet, src: PixelRect, dst: PixelRect) {
        self.inner
            .blit(sheet, src, dst.translate(self.bounds.left, self.bounds.top));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_offsets_destination() {
        let sheet = SpriteSheet::new("s", 10, 10);
        let mut surface = RecordingSurface::new(640, 480);
        {
            let mut viewport = Viewport::new(&mut surface, PixelRect::new(100, 50, 164, 114));
            assert_eq!(viewport.size(), (64, 64));
            viewport.blit(&sheet, PixelRect::from_size(5, 5), PixelRect::from_size(64, 64));
        }
        let blit = surface.last().unwrap();
        assert_eq!(blit.dst, PixelRect::new(100, 50, 164, 114));
        assert_eq!(&*blit.tex_key, "s");
    }

    #[test]
    fn recording_surface_clear_forgets_blits() {
        let sheet = SpriteSheet::new("s", 10, 10);
        let mut surface = RecordingSurface::new(32, 32);
        surface.blit(&sheet, PixelRect::from_size(5, 5), PixelRect::from_size(32, 32));
        assert_eq!(surface.blits.len(), 1);
        surface.clear();
        assert!(surface.last().is_none());
        assert_eq!(surface.size(), (32, 32));
    }

    #[test]
    fn viewport_at_extreme_offset_saturates() {
        let sheet = SpriteSheet::new("s", 10, 10);
        let mut surface = RecordingSurface::new(64, 64);
        {
            let bounds = PixelRect::new(i32::MAX - 10, 0, i32::MAX, 10);
            let mut viewport = Viewport::new(&mut surface, bounds);
            viewport.blit(&sheet, PixelRect::from_size(5, 5), PixelRect::from_size(64, 64));
        }
        let dst = surface.last().unwrap().dst;
        assert_eq!(dst.left, i32::MAX - 10);
        assert_eq!(dst.right, i32::MAX);
    }
}
