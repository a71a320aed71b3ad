use bevy_ecs::prelude::Component;

use crate::components::grid::PixelRect;

/// Region of the host surface a [`SpriteView`](crate::components::spriteview::SpriteView)
/// entity fills, in surface pixels.
///
/// Views without bounds fill the whole surface.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewBounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ViewBounds {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn rect(&self) -> PixelRect {
        PixelRect::new(
            self.x,
            self.y,
            self.x.saturating_add(self.width),
            self.y.saturating_add(self.height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_spans_origin_plus_size() {
        let bounds = ViewBounds::new(64, 16, 32, 48);
        assert_eq!(bounds.rect(), PixelRect::new(64, 16, 96, 64));
    }

    #[test]
    fn rect_saturates_instead_of_overflowing() {
        let bounds = ViewBounds::new(i32::MAX - 5, -10, 100, i32::MAX);
        let rect = bounds.rect();
        assert_eq!(rect.right, i32::MAX);
        assert_eq!(rect.bottom, i32::MAX - 10);
    }
}
