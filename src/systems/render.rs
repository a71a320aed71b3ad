//! Sprite view rendering.
//!
//! - [`render_frame`] draws the active cell of one view and, while the view
//!   is running, moves it to the next cell.
//! - [`repaint`] re-issues the last blit, for hosts that clear the screen
//!   every frame but only tick a few times per second.
//! - [`render_pass`] draws every [`SpriteView`] entity of a world.

use bevy_ecs::prelude::*;

use crate::components::grid::{PixelRect, cell_bounds};
use crate::components::spriteview::SpriteView;
use crate::components::viewbounds::ViewBounds;
use crate::events::spriteview::SpriteViewEvent;
use crate::resources::surface::{Surface, Viewport};

/// Draw the current cell of `view` stretched over all of `surface`.
///
/// Returns `false` when nothing could be drawn (no sheet, empty cells).
/// A running view advances to its next grid cell after the blit and queues
/// [`SpriteViewEvent::FrameUpdated`]; a stopped or paused view is drawn in
/// place.
pub fn render_frame<S: Surface + ?Sized>(view: &mut SpriteView, surface: &mut S) -> bool {
    view.take_redraw_request();

    let Some(sheet) = view.sheet().cloned() else {
        return false;
    };
    let (cell_w, cell_h) = (view.sprite_width(), view.sprite_height());
    if cell_w <= 0.0 || cell_h <= 0.0 {
        return false;
    }

    let src = cell_bounds(view.render_column(), view.render_row(), cell_w, cell_h);
    let (width, height) = surface.size();
    surface.blit(&sheet, src, PixelRect::from_size(width, height));
    view.set_last_blit(Some(src));

    if view.is_running() {
        view.sequencer_mut().advance_grid_position();
        view.notifier_mut().post(SpriteViewEvent::FrameUpdated);
    }
    true
}

/// Draw the cell `view` showed last time, without advancing anything.
pub fn repaint<S: Surface + ?Sized>(view: &SpriteView, surface: &mut S) -> bool {
    match (view.sheet(), view.last_blit()) {
        (Some(sheet), Some(src)) => {
            let (width, height) = surface.size();
            surface.blit(sheet, src, PixelRect::from_size(width, height));
            true
        }
        _ => false,
    }
}

/// Draw every sprite view in `world`.
///
/// Views that asked for a redraw go through [`render_frame`]; the others are
/// repainted as they were. Each view fills its [`ViewBounds`], or the whole
/// surface when it has none.
pub fn render_pass<S: Surface + ?Sized>(world: &mut World, surface: &mut S) {
    let (width, height) = surface.size();
    let full = PixelRect::from_size(width, height);

    let mut query = world.query::<(&mut SpriteView, Option<&ViewBounds>)>();
    for (mut view, bounds) in query.iter_mut(world) {
        let rect = bounds.map(|b| b.rect()).unwrap_or(full);
        let mut viewport = Viewport::new(&mut *surface, rect);
        if view.redraw_requested() {
            render_frame(&mut *view, &mut viewport);
        } else {
            repaint(&*view, &mut viewport);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::grid::GridConfig;
    use crate::components::playback::PlaybackConfig;
    use crate::components::spritesheet::SpriteSheet;
    use crate::resources::clock::FrameClock;
    use crate::resources::surface::RecordingSurface;

    fn view(width: u32, height: u32, columns: i32, rows: i32) -> SpriteView {
        SpriteView::new().with_clock(FrameClock::new()).configured(
            Some(SpriteSheet::new("sheet", width, height)),
            GridConfig::new(columns, rows),
            PlaybackConfig::default().with_auto_play(false),
        )
    }

    #[test]
    fn stopped_view_draws_preview_in_place() {
        let mut view = view(400, 400, 4, 4);
        let mut surface = RecordingSurface::new(200, 100);

        assert!(render_frame(&mut view, &mut surface));
        let blit = surface.last().unwrap();
        assert_eq!(blit.src, PixelRect::new(0, 0, 100, 100));
        assert_eq!(blit.dst, PixelRect::new(0, 0, 200, 100));
        assert_eq!(view.render_column(), 0);
        assert!(view.pending_events().is_empty());
        assert!(!view.redraw_requested());
    }

    #[test]
    fn running_view_advances_after_draw() {
        let mut view = view(400, 400, 4, 4);
        let mut surface = RecordingSurface::new(100, 100);
        view.start();
        view.tick();

        render_frame(&mut view, &mut surface);
        assert_eq!(surface.last().unwrap().src, PixelRect::new(0, 0, 100, 100));
        assert_eq!(view.render_column(), 1);
        assert_eq!(
            view.pending_events(),
            vec![SpriteViewEvent::Started, SpriteViewEvent::FrameUpdated]
        );
    }

    #[test]
    fn draws_the_addressed_cell() {
        let mut view = view(800, 400, 8, 4);
        let mut surface = RecordingSurface::new(100, 100);
        view.start();
        for _ in 0..11 {
            render_frame(&mut view, &mut surface);
        }
        assert_eq!((view.render_column(), view.render_row()), (3, 1));
        render_frame(&mut view, &mut surface);
        assert_eq!(surface.last().unwrap().src, PixelRect::new(300, 100, 400, 200));
    }

    #[test]
    fn grid_wraps_home_after_every_cell_is_drawn() {
        let mut view = view(300, 200, 3, 2);
        let mut surface = RecordingSurface::new(10, 10);
        view.start();
        for _ in 0..6 {
            render_frame(&mut view, &mut surface);
        }
        assert_eq!((view.render_column(), view.render_row()), (0, 0));
        assert_eq!(surface.blits.len(), 6);
    }

    #[test]
    fn paused_view_is_drawn_without_advancing() {
        let mut view = view(400, 400, 4, 4);
        let mut surface = RecordingSurface::new(10, 10);
        view.start();
        view.tick();
        render_frame(&mut view, &mut surface);
        view.pause();
        render_frame(&mut view, &mut surface);
        render_frame(&mut view, &mut surface);
        assert_eq!(view.render_column(), 1);
        assert_eq!(surface.last().unwrap().src, PixelRect::new(100, 0, 200, 100));
    }

    #[test]
    fn nothing_is_drawn_without_a_usable_sheet() {
        let mut surface = RecordingSurface::new(10, 10);

        let mut empty = SpriteView::new().with_clock(FrameClock::new());
        assert!(!render_frame(&mut empty, &mut surface));

        let mut zero = view(0, 0, 4, 4);
        assert!(!render_frame(&mut zero, &mut surface));

        assert!(surface.blits.is_empty());
    }

    #[test]
    fn repaint_repeats_last_blit() {
        let mut view = view(400, 400, 4, 4);
        let mut surface = RecordingSurface::new(10, 10);
        assert!(!repaint(&view, &mut surface));

        view.start();
        render_frame(&mut view, &mut surface);
        assert!(repaint(&view, &mut surface));
        assert_eq!(surface.blits[0], surface.blits[1]);
        assert_eq!(view.render_column(), 1);
    }

    #[test]
    fn render_pass_fills_each_view_bounds() {
        let mut world = World::new();
        world.spawn((view(400, 400, 4, 4), ViewBounds::new(10, 20, 50, 50)));
        world.spawn(view(400, 400, 4, 4));
        let mut surface = RecordingSurface::new(320, 240);

        render_pass(&mut world, &mut surface);

        let mut dsts: Vec<PixelRect> = surface.blits.iter().map(|b| b.dst).collect();
        dsts.sort_by_key(|r| r.left);
        assert_eq!(
            dsts,
            vec![PixelRect::new(0, 0, 320, 240), PixelRect::new(10, 20, 60, 70)]
        );
    }

    #[test]
    fn render_pass_only_advances_on_request() {
        let mut world = World::new();
        let mut sprite = view(400, 400, 4, 4);
        sprite.start();
        let entity = world.spawn(sprite).id();
        let mut surface = RecordingSurface::new(10, 10);

        // start() asked for a redraw, the next two passes repaint
        for _ in 0..3 {
            render_pass(&mut world, &mut surface);
        }
        assert_eq!(surface.blits.len(), 3);
        assert_eq!(world.get::<SpriteView>(entity).unwrap().render_column(), 1);
    }
}
