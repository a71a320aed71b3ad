//! Frame time update.
//!
//! Updates the shared [`FrameTime`](crate::resources::frametime::FrameTime)
//! resource once per host frame.
use std::time::Duration;

use bevy_ecs::prelude::*;

use crate::resources::frametime::FrameTime;

/// Record a frame of `dt` seconds.
///
/// Negative or non-finite deltas (a clock going backwards, a first frame
/// with no previous timestamp) count as zero.
pub fn update_frame_time(world: &mut World, dt: f32) {
    let delta = Duration::try_from_secs_f32(dt).unwrap_or(Duration::ZERO);
    let mut ft = world.resource_mut::<FrameTime>();
    ft.elapsed += delta;
    ft.delta = delta;
    ft.frame_count += 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_elapsed_and_counts_frames() {
        let mut world = World::new();
        world.init_resource::<FrameTime>();
        update_frame_time(&mut world, 0.5);
        update_frame_time(&mut world, 0.25);
        let ft = world.resource::<FrameTime>();
        assert_eq!(ft.delta, Duration::from_millis(250));
        assert_eq!(ft.elapsed, Duration::from_millis(750));
        assert_eq!(ft.frame_count, 2);
    }

    #[test]
    fn bogus_delta_counts_as_zero() {
        let mut world = World::new();
        world.init_resource::<FrameTime>();
        update_frame_time(&mut world, -1.0);
        update_frame_time(&mut world, f32::NAN);
        let ft = world.resource::<FrameTime>();
        assert_eq!(ft.elapsed, Duration::ZERO);
        assert_eq!(ft.frame_count, 2);
    }
}
