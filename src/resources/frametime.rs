use std::time::Duration;

use bevy_ecs::prelude::Resource;

/// Host loop timing, refreshed once per frame by
/// [`update_frame_time`](crate::systems::time::update_frame_time).
///
/// [`FrameClock`](crate::resources::clock::FrameClock)s are fed `delta`.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct FrameTime {
    pub elapsed: Duration,
    pub delta: Duration,
    pub frame_count: u64,
}
