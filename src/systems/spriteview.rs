//! Sprite view notification systems.
//!
//! - [`sprite_view_notify_system`] delivers each view's queued events to its
//!   listener and republishes them as [`SpriteViewMessage`]s.
//! - [`update_sprite_view_messages`] advances the message queue so readers
//!   see this frame's messages.
//!
//! Run the notify system after [`render_pass`](crate::systems::render::render_pass)
//! so per-frame events of the current frame go out in the same update.

use bevy_ecs::prelude::*;

use crate::components::spriteview::SpriteView;
use crate::events::spriteview::SpriteViewMessage;

pub fn sprite_view_notify_system(
    mut query: Query<(Entity, &mut SpriteView)>,
    mut writer: MessageWriter<SpriteViewMessage>,
) {
    for (entity, mut view) in query.iter_mut() {
        let delivered = view.dispatch_notifications();
        writer.write_batch(
            delivered
                .into_iter()
                .map(|event| SpriteViewMessage { entity, event }),
        );
    }
}

/// Advance the ECS message queue for [`SpriteViewMessage`].
pub fn update_sprite_view_messages(mut msgs: ResMut<Messages<SpriteViewMessage>>) {
    msgs.update();
}
