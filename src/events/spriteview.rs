//! Sprite view notifications.
//!
//! A [`SpriteView`] queues an event whenever playback starts, stops, or a
//! frame has been drawn. Nothing is delivered at that point: the host calls
//! [`SpriteView::dispatch_notifications`] from the context it renders on,
//! which forwards each event to the registered [`StateChangeListener`].
//!
//! In an ECS host, [`sprite_view_notify_system`](crate::systems::spriteview::sprite_view_notify_system)
//! dispatches for every view and also writes a [`SpriteViewMessage`] per
//! event.
//!
//! # Example
//!
//! ```ignore
//! struct Status;
//!
//! impl StateChangeListener for Status {
//!     fn on_update_frame(&mut self, view: &SpriteView) {
//!         log::info!("frame {}", view.current_frame());
//!     }
//! }
//!
//! let view = SpriteView::new().with_listener(Status);
//! ```

use std::collections::VecDeque;

use bevy_ecs::message::Message;
use bevy_ecs::prelude::Entity;

use crate::components::spriteview::SpriteView;

/// What happened to a sprite view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteViewEvent {
    Started,
    Stopped,
    FrameUpdated,
}

/// ECS message carrying a delivered [`SpriteViewEvent`].
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteViewMessage {
    /// Entity holding the [`SpriteView`].
    pub entity: Entity,
    pub event: SpriteViewEvent,
}

/// Observer of a sprite view's lifecycle. Every hook defaults to a no-op.
///
/// Hooks receive the view read-only; they cannot change playback.
pub trait StateChangeListener: Send + Sync {
    fn on_start(&mut self, _view: &SpriteView) {}
    fn on_stop(&mut self, _view: &SpriteView) {}
    fn on_update_frame(&mut self, _view: &SpriteView) {}
}

impl SpriteViewEvent {
    pub(crate) fn deliver(self, listener: &mut dyn StateChangeListener, view: &SpriteView) {
        match self {
            SpriteViewEvent::Started => listener.on_start(view),
            SpriteViewEvent::Stopped => listener.on_stop(view),
            SpriteViewEvent::FrameUpdated => listener.on_update_frame(view),
        }
    }
}

/// Pending events plus the optional listener they go to.
#[derive(Default)]
pub struct Notifier {
    pending: VecDeque<SpriteViewEvent>,
    listener: Option<Box<dyn StateChangeListener>>,
}

impl Notifier {
    pub fn post(&mut self, event: SpriteViewEvent) {
        self.pending.push_back(event);
    }

    pub fn pending(&self) -> impl Iterator<Item = &SpriteViewEvent> {
        self.pending.iter()
    }

    pub fn take_pending(&mut self) -> VecDeque<SpriteViewEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn set_listener(&mut self, listener: Option<Box<dyn StateChangeListener>>) {
        self.listener = listener;
    }

    pub fn has_listener(&self) -> bool {
        self.listener.is_some()
    }

    pub(crate) fn take_listener(&mut self) -> Option<Box<dyn StateChangeListener>> {
        self.listener.take()
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("pending", &self.pending)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}
