//! Sprite configuration change detection system.
//!
//! Watches [`SpriteViewConfig`] and pushes it into every
//! [`SpriteView`] when it is inserted or modified.

use bevy_ecs::prelude::*;
use log::info;

use crate::components::playback::PlaybackState;
use crate::components::spriteview::SpriteView;
use crate::resources::sheetstore::SheetStore;
use crate::resources::spriteconfig::SpriteViewConfig;

/// Apply a changed [`SpriteViewConfig`] to all sprite views.
///
/// The sheet is looked up in [`SheetStore`] first, then taken from the
/// size declared in the configuration. Views are reconfigured in place:
/// a running view restarts only if its frame rate changed, and a stopped
/// view starts when the configuration asks for auto-play.
pub fn apply_sprite_config_changes(
    maybe_config: Option<Res<SpriteViewConfig>>,
    sheets: Option<Res<SheetStore>>,
    mut views: Query<&mut SpriteView>,
) {
    let Some(config) = maybe_config else {
        return;
    };
    if !(config.is_changed() || config.is_added()) {
        return;
    }

    let sheet = sheets
        .as_ref()
        .and_then(|store| store.get(&config.sheet_key).cloned())
        .or_else(|| config.declared_sheet());

    for mut view in views.iter_mut() {
        let restart = view.is_running() && view.fps() != config.playback.fps();
        view.set_image(sheet.clone());
        view.reconfigure(config.grid, config.playback);
        let auto_start = view.state() == PlaybackState::Stopped && config.playback.auto_play();
        if restart || auto_start {
            view.start();
        }
    }
    info!("Sprite config applied.");
}
