//! Clock systems.
//!
//! - [`timer_thread`] is the body of a [`ThreadedClock`](crate::resources::clock::ThreadedClock)
//!   timer. It runs on its own OS thread and only posts ticks.
//! - [`sprite_view_clock_system`] drains due ticks for every
//!   [`SpriteView`] on the schedule's thread, which is where the frame
//!   sequencers are advanced.

use std::time::Duration;

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, TrySendError, select, tick};
use log::debug;

use crate::components::spriteview::SpriteView;
use crate::resources::frametime::FrameTime;

/// Entry point of a clock's timer thread.
///
/// Posts one tick right away, then one per `period`, into `tx_tick`. Returns
/// when `rx_stop` receives a message or is disconnected, or when the tick
/// receiver has been dropped.
pub fn timer_thread(period: Duration, rx_stop: Receiver<()>, tx_tick: Sender<()>) {
    debug!(
        "[clock] timer thread starting (id={:?}, period={:?})",
        std::thread::current().id(),
        period
    );
    let ticker = tick(period);

    let mut running = post_tick(&tx_tick);
    while running {
        running = select! {
            recv(rx_stop) -> _ => false,
            recv(ticker) -> _ => post_tick(&tx_tick),
        };
    }

    debug!(
        "[clock] timer thread exiting (id={:?})",
        std::thread::current().id()
    );
}

/// Offer a tick to the owner. A full slot means the previous tick has not
/// been consumed yet and this one is skipped.
fn post_tick(tx_tick: &Sender<()>) -> bool {
    match tx_tick.try_send(()) {
        Ok(()) | Err(TrySendError::Full(())) => true,
        Err(TrySendError::Disconnected(())) => false,
    }
}

/// Run the tick callback of every sprite view whose clock is due.
pub fn sprite_view_clock_system(mut query: Query<&mut SpriteView>, time: Res<FrameTime>) {
    for mut view in query.iter_mut() {
        view.pump_clock(time.delta);
    }
}
