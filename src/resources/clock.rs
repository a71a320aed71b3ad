//! Animation clocks.
//!
//! A clock decides *when* a sprite view ticks; it never touches the view.
//! The owner polls the clock from its own (serialized) context and runs the
//! tick callback there, so sequencer state is only ever mutated by the
//! thread that also renders it.
//!
//! Two implementations are provided:
//!
//! - [`ThreadedClock`] spawns a background timer thread (see
//!   [`crate::systems::clock::timer_thread`]) that posts ticks over a
//!   `crossbeam_channel`.
//! - [`FrameClock`] is fed frame deltas by a host loop, like an event-loop
//!   timer.
//!
//! Both deliver the first tick immediately after [`AnimationClock::schedule`]
//! and coalesce ticks that pile up between polls into a single one.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, bounded};
use log::{debug, warn};

use crate::systems::clock::timer_thread;

/// A repeating timer driving a sprite view.
pub trait AnimationClock: Send + Sync {
    /// Start ticking every `period`, first tick due immediately.
    ///
    /// Any previous schedule is cancelled and released first. A zero period
    /// is rejected and leaves the clock idle.
    fn schedule(&mut self, period: Duration);

    /// Stop future ticks. Ticks not yet polled are discarded.
    fn cancel(&mut self);

    fn is_scheduled(&self) -> bool;

    /// Number of ticks due since the last poll (0 or 1).
    ///
    /// `delta` is the host frame time; clocks with their own time source
    /// ignore it.
    fn poll(&mut self, delta: Duration) -> u32;
}

/// Channels and join handle of one running timer thread.
struct TimerBridge {
    tx_stop: Sender<()>,
    rx_tick: Receiver<()>,
    handle: JoinHandle<()>,
}

/// Clock backed by a dedicated timer thread.
///
/// The thread only posts into a one-slot channel; a tick that finds the
/// slot full is dropped (frame skip) instead of queueing up.
pub struct ThreadedClock {
    timer: Option<TimerBridge>,
    live: Arc<AtomicUsize>,
}

impl Default for ThreadedClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ThreadedClock {
    pub fn new() -> Self {
        Self {
            timer: None,
            live: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Timer threads of this clock that have not exited yet.
    pub fn live_timers(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    /// Shared counter behind [`ThreadedClock::live_timers`], for checks that
    /// outlive a borrow of the clock.
    pub fn live_timer_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.live)
    }
}

impl AnimationClock for ThreadedClock {
    fn schedule(&mut self, period: Duration) {
        if period.is_zero() {
            warn!("[clock] refusing to schedule a zero period");
            return;
        }
        self.cancel();

        let (tx_stop, rx_stop) = bounded::<()>(1);
        let (tx_tick, rx_tick) = bounded::<()>(1);
        let live = Arc::clone(&self.live);

        live.fetch_add(1, Ordering::SeqCst);
        let spawned = std::thread::Builder::new()
            .name("sprite-clock".into())
            .spawn({
                let live = Arc::clone(&live);
                move || {
                    timer_thread(period, rx_stop, tx_tick);
                    live.fetch_sub(1, Ordering::SeqCst);
                }
            });

        match spawned {
            Ok(handle) => {
                debug!("[clock] scheduled period={:?}", period);
                self.timer = Some(TimerBridge {
                    tx_stop,
                    rx_tick,
                    handle,
                });
            }
            Err(e) => {
                live.fetch_sub(1, Ordering::SeqCst);
                warn!("[clock] failed to spawn timer thread: {}", e);
            }
        }
    }

    fn cancel(&mut self) {
        if let Some(timer) = self.timer.take() {
            let _ = timer.tx_stop.send(());
            drop(timer.rx_tick);
            if timer.handle.join().is_err() {
                warn!("[clock] timer thread panicked");
            }
            debug!("[clock] cancelled");
        }
    }

    fn is_scheduled(&self) -> bool {
        self.timer.is_some()
    }

    fn poll(&mut self, _delta: Duration) -> u32 {
        match &self.timer {
            Some(timer) => timer.rx_tick.try_iter().count() as u32,
            None => 0,
        }
    }
}

impl Drop for ThreadedClock {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Clock driven by frame deltas handed in through [`AnimationClock::poll`].
#[derive(Debug, Default, Clone)]
pub struct FrameClock {
    period: Option<Duration>,
    elapsed: Duration,
    pending: bool,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }
}

impl AnimationClock for FrameClock {
    fn schedule(&mut self, period: Duration) {
        if period.is_zero() {
            warn!("[clock] refusing to schedule a zero period");
            return;
        }
        self.period = Some(period);
        self.elapsed = Duration::ZERO;
        self.pending = true;
    }

    fn cancel(&mut self) {
        self.period = None;
        self.elapsed = Duration::ZERO;
        self.pending = false;
    }

    fn is_scheduled(&self) -> bool {
        self.period.is_some()
    }

    fn poll(&mut self, delta: Duration) -> u32 {
        let Some(period) = self.period else {
            return 0;
        };
        self.elapsed += delta;
        if self.elapsed >= period {
            self.pending = true;
            let rem = self.elapsed.as_nanos() % period.as_nanos();
            self.elapsed = Duration::from_nanos(rem as u64);
        }
        u32::from(std::mem::take(&mut self.pending))
    }
}
