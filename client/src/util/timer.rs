//! Browser timers for debounces, countdowns, and auto-dismiss.
//!
//! TRADE-OFFS
//! ==========
//! Timers are fire-and-forget. Callers guard against stale firings with
//! sequence tickets held in state rather than by cancelling handles, so SSR
//! paths can simply skip scheduling.

#[cfg(feature = "hydrate")]
use std::sync::Arc;
#[cfg(feature = "hydrate")]
use std::sync::atomic::{AtomicBool, Ordering};

/// Run `f` once after `ms` milliseconds. Never fires during SSR.
pub fn after(ms: u32, f: impl FnOnce() + 'static) {
    #[cfg(feature = "hydrate")]
    {
        gloo_timers::callback::Timeout::new(ms, f).forget();
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (ms, f);
    }
}

/// Call `tick` every `period_ms` until it returns `false` or the owning
/// component is cleaned up.
pub fn every(period_ms: u64, tick: impl FnMut() -> bool + 'static) {
    #[cfg(feature = "hydrate")]
    {
        let mut tick = tick;
        let alive = Arc::new(AtomicBool::new(true));
        let alive_task = alive.clone();
        leptos::task::spawn_local(async move {
            loop {
                gloo_timers::future::sleep(std::time::Duration::from_millis(period_ms)).await;
                if !alive_task.load(Ordering::Relaxed) || !tick() {
                    break;
                }
            }
        });
        leptos::prelude::on_cleanup(move || alive.store(false, Ordering::Relaxed));
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (period_ms, tick);
    }
}
