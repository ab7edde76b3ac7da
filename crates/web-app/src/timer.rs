use gloo_timers::callback::Interval;

const TICK_INTERVAL_MS: u32 = 1000;

/// Call `on_tick` once per second until the returned handle is dropped.
#[must_use]
pub fn start(on_tick: impl FnMut() + 'static) -> Interval {
    Interval::new(TICK_INTERVAL_MS, on_tick)
}
