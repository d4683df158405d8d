//! Timing utilities: wall-clock milliseconds and cooperative sleeps.
//!
//! Scheduling code is written against [`Clock`] so the same loop runs on
//! browser timers in production and on a [`ManualClock`] in tests.

use std::cell::Cell;
use std::future::Future;

pub trait Clock {
    /// Milliseconds on a monotonic-enough timeline; only differences matter.
    fn now_ms(&self) -> f64;

    fn sleep_ms(&self, ms: u64) -> impl Future<Output = ()>;
}

/// Browser timers on wasm, tokio timers natively.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        now_ms()
    }

    fn sleep_ms(&self, ms: u64) -> impl Future<Output = ()> {
        sleep_ms(ms)
    }
}

/// Clock whose sleeps complete immediately by advancing virtual time.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
    sleeps: Cell<usize>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms as f64);
    }

    /// Number of sleeps taken so far.
    pub fn sleeps(&self) -> usize {
        self.sleeps.get()
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }

    fn sleep_ms(&self, ms: u64) -> impl Future<Output = ()> {
        self.advance(ms);
        self.sleeps.set(self.sleeps.get() + 1);
        std::future::ready(())
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> f64 {
        (**self).now_ms()
    }

    fn sleep_ms(&self, ms: u64) -> impl Future<Output = ()> {
        (**self).sleep_ms(ms)
    }
}

#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use once_cell::sync::Lazy;
    use std::time::Instant;

    static EPOCH: Lazy<Instant> = Lazy::new(Instant::now);
    EPOCH.elapsed().as_secs_f64() * 1_000.0
}

#[cfg(target_arch = "wasm32")]
pub async fn sleep_ms(ms: u64) {
    let ms = u32::try_from(ms).unwrap_or(u32::MAX);
    gloo_timers::future::TimeoutFuture::new(ms).await;
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep_ms(ms: u64) {
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances_on_sleep() {
        let clock = ManualClock::new();
        futures::executor::block_on(async {
            clock.sleep_ms(100).await;
            clock.sleep_ms(250).await;
        });
        assert_eq!(clock.now_ms(), 350.0);
        assert_eq!(clock.sleeps(), 2);
    }
}
