//! One-shot attachment of the panel once the host page is ready.
//!
//! ```text
//! Idle ──run──▶ Polling ──ready──▶ Attached
//!                  │                  (attach step errors ▶ Failed)
//!                  └──timeout──▶ TimedOut
//! ```
//!
//! Polling is a plain loop over [`Clock::sleep_ms`], so long waits never
//! grow the stack. Every terminal state is final: a scheduler never
//! retries and never attaches twice.

use super::error::AttachError;
use super::platform::HostProfile;
use super::timing::Clock;

/// CSS selector of the stable structural marker the panel is inserted after.
pub const ANCHOR_SELECTOR: &str = ".page-head-delimiter";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachState {
    Idle,
    Polling,
    Attached,
    TimedOut,
    Failed,
}

impl AttachState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            AttachState::Attached | AttachState::TimedOut | AttachState::Failed
        )
    }
}

/// Readiness checks against the host page.
pub trait AttachProbe {
    fn anchor_present(&self) -> bool;

    /// Whether stat markup has rendered yet.
    fn data_present(&self) -> bool;
}

/// Poll `ready` every `interval_ms` until it holds or `timeout_ms` elapses.
/// Returns whether it held. The predicate is checked once more at the
/// deadline so a late arrival is not missed.
pub async fn wait_until<C: Clock>(
    clock: &C,
    interval_ms: u64,
    timeout_ms: u64,
    mut ready: impl FnMut() -> bool,
) -> bool {
    let started = clock.now_ms();
    loop {
        if ready() {
            return true;
        }
        if clock.now_ms() - started >= timeout_ms as f64 {
            return false;
        }
        clock.sleep_ms(interval_ms.max(1)).await;
    }
}

pub struct AttachmentScheduler<C> {
    profile: HostProfile,
    clock: C,
    state: AttachState,
}

impl<C: Clock> AttachmentScheduler<C> {
    pub fn new(profile: HostProfile, clock: C) -> Self {
        Self {
            profile,
            clock,
            state: AttachState::Idle,
        }
    }

    pub fn state(&self) -> AttachState {
        self.state
    }

    pub fn profile(&self) -> &HostProfile {
        &self.profile
    }

    /// Wait for the page, then run `attach` exactly once.
    ///
    /// Browser hosts wait for both the anchor and a stat container; the
    /// embedded host only waits for the anchor, but longer. `attach` is
    /// handed the profile the wait ran under so the panel shares it.
    pub async fn run<P, A>(&mut self, probe: &P, attach: A) -> AttachState
    where
        P: AttachProbe,
        A: FnOnce(HostProfile) -> Result<(), AttachError>,
    {
        if self.state != AttachState::Idle {
            return self.state;
        }
        self.state = AttachState::Polling;

        let wait_for_data = self.profile.wait_for_data;
        let ready = wait_until(
            &self.clock,
            self.profile.poll_interval_ms,
            self.profile.attach_timeout_ms,
            || probe.anchor_present() && (!wait_for_data || probe.data_present()),
        )
        .await;

        if !ready {
            tracing::warn!(
                host = self.profile.environment.as_str(),
                timeout_ms = self.profile.attach_timeout_ms,
                "page never became ready; gym ratios panel not attached"
            );
            self.state = AttachState::TimedOut;
            return self.state;
        }

        self.state = match attach(self.profile) {
            Ok(()) => {
                tracing::info!(
                    host = self.profile.environment.as_str(),
                    "gym ratios panel attached"
                );
                AttachState::Attached
            }
            Err(err) => {
                tracing::warn!("gym ratios panel could not be attached: {err}");
                AttachState::Failed
            }
        };
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::platform::HostEnvironment;
    use crate::core::timing::ManualClock;
    use futures::executor::block_on;
    use std::cell::Cell;

    /// Probe whose elements appear after a fixed number of checks.
    struct CountdownProbe {
        anchor_after: Option<usize>,
        data_after: Option<usize>,
        checks: Cell<usize>,
    }

    impl CountdownProbe {
        fn new(anchor_after: Option<usize>, data_after: Option<usize>) -> Self {
            Self {
                anchor_after,
                data_after,
                checks: Cell::new(0),
            }
        }
    }

    impl AttachProbe for CountdownProbe {
        fn anchor_present(&self) -> bool {
            let n = self.checks.get();
            self.checks.set(n + 1);
            self.anchor_after.is_some_and(|after| n >= after)
        }

        fn data_present(&self) -> bool {
            let n = self.checks.get();
            self.data_after.is_some_and(|after| n >= after)
        }
    }

    #[test]
    fn wait_until_checks_at_deadline() {
        let clock = ManualClock::new();
        let mut calls = 0;
        let held = block_on(wait_until(&clock, 100, 500, || {
            calls += 1;
            false
        }));
        assert!(!held);
        assert_eq!(calls, 6);
        assert_eq!(clock.now_ms(), 500.0);
    }

    #[test]
    fn attaches_once_anchor_appears() {
        let clock = ManualClock::new();
        let profile = HostProfile::for_environment(HostEnvironment::EmbeddedHost);
        let mut scheduler = AttachmentScheduler::new(profile, &clock);
        let probe = CountdownProbe::new(Some(3), None);
        let attached = Cell::new(0);

        let state = block_on(scheduler.run(&probe, |_| {
            attached.set(attached.get() + 1);
            Ok(())
        }));
        assert_eq!(state, AttachState::Attached);
        assert_eq!(attached.get(), 1);
        assert_eq!(clock.now_ms(), 300.0);

        let again = block_on(scheduler.run(&probe, |_| {
            attached.set(attached.get() + 1);
            Ok(())
        }));
        assert_eq!(again, AttachState::Attached);
        assert_eq!(attached.get(), 1);
    }

    #[test]
    fn attach_receives_the_profile_it_waited_under() {
        let clock = ManualClock::new();
        let profile = HostProfile::for_environment(HostEnvironment::EmbeddedHost);
        let mut scheduler = AttachmentScheduler::new(profile, &clock);
        let probe = CountdownProbe::new(Some(0), None);
        let handed = Cell::new(None);

        let state = block_on(scheduler.run(&probe, |profile| {
            handed.set(Some(profile));
            Ok(())
        }));
        assert_eq!(state, AttachState::Attached);
        assert_eq!(handed.get(), Some(profile));
        assert_eq!(handed.get().map(|p| p.persists_collapse_state), Some(false));
    }

    #[test]
    fn browser_waits_for_stat_markup_too() {
        let clock = ManualClock::new();
        let profile = HostProfile::for_environment(HostEnvironment::Browser);
        let mut scheduler = AttachmentScheduler::new(profile, &clock);
        let probe = CountdownProbe::new(Some(0), Some(10));

        let state = block_on(scheduler.run(&probe, |_| Ok(())));
        assert_eq!(state, AttachState::Attached);
        assert_eq!(clock.now_ms(), 900.0);
    }

    #[test]
    fn browser_times_out_after_five_seconds() {
        let clock = ManualClock::new();
        let profile = HostProfile::for_environment(HostEnvironment::Browser);
        let mut scheduler = AttachmentScheduler::new(profile, &clock);
        let probe = CountdownProbe::new(Some(0), None);

        let state = block_on(scheduler.run(&probe, |_| panic!("must not attach")));
        assert_eq!(state, AttachState::TimedOut);
        assert_eq!(clock.now_ms(), 5_000.0);
    }

    #[test]
    fn attach_error_is_terminal_failure() {
        let clock = ManualClock::new();
        let profile = HostProfile::for_environment(HostEnvironment::EmbeddedHost);
        let mut scheduler = AttachmentScheduler::new(profile, &clock);
        let probe = CountdownProbe::new(Some(0), None);

        let state = block_on(scheduler.run(&probe, |_| Err(AttachError::NoParent)));
        assert_eq!(state, AttachState::Failed);
        assert!(state.is_terminal());
    }
}
