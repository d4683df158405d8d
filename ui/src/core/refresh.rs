//! Periodic extraction → distribution → classification pipeline.

use super::classify::{self, Deviation};
use super::distribution::Distribution;
use super::extract::{self, StatPage};
use super::platform::HostProfile;
use super::stats::{StatMap, StatSample};
use super::targets::TargetSet;
use super::theme::{check_theme, Theme, ThemeCheck, ThemeSignal};
use super::timing::Clock;

/// Everything the panel needs to draw the stat cards for one cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub sample: StatSample,
    pub distribution: Distribution,
    pub targets: TargetSet,
    /// `None` when every stat read as zero.
    pub deviations: Option<StatMap<Deviation>>,
}

impl Snapshot {
    pub fn compute(sample: StatSample, targets: TargetSet) -> Self {
        let distribution = Distribution::from_sample(&sample);
        Self {
            sample,
            distribution,
            targets,
            deviations: classify::deviations(&distribution, &targets),
        }
    }

    pub fn capture<P: StatPage>(page: &P, targets: TargetSet) -> Self {
        Self::compute(extract::extract_sample(page), targets)
    }

    pub fn has_data(&self) -> bool {
        self.deviations.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefreshTick {
    pub theme: ThemeCheck,
    /// Absent while collapsed; the stat cards are not touched then.
    pub snapshot: Option<Snapshot>,
}

/// One refresh cycle. The theme is always re-checked; the page is only
/// read when the panel is expanded.
pub fn tick<P: StatPage>(
    page: &P,
    targets: TargetSet,
    collapsed: bool,
    previous_theme: Theme,
    signal: &ThemeSignal,
) -> RefreshTick {
    let theme = check_theme(previous_theme, signal);
    let snapshot = (!collapsed).then(|| Snapshot::capture(page, targets));
    RefreshTick { theme, snapshot }
}

/// What the loop reads from and writes to on every cycle.
pub trait RefreshHost {
    type Page: StatPage;

    fn page(&self) -> &Self::Page;
    fn collapsed(&self) -> bool;
    fn targets(&self) -> TargetSet;
    fn theme_signal(&self) -> ThemeSignal;
    fn apply(&mut self, tick: RefreshTick);
}

pub struct RefreshLoop<C> {
    clock: C,
    interval_ms: u64,
    settle_delay_ms: u64,
}

impl<C: Clock> RefreshLoop<C> {
    pub fn new(profile: &HostProfile, clock: C) -> Self {
        Self {
            clock,
            interval_ms: profile.refresh_interval_ms,
            settle_delay_ms: profile.settle_delay_ms,
        }
    }

    /// Waits out the settle delay, then ticks immediately and every
    /// interval after. `max_ticks: None` runs for the page's lifetime.
    /// Returns the last applied theme.
    pub async fn run<H: RefreshHost>(
        &self,
        host: &mut H,
        initial_theme: Theme,
        max_ticks: Option<usize>,
    ) -> Theme {
        if self.settle_delay_ms > 0 {
            self.clock.sleep_ms(self.settle_delay_ms).await;
        }

        let mut theme = initial_theme;
        let mut ticks = 0usize;
        loop {
            let result = tick(
                host.page(),
                host.targets(),
                host.collapsed(),
                theme,
                &host.theme_signal(),
            );
            if result.theme.changed {
                tracing::debug!(theme = result.theme.theme.as_str(), "host theme changed");
            }
            theme = result.theme.theme;
            host.apply(result);

            ticks += 1;
            if max_ticks.is_some_and(|max| ticks >= max) {
                return theme;
            }
            self.clock.sleep_ms(self.interval_ms).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::extract::StatNode;
    use crate::core::platform::HostEnvironment;
    use crate::core::timing::ManualClock;
    use futures::executor::block_on;
    use std::cell::Cell;

    /// Page with every stat at the same value; counts reads.
    struct FlatPage {
        value: &'static str,
        reads: Cell<usize>,
    }

    struct FlatNode(&'static str);

    impl StatNode for FlatNode {
        fn query_text(&self, _selector: &str) -> Option<String> {
            Some(self.0.to_string())
        }

        fn query_attr(&self, _selector: &str, _name: &str) -> Option<String> {
            None
        }
    }

    impl StatPage for FlatPage {
        type Node = FlatNode;

        fn find(&self, _selector: &str) -> Option<FlatNode> {
            self.reads.set(self.reads.get() + 1);
            Some(FlatNode(self.value))
        }
    }

    struct Host {
        page: FlatPage,
        collapsed: bool,
        dark: bool,
        applied: Vec<RefreshTick>,
    }

    impl RefreshHost for Host {
        type Page = FlatPage;

        fn page(&self) -> &FlatPage {
            &self.page
        }

        fn collapsed(&self) -> bool {
            self.collapsed
        }

        fn targets(&self) -> TargetSet {
            TargetSet::default()
        }

        fn theme_signal(&self) -> ThemeSignal {
            ThemeSignal {
                body_classes: if self.dark { vec!["dark-mode".into()] } else { vec![] },
                ..Default::default()
            }
        }

        fn apply(&mut self, tick: RefreshTick) {
            self.applied.push(tick);
        }
    }

    fn host(collapsed: bool, dark: bool) -> Host {
        Host {
            page: FlatPage {
                value: "250",
                reads: Cell::new(0),
            },
            collapsed,
            dark,
            applied: Vec::new(),
        }
    }

    #[test]
    fn collapsed_tick_skips_extraction_but_checks_theme() {
        let page = FlatPage {
            value: "1",
            reads: Cell::new(0),
        };
        let signal = ThemeSignal {
            body_classes: vec!["dark".into()],
            ..Default::default()
        };
        let result = tick(&page, TargetSet::default(), true, Theme::Light, &signal);
        assert!(result.snapshot.is_none());
        assert!(result.theme.changed);
        assert_eq!(page.reads.get(), 0);
    }

    #[test]
    fn loop_ticks_every_five_seconds() {
        let clock = ManualClock::new();
        let profile = HostProfile::for_environment(HostEnvironment::Browser);
        let refresh = RefreshLoop::new(&profile, &clock);
        let mut host = host(false, false);

        block_on(refresh.run(&mut host, Theme::Light, Some(3)));
        assert_eq!(host.applied.len(), 3);
        assert_eq!(clock.now_ms(), 10_000.0);
        let snapshot = host.applied[0].snapshot.unwrap();
        assert!(snapshot.has_data());
        assert_eq!(snapshot.distribution.share(crate::core::stats::Stat::Speed), 25.0);
    }

    #[test]
    fn embedded_loop_waits_to_settle_first() {
        let clock = ManualClock::new();
        let profile = HostProfile::for_environment(HostEnvironment::EmbeddedHost);
        let refresh = RefreshLoop::new(&profile, &clock);
        let mut host = host(false, false);

        block_on(refresh.run(&mut host, Theme::Light, Some(1)));
        assert_eq!(clock.now_ms(), 2_000.0);
        assert_eq!(host.applied.len(), 1);
    }

    #[test]
    fn theme_change_is_reported_once() {
        let clock = ManualClock::new();
        let profile = HostProfile::for_environment(HostEnvironment::Browser);
        let refresh = RefreshLoop::new(&profile, &clock);
        let mut host = host(true, true);

        let last = block_on(refresh.run(&mut host, Theme::Light, Some(2)));
        assert_eq!(last, Theme::Dark);
        assert!(host.applied[0].theme.changed);
        assert!(!host.applied[1].theme.changed);
        assert_eq!(host.page.reads.get(), 0);
    }
}
