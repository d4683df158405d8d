//! Tri-state comparison of a stat's current share against its target.

use super::distribution::Distribution;
use super::format;
use super::stats::StatMap;
use super::targets::TargetSet;

/// A share within this many percentage points of its target is on target.
pub const ON_TARGET_TOLERANCE: f64 = 1.0;

/// Absorbs binary rounding so `26.1 - 25.1` still lands on the boundary.
const BOUNDARY_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    OnTarget,
    AboveTarget,
    BelowTarget,
}

impl Classification {
    /// Modifier class for the share line, e.g. `gym-stat__share--above`.
    pub fn css_class(self) -> &'static str {
        match self {
            Classification::OnTarget => "gym-stat__share--on",
            Classification::AboveTarget => "gym-stat__share--above",
            Classification::BelowTarget => "gym-stat__share--below",
        }
    }
}

/// `diff = current - target`. Boundaries at exactly ±1.0 are on target.
/// A non-finite diff asserts nothing about the stat and counts as on target.
pub fn classify(current: f64, target: f64) -> Classification {
    let diff = current - target;
    if !diff.is_finite() {
        return Classification::OnTarget;
    }
    if diff > ON_TARGET_TOLERANCE + BOUNDARY_EPSILON {
        Classification::AboveTarget
    } else if diff < -(ON_TARGET_TOLERANCE + BOUNDARY_EPSILON) {
        Classification::BelowTarget
    } else {
        Classification::OnTarget
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deviation {
    pub current: f64,
    pub target: f64,
    pub diff: f64,
    pub classification: Classification,
}

impl Deviation {
    pub fn new(current: f64, target: f64) -> Self {
        Self {
            current,
            target,
            diff: current - target,
            classification: classify(current, target),
        }
    }

    /// `+15.0`, `-15.0`, `0.0`
    pub fn diff_label(&self) -> String {
        format::format_diff(self.diff)
    }
}

/// Per-stat deviations, or `None` when the distribution carries no data.
pub fn deviations(distribution: &Distribution, targets: &TargetSet) -> Option<StatMap<Deviation>> {
    if !distribution.has_data() {
        return None;
    }
    Some(StatMap::from_fn(|stat| {
        Deviation::new(distribution.share(stat), targets.get(stat))
    }))
}
