//! Editable state behind the target configuration form.

use super::stats::{Stat, StatMap};
use super::targets::{TargetSet, BALANCE_TOLERANCE};

/// Raw text of the four target inputs, kept as typed so the user can pass
/// through intermediate states like `""` or `"33."`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TargetDraft {
    inputs: StatMap<String>,
}

impl TargetDraft {
    pub fn from_targets(targets: &TargetSet) -> Self {
        Self {
            inputs: targets.values().map(|_, v| v.to_string()),
        }
    }

    pub fn input(&self, stat: Stat) -> &str {
        &self.inputs[stat]
    }

    pub fn set_input(&mut self, stat: Stat, raw: impl Into<String>) {
        self.inputs[stat] = raw.into();
    }

    /// Live total; inputs that do not parse count as zero.
    pub fn total(&self) -> f64 {
        self.inputs
            .iter()
            .map(|(_, raw)| parse_percent(raw).unwrap_or(0.0))
            .sum()
    }

    pub fn is_balanced(&self) -> bool {
        (self.total() - 100.0).abs() <= BALANCE_TOLERANCE
    }

    /// Save is offered only for a balanced draft whose inputs all parse.
    pub fn can_save(&self) -> bool {
        self.is_balanced() && self.inputs.iter().all(|(_, raw)| parse_percent(raw).is_some())
    }

    pub fn to_target_set(&self) -> Option<TargetSet> {
        if !self.can_save() {
            return None;
        }
        let mut values = StatMap::splat(0.0);
        for (stat, raw) in self.inputs.iter() {
            values[stat] = parse_percent(raw)?;
        }
        Some(TargetSet::new(values))
    }
}

/// Finite decimal number, surrounding whitespace ignored.
pub fn parse_percent(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_from_defaults_is_saveable() {
        let draft = TargetDraft::from_targets(&TargetSet::default());
        assert_eq!(draft.input(Stat::Speed), "25");
        assert_eq!(draft.total(), 100.0);
        assert_eq!(draft.to_target_set(), Some(TargetSet::default()));
    }

    #[test]
    fn unbalanced_draft_cannot_save() {
        let mut draft = TargetDraft::from_targets(&TargetSet::default());
        draft.set_input(Stat::Strength, "30");
        assert!((draft.total() - 105.0).abs() < 1e-9);
        assert!(!draft.can_save());
        assert!(draft.to_target_set().is_none());
    }

    #[test]
    fn blank_input_counts_as_zero_but_blocks_save() {
        let mut draft = TargetDraft::from_targets(&TargetSet::default());
        draft.set_input(Stat::Dexterity, "");
        draft.set_input(Stat::Strength, "50");
        assert_eq!(draft.total(), 100.0);
        assert!(draft.is_balanced());
        assert!(!draft.can_save());
    }

    #[test]
    fn rejects_non_finite_text() {
        assert_eq!(parse_percent(" 12.5 "), Some(12.5));
        assert_eq!(parse_percent("NaN"), None);
        assert_eq!(parse_percent("inf"), None);
        assert_eq!(parse_percent("abc"), None);
    }
}
