//! User-configured target percentages and their persistence.

use super::error::StorageResult;
use super::stats::{Stat, StatMap};
use super::storage::{SettingsExt, SettingsStore};

/// Every stat's share when nothing has been configured yet.
pub const DEFAULT_TARGET: f64 = 25.0;

/// How far the target total may stray from 100 and still be saveable.
pub const BALANCE_TOLERANCE: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetSet(StatMap<f64>);

impl Default for TargetSet {
    fn default() -> Self {
        Self(StatMap::splat(DEFAULT_TARGET))
    }
}

impl TargetSet {
    pub fn new(values: StatMap<f64>) -> Self {
        Self(values)
    }

    pub fn get(&self, stat: Stat) -> f64 {
        self.0[stat]
    }

    pub fn values(&self) -> &StatMap<f64> {
        &self.0
    }

    pub fn total(&self) -> f64 {
        self.0.iter().map(|(_, v)| *v).sum()
    }

    pub fn is_balanced(&self) -> bool {
        (self.total() - 100.0).abs() <= BALANCE_TOLERANCE
    }
}

/// Storage key for a stat's target, e.g. `gym_target_speed`.
pub fn target_key(stat: Stat) -> String {
    format!("gym_target_{}", stat.key())
}

/// Loads and saves a [`TargetSet`]. The store performs no validation;
/// callers check [`TargetSet::is_balanced`] before saving.
pub struct TargetStore<S> {
    store: S,
}

impl<S: SettingsStore> TargetStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persisted targets; absent, malformed or non-finite entries read as 25.
    pub fn load(&self) -> TargetSet {
        TargetSet(StatMap::from_fn(|stat| {
            let value: f64 = self.store.get_or(&target_key(stat), DEFAULT_TARGET);
            if value.is_finite() {
                value
            } else {
                DEFAULT_TARGET
            }
        }))
    }

    /// Writes all four values back to back; nothing else runs on the UI
    /// thread in between, so no reader sees a partial set.
    pub fn save(&self, targets: &TargetSet) -> StorageResult<()> {
        for (stat, value) in targets.values().iter() {
            self.store.set(&target_key(stat), value)?;
        }
        tracing::debug!(total = targets.total(), "saved target percentages");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryStore;

    #[test]
    fn first_load_is_balanced_quarters() {
        let store = TargetStore::new(MemoryStore::new());
        let targets = store.load();
        assert_eq!(targets, TargetSet::default());
        assert!(targets.is_balanced());
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = TargetStore::new(MemoryStore::new());
        let targets = TargetSet::new(StatMap {
            strength: 40.0,
            defense: 30.0,
            speed: 20.5,
            dexterity: 9.5,
        });
        store.save(&targets).unwrap();
        assert_eq!(store.load(), targets);
    }

    #[test]
    fn full_precision_targets_survive_storage() {
        let store = TargetStore::new(MemoryStore::new());
        let targets = TargetSet::new(StatMap {
            strength: 24.531084303558238,
            defense: 25.0,
            speed: 25.0,
            dexterity: 25.468915696441762,
        });
        store.save(&targets).unwrap();
        let loaded = store.load();
        assert_eq!(loaded.get(Stat::Dexterity).to_bits(), 25.468915696441762_f64.to_bits());
        assert_eq!(loaded, targets);
    }

    #[test]
    fn partially_stored_targets_fill_in_defaults() {
        let memory = MemoryStore::new();
        memory.set_raw("gym_target_speed", "50").unwrap();
        memory.set_raw("gym_target_defense", "garbage").unwrap();
        let targets = TargetStore::new(memory).load();
        assert_eq!(targets.get(Stat::Speed), 50.0);
        assert_eq!(targets.get(Stat::Defense), DEFAULT_TARGET);
        assert_eq!(targets.get(Stat::Strength), DEFAULT_TARGET);
    }

    #[test]
    fn balance_allows_a_tenth_of_slack() {
        let near = TargetSet::new(StatMap {
            strength: 33.3,
            defense: 33.3,
            speed: 33.4,
            dexterity: 0.05,
        });
        assert!(near.is_balanced());
        let off = TargetSet::new(StatMap::splat(30.0));
        assert!(!off.is_balanced());
    }
}
