//! The four tracked battle stats and a fixed-size record keyed by them.

use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    Strength,
    Defense,
    Speed,
    Dexterity,
}

impl Stat {
    /// Display order used by the panel and the configuration form.
    pub const ALL: [Stat; 4] = [Stat::Strength, Stat::Defense, Stat::Speed, Stat::Dexterity];

    /// Lowercase identifier shared by storage keys, host markup and input ids.
    pub fn key(self) -> &'static str {
        match self {
            Stat::Strength => "strength",
            Stat::Defense => "defense",
            Stat::Speed => "speed",
            Stat::Dexterity => "dexterity",
        }
    }
}

/// One value per [`Stat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatMap<T> {
    pub strength: T,
    pub defense: T,
    pub speed: T,
    pub dexterity: T,
}

/// Raw stat values read from the page during one refresh cycle.
pub type StatSample = StatMap<u64>;

impl<T> StatMap<T> {
    pub fn from_fn(mut f: impl FnMut(Stat) -> T) -> Self {
        Self {
            strength: f(Stat::Strength),
            defense: f(Stat::Defense),
            speed: f(Stat::Speed),
            dexterity: f(Stat::Dexterity),
        }
    }

    pub fn splat(value: T) -> Self
    where
        T: Clone,
    {
        Self::from_fn(|_| value.clone())
    }

    pub fn map<U>(&self, mut f: impl FnMut(Stat, &T) -> U) -> StatMap<U> {
        StatMap::from_fn(|stat| f(stat, &self[stat]))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Stat, &T)> + '_ {
        Stat::ALL.into_iter().map(move |stat| (stat, &self[stat]))
    }
}

impl StatMap<u64> {
    /// Sum of all four values; saturates rather than wrapping.
    pub fn total(&self) -> u64 {
        self.iter()
            .fold(0u64, |acc, (_, value)| acc.saturating_add(*value))
    }
}

impl<T> Index<Stat> for StatMap<T> {
    type Output = T;

    fn index(&self, stat: Stat) -> &T {
        match stat {
            Stat::Strength => &self.strength,
            Stat::Defense => &self.defense,
            Stat::Speed => &self.speed,
            Stat::Dexterity => &self.dexterity,
        }
    }
}

impl<T> IndexMut<Stat> for StatMap<T> {
    fn index_mut(&mut self, stat: Stat) -> &mut T {
        match stat {
            Stat::Strength => &mut self.strength,
            Stat::Defense => &mut self.defense,
            Stat::Speed => &mut self.speed,
            Stat::Dexterity => &mut self.dexterity,
        }
    }
}
