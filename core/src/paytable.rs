//! Step-function payout tables.
//!
//! Every table maps a match count to a payout multiplier and pays the
//! highest tier whose key does not exceed the count (bucketing). Counts
//! above the top tier therefore cap at the top tier; counts below the
//! lowest tier pay nothing.

use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Symbol name → (count → payout multiplier of the line bet).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PayoutTable(pub BTreeMap<String, BTreeMap<u32, f64>>);

impl PayoutTable {
    /// Payout for `count` matched cells of `name`: the highest tier ≤ count.
    pub fn payout(&self, name: &str, count: u32) -> f64 {
        self.0
            .get(name)
            .map(|tiers| step_lookup(tiers, count))
            .unwrap_or(0.0)
    }

    /// Best payout any symbol's table offers at `count`. Used to price a
    /// pure-wild payline run.
    pub fn best_payout_at(&self, count: u32) -> f64 {
        self.0
            .values()
            .map(|tiers| step_lookup(tiers, count))
            .fold(0.0, f64::max)
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self(
            self.0
                .iter()
                .map(|(name, tiers)| {
                    let scaled = tiers.iter().map(|(&k, &v)| (k, v * factor)).collect();
                    (name.clone(), scaled)
                })
                .collect(),
        )
    }

    pub fn validate(&self) -> SimResult<()> {
        for (name, tiers) in &self.0 {
            validate_monotonic(name, tiers)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Scatter-count bucket → payout multiplier applied to the total wager.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScatterTable(pub BTreeMap<u32, f64>);

impl ScatterTable {
    pub fn payout(&self, count: u32) -> f64 {
        step_lookup(&self.0, count)
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self(self.0.iter().map(|(&k, &v)| (k, v * factor)).collect())
    }

    pub fn validate(&self) -> SimResult<()> {
        validate_monotonic("scatter", &self.0)
    }
}

/// Scatter-count bucket → number of bonus spins awarded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FreeSpinAwardTable(pub BTreeMap<u32, u32>);

impl FreeSpinAwardTable {
    pub fn award(&self, count: u32) -> u32 {
        self.0
            .range(..=count)
            .next_back()
            .map(|(_, &spins)| spins)
            .unwrap_or(0)
    }
}

fn step_lookup(tiers: &BTreeMap<u32, f64>, count: u32) -> f64 {
    tiers
        .range(..=count)
        .next_back()
        .map(|(_, &pay)| pay)
        .unwrap_or(0.0)
}

fn validate_monotonic(name: &str, tiers: &BTreeMap<u32, f64>) -> SimResult<()> {
    let mut prev = 0.0;
    for (&count, &pay) in tiers {
        if pay < 0.0 {
            return Err(SimError::Configuration(format!(
                "negative payout {pay} for '{name}' at count {count}"
            )));
        }
        if pay < prev {
            return Err(SimError::Configuration(format!(
                "payout table for '{name}' is not monotonic at count {count}: {pay} < {prev}"
            )));
        }
        prev = pay;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(pairs: &[(u32, f64)]) -> BTreeMap<u32, f64> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn bucket_picks_highest_tier_at_or_below_count() {
        let mut t = PayoutTable::default();
        t.0.insert("A".into(), table(&[(3, 2.0), (4, 4.0)]));
        assert_eq!(t.payout("A", 2), 0.0);
        assert_eq!(t.payout("A", 3), 2.0);
        assert_eq!(t.payout("A", 4), 4.0);
        assert_eq!(t.payout("A", 16), 4.0); // capped at the top tier
        assert_eq!(t.payout("missing", 5), 0.0);
    }

    #[test]
    fn scatter_bucket_caps_at_max_tier() {
        let s = ScatterTable(table(&[(4, 6.0), (5, 100.0), (6, 200.0)]));
        assert_eq!(s.payout(3), 0.0);
        assert_eq!(s.payout(4), 6.0);
        assert_eq!(s.payout(9), 200.0);
    }

    #[test]
    fn non_monotonic_table_is_rejected() {
        let mut t = PayoutTable::default();
        t.0.insert("A".into(), table(&[(3, 5.0), (4, 1.0)]));
        assert!(t.validate().is_err());
    }

    #[test]
    fn scaling_multiplies_every_tier() {
        let mut t = PayoutTable::default();
        t.0.insert("A".into(), table(&[(3, 2.0), (5, 10.0)]));
        let scaled = t.scaled(2.5);
        assert_eq!(scaled.payout("A", 3), 5.0);
        assert_eq!(scaled.payout("A", 5), 25.0);
    }

    #[test]
    fn free_spin_awards_bucket_like_payouts() {
        let f = FreeSpinAwardTable([(3u32, 10u32), (4, 20), (5, 50)].into_iter().collect());
        assert_eq!(f.award(2), 0);
        assert_eq!(f.award(3), 10);
        assert_eq!(f.award(7), 50);
    }
}
