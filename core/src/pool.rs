//! Weighted symbol pool.
//!
//! Draw discipline: exactly one uniform [0,1) roll per draw. The roll is
//! scaled by the total weight, then a linear scan subtracts entry weights
//! until the remainder falls inside an entry. The scan cannot run off the
//! end with a correct total, but the defined fallback is the first entry,
//! never a panic.

use crate::{
    error::{SimError, SimResult},
    rng::SpinRng,
    symbol::{Symbol, SymbolSpec},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightedEntry {
    pub symbol: SymbolSpec,
    pub weight: f64,
}

#[derive(Debug, Clone)]
pub struct WeightedPool {
    entries: Vec<WeightedEntry>,
    total_weight: f64,
    /// Finite value set a Multiplier instance draws from on materialization.
    multiplier_values: Vec<u32>,
}

impl WeightedPool {
    pub fn new(entries: Vec<WeightedEntry>, multiplier_values: Vec<u32>) -> SimResult<Self> {
        if entries.is_empty() {
            return Err(SimError::Configuration("symbol pool is empty".into()));
        }
        for e in &entries {
            if !(e.weight > 0.0) {
                return Err(SimError::Configuration(format!(
                    "non-positive weight {} for {:?}",
                    e.weight, e.symbol
                )));
            }
        }
        let total_weight: f64 = entries.iter().map(|e| e.weight).sum();
        if !(total_weight > 0.0) {
            return Err(SimError::Configuration("pool weight total is not positive".into()));
        }
        let has_multiplier = entries
            .iter()
            .any(|e| e.symbol == SymbolSpec::Multiplier);
        if has_multiplier && multiplier_values.is_empty() {
            return Err(SimError::Configuration(
                "pool contains a Multiplier but no multiplier values are configured".into(),
            ));
        }
        Ok(Self {
            entries,
            total_weight,
            multiplier_values,
        })
    }

    /// Draw one symbol. A Multiplier consumes a second uniform roll for
    /// its attached value; every other symbol consumes exactly one.
    pub fn draw(&self, rng: &mut SpinRng) -> Symbol {
        let mut r = rng.next_f64() * self.total_weight;
        for entry in &self.entries {
            if r < entry.weight {
                return self.materialize(&entry.symbol, rng);
            }
            r -= entry.weight;
        }
        // Unreachable with a correct total; defined fallback per contract.
        let first = self.entries[0].symbol.clone();
        self.materialize(&first, rng)
    }

    fn materialize(&self, spec: &SymbolSpec, rng: &mut SpinRng) -> Symbol {
        match spec {
            SymbolSpec::Standard { name } => Symbol::Standard(name.clone()),
            SymbolSpec::Wild => Symbol::Wild,
            SymbolSpec::Scatter => Symbol::Scatter,
            SymbolSpec::Multiplier => {
                let idx = rng.next_u64_below(self.multiplier_values.len() as u64) as usize;
                Symbol::Multiplier(self.multiplier_values[idx])
            }
        }
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SpinRng;

    fn pool(entries: Vec<(SymbolSpec, f64)>) -> WeightedPool {
        let entries = entries
            .into_iter()
            .map(|(symbol, weight)| WeightedEntry { symbol, weight })
            .collect();
        WeightedPool::new(entries, vec![2]).unwrap()
    }

    #[test]
    fn single_entry_pool_always_returns_that_entry() {
        let p = pool(vec![(SymbolSpec::standard("A"), 1.0)]);
        let mut rng = SpinRng::from_hex_seed("01").unwrap();
        for _ in 0..1000 {
            assert_eq!(p.draw(&mut rng), Symbol::Standard("A".into()));
        }
    }

    #[test]
    fn draw_frequencies_track_weights() {
        let p = pool(vec![
            (SymbolSpec::standard("A"), 3.0),
            (SymbolSpec::standard("B"), 1.0),
        ]);
        let mut rng = SpinRng::from_hex_seed("cafe").unwrap();
        let n = 200_000;
        let mut a = 0u64;
        for _ in 0..n {
            if p.draw(&mut rng).standard_name() == Some("A") {
                a += 1;
            }
        }
        let share = a as f64 / n as f64;
        assert!((share - 0.75).abs() < 0.01, "A share {share} far from 0.75");
    }

    #[test]
    fn multiplier_draw_attaches_a_configured_value() {
        let p = pool(vec![(SymbolSpec::Multiplier, 1.0)]);
        let mut rng = SpinRng::from_hex_seed("02").unwrap();
        assert_eq!(p.draw(&mut rng), Symbol::Multiplier(2));
    }

    #[test]
    fn zero_weight_is_rejected() {
        let entries = vec![WeightedEntry {
            symbol: SymbolSpec::standard("A"),
            weight: 0.0,
        }];
        assert!(WeightedPool::new(entries, vec![]).is_err());
    }

    #[test]
    fn multiplier_without_value_set_is_rejected() {
        let entries = vec![WeightedEntry {
            symbol: SymbolSpec::Multiplier,
            weight: 1.0,
        }];
        assert!(WeightedPool::new(entries, vec![]).is_err());
    }
}
