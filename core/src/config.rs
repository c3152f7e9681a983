//! Game configuration.
//!
//! Everything the simulation consumes — grid shape, matching discipline,
//! symbol weights, payout tables, bonus rules, safety caps — is plain
//! serde data, constructed once and read-only for the life of a run.
//! `validate()` runs every structural check up front so a bad table is a
//! `Configuration` error before the first spin, not a surprise mid-run.

use crate::{
    error::{SimError, SimResult},
    paytable::{FreeSpinAwardTable, PayoutTable, ScatterTable},
    pool::WeightedEntry,
    symbol::SymbolSpec,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Matching discipline, selected per game.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchMode {
    /// Fixed index paths scanned left to right, wild substitution,
    /// best-paying candidate per line.
    Paylines { lines: Vec<Vec<usize>> },
    /// Flood-fill connectivity clustering of same-named standards.
    Cluster { min_size: usize, adjacency: Adjacency },
    /// Whole-board tally per standard name, wild-assisted.
    CountAnywhere { wild_allocation: WildAllocation },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Adjacency {
    Four,
    Eight,
}

/// How a limited supply of wilds is split across simultaneously winning
/// count-anywhere groups. Published games differ here, so it is a knob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WildAllocation {
    /// Every winning group counts all wilds.
    Shared,
    /// Wilds assist only the single highest-paying group.
    BestOnly,
}

/// Wild-drawn bonus multiplier policy (one documented policy per mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WildBonus {
    None,
    /// Each wild on a step board adds 1 + uniform{0..sides-1}; the sum
    /// (minimum 1) multiplies that step's win.
    PerWildDie { sides: u32 },
}

impl Default for WildBonus {
    fn default() -> Self {
        WildBonus::None
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    pub mode: MatchMode,
    /// Remove-compact-refill after winning steps. Off for classic reel
    /// games that settle in a single evaluation.
    #[serde(default)]
    pub tumble: bool,
    pub pool: Vec<WeightedEntry>,
    pub paytable: PayoutTable,
    #[serde(default)]
    pub scatter_paytable: ScatterTable,
    #[serde(default = "default_free_spin_trigger")]
    pub free_spin_trigger: u32,
    #[serde(default)]
    pub free_spin_awards: FreeSpinAwardTable,
    /// Value set a Multiplier symbol draws from when it lands.
    #[serde(default)]
    pub multiplier_values: Vec<u32>,
    /// Ceiling for any line/step/global multiplier.
    #[serde(default = "default_multiplier_cap")]
    pub multiplier_cap: f64,
    #[serde(default)]
    pub wild_bonus: WildBonus,
    #[serde(default)]
    pub wild_excluded_columns: Vec<usize>,
    #[serde(default = "default_bet_per_line")]
    pub bet_per_line: f64,
    /// Most bonus spins one base spin may expand into. Reaching the cap
    /// truncates further awards; wins already accrued stand.
    #[serde(default = "default_bonus_spin_cap")]
    pub bonus_spin_cap: u32,
}

fn default_free_spin_trigger() -> u32 {
    3
}

fn default_multiplier_cap() -> f64 {
    100.0
}

fn default_bet_per_line() -> f64 {
    1.0
}

fn default_bonus_spin_cap() -> u32 {
    500
}

impl GameConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> SimResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> SimResult<Self> {
        let config: GameConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Wager charged per base spin: bet-per-line times the number of
    /// lines played, or one line's bet for positional (cluster) games.
    pub fn bet_per_spin(&self) -> f64 {
        match &self.mode {
            MatchMode::Paylines { lines } => self.bet_per_line * lines.len() as f64,
            _ => self.bet_per_line,
        }
    }

    /// A copy with every payout and scatter tier multiplied by `factor`.
    /// This is the knob the scale solver turns.
    pub fn scaled(&self, factor: f64) -> Self {
        let mut scaled = self.clone();
        scaled.paytable = self.paytable.scaled(factor);
        scaled.scatter_paytable = self.scatter_paytable.scaled(factor);
        scaled
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(SimError::Configuration(format!(
                "grid must be non-empty, got {}x{}",
                self.rows, self.cols
            )));
        }
        if self.pool.is_empty() {
            return Err(SimError::Configuration("symbol pool is empty".into()));
        }
        if !(self.bet_per_line > 0.0) {
            return Err(SimError::Configuration(format!(
                "bet per line must be positive, got {}",
                self.bet_per_line
            )));
        }
        if self.paytable.is_empty() {
            return Err(SimError::Configuration("payout table is empty".into()));
        }
        self.paytable.validate()?;
        self.scatter_paytable.validate()?;
        if self.free_spin_trigger == 0 {
            return Err(SimError::Configuration("free-spin trigger must be >= 1".into()));
        }
        if self.multiplier_cap < 1.0 {
            return Err(SimError::Configuration(format!(
                "multiplier cap must be >= 1, got {}",
                self.multiplier_cap
            )));
        }
        if let WildBonus::PerWildDie { sides } = self.wild_bonus {
            if sides == 0 {
                return Err(SimError::Configuration("wild bonus die needs >= 1 side".into()));
            }
        }
        for &col in &self.wild_excluded_columns {
            if col >= self.cols {
                return Err(SimError::Configuration(format!(
                    "wild exclusion names column {col}, board has {} columns",
                    self.cols
                )));
            }
        }
        match &self.mode {
            MatchMode::Paylines { lines } => {
                if lines.is_empty() {
                    return Err(SimError::Configuration(
                        "payline mode requires at least one payline".into(),
                    ));
                }
                let total = self.rows * self.cols;
                for (i, line) in lines.iter().enumerate() {
                    if line.len() != self.cols {
                        return Err(SimError::Configuration(format!(
                            "payline {i} has {} slots, expected one per column ({})",
                            line.len(),
                            self.cols
                        )));
                    }
                    if let Some(&bad) = line.iter().find(|&&s| s >= total) {
                        return Err(SimError::Configuration(format!(
                            "payline {i} references slot {bad}, board has {total} cells"
                        )));
                    }
                }
            }
            MatchMode::Cluster { min_size, .. } => {
                if *min_size < 2 {
                    return Err(SimError::Configuration(format!(
                        "minimum cluster size must be >= 2, got {min_size}"
                    )));
                }
            }
            MatchMode::CountAnywhere { .. } => {}
        }
        Ok(())
    }

    /// Classic 3×5, 10-payline reel game: ten standard symbols plus
    /// scatter, wild (banned from the edge reels, each wild rolling a
    /// bonus die) and a ×2 multiplier symbol.
    pub fn payline_classic() -> Self {
        let mut pool: Vec<WeightedEntry> = (1..=10)
            .map(|i| WeightedEntry {
                symbol: SymbolSpec::standard(&format!("User{i}")),
                weight: 5.0,
            })
            .collect();
        pool.push(WeightedEntry { symbol: SymbolSpec::Scatter, weight: 1.0 });
        pool.push(WeightedEntry { symbol: SymbolSpec::Wild, weight: 2.0 });
        pool.push(WeightedEntry { symbol: SymbolSpec::Multiplier, weight: 1.0 });

        let payouts: [(&str, [(u32, f64); 3]); 10] = [
            ("User1", [(3, 4.00), (4, 8.00), (5, 50.00)]),
            ("User2", [(3, 1.20), (4, 3.00), (5, 10.00)]),
            ("User3", [(3, 1.20), (4, 3.00), (5, 10.00)]),
            ("User4", [(3, 0.80), (4, 1.50), (5, 6.00)]),
            ("User5", [(3, 0.80), (4, 1.50), (5, 6.00)]),
            ("User6", [(3, 0.50), (4, 0.80), (5, 3.00)]),
            ("User7", [(3, 0.50), (4, 0.80), (5, 3.00)]),
            ("User8", [(3, 0.50), (4, 0.80), (5, 3.00)]),
            ("User9", [(3, 0.50), (4, 0.80), (5, 3.00)]),
            ("User10", [(3, 0.50), (4, 0.80), (5, 3.00)]),
        ];
        let paytable = PayoutTable(
            payouts
                .iter()
                .map(|(name, tiers)| (name.to_string(), tiers.iter().copied().collect()))
                .collect(),
        );

        Self {
            rows: 3,
            cols: 5,
            mode: MatchMode::Paylines {
                lines: vec![
                    vec![5, 6, 7, 8, 9],
                    vec![0, 1, 2, 3, 4],
                    vec![10, 11, 12, 13, 14],
                    vec![0, 6, 12, 8, 4],
                    vec![10, 6, 2, 8, 14],
                    vec![0, 6, 7, 8, 4],
                    vec![10, 6, 7, 8, 14],
                    vec![5, 1, 7, 13, 9],
                    vec![5, 11, 7, 3, 9],
                    vec![0, 11, 2, 13, 4],
                ],
            },
            tumble: false,
            pool,
            paytable,
            scatter_paytable: ScatterTable(
                [(3u32, 5.0), (4, 15.0), (5, 30.0)].into_iter().collect(),
            ),
            free_spin_trigger: 3,
            free_spin_awards: FreeSpinAwardTable(
                [(3u32, 10u32), (4, 20), (5, 50)].into_iter().collect(),
            ),
            multiplier_values: vec![2],
            multiplier_cap: 100.0,
            wild_bonus: WildBonus::PerWildDie { sides: 3 },
            wild_excluded_columns: vec![0, 4],
            bet_per_line: 1.0,
            bonus_spin_cap: 500,
        }
    }

    /// 5×6 cluster-pay tumbler: twelve standards on a descending weight
    /// ramp, a scatter paying from four of a kind, multiplier symbols,
    /// no wilds, cascades on.
    pub fn cluster_tumbler() -> Self {
        let mut pool: Vec<WeightedEntry> = (1..=12)
            .map(|i| WeightedEntry {
                symbol: SymbolSpec::standard(&format!("S{i}")),
                weight: (13 - i) as f64,
            })
            .collect();
        pool.push(WeightedEntry { symbol: SymbolSpec::Scatter, weight: 2.0 });
        pool.push(WeightedEntry { symbol: SymbolSpec::Multiplier, weight: 1.0 });

        let tiers_for = |a: f64, b: f64, c: f64| -> BTreeMap<u32, f64> {
            [(8u32, a), (10, b), (12, c)].into_iter().collect()
        };
        let mut paytable = PayoutTable::default();
        paytable.0.insert("S1".into(), tiers_for(20.0, 50.0, 100.0));
        paytable.0.insert("S2".into(), tiers_for(5.0, 20.0, 50.0));
        paytable.0.insert("S3".into(), tiers_for(4.0, 10.0, 30.0));
        paytable.0.insert("S4".into(), tiers_for(3.0, 4.0, 24.0));
        paytable.0.insert("S5".into(), tiers_for(2.0, 3.0, 20.0));
        paytable.0.insert("S6".into(), tiers_for(1.6, 2.4, 16.0));
        paytable.0.insert("S7".into(), tiers_for(1.0, 2.0, 10.0));
        paytable.0.insert("S8".into(), tiers_for(0.8, 1.8, 8.0));
        for name in ["S9", "S10", "S11", "S12"] {
            paytable.0.insert(name.into(), tiers_for(0.5, 1.5, 4.0));
        }

        Self {
            rows: 5,
            cols: 6,
            mode: MatchMode::Cluster {
                min_size: 4,
                adjacency: Adjacency::Four,
            },
            tumble: true,
            pool,
            paytable,
            scatter_paytable: ScatterTable(
                [(4u32, 6.0), (5, 100.0), (6, 200.0)].into_iter().collect(),
            ),
            free_spin_trigger: 4,
            free_spin_awards: FreeSpinAwardTable(
                [(4u32, 10u32), (5, 20), (6, 50)].into_iter().collect(),
            ),
            multiplier_values: vec![2, 3],
            multiplier_cap: 100.0,
            wild_bonus: WildBonus::None,
            wild_excluded_columns: vec![],
            bet_per_line: 1.0,
            bonus_spin_cap: 500,
        }
    }
}
