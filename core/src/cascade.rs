//! Cascade (tumble) resolution of a single board.
//!
//! State machine per spin: Resolving → Settled. Each iteration runs the
//! match engine, pays the step, clears winning cells (paid scatters
//! included), compacts and refills, and goes again. A step that pays
//! nothing settles the spin.
//!
//! RULES:
//!   - Scatter cells that pay are consumed with the step. Leaving them on
//!     the board would re-pay the same scatters every step and cascade
//!     forever.
//!   - Termination is probabilistic, so the loop carries a hard cap;
//!     exhausting it is a fatal configuration error, never a silent
//!     truncation.

use crate::{
    board::{Board, PlacementRules},
    config::{GameConfig, MatchMode, WildBonus},
    error::{SimError, SimResult},
    matching::{strategy_for, MatchStrategy},
    pool::WeightedPool,
    rng::SpinRng,
};

pub const CASCADE_SAFETY_CAP: u32 = 10_000;

/// Everything one resolved board produced.
#[derive(Debug, Clone)]
pub struct CascadeOutcome {
    /// Total win in currency units.
    pub win: f64,
    /// Highest scatter count observed on any step board. Tumblers
    /// accumulate scatters across cascades; the bonus triggers once.
    pub max_scatters: u32,
    /// Sum of Multiplier-symbol values on the initial board. Feeds the
    /// bonus sequence's global multiplier.
    pub multiplier_total: u64,
    /// Match-engine invocations it took to settle.
    pub steps: u32,
}

/// Owns the pieces needed to resolve boards for one game configuration.
pub struct CascadeResolver {
    config: GameConfig,
    pool: WeightedPool,
    rules: PlacementRules,
    matcher: Box<dyn MatchStrategy>,
}

impl CascadeResolver {
    pub fn new(config: &GameConfig) -> SimResult<Self> {
        config.validate()?;
        let pool = WeightedPool::new(config.pool.clone(), config.multiplier_values.clone())?;
        let rules = PlacementRules {
            wild_excluded_columns: config.wild_excluded_columns.clone(),
        };
        let matcher = strategy_for(&config.mode, config.multiplier_cap);
        Ok(Self {
            config: config.clone(),
            pool,
            rules,
            matcher,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Fill a fresh board and resolve it to settlement.
    pub fn resolve_fresh(&self, rng: &mut SpinRng) -> SimResult<CascadeOutcome> {
        let mut board = Board::fill(
            &self.pool,
            self.config.rows,
            self.config.cols,
            &self.rules,
            rng,
        )?;
        self.resolve_board(&mut board, rng)
    }

    /// Resolve a given board in place. The board is left in its settled
    /// state, fully occupied.
    pub fn resolve_board(&self, board: &mut Board, rng: &mut SpinRng) -> SimResult<CascadeOutcome> {
        let bet_per_spin = self.config.bet_per_spin();
        let positional = !matches!(self.config.mode, MatchMode::Paylines { .. });

        let mut total_win = 0.0;
        let mut max_scatters = 0u32;
        let multiplier_total = board.multiplier_sum();
        let mut steps = 0u32;

        loop {
            if steps >= CASCADE_SAFETY_CAP {
                return Err(SimError::CascadeCapExceeded {
                    cap: CASCADE_SAFETY_CAP,
                });
            }
            steps += 1;

            let hits = self.matcher.find_hits(board, &self.config.paytable);
            let mut match_win: f64 = hits.iter().map(|h| h.payout).sum::<f64>()
                * self.config.bet_per_line;

            // Positional modes scale the step's match win by the board's
            // multiplier sum; payline mode already applied per-line
            // multipliers inside the matcher.
            if positional && match_win > 0.0 {
                let mult = (board.multiplier_sum() as f64)
                    .max(1.0)
                    .min(self.config.multiplier_cap);
                match_win *= mult;
            }

            let scatters = board.scatter_count();
            max_scatters = max_scatters.max(scatters);
            let scatter_win = self.config.scatter_paytable.payout(scatters) * bet_per_spin;

            let mut step_win = match_win + scatter_win;
            if step_win <= 0.0 {
                break; // settled
            }

            if let WildBonus::PerWildDie { sides } = self.config.wild_bonus {
                let mut bonus = 0u64;
                for _ in 0..board.wild_count() {
                    bonus += 1 + rng.next_u64_below(u64::from(sides));
                }
                let factor = (bonus as f64).max(1.0).min(self.config.multiplier_cap);
                step_win *= factor;
            }

            total_win += step_win;
            log::trace!(
                "step {steps}: hits={} scatter={scatters} step_win={step_win:.4}",
                hits.len()
            );

            if !self.config.tumble {
                break;
            }

            let mut removed: Vec<usize> = hits.into_iter().flat_map(|h| h.cells).collect();
            if scatter_win > 0.0 {
                for (idx, sym) in board.cells().iter().enumerate() {
                    if sym.is_scatter() {
                        removed.push(idx);
                    }
                }
            }
            board.tumble(&removed, &self.pool, &self.rules, rng)?;
        }

        Ok(CascadeOutcome {
            win: total_win,
            max_scatters,
            multiplier_total,
            steps,
        })
    }
}
