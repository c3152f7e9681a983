//! Bonus-spin sequencing.
//!
//! Scatter hits enqueue free spins; free spins can re-trigger, so the
//! pending spins live in an explicit FIFO queue decoupled from the call
//! stack. A per-round cap bounds runaway compounding: awards past the cap
//! are truncated (wins already accrued stand), which is a statistical
//! policy, not an error.
//!
//! A global multiplier starts at 1, grows by the Multiplier-symbol values
//! each bonus spin brings in (capped), and scales every bonus spin's win.
//! Bonus spins charge no wager.

use crate::{
    cascade::{CascadeOutcome, CascadeResolver},
    config::GameConfig,
    error::SimResult,
    rng::SpinRng,
};
use std::collections::VecDeque;

/// One base spin, fully expanded.
#[derive(Debug, Clone)]
pub struct SpinResult {
    /// Base win plus all bonus-spin wins.
    pub total_win: f64,
    /// Scatter count of the base resolution.
    pub scatter_count: u32,
    /// Bonus spins actually played (post-truncation).
    pub bonus_spins: u32,
}

pub struct BonusSequencer {
    resolver: CascadeResolver,
}

impl BonusSequencer {
    pub fn new(config: &GameConfig) -> SimResult<Self> {
        Ok(Self {
            resolver: CascadeResolver::new(config)?,
        })
    }

    pub fn config(&self) -> &GameConfig {
        self.resolver.config()
    }

    /// Play one base spin and every bonus spin it cascades into.
    pub fn play_round(&self, rng: &mut SpinRng) -> SimResult<SpinResult> {
        let config = self.resolver.config();
        let base = self.resolver.resolve_fresh(rng)?;

        let mut queue: VecDeque<()> = VecDeque::new();
        let mut enqueued = 0u32;
        Self::enqueue_awards(config, &base, &mut queue, &mut enqueued);

        let mut total_win = base.win;
        let mut global_multiplier = 1.0f64;
        let mut played = 0u32;

        while queue.pop_front().is_some() {
            let outcome = self.resolver.resolve_fresh(rng)?;
            played += 1;

            // Contributions compound into every subsequent bonus win,
            // this one included.
            global_multiplier = (global_multiplier + outcome.multiplier_total as f64)
                .min(config.multiplier_cap);
            total_win += outcome.win * global_multiplier;

            Self::enqueue_awards(config, &outcome, &mut queue, &mut enqueued);
        }

        if played > 0 {
            log::debug!(
                "round: base_win={:.4} bonus_spins={played} global_mult={global_multiplier:.2} total={total_win:.4}",
                base.win
            );
        }

        Ok(SpinResult {
            total_win,
            scatter_count: base.max_scatters,
            bonus_spins: played,
        })
    }

    fn enqueue_awards(
        config: &GameConfig,
        outcome: &CascadeOutcome,
        queue: &mut VecDeque<()>,
        enqueued: &mut u32,
    ) {
        if outcome.max_scatters < config.free_spin_trigger {
            return;
        }
        let award = config.free_spin_awards.award(outcome.max_scatters);
        let room = config.bonus_spin_cap.saturating_sub(*enqueued);
        let granted = award.min(room);
        if granted < award {
            log::debug!(
                "bonus queue cap {} reached, truncating award {award} -> {granted}",
                config.bonus_spin_cap
            );
        }
        for _ in 0..granted {
            queue.push_back(());
        }
        *enqueued += granted;
    }
}
