//! Monte-Carlo RTP estimation.
//!
//! Runs N independent base spins (each expanding into bonus spins as the
//! sequencer dictates), charges one wager per base spin only, and folds
//! every spin's total win into a Welford accumulator. RTP is the mean win
//! over the per-spin wager; the 95% interval is mean ± 1.96 standard
//! errors, both expressed in percent.

use crate::{
    bonus::BonusSequencer,
    config::GameConfig,
    error::{SimError, SimResult},
    rng::SpinRng,
    stats::RunningStats,
};
use serde::Serialize;

/// Final summary of one estimation run. Plain data for callers to print
/// or serialize; the core does no report formatting.
#[derive(Debug, Clone, Serialize)]
pub struct RtpSummary {
    pub spins: u64,
    pub total_bet: f64,
    pub total_win: f64,
    pub rtp_percent: f64,
    pub mean_win: f64,
    pub stddev: f64,
    pub stderr: f64,
    pub ci95_low: f64,
    pub ci95_high: f64,
    pub min_win: f64,
    pub max_win: f64,
    pub bonus_spins: u64,
}

pub struct RtpEstimator {
    sequencer: BonusSequencer,
}

impl RtpEstimator {
    pub fn new(config: &GameConfig) -> SimResult<Self> {
        Ok(Self {
            sequencer: BonusSequencer::new(config)?,
        })
    }

    pub fn config(&self) -> &GameConfig {
        self.sequencer.config()
    }

    /// Estimate RTP over `spins` base spins drawn from `rng`.
    pub fn run(&self, spins: u64, rng: &mut SpinRng) -> SimResult<RtpSummary> {
        if spins == 0 {
            return Err(SimError::Configuration("zero spins requested".into()));
        }
        let bet_per_spin = self.sequencer.config().bet_per_spin();

        let mut stats = RunningStats::new();
        let mut bonus_spins = 0u64;
        for _ in 0..spins {
            let result = self.sequencer.play_round(rng)?;
            stats.push(result.total_win);
            bonus_spins += u64::from(result.bonus_spins);
        }

        let total_bet = bet_per_spin * spins as f64;
        let total_win = stats.mean() * spins as f64;
        let to_pct = 100.0 / bet_per_spin;
        let summary = RtpSummary {
            spins,
            total_bet,
            total_win,
            rtp_percent: stats.mean() * to_pct,
            mean_win: stats.mean(),
            stddev: stats.stddev(),
            stderr: stats.stderr(),
            ci95_low: (stats.mean() - 1.96 * stats.stderr()) * to_pct,
            ci95_high: (stats.mean() + 1.96 * stats.stderr()) * to_pct,
            min_win: stats.min(),
            max_win: stats.max(),
            bonus_spins,
        };
        log::info!(
            "estimate: spins={} rtp={:.4}% ± {:.4} (95% CI [{:.4}, {:.4}])",
            summary.spins,
            summary.rtp_percent,
            1.96 * summary.stderr * to_pct,
            summary.ci95_low,
            summary.ci95_high,
        );
        Ok(summary)
    }
}
