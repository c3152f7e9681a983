//! Payout-scale search.
//!
//! RTP is monotone non-decreasing in a scalar applied uniformly to the
//! payout and scatter tables, so the solver expands exponentially from
//! factor 1.0 until a probe meets the target, then bisects the bracket a
//! fixed number of times, keeping the tightest factor that still meets
//! target. A final high-sample run confirms the solved factor.
//!
//! Every probe is itself a Monte-Carlo estimate, so the search converges
//! on the expected RTP curve, not an exact root; repeated runs may land
//! on slightly different factors. Each probe draws from its own RngBank
//! stream so adding bisection iterations never disturbs earlier probes.

use crate::{
    config::GameConfig,
    error::{SimError, SimResult},
    estimator::{RtpEstimator, RtpSummary},
    rng::RngBank,
};
use serde::Serialize;

/// Expansion stops here. Hitting the ceiling without meeting target is
/// reported, never silently returned as a solution.
pub const FACTOR_CEILING: f64 = 1e8;

const CONFIRM_STREAM: u64 = 0;
const PROBE_STREAM_BASE: u64 = 1;

#[derive(Debug, Clone, Serialize)]
pub struct ScaleSolution {
    pub factor: f64,
    /// False when the exponential phase reached the ceiling without
    /// meeting target — the target may be unreachable for this game.
    pub converged: bool,
    pub probes: u32,
    /// High-sample estimate at the solved (or ceiling) factor.
    pub confirm: RtpSummary,
}

pub struct ScaleSolver {
    base: GameConfig,
    target_rtp_pct: f64,
    eval_spins: u64,
    confirm_spins: u64,
    bisect_iters: u32,
}

impl ScaleSolver {
    pub fn new(
        config: &GameConfig,
        target_rtp_pct: f64,
        eval_spins: u64,
        confirm_spins: u64,
    ) -> SimResult<Self> {
        config.validate()?;
        if !(target_rtp_pct > 0.0) {
            return Err(SimError::Configuration(format!(
                "target RTP must be positive, got {target_rtp_pct}%"
            )));
        }
        if eval_spins == 0 || confirm_spins == 0 {
            return Err(SimError::Configuration("zero spins requested".into()));
        }
        Ok(Self {
            base: config.clone(),
            target_rtp_pct,
            eval_spins,
            confirm_spins,
            bisect_iters: 30,
        })
    }

    pub fn with_bisect_iters(mut self, iters: u32) -> Self {
        self.bisect_iters = iters;
        self
    }

    pub fn solve(&self, bank: &RngBank) -> SimResult<ScaleSolution> {
        let mut probes = 0u32;
        let mut probe = |factor: f64| -> SimResult<f64> {
            let estimator = RtpEstimator::new(&self.base.scaled(factor))?;
            let mut rng = bank.stream(PROBE_STREAM_BASE + u64::from(probes));
            probes += 1;
            let summary = estimator.run(self.eval_spins, &mut rng)?;
            log::debug!(
                "probe {probes}: factor={factor:.6} -> rtp={:.4}%",
                summary.rtp_percent
            );
            Ok(summary.rtp_percent)
        };

        // Expansion: double until a probe meets target.
        let mut low = 0.0;
        let mut high = 1.0;
        loop {
            let rtp = probe(high)?;
            if rtp >= self.target_rtp_pct {
                break;
            }
            low = high;
            high *= 2.0;
            if high > FACTOR_CEILING {
                log::warn!(
                    "factor ceiling {FACTOR_CEILING:.0} reached below target {}%",
                    self.target_rtp_pct
                );
                return self.finish(FACTOR_CEILING, false, probes, bank);
            }
        }

        // Bisection: retain the tightest factor still meeting target.
        let mut best = high;
        for _ in 0..self.bisect_iters {
            let mid = (low + high) / 2.0;
            if probe(mid)? >= self.target_rtp_pct {
                best = mid;
                high = mid;
            } else {
                low = mid;
            }
        }

        self.finish(best, true, probes, bank)
    }

    fn finish(
        &self,
        factor: f64,
        converged: bool,
        probes: u32,
        bank: &RngBank,
    ) -> SimResult<ScaleSolution> {
        let estimator = RtpEstimator::new(&self.base.scaled(factor))?;
        let mut rng = bank.stream(CONFIRM_STREAM);
        let confirm = estimator.run(self.confirm_spins, &mut rng)?;
        log::info!(
            "solved: factor={factor:.6} converged={converged} confirm_rtp={:.4}%",
            confirm.rtp_percent
        );
        Ok(ScaleSolution {
            factor,
            converged,
            probes,
            confirm,
        })
    }
}
