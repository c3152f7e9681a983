//! slotlab-core: Monte-Carlo RTP estimation and payout tuning for
//! reel/grid games with cascading match resolution.
//!
//! RULES:
//!   - All randomness flows through SpinRng; no platform RNG calls.
//!   - Configuration is immutable once a run starts; the solver works on
//!     scaled copies, never in place.
//!   - Identical config + identical seed ⇒ identical summary, bit for bit.

pub mod board;
pub mod bonus;
pub mod cascade;
pub mod config;
pub mod error;
pub mod estimator;
pub mod matching;
pub mod paytable;
pub mod pool;
pub mod rng;
pub mod solver;
pub mod stats;
pub mod symbol;

pub use bonus::{BonusSequencer, SpinResult};
pub use config::{GameConfig, MatchMode};
pub use error::{SimError, SimResult};
pub use estimator::{RtpEstimator, RtpSummary};
pub use rng::{RngBank, SeedSpec, SpinRng};
pub use solver::{ScaleSolution, ScaleSolver};
