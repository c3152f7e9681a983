//! Deterministic random number generation.
//!
//! RULE: Nothing in the simulation may call any platform RNG directly.
//! All randomness flows through SpinRng instances seeded either from a
//! fixed-width 32-hex-char seed string or from OS entropy once, up front.
//!
//! The estimator and solver derive independent streams from a single
//! master seed via RngBank, so:
//!   - Adding a new probe never disturbs earlier probes' streams.
//!   - Any single stream is fully reproducible in isolation.

use crate::error::{SimError, SimResult};
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;
use serde::{Deserialize, Serialize};

/// How a simulation run should be seeded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SeedSpec {
    /// Fixed 32-hex-char (16-byte) seed. Shorter input is zero-padded,
    /// non-hex characters are stripped first.
    Hex(String),
    /// Seed from OS entropy. Not reproducible across runs.
    Random,
}

impl SeedSpec {
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("random") {
            SeedSpec::Random
        } else {
            SeedSpec::Hex(s.to_string())
        }
    }
}

/// The single RNG stream a spin sequence consumes.
pub struct SpinRng {
    inner: Pcg64Mcg,
}

impl SpinRng {
    pub fn from_seed_spec(spec: &SeedSpec) -> SimResult<Self> {
        match spec {
            SeedSpec::Hex(hex) => Self::from_hex_seed(hex),
            SeedSpec::Random => Ok(Self::from_entropy()),
        }
    }

    /// Seed from a hex string: strip non-hex chars, zero-pad to 32 chars,
    /// decode to 16 bytes. An all-invalid string is a configuration error.
    pub fn from_hex_seed(hex: &str) -> SimResult<Self> {
        let cleaned: String = hex.chars().filter(|c| c.is_ascii_hexdigit()).collect();
        if cleaned.is_empty() {
            return Err(SimError::Configuration(format!(
                "seed '{hex}' contains no hex digits"
            )));
        }
        let mut padded = cleaned;
        padded.truncate(32);
        while padded.len() < 32 {
            padded.push('0');
        }
        let mut seed = [0u8; 16];
        for (i, byte) in seed.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&padded[i * 2..i * 2 + 2], 16)
                .expect("padded string is valid hex");
        }
        Ok(Self {
            inner: Pcg64Mcg::from_seed(seed),
        })
    }

    pub fn from_entropy() -> Self {
        Self {
            inner: Pcg64Mcg::from_entropy(),
        }
    }

    fn from_u64_pair(hi: u64, lo: u64) -> Self {
        let mut seed = [0u8; 16];
        seed[..8].copy_from_slice(&hi.to_le_bytes());
        seed[8..].copy_from_slice(&lo.to_le_bytes());
        Self {
            inner: Pcg64Mcg::from_seed(seed),
        }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Draw a raw u64 (full range).
    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }
}

/// Derives independent, reproducible streams from one master seed.
/// Stream indices are stable; never reuse an index for a new purpose.
pub struct RngBank {
    master_hi: u64,
    master_lo: u64,
}

impl RngBank {
    pub fn from_seed_spec(spec: &SeedSpec) -> SimResult<Self> {
        let mut root = SpinRng::from_seed_spec(spec)?;
        Ok(Self {
            master_hi: root.next_u64(),
            master_lo: root.next_u64(),
        })
    }

    pub fn stream(&self, index: u64) -> SpinRng {
        let salt = index.wrapping_mul(0x9e37_79b9_7f4a_7c15);
        SpinRng::from_u64_pair(self.master_hi ^ salt, self.master_lo.wrapping_add(salt))
    }
}
