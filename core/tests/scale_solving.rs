//! Scale solving: linearity of RTP in the payout factor, bisection
//! convergence on a deterministic game, and the factor ceiling.

use slotlab_core::{
    config::{Adjacency, GameConfig, MatchMode, WildBonus},
    paytable::{FreeSpinAwardTable, PayoutTable, ScatterTable},
    pool::WeightedEntry,
    solver::FACTOR_CEILING,
    symbol::SymbolSpec,
    RngBank, RtpEstimator, ScaleSolver, SeedSpec, SpinRng,
};
use std::collections::BTreeMap;

/// Deterministic 400%-RTP cluster game (see rtp_estimation.rs).
fn constant_win_config() -> GameConfig {
    GameConfig {
        rows: 4,
        cols: 4,
        mode: MatchMode::Cluster {
            min_size: 3,
            adjacency: Adjacency::Four,
        },
        tumble: false,
        pool: vec![WeightedEntry {
            symbol: SymbolSpec::standard("A"),
            weight: 1.0,
        }],
        paytable: PayoutTable(
            [(
                "A".to_string(),
                [(3u32, 2.0), (4u32, 4.0)].into_iter().collect(),
            )]
            .into_iter()
            .collect::<BTreeMap<_, _>>(),
        ),
        scatter_paytable: ScatterTable::default(),
        free_spin_trigger: 3,
        free_spin_awards: FreeSpinAwardTable::default(),
        multiplier_values: vec![],
        multiplier_cap: 100.0,
        wild_bonus: WildBonus::None,
        wild_excluded_columns: vec![],
        bet_per_line: 1.0,
        bonus_spin_cap: 500,
    }
}

#[test]
fn rtp_is_linear_in_the_factor_on_a_common_stream() {
    // Scaling changes payout values, never control flow, so running the
    // base and the doubled game on identical streams doubles the RTP
    // exactly.
    let base = GameConfig::payline_classic();
    let doubled = base.scaled(2.0);

    let run = |config: &GameConfig| -> f64 {
        let estimator = RtpEstimator::new(config).unwrap();
        let mut rng = SpinRng::from_hex_seed("5eed5eed5eed5eed").unwrap();
        estimator.run(5_000, &mut rng).unwrap().rtp_percent
    };

    let rtp1 = run(&base);
    let rtp2 = run(&doubled);
    assert!(rtp1 > 0.0);
    assert!((rtp2 - 2.0 * rtp1).abs() < 1e-9, "rtp1={rtp1} rtp2={rtp2}");
}

#[test]
fn bisection_converges_on_a_deterministic_game() {
    // 400% at factor 1, so target 100% solves at exactly 0.25.
    let solver = ScaleSolver::new(&constant_win_config(), 100.0, 50, 200).unwrap();
    let bank = RngBank::from_seed_spec(&SeedSpec::Hex("feedface".into())).unwrap();
    let solution = solver.solve(&bank).unwrap();

    assert!(solution.converged);
    assert!(solution.factor >= 0.25);
    assert!((solution.factor - 0.25).abs() < 1e-6, "factor={}", solution.factor);
    assert!((solution.confirm.rtp_percent - 100.0).abs() < 1e-3);
    // One expansion probe plus the default thirty bisection probes.
    assert_eq!(solution.probes, 31);
}

#[test]
fn unreachable_target_reports_the_ceiling_unconverged() {
    let solver = ScaleSolver::new(&constant_win_config(), 1e12, 50, 50).unwrap();
    let bank = RngBank::from_seed_spec(&SeedSpec::Hex("0badf00d".into())).unwrap();
    let solution = solver.solve(&bank).unwrap();

    assert!(!solution.converged);
    assert_eq!(solution.factor, FACTOR_CEILING);
}

#[test]
fn solver_rejects_bad_parameters() {
    let config = constant_win_config();
    assert!(ScaleSolver::new(&config, 0.0, 100, 100).is_err());
    assert!(ScaleSolver::new(&config, -5.0, 100, 100).is_err());
    assert!(ScaleSolver::new(&config, 96.0, 0, 100).is_err());
    assert!(ScaleSolver::new(&config, 96.0, 100, 0).is_err());
}
