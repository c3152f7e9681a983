//! Payline scanning: left-anchored runs, wild substitution, best-paying
//! candidate per line, scatter/multiplier run termination.

use slotlab_core::{
    board::Board,
    matching::{MatchStrategy, PaylineMatcher},
    paytable::PayoutTable,
    symbol::Symbol,
};
use std::collections::BTreeMap;

fn std_sym(name: &str) -> Symbol {
    Symbol::Standard(name.to_string())
}

fn table(entries: &[(&str, &[(u32, f64)])]) -> PayoutTable {
    PayoutTable(
        entries
            .iter()
            .map(|(name, tiers)| {
                (
                    name.to_string(),
                    tiers.iter().copied().collect::<BTreeMap<u32, f64>>(),
                )
            })
            .collect(),
    )
}

fn matcher(cols: usize) -> PaylineMatcher {
    PaylineMatcher {
        lines: vec![(0..cols).collect()],
        multiplier_cap: 100.0,
    }
}

#[test]
fn three_of_a_kind_pays_the_table_value() {
    let board = Board::from_cells(1, 3, vec![std_sym("A"), std_sym("A"), std_sym("A")]).unwrap();
    let paytable = table(&[("A", &[(3, 5.0)])]);
    let hits = matcher(3).find_hits(&board, &paytable);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].symbol, "A");
    assert_eq!(hits[0].count, 3);
    assert_eq!(hits[0].payout, 5.0);
    assert_eq!(hits[0].cells, vec![0, 1, 2]);
}

#[test]
fn wild_substitutes_into_a_standard_run() {
    let board = Board::from_cells(1, 3, vec![std_sym("A"), std_sym("A"), Symbol::Wild]).unwrap();
    let paytable = table(&[("A", &[(3, 5.0)])]);
    let hits = matcher(3).find_hits(&board, &paytable);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].count, 3);
    assert_eq!(hits[0].payout, 5.0);
}

#[test]
fn broken_run_pays_nothing() {
    let board = Board::from_cells(1, 3, vec![std_sym("A"), std_sym("B"), std_sym("A")]).unwrap();
    let paytable = table(&[("A", &[(3, 5.0)]), ("B", &[(3, 5.0)])]);
    assert!(matcher(3).find_hits(&board, &paytable).is_empty());
}

#[test]
fn scatter_terminates_a_run() {
    let board = Board::from_cells(
        1,
        4,
        vec![std_sym("A"), std_sym("A"), Symbol::Scatter, std_sym("A")],
    )
    .unwrap();
    let paytable = table(&[("A", &[(3, 5.0)])]);
    assert!(matcher(4).find_hits(&board, &paytable).is_empty());
}

#[test]
fn best_paying_candidate_wins_the_line() {
    // Wild-led line: candidate B reaches 3 through the wild, the pure
    // wild run is only length 1 and the A run dies at position 1.
    let board = Board::from_cells(1, 3, vec![Symbol::Wild, std_sym("B"), std_sym("B")]).unwrap();
    let paytable = table(&[("A", &[(3, 5.0)]), ("B", &[(3, 1.0)])]);
    let hits = matcher(3).find_hits(&board, &paytable);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].symbol, "B");
    assert_eq!(hits[0].payout, 1.0);
}

#[test]
fn leading_wilds_count_for_the_richer_candidate() {
    // [W, W, A]: A's run is 3 (two wilds substitute) and outpays B's 0.
    let board = Board::from_cells(1, 3, vec![Symbol::Wild, Symbol::Wild, std_sym("A")]).unwrap();
    let paytable = table(&[("A", &[(3, 5.0)]), ("B", &[(3, 1.0)])]);
    let hits = matcher(3).find_hits(&board, &paytable);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].symbol, "A");
    assert_eq!(hits[0].payout, 5.0);
}

#[test]
fn pure_wild_run_prices_at_the_best_table() {
    let board = Board::from_cells(1, 3, vec![Symbol::Wild, Symbol::Wild, Symbol::Wild]).unwrap();
    let paytable = table(&[("A", &[(3, 5.0)]), ("B", &[(3, 1.0)])]);
    let hits = matcher(3).find_hits(&board, &paytable);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].payout, 5.0);
}

#[test]
fn multiplier_cell_scales_the_line_win() {
    // Run of three A, then a x2 multiplier cell on the same path. The
    // multiplier ends the run but still scales the line.
    let board = Board::from_cells(
        1,
        4,
        vec![std_sym("A"), std_sym("A"), std_sym("A"), Symbol::Multiplier(2)],
    )
    .unwrap();
    let paytable = table(&[("A", &[(3, 5.0)])]);
    let hits = matcher(4).find_hits(&board, &paytable);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].count, 3);
    assert_eq!(hits[0].payout, 10.0);
}

#[test]
fn each_line_contributes_at_most_one_win() {
    // Two paylines over a 2x3 board, each fully matched.
    let board = Board::from_cells(
        2,
        3,
        vec![
            std_sym("A"),
            std_sym("A"),
            std_sym("A"),
            std_sym("B"),
            std_sym("B"),
            std_sym("B"),
        ],
    )
    .unwrap();
    let paytable = table(&[("A", &[(3, 5.0)]), ("B", &[(3, 2.0)])]);
    let m = PaylineMatcher {
        lines: vec![vec![0, 1, 2], vec![3, 4, 5]],
        multiplier_cap: 100.0,
    };
    let hits = m.find_hits(&board, &paytable);
    assert_eq!(hits.len(), 2);
    let total: f64 = hits.iter().map(|h| h.payout).sum();
    assert_eq!(total, 7.0);
}
