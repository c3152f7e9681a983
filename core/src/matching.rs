//! Match detection strategies.
//!
//! Two disciplines share one trait seam: payline scanning (left-anchored
//! contiguous runs along fixed index paths) and position-free matching
//! (connectivity clusters or whole-board tallies). The cascade resolver
//! only ever sees `MatchHit`s, so the disciplines are interchangeable.

use crate::{
    board::Board,
    config::{Adjacency, MatchMode, WildAllocation},
    paytable::PayoutTable,
    symbol::Symbol,
};
use std::collections::BTreeMap;

/// Minimum run/tally length that can ever pay.
pub const MIN_MATCH: u32 = 3;

/// One winning group found on a board.
#[derive(Debug, Clone)]
pub struct MatchHit {
    pub symbol: String,
    pub count: u32,
    /// Win in multiples of the line bet, any line multiplier applied.
    pub payout: f64,
    /// Cells to clear when the board tumbles.
    pub cells: Vec<usize>,
}

pub trait MatchStrategy: Send {
    fn name(&self) -> &'static str;
    fn find_hits(&self, board: &Board, paytable: &PayoutTable) -> Vec<MatchHit>;
}

pub fn strategy_for(mode: &MatchMode, multiplier_cap: f64) -> Box<dyn MatchStrategy> {
    match mode {
        MatchMode::Paylines { lines } => Box::new(PaylineMatcher {
            lines: lines.clone(),
            multiplier_cap,
        }),
        MatchMode::Cluster { min_size, adjacency } => Box::new(ClusterMatcher {
            min_size: *min_size,
            adjacency: *adjacency,
        }),
        MatchMode::CountAnywhere { wild_allocation } => Box::new(CountAnywhereMatcher {
            wild_allocation: *wild_allocation,
        }),
    }
}

// ── Payline scanning ───────────────────────────────────────────────

pub struct PaylineMatcher {
    pub lines: Vec<Vec<usize>>,
    pub multiplier_cap: f64,
}

impl PaylineMatcher {
    /// Longest left-anchored run the candidate achieves on the line.
    /// A Scatter or Multiplier cell terminates any run. A wild candidate
    /// extends only through consecutive wilds; a standard candidate
    /// accepts its own name or Wild.
    fn run_length(line_cells: &[&Symbol], candidate: Option<&str>) -> u32 {
        let mut count = 0;
        for sym in line_cells {
            let extends = match (candidate, sym) {
                (_, Symbol::Scatter) | (_, Symbol::Multiplier(_)) => false,
                (None, Symbol::Wild) => true,
                (None, _) => false,
                (Some(_), Symbol::Wild) => true,
                (Some(name), Symbol::Standard(cell)) => cell == name,
            };
            if !extends {
                break;
            }
            count += 1;
        }
        count
    }
}

impl MatchStrategy for PaylineMatcher {
    fn name(&self) -> &'static str {
        "paylines"
    }

    fn find_hits(&self, board: &Board, paytable: &PayoutTable) -> Vec<MatchHit> {
        let mut hits = Vec::new();
        for line in &self.lines {
            let line_cells: Vec<&Symbol> = line.iter().map(|&i| board.cell(i)).collect();

            // Multiplier cells on the path scale the whole line win.
            let line_multiplier = line_cells
                .iter()
                .filter_map(|s| match s {
                    Symbol::Multiplier(v) => Some(f64::from(*v)),
                    _ => None,
                })
                .product::<f64>()
                .min(self.multiplier_cap);

            // Every candidate gets its best achievable run; the line pays
            // the single highest-paying candidate (ties by payout).
            let mut best: Option<MatchHit> = None;
            let wild_run = Self::run_length(&line_cells, None);
            if wild_run >= MIN_MATCH {
                let payout = paytable.best_payout_at(wild_run) * line_multiplier;
                if payout > 0.0 {
                    best = Some(MatchHit {
                        symbol: "WILD".into(),
                        count: wild_run,
                        payout,
                        cells: line[..wild_run as usize].to_vec(),
                    });
                }
            }
            for name in paytable.0.keys() {
                let run = Self::run_length(&line_cells, Some(name));
                if run < MIN_MATCH {
                    continue;
                }
                let payout = paytable.payout(name, run) * line_multiplier;
                if payout <= 0.0 {
                    continue;
                }
                if best.as_ref().map_or(true, |b| payout > b.payout) {
                    best = Some(MatchHit {
                        symbol: name.clone(),
                        count: run,
                        payout,
                        cells: line[..run as usize].to_vec(),
                    });
                }
            }
            if let Some(hit) = best {
                hits.push(hit);
            }
        }
        hits
    }
}

// ── Connectivity clustering ────────────────────────────────────────

pub struct ClusterMatcher {
    pub min_size: usize,
    pub adjacency: Adjacency,
}

impl ClusterMatcher {
    fn neighbor_offsets(&self) -> &'static [(i32, i32)] {
        match self.adjacency {
            Adjacency::Four => &[(-1, 0), (1, 0), (0, -1), (0, 1)],
            Adjacency::Eight => &[
                (-1, 0),
                (1, 0),
                (0, -1),
                (0, 1),
                (-1, -1),
                (-1, 1),
                (1, -1),
                (1, 1),
            ],
        }
    }
}

impl MatchStrategy for ClusterMatcher {
    fn name(&self) -> &'static str {
        "cluster"
    }

    fn find_hits(&self, board: &Board, paytable: &PayoutTable) -> Vec<MatchHit> {
        let rows = board.rows() as i32;
        let cols = board.cols() as i32;
        let mut visited = vec![false; board.len()];
        let mut hits = Vec::new();

        for start in 0..board.len() {
            if visited[start] {
                continue;
            }
            visited[start] = true;
            let name = match board.cell(start).standard_name() {
                Some(name) => name.to_string(),
                None => continue, // scatter/wild/multiplier never cluster
            };

            let mut component = vec![start];
            let mut frontier = vec![start];
            while let Some(idx) = frontier.pop() {
                let r = (idx / board.cols()) as i32;
                let c = (idx % board.cols()) as i32;
                for &(dr, dc) in self.neighbor_offsets() {
                    let (nr, nc) = (r + dr, c + dc);
                    if nr < 0 || nr >= rows || nc < 0 || nc >= cols {
                        continue;
                    }
                    let nidx = (nr * cols + nc) as usize;
                    if visited[nidx] {
                        continue;
                    }
                    if board.cell(nidx).standard_name() == Some(name.as_str()) {
                        visited[nidx] = true;
                        component.push(nidx);
                        frontier.push(nidx);
                    }
                }
            }

            if component.len() < self.min_size {
                continue;
            }
            let count = component.len() as u32;
            let payout = paytable.payout(&name, count);
            if payout > 0.0 {
                hits.push(MatchHit {
                    symbol: name,
                    count,
                    payout,
                    cells: component,
                });
            }
        }
        hits
    }
}

// ── Global count-anywhere ──────────────────────────────────────────

pub struct CountAnywhereMatcher {
    pub wild_allocation: WildAllocation,
}

impl MatchStrategy for CountAnywhereMatcher {
    fn name(&self) -> &'static str {
        "count_anywhere"
    }

    fn find_hits(&self, board: &Board, paytable: &PayoutTable) -> Vec<MatchHit> {
        let mut tallies: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        let mut wild_cells: Vec<usize> = Vec::new();
        for (idx, sym) in board.cells().iter().enumerate() {
            match sym {
                Symbol::Standard(name) => tallies.entry(name).or_default().push(idx),
                Symbol::Wild => wild_cells.push(idx),
                Symbol::Scatter | Symbol::Multiplier(_) => {}
            }
        }
        let wilds = wild_cells.len() as u32;

        // Which group, if any, gets wild assistance.
        let assisted: Option<&str> = match self.wild_allocation {
            WildAllocation::Shared => None, // everyone, handled below
            WildAllocation::BestOnly => tallies
                .iter()
                .map(|(&name, cells)| {
                    (name, paytable.payout(name, cells.len() as u32 + wilds))
                })
                .filter(|&(_, pay)| pay > 0.0)
                .max_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(name, _)| name),
        };

        let mut hits = Vec::new();
        let mut wilds_spent = false;
        for (name, cells) in &tallies {
            let gets_wilds = match self.wild_allocation {
                WildAllocation::Shared => true,
                WildAllocation::BestOnly => assisted == Some(name),
            };
            let effective = cells.len() as u32 + if gets_wilds { wilds } else { 0 };
            if effective < MIN_MATCH {
                continue;
            }
            let payout = paytable.payout(name, effective);
            if payout <= 0.0 {
                continue;
            }
            let mut hit_cells = cells.clone();
            // Wild cells clear once, with the first winning group that
            // used them — never double-removed.
            if gets_wilds && wilds > 0 && !wilds_spent {
                hit_cells.extend_from_slice(&wild_cells);
                wilds_spent = true;
            }
            hits.push(MatchHit {
                symbol: name.to_string(),
                count: effective,
                payout,
                cells: hit_cells,
            });
        }
        hits
    }
}
