//! Board generation and tumble compaction.
//!
//! Layout is row-major: cell (r, c) lives at index r * cols + c, row 0 at
//! the top. Gravity pulls survivors toward the highest row index; refills
//! enter from the top.
//!
//! RULE: a Board is never observed with an empty cell. Compaction works on
//! per-column scratch vectors and writes back a fully occupied column.

use crate::{
    error::{SimError, SimResult},
    pool::WeightedPool,
    rng::SpinRng,
    symbol::Symbol,
};

/// Per-cell redraws allowed before the fill is declared misconfigured
/// (e.g. wild-only pool with wild banned from the column being filled).
pub const REDRAW_CAP: u32 = 10_000;

/// Placement constraints applied on every draw, initial fill and refill alike.
#[derive(Debug, Clone, Default)]
pub struct PlacementRules {
    /// Columns where a Wild may not land (reel edges in the classic game).
    pub wild_excluded_columns: Vec<usize>,
}

impl PlacementRules {
    fn allows(&self, col: usize, symbol: &Symbol) -> bool {
        match symbol {
            Symbol::Wild => !self.wild_excluded_columns.contains(&col),
            _ => true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Symbol>,
}

impl Board {
    /// Populate a fresh rows×cols board from the pool. Each cell redraws
    /// until its constraints are met; the retry loop is per cell, never
    /// per spin, and is capped.
    pub fn fill(
        pool: &WeightedPool,
        rows: usize,
        cols: usize,
        rules: &PlacementRules,
        rng: &mut SpinRng,
    ) -> SimResult<Self> {
        let mut cells = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                cells.push(draw_for_column(pool, c, rules, rng, r)?);
            }
        }
        Ok(Self { rows, cols, cells })
    }

    /// Build a board from explicit cells. Test seam and replay hook.
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<Symbol>) -> SimResult<Self> {
        if cells.len() != rows * cols {
            return Err(SimError::Configuration(format!(
                "board needs {} cells, got {}",
                rows * cols,
                cells.len()
            )));
        }
        Ok(Self { rows, cols, cells })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn cell(&self, idx: usize) -> &Symbol {
        &self.cells[idx]
    }

    pub fn cells(&self) -> &[Symbol] {
        &self.cells
    }

    pub fn scatter_count(&self) -> u32 {
        self.cells.iter().filter(|s| s.is_scatter()).count() as u32
    }

    pub fn wild_count(&self) -> u32 {
        self.cells.iter().filter(|s| s.is_wild()).count() as u32
    }

    /// Sum of the values carried by Multiplier cells on the board.
    pub fn multiplier_sum(&self) -> u64 {
        self.cells
            .iter()
            .map(|s| match s {
                Symbol::Multiplier(v) => u64::from(*v),
                _ => 0,
            })
            .sum()
    }

    /// Remove the marked cells, drop survivors to the bottom of each
    /// column preserving their top-to-bottom order, and refill the vacated
    /// top cells from the pool.
    pub fn tumble(
        &mut self,
        removed: &[usize],
        pool: &WeightedPool,
        rules: &PlacementRules,
        rng: &mut SpinRng,
    ) -> SimResult<()> {
        let mut gone = vec![false; self.cells.len()];
        for &idx in removed {
            gone[idx] = true;
        }
        for c in 0..self.cols {
            // Survivors bottom-up, so survivors[0] is the lowest survivor.
            let mut survivors: Vec<Symbol> = Vec::with_capacity(self.rows);
            for r in (0..self.rows).rev() {
                let idx = self.index(r, c);
                if !gone[idx] {
                    survivors.push(self.cells[idx].clone());
                }
            }
            while survivors.len() < self.rows {
                survivors.push(draw_for_column(pool, c, rules, rng, 0)?);
            }
            for r in (0..self.rows).rev() {
                let idx = self.index(r, c);
                self.cells[idx] = survivors[self.rows - 1 - r].clone();
            }
        }
        Ok(())
    }
}

fn draw_for_column(
    pool: &WeightedPool,
    col: usize,
    rules: &PlacementRules,
    rng: &mut SpinRng,
    row: usize,
) -> SimResult<Symbol> {
    for _ in 0..REDRAW_CAP {
        let symbol = pool.draw(rng);
        if rules.allows(col, &symbol) {
            return Ok(symbol);
        }
    }
    Err(SimError::RedrawCapExceeded {
        cap: REDRAW_CAP,
        row,
        col,
    })
}
