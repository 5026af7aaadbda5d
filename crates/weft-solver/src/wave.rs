//! Per-cell possibility state with incremental entropy bookkeeping.

use weft_core::UnitId;

/// The wave: for every cell, the set of still-possible units plus the
/// running sums that make entropy an O(1) read.
///
/// Entropy of a cell is the Shannon entropy of the weight distribution
/// over its remaining units,
/// `ln(Σw) − (Σ w·ln(w)) / Σw`,
/// maintained incrementally as units are banned rather than recomputed
/// by rescanning. The running sums accumulate bounded floating-point
/// drift; observable guarantees are kept exact where they matter:
/// entropy is clamped at zero, and a decided cell (one unit left)
/// reports exactly `0.0` without touching the accumulators.
///
/// Possibility counts only ever decrease. Once a cell reaches one unit
/// it is *decided*; zero units is a *contradiction*, which the caller
/// detects from [`ban`](Wave::ban)'s returned count.
#[derive(Clone, Debug)]
pub struct Wave {
    unit_count: u32,
    weights: Vec<f64>,
    weight_log_weights: Vec<f64>,
    // Flat cell-major possibility bits: possible[cell * unit_count + unit].
    possible: Vec<bool>,
    counts: Vec<u32>,
    weight_sums: Vec<f64>,
    weight_log_sums: Vec<f64>,
    entropies: Vec<f64>,
}

impl Wave {
    /// A wave of `cell_count` cells, each starting with every unit
    /// possible. `weights` are the per-unit selection weights; they
    /// must be finite and positive (the models guarantee this).
    pub fn new(cell_count: usize, weights: &[f64]) -> Self {
        debug_assert!(weights.iter().all(|w| w.is_finite() && *w > 0.0));
        let weight_log_weights: Vec<f64> = weights.iter().map(|w| w * w.ln()).collect();
        let weight_sum: f64 = weights.iter().sum();
        let weight_log_sum: f64 = weight_log_weights.iter().sum();
        let entropy = initial_entropy(weights.len(), weight_sum, weight_log_sum);

        Self {
            unit_count: weights.len() as u32,
            weights: weights.to_vec(),
            weight_log_weights,
            possible: vec![true; cell_count * weights.len()],
            counts: vec![weights.len() as u32; cell_count],
            weight_sums: vec![weight_sum; cell_count],
            weight_log_sums: vec![weight_log_sum; cell_count],
            entropies: vec![entropy; cell_count],
        }
    }

    /// Number of cells.
    pub fn cell_count(&self) -> usize {
        self.counts.len()
    }

    /// Number of units in the alphabet.
    pub fn unit_count(&self) -> u32 {
        self.unit_count
    }

    /// Whether `unit` is still possible in `cell`.
    pub fn is_possible(&self, cell: usize, unit: UnitId) -> bool {
        self.possible[cell * self.unit_count as usize + unit.index()]
    }

    /// Remaining possibility count of `cell`.
    pub fn count(&self, cell: usize) -> u32 {
        self.counts[cell]
    }

    /// Whether `cell` has exactly one unit left.
    pub fn is_decided(&self, cell: usize) -> bool {
        self.counts[cell] == 1
    }

    /// Whether every cell is decided.
    pub fn is_fully_collapsed(&self) -> bool {
        self.counts.iter().all(|&c| c == 1)
    }

    /// Entropy of `cell`. Exactly `0.0` when the cell is decided (or
    /// contradicted); positive otherwise.
    pub fn entropy(&self, cell: usize) -> f64 {
        if self.counts[cell] <= 1 {
            0.0
        } else {
            self.entropies[cell]
        }
    }

    /// Sum of the weights of `cell`'s remaining units. This is the
    /// denominator of the collapse draw.
    pub fn weight_sum(&self, cell: usize) -> f64 {
        self.weight_sums[cell]
    }

    /// The weight of one unit.
    pub fn weight(&self, unit: UnitId) -> f64 {
        self.weights[unit.index()]
    }

    /// Remove `unit` from `cell`'s possibility set.
    ///
    /// Returns `Some(remaining_count)` when the unit was possible —
    /// zero remaining is the contradiction signal — and `None` when the
    /// ban was a no-op because the unit was already gone.
    pub fn ban(&mut self, cell: usize, unit: UnitId) -> Option<u32> {
        let bit = cell * self.unit_count as usize + unit.index();
        if !self.possible[bit] {
            return None;
        }
        self.possible[bit] = false;
        self.counts[cell] -= 1;
        self.weight_sums[cell] -= self.weights[unit.index()];
        self.weight_log_sums[cell] -= self.weight_log_weights[unit.index()];
        if self.counts[cell] > 1 {
            let sum = self.weight_sums[cell];
            self.entropies[cell] = (sum.ln() - self.weight_log_sums[cell] / sum).max(0.0);
        }
        Some(self.counts[cell])
    }

    /// The single remaining unit of a decided cell, or `None` if the
    /// cell is still open or contradicted.
    pub fn decided_unit(&self, cell: usize) -> Option<UnitId> {
        if self.counts[cell] != 1 {
            return None;
        }
        self.possible_units(cell).next()
    }

    /// Iterate the still-possible units of `cell` in ascending ID order.
    pub fn possible_units(&self, cell: usize) -> impl Iterator<Item = UnitId> + '_ {
        let base = cell * self.unit_count as usize;
        self.possible[base..base + self.unit_count as usize]
            .iter()
            .enumerate()
            .filter(|(_, &p)| p)
            .map(|(i, _)| UnitId(i as u32))
    }
}

/// Entropy of the full alphabet, shared by every cell at start.
fn initial_entropy(count: usize, weight_sum: f64, weight_log_sum: f64) -> f64 {
    if count <= 1 {
        0.0
    } else {
        (weight_sum.ln() - weight_log_sum / weight_sum).max(0.0)
    }
}
