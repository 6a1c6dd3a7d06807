//! Smoothing filters, used to estimate the "truth" of noisy observations
use crate::differential::DiffTable;

/// [TruthEstimator] smoothes (denoises) a [DiffTable].
/// The estimate must have the same labels (same shape) as the input.
pub trait TruthEstimator {
    fn estimate(&self, table: &DiffTable) -> DiffTable;
}

/// Centered rolling median, applied to each satellite independently.
/// Undefined values do not contribute and remain undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MedianFilter {
    /// Window length, in number of samples
    pub window: usize,
}

impl Default for MedianFilter {
    fn default() -> Self {
        Self { window: 5 }
    }
}

impl MedianFilter {
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    fn smooth(&self, column: &[Option<f64>]) -> Vec<Option<f64>> {
        // even windows lean towards past samples
        let half = self.window / 2;
        (0..column.len())
            .map(|i| {
                column[i]?;
                let start = i.saturating_sub(half);
                let end = (i + self.window - half).min(column.len());
                median(column[start..end].iter().flatten().copied().collect())
            })
            .collect()
    }
}

impl TruthEstimator for MedianFilter {
    fn estimate(&self, table: &DiffTable) -> DiffTable {
        if self.window < 2 {
            return table.clone();
        }
        table.map_columns(|_, column| self.smooth(column))
    }
}

fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}
