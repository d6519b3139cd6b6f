//! 2D histogram
//!
//! Regular bins spanning the data range of each axis, the last bin including the
//! right edge. An axis with a single value spans that value ± 0.5.

/// Default number of bins along each axis
pub const BINS: usize = 200;
/// Largest number of bins along each axis
pub const MAX_BINS: usize = 4096;

#[derive(Debug, thiserror::Error)]
pub enum HistogramError {
    #[error("expected 1 to {max} bins along each axis, found {0}", max = MAX_BINS)]
    Bins(usize),
}

fn extent(values: impl Iterator<Item = f64> + Clone) -> (f64, f64) {
    let min = values.clone().fold(f64::INFINITY, f64::min);
    let max = values.fold(f64::NEG_INFINITY, f64::max);
    if min > max {
        (0., 1.)
    } else if min == max {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    }
}

fn bin_index(value: f64, (lo, hi): (f64, f64), bins: usize) -> usize {
    let u = (value - lo) / (hi - lo);
    ((u * bins as f64).floor() as usize).min(bins - 1)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Histogram2d {
    bins: usize,
    x_range: (f64, f64),
    y_range: (f64, f64),
    /// row-major counts, a row per y bin
    counts: Vec<usize>,
}
impl Histogram2d {
    /// Bins the points into `bins x bins` cells, ignoring the non-finite points
    ///
    /// `bins` must be within `1..=MAX_BINS`.
    pub fn new(
        points: impl Iterator<Item = (f64, f64)>,
        bins: usize,
    ) -> Result<Self, HistogramError> {
        let n_cells = match bins {
            1..=MAX_BINS => bins.checked_mul(bins).ok_or(HistogramError::Bins(bins))?,
            _ => return Err(HistogramError::Bins(bins)),
        };
        let (points, non_finite): (Vec<_>, Vec<_>) =
            points.partition(|(x, y)| x.is_finite() && y.is_finite());
        if !non_finite.is_empty() {
            log::warn!("{} non-finite points left out of the histogram", non_finite.len());
        }
        let x_range = extent(points.iter().map(|p| p.0));
        let y_range = extent(points.iter().map(|p| p.1));
        let mut counts = vec![0usize; n_cells];
        for &(x, y) in &points {
            let i = bin_index(x, x_range, bins);
            let j = bin_index(y, y_range, bins);
            counts[j * bins + i] += 1;
        }
        Ok(Self {
            bins,
            x_range,
            y_range,
            counts,
        })
    }
    /// Number of bins along each axis
    pub fn bins(&self) -> usize {
        self.bins
    }
    pub fn x_range(&self) -> (f64, f64) {
        self.x_range
    }
    pub fn y_range(&self) -> (f64, f64) {
        self.y_range
    }
    /// Returns the count in the `i`th x bin and `j`th y bin
    pub fn count(&self, i: usize, j: usize) -> usize {
        self.counts[j * self.bins + i]
    }
    pub fn max_count(&self) -> usize {
        self.counts.iter().cloned().max().unwrap_or(0)
    }
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
    fn edges((lo, hi): (f64, f64), bins: usize) -> Vec<f64> {
        let step = (hi - lo) / bins as f64;
        (0..=bins)
            .map(|k| if k == bins { hi } else { lo + k as f64 * step })
            .collect()
    }
    pub fn x_edges(&self) -> Vec<f64> {
        Self::edges(self.x_range, self.bins)
    }
    pub fn y_edges(&self) -> Vec<f64> {
        Self::edges(self.y_range, self.bins)
    }
    /// Iterator over the cells `((x_lo, x_hi), (y_lo, y_hi), count)`
    pub fn cells(&self) -> impl Iterator<Item = ((f64, f64), (f64, f64), usize)> + '_ {
        let x_edges = self.x_edges();
        let y_edges = self.y_edges();
        self.counts.iter().enumerate().map(move |(k, &count)| {
            let (i, j) = (k % self.bins, k / self.bins);
            (
                (x_edges[i], x_edges[i + 1]),
                (y_edges[j], y_edges[j + 1]),
                count,
            )
        })
    }
}
