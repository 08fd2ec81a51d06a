// ---------------------------------------------------------------------------
// Equal-width binning
// ---------------------------------------------------------------------------

/// Half-width used to widen a zero-range column so the single bin has extent.
const DEGENERATE_HALF_WIDTH: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BinError {
    #[error("no values to bin")]
    Empty,
    #[error("bin count must be at least 1")]
    ZeroBins,
}

/// One histogram bar: the half-open interval `[lower, upper)` and its count.
/// The last bin is closed so the maximum value is counted.
#[derive(Debug, Clone, PartialEq)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl Bin {
    pub fn center(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Split `[min, max]` of `values` into `n_bins` equal-width bins and count.
///
/// Counts always sum to `values.len()`.
pub fn equal_width_bins(values: &[f64], n_bins: usize) -> Result<Vec<Bin>, BinError> {
    if n_bins == 0 {
        return Err(BinError::ZeroBins);
    }
    if values.is_empty() {
        return Err(BinError::Empty);
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let (lo, hi) = if (max - min).abs() < f64::EPSILON {
        (min - DEGENERATE_HALF_WIDTH, max + DEGENERATE_HALF_WIDTH)
    } else {
        (min, max)
    };
    let width = (hi - lo) / n_bins as f64;

    let mut bins: Vec<Bin> = (0..n_bins)
        .map(|i| Bin {
            lower: lo + i as f64 * width,
            upper: if i + 1 == n_bins {
                hi
            } else {
                lo + (i + 1) as f64 * width
            },
            count: 0,
        })
        .collect();

    for &v in values {
        let idx = (((v - lo) / width).floor() as usize).min(n_bins - 1);
        bins[idx].count += 1;
    }

    Ok(bins)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_sum_to_input_length() {
        let values: Vec<f64> = (0..97).map(|i| (i * 37 % 101) as f64).collect();
        for n in [1, 2, 7, 30, 60, 200] {
            let bins = equal_width_bins(&values, n).unwrap();
            assert_eq!(bins.len(), n);
            assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
        }
    }

    #[test]
    fn single_bin_spans_full_range() {
        let bins = equal_width_bins(&[3200.0, 4500.0, 5700.0], 1).unwrap();
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].lower, 3200.0);
        assert_eq!(bins[0].upper, 5700.0);
        assert_eq!(bins[0].count, 3);
    }

    #[test]
    fn maximum_lands_in_last_bin() {
        let bins = equal_width_bins(&[0.0, 1.0, 2.0, 3.0, 4.0], 4).unwrap();
        assert_eq!(
            bins.iter().map(|b| b.count).collect::<Vec<_>>(),
            vec![1, 1, 1, 2]
        );
        assert_eq!(bins[1].lower, 1.0);
        assert_eq!(bins[1].width(), 1.0);
    }

    #[test]
    fn constant_column_is_widened() {
        let bins = equal_width_bins(&[5.0, 5.0, 5.0], 2).unwrap();
        assert_eq!(bins[0].lower, 4.5);
        assert_eq!(bins[1].upper, 5.5);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 3);
    }

    #[test]
    fn empty_and_zero_are_errors() {
        assert_eq!(equal_width_bins(&[], 3), Err(BinError::Empty));
        assert_eq!(equal_width_bins(&[1.0], 0), Err(BinError::ZeroBins));
    }
}
