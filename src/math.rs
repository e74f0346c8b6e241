use itertools::{Itertools, MinMaxResult};

/// Ratio assigned to ions detected in a group but absent from every other sample
pub const RATIO_SENTINEL: f64 = 99999.0;

/// Arithmetic mean of the present values, `None` when nothing is present
pub fn present_mean(x: &[Option<f64>]) -> Option<f64> {
    let (sum, count) = x
        .iter()
        .flatten()
        .fold((0.0f64, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Population standard deviation of the present values around `mean`
pub fn present_std(x: &[Option<f64>], mean: f64) -> Option<f64> {
    let (ss, count) = x
        .iter()
        .flatten()
        .fold((0.0f64, 0usize), |(ss, count), v| {
            (ss + (v - mean).powi(2), count + 1)
        });
    (count > 0).then(|| (ss / count as f64).sqrt())
}

/// True when the present values are all identical (or absent)
pub fn is_constant(x: &[Option<f64>]) -> bool {
    match x.iter().flatten().minmax() {
        MinMaxResult::NoElements | MinMaxResult::OneElement(_) => true,
        MinMaxResult::MinMax(min, max) => min == max,
    }
}

/// Maximum of the present values
pub fn present_max(x: &[Option<f64>]) -> Option<f64> {
    x.iter().flatten().copied().reduce(f64::max)
}

/// Base-10 logarithm, `None` for non-positive input or a non-finite result
pub fn log10_or_missing(x: Option<f64>) -> Option<f64> {
    x.filter(|v| *v > 0.0)
        .map(f64::log10)
        .filter(|v| v.is_finite())
}

/// Quotient of two means with infinities clamped to [`RATIO_SENTINEL`]
///
/// An undefined quotient (0/0) stays missing.
pub fn ratio_or_sentinel(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    let q = numerator? / denominator?;
    if q.is_infinite() {
        Some(RATIO_SENTINEL)
    } else if q.is_nan() {
        None
    } else {
        Some(q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_present_mean_skips_missing() {
        let x = vec![Some(1.), None, Some(2.), Some(3.)];
        assert_relative_eq!(present_mean(&x).unwrap(), 2.0);
        assert_eq!(present_mean(&[None, None]), None);
    }

    #[test]
    fn test_present_std_population() {
        let x = vec![Some(2.), Some(4.), None, Some(4.), Some(4.), Some(5.), Some(5.), Some(7.), Some(9.)];
        let mean = present_mean(&x).unwrap();
        assert_relative_eq!(mean, 5.0);
        assert_relative_eq!(present_std(&x, mean).unwrap(), 2.0);
    }

    #[test]
    fn test_is_constant() {
        assert!(is_constant(&[Some(1.5), None, Some(1.5)]));
        assert!(is_constant(&[Some(1.5)]));
        assert!(is_constant(&[None]));
        assert!(!is_constant(&[Some(1.5), Some(1.6)]));
    }

    #[test]
    fn test_present_max() {
        assert_eq!(present_max(&[Some(-1.), None, Some(3.), Some(2.)]), Some(3.));
        assert_eq!(present_max(&[None, None]), None);
    }

    #[test]
    fn test_log10_sentinel() {
        assert_relative_eq!(
            log10_or_missing(Some(RATIO_SENTINEL)).unwrap(),
            4.999995657,
            epsilon = 1e-8
        );
    }

    #[test]
    fn test_log10_non_positive_is_missing() {
        assert_eq!(log10_or_missing(Some(0.0)), None);
        assert_eq!(log10_or_missing(Some(-3.0)), None);
        assert_eq!(log10_or_missing(None), None);
        assert_relative_eq!(log10_or_missing(Some(100.0)).unwrap(), 2.0);
    }

    #[test]
    fn test_ratio_sentinel() {
        assert_eq!(ratio_or_sentinel(Some(11.0), Some(0.0)), Some(RATIO_SENTINEL));
        assert_eq!(ratio_or_sentinel(Some(0.0), Some(0.0)), None);
        assert_eq!(ratio_or_sentinel(None, Some(1.0)), None);
        assert_eq!(ratio_or_sentinel(Some(1.0), None), None);
        assert_relative_eq!(ratio_or_sentinel(Some(3.0), Some(2.0)).unwrap(), 1.5);
    }
}
