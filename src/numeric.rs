use serde::Serialize;

use crate::{
    classify::parse_numeric,
    error::{SummaryError, SummaryResult},
};

/// Statistics for a column classified as numeric.
///
/// `count` includes every raw value of the column, numeric or not, while the
/// remaining figures only look at the values that parse. `numeric_count`
/// reports how many did. Quartiles interpolate linearly between the two
/// nearest ranks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub count: usize,
    pub numeric_count: usize,
    pub mean: f64,
    pub min: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub max: f64,
    pub std_dev: Option<f64>,
}

/// Summarizes the numeric subset of `values`.
///
/// Fails when no value parses; callers only reach this after classifying the
/// column as numeric.
pub fn summarize_numeric(column: &str, values: &[&str]) -> SummaryResult<NumericSummary> {
    let numbers = values
        .iter()
        .filter_map(|raw| parse_numeric(raw))
        .collect::<Vec<f64>>();
    if numbers.is_empty() {
        return Err(SummaryError::NoNumericValues {
            column: column.to_string(),
        });
    }

    let mut sorted = numbers.clone();
    sorted.sort_by(f64::total_cmp);
    let (min, max) = (sorted[0], sorted[sorted.len() - 1]);
    let moments = Moments::of(&numbers);

    Ok(NumericSummary {
        count: values.len(),
        numeric_count: numbers.len(),
        // Rounding can push the mean of near-identical values just outside
        // the observed range.
        mean: moments.mean.clamp(min, max),
        min,
        p25: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        p75: quantile(&sorted, 0.75),
        max,
        std_dev: moments.std_dev,
    })
}

struct Moments {
    mean: f64,
    std_dev: Option<f64>,
}

impl Moments {
    /// Mean and sample standard deviation of `numbers`.
    ///
    /// Values are divided by a power of two so that neither the running sum
    /// nor the squared deviations leave the `f64` range. Power-of-two scaling
    /// is exact, so ordinary inputs give the same result as the plain
    /// formulas.
    fn of(numbers: &[f64]) -> Self {
        let max_abs = numbers.iter().fold(0.0_f64, |acc, x| acc.max(x.abs()));
        let exponent = if max_abs > 1.0 {
            max_abs.log2().floor().min(1023.0) as i32
        } else {
            0
        };
        let scale = 2.0_f64.powi(exponent);

        let n = numbers.len() as f64;
        let scaled_mean = numbers.iter().map(|x| x / scale).sum::<f64>() / n;
        let std_dev = (numbers.len() >= 2).then(|| {
            let squares = numbers
                .iter()
                .map(|x| (x / scale - scaled_mean).powi(2))
                .sum::<f64>();
            (squares / (n - 1.0)).sqrt() * scale
        });

        Self {
            mean: scaled_mean * scale,
            std_dev,
        }
    }
}

/// Linear-interpolation quantile of an ascending, non-empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    let (low, high) = (sorted[lower], sorted[upper]);
    if weight == 0.0 || low == high {
        return low;
    }
    let spread = high - low;
    let value = if spread.is_finite() {
        low + spread * weight
    } else {
        low * (1.0 - weight) + high * weight
    };
    value.clamp(low, high)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_unparseable_values_but_counts_them() {
        let summary = summarize_numeric("score", &["1", "2", "x"]).expect("summary");

        assert_eq!(summary.count, 3);
        assert_eq!(summary.numeric_count, 2);
        assert_eq!(summary.mean, 1.5);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 2.0);
        let std_dev = summary.std_dev.expect("std_dev present");
        assert!((std_dev - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn single_value_has_no_std_dev() {
        let summary = summarize_numeric("score", &["7", ""]).expect("summary");

        assert_eq!(summary.count, 2);
        assert_eq!(summary.mean, 7.0);
        assert_eq!(summary.std_dev, None);
    }

    #[test]
    fn identical_values_have_zero_std_dev() {
        let summary = summarize_numeric("score", &["4", "4", "4"]).expect("summary");
        assert_eq!(summary.std_dev, Some(0.0));
    }

    #[test]
    fn sample_std_dev_uses_bessel_correction() {
        let summary =
            summarize_numeric("v", &["2", "4", "4", "4", "5", "5", "7", "9"]).expect("summary");

        assert_eq!(summary.mean, 5.0);
        let expected = (32.0_f64 / 7.0).sqrt();
        assert!((summary.std_dev.expect("std_dev") - expected).abs() < 1e-12);
    }

    #[test]
    fn extreme_magnitudes_stay_finite() {
        let summary =
            summarize_numeric("v", &["1e308", "1e308", "-1e308"]).expect("summary");

        let expected_mean = 1e308 / 3.0;
        assert!((summary.mean - expected_mean).abs() <= expected_mean * 1e-12);
        assert_eq!(summary.min, -1e308);
        assert_eq!(summary.max, 1e308);
        assert_eq!(summary.median, 1e308);
        let std_dev = summary.std_dev.expect("std_dev present");
        assert!(std_dev.is_finite());
        let expected_std = 1e308 * (4.0_f64 / 3.0).sqrt();
        assert!((std_dev - expected_std).abs() <= expected_std * 1e-12);
    }

    #[test]
    fn near_max_values_have_finite_mean() {
        let big = f64::MAX.to_string();
        let summary = summarize_numeric("v", &[big.as_str(), big.as_str()]).expect("summary");

        assert_eq!(summary.mean, f64::MAX);
        assert_eq!(summary.std_dev, Some(0.0));
    }

    #[test]
    fn quartiles_interpolate_between_ranks() {
        let summary = summarize_numeric("v", &["4", "1", "3", "2", "n/a"]).expect("summary");

        assert_eq!(summary.p25, 1.75);
        assert_eq!(summary.median, 2.5);
        assert_eq!(summary.p75, 3.25);
    }

    #[test]
    fn odd_count_median_is_middle_value() {
        let summary = summarize_numeric("v", &["9", "1", "5"]).expect("summary");

        assert_eq!(summary.median, 5.0);
        assert_eq!(summary.p25, 3.0);
        assert_eq!(summary.p75, 7.0);
    }

    #[test]
    fn column_without_numbers_is_rejected() {
        let err = summarize_numeric("city", &["NY", "LA"]).expect_err("no numbers");
        assert_eq!(
            err,
            SummaryError::NoNumericValues {
                column: "city".to_string()
            }
        );
    }
}
