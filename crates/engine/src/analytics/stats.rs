//! Small statistics helpers over f64 populations.

/// Linear-interpolation percentile (`p` in [0, 1]) over a pre-sorted
/// ascending slice. Returns 0.0 for an empty slice.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }
    let k = (sorted.len() - 1) as f64 * p;
    let lower = k.floor() as usize;
    let upper = k.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let fraction = k - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator). Zero for fewer than two
/// values.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentile_interpolates() {
        let values = [10.0, 20.0, 30.0, 40.0];
        assert!((percentile(&values, 0.0) - 10.0).abs() < 1e-9);
        assert!((percentile(&values, 1.0) - 40.0).abs() < 1e-9);
        assert!((percentile(&values, 0.5) - 25.0).abs() < 1e-9);
        assert!((percentile(&values, 0.25) - 17.5).abs() < 1e-9);
    }

    #[test]
    fn percentile_edge_cases() {
        assert_eq!(percentile(&[], 0.5), 0.0);
        assert!((percentile(&[42.0], 0.9) - 42.0).abs() < 1e-9);
    }

    #[test]
    fn mean_and_std_dev() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((mean(&values) - 5.0).abs() < 1e-9);
        // Sample variance 32/7.
        assert!((std_dev(&values) - (32.0_f64 / 7.0).sqrt()).abs() < 1e-9);
        assert_eq!(std_dev(&[1.0]), 0.0);
    }
}
