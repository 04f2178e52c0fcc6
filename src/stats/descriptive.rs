//! Descriptive statistics over the present values of one group.
//!
//! - mean: Kahan compensated summation.
//! - sample standard deviation: Welford's running update, divisor `n - 1`.
//! - quantiles: R-7 linear interpolation between order statistics, the
//!   default in R and pandas.

/// Compensated sum of `data`.
pub fn kahan_sum(data: &[f64]) -> f64 {
    let mut sum = 0.0;
    let mut c = 0.0;
    for &x in data {
        let y = x - c;
        let t = sum + y;
        c = (t - sum) - y;
        sum = t;
    }
    sum
}

/// `None` when `data` is empty.
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(kahan_sum(data) / data.len() as f64)
}

/// Running mean and sum of squared deviations.
#[derive(Debug, Default, Clone, Copy)]
pub struct Welford {
    n: u64,
    mean: f64,
    m2: f64,
}

impl Welford {
    pub fn update(&mut self, x: f64) {
        self.n += 1;
        let delta = x - self.mean;
        self.mean += delta / self.n as f64;
        self.m2 += delta * (x - self.mean);
    }

    /// Bessel-corrected; undefined below two observations.
    pub fn sample_variance(&self) -> Option<f64> {
        if self.n < 2 {
            return None;
        }
        Some(self.m2 / (self.n - 1) as f64)
    }
}

/// Sample standard deviation, `None` for fewer than two values.
pub fn sample_std(data: &[f64]) -> Option<f64> {
    let mut acc = Welford::default();
    for &x in data {
        acc.update(x);
    }
    acc.sample_variance().map(f64::sqrt)
}

/// R-7 quantile of data already sorted ascending.
///
/// With `h = (n - 1) * p`, returns `x[j] + (h - j) * (x[j+1] - x[j])` for
/// `j = floor(h)`. `None` for empty input or `p` outside `[0, 1]`.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 || !(0.0..=1.0).contains(&p) {
        return None;
    }
    if n == 1 {
        return Some(sorted[0]);
    }
    let h = (n - 1) as f64 * p;
    let j = h.floor() as usize;
    let g = h - h.floor();
    if j + 1 >= n {
        return Some(sorted[n - 1]);
    }
    Some(sorted[j] + g * (sorted[j + 1] - sorted[j]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quantile(data: &[f64], p: f64) -> Option<f64> {
        let mut sorted = data.to_vec();
        sorted.sort_by(f64::total_cmp);
        quantile_sorted(&sorted, p)
    }

    #[test]
    fn mean_basic() {
        assert_eq!(mean(&[10.0, 20.0]), Some(15.0));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn kahan_keeps_small_terms() {
        let mut v = vec![1.0e16];
        v.extend(std::iter::repeat(1.0).take(10));
        v.push(-1.0e16);
        assert_eq!(kahan_sum(&v), 10.0);
    }

    #[test]
    fn std_of_two_values() {
        let sd = sample_std(&[10.0, 20.0]).unwrap();
        assert!((sd - 7.0710678118654755).abs() < 1e-12);
    }

    #[test]
    fn std_reference_set() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((sample_std(&v).unwrap() - 2.138089935299395).abs() < 1e-12);
    }

    #[test]
    fn std_undefined_for_single_value() {
        assert_eq!(sample_std(&[3.0]), None);
        assert_eq!(sample_std(&[]), None);
    }

    #[test]
    fn quantile_interpolates() {
        // h = 3 * 0.25 = 0.75 → 1 + 0.75 * (2 - 1)
        assert!((quantile(&[4.0, 3.0, 2.0, 1.0], 0.25).unwrap() - 1.75).abs() < 1e-15);
    }

    #[test]
    fn quantile_interval_of_two() {
        // h = 0.025 → 10 + 0.025 * 10 ; h = 0.975 → 10 + 0.975 * 10
        let lb = quantile(&[20.0, 10.0], 0.025).unwrap();
        let ub = quantile(&[20.0, 10.0], 0.975).unwrap();
        assert!((lb - 10.25).abs() < 1e-12);
        assert!((ub - 19.75).abs() < 1e-12);
    }

    #[test]
    fn quantile_edges() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(quantile(&data, 0.0), Some(1.0));
        assert_eq!(quantile(&data, 1.0), Some(5.0));
        assert_eq!(quantile(&data, 0.5), Some(3.0));
        assert_eq!(quantile(&[42.0], 0.975), Some(42.0));
        assert_eq!(quantile(&[], 0.5), None);
        assert_eq!(quantile(&data, 1.5), None);
    }
}
