//! Statistical primitives: rolling sample deviation and least-squares line fit.

/// Rolling sample standard deviation (divisor `window - 1`).
///
/// Output has the same length as `data`. The first `window - 1` entries, and
/// any window containing a non-finite value, are `NaN`. A window of identical
/// values has deviation exactly 0.
pub fn rolling_std(data: &[f64], window: usize) -> Vec<f64> {
    let n = data.len();
    if window < 2 {
        return vec![f64::NAN; n];
    }

    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        if i + 1 < window {
            out.push(f64::NAN);
            continue;
        }
        let w = &data[i + 1 - window..=i];
        out.push(sample_std(w));
    }
    out
}

fn sample_std(w: &[f64]) -> f64 {
    if w.iter().any(|v| !v.is_finite()) {
        return f64::NAN;
    }
    let first = w[0];
    if w.iter().all(|&v| v == first) {
        return 0.0;
    }
    let len = w.len() as f64;
    let mean = w.iter().sum::<f64>() / len;
    let sum_sq: f64 = w.iter().map(|x| (x - mean).powi(2)).sum();
    (sum_sq / (len - 1.0)).sqrt()
}

/// Ordinary least squares line `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Fit against `(x, y)` pairs. Needs at least two distinct `x` values.
    pub fn fit(points: &[(f64, f64)]) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        let n = points.len() as f64;
        let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
        let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;

        let sxx: f64 = points.iter().map(|p| (p.0 - mean_x).powi(2)).sum();
        if sxx.abs() < 1e-12 {
            return None;
        }
        let sxy: f64 = points.iter().map(|p| (p.0 - mean_x) * (p.1 - mean_y)).sum();

        let slope = sxy / sxx;
        Some(Self {
            slope,
            intercept: mean_y - slope * mean_x,
        })
    }

    pub fn predict_at(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}
