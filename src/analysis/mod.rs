//! Numeric helpers behind the charts: point density, binned curves and
//! goodness-of-fit metrics.

pub mod kde;
pub mod window;

pub use kde::gaussian_kde_2d;
pub use window::{rms, sliding_window};

/// Root mean squared error of `predicted` against `truth`
pub fn rmse(truth: &[f64], predicted: &[f64]) -> Option<f64> {
    let n = paired_len(truth, predicted)?;
    let sum: f64 = truth
        .iter()
        .zip(predicted)
        .map(|(t, p)| (t - p).powi(2))
        .sum();
    Some((sum / n as f64).sqrt())
}

/// Mean error, `mean(predicted - truth)`
pub fn mean_error(truth: &[f64], predicted: &[f64]) -> Option<f64> {
    let n = paired_len(truth, predicted)?;
    let sum: f64 = truth.iter().zip(predicted).map(|(t, p)| p - t).sum();
    Some(sum / n as f64)
}

/// Coefficient of determination.
///
/// `None` for empty input or a constant truth vector.
pub fn r2(truth: &[f64], predicted: &[f64]) -> Option<f64> {
    let n = paired_len(truth, predicted)?;
    let mean = truth.iter().take(n).sum::<f64>() / n as f64;
    let ss_tot: f64 = truth.iter().take(n).map(|t| (t - mean).powi(2)).sum();
    if ss_tot == 0.0 {
        return None;
    }
    let ss_res: f64 = truth
        .iter()
        .zip(predicted)
        .map(|(t, p)| (t - p).powi(2))
        .sum();
    Some(1.0 - ss_res / ss_tot)
}

fn paired_len(a: &[f64], b: &[f64]) -> Option<usize> {
    match a.len().min(b.len()) {
        0 => None,
        n => Some(n),
    }
}

/// Metrics shown in a predicted-vs-true cell
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FitMetrics {
    pub rmse: Option<f64>,
    pub r2: Option<f64>,
    pub mean_error: Option<f64>,
}

impl FitMetrics {
    pub fn compute(truth: &[f64], predicted: &[f64]) -> Self {
        Self {
            rmse: rmse(truth, predicted),
            r2: r2(truth, predicted),
            mean_error: mean_error(truth, predicted),
        }
    }

    /// One label per metric, e.g. `RMSE = 0.12`
    pub fn lines(&self) -> Vec<String> {
        let fmt = |label: &str, v: Option<f64>| match v {
            Some(v) => format!("{} = {:.2}", label, v),
            None => format!("{} = n/a", label),
        };
        vec![
            fmt("RMSE", self.rmse),
            fmt("R²", self.r2),
            fmt("ME", self.mean_error),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_prediction() {
        let t = [1.0, 2.0, 3.0];
        assert_eq!(rmse(&t, &t), Some(0.0));
        assert_eq!(mean_error(&t, &t), Some(0.0));
        assert_eq!(r2(&t, &t), Some(1.0));
    }

    #[test]
    fn offset_prediction() {
        let t = [1.0, 2.0, 3.0];
        let p = [2.0, 3.0, 4.0];
        assert_eq!(rmse(&t, &p), Some(1.0));
        assert_eq!(mean_error(&t, &p), Some(1.0));
        // ss_res = 3, ss_tot = 2
        assert!((r2(&t, &p).unwrap() + 0.5).abs() < 1e-12);
    }

    #[test]
    fn degenerate_inputs() {
        assert_eq!(rmse(&[], &[]), None);
        assert_eq!(r2(&[2.0, 2.0], &[1.0, 3.0]), None);
    }

    #[test]
    fn metric_lines() {
        let m = FitMetrics::compute(&[1.0, 2.0, 3.0], &[2.0, 3.0, 4.0]);
        assert_eq!(m.lines(), vec!["RMSE = 1.00", "R² = -0.50", "ME = 1.00"]);
        assert_eq!(FitMetrics::default().lines()[0], "RMSE = n/a");
    }
}
