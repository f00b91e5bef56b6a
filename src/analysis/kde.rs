//! Two-dimensional Gaussian kernel density estimate
//!
//! Same estimator as `scipy.stats.gaussian_kde` with Scott's rule: the
//! kernel covariance is the sample covariance scaled by `n^(-1/6)` squared.
//! Quadratic in the number of points, which is fine for a few thousand
//! galaxies.

use std::f64::consts::PI;

/// Density of each input point under the KDE of all points.
///
/// Fewer than three points, or points on a line (singular covariance),
/// yield a uniform density of 1.0.
pub fn gaussian_kde_2d(x: &[f64], y: &[f64]) -> Vec<f64> {
    let n = x.len().min(y.len());
    if n < 3 {
        return vec![1.0; n];
    }
    let nf = n as f64;

    let mx = x[..n].iter().sum::<f64>() / nf;
    let my = y[..n].iter().sum::<f64>() / nf;
    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for i in 0..n {
        let dx = x[i] - mx;
        let dy = y[i] - my;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }
    let ddof = nf - 1.0;
    let factor2 = nf.powf(-1.0 / 6.0).powi(2);
    let (a, b, d) = (sxx / ddof * factor2, sxy / ddof * factor2, syy / ddof * factor2);

    let det = a * d - b * b;
    if !(det.is_finite() && det > f64::EPSILON * (a * d).abs().max(f64::MIN_POSITIVE)) {
        tracing::debug!("KDE covariance is singular, using uniform density");
        return vec![1.0; n];
    }
    // Inverse of [[a, b], [b, d]]
    let (ia, ib, id) = (d / det, -b / det, a / det);
    let norm = 1.0 / (2.0 * PI * det.sqrt() * nf);

    (0..n)
        .map(|i| {
            let mut sum = 0.0;
            for j in 0..n {
                let dx = x[i] - x[j];
                let dy = y[i] - y[j];
                let q = ia * dx * dx + 2.0 * ib * dx * dy + id * dy * dy;
                sum += (-0.5 * q).exp();
            }
            sum * norm
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dense_core_beats_outlier() {
        let mut x = vec![0.0, 0.1, -0.1, 0.05, -0.05, 0.0, 0.02];
        let mut y = vec![0.0, 0.05, -0.05, 0.1, -0.1, 0.02, 0.0];
        x.push(3.0);
        y.push(-2.5);

        let density = gaussian_kde_2d(&x, &y);
        assert_eq!(density.len(), 8);
        let outlier = density[7];
        assert!(density[..7].iter().all(|&d| d > outlier));
        assert!(density.iter().all(|d| d.is_finite() && *d > 0.0));
    }

    #[test]
    fn tiny_or_degenerate_input_is_uniform() {
        assert_eq!(gaussian_kde_2d(&[1.0, 2.0], &[1.0, 2.0]), vec![1.0, 1.0]);
        // Collinear points have a singular covariance
        let x = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(gaussian_kde_2d(&x, &x), vec![1.0; 4]);
    }

    #[test]
    fn symmetric_points_share_density() {
        let x = [-1.0, 1.0, 0.0, 0.0];
        let y = [0.0, 0.0, -1.0, 1.0];
        let d = gaussian_kde_2d(&x, &y);
        assert!((d[0] - d[1]).abs() < 1e-12);
        assert!((d[2] - d[3]).abs() < 1e-12);
    }
}
