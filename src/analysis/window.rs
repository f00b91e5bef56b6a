//! Sliding-window binning
//!
//! The window has a nominal width in x units but grows (by 10% per probe)
//! until it holds at least `minpoints` points, so sparse tails still get a
//! meaningful statistic. The centre advances by a quarter of the effective
//! window width each step.

const PROBE_FACTOR: f64 = 1.1;
const MAX_PROBES: usize = 500;
const MAX_STEPS: usize = 10_000;

/// Root of the mean square, the usual reducer for error curves
pub fn rms(values: &[f64]) -> f64 {
    (values.iter().map(|v| v * v).sum::<f64>() / values.len() as f64).sqrt()
}

/// Run the window over `(x, y)` and return `(centres, statistics)` sorted
/// by centre. `reducer` turns the y values of one window into a single
/// statistic.
///
/// `binwidth` defaults to 1/60 of the x range. `minpoints` is capped at the
/// number of points.
pub fn sliding_window(
    x: &[f64],
    y: &[f64],
    binwidth: Option<f64>,
    minpoints: usize,
    reducer: fn(&[f64]) -> f64,
) -> (Vec<f64>, Vec<f64>) {
    let mut pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .map(|(&x, &y)| (x, y))
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();
    if pairs.is_empty() {
        return (Vec::new(), Vec::new());
    }
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
    let xs: Vec<f64> = pairs.iter().map(|p| p.0).collect();
    let ys: Vec<f64> = pairs.iter().map(|p| p.1).collect();

    let n = xs.len();
    let x0 = xs[0];
    let xmax = xs[n - 1];
    let minpoints = minpoints.clamp(1, n);

    let binwidth = binwidth.unwrap_or((xmax - x0) / 60.0);
    if binwidth <= 0.0 || xmax <= x0 {
        let cx = xs.iter().sum::<f64>() / n as f64;
        return (vec![cx], vec![reducer(&ys)]);
    }
    let binhw = binwidth / 2.0;
    let stop_after = 0.8 * xmax + 0.2 * x0;

    let mut out: Vec<(f64, f64)> = Vec::new();
    let mut xc = x0;
    let mut prev_center = xc - 1.0;

    for _ in 0..MAX_STEPS {
        if xc - binhw >= xmax {
            break;
        }

        let mut ext = binhw;
        let mut range = window(&xs, xc, ext);
        let mut probes = 0;
        while range.len() < minpoints && probes < MAX_PROBES {
            ext *= PROBE_FACTOR;
            range = window(&xs, xc, ext);
            probes += 1;
        }
        if range.is_empty() {
            break;
        }

        let in_bin = &xs[range.clone()];
        let center = in_bin.iter().sum::<f64>() / in_bin.len() as f64;
        // Stepping backwards near the end means the window only grew
        if center < prev_center && center > stop_after {
            break;
        }
        prev_center = center;
        out.push((center, reducer(&ys[range.clone()])));

        let eff = (in_bin[in_bin.len() - 1] - in_bin[0]).max(binhw);
        xc += eff / 4.0;
    }

    out.sort_by(|a, b| a.0.total_cmp(&b.0));
    out.into_iter().unzip()
}

/// Index range of sorted `xs` inside `[xc - hw, xc + hw)`
fn window(xs: &[f64], xc: f64, hw: f64) -> std::ops::Range<usize> {
    let lo = xs.partition_point(|&v| v < xc - hw);
    let hi = xs.partition_point(|&v| v < xc + hw);
    lo..hi.max(lo)
}
