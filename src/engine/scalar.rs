/// Arithmetic mean. Returns 0.0 for an empty slice by convention.
pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Population standard deviation (sum of squared deviations over n,
/// not n - 1). Returns 0.0 when fewer than two observations.
pub fn population_std(xs: &[f64]) -> f64 {
    if xs.len() < 2 {
        return 0.0;
    }

    let m = mean(xs);
    let sum_sq: f64 = xs.iter().map(|x| (x - m) * (x - m)).sum();
    (sum_sq / xs.len() as f64).sqrt()
}

/// Coefficient of variation as a percentage of the mean. Returns 0.0
/// whenever the mean is non-positive.
pub fn cv_percent(xs: &[f64]) -> f64 {
    let m = mean(xs);
    if m > 0.0 { population_std(xs) / m * 100.0 } else { 0.0 }
}

/// Pearson correlation between two paired sequences. Returns 0.0 when
/// fewer than two pairs or when either variance term vanishes. The
/// result is never clamped.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return 0.0;
    }

    let mx = mean(&xs[..n]);
    let my = mean(&ys[..n]);

    let mut num = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for i in 0..n {
        let dx = xs[i] - mx;
        let dy = ys[i] - my;
        num += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let den = (var_x * var_y).sqrt();
    if den > 0.0 { num / den } else { 0.0 }
}
