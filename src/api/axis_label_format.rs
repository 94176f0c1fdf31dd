/// Linear tick label with just enough decimals for `step`.
pub(super) fn format_linear_tick(value: f64, step: f64) -> String {
    let precision = decimals_for_step(step);
    let text = format!("{value:.precision$}");
    if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
        text[1..].to_owned()
    } else {
        text
    }
}

fn decimals_for_step(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 || step >= 1.0 {
        return 0;
    }
    let decimals = (-step.log10()).ceil();
    (decimals as usize).min(12)
}

/// Distance between the first two ticks, or `0` when fewer exist.
pub(super) fn tick_step(ticks: &[f64]) -> f64 {
    match ticks {
        [first, second, ..] => (second - first).abs(),
        _ => 0.0,
    }
}
