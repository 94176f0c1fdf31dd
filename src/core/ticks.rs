/// Preferred pixel distance between two linear-axis ticks.
pub const AXIS_TARGET_SPACING_PX: f64 = 60.0;

const MIN_TICKS: usize = 2;
const MAX_TICKS: usize = 12;

/// Number of ticks that fit an axis of `axis_span_px` pixels.
#[must_use]
pub fn axis_tick_target_count(axis_span_px: f64, target_spacing_px: f64) -> usize {
    if !axis_span_px.is_finite() || axis_span_px <= 0.0 {
        return MIN_TICKS;
    }
    if !target_spacing_px.is_finite() || target_spacing_px <= 0.0 {
        return MIN_TICKS;
    }

    let raw = (axis_span_px / target_spacing_px).floor() as usize + 1;
    raw.clamp(MIN_TICKS, MAX_TICKS)
}

/// Step of roughly `span / count` rounded to 1, 2 or 5 times a power of ten.
#[must_use]
pub fn nice_step(span: f64, count: usize) -> Option<f64> {
    if !span.is_finite() || span <= 0.0 || count == 0 {
        return None;
    }
    let raw = span / count as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let factor = if residual >= 7.0 {
        10.0
    } else if residual >= 3.0 {
        5.0
    } else if residual >= 1.5 {
        2.0
    } else {
        1.0
    };
    let step = factor * magnitude;
    step.is_finite().then_some(step)
}

/// Multiples of a nice step inside `[min, max]`.
#[must_use]
pub fn linear_ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    let (low, high) = if min <= max { (min, max) } else { (max, min) };
    let Some(step) = nice_step(high - low, count) else {
        return Vec::new();
    };

    let first = (low / step).ceil() as i64;
    let last = (high / step).floor() as i64;
    if last < first {
        return Vec::new();
    }
    (first..=last)
        .take(MAX_TICKS * 4)
        .map(|index| {
            let value = index as f64 * step;
            // No `-0` labels.
            if value.abs() < step * 1e-9 { 0.0 } else { value }
        })
        .collect()
}
