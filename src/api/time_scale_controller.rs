use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use tracing::debug;

use crate::core::{Range, TimeMode, d3_pattern_to_chrono, validate_time_pattern};
use crate::error::{ChartError, ChartResult};
use crate::interaction::Axis;
use crate::render::Renderer;

use super::{ChartEngine, ChartKind};

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn time_mode(&self) -> TimeMode {
        self.time_mode
    }

    #[must_use]
    pub fn time_format(&self) -> &str {
        &self.time_format
    }

    pub fn set_time_mode(&mut self, mode: TimeMode) {
        debug!(%mode, "set time mode");
        self.time_mode = mode;
    }

    /// Sets mode and label pattern together. A malformed pattern rejects
    /// the whole call and keeps the previous configuration.
    pub fn set_time_format(&mut self, mode: TimeMode, pattern: &str) -> ChartResult<()> {
        validate_time_pattern(pattern)?;
        debug!(%mode, pattern, "set time format");
        self.time_mode = mode;
        self.time_format = pattern.to_owned();
        Ok(())
    }

    /// Sets the X window to the duration between two labels, starting at
    /// `0` (relative) or now (absolute).
    ///
    /// Labels are parsed with `pattern`, or with the stored time format when
    /// it is `None`. They may hold a date and time, a time of day, or a date.
    pub fn set_time_range(
        &mut self,
        min_label: &str,
        max_label: &str,
        pattern: Option<&str>,
    ) -> ChartResult<()> {
        if self.kind != ChartKind::Time {
            return Err(ChartError::InvalidConfiguration(
                "time range requires a time chart".to_owned(),
            ));
        }
        let pattern = pattern.unwrap_or(self.time_format.as_str());
        validate_time_pattern(pattern)?;
        let min = parse_time_label(min_label, pattern)?;
        let max = parse_time_label(max_label, pattern)?;
        if max < min {
            return Err(ChartError::InvalidConfiguration(format!(
                "time label `{max_label}` precedes `{min_label}`"
            )));
        }

        let start = match self.time_mode {
            TimeMode::Relative => 0.0,
            TimeMode::Absolute => Utc::now().timestamp_millis() as f64,
        };
        self.x_range = Range::new(start, start + (max - min) as f64);
        debug!(
            min = self.x_range.min,
            max = self.x_range.max,
            mode = %self.time_mode,
            "set time range"
        );
        self.emit_range_changed(Axis::X);
        Ok(())
    }
}

/// Milliseconds represented by `label`: epoch millis for date(-time)
/// labels, millis since midnight for time-of-day labels.
pub(crate) fn parse_time_label(label: &str, pattern: &str) -> ChartResult<i64> {
    let format = d3_pattern_to_chrono(pattern);
    if let Ok(datetime) = NaiveDateTime::parse_from_str(label, &format) {
        return Ok(datetime.and_utc().timestamp_millis());
    }
    if let Ok(time) = NaiveTime::parse_from_str(label, &format) {
        let millis = time.nanosecond() / 1_000_000;
        return Ok(i64::from(time.num_seconds_from_midnight()) * 1_000 + i64::from(millis));
    }
    if let Ok(date) = NaiveDate::parse_from_str(label, &format) {
        return Ok(date.and_time(NaiveTime::default()).and_utc().timestamp_millis());
    }
    Err(ChartError::InvalidConfiguration(format!(
        "time label `{label}` does not match `{pattern}`"
    )))
}

#[cfg(test)]
mod tests {
    use super::parse_time_label;

    #[test]
    fn time_of_day_is_millis_since_midnight() {
        assert_eq!(parse_time_label("00:01:30", "%H:%M:%S").ok(), Some(90_000));
        assert_eq!(parse_time_label("00:00:01.250", "%H:%M:%S%.3f").ok(), Some(1_250));
    }

    #[test]
    fn dates_parse_to_midnight_utc() {
        let a = parse_time_label("2024-01-01", "%Y-%m-%d").expect("date parses");
        let b = parse_time_label("2024-01-02", "%Y-%m-%d").expect("date parses");
        assert_eq!(b - a, 86_400_000);
    }

    #[test]
    fn mismatched_label_is_rejected() {
        assert!(parse_time_label("noon", "%H:%M").is_err());
    }
}
