use std::fmt;
use std::str::FromStr;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::scale::{
    Orientation, Scalable, Zoomable, linear_is_degenerate, linear_to_data, linear_to_pixel,
};
use crate::core::types::Range;
use crate::error::{ChartError, ChartResult};

/// Smallest visible span (ms) a zoom-in step may produce on a time axis.
pub const MIN_TIME_ZOOM_SPAN_MS: f64 = 10.0;

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

// Upper bound on unit steps walked while generating ticks.
const MAX_TICK_SCAN: usize = 100_000;

/// Interpretation of time-chart X values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeMode {
    /// X range is an offset from the first sample of the first series.
    #[default]
    Relative,
    /// X range holds epoch milliseconds.
    Absolute,
}

impl FromStr for TimeMode {
    type Err = ChartError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "relative" => Ok(Self::Relative),
            "absolute" => Ok(Self::Absolute),
            other => Err(ChartError::InvalidConfiguration(format!(
                "unrecognized time mode `{other}`"
            ))),
        }
    }
}

impl fmt::Display for TimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Relative => f.write_str("relative"),
            Self::Absolute => f.write_str("absolute"),
        }
    }
}

/// Calendar unit of a tick step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeUnit {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
}

/// Tick bucket of a time axis, declared coarsest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeGranularity {
    Years5,
    Years1,
    Months3,
    Months1,
    Weeks1,
    Days1,
    Hours3,
    Hours1,
    Minutes15,
    Minutes5,
    Minutes1,
    Seconds15,
    Seconds10,
    Seconds5,
    Seconds1,
    Millis100,
    Millis10,
    Millis1,
}

impl TimeGranularity {
    pub const ALL: [Self; 18] = [
        Self::Years5,
        Self::Years1,
        Self::Months3,
        Self::Months1,
        Self::Weeks1,
        Self::Days1,
        Self::Hours3,
        Self::Hours1,
        Self::Minutes15,
        Self::Minutes5,
        Self::Minutes1,
        Self::Seconds15,
        Self::Seconds10,
        Self::Seconds5,
        Self::Seconds1,
        Self::Millis100,
        Self::Millis10,
        Self::Millis1,
    ];

    /// Picks the bucket for a visible time span.
    ///
    /// Each level counts whole elapsed units of `max - min` and falls through
    /// to the next finer unit when the count is too small.
    #[must_use]
    pub fn select(min: f64, max: f64) -> Self {
        let span = (max - min).abs();
        if !span.is_finite() {
            return Self::Years5;
        }
        let count = |unit_ms: i64| (span / unit_ms as f64).floor();

        let days = count(MS_PER_DAY);
        if days > 1.0 {
            return if days > 3650.0 {
                Self::Years5
            } else if days > 730.0 {
                Self::Years1
            } else if days > 365.0 {
                Self::Months3
            } else if days > 60.0 {
                Self::Months1
            } else if days > 10.0 {
                Self::Weeks1
            } else {
                Self::Days1
            };
        }

        let hours = count(MS_PER_HOUR);
        if hours > 12.0 {
            return Self::Hours3;
        }
        if hours > 2.0 {
            return Self::Hours1;
        }

        let minutes = count(MS_PER_MINUTE);
        if minutes > 30.0 {
            return Self::Minutes15;
        }
        if minutes > 15.0 {
            return Self::Minutes5;
        }
        if minutes > 2.0 {
            return Self::Minutes1;
        }

        let seconds = count(MS_PER_SECOND);
        if seconds > 60.0 {
            Self::Seconds15
        } else if seconds > 30.0 {
            Self::Seconds10
        } else if seconds > 15.0 {
            Self::Seconds5
        } else if seconds > 1.0 {
            Self::Seconds1
        } else {
            let millis = span.floor();
            if millis > 150.0 {
                Self::Millis100
            } else if millis > 15.0 {
                Self::Millis10
            } else {
                Self::Millis1
            }
        }
    }

    /// `0` for the finest bucket, growing towards coarser ones.
    #[must_use]
    pub fn coarseness(self) -> usize {
        let position = Self::ALL
            .iter()
            .position(|candidate| *candidate == self)
            .unwrap_or(0);
        Self::ALL.len() - 1 - position
    }

    #[must_use]
    pub fn unit(self) -> TimeUnit {
        match self {
            Self::Years5 | Self::Years1 => TimeUnit::Year,
            Self::Months3 | Self::Months1 => TimeUnit::Month,
            Self::Weeks1 | Self::Days1 => TimeUnit::Day,
            Self::Hours3 | Self::Hours1 => TimeUnit::Hour,
            Self::Minutes15 | Self::Minutes5 | Self::Minutes1 => TimeUnit::Minute,
            Self::Seconds15 | Self::Seconds10 | Self::Seconds5 | Self::Seconds1 => {
                TimeUnit::Second
            }
            Self::Millis100 | Self::Millis10 | Self::Millis1 => TimeUnit::Millisecond,
        }
    }

    /// Number of units between two ticks.
    #[must_use]
    pub fn step(self) -> u32 {
        match self {
            Self::Years5 | Self::Minutes5 | Self::Seconds5 => 5,
            Self::Months3 | Self::Hours3 => 3,
            Self::Weeks1 => 7,
            Self::Minutes15 | Self::Seconds15 => 15,
            Self::Seconds10 | Self::Millis10 => 10,
            Self::Millis100 => 100,
            Self::Years1
            | Self::Months1
            | Self::Days1
            | Self::Hours1
            | Self::Minutes1
            | Self::Seconds1
            | Self::Millis1 => 1,
        }
    }

    /// Axis caption for the bucket.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self.unit() {
            TimeUnit::Year => "year",
            TimeUnit::Month => "month",
            TimeUnit::Day => "day",
            TimeUnit::Hour => "hr",
            TimeUnit::Minute => "min",
            TimeUnit::Second => "sec",
            TimeUnit::Millisecond => "msec",
        }
    }

    /// Tick label pattern in d3 notation.
    #[must_use]
    pub fn tick_format(self) -> &'static str {
        match self {
            Self::Years5 => "%y",
            Self::Years1 => "%Y",
            Self::Months3 => "%b'%y",
            Self::Months1 => "%b",
            Self::Weeks1 | Self::Days1 => "%a",
            Self::Hours3 | Self::Hours1 => "%H",
            Self::Minutes15 | Self::Minutes5 | Self::Minutes1 => "%M",
            Self::Seconds15 | Self::Seconds10 | Self::Seconds5 | Self::Seconds1 => "%S",
            Self::Millis100 | Self::Millis10 | Self::Millis1 => "%L",
        }
    }
}

/// Translates a d3 time pattern into chrono's strftime dialect.
#[must_use]
pub fn d3_pattern_to_chrono(pattern: &str) -> String {
    pattern.replace("%L", "%3f")
}

/// Rejects patterns chrono cannot interpret.
pub fn validate_time_pattern(pattern: &str) -> ChartResult<()> {
    let translated = d3_pattern_to_chrono(pattern);
    if translated.is_empty() {
        return Err(ChartError::InvalidConfiguration(
            "time format pattern must not be empty".to_owned(),
        ));
    }
    if StrftimeItems::new(&translated).any(|item| matches!(item, Item::Error)) {
        return Err(ChartError::InvalidConfiguration(format!(
            "malformed time format pattern `{pattern}`"
        )));
    }
    Ok(())
}

#[must_use]
pub fn millis_to_datetime(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(millis.floor() as i64)
}

/// Time scale over millisecond timestamps.
///
/// The granularity is derived from the domain on construction. Scales are
/// rebuilt from the live range on every read, so it always tracks zoom/pan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    domain: Range,
    extent: f64,
    granularity: TimeGranularity,
}

impl TimeScale {
    #[must_use]
    pub fn new(domain: Range, extent: f64) -> Self {
        Self {
            domain,
            extent,
            granularity: TimeGranularity::select(domain.min, domain.max),
        }
    }

    #[must_use]
    pub fn granularity(self) -> TimeGranularity {
        self.granularity
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        self.granularity.label()
    }

    #[must_use]
    pub fn to_datetime(self, pixel: f64) -> Option<DateTime<Utc>> {
        millis_to_datetime(self.to_data(pixel))
    }

    /// Tick timestamps inside the domain, aligned to the granularity step.
    #[must_use]
    pub fn ticks(self) -> Vec<f64> {
        if self.is_degenerate() {
            return Vec::new();
        }
        let domain = self.domain.normalized();
        let step = i64::from(self.granularity.step());
        match self.granularity.unit() {
            TimeUnit::Year | TimeUnit::Month | TimeUnit::Day => {
                calendar_ticks(domain, self.granularity.unit(), step)
            }
            TimeUnit::Hour => fixed_ticks(domain, MS_PER_HOUR, step, 24),
            TimeUnit::Minute => fixed_ticks(domain, MS_PER_MINUTE, step, 60),
            TimeUnit::Second => fixed_ticks(domain, MS_PER_SECOND, step, 60),
            TimeUnit::Millisecond => fixed_ticks(domain, 1, step, 1_000),
        }
    }

    /// Formats a tick timestamp with the granularity's pattern (UTC).
    #[must_use]
    pub fn format_tick(self, millis: f64) -> String {
        match millis_to_datetime(millis) {
            Some(time) => time
                .format(&d3_pattern_to_chrono(self.granularity.tick_format()))
                .to_string(),
            None => "nan".to_owned(),
        }
    }
}

impl Scalable for TimeScale {
    fn domain(&self) -> Range {
        self.domain
    }

    fn extent(&self) -> f64 {
        self.extent
    }

    fn to_pixel(&self, value: f64) -> f64 {
        linear_to_pixel(self.domain, self.extent, Orientation::Forward, value)
    }

    fn to_data(&self, pixel: f64) -> f64 {
        linear_to_data(self.domain, self.extent, Orientation::Forward, pixel)
    }

    fn is_degenerate(&self) -> bool {
        linear_is_degenerate(self.domain, self.extent)
    }
}

impl Zoomable for TimeScale {
    fn zoom_range(&self, range: &mut Range, k: f64, anchor: f64) -> bool {
        if k < 1.0 && range.span() * k < MIN_TIME_ZOOM_SPAN_MS {
            return false;
        }
        range.scale_around(k, anchor);
        true
    }
}

// Ticks for units with a fixed length. The step applies to the unit's field
// within its parent (hour of day, minute of hour, ...).
fn fixed_ticks(domain: Range, unit_ms: i64, step: i64, field_modulus: i64) -> Vec<f64> {
    if millis_to_datetime(domain.min).is_none() || millis_to_datetime(domain.max).is_none() {
        return Vec::new();
    }
    let start = domain.min.floor() as i64;
    let end = domain.max.ceil() as i64;
    let mut cursor = start - start.rem_euclid(unit_ms);
    let mut ticks = Vec::new();
    for _ in 0..MAX_TICK_SCAN {
        if cursor > end {
            break;
        }
        let field = (cursor / unit_ms).rem_euclid(field_modulus);
        let value = cursor as f64;
        if field % step == 0 && domain.contains(value) {
            ticks.push(value);
        }
        let Some(next) = cursor.checked_add(unit_ms) else {
            break;
        };
        cursor = next;
    }
    ticks
}

fn calendar_ticks(domain: Range, unit: TimeUnit, step: i64) -> Vec<f64> {
    let (Some(start), Some(end)) = (
        millis_to_datetime(domain.min),
        millis_to_datetime(domain.max),
    ) else {
        return Vec::new();
    };

    let first = match unit {
        TimeUnit::Year => NaiveDate::from_ymd_opt(start.year(), 1, 1),
        TimeUnit::Month => NaiveDate::from_ymd_opt(start.year(), start.month(), 1),
        _ => Some(start.date_naive()),
    };
    let Some(mut cursor) = first else {
        return Vec::new();
    };

    let mut ticks = Vec::new();
    for _ in 0..MAX_TICK_SCAN {
        if cursor > end.date_naive() {
            break;
        }
        let field = match unit {
            TimeUnit::Year => i64::from(cursor.year()),
            TimeUnit::Month => i64::from(cursor.month0()),
            _ => i64::from(cursor.day0()),
        };
        if field.rem_euclid(step) == 0 {
            if let Some(midnight) = cursor.and_hms_opt(0, 0, 0) {
                let value = midnight.and_utc().timestamp_millis() as f64;
                if domain.contains(value) {
                    ticks.push(value);
                }
            }
        }
        let next = match unit {
            TimeUnit::Year => NaiveDate::from_ymd_opt(cursor.year() + 1, 1, 1),
            TimeUnit::Month => cursor.checked_add_months(Months::new(1)),
            _ => cursor.succ_opt(),
        };
        match next {
            Some(next) => cursor = next,
            None => break,
        }
    }
    ticks
}
