//! Rectangle selection over the first series and batch vertical editing of
//! the points it isolates.
//!
//! The rectangle lives in chart-area pixels. A drag on empty chart area grows
//! a new rectangle; once released, pressing inside it grabs it, and moving it
//! vertically shifts every point of the runs found at grab time.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::{DataPoint, Range, Scalable};

/// Inclusive index run `[from, to]` into one series' points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub from: usize,
    pub to: usize,
}

/// Runs produced by one search, ascending and non-adjacent.
pub type IntervalSet = SmallVec<[Interval; 4]>;

/// Inclusive index bounds of a selection. May be empty (`max < min`) or
/// reach outside the series; the search clamps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRange {
    pub min: i64,
    pub max: i64,
}

impl IndexRange {
    #[must_use]
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self { min: 1, max: 0 }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.max < self.min
    }

    fn clamp_to(self, len: usize) -> Option<(usize, usize)> {
        if self.is_empty() || len == 0 || self.max < 0 {
            return None;
        }
        let last = i64::try_from(len - 1).unwrap_or(i64::MAX);
        if self.min > last {
            return None;
        }
        let lo = usize::try_from(self.min.max(0)).ok()?;
        let hi = usize::try_from(self.max.min(last)).ok()?;
        Some((lo, hi))
    }
}

/// Value predicate "strictly between `min` and `max`".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueBand {
    pub min: f64,
    pub max: f64,
}

impl ValueBand {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        let range = Range::new(min, max).normalized();
        Self {
            min: range.min,
            max: range.max,
        }
    }

    #[must_use]
    pub fn contains_strict(self, value: f64) -> bool {
        value > self.min && value < self.max
    }
}

/// Maximal runs of indices in `index_range` whose points satisfy `predicate`.
///
/// Scans upward from `index_range.min`: failing indices are skipped, and each
/// passing index opens a run that extends until the predicate fails or the
/// range ends. Empty series or empty ranges yield no runs.
pub fn search_intervals<F>(index_range: IndexRange, points: &[DataPoint], predicate: F) -> IntervalSet
where
    F: Fn(&DataPoint) -> bool,
{
    let mut intervals = IntervalSet::new();
    let Some((lo, hi)) = index_range.clamp_to(points.len()) else {
        return intervals;
    };

    let mut i = lo;
    while i <= hi {
        if !predicate(&points[i]) {
            i += 1;
            continue;
        }
        let mut j = i;
        while j <= hi && predicate(&points[j]) {
            j += 1;
        }
        intervals.push(Interval { from: i, to: j - 1 });
        i = j;
    }
    intervals
}

/// Pixel-space selection rectangle. `x`/`y` is the top-left corner;
/// `offset_y` is the transient vertical translation while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SelectionRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub offset_y: f64,
    pub visible: bool,
}

impl SelectionRect {
    /// Top edge as currently displayed.
    #[must_use]
    pub fn display_y(&self) -> f64 {
        self.y + self.offset_y
    }

    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.visible
            && x >= self.x
            && x <= self.x + self.width
            && y >= self.display_y()
            && y <= self.display_y() + self.height
    }

    // Width/height from signed deltas against the anchor, flipping the
    // origin on each axis where the delta is negative.
    fn grow_from(&mut self, anchor_x: f64, anchor_y: f64, x: f64, y: f64) {
        let w = x - anchor_x;
        let h = y - anchor_y;
        self.x = if w < 0.0 { anchor_x + w } else { anchor_x };
        self.y = if h < 0.0 { anchor_y + h } else { anchor_y };
        self.width = w.abs();
        self.height = h.abs();
    }
}

/// Lifecycle of the selection rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SelectionState {
    Idle,
    Growing { anchor_x: f64, anchor_y: f64 },
    Defined,
    Dragging { start_y: f64, last_y: f64 },
}

/// Pointer messages in chart-area pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SelectionEvent {
    PointerDown { x: f64, y: f64 },
    PointerDrag { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    /// Pointer capture lost; keeps the last known state.
    Cancel,
}

/// Effect of one selection event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionUpdate {
    Ignored,
    Started,
    Resized,
    Defined { intervals: usize },
    Grabbed { intervals: usize },
    Moved { delta: f64 },
    Released,
}

impl SelectionUpdate {
    /// Whether the chart needs a redraw.
    #[must_use]
    pub fn is_visible_change(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Scales and points a selection event works against. `points` is `None`
/// when the chart holds no series.
pub struct SelectionContext<'a> {
    pub x_scale: &'a dyn Scalable,
    pub y_scale: &'a dyn Scalable,
    pub points: Option<&'a mut Vec<DataPoint>>,
}

/// Selection state machine; one handler per state/event pair.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionEngine {
    state: SelectionState,
    rect: SelectionRect,
    x_select: IndexRange,
    y_select: ValueBand,
    intervals: IntervalSet,
    previous_y_move: f64,
}

impl Default for SelectionEngine {
    fn default() -> Self {
        Self {
            state: SelectionState::Idle,
            rect: SelectionRect::default(),
            x_select: IndexRange::empty(),
            y_select: ValueBand { min: 0.0, max: 0.0 },
            intervals: IntervalSet::new(),
            previous_y_move: 0.0,
        }
    }
}

impl SelectionEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> SelectionState {
        self.state
    }

    #[must_use]
    pub fn rect(&self) -> SelectionRect {
        self.rect
    }

    #[must_use]
    pub fn x_select(&self) -> IndexRange {
        self.x_select
    }

    #[must_use]
    pub fn y_select(&self) -> ValueBand {
        self.y_select
    }

    #[must_use]
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Hides the rectangle and forgets all runs.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn handle(&mut self, event: SelectionEvent, ctx: SelectionContext<'_>) -> SelectionUpdate {
        match (self.state, event) {
            (SelectionState::Defined, SelectionEvent::PointerDown { x, y })
                if self.rect.contains(x, y) =>
            {
                self.grab(y, ctx)
            }
            (
                SelectionState::Idle | SelectionState::Defined,
                SelectionEvent::PointerDown { x, y },
            ) => self.start(x, y),
            (SelectionState::Growing { anchor_x, anchor_y }, SelectionEvent::PointerDrag { x, y }) => {
                self.rect.grow_from(anchor_x, anchor_y, x, y);
                SelectionUpdate::Resized
            }
            (SelectionState::Growing { anchor_x, anchor_y }, SelectionEvent::PointerUp { x, y }) => {
                self.rect.grow_from(anchor_x, anchor_y, x, y);
                self.define(ctx)
            }
            (SelectionState::Growing { .. }, SelectionEvent::Cancel) => self.define(ctx),
            (SelectionState::Dragging { start_y, .. }, SelectionEvent::PointerDrag { y, .. }) => {
                self.drag_to(start_y, y, ctx)
            }
            (SelectionState::Dragging { start_y, .. }, SelectionEvent::PointerUp { y, .. }) => {
                self.drag_to(start_y, y, ctx);
                self.release(start_y, y)
            }
            (SelectionState::Dragging { start_y, last_y }, SelectionEvent::Cancel) => {
                self.release(start_y, last_y)
            }
            _ => SelectionUpdate::Ignored,
        }
    }

    fn start(&mut self, x: f64, y: f64) -> SelectionUpdate {
        self.rect = SelectionRect {
            x,
            y,
            width: 0.0,
            height: 0.0,
            offset_y: 0.0,
            visible: true,
        };
        self.intervals.clear();
        self.x_select = IndexRange::empty();
        self.previous_y_move = 0.0;
        self.state = SelectionState::Growing {
            anchor_x: x,
            anchor_y: y,
        };
        trace!(x, y, "selection started");
        SelectionUpdate::Started
    }

    fn define(&mut self, ctx: SelectionContext<'_>) -> SelectionUpdate {
        self.state = SelectionState::Defined;
        let count = self.compute_intervals(&ctx);
        debug!(
            x = self.rect.x,
            y = self.rect.y,
            width = self.rect.width,
            height = self.rect.height,
            intervals = count,
            "selection defined"
        );
        SelectionUpdate::Defined { intervals: count }
    }

    fn grab(&mut self, y: f64, ctx: SelectionContext<'_>) -> SelectionUpdate {
        let count = self.compute_intervals(&ctx);
        self.previous_y_move = 0.0;
        self.state = SelectionState::Dragging {
            start_y: y,
            last_y: y,
        };
        trace!(intervals = count, "selection grabbed");
        SelectionUpdate::Grabbed { intervals: count }
    }

    fn drag_to(&mut self, start_y: f64, y: f64, ctx: SelectionContext<'_>) -> SelectionUpdate {
        self.rect.offset_y = y - start_y;
        self.state = SelectionState::Dragging { start_y, last_y: y };

        let y_move = ctx.y_scale.to_data(y) - ctx.y_scale.to_data(start_y);
        let delta = y_move - self.previous_y_move;
        if let Some(points) = ctx.points {
            shift_intervals(points, &self.intervals, delta);
        }
        self.previous_y_move = y_move;
        trace!(y_move, delta, "selection moved");
        SelectionUpdate::Moved { delta }
    }

    fn release(&mut self, start_y: f64, y: f64) -> SelectionUpdate {
        self.rect.offset_y = 0.0;
        self.rect.y += y - start_y;
        self.state = SelectionState::Defined;
        trace!(y = self.rect.y, "selection released");
        SelectionUpdate::Released
    }

    // Converts the rectangle to data-space bounds and searches the runs.
    fn compute_intervals(&mut self, ctx: &SelectionContext<'_>) -> usize {
        let rect = self.rect;
        let left = ctx.x_scale.to_data(rect.x).floor() + 1.0;
        let right = ctx.x_scale.to_data(rect.x + rect.width).floor();
        self.x_select = if left.is_finite() && right.is_finite() {
            IndexRange::new(left as i64, right as i64)
        } else {
            IndexRange::empty()
        };
        self.y_select = ValueBand::new(
            ctx.y_scale.to_data(rect.y + rect.height),
            ctx.y_scale.to_data(rect.y),
        );

        let band = self.y_select;
        self.intervals = match ctx.points.as_deref() {
            Some(points) => {
                search_intervals(self.x_select, points, |p| band.contains_strict(p.y))
            }
            None => IntervalSet::new(),
        };
        self.intervals.len()
    }
}

/// Adds `delta` to the `y` of every point covered by `intervals`.
pub fn shift_intervals(points: &mut [DataPoint], intervals: &[Interval], delta: f64) {
    for interval in intervals {
        let end = interval.to.min(points.len().saturating_sub(1));
        if interval.from > end || points.is_empty() {
            continue;
        }
        for point in &mut points[interval.from..=end] {
            point.y += delta;
        }
    }
}
