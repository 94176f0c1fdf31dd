use crate::core::{
    AXIS_TARGET_SPACING_PX, ProjectionContext, Scalable, Series, SeriesKind,
    axis_tick_target_count, linear_ticks, project_areas, project_bars, project_line_segments,
    project_scatter,
};
use crate::render::{
    CirclePrimitive, LinePrimitive, LineStrokeStyle, PolygonPrimitive, RectPrimitive,
    RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

use super::ChartEngine;
use super::axis_label_format::{format_linear_tick, tick_step};
use super::scale_coordinator::XScale;

const LINE_STROKE_WIDTH: f64 = 1.5;
const GRID_STROKE_WIDTH: f64 = 1.0;
const LABEL_GAP_PX: f64 = 4.0;

impl<R: Renderer> ChartEngine<R> {
    /// Materializes the current state as draw commands in viewport pixels.
    #[must_use]
    pub fn build_render_frame(&self) -> RenderFrame {
        let mut frame = RenderFrame::new(self.viewport);
        let margin = self.style.margin;
        let (width, height) = self.chart_area();

        frame.rects.push(RectPrimitive::new(
            margin.left,
            margin.top,
            width,
            height,
            self.style.chart_background,
        ));

        let x_scale = self.x_scale();
        let y_scale = self.y_scale();
        let ctx = ProjectionContext {
            x_scale: &x_scale,
            y_scale: &y_scale,
            x_range: self.x_range,
            y_range: self.y_range,
            origin: self.time_origin(),
        };
        let bar_opacity = self.series.bar_opacity();
        for series in self.series.iter() {
            self.push_series(&mut frame, series, ctx, bar_opacity);
        }

        let rect = self.selection.rect();
        if rect.visible {
            frame.rects.push(RectPrimitive::new(
                margin.left + rect.x,
                margin.top + rect.display_y(),
                rect.width,
                rect.height,
                self.style.select_box_color,
            ));
        }

        self.push_x_axis(&mut frame, &x_scale);
        self.push_y_axis(&mut frame);
        frame
    }

    fn push_series(
        &self,
        frame: &mut RenderFrame,
        series: &Series,
        ctx: ProjectionContext<'_>,
        bar_opacity: f64,
    ) {
        let (dx, dy) = (self.style.margin.left, self.style.margin.top);
        match series.kind {
            SeriesKind::Line => {
                for segment in project_line_segments(&series.points, ctx) {
                    frame.lines.push(LinePrimitive::new(
                        segment.x1 + dx,
                        segment.y1 + dy,
                        segment.x2 + dx,
                        segment.y2 + dy,
                        LINE_STROKE_WIDTH,
                        series.color,
                    ));
                }
            }
            SeriesKind::Bar => {
                let color = series.color.with_opacity(bar_opacity);
                for bar in project_bars(&series.points, ctx) {
                    // Descending samples give a negative width.
                    let x = bar.x.min(bar.x + bar.width);
                    frame.rects.push(RectPrimitive::new(
                        x + dx,
                        bar.y + dy,
                        bar.width.abs(),
                        bar.height,
                        color,
                    ));
                }
            }
            SeriesKind::Scatter => {
                for dot in project_scatter(&series.points, ctx) {
                    frame.circles.push(CirclePrimitive::new(
                        dot.x + dx,
                        dot.y + dy,
                        self.scatter_symbol_size,
                        series.color,
                    ));
                }
            }
            SeriesKind::Area => {
                for area in project_areas(&series.points, ctx) {
                    let points = area
                        .polygon
                        .iter()
                        .map(|vertex| (vertex.x + dx, vertex.y + dy))
                        .collect();
                    frame
                        .polygons
                        .push(PolygonPrimitive::new(points, series.color));
                }
            }
        }
    }

    fn push_x_axis(&self, frame: &mut RenderFrame, x_scale: &XScale) {
        let margin = self.style.margin;
        let (width, height) = self.chart_area();
        let font_size = self.style.label_font_size;
        let baseline = margin.top + height + font_size + LABEL_GAP_PX;

        let ticks = x_scale.ticks(axis_tick_target_count(width, AXIS_TARGET_SPACING_PX));
        let step = tick_step(&ticks);
        for tick in ticks {
            let x = margin.left + x_scale.to_pixel(tick);
            frame.lines.push(
                LinePrimitive::new(
                    x,
                    margin.top,
                    x,
                    margin.top + height,
                    GRID_STROKE_WIDTH,
                    self.style.grid_color,
                )
                .with_stroke_style(LineStrokeStyle::Dashed),
            );
            let text = match x_scale.as_time() {
                Some(time) => time.format_tick(tick),
                None => format_linear_tick(tick, step),
            };
            frame.texts.push(TextPrimitive::new(
                text,
                x,
                baseline,
                font_size,
                self.style.label_color,
                TextHAlign::Center,
            ));
        }

        let label = match x_scale.as_time() {
            Some(time) if self.x_label.is_empty() => time.label(),
            _ => self.x_label.as_str(),
        };
        if !label.is_empty() {
            frame.texts.push(TextPrimitive::new(
                label,
                margin.left + width,
                baseline + font_size + LABEL_GAP_PX,
                font_size,
                self.style.label_color,
                TextHAlign::Right,
            ));
        }
    }

    fn push_y_axis(&self, frame: &mut RenderFrame) {
        let margin = self.style.margin;
        let (width, height) = self.chart_area();
        let font_size = self.style.label_font_size;
        let y_scale = self.y_scale();

        if !y_scale.is_degenerate() {
            let domain = y_scale.domain();
            let ticks = linear_ticks(
                domain.min,
                domain.max,
                axis_tick_target_count(height, AXIS_TARGET_SPACING_PX),
            );
            let step = tick_step(&ticks);
            for tick in ticks {
                let y = margin.top + y_scale.to_pixel(tick);
                frame.lines.push(
                    LinePrimitive::new(
                        margin.left,
                        y,
                        margin.left + width,
                        y,
                        GRID_STROKE_WIDTH,
                        self.style.grid_color,
                    )
                    .with_stroke_style(LineStrokeStyle::Dashed),
                );
                frame.texts.push(TextPrimitive::new(
                    format_linear_tick(tick, step),
                    margin.left - LABEL_GAP_PX,
                    y + font_size / 3.0,
                    font_size,
                    self.style.label_color,
                    TextHAlign::Right,
                ));
            }
        }

        if !self.y_label.is_empty() {
            frame.texts.push(
                TextPrimitive::new(
                    self.y_label.as_str(),
                    font_size,
                    margin.top,
                    font_size,
                    self.style.label_color,
                    TextHAlign::Right,
                )
                .rotated(90.0),
            );
        }
    }
}
