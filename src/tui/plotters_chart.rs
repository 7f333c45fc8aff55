//! Plotters-powered growth chart widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.
//! Tick labels are drawn by the caller (see `draw_axis_ticks` in the parent module)
//! so they can follow the explorer's explicit tick lists; this widget only draws
//! gridlines, axes, the curve and the selected-day marker.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::domain::Rgb;

/// A render-only chart description.
///
/// All series, ticks and bounds are computed outside the render call so that
/// `render()` only draws.
pub struct GrowthPlottersChart<'a> {
    /// Dense `(day, value)` series.
    pub series: &'a [(f64, f64)],
    /// Selected day, drawn as a drop line plus a dot.
    pub highlight: Option<(f64, f64)>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    /// Gridline positions; empty when gridlines are off.
    pub x_grid: &'a [f64],
    pub y_grid: &'a [f64],
    pub line_color: Rgb,
    pub highlight_color: Rgb,
}

fn plotters_color(c: Rgb) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

impl<'a> Widget for GrowthPlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters may fail to build a chart in a tiny area; show a hint instead.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root).build_cartesian_2d(x0..x1, y0..y1)?;

            let grid_color = RGBColor(0x4b, 0x55, 0x63);
            for &x in self.x_grid {
                chart.draw_series(LineSeries::new([(x, y0), (x, y1)], &grid_color))?;
            }
            for &y in self.y_grid {
                chart.draw_series(LineSeries::new([(x0, y), (x1, y)], &grid_color))?;
            }

            // Axes along the bottom and left edges.
            chart.draw_series(LineSeries::new([(x0, y0), (x1, y0)], &WHITE))?;
            chart.draw_series(LineSeries::new([(x0, y0), (x0, y1)], &WHITE))?;

            chart.draw_series(LineSeries::new(
                self.series.iter().copied(),
                &plotters_color(self.line_color),
            ))?;

            // `Pixel` rather than `Circle`: the terminal backend scales circle radii
            // far too large.
            if let Some((x, y)) = self.highlight {
                let marker = plotters_color(self.highlight_color);
                chart.draw_series(LineSeries::new([(x, y0), (x, y)], &marker))?;
                chart.draw_series(std::iter::once(Pixel::new((x, y), marker)))?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}
