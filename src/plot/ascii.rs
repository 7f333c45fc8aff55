//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - growth curve: `-` line
//! - selected day: `@`
//! - optional gridlines: `.`

use crate::app::pipeline::ExplorerView;
use crate::domain::{DenseTableFile, Measure};
use crate::engine::{build_axis_ticks, clamp_day, value_domain};

const GRID: char = '.';
const CURVE: char = '-';
const MARKER: char = '@';

/// Plot size limits, in characters.
pub const MIN_WIDTH: usize = 10;
pub const MAX_WIDTH: usize = 400;
pub const MIN_HEIGHT: usize = 5;
pub const MAX_HEIGHT: usize = 200;

/// Gridline positions in data coordinates.
#[derive(Debug, Clone, Default)]
pub struct GridLines {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// Render one measure of an explorer view.
pub fn render_ascii_plot(view: &ExplorerView, measure: Measure, width: usize, height: usize) -> String {
    let series: Vec<(f64, f64)> = view
        .table
        .iter()
        .map(|r| (f64::from(r.day), measure.of(r)))
        .collect();
    let x_range = (0.0, f64::from(view.phase.max_day));
    let y_range = match measure {
        Measure::Weight => view.weight_domain,
        Measure::Length => view.length_domain,
    };

    let grid = view.config.show_grid.then(|| GridLines {
        x: view.day_ticks.iter().map(|&d| f64::from(d)).collect(),
        y: match (measure, &view.weight_ticks) {
            (Measure::Weight, Some(ticks)) => ticks.clone(),
            _ => even_ticks(y_range, 5),
        },
    });

    let current = (f64::from(view.current.day), measure.of(&view.current));
    render_plot(
        &series,
        Some(current),
        x_range,
        y_range,
        grid.as_ref(),
        width,
        height,
        measure,
    )
}

/// Render both measures from a saved table file, highlighting `day` (clamped).
pub fn render_table_file(file: &DenseTableFile, day: i64, width: usize, height: usize) -> String {
    let day = clamp_day(day, file.max_day);
    let current = file
        .records
        .iter()
        .find(|r| r.day == day)
        .or_else(|| file.records.first());
    let x_range = (0.0, f64::from(file.max_day));

    let mut out = format!("{}\n", file.title);
    for measure in [Measure::Weight, Measure::Length] {
        let series: Vec<(f64, f64)> = file
            .records
            .iter()
            .map(|r| (f64::from(r.day), measure.of(r)))
            .collect();
        let y_range = value_domain(&file.records, measure).unwrap_or((0.0, 1.0));
        let grid = GridLines {
            x: build_axis_ticks(file.max_day, 10).into_iter().map(f64::from).collect(),
            y: even_ticks(y_range, 5),
        };
        let highlight = current.map(|r| (f64::from(r.day), measure.of(r)));
        out.push_str(&render_plot(&series, highlight, x_range, y_range, Some(&grid), width, height, measure));
        out.push('\n');
    }
    out.trim_end().to_string()
}

#[allow(clippy::too_many_arguments)]
fn render_plot(
    series: &[(f64, f64)],
    highlight: Option<(f64, f64)>,
    x_range: (f64, f64),
    y_range: (f64, f64),
    grid_lines: Option<&GridLines>,
    width: usize,
    height: usize,
    measure: Measure,
) -> String {
    let width = width.clamp(MIN_WIDTH, MAX_WIDTH);
    let height = height.clamp(MIN_HEIGHT, MAX_HEIGHT);
    let (x_min, x_max) = non_degenerate(x_range);
    let (y_min, y_max) = non_degenerate(y_range);

    let mut grid = vec![vec![' '; width]; height];

    // Gridlines first so the curve and marker overlay them.
    if let Some(lines) = grid_lines {
        for &y in &lines.y {
            let row = map_y(y, y_min, y_max, height);
            grid[row].iter_mut().for_each(|c| *c = GRID);
        }
        for &x in &lines.x {
            let col = map_x(x, x_min, x_max, width);
            for row in grid.iter_mut() {
                row[col] = GRID;
            }
        }
    }

    draw_curve(&mut grid, series, (x_min, x_max), (y_min, y_max));

    if let Some((x, y)) = highlight {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        grid[row][col] = MARKER;
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{}: day=[{x_min:.0}, {x_max:.0}] | y=[{y_min:.3}, {y_max:.3}]{}\n",
        measure.axis_label(),
        measure.unit()
    ));
    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }
    out
}

/// `n` evenly spaced values across a range (both ends included).
fn even_ticks((min, max): (f64, f64), n: usize) -> Vec<f64> {
    let n = n.max(2);
    (0..n)
        .map(|i| min + (max - min) * i as f64 / (n as f64 - 1.0))
        .collect()
}

fn non_degenerate((min, max): (f64, f64)) -> (f64, f64) {
    if min.is_finite() && max.is_finite() && max > min {
        (min, max)
    } else if min.is_finite() {
        (min - 0.5, min + 0.5)
    } else {
        (0.0, 1.0)
    }
}

fn map_x(t: f64, t_min: f64, t_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((t - t_min) / (t_max - t_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], series: &[(f64, f64)], x: (f64, f64), y: (f64, f64)) {
    if series.is_empty() {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(t, v) in series {
        let col = map_x(t, x.0, x.1, width);
        let row = map_y(v, y.0, y.1, height);
        if let Some((c0, r0)) = prev {
            draw_line(grid, c0, r0, col, row, CURVE);
        } else {
            grid[row][col] = CURVE;
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish). Only background cells are overwritten.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0 && (y0 as usize) < grid.len() && x0 >= 0 && (x0 as usize) < grid[0].len() {
            let cell = &mut grid[y0 as usize][x0 as usize];
            if *cell == ' ' || *cell == GRID {
                *cell = ch;
            }
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
