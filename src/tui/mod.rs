//! Ratatui-based terminal UI.
//!
//! The TUI provides a settings panel for the phase, day, axis intervals and
//! gridlines, summary readouts for the selected day, and the weight and length
//! charts.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph},
};

use crate::app::pipeline::ExplorerView;
use crate::app::state::ExplorerState;
use crate::domain::{ExplorerConfig, Measure, PhaseId, Rgb};
use crate::engine::HIGHLIGHT_COLOR;
use crate::error::AppError;
use crate::report::{UNITS_LINE, fmt_length, fmt_weight};

mod plotters_chart;

use plotters_chart::GrowthPlottersChart;

const FIELD_COUNT: usize = 5;

/// Start the TUI.
pub fn run(config: ExplorerConfig) -> Result<(), AppError> {
    let mut app = App::new(config)?;

    let _guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    state: ExplorerState,
    view: ExplorerView,
    selected_field: usize,
    status: String,
}

impl App {
    fn new(config: ExplorerConfig) -> Result<Self, AppError> {
        let mut state = ExplorerState::new(config);
        let view = state.view()?;
        Ok(Self {
            state,
            view,
            selected_field: 1,
            status: "Ready.".to_string(),
        })
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code)? {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) -> Result<bool, AppError> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Up => self.selected_field = self.selected_field.saturating_sub(1),
            KeyCode::Down => self.selected_field = (self.selected_field + 1).min(FIELD_COUNT - 1),
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::PageDown => self.state.step_day(-10),
            KeyCode::PageUp => self.state.step_day(10),
            KeyCode::Home => self.state.set_day(0),
            KeyCode::End => self.state.set_day(i64::from(self.state.max_day())),
            KeyCode::Char(c @ '1'..='3') => {
                let idx = c as usize - '1' as usize;
                self.state.select_phase(PhaseId::ALL[idx]);
                self.status = format!("phase: {}", PhaseId::ALL[idx].display_name());
            }
            KeyCode::Char('g') => {
                self.state.toggle_grid();
                self.status = grid_label(self.state.config().show_grid).to_string();
            }
            KeyCode::Char('e') => {
                self.status = match self.export_csv() {
                    Ok(path) => format!("Wrote {}", path.display()),
                    Err(err) => format!("Export failed: {err}"),
                };
            }
            _ => return Ok(false),
        }

        self.view = self.state.view()?;
        Ok(false)
    }

    fn adjust_field(&mut self, delta: i32) {
        match self.selected_field {
            0 => {
                self.state.cycle_phase(delta);
                self.status = format!("phase: {}", self.state.config().phase.display_name());
            }
            1 => self.state.step_day(i64::from(delta)),
            2 => {
                self.state.cycle_day_interval(delta);
                self.status = format!("day interval: {}", self.state.config().day_interval);
            }
            3 => {
                self.state.cycle_weight_interval(delta);
                self.status = format!("weight interval: {}", self.state.config().weight_interval);
            }
            4 => {
                self.state.toggle_grid();
                self.status = grid_label(self.state.config().show_grid).to_string();
            }
            _ => {}
        }
    }

    fn export_csv(&self) -> Result<PathBuf, AppError> {
        let ts = Local::now().format("%Y%m%d_%H%M%S");
        let path = PathBuf::from(format!("growth_{}_{ts}.csv", self.view.phase.id));
        crate::io::export::write_table_csv(&path, self.view.phase, &self.view.table)?;
        Ok(path)
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(9),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_controls(frame, chunks[1]);
        self.draw_charts(frame, chunks[2]);
        self.draw_footer(frame, chunks[3]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let lines = vec![
            Line::from(vec![
                Span::styled(
                    "African Catfish Growth Explorer",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("  {}", self.view.phase.title)),
            ]),
            Line::from(Span::styled(UNITS_LINE, Style::default().fg(Color::Gray))),
        ];
        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_controls(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(40), Constraint::Min(0)])
            .split(area);

        self.draw_settings(frame, chunks[0]);
        self.draw_readouts(frame, chunks[1]);
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let config = self.state.config();
        let items = vec![
            ListItem::new(format!("Phase: {}", config.phase.display_name())),
            ListItem::new(format!("Day: {} / {}", config.day, self.view.phase.max_day)),
            ListItem::new(format!("Days interval: every {}", config.day_interval)),
            ListItem::new(format!("Weight interval: {}", config.weight_interval)),
            ListItem::new(format!("Grid: {}", grid_label(config.show_grid))),
        ];

        let list = List::new(items)
            .block(Block::default().title("Settings").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_readouts(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Current view").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);

        let r = &self.view.current;
        let label = Style::default().fg(Color::Gray);
        let lines = vec![
            Line::from(vec![
                Span::styled("Day     ", label),
                Span::styled(r.day.to_string(), Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)),
            ]),
            Line::from(vec![
                Span::styled("Weight  ", label),
                Span::styled(fmt_weight(r.weight), Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            ]),
            Line::from(vec![
                Span::styled("Length  ", label),
                Span::styled(fmt_length(r.length), Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)),
            ]),
            Line::from(vec![
                Span::styled("Stage   ", label),
                Span::styled(
                    r.stage.label(),
                    Style::default().fg(tui_color(self.view.stage_color)).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(
                format!("Max: {:.1}g | {} days total", self.view.max_weight, self.view.phase.max_day),
                label,
            )),
        ];
        frame.render_widget(Paragraph::new(Text::from(lines)), chunks[0]);

        let max_day = self.view.phase.max_day.max(1);
        let slider = Gauge::default()
            .gauge_style(Style::default().fg(tui_color(self.view.stage_color)).bg(Color::DarkGray))
            .ratio(f64::from(r.day) / f64::from(max_day))
            .label(format!("Day {} ({})", r.day, r.stage));
        frame.render_widget(slider, chunks[1]);
    }

    fn draw_charts(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        self.draw_chart(frame, chunks[0], Measure::Weight);
        self.draw_chart(frame, chunks[1], Measure::Length);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect, measure: Measure) {
        let title = match measure {
            Measure::Weight => "Weight Growth (grams)",
            Measure::Length => "Length Growth (cm)",
        };
        let block = Block::default().title(title).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let (chart_rect, insets) = chart_layout(inner);
        let series = chart_series(&self.view, measure);
        let axes = chart_axes(&self.view, measure, chart_rect);

        let no_grid: &[f64] = &[];
        let show_grid = self.view.config.show_grid;
        let widget = GrowthPlottersChart {
            series: &series,
            highlight: Some((f64::from(self.view.current.day), measure.of(&self.view.current))),
            x_bounds: axes.x_bounds,
            y_bounds: axes.y_bounds,
            x_grid: if show_grid { axes.x_ticks.as_slice() } else { no_grid },
            y_grid: if show_grid { axes.y_ticks.as_slice() } else { no_grid },
            line_color: self.view.stage_color,
            highlight_color: HIGHLIGHT_COLOR,
        };

        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            draw_axis_ticks(frame, inner, chart_rect, insets, &axes, measure);
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  PgUp/PgDn ±10d  1-3 phase  g grid  e export  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn grid_label(show: bool) -> &'static str {
    if show { "Grid ON" } else { "Grid OFF" }
}

fn tui_color(c: Rgb) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

/// `(day, value)` points of one measure.
fn chart_series(view: &ExplorerView, measure: Measure) -> Vec<(f64, f64)> {
    view.table
        .iter()
        .map(|r| (f64::from(r.day), measure.of(r)))
        .collect()
}

/// Bounds and tick positions of one chart.
#[derive(Debug, Clone, PartialEq)]
struct ChartAxes {
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    x_ticks: Vec<f64>,
    y_ticks: Vec<f64>,
}

/// Build bounds and ticks; tick lists are thinned so no more than one lands on
/// each terminal cell.
fn chart_axes(view: &ExplorerView, measure: Measure, chart: Rect) -> ChartAxes {
    let x_bounds = [0.0, f64::from(view.phase.max_day.max(1))];

    let (mut y_min, mut y_max) = match measure {
        Measure::Weight => view.weight_domain,
        Measure::Length => view.length_domain,
    };
    if !(y_min.is_finite() && y_max.is_finite()) || y_max <= y_min {
        y_min = 0.0;
        y_max = 1.0;
    }
    let y_bounds = [y_min, y_max];

    let x_ticks: Vec<f64> = view.day_ticks.iter().map(|&d| f64::from(d)).collect();
    let y_ticks = match (measure, &view.weight_ticks) {
        (Measure::Weight, Some(ticks)) => ticks.iter().copied().filter(|t| *t >= y_min && *t <= y_max).collect(),
        _ => (0..5).map(|i| y_min + (y_max - y_min) * f64::from(i) / 4.0).collect(),
    };

    ChartAxes {
        x_bounds,
        y_bounds,
        x_ticks: thin(x_ticks, usize::from(chart.width.max(1))),
        y_ticks: thin(y_ticks, usize::from(chart.height.max(1))),
    }
}

/// Keep at most `max` evenly strided ticks, always including the last one.
fn thin(ticks: Vec<f64>, max: usize) -> Vec<f64> {
    if ticks.len() <= max || max == 0 {
        return ticks;
    }
    let stride = ticks.len().div_ceil(max);
    let last = ticks.last().copied();
    let mut out: Vec<f64> = ticks.into_iter().step_by(stride).collect();
    if let Some(last) = last {
        if out.last() != Some(&last) {
            if out.len() >= max {
                out.pop();
            }
            out.push(last);
        }
    }
    out
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 9,
        right: 2,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10
        || inner.height <= insets.top + insets.bottom + 5
    {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

fn fmt_axis_y(v: f64, span: f64) -> String {
    if span < 5.0 {
        format!("{v:.2}")
    } else if span < 50.0 {
        format!("{v:.1}")
    } else {
        format!("{v:.0}")
    }
}

fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    axes: &ChartAxes,
    measure: Measure,
) {
    let style = Style::default().fg(Color::Gray);
    let [x0, x1] = axes.x_bounds;
    let [y0, y1] = axes.y_bounds;

    // Day labels; skip any that would overlap the previous label.
    let y = chart.y + chart.height;
    if y < inner.y + inner.height {
        let mut next_free = chart.x.saturating_sub(insets.left);
        for &tick in &axes.x_ticks {
            let u = ((tick - x0) / (x1 - x0)).clamp(0.0, 1.0);
            let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
            let label = format!("{tick:.0}");
            let label_len = label.len() as u16;
            let start = x.saturating_sub(label_len / 2);
            if start < next_free || start + label_len > inner.x + inner.width {
                continue;
            }
            frame.render_widget(
                Paragraph::new(label).style(style),
                Rect {
                    x: start,
                    y,
                    width: label_len,
                    height: 1,
                },
            );
            next_free = start + label_len + 1;
        }
    }

    // Value labels; one per row at most.
    let mut last_row = None;
    for &tick in &axes.y_ticks {
        let u = ((tick - y0) / (y1 - y0)).clamp(0.0, 1.0);
        let row = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;
        if last_row == Some(row) {
            continue;
        }
        let label = fmt_axis_y(tick, y1 - y0);
        let label_len = label.len() as u16;
        let x = inner.x + insets.left.saturating_sub(1);
        let start = x.saturating_sub(label_len);
        if start < inner.x {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y: row,
                width: label_len,
                height: 1,
            },
        );
        last_row = Some(row);
    }

    let x_label = Paragraph::new("Days")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    let x_rect = Rect {
        x: chart.x,
        y: chart.y + chart.height + 1,
        width: chart.width,
        height: 1,
    };
    if x_rect.y < inner.y + inner.height {
        frame.render_widget(x_label, x_rect);
    }

    let y_label = Paragraph::new(measure.unit())
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));
    let y_rect = Rect {
        x: inner.x,
        y: inner.y,
        width: insets.left.saturating_sub(1),
        height: 1,
    };
    frame.render_widget(y_label, y_rect);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_view;
    use crate::domain::WeightInterval;

    #[test]
    fn thin_keeps_last_tick() {
        let ticks: Vec<f64> = (0..=100).map(f64::from).collect();
        let out = thin(ticks, 10);
        assert!(out.len() <= 10, "{out:?}");
        assert_eq!(out.first(), Some(&0.0));
        assert_eq!(out.last(), Some(&100.0));
        assert_eq!(thin(vec![0.0, 1.0], 10), vec![0.0, 1.0]);
    }

    #[test]
    fn weight_axis_uses_explicit_ticks() {
        let view = run_view(&ExplorerConfig {
            phase: PhaseId::Fingerling2,
            weight_interval: WeightInterval::Grams(500.0),
            day_interval: 50,
            ..ExplorerConfig::default()
        })
        .unwrap();
        let rect = Rect::new(0, 0, 80, 20);
        let axes = chart_axes(&view, Measure::Weight, rect);
        assert_eq!(axes.y_ticks, vec![0.0, 500.0, 1000.0, 1500.0]);
        assert_eq!(axes.x_ticks.last(), Some(&300.0));
        assert_eq!(axes.y_bounds, [0.0, 1895.0]);

        let length = chart_axes(&view, Measure::Length, rect);
        assert_eq!(length.y_ticks.len(), 5);
        assert_eq!(length.y_bounds, [0.0, 33.0]);
    }

    #[test]
    fn phase_hotkeys_reclamp_day() {
        let mut app = App::new(ExplorerConfig {
            phase: PhaseId::Fingerling2,
            day: 200,
            ..ExplorerConfig::default()
        })
        .unwrap();
        app.handle_key(KeyCode::Char('1')).unwrap();
        assert_eq!(app.view.phase.id, PhaseId::Nursing);
        assert_eq!(app.view.current.day, 60);

        app.handle_key(KeyCode::Home).unwrap();
        assert_eq!(app.view.current.day, 0);
        app.handle_key(KeyCode::PageUp).unwrap();
        assert_eq!(app.view.current.day, 10);
        assert!(app.handle_key(KeyCode::Char('q')).unwrap());
    }
}
