pub mod controls;

use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Circle, Points, Rectangle};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::app::App;
use crate::params::ParamSource;
use crate::sim::{COLLECTOR_DEPTH, COLLECTOR_HALF_WIDTH, VIEW_MAX, VIEW_OX, VIEW_OY};

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status
            Constraint::Min(10),   // Chamber
            Constraint::Length(4), // Parameter bars + readout
            Constraint::Length(1), // Help
        ])
        .split(frame.area());

    render_status(frame, app, chunks[0]);
    render_chamber(frame, app, chunks[1]);
    controls::render_controls(frame, app, chunks[2]);
    render_help(frame, chunks[3]);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(
            " e⁻ deflection ",
            Style::default()
                .fg(Color::Rgb(120, 200, 255))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("│ ", Style::default().fg(Color::DarkGray)),
    ];
    if app.sim.is_empty() {
        spans.push(Span::styled(
            "beam off ",
            Style::default().fg(Color::Rgb(100, 100, 140)),
        ));
    } else {
        spans.push(Span::styled(
            format!("electrons: {} ", app.sim.len()),
            Style::default().fg(Color::Yellow),
        ));
    }
    if app.paused {
        spans.push(Span::styled("│ ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            "PAUSED ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    }
    if let Some((ref msg, ticks, color)) = app.message {
        if ticks > 0 {
            spans.push(Span::styled("│ ", Style::default().fg(Color::DarkGray)));
            spans.push(Span::styled(
                format!("{} ", msg),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ));
        }
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// The vacuum chamber. View coordinates grow downward (emitter at the
/// top of the physics frame), canvas coordinates grow upward, so the
/// y axis is flipped on the way in.
fn render_chamber(frame: &mut Frame, app: &App, area: Rect) {
    let dots: Vec<(f64, f64)> = app
        .surface
        .dot_positions()
        .map(|(x, y)| (x, VIEW_MAX - y))
        .collect();
    let (cx, cy, r) = app.surface.path_circle();

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Rgb(100, 180, 255)))
                .title(" Chamber ")
                .title_style(Style::default().fg(Color::Rgb(120, 200, 255))),
        )
        .marker(Marker::Braille)
        .x_bounds([0.0, VIEW_MAX])
        .y_bounds([0.0, VIEW_MAX])
        .paint(|ctx| {
            // Predicted orbit path.
            ctx.draw(&Circle {
                x: cx,
                y: VIEW_MAX - cy,
                radius: r,
                color: Color::Rgb(60, 130, 200),
            });
            // Collector plate above the emitter.
            ctx.draw(&Rectangle {
                x: VIEW_OX - COLLECTOR_HALF_WIDTH,
                y: VIEW_MAX - VIEW_OY,
                width: COLLECTOR_HALF_WIDTH * 2.0,
                height: COLLECTOR_DEPTH,
                color: Color::Rgb(180, 80, 80),
            });
            // Emission point.
            ctx.draw(&Points {
                coords: &[(VIEW_OX, VIEW_MAX - VIEW_OY)],
                color: Color::White,
            });
            ctx.draw(&Points {
                coords: &dots,
                color: Color::Yellow,
            });
        });
    frame.render_widget(canvas, area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let help = Line::from(vec![
        Span::styled(" ↑↓", Style::default().fg(Color::Rgb(80, 200, 255))),
        Span::styled(" select  ", Style::default().fg(Color::Rgb(100, 100, 130))),
        Span::styled("←→", Style::default().fg(Color::Rgb(80, 200, 255))),
        Span::styled(" adjust  ", Style::default().fg(Color::Rgb(100, 100, 130))),
        Span::styled("+/-", Style::default().fg(Color::Rgb(80, 200, 255))),
        Span::styled(" step  ", Style::default().fg(Color::Rgb(100, 100, 130))),
        Span::styled("p", Style::default().fg(Color::Rgb(80, 200, 255))),
        Span::styled(" pause  ", Style::default().fg(Color::Rgb(100, 100, 130))),
        Span::styled("r", Style::default().fg(Color::Rgb(80, 200, 255))),
        Span::styled(" reset  ", Style::default().fg(Color::Rgb(100, 100, 130))),
        Span::styled("q", Style::default().fg(Color::Rgb(80, 200, 255))),
        Span::styled(" quit", Style::default().fg(Color::Rgb(100, 100, 130))),
    ]);
    frame.render_widget(Paragraph::new(help), area);
}
