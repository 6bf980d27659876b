use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{App, Control, FIELD_RANGE, VOLTAGE_RANGE};
use crate::params::ParamSource;

/// Keyboard-driven parameter bars, plus the derived readouts
/// underneath.
pub fn render_controls(frame: &mut Frame, app: &App, area: Rect) {
    let width = area.width as usize;

    let voltage = app.params.voltage();
    let field = app.params.field_strength();
    let v_frac = (voltage - VOLTAGE_RANGE.0) / (VOLTAGE_RANGE.1 - VOLTAGE_RANGE.0);
    let b_frac = (field - FIELD_RANGE.0) / (FIELD_RANGE.1 - FIELD_RANGE.0);

    let lines = vec![
        slider_line(
            "voltage",
            format!("{:7.0} V", voltage),
            v_frac,
            width,
            app.selected == Control::Voltage,
        ),
        slider_line(
            "field  ",
            format!("{:+8.4} T", field),
            b_frac,
            width,
            app.selected == Control::Field,
        ),
        readout_line(app),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

/// One horizontal slider: label, value, and a track with a marker at
/// the current fraction of the range.
fn slider_line(
    label: &str,
    value: String,
    frac: f64,
    width: usize,
    selected: bool,
) -> Line<'static> {
    let label_color = if selected {
        Color::Rgb(255, 220, 80)
    } else {
        Color::Rgb(140, 140, 170)
    };
    let arrow = if selected { "▶ " } else { "  " };

    // Room left for the track after the label and value.
    let track_width = width.saturating_sub(label.len() + value.len() + 8).max(10);
    let marker = ((frac.clamp(0.0, 1.0) * (track_width - 1) as f64) as usize).min(track_width - 1);

    let mut track = String::with_capacity(track_width * 3);
    for i in 0..track_width {
        track.push(if i == marker { '█' } else { '─' });
    }

    Line::from(vec![
        Span::styled(arrow.to_string(), Style::default().fg(label_color)),
        Span::styled(
            format!("{} ", label),
            Style::default().fg(label_color).add_modifier(if selected {
                Modifier::BOLD
            } else {
                Modifier::empty()
            }),
        ),
        Span::styled(
            track,
            Style::default().fg(if selected {
                Color::Rgb(80, 200, 255)
            } else {
                Color::Rgb(60, 70, 90)
            }),
        ),
        Span::styled(format!(" {}", value), Style::default().fg(Color::White)),
    ])
}

fn readout_line(app: &App) -> Line<'static> {
    let diameter = app.params.orbit_diameter() * 100.0;
    let diameter = if diameter.is_finite() {
        format!("{:.1} cm", diameter)
    } else {
        "--".to_string()
    };
    let speed = app.params.velocity_magnitude();

    Line::from(vec![
        Span::styled("  path diameter: ", Style::default().fg(Color::Rgb(100, 100, 140))),
        Span::styled(
            diameter,
            Style::default().fg(Color::Rgb(80, 255, 180)).add_modifier(Modifier::BOLD),
        ),
        Span::styled("   v: ", Style::default().fg(Color::Rgb(100, 100, 140))),
        Span::styled(
            format!("{:.2e} m/s", speed),
            Style::default().fg(Color::Rgb(80, 200, 255)),
        ),
        Span::styled(
            format!("   step x{:.1}", app.step_scale),
            Style::default().fg(Color::Rgb(100, 100, 140)),
        ),
    ])
}
