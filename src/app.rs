use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::Color;

use crate::params::{ParamSource, Params};
use crate::sim::{Simulator, VIEW_OX, VIEW_OY, VIEW_SCALE};
use crate::surface::{CanvasSurface, Surface};

pub const VOLTAGE_RANGE: (f64, f64) = (0.0, 5000.0);
pub const FIELD_RANGE: (f64, f64) = (-0.01, 0.01);

const VOLTAGE_STEP: f64 = 10.0;
const FIELD_STEP: f64 = 0.0001;
const DEFAULT_VOLTAGE: f64 = 1000.0;
const DEFAULT_FIELD: f64 = -0.002;

/// Which parameter bar the arrow keys currently drive.
#[derive(Clone, Copy, PartialEq)]
pub enum Control {
    Voltage,
    Field,
}

pub struct App {
    pub params: Params,
    pub sim: Simulator,
    pub surface: CanvasSurface,
    pub selected: Control,
    pub paused: bool,
    pub should_quit: bool,
    /// Multiplier on the per-keypress adjustment, changed with +/-.
    pub step_scale: f64,
    pub message: Option<(String, u32, Color)>,
    started: Instant,
}

impl App {
    pub fn new() -> Self {
        let mut app = Self {
            params: Params::new(DEFAULT_VOLTAGE, DEFAULT_FIELD),
            sim: Simulator::new(),
            surface: CanvasSurface::new(),
            selected: Control::Voltage,
            paused: false,
            should_quit: false,
            step_scale: 1.0,
            message: None,
            started: Instant::now(),
        };
        app.refresh_path_circle();
        app
    }

    pub fn on_tick(&mut self) {
        if let Some((_, ref mut ticks, _)) = self.message {
            if *ticks > 0 {
                *ticks -= 1;
            } else {
                self.message = None;
            }
        }
        if self.paused {
            return;
        }
        // The catch-up clamp in advance() absorbs pause gaps and stalls.
        let timestamp = self.started.elapsed().as_secs_f64();
        self.sim.advance(timestamp, &self.params, &mut self.surface);
        self.sim.render(&mut self.surface);
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up | KeyCode::Down => {
                self.selected = match self.selected {
                    Control::Voltage => Control::Field,
                    Control::Field => Control::Voltage,
                };
            }
            KeyCode::Left => self.adjust_selected(-1.0),
            KeyCode::Right => self.adjust_selected(1.0),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.step_scale = (self.step_scale * 2.0).min(10.0);
                self.flash(format!("step x{:.1}", self.step_scale), Color::Cyan);
            }
            KeyCode::Char('-') | KeyCode::Char('_') => {
                self.step_scale = (self.step_scale * 0.5).max(0.1);
                self.flash(format!("step x{:.1}", self.step_scale), Color::Cyan);
            }
            KeyCode::Char('p') | KeyCode::Char('P') => {
                self.paused = !self.paused;
                let label = if self.paused { "paused" } else { "running" };
                self.flash(label.to_string(), Color::Yellow);
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.sim.clear(&mut self.surface);
                self.flash("reset".to_string(), Color::Rgb(80, 255, 180));
            }
            _ => {}
        }
    }

    fn adjust_selected(&mut self, direction: f64) {
        match self.selected {
            Control::Voltage => {
                let v = self.params.voltage() + direction * VOLTAGE_STEP * self.step_scale;
                self.params
                    .set_voltage(v.clamp(VOLTAGE_RANGE.0, VOLTAGE_RANGE.1));
            }
            Control::Field => {
                let b = self.params.field_strength() + direction * FIELD_STEP * self.step_scale;
                self.params
                    .set_field_strength(b.clamp(FIELD_RANGE.0, FIELD_RANGE.1));
            }
        }
        self.refresh_path_circle();
    }

    /// Recompute the orbit path indicator from the current parameters.
    /// The circle is tangent to the emission point, so its center sits
    /// one (signed) radius to the side of the emitter.
    fn refresh_path_circle(&mut self) {
        let radius = self.params.display_radius();
        self.surface.set_path_circle(
            VIEW_OX + radius * VIEW_SCALE,
            VIEW_OY,
            (radius * VIEW_SCALE).abs(),
        );
    }

    fn flash(&mut self, text: String, color: Color) {
        self.message = Some((text, 45, color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn arrow_keys_adjust_the_selected_parameter() {
        let mut app = App::new();
        let before = app.params.voltage();
        app.on_key(key(KeyCode::Right));
        assert!(app.params.voltage() > before);

        app.on_key(key(KeyCode::Down));
        assert!(app.selected == Control::Field);
        let before = app.params.field_strength();
        app.on_key(key(KeyCode::Left));
        assert!(app.params.field_strength() < before);
    }

    #[test]
    fn adjustments_clamp_to_the_slider_ranges() {
        let mut app = App::new();
        app.step_scale = 10.0;
        for _ in 0..200 {
            app.on_key(key(KeyCode::Right));
        }
        assert_eq!(app.params.voltage(), VOLTAGE_RANGE.1);

        app.on_key(key(KeyCode::Down));
        for _ in 0..500 {
            app.on_key(key(KeyCode::Left));
        }
        assert_eq!(app.params.field_strength(), FIELD_RANGE.0);
    }

    #[test]
    fn adjusting_a_parameter_moves_the_path_circle() {
        let mut app = App::new();
        let before = app.surface.path_circle();
        app.on_key(key(KeyCode::Right));
        assert_ne!(app.surface.path_circle(), before);
    }

    #[test]
    fn reset_releases_every_dot() {
        let mut app = App::new();
        // Spin long enough for the spawner to come due a few times.
        for _ in 0..100 {
            app.on_tick();
            std::thread::sleep(std::time::Duration::from_millis(2));
        }
        app.on_key(key(KeyCode::Char('r')));
        assert_eq!(app.sim.len(), 0);
        assert_eq!(app.surface.dot_count(), 0);
    }

    #[test]
    fn quit_keys_quit() {
        let mut app = App::new();
        app.on_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }
}
