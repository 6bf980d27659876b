use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, KeyEvent, KeyEventKind};

/// What the main loop multiplexes over: key presses from the terminal
/// and fixed-rate ticks that drive the simulation clock.
pub enum Event {
    Key(KeyEvent),
    Tick,
}

/// Background thread that polls the terminal and turns poll timeouts
/// into ticks, so the main loop can block on a single channel.
pub struct EventPump {
    rx: mpsc::Receiver<Event>,
}

impl EventPump {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || loop {
            if event::poll(tick_rate).unwrap_or(false) {
                if let Ok(crossterm::event::Event::Key(key)) = event::read() {
                    if key.kind == KeyEventKind::Press && tx.send(Event::Key(key)).is_err() {
                        return;
                    }
                }
            } else if tx.send(Event::Tick).is_err() {
                return;
            }
        });

        Self { rx }
    }

    pub fn next(&self) -> io::Result<Event> {
        self.rx
            .recv()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }
}
