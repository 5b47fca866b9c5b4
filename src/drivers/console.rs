use std::io;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture, Event};

use super::InputDriver;

/// Console-backed input driver. Mouse capture is required for the dock's
/// hover tracking, so it is enabled by default.
#[derive(Debug, Default)]
pub struct ConsoleDriver {
    mouse_capture: bool,
}

impl ConsoleDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mouse_capture(&self) -> bool {
        self.mouse_capture
    }
}

impl InputDriver for ConsoleDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        crossterm::event::poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        crossterm::event::read()
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        if enabled == self.mouse_capture {
            return Ok(());
        }
        if enabled {
            crossterm::execute!(std::io::stdout(), EnableMouseCapture)?;
        } else {
            crossterm::execute!(std::io::stdout(), DisableMouseCapture)?;
        }
        self.mouse_capture = enabled;
        Ok(())
    }
}
