//! # TitleBar Component
//!
//! Top status bar: application name, location, and the refresh state.
//!
//! TitleBar is purely presentational. It receives all data as props and
//! has no internal state.
//!
//! ## Conditional Formatting
//!
//! 1. **Offline**: `"Weather MVP | Berlin | Offline"`
//! 2. **Refreshing**: `"Weather MVP | Berlin | ⠋ Refreshing..."`
//! 3. **Default**: `"Weather MVP | Berlin"`
//!
//! Offline wins over refreshing: a fetch started just before the network
//! dropped is still in flight, but there is nothing useful to announce.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

const APP_NAME: &str = "Weather MVP";
const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct TitleBar {
    /// Location label (e.g., "Berlin" or "52.52, 13.41")
    pub location: String,
    /// True while a weather fetch is in flight
    pub refreshing: bool,
    pub has_network: bool,
    /// Animation frame counter, advanced by the event loop
    pub spinner_frame: usize,
}

impl TitleBar {
    pub fn new(location: String, refreshing: bool, has_network: bool, spinner_frame: usize) -> Self {
        Self {
            location,
            refreshing,
            has_network,
            spinner_frame,
        }
    }

    fn status(&self) -> Option<Span<'static>> {
        if !self.has_network {
            Some(Span::styled("Offline", Style::default().fg(Color::Red)))
        } else if self.refreshing {
            let glyph = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
            Some(Span::styled(
                format!("{glyph} Refreshing..."),
                Style::default().fg(Color::Yellow),
            ))
        } else {
            None
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::raw(format!("{APP_NAME} | {}", self.location))];
        if let Some(status) = self.status() {
            spans.push(Span::raw(" | "));
            spans.push(status);
        }
        frame.render_widget(Line::from(spans), area);
    }
}
