use ratatui::Frame;
use ratatui::layout::Rect;

use crate::tui::event::TuiEvent;

/// Something that draws itself into a region of the frame.
///
/// Props live in struct fields; persistent state is borrowed (`&mut State`)
/// so the component itself can be rebuilt every frame.
///
/// `render` takes `&mut self` so a component can refresh its layout caches
/// (card heights, viewport size) during the render pass.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// State that reacts to terminal input.
pub trait EventHandler {
    /// High-level event reported back to the event loop.
    type Event;

    /// Consume a `TuiEvent`, returning an event only when the loop has
    /// something to do about it.
    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
