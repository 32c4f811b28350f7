use crossterm::event::KeyEvent;

/// Application events.
#[derive(Debug)]
pub enum Event {
    /// A tick event, sent at a regular interval to trigger a redraw.
    Tick,
    /// A key press event.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize,
}
