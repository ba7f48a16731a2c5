use crate::steps::ColorClass;
use crossterm::event::{KeyCode, KeyModifiers};
use std::io;

/// What the animator and session loop need from a display
pub trait RenderSurface {
    /// Current size as (cols, rows)
    fn size(&mut self) -> io::Result<(u16, u16)>;

    /// Write `text` left to right from `(row, col)`. A negative row or column
    /// makes the whole call a no-op; cells past the right or bottom edge are
    /// skipped.
    fn put_str(&mut self, row: i32, col: i32, text: &str, color: ColorClass, bold: bool);

    fn clear_line(&mut self, row: i32);

    /// Blank the whole frame
    fn erase(&mut self);

    /// Push the frame to the screen
    fn refresh(&mut self) -> io::Result<()>;

    /// Non-blocking keyboard check
    fn poll_key(&mut self) -> io::Result<Option<(KeyCode, KeyModifiers)>>;

    /// Brief attention signal on phase change
    fn flash(&mut self) -> io::Result<()>;
}
