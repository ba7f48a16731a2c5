use crate::colors::class_color;
use crate::steps::ColorClass;
use crate::surface::RenderSurface;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{poll, read, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io::{self, stdout, Write};
use std::time::Duration;

/// Crossterm-backed render surface.
///
/// Draws into a back buffer; `refresh` paints the whole buffer. Entering
/// raw mode and the alternate screen happens in `new`, leaving them in `Drop`.
pub struct Terminal {
    width: u16,
    height: u16,
    buffer: Vec<Vec<Cell>>,
    alternate_screen: bool,
}

/// How long the screen stays inverted on a flash
const FLASH_DURATION: Duration = Duration::from_millis(100);

/// A single cell in the terminal buffer
#[derive(Clone, PartialEq)]
struct Cell {
    ch: char,
    fg: Option<Color>,
    bold: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: None,
            bold: false,
        }
    }
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let (width, height) = size()?;

        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen, Hide, Clear(ClearType::All))?;

        Ok(Self {
            width,
            height,
            buffer: vec![vec![Cell::default(); width as usize]; height as usize],
            alternate_screen: true,
        })
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.buffer = vec![vec![Cell::default(); width as usize]; height as usize];
    }

    fn set(&mut self, x: i32, y: i32, ch: char, fg: Option<Color>, bold: bool) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.buffer[y as usize][x as usize] = Cell { ch, fg, bold };
        }
    }

    fn set_str(&mut self, x: i32, y: i32, s: &str, fg: Option<Color>, bold: bool) {
        for (i, ch) in s.chars().enumerate() {
            self.set(x + i as i32, y, ch, fg, bold);
        }
    }

    fn render(&self) -> io::Result<()> {
        let mut out = stdout();

        for (y, row) in self.buffer.iter().enumerate() {
            queue!(out, MoveTo(0, y as u16))?;

            for cell in row {
                if cell.bold {
                    queue!(out, SetAttribute(Attribute::Bold))?;
                }

                match cell.fg {
                    Some(color) => queue!(out, SetForegroundColor(color), Print(cell.ch), ResetColor)?,
                    None => queue!(out, Print(cell.ch))?,
                }

                if cell.bold {
                    queue!(out, SetAttribute(Attribute::Reset))?;
                }
            }
        }

        out.flush()
    }
}

impl RenderSurface for Terminal {
    /// Re-reads the real size and rebuilds the buffer when it changed
    fn size(&mut self) -> io::Result<(u16, u16)> {
        let (width, height) = size()?;
        if width != self.width || height != self.height {
            tracing::debug!(width, height, "terminal resized");
            self.resize(width, height);
            execute!(stdout(), Clear(ClearType::All))?;
        }
        Ok((self.width, self.height))
    }

    /// A step anchored above or left of the screen is skipped whole;
    /// text running off the right edge is clipped.
    fn put_str(&mut self, row: i32, col: i32, text: &str, color: ColorClass, bold: bool) {
        if row < 0 || col < 0 {
            return;
        }
        self.set_str(col, row, text, Some(class_color(color)), bold);
    }

    fn clear_line(&mut self, row: i32) {
        if row >= 0 && row < self.height as i32 {
            for cell in &mut self.buffer[row as usize] {
                *cell = Cell::default();
            }
        }
    }

    fn erase(&mut self) {
        for row in &mut self.buffer {
            for cell in row {
                *cell = Cell::default();
            }
        }
    }

    fn refresh(&mut self) -> io::Result<()> {
        self.render()
    }

    fn poll_key(&mut self) -> io::Result<Option<(KeyCode, KeyModifiers)>> {
        if poll(Duration::from_millis(0))? {
            if let Event::Key(key_event) = read()? {
                if key_event.kind != KeyEventKind::Release {
                    return Ok(Some((key_event.code, key_event.modifiers)));
                }
            }
        }
        Ok(None)
    }

    /// Inverts the whole screen briefly (DECSCNM), with a bell for
    /// terminals that ignore reverse video
    fn flash(&mut self) -> io::Result<()> {
        write_flash(&mut stdout(), FLASH_DURATION)
    }
}

/// Reverse video on, bell, hold, reverse video off
fn write_flash<W: Write>(out: &mut W, hold: Duration) -> io::Result<()> {
    execute!(out, Print("\x1b[?5h"), Print('\x07'))?;
    std::thread::sleep(hold);
    execute!(out, Print("\x1b[?5l"))
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if !self.alternate_screen {
            return;
        }
        let _ = execute!(stdout(), ResetColor, Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}
