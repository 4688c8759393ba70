use std::io;
use std::io::Write;

use crossterm::cursor;
use crossterm::event::DisableFocusChange;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableFocusChange;
use crossterm::event::EnableMouseCapture;
use crossterm::event::Event as CrossTermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;
use crossterm::execute;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;

use crate::braille::cell_center;
use crate::config::KEY_PAN_STEP;
use crate::config::KEY_ZOOM_FACTOR;
use crate::events::AppEvent;
use crate::input::PointerEvent;
use crate::viewport::Point;

/// Converts a crossterm event into an application event
pub fn convert_event(event: CrossTermEvent) -> Option<AppEvent> {
    match event {
        CrossTermEvent::Key(key_event) => convert_key(key_event),
        CrossTermEvent::Mouse(mouse_event) => convert_mouse(mouse_event).map(AppEvent::Pointer),
        CrossTermEvent::FocusLost => Some(AppEvent::Pointer(PointerEvent::Leave)),
        CrossTermEvent::Resize(cols, rows) => Some(AppEvent::Resize { cols, rows }),
        _ => None,
    }
}

fn convert_key(key_event: KeyEvent) -> Option<AppEvent> {
    if key_event.kind == KeyEventKind::Release {
        return None;
    }

    match key_event {
        KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        }
        | KeyEvent {
            code: KeyCode::Char('q'),
            ..
        } => Some(AppEvent::Exit),

        // movements
        KeyEvent {
            code: KeyCode::Char('h'),
            ..
        } => Some(AppEvent::Pan {
            dx: KEY_PAN_STEP,
            dy: 0.0,
        }),
        KeyEvent {
            code: KeyCode::Char('j'),
            ..
        } => Some(AppEvent::Pan {
            dx: 0.0,
            dy: -KEY_PAN_STEP,
        }),
        KeyEvent {
            code: KeyCode::Char('k'),
            ..
        } => Some(AppEvent::Pan {
            dx: 0.0,
            dy: KEY_PAN_STEP,
        }),
        KeyEvent {
            code: KeyCode::Char('l'),
            ..
        } => Some(AppEvent::Pan {
            dx: -KEY_PAN_STEP,
            dy: 0.0,
        }),

        // zoom
        KeyEvent {
            code: KeyCode::Char('+' | '='),
            ..
        } => Some(AppEvent::Zoom {
            factor: KEY_ZOOM_FACTOR,
        }),
        KeyEvent {
            code: KeyCode::Char('-'),
            ..
        } => Some(AppEvent::Zoom {
            factor: 1.0 / KEY_ZOOM_FACTOR,
        }),

        KeyEvent {
            code: KeyCode::Char('0'),
            ..
        } => Some(AppEvent::ResetView),

        _ => None,
    }
}

fn convert_mouse(mouse_event: MouseEvent) -> Option<PointerEvent> {
    let (x, y) = cell_center(mouse_event.column, mouse_event.row);
    let at = Point::new(x, y);

    match mouse_event.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(PointerEvent::Press(at)),
        MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
            Some(PointerEvent::Move(at))
        }
        MouseEventKind::Up(MouseButton::Left) => Some(PointerEvent::Release),

        // One notch, scrolling up is scrolling away
        MouseEventKind::ScrollUp => Some(PointerEvent::Wheel { at, delta_y: -1.0 }),
        MouseEventKind::ScrollDown => Some(PointerEvent::Wheel { at, delta_y: 1.0 }),

        _ => None,
    }
}

/// Raw mode, alternate screen and mouse capture, for as long as this lives.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;

        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            EnableFocusChange,
            cursor::Hide
        )?;

        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Nothing sensible left to do if the terminal can't be restored
        let _ = execute!(
            io::stdout(),
            cursor::Show,
            DisableFocusChange,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Draw a braille frame from the top left corner, followed by the ruler label.
pub fn present<W: Write>(out: &mut W, frame: &str, label: &str) -> io::Result<()> {
    queue!(
        out,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )?;

    for line in frame.lines() {
        queue!(out, style::Print(line), cursor::MoveToNextLine(1))?;
    }

    queue!(out, style::Print(label))?;

    out.flush()
}
