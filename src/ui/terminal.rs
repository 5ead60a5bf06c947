use std::io::{self, Stdout};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::time::Instant;

use crate::application::board::OrderBoard;
use crate::application::service::{BoardCommand, View};
use crate::domain::layout::{Chrome, Viewport};
use crate::domain::order::OrderStatus;
use crate::errors::AppError;
use crate::ui::view::Screen;

/// What a terminal event means to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Command(BoardCommand),
    Quit,
}

/// Maps a terminal event to board input. Filter keys only act while the
/// settings dialog is open.
pub fn map_event(event: &Event, settings_open: bool) -> Option<Input> {
    match event {
        Event::Resize(width, height) => Some(Input::Command(BoardCommand::Resize {
            width: *width,
            height: *height,
        })),
        Event::Key(key) => map_key(key, settings_open),
        _ => None,
    }
}

fn map_key(key: &KeyEvent, settings_open: bool) -> Option<Input> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Input::Quit);
    }

    let cmd = match key.code {
        KeyCode::Char('q') => return Some(Input::Quit),
        KeyCode::Char('s') => BoardCommand::ToggleSettings,
        KeyCode::Esc if settings_open => BoardCommand::CloseSettings,
        KeyCode::Enter if settings_open => BoardCommand::CloseSettings,
        KeyCode::Char(c @ '1'..='6') if settings_open => {
            let index = c as usize - '1' as usize;
            BoardCommand::ToggleStatus(OrderStatus::ALL[index])
        }
        KeyCode::Char('r') if settings_open => BoardCommand::ToggleReturns,
        KeyCode::Char('n') if settings_open => BoardCommand::NextStore,
        KeyCode::Left if !settings_open => BoardCommand::PrevPage,
        KeyCode::Right if !settings_open => BoardCommand::NextPage,
        KeyCode::Tab if !settings_open => BoardCommand::SelectNextCard,
        KeyCode::Enter | KeyCode::Char('d') if !settings_open => BoardCommand::ToggleDetail,
        _ => return None,
    };
    Some(Input::Command(cmd))
}

pub fn viewport() -> Result<Viewport, AppError> {
    let (width, height) = terminal::size()?;
    Ok(Viewport { width, height })
}

/// Raw mode and the alternate screen for as long as it lives.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> Result<Self, AppError> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Draws frames to stdout through ratatui.
pub struct TerminalView {
    screen: Screen,
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalView {
    pub fn new(screen: Screen) -> Result<Self, AppError> {
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        terminal.clear()?;
        Ok(Self { screen, terminal })
    }
}

impl View for TerminalView {
    fn measure(&self, board: &OrderBoard, width: u16) -> Chrome {
        self.screen.measure(board, width)
    }

    // the backend follows the real terminal size on every draw
    fn present(
        &mut self,
        board: &OrderBoard,
        _viewport: Viewport,
        now: Instant,
    ) -> Result<Option<Instant>, AppError> {
        self.screen.compose(&mut self.terminal, board, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn arrows_page_outside_settings() {
        assert_eq!(
            map_event(&key(KeyCode::Right), false),
            Some(Input::Command(BoardCommand::NextPage))
        );
        assert_eq!(
            map_event(&key(KeyCode::Left), false),
            Some(Input::Command(BoardCommand::PrevPage))
        );
        assert_eq!(map_event(&key(KeyCode::Right), true), None);
    }

    #[test]
    fn digits_toggle_statuses_in_settings() {
        assert_eq!(
            map_event(&key(KeyCode::Char('2')), true),
            Some(Input::Command(BoardCommand::ToggleStatus(OrderStatus::Problem)))
        );
        assert_eq!(map_event(&key(KeyCode::Char('2')), false), None);
        assert_eq!(map_event(&key(KeyCode::Char('7')), true), None);
    }

    #[test]
    fn enter_depends_on_dialog() {
        assert_eq!(
            map_event(&key(KeyCode::Enter), true),
            Some(Input::Command(BoardCommand::CloseSettings))
        );
        assert_eq!(
            map_event(&key(KeyCode::Enter), false),
            Some(Input::Command(BoardCommand::ToggleDetail))
        );
    }

    #[test]
    fn quit_keys() {
        assert_eq!(map_event(&key(KeyCode::Char('q')), false), Some(Input::Quit));
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(map_event(&ctrl_c, true), Some(Input::Quit));
    }

    #[test]
    fn resize_is_forwarded() {
        assert_eq!(
            map_event(&Event::Resize(100, 40), false),
            Some(Input::Command(BoardCommand::Resize {
                width: 100,
                height: 40
            }))
        );
    }
}
