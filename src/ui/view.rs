use std::time::Duration;

use ratatui::backend::{Backend, TestBackend};
use ratatui::buffer::{Buffer, Cell};
use ratatui::Terminal;
use tokio::sync::watch;
use tokio::time::Instant;

use crate::application::board::OrderBoard;
use crate::application::service::View;
use crate::domain::layout::{Chrome, Viewport};
use crate::errors::AppError;
use crate::ui::card::CardGrid;
use crate::ui::render::Renderer;

/// Cards on screen plus the renderer that draws them.
pub struct Screen {
    renderer: Renderer,
    grid: CardGrid,
    stagger: Duration,
}

impl Screen {
    pub fn new(renderer: Renderer, stagger: Duration) -> Self {
        Self {
            renderer,
            grid: CardGrid::default(),
            stagger,
        }
    }

    pub fn measure(&self, board: &OrderBoard, width: u16) -> Chrome {
        self.renderer.measure(board, width)
    }

    /// Draws the next frame and returns the time of the next pending card
    /// entrance.
    pub fn compose<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        board: &OrderBoard,
        now: Instant,
    ) -> Result<Option<Instant>, AppError> {
        if board.settings_open() {
            // the dialog covers the grid; cards mount again when it closes
            self.grid.clear();
        } else {
            self.grid.sync(&board.current_page_orders(), self.stagger, now);
            self.grid.tick(now);
        }

        let (renderer, grid) = (&self.renderer, &self.grid);
        terminal.draw(|frame| renderer.draw(frame, board, grid))?;
        Ok(self.grid.next_reveal())
    }
}

/// Draws into ratatui's in-memory backend. Every frame is published on a
/// watch channel as one string per row.
pub struct HeadlessView {
    screen: Screen,
    terminal: Terminal<TestBackend>,
    frames: watch::Sender<Vec<String>>,
}

impl HeadlessView {
    pub fn new(
        renderer: Renderer,
        stagger: Duration,
    ) -> Result<(Self, watch::Receiver<Vec<String>>), AppError> {
        let (frames, rx) = watch::channel(Vec::new());
        let view = Self {
            screen: Screen::new(renderer, stagger),
            terminal: Terminal::new(TestBackend::new(0, 0))?,
            frames,
        };
        Ok((view, rx))
    }
}

impl View for HeadlessView {
    fn measure(&self, board: &OrderBoard, width: u16) -> Chrome {
        self.screen.measure(board, width)
    }

    fn present(
        &mut self,
        board: &OrderBoard,
        viewport: Viewport,
        now: Instant,
    ) -> Result<Option<Instant>, AppError> {
        let area = self.terminal.backend().buffer().area;
        if (area.width, area.height) != (viewport.width, viewport.height) {
            self.terminal
                .backend_mut()
                .resize(viewport.width, viewport.height);
        }

        let wake = self.screen.compose(&mut self.terminal, board, now)?;
        self.frames
            .send_replace(buffer_lines(self.terminal.backend().buffer()));
        Ok(wake)
    }
}

/// Rows of a drawn buffer as plain text.
pub fn buffer_lines(buffer: &Buffer) -> Vec<String> {
    let width = usize::from(buffer.area.width).max(1);
    buffer
        .content
        .chunks(width)
        .map(|row| row.iter().map(Cell::symbol).collect())
        .collect()
}
