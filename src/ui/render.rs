//! Widgets for the kiosk board.
//!
//! The header and footer are built as paragraphs from the board state alone,
//! so the same widgets are measured for layout and drawn to the terminal.

use ratatui::layout::{Alignment, Constraint, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap};
use ratatui::Frame;

use crate::application::board::OrderBoard;
use crate::domain::layout::{self, Chrome, LayoutConfig, Viewport};
use crate::domain::order::{Order, OrderDetail, OrderStatus};
use crate::domain::status_style::StyleTable;
use crate::ui::card::{CardGrid, OrderCard};
use crate::ui::locale::{format_date, format_time};

const TITLE: &str = "АРМТЕК";
const SUBTITLE: &str = "Статус самовывоза";
const EMPTY_STATE: &str = "Все заказы выданы";
const RETURN_MARK: &str = "↩";
const RETURN_LEGEND: &str = "Обратная реализация";
const HEADER_BG: Color = Color::Rgb(48, 57, 63);
// keeps a legend entry on one line when the legend wraps
const NBSP: &str = "\u{a0}";
const LEGEND_GAP: &str = "   ";

pub struct Renderer {
    styles: StyleTable,
    layout: LayoutConfig,
}

impl Renderer {
    pub fn new(styles: StyleTable, layout: LayoutConfig) -> Self {
        Self { styles, layout }
    }

    /// Live header and footer heights for the board at this width, each
    /// including its separator line.
    pub fn measure(&self, board: &OrderBoard, width: u16) -> Chrome {
        Chrome {
            header: line_count(&self.header(board, width), width).saturating_add(1),
            footer: line_count(&self.footer(board), width).saturating_add(1),
        }
    }

    pub fn draw(&self, frame: &mut Frame, board: &OrderBoard, grid: &CardGrid) {
        let area = frame.area();
        let chrome = self.measure(board, area.width);
        let rows = Layout::vertical([
            Constraint::Length(chrome.header),
            Constraint::Min(0),
            Constraint::Length(chrome.footer),
        ])
        .split(area);

        frame.render_widget(
            self.header(board, area.width)
                .block(Block::new().borders(Borders::BOTTOM)),
            rows[0],
        );
        frame.render_widget(
            self.footer(board).block(Block::new().borders(Borders::TOP)),
            rows[2],
        );

        let body = rows[1].inner(Margin::new(
            self.layout.horizontal_padding / 2,
            self.layout.vertical_padding / 2,
        ));
        if board.settings_open() {
            frame.render_widget(self.settings(board), body);
        } else if board.visible_orders().is_empty() {
            draw_empty_state(frame, body);
        } else {
            let viewport = Viewport {
                width: area.width,
                height: area.height,
            };
            self.draw_grid(frame, board, grid, viewport, body);
            if let Some((order, detail)) = board.detail() {
                self.draw_detail(frame, &order, &detail, body);
            }
        }
    }

    pub fn header(&self, board: &OrderBoard, width: u16) -> Paragraph<'static> {
        let left = format!("{} │ {} │ {}", TITLE, SUBTITLE, board.store());
        let right = format!(
            "Количество {} │ Время {} │ [s] Настройки",
            board.order_count(),
            format_time(board.current_time())
        );

        let (left, right) = (Span::raw(left), Span::raw(right));
        let used = left.width() + right.width();
        let lines = if used + 2 <= usize::from(width) {
            let gap = Span::raw(" ".repeat(usize::from(width) - used));
            vec![Line::from(vec![left, gap, right])]
        } else {
            vec![Line::from(left), Line::from(right)]
        };

        Paragraph::new(lines)
            .style(
                Style::default()
                    .fg(Color::White)
                    .bg(HEADER_BG)
                    .add_modifier(Modifier::BOLD),
            )
            .wrap(Wrap { trim: true })
    }

    /// Legend of the shown statuses, then the page and date line.
    pub fn footer(&self, board: &OrderBoard) -> Paragraph<'static> {
        let mut legend: Vec<Span<'static>> = Vec::new();
        for status in board.selected_statuses() {
            let style = self.styles.get(status);
            if !legend.is_empty() {
                legend.push(Span::raw(LEGEND_GAP));
            }
            legend.push(Span::styled("■", Style::default().fg(style.border)));
            legend.push(Span::raw(format!("{}{}", NBSP, style.label.replace(' ', NBSP))));
        }
        if board.show_returns() {
            if !legend.is_empty() {
                legend.push(Span::raw(LEGEND_GAP));
            }
            legend.push(Span::styled(
                RETURN_MARK,
                Style::default()
                    .fg(Color::LightMagenta)
                    .add_modifier(Modifier::BOLD),
            ));
            legend.push(Span::raw(format!("{}{}", NBSP, RETURN_LEGEND.replace(' ', NBSP))));
        }

        let pager = board.pager();
        let date = format_date(board.current_time());
        let status = if pager.total() > 1 {
            format!("Страница {} из {} │ {}", pager.current() + 1, pager.total(), date)
        } else {
            date
        };

        let mut lines = Vec::with_capacity(2);
        if !legend.is_empty() {
            lines.push(Line::from(legend));
        }
        lines.push(Line::from(status).alignment(Alignment::Right));
        Paragraph::new(lines).wrap(Wrap { trim: true })
    }

    /// Places cards row by row. Cards that would cross the bottom edge are
    /// left out so the footer stays on screen.
    fn draw_grid(
        &self,
        frame: &mut Frame,
        board: &OrderBoard,
        grid: &CardGrid,
        viewport: Viewport,
        area: Rect,
    ) {
        let columns = layout::columns(viewport, &self.layout).max(1);
        let width = u32::from(self.layout.card_width.max(3));
        let height = u32::from(self.layout.card_height.max(3));
        let gap = u32::from(self.layout.gap);
        let selected = board.selected_card();

        for (i, card) in grid.cards().iter().enumerate() {
            let (row, col) = ((i / columns) as u32, (i % columns) as u32);
            let x = u32::from(area.x) + col * (width + gap);
            let y = u32::from(area.y) + row * (height + gap);
            if x + width > u32::from(area.right()) || y + height > u32::from(area.bottom()) {
                continue;
            }
            let cell = Rect::new(x as u16, y as u16, width as u16, height as u16);
            self.draw_card(frame, card, selected == Some(i), cell);
        }
    }

    /// A bordered card in its status colors. Cards still waiting for their
    /// entrance leave the cell blank.
    pub fn draw_card(&self, frame: &mut Frame, card: &OrderCard, selected: bool, area: Rect) {
        if !card.is_visible() {
            return;
        }

        let style = self.styles.get(card.status);
        let block = Block::bordered()
            .border_type(if selected {
                BorderType::Double
            } else {
                BorderType::Plain
            })
            .border_style(Style::default().fg(style.border))
            .style(Style::default().bg(style.background));

        let inner = usize::from(area.width.saturating_sub(2));
        let text = Style::default().fg(style.text);
        let label = Line::from(Span::styled(style.label, text));
        let number = Line::from(Span::styled(
            card.number.to_string(),
            text.add_modifier(Modifier::BOLD),
        ));
        let accent = if card.is_return {
            Line::from(vec![
                Span::styled(
                    RETURN_MARK,
                    Style::default()
                        .fg(Color::LightMagenta)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("━".repeat(inner.saturating_sub(1)), Style::default().fg(style.accent)),
            ])
        } else {
            Line::from(Span::styled("━".repeat(inner), Style::default().fg(style.accent)))
        };

        let lines = match area.height.saturating_sub(2) {
            1 => vec![number],
            2 => vec![label, number],
            _ => vec![label, number, accent],
        };
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center).block(block),
            area,
        );
    }

    fn settings(&self, board: &OrderBoard) -> Paragraph<'static> {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let mut lines = vec![Line::from("Выбор магазина   [n] следующий")];
        for (i, store) in board.stores().iter().enumerate() {
            let mark = if i == board.store_index() { "●" } else { "○" };
            lines.push(Line::from(format!("  {} {}", mark, store)));
        }

        lines.push(Line::default());
        lines.push(Line::from("Фильтр по статусам"));
        for (i, status) in OrderStatus::ALL.iter().enumerate() {
            let style = self.styles.get(*status);
            let check = if board.is_selected(*status) { "[x]" } else { "[ ]" };
            lines.push(Line::from(vec![
                Span::raw(format!("  {} {} ", check, i + 1)),
                Span::styled("■", Style::default().fg(style.border)),
                Span::raw(format!(" {}", style.label)),
            ]));
        }

        lines.push(Line::default());
        lines.push(Line::from(RETURN_LEGEND));
        let check = if board.show_returns() { "[x]" } else { "[ ]" };
        lines.push(Line::from(format!("  {} r {} Показывать возвраты", check, RETURN_MARK)));

        lines.push(Line::default());
        lines.push(Line::from(Span::styled("[Enter] Применить", bold)));

        Paragraph::new(lines).block(
            Block::bordered()
                .title(Span::styled(" Настройки ", bold))
                .padding(Padding::horizontal(1)),
        )
    }

    /// Popover with the mocked order details over the top left of the grid.
    fn draw_detail(&self, frame: &mut Frame, order: &Order, detail: &OrderDetail, area: Rect) {
        let style = self.styles.get(order.status);
        let mut rows = vec![
            format!("Статус: {}", style.label),
            format!("Клиент: {}", detail.client_name),
            format!("Оплата: {}", detail.payment),
            format!("Документы: {}", detail.documents.join(", ")),
        ];
        if order.is_return {
            rows.push(format!("{} {}", RETURN_MARK, RETURN_LEGEND));
        }
        let title = format!(" Заказ {} ", order.number);

        let lines: Vec<Line<'static>> = rows.into_iter().map(Line::from).collect();
        let content = lines
            .iter()
            .map(Line::width)
            .chain(std::iter::once(Span::raw(title.as_str()).width()))
            .max()
            .unwrap_or(0);
        let width = u16::try_from(content + 4).unwrap_or(u16::MAX).min(area.width);
        let height = u16::try_from(lines.len() + 2).unwrap_or(u16::MAX).min(area.height);
        let popover = Rect::new(area.x, area.y, width, height);

        frame.render_widget(Clear, popover);
        frame.render_widget(
            Paragraph::new(lines)
                .style(Style::default().fg(Color::White).bg(Color::Black))
                .block(
                    Block::bordered()
                        .title(title)
                        .padding(Padding::horizontal(1)),
                ),
            popover,
        );
    }
}

fn draw_empty_state(frame: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let line = Rect::new(area.x, area.y + area.height / 2, area.width, 1);
    frame.render_widget(
        Paragraph::new(EMPTY_STATE)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD)),
        line,
    );
}

fn line_count(paragraph: &Paragraph, width: u16) -> u16 {
    u16::try_from(paragraph.line_count(width)).unwrap_or(u16::MAX)
}
