use ratatui::style::Color;

use super::errors::DomainError;
use super::order::OrderStatus;

/// How a card of a given status is painted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusStyle {
    pub background: Color,
    pub border: Color,
    pub accent: Color,
    pub text: Color,
    pub label: &'static str,
}

/// Status → style lookup that is complete over [`OrderStatus`].
///
/// Built once at startup; construction fails if any status is left without an
/// entry, so lookups afterwards cannot miss.
#[derive(Debug, Clone)]
pub struct StyleTable {
    styles: Vec<StatusStyle>,
}

impl StyleTable {
    pub fn from_entries(
        entries: impl IntoIterator<Item = (OrderStatus, StatusStyle)>,
    ) -> Result<Self, DomainError> {
        let entries: Vec<(OrderStatus, StatusStyle)> = entries.into_iter().collect();
        let styles = OrderStatus::ALL
            .iter()
            .map(|status| {
                entries
                    .iter()
                    .find(|(s, _)| s == status)
                    .map(|(_, style)| style.clone())
                    .ok_or(DomainError::MissingStyle(*status))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { styles })
    }

    /// The board's own palette and ru-RU labels.
    pub fn standard() -> Result<Self, DomainError> {
        Self::from_entries(OrderStatus::ALL.iter().map(|s| (*s, standard_style(*s))))
    }

    pub fn get(&self, status: OrderStatus) -> &StatusStyle {
        &self.styles[legend_index(status)]
    }
}

fn legend_index(status: OrderStatus) -> usize {
    match status {
        OrderStatus::Ready => 0,
        OrderStatus::Problem => 1,
        OrderStatus::Collecting => 2,
        OrderStatus::Cashier => 3,
        OrderStatus::Waiting => 4,
        OrderStatus::Return => 5,
    }
}

fn standard_style(status: OrderStatus) -> StatusStyle {
    match status {
        OrderStatus::Ready => StatusStyle {
            background: Color::Rgb(20, 60, 35),
            border: Color::LightGreen,
            accent: Color::Green,
            text: Color::White,
            label: "Готов",
        },
        OrderStatus::Problem => StatusStyle {
            background: Color::Rgb(70, 20, 20),
            border: Color::LightRed,
            accent: Color::Red,
            text: Color::White,
            label: "Проблема",
        },
        OrderStatus::Collecting => StatusStyle {
            background: Color::Rgb(70, 60, 10),
            border: Color::LightYellow,
            accent: Color::Yellow,
            text: Color::White,
            label: "Собирается",
        },
        OrderStatus::Cashier => StatusStyle {
            background: Color::Rgb(15, 35, 75),
            border: Color::LightBlue,
            accent: Color::Blue,
            text: Color::White,
            label: "На кассу",
        },
        OrderStatus::Waiting => StatusStyle {
            background: Color::Rgb(45, 45, 50),
            border: Color::Gray,
            accent: Color::DarkGray,
            text: Color::White,
            label: "Ожидает",
        },
        OrderStatus::Return => StatusStyle {
            background: Color::Rgb(50, 20, 70),
            border: Color::LightMagenta,
            accent: Color::Magenta,
            text: Color::White,
            label: "Возврат",
        },
    }
}
