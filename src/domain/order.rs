use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use uuid::Uuid;

use super::errors::DomainError;

/// Fulfillment stage of a pickup order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Waiting,
    Collecting,
    Ready,
    Problem,
    Cashier,
    Return,
}

impl OrderStatus {
    /// Every status in legend order.
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Ready,
        OrderStatus::Problem,
        OrderStatus::Collecting,
        OrderStatus::Cashier,
        OrderStatus::Waiting,
        OrderStatus::Return,
    ];

    pub fn key(self) -> &'static str {
        match self {
            OrderStatus::Waiting => "waiting",
            OrderStatus::Collecting => "collecting",
            OrderStatus::Ready => "ready",
            OrderStatus::Problem => "problem",
            OrderStatus::Cashier => "cashier",
            OrderStatus::Return => "return",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            // "new" is what the newer boards call a waiting order
            "waiting" | "new" => Ok(OrderStatus::Waiting),
            "collecting" => Ok(OrderStatus::Collecting),
            "ready" => Ok(OrderStatus::Ready),
            "problem" => Ok(OrderStatus::Problem),
            "cashier" => Ok(OrderStatus::Cashier),
            "return" => Ok(OrderStatus::Return),
            other => Err(DomainError::InvalidInput(format!(
                "unknown order status '{}'",
                other
            ))),
        }
    }
}

/// Short numeric label shown to the customer. Not unique across the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct OrderNumber(pub u32);

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    pub id: Uuid,
    pub number: OrderNumber,
    pub status: OrderStatus,
    pub is_return: bool,
}

impl Order {
    pub fn new(number: u32, status: OrderStatus, is_return: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            number: OrderNumber(number),
            status,
            is_return,
        }
    }
}

/// Secondary fields shown in the detail popover.
///
/// The values are mocked: they are picked from fixed lists using the bytes of
/// the order id, so the same order always shows the same details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDetail {
    pub client_name: &'static str,
    pub payment: &'static str,
    pub documents: Vec<String>,
}

const CLIENT_NAMES: [&str; 6] = [
    "Иванов И.И.",
    "Петров П.П.",
    "Сидорова А.В.",
    "Кузнецов Д.С.",
    "Смирнова Е.А.",
    "Попов М.Н.",
];

const PAYMENTS: [&str; 3] = ["Оплачен", "Не оплачен", "Частично оплачен"];

impl OrderDetail {
    pub fn for_order(order: &Order) -> Self {
        let bytes = order.id.as_bytes();
        let documents = (0..1 + bytes[2] as usize % 2)
            .map(|i| format!("РН-{:06}", u32::from(bytes[3 + i]) * 1000 + order.number.0 % 1000))
            .collect();

        Self {
            client_name: CLIENT_NAMES[bytes[0] as usize % CLIENT_NAMES.len()],
            payment: PAYMENTS[bytes[1] as usize % PAYMENTS.len()],
            documents,
        }
    }
}
