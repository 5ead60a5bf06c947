use thiserror::Error;

use super::order::OrderStatus;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("No style entry for status '{0}'")]
    MissingStyle(OrderStatus),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
