use thiserror::Error;

use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid board state: {0}")]
    Domain(String),

    #[error("Terminal error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Display task failed: {0}")]
    Task(String),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::MissingStyle(_) => AppError::Config(e.to_string()),
            DomainError::InvalidInput(msg) => AppError::Domain(msg),
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(e: tokio::task::JoinError) -> Self {
        AppError::Task(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::OrderStatus;

    #[test]
    fn config_display() {
        assert_eq!(
            AppError::Config("BOARD_CAPACITY must be positive".to_string()).to_string(),
            "Configuration error: BOARD_CAPACITY must be positive"
        );
    }

    #[test]
    fn missing_style_maps_to_config() {
        let app_err: AppError = DomainError::MissingStyle(OrderStatus::Cashier).into();
        assert!(matches!(app_err, AppError::Config(msg) if msg.contains("cashier")));
    }

    #[test]
    fn invalid_input_maps_to_domain() {
        let app_err: AppError = DomainError::InvalidInput("bad value".to_string()).into();
        assert!(matches!(app_err, AppError::Domain(_)));
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "tty gone");
        let app_err: AppError = io.into();
        assert_eq!(app_err.to_string(), "Terminal error: tty gone");
    }
}
