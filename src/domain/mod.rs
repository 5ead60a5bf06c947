pub mod errors;
pub mod layout;
pub mod order;
pub mod pagination;
pub mod ports;
pub mod status_style;
