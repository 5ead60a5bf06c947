pub mod board;
pub mod clock;
pub mod feed;
pub mod service;
