pub mod card;
pub mod locale;
pub mod render;
pub mod terminal;
pub mod view;
