pub mod app;
pub mod context;
pub mod error;
pub mod logging;
pub mod message;
pub mod role;
pub mod store;
pub mod transfer;
pub mod tui;
pub mod ui;

pub const MIN_WIDTH: u16 = 90;
pub const MIN_HEIGHT: u16 = 30;
