pub mod chrome;
pub mod component;
pub mod editor;
pub mod form;
pub mod help;
pub mod import_menu;
pub mod widgets;

pub use component::{Component, ComponentEnum};
pub use editor::Editor;
pub use help::Help;
pub use import_menu::ImportMenu;
