use crossterm::event::KeyEvent;
use enum_dispatch::enum_dispatch;
use ratatui::{buffer::Buffer, layout::Rect};
use std::fmt::Debug;

use crate::{app::Action, context::Context};

use super::{editor::Editor, help::Help, import_menu::ImportMenu};

#[enum_dispatch]
pub trait Component: Debug {
    fn on_key(&mut self, key: KeyEvent, context: &mut Context) -> Option<Action>;
    fn render(&mut self, area: Rect, buffer: &mut Buffer, context: &Context);
}

#[enum_dispatch(Component)]
#[derive(Debug)]
pub enum ComponentEnum {
    Editor,
    ImportMenu,
    Help,
}
