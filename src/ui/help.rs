use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::app::Action;
use crate::context::Context;
use crate::ui::chrome;
use crate::ui::editor::Editor;

const BINDINGS: &[(&str, &str)] = &[
    ("j / k", "Move the selection or field focus"),
    ("Tab", "Switch between the prompt list and the form"),
    ("Enter", "Open the highlighted prompt / edit the focused field"),
    ("Space", "Toggle the highlighted permission group"),
    ("a", "Add a new prompt"),
    ("s", "Save the current prompt"),
    ("Backspace x2", "Delete the current prompt"),
    ("i", "Import prompts from a JSON file"),
    ("x", "Export all prompts to JSON"),
    ("?", "This screen"),
    ("q / Esc", "Quit"),
];

#[derive(Debug, Default)]
pub struct Help;

impl super::Component for Help {
    fn on_key(&mut self, key: KeyEvent, context: &mut Context) -> Option<Action> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
                Some(Action::SwitchComponent(Editor::new(context.store).into()))
            }
            _ => None,
        }
    }

    fn render(&mut self, area: Rect, buffer: &mut Buffer, _context: &Context) {
        let lines: Vec<Line> = BINDINGS
            .iter()
            .map(|(keys, what)| {
                Line::from(vec![
                    Span::styled(format!("{keys:>14}  "), Style::default().fg(Color::Yellow)),
                    Span::raw(*what),
                ])
            })
            .collect();
        let height = lines.len() as u16 + 2;
        let popup = chrome::center_rect(area, Constraint::Length(64), Constraint::Length(height));
        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .title("Key bindings")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
        paragraph.render(popup, buffer);
    }
}
