// ui/import_menu.rs
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, StatefulWidget, Widget},
};

use crate::app::Action;
use crate::context::Context;
use crate::transfer;
use crate::ui::chrome;
use crate::ui::editor::Editor;
use crate::ui::widgets::StatefulList;

/// File picker for the import workflow. Confirming a file kicks off an
/// async read; the screen stays up until the batch is accepted (the app
/// swaps back to the editor) or rejected (`fail` pins the report here).
#[derive(Debug)]
pub struct ImportMenu {
    files: StatefulList<PathBuf>,
    error: Option<String>,
    pending: bool,
}

impl ImportMenu {
    pub fn new() -> Self {
        Self {
            files: StatefulList::with_items(transfer::scan_import_candidates()),
            error: None,
            pending: false,
        }
    }

    /// Called by the app when the in-flight import was rejected. The picker
    /// becomes interactive again with the rejection report shown in full.
    pub fn fail(&mut self, message: String) {
        self.pending = false;
        self.error = Some(message);
    }
}

impl Default for ImportMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl super::Component for ImportMenu {
    fn on_key(&mut self, key: KeyEvent, context: &mut Context) -> Option<Action> {
        if self.pending {
            return None;
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.error = None;
                self.files.previous();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.error = None;
                self.files.next();
            }
            KeyCode::Enter => {
                if let Some(path) = self.files.selected_item().cloned() {
                    self.error = None;
                    self.pending = true;
                    return Some(Action::ConfirmImport(path));
                }
            }
            KeyCode::Char('r') => {
                self.error = None;
                self.files = StatefulList::with_items(transfer::scan_import_candidates());
            }
            KeyCode::Esc | KeyCode::Char('q') => {
                return Some(Action::SwitchComponent(Editor::new(context.store).into()));
            }
            _ => {}
        }
        None
    }

    fn render(&mut self, area: Rect, buffer: &mut Buffer, context: &Context) {
        let [header, console, body, report, status] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .areas(area);

        chrome::render_header(buffer, header);
        chrome::render_notice(buffer, console, context.notice.as_ref());

        let list_area = chrome::center_rect(body, Constraint::Percentage(70), Constraint::Fill(1));
        let items: Vec<ListItem> = self
            .files
            .items
            .iter()
            .map(|path| ListItem::new(Line::from(path.display().to_string())))
            .collect();
        let title = if self.pending {
            "Import a prompt file (reading...)"
        } else {
            "Import a prompt file"
        };
        let list = List::new(items)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        StatefulWidget::render(list, list_area, buffer, &mut self.files.state);

        if let Some(error) = &self.error {
            let paragraph = Paragraph::new(error.as_str())
                .style(Style::default().fg(Color::Red))
                .wrap(ratatui::widgets::Wrap { trim: true });
            paragraph.render(report, buffer);
        }

        chrome::render_status(
            buffer,
            status,
            "j/k select, Enter import, r rescan, Esc back",
        );
    }
}
